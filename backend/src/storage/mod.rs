//! # Storage Module
//!
//! SQLite persistence for pets, services, appointments and vaccine records.
//!
//! Each entity has a repository wrapping the shared [`DbConnection`]. Repositories
//! speak in `shared` records and return `anyhow::Result`; the domain layer decides
//! which failures are user errors.
//!
//! Dates are stored as text: appointment instants as RFC 3339 UTC with second
//! precision, vaccine dates as `YYYY-MM-DD`.

pub mod connection;
pub mod repositories;

pub use connection::DbConnection;
pub use repositories::{
    AppointmentRepository,
    PetRepository,
    ServiceRepository,
    VaccineRepository,
};

/// True when the error chain contains a SQLite foreign key violation
pub fn is_foreign_key_violation(error: &anyhow::Error) -> bool {
    match error.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db_error)) => db_error.is_foreign_key_violation(),
        _ => false,
    }
}
