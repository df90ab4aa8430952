//! Business rules for the pet shop.
//!
//! Services validate requests, resolve references between records and turn
//! storage failures into [`DomainError`]s the REST layer can map to statuses.

pub mod appointment_service;
pub mod catalog_service;
pub mod error;
pub mod pet_service;
pub mod vaccine_service;

pub use appointment_service::AppointmentService;
pub use catalog_service::CatalogService;
pub use error::{DomainError, DomainResult};
pub use pet_service::PetService;
pub use vaccine_service::VaccineService;
