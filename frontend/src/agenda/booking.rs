//! # Booking Submission
//!
//! Turns the pending booking form into a persisted appointment. Checks run
//! before any request: date and time, then pet, then service. A service name
//! missing from the catalog is created on the fly with price 0.

use chrono::{NaiveDate, TimeZone, Utc};
use shared::{Appointment, CreateAppointmentRequest, CreateServiceRequest, Service};
use thiserror::Error;

use crate::agenda::slots::parse_slot;
use crate::services::{ApiError, PetShopApi};

/// Form state of the appointment being booked
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingBooking {
    pub date: Option<NaiveDate>,
    /// "HH:MM"
    pub time: Option<String>,
    pub pet_id: Option<i64>,
    pub service_name: Option<String>,
}

impl PendingBooking {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BookingError {
    #[error("Invalid time")]
    InvalidTime,

    #[error("No pet selected")]
    NoPetSelected,

    #[error("No service selected")]
    NoServiceSelected,

    #[error("Time slot {0} is already booked")]
    SlotTaken(String),

    #[error("Could not create service: {0}")]
    ServiceCreation(ApiError),

    #[error("Could not book appointment: {0}")]
    AppointmentCreation(ApiError),
}

/// Persist `pending` as an appointment.
///
/// On success the new appointment is appended to `appointments` and `pending`
/// is cleared. On failure both stay as they were, except that a service created
/// before a failed appointment request stays in `services`: it exists on the
/// server.
pub async fn submit_booking<A: PetShopApi + ?Sized>(
    api: &A,
    pending: &mut PendingBooking,
    services: &mut Vec<Service>,
    appointments: &mut Vec<Appointment>,
) -> Result<Appointment, BookingError> {
    let (date, time) = match (pending.date, pending.time.as_deref()) {
        (Some(date), Some(time)) => (date, parse_slot(time).ok_or(BookingError::InvalidTime)?),
        _ => return Err(BookingError::InvalidTime),
    };
    let pet_id = pending.pet_id.ok_or(BookingError::NoPetSelected)?;
    let service_name = pending
        .service_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .ok_or(BookingError::NoServiceSelected)?;

    let service_id = match services.iter().find(|s| s.name == service_name) {
        Some(service) => service.id,
        None => {
            log::info!("Service '{}' not in catalog, creating it", service_name);
            let request = CreateServiceRequest { name: service_name.to_string(), price: 0.0 };
            let created = api
                .create_service(&request)
                .await
                .map_err(BookingError::ServiceCreation)?;
            let id = created.id;
            services.push(created);
            id
        }
    };

    let request = CreateAppointmentRequest {
        date_time: Utc.from_utc_datetime(&date.and_time(time)),
        pet_id,
        service_id,
        status: None,
    };

    let appointment = api.create_appointment(&request).await.map_err(|e| {
        log::error!("Failed to book appointment at {}: {}", request.date_time, e);
        BookingError::AppointmentCreation(e)
    })?;

    log::info!("Booked appointment {} at {}", appointment.id, appointment.date_time);
    appointments.push(appointment.clone());
    pending.clear();
    Ok(appointment)
}
