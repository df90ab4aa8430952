use anyhow::anyhow;
use tracing::{info, warn};

use crate::domain::error::{DomainError, DomainResult};
use crate::storage::{AppointmentRepository, PetRepository, ServiceRepository};
use shared::{Appointment, CreateAppointmentRequest, UpdateAppointmentRequest};

/// Books, reschedules and cancels appointments.
///
/// Every appointment returned here carries its pet and service records.
/// Overlapping bookings are accepted; the agenda shows the first match per slot.
#[derive(Clone)]
pub struct AppointmentService {
    repo: AppointmentRepository,
    pets: PetRepository,
    services: ServiceRepository,
}

impl AppointmentService {
    pub fn new(
        repo: AppointmentRepository,
        pets: PetRepository,
        services: ServiceRepository,
    ) -> Self {
        Self { repo, pets, services }
    }

    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> DomainResult<Appointment> {
        info!(
            "Booking appointment: pet_id={}, service_id={}, date_time={}",
            request.pet_id, request.service_id, request.date_time
        );

        if self.pets.get_pet(request.pet_id).await?.is_none() {
            warn!("Booking rejected, unknown pet {}", request.pet_id);
            return Err(DomainError::Validation(format!("Unknown pet: {}", request.pet_id)));
        }
        if self.services.get_service(request.service_id).await?.is_none() {
            warn!("Booking rejected, unknown service {}", request.service_id);
            return Err(DomainError::Validation(format!(
                "Unknown service: {}",
                request.service_id
            )));
        }

        let appointment_id = self
            .repo
            .store_appointment(
                request.date_time,
                request.pet_id,
                request.service_id,
                request.status.unwrap_or_default(),
            )
            .await?;

        let appointment = self
            .repo
            .get_appointment(appointment_id)
            .await?
            .ok_or_else(|| anyhow!("Appointment {} vanished after insert", appointment_id))?;
        info!("Booked appointment {}", appointment.id);
        Ok(appointment)
    }

    pub async fn get_appointment(&self, appointment_id: i64) -> DomainResult<Appointment> {
        self.repo
            .get_appointment(appointment_id)
            .await?
            .ok_or_else(|| not_found(appointment_id))
    }

    pub async fn list_appointments(&self) -> DomainResult<Vec<Appointment>> {
        let appointments = self.repo.list_appointments().await?;
        info!("Found {} appointments", appointments.len());
        Ok(appointments)
    }

    pub async fn update_appointment(
        &self,
        appointment_id: i64,
        request: UpdateAppointmentRequest,
    ) -> DomainResult<Appointment> {
        info!("Updating appointment {}: {:?}", appointment_id, request);

        let current = self.get_appointment(appointment_id).await?;
        let date_time = request.date_time.unwrap_or(current.date_time);
        let status = request.status.unwrap_or(current.status);

        if !self.repo.update_appointment(appointment_id, date_time, status).await? {
            return Err(not_found(appointment_id));
        }
        self.get_appointment(appointment_id).await
    }

    pub async fn delete_appointment(&self, appointment_id: i64) -> DomainResult<()> {
        info!("Deleting appointment {}", appointment_id);

        if !self.repo.delete_appointment(appointment_id).await? {
            return Err(not_found(appointment_id));
        }
        Ok(())
    }
}

fn not_found(appointment_id: i64) -> DomainError {
    DomainError::NotFound(format!("Appointment not found: {}", appointment_id))
}
