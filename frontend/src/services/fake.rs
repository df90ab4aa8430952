//! In-memory [`PetShopApi`] used by the view-model tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use shared::{
    Appointment, CreateAppointmentRequest, CreatePetRequest, CreateServiceRequest,
    CreateVaccineRequest, Pet, Service, UpdateAppointmentRequest, UpdatePetRequest,
    UpdateServiceRequest, UpdateVaccineRequest, VaccineRecord,
};

use super::api::{ApiError, ApiResult, PetShopApi};

/// Records every call by name; operations listed with [`FakeApi::fail_on`] return a 500
#[derive(Default)]
pub struct FakeApi {
    pub pets: Mutex<Vec<Pet>>,
    pub services: Mutex<Vec<Service>>,
    pub appointments: Mutex<Vec<Appointment>>,
    pub vaccines: Mutex<Vec<VaccineRecord>>,
    calls: Mutex<Vec<&'static str>>,
    failing: Mutex<HashSet<&'static str>>,
    next_id: Mutex<i64>,
}

impl FakeApi {
    pub fn with_data(pets: Vec<Pet>, services: Vec<Service>) -> Self {
        let fake = Self::default();
        *fake.pets.lock().unwrap() = pets;
        *fake.services.lock().unwrap() = services;
        *fake.next_id.lock().unwrap() = 100;
        fake
    }

    pub fn fail_on(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn enter(&self, operation: &'static str) -> ApiResult<()> {
        self.calls.lock().unwrap().push(operation);
        if self.failing.lock().unwrap().contains(operation) {
            return Err(ApiError::Status {
                status: 500,
                message: format!("{} failed", operation),
            });
        }
        Ok(())
    }

    fn next_id(&self) -> i64 {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        *next
    }

    fn not_found(what: &str, id: i64) -> ApiError {
        ApiError::Status { status: 404, message: format!("{} not found: {}", what, id) }
    }
}

#[async_trait]
impl PetShopApi for FakeApi {
    async fn list_pets(&self) -> ApiResult<Vec<Pet>> {
        self.enter("list_pets")?;
        Ok(self.pets.lock().unwrap().clone())
    }

    async fn create_pet(&self, request: &CreatePetRequest) -> ApiResult<Pet> {
        self.enter("create_pet")?;
        let pet = Pet {
            id: self.next_id(),
            name: request.name.clone(),
            breed: request.breed.clone(),
            owner: request.owner.clone(),
        };
        self.pets.lock().unwrap().push(pet.clone());
        Ok(pet)
    }

    async fn update_pet(&self, pet_id: i64, request: &UpdatePetRequest) -> ApiResult<Pet> {
        self.enter("update_pet")?;
        let mut pets = self.pets.lock().unwrap();
        let pet = pets.iter_mut().find(|p| p.id == pet_id).ok_or_else(|| Self::not_found("Pet", pet_id))?;
        if let Some(name) = &request.name {
            pet.name = name.clone();
        }
        if let Some(breed) = &request.breed {
            pet.breed = breed.clone();
        }
        if let Some(owner) = &request.owner {
            pet.owner = owner.clone();
        }
        Ok(pet.clone())
    }

    async fn delete_pet(&self, pet_id: i64) -> ApiResult<()> {
        self.enter("delete_pet")?;
        let mut pets = self.pets.lock().unwrap();
        let before = pets.len();
        pets.retain(|p| p.id != pet_id);
        if pets.len() == before {
            return Err(Self::not_found("Pet", pet_id));
        }
        Ok(())
    }

    async fn list_services(&self) -> ApiResult<Vec<Service>> {
        self.enter("list_services")?;
        Ok(self.services.lock().unwrap().clone())
    }

    async fn create_service(&self, request: &CreateServiceRequest) -> ApiResult<Service> {
        self.enter("create_service")?;
        let service = Service { id: self.next_id(), name: request.name.clone(), price: request.price };
        self.services.lock().unwrap().push(service.clone());
        Ok(service)
    }

    async fn update_service(&self, service_id: i64, request: &UpdateServiceRequest) -> ApiResult<Service> {
        self.enter("update_service")?;
        let mut services = self.services.lock().unwrap();
        let service = services
            .iter_mut()
            .find(|s| s.id == service_id)
            .ok_or_else(|| Self::not_found("Service", service_id))?;
        if let Some(name) = &request.name {
            service.name = name.clone();
        }
        if let Some(price) = request.price {
            service.price = price;
        }
        Ok(service.clone())
    }

    async fn delete_service(&self, service_id: i64) -> ApiResult<()> {
        self.enter("delete_service")?;
        self.services.lock().unwrap().retain(|s| s.id != service_id);
        Ok(())
    }

    async fn list_appointments(&self) -> ApiResult<Vec<Appointment>> {
        self.enter("list_appointments")?;
        Ok(self.appointments.lock().unwrap().clone())
    }

    async fn create_appointment(&self, request: &CreateAppointmentRequest) -> ApiResult<Appointment> {
        self.enter("create_appointment")?;
        let appointment = Appointment {
            id: self.next_id(),
            date_time: request.date_time,
            pet_id: request.pet_id,
            service_id: request.service_id,
            status: request.status.unwrap_or_default(),
            pet: self.pets.lock().unwrap().iter().find(|p| p.id == request.pet_id).cloned(),
            service: self.services.lock().unwrap().iter().find(|s| s.id == request.service_id).cloned(),
        };
        self.appointments.lock().unwrap().push(appointment.clone());
        Ok(appointment)
    }

    async fn update_appointment(
        &self,
        appointment_id: i64,
        request: &UpdateAppointmentRequest,
    ) -> ApiResult<Appointment> {
        self.enter("update_appointment")?;
        let mut appointments = self.appointments.lock().unwrap();
        let appointment = appointments
            .iter_mut()
            .find(|a| a.id == appointment_id)
            .ok_or_else(|| Self::not_found("Appointment", appointment_id))?;
        if let Some(date_time) = request.date_time {
            appointment.date_time = date_time;
        }
        if let Some(status) = request.status {
            appointment.status = status;
        }
        Ok(appointment.clone())
    }

    async fn delete_appointment(&self, appointment_id: i64) -> ApiResult<()> {
        self.enter("delete_appointment")?;
        self.appointments.lock().unwrap().retain(|a| a.id != appointment_id);
        Ok(())
    }

    async fn list_vaccines(&self) -> ApiResult<Vec<VaccineRecord>> {
        self.enter("list_vaccines")?;
        Ok(self.vaccines.lock().unwrap().clone())
    }

    async fn create_vaccine(&self, request: &CreateVaccineRequest) -> ApiResult<VaccineRecord> {
        self.enter("create_vaccine")?;
        let record = VaccineRecord {
            id: self.next_id(),
            pet_id: request.pet_id,
            vaccine_name: request.vaccine_name.clone(),
            applied_on: request.applied_on,
            next_dose: request.next_dose,
            pet: None,
        };
        self.vaccines.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_vaccine(
        &self,
        vaccine_id: i64,
        request: &UpdateVaccineRequest,
    ) -> ApiResult<VaccineRecord> {
        self.enter("update_vaccine")?;
        let mut vaccines = self.vaccines.lock().unwrap();
        let record = vaccines
            .iter_mut()
            .find(|v| v.id == vaccine_id)
            .ok_or_else(|| Self::not_found("Vaccine record", vaccine_id))?;
        if let Some(name) = &request.vaccine_name {
            record.vaccine_name = name.clone();
        }
        if let Some(applied_on) = request.applied_on {
            record.applied_on = applied_on;
        }
        if request.next_dose.is_some() {
            record.next_dose = request.next_dose;
        }
        Ok(record.clone())
    }

    async fn delete_vaccine(&self, vaccine_id: i64) -> ApiResult<()> {
        self.enter("delete_vaccine")?;
        let mut vaccines = self.vaccines.lock().unwrap();
        let before = vaccines.len();
        vaccines.retain(|v| v.id != vaccine_id);
        if vaccines.len() == before {
            return Err(Self::not_found("Vaccine record", vaccine_id));
        }
        Ok(())
    }
}
