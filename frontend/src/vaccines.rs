//! # Vaccine Register
//!
//! Lists vaccine applications, records new ones and searches them by pet name.

use chrono::NaiveDate;
use shared::{CreateVaccineRequest, Pet, VaccineRecord};

use crate::error::FormError;
use crate::services::{ApiResult, PetShopApi};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VaccineForm {
    pub pet_id: Option<i64>,
    pub vaccine_name: String,
    pub applied_on: Option<NaiveDate>,
    pub next_dose: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct VaccineRegister {
    pub pets: Vec<Pet>,
    pub records: Vec<VaccineRecord>,
    pub form: VaccineForm,
}

impl VaccineRegister {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load<A: PetShopApi + ?Sized>(&mut self, api: &A) -> ApiResult<()> {
        let (pets, records) = tokio::try_join!(api.list_pets(), api.list_vaccines())?;
        log::info!("Loaded {} vaccine records for {} pets", records.len(), pets.len());
        self.pets = pets;
        self.records = records;
        Ok(())
    }

    /// Record the vaccine in the form and append it locally
    pub async fn submit<A: PetShopApi + ?Sized>(&mut self, api: &A) -> Result<VaccineRecord, FormError> {
        let pet_id = self.form.pet_id.ok_or(FormError::NoPetSelected)?;
        let vaccine_name = self.form.vaccine_name.trim();
        if vaccine_name.is_empty() {
            return Err(FormError::MissingVaccineName);
        }
        let applied_on = self.form.applied_on.ok_or(FormError::MissingApplicationDate)?;

        let request = CreateVaccineRequest {
            pet_id,
            vaccine_name: vaccine_name.to_string(),
            applied_on,
            next_dose: self.form.next_dose,
        };
        let mut record = api.create_vaccine(&request).await?;
        if record.pet.is_none() {
            record.pet = self.pets.iter().find(|p| p.id == record.pet_id).cloned();
        }

        log::info!("Recorded vaccine {} for pet {}", record.vaccine_name, record.pet_id);
        self.records.push(record.clone());
        self.form = VaccineForm::default();
        Ok(record)
    }

    pub async fn delete<A: PetShopApi + ?Sized>(&mut self, api: &A, vaccine_id: i64) -> ApiResult<()> {
        api.delete_vaccine(vaccine_id).await?;
        self.records.retain(|r| r.id != vaccine_id);
        Ok(())
    }

    /// Records whose pet name contains `query`, ignoring case
    pub fn search(&self, query: &str) -> Vec<&VaccineRecord> {
        let query = query.trim().to_lowercase();
        self.records
            .iter()
            .filter(|record| {
                query.is_empty()
                    || self
                        .pet_name(record)
                        .map(|name| name.to_lowercase().contains(&query))
                        .unwrap_or(false)
            })
            .collect()
    }

    /// Name of the vaccinated pet, from the record or the pet cache
    pub fn pet_name<'a>(&'a self, record: &'a VaccineRecord) -> Option<&'a str> {
        record
            .pet
            .as_ref()
            .or_else(|| self.pets.iter().find(|p| p.id == record.pet_id))
            .map(|p| p.name.as_str())
    }
}
