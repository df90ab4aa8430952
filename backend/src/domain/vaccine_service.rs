use anyhow::anyhow;
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::error::{required_text, DomainError, DomainResult};
use crate::storage::{PetRepository, VaccineRepository};
use shared::{CreateVaccineRequest, UpdateVaccineRequest, VaccineRecord};

const MAX_NAME_LEN: usize = 100;

/// Vaccine record bookkeeping
#[derive(Clone)]
pub struct VaccineService {
    repo: VaccineRepository,
    pets: PetRepository,
}

impl VaccineService {
    pub fn new(repo: VaccineRepository, pets: PetRepository) -> Self {
        Self { repo, pets }
    }

    pub async fn create_vaccine(&self, request: CreateVaccineRequest) -> DomainResult<VaccineRecord> {
        info!(
            "Recording vaccine {} for pet {} on {}",
            request.vaccine_name, request.pet_id, request.applied_on
        );

        if self.pets.get_pet(request.pet_id).await?.is_none() {
            warn!("Vaccine rejected, unknown pet {}", request.pet_id);
            return Err(DomainError::Validation(format!("Unknown pet: {}", request.pet_id)));
        }

        let request = CreateVaccineRequest {
            vaccine_name: required_text("Vaccine name", &request.vaccine_name, MAX_NAME_LEN)?,
            ..request
        };
        validate_next_dose(request.applied_on, request.next_dose)?;

        let vaccine_id = self.repo.store_vaccine(&request).await?;
        let record = self
            .repo
            .get_vaccine(vaccine_id)
            .await?
            .ok_or_else(|| anyhow!("Vaccine record {} vanished after insert", vaccine_id))?;
        Ok(record)
    }

    pub async fn get_vaccine(&self, vaccine_id: i64) -> DomainResult<VaccineRecord> {
        self.repo
            .get_vaccine(vaccine_id)
            .await?
            .ok_or_else(|| not_found(vaccine_id))
    }

    pub async fn list_vaccines(&self) -> DomainResult<Vec<VaccineRecord>> {
        Ok(self.repo.list_vaccines().await?)
    }

    /// Merge the given fields; a present `next_dose` replaces the stored one
    pub async fn update_vaccine(
        &self,
        vaccine_id: i64,
        request: UpdateVaccineRequest,
    ) -> DomainResult<VaccineRecord> {
        info!("Updating vaccine record {}", vaccine_id);

        let mut record = self.get_vaccine(vaccine_id).await?;
        if let Some(name) = request.vaccine_name {
            record.vaccine_name = required_text("Vaccine name", &name, MAX_NAME_LEN)?;
        }
        if let Some(applied_on) = request.applied_on {
            record.applied_on = applied_on;
        }
        if request.next_dose.is_some() {
            record.next_dose = request.next_dose;
        }
        validate_next_dose(record.applied_on, record.next_dose)?;

        if !self.repo.update_vaccine(&record).await? {
            return Err(not_found(vaccine_id));
        }
        Ok(record)
    }

    pub async fn delete_vaccine(&self, vaccine_id: i64) -> DomainResult<()> {
        info!("Deleting vaccine record {}", vaccine_id);

        if !self.repo.delete_vaccine(vaccine_id).await? {
            return Err(not_found(vaccine_id));
        }
        Ok(())
    }
}

fn not_found(vaccine_id: i64) -> DomainError {
    DomainError::NotFound(format!("Vaccine record not found: {}", vaccine_id))
}

fn validate_next_dose(applied_on: NaiveDate, next_dose: Option<NaiveDate>) -> DomainResult<()> {
    match next_dose {
        Some(next) if next < applied_on => Err(DomainError::Validation(
            "Next dose cannot be before the application date".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DbConnection;
    use shared::{CreatePetRequest, Pet};

    async fn setup_test() -> (VaccineService, Pet) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let pets = PetRepository::new(db.clone());
        let pet = pets
            .store_pet(&CreatePetRequest {
                name: "Luna".to_string(),
                breed: "Poodle".to_string(),
                owner: "Carla Souza".to_string(),
            })
            .await
            .unwrap();
        (VaccineService::new(VaccineRepository::new(db), pets), pet)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(pet_id: i64, next_dose: Option<NaiveDate>) -> CreateVaccineRequest {
        CreateVaccineRequest {
            pet_id,
            vaccine_name: " V10 ".to_string(),
            applied_on: date(2024, 1, 10),
            next_dose,
        }
    }

    #[tokio::test]
    async fn test_create_vaccine_embeds_pet() {
        let (service, pet) = setup_test().await;

        let record = service.create_vaccine(request(pet.id, Some(date(2025, 1, 10)))).await.unwrap();
        assert_eq!(record.vaccine_name, "V10");
        assert_eq!(record.pet, Some(pet));
    }

    #[tokio::test]
    async fn test_create_vaccine_validation() {
        let (service, pet) = setup_test().await;

        let err = service.create_vaccine(request(77, None)).await.unwrap_err();
        assert_eq!(err.to_string(), "Unknown pet: 77");

        let err = service.create_vaccine(request(pet.id, Some(date(2023, 12, 31)))).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let blank = CreateVaccineRequest { vaccine_name: "  ".to_string(), ..request(pet.id, None) };
        assert!(matches!(service.create_vaccine(blank).await, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_sets_next_dose() {
        let (service, pet) = setup_test().await;
        let record = service.create_vaccine(request(pet.id, None)).await.unwrap();

        let updated = service
            .update_vaccine(
                record.id,
                UpdateVaccineRequest { next_dose: Some(date(2025, 1, 10)), ..Default::default() },
            )
            .await
            .unwrap();
        assert_eq!(updated.next_dose, Some(date(2025, 1, 10)));
        assert_eq!(updated.vaccine_name, "V10");
    }

    #[tokio::test]
    async fn test_delete_vaccine() {
        let (service, pet) = setup_test().await;
        let record = service.create_vaccine(request(pet.id, None)).await.unwrap();

        service.delete_vaccine(record.id).await.unwrap();
        assert!(matches!(service.get_vaccine(record.id).await, Err(DomainError::NotFound(_))));
    }
}
