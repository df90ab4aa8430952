use tracing::{info, warn};

use crate::domain::error::{required_text, DomainError, DomainResult};
use crate::storage::{is_foreign_key_violation, PetRepository};
use shared::{CreatePetRequest, Pet, UpdatePetRequest};

const MAX_TEXT_LEN: usize = 100;
/// Breed recorded when none is given ("sem raça definida")
pub const DEFAULT_BREED: &str = "SRD";

/// Service for managing registered pets
#[derive(Clone)]
pub struct PetService {
    repo: PetRepository,
}

impl PetService {
    pub fn new(repo: PetRepository) -> Self {
        Self { repo }
    }

    pub async fn create_pet(&self, request: CreatePetRequest) -> DomainResult<Pet> {
        info!("Creating pet: name={}, owner={}", request.name, request.owner);

        let request = CreatePetRequest {
            name: required_text("Pet name", &request.name, MAX_TEXT_LEN)?,
            breed: normalize_breed(&request.breed),
            owner: required_text("Owner name", &request.owner, MAX_TEXT_LEN)?,
        };

        let pet = self.repo.store_pet(&request).await?;
        info!("Created pet {} with ID {}", pet.name, pet.id);
        Ok(pet)
    }

    pub async fn get_pet(&self, pet_id: i64) -> DomainResult<Pet> {
        self.repo.get_pet(pet_id).await?.ok_or_else(|| {
            warn!("Pet not found: {}", pet_id);
            not_found(pet_id)
        })
    }

    pub async fn list_pets(&self) -> DomainResult<Vec<Pet>> {
        let pets = self.repo.list_pets().await?;
        info!("Found {} pets", pets.len());
        Ok(pets)
    }

    pub async fn update_pet(&self, pet_id: i64, request: UpdatePetRequest) -> DomainResult<Pet> {
        info!("Updating pet: {}", pet_id);

        let mut pet = self.get_pet(pet_id).await?;
        if let Some(name) = request.name {
            pet.name = required_text("Pet name", &name, MAX_TEXT_LEN)?;
        }
        if let Some(breed) = request.breed {
            pet.breed = normalize_breed(&breed);
        }
        if let Some(owner) = request.owner {
            pet.owner = required_text("Owner name", &owner, MAX_TEXT_LEN)?;
        }

        if !self.repo.update_pet(&pet).await? {
            return Err(not_found(pet_id));
        }
        Ok(pet)
    }

    pub async fn delete_pet(&self, pet_id: i64) -> DomainResult<()> {
        info!("Deleting pet: {}", pet_id);

        match self.repo.delete_pet(pet_id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(not_found(pet_id)),
            Err(e) if is_foreign_key_violation(&e) => Err(DomainError::Conflict(format!(
                "Pet {} still has appointments or vaccine records",
                pet_id
            ))),
            Err(e) => Err(e.into()),
        }
    }
}

fn not_found(pet_id: i64) -> DomainError {
    DomainError::NotFound(format!("Pet not found: {}", pet_id))
}

fn normalize_breed(breed: &str) -> String {
    let trimmed = breed.trim();
    if trimmed.is_empty() {
        DEFAULT_BREED.to_string()
    } else {
        trimmed.to_string()
    }
}
