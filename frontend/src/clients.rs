//! # Client Directory
//!
//! Owners are not stored separately; the directory groups registered pets by
//! owner name.

use shared::{CreatePetRequest, Pet};

use crate::error::FormError;
use crate::services::{ApiResult, PetShopApi};

const MIN_OWNER_NAME_LEN: usize = 3;
const DEFAULT_BREED: &str = "SRD";

#[derive(Debug, Clone, PartialEq)]
pub struct OwnerGroup {
    pub owner: String,
    pub pets: Vec<Pet>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetForm {
    pub owner: String,
    pub name: String,
    pub breed: String,
}

#[derive(Debug, Clone, Default)]
pub struct ClientDirectory {
    pub pets: Vec<Pet>,
    pub form: PetForm,
}

impl ClientDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load<A: PetShopApi + ?Sized>(&mut self, api: &A) -> ApiResult<()> {
        self.pets = api.list_pets().await?;
        Ok(())
    }

    /// Pets grouped by owner, owners in order of first appearance
    pub fn owners(&self) -> Vec<OwnerGroup> {
        let mut groups: Vec<OwnerGroup> = Vec::new();
        for pet in &self.pets {
            match groups.iter_mut().find(|g| g.owner == pet.owner) {
                Some(group) => group.pets.push(pet.clone()),
                None => groups.push(OwnerGroup { owner: pet.owner.clone(), pets: vec![pet.clone()] }),
            }
        }
        groups
    }

    /// Owner groups whose owner name or pet names and breeds contain `query`
    pub fn search(&self, query: &str) -> Vec<OwnerGroup> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.owners();
        }

        self.owners()
            .into_iter()
            .filter(|group| {
                let pets = group
                    .pets
                    .iter()
                    .map(|p| format!("{} {}", p.name, p.breed))
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("{} {}", group.owner, pets).to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Register the pet in the form and append it locally
    pub async fn register<A: PetShopApi + ?Sized>(&mut self, api: &A) -> Result<Pet, FormError> {
        let owner = self.form.owner.trim();
        if owner.chars().count() < MIN_OWNER_NAME_LEN {
            return Err(FormError::OwnerNameTooShort);
        }
        let name = self.form.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingPetName);
        }
        let breed = match self.form.breed.trim() {
            "" => DEFAULT_BREED,
            breed => breed,
        };

        let request = CreatePetRequest {
            name: name.to_string(),
            breed: breed.to_string(),
            owner: owner.to_string(),
        };
        let pet = api.create_pet(&request).await?;

        log::info!("Registered pet {} for {}", pet.name, pet.owner);
        self.pets.push(pet.clone());
        self.form = PetForm::default();
        Ok(pet)
    }

    pub async fn delete<A: PetShopApi + ?Sized>(&mut self, api: &A, pet_id: i64) -> ApiResult<()> {
        api.delete_pet(pet_id).await?;
        self.pets.retain(|p| p.id != pet_id);
        Ok(())
    }
}
