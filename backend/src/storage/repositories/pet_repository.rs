use anyhow::Result;
use shared::{CreatePetRequest, Pet};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::storage::connection::DbConnection;

/// Repository for pet rows
#[derive(Clone)]
pub struct PetRepository {
    db: DbConnection,
}

impl PetRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert a pet and return the stored record
    pub async fn store_pet(&self, pet: &CreatePetRequest) -> Result<Pet> {
        let result = sqlx::query(
            r#"
            INSERT INTO pets (name, breed, owner)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&pet.name)
        .bind(&pet.breed)
        .bind(&pet.owner)
        .execute(self.db.pool())
        .await?;

        Ok(Pet {
            id: result.last_insert_rowid(),
            name: pet.name.clone(),
            breed: pet.breed.clone(),
            owner: pet.owner.clone(),
        })
    }

    pub async fn get_pet(&self, pet_id: i64) -> Result<Option<Pet>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, breed, owner
            FROM pets
            WHERE id = ?
            "#,
        )
        .bind(pet_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(pet_from_row))
    }

    /// List all pets in insertion order
    pub async fn list_pets(&self) -> Result<Vec<Pet>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, breed, owner
            FROM pets
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(pet_from_row).collect())
    }

    /// Returns false when no row has the pet's id
    pub async fn update_pet(&self, pet: &Pet) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE pets
            SET name = ?, breed = ?, owner = ?
            WHERE id = ?
            "#,
        )
        .bind(&pet.name)
        .bind(&pet.breed)
        .bind(&pet.owner)
        .bind(pet.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns false when the pet did not exist
    pub async fn delete_pet(&self, pet_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM pets WHERE id = ?")
            .bind(pet_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn pet_from_row(row: &SqliteRow) -> Pet {
    Pet {
        id: row.get("id"),
        name: row.get("name"),
        breed: row.get("breed"),
        owner: row.get("owner"),
    }
}
