use anyhow::{Context, Result};
use chrono::NaiveDate;
use shared::{CreateVaccineRequest, Pet, VaccineRecord};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::storage::connection::DbConnection;

const DATE_FORMAT: &str = "%Y-%m-%d";

const SELECT_WITH_PET: &str = r#"
    SELECT v.id, v.pet_id, v.vaccine_name, v.applied_on, v.next_dose,
           p.name AS pet_name, p.breed AS pet_breed, p.owner AS pet_owner
    FROM vaccines v
    LEFT JOIN pets p ON p.id = v.pet_id
"#;

/// Repository for vaccine records; reads embed the vaccinated pet
#[derive(Clone)]
pub struct VaccineRepository {
    db: DbConnection,
}

impl VaccineRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn store_vaccine(&self, vaccine: &CreateVaccineRequest) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO vaccines (pet_id, vaccine_name, applied_on, next_dose)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(vaccine.pet_id)
        .bind(&vaccine.vaccine_name)
        .bind(vaccine.applied_on.format(DATE_FORMAT).to_string())
        .bind(vaccine.next_dose.map(|d| d.format(DATE_FORMAT).to_string()))
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_vaccine(&self, vaccine_id: i64) -> Result<Option<VaccineRecord>> {
        let query = format!("{} WHERE v.id = ?", SELECT_WITH_PET);
        let row = sqlx::query(&query)
            .bind(vaccine_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(vaccine_from_row).transpose()
    }

    /// List all records, most recently applied first
    pub async fn list_vaccines(&self) -> Result<Vec<VaccineRecord>> {
        let query = format!("{} ORDER BY v.applied_on DESC, v.id DESC", SELECT_WITH_PET);
        let rows = sqlx::query(&query).fetch_all(self.db.pool()).await?;

        rows.iter().map(vaccine_from_row).collect()
    }

    pub async fn update_vaccine(&self, vaccine: &VaccineRecord) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE vaccines
            SET vaccine_name = ?, applied_on = ?, next_dose = ?
            WHERE id = ?
            "#,
        )
        .bind(&vaccine.vaccine_name)
        .bind(vaccine.applied_on.format(DATE_FORMAT).to_string())
        .bind(vaccine.next_dose.map(|d| d.format(DATE_FORMAT).to_string()))
        .bind(vaccine.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_vaccine(&self, vaccine_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM vaccines WHERE id = ?")
            .bind(vaccine_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn parse_date(raw: &str, vaccine_id: i64) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .with_context(|| format!("Vaccine record {} has an invalid date: {}", vaccine_id, raw))
}

fn vaccine_from_row(row: &SqliteRow) -> Result<VaccineRecord> {
    let id: i64 = row.get("id");
    let pet_id: i64 = row.get("pet_id");
    let applied_on = parse_date(&row.get::<String, _>("applied_on"), id)?;
    let next_dose = row
        .get::<Option<String>, _>("next_dose")
        .map(|raw| parse_date(&raw, id))
        .transpose()?;

    let pet = row.get::<Option<String>, _>("pet_name").map(|name| Pet {
        id: pet_id,
        name,
        breed: row.get("pet_breed"),
        owner: row.get("pet_owner"),
    });

    Ok(VaccineRecord {
        id,
        pet_id,
        vaccine_name: row.get("vaccine_name"),
        applied_on,
        next_dose,
        pet,
    })
}
