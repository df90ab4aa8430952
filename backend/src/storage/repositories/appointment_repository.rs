use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use shared::{Appointment, AppointmentStatus, Pet, Service};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::storage::connection::DbConnection;

const SELECT_WITH_REFERENCES: &str = r#"
    SELECT a.id, a.date_time, a.pet_id, a.service_id, a.status,
           p.name AS pet_name, p.breed AS pet_breed, p.owner AS pet_owner,
           s.name AS service_name, s.price AS service_price
    FROM appointments a
    LEFT JOIN pets p ON p.id = a.pet_id
    LEFT JOIN services s ON s.id = a.service_id
"#;

/// Repository for appointments; reads embed the referenced pet and service
#[derive(Clone)]
pub struct AppointmentRepository {
    db: DbConnection,
}

impl AppointmentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert an appointment and return its new id
    pub async fn store_appointment(
        &self,
        date_time: DateTime<Utc>,
        pet_id: i64,
        service_id: i64,
        status: AppointmentStatus,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO appointments (date_time, pet_id, service_id, status)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(format_instant(date_time))
        .bind(pet_id)
        .bind(service_id)
        .bind(status.as_str())
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_appointment(&self, appointment_id: i64) -> Result<Option<Appointment>> {
        let query = format!("{} WHERE a.id = ?", SELECT_WITH_REFERENCES);
        let row = sqlx::query(&query)
            .bind(appointment_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(appointment_from_row).transpose()
    }

    /// List all appointments, earliest first
    pub async fn list_appointments(&self) -> Result<Vec<Appointment>> {
        let query = format!("{} ORDER BY a.date_time ASC, a.id ASC", SELECT_WITH_REFERENCES);
        let rows = sqlx::query(&query).fetch_all(self.db.pool()).await?;

        rows.iter().map(appointment_from_row).collect()
    }

    /// Overwrite the mutable fields; returns false when the id is unknown
    pub async fn update_appointment(
        &self,
        appointment_id: i64,
        date_time: DateTime<Utc>,
        status: AppointmentStatus,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE appointments
            SET date_time = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(format_instant(date_time))
        .bind(status.as_str())
        .bind(appointment_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_appointment(&self, appointment_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = ?")
            .bind(appointment_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn format_instant(date_time: DateTime<Utc>) -> String {
    date_time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn appointment_from_row(row: &SqliteRow) -> Result<Appointment> {
    let id: i64 = row.get("id");
    let raw_date_time: String = row.get("date_time");
    let date_time = DateTime::parse_from_rfc3339(&raw_date_time)
        .with_context(|| format!("Appointment {} has an invalid date_time: {}", id, raw_date_time))?
        .with_timezone(&Utc);
    let raw_status: String = row.get("status");
    let status = raw_status
        .parse::<AppointmentStatus>()
        .with_context(|| format!("Appointment {} has an invalid status", id))?;

    let pet_id: i64 = row.get("pet_id");
    let service_id: i64 = row.get("service_id");

    let pet = match row.get::<Option<String>, _>("pet_name") {
        Some(name) => Some(Pet {
            id: pet_id,
            name,
            breed: row.get("pet_breed"),
            owner: row.get("pet_owner"),
        }),
        None => None,
    };
    let service = match row.get::<Option<String>, _>("service_name") {
        Some(name) => Some(Service {
            id: service_id,
            name,
            price: row.get("service_price"),
        }),
        None => None,
    };

    Ok(Appointment {
        id,
        date_time,
        pet_id,
        service_id,
        status,
        pet,
        service,
    })
}
