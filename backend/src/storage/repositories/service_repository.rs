use anyhow::Result;
use shared::{CreateServiceRequest, Service};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::storage::connection::DbConnection;

/// Repository for the service catalog
#[derive(Clone)]
pub struct ServiceRepository {
    db: DbConnection,
}

impl ServiceRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn store_service(&self, service: &CreateServiceRequest) -> Result<Service> {
        let result = sqlx::query(
            r#"
            INSERT INTO services (name, price)
            VALUES (?, ?)
            "#,
        )
        .bind(&service.name)
        .bind(service.price)
        .execute(self.db.pool())
        .await?;

        Ok(Service {
            id: result.last_insert_rowid(),
            name: service.name.clone(),
            price: service.price,
        })
    }

    pub async fn get_service(&self, service_id: i64) -> Result<Option<Service>> {
        let row = sqlx::query("SELECT id, name, price FROM services WHERE id = ?")
            .bind(service_id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.as_ref().map(service_from_row))
    }

    pub async fn list_services(&self) -> Result<Vec<Service>> {
        let rows = sqlx::query("SELECT id, name, price FROM services ORDER BY id ASC")
            .fetch_all(self.db.pool())
            .await?;

        Ok(rows.iter().map(service_from_row).collect())
    }

    pub async fn update_service(&self, service: &Service) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE services
            SET name = ?, price = ?
            WHERE id = ?
            "#,
        )
        .bind(&service.name)
        .bind(service.price)
        .bind(service.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_service(&self, service_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM services WHERE id = ?")
            .bind(service_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn service_from_row(row: &SqliteRow) -> Service {
    Service {
        id: row.get("id"),
        name: row.get("name"),
        price: row.get("price"),
    }
}
