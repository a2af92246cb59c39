use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::service::{CreateServiceRequest, UpdateServiceRequest};
use crate::error::{Result, StorageError};
use crate::models::Service;

const COLUMNS: &str = "service_id, name, duration_minutes, price, fitness_center_id, created_at";

/// Repository for Service database operations
pub struct ServiceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ServiceRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all services, optionally only those of one fitness center
    pub async fn list(&self, fitness_center_id: Option<Uuid>) -> Result<Vec<Service>> {
        let services = sqlx::query_as::<_, Service>(&format!(
            r#"
            SELECT {COLUMNS} FROM services
            WHERE $1::uuid IS NULL OR fitness_center_id = $1
            ORDER BY name
            "#
        ))
        .bind(fitness_center_id)
        .fetch_all(self.pool)
        .await?;

        Ok(services)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Service> {
        sqlx::query_as::<_, Service>(&format!(
            "SELECT {COLUMNS} FROM services WHERE service_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, req: &CreateServiceRequest) -> Result<Service> {
        sqlx::query_as::<_, Service>(&format!(
            r#"
            INSERT INTO services (name, duration_minutes, price, fitness_center_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&req.name)
        .bind(req.duration_minutes)
        .bind(req.price)
        .bind(req.fitness_center_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).describe_reference("fitness center"))
    }

    pub async fn update(&self, existing: &Service, req: &UpdateServiceRequest) -> Result<Service> {
        let name = req.name.as_ref().unwrap_or(&existing.name);
        let duration_minutes = req.duration_minutes.unwrap_or(existing.duration_minutes);
        let price = req.price.unwrap_or(existing.price);
        let fitness_center_id = req.fitness_center_id.unwrap_or(existing.fitness_center_id);

        sqlx::query_as::<_, Service>(&format!(
            r#"
            UPDATE services
            SET name = $2, duration_minutes = $3, price = $4, fitness_center_id = $5
            WHERE service_id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(existing.service_id)
        .bind(name)
        .bind(duration_minutes)
        .bind(price)
        .bind(fitness_center_id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::from(e).describe_reference("fitness center"))?
        .ok_or(StorageError::NotFound)
    }

    /// Delete a service: its appointments, then its trainer links, then the row.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let appointments = sqlx::query("DELETE FROM appointments WHERE service_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM trainer_services WHERE service_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM services WHERE service_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        tx.commit().await?;
        tracing::info!(service_id = %id, appointments, "Deleted service");
        Ok(())
    }
}

/// Looks up a service inside a booking transaction.
pub async fn find_in(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
) -> Result<Option<Service>> {
    let service = sqlx::query_as::<_, Service>(&format!(
        "SELECT {COLUMNS} FROM services WHERE service_id = $1"
    ))
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(service)
}
