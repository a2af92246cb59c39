use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::merge_optional;
use crate::dto::fitness_center::{CreateFitnessCenterRequest, UpdateFitnessCenterRequest};
use crate::error::{Result, StorageError};
use crate::models::FitnessCenter;

const COLUMNS: &str = "fitness_center_id, name, address, working_hours, created_at";

/// Repository for FitnessCenter database operations
pub struct FitnessCenterRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FitnessCenterRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all fitness centers
    pub async fn list(&self) -> Result<Vec<FitnessCenter>> {
        let centers = sqlx::query_as::<_, FitnessCenter>(&format!(
            "SELECT {COLUMNS} FROM fitness_centers ORDER BY name"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(centers)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<FitnessCenter> {
        sqlx::query_as::<_, FitnessCenter>(&format!(
            "SELECT {COLUMNS} FROM fitness_centers WHERE fitness_center_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, req: &CreateFitnessCenterRequest) -> Result<FitnessCenter> {
        let center = sqlx::query_as::<_, FitnessCenter>(&format!(
            r#"
            INSERT INTO fitness_centers (name, address, working_hours)
            VALUES ($1, $2, $3)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&req.name)
        .bind(&req.address)
        .bind(&req.working_hours)
        .fetch_one(self.pool)
        .await?;

        Ok(center)
    }

    pub async fn update(
        &self,
        existing: &FitnessCenter,
        req: &UpdateFitnessCenterRequest,
    ) -> Result<FitnessCenter> {
        let name = req.name.as_ref().unwrap_or(&existing.name);
        let address = req.address.as_ref().unwrap_or(&existing.address);
        let working_hours = merge_optional(
            req.working_hours.as_deref(),
            req.clear_working_hours,
            existing.working_hours.as_deref(),
        );

        sqlx::query_as::<_, FitnessCenter>(&format!(
            r#"
            UPDATE fitness_centers
            SET name = $2, address = $3, working_hours = $4
            WHERE fitness_center_id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(existing.fitness_center_id)
        .bind(name)
        .bind(address)
        .bind(working_hours)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Delete a fitness center.
    ///
    /// Trainers and services belong to a center and must be removed first;
    /// appointments that only point at the center are cleared here.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let attached: i64 = sqlx::query_scalar(
            r#"
            SELECT (SELECT COUNT(*) FROM trainers WHERE fitness_center_id = $1)
                 + (SELECT COUNT(*) FROM services WHERE fitness_center_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if attached > 0 {
            return Err(StorageError::ConstraintViolation(format!(
                "Fitness center still has {} trainer(s) or service(s) attached",
                attached
            )));
        }

        sqlx::query("DELETE FROM appointments WHERE fitness_center_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM fitness_centers WHERE fitness_center_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        tx.commit().await?;
        Ok(())
    }
}
