use std::collections::HashMap;

use chrono::NaiveDateTime;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::common::merge_optional;
use crate::dto::trainer::{CreateTrainerRequest, UpdateTrainerRequest};
use crate::error::{Result, StorageError};
use crate::models::{AvailabilityWindow, Trainer, TrainerProfile, TrainerService};

const COLUMNS: &str = "trainer_id, full_name, specialty, fitness_center_id, available_from, available_to, created_at";

/// Repository for Trainer database operations, including the
/// trainer/service join rows.
pub struct TrainerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TrainerRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all trainers with their qualified services
    pub async fn list(&self) -> Result<Vec<TrainerProfile>> {
        let trainers = sqlx::query_as::<_, Trainer>(&format!(
            "SELECT {COLUMNS} FROM trainers ORDER BY full_name"
        ))
        .fetch_all(self.pool)
        .await?;

        let links = sqlx::query_as::<_, TrainerService>(
            "SELECT trainer_id, service_id FROM trainer_services",
        )
        .fetch_all(self.pool)
        .await?;

        let mut by_trainer: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for link in links {
            by_trainer
                .entry(link.trainer_id)
                .or_default()
                .push(link.service_id);
        }

        Ok(trainers
            .into_iter()
            .map(|trainer| {
                let service_ids = by_trainer.remove(&trainer.trainer_id).unwrap_or_default();
                TrainerProfile {
                    trainer,
                    service_ids,
                }
            })
            .collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<TrainerProfile> {
        let trainer = sqlx::query_as::<_, Trainer>(&format!(
            "SELECT {COLUMNS} FROM trainers WHERE trainer_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        let service_ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT service_id FROM trainer_services WHERE trainer_id = $1",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(TrainerProfile {
            trainer,
            service_ids,
        })
    }

    /// Create a trainer and link the requested services in one transaction
    pub async fn create(&self, req: &CreateTrainerRequest) -> Result<TrainerProfile> {
        let mut tx = self.pool.begin().await?;

        let trainer = sqlx::query_as::<_, Trainer>(&format!(
            r#"
            INSERT INTO trainers (full_name, specialty, fitness_center_id, available_from, available_to)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&req.full_name)
        .bind(&req.specialty)
        .bind(req.fitness_center_id)
        .bind(req.available_from)
        .bind(req.available_to)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| StorageError::from(e).describe_reference("fitness center"))?;

        let service_ids = link_services(&mut tx, trainer.trainer_id, &req.service_ids).await?;

        tx.commit().await?;

        Ok(TrainerProfile {
            trainer,
            service_ids,
        })
    }

    /// Update a trainer; `service_ids`, when given, replaces the qualifications
    pub async fn update(
        &self,
        existing: &TrainerProfile,
        req: &UpdateTrainerRequest,
    ) -> Result<TrainerProfile> {
        let current = &existing.trainer;
        let full_name = req.full_name.as_ref().unwrap_or(&current.full_name);
        let specialty = merge_optional(
            req.specialty.as_deref(),
            req.clear_specialty,
            current.specialty.as_deref(),
        );
        let fitness_center_id = req.fitness_center_id.unwrap_or(current.fitness_center_id);
        let (available_from, available_to) = if req.clear_availability {
            (None, None)
        } else {
            (
                req.available_from.or(current.available_from),
                req.available_to.or(current.available_to),
            )
        };

        let has_any_boundary = available_from.is_some() || available_to.is_some();
        if has_any_boundary
            && AvailabilityWindow::from_columns(available_from, available_to).is_none()
        {
            return Err(StorageError::ConstraintViolation(
                "available_from and available_to must both be set, with available_from before available_to"
                    .to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let trainer = sqlx::query_as::<_, Trainer>(&format!(
            r#"
            UPDATE trainers
            SET full_name = $2,
                specialty = $3,
                fitness_center_id = $4,
                available_from = $5,
                available_to = $6
            WHERE trainer_id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(current.trainer_id)
        .bind(full_name)
        .bind(specialty)
        .bind(fitness_center_id)
        .bind(available_from)
        .bind(available_to)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| StorageError::from(e).describe_reference("fitness center"))?
        .ok_or(StorageError::NotFound)?;

        let service_ids = match &req.service_ids {
            Some(service_ids) => {
                sqlx::query("DELETE FROM trainer_services WHERE trainer_id = $1")
                    .bind(trainer.trainer_id)
                    .execute(&mut *tx)
                    .await?;
                link_services(&mut tx, trainer.trainer_id, service_ids).await?
            }
            None => existing.service_ids.clone(),
        };

        tx.commit().await?;

        Ok(TrainerProfile {
            trainer,
            service_ids,
        })
    }

    /// Delete a trainer: appointments, then service links, then the row.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let appointments = sqlx::query("DELETE FROM appointments WHERE trainer_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM trainer_services WHERE trainer_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM trainers WHERE trainer_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        tx.commit().await?;
        tracing::info!(trainer_id = %id, appointments, "Deleted trainer");
        Ok(())
    }

    /// Trainers qualified for `service_id` with no booking overlapping
    /// `[start, end)`. Availability windows are not applied here.
    pub async fn list_free_for_service(
        &self,
        service_id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Trainer>> {
        let trainers = sqlx::query_as::<_, Trainer>(
            r#"
            SELECT t.trainer_id, t.full_name, t.specialty, t.fitness_center_id,
                   t.available_from, t.available_to, t.created_at
            FROM trainers t
            JOIN trainer_services ts ON ts.trainer_id = t.trainer_id AND ts.service_id = $1
            WHERE NOT EXISTS (
                SELECT 1
                FROM appointments a
                JOIN services s ON s.service_id = a.service_id
                WHERE a.trainer_id = t.trainer_id
                  AND a.starts_at < $3
                  AND a.starts_at + make_interval(mins => s.duration_minutes) > $2
            )
            ORDER BY t.full_name
            "#,
        )
        .bind(service_id)
        .bind(start)
        .bind(end)
        .fetch_all(self.pool)
        .await?;

        Ok(trainers)
    }
}

async fn link_services(
    tx: &mut Transaction<'_, Postgres>,
    trainer_id: Uuid,
    service_ids: &[Uuid],
) -> Result<Vec<Uuid>> {
    if service_ids.is_empty() {
        return Ok(Vec::new());
    }

    let linked = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO trainer_services (trainer_id, service_id)
        SELECT $1, service_id FROM UNNEST($2::uuid[]) AS requested(service_id)
        ON CONFLICT DO NOTHING
        RETURNING service_id
        "#,
    )
    .bind(trainer_id)
    .bind(service_ids)
    .fetch_all(&mut **tx)
    .await
    .map_err(|e| StorageError::from(e).describe_reference("service"))?;

    Ok(linked)
}

/// Loads a trainer inside a booking transaction and locks the row until the
/// transaction ends, so bookings for one trainer are validated one at a time.
pub async fn lock_profile_in(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
) -> Result<Option<TrainerProfile>> {
    let trainer = sqlx::query_as::<_, Trainer>(&format!(
        "SELECT {COLUMNS} FROM trainers WHERE trainer_id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    let Some(trainer) = trainer else {
        return Ok(None);
    };

    let service_ids = sqlx::query_scalar::<_, Uuid>(
        "SELECT service_id FROM trainer_services WHERE trainer_id = $1",
    )
    .bind(id)
    .fetch_all(&mut **tx)
    .await?;

    Ok(Some(TrainerProfile {
        trainer,
        service_ids,
    }))
}
