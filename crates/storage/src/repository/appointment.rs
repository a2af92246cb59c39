use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::appointment::AppointmentDetailResponse;
use crate::dto::common::PaginationParams;
use crate::error::{Result, StorageError};
use crate::models::{Appointment, BookedSlot};
use crate::services::booking::ValidatedBooking;

const COLUMNS: &str = "appointment_id, member_id, trainer_id, service_id, fitness_center_id, starts_at, is_approved, version, created_at";

const DETAIL_SELECT: &str = r#"
    SELECT a.appointment_id,
           a.member_id,
           m.full_name AS member_name,
           a.trainer_id,
           t.full_name AS trainer_name,
           a.service_id,
           s.name AS service_name,
           a.fitness_center_id,
           fc.name AS fitness_center_name,
           a.starts_at,
           a.starts_at + make_interval(mins => s.duration_minutes) AS ends_at,
           a.is_approved,
           a.version,
           a.created_at
    FROM appointments a
    JOIN members m ON m.member_id = a.member_id
    JOIN trainers t ON t.trainer_id = a.trainer_id
    JOIN services s ON s.service_id = a.service_id
    LEFT JOIN fitness_centers fc ON fc.fitness_center_id = a.fitness_center_id
"#;

/// Repository for Appointment database operations
pub struct AppointmentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AppointmentRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// One page of all appointments, latest first, plus the total count
    pub async fn list_detailed(
        &self,
        params: PaginationParams,
    ) -> Result<(Vec<AppointmentDetailResponse>, i64)> {
        let appointments = sqlx::query_as::<_, AppointmentDetailResponse>(&format!(
            "{DETAIL_SELECT} ORDER BY a.starts_at DESC, a.created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM appointments")
            .fetch_one(self.pool)
            .await?;

        Ok((appointments, total))
    }

    pub async fn list_for_member(
        &self,
        member_id: Uuid,
    ) -> Result<Vec<AppointmentDetailResponse>> {
        let appointments = sqlx::query_as::<_, AppointmentDetailResponse>(&format!(
            "{DETAIL_SELECT} WHERE a.member_id = $1 ORDER BY a.starts_at DESC"
        ))
        .bind(member_id)
        .fetch_all(self.pool)
        .await?;

        Ok(appointments)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Appointment> {
        sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {COLUMNS} FROM appointments WHERE appointment_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn find_detailed(&self, id: Uuid) -> Result<AppointmentDetailResponse> {
        sqlx::query_as::<_, AppointmentDetailResponse>(&format!(
            "{DETAIL_SELECT} WHERE a.appointment_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Set the approval flag. Nothing else on the row changes, and setting
    /// the flag it already has writes nothing.
    pub async fn set_approval(&self, id: Uuid, approved: bool) -> Result<Appointment> {
        let mut tx = self.pool.begin().await?;

        let current = find_in(&mut tx, id).await?.ok_or(StorageError::NotFound)?;
        let next = current.clone().with_approval(approved);
        if next.is_approved != current.is_approved {
            sqlx::query("UPDATE appointments SET is_approved = $2 WHERE appointment_id = $1")
                .bind(id)
                .bind(next.is_approved)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(next)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM appointments WHERE appointment_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

/// Bookings of one trainer with their service durations, inside a booking
/// transaction.
pub async fn list_slots_in(
    tx: &mut Transaction<'_, Postgres>,
    trainer_id: Uuid,
    excluding: Option<Uuid>,
) -> Result<Vec<BookedSlot>> {
    let slots = sqlx::query_as::<_, BookedSlot>(
        r#"
        SELECT a.appointment_id, a.starts_at, s.duration_minutes
        FROM appointments a
        JOIN services s ON s.service_id = a.service_id
        WHERE a.trainer_id = $1
          AND ($2::uuid IS NULL OR a.appointment_id <> $2)
        ORDER BY a.starts_at
        "#,
    )
    .bind(trainer_id)
    .bind(excluding)
    .fetch_all(&mut **tx)
    .await?;

    Ok(slots)
}

pub async fn find_in(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
) -> Result<Option<Appointment>> {
    let appointment = sqlx::query_as::<_, Appointment>(&format!(
        "SELECT {COLUMNS} FROM appointments WHERE appointment_id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(appointment)
}

pub async fn insert_in(
    tx: &mut Transaction<'_, Postgres>,
    booking: &ValidatedBooking,
) -> Result<Appointment> {
    sqlx::query_as::<_, Appointment>(&format!(
        r#"
        INSERT INTO appointments (member_id, trainer_id, service_id, fitness_center_id, starts_at, is_approved)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(booking.member_id)
    .bind(booking.trainer_id)
    .bind(booking.service_id)
    .bind(booking.fitness_center_id)
    .bind(booking.starts_at)
    .bind(booking.is_approved)
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| StorageError::from(e).describe_reference("member, service or fitness center"))
}

/// Overwrite an appointment if it is still at `expected_version`.
/// Returns `None` when no row matched.
pub async fn update_in(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    expected_version: i32,
    booking: &ValidatedBooking,
) -> Result<Option<Appointment>> {
    sqlx::query_as::<_, Appointment>(&format!(
        r#"
        UPDATE appointments
        SET member_id = $3,
            trainer_id = $4,
            service_id = $5,
            fitness_center_id = $6,
            starts_at = $7,
            is_approved = $8,
            version = version + 1
        WHERE appointment_id = $1 AND version = $2
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(expected_version)
    .bind(booking.member_id)
    .bind(booking.trainer_id)
    .bind(booking.service_id)
    .bind(booking.fitness_center_id)
    .bind(booking.starts_at)
    .bind(booking.is_approved)
    .fetch_optional(&mut **tx)
    .await
    .map_err(|e| StorageError::from(e).describe_reference("member, service or fitness center"))
}
