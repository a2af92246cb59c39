//! Booking use cases that read, decide and write inside one transaction.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Appointment, BookedSlot, Service, Trainer, TrainerProfile, truncate_to_minute};
use crate::repository::{appointment, service, trainer};
use crate::repository::service::ServiceRepository;
use crate::repository::trainer::TrainerRepository;

use super::booking::{
    AppointmentLedger, BookingDecision, BookingPolicy, BookingProposal, BookingViolation,
    TrainerDirectory, validate_booking,
};

#[derive(Debug)]
pub enum BookingOutcome {
    Booked(Appointment),
    Rejected(Vec<BookingViolation>),
}

/// Trainer directory and appointment ledger reading through an open
/// transaction. Looking a trainer up locks their row.
pub struct PgBookingContext<'t, 'c> {
    tx: &'t mut Transaction<'c, Postgres>,
}

impl<'t, 'c> PgBookingContext<'t, 'c> {
    pub fn new(tx: &'t mut Transaction<'c, Postgres>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl<'t, 'c> TrainerDirectory for PgBookingContext<'t, 'c> {
    async fn find_trainer(&mut self, trainer_id: Uuid) -> Result<Option<TrainerProfile>> {
        trainer::lock_profile_in(self.tx, trainer_id).await
    }

    async fn find_service(&mut self, service_id: Uuid) -> Result<Option<Service>> {
        service::find_in(self.tx, service_id).await
    }
}

#[async_trait]
impl<'t, 'c> AppointmentLedger for PgBookingContext<'t, 'c> {
    async fn list_for_trainer(
        &mut self,
        trainer_id: Uuid,
        excluding: Option<Uuid>,
    ) -> Result<Vec<BookedSlot>> {
        appointment::list_slots_in(self.tx, trainer_id, excluding).await
    }
}

/// Validate and insert a new appointment.
///
/// The trainer row stays locked from validation to commit, so two requests
/// for the same trainer cannot both pass the conflict check.
pub async fn book_appointment(
    pool: &PgPool,
    proposal: &BookingProposal,
    policy: &BookingPolicy,
    now: NaiveDateTime,
) -> Result<BookingOutcome> {
    let mut tx = pool.begin().await?;

    let decision = {
        let mut context = PgBookingContext::new(&mut tx);
        validate_booking(&mut context, proposal, policy, now).await?
    };

    match decision {
        BookingDecision::Accepted(booking) => {
            let created = appointment::insert_in(&mut tx, &booking).await?;
            tx.commit().await?;
            info!(
                appointment_id = %created.appointment_id,
                trainer_id = %created.trainer_id,
                starts_at = %created.starts_at,
                "Appointment booked, pending approval"
            );
            Ok(BookingOutcome::Booked(created))
        }
        BookingDecision::Rejected(violations) => {
            tx.rollback().await?;
            warn!(
                trainer_id = %proposal.trainer_id,
                starts_at = %proposal.starts_at,
                "Booking rejected with {} violation(s)",
                violations.len()
            );
            Ok(BookingOutcome::Rejected(violations))
        }
    }
}

/// Validate and apply an edit to an existing appointment.
///
/// The edit is refused with [`StorageError::ConcurrencyConflict`] when the
/// stored row is no longer at `expected_version`. An accepted edit always
/// returns the appointment to pending.
pub async fn reschedule_appointment(
    pool: &PgPool,
    appointment_id: Uuid,
    expected_version: i32,
    proposal: &BookingProposal,
    policy: &BookingPolicy,
    now: NaiveDateTime,
) -> Result<BookingOutcome> {
    let mut tx = pool.begin().await?;

    let current = appointment::find_in(&mut tx, appointment_id)
        .await?
        .ok_or(StorageError::NotFound)?;
    if current.version != expected_version {
        return Err(StorageError::ConcurrencyConflict);
    }

    let proposal = BookingProposal {
        excluding: Some(appointment_id),
        ..proposal.clone()
    };

    let decision = {
        let mut context = PgBookingContext::new(&mut tx);
        validate_booking(&mut context, &proposal, policy, now).await?
    };

    match decision {
        BookingDecision::Accepted(booking) => {
            let updated =
                appointment::update_in(&mut tx, appointment_id, expected_version, &booking)
                    .await?
                    .ok_or(StorageError::ConcurrencyConflict)?;
            tx.commit().await?;
            info!(
                appointment_id = %updated.appointment_id,
                version = updated.version,
                "Appointment rescheduled, pending approval"
            );
            Ok(BookingOutcome::Booked(updated))
        }
        BookingDecision::Rejected(violations) => {
            tx.rollback().await?;
            warn!(
                appointment_id = %appointment_id,
                "Reschedule rejected with {} violation(s)",
                violations.len()
            );
            Ok(BookingOutcome::Rejected(violations))
        }
    }
}

/// Trainers able to take `service_id` at `starts_at`: qualified for the
/// service, free for its whole duration, and inside their availability window.
pub async fn available_trainers(
    pool: &PgPool,
    service_id: Uuid,
    starts_at: NaiveDateTime,
) -> Result<Vec<Trainer>> {
    let service = ServiceRepository::new(pool).find_by_id(service_id).await?;
    let start = truncate_to_minute(starts_at);
    let Some(end) = service.end_for(start) else {
        debug!(service_id = %service_id, "Requested session ends past the last bookable date");
        return Ok(Vec::new());
    };

    let trainers = TrainerRepository::new(pool)
        .list_free_for_service(service_id, start, end)
        .await?;

    Ok(trainers
        .into_iter()
        .filter(|trainer| {
            trainer
                .availability()
                .is_none_or(|window| window.admits(start, end))
        })
        .collect())
}
