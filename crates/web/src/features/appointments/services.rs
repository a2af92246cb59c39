use chrono::{Local, NaiveDateTime};
use sqlx::PgPool;
use storage::{
    dto::{
        appointment::{
            AppointmentDetailResponse, CreateAppointmentRequest, UpdateAppointmentRequest,
        },
        common::{PaginatedResponse, PaginationParams},
    },
    models::Appointment,
    repository::appointment::AppointmentRepository,
    services::{
        booking::{BookingPolicy, BookingProposal},
        scheduling::{self, BookingOutcome},
    },
};
use uuid::Uuid;

use crate::error::WebError;
use crate::middleware::auth::Caller;

/// Wall-clock time the booking rules compare against.
fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// The member an appointment is booked for: members always book for
/// themselves, admins must name the member.
fn resolve_member(caller: Caller, requested: Option<Uuid>) -> Result<Uuid, WebError> {
    match caller {
        Caller::Member(member_id) => Ok(member_id),
        Caller::Admin => requested.ok_or_else(|| {
            WebError::BadRequest("member_id is required when booking as an admin".to_string())
        }),
    }
}

fn into_result(outcome: BookingOutcome) -> Result<Appointment, WebError> {
    match outcome {
        BookingOutcome::Booked(appointment) => Ok(appointment),
        BookingOutcome::Rejected(violations) => Err(WebError::BookingRejected(violations)),
    }
}

/// Load an appointment the caller may see. Someone else's appointment is
/// reported as missing.
async fn find_accessible(pool: &PgPool, caller: Caller, id: Uuid) -> Result<Appointment, WebError> {
    let appointment = AppointmentRepository::new(pool).find_by_id(id).await?;
    if !caller.may_access(appointment.member_id) {
        return Err(WebError::NotFound);
    }
    Ok(appointment)
}

/// List one page of every appointment
pub async fn list_appointments(
    pool: &PgPool,
    params: PaginationParams,
) -> Result<PaginatedResponse<AppointmentDetailResponse>, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let (appointments, total) = AppointmentRepository::new(pool)
        .list_detailed(params)
        .await?;

    Ok(PaginatedResponse::new(appointments, params, total))
}

pub async fn list_own_appointments(
    pool: &PgPool,
    caller: Caller,
) -> Result<Vec<AppointmentDetailResponse>, WebError> {
    let Caller::Member(member_id) = caller else {
        return Err(WebError::BadRequest(
            "Admins have no appointments of their own, use the full listing".to_string(),
        ));
    };

    Ok(AppointmentRepository::new(pool)
        .list_for_member(member_id)
        .await?)
}

pub async fn get_appointment(
    pool: &PgPool,
    caller: Caller,
    id: Uuid,
) -> Result<AppointmentDetailResponse, WebError> {
    find_accessible(pool, caller, id).await?;

    Ok(AppointmentRepository::new(pool).find_detailed(id).await?)
}

/// Book an appointment, pending approval
pub async fn book_appointment(
    pool: &PgPool,
    caller: Caller,
    request: &CreateAppointmentRequest,
    policy: &BookingPolicy,
) -> Result<Appointment, WebError> {
    let proposal = BookingProposal {
        member_id: resolve_member(caller, request.member_id)?,
        trainer_id: request.trainer_id,
        service_id: request.service_id,
        fitness_center_id: request.fitness_center_id,
        starts_at: request.starts_at,
        excluding: None,
    };

    let outcome = scheduling::book_appointment(pool, &proposal, policy, now()).await?;
    into_result(outcome)
}

/// Edit an appointment the caller owns. The edit goes back to pending.
pub async fn update_appointment(
    pool: &PgPool,
    caller: Caller,
    id: Uuid,
    request: &UpdateAppointmentRequest,
    policy: &BookingPolicy,
) -> Result<Appointment, WebError> {
    let existing = find_accessible(pool, caller, id).await?;

    let member_id = match caller {
        Caller::Admin => request.member_id.unwrap_or(existing.member_id),
        Caller::Member(member_id) => member_id,
    };

    let proposal = BookingProposal {
        member_id,
        trainer_id: request.trainer_id,
        service_id: request.service_id,
        fitness_center_id: request.fitness_center_id,
        starts_at: request.starts_at,
        excluding: Some(id),
    };

    let outcome =
        scheduling::reschedule_appointment(pool, id, request.version, &proposal, policy, now())
            .await?;
    into_result(outcome)
}

pub async fn delete_appointment(pool: &PgPool, caller: Caller, id: Uuid) -> Result<(), WebError> {
    find_accessible(pool, caller, id).await?;

    AppointmentRepository::new(pool).delete(id).await?;
    tracing::info!(appointment_id = %id, admin = caller.is_admin(), "Appointment deleted");
    Ok(())
}

/// Approve or reject an appointment. Repeating a decision changes nothing.
pub async fn set_approval(
    pool: &PgPool,
    id: Uuid,
    approved: bool,
) -> Result<Appointment, WebError> {
    let appointment = AppointmentRepository::new(pool)
        .set_approval(id, approved)
        .await?;

    tracing::info!(
        appointment_id = %id,
        approved,
        "Appointment approval updated"
    );
    Ok(appointment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::services::booking::{BookingErrorKind, BookingViolation};

    #[test]
    fn test_members_book_for_themselves() {
        let member_id = Uuid::new_v4();
        let someone_else = Uuid::new_v4();

        let resolved = resolve_member(Caller::Member(member_id), Some(someone_else)).unwrap();
        assert_eq!(resolved, member_id);
    }

    #[test]
    fn test_admins_must_name_the_member() {
        let member_id = Uuid::new_v4();

        assert_eq!(
            resolve_member(Caller::Admin, Some(member_id)).unwrap(),
            member_id
        );
        assert!(matches!(
            resolve_member(Caller::Admin, None),
            Err(WebError::BadRequest(_))
        ));
    }

    #[test]
    fn test_rejected_outcome_becomes_booking_error() {
        let violation = BookingViolation {
            field: "trainer_id".to_string(),
            kind: BookingErrorKind::InvalidTrainer,
            message: "Trainer does not exist".to_string(),
        };

        match into_result(BookingOutcome::Rejected(vec![violation.clone()])) {
            Err(WebError::BookingRejected(violations)) => assert_eq!(violations, vec![violation]),
            other => panic!("expected a booking rejection, got {:?}", other),
        }
    }
}
