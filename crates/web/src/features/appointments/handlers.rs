use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        appointment::{
            AppointmentDetailResponse, CreateAppointmentRequest, UpdateAppointmentRequest,
        },
        common::{PaginatedResponse, PaginationParams},
    },
    models::Appointment,
    services::booking::BookingPolicy,
};
use uuid::Uuid;

use crate::error::WebError;
use crate::middleware::auth::Caller;

use super::services;

#[utoipa::path(
    get,
    path = "/api/appointments",
    params(PaginationParams),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "One page of all appointments", body = PaginatedResponse<AppointmentDetailResponse>),
        (status = 400, description = "Invalid pagination parameters"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "appointments"
)]
pub async fn list_appointments(
    State(db): State<Database>,
    Query(params): Query<PaginationParams>,
) -> Result<Response, WebError> {
    let page = services::list_appointments(db.pool(), params).await?;

    Ok(Json(page).into_response())
}

#[utoipa::path(
    get,
    path = "/api/appointments/mine",
    security(
        ("member_email" = [])
    ),
    responses(
        (status = 200, description = "Appointments of the calling member", body = Vec<AppointmentDetailResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "appointments"
)]
pub async fn list_own_appointments(
    State(db): State<Database>,
    caller: Caller,
) -> Result<Response, WebError> {
    let appointments = services::list_own_appointments(db.pool(), caller).await?;

    Ok(Json(appointments).into_response())
}

#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    params(
        ("id" = Uuid, Path, description = "Appointment ID")
    ),
    security(
        ("bearer_auth" = []),
        ("member_email" = [])
    ),
    responses(
        (status = 200, description = "Appointment found", body = AppointmentDetailResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Appointment not found")
    ),
    tag = "appointments"
)]
pub async fn get_appointment(
    State(db): State<Database>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let appointment = services::get_appointment(db.pool(), caller, id).await?;

    Ok(Json(appointment).into_response())
}

#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = CreateAppointmentRequest,
    security(
        ("bearer_auth" = []),
        ("member_email" = [])
    ),
    responses(
        (status = 201, description = "Appointment booked, pending approval", body = Appointment),
        (status = 400, description = "Malformed request"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Booking rejected by the booking rules")
    ),
    tag = "appointments"
)]
pub async fn create_appointment(
    State(db): State<Database>,
    State(policy): State<BookingPolicy>,
    caller: Caller,
    Json(req): Json<CreateAppointmentRequest>,
) -> Result<Response, WebError> {
    let appointment = services::book_appointment(db.pool(), caller, &req, &policy).await?;

    Ok((StatusCode::CREATED, Json(appointment)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    params(
        ("id" = Uuid, Path, description = "Appointment ID")
    ),
    request_body = UpdateAppointmentRequest,
    security(
        ("bearer_auth" = []),
        ("member_email" = [])
    ),
    responses(
        (status = 200, description = "Appointment updated, pending approval again", body = Appointment),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Appointment not found"),
        (status = 409, description = "Appointment was modified concurrently"),
        (status = 422, description = "Booking rejected by the booking rules")
    ),
    tag = "appointments"
)]
pub async fn update_appointment(
    State(db): State<Database>,
    State(policy): State<BookingPolicy>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(update_req): Json<UpdateAppointmentRequest>,
) -> Result<Response, WebError> {
    let appointment =
        services::update_appointment(db.pool(), caller, id, &update_req, &policy).await?;

    Ok(Json(appointment).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    params(
        ("id" = Uuid, Path, description = "Appointment ID")
    ),
    security(
        ("bearer_auth" = []),
        ("member_email" = [])
    ),
    responses(
        (status = 204, description = "Appointment deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Appointment not found")
    ),
    tag = "appointments"
)]
pub async fn delete_appointment(
    State(db): State<Database>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_appointment(db.pool(), caller, id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    post,
    path = "/api/appointments/{id}/approve",
    params(
        ("id" = Uuid, Path, description = "Appointment ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Appointment approved", body = Appointment),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Appointment not found")
    ),
    tag = "appointments"
)]
pub async fn approve_appointment(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let appointment = services::set_approval(db.pool(), id, true).await?;

    Ok(Json(appointment).into_response())
}

#[utoipa::path(
    post,
    path = "/api/appointments/{id}/reject",
    params(
        ("id" = Uuid, Path, description = "Appointment ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Appointment set back to pending", body = Appointment),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Appointment not found")
    ),
    tag = "appointments"
)]
pub async fn reject_appointment(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let appointment = services::set_approval(db.pool(), id, false).await?;

    Ok(Json(appointment).into_response())
}
