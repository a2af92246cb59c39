use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::trainer::{
        AvailableTrainerResponse, AvailableTrainersQuery, CreateTrainerRequest, TrainerResponse,
        UpdateTrainerRequest,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/trainers",
    responses(
        (status = 200, description = "List all trainers successfully", body = Vec<TrainerResponse>)
    ),
    tag = "trainers"
)]
pub async fn list_trainers(State(db): State<Database>) -> Result<Response, WebError> {
    let trainers = services::list_trainers(db.pool()).await?;

    let response: Vec<TrainerResponse> = trainers.into_iter().map(TrainerResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/trainers/available",
    params(AvailableTrainersQuery),
    responses(
        (status = 200, description = "Trainers free to deliver the service at that time", body = Vec<AvailableTrainerResponse>),
        (status = 404, description = "Service not found")
    ),
    tag = "trainers"
)]
pub async fn list_available_trainers(
    State(db): State<Database>,
    Query(query): Query<AvailableTrainersQuery>,
) -> Result<Response, WebError> {
    let trainers =
        services::list_available_trainers(db.pool(), query.service_id, query.starts_at).await?;

    let response: Vec<AvailableTrainerResponse> = trainers
        .into_iter()
        .map(AvailableTrainerResponse::from)
        .collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/trainers/{id}",
    params(
        ("id" = Uuid, Path, description = "Trainer ID")
    ),
    responses(
        (status = 200, description = "Trainer found", body = TrainerResponse),
        (status = 404, description = "Trainer not found")
    ),
    tag = "trainers"
)]
pub async fn get_trainer(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let trainer = services::get_trainer(db.pool(), id).await?;

    Ok(Json(TrainerResponse::from(trainer)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/trainers",
    request_body = CreateTrainerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Trainer created successfully", body = TrainerResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Fitness center or service does not exist")
    ),
    tag = "trainers"
)]
pub async fn create_trainer(
    State(db): State<Database>,
    Json(req): Json<CreateTrainerRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let trainer = services::create_trainer(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(TrainerResponse::from(trainer))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/trainers/{id}",
    params(
        ("id" = Uuid, Path, description = "Trainer ID")
    ),
    request_body = UpdateTrainerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Trainer updated successfully", body = TrainerResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Trainer not found")
    ),
    tag = "trainers"
)]
pub async fn update_trainer(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(update_req): Json<UpdateTrainerRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_trainer(db.pool(), id, &update_req).await?;

    Ok(Json(TrainerResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/trainers/{id}",
    params(
        ("id" = Uuid, Path, description = "Trainer ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Trainer and their appointments deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Trainer not found")
    ),
    tag = "trainers"
)]
pub async fn delete_trainer(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_trainer(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
