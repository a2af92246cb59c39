use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::fitness_center::{CreateFitnessCenterRequest, UpdateFitnessCenterRequest},
    models::FitnessCenter,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/fitness-centers",
    responses(
        (status = 200, description = "List all fitness centers successfully", body = Vec<FitnessCenter>)
    ),
    tag = "fitness-centers"
)]
pub async fn list_fitness_centers(State(db): State<Database>) -> Result<Response, WebError> {
    let centers = services::list_fitness_centers(db.pool()).await?;

    Ok(Json(centers).into_response())
}

#[utoipa::path(
    get,
    path = "/api/fitness-centers/{id}",
    params(
        ("id" = Uuid, Path, description = "Fitness center ID")
    ),
    responses(
        (status = 200, description = "Fitness center found", body = FitnessCenter),
        (status = 404, description = "Fitness center not found")
    ),
    tag = "fitness-centers"
)]
pub async fn get_fitness_center(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let center = services::get_fitness_center(db.pool(), id).await?;

    Ok(Json(center).into_response())
}

#[utoipa::path(
    post,
    path = "/api/fitness-centers",
    request_body = CreateFitnessCenterRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Fitness center created successfully", body = FitnessCenter),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "fitness-centers"
)]
pub async fn create_fitness_center(
    State(db): State<Database>,
    Json(req): Json<CreateFitnessCenterRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let center = services::create_fitness_center(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(center)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/fitness-centers/{id}",
    params(
        ("id" = Uuid, Path, description = "Fitness center ID")
    ),
    request_body = UpdateFitnessCenterRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Fitness center updated successfully", body = FitnessCenter),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Fitness center not found")
    ),
    tag = "fitness-centers"
)]
pub async fn update_fitness_center(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(update_req): Json<UpdateFitnessCenterRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_fitness_center(db.pool(), id, &update_req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/fitness-centers/{id}",
    params(
        ("id" = Uuid, Path, description = "Fitness center ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Fitness center deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Fitness center not found"),
        (status = 409, description = "Trainers or services still belong to the center")
    ),
    tag = "fitness-centers"
)]
pub async fn delete_fitness_center(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_fitness_center(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
