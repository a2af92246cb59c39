use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::service::{CreateServiceRequest, ServiceFilter, UpdateServiceRequest},
    models::Service,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/services",
    params(ServiceFilter),
    responses(
        (status = 200, description = "List services successfully", body = Vec<Service>)
    ),
    tag = "services"
)]
pub async fn list_services(
    State(db): State<Database>,
    Query(filter): Query<ServiceFilter>,
) -> Result<Response, WebError> {
    let services = services::list_services(db.pool(), filter.fitness_center_id).await?;

    Ok(Json(services).into_response())
}

#[utoipa::path(
    get,
    path = "/api/services/{id}",
    params(
        ("id" = Uuid, Path, description = "Service ID")
    ),
    responses(
        (status = 200, description = "Service found", body = Service),
        (status = 404, description = "Service not found")
    ),
    tag = "services"
)]
pub async fn get_service(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let service = services::get_service(db.pool(), id).await?;

    Ok(Json(service).into_response())
}

#[utoipa::path(
    post,
    path = "/api/services",
    request_body = CreateServiceRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Service created successfully", body = Service),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Fitness center does not exist")
    ),
    tag = "services"
)]
pub async fn create_service(
    State(db): State<Database>,
    Json(req): Json<CreateServiceRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let service = services::create_service(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(service)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/services/{id}",
    params(
        ("id" = Uuid, Path, description = "Service ID")
    ),
    request_body = UpdateServiceRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Service updated successfully", body = Service),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Service not found")
    ),
    tag = "services"
)]
pub async fn update_service(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(update_req): Json<UpdateServiceRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_service(db.pool(), id, &update_req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    params(
        ("id" = Uuid, Path, description = "Service ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Service and its appointments deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Service not found")
    ),
    tag = "services"
)]
pub async fn delete_service(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_service(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
