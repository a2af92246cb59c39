use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::member::{CreateMemberRequest, UpdateMemberRequest},
    models::Member,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/members",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "List all members successfully", body = Vec<Member>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "members"
)]
pub async fn list_members(State(db): State<Database>) -> Result<Response, WebError> {
    let members = services::list_members(db.pool()).await?;

    Ok(Json(members).into_response())
}

#[utoipa::path(
    get,
    path = "/api/members/{id}",
    params(
        ("id" = Uuid, Path, description = "Member ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Member found", body = Member),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Member not found")
    ),
    tag = "members"
)]
pub async fn get_member(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let member = services::get_member(db.pool(), id).await?;

    Ok(Json(member).into_response())
}

#[utoipa::path(
    post,
    path = "/api/members",
    request_body = CreateMemberRequest,
    responses(
        (status = 201, description = "Member registered successfully", body = Member),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    tag = "members"
)]
pub async fn register_member(
    State(db): State<Database>,
    Json(req): Json<CreateMemberRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let member = services::register_member(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(member)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/members/{id}",
    params(
        ("id" = Uuid, Path, description = "Member ID")
    ),
    request_body = UpdateMemberRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Member updated successfully", body = Member),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Member not found"),
        (status = 409, description = "Email already registered")
    ),
    tag = "members"
)]
pub async fn update_member(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(update_req): Json<UpdateMemberRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_member(db.pool(), id, &update_req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/members/{id}",
    params(
        ("id" = Uuid, Path, description = "Member ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Member and their appointments deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Member not found")
    ),
    tag = "members"
)]
pub async fn delete_member(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_member(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
