use chrono::NaiveDateTime;
use sqlx::PgPool;
use storage::{
    dto::trainer::{CreateTrainerRequest, UpdateTrainerRequest},
    error::Result,
    models::{Trainer, TrainerProfile},
    repository::trainer::TrainerRepository,
    services::scheduling,
};
use uuid::Uuid;

/// List all trainers with their qualified services
pub async fn list_trainers(pool: &PgPool) -> Result<Vec<TrainerProfile>> {
    let repo = TrainerRepository::new(pool);
    repo.list().await
}

pub async fn get_trainer(pool: &PgPool, id: Uuid) -> Result<TrainerProfile> {
    let repo = TrainerRepository::new(pool);
    repo.find_by_id(id).await
}

pub async fn create_trainer(
    pool: &PgPool,
    request: &CreateTrainerRequest,
) -> Result<TrainerProfile> {
    let repo = TrainerRepository::new(pool);
    let profile = repo.create(request).await?;
    tracing::info!(
        trainer_id = %profile.trainer.trainer_id,
        services = profile.service_ids.len(),
        "Trainer created"
    );
    Ok(profile)
}

pub async fn update_trainer(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateTrainerRequest,
) -> Result<TrainerProfile> {
    let repo = TrainerRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, request).await
}

/// Delete a trainer together with their appointments and service links
pub async fn delete_trainer(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = TrainerRepository::new(pool);
    repo.delete(id).await
}

pub async fn list_available_trainers(
    pool: &PgPool,
    service_id: Uuid,
    starts_at: NaiveDateTime,
) -> Result<Vec<Trainer>> {
    scheduling::available_trainers(pool, service_id, starts_at).await
}
