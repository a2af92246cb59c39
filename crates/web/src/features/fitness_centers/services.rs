use sqlx::PgPool;
use storage::{
    dto::fitness_center::{CreateFitnessCenterRequest, UpdateFitnessCenterRequest},
    error::Result,
    models::FitnessCenter,
    repository::fitness_center::FitnessCenterRepository,
};
use uuid::Uuid;

/// List all fitness centers
pub async fn list_fitness_centers(pool: &PgPool) -> Result<Vec<FitnessCenter>> {
    let repo = FitnessCenterRepository::new(pool);
    repo.list().await
}

pub async fn get_fitness_center(pool: &PgPool, id: Uuid) -> Result<FitnessCenter> {
    let repo = FitnessCenterRepository::new(pool);
    repo.find_by_id(id).await
}

pub async fn create_fitness_center(
    pool: &PgPool,
    request: &CreateFitnessCenterRequest,
) -> Result<FitnessCenter> {
    let repo = FitnessCenterRepository::new(pool);
    let center = repo.create(request).await?;
    tracing::info!(fitness_center_id = %center.fitness_center_id, "Fitness center created");
    Ok(center)
}

/// Update a fitness center, keeping fields the request leaves out
pub async fn update_fitness_center(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateFitnessCenterRequest,
) -> Result<FitnessCenter> {
    let repo = FitnessCenterRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, request).await
}

pub async fn delete_fitness_center(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = FitnessCenterRepository::new(pool);
    repo.delete(id).await
}
