use sqlx::PgPool;
use storage::{
    dto::service::{CreateServiceRequest, UpdateServiceRequest},
    error::Result,
    models::Service,
    repository::service::ServiceRepository,
};
use uuid::Uuid;

/// List services, optionally only those of one fitness center
pub async fn list_services(pool: &PgPool, fitness_center_id: Option<Uuid>) -> Result<Vec<Service>> {
    let repo = ServiceRepository::new(pool);
    repo.list(fitness_center_id).await
}

pub async fn get_service(pool: &PgPool, id: Uuid) -> Result<Service> {
    let repo = ServiceRepository::new(pool);
    repo.find_by_id(id).await
}

pub async fn create_service(pool: &PgPool, request: &CreateServiceRequest) -> Result<Service> {
    let repo = ServiceRepository::new(pool);
    let service = repo.create(request).await?;
    tracing::info!(service_id = %service.service_id, "Service created");
    Ok(service)
}

pub async fn update_service(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateServiceRequest,
) -> Result<Service> {
    let repo = ServiceRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, request).await
}

/// Delete a service together with its appointments and trainer links
pub async fn delete_service(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = ServiceRepository::new(pool);
    repo.delete(id).await
}
