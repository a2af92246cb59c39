use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FitnessCenter {
    pub fitness_center_id: Uuid,
    pub name: String,
    pub address: String,
    pub working_hours: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}
