use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::AvailabilityWindow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Trainer {
    pub trainer_id: Uuid,
    pub full_name: String,
    pub specialty: Option<String>,
    pub fitness_center_id: Uuid,
    pub available_from: Option<NaiveTime>,
    pub available_to: Option<NaiveTime>,
    pub created_at: chrono::NaiveDateTime,
}

impl Trainer {
    /// The daily booking window, if both boundaries are set.
    pub fn availability(&self) -> Option<AvailabilityWindow> {
        AvailabilityWindow::from_columns(self.available_from, self.available_to)
    }
}

/// Row of the trainer/service join table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TrainerService {
    pub trainer_id: Uuid,
    pub service_id: Uuid,
}

/// A trainer together with the services they are qualified to deliver.
#[derive(Debug, Clone)]
pub struct TrainerProfile {
    pub trainer: Trainer,
    pub service_ids: Vec<Uuid>,
}

impl TrainerProfile {
    pub fn offers(&self, service_id: Uuid) -> bool {
        self.service_ids.contains(&service_id)
    }
}
