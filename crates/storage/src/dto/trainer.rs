use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Trainer, TrainerProfile};

/// Trainer with the services they are qualified to deliver
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrainerResponse {
    pub trainer_id: Uuid,
    pub full_name: String,
    pub specialty: Option<String>,
    pub fitness_center_id: Uuid,
    pub available_from: Option<NaiveTime>,
    pub available_to: Option<NaiveTime>,
    pub service_ids: Vec<Uuid>,
    pub created_at: NaiveDateTime,
}

/// Request payload for creating a new trainer
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_window"))]
pub struct CreateTrainerRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Full name must be between 1 and 255 characters"
    ))]
    pub full_name: String,

    #[validate(length(max = 500))]
    pub specialty: Option<String>,

    pub fitness_center_id: Uuid,

    pub available_from: Option<NaiveTime>,

    pub available_to: Option<NaiveTime>,

    #[serde(default)]
    pub service_ids: Vec<Uuid>,
}

/// Request payload for updating an existing trainer.
///
/// When `service_ids` is present it replaces the trainer's qualifications.
/// `clear_availability` removes the availability window altogether and
/// `clear_specialty` removes the specialty.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_window"))]
pub struct UpdateTrainerRequest {
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,

    #[validate(length(max = 500))]
    pub specialty: Option<String>,

    #[serde(default)]
    pub clear_specialty: bool,

    pub fitness_center_id: Option<Uuid>,

    pub available_from: Option<NaiveTime>,

    pub available_to: Option<NaiveTime>,

    #[serde(default)]
    pub clear_availability: bool,

    pub service_ids: Option<Vec<Uuid>>,
}

/// Query for trainers free to deliver a service at a given time
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
pub struct AvailableTrainersQuery {
    /// Requested start, ISO-8601 local datetime
    pub starts_at: NaiveDateTime,
    pub service_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AvailableTrainerResponse {
    pub trainer_id: Uuid,
    pub full_name: String,
    pub specialty: Option<String>,
}

fn validate_create_window(req: &CreateTrainerRequest) -> Result<(), validator::ValidationError> {
    validate_window(req.available_from, req.available_to)
}

/// A partial update may move one boundary; the merged window is checked on write.
fn validate_update_window(req: &UpdateTrainerRequest) -> Result<(), validator::ValidationError> {
    match (req.available_from, req.available_to) {
        (Some(_), Some(_)) => validate_window(req.available_from, req.available_to),
        _ => Ok(()),
    }
}

/// Both boundaries or neither, and `from` strictly before `to`.
pub fn validate_window(
    from: Option<NaiveTime>,
    to: Option<NaiveTime>,
) -> Result<(), validator::ValidationError> {
    match (from, to) {
        (None, None) => Ok(()),
        (Some(from), Some(to)) if from < to => Ok(()),
        _ => {
            let mut error = validator::ValidationError::new("invalid_availability_window");
            error.message = Some(
                "available_from and available_to must both be set, with available_from before available_to"
                    .into(),
            );
            Err(error)
        }
    }
}

impl From<TrainerProfile> for TrainerResponse {
    fn from(profile: TrainerProfile) -> Self {
        let trainer = profile.trainer;
        Self {
            trainer_id: trainer.trainer_id,
            full_name: trainer.full_name,
            specialty: trainer.specialty,
            fitness_center_id: trainer.fitness_center_id,
            available_from: trainer.available_from,
            available_to: trainer.available_to,
            service_ids: profile.service_ids,
            created_at: trainer.created_at,
        }
    }
}

impl From<Trainer> for AvailableTrainerResponse {
    fn from(trainer: Trainer) -> Self {
        Self {
            trainer_id: trainer.trainer_id,
            full_name: trainer.full_name,
            specialty: trainer.specialty,
        }
    }
}
