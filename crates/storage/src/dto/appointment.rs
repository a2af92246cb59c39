use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Request payload for booking an appointment.
///
/// `member_id` is only honoured for admins; members always book for themselves.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAppointmentRequest {
    pub member_id: Option<Uuid>,
    pub trainer_id: Uuid,
    pub service_id: Uuid,
    pub fitness_center_id: Option<Uuid>,
    /// ISO-8601 local datetime, truncated to the minute
    pub starts_at: NaiveDateTime,
}

/// Request payload for editing an appointment.
///
/// `version` must match the stored row, otherwise the edit is refused as stale.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateAppointmentRequest {
    pub member_id: Option<Uuid>,
    pub trainer_id: Uuid,
    pub service_id: Uuid,
    pub fitness_center_id: Option<Uuid>,
    pub starts_at: NaiveDateTime,
    pub version: i32,
}

/// Appointment joined with the names of everything it references
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AppointmentDetailResponse {
    pub appointment_id: Uuid,
    pub member_id: Uuid,
    pub member_name: String,
    pub trainer_id: Uuid,
    pub trainer_name: String,
    pub service_id: Uuid,
    pub service_name: String,
    pub fitness_center_id: Option<Uuid>,
    pub fitness_center_name: Option<String>,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub is_approved: bool,
    pub version: i32,
    pub created_at: NaiveDateTime,
}
