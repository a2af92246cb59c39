use axum::extract::FromRef;
use storage::{Database, services::booking::BookingPolicy};

use crate::middleware::auth::ApiKeys;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub api_keys: ApiKeys,
    pub booking_policy: BookingPolicy,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for ApiKeys {
    fn from_ref(state: &AppState) -> Self {
        state.api_keys.clone()
    }
}

impl FromRef<AppState> for BookingPolicy {
    fn from_ref(state: &AppState) -> Self {
        state.booking_policy
    }
}
