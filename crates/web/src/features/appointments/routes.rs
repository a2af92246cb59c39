use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{
    approve_appointment, create_appointment, delete_appointment, get_appointment,
    list_appointments, list_own_appointments, reject_appointment, update_appointment,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let admin = Router::new()
        .route("/", get(list_appointments))
        .route("/:id/approve", post(approve_appointment))
        .route("/:id/reject", post(reject_appointment))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    // Owner-or-admin routes resolve the caller through the `Caller` extractor.
    Router::new()
        .route("/", post(create_appointment))
        .route("/mine", get(list_own_appointments))
        .route("/:id", get(get_appointment))
        .route("/:id", put(update_appointment))
        .route("/:id", delete(delete_appointment))
        .merge(admin)
}
