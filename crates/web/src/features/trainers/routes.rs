use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{
    create_trainer, delete_trainer, get_trainer, list_available_trainers, list_trainers,
    update_trainer,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_trainer))
        .route("/:id", put(update_trainer))
        .route("/:id", delete(delete_trainer))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_trainers))
        .route("/available", get(list_available_trainers))
        .route("/:id", get(get_trainer))
        .merge(protected)
}
