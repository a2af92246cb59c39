use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{create_service, delete_service, get_service, list_services, update_service};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_service))
        .route("/:id", put(update_service))
        .route("/:id", delete(delete_service))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_services))
        .route("/:id", get(get_service))
        .merge(protected)
}
