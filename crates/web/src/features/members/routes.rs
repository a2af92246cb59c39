use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{delete_member, get_member, list_members, register_member, update_member};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", get(list_members))
        .route("/:id", get(get_member))
        .route("/:id", put(update_member))
        .route("/:id", delete(delete_member))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new().route("/", post(register_member)).merge(protected)
}
