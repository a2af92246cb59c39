use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{
    create_fitness_center, delete_fitness_center, get_fitness_center, list_fitness_centers,
    update_fitness_center,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_fitness_center))
        .route("/:id", put(update_fitness_center))
        .route("/:id", delete(delete_fitness_center))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_fitness_centers))
        .route("/:id", get(get_fitness_center))
        .merge(protected)
}
