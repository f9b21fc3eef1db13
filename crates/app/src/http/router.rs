use axum::middleware;
use axum::routing::{get, MethodRouter};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::http::middleware::cors::{self, CorsPolicy};
use crate::http::routes::{datasets, dimensions, health, taxonomy};
use crate::state::AppState;

pub fn build(state: AppState) -> Router {
    let cors = CorsPolicy::read_only(state.config.cors_max_age);
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/datasets",
            with_cors(get(datasets::search_datasets), cors),
        )
        .route("/taxonomy", with_cors(get(taxonomy::get_taxonomy), cors))
        .route("/taxonomy/{topic}", with_cors(get(taxonomy::get_topic), cors))
        .route("/dimensions", with_cors(get(dimensions::get_dimensions), cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Answers preflight requests with 204 and stamps CORS headers on every response.
fn with_cors(route: MethodRouter<AppState>, policy: CorsPolicy) -> MethodRouter<AppState> {
    route
        .options(cors::preflight)
        .layer(middleware::from_fn_with_state(policy, cors::apply_cors))
}
