use axum::Router;
use axum::http::Method;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};

use crate::routes;
use crate::state::AppState;

pub(crate) fn build_app(state: AppState) -> Router {
    // The dashboard page may be served from another host and polls these endpoints.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route(
            "/api/teams/{id}",
            axum::routing::get(routes::teams::get_team_snapshot),
        )
        .route(
            "/api/teams/{id}/overview",
            axum::routing::get(routes::teams::get_team_overview),
        )
        .route("/api/health", axum::routing::get(routes::api::health))
        .route("/api/metrics", axum::routing::get(routes::api::metrics))
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
