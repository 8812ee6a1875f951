// HTTP routes: Prometheus exposition plus version

mod http;

use axum::{Router, routing::get};
use prometheus::Registry;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) registry: Registry,
}

pub fn app(registry: Registry) -> Router {
    let state = AppState { registry };
    Router::new()
        .route("/", get(|| async { "cnexporter: container metrics for Prometheus" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/metrics", get(http::metrics_handler)) // GET /metrics
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
