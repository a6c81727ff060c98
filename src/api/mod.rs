//! HTTP layer - router, shared state, endpoint handlers and error mapping.

/// HTTP error mapping
pub mod error;
/// Endpoint handlers
pub mod handlers;

use crate::{config::AppConfig, core::BudgetRequestRepository};
use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
    routing::get,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// State shared by every handler.
///
/// Collaborators are injected here when the router is built; handlers never
/// reach for globals.
#[derive(Clone)]
pub struct AppState {
    /// Storage port for budget requests
    pub repository: Arc<dyn BudgetRequestRepository>,
}

impl AppState {
    /// Creates the shared state from its collaborators.
    #[must_use]
    pub fn new(repository: Arc<dyn BudgetRequestRepository>) -> Self {
        Self { repository }
    }
}

/// Builds the application router with CORS and request tracing.
pub fn app_router(state: AppState, config: &AppConfig) -> Router {
    let api_v1 = Router::new().route("/ping", get(handlers::ping));

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/orcament",
            get(handlers::list_budget_requests).post(handlers::create_budget_request),
        )
        .route("/orcament/{id}", get(handlers::get_budget_request))
        .nest("/api/v1", api_v1)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config.cors_allow_origins)),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::CONTENT_LENGTH,
            header::ACCEPT_ENCODING,
            HeaderName::from_static("x-csrf-token"),
            header::AUTHORIZATION,
        ]);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|e| warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin"))
                .ok()
        })
        .collect();
    layer.allow_origin(allowed)
}
