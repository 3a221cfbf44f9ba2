//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use bus_scraper::BusSource;
use fare_engine::ListingStore;

use crate::server::routes::{form_handler, health_handler, plan_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ListingStore>,
    pub source: Arc<dyn BusSource>,
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(form_handler))
        .route("/health", get(health_handler))
        .route("/api/plan", post(plan_handler))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}
