use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware::from_fn,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, request_span};
use crate::services::providers::CatalogProvider;

pub mod recommendations;
pub mod search;

/// Shared application state: the configured catalog providers
#[derive(Clone)]
pub struct AppState {
    pub providers: Arc<Vec<Arc<dyn CatalogProvider>>>,
}

impl AppState {
    /// Creates application state over a set of catalog providers
    pub fn new(providers: Vec<Arc<dyn CatalogProvider>>) -> Self {
        Self {
            providers: Arc::new(providers),
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        // Request ids must be attached before the trace span reads them
        .layer(from_fn(request_id))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/books/search", get(search::search))
        .route("/recommendations", post(recommendations::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
