use axum::{http::StatusCode, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::{make_span_with_request_id, request_id_middleware},
    services::CarouselBuilder,
};

pub mod carousels;
pub mod genres;
pub mod shows;

/// Shared handler state
pub struct AppState {
    pub carousels: CarouselBuilder,
}

impl AppState {
    pub fn new(carousels: CarouselBuilder) -> Self {
        Self { carousels }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(Arc::new(state))
        .layer(
            // Outermost first: the request id must exist before the trace span
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/:user_id/carousels", get(carousels::get_carousels))
        .route("/shows/:show_id/similar", get(shows::similar))
        .route("/genres", get(genres::list))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
