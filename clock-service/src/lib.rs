pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use axum::{
    body::Body,
    http::{header, HeaderValue, Method},
    middleware::from_fn,
    routing::{get, post, put},
    Router,
};
use service_core::middleware::{
    http_trace_layer, metrics_middleware, request_id_middleware, security_headers_middleware,
};
use service_core::observability::metrics_endpoint;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::ClockConfig;
use crate::services::ClockRepository;

#[derive(Clone)]
pub struct AppState {
    pub config: ClockConfig,
    pub records: Arc<dyn ClockRepository>,
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed_origins.iter().filter_map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|e| tracing::error!("Invalid CORS origin '{}': {}. Skipping.", o, e))
                .ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(metrics_endpoint))
        .route("/create_clock_record/", post(handlers::create_clock_record))
        .route("/retrieve_item/:record_id", get(handlers::retrieve_clock_record))
        .route("/items/filter", get(handlers::filter_clock_records))
        .route("/items/:record_id", put(handlers::update_clock_record))
        .route(
            "/items/:record_id/",
            axum::routing::delete(handlers::delete_clock_record),
        )
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(http_trace_layer::<Body>())
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
}
