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

use crate::config::ItemConfig;
use crate::services::ItemRepository;

#[derive(Clone)]
pub struct AppState {
    pub config: ItemConfig,
    pub items: Arc<dyn ItemRepository>,
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
        .route("/create_item/", post(handlers::create_item))
        .route("/retrieve_item/:item_id", get(handlers::retrieve_item))
        .route("/items/filter", get(handlers::filter_items))
        .route("/items/count_by_email", get(handlers::count_by_email))
        .route("/items/:item_id", put(handlers::update_item))
        .route(
            "/items/:item_id/",
            axum::routing::delete(handlers::delete_item),
        )
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(http_trace_layer::<Body>())
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
}
