//! Test harness: the real router over an in-memory repository.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use clock_service::{
    build_router,
    config::{ClockConfig, MongoConfig},
    services::{ClockRepository, MockClockRepository},
    AppState,
};
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tower::ServiceExt;

pub fn test_config() -> ClockConfig {
    ClockConfig {
        common: CoreConfig {
            port: 0,
            log_level: "error".to_string(),
            otlp_endpoint: None,
        },
        mongodb: MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "orders_test".to_string(),
            collection: "user_clock".to_string(),
        },
        allowed_origins: vec!["*".to_string()],
    }
}

pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    pub fn spawn() -> Self {
        Self::with_repository(Arc::new(MockClockRepository::new()))
    }

    /// Keeps a handle on the mock so tests can count store calls.
    pub fn spawn_with_mock() -> (Self, Arc<MockClockRepository>) {
        let mock = Arc::new(MockClockRepository::new());
        (Self::with_repository(mock.clone()), mock)
    }

    /// Every store call fails, so any request reaching the store yields 500.
    pub fn spawn_failing(message: &str) -> Self {
        Self::with_repository(Arc::new(MockClockRepository::failing(message)))
    }

    pub fn with_repository(records: Arc<dyn ClockRepository>) -> Self {
        let state = AppState {
            config: test_config(),
            records,
        };
        Self {
            router: build_router(state),
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn send_json(&self, method: &str, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn create_record(&self, email: &str, location: &str) -> Value {
        let (status, created) = self
            .send_json("POST", "/create_clock_record/", &record_body(email, location))
            .await;
        assert_eq!(status, StatusCode::OK, "create failed: {}", created);
        created
    }
}

pub fn record_body(email: &str, location: &str) -> Value {
    serde_json::json!({
        "email": email,
        "location": location,
    })
}
