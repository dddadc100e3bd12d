//! Common test utilities for in-process API testing.
//!
//! Builds the real router around a `MockConverter`, so handler behavior and
//! status mapping can be exercised without Calibre or a listening socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use bindery_core::{testing::MockConverter, Config, Converter};
use bindery_server::api::create_router;
use bindery_server::state::AppState;

/// Test fixture wrapping the router and its mock converter.
pub struct TestFixture {
    pub router: Router,
    pub converter: Arc<MockConverter>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    pub fn new() -> Self {
        let converter = Arc::new(MockConverter::new());
        let dyn_converter: Arc<dyn Converter> = converter.clone();
        let state = Arc::new(AppState::new(Config::default(), dyn_converter));
        let router = create_router(state);
        Self { router, converter }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::get(path).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, path: &str, body: Value) -> TestResponse {
        let request = Request::post(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body is not JSON")
        };

        TestResponse { status, body }
    }
}
