//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use thatcolor::models::AppConfig;
use thatcolor::server::{build_router, create_app_state, AppState};
use thatcolor::services::{ColorEngine, PaletteTracker, SortedSequence};

use super::fixtures;

/// Test application with router and direct access to services
pub struct TestApp {
    router: axum::Router,
    pub engine: Arc<ColorEngine>,
    pub palette: Arc<PaletteTracker>,
}

impl TestApp {
    /// Create a test application on a small color cube
    pub async fn new() -> Self {
        Self::with_config(fixtures::small_config()).await
    }

    pub async fn with_config(config: AppConfig) -> Self {
        let state = Self::create_state(config).await;

        // Keep references for test assertions
        let engine = state.engine.clone();
        let palette = state.palette.clone();

        // Build router using shared server module (same as production)
        let router = build_router(state);

        Self {
            router,
            engine,
            palette,
        }
    }

    pub async fn create_state(config: AppConfig) -> AppState {
        create_app_state(config)
            .await
            .expect("Failed to create app state")
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request without a body
    pub async fn post(&self, path: &str) -> TestResponse {
        self.request(Request::post(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with a PNG body
    pub async fn post_png(&self, path: &str, png: Vec<u8>) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "image/png")
            .body(Body::from(png))
            .unwrap();
        self.request(request).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request(Request::delete(path).body(Body::empty()).unwrap())
            .await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Wait until `segment` has at least `len` committed colors
    pub async fn wait_for_len(&self, segment: usize, len: usize) -> SortedSequence {
        wait_for_len(&self.engine, segment, len).await
    }
}

/// Wait until `segment` of `engine` has at least `len` committed colors
pub async fn wait_for_len(engine: &ColorEngine, segment: usize, len: usize) -> SortedSequence {
    let mut rx = engine.subscribe(segment).expect("Unknown segment");
    let snapshot = tokio::time::timeout(Duration::from_secs(10), rx.wait_for(|s| s.len() >= len))
        .await
        .expect("Timed out waiting for batches")
        .expect("Engine stopped");
    snapshot.clone()
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}
