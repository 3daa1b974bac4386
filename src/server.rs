//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::FromRef,
    routing::{delete, get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{ColorEngine, PaletteTracker, SegmentState};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub engine: Arc<ColorEngine>,
    pub palette: Arc<PaletteTracker>,
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<ColorEngine> {
    fn from_ref(state: &AppState) -> Self {
        state.engine.clone()
    }
}

impl FromRef<AppState> for Arc<PaletteTracker> {
    fn from_ref(state: &AppState) -> Self {
        state.palette.clone()
    }
}

/// Build the engine and palette tracker from configuration.
pub async fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let engine = ColorEngine::initialize(config.engine_options()?).await?;
    let palette = PaletteTracker::new(&config.palette);

    Ok(AppState {
        config: Arc::new(config),
        engine: Arc::new(engine),
        palette: Arc::new(palette),
    })
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "thatcolor API",
        description = "Perceptually ordered color sequences and live palette extraction",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_list_segments,
        api::handle_segment_colors,
        api::handle_next_batch,
        api::handle_segment_events,
        api::handle_extract_palette,
        api::handle_current_palette,
        api::handle_clear_history,
        api::handle_get_config,
    ),
    components(schemas(
        api::SegmentSummary,
        api::SegmentColors,
        api::SnapshotEvent,
        api::PaletteResponse,
        SegmentState,
    )),
    tags(
        (name = "Segments", description = "Incrementally ordered hue segments"),
        (name = "Palette", description = "Palette extraction and smoothing"),
        (name = "Config", description = "Effective server configuration")
    )
)]
pub struct ApiDoc;

/// Build the API router with all endpoints and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/segments", get(api::handle_list_segments))
        .route("/api/segments/:segment", get(api::handle_segment_colors))
        .route("/api/segments/:segment/next", post(api::handle_next_batch))
        .route(
            "/api/segments/:segment/events",
            get(api::handle_segment_events),
        )
        .route(
            "/api/palette",
            get(api::handle_current_palette).post(api::handle_extract_palette),
        )
        .route("/api/palette/history", delete(api::handle_clear_history))
        .route("/api/config", get(api::handle_get_config))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        // Health check
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async { ApiError::NotFound })
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
