//! Live palette extraction from uploaded frames.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use perceptual_color::Srgb;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::services::{PaletteReading, PaletteTracker};

/// Largest palette size accepted per request.
pub const MAX_K: usize = 256;

/// Query parameters for palette extraction
#[derive(Debug, Deserialize, IntoParams)]
pub struct PaletteQuery {
    /// Palette size (defaults to the configured K)
    pub k: Option<usize>,
}

/// Raw and smoothed palette of one frame
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaletteResponse {
    pub k: usize,
    /// Palette of this frame alone
    pub raw: Vec<String>,
    /// Per-slot average over recent frames
    pub smoothed: Vec<String>,
    /// Frames in the smoothing history
    pub history: usize,
}

impl From<PaletteReading> for PaletteResponse {
    fn from(reading: PaletteReading) -> Self {
        Self {
            k: reading.raw.len(),
            raw: to_hex(&reading.raw),
            smoothed: to_hex(&reading.smoothed),
            history: reading.history,
        }
    }
}

fn to_hex(colors: &[Srgb]) -> Vec<String> {
    colors.iter().map(|c| c.to_hex()).collect()
}

/// Extract a palette from a PNG frame
///
/// The frame is quantized and pushed into the shared smoothing history.
/// Changing K between requests clears the history.
#[utoipa::path(
    post,
    path = "/api/palette",
    request_body(content = Vec<u8>, content_type = "image/png", description = "PNG frame"),
    responses(
        (status = 200, description = "Palette extracted", body = PaletteResponse),
        (status = 400, description = "Invalid image or palette size"),
    ),
    params(PaletteQuery),
    tag = "Palette"
)]
pub async fn handle_extract_palette(
    State(tracker): State<Arc<PaletteTracker>>,
    Query(query): Query<PaletteQuery>,
    body: Bytes,
) -> Result<Json<PaletteResponse>, ApiError> {
    if let Some(k) = query.k {
        if k > MAX_K {
            return Err(ApiError::BadRequest(format!("k must be at most {MAX_K}")));
        }
    }

    let reading = tokio::task::spawn_blocking(move || tracker.sample(&body, query.k))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    tracing::debug!(k = reading.raw.len(), history = reading.history, "Palette sampled");
    Ok(Json(reading.into()))
}

/// Current smoothed palette
#[utoipa::path(
    get,
    path = "/api/palette",
    responses(
        (status = 200, description = "Smoothed palette (empty before the first frame)", body = Vec<String>),
    ),
    tag = "Palette"
)]
pub async fn handle_current_palette(
    State(tracker): State<Arc<PaletteTracker>>,
) -> Json<Vec<String>> {
    Json(to_hex(&tracker.current()))
}

/// Clear the smoothing history
#[utoipa::path(
    delete,
    path = "/api/palette/history",
    responses(
        (status = 204, description = "History cleared"),
    ),
    tag = "Palette"
)]
pub async fn handle_clear_history(State(tracker): State<Arc<PaletteTracker>>) -> impl IntoResponse {
    tracker.reset();
    StatusCode::NO_CONTENT
}
