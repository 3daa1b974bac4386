//! Tests for palette extraction and smoothing.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use common::app::TestApp;
use common::assertions::{assert_hex_colors, assert_json_status, assert_ok, assert_status};
use common::fixtures::{solid_png, stripes_png};
use thatcolor::api::PaletteResponse;

#[tokio::test]
async fn test_extract_palette_of_requested_size() {
    let app = TestApp::new().await;

    let response = app.post_png("/api/palette?k=4", stripes_png()).await;
    assert_ok(&response);

    let palette: PaletteResponse = response.json();
    assert_eq!(palette.k, 4);
    assert_eq!(palette.raw.len(), 4);
    assert_eq!(palette.smoothed.len(), 4);
    assert_eq!(palette.history, 1);
    assert_hex_colors(&palette.raw);
    assert_hex_colors(&palette.smoothed);

    // Single frame: smoothing is the identity
    assert_eq!(palette.raw, palette.smoothed);
}

#[tokio::test]
async fn test_non_power_of_two_size_is_exact() {
    let app = TestApp::new().await;

    let palette: PaletteResponse = app.post_png("/api/palette?k=3", stripes_png()).await.json();
    assert_eq!(palette.raw.len(), 3);

    let palette: PaletteResponse = app.post_png("/api/palette?k=3", stripes_png()).await.json();
    assert_eq!(palette.raw.len(), 3);
    assert_eq!(palette.history, 2);
}

#[tokio::test]
async fn test_solid_frame_palette() {
    let app = TestApp::new().await;

    let palette: PaletteResponse = app
        .post_png("/api/palette?k=1", solid_png(8, 8, [255, 0, 0]))
        .await
        .json();
    assert_eq!(palette.raw, vec!["#ff0000".to_string()]);
}

#[tokio::test]
async fn test_default_k_from_config() {
    let app = TestApp::new().await;

    let palette: PaletteResponse = app.post_png("/api/palette", stripes_png()).await.json();
    assert_eq!(palette.k, app.palette.default_k());
}

#[tokio::test]
async fn test_smoothing_averages_frames() {
    let app = TestApp::new().await;

    app.post_png("/api/palette?k=1", solid_png(4, 4, [255, 255, 255]))
        .await;
    let palette: PaletteResponse = app
        .post_png("/api/palette?k=1", solid_png(4, 4, [0, 0, 0]))
        .await
        .json();

    assert_eq!(palette.raw, vec!["#000000".to_string()]);
    assert_eq!(palette.history, 2);
    // Mid gray, whatever the rounding of 127.5
    assert!(
        palette.smoothed == vec!["#808080".to_string()]
            || palette.smoothed == vec!["#7f7f7f".to_string()],
        "unexpected smoothed palette {:?}",
        palette.smoothed
    );
}

#[tokio::test]
async fn test_changing_k_resets_history() {
    let app = TestApp::new().await;

    app.post_png("/api/palette?k=4", stripes_png()).await;
    app.post_png("/api/palette?k=4", stripes_png()).await;
    let palette: PaletteResponse = app.post_png("/api/palette?k=2", stripes_png()).await.json();

    assert_eq!(palette.history, 1);
    assert_eq!(palette.smoothed.len(), 2);
    assert_eq!(palette.raw, palette.smoothed);
}

#[tokio::test]
async fn test_invalid_png_is_400() {
    let app = TestApp::new().await;

    let response = app
        .post_png("/api/palette", b"definitely not a png".to_vec())
        .await;
    assert_status(&response, StatusCode::BAD_REQUEST);
    assert_json_status(&response, 400);

    // Failed frames leave the history untouched
    assert!(app.palette.current().is_empty());
}

#[tokio::test]
async fn test_palette_size_limits() {
    let app = TestApp::new().await;

    let response = app.post_png("/api/palette?k=300", stripes_png()).await;
    assert_status(&response, StatusCode::BAD_REQUEST);
    assert_json_status(&response, 400);

    let response = app.post_png("/api/palette?k=0", stripes_png()).await;
    assert_status(&response, StatusCode::BAD_REQUEST);
    assert_json_status(&response, 400);
}

#[tokio::test]
async fn test_current_palette_and_clear_history() {
    let app = TestApp::new().await;

    let current: Vec<String> = app.get("/api/palette").await.json();
    assert!(current.is_empty());

    let palette: PaletteResponse = app.post_png("/api/palette?k=4", stripes_png()).await.json();
    let current: Vec<String> = app.get("/api/palette").await.json();
    assert_eq!(current, palette.smoothed);

    let response = app.delete("/api/palette/history").await;
    assert_status(&response, StatusCode::NO_CONTENT);

    let current: Vec<String> = app.get("/api/palette").await.json();
    assert!(current.is_empty());

    // Fresh history after the reset
    let palette: PaletteResponse = app.post_png("/api/palette?k=4", stripes_png()).await.json();
    assert_eq!(palette.history, 1);
}
