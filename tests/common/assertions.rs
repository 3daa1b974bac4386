//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert JSON error body carries the expected status field
pub fn assert_json_status(response: &TestResponse, expected_status: u16) {
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected_status as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected_status,
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Expected error message");
}

/// Assert every entry is a `#rrggbb` hex color
pub fn assert_hex_colors(colors: &[String]) {
    for color in colors {
        assert_eq!(color.len(), 7, "Bad hex color {color:?}");
        assert!(color.starts_with('#'), "Bad hex color {color:?}");
        assert!(
            color[1..].chars().all(|c| c.is_ascii_hexdigit()),
            "Bad hex color {color:?}"
        );
    }
}
