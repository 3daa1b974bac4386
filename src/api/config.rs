//! Effective configuration.

use axum::{extract::State, response::Json};
use std::sync::Arc;

use crate::models::AppConfig;

/// Configuration the server was started with
///
/// Defaults are filled in, so the response shows every setting in effect.
#[utoipa::path(
    get,
    path = "/api/config",
    responses(
        (status = 200, description = "Effective configuration as JSON"),
    ),
    tag = "Config"
)]
pub async fn handle_get_config(State(config): State<Arc<AppConfig>>) -> Json<AppConfig> {
    Json(config.as_ref().clone())
}
