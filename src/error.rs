use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use perceptual_color::{HueTableError, OrderError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid color space configuration: {0}")]
    Config(#[from] OrderError),

    #[error("Unknown segment {segment} (engine has {segment_count})")]
    UnknownSegment {
        segment: usize,
        segment_count: usize,
    },

    #[error("Engine task failed: {0}")]
    Task(String),
}

impl From<HueTableError> for EngineError {
    fn from(e: HueTableError) -> Self {
        EngineError::Config(OrderError::from(e))
    }
}

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("PNG decode error: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("Unsupported PNG color type: {0:?}")]
    UnsupportedColorType(png::ColorType),

    #[error("Image has no pixels")]
    Empty,

    #[error("Palette size must be at least 1")]
    ZeroPaletteSize,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Image error: {0}")]
    Sample(#[from] SampleError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Engine(EngineError::UnknownSegment { .. }) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            ApiError::Engine(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            ApiError::Sample(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_unknown_segment() {
        let error = EngineError::UnknownSegment {
            segment: 9,
            segment_count: 6,
        };
        assert_eq!(error.to_string(), "Unknown segment 9 (engine has 6)");
    }

    #[test]
    fn test_engine_error_from_hue_table_error() {
        let error: EngineError = HueTableError::NoSegments.into();
        assert_eq!(
            error.to_string(),
            "Invalid color space configuration: invalid hue table: hue table needs at least one segment"
        );
    }

    #[test]
    fn test_engine_error_config() {
        let error = EngineError::Config(OrderError::InvalidBatchSize);
        assert_eq!(
            error.to_string(),
            "Invalid color space configuration: batch size must be at least 1"
        );
    }

    #[test]
    fn test_sample_error_messages() {
        assert_eq!(SampleError::Empty.to_string(), "Image has no pixels");
        assert_eq!(
            SampleError::ZeroPaletteSize.to_string(),
            "Palette size must be at least 1"
        );
    }

    #[test]
    fn test_api_error_bad_request() {
        let error = ApiError::BadRequest("k must be positive".to_string());
        assert_eq!(error.to_string(), "Bad request: k must be positive");
    }

    #[test]
    fn test_api_error_from_sample_error() {
        let api_error: ApiError = SampleError::Empty.into();
        match api_error {
            ApiError::Sample(_) => {}
            _ => panic!("Expected Sample variant"),
        }
    }

    #[test]
    fn test_api_error_into_response_status_codes() {
        let response = ApiError::BadRequest("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::Engine(EngineError::UnknownSegment {
            segment: 7,
            segment_count: 6,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::Engine(EngineError::Task("panic".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::Sample(SampleError::Empty).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::Internal("error".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
