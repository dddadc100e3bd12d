//! Conversion API handler.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use bindery_core::{ConversionRequest, ConverterError, ConvertOptions};

use crate::state::AppState;

/// Request body for a conversion.
///
/// Paths are optional here so that missing fields map to a 400 instead of a
/// deserialization error; the converter itself never sees such requests.
#[derive(Debug, Deserialize)]
pub struct ConvertBody {
    pub source_path: Option<String>,
    pub target_path: Option<String>,
    #[serde(default)]
    pub options: ConvertOptions,
}

/// Response for a successful conversion.
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub success: bool,
    pub source_path: String,
    pub target_path: String,
    pub file_size: u64,
    pub message: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// Convert an ebook from one format to another.
pub async fn convert(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ConvertBody>,
) -> Result<Json<ConvertResponse>, (StatusCode, Json<ErrorResponse>)> {
    let (source_path, target_path) = match (&body.source_path, &body.target_path) {
        (Some(source), Some(target)) if !source.is_empty() && !target.is_empty() => {
            (source.clone(), target.clone())
        }
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(
                    "source_path and target_path are required",
                )),
            ));
        }
    };

    info!(%source_path, %target_path, "conversion requested");

    let request = ConversionRequest::new(source_path, target_path).with_options(body.options);

    match state.converter().convert(request).await {
        Ok(result) => Ok(Json(ConvertResponse {
            success: true,
            source_path: result.source_path,
            target_path: result.target_path,
            file_size: result.file_size,
            message: "Conversion completed successfully".to_string(),
        })),
        Err(e) => Err(error_response(e)),
    }
}

/// Maps a converter error onto its HTTP status and response body.
fn error_response(error: ConverterError) -> (StatusCode, Json<ErrorResponse>) {
    match error {
        ConverterError::InvalidRequest { reason } => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(reason)))
        }
        ConverterError::SourceNotFound { path } => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(format!("Source file not found: {}", path))),
        ),
        ConverterError::Timeout { timeout_secs } => (
            StatusCode::GATEWAY_TIMEOUT,
            Json(ErrorResponse::new(format!(
                "Conversion timed out (max {} seconds)",
                timeout_secs
            ))),
        ),
        ConverterError::ConversionFailed { stderr, .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::with_details("Conversion failed", stderr)),
        ),
        ConverterError::OutputMissing { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(
                "Conversion completed but output file not found",
            )),
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(other.to_string())),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_status_mapping() {
        let (status, _) = error_response(ConverterError::SourceNotFound {
            path: "a.epub".to_string(),
        });
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = error_response(ConverterError::Timeout { timeout_secs: 300 });
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);

        let (status, _) = error_response(ConverterError::conversion_failed("err", "out"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_conversion_failed_details_carry_stderr() {
        let (_, Json(body)) = error_response(ConverterError::conversion_failed("boom", ""));
        assert_eq!(body.details.as_deref(), Some("boom"));
    }

    #[test]
    fn test_body_accepts_missing_options() {
        let body: ConvertBody =
            serde_json::from_str(r#"{"source_path": "a.epub", "target_path": "a.mobi"}"#).unwrap();
        assert!(body.options.is_empty());
    }
}
