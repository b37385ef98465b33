use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// `error` is the opaque message shown to the caller; `details` carries
    /// the underlying cause. No raw provider payload is ever rendered.
    Internal {
        error: String,
        details: Option<String>,
    },
}

impl ApiError {
    pub fn internal(error: impl Into<String>, details: impl std::fmt::Display) -> ApiError {
        ApiError::Internal {
            error: error.into(),
            details: Some(details.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::Internal { error, details } => {
                tracing::error!(error, ?details, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "error": error,
                        "details": details,
                    })),
                )
                    .into_response()
            }
        }
    }
}

impl From<vital_store::error::StoreError> for ApiError {
    fn from(e: vital_store::error::StoreError) -> Self {
        match e {
            vital_store::error::StoreError::NotFound { key } => {
                ApiError::NotFound(format!("record collection not found: {key}"))
            }
            other => ApiError::internal("failed to load records", other),
        }
    }
}

impl From<vital_bedrock::error::BedrockError> for ApiError {
    fn from(e: vital_bedrock::error::BedrockError) -> Self {
        ApiError::internal("AI analysis failed", e)
    }
}
