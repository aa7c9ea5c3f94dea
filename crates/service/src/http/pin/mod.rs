use axum::extract::multipart::MultipartError;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use common::hasher::HashError;
use common::pin::{PinError, PinResult};

use crate::ServiceState;

pub mod file;
pub mod json;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/pinJson", post(json::handler))
        .route("/pinFile", post(file::handler))
        .with_state(state)
}

/// Envelope for every successful pin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinResponse {
    pub ok: bool,
    pub value: PinResult,
}

impl From<PinResult> for PinResponse {
    fn from(value: PinResult) -> Self {
        Self { ok: true, value }
    }
}

impl IntoResponse for PinResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PinRouteError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Multipart error: {0}")]
    MultipartError(String),
    #[error("Upload too large: {0}")]
    UploadTooLarge(String),
    #[error(transparent)]
    Pin(#[from] PinError),
}

impl PinRouteError {
    fn status(&self) -> StatusCode {
        match self {
            PinRouteError::InvalidRequest(_) | PinRouteError::MultipartError(_) => {
                StatusCode::BAD_REQUEST
            }
            PinRouteError::UploadTooLarge(_)
            | PinRouteError::Pin(PinError::Hashing(HashError::TooLarge { .. })) => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            PinRouteError::Pin(e) if e.is_invalid_request() => StatusCode::BAD_REQUEST,
            PinRouteError::Pin(PinError::Storage(_))
            | PinRouteError::Pin(PinError::PartialWriteFailure { .. }) => StatusCode::BAD_GATEWAY,
            PinRouteError::Pin(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MultipartError> for PinRouteError {
    fn from(e: MultipartError) -> Self {
        // the body limit surfaces while the stream is read
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            PinRouteError::UploadTooLarge(e.body_text())
        } else {
            PinRouteError::MultipartError(e.body_text())
        }
    }
}

impl IntoResponse for PinRouteError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = if status.is_server_error() {
            match self {
                PinRouteError::Pin(PinError::PartialWriteFailure { item_name, .. }) => {
                    format!("Failed to add file {}", item_name)
                }
                PinRouteError::Pin(PinError::Storage(_)) => "Storage unavailable".to_string(),
                _ => "Unexpected error".to_string(),
            }
        } else {
            self.to_string()
        };

        let body = serde_json::json!({"ok": false, "error": error});
        (status, Json(body)).into_response()
    }
}
