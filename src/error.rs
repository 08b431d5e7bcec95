//! HTTP-facing error type.

use crate::caption::CaptionError;
use crate::image_prep::ImageError;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No image was uploaded")]
    MissingImage,

    #[error("Caption must not be empty")]
    EmptyCaption,

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error("Caption generation failed: {0}")]
    Caption(#[from] CaptionError),

    #[error("Invalid upload: {0}")]
    Multipart(#[from] MultipartError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingImage | AppError::EmptyCaption => StatusCode::BAD_REQUEST,
            AppError::Image(ImageError::TooLarge(..)) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Image(ImageError::EncodeFailed(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Image(_) => StatusCode::BAD_REQUEST,
            AppError::Caption(_) => StatusCode::BAD_GATEWAY,
            AppError::Multipart(err) => err.status(),
        }
    }

    /// Text returned to clients. Upstream and decoder details stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Image(ImageError::DecodeFailed(_)) => "Failed to decode image".to_string(),
            AppError::Image(ImageError::EncodeFailed(_)) => "Failed to prepare image".to_string(),
            AppError::Caption(_) => "Caption generation failed".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(%status, error = %self, "Request failed");
        } else {
            warn!(%status, error = %self, "Request rejected");
        }

        let body = Json(serde_json::json!({ "error": self.client_message() }));
        (status, body).into_response()
    }
}
