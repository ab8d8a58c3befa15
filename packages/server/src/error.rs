use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use sea_orm::DbErr;
use shelter_common::media::MediaError;

use crate::views;

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    /// Request body larger than `uploads.max_content_length`.
    PayloadTooLarge,
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the user.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::PayloadTooLarge => "Upload is too large.".into(),
            AppError::Internal(_) => "An unexpected error occurred".into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(detail) = &self {
            tracing::error!("Internal error: {}", detail);
        }
        let status = self.status();
        let body = views::error_page(status, &self.public_message());
        (status, Html(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::SizeLimitExceeded { .. } => AppError::PayloadTooLarge,
            other => AppError::Internal(other.to_string()),
        }
    }
}
