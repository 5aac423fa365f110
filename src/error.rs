// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::message::ErrorResponse;
use crate::services::gemini::ModelError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    BadRequest(String),

    #[error("Missing GEMINI_API_KEY on server")]
    MissingApiKey,

    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    #[error("Server error")]
    Internal(#[from] anyhow::Error),
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Upstream { status, message } => AppError::Upstream { status, message },
            ModelError::Network(err) => AppError::Internal(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Caller mistakes (405, 400) are answered without a log entry;
        // everything else is an operator concern.
        let (status, message) = match &self {
            AppError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, self.to_string()),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::MissingApiKey => {
                error!("GEMINI_API_KEY is not configured");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::Upstream { status, message } => {
                error!(status = %status, "Gemini API error: {message}");
                (*status, message.clone())
            }
            AppError::Internal(err) => {
                error!("Server error: {err:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
