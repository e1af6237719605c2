use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::bookings::BookingError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error("{0}")]
    BadRequest(String),

    /// The message is returned to the client; the cause is only logged.
    #[error("{message}")]
    Internal { message: &'static str, cause: String },
}

impl AppError {
    pub fn internal(message: &'static str, cause: impl std::fmt::Display) -> Self {
        AppError::Internal {
            message,
            cause: cause.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Booking(BookingError::NotFound) => StatusCode::NOT_FOUND,
            AppError::Booking(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Internal { message, cause } => {
                tracing::error!(error = %cause, "{message}");
            }
            other => {
                tracing::warn!(status = status.as_u16(), "request rejected: {other}");
            }
        }

        let body = serde_json::json!({ "success": false, "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
