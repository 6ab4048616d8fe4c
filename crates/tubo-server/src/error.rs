//! API error type and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tubo_core::error::{RateError, ValidationError};

/// Body text for every 500; details stay in the server log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

/// Everything a handler can fail with.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)] Validation(#[from] ValidationError),
    #[error("No interest rate found for that amount.")] NoRate(#[from] RateError),
    #[error("{0}")] BadRequest(String),
    #[error("internal: {0}")] Internal(String),
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::NoRate(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            Self::NoRate(reason) => {
                tracing::warn!(%reason, "rate lookup failed");
                self.to_string()
            }
            _ => {
                tracing::debug!(error = %self, "rejected request");
                self.to_string()
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_bad_request_with_field_message() {
        let err = ApiError::from(ValidationError::Amount);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "\"amount\" must be a positive number.");
    }

    #[test]
    fn rate_errors_share_one_message() {
        for reason in [RateError::TierNotConfigured("x".into()), RateError::NoBracket(1.0)] {
            let err = ApiError::from(reason);
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
            assert_eq!(err.to_string(), "No interest rate found for that amount.");
        }
    }

    #[test]
    fn internal_is_500() {
        let response = ApiError::Internal("disk on fire".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
