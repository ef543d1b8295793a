use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::pricing::PricingError;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Pricing library error
    #[error(transparent)]
    Pricing(#[from] PricingError),
    /// Malformed request (bad JSON, bad query string)
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Pricing(PricingError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            Self::Pricing(PricingError::ServiceNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Pricing(PricingError::DivisionByZero(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Pricing(PricingError::InvalidPriceTable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Pricing(err) => err.error_type(),
            Self::BadRequest(_) => "bad_request",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_type = self.error_type();
        crate::metrics::record_error(error_type);

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "type": error_type,
            }
        }));

        (status, body).into_response()
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<axum::extract::rejection::QueryRejection> for AppError {
    fn from(rejection: axum::extract::rejection::QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
