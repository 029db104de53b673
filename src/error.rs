//! Error handling for the application

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::pricing::responses::PricingErrorResponse;
use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    #[error("Malformed request: {0}")]
    BadRequest(#[from] JsonRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Pricing(e) => {
                let status = if e.is_configuration_fault() {
                    tracing::error!("Pricing configuration error: {}", e);
                    StatusCode::INTERNAL_SERVER_ERROR
                } else {
                    StatusCode::UNPROCESSABLE_ENTITY
                };
                let details = match e {
                    PricingError::ConfigurationError { errors, .. } if !errors.is_empty() => {
                        Some(serde_json::json!({ "errors": errors }))
                    }
                    PricingError::InvalidInput { field, .. } => {
                        Some(serde_json::json!({ "field": field }))
                    }
                    _ => None,
                };
                (
                    status,
                    PricingErrorResponse {
                        error_type: e.error_type().to_string(),
                        message: e.to_string(),
                        details,
                    },
                )
            }
            AppError::BadRequest(rejection) => (
                rejection.status(),
                PricingErrorResponse {
                    error_type: "bad_request".to_string(),
                    message: rejection.body_text(),
                    details: None,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
