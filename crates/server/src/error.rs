use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use symbiosis_common::SymbiosisError;
use tracing::{error, warn};

use crate::types::ErrorResponse;

/// Boundary wrapper turning domain errors into HTTP responses
#[derive(Debug)]
pub struct ApiError(pub SymbiosisError);

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<SymbiosisError> for ApiError {
    fn from(err: SymbiosisError) -> Self {
        Self(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed ({}): {}", status.as_u16(), self.0);
        } else {
            warn!("Request rejected ({}): {}", status.as_u16(), self.0);
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.0.to_string(),
            upstream_status: match &self.0 {
                SymbiosisError::Generation(inner) => inner.status(),
                _ => None,
            },
        })
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
