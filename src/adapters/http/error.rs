//! Status code mapping for service errors

use crate::utils::error::ServiceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Body of every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: bool,
    pub kind: String,
    pub message: String,
    pub suggestion: String,
}

impl ErrorBody {
    pub fn new(kind: &str, message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            error: true,
            kind: kind.to_string(),
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }
}

impl From<&ServiceError> for ErrorBody {
    fn from(error: &ServiceError) -> Self {
        Self::new(
            error.kind(),
            error.user_friendly_message(),
            error.recovery_suggestion(),
        )
    }
}

pub fn status_code(error: &ServiceError) -> StatusCode {
    match error {
        ServiceError::InvalidInputKind { .. }
        | ServiceError::DecodeError { .. }
        | ServiceError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
        ServiceError::ModelUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = status_code(&self);
        if self.is_client_error() {
            tracing::warn!(kind = self.kind(), detail = %self, "Rejected request");
        } else {
            tracing::error!(
                kind = self.kind(),
                severity = ?self.severity(),
                detail = %self,
                "Request failed"
            );
        }

        let body = Json(ErrorBody::from(&self));
        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
