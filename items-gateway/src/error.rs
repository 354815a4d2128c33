//! Error types for the gateway crate.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use items_core::{ParseError, ValidationError};
use items_store::StoreError;
use serde_json::json;

use crate::response::json_response;

/// Message returned for any internal failure; the cause is only logged.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal error";

/// Errors that can occur during gateway request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// A required setting, such as the table name, is missing.
    #[error("{0}")]
    Configuration(String),

    /// The request body could not be decoded.
    #[error(transparent)]
    BadRequest(#[from] ParseError),

    /// A field or parameter broke its rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request body uses an encoding the service does not accept.
    #[error("{0} body is not supported")]
    UnsupportedEncoding(String),

    /// The request body could not be read, e.g. it exceeds the size limit.
    #[error("{reason}")]
    RequestBody { status: StatusCode, reason: String },

    /// The route exists but does not accept this method.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// No item exists under the requested id, or no route matched.
    #[error("not found")]
    NotFound,

    /// An error propagated from the store layer.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl GatewayError {
    /// Status code paired with this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Configuration(_) | GatewayError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            GatewayError::BadRequest(_)
            | GatewayError::Validation(_)
            | GatewayError::UnsupportedEncoding(_) => StatusCode::BAD_REQUEST,
            GatewayError::RequestBody { status, .. } => *status,
            GatewayError::NotFound => StatusCode::NOT_FOUND,
            GatewayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl From<BytesRejection> for GatewayError {
    fn from(rejection: BytesRejection) -> Self {
        GatewayError::RequestBody { status: rejection.status(), reason: rejection.body_text() }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            GatewayError::Store(cause) => {
                tracing::error!(error = %cause, "store request failed");
                INTERNAL_ERROR_MESSAGE.to_owned()
            }
            GatewayError::Configuration(reason) => {
                tracing::error!(%reason, "gateway misconfigured");
                self.to_string()
            }
            other => {
                tracing::debug!(error = %other, %status, "request rejected");
                other.to_string()
            }
        };
        json_response(status, &json!({ "message": message }))
    }
}
