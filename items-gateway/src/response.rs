//! JSON response encoding shared by handlers and errors.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Content type attached to every response body.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

const FALLBACK_BODY: &str = r#"{"message":"internal error"}"#;

/// Serialize `body` as UTF-8 JSON with the service's content type.
///
/// Non-ASCII text is emitted as-is, not escaped.
pub fn json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response {
    let content_type = [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))];
    match serde_json::to_vec(body) {
        Ok(bytes) => (status, content_type, bytes).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize response body");
            (StatusCode::INTERNAL_SERVER_ERROR, content_type, FALLBACK_BODY).into_response()
        }
    }
}
