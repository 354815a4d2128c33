//! Axum route handlers for the items API.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::Response,
    routing::get,
    Router,
};
use chrono::Utc;
use items_core::{
    format_created_at, to_public, to_storage, validate_create_input, ItemId, ListLimit,
    PublicItem, RawInput, ValidationError,
};
use items_store::ItemStore;
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};

use crate::{config::GatewayConfig, error::GatewayError, response::json_response};

// ── Shared state ─────────────────────────────────────────────────────────────

/// Store handle and configuration injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ItemStore>,
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn ItemStore>, config: GatewayConfig) -> Self {
        Self { store, config: Arc::new(config) }
    }
}

// ── Request / response types ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<String>,
}

/// Body of the create and get responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemResponse {
    pub item: PublicItem,
}

/// Body of the list response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemListResponse {
    pub items: Vec<PublicItem>,
    pub count: usize,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router over the given state.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", get(get_item))
        .route("/health", get(health))
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health` — liveness probe.
pub async fn health() -> Response {
    json_response(StatusCode::OK, &serde_json::json!({"status": "ok"}))
}

async fn route_not_found() -> GatewayError {
    GatewayError::NotFound
}

async fn method_not_allowed() -> GatewayError {
    GatewayError::MethodNotAllowed
}

/// `POST /items` — validate the body, store a new item and return it.
///
/// # Errors
/// Returns [`GatewayError::Configuration`] if no table is configured,
/// [`GatewayError::UnsupportedEncoding`] for an encoded body,
/// [`GatewayError::RequestBody`] if the body cannot be read,
/// [`GatewayError::BadRequest`] or [`GatewayError::Validation`] for bad
/// input, and [`GatewayError::Store`] if the write fails.
pub async fn create_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, GatewayError> {
    state.config.table_name()?;
    reject_encoded_body(&headers)?;
    let body = body?;

    let raw = RawInput::parse(&body)?;
    let fields = validate_create_input(&raw)?;

    let id = ItemId::new();
    let created_at = format_created_at(Utc::now());
    let record = to_storage(fields, &id, &created_at, &state.config.listing_partition);
    let key = record.primary_key.clone();
    let item = to_public(record.clone());

    state.store.put_by_key(&key, record).await?;
    info!(id = %id, created_at = %created_at, "item created");

    Ok(json_response(StatusCode::CREATED, &ItemResponse { item }))
}

/// `GET /items/{id}` — fetch one item by id.
///
/// # Errors
/// Returns [`GatewayError::Validation`] if `id` is not 32 hex digits,
/// [`GatewayError::NotFound`] if no such item exists, and
/// [`GatewayError::Store`] if the lookup fails.
pub async fn get_item(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Response, GatewayError> {
    state.config.table_name()?;
    // An id that does not even decode (e.g. invalid UTF-8) fails the same rule.
    let Path(id) = id.map_err(|_| ValidationError::InvalidId)?;
    let id = ItemId::parse(&id)?;

    let record = state
        .store
        .get_by_key(&id.primary_key())
        .await?
        .ok_or(GatewayError::NotFound)?;
    debug!(id = %id, "item fetched");

    Ok(json_response(StatusCode::OK, &ItemResponse { item: to_public(record) }))
}

/// `GET /items?limit=N` — list the most recent items, newest first.
///
/// # Errors
/// Returns [`GatewayError::Validation`] if `limit` is not an integer in
/// `[1, 100]` and [`GatewayError::Store`] if the index query fails.
pub async fn list_items(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Response, GatewayError> {
    state.config.table_name()?;
    // Undecodable query strings, such as a repeated `limit`, are a bad limit.
    let Query(params) = params.map_err(|_| ValidationError::LimitNotInteger)?;
    let limit = ListLimit::parse(params.limit.as_deref())?;

    let records = state
        .store
        .query_by_partition_descending(&state.config.listing_partition, limit.get())
        .await?;
    let items: Vec<PublicItem> = records.into_iter().map(to_public).collect();
    debug!(
        index = %state.config.index_name,
        limit = limit.get(),
        count = items.len(),
        "items listed"
    );

    let count = items.len();
    Ok(json_response(StatusCode::OK, &ItemListResponse { items, count }))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn reject_encoded_body(headers: &HeaderMap) -> Result<(), GatewayError> {
    let Some(value) = headers.get(header::CONTENT_ENCODING) else {
        return Ok(());
    };
    let encoding = value.to_str().unwrap_or("unknown").trim().to_ascii_lowercase();
    if encoding.is_empty() || encoding == "identity" {
        return Ok(());
    }
    Err(GatewayError::UnsupportedEncoding(encoding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use items_store::MemoryStore;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState::new(
            Arc::new(MemoryStore::new("items", "gsi1")),
            GatewayConfig::new(Some("items".to_owned())),
        )
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let resp = match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        let status = resp.status();
        let bytes = match axum::body::to_bytes(resp.into_body(), 64 * 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        let body = match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => panic!("invalid JSON: {e}"),
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        match Request::builder().uri(uri).body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        }
    }

    fn post(body: &'static str, encoding: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/items")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(enc) = encoding {
            builder = builder.header(header::CONTENT_ENCODING, enc);
        }
        match builder.body(Body::from(body)) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        }
    }

    #[tokio::test]
    async fn health_response_format_returns_ok_with_status_field() {
        let (status, body) = send(create_router(test_state()), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn create_returns_201_with_generated_fields() {
        let app = create_router(test_state());
        let req = post(r#"{"title":"Buy milk","body":"2% milk, 1 gallon"}"#, None);
        let (status, body) = send(app, req).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["item"]["category"], "");
        assert_eq!(body["item"]["title"], "Buy milk");
        let id = body["item"]["id"].as_str().unwrap_or_default();
        assert_eq!(id.len(), 32, "id must be 32 hex chars, got {id:?}");
        let created_at = body["item"]["created_at"].as_str().unwrap_or_default();
        assert_eq!(created_at.len(), "2024-01-01T00:00:00Z".len());
        assert!(created_at.ends_with('Z'));
        assert!(body["item"].get("pk").is_none(), "index keys must stay internal");
    }

    #[tokio::test]
    async fn create_rejects_encoded_body() {
        let app = create_router(test_state());
        let req = post(r#"{"title":"t","body":"b"}"#, Some("base64"));
        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "base64 body is not supported");
    }

    #[tokio::test]
    async fn create_accepts_identity_encoding() {
        let app = create_router(test_state());
        let req = post(r#"{"title":"t","body":"b"}"#, Some("identity"));
        let (status, _) = send(app, req).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn create_reports_malformed_json() {
        let app = create_router(test_state());
        let (status, body) = send(app, post("{not json", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body["message"].as_str().unwrap_or_default();
        assert!(message.starts_with("invalid json: "), "got {message:?}");
    }

    #[tokio::test]
    async fn create_with_empty_body_fails_title_rule() {
        let app = create_router(test_state());
        let (status, body) = send(app, post("", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "title is required (1-200 chars)");
    }

    #[tokio::test]
    async fn get_rejects_malformed_id() {
        let app = create_router(test_state());
        let (status, body) = send(app, get("/items/not-a-valid-id")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body["message"].as_str().unwrap_or_default();
        assert!(message.contains("32 hex chars"), "got {message:?}");
    }

    #[tokio::test]
    async fn get_unknown_id_returns_404() {
        let app = create_router(test_state());
        let (status, body) = send(app, get("/items/0123456789abcdef0123456789abcdef")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "not found");
    }

    #[tokio::test]
    async fn list_rejects_bad_limits() {
        for (uri, message) in [
            ("/items?limit=0", "limit must be between 1 and 100"),
            ("/items?limit=101", "limit must be between 1 and 100"),
            ("/items?limit=abc", "limit must be an integer"),
        ] {
            let (status, body) = send(create_router(test_state()), get(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["message"], message, "{uri}");
        }
    }

    #[tokio::test]
    async fn list_on_empty_store_returns_zero_count() {
        let (status, body) = send(create_router(test_state()), get("/items")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 0);
        assert_eq!(body["items"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn missing_table_returns_500_for_every_item_route() {
        let state = AppState::new(
            Arc::new(MemoryStore::new("", "gsi1")),
            GatewayConfig::new(None),
        );
        for req in [
            get("/items"),
            get("/items/0123456789abcdef0123456789abcdef"),
            post(r#"{"title":"t","body":"b"}"#, None),
        ] {
            let (status, body) = send(create_router(state.clone()), req).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body["message"], "TABLE_NAME is not configured");
        }
    }

    #[tokio::test]
    async fn unknown_route_returns_json_404() {
        let (status, body) = send(create_router(test_state()), get("/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "not found");
    }

    async fn send_expecting_json(
        app: Router,
        req: Request<Body>,
    ) -> (StatusCode, serde_json::Value) {
        let resp = match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        let content_type = resp.headers().get(header::CONTENT_TYPE).cloned();
        assert_eq!(
            content_type.as_ref().and_then(|v| v.to_str().ok()),
            Some(crate::response::JSON_CONTENT_TYPE),
            "every response must be JSON"
        );
        let status = resp.status();
        let bytes = match axum::body::to_bytes(resp.into_body(), 64 * 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        match serde_json::from_slice(&bytes) {
            Ok(v) => (status, v),
            Err(e) => panic!("invalid JSON: {e}"),
        }
    }

    fn request(method: &str, uri: &str, body: Body) -> Request<Body> {
        match Request::builder().method(method).uri(uri).body(body) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        }
    }

    #[tokio::test]
    async fn wrong_method_returns_json_405() {
        for (method, uri) in [
            ("DELETE", "/items"),
            ("PUT", "/items/0123456789abcdef0123456789abcdef"),
        ] {
            let req = request(method, uri, Body::empty());
            let (status, body) = send_expecting_json(create_router(test_state()), req).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
            assert_eq!(body["message"], "method not allowed");
        }
    }

    #[tokio::test]
    async fn undecodable_id_fails_the_id_rule() {
        let (status, body) =
            send_expecting_json(create_router(test_state()), get("/items/%FF%FE")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "id must be 32 hex chars (uuid4 hex)");
    }

    #[tokio::test]
    async fn oversized_body_returns_json_413() {
        let huge = format!(r#"{{"title":"t","body":"{}"}}"#, "x".repeat(3 * 1024 * 1024));
        let req = request("POST", "/items", Body::from(huge));
        let (status, body) = send_expecting_json(create_router(test_state()), req).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(body["message"].is_string(), "413 must carry a message, got {body}");
    }

    #[tokio::test]
    async fn repeated_limit_is_not_an_integer() {
        let (status, body) =
            send_expecting_json(create_router(test_state()), get("/items?limit=1&limit=2")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "limit must be an integer");
    }
}
