//! # lectern-api
//!
//! HTTP API server for lectern: routes the REST surface onto the document
//! service, ingestion pipeline, and analyzer.

pub mod handlers;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use lectern_core::defaults::MAX_UPLOAD_SIZE_BYTES;
use lectern_db::Database;
use lectern_inference::DocumentAnalyzer;
use lectern_ingest::IngestionPipeline;

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful for
/// log correlation when reading back a day's requests.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// APPLICATION STATE AND ROUTER
// =============================================================================

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub pipeline: IngestionPipeline,
    pub analyzer: DocumentAnalyzer,
}

/// Build the application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/upload", post(handlers::upload_document))
        .route("/api/documents", get(handlers::list_documents))
        .route(
            "/api/documents/:id",
            get(handlers::get_document).delete(handlers::delete_document),
        )
        .route(
            "/api/documents/:id/regenerate",
            post(handlers::regenerate_analysis),
        )
        .route("/api/documents/:id/notes", post(handlers::add_note))
        .route("/api/documents/:id/tags", post(handlers::add_tag))
        .route("/api/documents/:id/links", post(handlers::link_documents))
        .route("/api/search", get(handlers::search_documents))
        .route("/api/tags", get(handlers::list_tags))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT]),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE_BYTES))
        .with_state(state)
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

/// API-facing error with an HTTP status mapping.
#[derive(Debug)]
pub enum ApiError {
    Database(lectern_core::Error),
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl From<lectern_core::Error> for ApiError {
    fn from(err: lectern_core::Error) -> Self {
        match &err {
            lectern_core::Error::NotFound(msg) => ApiError::NotFound(msg.clone()),
            lectern_core::Error::DocumentNotFound(id) => {
                ApiError::NotFound(format!("Document {} not found", id))
            }
            lectern_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            lectern_core::Error::Extraction(msg) => ApiError::Internal(msg.clone()),
            _ => ApiError::Database(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Database(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
