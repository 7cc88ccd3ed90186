//! HTTP handlers for lectern-api.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use lectern_core::{
    DocumentRepository, LinkRepository, NoteRepository, SearchRepository, TagRepository,
};

use crate::{ApiError, AppState};

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// `POST /api/upload` — multipart upload of one `file` field.
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read file field: {}", e)))?;
            upload = Some((filename, data.to_vec()));
        }
    }
    let (filename, data) =
        upload.ok_or_else(|| ApiError::BadRequest("No file provided".to_string()))?;

    let report = state.pipeline.ingest(&filename, &data).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "File uploaded successfully",
            "doc_id": report.document_id,
            "analysis": report.analysis,
        })),
    ))
}

/// `GET /api/documents` — all documents, newest first, content omitted.
pub async fn list_documents(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let documents = state.db.documents.list().await?;
    Ok(Json(documents))
}

/// `GET /api/documents/{id}` — one document with full content and children.
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = state.db.documents.fetch(id).await?;
    Ok(Json(detail))
}

/// `DELETE /api/documents/{id}` — remove the document, its rows, and its file.
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let file_path = state.db.documents.delete(id).await?;

    // Missing files are fine; anything else is logged and ignored.
    if let Err(e) = tokio::fs::remove_file(&file_path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(file_path = %file_path, error = %e, "Failed to remove stored file");
        }
    }

    Ok(Json(json!({ "message": "Document deleted successfully" })))
}

/// `POST /api/documents/{id}/regenerate` — re-run analysis on stored content.
pub async fn regenerate_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let (title, content) = state.db.documents.fetch_content(id).await?;
    let analysis = state.analyzer.analyze(&content, &title).await;
    state.db.documents.replace_analysis(id, &analysis).await?;
    Ok(Json(analysis))
}

#[derive(Debug, Deserialize)]
pub struct AddNoteRequest {
    pub note: Option<String>,
}

/// `POST /api/documents/{id}/notes` — append an annotation note.
pub async fn add_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AddNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let note = body
        .note
        .ok_or_else(|| ApiError::BadRequest("Note text required".to_string()))?;
    let note_id = state.db.notes.add(id, &note).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": note_id, "message": "Note added successfully" })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct AddTagRequest {
    pub tag: Option<String>,
}

/// `POST /api/documents/{id}/tags` — 201 on insert, 200 if already present.
pub async fn add_tag(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AddTagRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tag = body
        .tag
        .ok_or_else(|| ApiError::BadRequest("Tag required".to_string()))?;
    let inserted = state.db.tags.add(id, &tag).await?;

    Ok(if inserted {
        (
            StatusCode::CREATED,
            Json(json!({ "message": "Tag added successfully" })),
        )
    } else {
        (
            StatusCode::OK,
            Json(json!({ "message": "Tag already exists" })),
        )
    })
}

#[derive(Debug, Deserialize)]
pub struct LinkRequest {
    pub linked_doc_id: Option<Uuid>,
}

/// `POST /api/documents/{id}/links` — 201 on insert, 200 if already present.
pub async fn link_documents(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<LinkRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let linked_doc_id = body
        .linked_doc_id
        .ok_or_else(|| ApiError::BadRequest("Linked document ID required".to_string()))?;
    let inserted = state.db.links.create(id, linked_doc_id).await?;

    Ok(if inserted {
        (
            StatusCode::CREATED,
            Json(json!({ "message": "Documents linked successfully" })),
        )
    } else {
        (
            StatusCode::OK,
            Json(json!({ "message": "Link already exists" })),
        )
    })
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub tag: Option<String>,
}

/// `GET /api/search?q=&tag=` — tag exact-match, else substring query.
pub async fn search_documents(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let documents = state
        .db
        .search
        .search(params.q.as_deref(), params.tag.as_deref())
        .await?;
    Ok(Json(documents))
}

/// `GET /api/tags` — all distinct tag strings, sorted.
pub async fn list_tags(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let tags = state.db.tags.list_all().await?;
    Ok(Json(tags))
}
