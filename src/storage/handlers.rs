//! Storage Node API Handlers
//!
//! HTTP endpoints that expose the `DiskStore` primitives to the router.
//! Chunk bodies are raw bytes; listings and errors are JSON.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use super::disk::{DiskStore, StorageError};
use super::protocol::{ENDPOINT_FILES, ErrorResponse, ListFilesResponse};

/// Builds the storage node's HTTP surface over a shared store.
pub fn router(store: Arc<DiskStore>) -> Router {
    Router::new()
        .route(ENDPOINT_FILES, get(handle_list_files))
        .route(
            &format!("{}/:video_id/:filename", ENDPOINT_FILES),
            get(handle_read_file)
                .post(handle_write_file)
                .delete(handle_delete_file),
        )
        .with_state(store)
}

pub async fn handle_read_file(
    State(store): State<Arc<DiskStore>>,
    Path((video_id, filename)): Path<(String, String)>,
) -> Response {
    match store.read(&video_id, &filename).await {
        Ok(data) => (StatusCode::OK, data).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn handle_write_file(
    State(store): State<Arc<DiskStore>>,
    Path((video_id, filename)): Path<(String, String)>,
    body: Bytes,
) -> Response {
    match store.write(&video_id, &filename, &body).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn handle_delete_file(
    State(store): State<Arc<DiskStore>>,
    Path((video_id, filename)): Path<(String, String)>,
) -> Response {
    match store.delete(&video_id, &filename).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn handle_list_files(State(store): State<Arc<DiskStore>>) -> Response {
    match store.list().await {
        Ok(filenames) => (StatusCode::OK, Json(ListFilesResponse { filenames })).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: StorageError) -> Response {
    let status = match &err {
        StorageError::NotFound { .. } => StatusCode::NOT_FOUND,
        StorageError::InvalidSegment { .. } => StatusCode::BAD_REQUEST,
        StorageError::Io(_) => {
            tracing::error!("storage operation failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}
