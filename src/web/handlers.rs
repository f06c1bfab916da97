//! Web API Handlers
//!
//! HTTP endpoints for browsers: catalog pages, the JSON listing behind them,
//! chunk delivery, and the upload pipeline.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use bytes::Bytes;
use chrono::Utc;

use super::transcode;
use super::types::{VideoListResponse, VideoSummary};
use crate::content::{ContentError, ContentStore};
use crate::metadata::SqliteMetadataStore;
use crate::metadata::types::TIME_LAYOUT;

const INDEX_HTML: &str = include_str!("assets/index.html");
const WATCH_HTML: &str = include_str!("assets/watch.html");

#[derive(Clone)]
pub struct AppState {
    pub metadata: SqliteMetadataStore,
    pub content: Arc<dyn ContentStore>,
}

/// Builds the public HTTP surface. `max_upload_bytes` caps the multipart
/// body, which also bounds the size of any single chunk downstream.
pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/api/videos", get(handle_list_videos))
        .route("/videos/:video_id", get(handle_watch))
        .route("/content/:video_id/:filename", get(handle_content))
        .route("/upload", post(handle_upload))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

pub async fn handle_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn handle_list_videos(State(state): State<AppState>) -> Response {
    match state.metadata.list().await {
        Ok(entries) => {
            let videos = entries
                .into_iter()
                .map(|metadata| VideoSummary {
                    id: metadata.id,
                    uploaded_at: metadata.uploaded_at.format(TIME_LAYOUT).to_string(),
                })
                .collect();
            (StatusCode::OK, Json(VideoListResponse { videos })).into_response()
        }
        Err(err) => {
            tracing::error!("failed to list videos: {:#}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to list videos").into_response()
        }
    }
}

pub async fn handle_watch(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Response {
    match state.metadata.read(&video_id).await {
        Ok(Some(_)) => Html(WATCH_HTML).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "video does not exist").into_response(),
        Err(err) => {
            tracing::error!("failed to read metadata for {}: {:#}", video_id, err);
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to read metadata").into_response()
        }
    }
}

pub async fn handle_content(
    State(state): State<AppState>,
    Path((video_id, filename)): Path<(String, String)>,
) -> Response {
    match state.content.read(&video_id, &filename).await {
        Ok(data) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type_for(&filename))],
            data,
        )
            .into_response(),
        Err(err) => content_error_response(&video_id, &filename, err),
    }
}

pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, (StatusCode, String)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| (StatusCode::BAD_REQUEST, "failed to parse request".to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let source_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|_| (StatusCode::BAD_REQUEST, "failed to read file".to_string()))?;
        return ingest_upload(&state, &source_name, data).await;
    }

    Err((StatusCode::BAD_REQUEST, "failed to get file".to_string()))
}

/// Stages an uploaded MP4, transcodes it to DASH, and distributes the
/// resulting chunks through the content store.
async fn ingest_upload(
    state: &AppState,
    source_name: &str,
    data: Bytes,
) -> Result<Redirect, (StatusCode, String)> {
    let Some(video_id) = video_id_from_upload(source_name) else {
        return Err((StatusCode::BAD_REQUEST, "incorrect file type".to_string()));
    };
    let video_id = video_id.to_string();

    // Duplicate check up front: a transcode is expensive and the id is the
    // primary key downstream.
    match state.metadata.read(&video_id).await {
        Ok(Some(_)) => {
            return Err((
                StatusCode::CONFLICT,
                "video already exists with name".to_string(),
            ));
        }
        Ok(None) => {}
        Err(err) => {
            tracing::error!("metadata lookup for {} failed: {:#}", video_id, err);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to check for duplicates".to_string(),
            ));
        }
    }

    let staging = tempfile::tempdir().map_err(|err| {
        tracing::error!("failed to create staging directory: {}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to create directory".to_string(),
        )
    })?;

    let source_path = staging.path().join(UPLOAD_SOURCE_NAME);
    tokio::fs::write(&source_path, &data).await.map_err(|err| {
        tracing::error!("failed to stage upload for {}: {}", video_id, err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to stage upload".to_string(),
        )
    })?;

    if let Err(err) = transcode::transcode_to_dash(&source_path, staging.path()).await {
        tracing::error!("transcode of {} failed: {:#}", video_id, err);
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to convert .mp4".to_string(),
        ));
    }

    // Insert only once a playable conversion exists.
    if let Err(err) = state.metadata.create(&video_id, Utc::now()).await {
        tracing::error!("failed to record video {}: {:#}", video_id, err);
        return Err((
            StatusCode::CONFLICT,
            "failed to insert video id & time".to_string(),
        ));
    }

    distribute_chunks(state, &video_id, staging.path())
        .await
        .map_err(|err| {
            tracing::error!("failed to distribute chunks for {}: {:#}", video_id, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to copy over files".to_string(),
            )
        })?;

    tracing::info!("video {} uploaded", video_id);
    Ok(Redirect::to("/"))
}

const UPLOAD_SOURCE_NAME: &str = "source.mp4";

/// Writes every transcoder output in `staging` through the content store.
async fn distribute_chunks(
    state: &AppState,
    video_id: &str,
    staging: &std::path::Path,
) -> anyhow::Result<()> {
    let mut entries = tokio::fs::read_dir(staging).await?;
    while let Some(entry) = entries.next_entry().await? {
        let filename = entry.file_name().to_string_lossy().into_owned();
        if filename == UPLOAD_SOURCE_NAME {
            continue;
        }
        let data = tokio::fs::read(entry.path()).await?;
        state
            .content
            .write(video_id, &filename, Bytes::from(data))
            .await?;
    }
    Ok(())
}

/// Derives the video id from an uploaded filename: the `.mp4` stem, which
/// must be non-empty and a single path segment.
pub(crate) fn video_id_from_upload(source_name: &str) -> Option<&str> {
    let video_id = source_name.strip_suffix(".mp4")?;
    if video_id.is_empty() || video_id.contains('/') || video_id.contains('\\') {
        return None;
    }
    Some(video_id)
}

pub(crate) fn content_type_for(filename: &str) -> &'static str {
    if filename == transcode::MANIFEST_FILENAME {
        "application/dash+xml"
    } else {
        "video/m4s"
    }
}

fn content_error_response(video_id: &str, filename: &str, err: ContentError) -> Response {
    let status = match &err {
        ContentError::NotFound { .. } => StatusCode::NOT_FOUND,
        ContentError::NoNode => StatusCode::SERVICE_UNAVAILABLE,
        ContentError::InvalidPath { .. } => StatusCode::BAD_REQUEST,
        _ => {
            tracing::error!("content read {}/{} failed: {}", video_id, filename, err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string()).into_response()
}
