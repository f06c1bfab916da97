//! Admin API Handlers
//!
//! HTTP endpoints for cluster membership, served by the router process on
//! its admin address. These translate admin requests into `ContentRouter`
//! membership operations and report migration counts back.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use super::protocol::{
    AddNodeRequest, AdminErrorResponse, ENDPOINT_ADD_NODE, ENDPOINT_LIST_NODES,
    ENDPOINT_REMOVE_NODE, ListNodesResponse, MigrationResponse, RemoveNodeRequest,
};
use super::router::{ContentRouter, MigrationError};

/// Builds the admin HTTP surface over a shared router.
pub fn router(content_router: Arc<ContentRouter>) -> Router {
    Router::new()
        .route(ENDPOINT_ADD_NODE, post(handle_add_node))
        .route(ENDPOINT_REMOVE_NODE, post(handle_remove_node))
        .route(ENDPOINT_LIST_NODES, get(handle_list_nodes))
        .with_state(content_router)
}

pub async fn handle_add_node(
    State(content_router): State<Arc<ContentRouter>>,
    Json(req): Json<AddNodeRequest>,
) -> Response {
    match content_router.add_node(&req.node_address).await {
        Ok(migrated) => migration_response(migrated),
        Err(err) => migration_error_response("add_node", &req.node_address, err),
    }
}

pub async fn handle_remove_node(
    State(content_router): State<Arc<ContentRouter>>,
    Json(req): Json<RemoveNodeRequest>,
) -> Response {
    match content_router.remove_node(&req.node_address).await {
        Ok(migrated) => migration_response(migrated),
        Err(err) => migration_error_response("remove_node", &req.node_address, err),
    }
}

pub async fn handle_list_nodes(
    State(content_router): State<Arc<ContentRouter>>,
) -> (StatusCode, Json<ListNodesResponse>) {
    let nodes = content_router.list_nodes().await;
    (StatusCode::OK, Json(ListNodesResponse { nodes }))
}

fn migration_response(migrated: u32) -> Response {
    (
        StatusCode::OK,
        Json(MigrationResponse {
            migrated_file_count: migrated as i32,
        }),
    )
        .into_response()
}

fn migration_error_response(op: &str, address: &str, err: MigrationError) -> Response {
    tracing::error!("{} for {} aborted: {}", op, address, err);
    (
        StatusCode::BAD_GATEWAY,
        Json(AdminErrorResponse {
            error: err.to_string(),
            migrated_file_count: err.migrated as i32,
        }),
    )
        .into_response()
}
