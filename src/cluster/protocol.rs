//! Admin Wire Protocol
//!
//! Defines the endpoints and DTOs of the membership RPCs served by the
//! router process. These are operator-facing: adding a node, draining and
//! removing a node, and listing the current ring.

use serde::{Deserialize, Serialize};

/// Adds a storage node to the ring and pulls its share of chunks over.
pub const ENDPOINT_ADD_NODE: &str = "/admin/add_node";
/// Removes a storage node from the ring, draining its chunks first.
pub const ENDPOINT_REMOVE_NODE: &str = "/admin/remove_node";
/// Lists node addresses in ring-position order.
pub const ENDPOINT_LIST_NODES: &str = "/admin/list_nodes";

#[derive(Debug, Serialize, Deserialize)]
pub struct AddNodeRequest {
    pub node_address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RemoveNodeRequest {
    pub node_address: String,
}

/// Response for both membership changes: how many chunks were streamed to a
/// new home. A duplicate add or an absent remove reports zero.
#[derive(Debug, Serialize, Deserialize)]
pub struct MigrationResponse {
    pub migrated_file_count: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListNodesResponse {
    pub nodes: Vec<String>,
}

/// Error payload for an aborted membership change. The chunks migrated
/// before the failing RPC stay where they landed; no rollback is attempted,
/// so the partial count is part of the answer.
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminErrorResponse {
    pub error: String,
    pub migrated_file_count: i32,
}
