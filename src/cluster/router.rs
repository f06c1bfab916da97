//! The content router and admin coordinator.
//!
//! `ContentRouter` owns the placement ring and is the single entry point for
//! both planes: client reads/writes route through the ring to a storage
//! node, and admin membership changes mutate the ring and stream displaced
//! chunks between nodes until placement is restored.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tokio::sync::RwLock;

use super::hash::chunk_key;
use super::ring::{NodeHandle, PlacementRing};
use crate::content::{ContentError, ContentStore};
use crate::storage::client::StorageClient;

/// A membership change that failed partway through its migration.
///
/// The chunks counted in `migrated` already live at their new home; the rest
/// stay where they were. Both sides hold legal placements, so no rollback is
/// attempted and the operation simply stops at the failing RPC.
#[derive(Debug, Error)]
#[error("migration aborted after {migrated} chunk(s): {source}")]
pub struct MigrationError {
    pub migrated: u32,
    #[source]
    pub source: ContentError,
}

pub struct ContentRouter {
    ring: RwLock<PlacementRing>,
}

impl ContentRouter {
    /// Builds a router over an initial set of storage nodes.
    ///
    /// Initial addresses are hashed and inserted without any rebalance; a
    /// fresh cluster is assumed to hold no content yet. Duplicate addresses
    /// (or 64-bit hash collisions) are dropped with a warning.
    pub fn new(initial_addresses: &[String]) -> Self {
        let mut ring = PlacementRing::new();
        for address in initial_addresses {
            match ring.insert(NodeHandle::connect(address)) {
                Some(position) => {
                    tracing::info!("registered storage node {} at {:#018x}", address, position);
                }
                None => {
                    tracing::warn!("ignoring duplicate storage node address {}", address);
                }
            }
        }
        Self {
            ring: RwLock::new(ring),
        }
    }

    /// Adds a storage node and pulls over every chunk whose home it now is.
    ///
    /// Holds the exclusive ring lock for the whole operation. Every other
    /// node is scanned, not just the ring neighbors: the full scan costs
    /// extra ListFiles calls but is robust to any prior ring state. Returns
    /// the number of chunks that moved; adding an address already present is
    /// a no-op reporting zero.
    pub async fn add_node(&self, address: &str) -> Result<u32, MigrationError> {
        let mut ring = self.ring.write().await;

        let Some(position) = ring.insert(NodeHandle::connect(address)) else {
            tracing::info!("add_node: {} already in the ring", address);
            return Ok(0);
        };
        tracing::info!("add_node: {} inserted at {:#018x}", address, position);

        let sources: Vec<NodeHandle> = ring
            .handles()
            .filter(|handle| handle.address != address)
            .cloned()
            .collect();

        let mut migrated = 0u32;
        for source in &sources {
            let entries = source
                .client
                .list_files()
                .await
                .map_err(|source| MigrationError { migrated, source })?;

            for entry in entries {
                let Some((video_id, filename)) = entry.split_once('/') else {
                    tracing::warn!("add_node: skipping malformed listing entry {:?}", entry);
                    continue;
                };
                let destination = match ring.successor_of(&entry) {
                    Some(owner) if owner.address == address => owner.client.clone(),
                    _ => continue,
                };

                migrate_chunk(&source.client, &destination, video_id, filename)
                    .await
                    .map_err(|source| MigrationError { migrated, source })?;
                migrated += 1;
            }
        }

        tracing::info!("add_node: {} chunk(s) migrated to {}", migrated, address);
        Ok(migrated)
    }

    /// Removes a storage node, draining its chunks to their new homes first.
    ///
    /// Holds the exclusive ring lock for the whole operation. The position is
    /// unlinked before draining so every chunk's successor is computed under
    /// the new ring. If the ring empties, the chunks stay on the detached
    /// node and are simply no longer addressable. Removing an absent address
    /// is a no-op reporting zero.
    pub async fn remove_node(&self, address: &str) -> Result<u32, MigrationError> {
        let mut ring = self.ring.write().await;

        let Some(detached) = ring.remove(address) else {
            tracing::info!("remove_node: {} not in the ring", address);
            return Ok(0);
        };
        tracing::info!("remove_node: {} unlinked, draining", address);

        let mut migrated = 0u32;
        let entries = detached
            .client
            .list_files()
            .await
            .map_err(|source| MigrationError { migrated, source })?;

        for entry in entries {
            let Some((video_id, filename)) = entry.split_once('/') else {
                tracing::warn!("remove_node: skipping malformed listing entry {:?}", entry);
                continue;
            };
            let Some(destination) = ring.successor_of(&entry).map(|h| h.client.clone()) else {
                continue;
            };

            migrate_chunk(&detached.client, &destination, video_id, filename)
                .await
                .map_err(|source| MigrationError { migrated, source })?;
            migrated += 1;
        }

        tracing::info!(
            "remove_node: {} chunk(s) drained from {}",
            migrated,
            address
        );
        Ok(migrated)
    }

    /// Node addresses in ring-position order.
    pub async fn list_nodes(&self) -> Vec<String> {
        self.ring.read().await.addresses()
    }

    /// Looks up the home node of a chunk under the shared lock, returning a
    /// clone of its handle so the RPC itself runs outside the lock.
    async fn home_node(&self, video_id: &str, filename: &str) -> Result<NodeHandle, ContentError> {
        let ring = self.ring.read().await;
        ring.successor_of(&chunk_key(video_id, filename))
            .cloned()
            .ok_or(ContentError::NoNode)
    }
}

/// Moves one chunk: copy to the destination, then delete from the source.
/// A crash between the two steps leaves the chunk on both nodes, never on
/// neither; a concurrent read routed to either side succeeds.
async fn migrate_chunk(
    source: &StorageClient,
    destination: &StorageClient,
    video_id: &str,
    filename: &str,
) -> Result<(), ContentError> {
    let data = source.read_file(video_id, filename).await?;
    destination.write_file(video_id, filename, data).await?;
    source.delete_file(video_id, filename).await?;
    Ok(())
}

#[async_trait]
impl ContentStore for ContentRouter {
    async fn read(&self, video_id: &str, filename: &str) -> Result<Bytes, ContentError> {
        let node = self.home_node(video_id, filename).await?;
        node.client.read_file(video_id, filename).await
    }

    async fn write(
        &self,
        video_id: &str,
        filename: &str,
        data: Bytes,
    ) -> Result<(), ContentError> {
        let node = self.home_node(video_id, filename).await?;
        node.client.write_file(video_id, filename, data).await
    }
}
