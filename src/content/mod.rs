//! Content Backend Seam
//!
//! Chunk storage sits behind a single trait so the web layer does not care
//! whether chunks live on the local filesystem or on a cluster of storage
//! nodes reached over the network.
//!
//! ## Backends
//! - **`FsContentStore`** (this module): single-machine backend writing
//!   chunks straight under a local directory.
//! - **`ContentRouter`** (`crate::cluster`): network backend routing each
//!   chunk to its home storage node via consistent hashing.

pub mod fs;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub use fs::FsContentStore;

/// Failures surfaced by content backends.
///
/// The variants mirror the logical error kinds callers must tell apart:
/// a missing chunk, an empty placement ring, a transport failure, and an
/// I/O failure reported by whichever node (or local disk) holds the chunk.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("chunk {video_id}/{filename} not found")]
    NotFound { video_id: String, filename: String },

    #[error("no storage nodes in the placement ring")]
    NoNode,

    #[error("rpc to storage node {address} failed: {source}")]
    Rpc {
        address: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("storage node {address} returned status {status}: {message}")]
    Node {
        address: String,
        status: u16,
        message: String,
    },

    #[error("invalid path segment {segment:?}")]
    InvalidPath { segment: String },

    #[error("content io failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Read/write access to chunk content, keyed by `(videoId, filename)`.
///
/// Deletion is deliberately absent: clients never delete chunks, only the
/// cluster migration path does, and it talks to storage nodes directly.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn read(&self, video_id: &str, filename: &str) -> Result<Bytes, ContentError>;

    async fn write(&self, video_id: &str, filename: &str, data: Bytes)
        -> Result<(), ContentError>;
}
