//! Distributed Video Hosting Service Library
//!
//! This library crate defines the core modules that make up the video cluster.
//! It serves as the foundation for the two binary executables: the web/router
//! node (`main.rs`) and the storage node (`bin/storage.rs`).
//!
//! ## Architecture Modules
//! The system is composed of five loosely coupled subsystems:
//!
//! - **`cluster`**: The content placement layer. Maps chunk keys onto a
//!   consistent-hash ring of storage nodes, routes client reads and writes to
//!   the owning node, and drives chunk migration when the admin adds or
//!   removes nodes.
//! - **`storage`**: The storage-node side. Persists opaque chunk blobs under a
//!   local base directory and exposes them over a small HTTP RPC surface,
//!   plus the typed client stub the router uses to talk to each node.
//! - **`content`**: The backend seam. Both the cluster router and the
//!   single-machine filesystem backend implement the same `ContentStore`
//!   trait, so the web layer is agnostic to where chunks live.
//! - **`metadata`**: The video catalog. A SQLite-backed store mapping video
//!   ids to upload timestamps.
//! - **`web`**: The browser-facing surface. Video catalog and watch pages,
//!   DASH segment delivery, and the MP4 upload endpoint that shells out to
//!   `ffmpeg` for transcoding.

pub mod cluster;
pub mod content;
pub mod metadata;
pub mod storage;
pub mod web;
