//! Content Placement Module
//!
//! Implements the distributed content placement layer: a consistent-hash ring
//! mapping chunk keys to storage nodes, the client-facing router that reads
//! and writes through the ring, and the admin coordinator that rebalances
//! stored chunks when nodes join or leave.
//!
//! ## Core Mechanisms
//! - **Placement**: node addresses and chunk keys are hashed onto the same
//!   64-bit key space; a chunk's home is the node at the smallest position at
//!   or after its key, wrapping at the top of the space. Adding or removing a
//!   node therefore only moves the chunks that cross the changed region.
//! - **Migration**: a membership change streams each displaced chunk
//!   copy-first, delete-second, so a failure mid-migration can duplicate a
//!   chunk but never lose it.
//! - **Locking**: the ring is the only shared mutable state in the router
//!   process. Admin operations hold the exclusive side of a readers-writer
//!   lock for their full duration, including migration; client lookups take
//!   the shared side and serialize after any in-flight membership change.

pub mod handlers;
pub mod hash;
pub mod protocol;
pub mod ring;
pub mod router;

#[cfg(test)]
mod tests;
