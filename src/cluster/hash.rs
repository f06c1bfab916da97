//! Ring key hashing.
//!
//! Node addresses and chunk keys share one hash function so both land on the
//! same 64-bit key space: the first 8 bytes of SHA-256, big-endian.

use sha2::{Digest, Sha256};

/// Maps an arbitrary string to its position on the ring.
pub fn ring_position(s: &str) -> u64 {
    let digest = Sha256::digest(s.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

/// The ring key of a chunk. The separator is exactly the ASCII slash;
/// `video_id` must not itself contain one.
pub fn chunk_key(video_id: &str, filename: &str) -> String {
    format!("{}/{}", video_id, filename)
}
