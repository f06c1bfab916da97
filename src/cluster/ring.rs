//! The placement ring.
//!
//! A sorted list of occupied 64-bit positions plus a map from position to the
//! node registered there. Lookup is a binary search with the `>=` probe
//! convention: the successor of a key is the node at the smallest position at
//! or after it, wrapping to the smallest position overall when the key
//! exceeds every occupied one.

use std::collections::HashMap;

use super::hash::ring_position;
use crate::storage::client::StorageClient;

/// One storage node as the ring sees it: its cluster address and the RPC
/// stub created when it was inserted.
#[derive(Clone)]
pub struct NodeHandle {
    pub address: String,
    pub client: StorageClient,
}

impl NodeHandle {
    pub fn connect(address: &str) -> Self {
        Self {
            address: address.to_string(),
            client: StorageClient::connect(address),
        }
    }
}

#[derive(Default)]
pub struct PlacementRing {
    /// Occupied positions, always sorted ascending.
    positions: Vec<u64>,
    nodes: HashMap<u64, NodeHandle>,
}

impl PlacementRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Inserts a node at the hash of its address, returning the position, or
    /// `None` when that position is already occupied. A distinct address
    /// colliding on the 64-bit truncation is rejected the same way as a
    /// duplicate; callers must pick different addresses.
    pub fn insert(&mut self, handle: NodeHandle) -> Option<u64> {
        let position = ring_position(&handle.address);
        match self.positions.binary_search(&position) {
            Ok(_) => None,
            Err(idx) => {
                self.positions.insert(idx, position);
                self.nodes.insert(position, handle);
                Some(position)
            }
        }
    }

    /// Unlinks the node registered at the hash of `address` and returns the
    /// detached handle so the coordinator can drain it. The probe requires an
    /// exact position match: an address hashing past the current maximum is
    /// simply absent, and a probe landing on a different node's position must
    /// not unlink that node.
    pub fn remove(&mut self, address: &str) -> Option<NodeHandle> {
        let position = ring_position(address);
        match self.positions.binary_search(&position) {
            Ok(idx) => {
                self.positions.remove(idx);
                self.nodes.remove(&position)
            }
            Err(_) => None,
        }
    }

    /// The node owning ring key `key`, or `None` on an empty ring.
    pub fn successor(&self, key: u64) -> Option<&NodeHandle> {
        if self.positions.is_empty() {
            return None;
        }
        let mut idx = self.positions.partition_point(|&position| position < key);
        if idx == self.positions.len() {
            idx = 0;
        }
        self.nodes.get(&self.positions[idx])
    }

    /// Successor of the hash of an arbitrary key string.
    pub fn successor_of(&self, key: &str) -> Option<&NodeHandle> {
        self.successor(ring_position(key))
    }

    /// Addresses in ring-position order.
    pub fn addresses(&self) -> Vec<String> {
        self.positions
            .iter()
            .filter_map(|position| self.nodes.get(position))
            .map(|handle| handle.address.clone())
            .collect()
    }

    /// Node handles in ring-position order.
    pub fn handles(&self) -> impl Iterator<Item = &NodeHandle> {
        self.positions
            .iter()
            .filter_map(|position| self.nodes.get(position))
    }
}
