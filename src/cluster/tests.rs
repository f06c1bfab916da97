#[cfg(test)]
mod tests {
    use crate::cluster::hash::{chunk_key, ring_position};
    use crate::cluster::ring::{NodeHandle, PlacementRing};
    use crate::cluster::router::ContentRouter;
    use crate::content::{ContentError, ContentStore};

    // Pinned vectors: big-endian first 8 bytes of SHA-256, computed once in a
    // reference implementation.
    const HASH_NODE_8090: u64 = 12570443636947007870;
    const HASH_CHUNK_XYZ: u64 = 11873439501460154495;
    const HASH_NODE_9001: u64 = 8757126733552209387;
    const HASH_NODE_9002: u64 = 18074268052325974960;
    const HASH_NODE_9003: u64 = 9099810533193874500;

    // ============================================================
    // HASH FUNCTION
    // ============================================================

    #[test]
    fn test_ring_position_matches_pinned_vectors() {
        assert_eq!(ring_position("127.0.0.1:8090"), HASH_NODE_8090);
        assert_eq!(ring_position("video-xyz/manifest.mpd"), HASH_CHUNK_XYZ);
        assert_eq!(ring_position("127.0.0.1:9001"), HASH_NODE_9001);
        assert_eq!(ring_position("127.0.0.1:9002"), HASH_NODE_9002);
    }

    #[test]
    fn test_chunk_key_joins_with_slash() {
        assert_eq!(chunk_key("video-xyz", "manifest.mpd"), "video-xyz/manifest.mpd");
        assert_eq!(
            ring_position(&chunk_key("video-xyz", "manifest.mpd")),
            HASH_CHUNK_XYZ
        );
    }

    // ============================================================
    // RING: SUCCESSOR LAW
    // ============================================================

    fn three_node_ring() -> PlacementRing {
        // Positions sort as 9001 < 9003 < 9002.
        let mut ring = PlacementRing::new();
        for address in ["127.0.0.1:9001", "127.0.0.1:9002", "127.0.0.1:9003"] {
            assert!(ring.insert(NodeHandle::connect(address)).is_some());
        }
        assert!(HASH_NODE_9001 < HASH_NODE_9003 && HASH_NODE_9003 < HASH_NODE_9002);
        ring
    }

    fn successor_address(ring: &PlacementRing, key: u64) -> Option<String> {
        ring.successor(key).map(|handle| handle.address.clone())
    }

    #[test]
    fn test_successor_picks_smallest_position_at_or_after_key() {
        let ring = three_node_ring();

        assert_eq!(
            successor_address(&ring, 0).as_deref(),
            Some("127.0.0.1:9001")
        );
        assert_eq!(
            successor_address(&ring, HASH_NODE_9001 + 1).as_deref(),
            Some("127.0.0.1:9003")
        );
        assert_eq!(
            successor_address(&ring, HASH_NODE_9003 + 1).as_deref(),
            Some("127.0.0.1:9002")
        );
    }

    #[test]
    fn test_successor_probe_is_inclusive() {
        // A key landing exactly on a position belongs to that node.
        let ring = three_node_ring();
        assert_eq!(
            successor_address(&ring, HASH_NODE_9003).as_deref(),
            Some("127.0.0.1:9003")
        );
    }

    #[test]
    fn test_successor_wraps_past_the_maximum_position() {
        let ring = three_node_ring();
        assert_eq!(
            successor_address(&ring, HASH_NODE_9002 + 1).as_deref(),
            Some("127.0.0.1:9001")
        );
        assert_eq!(
            successor_address(&ring, u64::MAX).as_deref(),
            Some("127.0.0.1:9001")
        );
    }

    #[test]
    fn test_successor_on_empty_ring_is_none() {
        let ring = PlacementRing::new();
        assert!(ring.successor(42).is_none());
        assert!(ring.successor_of("video-xyz/manifest.mpd").is_none());
    }

    // ============================================================
    // RING: MEMBERSHIP
    // ============================================================

    #[test]
    fn test_insert_rejects_duplicate_address() {
        let mut ring = PlacementRing::new();
        assert!(ring.insert(NodeHandle::connect("127.0.0.1:9001")).is_some());
        assert!(ring.insert(NodeHandle::connect("127.0.0.1:9001")).is_none());
        assert_eq!(ring.len(), 1);
    }

    #[test]
    fn test_remove_returns_the_detached_handle() {
        let mut ring = three_node_ring();
        let detached = ring.remove("127.0.0.1:9003").unwrap();
        assert_eq!(detached.address, "127.0.0.1:9003");
        assert_eq!(ring.len(), 2);
        assert_eq!(
            successor_address(&ring, HASH_NODE_9001 + 1).as_deref(),
            Some("127.0.0.1:9002")
        );
    }

    #[test]
    fn test_remove_absent_address_leaves_ring_unchanged() {
        // 127.0.0.1:8090 hashes between 9003 and 9002, so a sloppy probe
        // would land on 9002's position. The exact-match check must refuse
        // to unlink it.
        let mut ring = three_node_ring();
        assert!(HASH_NODE_9003 < HASH_NODE_8090 && HASH_NODE_8090 < HASH_NODE_9002);

        assert!(ring.remove("127.0.0.1:8090").is_none());
        assert_eq!(ring.len(), 3);
        assert!(ring.remove("127.0.0.1:9999").is_none());
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn test_addresses_are_in_ring_position_order() {
        let ring = three_node_ring();
        assert_eq!(
            ring.addresses(),
            vec!["127.0.0.1:9001", "127.0.0.1:9003", "127.0.0.1:9002"]
        );
    }

    // ============================================================
    // ROUTER
    // ============================================================

    #[tokio::test]
    async fn test_read_on_empty_ring_fails_with_no_node() {
        let router = ContentRouter::new(&[]);
        let err = router.read("cats", "manifest.mpd").await.unwrap_err();
        assert!(matches!(err, ContentError::NoNode));
    }

    #[tokio::test]
    async fn test_write_on_empty_ring_fails_with_no_node() {
        let router = ContentRouter::new(&[]);
        let err = router
            .write("cats", "manifest.mpd", bytes::Bytes::from_static(b"HELLO"))
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::NoNode));
    }

    #[tokio::test]
    async fn test_initial_addresses_are_inserted_without_rebalance() {
        let router = ContentRouter::new(&[
            "127.0.0.1:9001".to_string(),
            "127.0.0.1:9002".to_string(),
            "127.0.0.1:9001".to_string(),
        ]);
        // Duplicate collapses; order follows ring positions.
        assert_eq!(
            router.list_nodes().await,
            vec!["127.0.0.1:9001", "127.0.0.1:9002"]
        );
    }

    #[tokio::test]
    async fn test_add_node_on_present_address_is_a_no_op() {
        let router = ContentRouter::new(&["127.0.0.1:9001".to_string()]);
        // Short-circuits before any RPC, so no storage node needs to exist.
        let migrated = router.add_node("127.0.0.1:9001").await.unwrap();
        assert_eq!(migrated, 0);
        assert_eq!(router.list_nodes().await, vec!["127.0.0.1:9001"]);
    }

    #[tokio::test]
    async fn test_remove_node_on_absent_address_is_a_no_op() {
        let router = ContentRouter::new(&["127.0.0.1:9001".to_string()]);
        let migrated = router.remove_node("127.0.0.1:9999").await.unwrap();
        assert_eq!(migrated, 0);
        assert_eq!(router.list_nodes().await, vec!["127.0.0.1:9001"]);
    }
}
