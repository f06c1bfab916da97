#[cfg(test)]
mod tests {
    use crate::metadata::SqliteMetadataStore;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    async fn open_store(dir: &tempfile::TempDir) -> SqliteMetadataStore {
        SqliteMetadataStore::connect(&dir.path().join("videos.db"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_then_read_roundtrip() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;

        let uploaded_at = Utc.with_ymd_and_hms(2024, 5, 17, 12, 30, 45).unwrap();
        store.create("cats", uploaded_at).await.unwrap();

        let metadata = store.read("cats").await.unwrap().unwrap();
        assert_eq!(metadata.id, "cats");
        // The layout has second precision, so the roundtrip is exact.
        assert_eq!(metadata.uploaded_at, uploaded_at);
    }

    #[tokio::test]
    async fn test_read_unknown_id_is_none() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;

        assert!(store.read("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;

        let uploaded_at = Utc.with_ymd_and_hms(2024, 5, 17, 12, 0, 0).unwrap();
        store.create("cats", uploaded_at).await.unwrap();
        assert!(store.create("cats", uploaded_at).await.is_err());
    }

    #[tokio::test]
    async fn test_list_orders_by_upload_time() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;

        let early = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        store.create("newer", late).await.unwrap();
        store.create("older", early).await.unwrap();

        let ids: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["older", "newer"]);
    }

    #[tokio::test]
    async fn test_store_persists_across_reconnect() {
        let dir = tempdir().unwrap();
        let uploaded_at = Utc.with_ymd_and_hms(2024, 5, 17, 12, 0, 0).unwrap();

        {
            let store = open_store(&dir).await;
            store.create("cats", uploaded_at).await.unwrap();
        }

        let store = open_store(&dir).await;
        assert!(store.read("cats").await.unwrap().is_some());
    }
}
