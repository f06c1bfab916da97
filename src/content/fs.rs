//! Local-filesystem content backend.
//!
//! Thin adapter over the storage node's `DiskStore`, for running the whole
//! service on a single machine without any storage-node processes.

use async_trait::async_trait;
use bytes::Bytes;

use super::{ContentError, ContentStore};
use crate::storage::disk::{DiskStore, StorageError};

pub struct FsContentStore {
    store: DiskStore,
}

impl FsContentStore {
    /// Opens the backend rooted at `dir`, creating the directory on demand.
    pub async fn open(dir: &std::path::Path) -> Result<Self, ContentError> {
        let store = DiskStore::open(dir).await?;
        Ok(Self { store })
    }
}

impl From<StorageError> for ContentError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { video_id, filename } => {
                ContentError::NotFound { video_id, filename }
            }
            StorageError::InvalidSegment { segment } => ContentError::InvalidPath { segment },
            StorageError::Io(source) => ContentError::Io(source),
        }
    }
}

#[async_trait]
impl ContentStore for FsContentStore {
    async fn read(&self, video_id: &str, filename: &str) -> Result<Bytes, ContentError> {
        let data = self.store.read(video_id, filename).await?;
        Ok(Bytes::from(data))
    }

    async fn write(
        &self,
        video_id: &str,
        filename: &str,
        data: Bytes,
    ) -> Result<(), ContentError> {
        self.store.write(video_id, filename, &data).await?;
        Ok(())
    }
}
