//! On-disk chunk store.
//!
//! Persists opaque blobs at `<baseDir>/<videoId>/<filename>`. All operations
//! go straight to the filesystem; concurrent writes to the same path resolve
//! to last-writer-wins via the OS.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;

/// Failures surfaced by the disk store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("file {video_id}/{filename} does not exist")]
    NotFound { video_id: String, filename: String },

    #[error("invalid path segment {segment:?}")]
    InvalidSegment { segment: String },

    #[error("storage io failure: {0}")]
    Io(#[from] std::io::Error),
}

pub struct DiskStore {
    base_dir: PathBuf,
}

impl DiskStore {
    /// Opens a store rooted at `base_dir`, creating the directory on demand.
    pub async fn open(base_dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(base_dir).await?;
        Ok(Self {
            base_dir: base_dir.to_path_buf(),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolves the on-disk path of a chunk, refusing any segment that could
    /// escape the base directory.
    fn chunk_path(&self, video_id: &str, filename: &str) -> Result<PathBuf, StorageError> {
        validate_segment(video_id)?;
        validate_segment(filename)?;
        Ok(self.base_dir.join(video_id).join(filename))
    }

    pub async fn read(&self, video_id: &str, filename: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.chunk_path(video_id, filename)?;
        match fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(StorageError::NotFound {
                video_id: video_id.to_string(),
                filename: filename.to_string(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    /// Overwrite semantics: an existing chunk at the same path is replaced.
    pub async fn write(
        &self,
        video_id: &str,
        filename: &str,
        data: &[u8],
    ) -> Result<(), StorageError> {
        let path = self.chunk_path(video_id, filename)?;
        fs::create_dir_all(self.base_dir.join(video_id)).await?;
        fs::write(&path, data).await?;
        Ok(())
    }

    pub async fn delete(&self, video_id: &str, filename: &str) -> Result<(), StorageError> {
        let path = self.chunk_path(video_id, filename)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(StorageError::NotFound {
                video_id: video_id.to_string(),
                filename: filename.to_string(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    /// Enumerates the current on-disk content as `"<videoId>/<filename>"`
    /// entries.
    ///
    /// Walks exactly one level deep: top-level entries that are not
    /// directories are skipped, as are directories nested below a video
    /// directory. Order is whatever the filesystem yields, stable within a
    /// single call.
    pub async fn list(&self) -> Result<Vec<String>, StorageError> {
        let mut filenames = Vec::new();

        let mut top = fs::read_dir(&self.base_dir).await?;
        while let Some(entry) = top.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let video_id = entry.file_name().to_string_lossy().into_owned();

            let mut sub = fs::read_dir(entry.path()).await?;
            while let Some(chunk) = sub.next_entry().await? {
                if chunk.file_type().await?.is_dir() {
                    continue;
                }
                let filename = chunk.file_name().to_string_lossy().into_owned();
                filenames.push(format!("{}/{}", video_id, filename));
            }
        }

        Ok(filenames)
    }
}

/// A chunk path segment must be a single non-empty path component.
fn validate_segment(segment: &str) -> Result<(), StorageError> {
    if segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains('/')
        || segment.contains('\\')
    {
        return Err(StorageError::InvalidSegment {
            segment: segment.to_string(),
        });
    }
    Ok(())
}
