//! Typed RPC stub for one storage node.
//!
//! The placement ring creates one `StorageClient` when a node is inserted and
//! drops it when the node is removed; there is no connection pool beyond the
//! client held per node. Dialing is lazy: constructing the stub never touches
//! the network.

use std::time::Duration;

use bytes::Bytes;

use super::protocol::{ENDPOINT_FILES, ErrorResponse, ListFilesResponse};
use crate::content::ContentError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct StorageClient {
    address: String,
    http: reqwest::Client,
}

impl StorageClient {
    pub fn connect(address: &str) -> Self {
        Self {
            address: address.to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    fn file_url(&self, video_id: &str, filename: &str) -> String {
        format!(
            "http://{}{}/{}/{}",
            self.address, ENDPOINT_FILES, video_id, filename
        )
    }

    pub async fn read_file(&self, video_id: &str, filename: &str) -> Result<Bytes, ContentError> {
        let response = self
            .http
            .get(self.file_url(video_id, filename))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|source| self.rpc_error(source))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ContentError::NotFound {
                video_id: video_id.to_string(),
                filename: filename.to_string(),
            });
        }
        let response = self.check_status(response).await?;

        response.bytes().await.map_err(|source| self.rpc_error(source))
    }

    pub async fn write_file(
        &self,
        video_id: &str,
        filename: &str,
        data: Bytes,
    ) -> Result<(), ContentError> {
        let response = self
            .http
            .post(self.file_url(video_id, filename))
            .timeout(REQUEST_TIMEOUT)
            .body(data)
            .send()
            .await
            .map_err(|source| self.rpc_error(source))?;

        self.check_status(response).await?;
        Ok(())
    }

    pub async fn delete_file(&self, video_id: &str, filename: &str) -> Result<(), ContentError> {
        let response = self
            .http
            .delete(self.file_url(video_id, filename))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|source| self.rpc_error(source))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ContentError::NotFound {
                video_id: video_id.to_string(),
                filename: filename.to_string(),
            });
        }
        self.check_status(response).await?;
        Ok(())
    }

    pub async fn list_files(&self) -> Result<Vec<String>, ContentError> {
        let response = self
            .http
            .get(format!("http://{}{}", self.address, ENDPOINT_FILES))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|source| self.rpc_error(source))?;

        let response = self.check_status(response).await?;
        let listing: ListFilesResponse = response
            .json()
            .await
            .map_err(|source| self.rpc_error(source))?;
        Ok(listing.filenames)
    }

    fn rpc_error(&self, source: reqwest::Error) -> ContentError {
        ContentError::Rpc {
            address: self.address.clone(),
            source,
        }
    }

    /// Turns a non-2xx reply into a typed node failure, pulling the error
    /// message out of the JSON body when the node sent one.
    async fn check_status(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ContentError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };
        Err(ContentError::Node {
            address: self.address.clone(),
            status: status.as_u16(),
            message,
        })
    }
}
