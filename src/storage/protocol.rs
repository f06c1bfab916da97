//! Storage Node Wire Protocol
//!
//! Defines the HTTP surface of a storage node and the DTOs exchanged with the
//! router. Chunk payloads travel as raw request/response bodies; only listings
//! and errors are JSON.
//!
//! | Operation  | Route                                    | Body            |
//! |------------|------------------------------------------|-----------------|
//! | ReadFile   | `GET    /files/:video_id/:filename`      | bytes out       |
//! | WriteFile  | `POST   /files/:video_id/:filename`      | bytes in        |
//! | DeleteFile | `DELETE /files/:video_id/:filename`      | —               |
//! | ListFiles  | `GET    /files`                          | JSON out        |

use serde::{Deserialize, Serialize};

/// Listing endpoint; the per-chunk routes live one path level below it.
pub const ENDPOINT_FILES: &str = "/files";

/// Response for ListFiles. Each entry is exactly `"<videoId>/<filename>"`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListFilesResponse {
    pub filenames: Vec<String>,
}

/// Error payload returned alongside any non-2xx status.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
