use serde::{Deserialize, Serialize};

/// One catalog entry as shown on the index page. The timestamp is already
/// formatted for display.
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoSummary {
    pub id: String,
    pub uploaded_at: String,
}

/// Response for the catalog listing API.
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoListResponse {
    pub videos: Vec<VideoSummary>,
}
