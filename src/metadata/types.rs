use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp layout used both in the database and on the catalog pages.
pub const TIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub id: String,
    pub uploaded_at: DateTime<Utc>,
}
