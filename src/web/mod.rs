//! Browser-Facing Web Module
//!
//! The public HTTP surface of the service: the video catalog and watch pages,
//! the JSON catalog API backing them, DASH chunk delivery, and the MP4 upload
//! endpoint.
//!
//! ## Upload Pipeline
//! An upload is staged to a temporary directory, transcoded into a DASH
//! manifest plus media segments by the external `ffmpeg` binary, and the
//! resulting files are written through the content store one by one. The
//! catalog row is inserted only after the transcode succeeds, so a failed
//! conversion never leaves a browsable but unplayable video.
//!
//! The pages themselves are static shells compiled into the binary; they
//! fetch the catalog over `/api/videos` and play back via dash.js.

pub mod handlers;
pub mod transcode;
pub mod types;

#[cfg(test)]
mod tests;

pub use handlers::{AppState, build_router};
