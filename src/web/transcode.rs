//! DASH transcoding via the external `ffmpeg` binary.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tokio::process::Command;

/// Name of the manifest `ffmpeg` produces; every other output file is an
/// init or media segment referenced by it.
pub const MANIFEST_FILENAME: &str = "manifest.mpd";

/// Transcodes `source` into a DASH manifest plus segments inside `out_dir`.
///
/// Single-representation ladder: H.264 at 3000k with AAC audio at 128k,
/// keyframes every 120 frames so the 4-second segments cut cleanly.
pub async fn transcode_to_dash(source: &Path, out_dir: &Path) -> Result<()> {
    let manifest_path = out_dir.join(MANIFEST_FILENAME);

    let output = Command::new("ffmpeg")
        .arg("-i")
        .arg(source)
        .args([
            "-c:v",
            "libx264",
            "-c:a",
            "aac",
            "-bf",
            "1",
            "-keyint_min",
            "120",
            "-g",
            "120",
            "-sc_threshold",
            "0",
            "-b:v",
            "3000k",
            "-b:a",
            "128k",
            "-f",
            "dash",
            "-use_timeline",
            "1",
            "-use_template",
            "1",
            "-init_seg_name",
            "init-$RepresentationID$.m4s",
            "-media_seg_name",
            "chunk-$RepresentationID$-$Number%05d$.m4s",
            "-seg_duration",
            "4",
        ])
        .arg(&manifest_path)
        .output()
        .await
        .context("failed to execute ffmpeg")?;

    if !output.status.success() {
        bail!(
            "ffmpeg exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(())
}
