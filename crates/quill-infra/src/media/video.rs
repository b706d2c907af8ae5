//! Video transcoding via an ffmpeg child process.
//!
//! Output is normalized to H.264/MP4 scaled to a fixed 720px height,
//! preserving aspect ratio. The extension allow-list is checked before
//! any transcoding work is started.

use std::path::Path;

use tokio::process::Command;

use super::MediaError;

/// Accepted source container extensions.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["mp4", "mov", "avi", "mkv"];

/// Target output height in pixels; width follows the aspect ratio.
const TARGET_HEIGHT: u32 = 720;

/// Video transcoder configuration.
#[derive(Debug, Clone)]
pub struct VideoTranscoder {
    pub ffmpeg_path: String,
}

impl Default for VideoTranscoder {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
        }
    }
}

impl VideoTranscoder {
    pub fn new(ffmpeg_path: String) -> Self {
        Self { ffmpeg_path }
    }

    /// Reject files whose original name does not carry an allowed
    /// video extension. Runs before any transcoding work.
    pub fn validate_extension(original_name: &str) -> Result<(), MediaError> {
        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext {
            Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
            _ => Err(MediaError::InvalidFormat),
        }
    }

    /// Transcode `input` to H.264/MP4 at `output`.
    pub async fn transcode(&self, input: &Path, output: &Path) -> Result<(), MediaError> {
        tracing::debug!(input = %input.display(), output = %output.display(), "transcoding video");

        let status = Command::new(&self.ffmpeg_path)
            .arg("-y")
            .arg("-loglevel")
            .arg("error")
            .arg("-i")
            .arg(input)
            .arg("-c:v")
            .arg("libx264")
            .arg("-preset")
            .arg("fast")
            .arg("-vf")
            .arg(format!("scale=-2:{TARGET_HEIGHT}"))
            .arg("-f")
            .arg("mp4")
            .arg(output)
            .status()
            .await
            .map_err(|e| MediaError::Transcode(format!("failed to spawn ffmpeg: {e}")))?;

        if !status.success() {
            return Err(MediaError::Transcode(format!(
                "ffmpeg exited with status {status}"
            )));
        }

        Ok(())
    }
}
