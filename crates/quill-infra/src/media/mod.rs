//! Media upload pipeline.
//!
//! A strictly linear flow per upload:
//! Received -> Validated -> Transformed -> Stored(remote) -> LocalCleanup -> Done,
//! with Failed reachable from any stage. No retries, no resumability, no
//! progress reporting; each request runs independently.

mod image;
mod pipeline;
mod store;
mod video;

pub use image::ImageProcessor;
pub use pipeline::{MediaPipeline, TempUpload, UploadKind};
pub use store::{S3ObjectStore, S3StoreConfig};
pub use video::VideoTranscoder;

use quill_core::ports::StorageError;

/// Media pipeline errors.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Invalid video format")]
    InvalidFormat,

    #[error("Image processing failed: {0}")]
    Transform(String),

    #[error("Transcode failed: {0}")]
    Transcode(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
