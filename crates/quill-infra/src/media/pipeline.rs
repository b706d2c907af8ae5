//! The upload pipeline orchestrator.
//!
//! Each upload is validated, transformed, pushed to the remote store,
//! and its local temp artifacts removed. Cleanup runs on every exit
//! path, success or failure, so a failed transform or upload never
//! leaks files in the temp area.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use quill_core::ports::ObjectStore;

use super::image::ImageProcessor;
use super::video::VideoTranscoder;
use super::MediaError;

/// Target role of an uploaded file, deciding the transformation and the
/// remote folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Image,
    Avatar,
    Cover,
    Video,
}

impl UploadKind {
    /// Parse the path segment of `POST /api/upload/{segment}`.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "image" => Some(Self::Image),
            "avatar" => Some(Self::Avatar),
            "cover" => Some(Self::Cover),
            "video" => Some(Self::Video),
            _ => None,
        }
    }

    /// Logical folder in the remote store.
    pub fn folder(&self) -> &'static str {
        match self {
            Self::Image => "blog-images",
            Self::Avatar => "avatars",
            Self::Cover => "cover-images",
            Self::Video => "blog-videos",
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, Self::Video)
    }

    fn output_extension(&self) -> &'static str {
        if self.is_video() { "mp4" } else { "jpg" }
    }

    fn content_type(&self) -> &'static str {
        if self.is_video() {
            "video/mp4"
        } else {
            "image/jpeg"
        }
    }
}

/// An uploaded file spooled to the local temp area.
#[derive(Debug, Clone)]
pub struct TempUpload {
    /// Per-request temp path (uuid filename, no extension).
    pub path: PathBuf,
    /// Filename as sent by the client; source of the video extension check.
    pub original_name: String,
}

/// The media pipeline: transform, store remotely, clean up locally.
pub struct MediaPipeline {
    store: Arc<dyn ObjectStore>,
    images: ImageProcessor,
    videos: VideoTranscoder,
}

impl MediaPipeline {
    pub fn new(store: Arc<dyn ObjectStore>, images: ImageProcessor, videos: VideoTranscoder) -> Self {
        Self {
            store,
            images,
            videos,
        }
    }

    /// Run the pipeline for one upload and return the public URL of the
    /// stored artifact.
    pub async fn process(&self, upload: &TempUpload, kind: UploadKind) -> Result<String, MediaError> {
        let transformed = transformed_path(&upload.path, kind);
        let result = self.run(upload, &transformed, kind).await;

        // LocalCleanup: unconditional, success or failure. The
        // transformed file may not exist if an earlier stage failed.
        remove_quietly(&upload.path).await;
        remove_quietly(&transformed).await;

        match &result {
            Ok(url) => tracing::info!(kind = ?kind, url, "upload pipeline done"),
            Err(e) => tracing::warn!(kind = ?kind, error = %e, "upload pipeline failed"),
        }
        result
    }

    async fn run(
        &self,
        upload: &TempUpload,
        transformed: &Path,
        kind: UploadKind,
    ) -> Result<String, MediaError> {
        if kind.is_video() {
            VideoTranscoder::validate_extension(&upload.original_name)?;
            self.videos.transcode(&upload.path, transformed).await?;
        } else {
            self.images.process_async(&upload.path, transformed).await?;
        }

        let file_name = transformed
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| MediaError::Transform("transformed path has no filename".into()))?;
        let key = format!("{}/{}", kind.folder(), file_name);

        let url = self
            .store
            .put_file(transformed, &key, kind.content_type())
            .await?;
        Ok(url)
    }
}

fn transformed_path(input: &Path, kind: UploadKind) -> PathBuf {
    let mut os = input.as_os_str().to_owned();
    os.push(".");
    os.push(kind.output_extension());
    PathBuf::from(os)
}

async fn remove_quietly(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "temp file cleanup failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use image::DynamicImage;
    use quill_core::ports::StorageError;
    use std::sync::Mutex;

    /// Records uploads and returns predictable URLs.
    struct StubStore {
        keys: Mutex<Vec<String>>,
        fail: bool,
    }

    impl StubStore {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                keys: Mutex::new(Vec::new()),
                fail,
            })
        }
    }

    #[async_trait]
    impl ObjectStore for StubStore {
        async fn put_file(
            &self,
            _local_path: &Path,
            key: &str,
            _content_type: &str,
        ) -> Result<String, StorageError> {
            if self.fail {
                return Err(StorageError::Upload("remote unavailable".into()));
            }
            self.keys.lock().unwrap().push(key.to_string());
            Ok(format!("https://cdn.example.com/{key}"))
        }
    }

    fn pipeline(store: Arc<StubStore>) -> MediaPipeline {
        // A bogus ffmpeg path: any test reaching the transcode stage
        // unexpectedly fails loudly instead of invoking a real binary.
        MediaPipeline::new(
            store,
            ImageProcessor::default(),
            VideoTranscoder::new("/nonexistent/ffmpeg".into()),
        )
    }

    fn spool_image() -> TempUpload {
        let path = std::env::temp_dir().join(format!("quill-up-{}", uuid::Uuid::new_v4()));
        DynamicImage::new_rgb8(1024, 768).save_with_format(&path, image::ImageFormat::Png).unwrap();
        TempUpload {
            path,
            original_name: "photo.png".to_string(),
        }
    }

    #[tokio::test]
    async fn image_upload_lands_in_role_folder_and_cleans_temp() {
        let store = StubStore::new(false);
        let upload = spool_image();

        let url = pipeline(store.clone())
            .process(&upload, UploadKind::Avatar)
            .await
            .unwrap();

        assert!(url.starts_with("https://cdn.example.com/avatars/"));
        assert!(url.ends_with(".jpg"));
        let keys = store.keys.lock().unwrap();
        assert_eq!(keys.len(), 1);
        assert!(keys[0].starts_with("avatars/"));
        drop(keys);

        assert!(!upload.path.exists());
        assert!(!transformed_path(&upload.path, UploadKind::Avatar).exists());
    }

    #[tokio::test]
    async fn bad_video_extension_is_rejected_before_transcode() {
        let store = StubStore::new(false);
        let path = std::env::temp_dir().join(format!("quill-up-{}", uuid::Uuid::new_v4()));
        std::fs::write(&path, b"pretend video").unwrap();
        let upload = TempUpload {
            path,
            original_name: "notes.txt".to_string(),
        };

        let err = pipeline(store.clone())
            .process(&upload, UploadKind::Video)
            .await
            .unwrap_err();

        // InvalidFormat proves validation ran; a Transcode error would
        // mean ffmpeg was spawned.
        assert!(matches!(err, MediaError::InvalidFormat));
        assert!(store.keys.lock().unwrap().is_empty());
        assert!(!upload.path.exists());
    }

    #[tokio::test]
    async fn failed_upload_still_cleans_temp_files() {
        let store = StubStore::new(true);
        let upload = spool_image();

        let err = pipeline(store)
            .process(&upload, UploadKind::Image)
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::Storage(_)));
        assert!(!upload.path.exists());
        assert!(!transformed_path(&upload.path, UploadKind::Image).exists());
    }

    #[tokio::test]
    async fn failed_transform_still_cleans_original() {
        let store = StubStore::new(false);
        let path = std::env::temp_dir().join(format!("quill-up-{}", uuid::Uuid::new_v4()));
        std::fs::write(&path, b"not an image").unwrap();
        let upload = TempUpload {
            path,
            original_name: "broken.png".to_string(),
        };

        let err = pipeline(store)
            .process(&upload, UploadKind::Image)
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::Transform(_)));
        assert!(!upload.path.exists());
    }

    #[test]
    fn segment_parsing_and_folders() {
        assert_eq!(UploadKind::from_segment("image"), Some(UploadKind::Image));
        assert_eq!(UploadKind::from_segment("avatar"), Some(UploadKind::Avatar));
        assert_eq!(UploadKind::from_segment("cover"), Some(UploadKind::Cover));
        assert_eq!(UploadKind::from_segment("video"), Some(UploadKind::Video));
        assert_eq!(UploadKind::from_segment("audio"), None);
        assert_eq!(UploadKind::Cover.folder(), "cover-images");
    }
}
