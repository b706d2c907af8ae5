//! Image transformation: downscale and re-encode at fixed quality.
//!
//! CPU-intensive work runs on `spawn_blocking` so the async runtime is
//! never blocked by decode/encode.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{GenericImageView, ImageOutputFormat};

use super::MediaError;

/// Image processor configuration: maximum output width and JPEG quality.
#[derive(Debug, Clone)]
pub struct ImageProcessor {
    pub max_width: u32,
    pub quality: u8,
}

impl Default for ImageProcessor {
    fn default() -> Self {
        Self {
            max_width: 800,
            quality: 80,
        }
    }
}

impl ImageProcessor {
    /// Transform the image at `input` into a JPEG at `output`,
    /// downscaling to `max_width` while preserving aspect ratio.
    /// Images already narrower than the limit are re-encoded as-is,
    /// never upscaled.
    pub fn process(&self, input: &Path, output: &Path) -> Result<(), MediaError> {
        let img = image::open(input).map_err(|e| MediaError::Transform(e.to_string()))?;

        let (width, height) = img.dimensions();
        let img = if width > self.max_width {
            let new_height =
                ((height as u64 * self.max_width as u64) / width as u64).max(1) as u32;
            tracing::debug!(width, height, new_width = self.max_width, new_height, "resizing image");
            img.resize_exact(self.max_width, new_height, FilterType::Triangle)
        } else {
            img
        };

        let file = File::create(output)?;
        let mut writer = BufWriter::new(file);
        img.write_to(&mut writer, ImageOutputFormat::Jpeg(self.quality))
            .map_err(|e| MediaError::Transform(e.to_string()))?;

        Ok(())
    }

    /// Run [`process`](Self::process) on the blocking thread pool.
    pub async fn process_async(&self, input: &Path, output: &Path) -> Result<(), MediaError> {
        let processor = self.clone();
        let input: PathBuf = input.to_path_buf();
        let output: PathBuf = output.to_path_buf();

        tokio::task::spawn_blocking(move || processor.process(&input, &output))
            .await
            .map_err(|e| MediaError::Transform(format!("worker panicked: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;

    fn temp_path(ext: &str) -> PathBuf {
        std::env::temp_dir().join(format!("quill-img-{}.{ext}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn downscales_wide_images_to_max_width() {
        let input = temp_path("png");
        let output = temp_path("jpg");
        DynamicImage::new_rgb8(1600, 900).save(&input).unwrap();

        ImageProcessor::default()
            .process_async(&input, &output)
            .await
            .unwrap();

        let result = image::open(&output).unwrap();
        assert_eq!(result.dimensions(), (800, 450));

        std::fs::remove_file(&input).unwrap();
        std::fs::remove_file(&output).unwrap();
    }

    #[tokio::test]
    async fn never_upscales_small_images() {
        let input = temp_path("png");
        let output = temp_path("jpg");
        DynamicImage::new_rgb8(320, 240).save(&input).unwrap();

        ImageProcessor::default()
            .process_async(&input, &output)
            .await
            .unwrap();

        let result = image::open(&output).unwrap();
        assert_eq!(result.dimensions(), (320, 240));

        std::fs::remove_file(&input).unwrap();
        std::fs::remove_file(&output).unwrap();
    }

    #[tokio::test]
    async fn undecodable_input_fails_with_transform_error() {
        let input = temp_path("png");
        let output = temp_path("jpg");
        std::fs::write(&input, b"not an image").unwrap();

        let err = ImageProcessor::default()
            .process_async(&input, &output)
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::Transform(_)));

        std::fs::remove_file(&input).unwrap();
    }
}
