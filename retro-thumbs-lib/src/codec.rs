//! Image decoding, resizing, and PNG encoding.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::DynamicImage;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};

use crate::config::SaveParams;
use crate::error::ThumbsError;
use crate::resize::ResampleFilter;

/// A decoded image held by a codec.
#[derive(Debug, Clone)]
pub struct ImageHandle {
    image: DynamicImage,
}

impl ImageHandle {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn as_image(&self) -> &DynamicImage {
        &self.image
    }
}

/// Reads source images and writes RetroArch thumbnails.
///
/// When no codec is available, only PNG sources can be used and they are
/// copied byte for byte.
pub trait ImageCodec {
    fn decode(&self, path: &Path) -> Result<ImageHandle, ThumbsError>;

    fn resize(
        &self,
        image: &ImageHandle,
        width: u32,
        height: u32,
        filter: ResampleFilter,
    ) -> Result<ImageHandle, ThumbsError>;

    /// Write `image` to `path` as PNG.
    fn encode(&self, image: &ImageHandle, path: &Path, params: &SaveParams)
    -> Result<(), ThumbsError>;
}

/// [`ImageCodec`] built on the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec;

impl ImageCodec for PngCodec {
    fn decode(&self, path: &Path) -> Result<ImageHandle, ThumbsError> {
        // LaunchBox sometimes stores JPEG data under a .png name.
        let image = image::ImageReader::open(path)
            .map_err(|e| ThumbsError::file(path, e))?
            .with_guessed_format()
            .map_err(|e| ThumbsError::file(path, e))?
            .decode()?;
        Ok(ImageHandle::new(image))
    }

    fn resize(
        &self,
        image: &ImageHandle,
        width: u32,
        height: u32,
        filter: ResampleFilter,
    ) -> Result<ImageHandle, ThumbsError> {
        if width == 0 || height == 0 {
            return Err(ThumbsError::invalid_size(format!("{width}x{height}")));
        }
        Ok(ImageHandle::new(image.image.resize_exact(
            width,
            height,
            filter.to_image_filter(),
        )))
    }

    fn encode(
        &self,
        image: &ImageHandle,
        path: &Path,
        params: &SaveParams,
    ) -> Result<(), ThumbsError> {
        let file = File::create(path).map_err(|e| ThumbsError::file(path, e))?;
        let writer = BufWriter::new(file);
        let (compression, filter) = png_settings(params);
        let encoder = PngEncoder::new_with_quality(writer, compression, filter);
        image.image.write_with_encoder(encoder)?;
        Ok(())
    }
}

/// Map save parameters onto the encoder's compression presets.
pub fn png_settings(params: &SaveParams) -> (CompressionType, PngFilter) {
    if params.optimize {
        return (CompressionType::Best, PngFilter::Adaptive);
    }
    let compression = match params.level() {
        1..=3 => CompressionType::Fast,
        4..=6 => CompressionType::Default,
        _ => CompressionType::Best,
    };
    (compression, PngFilter::Adaptive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn sample(width: u32, height: u32) -> ImageHandle {
        ImageHandle::new(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            Rgb([200, 10, 10]),
        )))
    }

    #[test]
    fn test_png_round_trip_with_resize() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out.png");
        let codec = PngCodec;

        let resized = codec
            .resize(&sample(40, 20), 20, 10, ResampleFilter::Bicubic)
            .unwrap();
        codec.encode(&resized, &out, &SaveParams::default()).unwrap();

        let decoded = codec.decode(&out).unwrap();
        assert_eq!(decoded.dimensions(), (20, 10));
    }

    #[test]
    fn test_jpeg_source_decodes() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("cover.jpg");
        sample(8, 8).as_image().save(&src).unwrap();
        let decoded = PngCodec.decode(&src).unwrap();
        assert_eq!(decoded.dimensions(), (8, 8));
    }

    #[test]
    fn test_garbage_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("broken.png");
        std::fs::write(&src, b"not an image").unwrap();
        assert!(PngCodec.decode(&src).is_err());
    }

    #[test]
    fn test_compression_presets() {
        let level = |n| SaveParams {
            optimize: false,
            compression_level: n,
        };
        assert!(matches!(png_settings(&level(1)).0, CompressionType::Fast));
        assert!(matches!(png_settings(&level(6)).0, CompressionType::Default));
        assert!(matches!(png_settings(&level(42)).0, CompressionType::Best));
        let optimized = SaveParams {
            optimize: true,
            compression_level: 1,
        };
        assert!(matches!(png_settings(&optimized).0, CompressionType::Best));
    }
}
