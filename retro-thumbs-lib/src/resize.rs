//! Target-size arithmetic for thumbnail resizing.

use serde::{Deserialize, Serialize};

use crate::error::ThumbsError;

/// Largest width or height the engine will produce.
pub const MAX_DIMENSION: u32 = 32_768;

/// How one axis of an image should change.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "kebab-case")]
pub enum SizeChange {
    /// Keep the current size
    #[default]
    NoChange,
    /// Set an exact size
    ChangeTo(u32),
    /// Add (or subtract) pixels
    ByPixels(i64),
    /// Percent of the current size (50 = half)
    ByPercent(f64),
    /// Grow to this size, never shrink
    Upscale(u32),
    /// Shrink to this size, never grow
    Downscale(u32),
}

impl SizeChange {
    pub fn is_no_change(&self) -> bool {
        matches!(self, Self::NoChange)
    }

    /// New length of an axis that is currently `current` pixels.
    fn apply(&self, current: u32) -> f64 {
        let current_f = f64::from(current);
        match *self {
            Self::NoChange => current_f,
            Self::ChangeTo(v) => f64::from(v),
            Self::ByPixels(d) => current_f + d as f64,
            Self::ByPercent(p) => current_f * p / 100.0,
            Self::Upscale(v) => f64::from(current.max(v)),
            Self::Downscale(v) => f64::from(current.min(v)),
        }
    }
}

/// Resampling filter used when an image is resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleFilter {
    #[default]
    Nearest,
    Bilinear,
    Bicubic,
}

impl ResampleFilter {
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            Self::Nearest => image::imageops::FilterType::Nearest,
            Self::Bilinear => image::imageops::FilterType::Triangle,
            Self::Bicubic => image::imageops::FilterType::CatmullRom,
        }
    }
}

/// Width and height changes applied to every saved thumbnail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizePolicy {
    pub width: SizeChange,
    pub height: SizeChange,
    pub keep_aspect_ratio: bool,
    pub filter: ResampleFilter,
}

impl Default for SizePolicy {
    fn default() -> Self {
        Self {
            width: SizeChange::NoChange,
            height: SizeChange::NoChange,
            keep_aspect_ratio: true,
            filter: ResampleFilter::Nearest,
        }
    }
}

impl SizePolicy {
    /// Neither axis is configured to change.
    pub fn is_noop(&self) -> bool {
        self.width.is_no_change() && self.height.is_no_change()
    }

    /// Size an image of `width` x `height` should be saved at.
    ///
    /// With `keep_aspect_ratio`, an axis left unchanged follows the other
    /// one proportionally. Results outside `1..=MAX_DIMENSION` are errors.
    pub fn target_size(&self, width: u32, height: u32) -> Result<(u32, u32), ThumbsError> {
        if width == 0 || height == 0 {
            return Err(ThumbsError::invalid_size(format!(
                "source image is {width}x{height}"
            )));
        }
        let mut new_width = self.width.apply(width);
        let mut new_height = self.height.apply(height);
        let (w, h) = (f64::from(width), f64::from(height));

        if self.keep_aspect_ratio {
            if self.width.is_no_change() && !self.height.is_no_change() {
                new_width = w - (h - new_height) * (w / h);
            } else if self.height.is_no_change() && !self.width.is_no_change() {
                new_height = h - (w - new_width) * (h / w);
            }
        }

        Ok((to_dimension(new_width, "width")?, to_dimension(new_height, "height")?))
    }
}

fn to_dimension(value: f64, axis: &str) -> Result<u32, ThumbsError> {
    let rounded = value.round();
    if !rounded.is_finite() || rounded < 1.0 || rounded > f64::from(MAX_DIMENSION) {
        return Err(ThumbsError::invalid_size(format!(
            "{axis} would be {rounded} pixels"
        )));
    }
    Ok(rounded as u32)
}
