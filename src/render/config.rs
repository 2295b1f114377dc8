//! Rendering configuration.

use image::imageops::FilterType;

use crate::color::parse_color;
use crate::dimension::{MAX_SIZE, PREVIEW_MIN_EDGE};
use crate::plan::CanvasColor;
use crate::render::RenderError;

/// JPEG export quality (0–100).
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Hard ceiling on `ResizeConfig::max_size`. A square surface at this edge
/// is 1 GiB of RGBA.
pub const MAX_SIZE_LIMIT: u32 = 16_384;

/// Tunables for a [`Session`](crate::render::Session).
///
/// `Default` matches the resizer's fixed behavior: 5000px limit, JPEG quality
/// 95, white letterbox, high-quality smoothing.
///
/// ```
/// use canvasfit::render::ResizeConfig;
///
/// let config = ResizeConfig::default()
///     .max_size(2048)
///     .background_color("#000")
///     .unwrap();
/// assert_eq!(config.max_size, 2048);
/// ```
#[derive(Debug, Clone)]
pub struct ResizeConfig {
    /// Largest width or height a resize may produce. Values above
    /// [`MAX_SIZE_LIMIT`] are treated as the limit.
    pub max_size: u32,
    /// Quality used for JPEG export.
    pub jpeg_quality: u8,
    /// Letterbox color for [`FillMode::Fit`](crate::FillMode::Fit).
    pub background: CanvasColor,
    /// Resampling filter used when drawing.
    pub filter: FilterType,
    /// Decoded images above this many pixels are rejected before full decode.
    pub max_decoded_pixels: u64,
    /// Minimum edge of the original-image preview surface.
    pub preview_min_edge: u32,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            max_size: MAX_SIZE,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            background: CanvasColor::WHITE,
            filter: FilterType::CatmullRom,
            max_decoded_pixels: 100_000_000,
            preview_min_edge: PREVIEW_MIN_EDGE,
        }
    }
}

impl ResizeConfig {
    /// Set the maximum output edge, clamped to `1..=MAX_SIZE_LIMIT`.
    pub fn max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.clamp(1, MAX_SIZE_LIMIT);
        self
    }

    /// Set the JPEG quality, clamped to `1..=100`.
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Set the letterbox color.
    pub fn background(mut self, color: CanvasColor) -> Self {
        self.background = color;
        self
    }

    /// Set the letterbox color from a hex or named color string.
    pub fn background_color(self, color: &str) -> Result<Self, RenderError> {
        let parsed =
            parse_color(color).ok_or_else(|| RenderError::InvalidColor(color.to_string()))?;
        Ok(self.background(parsed))
    }

    /// Set the resampling filter.
    pub fn filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    /// Reject sources whose header reports more than `limit` pixels.
    pub fn max_decoded_pixels(mut self, limit: u64) -> Self {
        self.max_decoded_pixels = limit;
        self
    }

    /// Set the minimum edge of the preview surface.
    pub fn preview_min_edge(mut self, edge: u32) -> Self {
        self.preview_min_edge = edge;
        self
    }
}
