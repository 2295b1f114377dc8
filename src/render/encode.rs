//! Serializing a surface to an image file.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};

use crate::render::RenderError;

/// Base name of exported files.
pub const EXPORT_STEM: &str = "resized-image";

/// Export file format.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Lossless, keeps alpha.
    #[default]
    Png,
    /// Lossy at the configured quality. Alpha is dropped.
    Jpeg,
    /// Lossless WebP, keeps alpha.
    WebP,
}

impl OutputFormat {
    pub const ALL: [Self; 3] = [Self::Png, Self::Jpeg, Self::WebP];

    /// Parse `png`, `jpg`/`jpeg` or `webp`, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// File extension without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
        }
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }

    /// `resized-image.<ext>`.
    pub fn file_name(self) -> String {
        format!("{EXPORT_STEM}.{}", self.extension())
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// An encoded file ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Encode a surface. `jpeg_quality` only affects [`OutputFormat::Jpeg`].
pub fn encode(
    surface: &RgbaImage,
    format: OutputFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, RenderError> {
    let (width, height) = surface.dimensions();
    let mut out = Vec::new();

    let result = match format {
        OutputFormat::Png => PngEncoder::new(&mut out).write_image(
            surface.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
        OutputFormat::Jpeg => {
            // JPEG has no alpha channel; transparent areas come out black.
            let rgb = DynamicImage::ImageRgba8(surface.clone()).into_rgb8();
            JpegEncoder::new_with_quality(&mut out, jpeg_quality).write_image(
                rgb.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
        OutputFormat::WebP => WebPEncoder::new_lossless(&mut out).write_image(
            surface.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
    };
    result.map_err(|source| RenderError::Encode { format, source })?;

    log::info!(
        "encoded {width}x{height} surface as {format}: {} bytes",
        out.len()
    );
    Ok(out)
}

/// Encode a surface and name it for download.
pub fn export(
    surface: &RgbaImage,
    format: OutputFormat,
    jpeg_quality: u8,
) -> Result<Export, RenderError> {
    Ok(Export {
        file_name: format.file_name(),
        mime_type: format.mime_type(),
        bytes: encode(surface, format, jpeg_quality)?,
    })
}
