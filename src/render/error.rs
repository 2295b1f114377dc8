//! Errors from the pixel layer. Geometry never fails.

use std::path::PathBuf;

use crate::render::encode::OutputFormat;

/// Error from decoding, rendering, or encoding an image.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("image is {width}x{height}, limit is {limit} pixels")]
    TooLarge { width: u32, height: u32, limit: u64 },

    #[error("failed to encode {format}: {source}")]
    Encode {
        format: OutputFormat,
        #[source]
        source: image::ImageError,
    },

    #[error("unknown output format {0:?} (expected png, jpg or webp)")]
    UnknownFormat(String),

    #[error("unknown fill mode {0:?} (expected stretch, fit or crop)")]
    UnknownFillMode(String),

    #[error("invalid color {0:?}")]
    InvalidColor(String),
}
