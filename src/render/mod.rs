//! Pixel layer: decode, draw, encode.
//!
//! Built on the `image` crate and enabled by the `render` feature. The
//! geometry in [`crate::dimension`] and [`crate::plan`] decides everything;
//! this module only executes it.
//!
//! # Example
//!
//! ```
//! use canvasfit::render::{ImageSource, OutputFormat, draw, encode};
//! use canvasfit::{plan, FillMode, Size};
//! use image::{DynamicImage, Rgba, RgbaImage};
//!
//! let source = ImageSource::from_image(DynamicImage::ImageRgba8(
//!     RgbaImage::from_pixel(400, 200, Rgba([0, 0, 255, 255])),
//! ))
//! .unwrap();
//!
//! let target = Size::new(100, 100);
//! let p = plan(400, 200, target.width, target.height, FillMode::Crop);
//! let surface = draw(&source, &p, target, image::imageops::FilterType::CatmullRom);
//! let png = encode(&surface, OutputFormat::Png, 95).unwrap();
//!
//! let back = image::load_from_memory(&png).unwrap();
//! assert_eq!((back.width(), back.height()), (100, 100));
//! ```

mod config;
mod encode;
mod error;
mod session;
mod source;
mod surface;

pub use config::{DEFAULT_JPEG_QUALITY, MAX_SIZE_LIMIT, ResizeConfig};
pub use encode::{EXPORT_STEM, Export, OutputFormat, encode, export};
pub use error::RenderError;
pub use session::{LoadState, Session};
pub use source::ImageSource;
pub use surface::{draw, draw_preview};
