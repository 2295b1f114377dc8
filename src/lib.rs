//! Resize an image onto a fixed-size canvas with stretch, fit, or crop fill.
//!
//! The geometry is pure and `no_std` compatible; the optional `render`
//! feature adds decoding, drawing, and encoding on top of the `image` crate.
//!
//! # Modules
//!
//! - [`dimension`] - Target size resolution, aspect locking, form-edit reducer
//! - [`plan`] - Fill modes and draw rectangles
//! - [`color`] - Background color parsing
//! - [`render`] - Decode, draw, encode, and the resize [`render::Session`] (feature `render`)

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub mod color;
pub mod dimension;
pub mod plan;
#[cfg(feature = "render")]
pub mod render;

pub use color::parse_color;
pub use dimension::{
    MAX_SIZE, PREVIEW_MIN_EDGE, Size, SpecEdit, TargetSpec, parse_dimension, preview_size,
    resolve,
};
pub use plan::{CanvasColor, DrawPlan, FillMode, plan, plan_with_background};
