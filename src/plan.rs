//! Draw planning: where a source image lands on the target surface.
//!
//! Pure geometry. The caller paints [`DrawPlan::background`] (if any) over
//! the whole surface and then draws the source scaled into the destination
//! rectangle, letting the surface clip anything outside it.
//!
//! # Example
//!
//! ```
//! use canvasfit::{plan, CanvasColor, FillMode};
//!
//! // 2:1 source letterboxed into a square.
//! let p = plan(400, 200, 100, 100, FillMode::Fit);
//! assert_eq!((p.dest_x, p.dest_y, p.dest_width, p.dest_height), (0.0, 25.0, 100.0, 50.0));
//! assert_eq!(p.background, Some(CanvasColor::WHITE));
//! ```

use crate::dimension::Size;

/// How a source image is mapped onto a target of a possibly different
/// aspect ratio.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FillMode {
    /// Scale to exact target dimensions, distorting aspect ratio.
    #[default]
    Stretch,
    /// Scale to fit inside the target, preserving aspect ratio.
    /// The remainder is filled with the background color.
    Fit,
    /// Scale to cover the target, preserving aspect ratio.
    /// Overflow is cropped symmetrically.
    Crop,
}

impl FillMode {
    /// Every fill mode, in presentation order.
    pub const ALL: [Self; 3] = [Self::Stretch, Self::Fit, Self::Crop];

    /// Parse a mode name (`stretch`, `fit`, `crop`), ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(name))
    }

    /// Stable lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stretch => "stretch",
            Self::Fit => "fit",
            Self::Crop => "crop",
        }
    }
}

impl core::fmt::Display for FillMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An 8-bit sRGB color with alpha.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CanvasColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl CanvasColor {
    /// White, fully opaque.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Black, fully opaque.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Color from its four channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channels in `[r, g, b, a]` order, as stored in an RGBA pixel.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for CanvasColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Destination rectangle and background for one compositing operation.
///
/// Coordinates are in target-surface pixels and may be fractional. In
/// [`FillMode::Crop`] the rectangle extends past the surface edges
/// (negative origin on the overflowing axis).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawPlan {
    pub dest_x: f64,
    pub dest_y: f64,
    pub dest_width: f64,
    pub dest_height: f64,
    /// Color to paint over the whole target before drawing the source.
    pub background: Option<CanvasColor>,
}

impl DrawPlan {
    /// Whether all coordinates are finite numbers.
    ///
    /// A zero source or target height yields a non-finite plan.
    pub fn is_finite(&self) -> bool {
        self.dest_x.is_finite()
            && self.dest_y.is_finite()
            && self.dest_width.is_finite()
            && self.dest_height.is_finite()
    }

    /// Whether the destination rectangle lies inside `target`.
    pub fn fits_within(&self, target: Size) -> bool {
        const EPS: f64 = 1e-9;
        self.dest_x >= -EPS
            && self.dest_y >= -EPS
            && self.dest_x + self.dest_width <= target.width as f64 + EPS
            && self.dest_y + self.dest_height <= target.height as f64 + EPS
    }

    /// Whether the destination rectangle covers all of `target`.
    pub fn covers(&self, target: Size) -> bool {
        const EPS: f64 = 1e-9;
        self.dest_x <= EPS
            && self.dest_y <= EPS
            && self.dest_x + self.dest_width >= target.width as f64 - EPS
            && self.dest_y + self.dest_height >= target.height as f64 - EPS
    }
}

/// Compute the draw plan for a source image on a target surface.
///
/// Fit mode pads with opaque white. Use [`plan_with_background`] to choose
/// another color.
///
/// Heights must be non-zero; a zero height produces a non-finite plan
/// (see [`DrawPlan::is_finite`]).
pub fn plan(
    source_w: u32,
    source_h: u32,
    target_w: u32,
    target_h: u32,
    mode: FillMode,
) -> DrawPlan {
    plan_with_background(source_w, source_h, target_w, target_h, mode, CanvasColor::WHITE)
}

/// [`plan`] with an explicit Fit-mode background color.
pub fn plan_with_background(
    source_w: u32,
    source_h: u32,
    target_w: u32,
    target_h: u32,
    mode: FillMode,
    background: CanvasColor,
) -> DrawPlan {
    let tw = target_w as f64;
    let th = target_h as f64;
    let img_aspect = source_w as f64 / source_h as f64;
    let target_aspect = tw / th;

    match mode {
        FillMode::Stretch => stretch(tw, th),
        FillMode::Fit => fit(tw, th, img_aspect, target_aspect, background),
        FillMode::Crop => crop(tw, th, img_aspect, target_aspect),
    }
}

fn stretch(tw: f64, th: f64) -> DrawPlan {
    DrawPlan {
        dest_x: 0.0,
        dest_y: 0.0,
        dest_width: tw,
        dest_height: th,
        background: None,
    }
}

fn fit(tw: f64, th: f64, img_aspect: f64, target_aspect: f64, background: CanvasColor) -> DrawPlan {
    let (dest_width, dest_height) = if img_aspect > target_aspect {
        // Wider than target: width-limited, letterbox top and bottom.
        (tw, tw / img_aspect)
    } else {
        (th * img_aspect, th)
    };
    DrawPlan {
        dest_x: (tw - dest_width) / 2.0,
        dest_y: (th - dest_height) / 2.0,
        dest_width,
        dest_height,
        background: Some(background),
    }
}

fn crop(tw: f64, th: f64, img_aspect: f64, target_aspect: f64) -> DrawPlan {
    if img_aspect > target_aspect {
        // Wider than target: height-limited, overflow left and right.
        let dest_width = th * img_aspect;
        DrawPlan {
            dest_x: (tw - dest_width) / 2.0,
            dest_y: 0.0,
            dest_width,
            dest_height: th,
            background: None,
        }
    } else {
        let dest_height = tw / img_aspect;
        DrawPlan {
            dest_x: 0.0,
            dest_y: (th - dest_height) / 2.0,
            dest_width: tw,
            dest_height,
            background: None,
        }
    }
}
