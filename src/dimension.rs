//! Target dimension resolution.
//!
//! Turns the user's requested width/height (either may be blank) into the
//! integer surface size to render at. Locking the aspect ratio fills in a
//! blank axis from the source image; explicit values are never overridden.
//!
//! # Example
//!
//! ```
//! use canvasfit::{Size, TargetSpec, SpecEdit, MAX_SIZE};
//!
//! let spec = TargetSpec::default()
//!     .apply(SpecEdit::SourceLoaded(Size::new(1600, 900)))
//!     .apply(SpecEdit::LockAspect(true))
//!     .apply(SpecEdit::Width(Some(800)));
//!
//! // Height was blanked by the locked edit and is derived at resolve time.
//! assert_eq!(spec.height, None);
//! assert_eq!(spec.resolve(Some(1600.0 / 900.0), MAX_SIZE), Size::new(800, 450));
//! ```

use num_traits::Float;

/// Largest width or height a surface may be resized to.
pub const MAX_SIZE: u32 = 5000;

/// Minimum edge of the original-image preview surface.
pub const PREVIEW_MIN_EDGE: u32 = 200;

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either axis is zero. Nothing is rendered at an empty size.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width divided by height. Non-finite for a zero height.
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Total pixel count.
    pub const fn pixels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Requested output dimensions as entered by the user.
///
/// `None` on an axis means the field is blank and should be derived from the
/// other axis when the aspect ratio is locked.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TargetSpec {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub lock_aspect: bool,
}

/// A single user edit to a [`TargetSpec`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpecEdit {
    /// The width field changed. `None` clears it.
    Width(Option<u32>),
    /// The height field changed. `None` clears it.
    Height(Option<u32>),
    /// The lock-aspect checkbox changed.
    LockAspect(bool),
    /// A new source image finished loading; both fields take its size.
    SourceLoaded(Size),
    /// A resize was rendered at this size; both fields show it.
    Resolved(Size),
}

impl TargetSpec {
    /// Create a spec with both axes set.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            lock_aspect: false,
        }
    }

    /// Apply one edit and return the new spec.
    ///
    /// While locked, setting one axis blanks the other so that it is derived
    /// from the source aspect ratio when the spec is resolved. Derivation
    /// itself only happens in [`resolve`].
    #[must_use]
    pub fn apply(self, edit: SpecEdit) -> Self {
        match edit {
            SpecEdit::Width(width) => Self {
                width,
                height: if self.lock_aspect && width.is_some() {
                    None
                } else {
                    self.height
                },
                ..self
            },
            SpecEdit::Height(height) => Self {
                height,
                width: if self.lock_aspect && height.is_some() {
                    None
                } else {
                    self.width
                },
                ..self
            },
            SpecEdit::LockAspect(lock_aspect) => Self {
                lock_aspect,
                ..self
            },
            SpecEdit::SourceLoaded(size) | SpecEdit::Resolved(size) => Self {
                width: Some(size.width),
                height: Some(size.height),
                ..self
            },
        }
    }

    /// Resolve to the final surface size. See [`resolve`].
    pub fn resolve(&self, source_aspect: Option<f64>, max_size: u32) -> Size {
        resolve(
            self.width,
            self.height,
            self.lock_aspect,
            source_aspect,
            max_size,
        )
    }
}

/// Compute the final integer surface size.
///
/// - Present values are clamped to `[1, max_size]`.
/// - With `lock_aspect` and exactly one value present, the other is derived
///   from `source_aspect` (`width / height`) and clamped the same way.
/// - Two present values are used as-is.
/// - A blank axis that cannot be derived resolves to 0, making the result
///   [`Size::is_empty`].
///
/// Never fails: out-of-range input is clamped silently.
pub fn resolve(
    requested_width: Option<u32>,
    requested_height: Option<u32>,
    lock_aspect: bool,
    source_aspect: Option<f64>,
    max_size: u32,
) -> Size {
    let max_size = max_size.max(1);
    let width = requested_width.map(|w| w.clamp(1, max_size));
    let height = requested_height.map(|h| h.clamp(1, max_size));
    let aspect = source_aspect.filter(|a| a.is_finite() && *a > 0.0);

    let (width, height) = match (width, height, aspect) {
        (Some(w), None, Some(a)) if lock_aspect => (w, derive(w as f64 / a, max_size)),
        (None, Some(h), Some(a)) if lock_aspect => (derive(h as f64 * a, max_size), h),
        (w, h, _) => (w.unwrap_or(0), h.unwrap_or(0)),
    };
    Size::new(width, height)
}

/// Round a derived axis to the nearest pixel within `[1, max_size]`.
fn derive(value: f64, max_size: u32) -> u32 {
    let rounded = Float::round(value);
    if rounded >= max_size as f64 {
        max_size
    } else if rounded < 1.0 {
        1
    } else {
        rounded as u32
    }
}

/// Parse a form field the way a lenient number input does.
///
/// Leading whitespace and one sign are accepted, then as many digits as
/// follow; the rest is ignored (`"120px"` → 120). No digits → `None`.
/// Negative values saturate to 0 and overflow saturates to `u32::MAX`, so
/// both are clamped by [`resolve`] instead of being dropped.
pub fn parse_dimension(input: &str) -> Option<u32> {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    if negative {
        return Some(0);
    }
    let value = digits[..end].bytes().fold(0u32, |acc, b| {
        acc.saturating_mul(10).saturating_add((b - b'0') as u32)
    });
    Some(value)
}

/// Size of the original-image preview surface: the source stretched so each
/// edge is at least `min_edge`.
pub fn preview_size(source: Size, min_edge: u32) -> Size {
    Size::new(source.width.max(min_edge), source.height.max(min_edge))
}
