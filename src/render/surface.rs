//! Rasterizing a [`DrawPlan`] onto an RGBA surface.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::dimension::{Size, preview_size};
use crate::plan::{CanvasColor, DrawPlan, FillMode, plan};
use crate::render::ImageSource;

/// Part of the destination rectangle that lands on the surface, and the
/// source pixels that feed it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Visible {
    src_x: u32,
    src_y: u32,
    src_w: u32,
    src_h: u32,
    dst_x: u32,
    dst_y: u32,
    dst_w: u32,
    dst_h: u32,
}

/// Allocate a `target` surface and draw `source` onto it following `plan`.
///
/// The background (if any) is painted first, then the source is scaled into
/// the destination rectangle and composited source-over. Only the part of
/// the rectangle inside the surface is resampled, so Crop overflow costs
/// nothing. A non-finite or empty plan leaves just the background.
pub fn draw(source: &ImageSource, plan: &DrawPlan, target: Size, filter: FilterType) -> RgbaImage {
    let fill = plan.background.unwrap_or(CanvasColor::TRANSPARENT);
    let mut surface = RgbaImage::from_pixel(target.width, target.height, Rgba(fill.to_array()));

    if !plan.is_finite() || plan.dest_width <= 0.0 || plan.dest_height <= 0.0 {
        log::warn!(
            "skipping degenerate draw plan {plan:?} onto {}x{}",
            target.width,
            target.height
        );
        return surface;
    }

    let Some(v) = visible_region(plan, source.size(), target) else {
        log::debug!("draw plan {plan:?} misses the {}x{} surface", target.width, target.height);
        return surface;
    };

    let region = imageops::crop_imm(source.pixels(), v.src_x, v.src_y, v.src_w, v.src_h).to_image();
    let scaled = imageops::resize(&region, v.dst_w, v.dst_h, filter);
    imageops::overlay(&mut surface, &scaled, v.dst_x as i64, v.dst_y as i64);

    log::debug!(
        "drew source {}x{}+{}+{} into {}x{}+{}+{} on {}x{}",
        v.src_w,
        v.src_h,
        v.src_x,
        v.src_y,
        v.dst_w,
        v.dst_h,
        v.dst_x,
        v.dst_y,
        target.width,
        target.height
    );
    surface
}

/// Draw the original-image preview: the source stretched onto a surface at
/// least `min_edge` pixels on each side.
pub fn draw_preview(source: &ImageSource, min_edge: u32, filter: FilterType) -> RgbaImage {
    let size = preview_size(source.size(), min_edge);
    let stretch = plan(
        source.width(),
        source.height(),
        size.width,
        size.height,
        FillMode::Stretch,
    );
    draw(source, &stretch, size, filter)
}

/// Clip the destination rectangle to the surface (snapped to whole pixels)
/// and map the clipped edges back into source coordinates.
fn visible_region(plan: &DrawPlan, source: Size, target: Size) -> Option<Visible> {
    let (dst_x0, dst_x1) = snap_span(plan.dest_x, plan.dest_x + plan.dest_width, target.width)?;
    let (dst_y0, dst_y1) = snap_span(plan.dest_y, plan.dest_y + plan.dest_height, target.height)?;

    let (src_x, src_w) = map_span(
        dst_x0,
        dst_x1,
        plan.dest_x,
        source.width as f64 / plan.dest_width,
        source.width,
    );
    let (src_y, src_h) = map_span(
        dst_y0,
        dst_y1,
        plan.dest_y,
        source.height as f64 / plan.dest_height,
        source.height,
    );

    Some(Visible {
        src_x,
        src_y,
        src_w,
        src_h,
        dst_x: dst_x0,
        dst_y: dst_y0,
        dst_w: dst_x1 - dst_x0,
        dst_h: dst_y1 - dst_y0,
    })
}

/// Clip `[start, end)` to `[0, limit)` and round it to whole pixels.
///
/// `None` when the span misses the surface. A span thinner than a pixel
/// keeps the one pixel it starts in.
fn snap_span(start: f64, end: f64, limit: u32) -> Option<(u32, u32)> {
    let start = start.max(0.0);
    let end = end.min(limit as f64);
    if end <= start {
        return None;
    }
    // `as u32` saturates negatives to 0.
    let s0 = (start.round() as u32).min(limit);
    let s1 = (end.round() as u32).min(limit);
    if s1 > s0 {
        return Some((s0, s1));
    }
    let s0 = (start.floor() as u32).min(limit - 1);
    Some((s0, s0 + 1))
}

/// Map the destination span `[d0, d1)` to a source `(start, len)`, at least
/// one pixel and inside `[0, limit)`.
fn map_span(d0: u32, d1: u32, origin: f64, scale: f64, limit: u32) -> (u32, u32) {
    let s1 = (((d1 as f64 - origin) * scale).ceil().max(1.0) as u32).min(limit);
    let s0 = (((d0 as f64 - origin) * scale).floor().max(0.0) as u32).min(s1 - 1);
    (s0, s1 - s0)
}
