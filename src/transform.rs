//! Layer transform math: interactive scale/rotate and structural edits.
//!
//! DESIGN
//! ======
//! A layer renders as `translate(offset) · flip · rotate(rotation) · scale`,
//! with the flip applied outermost around the layer center. Offsets are
//! relative to the canvas center, so mirroring the canvas negates an offset
//! axis and rotating the canvas rotates the offset vector. Structural edits
//! are closed-form and never fail; scale is clamped into the layer kind's
//! limits.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use tracing::debug;

use crate::config::ScaleLimits;
use crate::consts::REPROJECTION_TOLERANCE;
use crate::geom::{Point, Size};
use crate::layer::PaintLayer;

/// Canvas mirror axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipAxis {
    /// Mirror left/right.
    Horizontal,
    /// Mirror top/bottom.
    Vertical,
}

/// Wrap an angle in radians into `(-π, π]`. Non-finite input maps to `0`.
#[must_use]
pub fn normalize_angle(radians: f64) -> f64 {
    if !radians.is_finite() {
        return 0.0;
    }
    let r = radians.rem_euclid(TAU);
    if r > PI { r - TAU } else { r }
}

/// Set scale and rotation from gesture-start values and cumulative deltas.
pub fn apply_scale_rotate(
    layer: &mut PaintLayer,
    base_scale: f64,
    base_rotation: f64,
    delta_scale: f64,
    delta_rotation: f64,
    limits: &ScaleLimits,
) {
    layer.scale = limits.clamp(base_scale * delta_scale);
    layer.rotation = normalize_angle(base_rotation + delta_rotation);
}

/// Scale and rotation deltas for the on-canvas rotate/scale handle.
///
/// `start` and `current` are handle positions, `center` the layer center.
/// Vectors are mirrored into the layer's flip frame so the layer follows the
/// handle on flipped layers too. Returns `(delta_scale, delta_rotation)`, or
/// `None` when the start position sits on the center.
#[must_use]
pub fn handle_deltas(layer: &PaintLayer, center: Point, start: Point, current: Point) -> Option<(f64, f64)> {
    let unflip = |mut v: Point| {
        if layer.flip_x {
            v.x = -v.x;
        }
        if layer.flip_y {
            v.y = -v.y;
        }
        v
    };
    let from = unflip(start - center);
    let to = unflip(current - center);
    let from_len = from.length();
    if !from_len.is_finite() || from_len < f64::EPSILON || !to.is_finite() {
        return None;
    }
    Some((to.length() / from_len, normalize_angle(to.angle() - from.angle())))
}

/// Rotate the canvas by `turns` clockwise quarter turns.
///
/// `scale_factor` is how much larger the rotated canvas renders relative to
/// the previous one; offsets and scale are divided by it. Odd turns swap the
/// flip axes since a mirror conjugated by a quarter turn is the other mirror.
pub fn rotate_quarter_turns(layer: &mut PaintLayer, turns: i32, scale_factor: f64, limits: &ScaleLimits) {
    let turns = turns.rem_euclid(4);
    let factor = if scale_factor.is_finite() && scale_factor > 0.0 { scale_factor } else { 1.0 };

    let mut offset = layer.offset;
    for _ in 0..turns {
        offset = Point::new(-offset.y, offset.x);
    }
    layer.offset = offset / factor;
    layer.scale = limits.clamp(layer.scale / factor);
    layer.rotation = normalize_angle(layer.rotation + f64::from(turns) * FRAC_PI_2);
    if turns % 2 == 1 {
        std::mem::swap(&mut layer.flip_x, &mut layer.flip_y);
    }
    debug!(id = %layer.id, turns, factor, "layer rotated with canvas");
}

/// Mirror the layer with the canvas.
pub fn flip(layer: &mut PaintLayer, axis: FlipAxis) {
    match axis {
        FlipAxis::Horizontal => {
            layer.offset.x = -layer.offset.x;
            layer.flip_x = !layer.flip_x;
        }
        FlipAxis::Vertical => {
            layer.offset.y = -layer.offset.y;
            layer.flip_y = !layer.flip_y;
        }
    }
}

/// Re-project a layer after a crop changed the rendered canvas size.
///
/// `padding` is the crop inset around the kept region. Insets within
/// [`REPROJECTION_TOLERANCE`] are rounding noise and leave the layer alone.
/// Returns whether the layer changed.
pub fn reproject_crop(layer: &mut PaintLayer, old_size: Size, new_size: Size, padding: Size, limits: &ScaleLimits) -> bool {
    if padding.width.abs() <= REPROJECTION_TOLERANCE && padding.height.abs() <= REPROJECTION_TOLERANCE {
        return false;
    }
    rescale(layer, old_size, new_size, limits)
}

/// Re-project a layer after the viewport zoom changed the rendered canvas size.
///
/// Returns whether the layer changed.
pub fn reproject_viewport(layer: &mut PaintLayer, old_size: Size, new_size: Size, limits: &ScaleLimits) -> bool {
    if (new_size.width - old_size.width).abs() <= REPROJECTION_TOLERANCE
        && (new_size.height - old_size.height).abs() <= REPROJECTION_TOLERANCE
    {
        return false;
    }
    rescale(layer, old_size, new_size, limits)
}

fn rescale(layer: &mut PaintLayer, old_size: Size, new_size: Size, limits: &ScaleLimits) -> bool {
    if old_size.width <= 0.0 || old_size.height <= 0.0 || new_size.width <= 0.0 || new_size.height <= 0.0 {
        return false;
    }
    let rx = new_size.width / old_size.width;
    let ry = new_size.height / old_size.height;
    if !rx.is_finite() || !ry.is_finite() {
        return false;
    }
    layer.offset = Point::new(layer.offset.x * rx, layer.offset.y * ry);
    layer.scale = limits.clamp(layer.scale * rx.min(ry));
    true
}
