//! Hit-testing committed paint models against a pointer position.
//!
//! Models store offsets and stroke widths at logical 1x. Every test first
//! maps them into render space with [`HitContext::scale`], then builds the
//! mode's [`StrokeRegion`]s and queries them. The result is returned as a
//! plain boolean; hover bookkeeping lives with the caller.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::config::EditorConfig;
use crate::consts::{POLYGON_CLOSED_TOLERANCE, TOUCH_MIN_HIT_WIDTH};
use crate::geom::{Point, Rect};
use crate::model::{PaintMode, PaintedModel};
use crate::path::StrokeRegion;

/// Render-space parameters for a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitContext {
    /// Active render scale applied to stored 1x geometry.
    pub scale: f64,
    /// Touch-primary platforms widen thin strokes to keep them tappable.
    pub touch_primary: bool,
    /// Minimum stroke width, at 1x, used when `touch_primary` is set.
    pub touch_min_width: f64,
}

impl HitContext {
    /// Context for a pointer-primary platform: the literal stroke width is used.
    #[must_use]
    pub fn desktop(scale: f64) -> Self {
        Self { scale, touch_primary: false, touch_min_width: TOUCH_MIN_HIT_WIDTH }
    }

    /// Context for a touch-primary platform.
    #[must_use]
    pub fn touch(scale: f64) -> Self {
        Self { scale, touch_primary: true, touch_min_width: TOUCH_MIN_HIT_WIDTH }
    }

    #[must_use]
    pub fn from_config(config: &EditorConfig, scale: f64) -> Self {
        Self { scale, touch_primary: config.touch_primary, touch_min_width: config.touch_min_hit_width }
    }

    /// Render-space half of the effective hit width for `stroke_width`.
    #[must_use]
    pub fn half_width(&self, stroke_width: f64) -> f64 {
        let width = if self.touch_primary { stroke_width.max(self.touch_min_width) } else { stroke_width };
        width * self.scale / 2.0
    }
}

/// Whether `position` (render space) hits `model`.
#[must_use]
pub fn hit_test(model: &PaintedModel, position: Point, ctx: &HitContext) -> bool {
    if !position.is_finite() || !model.is_well_formed() {
        return false;
    }
    let half = ctx.half_width(model.stroke_width);

    match model.mode {
        PaintMode::Line | PaintMode::DashLine | PaintMode::Arrow => hit_straight(model, position, ctx.scale, half),
        PaintMode::FreeStyle => hit_free_style(model, position, ctx.scale, half),
        PaintMode::Rect => hit_box(model, position, ctx.scale, half, StrokeRegion::Rect),
        PaintMode::Circle => hit_box(model, position, ctx.scale, half, StrokeRegion::Ellipse),
        PaintMode::Polygon => hit_polygon(model, position, ctx.scale, half),
        PaintMode::Eraser | PaintMode::MoveAndZoom => false,
        // Censor regions are always hit so they stay draggable.
        PaintMode::Blur | PaintMode::Pixelate => true,
    }
}

fn hit_straight(model: &PaintedModel, position: Point, scale: f64, half: f64) -> bool {
    let Some((start, end)) = model.endpoints() else {
        return false;
    };
    StrokeRegion::stroke_quad(start.scale(scale), end.scale(scale), half).is_some_and(|q| q.contains(position))
}

fn hit_free_style(model: &PaintedModel, position: Point, scale: f64, half: f64) -> bool {
    model.offsets.windows(2).any(|pair| match (pair[0], pair[1]) {
        (Some(a), Some(b)) => {
            StrokeRegion::capsule(a.scale(scale), b.scale(scale), half).is_some_and(|c| c.contains(position))
        }
        // Lone dot: compares the dot's distance from the coordinate origin,
        // not from `position`. Kept as-is; see DESIGN.md.
        (Some(a), None) => {
            let d = a.length() * scale;
            d.is_finite() && d <= half
        }
        _ => false,
    })
}

fn hit_box(
    model: &PaintedModel,
    position: Point,
    scale: f64,
    half: f64,
    region: impl Fn(Rect) -> StrokeRegion,
) -> bool {
    let Some((a, b)) = model.endpoints() else {
        return false;
    };
    let (a, b) = (a.scale(scale), b.scale(scale));
    if !a.is_finite() || !b.is_finite() {
        return false;
    }
    let rect = Rect::from_corners(a, b);
    if model.fill {
        return region(rect).contains(position);
    }
    let outer = region(rect.inflate(half)).contains(position);
    let inner = rect.deflate(half).is_some_and(|r| region(r).contains(position));
    outer && !inner
}

fn hit_polygon(model: &PaintedModel, position: Point, scale: f64, half: f64) -> bool {
    let points: Vec<Point> = model.points().map(|p| p.scale(scale)).collect();
    if model.fill && points.len() >= 3 {
        return StrokeRegion::Polygon(points).contains(position);
    }

    let hit_edge = |a: Point, b: Point| StrokeRegion::stroke_quad(a, b, half).is_some_and(|q| q.contains(position));
    if points.windows(2).any(|e| hit_edge(e[0], e[1])) {
        return true;
    }
    match (points.first(), points.last()) {
        (Some(&first), Some(&last)) if points.len() >= 3 && is_closed(first, last) => hit_edge(last, first),
        _ => false,
    }
}

/// Whether the polygon's endpoints meet, i.e. it was auto-closed.
#[must_use]
pub fn is_closed(first: Point, last: Point) -> bool {
    first.distance(last) <= POLYGON_CLOSED_TOLERANCE
}
