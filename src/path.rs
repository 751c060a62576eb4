//! Stroke regions: the closed planar areas covered by ink.
//!
//! A [`StrokeRegion`] answers point-in-region queries for the hit tester and
//! flattens itself into a closed polyline for a fill-rendering backend. The
//! builders return `None` for non-finite input so NaN never reaches a
//! containment test.

#[cfg(test)]
#[path = "path_test.rs"]
mod path_test;

use std::f64::consts::PI;

use crate::consts::{CAP_OUTLINE_SEGMENTS, ELLIPSE_OUTLINE_SEGMENTS, NORMALIZE_EPSILON};
use crate::geom::{Point, Rect};

/// Cross products within this distance of zero count as "on the edge".
const EDGE_EPSILON: f64 = 1e-9;

/// A closed region usable for both filling and hit-testing.
#[derive(Debug, Clone, PartialEq)]
pub enum StrokeRegion {
    /// Straight stroke body: four corners in winding order.
    Quad([Point; 4]),
    /// Free-style segment: straight body plus two semicircular caps.
    Capsule { start: Point, end: Point, half_width: f64 },
    /// Axis-aligned rectangle.
    Rect(Rect),
    /// Ellipse inscribed in the bounding rectangle.
    Ellipse(Rect),
    /// Closed polygon, even-odd fill.
    Polygon(Vec<Point>),
}

impl StrokeRegion {
    /// Build the quad covering a straight stroke from `start` to `end`.
    ///
    /// Both endpoints are offset along the segment normal by `half_width` in
    /// each direction.
    #[must_use]
    pub fn stroke_quad(start: Point, end: Point, half_width: f64) -> Option<Self> {
        if !start.is_finite() || !end.is_finite() || !half_width.is_finite() {
            return None;
        }
        let n = (end - start).normalize().perpendicular() * half_width;
        Some(Self::Quad([start + n, end + n, end - n, start - n]))
    }

    /// Build the rounded capsule covering a free-style segment.
    #[must_use]
    pub fn capsule(start: Point, end: Point, half_width: f64) -> Option<Self> {
        if !start.is_finite() || !end.is_finite() || !half_width.is_finite() {
            return None;
        }
        Some(Self::Capsule { start, end, half_width })
    }

    /// Whether `p` lies inside the region, boundary included.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        if !p.is_finite() {
            return false;
        }
        match self {
            Self::Quad(corners) => quad_has_area(corners) && convex_contains(corners, p),
            Self::Capsule { start, end, half_width } => distance_to_segment(p, *start, *end) <= *half_width,
            Self::Rect(rect) => rect.contains(p),
            Self::Ellipse(rect) => ellipse_contains(rect, p),
            Self::Polygon(points) => polygon_contains(points, p),
        }
    }

    /// Flatten the region into a closed polyline (first vertex not repeated).
    #[must_use]
    pub fn outline(&self) -> Vec<Point> {
        match self {
            Self::Quad(corners) => corners.to_vec(),
            Self::Capsule { start, end, half_width } => capsule_outline(*start, *end, *half_width),
            Self::Rect(rect) => vec![
                rect.min,
                Point::new(rect.max.x, rect.min.y),
                rect.max,
                Point::new(rect.min.x, rect.max.y),
            ],
            Self::Ellipse(rect) => ellipse_outline(rect),
            Self::Polygon(points) => points.clone(),
        }
    }

    /// Axis-aligned bounds of the region.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Capsule { start, end, half_width } => {
                Some(Rect::from_corners(*start, *end).inflate(*half_width))
            }
            Self::Rect(rect) | Self::Ellipse(rect) => Some(*rect),
            Self::Quad(_) | Self::Polygon(_) => Rect::bounding(self.outline()),
        }
    }
}

/// Shortest distance from `p` to the segment `a..b`.
#[must_use]
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq < NORMALIZE_EPSILON * NORMALIZE_EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// A zero-area quad covers nothing.
fn quad_has_area(corners: &[Point; 4]) -> bool {
    let area = (corners[1] - corners[0]).cross(corners[3] - corners[0]).abs();
    area > EDGE_EPSILON
}

/// Inclusive point-in-convex-polygon test by edge cross-product signs.
fn convex_contains(corners: &[Point; 4], p: Point) -> bool {
    let mut has_pos = false;
    let mut has_neg = false;
    for i in 0..corners.len() {
        let a = corners[i];
        let b = corners[(i + 1) % corners.len()];
        let c = (b - a).cross(p - a);
        if !c.is_finite() {
            return false;
        }
        has_pos |= c > EDGE_EPSILON;
        has_neg |= c < -EDGE_EPSILON;
    }
    !(has_pos && has_neg)
}

fn ellipse_contains(rect: &Rect, p: Point) -> bool {
    let rx = rect.width() / 2.0;
    let ry = rect.height() / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let c = rect.center();
    let dx = (p.x - c.x) / rx;
    let dy = (p.y - c.y) / ry;
    dx * dx + dy * dy <= 1.0
}

/// Even-odd ray casting.
fn polygon_contains(points: &[Point], p: Point) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (pi, pj) = (points[i], points[j]);
        if (pi.y > p.y) != (pj.y > p.y) && p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn capsule_outline(start: Point, end: Point, half_width: f64) -> Vec<Point> {
    let dir = end - start;
    let normal = if dir.length() < NORMALIZE_EPSILON {
        Point::new(0.0, half_width)
    } else {
        dir.normalize().perpendicular() * half_width
    };
    let base = normal.angle();
    let mut out = Vec::with_capacity(2 * (CAP_OUTLINE_SEGMENTS + 1));

    // End cap sweeps from +normal through the segment direction to -normal,
    // the start cap continues from -normal back around to +normal.
    #[allow(clippy::cast_precision_loss)]
    let step = PI / CAP_OUTLINE_SEGMENTS as f64;
    for (center, offset) in [(end, 0.0), (start, PI)] {
        for k in 0..=CAP_OUTLINE_SEGMENTS {
            #[allow(clippy::cast_precision_loss)]
            let theta = base - offset - step * k as f64;
            out.push(center + Point::new(theta.cos(), theta.sin()) * half_width);
        }
    }
    out
}

fn ellipse_outline(rect: &Rect) -> Vec<Point> {
    let c = rect.center();
    let rx = rect.width() / 2.0;
    let ry = rect.height() / 2.0;
    #[allow(clippy::cast_precision_loss)]
    let step = 2.0 * PI / ELLIPSE_OUTLINE_SEGMENTS as f64;
    (0..ELLIPSE_OUTLINE_SEGMENTS)
        .map(|k| {
            #[allow(clippy::cast_precision_loss)]
            let theta = step * k as f64;
            Point::new(c.x + rx * theta.cos(), c.y + ry * theta.sin())
        })
        .collect()
}
