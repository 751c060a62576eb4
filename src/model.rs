//! Paint data model: paint modes, committed paint records, and identified items.
//!
//! A [`PaintedModel`] is the immutable result of one finished paint gesture.
//! Offsets are stored at logical 1x; the hit tester and renderer scale them
//! on use. [`PaintItem`] pairs a model with the [`LayerId`] the host uses to
//! address it (eraser removals, selection).

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geom::{Point, Rect};

/// Unique identifier for a paint item or layer.
pub type LayerId = Uuid;

/// The tool type of a committed or in-progress paint action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaintMode {
    /// Pan/zoom the canvas; never creates a model.
    MoveAndZoom,
    /// Free-hand stroke through every sampled point.
    #[default]
    FreeStyle,
    /// Straight line between two endpoints.
    Line,
    /// Axis-aligned rectangle spanned by two corners.
    Rect,
    /// Ellipse inscribed in the rectangle spanned by two corners.
    Circle,
    /// Line with an arrowhead at the end point.
    Arrow,
    /// Dashed straight line.
    DashLine,
    /// Multi-tap polygon, optionally auto-closed.
    Polygon,
    /// Removes existing items; never creates a model.
    Eraser,
    /// Blur censor region.
    Blur,
    /// Pixelate censor region.
    Pixelate,
}

impl PaintMode {
    /// Whether committed models are defined by exactly a start and end point.
    #[must_use]
    pub fn is_two_point(self) -> bool {
        matches!(
            self,
            Self::Line | Self::Rect | Self::Circle | Self::Arrow | Self::DashLine | Self::Blur | Self::Pixelate
        )
    }

    /// Whether this is a blur/pixelate censor region.
    #[must_use]
    pub fn is_censor(self) -> bool {
        matches!(self, Self::Blur | Self::Pixelate)
    }

    /// Whether the mode operates on existing items instead of creating one.
    #[must_use]
    pub fn is_procedural(self) -> bool {
        matches!(self, Self::MoveAndZoom | Self::Eraser)
    }
}

/// An immutable record of one completed paint action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintedModel {
    pub mode: PaintMode,
    /// Ordered vertices; `None` marks a segment break in free-style capture.
    pub offsets: Vec<Option<Point>>,
    /// ARGB color.
    pub color: u32,
    pub stroke_width: f64,
    pub fill: bool,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f64,
}

impl PaintedModel {
    #[must_use]
    pub fn new(mode: PaintMode, offsets: Vec<Option<Point>>, style: &PaintStyle) -> Self {
        Self {
            mode,
            offsets,
            color: style.color,
            stroke_width: style.stroke_width,
            fill: style.fill,
            opacity: style.opacity.clamp(0.0, 1.0),
        }
    }

    /// Non-null offsets in order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.offsets.iter().flatten().copied()
    }

    /// Whether the offsets satisfy the mode's shape requirements.
    ///
    /// Malformed models are never rendered or hit.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        if self.mode.is_two_point() {
            return self.offsets.len() == 2 && self.offsets.iter().all(Option::is_some);
        }
        match self.mode {
            PaintMode::FreeStyle | PaintMode::Polygon => self.offsets.iter().any(Option::is_some),
            _ => false,
        }
    }

    /// Start and end point of a two-point model.
    #[must_use]
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        match self.offsets.as_slice() {
            [Some(a), Some(b)] => Some((*a, *b)),
            _ => None,
        }
    }

    /// Whether the rendered area is only the stroke, not a filled interior.
    #[must_use]
    pub fn is_stroke_only(&self) -> bool {
        match self.mode {
            PaintMode::FreeStyle | PaintMode::Line | PaintMode::DashLine | PaintMode::Arrow => true,
            PaintMode::Rect | PaintMode::Circle | PaintMode::Polygon => !self.fill,
            _ => false,
        }
    }

    /// Tight bounding box of all non-null offsets at 1x.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        Rect::bounding(self.points())
    }
}

/// Style applied to newly committed models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintStyle {
    pub color: u32,
    pub stroke_width: f64,
    pub fill: bool,
    pub opacity: f64,
}

impl Default for PaintStyle {
    fn default() -> Self {
        Self { color: 0xFF00_0000, stroke_width: 3.0, fill: false, opacity: 1.0 }
    }
}

/// A committed model with the id the host addresses it by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintItem {
    pub id: LayerId,
    pub model: PaintedModel,
}

impl PaintItem {
    /// Wrap a model under a fresh id.
    #[must_use]
    pub fn new(model: PaintedModel) -> Self {
        Self { id: Uuid::new_v4(), model }
    }
}
