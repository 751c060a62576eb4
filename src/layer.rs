//! Paint layers: committed paint placed on the main editing canvas.
//!
//! A [`PaintLayer`] re-origins its model's offsets to the layer's own box and
//! carries placement data. `offset` is the layer center relative to the
//! canvas center, in canvas pixels; `rotation` is in radians.

#[cfg(test)]
#[path = "layer_test.rs"]
mod layer_test;

use serde::{Deserialize, Serialize};

use crate::config::{EditorConfig, ScaleLimits};
use crate::geom::{Point, Rect, Size};
use crate::model::{LayerId, PaintItem, PaintedModel};

/// Layer categories with distinct scale limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Paint,
    Censor,
}

impl LayerKind {
    #[must_use]
    pub fn scale_limits(self, config: &EditorConfig) -> ScaleLimits {
        match self {
            Self::Paint => config.paint_scale,
            Self::Censor => config.censor_scale,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintLayer {
    pub id: LayerId,
    /// The paint model with offsets relative to the layer's top-left corner.
    pub item: PaintedModel,
    pub offset: Point,
    pub scale: f64,
    pub rotation: f64,
    pub flip_x: bool,
    pub flip_y: bool,
    /// Unscaled size of the layer box.
    pub raw_size: Size,
}

impl PaintLayer {
    /// Derive a layer from a committed item on a canvas of `editor_size`.
    ///
    /// Stroke-only models get their box expanded by the stroke width so the
    /// stroke is not clipped. Returns `None` for an item with no points.
    #[must_use]
    pub fn from_item(item: &PaintItem, editor_size: Size) -> Option<Self> {
        let model = &item.model;
        let bounds = model.bounds()?;
        let inset = if model.is_stroke_only() { model.stroke_width.max(0.0) } else { 0.0 };
        let origin = bounds.min - Point::new(inset / 2.0, inset / 2.0);

        let mut local = model.clone();
        local.offsets = model.offsets.iter().map(|o| o.map(|p| p - origin)).collect();

        Some(Self {
            id: item.id,
            item: local,
            offset: bounds.center() - editor_size.center(),
            scale: 1.0,
            rotation: 0.0,
            flip_x: false,
            flip_y: false,
            raw_size: Size::new(bounds.width() + inset, bounds.height() + inset),
        })
    }

    #[must_use]
    pub fn kind(&self) -> LayerKind {
        if self.item.mode.is_censor() { LayerKind::Censor } else { LayerKind::Paint }
    }

    /// Scaled size of the layer box.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.raw_size.width * self.scale, self.raw_size.height * self.scale)
    }

    /// Axis-aligned box around the layer, ignoring rotation, relative to the canvas center.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.offset, self.size())
    }

    /// Map a canvas-center-relative point into the layer's unscaled local box.
    ///
    /// Inverts `translate · flip · rotate · scale`.
    #[must_use]
    pub fn to_local(&self, p: Point) -> Point {
        let mut v = p - self.offset;
        if self.flip_x {
            v.x = -v.x;
        }
        if self.flip_y {
            v.y = -v.y;
        }
        let scale = if self.scale.abs() < f64::EPSILON { f64::EPSILON } else { self.scale };
        v.rotate(-self.rotation) / scale + self.raw_size.center()
    }
}
