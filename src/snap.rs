//! Helper-line snapping while a layer is manipulated.
//!
//! DESIGN
//! ======
//! One [`LayerInteractionState`] exists per active layer gesture. It keeps
//! the gesture-start transform so every update is computed from the base
//! plus the cumulative delta, never incrementally. Snapping is latched with
//! hysteresis: engaging requires crossing the snap target, releasing requires
//! moving a hit-span away from where the snap engaged. Raw (unsnapped)
//! positions keep accumulating underneath a latched snap.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use crate::config::ScaleLimits;
use crate::consts::ROTATION_SNAP_STEP_DEG;
use crate::geom::Point;
use crate::layer::PaintLayer;
use crate::model::LayerId;
use crate::transform::{self, normalize_angle};

/// Which side of an axis a position is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisBucket {
    /// Left of the vertical center line, or above the horizontal one.
    Before,
    Center,
    /// Right of the vertical center line, or below the horizontal one.
    After,
}

impl AxisBucket {
    #[must_use]
    pub fn of(v: f64) -> Self {
        if v < 0.0 {
            Self::Before
        } else if v > 0.0 {
            Self::After
        } else {
            Self::Center
        }
    }
}

/// Which helper lines are currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HelperLines {
    /// Vertical center line (x snapped to 0).
    pub vertical: bool,
    /// Horizontal center line (y snapped to 0).
    pub horizontal: bool,
    /// Rotation guide (rotation snapped to a 45° multiple).
    pub rotation: bool,
}

/// Snap state for one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSnap {
    bucket: AxisBucket,
    /// Raw position at which the snap engaged.
    trigger: Option<f64>,
}

impl AxisSnap {
    #[must_use]
    pub fn new(raw: f64) -> Self {
        Self { bucket: AxisBucket::of(raw), trigger: None }
    }

    #[must_use]
    pub fn is_snapped(&self) -> bool {
        self.trigger.is_some()
    }

    /// Feed the raw position, returning the position to apply.
    pub fn apply(&mut self, raw: f64, hit_span: f64) -> f64 {
        let bucket = AxisBucket::of(raw);
        let previous = std::mem::replace(&mut self.bucket, bucket);

        if let Some(trigger) = self.trigger {
            if (raw - trigger).abs() > hit_span {
                self.trigger = None;
                return raw;
            }
            return 0.0;
        }

        // Starting on the center line is not a crossing.
        let crossed = previous != AxisBucket::Center && previous != bucket;
        if crossed {
            self.trigger = Some(raw);
            return 0.0;
        }
        raw
    }
}

/// Snap state for rotation, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationSnap {
    previous_deg: f64,
    target_deg: Option<f64>,
}

impl RotationSnap {
    #[must_use]
    pub fn new(rotation: f64) -> Self {
        Self { previous_deg: rotation.to_degrees(), target_deg: None }
    }

    #[must_use]
    pub fn is_snapped(&self) -> bool {
        self.target_deg.is_some()
    }

    /// Feed the raw rotation in radians, returning the rotation to apply.
    ///
    /// Engages within `±hit_span/2` degrees of a 45° multiple, but only once
    /// the raw rotation reaches or crosses it. Distances are measured around
    /// the circle, so the 180° target works across the ±180° wrap.
    pub fn apply(&mut self, raw: f64, hit_span: f64) -> f64 {
        let deg = raw.to_degrees();
        let previous = std::mem::replace(&mut self.previous_deg, deg);
        let band = hit_span / 2.0;

        if let Some(target) = self.target_deg {
            if wrapped_deg(deg - target).abs() > band {
                self.target_deg = None;
                return raw;
            }
            return normalize_angle(target.to_radians());
        }

        let target = (deg / ROTATION_SNAP_STEP_DEG).round() * ROTATION_SNAP_STEP_DEG;
        let before = wrapped_deg(previous - target);
        let after = wrapped_deg(deg - target);
        let crossed = (before < 0.0 && after >= 0.0) || (before > 0.0 && after <= 0.0);
        if after.abs() <= band && crossed {
            self.target_deg = Some(target);
            return normalize_angle(target.to_radians());
        }
        raw
    }
}

/// Signed angular difference in degrees, wrapped into (-180, 180].
fn wrapped_deg(d: f64) -> f64 {
    normalize_angle(d.to_radians()).to_degrees()
}

/// Ephemeral state of one layer manipulation, from gesture start to end.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerInteractionState {
    pub layer_id: LayerId,
    pub base_offset: Point,
    pub base_scale: f64,
    pub base_rotation: f64,
    pub pointer_start: Point,
    x: AxisSnap,
    y: AxisSnap,
    rotation: RotationSnap,
}

impl LayerInteractionState {
    /// Capture the layer's transform at gesture start.
    #[must_use]
    pub fn begin(layer: &PaintLayer, pointer: Point) -> Self {
        Self {
            layer_id: layer.id,
            base_offset: layer.offset,
            base_scale: layer.scale,
            base_rotation: layer.rotation,
            pointer_start: pointer,
            x: AxisSnap::new(layer.offset.x),
            y: AxisSnap::new(layer.offset.y),
            rotation: RotationSnap::new(layer.rotation),
        }
    }

    /// Move the layer with the pointer, snapping to the canvas center lines.
    pub fn drag(&mut self, layer: &mut PaintLayer, pointer: Point, hit_span: f64) {
        let raw = self.base_offset + (pointer - self.pointer_start);
        layer.offset = Point::new(self.x.apply(raw.x, hit_span), self.y.apply(raw.y, hit_span));
    }

    /// Apply cumulative two-finger deltas, snapping rotation to 45° steps.
    pub fn scale_rotate(
        &mut self,
        layer: &mut PaintLayer,
        delta_scale: f64,
        delta_rotation: f64,
        limits: &ScaleLimits,
        hit_span: f64,
    ) {
        transform::apply_scale_rotate(layer, self.base_scale, self.base_rotation, delta_scale, delta_rotation, limits);
        layer.rotation = self.rotation.apply(layer.rotation, hit_span);
    }

    #[must_use]
    pub fn helper_lines(&self) -> HelperLines {
        HelperLines {
            vertical: self.x.is_snapped(),
            horizontal: self.y.is_snapped(),
            rotation: self.rotation.is_snapped(),
        }
    }
}
