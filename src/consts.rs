//! Shared numeric constants for the paint core.

// ── Math ────────────────────────────────────────────────────────

/// Smallest denominator used when normalizing a vector.
pub const NORMALIZE_EPSILON: f64 = 1e-5;

/// Segments used to flatten a full ellipse outline.
pub const ELLIPSE_OUTLINE_SEGMENTS: usize = 48;

/// Segments used to flatten one semicircular stroke cap.
pub const CAP_OUTLINE_SEGMENTS: usize = 12;

// ── Hit-testing ─────────────────────────────────────────────────

/// Minimum stroke width, in logical pixels, used for hit-testing on touch-primary platforms.
pub const TOUCH_MIN_HIT_WIDTH: f64 = 30.0;

/// First and last polygon vertices closer than this (in pixels) count as a closed polygon.
pub const POLYGON_CLOSED_TOLERANCE: f64 = 0.5;

// ── Paint session ───────────────────────────────────────────────

/// Default distance, in logical pixels, at which a polygon snaps closed.
pub const DEFAULT_POLYGON_CONNECTION_THRESHOLD: f64 = 20.0;

/// A polygon needs at least this many accumulated vertices before it may auto-close.
pub const POLYGON_MIN_CLOSING_VERTICES: usize = 4;

/// Default number of undo operations retained.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

// ── Layer transforms ────────────────────────────────────────────

/// Default snap hit-span: pixels for axis snapping, degrees for rotation snapping.
pub const DEFAULT_HIT_SPAN: f64 = 10.0;

/// Rotation snap step in degrees.
pub const ROTATION_SNAP_STEP_DEG: f64 = 45.0;

/// Crop padding or size change below this (in pixels) is treated as rounding noise.
pub const REPROJECTION_TOLERANCE: f64 = 0.1;

/// Default lower scale bound for a layer.
pub const DEFAULT_MIN_SCALE: f64 = 0.1;

/// Default upper scale bound for a layer.
pub const DEFAULT_MAX_SCALE: f64 = 10.0;
