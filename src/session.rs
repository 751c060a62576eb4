//! Paint session: the state machine for one in-progress paint gesture.
//!
//! Gesture events arrive strictly in `Start → Update* → End` order from the
//! host. The session accumulates points while `Drawing` and produces an
//! immutable [`PaintedModel`] on commit. Polygon mode spans several gestures:
//! each gesture start adds a vertex and the session stays `Drawing` until the
//! polygon auto-closes or [`PaintSession::finish`] is called.
//!
//! Eraser and move/zoom never start a session; the editor handles them
//! procedurally.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use tracing::{debug, warn};

use crate::consts::POLYGON_MIN_CLOSING_VERTICES;
use crate::geom::Point;
use crate::model::{PaintMode, PaintStyle, PaintedModel};

/// A pointer gesture event from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Pointer went down.
    Start { position: Point },
    /// Pointer moved. `scale`/`rotation` are cumulative two-finger deltas
    /// (1.0 / 0.0 for a single pointer).
    Update { position: Point, delta: Point, scale: f64, rotation: f64 },
    /// Pointer went up or the gesture was abandoned.
    End,
}

impl GestureEvent {
    /// Single-pointer move to `position`.
    #[must_use]
    pub fn moved(position: Point) -> Self {
        Self::Update { position, delta: Point::ZERO, scale: 1.0, rotation: 0.0 }
    }
}

/// Session lifecycle state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Drawing(Draft),
}

/// The shape being drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub mode: PaintMode,
    pub style: PaintStyle,
    /// First sampled position.
    pub start: Point,
    /// Latest rubber-band position.
    pub end: Point,
    /// Free-style samples or polygon vertices.
    pub points: Vec<Point>,
}

/// What a handled event did.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// Nothing to report.
    Pending,
    /// A new drawing began.
    Started,
    /// The draft was committed.
    Committed(PaintedModel),
    /// The gesture ended without anything to commit.
    Cancelled,
}

/// One paint session per editor.
#[derive(Debug, Clone)]
pub struct PaintSession {
    state: SessionState,
    connection_threshold: f64,
}

impl PaintSession {
    #[must_use]
    pub fn new(connection_threshold: f64) -> Self {
        Self { state: SessionState::Idle, connection_threshold }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, SessionState::Drawing(_))
    }

    /// Feed one gesture event. `mode` and `style` are only read on `Start`.
    pub fn handle(&mut self, event: GestureEvent, mode: PaintMode, style: &PaintStyle) -> SessionOutcome {
        match event {
            GestureEvent::Start { position } => self.start(position, mode, style),
            GestureEvent::Update { position, .. } => {
                self.update(position);
                SessionOutcome::Pending
            }
            GestureEvent::End => self.end(),
        }
    }

    fn start(&mut self, position: Point, mode: PaintMode, style: &PaintStyle) -> SessionOutcome {
        if mode.is_procedural() || !position.is_finite() {
            return SessionOutcome::Pending;
        }
        if let SessionState::Drawing(draft) = &mut self.state {
            if draft.mode == PaintMode::Polygon && mode == PaintMode::Polygon {
                draft.points.push(position);
                draft.end = position;
                debug!(vertices = draft.points.len(), "polygon vertex added");
                return SessionOutcome::Pending;
            }
            warn!(mode = ?draft.mode, "discarding unfinished draft on new gesture");
        }
        self.state = SessionState::Drawing(Draft {
            mode,
            style: *style,
            start: position,
            end: position,
            points: vec![position],
        });
        debug!(?mode, "paint session started");
        SessionOutcome::Started
    }

    fn update(&mut self, position: Point) {
        let SessionState::Drawing(draft) = &mut self.state else {
            return;
        };
        if !position.is_finite() {
            return;
        }
        match draft.mode {
            PaintMode::FreeStyle => {
                draft.points.push(position);
                draft.end = position;
            }
            PaintMode::Polygon => {}
            _ => draft.end = position,
        }
    }

    fn end(&mut self) -> SessionOutcome {
        let SessionState::Drawing(draft) = &mut self.state else {
            return SessionOutcome::Cancelled;
        };
        if draft.mode == PaintMode::Polygon {
            let closed = draft.points.len() >= POLYGON_MIN_CLOSING_VERTICES
                && close_polygon(&mut draft.points, self.connection_threshold);
            if !closed {
                return SessionOutcome::Pending;
            }
        }
        self.commit(true)
    }

    /// Commit an open polygon, or end any other draft as if its gesture ended.
    ///
    /// A polygon with fewer than two vertices is cancelled.
    pub fn finish(&mut self) -> SessionOutcome {
        let polygon = match &self.state {
            SessionState::Idle => return SessionOutcome::Pending,
            SessionState::Drawing(draft) => draft.mode == PaintMode::Polygon,
        };
        if polygon { self.commit(false) } else { self.end() }
    }

    /// Abandon the current draft without committing.
    pub fn cancel(&mut self) {
        self.state = SessionState::Idle;
    }

    /// The model the draft would commit right now, for live preview.
    #[must_use]
    pub fn preview(&self) -> Option<PaintedModel> {
        let SessionState::Drawing(draft) = &self.state else {
            return None;
        };
        let offsets = draft_offsets(draft, true);
        (!offsets.is_empty()).then(|| PaintedModel::new(draft.mode, offsets, &draft.style))
    }

    /// Take the draft and turn it into a model. `closed` only matters for polygons.
    fn commit(&mut self, closed: bool) -> SessionOutcome {
        let SessionState::Drawing(draft) = std::mem::take(&mut self.state) else {
            return SessionOutcome::Cancelled;
        };
        let offsets = draft_offsets(&draft, closed);
        if offsets.is_empty() {
            debug!(mode = ?draft.mode, "paint session cancelled");
            return SessionOutcome::Cancelled;
        }
        let mut style = draft.style;
        if draft.mode == PaintMode::Polygon && !closed {
            style.fill = false;
        }
        debug!(mode = ?draft.mode, offsets = offsets.len(), "paint session committed");
        SessionOutcome::Committed(PaintedModel::new(draft.mode, offsets, &style))
    }
}

/// Snap the last vertex onto the first when they are within `threshold`.
///
/// Returns whether the polygon is now closed.
pub fn close_polygon(points: &mut [Point], threshold: f64) -> bool {
    let Some(&first) = points.first() else {
        return false;
    };
    let last = points.len() - 1;
    if last == 0 || first.distance(points[last]) > threshold {
        return false;
    }
    points[last] = first;
    true
}

fn draft_offsets(draft: &Draft, closed: bool) -> Vec<Option<Point>> {
    match draft.mode {
        PaintMode::FreeStyle => match draft.points.as_slice() {
            [dot] => vec![Some(*dot), None],
            points => points.iter().copied().map(Some).collect(),
        },
        PaintMode::Polygon => {
            if !closed && draft.points.len() < 2 {
                return Vec::new();
            }
            draft.points.iter().copied().map(Some).collect()
        }
        _ => vec![Some(draft.start), Some(draft.end)],
    }
}
