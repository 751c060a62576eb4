use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::EditorConfig;
use crate::consts::REPROJECTION_TOLERANCE;
use crate::geom::{Point, Rect, Size};
use crate::hit::{HitContext, hit_test};
use crate::history::PaintHistory;
use crate::layer::{LayerKind, PaintLayer};
use crate::model::{LayerId, PaintItem, PaintMode, PaintStyle, PaintedModel};
use crate::session::{GestureEvent, PaintSession, SessionOutcome};
use crate::snap::{HelperLines, LayerInteractionState};
use crate::transform::{self, FlipAxis};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("history is locked while a paint session is drawing")]
    SessionActive,
    #[error("layer not found: {0}")]
    UnknownLayer(LayerId),
}

/// Notifications returned from editor handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A paint session started drawing.
    PaintStarted,
    /// A paint session committed a new item.
    PaintCreated(PaintItem),
    /// The eraser matched these items; the host decides whether to delete them.
    RemoveLayers(Vec<LayerId>),
    /// The selected layer changed (`None` when deselected).
    SelectedLayerChanged(Option<LayerId>),
    /// An item's hover state changed.
    HitChanged { id: LayerId, hit: bool },
    /// Helper line visibility changed.
    HelperLinesChanged(HelperLines),
    RenderNeeded,
}

// =============================================================
// Paint editor
// =============================================================

/// The paint sub-editor: one session, one history, one pointer at a time.
pub struct PaintEditor {
    pub config: EditorConfig,
    pub mode: PaintMode,
    pub style: PaintStyle,
    /// Scale from stored 1x geometry to the coordinates gestures arrive in.
    pub render_scale: f64,
    history: PaintHistory,
    session: PaintSession,
    hover: HashMap<LayerId, bool>,
    /// Ids already reported by the eraser during the current gesture.
    erased: Option<Vec<LayerId>>,
}

impl Default for PaintEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl PaintEditor {
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self {
            history: PaintHistory::new(config.history_limit),
            session: PaintSession::new(config.polygon_connection_threshold),
            config,
            mode: PaintMode::default(),
            style: PaintStyle::default(),
            render_scale: 1.0,
            hover: HashMap::new(),
            erased: None,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn items(&self) -> &[PaintItem] {
        self.history.items()
    }

    #[must_use]
    pub fn history(&self) -> &PaintHistory {
        &self.history
    }

    #[must_use]
    pub fn session(&self) -> &PaintSession {
        &self.session
    }

    /// The in-progress shape, for live preview.
    #[must_use]
    pub fn preview(&self) -> Option<PaintedModel> {
        self.session.preview()
    }

    #[must_use]
    pub fn hit_context(&self) -> HitContext {
        HitContext::from_config(&self.config, self.render_scale)
    }

    /// Ids of every active item under `position`, bottom first.
    #[must_use]
    pub fn items_at(&self, position: Point) -> Vec<LayerId> {
        let ctx = self.hit_context();
        self.items()
            .iter()
            .filter(|item| hit_test(&item.model, position, &ctx))
            .map(|item| item.id)
            .collect()
    }

    // --- Tool ---

    /// Switch the paint mode. An accumulating polygon is finished first.
    pub fn set_mode(&mut self, mode: PaintMode) -> Vec<Action> {
        let mut actions = Vec::new();
        if mode != self.mode {
            actions = self.finish();
            self.mode = mode;
        }
        actions
    }

    // --- Gestures ---

    /// Feed one gesture event.
    pub fn on_gesture(&mut self, event: GestureEvent) -> Vec<Action> {
        if self.mode == PaintMode::Eraser {
            return self.on_eraser_gesture(event);
        }
        if self.mode == PaintMode::MoveAndZoom {
            return Vec::new();
        }

        let outcome = self.session.handle(event, self.mode, &self.style);
        let mut actions = self.apply_outcome(outcome);
        if matches!(event, GestureEvent::Update { .. }) && self.session.is_drawing() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Commit an open polygon (or end the current draft).
    pub fn finish(&mut self) -> Vec<Action> {
        let outcome = self.session.finish();
        self.apply_outcome(outcome)
    }

    fn apply_outcome(&mut self, outcome: SessionOutcome) -> Vec<Action> {
        match outcome {
            SessionOutcome::Pending => Vec::new(),
            SessionOutcome::Started => vec![Action::PaintStarted, Action::RenderNeeded],
            SessionOutcome::Cancelled => vec![Action::RenderNeeded],
            SessionOutcome::Committed(model) => {
                let item = PaintItem::new(model);
                info!(id = %item.id, mode = ?item.model.mode, "paint item created");
                self.history.push(item.clone());
                vec![Action::PaintCreated(item), Action::RenderNeeded]
            }
        }
    }

    fn on_eraser_gesture(&mut self, event: GestureEvent) -> Vec<Action> {
        match event {
            GestureEvent::Start { position } => {
                self.erased = Some(Vec::new());
                self.erase_at(position)
            }
            GestureEvent::Update { position, .. } => self.erase_at(position),
            GestureEvent::End => {
                if let Some(ids) = self.erased.take() {
                    debug!(count = ids.len(), "eraser gesture ended");
                }
                Vec::new()
            }
        }
    }

    /// Report items under `position` not yet reported during this gesture.
    fn erase_at(&mut self, position: Point) -> Vec<Action> {
        let ctx = self.hit_context();
        let Some(reported) = self.erased.as_mut() else {
            return Vec::new();
        };
        let matched: Vec<LayerId> = self
            .history
            .items()
            .iter()
            .filter(|item| !reported.contains(&item.id))
            .filter(|item| {
                if item.model.mode.is_censor() {
                    censor_contains(&item.model, position, ctx.scale)
                } else {
                    hit_test(&item.model, position, &ctx)
                }
            })
            .map(|item| item.id)
            .collect();
        if matched.is_empty() {
            return Vec::new();
        }
        reported.extend(matched.iter().copied());
        info!(count = matched.len(), "eraser matched paint items");
        vec![Action::RemoveLayers(matched)]
    }

    /// Remove items (typically eraser matches). The removal is undoable.
    ///
    /// # Errors
    ///
    /// Returns `SessionActive` while a paint session is drawing.
    pub fn remove_items(&mut self, ids: &[LayerId]) -> Result<Vec<Action>, EngineError> {
        self.ensure_idle()?;
        let removed = self.history.remove(ids);
        for id in &removed {
            self.hover.remove(id);
        }
        Ok(if removed.is_empty() { Vec::new() } else { vec![Action::RenderNeeded] })
    }

    /// Hit-test the active items at `position`, reporting hover changes.
    pub fn hover(&mut self, position: Point) -> Vec<Action> {
        let ctx = self.hit_context();
        let mut actions = Vec::new();
        for item in self.history.items() {
            let hit = hit_test(&item.model, position, &ctx);
            let previous = self.hover.insert(item.id, hit).unwrap_or(false);
            if previous != hit {
                actions.push(Action::HitChanged { id: item.id, hit });
            }
        }
        actions
    }

    // --- History ---

    /// # Errors
    ///
    /// Returns `SessionActive` while a paint session is drawing.
    pub fn undo(&mut self) -> Result<bool, EngineError> {
        self.ensure_idle()?;
        let changed = self.history.undo();
        self.prune_hover();
        Ok(changed)
    }

    /// # Errors
    ///
    /// Returns `SessionActive` while a paint session is drawing.
    pub fn redo(&mut self) -> Result<bool, EngineError> {
        self.ensure_idle()?;
        let changed = self.history.redo();
        self.prune_hover();
        Ok(changed)
    }

    /// Drop hover state for items no longer active.
    fn prune_hover(&mut self) {
        let history = &self.history;
        self.hover.retain(|id, _| history.get(id).is_some());
    }

    /// Number of items with tracked hover state.
    #[must_use]
    pub fn hovered_count(&self) -> usize {
        self.hover.len()
    }

    fn ensure_idle(&self) -> Result<(), EngineError> {
        if self.session.is_drawing() { Err(EngineError::SessionActive) } else { Ok(()) }
    }
}

/// Censor regions are matched by their scaled bounding box.
fn censor_contains(model: &PaintedModel, position: Point, scale: f64) -> bool {
    model
        .bounds()
        .is_some_and(|b| Rect::from_corners(b.min.scale(scale), b.max.scale(scale)).contains(position))
}

// =============================================================
// Layer editor
// =============================================================

/// The main canvas: paint layers, selection, and layer manipulation.
///
/// Gesture positions are canvas-local (top-left origin); layer offsets are
/// relative to the canvas center.
pub struct LayerEditor {
    pub config: EditorConfig,
    canvas_size: Size,
    layers: Vec<PaintLayer>,
    selected: Option<LayerId>,
    interaction: Option<LayerInteractionState>,
    helper_lines: HelperLines,
}

impl LayerEditor {
    #[must_use]
    pub fn new(config: EditorConfig, canvas_size: Size) -> Self {
        Self {
            config,
            canvas_size,
            layers: Vec::new(),
            selected: None,
            interaction: None,
            helper_lines: HelperLines::default(),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn layers(&self) -> &[PaintLayer] {
        &self.layers
    }

    #[must_use]
    pub fn layer(&self, id: &LayerId) -> Option<&PaintLayer> {
        self.layers.iter().find(|l| &l.id == id)
    }

    #[must_use]
    pub fn selected(&self) -> Option<LayerId> {
        self.selected
    }

    #[must_use]
    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    #[must_use]
    pub fn helper_lines(&self) -> HelperLines {
        self.helper_lines
    }

    /// Topmost layer under a canvas-local point.
    #[must_use]
    pub fn layer_at(&self, canvas_pt: Point) -> Option<LayerId> {
        let p = canvas_pt - self.canvas_size.center();
        let ctx = HitContext::from_config(&self.config, 1.0);
        self.layers
            .iter()
            .rev()
            .find(|layer| {
                let local = layer.to_local(p);
                // Censor shapes hit everywhere, so confine them to their box.
                if layer.kind() == LayerKind::Censor {
                    let corner = Point::new(layer.raw_size.width, layer.raw_size.height);
                    return Rect::from_corners(Point::ZERO, corner).contains(local);
                }
                hit_test(&layer.item, local, &ctx)
            })
            .map(|layer| layer.id)
    }

    // --- Layer list ---

    /// Export paint items onto the canvas as layers.
    pub fn add_paint_layers(&mut self, items: &[PaintItem]) -> Vec<LayerId> {
        let added: Vec<PaintLayer> = items
            .iter()
            .filter_map(|item| PaintLayer::from_item(item, self.canvas_size))
            .collect();
        let ids = added.iter().map(|l| l.id).collect();
        info!(count = added.len(), "paint layers added");
        self.layers.extend(added);
        ids
    }

    /// Remove layers by id. Clears the selection if it was removed.
    pub fn remove_layers(&mut self, ids: &[LayerId]) -> Vec<Action> {
        let before = self.layers.len();
        self.layers.retain(|l| !ids.contains(&l.id));
        let mut actions = Vec::new();
        if self.selected.is_some_and(|s| ids.contains(&s)) {
            self.interaction = None;
            actions.extend(self.select(None));
        }
        if self.layers.len() != before {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Change the selection, reporting only actual changes.
    pub fn select(&mut self, id: Option<LayerId>) -> Vec<Action> {
        if self.selected == id {
            return Vec::new();
        }
        self.selected = id;
        vec![Action::SelectedLayerChanged(id), Action::RenderNeeded]
    }

    // --- Interactive manipulation ---

    /// Feed a layer gesture: start picks and selects the layer under the
    /// pointer, updates drag/scale/rotate it with snapping, end releases it.
    pub fn on_gesture(&mut self, event: GestureEvent) -> Vec<Action> {
        match event {
            GestureEvent::Start { position } => {
                let hit = self.layer_at(position);
                let mut actions = self.select(hit);
                let p = position - self.canvas_size.center();
                self.interaction = hit
                    .and_then(|id| self.layer(&id))
                    .map(|layer| LayerInteractionState::begin(layer, p));
                actions.extend(self.sync_helper_lines());
                actions
            }
            GestureEvent::Update { position, scale, rotation, .. } => {
                let p = position - self.canvas_size.center();
                let hit_span = self.config.hit_span;
                let Some(state) = self.interaction.as_mut() else {
                    return Vec::new();
                };
                let Some(layer) = self.layers.iter_mut().find(|l| l.id == state.layer_id) else {
                    return Vec::new();
                };
                let limits = layer.kind().scale_limits(&self.config);
                state.drag(layer, p, hit_span);
                state.scale_rotate(layer, scale, rotation, &limits, hit_span);
                let mut actions = self.sync_helper_lines();
                actions.push(Action::RenderNeeded);
                actions
            }
            GestureEvent::End => {
                self.interaction = None;
                self.sync_helper_lines()
            }
        }
    }

    /// Scale/rotate a layer through its on-canvas handle.
    ///
    /// `start` and `current` are canvas-local handle positions. The handle
    /// drag is released by a [`GestureEvent::End`] sent to [`Self::on_gesture`].
    ///
    /// # Errors
    ///
    /// Returns `UnknownLayer` if the layer does not exist.
    pub fn on_handle_drag(&mut self, id: &LayerId, start: Point, current: Point) -> Result<Vec<Action>, EngineError> {
        let Some(layer) = self.layers.iter().find(|l| &l.id == id) else {
            return Err(EngineError::UnknownLayer(*id));
        };
        let origin = self.canvas_size.center();
        let center = layer.offset;
        let begin_fresh = self.interaction.as_ref().is_none_or(|s| &s.layer_id != id);
        if begin_fresh {
            self.interaction = Some(LayerInteractionState::begin(layer, start - origin));
        }
        let hit_span = self.config.hit_span;
        let (Some(state), Some(layer)) = (self.interaction.as_mut(), self.layers.iter_mut().find(|l| &l.id == id))
        else {
            return Err(EngineError::UnknownLayer(*id));
        };

        // Deltas are measured against the gesture-start transform.
        if let Some((delta_scale, delta_rotation)) =
            transform::handle_deltas(layer, center, start - origin, current - origin)
        {
            let limits = layer.kind().scale_limits(&self.config);
            state.scale_rotate(layer, delta_scale, delta_rotation, &limits, hit_span);
        }
        let mut actions = self.sync_helper_lines();
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    // --- Structural edits ---

    /// Rotate the canvas by clockwise quarter turns.
    pub fn rotate(&mut self, turns: i32, scale_factor: f64) -> Vec<Action> {
        for layer in &mut self.layers {
            let limits = layer.kind().scale_limits(&self.config);
            transform::rotate_quarter_turns(layer, turns, scale_factor, &limits);
        }
        if turns.rem_euclid(2) == 1 {
            self.canvas_size = Size::new(self.canvas_size.height, self.canvas_size.width);
        }
        vec![Action::RenderNeeded]
    }

    /// Mirror the canvas.
    pub fn flip(&mut self, axis: FlipAxis) -> Vec<Action> {
        for layer in &mut self.layers {
            transform::flip(layer, axis);
        }
        vec![Action::RenderNeeded]
    }

    /// Re-project layers after a crop resized the rendered canvas.
    pub fn apply_crop(&mut self, new_size: Size, padding: Size) -> Vec<Action> {
        let old_size = self.canvas_size;
        let mut changed = false;
        for layer in &mut self.layers {
            let limits = layer.kind().scale_limits(&self.config);
            changed |= transform::reproject_crop(layer, old_size, new_size, padding, &limits);
        }
        self.canvas_size = new_size;
        debug!(changed, "layers re-projected after crop");
        if changed { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    /// Re-project layers after the viewport zoom resized the rendered canvas.
    pub fn resize_canvas(&mut self, new_size: Size) -> Vec<Action> {
        let old_size = self.canvas_size;
        if (new_size.width - old_size.width).abs() <= REPROJECTION_TOLERANCE
            && (new_size.height - old_size.height).abs() <= REPROJECTION_TOLERANCE
        {
            return Vec::new();
        }
        for layer in &mut self.layers {
            let limits = layer.kind().scale_limits(&self.config);
            transform::reproject_viewport(layer, old_size, new_size, &limits);
        }
        self.canvas_size = new_size;
        vec![Action::RenderNeeded]
    }

    /// Set a layer's scale directly, clamped to its kind's limits.
    ///
    /// # Errors
    ///
    /// Returns `UnknownLayer` if the layer does not exist.
    pub fn set_scale(&mut self, id: &LayerId, scale: f64) -> Result<f64, EngineError> {
        let layer = self
            .layers
            .iter_mut()
            .find(|l| &l.id == id)
            .ok_or(EngineError::UnknownLayer(*id))?;
        layer.scale = layer.kind().scale_limits(&self.config).clamp(scale);
        Ok(layer.scale)
    }

    fn sync_helper_lines(&mut self) -> Vec<Action> {
        let lines = self.interaction.as_ref().map(LayerInteractionState::helper_lines).unwrap_or_default();
        if lines == self.helper_lines {
            return Vec::new();
        }
        self.helper_lines = lines;
        vec![Action::HelperLinesChanged(lines)]
    }
}
