//! Geometry and interaction core for an in-app paint editor.
//!
//! This crate owns the parts of a paint editor that are pure geometry and
//! state: turning gestures into committed paint records, hit-testing those
//! records per paint mode, and placing them as transformable layers on the
//! main canvas. The host toolkit is responsible for dispatching pointer
//! events, rendering regions, and acting on the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Per-editor cores: [`engine::PaintEditor`] and [`engine::LayerEditor`] |
//! | [`session`] | Gesture events and the paint session state machine |
//! | [`model`] | Paint modes, committed paint records, and item ids |
//! | [`hit`] | Per-mode hit-testing |
//! | [`path`] | Stroke regions for hit-testing and filling |
//! | [`geom`] | Points, sizes, rectangles |
//! | [`history`] | Undo/redo of paint operations |
//! | [`layer`] | Paint layers and export-time derivation |
//! | [`transform`] | Interactive and structural layer transforms |
//! | [`snap`] | Helper-line and rotation snapping |
//! | [`config`] | Host options, env/JSON loading |
//! | [`consts`] | Shared numeric constants (tolerances, defaults) |

pub mod config;
pub mod consts;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod history;
pub mod layer;
pub mod model;
pub mod path;
pub mod session;
pub mod snap;
pub mod transform;
