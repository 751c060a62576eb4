#![allow(clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn two_point(mode: PaintMode) -> PaintedModel {
    PaintedModel::new(mode, vec![Some(pt(0.0, 0.0)), Some(pt(10.0, 5.0))], &PaintStyle::default())
}

// =============================================================
// PaintMode
// =============================================================

#[test]
fn two_point_modes() {
    for mode in [
        PaintMode::Line,
        PaintMode::Rect,
        PaintMode::Circle,
        PaintMode::Arrow,
        PaintMode::DashLine,
        PaintMode::Blur,
        PaintMode::Pixelate,
    ] {
        assert!(mode.is_two_point(), "{mode:?}");
    }
    for mode in [PaintMode::FreeStyle, PaintMode::Polygon, PaintMode::Eraser, PaintMode::MoveAndZoom] {
        assert!(!mode.is_two_point(), "{mode:?}");
    }
}

#[test]
fn censor_and_procedural_modes() {
    assert!(PaintMode::Blur.is_censor());
    assert!(PaintMode::Pixelate.is_censor());
    assert!(!PaintMode::Rect.is_censor());
    assert!(PaintMode::Eraser.is_procedural());
    assert!(PaintMode::MoveAndZoom.is_procedural());
    assert!(!PaintMode::Polygon.is_procedural());
}

#[test]
fn default_mode_is_free_style() {
    assert_eq!(PaintMode::default(), PaintMode::FreeStyle);
}

#[test]
fn mode_serializes_camel_case() {
    assert_eq!(serde_json::to_string(&PaintMode::DashLine).unwrap(), "\"dashLine\"");
    assert_eq!(serde_json::to_string(&PaintMode::MoveAndZoom).unwrap(), "\"moveAndZoom\"");
    let mode: PaintMode = serde_json::from_str("\"pixelate\"").unwrap();
    assert_eq!(mode, PaintMode::Pixelate);
}

// =============================================================
// PaintedModel
// =============================================================

#[test]
fn new_copies_style_and_clamps_opacity() {
    let style = PaintStyle { color: 0xFF11_2233, stroke_width: 7.0, fill: true, opacity: 3.0 };
    let m = PaintedModel::new(PaintMode::Rect, vec![Some(pt(0.0, 0.0)), Some(pt(1.0, 1.0))], &style);
    assert_eq!(m.color, 0xFF11_2233);
    assert_eq!(m.stroke_width, 7.0);
    assert!(m.fill);
    assert_eq!(m.opacity, 1.0);

    let faded = PaintedModel::new(PaintMode::Line, vec![], &PaintStyle { opacity: -1.0, ..style });
    assert_eq!(faded.opacity, 0.0);
}

#[test]
fn two_point_models_need_exactly_two_points() {
    assert!(two_point(PaintMode::Line).is_well_formed());

    let style = PaintStyle::default();
    let one = PaintedModel::new(PaintMode::Line, vec![Some(pt(0.0, 0.0))], &style);
    assert!(!one.is_well_formed());

    let with_gap = PaintedModel::new(PaintMode::Rect, vec![Some(pt(0.0, 0.0)), None], &style);
    assert!(!with_gap.is_well_formed());

    let three = PaintedModel::new(
        PaintMode::Circle,
        vec![Some(pt(0.0, 0.0)), Some(pt(1.0, 0.0)), Some(pt(2.0, 0.0))],
        &style,
    );
    assert!(!three.is_well_formed());
}

#[test]
fn free_style_needs_one_point() {
    let style = PaintStyle::default();
    assert!(PaintedModel::new(PaintMode::FreeStyle, vec![Some(pt(1.0, 1.0)), None], &style).is_well_formed());
    assert!(!PaintedModel::new(PaintMode::FreeStyle, vec![None], &style).is_well_formed());
    assert!(!PaintedModel::new(PaintMode::FreeStyle, vec![], &style).is_well_formed());
}

#[test]
fn procedural_models_are_malformed() {
    let m = PaintedModel::new(PaintMode::Eraser, vec![Some(pt(0.0, 0.0)), Some(pt(1.0, 1.0))], &PaintStyle::default());
    assert!(!m.is_well_formed());
}

#[test]
fn points_skip_segment_breaks() {
    let m = PaintedModel::new(
        PaintMode::FreeStyle,
        vec![Some(pt(0.0, 0.0)), None, Some(pt(2.0, 2.0))],
        &PaintStyle::default(),
    );
    assert_eq!(m.points().collect::<Vec<_>>(), vec![pt(0.0, 0.0), pt(2.0, 2.0)]);
    assert_eq!(m.bounds(), Some(Rect::from_corners(pt(0.0, 0.0), pt(2.0, 2.0))));
}

#[test]
fn endpoints_of_two_point_model() {
    assert_eq!(two_point(PaintMode::Arrow).endpoints(), Some((pt(0.0, 0.0), pt(10.0, 5.0))));
    let m = PaintedModel::new(PaintMode::FreeStyle, vec![Some(pt(0.0, 0.0))], &PaintStyle::default());
    assert_eq!(m.endpoints(), None);
}

#[test]
fn stroke_only_depends_on_fill() {
    assert!(two_point(PaintMode::Line).is_stroke_only());
    assert!(two_point(PaintMode::Rect).is_stroke_only());

    let filled = PaintStyle { fill: true, ..PaintStyle::default() };
    let rect = PaintedModel::new(PaintMode::Rect, vec![Some(pt(0.0, 0.0)), Some(pt(1.0, 1.0))], &filled);
    assert!(!rect.is_stroke_only());
    // Lines ignore fill.
    let line = PaintedModel::new(PaintMode::Line, vec![Some(pt(0.0, 0.0)), Some(pt(1.0, 1.0))], &filled);
    assert!(line.is_stroke_only());

    assert!(!two_point(PaintMode::Blur).is_stroke_only());
}

#[test]
fn model_json_uses_camel_case_and_null_breaks() {
    let m = PaintedModel::new(PaintMode::FreeStyle, vec![Some(pt(1.0, 2.0)), None], &PaintStyle::default());
    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(json["mode"], "freeStyle");
    assert_eq!(json["strokeWidth"], 3.0);
    assert!(json["offsets"][1].is_null());
    assert_eq!(json["offsets"][0]["x"], 1.0);

    let back: PaintedModel = serde_json::from_value(json).unwrap();
    assert_eq!(back, m);
}

// =============================================================
// PaintItem
// =============================================================

#[test]
fn items_get_unique_ids() {
    let a = PaintItem::new(two_point(PaintMode::Line));
    let b = PaintItem::new(two_point(PaintMode::Line));
    assert_ne!(a.id, b.id);
    assert_eq!(a.model, b.model);
}
