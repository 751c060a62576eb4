use super::*;
use crate::geom::Point;
use crate::model::{PaintMode, PaintStyle, PaintedModel};

fn item(x: f64) -> PaintItem {
    PaintItem::new(PaintedModel::new(
        PaintMode::Line,
        vec![Some(Point::new(x, 0.0)), Some(Point::new(x + 10.0, 0.0))],
        &PaintStyle::default(),
    ))
}

fn ids(history: &PaintHistory) -> Vec<LayerId> {
    history.items().iter().map(|i| i.id).collect()
}

// =============================================================
// Push / undo / redo
// =============================================================

#[test]
fn new_history_is_empty() {
    let h = PaintHistory::new(10);
    assert!(h.is_empty());
    assert!(!h.can_undo());
    assert!(!h.can_redo());
}

#[test]
fn push_appends_in_order() {
    let mut h = PaintHistory::new(10);
    let (a, b) = (item(0.0), item(1.0));
    h.push(a.clone());
    h.push(b.clone());
    assert_eq!(ids(&h), vec![a.id, b.id]);
    assert_eq!(h.get(&b.id), Some(&b));
}

#[test]
fn undo_then_redo_restores_item() {
    let mut h = PaintHistory::new(10);
    let a = item(0.0);
    h.push(a.clone());

    assert!(h.undo());
    assert!(h.is_empty());
    assert!(h.can_redo());

    assert!(h.redo());
    assert_eq!(ids(&h), vec![a.id]);
    assert!(!h.can_redo());
}

#[test]
fn undo_on_empty_history_is_noop() {
    let mut h = PaintHistory::new(10);
    assert!(!h.undo());
    assert!(!h.redo());
}

#[test]
fn push_clears_redo() {
    let mut h = PaintHistory::new(10);
    h.push(item(0.0));
    h.undo();
    h.push(item(1.0));
    assert!(!h.can_redo());
    assert!(!h.redo());
}

// =============================================================
// Remove
// =============================================================

#[test]
fn remove_is_undoable_and_restores_positions() {
    let mut h = PaintHistory::new(10);
    let (a, b, c, d) = (item(0.0), item(1.0), item(2.0), item(3.0));
    for i in [&a, &b, &c, &d] {
        h.push(i.clone());
    }

    let removed = h.remove(&[d.id, b.id]);
    assert_eq!(removed, vec![b.id, d.id]);
    assert_eq!(ids(&h), vec![a.id, c.id]);

    assert!(h.undo());
    assert_eq!(ids(&h), vec![a.id, b.id, c.id, d.id]);

    assert!(h.redo());
    assert_eq!(ids(&h), vec![a.id, c.id]);
}

#[test]
fn remove_unknown_ids_records_nothing() {
    let mut h = PaintHistory::new(10);
    h.push(item(0.0));
    let removed = h.remove(&[uuid::Uuid::new_v4()]);
    assert!(removed.is_empty());
    assert_eq!(h.len(), 1);

    // The only undo step is still the push.
    assert!(h.undo());
    assert!(!h.undo());
}

// =============================================================
// Limit
// =============================================================

#[test]
fn limit_evicts_oldest_step() {
    let mut h = PaintHistory::new(2);
    let (a, b, c) = (item(0.0), item(1.0), item(2.0));
    h.push(a.clone());
    h.push(b);
    h.push(c);

    assert!(h.undo());
    assert!(h.undo());
    assert!(!h.undo());
    // The evicted push is permanent.
    assert_eq!(ids(&h), vec![a.id]);
}

#[test]
fn zero_limit_is_unbounded() {
    let mut h = PaintHistory::new(0);
    for k in 0..500 {
        h.push(item(f64::from(k)));
    }
    let mut undone = 0;
    while h.undo() {
        undone += 1;
    }
    assert_eq!(undone, 500);
    assert!(h.is_empty());
}

#[test]
fn clear_drops_everything() {
    let mut h = PaintHistory::new(10);
    h.push(item(0.0));
    h.push(item(1.0));
    h.undo();
    h.clear();
    assert!(h.is_empty());
    assert!(!h.can_undo());
    assert!(!h.can_redo());
}
