use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// Stroke quad
// =============================================================

#[test]
fn stroke_quad_contains_both_endpoints() {
    let segments = [
        (pt(0.0, 0.0), pt(10.0, 0.0)),
        (pt(-5.0, 3.0), pt(7.0, -9.0)),
        (pt(2.0, 2.0), pt(2.0, 40.0)),
        (pt(100.0, 50.0), pt(-30.0, 51.0)),
    ];
    for (start, end) in segments {
        let quad = StrokeRegion::stroke_quad(start, end, 2.0).unwrap();
        assert!(quad.contains(start), "start {start:?} not in quad");
        assert!(quad.contains(end), "end {end:?} not in quad");
    }
}

#[test]
fn stroke_quad_rejects_points_beyond_half_width() {
    let start = pt(-5.0, 3.0);
    let end = pt(7.0, -9.0);
    let half = 2.0;
    let quad = StrokeRegion::stroke_quad(start, end, half).unwrap();
    let mid = (start + end) / 2.0;
    let normal = (end - start).normalize().perpendicular();

    assert!(quad.contains(mid + normal * (half - 0.01)));
    assert!(!quad.contains(mid + normal * (half + 0.01)));
    assert!(!quad.contains(mid - normal * (half + 0.01)));
}

#[test]
fn stroke_quad_has_square_ends() {
    let quad = StrokeRegion::stroke_quad(pt(0.0, 0.0), pt(10.0, 0.0), 2.0).unwrap();
    assert!(!quad.contains(pt(-0.5, 0.0)));
    assert!(!quad.contains(pt(10.5, 0.0)));
}

#[test]
fn zero_length_quad_hits_nothing() {
    let quad = StrokeRegion::stroke_quad(pt(3.0, 3.0), pt(3.0, 3.0), 5.0).unwrap();
    assert!(!quad.contains(pt(3.0, 3.0)));
    assert!(!quad.contains(pt(4.0, 3.0)));
}

#[test]
fn nan_input_fails_closed() {
    assert!(StrokeRegion::stroke_quad(pt(f64::NAN, 0.0), pt(1.0, 1.0), 2.0).is_none());
    assert!(StrokeRegion::capsule(pt(0.0, 0.0), pt(1.0, f64::NAN), 2.0).is_none());
    assert!(StrokeRegion::capsule(pt(0.0, 0.0), pt(1.0, 1.0), f64::NAN).is_none());

    let quad = StrokeRegion::stroke_quad(pt(0.0, 0.0), pt(10.0, 0.0), 2.0).unwrap();
    assert!(!quad.contains(pt(f64::NAN, 0.0)));
}

// =============================================================
// Capsule
// =============================================================

#[test]
fn capsule_has_round_caps() {
    let capsule = StrokeRegion::capsule(pt(0.0, 0.0), pt(10.0, 0.0), 2.0).unwrap();
    assert!(capsule.contains(pt(-1.9, 0.0)));
    assert!(capsule.contains(pt(11.0, 1.0)));
    assert!(!capsule.contains(pt(-2.1, 0.0)));
    // Corner of the square end lies outside the round cap.
    assert!(!capsule.contains(pt(11.9, 1.9)));
}

#[test]
fn degenerate_capsule_is_a_disc() {
    let dot = StrokeRegion::capsule(pt(5.0, 5.0), pt(5.0, 5.0), 3.0).unwrap();
    assert!(dot.contains(pt(5.0, 7.9)));
    assert!(!dot.contains(pt(5.0, 8.1)));
}

#[test]
fn capsule_outline_stays_on_boundary() {
    let start = pt(1.0, 2.0);
    let end = pt(8.0, -3.0);
    let capsule = StrokeRegion::capsule(start, end, 2.5).unwrap();
    let outline = capsule.outline();
    assert_eq!(outline.len(), 2 * (CAP_OUTLINE_SEGMENTS + 1));
    for p in outline {
        let d = distance_to_segment(p, start, end);
        assert!((d - 2.5).abs() < 1e-9, "outline point {p:?} at distance {d}");
    }
}

// =============================================================
// Rect / ellipse / polygon
// =============================================================

#[test]
fn ellipse_contains_inside_only() {
    let ellipse = StrokeRegion::Ellipse(Rect::from_corners(pt(0.0, 0.0), pt(20.0, 10.0)));
    assert!(ellipse.contains(pt(10.0, 5.0)));
    assert!(ellipse.contains(pt(19.9, 5.0)));
    assert!(!ellipse.contains(pt(1.0, 1.0)));
}

#[test]
fn flat_ellipse_contains_nothing() {
    let ellipse = StrokeRegion::Ellipse(Rect::from_corners(pt(0.0, 0.0), pt(20.0, 0.0)));
    assert!(!ellipse.contains(pt(10.0, 0.0)));
}

#[test]
fn polygon_even_odd() {
    let triangle = StrokeRegion::Polygon(vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(0.0, 10.0)]);
    assert!(triangle.contains(pt(2.0, 2.0)));
    assert!(!triangle.contains(pt(8.0, 8.0)));
}

#[test]
fn polygon_with_two_points_contains_nothing() {
    let line = StrokeRegion::Polygon(vec![pt(0.0, 0.0), pt(10.0, 0.0)]);
    assert!(!line.contains(pt(5.0, 0.0)));
}

#[test]
fn rect_outline_is_four_corners() {
    let rect = StrokeRegion::Rect(Rect::from_corners(pt(0.0, 0.0), pt(4.0, 2.0)));
    assert_eq!(rect.outline(), vec![pt(0.0, 0.0), pt(4.0, 0.0), pt(4.0, 2.0), pt(0.0, 2.0)]);
}

#[test]
fn ellipse_outline_points_lie_on_ellipse() {
    let rect = Rect::from_corners(pt(0.0, 0.0), pt(20.0, 10.0));
    for p in StrokeRegion::Ellipse(rect).outline() {
        let dx = (p.x - 10.0) / 10.0;
        let dy = (p.y - 5.0) / 5.0;
        assert!((dx * dx + dy * dy - 1.0).abs() < 1e-9);
    }
}

// =============================================================
// Bounds
// =============================================================

#[test]
fn capsule_bounds_include_caps() {
    let capsule = StrokeRegion::capsule(pt(0.0, 0.0), pt(10.0, 0.0), 2.0).unwrap();
    assert_eq!(capsule.bounds(), Some(Rect::from_corners(pt(-2.0, -2.0), pt(12.0, 2.0))));
}

#[test]
fn quad_bounds_cover_corners() {
    let quad = StrokeRegion::stroke_quad(pt(0.0, 0.0), pt(0.0, 10.0), 1.0).unwrap();
    let b = quad.bounds().unwrap();
    assert!((b.width() - 2.0).abs() < 1e-12);
    assert!((b.height() - 10.0).abs() < 1e-12);
}

#[test]
fn distance_to_segment_clamps_to_endpoints() {
    assert!((distance_to_segment(pt(-3.0, 4.0), pt(0.0, 0.0), pt(10.0, 0.0)) - 5.0).abs() < 1e-12);
    assert!((distance_to_segment(pt(5.0, 4.0), pt(0.0, 0.0), pt(10.0, 0.0)) - 4.0).abs() < 1e-12);
}
