use super::*;

#[test]
fn identical_rects_cost_nothing() {
    let r = Rect::new(10.0, 10.0, 110.0, 60.0);
    assert_eq!(match_cost(r, r, &MorphConfig::default()), 0.0);
}

#[test]
fn cost_combines_distance_and_size() {
    let cfg = MorphConfig::default();
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let moved = Rect::new(3.0, 4.0, 13.0, 14.0);
    assert!((match_cost(a, moved, &cfg) - 25.0 * 20.0).abs() < 1e-9);

    // Same center, four times the area.
    let grown = Rect::new(-5.0, -5.0, 15.0, 15.0);
    let expected = 4.0f64.ln().powi(2) * 1000.0;
    assert!((match_cost(a, grown, &cfg) - expected).abs() < 1e-9);
}

#[test]
fn cost_is_symmetric_and_finite_for_degenerate_boxes() {
    let cfg = MorphConfig::default();
    let a = Rect::new(0.0, 0.0, 0.0, 0.0);
    let b = Rect::new(0.0, 0.0, 50.0, 20.0);
    let ab = match_cost(a, b, &cfg);
    assert!(ab.is_finite());
    assert_eq!(ab, match_cost(b, a, &cfg));
}

#[test]
fn drift_outweighs_moderate_size_changes() {
    let cfg = MorphConfig::default();
    let a = Rect::new(0.0, 0.0, 100.0, 30.0);
    let double_width_same_center = Rect::new(-50.0, 0.0, 150.0, 30.0);
    let same_size_far = Rect::new(40.0, 0.0, 140.0, 30.0);
    assert!(match_cost(a, double_width_same_center, &cfg) < match_cost(a, same_size_far, &cfg));
}

#[test]
fn orderings_break_ties_by_id() {
    use std::cmp::Ordering;
    assert_eq!(cmp_cost_then_id((1.0, "b"), (1.0, "a")), Ordering::Greater);
    assert_eq!(cmp_cost_then_id((0.5, "b"), (1.0, "a")), Ordering::Less);
    assert_eq!(cmp_area_desc_then_id((10.0, "z"), (5.0, "a")), Ordering::Less);
    assert_eq!(cmp_area_desc_then_id((5.0, "a"), (5.0, "b")), Ordering::Less);
}
