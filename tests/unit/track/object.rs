use super::*;

// Samples at frames 1 and 11: cx sweeps 0 -> 100 over one second at 10 fps.
fn tracked_pair() -> TrackedBox {
    let mut tb = TrackedBox::new();
    tb.set_base_fps(Fps::new(10, 1).unwrap());
    tb.add_box(FrameIndex(1), 0.0, 0.0, 10.0, 10.0, 0.0);
    tb.add_box(FrameIndex(11), 100.0, 0.0, 10.0, 10.0, 0.0);
    tb
}

#[test]
fn stored_frames_come_back_exactly() {
    let tb = tracked_pair();
    assert_eq!(tb.get_box(FrameIndex(1)), BBox::new(0.0, 0.0, 10.0, 10.0, 0.0));
    assert_eq!(
        tb.get_box(FrameIndex(11)),
        BBox::new(100.0, 0.0, 10.0, 10.0, 0.0)
    );
}

#[test]
fn midpoint_interpolates_linearly() {
    let tb = tracked_pair();
    assert_eq!(tb.get_box(FrameIndex(6)), BBox::new(50.0, 0.0, 10.0, 10.0, 0.0));
}

#[test]
fn interpolation_is_monotonic_between_samples() {
    let tb = tracked_pair();
    let mut prev = tb.get_box(FrameIndex(1)).cx;
    for n in 2..=11 {
        let cx = tb.get_box(FrameIndex(n)).cx;
        assert!(cx >= prev);
        prev = cx;
    }
}

#[test]
fn queries_outside_the_range_clamp() {
    let mut tb = TrackedBox::new();
    tb.set_base_fps(Fps::new(10, 1).unwrap());
    tb.add_box(FrameIndex(5), 5.0, 5.0, 10.0, 10.0, 0.0);
    tb.add_box(FrameIndex(10), 50.0, 5.0, 10.0, 10.0, 0.0);
    assert_eq!(tb.get_box(FrameIndex(1)).cx, 5.0);
    assert_eq!(tb.get_box(FrameIndex(200)).cx, 50.0);
}

#[test]
fn empty_timeline_returns_the_sentinel() {
    let tb = TrackedBox::new();
    assert_eq!(tb.get_box(FrameIndex(1)), BBox::default());
}

#[test]
fn curves_apply_even_over_the_sentinel() {
    let mut tb = TrackedBox::new();
    tb.delta_x.set_key(FrameIndex(1), 5.0);
    let b = tb.get_box(FrameIndex(1));
    assert_eq!(b.cx, 4.0); // -1 + 5
    assert_eq!(b.cy, -1.0);
}

#[test]
fn curves_compose_over_the_resolved_box() {
    let mut tb = tracked_pair();
    tb.delta_x.set_key(FrameIndex(6), 1.0);
    tb.delta_y.set_key(FrameIndex(6), -2.0);
    tb.scale_x.set_key(FrameIndex(6), 2.0);
    tb.scale_y.set_key(FrameIndex(6), 0.5);
    tb.rotation.set_key(FrameIndex(6), 45.0);

    let b = tb.get_box(FrameIndex(6));
    assert_eq!(b.cx, 51.0);
    assert_eq!(b.cy, -2.0);
    assert_eq!(b.width, 20.0);
    assert_eq!(b.height, 5.0);
    assert_eq!(b.angle, 45.0);
}

#[test]
fn add_box_overwrites_the_same_frame() {
    let mut tb = tracked_pair();
    tb.add_box(FrameIndex(11), 40.0, 0.0, 10.0, 10.0, 0.0);
    assert_eq!(tb.len(), 2);
    assert_eq!(tb.get_box(FrameIndex(11)).cx, 40.0);
}

#[test]
fn remove_box_then_contains_is_false() {
    let mut tb = tracked_pair();
    assert!(tb.contains(FrameIndex(11)));
    tb.remove_box(FrameIndex(11));
    assert!(!tb.contains(FrameIndex(11)));
    assert_eq!(tb.len(), 1);

    // Removing an absent frame is a no-op, not an error.
    tb.remove_box(FrameIndex(42));
    assert_eq!(tb.len(), 1);
}

#[test]
fn scale_points_reaims_queries_without_rekeying() {
    let mut tb = tracked_pair();
    tb.scale_points(2.0);
    // Frame 11 now maps to t = 0.5, halfway between the stored samples.
    assert_eq!(tb.get_box(FrameIndex(11)).cx, 50.0);
    // Stored keys were not rescaled: membership still uses the authored base.
    assert!(tb.contains(FrameIndex(11)));
    assert_eq!(tb.len(), 2);
}

#[test]
fn scale_points_ignores_invalid_factors() {
    let mut tb = tracked_pair();
    tb.scale_points(0.0);
    tb.scale_points(-1.0);
    tb.scale_points(f64::NAN);
    assert_eq!(tb.time_scale(), 1.0);
}

#[test]
fn clear_empties_and_forgets_the_source() {
    let mut tb = tracked_pair();
    tb.delta_x.set_key(FrameIndex(1), 3.0);
    tb.clear();
    assert!(tb.is_empty());
    assert!(tb.source_path().is_none());
    // Curves and visibility are user state and survive.
    assert_eq!(tb.delta_x.len(), 1);
    assert!(tb.visible);
}

#[test]
fn interpolate_boxes_guards_coincident_times() {
    let left = BBox::new(1.0, 1.0, 1.0, 1.0, 1.0);
    let right = BBox::new(9.0, 9.0, 9.0, 9.0, 9.0);
    assert_eq!(interpolate_boxes(0.5, 0.5, left, right, 0.5), left);
    assert_eq!(interpolate_boxes(0.8, 0.2, left, right, 0.5), left);
}

#[test]
fn get_box_is_repeatable() {
    let tb = tracked_pair();
    assert_eq!(tb.get_box(FrameIndex(7)), tb.get_box(FrameIndex(7)));
}
