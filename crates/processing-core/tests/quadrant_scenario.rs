//! Two synthetic 4x4 frames, one pixel flipped from black to white, blurred,
//! thresholded at 25 and aggregated on a 2x2 grid.
//!
//! Only a corner pixel keeps its blur footprint inside a single quadrant. An
//! interior pixel spreads into its neighbors' quadrants, so "exactly one lit
//! quadrant" holds for corners and not in general.

use motiongrid_processing_core::{Frame, FrameDifferencer, GridSize, MotionGrid};

fn frames_with_changed_pixel(x: u32, y: u32) -> (Frame, Frame) {
    let before = Frame::filled(4, 4, 0);
    let mut after = before.clone();
    after.set(x, y, 255);
    (before, after)
}

#[test]
fn corner_change_lights_only_its_quadrant() {
    let (before, after) = frames_with_changed_pixel(0, 0);
    let mut diff = FrameDifferencer::with_defaults();

    assert!(diff.compute_difference(&before).is_none());
    let mask = diff
        .compute_difference(&after)
        .expect("second frame should produce a mask");

    // Blur spreads the spike to (1,0) and (0,1) at 32 > 25; (1,1) only reaches 16.
    assert!(mask.is_changed(0, 0));
    assert!(mask.is_changed(1, 0));
    assert!(mask.is_changed(0, 1));
    assert!(!mask.is_changed(1, 1));
    assert_eq!(mask.changed_pixels(), 3);

    let grid = MotionGrid::aggregate(&mask, GridSize::new(2).unwrap());
    let lit: Vec<_> = grid
        .cells()
        .iter()
        .filter(|c| c.intensity > 0.0)
        .map(|c| (c.column, c.row))
        .collect();
    assert_eq!(lit, vec![(0, 0)]);

    let hot = grid.cell(0, 0).unwrap();
    assert_eq!(hot.sum, 3 * 255);
    assert!((hot.intensity - 0.75).abs() < 1e-6);
}

#[test]
fn opposite_corner_lights_the_opposite_quadrant() {
    let (before, after) = frames_with_changed_pixel(3, 3);
    let mut diff = FrameDifferencer::with_defaults();
    diff.compute_difference(&before);
    let mask = diff.compute_difference(&after).unwrap();

    let grid = MotionGrid::aggregate(&mask, GridSize::new(2).unwrap());
    let lit: Vec<_> = grid
        .cells()
        .iter()
        .filter(|c| c.sum > 0)
        .map(|c| (c.column, c.row))
        .collect();
    assert_eq!(lit, vec![(1, 1)]);
}

#[test]
fn interior_change_bleeds_across_quadrants() {
    let (before, after) = frames_with_changed_pixel(1, 1);
    let mut diff = FrameDifferencer::with_defaults();
    diff.compute_difference(&before);
    let mask = diff.compute_difference(&after).unwrap();

    let grid = MotionGrid::aggregate(&mask, GridSize::new(2).unwrap());
    assert!(grid.cell(0, 0).unwrap().sum > 0);
    assert!(grid.cells().iter().filter(|c| c.sum > 0).count() > 1);
}
