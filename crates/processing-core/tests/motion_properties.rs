use motiongrid_common::config::DetectionConfig;
use motiongrid_processing_core::{Frame, FrameDifferencer, GridSize, MotionGrid, MotionMask};
use proptest::prelude::*;

fn arb_frame() -> impl Strategy<Value = Frame> {
    (1u32..24, 1u32..24).prop_flat_map(|(w, h)| {
        proptest::collection::vec(any::<u8>(), (w * h) as usize)
            .prop_map(move |pixels| Frame::new(w, h, pixels).unwrap())
    })
}

proptest! {
    #[test]
    fn identical_frames_never_register_motion(frame in arb_frame(), blur in any::<bool>()) {
        let mut diff = FrameDifferencer::new(DetectionConfig { threshold: 25, blur });
        prop_assert!(diff.compute_difference(&frame).is_none());
        let mask = diff.compute_difference(&frame).unwrap();
        prop_assert_eq!(mask.changed_pixels(), 0);
        prop_assert_eq!(mask.dimensions(), frame.dimensions());
    }

    #[test]
    fn unblurred_single_pixel_change_above_threshold_is_isolated(
        frame in arb_frame(),
        px in any::<prop::sample::Index>(),
        delta in 26u8..=255,
    ) {
        let (w, h) = frame.dimensions();
        let idx = px.index((w * h) as usize) as u32;
        let (x, y) = (idx % w, idx / w);

        let mut changed = frame.clone();
        let old = frame.get(x, y);
        let new = if old as u16 + delta as u16 <= 255 { old + delta } else { old - delta.min(old) };
        prop_assume!(old.abs_diff(new) > 25);
        changed.set(x, y, new);

        let mut diff = FrameDifferencer::new(DetectionConfig { threshold: 25, blur: false });
        diff.compute_difference(&frame);
        let mask = diff.compute_difference(&changed).unwrap();

        prop_assert!(mask.is_changed(x, y));
        prop_assert_eq!(mask.changed_pixels(), 1);
    }

    #[test]
    fn blurred_interior_change_is_marked(
        (frame, x, y) in (3u32..24, 3u32..24).prop_flat_map(|(w, h)| {
            (
                proptest::collection::vec(any::<u8>(), (w * h) as usize)
                    .prop_map(move |pixels| Frame::new(w, h, pixels).unwrap()),
                1..w - 1,
                1..h - 1,
            )
        }),
        delta in 108u8..=128,
    ) {
        // The center tap carries 4/16 of the kernel, so a change of 108 or
        // more still moves the blurred pixel by at least 27.
        let old = frame.get(x, y);
        let new = if old <= 127 { old + delta } else { old - delta };
        let mut changed = frame.clone();
        changed.set(x, y, new);

        let mut diff = FrameDifferencer::new(DetectionConfig { threshold: 25, blur: true });
        diff.compute_difference(&frame);
        let mask = diff.compute_difference(&changed).unwrap();

        prop_assert!(mask.is_changed(x, y));
    }

    #[test]
    fn mask_always_matches_frame_dimensions(a in arb_frame(), seed in any::<u8>()) {
        let b = Frame::from_fn(a.width(), a.height(), |x, y| seed.wrapping_add((x ^ y) as u8));
        let mut diff = FrameDifferencer::with_defaults();
        diff.compute_difference(&a);
        let mask = diff.compute_difference(&b).unwrap();
        prop_assert_eq!(mask.dimensions(), a.dimensions());
    }

    #[test]
    fn empty_mask_gives_zero_intensity_everywhere(w in 0u32..200, h in 0u32..200, n in 1u32..=30) {
        let mask = MotionMask::filled(w, h, false);
        let grid = MotionGrid::aggregate(&mask, GridSize::new(n).unwrap());
        prop_assert!(grid.cells().iter().all(|c| c.sum == 0 && c.intensity == 0.0));
    }

    #[test]
    fn full_mask_divisible_by_ten_scales_with_cell_area(cw in 1u32..12, ch in 1u32..12) {
        let mask = MotionMask::filled(cw * 10, ch * 10, true);
        let grid = MotionGrid::aggregate(&mask, GridSize::new(10).unwrap());

        prop_assert_eq!(grid.cells().len(), 100);
        let expected = (cw * ch) as f32 / 100.0;
        for cell in grid.cells() {
            prop_assert_eq!(cell.sum, (cw * ch * 255) as u64);
            prop_assert!((cell.intensity - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn cell_sums_cover_exactly_the_tiled_region(
        w in 1u32..90,
        h in 1u32..90,
        n in 1u32..=12,
        salt in any::<u32>(),
    ) {
        let mask = MotionMask::from_fn(w, h, |x, y| (x.wrapping_mul(31) ^ y.wrapping_mul(17) ^ salt) % 3 == 0);
        let grid = MotionGrid::aggregate(&mask, GridSize::new(n).unwrap());
        let covered = grid.covered();

        let mut expected = 0u64;
        for y in 0..covered.height {
            for x in 0..covered.width {
                if mask.is_changed(x, y) {
                    expected += 255;
                }
            }
        }
        let total: u64 = grid.cells().iter().map(|c| c.sum).sum();
        prop_assert_eq!(total, expected);
    }
}
