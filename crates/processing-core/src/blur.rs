//! 3x3 Gaussian smoothing.
//!
//! The kernel is the separable `[1 2 1] / 4` pair, i.e.
//!
//! ```text
//! 1 2 1
//! 2 4 2   / 16
//! 1 2 1
//! ```
//!
//! which is what a 3x3 Gaussian with an automatically derived sigma reduces
//! to. Borders are handled by reflect-101 (`gfedcb|abcdefgh|gfedcba`), so the
//! edge pixel itself is never duplicated.

use crate::frame::Frame;

const KERNEL: [u32; 3] = [1, 2, 1];
const KERNEL_SUM_SHIFT: u32 = 4;

/// Smooth a frame with the 3x3 Gaussian kernel.
pub fn blur_3x3(frame: &Frame) -> Frame {
    let (width, height) = frame.dimensions();
    if frame.is_empty() {
        return frame.clone();
    }

    // Horizontal pass keeps the unscaled sums (at most 4 * 255).
    let mut horizontal = vec![0u16; frame.pixels().len()];
    for y in 0..height {
        let row = frame.row(y);
        let out = &mut horizontal[y as usize * width as usize..][..width as usize];
        for x in 0..width as i64 {
            let acc: u32 = KERNEL
                .iter()
                .zip(-1..=1)
                .map(|(w, dx)| w * row[reflect_101(x + dx, width)] as u32)
                .sum();
            out[x as usize] = acc as u16;
        }
    }

    let stride = width as usize;
    Frame::from_fn(width, height, |x, y| {
        let acc: u32 = KERNEL
            .iter()
            .zip(-1..=1)
            .map(|(w, dy)| {
                let src_y = reflect_101(y as i64 + dy, height);
                w * horizontal[src_y * stride + x as usize] as u32
            })
            .sum();
        ((acc + (1 << (KERNEL_SUM_SHIFT - 1))) >> KERNEL_SUM_SHIFT) as u8
    })
}

/// Map a possibly out-of-range coordinate back into `0..len`.
fn reflect_101(pos: i64, len: u32) -> usize {
    let len = len as i64;
    if len == 1 {
        return 0;
    }
    let reflected = if pos < 0 {
        -pos
    } else if pos >= len {
        2 * len - pos - 2
    } else {
        pos
    };
    reflected.clamp(0, len - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_frame_is_unchanged() {
        let frame = Frame::filled(7, 5, 133);
        assert_eq!(blur_3x3(&frame), frame);
    }

    #[test]
    fn interior_spike_spreads_by_kernel_weights() {
        let frame = Frame::from_fn(5, 5, |x, y| if (x, y) == (2, 2) { 255 } else { 0 });
        let blurred = blur_3x3(&frame);

        assert_eq!(blurred.get(2, 2), 64); // 255 * 4/16
        assert_eq!(blurred.get(1, 2), 32); // 255 * 2/16
        assert_eq!(blurred.get(2, 3), 32);
        assert_eq!(blurred.get(1, 1), 16); // 255 * 1/16
        assert_eq!(blurred.get(0, 0), 0);
    }

    #[test]
    fn corner_spike_reflects_without_duplicating_edge() {
        let frame = Frame::from_fn(4, 4, |x, y| if (x, y) == (0, 0) { 255 } else { 0 });
        let blurred = blur_3x3(&frame);

        assert_eq!(blurred.get(0, 0), 64);
        assert_eq!(blurred.get(1, 0), 32);
        assert_eq!(blurred.get(0, 1), 32);
        assert_eq!(blurred.get(1, 1), 16);
        assert_eq!(blurred.get(2, 0), 0);
    }

    #[test]
    fn single_pixel_frame_survives() {
        let frame = Frame::filled(1, 1, 200);
        assert_eq!(blur_3x3(&frame).get(0, 0), 200);
    }

    #[test]
    fn empty_frame_stays_empty() {
        let frame = Frame::filled(0, 0, 0);
        assert!(blur_3x3(&frame).is_empty());
    }

    #[test]
    fn reflect_101_mirrors_around_edges() {
        assert_eq!(reflect_101(-1, 4), 1);
        assert_eq!(reflect_101(4, 4), 2);
        assert_eq!(reflect_101(2, 4), 2);
        assert_eq!(reflect_101(-1, 1), 0);
        assert_eq!(reflect_101(1, 2), 1);
        assert_eq!(reflect_101(2, 2), 0);
    }
}
