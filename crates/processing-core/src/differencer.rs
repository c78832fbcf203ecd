//! Frame differencing.
//!
//! Each new frame is smoothed, compared against the previous smoothed frame,
//! and thresholded into a [`MotionMask`]. The smoothed frame then becomes the
//! reference for the next call.

use motiongrid_common::config::DetectionConfig;
use motiongrid_common::error::{MotionGridError, MotionGridResult};

use crate::blur::blur_3x3;
use crate::frame::{Frame, MotionMask, CHANGED, UNCHANGED};

/// Stateful consecutive-frame motion detector.
#[derive(Debug, Clone)]
pub struct FrameDifferencer {
    config: DetectionConfig,
    previous: Option<Frame>,
    frames_seen: u64,
}

impl FrameDifferencer {
    pub fn new(config: DetectionConfig) -> Self {
        Self {
            config,
            previous: None,
            frames_seen: 0,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DetectionConfig::default())
    }

    pub fn config(&self) -> DetectionConfig {
        self.config
    }

    /// The reference frame the next call will be compared against.
    pub fn previous(&self) -> Option<&Frame> {
        self.previous.as_ref()
    }

    /// Number of frames fed in since construction or the last reset.
    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }

    /// Forget the reference frame; the next call behaves like the first.
    pub fn reset(&mut self) {
        self.previous = None;
        self.frames_seen = 0;
    }

    /// Difference `current` against the stored previous frame.
    ///
    /// Returns `None` on the first call and whenever the frame size differs
    /// from the stored reference. The (smoothed) `current` frame is stored as
    /// the new reference in every case.
    pub fn compute_difference(&mut self, current: &Frame) -> Option<MotionMask> {
        let current = if self.config.blur {
            blur_3x3(current)
        } else {
            current.clone()
        };
        self.frames_seen += 1;

        let mask = match self.previous.as_ref() {
            None => None,
            Some(previous) if !previous.same_dimensions(&current) => {
                tracing::warn!(
                    previous = ?previous.dimensions(),
                    current = ?current.dimensions(),
                    "Frame size changed; restarting differencing"
                );
                None
            }
            Some(previous) => Some(threshold(
                &abs_diff_unchecked(&current, previous),
                self.config.threshold,
            )),
        };

        if let Some(mask) = mask.as_ref() {
            tracing::trace!(
                frame = self.frames_seen,
                changed = mask.changed_pixels(),
                "Computed motion mask"
            );
        }

        self.previous = Some(current);
        mask
    }
}

impl Default for FrameDifferencer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Per-pixel `|a - b|`.
pub fn abs_diff(a: &Frame, b: &Frame) -> MotionGridResult<Frame> {
    if !a.same_dimensions(b) {
        return Err(MotionGridError::processing(format!(
            "Cannot difference {:?} against {:?}",
            a.dimensions(),
            b.dimensions()
        )));
    }
    Ok(abs_diff_unchecked(a, b))
}

fn abs_diff_unchecked(a: &Frame, b: &Frame) -> Frame {
    let mut out = a.clone();
    out.pixels_mut()
        .iter_mut()
        .zip(b.pixels())
        .for_each(|(pa, &pb)| *pa = pa.abs_diff(pb));
    out
}

/// Binary threshold: values strictly above `threshold` become changed.
pub fn threshold(frame: &Frame, threshold: u8) -> MotionMask {
    let mut out = frame.clone();
    out.pixels_mut().iter_mut().for_each(|v| {
        *v = if *v > threshold { CHANGED } else { UNCHANGED };
    });
    MotionMask::from_binary_frame(out)
}
