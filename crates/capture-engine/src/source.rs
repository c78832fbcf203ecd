//! The capture boundary: a pollable source of camera frames.

use motiongrid_common::error::MotionGridResult;
use motiongrid_processing_core::Frame;

/// A camera, or anything that behaves like one.
///
/// Sources are polled once per UI tick and must never block in
/// [`check_new_frame`](CaptureSource::check_new_frame).
pub trait CaptureSource: Send {
    /// Start delivering frames.
    fn start(&mut self) -> MotionGridResult<()>;

    /// Stop delivering frames and release the device.
    fn stop(&mut self) -> MotionGridResult<()>;

    /// Whether the source is currently delivering frames.
    fn is_running(&self) -> bool;

    /// Non-blocking poll. Returns true when a frame newer than the one
    /// returned by the previous [`frame`](CaptureSource::frame) is available.
    fn check_new_frame(&mut self) -> bool;

    /// The most recent frame, if any has arrived.
    fn frame(&self) -> Option<&CameraFrame>;

    /// Runtime statistics.
    fn stats(&self) -> CaptureStats;
}

/// One captured RGBA8 image, tightly packed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
    /// Position of this frame in the capture stream, starting at 1.
    pub sequence: u64,
}

impl CameraFrame {
    /// Reduce to the single-channel intensity frame the differencer consumes.
    pub fn to_gray(&self) -> MotionGridResult<Frame> {
        Frame::from_rgba(self.width, self.height, &self.rgba)
    }
}

/// Runtime statistics from a capture source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureStats {
    /// Frames successfully received.
    pub frames_captured: u64,

    /// Samples that arrived but could not be turned into a frame.
    pub frames_dropped: u64,
}

impl CaptureStats {
    /// Drop rate as a percentage.
    pub fn drop_rate(&self) -> f64 {
        let total = self.frames_captured + self.frames_dropped;
        if total == 0 {
            return 0.0;
        }
        self.frames_dropped as f64 / total as f64 * 100.0
    }
}
