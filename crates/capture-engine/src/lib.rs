//! MotionGrid Capture Engine
//!
//! Delivers live camera frames to the UI thread without blocking it.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────┐
//! │                 GstCameraSource                    │
//! │  v4l2src / ksvideosrc / avfvideosrc                │
//! │        │                                           │
//! │        ▼                                           │
//! │  videoconvert ! videoscale ! videorate (RGBA)      │
//! │        │                                           │
//! │        ▼                                           │
//! │  appsink (max-buffers=1, drop=true)                │
//! └────────┬──────────────────────────────────────────┘
//!          │ check_new_frame() / frame()   (per UI tick)
//!          ▼
//!     CameraFrame ──to_gray()──▶ Frame
//! ```

pub mod camera;
pub mod device;
pub mod source;

pub use camera::GstCameraSource;
pub use source::{CameraFrame, CaptureSource, CaptureStats};

use motiongrid_common::config::CaptureConfig;
use motiongrid_common::error::MotionGridResult;

/// Open and start the configured camera.
pub fn start_camera(config: &CaptureConfig) -> MotionGridResult<Box<dyn CaptureSource>> {
    let mut camera = GstCameraSource::open(config)?;
    camera.start()?;
    Ok(Box::new(camera))
}
