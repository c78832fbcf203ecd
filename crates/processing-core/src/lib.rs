//! MotionGrid Processing Core
//!
//! Turns a stream of camera frames into per-cell motion intensities:
//! - **Frames:** grayscale frames and binary motion masks
//! - **Blur:** 3x3 Gaussian smoothing against sensor noise
//! - **Differencing:** consecutive-frame absolute difference and threshold
//! - **Motion Grid:** `N x N` aggregation of a motion mask
//!
//! This crate is pure computation: no I/O, no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod blur;
pub mod differencer;
pub mod frame;
pub mod motion_grid;

pub use differencer::FrameDifferencer;
pub use frame::{Frame, MotionMask};
pub use motion_grid::{GridCell, GridSize, MotionGrid, PixelRect};
