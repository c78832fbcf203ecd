//! Per-tick application state, independent of any window toolkit.

use motiongrid_capture_engine::{CaptureSource, CaptureStats};
use motiongrid_common::config::AppConfig;
use motiongrid_common::error::MotionGridResult;
use motiongrid_processing_core::{FrameDifferencer, GridSize, MotionGrid, MotionMask};
use motiongrid_render_engine::{draw_motion_overlay, Renderer};

use crate::input::{KeyAction, KeyBindings};

/// Owns the capture source, the differencer and the current grid size.
pub struct MotionShell {
    capture: Option<Box<dyn CaptureSource>>,
    differencer: FrameDifferencer,
    mask: Option<MotionMask>,
    grid_size: GridSize,
    bindings: KeyBindings,
    last_sequence: Option<u64>,
}

impl MotionShell {
    /// A missing capture source is allowed; the shell then draws nothing.
    pub fn new(
        config: &AppConfig,
        capture: Option<Box<dyn CaptureSource>>,
    ) -> MotionGridResult<Self> {
        Ok(Self {
            capture,
            differencer: FrameDifferencer::new(config.detection),
            mask: None,
            grid_size: GridSize::new(config.grid.default_cells)?,
            bindings: KeyBindings::from_config(&config.grid)?,
            last_sequence: None,
        })
    }

    pub fn grid_size(&self) -> GridSize {
        self.grid_size
    }

    pub fn set_grid_size(&mut self, size: GridSize) {
        if size != self.grid_size {
            tracing::info!(from = %self.grid_size, to = %size, "Grid size changed");
            self.grid_size = size;
        }
    }

    pub fn mask(&self) -> Option<&MotionMask> {
        self.mask.as_ref()
    }

    pub fn has_capture(&self) -> bool {
        self.capture.is_some()
    }

    pub fn capture_stats(&self) -> Option<CaptureStats> {
        self.capture.as_ref().map(|c| c.stats())
    }

    /// Frames handed to the differencer so far.
    pub fn frames_processed(&self) -> u64 {
        self.differencer.frames_seen()
    }

    /// React to one typed character.
    pub fn handle_key(&mut self, ch: char) -> KeyAction {
        let action = self.bindings.action_for(ch);
        match action {
            KeyAction::SelectGrid(size) => self.set_grid_size(size),
            KeyAction::Reserved => tracing::debug!("Reserved key pressed"),
            KeyAction::Ignored => {}
        }
        action
    }

    /// Poll capture and, when a new frame arrived, difference it against
    /// the previous one. Returns whether the mask was recomputed.
    ///
    /// Without a new frame the previous mask is kept as-is.
    pub fn update(&mut self) -> bool {
        let Some(capture) = self.capture.as_mut() else {
            return false;
        };
        if !capture.check_new_frame() {
            return false;
        }
        let Some(frame) = capture.frame() else {
            return false;
        };

        if let Some(last) = self.last_sequence {
            if frame.sequence > last + 1 {
                let skipped = frame.sequence - last - 1;
                tracing::trace!(skipped, "Camera frames skipped");
            }
        }
        self.last_sequence = Some(frame.sequence);

        let gray = match frame.to_gray() {
            Ok(gray) => gray,
            Err(e) => {
                tracing::warn!(error = %e, sequence = frame.sequence, "Dropping unusable frame");
                return false;
            }
        };
        self.mask = self.differencer.compute_difference(&gray);
        true
    }

    /// Draw the current mask and grid. Draws nothing before the second
    /// frame has been differenced.
    pub fn draw(&self, renderer: &mut dyn Renderer) -> Option<MotionGrid> {
        let mask = self.mask.as_ref()?;
        Some(draw_motion_overlay(mask, self.grid_size, renderer))
    }
}
