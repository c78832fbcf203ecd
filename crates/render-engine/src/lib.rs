//! MotionGrid Render Engine
//!
//! Draws a motion mask and its grid overlay through a minimal drawing
//! capability, so the same code paints an egui window or records commands
//! for inspection.
//!
//! ```text
//! MotionMask ──┬── draw_image (mask spanning its own size)
//!              │
//! GridSize ────┴── MotionGrid::aggregate ── draw_rect per cell
//!                                              │
//!                                              ▼
//!                                      dyn Renderer
//!                                 (egui painter / DrawList)
//! ```

pub mod overlay;
pub mod renderer;

pub use overlay::{cell_color, draw_motion_overlay, render_grid};
pub use renderer::{DrawCommand, DrawList, Renderer, Rgba};
