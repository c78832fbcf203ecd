//! The drawing capability the overlay depends on.

use motiongrid_processing_core::{MotionMask, PixelRect};

/// Linear RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Quantize to 8 bits per channel, clamping out-of-range components.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// Something that can paint in mask pixel coordinates.
pub trait Renderer {
    /// Fill `rect` with a flat color.
    fn draw_rect(&mut self, rect: PixelRect, color: Rgba);

    /// Draw the mask as a grayscale image anchored at the origin, one
    /// mask pixel per unit.
    fn draw_image(&mut self, mask: &MotionMask);
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect { rect: PixelRect, color: Rgba },
    Image { width: u32, height: u32 },
}

/// Renderer that records commands instead of painting.
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded rectangles in draw order.
    pub fn rects(&self) -> impl Iterator<Item = (PixelRect, Rgba)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Rect { rect, color } => Some((*rect, *color)),
            DrawCommand::Image { .. } => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Renderer for DrawList {
    fn draw_rect(&mut self, rect: PixelRect, color: Rgba) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn draw_image(&mut self, mask: &MotionMask) {
        let (width, height) = mask.dimensions();
        self.commands.push(DrawCommand::Image { width, height });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba8_clamps_and_rounds() {
        assert_eq!(Rgba::new(2.5, -1.0, 0.5, 1.0).to_rgba8(), [255, 0, 128, 255]);
        assert_eq!(Rgba::BLACK.to_rgba8(), [0, 0, 0, 255]);
    }

    #[test]
    fn draw_list_records_in_order() {
        let mut list = DrawList::new();
        list.draw_image(&MotionMask::filled(8, 6, false));
        list.draw_rect(PixelRect::new(0, 0, 4, 3), Rgba::BLACK);

        assert_eq!(
            list.commands()[0],
            DrawCommand::Image {
                width: 8,
                height: 6
            }
        );
        assert_eq!(list.rects().count(), 1);
        assert!(!list.is_empty());
    }
}
