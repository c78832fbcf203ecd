//! [`Renderer`] backed by an egui painter.

use eframe::egui::{self, Color32, ColorImage, Pos2, Rect, TextureHandle, TextureOptions};
use motiongrid_processing_core::{MotionMask, PixelRect};
use motiongrid_render_engine::{Renderer, Rgba};

const MASK_TEXTURE_NAME: &str = "motion-mask";

/// Maps mask pixel coordinates into a screen area, keeping aspect ratio.
pub struct EguiRenderer<'a> {
    ctx: &'a egui::Context,
    painter: &'a egui::Painter,
    texture: &'a mut Option<TextureHandle>,
    origin: Pos2,
    scale: f32,
}

impl<'a> EguiRenderer<'a> {
    /// Fit content of `content` pixels into `area`, anchored top-left.
    pub fn fit(
        ctx: &'a egui::Context,
        painter: &'a egui::Painter,
        texture: &'a mut Option<TextureHandle>,
        area: Rect,
        content: (u32, u32),
    ) -> Self {
        Self {
            ctx,
            painter,
            texture,
            origin: area.min,
            scale: fit_scale(area.size(), content),
        }
    }

    fn to_screen(&self, rect: PixelRect) -> Rect {
        let min = self.origin + egui::vec2(rect.x as f32, rect.y as f32) * self.scale;
        let size = egui::vec2(rect.width as f32, rect.height as f32) * self.scale;
        Rect::from_min_size(min, size)
    }
}

impl Renderer for EguiRenderer<'_> {
    fn draw_rect(&mut self, rect: PixelRect, color: Rgba) {
        let [r, g, b, a] = color.to_rgba8();
        self.painter.rect_filled(
            self.to_screen(rect),
            0.0,
            Color32::from_rgba_unmultiplied(r, g, b, a),
        );
    }

    fn draw_image(&mut self, mask: &MotionMask) {
        let (width, height) = mask.dimensions();
        let image = ColorImage::from_gray(
            [width as usize, height as usize],
            mask.as_frame().pixels(),
        );

        let texture = match self.texture.take() {
            Some(mut texture) => {
                texture.set(image, TextureOptions::NEAREST);
                texture
            }
            None => self
                .ctx
                .load_texture(MASK_TEXTURE_NAME, image, TextureOptions::NEAREST),
        };
        let texture_id = texture.id();
        *self.texture = Some(texture);

        let uv = Rect::from_min_max(Pos2::ZERO, egui::pos2(1.0, 1.0));
        self.painter.image(
            texture_id,
            self.to_screen(PixelRect::new(0, 0, width, height)),
            uv,
            Color32::WHITE,
        );
    }
}

/// Largest uniform scale that keeps `content` inside `available`.
fn fit_scale(available: egui::Vec2, content: (u32, u32)) -> f32 {
    let (width, height) = content;
    if width == 0 || height == 0 {
        return 1.0;
    }
    (available.x / width as f32)
        .min(available.y / height as f32)
        .max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_fits_limiting_axis() {
        assert_eq!(fit_scale(egui::vec2(640.0, 480.0), (640, 480)), 1.0);
        assert_eq!(fit_scale(egui::vec2(1280.0, 480.0), (640, 480)), 1.0);
        assert_eq!(fit_scale(egui::vec2(320.0, 480.0), (640, 480)), 0.5);
    }

    #[test]
    fn empty_content_keeps_unit_scale() {
        assert_eq!(fit_scale(egui::vec2(100.0, 100.0), (0, 10)), 1.0);
    }
}
