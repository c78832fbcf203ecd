//! Motion mask and grid overlay drawing.

use motiongrid_processing_core::{GridSize, MotionGrid, MotionMask};

use crate::renderer::{Renderer, Rgba};

/// Color of a grid cell: intensity drives the red channel over full blue,
/// so quiet cells are blue and busy cells shift toward magenta.
pub fn cell_color(intensity: f32) -> Rgba {
    Rgba::new(intensity.clamp(0.0, 1.0), 0.0, 1.0, 1.0)
}

/// Aggregate `mask` on an `size x size` grid and fill every cell.
///
/// Geometry comes from the mask alone. The remainder strip on the right and
/// bottom is left untouched. Returns the aggregation for callers that want
/// to inspect it.
pub fn render_grid<R>(mask: &MotionMask, size: GridSize, renderer: &mut R) -> MotionGrid
where
    R: Renderer + ?Sized,
{
    let grid = MotionGrid::aggregate(mask, size);
    for cell in grid.cells() {
        renderer.draw_rect(cell.rect, cell_color(cell.intensity));
    }

    let hottest = grid.hottest().map(|c| (c.column, c.row, c.intensity));
    tracing::trace!(
        grid = %size,
        cells = grid.cells().len(),
        cell_width = grid.cell_width(),
        cell_height = grid.cell_height(),
        ?hottest,
        "Rendered motion grid"
    );
    grid
}

/// Draw the mask image, then the grid on top of it.
pub fn draw_motion_overlay<R>(mask: &MotionMask, size: GridSize, renderer: &mut R) -> MotionGrid
where
    R: Renderer + ?Sized,
{
    renderer.draw_image(mask);
    render_grid(mask, size, renderer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, DrawList};
    use motiongrid_processing_core::PixelRect;

    #[test]
    fn color_saturates_red_and_keeps_blue() {
        assert_eq!(cell_color(0.0), Rgba::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(cell_color(0.25).r, 0.25);
        assert_eq!(cell_color(30.72).r, 1.0);
    }

    #[test]
    fn overlay_draws_image_before_cells() {
        let mask = MotionMask::filled(20, 20, false);
        let mut list = DrawList::new();
        draw_motion_overlay(&mask, GridSize::new(2).unwrap(), &mut list);

        assert!(matches!(
            list.commands()[0],
            DrawCommand::Image {
                width: 20,
                height: 20
            }
        ));
        assert_eq!(list.commands().len(), 5);
    }

    #[test]
    fn remainder_is_never_drawn() {
        let mask = MotionMask::filled(25, 13, true);
        let mut list = DrawList::new();
        render_grid(&mask, GridSize::new(2).unwrap(), &mut list);

        let max_right = list.rects().map(|(r, _)| r.right()).max().unwrap();
        let max_bottom = list.rects().map(|(r, _)| r.bottom()).max().unwrap();
        assert_eq!((max_right, max_bottom), (24, 12));
    }

    #[test]
    fn renders_through_trait_object() {
        let mask = MotionMask::filled(10, 10, false);
        let mut list = DrawList::new();
        let renderer: &mut dyn Renderer = &mut list;
        render_grid(&mask, GridSize::new(5).unwrap(), renderer);
        assert_eq!(list.rects().count(), 25);
        assert_eq!(list.rects().next().unwrap().0, PixelRect::new(0, 0, 2, 2));
    }
}
