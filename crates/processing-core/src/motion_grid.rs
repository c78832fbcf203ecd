//! Grid aggregation of a motion mask.
//!
//! The mask is split into `N x N` equal cells of `floor(width / N)` by
//! `floor(height / N)` pixels. Pixels in the right and bottom remainder
//! strips belong to no cell and are never counted.

use std::num::NonZeroU32;

use motiongrid_common::error::{MotionGridError, MotionGridResult};

use crate::frame::{MotionMask, CHANGED};

/// Number of grid cells per side. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridSize(NonZeroU32);

impl GridSize {
    /// Cells per side when nothing else is configured.
    pub const DEFAULT_CELLS: u32 = 10;

    pub fn new(cells: u32) -> MotionGridResult<Self> {
        NonZeroU32::new(cells)
            .map(Self)
            .ok_or(MotionGridError::InvalidGridSize { cells })
    }

    pub fn cells(self) -> u32 {
        self.0.get()
    }

    /// Divisor used to normalize a cell's raw sum: `N * N * 255`.
    ///
    /// Independent of the cell's pixel count, so the result is a display
    /// scale and not a fraction of changed pixels.
    pub fn normalization_divisor(self) -> f64 {
        let n = self.cells() as f64;
        n * n * CHANGED as f64
    }
}

const DEFAULT_GRID: NonZeroU32 = match NonZeroU32::new(GridSize::DEFAULT_CELLS) {
    Some(cells) => cells,
    None => panic!("default grid size must be non-zero"),
};

impl Default for GridSize {
    fn default() -> Self {
        Self(DEFAULT_GRID)
    }
}

impl TryFrom<u32> for GridSize {
    type Error = MotionGridError;

    fn try_from(cells: u32) -> MotionGridResult<Self> {
        Self::new(cells)
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{0}x{0}", self.cells())
    }
}

/// Axis-aligned rectangle in mask pixel coordinates, half-open on the
/// right and bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Aggregated motion for one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub column: u32,
    pub row: u32,
    pub rect: PixelRect,
    /// Sum of mask values in the cell (255 per changed pixel).
    pub sum: u64,
    /// `sum / (N * N * 255)`.
    pub intensity: f32,
}

/// Per-cell motion totals for one mask at one grid size.
#[derive(Debug, Clone)]
pub struct MotionGrid {
    size: GridSize,
    cell_width: u32,
    cell_height: u32,
    cells: Vec<GridCell>,
}

impl MotionGrid {
    /// Sum the mask over every cell of an `N x N` grid.
    ///
    /// Cells are produced column by column: all rows of column 0, then all
    /// rows of column 1, and so on. A mask narrower or shorter than `N`
    /// pixels has zero-sized cells and yields no cells at all.
    pub fn aggregate(mask: &MotionMask, size: GridSize) -> Self {
        let n = size.cells();
        let cell_width = mask.width() / n;
        let cell_height = mask.height() / n;

        if cell_width == 0 || cell_height == 0 {
            tracing::debug!(
                mask = ?mask.dimensions(),
                grid = %size,
                "Mask smaller than grid; no cells to aggregate"
            );
            return Self {
                size,
                cell_width,
                cell_height,
                cells: Vec::new(),
            };
        }

        let divisor = size.normalization_divisor();
        let frame = mask.as_frame();
        let mut cells = Vec::with_capacity(n as usize * n as usize);

        for column in 0..n {
            for row in 0..n {
                let rect = PixelRect::new(
                    column * cell_width,
                    row * cell_height,
                    cell_width,
                    cell_height,
                );
                let sum: u64 = (rect.y..rect.bottom())
                    .map(|y| {
                        frame.row(y)[rect.x as usize..rect.right() as usize]
                            .iter()
                            .map(|&v| v as u64)
                            .sum::<u64>()
                    })
                    .sum();

                cells.push(GridCell {
                    column,
                    row,
                    rect,
                    sum,
                    intensity: (sum as f64 / divisor) as f32,
                });
            }
        }

        Self {
            size,
            cell_width,
            cell_height,
            cells,
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    pub fn cell_height(&self) -> u32 {
        self.cell_height
    }

    /// Cells in column-major order.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn cell(&self, column: u32, row: u32) -> Option<&GridCell> {
        let n = self.size.cells();
        if column >= n || row >= n {
            return None;
        }
        self.cells.get((column * n + row) as usize)
    }

    /// The region of the mask covered by cells; everything outside it is the
    /// uncounted remainder.
    pub fn covered(&self) -> PixelRect {
        let n = self.size.cells();
        PixelRect::new(0, 0, self.cell_width * n, self.cell_height * n)
    }

    /// The cell with the highest intensity, first one wins on ties.
    pub fn hottest(&self) -> Option<&GridCell> {
        self.cells
            .iter()
            .filter(|c| c.sum > 0)
            .fold(None, |best: Option<&GridCell>, c| match best {
                Some(b) if b.sum >= c.sum => Some(b),
                _ => Some(c),
            })
    }
}
