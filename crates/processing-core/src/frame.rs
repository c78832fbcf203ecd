//! Grayscale frames and binary motion masks.

use motiongrid_common::error::{MotionGridError, MotionGridResult};

/// Value of a changed pixel in a [`MotionMask`].
pub const CHANGED: u8 = 255;

/// Value of an unchanged pixel in a [`MotionMask`].
pub const UNCHANGED: u8 = 0;

/// A single-channel 8-bit image stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Frame {
    /// Wrap a row-major intensity buffer of exactly `width * height` bytes.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> MotionGridResult<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(MotionGridError::processing(format!(
                "Frame buffer holds {} bytes, {width}x{height} needs {expected}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A frame where every pixel has the same intensity.
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; width as usize * height as usize],
        }
    }

    /// Build a frame by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> u8) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert a tightly packed RGBA8 buffer to luminance.
    ///
    /// Uses integer BT.601 weights, the same conversion camera toolkits apply
    /// when reducing a color surface to a single channel.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> MotionGridResult<Self> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(MotionGridError::processing(format!(
                "RGBA buffer holds {} bytes, {width}x{height} needs {expected}",
                rgba.len()
            )));
        }

        let pixels = rgba
            .chunks_exact(4)
            .map(|px| luma(px[0], px[1], px[2]))
            .collect();

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Intensity at `(x, y)`. Panics when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        let idx = self.index(x, y);
        self.pixels[idx] = value;
    }

    /// One row of pixels.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    pub fn same_dimensions(&self, other: &Frame) -> bool {
        self.dimensions() == other.dimensions()
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} frame",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }
}

fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((77 * r as u32 + 150 * g as u32 + 29 * b as u32 + 128) >> 8) as u8
}

/// Binary image marking pixels that changed between two frames.
///
/// Every pixel is either [`CHANGED`] or [`UNCHANGED`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionMask {
    frame: Frame,
}

impl MotionMask {
    /// A mask with every pixel set to the same state.
    pub fn filled(width: u32, height: u32, changed: bool) -> Self {
        Self {
            frame: Frame::filled(width, height, mask_value(changed)),
        }
    }

    /// Build a mask by evaluating `changed(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut changed: impl FnMut(u32, u32) -> bool) -> Self {
        Self {
            frame: Frame::from_fn(width, height, |x, y| mask_value(changed(x, y))),
        }
    }

    /// Caller guarantees the frame only contains 0 or 255.
    pub(crate) fn from_binary_frame(frame: Frame) -> Self {
        debug_assert!(frame
            .pixels()
            .iter()
            .all(|&v| v == CHANGED || v == UNCHANGED));
        Self { frame }
    }

    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.frame.dimensions()
    }

    pub fn is_changed(&self, x: u32, y: u32) -> bool {
        self.frame.get(x, y) == CHANGED
    }

    /// Number of changed pixels in the whole mask.
    pub fn changed_pixels(&self) -> usize {
        self.frame
            .pixels()
            .iter()
            .filter(|&&v| v == CHANGED)
            .count()
    }

    /// The mask as a 0/255 grayscale image, suitable for display.
    pub fn as_frame(&self) -> &Frame {
        &self.frame
    }
}

fn mask_value(changed: bool) -> u8 {
    if changed {
        CHANGED
    } else {
        UNCHANGED
    }
}
