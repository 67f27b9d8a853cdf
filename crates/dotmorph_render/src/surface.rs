//! The drawing contract between the particle engine and a platform canvas.

use std::fmt;

use crate::style::Color;

/// Font selection for measuring and rasterizing text.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Font family name.
    pub family: String,
    /// Font size in pixels.
    pub size: f32,
}

impl FontSpec {
    /// Creates a font spec.
    #[must_use]
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// Same family at a different size.
    #[must_use]
    pub fn with_size(&self, size: f32) -> Self {
        Self {
            family: self.family.clone(),
            size,
        }
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bolder {}px {}", self.size, self.family)
    }
}

/// Row-major 8-bit alpha coverage buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaGrid {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl AlphaGrid {
    /// Creates a fully transparent grid.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Alpha at a pixel. Out-of-bounds reads are transparent.
    #[must_use]
    pub fn alpha(&self, x: i64, y: i64) -> u8 {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return 0;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Adds `value` to the alpha at a pixel, saturating at 255.
    /// Out-of-bounds writes are ignored.
    pub fn accumulate(&mut self, x: i64, y: i64, value: u8) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let slot = &mut self.data[y as usize * self.width as usize + x as usize];
        *slot = slot.saturating_add(value);
    }

    /// Number of pixels with non-zero alpha.
    #[must_use]
    pub fn covered_count(&self) -> usize {
        self.data.iter().filter(|&&a| a > 0).count()
    }
}

/// A 2D drawing target.
///
/// This is everything the engine needs from a platform canvas: text metrics,
/// an offscreen text rasterizer, and filled rectangles.
pub trait RenderSurface {
    /// Rendered width of `text` in pixels.
    fn measure_text_width(&mut self, text: &str, font: &FontSpec) -> f32;

    /// Rasterizes `text` onto a transparent `width x height` grid.
    ///
    /// The text is centered horizontally and its vertical middle sits on
    /// `height / 2`.
    fn rasterize_text(&mut self, text: &str, font: &FontSpec, width: u32, height: u32) -> AlphaGrid;

    /// Fills an axis-aligned rectangle, blending `color` over what is there.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    /// Clears the visible canvas before a frame is drawn.
    fn clear(&mut self) {}
}

impl<S: RenderSurface + ?Sized> RenderSurface for &mut S {
    fn measure_text_width(&mut self, text: &str, font: &FontSpec) -> f32 {
        (**self).measure_text_width(text, font)
    }

    fn rasterize_text(&mut self, text: &str, font: &FontSpec, width: u32, height: u32) -> AlphaGrid {
        (**self).rasterize_text(text, font, width, height)
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        (**self).fill_rect(x, y, width, height, color);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}
