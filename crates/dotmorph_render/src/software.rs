//! In-memory RGBA canvas with a bitmap-font text rasterizer.
//!
//! Used headless (tests, the demo binary) and as the reference
//! implementation of [`RenderSurface`].

use crate::font::{self, ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH, UNITS_PER_EM};
use crate::layout::Rect;
use crate::style::Color;
use crate::surface::{AlphaGrid, FontSpec, RenderSurface};

/// Luminance ramp for ASCII previews, dark to bright.
const ASCII_RAMP: &[u8] = b" .:-=+*#%@";

/// A software RGBA8 canvas.
#[derive(Debug, Clone)]
pub struct SoftwareSurface {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
    /// Number of `fill_rect` calls since the last clear.
    fills: u64,
}

impl SoftwareSurface {
    /// Creates a transparent canvas.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
            fills: 0,
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

    /// Resizes the canvas. Contents are cleared.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![[0; 4]; width as usize * height as usize];
        self.fills = 0;
    }

    /// RGBA value of a pixel, transparent outside the canvas.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Raw RGBA bytes, row-major.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Number of `fill_rect` calls since the last clear.
    #[must_use]
    pub const fn fill_count(&self) -> u64 {
        self.fills
    }

    /// Number of pixels with non-zero alpha.
    #[must_use]
    pub fn painted_pixel_count(&self) -> usize {
        self.pixels.iter().filter(|p| p[3] > 0).count()
    }

    /// Downsamples the canvas into `cols x rows` characters by brightness.
    #[must_use]
    pub fn to_ascii(&self, cols: u32, rows: u32) -> String {
        let cols = cols.max(1);
        let rows = rows.max(1);
        let mut out = String::with_capacity((cols as usize + 1) * rows as usize);

        for row in 0..rows {
            let y0 = row * self.height / rows;
            let y1 = ((row + 1) * self.height / rows).max(y0 + 1);
            for col in 0..cols {
                let x0 = col * self.width / cols;
                let x1 = ((col + 1) * self.width / cols).max(x0 + 1);

                let mut sum = 0.0_f32;
                let mut count = 0_u32;
                for y in y0..y1.min(self.height) {
                    for x in x0..x1.min(self.width) {
                        let [r, g, b, a] = self.pixel(x, y);
                        let luma = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
                        sum += luma * f32::from(a) / 255.0;
                        count += 1;
                    }
                }

                let level = if count == 0 { 0.0 } else { sum / count as f32 / 255.0 };
                // Boost so sparse dots stay visible after averaging.
                let level = (level * 4.0).min(1.0);
                let index = (level * (ASCII_RAMP.len() - 1) as f32).round() as usize;
                out.push(ASCII_RAMP[index] as char);
            }
            out.push('\n');
        }

        out
    }
}

/// Source-over blends `color` at `coverage` into one pixel.
fn blend(pixels: &mut [[u8; 4]], stride: u32, x: u32, y: u32, color: Color, coverage: f32) {
    let alpha = (color.a * coverage).clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }

    let slot = &mut pixels[y as usize * stride as usize + x as usize];
    let src = color.to_rgba8();
    let inv = 1.0 - alpha;
    for (dst, src) in slot.iter_mut().zip(src).take(3) {
        let value = f32::from(src) * alpha + f32::from(*dst) * inv;
        *dst = value.round().clamp(0.0, 255.0) as u8;
    }
    let out_alpha = alpha + f32::from(slot[3]) / 255.0 * inv;
    slot[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
}

/// Visits every pixel a rectangle touches with its fractional coverage.
fn for_each_covered(rect: Rect, width: u32, height: u32, mut f: impl FnMut(u32, u32, f32)) {
    let canvas = Rect::new(0.0, 0.0, width as f32, height as f32);
    let Some(clip) = rect.intersection(&canvas) else {
        return;
    };

    let x_start = clip.x.floor() as u32;
    let y_start = clip.y.floor() as u32;
    let x_end = (clip.right().ceil() as u32).min(width);
    let y_end = (clip.bottom().ceil() as u32).min(height);

    for y in y_start..y_end {
        let cover_y = (clip.bottom().min(y as f32 + 1.0) - clip.y.max(y as f32)).max(0.0);
        for x in x_start..x_end {
            let cover_x = (clip.right().min(x as f32 + 1.0) - clip.x.max(x as f32)).max(0.0);
            let coverage = cover_x * cover_y;
            if coverage > 0.0 {
                f(x, y, coverage);
            }
        }
    }
}

impl RenderSurface for SoftwareSurface {
    fn measure_text_width(&mut self, text: &str, font: &FontSpec) -> f32 {
        font::text_width_units(text) as f32 * font.size / UNITS_PER_EM
    }

    fn rasterize_text(&mut self, text: &str, font: &FontSpec, width: u32, height: u32) -> AlphaGrid {
        let mut grid = AlphaGrid::new(width, height);
        let unit = font.size / UNITS_PER_EM;
        if unit <= 0.0 {
            return grid;
        }

        let text_width = self.measure_text_width(text, font);
        let left = width as f32 / 2.0 - text_width / 2.0;
        let top = height as f32 / 2.0 - GLYPH_HEIGHT as f32 * unit / 2.0;

        for (index, c) in text.chars().enumerate() {
            let Some(rows) = font::glyph(c) else {
                continue;
            };
            let origin_x = left + (index as u32 * ADVANCE) as f32 * unit;

            for row in 0..GLYPH_HEIGHT {
                for col in 0..GLYPH_WIDTH {
                    if !font::is_lit(&rows, col, row) {
                        continue;
                    }
                    let cell = Rect::new(
                        origin_x + col as f32 * unit,
                        top + row as f32 * unit,
                        unit,
                        unit,
                    );
                    for_each_covered(cell, width, height, |x, y, coverage| {
                        grid.accumulate(i64::from(x), i64::from(y), (coverage * 255.0).round() as u8);
                    });
                }
            }
        }

        grid
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.fills += 1;
        let stride = self.width;
        let pixels = &mut self.pixels;
        for_each_covered(Rect::new(x, y, width, height), self.width, self.height, |px, py, coverage| {
            blend(pixels, stride, px, py, color, coverage);
        });
    }

    fn clear(&mut self) {
        self.pixels.fill([0; 4]);
        self.fills = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_scales_with_font_size() {
        let mut surface = SoftwareSurface::new(10, 10);
        let small = surface.measure_text_width("AB", &FontSpec::new("Impact", 8.0));
        let large = surface.measure_text_width("AB", &FontSpec::new("Impact", 16.0));

        assert!((small - 11.0).abs() < 1e-4);
        assert!((large - 22.0).abs() < 1e-4);
    }

    #[test]
    fn test_rasterize_centers_text() {
        let mut surface = SoftwareSurface::new(40, 20);
        let grid = surface.rasterize_text("I", &FontSpec::new("Impact", 16.0), 40, 20);

        // "I" is 10px wide at 2px per unit, centered at x = 20.
        // Its vertical bar is the middle column: x in [19, 21).
        assert_eq!(grid.alpha(19, 10), 255);
        assert_eq!(grid.alpha(20, 10), 255);
        assert_eq!(grid.alpha(0, 0), 0);
        assert!(grid.covered_count() > 0);
    }

    #[test]
    fn test_rasterize_unknown_glyphs_are_blank() {
        let mut surface = SoftwareSurface::new(40, 20);
        let grid = surface.rasterize_text("~~", &FontSpec::new("Impact", 16.0), 40, 20);
        assert_eq!(grid.covered_count(), 0);
    }

    #[test]
    fn test_fill_rect_blends_and_clips() {
        let mut surface = SoftwareSurface::new(4, 4);
        surface.fill_rect(-1.0, -1.0, 2.0, 2.0, Color::WHITE);

        assert_eq!(surface.pixel(0, 0), [255, 255, 255, 255]);
        assert_eq!(surface.pixel(1, 1), [0, 0, 0, 0]);
        assert_eq!(surface.fill_count(), 1);

        surface.fill_rect(2.0, 2.0, 1.0, 1.0, Color::WHITE.with_alpha(0.5));
        assert_eq!(surface.pixel(2, 2)[3], 128);

        surface.clear();
        assert_eq!(surface.painted_pixel_count(), 0);
        assert_eq!(surface.fill_count(), 0);
    }

    #[test]
    fn test_ascii_preview_shape() {
        let mut surface = SoftwareSurface::new(8, 4);
        surface.fill_rect(0.0, 0.0, 4.0, 4.0, Color::WHITE);

        let ascii = surface.to_ascii(2, 1);
        assert_eq!(ascii, "@ \n");
        assert_eq!(surface.as_bytes().len(), 8 * 4 * 4);
    }
}
