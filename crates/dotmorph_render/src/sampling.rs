//! Text to target-point sampling.
//!
//! A string is fitted to the canvas width, rasterized offscreen, and the
//! covered pixels are sampled on a regular grid. The resulting points are
//! the targets particles migrate to.

use dotmorph_core::Vector2;
use tracing::debug;

use crate::surface::{FontSpec, RenderSurface};

/// Largest font size the fitter starts from. Bigger requests are clamped.
pub const MAX_FONT_SIZE: f32 = 4096.0;

/// Parameters of the text sampler.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingOptions {
    /// Font used for measuring and rasterizing. Its size is the maximum
    /// size the fitter starts from.
    pub font: FontSpec,
    /// Grid spacing in pixels. Values below 1 are treated as 1.
    pub stride: u32,
    /// Samples with alpha strictly above this value become points.
    pub alpha_threshold: u8,
    /// Maximum text width as a fraction of the canvas width.
    pub width_ratio: f32,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            font: FontSpec::new("Impact", 180.0),
            stride: 6,
            alpha_threshold: 128,
            width_ratio: 0.75,
        }
    }
}

/// A font size chosen by [`fit_font_size`] with the resulting text width.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedFont {
    /// The fitted font.
    pub font: FontSpec,
    /// Measured width of the text at that font, in pixels.
    pub text_width: f32,
}

/// Finds the largest font size, stepping down 1px at a time from
/// `options.font.size` (at most [`MAX_FONT_SIZE`]), at which `text` fits in
/// `canvas_width * options.width_ratio`.
///
/// Returns `None` when the size reaches 0 without fitting.
pub fn fit_font_size<S: RenderSurface + ?Sized>(
    surface: &mut S,
    text: &str,
    canvas_width: u32,
    options: &SamplingOptions,
) -> Option<FittedFont> {
    let limit = canvas_width as f32 * options.width_ratio;
    // NaN clamps to the maximum as well.
    let mut size = options.font.size.min(MAX_FONT_SIZE);

    loop {
        if size <= 0.0 {
            debug!(text, canvas_width, "text does not fit at any font size");
            return None;
        }

        let font = options.font.with_size(size);
        let text_width = surface.measure_text_width(text, &font);
        if text_width <= limit {
            debug!(%font, text_width, limit, "fitted font");
            return Some(FittedFont { font, text_width });
        }

        size -= 1.0;
    }
}

/// Samples the target points of `text` on a `width x height` canvas.
///
/// Points are emitted column by column (x outer, y inner) starting at the
/// left edge of the centered text. An empty vector means the text produced
/// no covered samples or could not be fitted.
pub fn sample_text_points<S: RenderSurface + ?Sized>(
    surface: &mut S,
    text: &str,
    width: u32,
    height: u32,
    options: &SamplingOptions,
) -> Vec<Vector2> {
    let Some(fitted) = fit_font_size(surface, text, width, options) else {
        return Vec::new();
    };

    let grid = surface.rasterize_text(text, &fitted.font, width, height);
    let left = width as f32 / 2.0 - fitted.text_width / 2.0;
    let band_left = left.floor() as i64;
    let band_width = fitted.text_width.ceil().max(0.0) as u32;
    let stride = options.stride.max(1) as usize;

    let mut points = Vec::new();
    for x in (0..band_width).step_by(stride) {
        for y in (0..height).step_by(stride) {
            if grid.alpha(band_left + i64::from(x), i64::from(y)) > options.alpha_threshold {
                points.push(Vector2::new(x as f32 + left, y as f32));
            }
        }
    }

    debug!(text, points = points.len(), "sampled text");
    points
}
