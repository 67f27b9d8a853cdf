//! Colors and particle drawing style.

use serde::{Deserialize, Serialize};

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from 8-bit channels and a 0-1 alpha, the way
    /// `rgba(255, 255, 255, 0.75)` reads in CSS.
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::rgba(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            a.clamp(0.0, 1.0),
        )
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Returns the color with its alpha multiplied by `factor` (clamped to 0-1).
    #[must_use]
    pub fn fade(self, factor: f32) -> Self {
        self.with_alpha((self.a * factor).clamp(0.0, 1.0))
    }

    /// Converts to 8-bit RGBA.
    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// How a single particle is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleStyle {
    /// Side length of the filled square, in pixels.
    pub size: f32,
    /// Fill color. Alpha is further scaled by the particle's fade.
    pub color: Color,
    /// Outline thickness in pixels. 0 disables the outline.
    pub stroke_size: f32,
    /// Outline color.
    pub stroke_color: Color,
}

impl Default for ParticleStyle {
    fn default() -> Self {
        Self {
            size: 1.0,
            color: Color::from_rgb8(255, 255, 255, 0.75),
            stroke_size: 0.0,
            stroke_color: Color::WHITE,
        }
    }
}
