//! Effect configuration.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! fps = 30
//! text_interval_ms = 5000
//! texts = ["DOTTED TEXT", "TJAKUBOWSKI", "JAVASCRIPT"]
//!
//! [particles.spawn]
//! border_spawn = true
//!
//! [text]
//! font = "Impact"
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use dotmorph_render::{Color, FontSpec, ParticleStyle, SamplingOptions, MAX_FONT_SIZE};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{DotMorphError, Result};

/// An sRGB color with 8-bit channels and a 0-1 alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorSpec {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha (0-1).
    pub a: f32,
}

impl ColorSpec {
    /// Creates a color spec.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Converts to a render color.
    #[must_use]
    pub fn to_color(self) -> Color {
        Color::from_rgb8(self.r, self.g, self.b, self.a)
    }
}

/// How particles are drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Square side length in pixels.
    pub size: f32,
    /// Fill color.
    pub color: ColorSpec,
    /// Outline thickness. 0 draws no outline.
    pub stroke_size: f32,
    /// Outline color.
    pub stroke_color: ColorSpec,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            size: 1.0,
            color: ColorSpec::new(255, 255, 255, 0.75),
            stroke_size: 0.0,
            stroke_color: ColorSpec::new(255, 255, 255, 1.0),
        }
    }
}

impl StyleConfig {
    /// Converts to the render style.
    #[must_use]
    pub fn to_style(&self) -> ParticleStyle {
        ParticleStyle {
            size: self.size,
            color: self.color.to_color(),
            stroke_size: self.stroke_size,
            stroke_color: self.stroke_color.to_color(),
        }
    }
}

/// Widest accepted spawn band around the canvas, in pixels.
pub const MAX_BORDER_OFFSET: f32 = 100_000.0;

/// Where new particles appear and how densely text is sampled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Spawn in a band around the canvas instead of inside it.
    pub border_spawn: bool,
    /// Width of the spawn band outside the canvas edges, in pixels.
    pub border_offset: f32,
    /// Sampling grid stride in pixels.
    pub offset: u32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            border_spawn: false,
            border_offset: 50.0,
            offset: 6,
        }
    }
}

/// Motion parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionParams {
    /// Distance below which a particle snaps onto its target.
    pub target_radius: f32,
    /// Maximum step length per frame.
    pub speed: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            target_radius: 10.0,
            speed: 10.0,
        }
    }
}

/// Fade speed per frame tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeConfig {
    /// Added to fade each tick while fading in.
    pub fade_in_step: f32,
    /// Subtracted from fade each tick while fading out.
    pub fade_out_step: f32,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            fade_in_step: 0.05,
            fade_out_step: 0.05,
        }
    }
}

/// Particle settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticlesConfig {
    /// Drawing style.
    pub style: StyleConfig,
    /// Spawn policy and sampling stride.
    pub spawn: SpawnConfig,
    /// Motion parameters.
    pub params: MotionParams,
    /// Fade speeds.
    pub fade: FadeConfig,
}

/// Text fitting and sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Maximum font size in pixels.
    pub size: f32,
    /// Font family.
    pub font: String,
    /// Samples with alpha above this value become targets.
    pub alpha_threshold: u8,
    /// Maximum text width as a fraction of the canvas width.
    pub width_ratio: f32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            size: 180.0,
            font: "Impact".to_string(),
            alpha_threshold: 128,
            width_ratio: 0.75,
        }
    }
}

/// Event bus settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Bounded channel capacity.
    pub capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self { capacity: 256 }
    }
}

/// Complete configuration of a dotted text effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DottedTextConfig {
    /// Frame ticks per second.
    pub fps: u32,
    /// Milliseconds between text changes.
    pub text_interval_ms: u64,
    /// Texts shown in rotation.
    pub texts: Vec<String>,
    /// Random seed. Seeded from the clock when absent.
    pub seed: Option<u64>,
    /// Particle settings.
    pub particles: ParticlesConfig,
    /// Text settings.
    pub text: TextConfig,
    /// Event bus settings.
    pub events: EventsConfig,
}

impl Default for DottedTextConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            text_interval_ms: 5000,
            texts: vec![
                "DOTTED TEXT".to_string(),
                "TJAKUBOWSKI".to_string(),
                "JAVASCRIPT".to_string(),
            ],
            seed: None,
            particles: ParticlesConfig::default(),
            text: TextConfig::default(),
            events: EventsConfig::default(),
        }
    }
}

impl DottedTextConfig {
    /// Parses a configuration from TOML. The result is not validated.
    ///
    /// # Errors
    ///
    /// Returns [`DotMorphError::Parse`] on malformed TOML or mistyped fields.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads a configuration file. The result is not validated.
    ///
    /// # Errors
    ///
    /// Returns [`DotMorphError::Io`] if the file cannot be read, or
    /// [`DotMorphError::Parse`] if it is not a valid configuration.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| DotMorphError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Checks that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`DotMorphError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        fn check(ok: bool, message: &str) -> Result<()> {
            if ok {
                Ok(())
            } else {
                Err(DotMorphError::InvalidConfig(message.to_string()))
            }
        }

        let particles = &self.particles;
        check(self.fps > 0, "fps must be greater than 0")?;
        check(self.text_interval_ms > 0, "text_interval_ms must be greater than 0")?;
        check(particles.spawn.offset >= 1, "particles.spawn.offset must be at least 1")?;
        check(
            (0.0..=MAX_BORDER_OFFSET).contains(&particles.spawn.border_offset),
            "particles.spawn.border_offset must be in [0, 100000]",
        )?;
        check(particles.params.speed > 0.0, "particles.params.speed must be greater than 0")?;
        check(
            particles.params.target_radius >= 0.0,
            "particles.params.target_radius must not be negative",
        )?;
        check(
            particles.fade.fade_in_step > 0.0 && particles.fade.fade_in_step <= 1.0,
            "particles.fade.fade_in_step must be in (0, 1]",
        )?;
        check(
            particles.fade.fade_out_step > 0.0 && particles.fade.fade_out_step <= 1.0,
            "particles.fade.fade_out_step must be in (0, 1]",
        )?;
        check(particles.style.size > 0.0, "particles.style.size must be greater than 0")?;
        check(
            particles.style.stroke_size >= 0.0,
            "particles.style.stroke_size must not be negative",
        )?;
        check(
            self.text.size > 0.0 && self.text.size <= MAX_FONT_SIZE,
            "text.size must be in (0, 4096]",
        )?;
        check(
            self.text.width_ratio > 0.0 && self.text.width_ratio <= 1.0,
            "text.width_ratio must be in (0, 1]",
        )?;
        check(self.events.capacity > 0, "events.capacity must be greater than 0")?;

        if self.texts.is_empty() {
            warn!("no texts configured, text rotation is disabled");
        }
        let alpha_out_of_range = |c: &ColorSpec| !(0.0..=1.0).contains(&c.a);
        if alpha_out_of_range(&particles.style.color) || alpha_out_of_range(&particles.style.stroke_color) {
            warn!("particle color alpha outside 0-1 is clamped");
        }

        Ok(())
    }

    /// Time between frame ticks.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    /// Time between text changes.
    #[must_use]
    pub fn text_interval(&self) -> Duration {
        Duration::from_millis(self.text_interval_ms)
    }

    /// Text sampler options.
    #[must_use]
    pub fn sampling_options(&self) -> SamplingOptions {
        SamplingOptions {
            font: FontSpec::new(self.text.font.clone(), self.text.size),
            stride: self.particles.spawn.offset,
            alpha_threshold: self.text.alpha_threshold,
            width_ratio: self.text.width_ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = DottedTextConfig::from_toml_str("").unwrap();
        assert_eq!(config, DottedTextConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = DottedTextConfig::from_toml_str(
            r#"
            fps = 60
            texts = ["HI"]
            seed = 7

            [particles.spawn]
            border_spawn = true

            [particles.style]
            color = { r = 255, g = 0, b = 0, a = 0.5 }
            "#,
        )
        .unwrap();

        assert_eq!(config.fps, 60);
        assert_eq!(config.texts, vec!["HI".to_string()]);
        assert_eq!(config.seed, Some(7));
        assert!(config.particles.spawn.border_spawn);
        assert!((config.particles.spawn.border_offset - 50.0).abs() < f32::EPSILON);
        assert_eq!(config.particles.style.color, ColorSpec::new(255, 0, 0, 0.5));
        assert!((config.particles.style.size - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.text.font, "Impact");
    }

    #[test]
    fn test_parse_error() {
        let err = DottedTextConfig::from_toml_str("fps = \"fast\"").unwrap_err();
        assert!(matches!(err, DotMorphError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = DottedTextConfig::from_path("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, DotMorphError::Io { .. }));
    }

    #[test]
    fn test_validation_rejects_out_of_range() {
        let cases: [(&str, fn(&mut DottedTextConfig)); 16] = [
            ("fps", |c| c.fps = 0),
            ("text_interval_ms", |c| c.text_interval_ms = 0),
            ("offset", |c| c.particles.spawn.offset = 0),
            ("border_offset", |c| c.particles.spawn.border_offset = -1.0),
            ("border_offset", |c| c.particles.spawn.border_offset = 3.0e9),
            ("border_offset", |c| c.particles.spawn.border_offset = f32::NAN),
            ("speed", |c| c.particles.params.speed = 0.0),
            ("target_radius", |c| c.particles.params.target_radius = -1.0),
            ("fade_in_step", |c| c.particles.fade.fade_in_step = 0.0),
            ("fade_out_step", |c| c.particles.fade.fade_out_step = 1.5),
            ("style.size", |c| c.particles.style.size = 0.0),
            ("text.size", |c| c.text.size = 0.0),
            ("text.size", |c| c.text.size = f32::INFINITY),
            ("text.size", |c| c.text.size = 1.0e9),
            ("width_ratio", |c| c.text.width_ratio = 1.5),
            ("capacity", |c| c.events.capacity = 0),
        ];

        for (field, mutate) in cases {
            let mut config = DottedTextConfig::default();
            mutate(&mut config);
            match config.validate() {
                Err(DotMorphError::InvalidConfig(message)) => {
                    assert!(message.contains(field), "{field}: {message}");
                }
                other => panic!("{field}: expected InvalidConfig, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_empty_texts_are_valid() {
        let config = DottedTextConfig {
            texts: Vec::new(),
            ..DottedTextConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_derived_settings() {
        let config = DottedTextConfig::default();
        assert_eq!(config.text_interval(), Duration::from_secs(5));
        assert_eq!(config.frame_interval(), Duration::from_secs(1) / 30);

        let options = config.sampling_options();
        assert_eq!(options.stride, 6);
        assert_eq!(options.alpha_threshold, 128);
        assert_eq!(options.font.to_string(), "bolder 180px Impact");

        let style = config.particles.style.to_style();
        assert_eq!(style, ParticleStyle::default());
    }
}
