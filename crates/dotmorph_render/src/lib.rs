//! # DOTMORPH Render
//!
//! Everything between the particle engine and pixels:
//! - The [`RenderSurface`] contract a host canvas implements
//! - A headless [`SoftwareSurface`] with a built-in bitmap font
//! - Text fitting and target point sampling
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   TEXT → TARGETS                          │
//! ├──────────────────────────────────────────────────────────┤
//! │  fit font size → rasterize offscreen → sample on stride  │
//! │        ↓                  ↓                   ↓          │
//! │  measure_text_width   AlphaGrid        Vec<Vector2>      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ```
//! use dotmorph_render::{sample_text_points, SamplingOptions, SoftwareSurface};
//!
//! let mut surface = SoftwareSurface::new(320, 120);
//! let points = sample_text_points(&mut surface, "HELLO", 320, 120, &SamplingOptions::default());
//! assert!(!points.is_empty());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod font;
pub mod layout;
pub mod render;
pub mod sampling;
pub mod software;
pub mod style;
pub mod surface;

pub use layout::Rect;
pub use render::{FrameRecorder, RenderCommand};
pub use sampling::{fit_font_size, sample_text_points, FittedFont, SamplingOptions, MAX_FONT_SIZE};
pub use software::SoftwareSurface;
pub use style::{Color, ParticleStyle};
pub use surface::{AlphaGrid, FontSpec, RenderSurface};
