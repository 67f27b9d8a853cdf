//! # DOTMORPH
//!
//! Particles that sample rasterized text and morph from one text to the
//! next.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                               DOTMORPH                                  │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────┐     ┌─────────────────┐     ┌─────────────────┐   │
//! │  │  dotmorph_core  │     │ dotmorph_render │     │    dotmorph     │   │
//! │  │                 │────>│                 │────>│                 │   │
//! │  │  • Vector2      │     │  • Surfaces     │     │  • Particles    │   │
//! │  │  • Random       │     │  • Bitmap font  │     │  • System       │   │
//! │  │  • Pool         │     │  • Sampling     │     │  • DottedText   │   │
//! │  └─────────────────┘     └─────────────────┘     └─────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//!
//! use dotmorph::{DottedText, DottedTextConfig};
//! use dotmorph_render::SoftwareSurface;
//!
//! let config = DottedTextConfig {
//!     seed: Some(1),
//!     texts: vec!["HI".to_string()],
//!     ..DottedTextConfig::default()
//! };
//! let mut effect = DottedText::new(config, SoftwareSurface::new(160, 60), 160, 60)?;
//!
//! let frames = effect.advance(Duration::from_millis(100));
//! assert_eq!(frames, 3);
//! assert_eq!(effect.current_text(), "HI");
//! # Ok::<(), dotmorph::DotMorphError>(())
//! ```
//!
//! ## Modules
//!
//! - `particle`: a single particle and its fade state machine
//! - `motion`: eased motion toward a target
//! - `system`: reconciliation, update and draw
//! - `text_effect`: the `DottedText` orchestrator
//! - `game_loop`: virtual-clock frame scheduler and frame statistics
//! - `events`: notifications to the host

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod events;
pub mod game_loop;
pub mod motion;
pub mod particle;
pub mod system;
pub mod text_effect;

// Re-export the lower layers
pub use dotmorph_core as core;
pub use dotmorph_render as render;

// Re-export commonly used types
pub use config::{DottedTextConfig, MotionParams};
pub use error::{DotMorphError, Result};
pub use events::{EventBus, EventReceiver, EventSender, MorphEvent};
pub use game_loop::{FrameScheduler, FrameStats, FrameStatsAccumulator, Interval, Tick, MAX_ADVANCE};
pub use particle::{FadeState, Particle};
pub use system::{ParticleSystem, ReconcileReport};
pub use text_effect::DottedText;
