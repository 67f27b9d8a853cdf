//! The dotted text effect: texts in rotation, sampled into targets for a
//! particle system, driven by a frame scheduler.

use std::time::{Duration, Instant};

use dotmorph_core::{RandomSource, SeededRandom};
use dotmorph_render::{sample_text_points, RenderSurface, SamplingOptions};
use tracing::{debug, info};

use crate::config::DottedTextConfig;
use crate::error::Result;
use crate::events::{EventBus, EventReceiver, EventSender, MorphEvent};
use crate::game_loop::{FrameScheduler, FrameStats, FrameStatsAccumulator, Tick};
use crate::system::{ParticleSystem, ReconcileReport};

/// Particles morphing between texts on a render surface.
pub struct DottedText<S: RenderSurface, R: RandomSource = SeededRandom> {
    config: DottedTextConfig,
    surface: S,
    system: ParticleSystem<R>,
    sampling: SamplingOptions,
    width: u32,
    height: u32,
    /// Position in `config.texts` of the last rotated text.
    text_index: usize,
    current_text: String,
    scheduler: FrameScheduler,
    events: EventBus,
    sender: EventSender,
    stats: FrameStatsAccumulator,
    frame: u64,
}

impl<S: RenderSurface> DottedText<S> {
    /// Validates `config`, builds the effect on `surface` and shows the
    /// first text of the rotation.
    ///
    /// The random source is seeded from `config.seed`, or from the clock
    /// when no seed is configured.
    ///
    /// # Errors
    ///
    /// Returns [`DotMorphError::InvalidConfig`](crate::DotMorphError::InvalidConfig)
    /// if the configuration does not validate.
    pub fn new(config: DottedTextConfig, surface: S, width: u32, height: u32) -> Result<Self> {
        let rng = config.seed.map_or_else(SeededRandom::from_time, SeededRandom::new);
        Self::with_rng(config, surface, width, height, rng)
    }
}

impl<S: RenderSurface, R: RandomSource> DottedText<S, R> {
    /// Like [`DottedText::new`] with an explicit random source.
    ///
    /// # Errors
    ///
    /// Returns [`DotMorphError::InvalidConfig`](crate::DotMorphError::InvalidConfig)
    /// if the configuration does not validate.
    pub fn with_rng(config: DottedTextConfig, surface: S, width: u32, height: u32, rng: R) -> Result<Self> {
        config.validate()?;

        let system = ParticleSystem::new(&config.particles, width, height, rng);
        let sampling = config.sampling_options();
        let scheduler = FrameScheduler::new(config.frame_interval(), config.text_interval());
        let events = EventBus::new(config.events.capacity);
        let sender = events.sender();

        let mut effect = Self {
            config,
            surface,
            system,
            sampling,
            width,
            height,
            text_index: 0,
            current_text: String::new(),
            scheduler,
            events,
            sender,
            stats: FrameStatsAccumulator::new(),
            frame: 0,
        };

        if let Some(first) = effect.config.texts.first().cloned() {
            effect.show(&first, Some(0));
        }

        info!(width, height, texts = effect.config.texts.len(), "dotted text started");
        Ok(effect)
    }

    /// Resizes the canvas. Takes effect on the next text change.
    pub fn fit(&mut self, width: u32, height: u32) {
        debug!(width, height, "canvas resized");
        self.width = width;
        self.height = height;
        self.system.resize(width, height);
    }

    /// Canvas size.
    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Morphs the particles into `text`. The rotation position is unchanged.
    pub fn set_text(&mut self, text: &str) -> ReconcileReport {
        self.show(text, None)
    }

    /// Advances the rotation and shows the next text, wrapping at the end.
    ///
    /// Returns `None` when no texts are configured.
    pub fn set_next_text(&mut self) -> Option<ReconcileReport> {
        let count = self.config.texts.len();
        if count == 0 {
            return None;
        }
        let index = (self.text_index + 1) % count;
        let text = self.config.texts[index].clone();
        Some(self.show(&text, Some(index)))
    }

    fn show(&mut self, text: &str, index: Option<usize>) -> ReconcileReport {
        let targets = sample_text_points(&mut self.surface, text, self.width, self.height, &self.sampling);
        let target_count = targets.len();
        let report = self.system.set_targets(targets);

        if let Some(index) = index {
            self.text_index = index;
        }
        self.current_text = text.to_string();
        self.stats.record_text_change();

        info!(text, target_count, "text changed");
        self.sender.send(MorphEvent::TextChanged {
            index,
            text: text.to_string(),
            target_count,
        });
        self.sender.send(MorphEvent::Reconciled(report));
        report
    }

    /// The text currently shown.
    #[must_use]
    pub fn current_text(&self) -> &str {
        &self.current_text
    }

    /// Position in the rotation of the last rotated text.
    #[must_use]
    pub const fn text_index(&self) -> usize {
        self.text_index
    }

    /// Clears the surface, updates every particle and draws them.
    pub fn render_frame(&mut self) -> FrameStats {
        self.surface.clear();

        let started = Instant::now();
        self.system.update();
        let updated = Instant::now();
        self.system.draw(&mut self.surface);
        let drawn = Instant::now();

        let stats = FrameStats {
            frame: self.frame,
            update_us: micros(updated - started),
            draw_us: micros(drawn - updated),
            active: self.system.active_count(),
            pooled: self.system.pooled_count(),
        };
        self.frame += 1;
        self.stats.record(stats);
        stats
    }

    /// Feeds `elapsed` wall time to the scheduler and runs every text change
    /// and frame that fell due, in order. Returns the number of frames drawn.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        if !self.scheduler.is_running() {
            return 0;
        }

        self.scheduler.advance(elapsed);
        let mut frames = 0;
        while let Some(tick) = self.scheduler.next_tick() {
            match tick {
                Tick::RotateText => {
                    self.set_next_text();
                }
                Tick::Frame => {
                    self.render_frame();
                    frames += 1;
                }
            }
        }
        frames
    }

    /// Stops frames and text rotation. Later [`advance`](Self::advance)
    /// calls do nothing.
    pub fn stop(&mut self) {
        if !self.scheduler.is_running() {
            return;
        }
        self.scheduler.stop();
        info!(frames = self.frame, "dotted text stopped");
        self.sender.send(MorphEvent::Stopped);
    }

    /// False after [`stop`](Self::stop).
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Subscribes to effect events.
    #[must_use]
    pub fn events(&self) -> EventReceiver {
        self.events.receiver()
    }

    /// Accumulated frame statistics.
    #[must_use]
    pub const fn stats(&self) -> &FrameStatsAccumulator {
        &self.stats
    }

    /// The particle system.
    #[must_use]
    pub const fn system(&self) -> &ParticleSystem<R> {
        &self.system
    }

    /// The frame scheduler.
    #[must_use]
    pub const fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// The configuration the effect was built from.
    #[must_use]
    pub const fn config(&self) -> &DottedTextConfig {
        &self.config
    }

    /// The render surface.
    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// The render surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Unwraps the effect, returning its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }
}

fn micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}
