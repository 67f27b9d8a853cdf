//! The particle system: reconciliation, per-frame update and draw.
//!
//! Every particle lives in a [`RecyclingPool`]. A handle is either in the
//! ordered active list (it has a text target) or on the pool's free stack
//! (retired, fading out or parked). Reconciliation moves handles between
//! the two so that the active list always matches the current target set
//! one to one.

use dotmorph_core::random::shuffle;
use dotmorph_core::{PoolHandle, RandomSource, RecyclingPool, SeededRandom, Vector2};
use dotmorph_render::{ParticleStyle, RenderSurface};
use tracing::{debug, warn};

use crate::config::{FadeConfig, MotionParams, ParticlesConfig, SpawnConfig, MAX_BORDER_OFFSET};
use crate::particle::Particle;

/// Outcome of one reconciliation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Active particles retired into the pool.
    pub retired: usize,
    /// Pooled particles brought back.
    pub reused: usize,
    /// Particles allocated for the first time.
    pub created: usize,
    /// Active particles afterwards (equals the target count).
    pub active: usize,
    /// Pooled particles afterwards.
    pub pooled: usize,
}

/// Owns every particle and keeps the active ones matched to targets.
pub struct ParticleSystem<R: RandomSource = SeededRandom> {
    pool: RecyclingPool<Particle>,
    /// Handles with a text target, in assignment order.
    active: Vec<PoolHandle>,
    targets: Vec<Vector2>,
    width: f32,
    height: f32,
    style: ParticleStyle,
    spawn: SpawnConfig,
    motion: MotionParams,
    fade: FadeConfig,
    rng: R,
}

impl<R: RandomSource> ParticleSystem<R> {
    /// Creates an empty system for a `width x height` canvas.
    #[must_use]
    pub fn new(config: &ParticlesConfig, width: u32, height: u32, rng: R) -> Self {
        Self {
            pool: RecyclingPool::new(),
            active: Vec::new(),
            targets: Vec::new(),
            width: width as f32,
            height: height as f32,
            style: config.style.to_style(),
            spawn: config.spawn.clone(),
            motion: config.params,
            fade: config.fade,
            rng,
        }
    }

    /// Changes the canvas bounds used for spawning and drifting.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;
    }

    /// Canvas bounds.
    #[must_use]
    pub const fn bounds(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// The current target set.
    #[must_use]
    pub fn targets(&self) -> &[Vector2] {
        &self.targets
    }

    /// Number of particles with a text target.
    #[inline]
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Number of retired particles waiting for reuse.
    #[inline]
    #[must_use]
    pub fn pooled_count(&self) -> usize {
        self.pool.free_count()
    }

    /// Number of particles ever created.
    #[inline]
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.pool.len()
    }

    /// Active particles in assignment order.
    pub fn active_particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.active.iter().filter_map(|&handle| self.pool.get(handle))
    }

    /// Pooled particles in free-stack order.
    pub fn pooled_particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.pool
            .free_handles()
            .iter()
            .filter_map(|&handle| self.pool.get(handle))
    }

    /// True when every active particle sits on its target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.active_particles().all(Particle::is_at_target)
    }

    /// Drawing style.
    #[must_use]
    pub const fn style(&self) -> &ParticleStyle {
        &self.style
    }

    /// Matches the active particles to `targets`.
    ///
    /// Excess particles are retired at random; missing ones are reused from
    /// the pool before new ones are allocated. Targets are then dealt out to
    /// a shuffled active list, so `targets[i]` ends up on a random particle.
    pub fn set_targets(&mut self, targets: Vec<Vector2>) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        if targets.is_empty() && !self.active.is_empty() {
            warn!(active = self.active.len(), "empty target set, retiring every particle");
        }

        shuffle(&mut self.active, &mut self.rng);

        while self.active.len() > targets.len() {
            let Some(handle) = self.active.pop() else {
                break;
            };
            let drift = self.random_canvas_point();
            if let Some(particle) = self.pool.get_mut(handle) {
                particle.retire(drift);
            }
            self.pool.free(handle);
            report.retired += 1;
        }

        while self.active.len() < targets.len() {
            let position = self.spawn_position();
            let handle = if let Some(handle) = self.pool.reuse() {
                if let Some(particle) = self.pool.get_mut(handle) {
                    particle.revive(position);
                }
                report.reused += 1;
                handle
            } else {
                report.created += 1;
                self.pool.allocate(Particle::new(position, self.fade))
            };
            self.active.push(handle);
        }

        shuffle(&mut self.active, &mut self.rng);

        for (&handle, &target) in self.active.iter().zip(&targets) {
            if let Some(particle) = self.pool.get_mut(handle) {
                particle.set_target(target);
            }
        }
        self.targets = targets;

        report.active = self.active.len();
        report.pooled = self.pool.free_count();
        debug!(?report, total = self.pool.len(), "reconciled particles");
        report
    }

    /// Where a new or revived particle appears.
    ///
    /// Inside the canvas by default. With border spawning, in a band of
    /// `border_offset` pixels around it: particles above or below the canvas
    /// when `x` is strictly inside it, anywhere along the band otherwise.
    /// The band is capped at [`MAX_BORDER_OFFSET`].
    pub fn spawn_position(&mut self) -> Vector2 {
        let (w, h) = (self.width, self.height);
        if !self.spawn.border_spawn {
            return Vector2::random_between(Vector2::ZERO, Vector2::new(w, h), &mut self.rng);
        }

        let band = self.spawn.border_offset.clamp(0.0, MAX_BORDER_OFFSET).round() as i32;
        let (wi, hi) = (w.round() as i32, h.round() as i32);

        let x = self.rng.int_between(-band, wi.saturating_add(band));
        let y = if x > 0 && x < wi {
            if self.rng.coin() {
                self.rng.int_between(-band, 0)
            } else {
                self.rng.int_between(hi, hi.saturating_add(band))
            }
        } else {
            self.rng.int_between(-band, hi.saturating_add(band))
        };

        Vector2::new(x as f32, y as f32)
    }

    fn random_canvas_point(&mut self) -> Vector2 {
        Vector2::random_between(Vector2::ZERO, Vector2::new(self.width, self.height), &mut self.rng)
    }

    /// One frame tick: every active particle, then every pooled one.
    pub fn update(&mut self) {
        let motion = self.motion;
        for &handle in &self.active {
            if let Some(particle) = self.pool.get_mut(handle) {
                particle.update(&motion);
            }
        }
        self.pool.for_each_free_mut(|_, particle| particle.update(&motion));
    }

    /// Draws active particles in assignment order, then pooled ones that
    /// are still fading.
    pub fn draw<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        for particle in self.active_particles().chain(self.pooled_particles()) {
            particle.draw(surface, &self.style);
        }
    }

    /// The random source.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}
