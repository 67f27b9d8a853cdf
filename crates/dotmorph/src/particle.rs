//! A single particle: position, target and fade.
//!
//! Particles are never destroyed. A retired particle drifts toward a random
//! point while it fades out, then parks until it is revived somewhere else.

use dotmorph_core::Vector2;
use dotmorph_render::{ParticleStyle, Rect, RenderSurface};

use crate::config::{FadeConfig, MotionParams};
use crate::motion;

/// Fade phase of a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadeState {
    /// Fade is rising toward 1.
    #[default]
    FadingIn,
    /// Fully visible.
    Steady,
    /// Fade is falling toward 0.
    FadingOut,
    /// Fully faded after retirement. Parked particles neither move nor draw.
    Idle,
}

/// A particle of the dotted text effect.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: Vector2,
    /// Position when the current target was assigned.
    start_position: Vector2,
    target: Option<Vector2>,
    /// Distance to the target when it was assigned.
    start_distance: f32,
    /// Distance to the target at the last motion step.
    current_distance: f32,
    fade: f32,
    fade_in_step: f32,
    fade_out_step: f32,
    alive: bool,
    state: FadeState,
}

impl Particle {
    /// Creates a live particle at `position`. It starts invisible and fades in.
    #[must_use]
    pub fn new(position: Vector2, fade: FadeConfig) -> Self {
        Self {
            position,
            start_position: position,
            target: None,
            start_distance: 0.0,
            current_distance: 0.0,
            fade: 0.0,
            fade_in_step: fade.fade_in_step,
            fade_out_step: fade.fade_out_step,
            alive: true,
            state: FadeState::FadingIn,
        }
    }

    /// Current position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Vector2 {
        self.position
    }

    /// Position when the current target was assigned.
    #[inline]
    #[must_use]
    pub const fn start_position(&self) -> Vector2 {
        self.start_position
    }

    /// Current target, if any.
    #[inline]
    #[must_use]
    pub const fn target(&self) -> Option<Vector2> {
        self.target
    }

    /// Path length when the current target was assigned.
    #[inline]
    #[must_use]
    pub const fn start_distance(&self) -> f32 {
        self.start_distance
    }

    /// Distance to the target at the last motion step.
    #[inline]
    #[must_use]
    pub const fn current_distance(&self) -> f32 {
        self.current_distance
    }

    /// Opacity multiplier in `[0, 1]`.
    #[inline]
    #[must_use]
    pub const fn fade(&self) -> f32 {
        self.fade
    }

    /// Fade phase.
    #[inline]
    #[must_use]
    pub const fn fade_state(&self) -> FadeState {
        self.state
    }

    /// False once retired, until revived.
    #[inline]
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// True for retired particles that have fully faded out.
    #[inline]
    #[must_use]
    pub fn is_parked(&self) -> bool {
        !self.alive && self.state == FadeState::Idle
    }

    /// True if the particle sits exactly on its target.
    #[must_use]
    pub fn is_at_target(&self) -> bool {
        self.target.is_some_and(|target| target == self.position)
    }

    /// Assigns a new target. The path restarts from the current position.
    pub fn set_target(&mut self, target: Vector2) {
        self.target = Some(target);
        self.start_position = self.position;
        self.start_distance = Vector2::distance(self.position, target);
        self.current_distance = self.start_distance;
    }

    /// Retires the particle: it fades out from its current fade while
    /// drifting toward `drift_target`.
    pub fn retire(&mut self, drift_target: Vector2) {
        self.alive = false;
        self.set_target(drift_target);
        self.state = if self.fade <= 0.0 {
            self.fade = 0.0;
            FadeState::Idle
        } else {
            FadeState::FadingOut
        };
    }

    /// Brings a retired particle back at `position`, invisible and fading in.
    /// The previous target is dropped.
    pub fn revive(&mut self, position: Vector2) {
        self.alive = true;
        self.position = position;
        self.start_position = position;
        self.target = None;
        self.start_distance = 0.0;
        self.current_distance = 0.0;
        self.fade = 0.0;
        self.state = FadeState::FadingIn;
    }

    /// Advances the fade by one tick.
    pub fn advance_fade(&mut self) {
        match self.state {
            FadeState::FadingIn => {
                self.fade = (self.fade + self.fade_in_step).min(1.0);
                if self.fade >= 1.0 {
                    self.state = FadeState::Steady;
                }
            }
            FadeState::FadingOut => {
                self.fade = (self.fade - self.fade_out_step).max(0.0);
                if self.fade <= 0.0 {
                    self.state = FadeState::Idle;
                }
            }
            FadeState::Steady | FadeState::Idle => {}
        }
    }

    /// Moves one frame toward the target. Particles without a target stay put.
    pub fn step(&mut self, params: &MotionParams) {
        let Some(target) = self.target else {
            return;
        };
        let step = motion::step_toward(self.position, target, self.start_distance, params);
        self.position = step.position;
        self.current_distance = step.distance;
    }

    /// One frame tick: motion, then fade. Parked particles are skipped.
    pub fn update(&mut self, params: &MotionParams) {
        if self.is_parked() {
            return;
        }
        self.step(params);
        self.advance_fade();
    }

    /// Draws the particle as a filled square with an optional outline.
    pub fn draw<S: RenderSurface + ?Sized>(&self, surface: &mut S, style: &ParticleStyle) {
        if self.is_parked() {
            return;
        }

        let square = Rect::new(self.position.x, self.position.y, style.size, style.size);
        let fill = style.color.fade(self.fade);
        surface.fill_rect(square.x, square.y, square.width, square.height, fill);

        if style.stroke_size > 0.0 {
            let stroke = style.stroke_color.fade(self.fade);
            for band in square.outline(style.stroke_size) {
                surface.fill_rect(band.x, band.y, band.width, band.height, stroke);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotmorph_render::{AlphaGrid, Color, FontSpec};

    fn fade_config() -> FadeConfig {
        FadeConfig {
            fade_in_step: 0.25,
            fade_out_step: 0.25,
        }
    }

    #[derive(Default)]
    struct Fills(Vec<(Rect, Color)>);

    impl RenderSurface for Fills {
        fn measure_text_width(&mut self, _text: &str, _font: &FontSpec) -> f32 {
            0.0
        }

        fn rasterize_text(&mut self, _text: &str, _font: &FontSpec, width: u32, height: u32) -> AlphaGrid {
            AlphaGrid::new(width, height)
        }

        fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
            self.0.push((Rect::new(x, y, width, height), color));
        }
    }

    #[test]
    fn test_fades_in_to_steady() {
        let mut particle = Particle::new(Vector2::ZERO, fade_config());
        assert_eq!(particle.fade_state(), FadeState::FadingIn);

        for _ in 0..4 {
            particle.advance_fade();
        }
        assert!((particle.fade() - 1.0).abs() < f32::EPSILON);
        assert_eq!(particle.fade_state(), FadeState::Steady);

        particle.advance_fade();
        assert!((particle.fade() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_retire_mid_fade_starts_from_current_value() {
        let mut particle = Particle::new(Vector2::ZERO, fade_config());
        particle.advance_fade();
        particle.advance_fade();

        particle.retire(Vector2::new(5.0, 5.0));
        assert_eq!(particle.fade_state(), FadeState::FadingOut);
        assert!((particle.fade() - 0.5).abs() < f32::EPSILON);

        particle.advance_fade();
        assert!((particle.fade() - 0.25).abs() < f32::EPSILON);
        particle.advance_fade();
        assert!(particle.fade().abs() < f32::EPSILON);
        assert!(particle.is_parked());
    }

    #[test]
    fn test_retire_invisible_parks_immediately() {
        let mut particle = Particle::new(Vector2::ZERO, fade_config());
        particle.retire(Vector2::new(5.0, 5.0));
        assert!(particle.is_parked());
        assert_eq!(particle.target(), Some(Vector2::new(5.0, 5.0)));
    }

    #[test]
    fn test_revive_resets_fade_and_target() {
        let mut particle = Particle::new(Vector2::ZERO, fade_config());
        particle.set_target(Vector2::new(1.0, 1.0));
        particle.retire(Vector2::new(5.0, 5.0));

        particle.revive(Vector2::new(-3.0, 2.0));
        assert!(particle.is_alive());
        assert_eq!(particle.position(), Vector2::new(-3.0, 2.0));
        assert_eq!(particle.target(), None);
        assert!(particle.fade().abs() < f32::EPSILON);
        assert_eq!(particle.fade_state(), FadeState::FadingIn);
    }

    #[test]
    fn test_set_target_restarts_path() {
        let mut particle = Particle::new(Vector2::new(0.0, 0.0), fade_config());
        particle.set_target(Vector2::new(30.0, 40.0));

        assert_eq!(particle.start_position(), Vector2::new(0.0, 0.0));
        assert!((particle.start_distance() - 50.0).abs() < 1e-4);
        assert!((particle.current_distance() - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_target_no_motion() {
        let params = MotionParams::default();
        let mut particle = Particle::new(Vector2::new(7.0, 8.0), fade_config());
        particle.update(&params);
        assert_eq!(particle.position(), Vector2::new(7.0, 8.0));
    }

    #[test]
    fn test_parked_particle_is_frozen() {
        let params = MotionParams::default();
        let mut particle = Particle::new(Vector2::ZERO, fade_config());
        particle.retire(Vector2::new(100.0, 0.0));
        particle.update(&params);
        assert_eq!(particle.position(), Vector2::ZERO);

        let mut surface = Fills::default();
        particle.draw(&mut surface, &ParticleStyle::default());
        assert!(surface.0.is_empty());
    }

    #[test]
    fn test_draw_scales_alpha_by_fade() {
        let mut particle = Particle::new(Vector2::new(2.0, 3.0), fade_config());
        particle.advance_fade();
        particle.advance_fade();

        let mut surface = Fills::default();
        particle.draw(&mut surface, &ParticleStyle::default());

        assert_eq!(surface.0.len(), 1);
        let (rect, color) = surface.0[0];
        assert_eq!(rect, Rect::new(2.0, 3.0, 1.0, 1.0));
        assert!((color.a - 0.375).abs() < 1e-6);
    }

    #[test]
    fn test_draw_outline_when_stroked() {
        let particle = Particle::new(Vector2::new(2.0, 3.0), fade_config());
        let style = ParticleStyle {
            size: 4.0,
            stroke_size: 1.0,
            ..ParticleStyle::default()
        };

        let mut surface = Fills::default();
        particle.draw(&mut surface, &style);
        assert_eq!(surface.0.len(), 5);
        assert_eq!(surface.0[1].0, Rect::new(1.0, 2.0, 6.0, 1.0));
    }
}
