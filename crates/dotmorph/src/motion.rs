//! Eased motion toward a target.
//!
//! A particle covers its path in steps of at most `speed` pixels. The step
//! shrinks with a cosine curve as the particle approaches its target, but
//! never below `target_radius` pixels, and snaps onto the target once
//! inside that radius.

use std::f32::consts::PI;

use dotmorph_core::Vector2;

use crate::config::MotionParams;

/// Result of one motion step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionStep {
    /// Position after the step.
    pub position: Vector2,
    /// Distance to the target measured before the step.
    pub distance: f32,
    /// True if the step snapped onto the target.
    pub snapped: bool,
}

/// Cosine ease over path progress: 1 at the start of the path, 0.5 halfway
/// and 0 at the end.
#[inline]
#[must_use]
pub fn cosine_ease(progress: f32) -> f32 {
    ((PI * progress).cos() + 1.0) / 2.0
}

/// Fraction of `speed` to move this frame.
///
/// `start_distance` is the path length when the target was assigned. A
/// zero-length path counts as not started.
#[must_use]
pub fn smoothing_factor(start_distance: f32, current_distance: f32, params: &MotionParams) -> f32 {
    let progress = if start_distance > f32::EPSILON {
        (start_distance - current_distance) / start_distance
    } else {
        0.0
    };
    (params.target_radius / params.speed).max(cosine_ease(progress))
}

/// Moves `position` one frame toward `target`.
///
/// The step length is clamped to the remaining distance, so a particle never
/// passes its target.
#[must_use]
pub fn step_toward(
    position: Vector2,
    target: Vector2,
    start_distance: f32,
    params: &MotionParams,
) -> MotionStep {
    let distance = Vector2::distance(position, target);

    if distance < params.target_radius || distance <= f32::EPSILON {
        return MotionStep {
            position: target,
            distance,
            snapped: true,
        };
    }

    let factor = smoothing_factor(start_distance, distance, params);
    let length = (factor * params.speed).min(distance);
    let direction = Vector2::vector_to(position, target).normalize();

    MotionStep {
        position: position + direction * length,
        distance,
        snapped: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> MotionParams {
        MotionParams {
            target_radius: 10.0,
            speed: 10.0,
        }
    }

    #[test]
    fn test_cosine_ease_endpoints() {
        assert!((cosine_ease(0.0) - 1.0).abs() < 1e-6);
        assert!((cosine_ease(0.5) - 0.5).abs() < 1e-6);
        assert!(cosine_ease(1.0).abs() < 1e-6);
    }

    #[test]
    fn test_smoothing_floor() {
        let params = MotionParams {
            target_radius: 2.0,
            speed: 10.0,
        };
        // Near the end of the path the cosine term vanishes.
        assert!((smoothing_factor(100.0, 0.0, &params) - 0.2).abs() < 1e-6);
        // At the start it is 1.
        assert!((smoothing_factor(100.0, 100.0, &params) - 1.0).abs() < 1e-6);
        // A zero-length path never divides by zero.
        assert!((smoothing_factor(0.0, 5.0, &params) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_snaps_inside_radius() {
        let step = step_toward(Vector2::new(95.0, 0.0), Vector2::new(100.0, 0.0), 100.0, &params());
        assert!(step.snapped);
        assert_eq!(step.position, Vector2::new(100.0, 0.0));
    }

    #[test]
    fn test_zero_radius_still_snaps_on_arrival() {
        let params = MotionParams {
            target_radius: 0.0,
            speed: 10.0,
        };
        let target = Vector2::new(3.0, 4.0);
        let step = step_toward(target, target, 0.0, &params);
        assert!(step.snapped);
        assert_eq!(step.position, target);
    }

    #[test]
    fn test_step_never_overshoots() {
        let params = MotionParams {
            target_radius: 1.0,
            speed: 50.0,
        };
        let step = step_toward(Vector2::new(0.0, 0.0), Vector2::new(20.0, 0.0), 20.0, &params);
        assert!(!step.snapped);
        assert!((step.position.x - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_first_step_moves_full_speed() {
        let step = step_toward(Vector2::new(0.0, 0.0), Vector2::new(0.0, 100.0), 100.0, &params());
        assert!((step.position.y - 10.0).abs() < 1e-4);
        assert!((step.distance - 100.0).abs() < 1e-4);
    }
}
