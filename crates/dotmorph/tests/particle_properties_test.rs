//! # Particle Lifecycle Properties
//!
//! Counting, assignment, snapping, fading and pool reuse, checked against
//! seeded runs of the particle system.

use dotmorph::config::{FadeConfig, ParticlesConfig};
use dotmorph::{MotionParams, Particle, ParticleSystem};
use dotmorph_core::{RandomSource, SeededRandom, Vector2};

fn targets(rng: &mut SeededRandom, count: usize) -> Vec<Vector2> {
    (0..count)
        .map(|_| Vector2::random_between(Vector2::ZERO, Vector2::new(300.0, 120.0), rng))
        .collect()
}

fn sorted_bits(points: impl IntoIterator<Item = Vector2>) -> Vec<(u32, u32)> {
    let mut bits: Vec<(u32, u32)> = points.into_iter().map(|p| (p.x.to_bits(), p.y.to_bits())).collect();
    bits.sort_unstable();
    bits
}

/// Active count tracks the target count and nothing is ever lost.
#[test]
fn test_count_invariant_over_random_reconciliations() {
    let mut rng = SeededRandom::new(42);
    let mut system = ParticleSystem::new(&ParticlesConfig::default(), 300, 120, SeededRandom::new(1));
    let mut last_total = 0;

    for round in 0..60 {
        let count = rng.int_between(0, 400) as usize;
        let report = system.set_targets(targets(&mut rng, count));

        assert_eq!(system.active_count(), count, "round {round}");
        assert_eq!(report.active, count);
        assert_eq!(system.active_count() + system.pooled_count(), system.total_count());
        assert!(system.total_count() >= last_total, "particles were destroyed");
        assert_eq!(report.created, system.total_count() - last_total);
        last_total = system.total_count();

        for _ in 0..5 {
            system.update();
        }
    }
}

/// Every active particle has a target and together they cover the target set.
#[test]
fn test_assignment_is_complete() {
    let mut rng = SeededRandom::new(7);
    let mut system = ParticleSystem::new(&ParticlesConfig::default(), 300, 120, SeededRandom::new(2));

    for count in [120, 30, 250, 0, 80] {
        let set = targets(&mut rng, count);
        system.set_targets(set.clone());

        let assigned: Vec<Vector2> = system.active_particles().filter_map(Particle::target).collect();
        assert_eq!(assigned.len(), count);
        assert_eq!(sorted_bits(assigned), sorted_bits(set));
        assert!(system.active_particles().all(Particle::is_alive));
    }
}

/// A particle heading to (100, 0) ends exactly there and never passes it.
#[test]
fn test_snap_lands_exactly_without_overshoot() {
    let params = MotionParams {
        target_radius: 10.0,
        speed: 10.0,
    };
    let mut particle = Particle::new(Vector2::new(0.0, 0.0), FadeConfig::default());
    particle.set_target(Vector2::new(100.0, 0.0));

    for _ in 0..100 {
        particle.update(&params);
        assert!(particle.position().x <= 100.0);
        assert!(particle.position().y.abs() < f32::EPSILON);
        if particle.is_at_target() {
            break;
        }
    }

    assert_eq!(particle.position(), Vector2::new(100.0, 0.0));
}

/// Fade stays in [0, 1] through repeated retire and revive cycles.
#[test]
fn test_fade_stays_in_bounds() {
    let mut rng = SeededRandom::new(99);
    let mut system = ParticleSystem::new(&ParticlesConfig::default(), 300, 120, SeededRandom::new(3));

    for _ in 0..40 {
        let count = rng.int_between(0, 200) as usize;
        system.set_targets(targets(&mut rng, count));

        let frames = rng.int_between(0, 12);
        for _ in 0..frames {
            system.update();
            for particle in system.active_particles().chain(system.pooled_particles()) {
                assert!((0.0..=1.0).contains(&particle.fade()), "fade {}", particle.fade());
            }
        }
    }
}

/// Retiring during fade-in fades out from where the fade was.
#[test]
fn test_retire_mid_fade_in() {
    let fade = FadeConfig {
        fade_in_step: 0.1,
        fade_out_step: 0.1,
    };
    let mut particle = Particle::new(Vector2::ZERO, fade);
    for _ in 0..3 {
        particle.advance_fade();
    }
    let before = particle.fade();

    particle.retire(Vector2::new(10.0, 10.0));
    assert!((particle.fade() - before).abs() < f32::EPSILON);

    particle.advance_fade();
    assert!((particle.fade() - (before - 0.1)).abs() < 1e-6);
}

/// Retargeting onto the current position is a no-op, not a division by zero.
#[test]
fn test_zero_distance_retarget() {
    let params = MotionParams::default();
    let here = Vector2::new(42.0, 17.0);
    let mut particle = Particle::new(here, FadeConfig::default());

    particle.set_target(here);
    assert!(particle.start_distance().abs() < f32::EPSILON);

    for _ in 0..3 {
        particle.update(&params);
        assert_eq!(particle.position(), here);
        assert!(particle.position().x.is_finite() && particle.position().y.is_finite());
    }
}

/// Shrinking by N and growing back by N reuses every retired particle.
#[test]
fn test_pool_reuse_creates_nothing() {
    let mut rng = SeededRandom::new(5);
    let mut system = ParticleSystem::new(&ParticlesConfig::default(), 300, 120, SeededRandom::new(4));

    system.set_targets(targets(&mut rng, 150));
    let total = system.total_count();

    let shrink = system.set_targets(targets(&mut rng, 90));
    assert_eq!(shrink.retired, 60);

    let grow = system.set_targets(targets(&mut rng, 150));
    assert_eq!(grow.created, 0);
    assert_eq!(grow.reused, 60);
    assert_eq!(system.total_count(), total);
    assert_eq!(system.pooled_count(), 0);
}

/// Same seeds, same particles.
#[test]
fn test_seeded_runs_are_reproducible() {
    let run = || {
        let mut rng = SeededRandom::new(11);
        let mut system = ParticleSystem::new(&ParticlesConfig::default(), 300, 120, SeededRandom::new(12));
        system.set_targets(targets(&mut rng, 64));
        for _ in 0..10 {
            system.update();
        }
        system.set_targets(targets(&mut rng, 20));
        for _ in 0..10 {
            system.update();
        }
        system.active_particles().map(Particle::position).collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}
