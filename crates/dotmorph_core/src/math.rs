//! 2D vector math for particle positions and targets.

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::random::RandomSource;

/// 2D point or direction.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vector2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vector2 {
    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// Unit vector pointing up (+Y)
    pub const UP: Self = Self::new(0.0, 1.0);
    /// Unit vector pointing down (-Y)
    pub const DOWN: Self = Self::new(0.0, -1.0);
    /// Unit vector pointing left (-X)
    pub const LEFT: Self = Self::new(-1.0, 0.0);
    /// Unit vector pointing right (+X)
    pub const RIGHT: Self = Self::new(1.0, 0.0);
    /// Both components one
    pub const ONE: Self = Self::new(1.0, 1.0);
    /// Both components minus one
    pub const NONE: Self = Self::new(-1.0, -1.0);

    /// Creates a new vector.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Length squared (avoids sqrt)
    #[inline]
    #[must_use]
    pub fn magnitude_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean length.
    #[inline]
    #[must_use]
    pub fn magnitude(self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Returns the unit vector in the same direction.
    ///
    /// A zero-length vector has no direction; the zero vector is returned
    /// instead of dividing by zero.
    #[must_use]
    pub fn normalize(self) -> Self {
        let magnitude = self.magnitude();
        if magnitude <= f32::EPSILON {
            return Self::ZERO;
        }
        Self::new(self.x / magnitude, self.y / magnitude)
    }

    /// Distance between two points.
    #[inline]
    #[must_use]
    pub fn distance(a: Self, b: Self) -> f32 {
        (a - b).magnitude()
    }

    /// Squared distance between two points, for cheap comparisons.
    #[inline]
    #[must_use]
    pub fn distance_squared(a: Self, b: Self) -> f32 {
        (a - b).magnitude_squared()
    }

    /// Midpoint of two points.
    #[must_use]
    pub fn between(a: Self, b: Self) -> Self {
        Self::new(a.x + (b.x - a.x) / 2.0, a.y + (b.y - a.y) / 2.0)
    }

    /// Non-normalized vector pointing from `from` to `to`.
    #[inline]
    #[must_use]
    pub fn vector_to(from: Self, to: Self) -> Self {
        to - from
    }

    /// Random point with integer coordinates inside the box spanned by `a` and `b`
    /// (bounds inclusive).
    pub fn random_between<R: RandomSource + ?Sized>(a: Self, b: Self, rng: &mut R) -> Self {
        Self::new(
            rng.int_between(a.x.round() as i32, b.x.round() as i32) as f32,
            rng.int_between(a.y.round() as i32, b.y.round() as i32) as f32,
        )
    }

    /// Random point offset from `center` by integers in `[-range, range]` on each axis.
    pub fn random_in_range<R: RandomSource + ?Sized>(center: Self, range: i32, rng: &mut R) -> Self {
        let range = range.saturating_abs();
        Self::new(
            center.x + rng.int_between(-range, range) as f32,
            center.y + rng.int_between(-range, range) as f32,
        )
    }
}

impl Add for Vector2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl MulAssign<f32> for Vector2 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Neg for Vector2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(f32, f32)> for Vector2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;

    #[test]
    fn test_distance_and_squared() {
        let a = Vector2::new(0.0, 0.0);
        let b = Vector2::new(3.0, 4.0);

        assert!((Vector2::distance(a, b) - 5.0).abs() < f32::EPSILON);
        assert!((Vector2::distance_squared(a, b) - 25.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        assert_eq!(Vector2::ZERO.normalize(), Vector2::ZERO);
    }

    #[test]
    fn test_normalize_unit_length() {
        let n = Vector2::new(10.0, -10.0).normalize();
        assert!((n.magnitude() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_vector_to_is_not_normalized() {
        let v = Vector2::vector_to(Vector2::new(1.0, 1.0), Vector2::new(4.0, 5.0));
        assert_eq!(v, Vector2::new(3.0, 4.0));
    }

    #[test]
    fn test_mutating_ops() {
        let mut v = Vector2::new(1.0, 2.0);
        v += Vector2::ONE;
        v *= 2.0;
        assert_eq!(v, Vector2::new(4.0, 6.0));
    }

    #[test]
    fn test_between() {
        let mid = Vector2::between(Vector2::new(-2.0, 0.0), Vector2::new(2.0, 8.0));
        assert_eq!(mid, Vector2::new(0.0, 4.0));
    }

    #[test]
    fn test_random_helpers_stay_in_bounds() {
        let mut rng = SeededRandom::new(99);
        for _ in 0..500 {
            let p = Vector2::random_between(Vector2::ZERO, Vector2::new(20.0, 5.0), &mut rng);
            assert!((0.0..=20.0).contains(&p.x));
            assert!((0.0..=5.0).contains(&p.y));
            assert_eq!(p.x.fract(), 0.0);

            let q = Vector2::random_in_range(Vector2::new(100.0, 100.0), 3, &mut rng);
            assert!((97.0..=103.0).contains(&q.x));
            assert!((97.0..=103.0).contains(&q.y));
        }
    }

    #[test]
    fn test_random_in_range_accepts_any_range() {
        let mut rng = SeededRandom::new(3);
        for _ in 0..100 {
            let p = Vector2::random_in_range(Vector2::ZERO, i32::MIN, &mut rng);
            assert!(p.x.abs() <= i32::MAX as f32);
            assert!(p.y.abs() <= i32::MAX as f32);

            let q = Vector2::random_in_range(Vector2::new(10.0, 10.0), -2, &mut rng);
            assert!((8.0..=12.0).contains(&q.x));
            assert!((8.0..=12.0).contains(&q.y));
        }
    }
}
