//! # DOTMORPH Core
//!
//! Leaf types shared by the particle engine and its render collaborators:
//! - `Vector2` value math used for positions, targets and directions
//! - `RandomSource`, the injectable randomness behind spawning and shuffling
//! - `RecyclingPool`, the arena that keeps every particle ever created
//!
//! ## Example
//!
//! ```rust
//! use dotmorph_core::{RecyclingPool, SeededRandom, Vector2};
//!
//! let mut rng = SeededRandom::new(7);
//! let mut pool: RecyclingPool<Vector2> = RecyclingPool::new();
//!
//! let handle = pool.allocate(Vector2::random_between(Vector2::ZERO, Vector2::new(10.0, 10.0), &mut rng));
//! assert!(pool.free(handle));
//! assert_eq!(pool.reuse(), Some(handle));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod math;
pub mod memory;
pub mod random;

pub use math::Vector2;
pub use memory::{PoolHandle, RecyclingPool};
pub use random::{RandomSource, SeededRandom};
