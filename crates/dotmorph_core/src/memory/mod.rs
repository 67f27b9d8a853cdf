//! # Memory Management
//!
//! Recycling storage for particles.
//!
//! ## Design Philosophy
//!
//! A particle is created once and reused forever:
//! - Retired particles park their slot on a free stack
//! - Spawning pops the free stack before allocating a new slot
//! - The slot count only ever grows

mod pool;

pub use pool::{PoolHandle, RecyclingPool};
