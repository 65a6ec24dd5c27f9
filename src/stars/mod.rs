//! Star field: a bounded particle stream reacting to spectral brightness.

mod director;
mod pool;

// Re-export public types
pub use director::ParticleDirector;
pub use pool::{Particle, ParticlePool};

/// Per-tick star field output and spawn accounting
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StarFrame {
    /// Material opacity in [0, 1]
    pub opacity: f32,
    /// Number of live particles (`ParticlePool::live().len()`)
    pub active_count: usize,
    /// Particles spawned this tick
    pub spawned: usize,
    /// Spawns dropped this tick because the pool was full
    pub dropped: usize,
    /// Particles recycled past the near plane this tick
    pub recycled: usize,
}
