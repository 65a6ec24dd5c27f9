//! Fixed-capacity particle arena with swap-remove recycling.

use bytemuck::{Pod, Zeroable};

/// One star: position plus forward (+Z) speed
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Particle {
    pub position: [f32; 3],
    /// Units per second along +Z
    pub velocity: f32,
}

/// Index-addressed particle slots
///
/// Slots `[0, active)` are live; the rest are free and never handed out.
/// Removal swaps the last live slot into the hole, so order carries no
/// meaning and no slot is ever allocated or freed after construction.
pub struct ParticlePool {
    slots: Box<[Particle]>,
    active: usize,
}

impl ParticlePool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![Particle::default(); capacity].into_boxed_slice(),
            active: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn is_full(&self) -> bool {
        self.active == self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active == 0
    }

    /// Place a particle in the next free slot
    ///
    /// Returns `false` (dropping the particle) when the pool is full.
    pub fn push(&mut self, particle: Particle) -> bool {
        if self.is_full() {
            return false;
        }
        self.slots[self.active] = particle;
        self.active += 1;
        true
    }

    /// Remove the live particle at `index` by moving the last live one into it
    ///
    /// The slot at `index` then holds a particle that has not been visited
    /// yet by a forward scan; callers must re-examine it.
    pub fn swap_remove(&mut self, index: usize) -> Option<Particle> {
        if index >= self.active {
            return None;
        }
        let last = self.active - 1;
        let removed = self.slots[index];
        self.slots.swap(index, last);
        self.active = last;
        Some(removed)
    }

    /// Remove every live particle matching `expired`, visiting each once
    ///
    /// Returns the number removed.
    pub fn recycle_where(&mut self, mut expired: impl FnMut(&Particle) -> bool) -> usize {
        let mut removed = 0;
        let mut i = 0;
        while i < self.active {
            if expired(&self.slots[i]) {
                self.swap_remove(i);
                removed += 1;
                // Slot i now holds the former last particle: check it again
            } else {
                i += 1;
            }
        }
        removed
    }

    pub fn live(&self) -> &[Particle] {
        &self.slots[..self.active]
    }

    pub fn live_mut(&mut self) -> &mut [Particle] {
        &mut self.slots[..self.active]
    }

    /// Live particles as raw bytes for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.live())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_depth(z: f32) -> Particle {
        Particle {
            position: [0.0, 0.0, z],
            velocity: 1.0,
        }
    }

    #[test]
    fn test_push_until_full() {
        let mut pool = ParticlePool::with_capacity(3);
        assert!(pool.is_empty());
        assert!(pool.push(at_depth(0.0)));
        assert!(pool.push(at_depth(1.0)));
        assert!(pool.push(at_depth(2.0)));
        assert!(pool.is_full());
        assert!(!pool.push(at_depth(3.0)));
        assert_eq!(pool.active_count(), 3);
    }

    #[test]
    fn test_swap_remove_moves_last_into_hole() {
        let mut pool = ParticlePool::with_capacity(4);
        for z in [0.0, 1.0, 2.0, 3.0] {
            pool.push(at_depth(z));
        }

        let removed = pool.swap_remove(1);
        assert_eq!(removed, Some(at_depth(1.0)));
        assert_eq!(pool.active_count(), 3);
        assert_eq!(pool.live()[1], at_depth(3.0));
        assert_eq!(pool.swap_remove(3), None);
    }

    #[test]
    fn test_recycle_does_not_skip_swapped_in_particles() {
        // Consecutive expired particles, including the last one, which is
        // what gets swapped into each hole.
        let mut pool = ParticlePool::with_capacity(8);
        for z in [50.0, 0.0, 60.0, 70.0, 1.0, 80.0] {
            pool.push(at_depth(z));
        }

        let removed = pool.recycle_where(|p| p.position[2] > 30.0);
        assert_eq!(removed, 4);
        assert_eq!(pool.active_count(), 2);
        assert!(pool.live().iter().all(|p| p.position[2] <= 30.0));
    }

    #[test]
    fn test_recycle_everything() {
        let mut pool = ParticlePool::with_capacity(5);
        for _ in 0..5 {
            pool.push(at_depth(100.0));
        }
        assert_eq!(pool.recycle_where(|_| true), 5);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_as_bytes_covers_live_slots_only() {
        let mut pool = ParticlePool::with_capacity(10);
        pool.push(at_depth(0.0));
        pool.push(at_depth(1.0));

        assert_eq!(std::mem::size_of::<Particle>(), 16);
        assert_eq!(pool.as_bytes().len(), 32);
    }
}
