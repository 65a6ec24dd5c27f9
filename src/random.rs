//! Pluggable random source for spawn jitter.

/// Uniform random numbers in [0, 1)
///
/// Injected into the particle director so tests can script or seed the
/// jitter instead of relying on a global generator.
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;

    /// Uniform value in `[min, max)`
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_unit() * (max - min)
    }
}

impl RandomSource for fastrand::Rng {
    fn next_unit(&mut self) -> f32 {
        self.f32()
    }
}

/// Replays a fixed list of values, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Always returns `value`
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value.clamp(0.0, 1.0)
    }
}
