//! Exponential smoothing for noisy per-frame targets.

/// Scalar that eases toward a target by a fixed fraction per step
///
/// Spectral data flickers frame to frame; mapping it straight onto visual
/// parameters makes the blob jitter. Each visual parameter keeps its own
/// instance with a rate tuned for how abrupt it may look.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedValue {
    current: f32,
    target: f32,
    rate: f32,
}

impl SmoothedValue {
    /// Create a tracker resting at `initial`
    ///
    /// `rate` must lie in (0, 1]; callers validate it through the tuning
    /// config. Values outside that range are clamped so the filter cannot
    /// diverge.
    pub fn new(initial: f32, rate: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            rate: rate.clamp(f32::EPSILON, 1.0),
        }
    }

    /// Move one step toward `target` and return the new value
    pub fn step(&mut self, target: f32) -> f32 {
        self.target = target;
        // Exact at rate 1
        self.current = self.current * (1.0 - self.rate) + target * self.rate;
        self.current
    }

    /// Jump straight to `value`, bypassing the rate
    pub fn snap(&mut self, value: f32) {
        self.current = value;
        self.target = value;
    }

    /// Keep the tracked value inside `[min, max]`
    ///
    /// Stops the state winding up past an output ceiling, so it starts
    /// falling as soon as the target drops back below it.
    pub fn clamp_current(&mut self, min: f32, max: f32) -> f32 {
        self.current = self.current.clamp(min, max);
        self.current
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }
}
