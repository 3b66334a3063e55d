//! Master limiter: hard ceiling on the mixed output.

/// Clamps samples to `[-ceiling, ceiling]` and remembers how often it had to.
#[derive(Debug, Clone)]
pub struct Limiter {
    ceiling: f32,
    clipped: u64,
}

impl Limiter {
    /// `ceiling` should be in `(0.0, 1.0]`.
    pub fn new(ceiling: f32) -> Self {
        debug_assert!(ceiling > 0.0 && ceiling <= 1.0);
        Self {
            ceiling,
            clipped: 0,
        }
    }

    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        if sample.abs() > self.ceiling {
            self.clipped += 1;
        }
        sample.clamp(-self.ceiling, self.ceiling)
    }

    pub fn ceiling(&self) -> f32 {
        self.ceiling
    }

    /// Samples clamped since creation.
    pub fn clipped(&self) -> u64 {
        self.clipped
    }
}

impl Default for Limiter {
    fn default() -> Self {
        Self::new(0.95)
    }
}
