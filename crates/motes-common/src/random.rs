//! Seedable random sources.
//!
//! Every random draw the simulation makes (respawn position, color jitter,
//! wrap-around coordinate, range sampling) goes through [`RandomSource`] so a
//! run can be replayed from its seed.

/// A source of uniformly distributed floats.
pub trait RandomSource {
    /// Returns a float in `[0, 1)`.
    fn next_f32(&mut self) -> f32;

    /// Returns a float in `[min, max)`, or `min` when the range is empty.
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}

/// [`RandomSource`] backed by `fastrand`.
#[derive(Debug, Clone)]
pub struct FastRandom {
    rng: fastrand::Rng,
}

impl FastRandom {
    /// Creates a source with a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Creates a source seeded from the environment.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }
}

impl Default for FastRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for FastRandom {
    fn next_f32(&mut self) -> f32 {
        self.rng.f32()
    }
}

/// Replays a fixed list of values in a loop.
///
/// Values are expected in `[0, 1)`; an empty list always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct SequenceRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceRandom {
    /// Creates a source cycling through `values`.
    #[must_use]
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Creates a source that always returns `value`.
    #[must_use]
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRandom {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value
    }
}
