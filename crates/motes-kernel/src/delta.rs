//! Per-tick time step.

/// Frame length at the 60 fps baseline, in milliseconds.
pub const BASELINE_FRAME_MS: f32 = 1000.0 / 60.0;

/// Time step handed to every update.
///
/// `value` is the raw elapsed time in milliseconds; `factor` is the same
/// time normalised against a 60 fps frame and scales every per-frame
/// increment so motion does not depend on the frame rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delta {
    /// Elapsed milliseconds
    pub value: f32,
    /// Elapsed time in 60 fps frames
    pub factor: f32,
}

impl Delta {
    /// Exactly one frame at 60 fps.
    pub const ONE_FRAME: Self = Self {
        value: BASELINE_FRAME_MS,
        factor: 1.0,
    };

    /// Creates a delta from explicit parts.
    #[must_use]
    pub const fn new(value: f32, factor: f32) -> Self {
        Self { value, factor }
    }

    /// Creates a delta from elapsed milliseconds.
    #[must_use]
    pub fn from_elapsed_ms(ms: f32) -> Self {
        Self {
            value: ms,
            factor: ms / BASELINE_FRAME_MS,
        }
    }
}

impl Default for Delta {
    fn default() -> Self {
        Self::ONE_FRAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_scales_with_frame_rate() {
        let half = Delta::from_elapsed_ms(BASELINE_FRAME_MS / 2.0);
        assert!((half.factor - 0.5).abs() < 1e-6);
        let thirty = Delta::from_elapsed_ms(1000.0 / 30.0);
        assert!((thirty.factor - 2.0).abs() < 1e-5);
    }
}
