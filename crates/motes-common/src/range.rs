//! Range values: a fixed number or a `{ min, max }` interval sampled on use.

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;

/// A number that may be given either exactly or as an interval.
///
/// Deserializes from a bare number (`5`) or a table (`{ min = 1, max = 5 }`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeValue {
    /// Always this value
    Fixed(f32),
    /// Uniformly sampled from `[min, max)`
    Range {
        /// Lower bound
        min: f32,
        /// Upper bound
        max: f32,
    },
}

impl RangeValue {
    /// Creates a range, collapsing equal bounds to a fixed value.
    #[must_use]
    pub fn new(min: f32, max: f32) -> Self {
        if min == max {
            Self::Fixed(min)
        } else {
            Self::Range { min, max }
        }
    }

    /// Lower bound of the range.
    #[must_use]
    pub fn min(&self) -> f32 {
        match *self {
            Self::Fixed(v) => v,
            Self::Range { min, max } => min.min(max),
        }
    }

    /// Upper bound of the range.
    #[must_use]
    pub fn max(&self) -> f32 {
        match *self {
            Self::Fixed(v) => v,
            Self::Range { min, max } => min.max(max),
        }
    }

    /// Draws a value; fixed values are returned without consuming randomness.
    pub fn sample(&self, rng: &mut dyn RandomSource) -> f32 {
        match *self {
            Self::Fixed(v) => v,
            Self::Range { .. } => rng.range(self.min(), self.max()),
        }
    }
}

impl Default for RangeValue {
    fn default() -> Self {
        Self::Fixed(0.0)
    }
}

impl From<f32> for RangeValue {
    fn from(value: f32) -> Self {
        Self::Fixed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;

    #[test]
    fn test_fixed_does_not_draw() {
        let mut rng = SequenceRandom::new(vec![0.5, 0.9]);
        assert_eq!(RangeValue::Fixed(3.0).sample(&mut rng), 3.0);
        // first value still unconsumed
        assert_eq!(RangeValue::new(0.0, 10.0).sample(&mut rng), 5.0);
    }

    #[test]
    fn test_inverted_bounds_normalised() {
        let r = RangeValue::Range { min: 9.0, max: 1.0 };
        assert_eq!(r.min(), 1.0);
        assert_eq!(r.max(), 9.0);
    }

    #[test]
    fn test_deserialize_both_shapes() {
        let fixed: RangeValue = serde_json::from_str("2.5").expect("number");
        assert_eq!(fixed, RangeValue::Fixed(2.5));
        let range: RangeValue = serde_json::from_str(r#"{"min": 1, "max": 4}"#).expect("table");
        assert_eq!(range, RangeValue::Range { min: 1.0, max: 4.0 });
    }
}
