//! ID types for particles.

use serde::{Deserialize, Serialize};

/// Identifier of a particle within its container.
///
/// Ids are handed out in increasing order by the owning collection, so a
/// smaller id always means an older particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticleId(u64);

impl ParticleId {
    /// First id handed out by a fresh collection.
    pub const FIRST: Self = Self(1);

    /// Creates a particle ID from a raw value.
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns the id following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for ParticleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
