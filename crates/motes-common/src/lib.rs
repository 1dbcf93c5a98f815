//! # Motes Common
//!
//! Common types, numeric helpers, and shared abstractions for Motes.
//!
//! This crate provides foundational types used across all Motes crates:
//! - Canvas geometry (dimensions, bounds, edge directions)
//! - Numeric helpers (clamp, bounds computation, inside-canvas test)
//! - Range values sampled from options
//! - Seedable random sources
//! - ID types and common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod geometry;
pub mod ids;
pub mod random;
pub mod range;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::geometry::*;
    pub use crate::ids::*;
    pub use crate::random::*;
    pub use crate::range::*;
}

pub use glam::Vec2;
pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_inside_canvas() {
        let canvas = Dimension::new(100.0, 50.0);
        assert!(is_point_inside(Vec2::new(50.0, 25.0), canvas, 5.0, None));
        assert!(!is_point_inside(Vec2::new(-10.0, 25.0), canvas, 5.0, None));
    }

    #[test]
    fn test_range_sampling_is_seeded() {
        let range = RangeValue::new(1.0, 5.0);
        let mut a = FastRandom::seeded(7);
        let mut b = FastRandom::seeded(7);
        assert_eq!(range.sample(&mut a), range.sample(&mut b));
    }

    #[test]
    fn test_particle_id_ordering() {
        let first = ParticleId::from_raw(1);
        let second = first.next();
        assert!(second > first);
        assert_eq!(second.raw(), 2);
    }
}
