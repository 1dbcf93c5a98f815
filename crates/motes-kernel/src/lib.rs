//! # Motes Kernel
//!
//! Per-particle update engine for 2-D particle simulations.
//!
//! This crate provides the per-tick state transitions of a particle:
//! - Life cycle (spawn delay, expiry, respawn, terminal death)
//! - Oscillating opacity and size with loop caps and destroy-at-bound
//! - Rotation, tilt, roll and wobble angles
//! - HSL fill and stroke color cycling
//! - Edge handling per canvas side (bounce, split, destroy, wrap, none)
//! - Movement with gravity and distance limits
//!
//! ## Tick Order
//!
//! The [`Container`] visits every live particle once per tick. Each
//! particle is moved first, then handed to the [`Updater`], which runs its
//! steps in a fixed order and stops as soon as one of them destroys the
//! particle.
//!
//! ## Removal
//!
//! Particles are never removed mid-iteration. Edge policies mark them
//! destroyed and record a [`Removal`]; the container compacts the
//! collection once the tick is over.
//!
//! ## Plugins
//!
//! A [`ParticlePlugin`] registered with the container gets the first chance
//! at every bounce and can replace the default reflection entirely.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod bounce;
pub mod container;
pub mod delta;
pub mod mover;
pub mod options;
pub mod particle;
pub mod plugin;
pub mod updater;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::bounce::*;
    pub use crate::container::*;
    pub use crate::delta::*;
    pub use crate::mover::*;
    pub use crate::options::*;
    pub use crate::particle::*;
    pub use crate::plugin::*;
    pub use crate::updater::*;
}

pub use prelude::*;
