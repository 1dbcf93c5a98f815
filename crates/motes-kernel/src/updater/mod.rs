//! Per-particle updater.
//!
//! One call to [`Updater::update`] advances a single particle by one tick:
//! life first, then the animated properties, then the edge handling. Once
//! a step destroys the particle the remaining steps are skipped.
//!
//! Removal is deferred. Steps that take a particle off the canvas mark it
//! destroyed and record a [`Removal`] in the tick context; the container
//! drops destroyed particles after every particle has been visited.

mod animation;
mod color;
mod life;
mod out_modes;

pub use color::{update_color_value, ColorChannel};

use motes_common::{Dimension, ParticleId, RandomSource};
use tracing::trace;

use crate::delta::Delta;
use crate::particle::Particle;
use crate::plugin::PluginRegistry;

/// A particle leaving the collection at the end of the tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removal {
    /// Removed particle
    pub id: ParticleId,
    /// True when the removal should not trigger any visual effect
    pub skip_effects: bool,
}

/// Shared state every particle update in a tick sees.
pub struct TickContext<'w> {
    /// Canvas size for this tick
    pub canvas: Dimension,
    /// Plugins offered each bounce
    pub plugins: &'w PluginRegistry,
    /// Removals recorded so far
    pub removals: &'w mut Vec<Removal>,
    /// Randomness for respawns, jitter and bounce coefficients
    pub rng: &'w mut dyn RandomSource,
}

impl TickContext<'_> {
    /// Destroys `particle` and schedules its removal.
    ///
    /// A particle that is already destroyed is left alone, so no particle is
    /// ever recorded twice.
    pub fn remove(&mut self, particle: &mut Particle, skip_effects: bool) {
        if particle.destroyed {
            return;
        }
        particle.destroy();
        trace!("Removing particle {} (skip effects: {})", particle.id, skip_effects);
        self.removals.push(Removal {
            id: particle.id,
            skip_effects,
        });
    }
}

/// Advances one particle by one tick.
pub struct Updater<'a, 'w> {
    world: &'a mut TickContext<'w>,
    particle: &'a mut Particle,
}

type Step<'a, 'w> = fn(&mut Updater<'a, 'w>, Delta);

impl<'a, 'w> Updater<'a, 'w> {
    /// Binds the updater to a particle for the current tick.
    pub fn new(world: &'a mut TickContext<'w>, particle: &'a mut Particle) -> Self {
        Self { world, particle }
    }

    /// Runs every step in order.
    ///
    /// Destroyed particles are ignored. A particle still inside its spawn
    /// delay only advances its life.
    pub fn update(&mut self, delta: Delta) {
        if self.particle.destroyed {
            return;
        }

        self.update_life(delta);
        if self.particle.destroyed || self.particle.spawning {
            return;
        }

        let steps: [Step<'a, 'w>; 9] = [
            Self::update_opacity,
            Self::update_size,
            Self::update_angle,
            Self::update_tilt,
            Self::update_roll,
            Self::update_wobble,
            Self::update_color,
            Self::update_stroke_color,
            Self::update_out_modes,
        ];
        for step in steps {
            if self.particle.destroyed {
                return;
            }
            step(self, delta);
        }
    }
}
