//! Particle container.
//!
//! Owns the canvas, the particle collection, the plugin registry and the
//! random source, and drives one full tick over every particle. Particles
//! destroyed during a tick stay in place until every particle has been
//! visited, then the collection is compacted in one pass.

use std::sync::Arc;

use motes_common::{Dimension, MotesError, MotesResult, ParticleId, RandomSource, Vec2};
use tracing::{debug, info};

use crate::delta::Delta;
use crate::mover::move_particle;
use crate::options::ParticleOptions;
use crate::particle::Particle;
use crate::plugin::PluginRegistry;
use crate::updater::{Removal, TickContext, Updater};

/// Ordered particle storage with an optional size limit.
///
/// Particles keep insertion order, so the oldest particle is always first.
#[derive(Debug, Default)]
pub struct ParticleCollection {
    items: Vec<Particle>,
    next_id: u64,
    limit: usize,
}

impl ParticleCollection {
    /// Creates an empty collection; a `limit` of zero means unlimited.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            items: Vec::new(),
            next_id: ParticleId::FIRST.raw(),
            limit,
        }
    }

    /// Reserves the next particle id.
    pub fn allocate_id(&mut self) -> ParticleId {
        let id = ParticleId::from_raw(self.next_id.max(ParticleId::FIRST.raw()));
        self.next_id = id.next().raw();
        id
    }

    /// Appends a particle, evicting the oldest one when the limit is reached.
    ///
    /// Returns the id of the evicted particle.
    pub fn push(&mut self, particle: Particle) -> Option<ParticleId> {
        let evicted = if self.limit > 0 && self.items.len() >= self.limit {
            let oldest = self.items.remove(0);
            debug!("Particle limit {} reached, dropping {}", self.limit, oldest.id);
            Some(oldest.id)
        } else {
            None
        };
        self.items.push(particle);
        evicted
    }

    /// Drops every destroyed particle, returning how many were dropped.
    pub fn compact(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|p| !p.destroyed);
        before - self.items.len()
    }

    /// Looks a particle up by id.
    #[must_use]
    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.items.iter().find(|p| p.id == id)
    }

    /// Looks a particle up by id for mutation.
    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.items.iter_mut().find(|p| p.id == id)
    }

    /// Iterates particles, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.items.iter()
    }

    /// Iterates particles mutably, oldest first.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.items.iter_mut()
    }

    /// Number of particles, destroyed ones included until the next compaction.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the collection holds no particle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum size; zero means unlimited.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Removes every particle.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Outcome of one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Particles that went through the updater
    pub updated: usize,
    /// Particles taken off the canvas by an edge policy
    pub removed: Vec<Removal>,
    /// Particles dropped from the collection, including life and split deaths
    pub destroyed: usize,
}

/// A canvas full of particles.
pub struct Container {
    canvas: Dimension,
    options: Arc<ParticleOptions>,
    particles: ParticleCollection,
    plugins: PluginRegistry,
    rng: Box<dyn RandomSource>,
}

impl Container {
    /// Creates an empty container.
    pub fn new(
        canvas: Dimension,
        options: ParticleOptions,
        limit: usize,
        rng: Box<dyn RandomSource>,
    ) -> MotesResult<Self> {
        validate_canvas(canvas)?;
        info!(
            "Creating container {}x{} (limit: {})",
            canvas.width, canvas.height, limit
        );
        Ok(Self {
            canvas,
            options: Arc::new(options),
            particles: ParticleCollection::new(limit),
            plugins: PluginRegistry::new(),
            rng,
        })
    }

    /// Canvas size.
    #[must_use]
    pub fn canvas(&self) -> Dimension {
        self.canvas
    }

    /// Changes the canvas size; particles keep their positions.
    pub fn resize(&mut self, canvas: Dimension) -> MotesResult<()> {
        validate_canvas(canvas)?;
        debug!("Resized canvas to {}x{}", canvas.width, canvas.height);
        self.canvas = canvas;
        Ok(())
    }

    /// Options new particles are built from.
    #[must_use]
    pub fn options(&self) -> &ParticleOptions {
        &self.options
    }

    /// The particles.
    #[must_use]
    pub fn particles(&self) -> &ParticleCollection {
        &self.particles
    }

    /// The particles, for mutation.
    pub fn particles_mut(&mut self) -> &mut ParticleCollection {
        &mut self.particles
    }

    /// The plugin registry.
    pub fn plugins_mut(&mut self) -> &mut PluginRegistry {
        &mut self.plugins
    }

    /// Adds a particle at `position`, or at a random point on the canvas.
    pub fn spawn(&mut self, position: Option<Vec2>) -> ParticleId {
        let options = Arc::clone(&self.options);
        self.spawn_with(options, position)
    }

    /// Adds a particle built from its own options.
    pub fn spawn_with(&mut self, options: Arc<ParticleOptions>, position: Option<Vec2>) -> ParticleId {
        let position = position.unwrap_or_else(|| {
            Vec2::new(
                self.rng.range(0.0, self.canvas.width),
                self.rng.range(0.0, self.canvas.height),
            )
        });
        let id = self.particles.allocate_id();
        let particle = Particle::new(id, options, position, self.rng.as_mut());
        self.particles.push(particle);
        id
    }

    /// Adds `count` particles at random positions.
    pub fn spawn_many(&mut self, count: usize) {
        for _ in 0..count {
            self.spawn(None);
        }
        debug!("Spawned {} particles ({} total)", count, self.particles.len());
    }

    /// Advances every particle by `delta`, then drops the destroyed ones.
    pub fn update(&mut self, delta: Delta) -> TickReport {
        let mut removed = Vec::new();
        let mut updated = 0;

        {
            let mut world = TickContext {
                canvas: self.canvas,
                plugins: &self.plugins,
                removals: &mut removed,
                rng: self.rng.as_mut(),
            };

            for particle in self.particles.iter_mut() {
                if particle.destroyed {
                    continue;
                }
                move_particle(particle, delta, &mut *world.rng);
                Updater::new(&mut world, particle).update(delta);
                updated += 1;
            }
        }

        let destroyed = self.particles.compact();
        if destroyed > 0 {
            debug!(
                "Tick dropped {} particles ({} by edge policy), {} left",
                destroyed,
                removed.len(),
                self.particles.len()
            );
        }

        TickReport {
            updated,
            removed,
            destroyed,
        }
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("canvas", &self.canvas)
            .field("particles", &self.particles.len())
            .field("plugins", &self.plugins)
            .finish_non_exhaustive()
    }
}

fn validate_canvas(canvas: Dimension) -> MotesResult<()> {
    if canvas.is_valid() {
        Ok(())
    } else {
        Err(MotesError::InvalidCanvas {
            width: canvas.width,
            height: canvas.height,
        })
    }
}
