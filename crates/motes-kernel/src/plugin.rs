//! Plugin registry.
//!
//! Plugins get the first chance at resolving an edge bounce. They are asked
//! in registration order and the first one that reports the bounce handled
//! stops the chain; the default bounce logic then does not run.

use motes_common::OutModeDirection;
use tracing::debug;

use crate::delta::Delta;
use crate::particle::Particle;

/// Optional capabilities a plugin can provide to the updater.
pub trait ParticlePlugin {
    /// Resolves a bounce against `direction` in place of the default logic.
    ///
    /// Returns true when the bounce was handled. The default handles nothing.
    fn particle_bounce(
        &self,
        _particle: &mut Particle,
        _delta: Delta,
        _direction: OutModeDirection,
    ) -> bool {
        false
    }
}

/// Ordered list of named plugins.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<(String, Box<dyn ParticlePlugin>)>,
}

impl PluginRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a plugin; an existing plugin with the same id is replaced in place.
    pub fn register(&mut self, id: impl Into<String>, plugin: Box<dyn ParticlePlugin>) {
        let id = id.into();
        if let Some(slot) = self.plugins.iter_mut().find(|(existing, _)| *existing == id) {
            debug!("Replaced plugin {id}");
            slot.1 = plugin;
        } else {
            debug!("Registered plugin {id}");
            self.plugins.push((id, plugin));
        }
    }

    /// Removes a plugin by id.
    pub fn unregister(&mut self, id: &str) -> bool {
        let before = self.plugins.len();
        self.plugins.retain(|(existing, _)| existing != id);
        before != self.plugins.len()
    }

    /// Iterates `(id, plugin)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn ParticlePlugin)> {
        self.plugins.iter().map(|(id, plugin)| (id.as_str(), plugin.as_ref()))
    }

    /// Number of registered plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// True when no plugin is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Offers the bounce to each plugin until one handles it.
    pub fn handle_bounce(
        &self,
        particle: &mut Particle,
        delta: Delta,
        direction: OutModeDirection,
    ) -> bool {
        self.iter()
            .any(|(_, plugin)| plugin.particle_bounce(particle, delta, direction))
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.plugins.iter().map(|(id, _)| id))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motes_common::{FastRandom, ParticleId, Vec2};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::Arc;

    struct Counting {
        calls: Rc<Cell<u32>>,
        handles: bool,
    }

    impl ParticlePlugin for Counting {
        fn particle_bounce(&self, _: &mut Particle, _: Delta, _: OutModeDirection) -> bool {
            self.calls.set(self.calls.get() + 1);
            self.handles
        }
    }

    struct Inert;

    impl ParticlePlugin for Inert {}

    fn particle() -> Particle {
        let mut rng = FastRandom::seeded(1);
        Particle::new(ParticleId::FIRST, Arc::default(), Vec2::ZERO, &mut rng)
    }

    #[test]
    fn test_first_handler_short_circuits() {
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let mut registry = PluginRegistry::new();
        registry.register("inert", Box::new(Inert));
        registry.register(
            "first",
            Box::new(Counting {
                calls: Rc::clone(&first),
                handles: true,
            }),
        );
        registry.register(
            "second",
            Box::new(Counting {
                calls: Rc::clone(&second),
                handles: true,
            }),
        );

        let mut p = particle();
        assert!(registry.handle_bounce(&mut p, Delta::ONE_FRAME, OutModeDirection::Left));
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 0);
    }

    #[test]
    fn test_unhandled_without_plugins() {
        let registry = PluginRegistry::new();
        let mut p = particle();
        assert!(!registry.handle_bounce(&mut p, Delta::ONE_FRAME, OutModeDirection::Top));
    }

    #[test]
    fn test_register_replaces_same_id() {
        let mut registry = PluginRegistry::new();
        registry.register("a", Box::new(Inert));
        registry.register("a", Box::new(Inert));
        registry.register("b", Box::new(Inert));
        assert_eq!(registry.len(), 2);
        assert!(registry.unregister("a"));
        assert!(!registry.unregister("a"));
        assert_eq!(registry.iter().map(|(id, _)| id).collect::<Vec<_>>(), vec!["b"]);
    }
}
