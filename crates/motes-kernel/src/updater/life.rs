use motes_common::Vec2;
use tracing::trace;

use super::Updater;
use crate::delta::Delta;
use crate::particle::{normalize_duration, sample_life_ms};

impl Updater<'_, '_> {
    /// Advances the spawn delay and the life timer, respawning or
    /// destroying the particle when its life runs out.
    pub(super) fn update_life(&mut self, delta: Delta) {
        let particle = &mut *self.particle;
        let life = &mut particle.life;
        let mut just_spawned = false;

        if particle.spawning {
            life.delay_time += delta.value;
            if life.delay_time >= life.delay {
                just_spawned = true;
                particle.spawning = false;
                life.delay_time = 0.0;
                life.time = 0.0;
            }
        }

        if life.duration == -1.0 || particle.spawning {
            return;
        }

        if just_spawned {
            life.time = 0.0;
        } else {
            life.time += delta.value;
        }

        if life.time < life.duration {
            return;
        }

        life.time = 0.0;
        if life.count > 0 {
            life.count -= 1;
        }

        if life.count == 0 {
            trace!("Particle {} ran out of lives", particle.id);
            particle.destroy();
            return;
        }

        let canvas = self.world.canvas;
        let rng = &mut *self.world.rng;
        particle.position = Vec2::new(
            rng.range(0.0, canvas.width),
            rng.range(0.0, canvas.height),
        );
        particle.spawning = true;
        life.delay_time = 0.0;
        life.time = 0.0;

        let timing = particle.options.life;
        life.delay = sample_life_ms(&timing.delay, rng);
        life.duration = normalize_duration(sample_life_ms(&timing.duration, rng));
        particle.reset();
        trace!(
            "Particle {} respawned at {} with {} lives left",
            particle.id,
            particle.position,
            particle.life.count
        );
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{particle_with, Rig};
    use crate::delta::Delta;
    use crate::options::LifeTiming;
    use motes_common::{RangeValue, Vec2};
    use proptest::prelude::*;

    fn timing(seconds: f32) -> LifeTiming {
        LifeTiming {
            value: RangeValue::Fixed(seconds),
            sync: true,
        }
    }

    #[test]
    fn test_immortal_particle_never_ages() {
        let mut rig = Rig::new();
        let mut p = particle_with(Vec2::new(50.0, 50.0), |_| {});
        assert_eq!(p.life.duration, -1.0);
        for _ in 0..1000 {
            rig.tick(&mut p, Delta::ONE_FRAME);
        }
        assert!(!p.destroyed);
        assert_eq!(p.life.time, 0.0);
    }

    #[test]
    fn test_spawn_delay_completes() {
        let mut rig = Rig::new();
        let mut p = particle_with(Vec2::new(50.0, 50.0), |o| {
            o.life.delay = timing(0.03);
            o.life.duration = timing(1.0);
        });
        assert!(p.spawning);
        rig.tick(&mut p, Delta::ONE_FRAME);
        assert!(p.spawning);
        rig.tick(&mut p, Delta::ONE_FRAME);
        assert!(!p.spawning);
        assert_eq!(p.life.time, 0.0);
        assert_eq!(p.life.delay_time, 0.0);
        rig.tick(&mut p, Delta::ONE_FRAME);
        assert!((p.life.time - Delta::ONE_FRAME.value).abs() < 1e-4);
    }

    #[test]
    fn test_last_life_destroys() {
        let mut rig = Rig::new();
        let mut p = particle_with(Vec2::new(50.0, 50.0), |o| {
            o.life.count = 1;
            o.life.duration = timing(0.06);
        });
        for _ in 0..3 {
            rig.tick(&mut p, Delta::ONE_FRAME);
        }
        assert!(!p.destroyed);
        rig.tick(&mut p, Delta::ONE_FRAME);
        assert!(p.destroyed);
        assert_eq!(p.life.count, 0);

        // Terminal: further ticks change nothing
        let life = p.life;
        rig.tick(&mut p, Delta::ONE_FRAME);
        assert_eq!(p.life, life);
    }

    #[test]
    fn test_expiry_respawns_inside_canvas() {
        let mut rig = Rig::new();
        let mut p = particle_with(Vec2::new(50.0, 50.0), |o| {
            o.life.count = 3;
            o.life.duration = timing(0.01);
            o.life.delay = timing(0.0);
        });
        rig.tick(&mut p, Delta::ONE_FRAME);
        assert!(!p.destroyed);
        assert_eq!(p.life.count, 2);
        assert!(p.spawning);
        assert_eq!(p.life.time, 0.0);
        assert!((0.0..=100.0).contains(&p.position.x));
        assert!((0.0..=100.0).contains(&p.position.y));
        assert_eq!(p.initial_position, p.position);

        // Zero delay: the very next tick ends the spawn window
        rig.tick(&mut p, Delta::ONE_FRAME);
        assert!(!p.spawning);
    }

    #[test]
    fn test_unlimited_lives_keep_respawning() {
        let mut rig = Rig::new();
        let mut p = particle_with(Vec2::new(50.0, 50.0), |o| {
            o.life.duration = timing(0.01);
        });
        assert_eq!(p.life.count, -1);
        for _ in 0..20 {
            rig.tick(&mut p, Delta::ONE_FRAME);
        }
        assert!(!p.destroyed);
        assert_eq!(p.life.count, -1);
    }

    proptest! {
        #[test]
        fn prop_immortal_particles_never_expire(steps in prop::collection::vec(0.1f32..500.0, 1..100)) {
            let mut rig = Rig::new();
            let mut p = particle_with(Vec2::new(50.0, 50.0), |o| {
                o.life.count = 3;
            });
            for ms in steps {
                rig.tick(&mut p, Delta::from_elapsed_ms(ms));
                prop_assert!(!p.destroyed);
                prop_assert_eq!(p.life.count, 3);
            }
        }

        #[test]
        fn prop_exhausted_lives_are_terminal(
            count in 1i32..4,
            steps in prop::collection::vec(1.0f32..200.0, 1..200),
        ) {
            let mut rig = Rig::new();
            let mut p = particle_with(Vec2::new(50.0, 50.0), |o| {
                o.life.count = count;
                o.life.duration = timing(0.05);
            });
            let mut seen_dead = false;
            for ms in steps {
                rig.tick(&mut p, Delta::from_elapsed_ms(ms));
                if seen_dead {
                    prop_assert!(p.destroyed);
                    prop_assert_eq!(p.life.count, 0);
                }
                seen_dead = p.destroyed;
                prop_assert!(p.life.count >= 0);
            }
        }
    }
}
