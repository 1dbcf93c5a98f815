//! Particle movement.
//!
//! Runs before the updater each tick. Position advances along the velocity
//! scaled by half the particle's move speed; gravity bends the vertical
//! component and distance limits turn the particle back towards where its
//! life started.

use motes_common::RandomSource;

use crate::delta::Delta;
use crate::options::DistanceOptions;
use crate::particle::Particle;

/// Advances `particle` by one tick of movement.
///
/// Destroyed particles and particles waiting out their spawn delay stay put.
pub fn move_particle(particle: &mut Particle, delta: Delta, rng: &mut dyn RandomSource) {
    let movement = particle.options.movement;
    if particle.destroyed || particle.spawning || !movement.enable {
        return;
    }

    let move_speed = particle.move_speed / 2.0 * delta.factor;
    if move_speed <= 0.0 {
        return;
    }

    let gravity = movement.gravity;
    let gravity_factor = if gravity.enable && gravity.inverse { -1.0 } else { 1.0 };
    if gravity.enable {
        particle.velocity.y += gravity_factor * gravity.acceleration * delta.factor / (60.0 * move_speed);
    }

    let mut step = particle.velocity * move_speed;
    if gravity.enable && gravity.max_speed > 0.0 {
        let capped = if gravity.inverse {
            step.y <= -gravity.max_speed
        } else {
            step.y >= gravity.max_speed
        };
        if capped {
            step.y = gravity_factor * gravity.max_speed;
            particle.velocity.y = step.y / move_speed;
        }
    }

    particle.position += step;
    limit_distance(particle, &movement.distance, rng);
}

/// Turns the particle around once it has travelled past the configured
/// distance from its initial position, with a random loss of speed.
fn limit_distance(particle: &mut Particle, distance: &DistanceOptions, rng: &mut dyn RandomSource) {
    let initial = particle.initial_position;
    let position = particle.position;
    let velocity = &mut particle.velocity;

    if distance.has_horizontal() && (position.x - initial.x).abs() >= distance.horizontal {
        let outward = (initial.x < position.x && velocity.x > 0.0) || (initial.x > position.x && velocity.x < 0.0);
        if outward {
            velocity.x *= -rng.next_f32();
        }
    }

    if distance.has_vertical() && (position.y - initial.y).abs() >= distance.vertical {
        let outward = (initial.y < position.y && velocity.y > 0.0) || (initial.y > position.y && velocity.y < 0.0);
        if outward {
            velocity.y *= -rng.next_f32();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParticleOptions;
    use motes_common::{FastRandom, ParticleId, RangeValue, SequenceRandom, Vec2};
    use std::sync::Arc;

    fn particle(f: impl FnOnce(&mut ParticleOptions)) -> Particle {
        let mut options = ParticleOptions::default();
        options.movement.speed = RangeValue::Fixed(4.0);
        f(&mut options);
        let mut rng = FastRandom::seeded(11);
        let mut p = Particle::new(ParticleId::FIRST, Arc::new(options), Vec2::new(50.0, 50.0), &mut rng);
        p.velocity = Vec2::new(1.0, 0.0);
        p
    }

    #[test]
    fn test_moves_at_half_speed() {
        let mut rng = FastRandom::seeded(1);
        let mut p = particle(|_| {});
        move_particle(&mut p, Delta::ONE_FRAME, &mut rng);
        assert_eq!(p.position, Vec2::new(52.0, 50.0));
        move_particle(&mut p, Delta::new(2.0 * crate::delta::BASELINE_FRAME_MS, 2.0), &mut rng);
        assert_eq!(p.position, Vec2::new(56.0, 50.0));
    }

    #[test]
    fn test_disabled_or_spawning_stays_put() {
        let mut rng = FastRandom::seeded(1);
        let mut still = particle(|o| o.movement.enable = false);
        move_particle(&mut still, Delta::ONE_FRAME, &mut rng);
        assert_eq!(still.position, Vec2::new(50.0, 50.0));

        let mut waiting = particle(|_| {});
        waiting.spawning = true;
        move_particle(&mut waiting, Delta::ONE_FRAME, &mut rng);
        assert_eq!(waiting.position, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_gravity_pulls_down_and_caps() {
        let mut rng = FastRandom::seeded(1);
        let mut p = particle(|o| {
            o.movement.gravity.enable = true;
            o.movement.gravity.max_speed = 3.0;
        });
        p.velocity = Vec2::ZERO;
        move_particle(&mut p, Delta::ONE_FRAME, &mut rng);
        assert!(p.velocity.y > 0.0);
        assert!(p.position.y > 50.0);

        for _ in 0..500 {
            move_particle(&mut p, Delta::ONE_FRAME, &mut rng);
        }
        // Never more than max_speed pixels per frame
        let before = p.position.y;
        move_particle(&mut p, Delta::ONE_FRAME, &mut rng);
        assert!(p.position.y - before <= 3.0 + 1e-4);
    }

    #[test]
    fn test_inverse_gravity_pulls_up() {
        let mut rng = FastRandom::seeded(1);
        let mut p = particle(|o| {
            o.movement.gravity.enable = true;
            o.movement.gravity.inverse = true;
        });
        p.velocity = Vec2::ZERO;
        move_particle(&mut p, Delta::ONE_FRAME, &mut rng);
        assert!(p.position.y < 50.0);
    }

    #[test]
    fn test_distance_limit_turns_back() {
        let mut rng = SequenceRandom::constant(0.5);
        let mut p = particle(|o| o.movement.distance.horizontal = 3.0);
        move_particle(&mut p, Delta::ONE_FRAME, &mut rng);
        assert_eq!(p.velocity.x, 1.0);
        move_particle(&mut p, Delta::ONE_FRAME, &mut rng);
        assert_eq!(p.position.x, 54.0);
        assert_eq!(p.velocity.x, -0.5);
    }
}
