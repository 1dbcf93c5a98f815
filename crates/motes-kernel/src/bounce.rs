//! Edge bounce resolution and the destroy-at-bound policy.

use motes_common::{Bounds, Dimension, OutModeDirection, RandomSource, Vec2};
use tracing::trace;

use crate::options::{DestroyType, OutMode};
use crate::particle::Particle;

/// Snapshot of everything a bounce check needs besides the particle.
#[derive(Debug, Clone, Copy)]
pub struct BounceData {
    /// Effective out mode of the edge
    pub out_mode: OutMode,
    /// Edge being resolved
    pub direction: OutModeDirection,
    /// Particle bounds before the bounce
    pub bounds: Bounds,
    /// Canvas size
    pub canvas_size: Dimension,
    /// Particle drawing offset
    pub offset: Vec2,
    /// Particle radius
    pub size: f32,
}

/// Reflects `velocity.x` off the left or right edge.
///
/// Fires only when the bounds have reached the edge and the particle is
/// still heading out through it, so a particle already on its way back is
/// never flipped twice.
pub fn bounce_horizontal(particle: &mut Particle, data: &BounceData, rng: &mut dyn RandomSource) {
    if !matches!(
        data.out_mode,
        OutMode::Bounce | OutMode::BounceHorizontal | OutMode::Split
    ) {
        return;
    }

    let velocity = particle.velocity.x;
    let crossing = match data.direction {
        OutModeDirection::Right => data.bounds.right >= data.canvas_size.width && velocity > 0.0,
        OutModeDirection::Left => data.bounds.left <= 0.0 && velocity < 0.0,
        _ => false,
    };
    if !crossing {
        return;
    }

    let coefficient = particle.options.bounce.horizontal.sample(rng);
    particle.velocity.x *= -coefficient;

    let min_pos = data.offset.x + data.size;
    if data.bounds.right >= data.canvas_size.width {
        particle.position.x = data.canvas_size.width - min_pos;
    } else if data.bounds.left <= 0.0 {
        particle.position.x = min_pos;
    }

    if data.out_mode == OutMode::Split {
        trace!("Particle {} split on {:?} edge", particle.id, data.direction);
        particle.destroy();
    }
}

/// Reflects `velocity.y` off the top or bottom edge.
pub fn bounce_vertical(particle: &mut Particle, data: &BounceData, rng: &mut dyn RandomSource) {
    if !matches!(
        data.out_mode,
        OutMode::Bounce | OutMode::BounceVertical | OutMode::Split
    ) {
        return;
    }

    let velocity = particle.velocity.y;
    let crossing = match data.direction {
        OutModeDirection::Bottom => data.bounds.bottom >= data.canvas_size.height && velocity > 0.0,
        OutModeDirection::Top => data.bounds.top <= 0.0 && velocity < 0.0,
        _ => false,
    };
    if !crossing {
        return;
    }

    let coefficient = particle.options.bounce.vertical.sample(rng);
    particle.velocity.y *= -coefficient;

    let min_pos = data.offset.y + data.size;
    if data.bounds.bottom >= data.canvas_size.height {
        particle.position.y = data.canvas_size.height - min_pos;
    } else if data.bounds.top <= 0.0 {
        particle.position.y = min_pos;
    }

    if data.out_mode == OutMode::Split {
        trace!("Particle {} split on {:?} edge", particle.id, data.direction);
        particle.destroy();
    }
}

/// Destroys the particle when `value` has reached the bound named by `destroy`.
pub fn check_destroy(particle: &mut Particle, destroy: DestroyType, value: f32, min: f32, max: f32) {
    let hit = match destroy {
        DestroyType::Max => value >= max,
        DestroyType::Min => value <= min,
        DestroyType::None => false,
    };
    if hit {
        trace!("Particle {} reached its {:?} bound", particle.id, destroy);
        particle.destroy();
    }
}
