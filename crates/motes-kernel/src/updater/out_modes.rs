use motes_common::{calculate_bounds, is_point_inside, Dimension, OutModeDirection, Vec2};
use tracing::trace;

use super::Updater;
use crate::bounce::{bounce_horizontal, bounce_vertical, BounceData};
use crate::delta::Delta;
use crate::options::OutMode;

impl Updater<'_, '_> {
    /// Resolves every edge in the order bottom, left, right, top.
    pub(super) fn update_out_modes(&mut self, delta: Delta) {
        let out_modes = self.particle.options.movement.out_modes;
        for direction in OutModeDirection::ALL {
            if self.particle.destroyed {
                return;
            }
            self.update_out_mode(delta, out_modes.for_direction(direction), direction);
        }
    }

    fn update_out_mode(&mut self, delta: Delta, mode: OutMode, direction: OutModeDirection) {
        match mode {
            OutMode::Bounce | OutMode::BounceHorizontal | OutMode::BounceVertical | OutMode::Split => {
                self.update_bounce(delta, mode, direction);
            },
            OutMode::Destroy => {
                if !self.is_inside(direction) {
                    self.world.remove(self.particle, true);
                }
            },
            OutMode::Out => {
                if !self.is_inside(direction) {
                    self.fix_out_of_canvas_position(direction);
                }
            },
            OutMode::None => self.bounce_none(direction),
        }
    }

    fn is_inside(&self, direction: OutModeDirection) -> bool {
        is_point_inside(
            self.particle.position,
            self.world.canvas,
            self.particle.get_radius(),
            Some(direction),
        )
    }

    fn update_bounce(&mut self, delta: Delta, mode: OutMode, direction: OutModeDirection) {
        if self.world.plugins.handle_bounce(self.particle, delta, direction) {
            return;
        }

        let size = self.particle.get_radius();
        let data = BounceData {
            out_mode: mode,
            direction,
            bounds: calculate_bounds(self.particle.position, size),
            canvas_size: self.world.canvas,
            offset: self.particle.offset,
            size,
        };

        bounce_horizontal(self.particle, &data, &mut *self.world.rng);
        if !self.particle.destroyed {
            bounce_vertical(self.particle, &data, &mut *self.world.rng);
        }
    }

    /// Re-enters a particle that fully left through `direction` on the
    /// opposite edge.
    ///
    /// Unless `warp` is set, the coordinate along the edge is re-randomized.
    fn fix_out_of_canvas_position(&mut self, direction: OutModeDirection) {
        let canvas = self.world.canvas;
        let warp = self.particle.options.movement.warp;
        let particle = &mut *self.particle;
        let radius = particle.get_radius();
        let offset = particle.offset;
        let bounds = calculate_bounds(particle.position, radius);

        let gone = match direction {
            OutModeDirection::Right => bounds.left > canvas.width - offset.x,
            OutModeDirection::Left => bounds.right < -offset.x,
            OutModeDirection::Bottom => bounds.top > canvas.height - offset.y,
            OutModeDirection::Top => bounds.bottom < -offset.y,
        };
        if !gone {
            return;
        }

        let reentry = reentry_coordinate(direction, canvas, radius, offset);
        if direction.is_horizontal() {
            particle.position.x = reentry;
            if !warp {
                particle.position.y = self.world.rng.next_f32() * canvas.height;
            }
        } else {
            if !warp {
                particle.position.x = self.world.rng.next_f32() * canvas.width;
            }
            particle.position.y = reentry;
        }

        trace!(
            "Particle {} wrapped through {:?} edge to {}",
            particle.id,
            direction,
            particle.position
        );
    }

    /// Leaves the particle alone while it may still come back, otherwise
    /// removes it once it is gone for good.
    fn bounce_none(&mut self, direction: OutModeDirection) {
        let particle = &*self.particle;
        let distance = particle.options.movement.distance;
        if (distance.has_horizontal() && direction.is_horizontal())
            || (distance.has_vertical() && direction.is_vertical())
        {
            return;
        }

        let gravity = particle.options.movement.gravity;
        let canvas = self.world.canvas;
        let gone = if gravity.enable {
            let y = particle.position.y;
            (!gravity.inverse && y > canvas.height && direction == OutModeDirection::Bottom)
                || (gravity.inverse && y < 0.0 && direction == OutModeDirection::Top)
        } else {
            !self.is_inside(direction)
        };

        if gone {
            self.world.remove(self.particle, false);
        }
    }
}

/// Where a particle leaving through `direction` re-enters, along the axis
/// of that edge.
fn reentry_coordinate(direction: OutModeDirection, canvas: Dimension, radius: f32, offset: Vec2) -> f32 {
    match direction {
        OutModeDirection::Bottom => -radius - offset.y,
        OutModeDirection::Left => canvas.width + radius + offset.x,
        OutModeDirection::Right => -radius - offset.x,
        OutModeDirection::Top => canvas.height + radius - offset.y,
    }
}
