use std::f32::consts::TAU;

use motes_common::{clamp, wrap_angle};

use super::Updater;
use crate::bounce::check_destroy;
use crate::delta::{Delta, BASELINE_FRAME_MS};
use crate::options::ValueAnimationOptions;
use crate::particle::{AnimatedValue, AnimationStatus, Particle};

impl Updater<'_, '_> {
    pub(super) fn update_opacity(&mut self, delta: Delta) {
        let animation = self.particle.options.opacity.animation;
        update_bounded(self.particle, |p| &mut p.opacity, &animation, delta);
    }

    pub(super) fn update_size(&mut self, delta: Delta) {
        let animation = self.particle.options.size.animation;
        update_bounded(self.particle, |p| &mut p.size, &animation, delta);
    }

    pub(super) fn update_angle(&mut self, delta: Delta) {
        if self.particle.options.rotate.animation.enable {
            step_angle(&mut self.particle.rotate, delta);
        }
    }

    pub(super) fn update_tilt(&mut self, delta: Delta) {
        if self.particle.options.tilt.animation.enable {
            step_angle(&mut self.particle.tilt, delta);
        }
    }

    pub(super) fn update_roll(&mut self, delta: Delta) {
        if !self.particle.options.roll.enable {
            return;
        }
        let roll = &mut self.particle.roll;
        roll.angle = wrap_angle(roll.angle + roll.speed * delta.factor);
    }

    /// Turns the wobble angle and drifts the particle along it. The vertical
    /// drift is always downward.
    pub(super) fn update_wobble(&mut self, delta: Delta) {
        if !self.particle.options.wobble.enable {
            return;
        }
        let particle = &mut *self.particle;
        let wobble = &mut particle.wobble;
        wobble.angle = wrap_angle(wobble.angle + wobble.speed * delta.factor);

        let distance = wobble.distance * delta.factor / BASELINE_FRAME_MS;
        particle.position.x += distance * wobble.angle.cos();
        particle.position.y += distance * wobble.angle.sin().abs();
    }
}

/// Moves an oscillating value one step towards its current target bound,
/// reversing at the bound, then applies the destroy policy and clamps.
fn update_bounded(
    particle: &mut Particle,
    select: fn(&mut Particle) -> &mut AnimatedValue,
    animation: &ValueAnimationOptions,
    delta: Delta,
) {
    if particle.destroyed || !animation.enable {
        return;
    }

    let state = select(particle);
    if animation.count > 0 && state.loops >= animation.count as u32 {
        return;
    }

    let speed = state.speed() * delta.factor;
    match state.status {
        AnimationStatus::Increasing => {
            if state.value >= state.max {
                state.status = AnimationStatus::Decreasing;
                state.loops += 1;
            } else {
                state.value += speed;
            }
        },
        AnimationStatus::Decreasing => {
            if state.value <= state.min {
                state.status = AnimationStatus::Increasing;
                state.loops += 1;
            } else {
                state.value -= speed;
            }
        },
    }

    let AnimatedValue { value, min, max, .. } = *state;
    check_destroy(particle, animation.destroy, value, min, max);
    if !particle.destroyed {
        select(particle).value = clamp(value, min, max);
    }
}

/// Turns an angle by its velocity, keeping it inside `[0, 2π)`.
fn step_angle(state: &mut AnimatedValue, delta: Delta) {
    let speed = state.speed() * delta.factor;
    match state.status {
        AnimationStatus::Increasing => {
            state.value += speed;
            if state.value > TAU {
                state.value -= TAU;
            }
        },
        AnimationStatus::Decreasing => {
            state.value -= speed;
            if state.value < 0.0 {
                state.value += TAU;
            }
        },
    }
    state.value = wrap_angle(state.value);
}
