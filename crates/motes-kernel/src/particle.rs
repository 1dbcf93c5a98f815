//! Particle record.
//!
//! A particle is plain mutable state: the updater and mover read and write
//! its fields directly each tick. Construction samples the options once;
//! everything after that is driven by the per-tick update.

use std::f32::consts::TAU;
use std::sync::Arc;

use motes_common::{wrap_angle, ParticleId, RandomSource, Vec2};

use crate::options::{
    AngleOptions, ColorAnimationOptions, LifeOptions, LifeTiming, MoveDirection, ParticleOptions,
    RotateDirection, StartValue, ValueOptions,
};

/// Direction an oscillating value is currently travelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationStatus {
    /// Moving towards `max`
    #[default]
    Increasing,
    /// Moving towards `min`
    Decreasing,
}

/// Live state of one animated property.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimatedValue {
    /// Current value
    pub value: f32,
    /// Change per 60 fps frame; `None` when the property is static
    pub velocity: Option<f32>,
    /// Lower bound of the oscillation
    pub min: f32,
    /// Upper bound of the oscillation
    pub max: f32,
    /// Current direction
    pub status: AnimationStatus,
    /// Completed direction reversals
    pub loops: u32,
}

impl AnimatedValue {
    /// A static value with a degenerate range.
    #[must_use]
    pub const fn fixed(value: f32) -> Self {
        Self {
            value,
            velocity: None,
            min: value,
            max: value,
            status: AnimationStatus::Increasing,
            loops: 0,
        }
    }

    /// Sets the velocity.
    #[must_use]
    pub const fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = Some(velocity);
        self
    }

    /// Sets the direction.
    #[must_use]
    pub const fn with_status(mut self, status: AnimationStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the oscillation bounds.
    #[must_use]
    pub const fn with_bounds(mut self, min: f32, max: f32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Velocity with the zero default applied.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.velocity.unwrap_or(0.0)
    }
}

/// Life cycle counters, all times in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Life {
    /// Spawn delay to wait before the life starts
    pub delay: f32,
    /// Time spent in the current spawn delay
    pub delay_time: f32,
    /// Length of one life; `-1` never expires by age
    pub duration: f32,
    /// Time spent in the current life
    pub time: f32,
    /// Remaining lives; negative means unlimited, zero is terminal
    pub count: i32,
}

impl Life {
    /// A particle that never expires and never waits.
    pub const IMMORTAL: Self = Self {
        delay: 0.0,
        delay_time: 0.0,
        duration: -1.0,
        time: 0.0,
        count: -1,
    };

    /// True when the particle never expires by age.
    #[must_use]
    pub fn is_immortal(&self) -> bool {
        self.duration == -1.0
    }
}

/// Roll state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Roll {
    /// Angle in `[0, 2π)`
    pub angle: f32,
    /// Radians per frame
    pub speed: f32,
}

/// Wobble state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Wobble {
    /// Angle in `[0, 2π)`
    pub angle: f32,
    /// Radians per frame
    pub speed: f32,
    /// Pixels per frame at 60 fps
    pub distance: f32,
}

/// HSL color with independently animated channels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HslColor {
    /// Hue, wraps at 360
    pub h: Option<AnimatedValue>,
    /// Saturation, reflects between 0 and 100
    pub s: Option<AnimatedValue>,
    /// Lightness, reflects between 0 and 100
    pub l: Option<AnimatedValue>,
}

/// Animated state captured at construction, restored on respawn.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SpawnState {
    opacity: AnimatedValue,
    size: AnimatedValue,
    rotate: AnimatedValue,
    tilt: AnimatedValue,
    color: Option<HslColor>,
    stroke_color: Option<HslColor>,
}

/// A single particle.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Container-assigned id
    pub id: ParticleId,
    /// Center in canvas coordinates
    pub position: Vec2,
    /// Heading, scaled by `move_speed` when moving
    pub velocity: Vec2,
    /// Where the current life started
    pub initial_position: Vec2,
    /// Drawing offset, included in edge math
    pub offset: Vec2,
    /// Base movement speed
    pub move_speed: f32,
    /// Life cycle
    pub life: Life,
    /// Opacity
    pub opacity: AnimatedValue,
    /// Size; its value is the radius
    pub size: AnimatedValue,
    /// Rotation angle
    pub rotate: AnimatedValue,
    /// Tilt angle
    pub tilt: AnimatedValue,
    /// Roll
    pub roll: Roll,
    /// Wobble
    pub wobble: Wobble,
    /// Fill color
    pub color: Option<HslColor>,
    /// Stroke color channels that override the fill color
    pub stroke_color: Option<HslColor>,
    /// Options this particle was built from
    pub options: Arc<ParticleOptions>,
    /// Inside the spawn-delay window
    pub spawning: bool,
    /// Terminal; skipped by every later update
    pub destroyed: bool,
    spawn_state: SpawnState,
}

impl Particle {
    /// Builds a particle at `position`, sampling every ranged option.
    pub fn new(
        id: ParticleId,
        options: Arc<ParticleOptions>,
        position: Vec2,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let life = initial_life(&options.life, rng);
        let opacity = bounded_value(&options.opacity, rng);
        let size = bounded_value(&options.size, rng);
        let rotate = angle_value(&options.rotate, rng);
        let tilt = angle_value(&options.tilt, rng);

        let roll = Roll {
            angle: rng.next_f32() * TAU,
            speed: options.roll.speed.sample(rng) / 360.0,
        };
        let wobble = Wobble {
            angle: rng.next_f32() * TAU,
            speed: options.wobble.speed.sample(rng) / 360.0,
            distance: options.wobble.distance.sample(rng),
        };

        let color = options.color.value.map(|hsl| {
            let anim = &options.color.animation;
            HslColor {
                h: Some(color_channel(hsl.h, 360.0, &anim.h, rng)),
                s: Some(color_channel(hsl.s, 100.0, &anim.s, rng)),
                l: Some(color_channel(hsl.l, 100.0, &anim.l, rng)),
            }
        });
        let stroke_color = options.stroke.color.map(|stroke| {
            let anim = &stroke.animation;
            HslColor {
                h: stroke.value.h.map(|h| color_channel(h, 360.0, &anim.h, rng)),
                s: stroke.value.s.map(|s| color_channel(s, 100.0, &anim.s, rng)),
                l: stroke.value.l.map(|l| color_channel(l, 100.0, &anim.l, rng)),
            }
        });

        let velocity = heading(options.movement.direction, rng);
        let move_speed = options.movement.speed.sample(rng);

        Self {
            id,
            position,
            velocity,
            initial_position: position,
            offset: Vec2::ZERO,
            move_speed,
            spawning: life.delay > 0.0,
            life,
            opacity,
            size,
            rotate,
            tilt,
            roll,
            wobble,
            color,
            stroke_color,
            options,
            destroyed: false,
            spawn_state: SpawnState {
                opacity,
                size,
                rotate,
                tilt,
                color,
                stroke_color,
            },
        }
    }

    /// Radius used for every bounds computation.
    #[must_use]
    pub fn get_radius(&self) -> f32 {
        self.size.value
    }

    /// Current center.
    #[must_use]
    pub fn get_position(&self) -> Vec2 {
        self.position
    }

    /// Restores animated state to what it was at construction.
    pub fn reset(&mut self) {
        let spawn = self.spawn_state;
        self.opacity = spawn.opacity;
        self.size = spawn.size;
        self.rotate = spawn.rotate;
        self.tilt = spawn.tilt;
        self.color = spawn.color;
        self.stroke_color = spawn.stroke_color;
        self.initial_position = self.position;
    }

    /// Marks the particle terminal. Calling it again has no effect.
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }
}

/// Samples a life phase length in milliseconds, ignoring `sync`.
pub(crate) fn sample_life_ms(timing: &LifeTiming, rng: &mut dyn RandomSource) -> f32 {
    timing.value.sample(rng) * 1000.0
}

/// Normalises a sampled duration: anything not positive never expires.
pub(crate) fn normalize_duration(duration: f32) -> f32 {
    if duration <= 0.0 {
        -1.0
    } else {
        duration
    }
}

fn initial_life(options: &LifeOptions, rng: &mut dyn RandomSource) -> Life {
    fn phase(timing: &LifeTiming, rng: &mut dyn RandomSource) -> f32 {
        let ms = sample_life_ms(timing, rng);
        if timing.sync {
            ms
        } else {
            ms * rng.next_f32()
        }
    }

    let delay = phase(&options.delay, rng);
    let duration = normalize_duration(phase(&options.duration, rng));

    Life {
        delay,
        delay_time: 0.0,
        duration,
        time: 0.0,
        count: if options.count <= 0 { -1 } else { options.count },
    }
}

fn bounded_value(options: &ValueOptions, rng: &mut dyn RandomSource) -> AnimatedValue {
    let min = options.value.min();
    let max = options.value.max();
    let mut state = AnimatedValue::fixed(options.value.sample(rng)).with_bounds(min, max);
    let anim = &options.animation;

    if !anim.enable {
        return state;
    }

    match anim.start_value {
        StartValue::Min => {
            state.value = min;
            state.status = AnimationStatus::Increasing;
        },
        StartValue::Max => {
            state.value = max;
            state.status = AnimationStatus::Decreasing;
        },
        StartValue::Random => {
            state.value = rng.range(min, max);
            state.status = if rng.next_f32() >= 0.5 {
                AnimationStatus::Increasing
            } else {
                AnimationStatus::Decreasing
            };
        },
    }

    let mut velocity = anim.speed / 100.0;
    if !anim.sync {
        velocity *= rng.next_f32();
    }
    state.with_velocity(velocity)
}

fn angle_value(options: &AngleOptions, rng: &mut dyn RandomSource) -> AnimatedValue {
    let angle = wrap_angle(options.value.sample(rng).to_radians());
    let direction = match options.direction {
        RotateDirection::Random if rng.next_f32() >= 0.5 => RotateDirection::CounterClockwise,
        RotateDirection::Random => RotateDirection::Clockwise,
        other => other,
    };
    let status = if direction == RotateDirection::CounterClockwise {
        AnimationStatus::Decreasing
    } else {
        AnimationStatus::Increasing
    };
    let state = AnimatedValue::fixed(angle)
        .with_bounds(0.0, TAU)
        .with_status(status);

    if !options.animation.enable {
        return state;
    }

    let mut velocity = options.animation.speed / 360.0;
    if !options.animation.sync {
        velocity *= rng.next_f32();
    }
    state.with_velocity(velocity)
}

fn color_channel(
    value: f32,
    max: f32,
    anim: &ColorAnimationOptions,
    rng: &mut dyn RandomSource,
) -> AnimatedValue {
    let state = AnimatedValue::fixed(value).with_bounds(0.0, max);
    if !anim.enable {
        return state;
    }

    let mut velocity = anim.speed / 100.0;
    if !anim.sync {
        velocity *= rng.next_f32();
    }
    state.with_velocity(velocity)
}

fn heading(direction: MoveDirection, rng: &mut dyn RandomSource) -> Vec2 {
    match direction {
        MoveDirection::None => Vec2::from_angle(rng.next_f32() * TAU),
        MoveDirection::Top => Vec2::new(0.0, -1.0),
        MoveDirection::Bottom => Vec2::new(0.0, 1.0),
        MoveDirection::Left => Vec2::new(-1.0, 0.0),
        MoveDirection::Right => Vec2::new(1.0, 0.0),
    }
}
