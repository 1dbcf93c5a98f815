use motes_common::{wrap, RandomSource};

use super::Updater;
use crate::delta::Delta;
use crate::options::{ColorAnimationOptions, ColorUnderflow, HslAnimationOptions};
use crate::particle::{AnimatedValue, AnimationStatus, HslColor};

/// Hue offsets are expressed as a percentage of the hue circle.
const OFFSET_SCALE: f32 = 3.6;

/// One HSL channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChannel {
    /// Hue
    Hue,
    /// Saturation
    Saturation,
    /// Lightness
    Lightness,
}

impl ColorChannel {
    /// Channels in update order.
    pub const ALL: [Self; 3] = [Self::Hue, Self::Saturation, Self::Lightness];

    /// Upper bound of the channel.
    #[must_use]
    pub const fn max(self) -> f32 {
        match self {
            Self::Hue => 360.0,
            Self::Saturation | Self::Lightness => 100.0,
        }
    }

    /// True when the channel reflects at its bounds instead of wrapping.
    #[must_use]
    pub const fn reflects(self) -> bool {
        !matches!(self, Self::Hue)
    }

    fn of(self, color: &mut HslColor) -> &mut Option<AnimatedValue> {
        match self {
            Self::Hue => &mut color.h,
            Self::Saturation => &mut color.s,
            Self::Lightness => &mut color.l,
        }
    }

    fn animation(self, animation: &HslAnimationOptions) -> &ColorAnimationOptions {
        match self {
            Self::Hue => &animation.h,
            Self::Saturation => &animation.s,
            Self::Lightness => &animation.l,
        }
    }
}

/// Advances one color channel.
///
/// Wrapping channels (`decrease == false`) only ever grow and fold back
/// into `[0, max)`. Reflecting channels grow until they pass `max`, then
/// shrink until they pass zero, then grow again. What happens to a value
/// that went below zero is chosen by [`ColorUnderflow`].
pub fn update_color_value(
    value: &mut AnimatedValue,
    animation: &ColorAnimationOptions,
    delta: Delta,
    max: f32,
    decrease: bool,
    rng: &mut dyn RandomSource,
) {
    if !animation.enable {
        return;
    }

    let offset = animation.offset.sample(rng);
    let velocity = value.speed() * delta.factor + offset * OFFSET_SCALE;

    if !decrease || value.status == AnimationStatus::Increasing {
        value.value += velocity;
        if decrease && value.value > max {
            value.status = AnimationStatus::Decreasing;
            value.value -= value.value % max;
        }
    } else {
        value.value -= velocity;
        if value.value < 0.0 {
            value.status = AnimationStatus::Increasing;
            match animation.underflow {
                ColorUnderflow::Double => value.value += value.value,
                ColorUnderflow::Mirror => value.value = -value.value,
            }
        }
    }

    if decrease {
        if value.value > max {
            value.value %= max;
        }
    } else {
        value.value = wrap(value.value, max);
    }
}

impl Updater<'_, '_> {
    pub(super) fn update_color(&mut self, delta: Delta) {
        let animation = self.particle.options.color.animation;
        let Some(color) = self.particle.color.as_mut() else {
            return;
        };

        for channel in ColorChannel::ALL {
            if let Some(value) = channel.of(color).as_mut() {
                update_color_value(
                    value,
                    channel.animation(&animation),
                    delta,
                    channel.max(),
                    channel.reflects(),
                    &mut *self.world.rng,
                );
            }
        }
    }

    /// Advances the stroke color. A channel the stroke does not define
    /// falls back to the fill color's channel, which then moves a second
    /// time this tick using the stroke's animation settings.
    pub(super) fn update_stroke_color(&mut self, delta: Delta) {
        let Some(stroke) = self.particle.options.stroke.color else {
            return;
        };

        let particle = &mut *self.particle;
        for channel in ColorChannel::ALL {
            let target = particle
                .stroke_color
                .as_mut()
                .and_then(|c| channel.of(c).as_mut())
                .or_else(|| particle.color.as_mut().and_then(|c| channel.of(c).as_mut()));
            if let Some(value) = target {
                update_color_value(
                    value,
                    channel.animation(&stroke.animation),
                    delta,
                    channel.max(),
                    channel.reflects(),
                    &mut *self.world.rng,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{particle_with, Rig};
    use super::*;
    use crate::options::{Hsl, PartialHsl, StrokeColorOptions};
    use motes_common::{FastRandom, RangeValue, SequenceRandom, Vec2};
    use proptest::prelude::*;

    fn animation(speed: f32) -> ColorAnimationOptions {
        ColorAnimationOptions {
            enable: true,
            speed,
            sync: true,
            ..ColorAnimationOptions::default()
        }
    }

    fn channel(value: f32, velocity: f32) -> AnimatedValue {
        AnimatedValue::fixed(value).with_velocity(velocity)
    }

    #[test]
    fn test_hue_wraps_without_reversing() {
        let mut rng = FastRandom::seeded(1);
        let mut hue = channel(358.0, 5.0);
        update_color_value(&mut hue, &animation(500.0), Delta::ONE_FRAME, 360.0, false, &mut rng);
        assert!((hue.value - 3.0).abs() < 1e-4);
        assert_eq!(hue.status, AnimationStatus::Increasing);
    }

    #[test]
    fn test_disabled_channel_is_static() {
        let mut rng = FastRandom::seeded(1);
        let mut hue = channel(100.0, 5.0);
        let disabled = ColorAnimationOptions::default();
        update_color_value(&mut hue, &disabled, Delta::ONE_FRAME, 360.0, false, &mut rng);
        assert_eq!(hue.value, 100.0);
    }

    #[test]
    fn test_lightness_reflects_at_max() {
        let mut rng = FastRandom::seeded(1);
        let mut l = channel(98.0, 5.0);
        update_color_value(&mut l, &animation(500.0), Delta::ONE_FRAME, 100.0, true, &mut rng);
        // 103 loses its remainder modulo 100
        assert_eq!(l.value, 100.0);
        assert_eq!(l.status, AnimationStatus::Decreasing);

        update_color_value(&mut l, &animation(500.0), Delta::ONE_FRAME, 100.0, true, &mut rng);
        assert_eq!(l.value, 95.0);
    }

    #[test]
    fn test_underflow_doubles_by_default() {
        let mut rng = FastRandom::seeded(1);
        let mut s = channel(2.0, 5.0).with_status(AnimationStatus::Decreasing);
        update_color_value(&mut s, &animation(500.0), Delta::ONE_FRAME, 100.0, true, &mut rng);
        assert_eq!(s.value, -6.0);
        assert_eq!(s.status, AnimationStatus::Increasing);
    }

    #[test]
    fn test_underflow_mirror_stays_in_range() {
        let mut rng = FastRandom::seeded(1);
        let mut s = channel(2.0, 5.0).with_status(AnimationStatus::Decreasing);
        let mirror = ColorAnimationOptions {
            underflow: ColorUnderflow::Mirror,
            ..animation(500.0)
        };
        update_color_value(&mut s, &mirror, Delta::ONE_FRAME, 100.0, true, &mut rng);
        assert_eq!(s.value, 3.0);
        assert_eq!(s.status, AnimationStatus::Increasing);
    }

    #[test]
    fn test_offset_jitters_velocity() {
        let mut rng = SequenceRandom::constant(0.5);
        let mut hue = channel(10.0, 0.0);
        let jitter = ColorAnimationOptions {
            offset: RangeValue::new(0.0, 10.0),
            ..animation(0.0)
        };
        update_color_value(&mut hue, &jitter, Delta::ONE_FRAME, 360.0, false, &mut rng);
        assert!((hue.value - 28.0).abs() < 1e-4);
    }

    #[test]
    fn test_stroke_falls_back_to_fill_channel() {
        let mut rig = Rig::new();
        let mut p = particle_with(Vec2::new(50.0, 50.0), |o| {
            o.color.value = Some(Hsl {
                h: 100.0,
                s: 50.0,
                l: 50.0,
            });
            o.color.animation.h = animation(100.0);
            o.stroke.color = Some(StrokeColorOptions {
                value: PartialHsl {
                    s: Some(20.0),
                    ..PartialHsl::default()
                },
                animation: crate::options::HslAnimationOptions {
                    h: animation(100.0),
                    ..Default::default()
                },
            });
        });
        rig.tick(&mut p, Delta::ONE_FRAME);
        let fill = p.color.and_then(|c| c.h).map(|h| h.value);
        // Once for the fill step, once more through the stroke fallback
        assert_eq!(fill, Some(102.0));
        let stroke = p.stroke_color.and_then(|c| c.s).map(|s| s.value);
        assert_eq!(stroke, Some(20.0));
    }

    #[test]
    fn test_no_stroke_options_leaves_fill_alone() {
        let mut rig = Rig::new();
        let mut p = particle_with(Vec2::new(50.0, 50.0), |o| {
            o.color.value = Some(Hsl {
                h: 100.0,
                s: 50.0,
                l: 50.0,
            });
            o.color.animation.h = animation(100.0);
        });
        rig.tick(&mut p, Delta::ONE_FRAME);
        assert_eq!(p.color.and_then(|c| c.h).map(|h| h.value), Some(101.0));
    }

    proptest! {
        #[test]
        fn prop_hue_stays_on_circle(
            start in 0.0f32..360.0,
            speed in 0.0f32..5000.0,
            factor in 0.1f32..4.0,
        ) {
            let mut rng = FastRandom::seeded(3);
            let mut hue = channel(start, speed / 100.0);
            let jitter = ColorAnimationOptions {
                offset: RangeValue::new(-20.0, 20.0),
                ..animation(speed)
            };
            for _ in 0..20 {
                update_color_value(&mut hue, &jitter, Delta::new(factor * 16.0, factor), 360.0, false, &mut rng);
                prop_assert!((0.0..360.0).contains(&hue.value));
            }
        }

        #[test]
        fn prop_mirrored_channel_stays_in_percent(
            start in 0.0f32..=100.0,
            speed in 0.0f32..5000.0,
        ) {
            let mut rng = FastRandom::seeded(4);
            let mut l = channel(start, speed / 100.0);
            let mirror = ColorAnimationOptions {
                underflow: ColorUnderflow::Mirror,
                ..animation(speed)
            };
            for _ in 0..50 {
                update_color_value(&mut l, &mirror, Delta::ONE_FRAME, 100.0, true, &mut rng);
                prop_assert!((0.0..=100.0).contains(&l.value));
            }
        }
    }
}
