//! Particle options.
//!
//! Options are hydrated once with serde and stay immutable while a particle
//! lives. Every field has a default so partial documents load; absent
//! animation blocks simply leave the matching property untouched.

use motes_common::{ConfigError, RangeValue};
use serde::{Deserialize, Deserializer, Serialize};

/// Complete option set for one particle family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParticleOptions {
    /// Bounce coefficients
    pub bounce: BounceOptions,
    /// Fill color and its animation
    pub color: ColorOptions,
    /// Life cycle (delay, duration, respawn count)
    pub life: LifeOptions,
    /// Movement and edge handling
    #[serde(rename = "move")]
    pub movement: MoveOptions,
    /// Opacity and its animation
    pub opacity: ValueOptions,
    /// Roll animation
    pub roll: RollOptions,
    /// Rotation and its animation
    pub rotate: AngleOptions,
    /// Size (radius) and its animation
    pub size: ValueOptions,
    /// Stroke width and color
    pub stroke: StrokeOptions,
    /// Tilt and its animation
    pub tilt: AngleOptions,
    /// Wobble animation
    pub wobble: WobbleOptions,
}

impl ParticleOptions {
    /// Parses options from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses options from a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

/// Velocity multipliers applied, with a sign flip, on edge collision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceOptions {
    /// Multiplier for `velocity.x` on left/right collisions
    pub horizontal: RangeValue,
    /// Multiplier for `velocity.y` on top/bottom collisions
    pub vertical: RangeValue,
}

impl Default for BounceOptions {
    fn default() -> Self {
        Self {
            horizontal: RangeValue::Fixed(1.0),
            vertical: RangeValue::Fixed(1.0),
        }
    }
}

/// When an oscillating value destroys its particle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DestroyType {
    /// Never
    #[default]
    None,
    /// On reaching the range maximum
    Max,
    /// On reaching the range minimum
    Min,
}

/// Where an animated value starts inside its range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StartValue {
    /// At the minimum, increasing
    Min,
    /// At the maximum, decreasing
    Max,
    /// Anywhere, in a random direction
    #[default]
    Random,
}

/// Animation of a bounded value (opacity, size).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValueAnimationOptions {
    /// Whether the value animates at all
    pub enable: bool,
    /// Speed in hundredths of a unit per frame
    pub speed: f32,
    /// Loop cap; zero or less means unlimited
    pub count: i32,
    /// Destroy policy checked every tick
    pub destroy: DestroyType,
    /// Initial position inside the range
    pub start_value: StartValue,
    /// When false each particle gets a random share of `speed`
    pub sync: bool,
}

impl Default for ValueAnimationOptions {
    fn default() -> Self {
        Self {
            enable: false,
            speed: 2.0,
            count: 0,
            destroy: DestroyType::None,
            start_value: StartValue::Random,
            sync: false,
        }
    }
}

/// A bounded, optionally animated value such as opacity or size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueOptions {
    /// Value or range the animation oscillates in
    pub value: RangeValue,
    /// Oscillation settings
    pub animation: ValueAnimationOptions,
}

impl Default for ValueOptions {
    fn default() -> Self {
        Self {
            value: RangeValue::Fixed(1.0),
            animation: ValueAnimationOptions::default(),
        }
    }
}

/// Initial spin direction of an angle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RotateDirection {
    /// Angle increases
    #[default]
    Clockwise,
    /// Angle decreases
    CounterClockwise,
    /// Picked per particle
    Random,
}

/// Animation of an unbounded angle (rotate, tilt).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AngleAnimationOptions {
    /// Whether the angle animates
    pub enable: bool,
    /// Speed in degrees per frame
    pub speed: f32,
    /// When false each particle gets a random share of `speed`
    pub sync: bool,
}

/// Rotation or tilt settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AngleOptions {
    /// Initial angle in degrees
    pub value: RangeValue,
    /// Initial spin direction
    pub direction: RotateDirection,
    /// Spin settings
    pub animation: AngleAnimationOptions,
}

/// Roll settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollOptions {
    /// Whether particles roll
    pub enable: bool,
    /// Speed in degrees per frame
    pub speed: RangeValue,
}

/// Wobble settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WobbleOptions {
    /// Whether particles wobble
    pub enable: bool,
    /// Displacement per frame at 60 fps, in pixels
    pub distance: RangeValue,
    /// Angular speed in degrees per frame
    pub speed: RangeValue,
}

impl Default for WobbleOptions {
    fn default() -> Self {
        Self {
            enable: false,
            distance: RangeValue::Fixed(5.0),
            speed: RangeValue::Fixed(50.0),
        }
    }
}

/// A color given as hue (degrees), saturation and lightness (percent).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    /// Hue in `[0, 360)`
    pub h: f32,
    /// Saturation in `[0, 100]`
    pub s: f32,
    /// Lightness in `[0, 100]`
    pub l: f32,
}

/// What a reflecting color channel does when it drops below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorUnderflow {
    /// Adds the (negative) value to itself, doubling the undershoot
    #[default]
    Double,
    /// Mirrors the undershoot back above zero
    Mirror,
}

/// Animation of one HSL channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorAnimationOptions {
    /// Whether the channel animates
    pub enable: bool,
    /// Speed in hundredths of a unit per frame
    pub speed: f32,
    /// Per-tick jitter range, scaled by 3.6
    pub offset: RangeValue,
    /// When false each particle gets a random share of `speed`
    pub sync: bool,
    /// Underflow behavior of saturation and lightness
    pub underflow: ColorUnderflow,
}

impl Default for ColorAnimationOptions {
    fn default() -> Self {
        Self {
            enable: false,
            speed: 1.0,
            offset: RangeValue::Fixed(0.0),
            sync: true,
            underflow: ColorUnderflow::Double,
        }
    }
}

/// Per-channel color animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HslAnimationOptions {
    /// Hue animation
    pub h: ColorAnimationOptions,
    /// Saturation animation
    pub s: ColorAnimationOptions,
    /// Lightness animation
    pub l: ColorAnimationOptions,
}

/// Fill color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorOptions {
    /// Initial color; `None` means the particle has no animatable color
    pub value: Option<Hsl>,
    /// Channel animations
    pub animation: HslAnimationOptions,
}

/// Stroke color channels; absent channels fall back to the fill color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialHsl {
    /// Hue override
    pub h: Option<f32>,
    /// Saturation override
    pub s: Option<f32>,
    /// Lightness override
    pub l: Option<f32>,
}

/// Stroke color.
///
/// Two animation shapes are accepted: a single `{ enable, speed, offset }`
/// record that animates hue only, or a per-channel `{ h, s, l }` record.
/// Both are normalised into [`HslAnimationOptions`] while loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeColorOptions {
    /// Channels set on the stroke itself
    pub value: PartialHsl,
    /// Channel animations
    #[serde(deserialize_with = "deserialize_stroke_animation")]
    pub animation: HslAnimationOptions,
}

/// Stroke settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeOptions {
    /// Stroke width in pixels
    pub width: f32,
    /// Stroke color; `None` disables stroke animation
    pub color: Option<StrokeColorOptions>,
}

/// Hue-only animation record as accepted by older documents.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HueOnlyAnimation {
    enable: bool,
    #[serde(default = "default_color_speed")]
    speed: f32,
    #[serde(default)]
    offset: RangeValue,
    #[serde(default = "default_true")]
    sync: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum RawStrokeAnimation {
    HueOnly(HueOnlyAnimation),
    PerChannel(HslAnimationOptions),
}

impl From<RawStrokeAnimation> for HslAnimationOptions {
    fn from(raw: RawStrokeAnimation) -> Self {
        match raw {
            RawStrokeAnimation::HueOnly(hue) => Self {
                h: ColorAnimationOptions {
                    enable: hue.enable,
                    speed: hue.speed,
                    offset: hue.offset,
                    sync: hue.sync,
                    underflow: ColorUnderflow::default(),
                },
                s: ColorAnimationOptions::default(),
                l: ColorAnimationOptions::default(),
            },
            RawStrokeAnimation::PerChannel(channels) => channels,
        }
    }
}

fn deserialize_stroke_animation<'de, D>(deserializer: D) -> Result<HslAnimationOptions, D::Error>
where
    D: Deserializer<'de>,
{
    RawStrokeAnimation::deserialize(deserializer).map(Into::into)
}

const fn default_color_speed() -> f32 {
    1.0
}

const fn default_true() -> bool {
    true
}

/// Timing of a life phase, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeTiming {
    /// Length in seconds; zero disables the phase
    pub value: RangeValue,
    /// When false each particle gets a random share of `value`
    pub sync: bool,
}

/// Life cycle settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeOptions {
    /// Number of lives; zero or less means unlimited respawns
    pub count: i32,
    /// Spawn delay before a life starts
    pub delay: LifeTiming,
    /// Length of one life; zero means the particle never expires by age
    pub duration: LifeTiming,
}

/// What happens when a particle reaches a canvas edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutMode {
    /// Reflect on both axes
    Bounce,
    /// Reflect on the x axis only
    #[serde(rename = "bounce-horizontal", alias = "bounceHorizontal")]
    BounceHorizontal,
    /// Reflect on the y axis only
    #[serde(rename = "bounce-vertical", alias = "bounceVertical")]
    BounceVertical,
    /// Reflect, then destroy so a splitting effect can take over
    Split,
    /// Remove from the container
    Destroy,
    /// Wrap around to the opposite edge
    #[default]
    Out,
    /// Leave alone; remove once it can never come back
    None,
}

/// Out mode per edge, with a shared default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutModes {
    /// Used for every edge without its own mode
    pub default: OutMode,
    /// Bottom edge override
    pub bottom: Option<OutMode>,
    /// Left edge override
    pub left: Option<OutMode>,
    /// Right edge override
    pub right: Option<OutMode>,
    /// Top edge override
    pub top: Option<OutMode>,
}

impl OutModes {
    /// Same mode on every edge.
    #[must_use]
    pub const fn all(mode: OutMode) -> Self {
        Self {
            default: mode,
            bottom: None,
            left: None,
            right: None,
            top: None,
        }
    }

    /// Effective mode for `direction`.
    #[must_use]
    pub fn for_direction(&self, direction: motes_common::OutModeDirection) -> OutMode {
        use motes_common::OutModeDirection as D;
        let edge = match direction {
            D::Bottom => self.bottom,
            D::Left => self.left,
            D::Right => self.right,
            D::Top => self.top,
        };
        edge.unwrap_or(self.default)
    }
}

/// Gravity settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GravityOptions {
    /// Whether gravity applies
    pub enable: bool,
    /// Pull upwards instead of downwards
    pub inverse: bool,
    /// Acceleration per frame
    pub acceleration: f32,
    /// Terminal vertical speed; zero disables the cap
    pub max_speed: f32,
}

impl Default for GravityOptions {
    fn default() -> Self {
        Self {
            enable: false,
            inverse: false,
            acceleration: 9.81,
            max_speed: 50.0,
        }
    }
}

/// Maximum travel distance from the spawn position, per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceOptions {
    /// Horizontal limit in pixels; zero means unlimited
    pub horizontal: f32,
    /// Vertical limit in pixels; zero means unlimited
    pub vertical: f32,
}

impl DistanceOptions {
    /// True when a horizontal limit is configured.
    #[must_use]
    pub fn has_horizontal(&self) -> bool {
        self.horizontal > 0.0
    }

    /// True when a vertical limit is configured.
    #[must_use]
    pub fn has_vertical(&self) -> bool {
        self.vertical > 0.0
    }
}

/// Initial heading of a particle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveDirection {
    /// Random heading
    #[default]
    None,
    /// Towards y = 0
    Top,
    /// Towards y = height
    Bottom,
    /// Towards x = 0
    Left,
    /// Towards x = width
    Right,
}

/// Movement settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MoveOptions {
    /// Whether particles move at all
    pub enable: bool,
    /// Base speed in pixels per frame, doubled
    pub speed: RangeValue,
    /// Initial heading
    pub direction: MoveDirection,
    /// Edge handling
    pub out_modes: OutModes,
    /// Gravity
    pub gravity: GravityOptions,
    /// Travel limits
    pub distance: DistanceOptions,
    /// Keep the perpendicular coordinate when wrapping
    pub warp: bool,
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self {
            enable: true,
            speed: RangeValue::Fixed(2.0),
            direction: MoveDirection::None,
            out_modes: OutModes::default(),
            gravity: GravityOptions::default(),
            distance: DistanceOptions::default(),
            warp: false,
        }
    }
}
