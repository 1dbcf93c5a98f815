//! Canvas geometry and the numeric helpers used by boundary handling.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Width and height of the drawing surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl Dimension {
    /// Creates a new dimension.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns true when both sides are finite and strictly positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned box around a particle, in canvas coordinates.
///
/// `top` is the smallest y value: the canvas y axis grows downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Smallest y
    pub top: f32,
    /// Smallest x
    pub left: f32,
    /// Largest x
    pub right: f32,
    /// Largest y
    pub bottom: f32,
}

/// One of the four canvas edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutModeDirection {
    /// Bottom edge (y = height)
    Bottom,
    /// Left edge (x = 0)
    Left,
    /// Right edge (x = width)
    Right,
    /// Top edge (y = 0)
    Top,
}

impl OutModeDirection {
    /// Edges in the order they are resolved each tick.
    pub const ALL: [Self; 4] = [Self::Bottom, Self::Left, Self::Right, Self::Top];

    /// True for the left and right edges.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// True for the top and bottom edges.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Clamps `num` into `[min, max]`.
///
/// Unlike [`f32::clamp`] this never panics when `min > max`; the upper bound
/// wins, which keeps misconfigured ranges from taking the simulation down.
#[must_use]
pub fn clamp(num: f32, min: f32, max: f32) -> f32 {
    num.max(min).min(max)
}

/// Folds `value` into `[0, period)`.
#[must_use]
pub fn wrap(value: f32, period: f32) -> f32 {
    let wrapped = value.rem_euclid(period);
    // rem_euclid can round up to exactly `period` for tiny negative inputs
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}

/// Folds an angle in radians into `[0, 2π)`.
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    wrap(angle, TAU)
}

/// Computes the box of half-size `radius` centered on `point`.
#[must_use]
pub fn calculate_bounds(point: Vec2, radius: f32) -> Bounds {
    Bounds {
        top: point.y - radius,
        left: point.x - radius,
        right: point.x + radius,
        bottom: point.y + radius,
    }
}

/// Tests whether `bounds` still overlaps the canvas.
///
/// With a direction only that edge is checked; without one all four are.
#[must_use]
pub fn are_bounds_inside(bounds: Bounds, size: Dimension, direction: Option<OutModeDirection>) -> bool {
    let checks = |edge: OutModeDirection| direction.map_or(true, |d| d == edge);
    let mut inside = true;

    if checks(OutModeDirection::Bottom) {
        inside = bounds.top < size.height;
    }
    if inside && checks(OutModeDirection::Left) {
        inside = bounds.right > 0.0;
    }
    if inside && checks(OutModeDirection::Right) {
        inside = bounds.left < size.width;
    }
    if inside && checks(OutModeDirection::Top) {
        inside = bounds.bottom > 0.0;
    }

    inside
}

/// Tests whether a particle at `point` with `radius` is still on the canvas.
#[must_use]
pub fn is_point_inside(
    point: Vec2,
    size: Dimension,
    radius: f32,
    direction: Option<OutModeDirection>,
) -> bool {
    are_bounds_inside(calculate_bounds(point, radius), size, direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_inverted_range() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
        // min > max must not panic
        assert_eq!(clamp(5.0, 8.0, 2.0), 2.0);
    }

    #[test]
    fn test_bounds_from_radius() {
        let b = calculate_bounds(Vec2::new(10.0, 20.0), 5.0);
        assert_eq!(b.left, 5.0);
        assert_eq!(b.right, 15.0);
        assert_eq!(b.top, 15.0);
        assert_eq!(b.bottom, 25.0);
    }

    #[test]
    fn test_inside_per_edge() {
        let canvas = Dimension::new(100.0, 100.0);
        // Fully past the left edge, but the right edge check doesn't care
        let p = Vec2::new(-20.0, 50.0);
        assert!(!is_point_inside(p, canvas, 10.0, Some(OutModeDirection::Left)));
        assert!(is_point_inside(p, canvas, 10.0, Some(OutModeDirection::Right)));
        assert!(is_point_inside(p, canvas, 10.0, Some(OutModeDirection::Top)));
        assert!(is_point_inside(p, canvas, 10.0, Some(OutModeDirection::Bottom)));
    }

    #[test]
    fn test_partially_visible_is_inside() {
        let canvas = Dimension::new(100.0, 100.0);
        let p = Vec2::new(105.0, 50.0);
        assert!(is_point_inside(p, canvas, 10.0, Some(OutModeDirection::Right)));
        assert!(!is_point_inside(p, canvas, 4.0, Some(OutModeDirection::Right)));
    }

    #[test]
    fn test_wrap_angle_range() {
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!((wrap_angle(TAU + 1.0) - 1.0).abs() < 1e-5);
        assert!((wrap_angle(-1.0) - (TAU - 1.0)).abs() < 1e-5);
        let tiny = wrap_angle(-1e-9);
        assert!((0.0..TAU).contains(&tiny));
        assert_eq!(wrap(363.0, 360.0), 3.0);
        assert_eq!(wrap(360.0, 360.0), 0.0);
    }

    #[test]
    fn test_dimension_validity() {
        assert!(Dimension::new(1.0, 1.0).is_valid());
        assert!(!Dimension::new(0.0, 1.0).is_valid());
        assert!(!Dimension::new(f32::NAN, 1.0).is_valid());
    }
}
