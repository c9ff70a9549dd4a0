//! Linear interpolation helpers

use crate::geometry::Point;

/// Interpolate between two scalars, `t` in [0, 1]
#[inline]
pub fn interpolate_f64(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// Interpolate between two points component-wise
#[inline]
pub fn interpolate_point(start: Point, end: Point, t: f64) -> Point {
    Point::new(
        interpolate_f64(start.x, end.x, t),
        interpolate_f64(start.y, end.y, t),
    )
}
