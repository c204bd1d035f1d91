//! Pure geometric primitives used by perception and collision.

use deepcow_data::Vector2;
use std::f64::consts::TAU;

/// Wraps an angle into `[0, 2π)`.
#[must_use]
pub fn wrap_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Distance along the ray to the first point of the circle, if within `max_length`.
///
/// `direction` must be a unit vector. An origin inside the circle hits at
/// distance `0.0`. Hits exactly at `max_length` count as misses, so a hit is
/// always strictly shorter than the ray.
#[must_use]
pub fn ray_circle_intersection(
    origin: Vector2,
    direction: Vector2,
    max_length: f64,
    center: Vector2,
    radius: f64,
) -> Option<f64> {
    if direction == Vector2::ZERO || radius <= 0.0 {
        return None;
    }
    let m = origin - center;
    let c = m.length_squared() - radius * radius;
    if c <= 0.0 {
        return (max_length > 0.0).then_some(0.0);
    }
    let b = m.dot(direction);
    if b > 0.0 {
        // Origin outside and pointing away.
        return None;
    }
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let t = -b - discriminant.sqrt();
    (t >= 0.0 && t < max_length).then_some(t)
}

/// Penetration of two overlapping circles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    pub depth: f64,
    /// Unit vector pointing from the first circle towards the second.
    pub axis: Vector2,
}

/// Overlap of circle `a` with circle `b`. Touching circles do not overlap.
///
/// Coincident centers separate along +x.
#[must_use]
pub fn circle_overlap(a: Vector2, ra: f64, b: Vector2, rb: f64) -> Option<Overlap> {
    let delta = b - a;
    let dist = delta.length();
    let depth = ra + rb - dist;
    if depth <= 0.0 {
        return None;
    }
    let axis = if dist > 0.0 {
        delta.scale(1.0 / dist)
    } else {
        Vector2::new(1.0, 0.0)
    };
    Some(Overlap { depth, axis })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
        assert!((wrap_angle(3.0 * PI) - PI).abs() < 1e-12);
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!(wrap_angle(-1e-20) < TAU);
        assert_eq!(wrap_angle(f64::NAN), 0.0);
    }

    #[test]
    fn test_ray_hits_circle_ahead() {
        let hit = ray_circle_intersection(
            Vector2::ZERO,
            Vector2::new(1.0, 0.0),
            100.0,
            Vector2::new(50.0, 0.0),
            10.0,
        );
        assert_eq!(hit, Some(40.0));
    }

    #[test]
    fn test_ray_misses_circle_behind() {
        let hit = ray_circle_intersection(
            Vector2::ZERO,
            Vector2::new(1.0, 0.0),
            100.0,
            Vector2::new(-50.0, 0.0),
            10.0,
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn test_ray_misses_circle_beyond_length() {
        let hit = ray_circle_intersection(
            Vector2::ZERO,
            Vector2::new(0.0, 1.0),
            30.0,
            Vector2::new(0.0, 50.0),
            10.0,
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn test_ray_origin_inside_circle() {
        let hit = ray_circle_intersection(
            Vector2::new(1.0, 1.0),
            Vector2::new(1.0, 0.0),
            10.0,
            Vector2::ZERO,
            5.0,
        );
        assert_eq!(hit, Some(0.0));
    }

    #[test]
    fn test_ray_zero_direction() {
        let hit = ray_circle_intersection(
            Vector2::ZERO,
            Vector2::ZERO,
            10.0,
            Vector2::new(3.0, 0.0),
            5.0,
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn test_circle_overlap_depth_and_axis() {
        let o = circle_overlap(Vector2::ZERO, 10.0, Vector2::new(15.0, 0.0), 10.0).unwrap();
        assert_eq!(o.depth, 5.0);
        assert_eq!(o.axis, Vector2::new(1.0, 0.0));
    }

    #[test]
    fn test_touching_circles_do_not_overlap() {
        assert!(circle_overlap(Vector2::ZERO, 10.0, Vector2::new(20.0, 0.0), 10.0).is_none());
    }

    #[test]
    fn test_coincident_circles_use_fallback_axis() {
        let o = circle_overlap(Vector2::ZERO, 1.0, Vector2::ZERO, 1.0).unwrap();
        assert_eq!(o.depth, 2.0);
        assert_eq!(o.axis, Vector2::new(1.0, 0.0));
    }
}
