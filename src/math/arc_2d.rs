//! Ground-plane arc math.
//!
//! Polar angles are measured in degrees from `+x` toward `+z`. A left-turning
//! arc (center on the `−x` side of travel) sweeps counter-clockwise, a
//! right-turning arc sweeps clockwise.

use super::angle::sin_cos_deg;
use super::{Point2, Vector2, TOLERANCE};

/// Turning direction of an arc relative to the direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Turn {
    Left,
    Right,
}

impl Turn {
    /// `+1` for left (counter-clockwise), `−1` for right.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => 1.0,
            Self::Right => -1.0,
        }
    }

    /// The opposite turn.
    #[must_use]
    pub fn mirrored(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Infers the turn from where the arc center sits relative to a walker at
    /// the origin heading toward `+z`.
    #[must_use]
    pub fn from_center(center: &Point2) -> Self {
        if center.x < 0.0 {
            Self::Left
        } else {
            Self::Right
        }
    }
}

/// Evaluates a point on an arc at parameter `t` in `[0, 1]`.
///
/// `sweep` is signed: positive sweeps counter-clockwise.
#[must_use]
pub fn arc_point_at(center: &Point2, radius: f64, start_angle: f64, sweep: f64, t: f64) -> Point2 {
    let (sin, cos) = sin_cos_deg(start_angle + sweep * t);
    center + Vector2::new(radius * cos, radius * sin)
}

/// Polar angle of `point` around `center`, in degrees.
///
/// Returns `0` when the two coincide.
#[must_use]
pub fn polar_angle(center: &Point2, point: &Point2) -> f64 {
    let d = point - center;
    if d.norm() < TOLERANCE {
        return 0.0;
    }
    d.y.atan2(d.x).to_degrees()
}

/// Length of an arc with the given radius and sweep (degrees, either sign).
#[must_use]
pub fn arc_length(radius: f64, sweep: f64) -> f64 {
    radius * sweep.abs().to_radians()
}

/// Number of straight pieces used to approximate a sweep, given the count for
/// a quarter turn. Always at least one.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn segments_for_sweep(sweep: f64, per_quarter: usize) -> usize {
    let per_quarter = per_quarter.max(1) as f64;
    let pieces = (sweep.abs() / 90.0 * per_quarter).ceil();
    if pieces.is_finite() && pieces >= 1.0 {
        pieces as usize
    } else {
        1
    }
}

/// Samples `segments + 1` evenly spaced points along an arc, endpoints included.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sample_arc(
    center: &Point2,
    radius: f64,
    start_angle: f64,
    sweep: f64,
    segments: usize,
) -> Vec<Point2> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| arc_point_at(center, radius, start_angle, sweep, i as f64 / segments as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn quarter_arc_ccw() {
        let c = Point2::new(-1.0, 0.0);
        let end = arc_point_at(&c, 1.0, 0.0, 90.0, 1.0);
        assert!((end.x + 1.0).abs() < TOL, "x={}", end.x);
        assert!((end.y - 1.0).abs() < TOL, "z={}", end.y);

        let mid = arc_point_at(&c, 1.0, 0.0, 90.0, 0.5);
        let h = std::f64::consts::FRAC_1_SQRT_2;
        assert!((mid.x - (h - 1.0)).abs() < TOL);
        assert!((mid.y - h).abs() < TOL);
    }

    #[test]
    fn quarter_arc_cw_mirrors_ccw() {
        let left = arc_point_at(&Point2::new(-0.8, 0.0), 0.8, 0.0, 90.0, 1.0);
        let right = arc_point_at(&Point2::new(0.8, 0.0), 0.8, 180.0, -90.0, 1.0);
        assert!((left.x + right.x).abs() < TOL);
        assert!((left.y - right.y).abs() < TOL);
    }

    #[test]
    fn polar_angle_of_entry_point() {
        let origin = Point2::origin();
        assert!(polar_angle(&Point2::new(-0.8, 0.0), &origin).abs() < TOL);
        assert!((polar_angle(&Point2::new(0.8, 0.0), &origin) - 180.0).abs() < TOL);
        assert!(polar_angle(&origin, &origin).abs() < TOL);
    }

    #[test]
    fn turn_from_center_side() {
        assert_eq!(Turn::from_center(&Point2::new(-1.0, 0.0)), Turn::Left);
        assert_eq!(Turn::from_center(&Point2::new(1.0, 0.0)), Turn::Right);
        assert_eq!(Turn::Left.mirrored(), Turn::Right);
    }

    #[test]
    fn segment_count_scales_with_sweep() {
        assert_eq!(segments_for_sweep(90.0, 8), 8);
        assert_eq!(segments_for_sweep(180.0, 8), 16);
        assert_eq!(segments_for_sweep(-45.0, 8), 4);
        assert_eq!(segments_for_sweep(0.0, 8), 1);
        assert_eq!(segments_for_sweep(f64::NAN, 8), 1);
    }

    #[test]
    fn sample_includes_endpoints() {
        let pts = sample_arc(&Point2::new(0.0, 0.0), 2.0, 0.0, 180.0, 4);
        assert_eq!(pts.len(), 5);
        assert!((pts[0].x - 2.0).abs() < TOL);
        assert!((pts[4].x + 2.0).abs() < TOL);
        assert!(pts[4].y.abs() < TOL);
    }

    #[test]
    fn arc_length_of_half_circle() {
        assert!((arc_length(1.0, -180.0) - std::f64::consts::PI).abs() < TOL);
    }
}
