//! Degree-based angle helpers for the ground plane.
//!
//! Rotations are counter-clockwise in the `(x, z)` plane:
//! `x' = x cos θ − z sin θ`, `z' = x sin θ + z cos θ`.
//! A rotation of 90° therefore turns the travel direction `+z` into `−x`,
//! which is a left turn for a walker heading toward `+z`.

use super::{Point2, Vector2};

/// Wraps an angle in degrees into `[0, 360)`.
///
/// Non-finite input collapses to `0` so a single bad value cannot poison a
/// whole chain.
#[must_use]
pub fn normalize_angle(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        tracing::warn!(degrees, "non-finite angle clamped to 0");
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.
    if wrapped >= 360.0 {
        0.0
    } else {
        // Adding zero folds -0.0 into +0.0.
        wrapped + 0.0
    }
}

/// Returns `(sin, cos)` of an angle in degrees.
///
/// Exact quarter turns return exact values, so axis-aligned chains do not
/// pick up `6e-17` style drift.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn sin_cos_deg(degrees: f64) -> (f64, f64) {
    let wrapped = normalize_angle(degrees);
    if wrapped == 0.0 {
        (0.0, 1.0)
    } else if wrapped == 90.0 {
        (1.0, 0.0)
    } else if wrapped == 180.0 {
        (0.0, -1.0)
    } else if wrapped == 270.0 {
        (-1.0, 0.0)
    } else {
        wrapped.to_radians().sin_cos()
    }
}

/// Rotates a ground-plane vector counter-clockwise by `degrees`.
#[must_use]
pub fn rotate_vector(v: &Vector2, degrees: f64) -> Vector2 {
    let (sin, cos) = sin_cos_deg(degrees);
    Vector2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Rotates a ground-plane point about the origin by `degrees`.
#[must_use]
pub fn rotate_point(p: &Point2, degrees: f64) -> Point2 {
    Point2::from(rotate_vector(&p.coords, degrees))
}

/// Travel direction of something rotated by `degrees` (local `+z` rotated).
#[must_use]
pub fn heading(degrees: f64) -> Vector2 {
    rotate_vector(&Vector2::new(0.0, 1.0), degrees)
}

/// Left-hand normal of a travel direction (`+z` → `−x`).
#[must_use]
pub fn left_of(direction: &Vector2) -> Vector2 {
    Vector2::new(-direction.y, direction.x)
}
