//! Oriented bounding boxes on the ground plane.
//!
//! Uses the Separating Axis Theorem for overlap detection between rotated
//! rectangles. The corner and axis math here is shared by placement checks,
//! the minimum translation vector and the walkthrough resolver.

use crate::math::{normalize_angle, rotate_vector, sin_cos_deg, Point2, Vector2, MIN_EXTENT};

/// A rotated rectangle: center, rotation and full extents along its own axes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obb {
    /// Center on the ground plane.
    pub center: Point2,
    /// Counter-clockwise rotation in degrees.
    pub rotation: f64,
    /// Full extent along the local `x` axis.
    pub width: f64,
    /// Full extent along the local `z` axis.
    pub length: f64,
}

impl Obb {
    /// Creates a box. Non-positive or non-finite extents clamp to
    /// [`MIN_EXTENT`].
    #[must_use]
    pub fn new(center: Point2, rotation: f64, width: f64, length: f64) -> Self {
        Self {
            center,
            rotation: normalize_angle(rotation),
            width: clamp_extent(width),
            length: clamp_extent(length),
        }
    }

    /// Creates an unrotated box.
    #[must_use]
    pub fn axis_aligned(center: Point2, width: f64, length: f64) -> Self {
        Self::new(center, 0.0, width, length)
    }

    /// Creates an unrotated square with the given half-size.
    #[must_use]
    pub fn square(center: Point2, half_size: f64) -> Self {
        Self::axis_aligned(center, half_size * 2.0, half_size * 2.0)
    }

    /// Returns the same box moved to a new center.
    #[must_use]
    pub fn at(&self, center: Point2) -> Self {
        Self { center, ..*self }
    }

    /// Half width and half length.
    #[must_use]
    pub fn half_extents(&self) -> Vector2 {
        Vector2::new(self.width * 0.5, self.length * 0.5)
    }

    /// Unit local axes: `[x, z]` rotated by the box rotation.
    #[must_use]
    pub fn axes(&self) -> [Vector2; 2] {
        let (sin, cos) = sin_cos_deg(self.rotation);
        [Vector2::new(cos, sin), Vector2::new(-sin, cos)]
    }

    /// World corners in winding order.
    #[must_use]
    pub fn corners(&self) -> [Point2; 4] {
        const SIGNS: [(f64, f64); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
        let half = self.half_extents();
        SIGNS.map(|(sx, sz)| {
            self.center + rotate_vector(&Vector2::new(sx * half.x, sz * half.y), self.rotation)
        })
    }

    /// Interval covered by the corners projected onto `axis`.
    #[must_use]
    pub fn project(&self, axis: &Vector2) -> (f64, f64) {
        self.corners()
            .iter()
            .map(|c| c.coords.dot(axis))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| (lo.min(d), hi.max(d)))
    }

    /// Half the length of the box's shadow on a unit `axis`.
    #[must_use]
    pub fn projected_radius(&self, axis: &Vector2) -> f64 {
        let [u, v] = self.axes();
        let half = self.half_extents();
        half.x * u.dot(axis).abs() + half.y * v.dot(axis).abs()
    }
}

fn clamp_extent(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        tracing::warn!(value, "box extent clamped");
        MIN_EXTENT
    }
}

/// The four candidate separating axes of a pair of boxes.
#[must_use]
pub fn separating_axes(a: &Obb, b: &Obb) -> [Vector2; 4] {
    let [a0, a1] = a.axes();
    let [b0, b1] = b.axes();
    [a0, a1, b0, b1]
}

/// True if the interiors of two boxes overlap.
///
/// Touching edges or corners do NOT count as overlap.
#[must_use]
pub fn obb_overlap(a: &Obb, b: &Obb) -> bool {
    separating_axes(a, b).iter().all(|axis| {
        let (min_a, max_a) = a.project(axis);
        let (min_b, max_b) = b.project(axis);
        max_a > min_b && max_b > min_a
    })
}

/// True if all corners lie within (or on) an axis-aligned container of the
/// given size anchored at the origin.
#[must_use]
pub fn within_container(rect: &Obb, width: f64, length: f64) -> bool {
    rect.corners()
        .iter()
        .all(|c| (0.0..=width).contains(&c.x) && (0.0..=length).contains(&c.y))
}

/// An [`Obb`] tagged with a caller-defined id.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Footprint<Id> {
    /// Caller id, e.g. a placed hole's id.
    pub id: Id,
    /// Occupied rectangle.
    pub obb: Obb,
}

impl<Id> Footprint<Id> {
    /// Creates a new footprint.
    #[must_use]
    pub fn new(id: Id, obb: Obb) -> Self {
        Self { id, obb }
    }
}

/// True if `candidate` overlaps any footprint in `set`, skipping the one whose
/// id equals `exclude`. Stops at the first hit.
#[must_use]
pub fn any_collision<Id: PartialEq>(
    candidate: &Obb,
    set: &[Footprint<Id>],
    exclude: Option<&Id>,
) -> bool {
    set.iter()
        .filter(|f| exclude != Some(&f.id))
        .any(|f| obb_overlap(candidate, &f.obb))
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn unit(x: f64, z: f64, rotation: f64) -> Obb {
        Obb::new(Point2::new(x, z), rotation, 1.0, 1.0)
    }

    #[test]
    fn corners_of_rotated_box() {
        let obb = Obb::new(Point2::new(1.0, 1.0), 90.0, 2.0, 4.0);
        let c = obb.corners();
        // Width now runs along z, length along x.
        assert_eq!(c[0], Point2::new(3.0, 0.0));
        assert_eq!(c[2], Point2::new(-1.0, 2.0));
    }

    #[test]
    fn projection_matches_radius() {
        let obb = Obb::new(Point2::new(2.0, -1.0), 33.0, 1.5, 0.7);
        for axis in [Vector2::new(1.0, 0.0), Vector2::new(0.6, 0.8)] {
            let (lo, hi) = obb.project(&axis);
            let r = obb.projected_radius(&axis);
            assert!(((hi - lo) * 0.5 - r).abs() < 1e-12);
        }
    }

    #[test]
    fn overlapping_boxes_collide() {
        assert!(obb_overlap(&unit(0.0, 0.0, 0.0), &unit(0.5, 0.5, 0.0)));
        assert!(obb_overlap(&unit(0.0, 0.0, 0.0), &unit(0.9, 0.0, 45.0)));
    }

    #[test]
    fn touching_edges_do_not_collide() {
        assert!(!obb_overlap(&unit(0.0, 0.0, 0.0), &unit(1.0, 0.0, 0.0)));
        assert!(!obb_overlap(&unit(0.0, 0.0, 0.0), &unit(0.0, 1.0, 0.0)));
        assert!(!obb_overlap(&unit(0.0, 0.0, 0.0), &unit(1.0, 1.0, 0.0)));
    }

    #[test]
    fn separated_boxes_never_collide() {
        for step in 0..24 {
            let ra = f64::from(step) * 15.0;
            let rb = 360.0 - ra * 0.5;
            assert!(!obb_overlap(&unit(0.0, 0.0, ra), &unit(4.0, 0.0, rb)));
            assert!(!obb_overlap(&unit(0.0, 0.0, ra), &unit(0.0, -4.0, rb)));
        }
    }

    #[test]
    fn overlap_is_symmetric() {
        let boxes = [
            unit(0.0, 0.0, 0.0),
            Obb::new(Point2::new(0.8, 0.3), 30.0, 2.0, 0.4),
            Obb::new(Point2::new(1.6, 1.5), 72.0, 0.5, 3.0),
            Obb::new(Point2::new(-1.0, 0.7), 300.0, 1.2, 1.2),
        ];
        for a in &boxes {
            for b in &boxes {
                assert_eq!(obb_overlap(a, b), obb_overlap(b, a));
            }
        }
    }

    #[test]
    fn diamond_gap_is_detected() {
        // Axis-aligned boxes would overlap; rotating one opens a gap along its
        // own axis.
        let a = unit(0.0, 0.0, 0.0);
        let b = Obb::new(Point2::new(1.2, 1.2), 45.0, 1.0, 1.0);
        assert!(!obb_overlap(&a, &b));
    }

    #[test]
    fn containment_checks_all_corners() {
        assert!(within_container(&unit(0.5, 0.5, 0.0), 10.0, 10.0));
        assert!(!within_container(&unit(0.5, 0.5, 45.0), 10.0, 10.0));
        assert!(!within_container(&unit(9.8, 5.0, 0.0), 10.0, 10.0));
        assert!(within_container(&unit(5.0, 5.0, 45.0), 10.0, 10.0));
    }

    #[test]
    fn any_collision_honours_exclusion() {
        let set = vec![
            Footprint::new(1, unit(0.0, 0.0, 0.0)),
            Footprint::new(2, unit(5.0, 0.0, 0.0)),
        ];
        let moved = unit(0.2, 0.0, 0.0);
        assert!(any_collision(&moved, &set, None));
        assert!(!any_collision(&moved, &set, Some(&1)));
        assert!(any_collision(&unit(4.5, 0.0, 0.0), &set, Some(&1)));
        assert!(!any_collision(&unit(2.5, 0.0, 0.0), &set, None));
    }

    #[test]
    fn degenerate_extents_are_clamped() {
        let obb = Obb::new(Point2::origin(), 0.0, 0.0, f64::NAN);
        assert_eq!(obb.width, MIN_EXTENT);
        assert_eq!(obb.length, MIN_EXTENT);
    }
}
