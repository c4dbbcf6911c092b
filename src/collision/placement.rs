use crate::math::Point2;

use super::obb::{any_collision, within_container, Footprint, Obb};

/// The hall: an axis-aligned rectangle anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Container {
    /// Extent along `x`.
    pub width: f64,
    /// Extent along `z`.
    pub length: f64,
}

impl Container {
    /// Creates a container. Negative or non-finite extents count as zero.
    #[must_use]
    pub fn new(width: f64, length: f64) -> Self {
        let sane = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            width: sane(width),
            length: sane(length),
        }
    }

    /// True if `rect` lies entirely inside the container, boundary included.
    #[must_use]
    pub fn contains(&self, rect: &Obb) -> bool {
        within_container(rect, self.width, self.length)
    }

    /// Center of the floor.
    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::new(self.width * 0.5, self.length * 0.5)
    }
}

/// Result of checking a candidate placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Inside the hall and clear of everything already placed.
    Valid,
    /// Pokes through a wall.
    OutOfBounds,
    /// Overlaps a placed footprint.
    Collides,
}

impl Placement {
    /// Returns whether the placement can be committed.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }
}

/// Checks whether `candidate` may be placed in `container` next to `placed`.
///
/// Containment is checked first. `exclude` skips the candidate's own
/// previous footprint when an existing item is being moved.
#[must_use]
pub fn check_placement<Id: PartialEq>(
    candidate: &Obb,
    container: &Container,
    placed: &[Footprint<Id>],
    exclude: Option<&Id>,
) -> Placement {
    if !container.contains(candidate) {
        Placement::OutOfBounds
    } else if any_collision(candidate, placed, exclude) {
        Placement::Collides
    } else {
        Placement::Valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hall() -> Container {
        Container::new(10.0, 8.0)
    }

    #[test]
    fn empty_hall_accepts_inside_box() {
        let rect = Obb::axis_aligned(Point2::new(2.0, 2.0), 2.0, 3.0);
        assert_eq!(check_placement::<u32>(&rect, &hall(), &[], None), Placement::Valid);
    }

    #[test]
    fn box_on_the_wall_is_still_inside() {
        let rect = Obb::axis_aligned(Point2::new(1.0, 1.5), 2.0, 3.0);
        assert!(hall().contains(&rect));
    }

    #[test]
    fn rotation_can_push_through_wall() {
        let rect = Obb::new(Point2::new(1.0, 4.0), 0.0, 2.0, 6.0);
        assert!(hall().contains(&rect));
        let turned = Obb::new(Point2::new(1.0, 4.0), 90.0, 2.0, 6.0);
        assert_eq!(
            check_placement::<u32>(&turned, &hall(), &[], None),
            Placement::OutOfBounds
        );
    }

    #[test]
    fn overlap_with_placed_hole_is_rejected() {
        let placed = vec![Footprint::new("hole-1", Obb::axis_aligned(Point2::new(3.0, 3.0), 2.0, 2.0))];
        let candidate = Obb::axis_aligned(Point2::new(4.0, 3.5), 2.0, 2.0);
        assert_eq!(
            check_placement(&candidate, &hall(), &placed, None),
            Placement::Collides
        );
        // Moving hole-1 itself ignores its old footprint.
        assert!(check_placement(&candidate, &hall(), &placed, Some(&"hole-1")).is_valid());
    }

    #[test]
    fn flush_neighbours_are_valid() {
        let placed = vec![Footprint::new(7_u32, Obb::axis_aligned(Point2::new(3.0, 3.0), 2.0, 2.0))];
        let candidate = Obb::axis_aligned(Point2::new(5.0, 3.0), 2.0, 2.0);
        assert!(check_placement(&candidate, &hall(), &placed, None).is_valid());
    }
}
