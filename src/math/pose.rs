use super::angle::{normalize_angle, rotate_point, rotate_vector, sin_cos_deg};
use super::{Point2, Vector2};

/// A connection point in a segment's local frame.
///
/// `angle` is the outward-facing direction in degrees; the outward vector is
/// `(sin angle, cos angle)`, so `0` faces `+z` and `180` faces `−z`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Port {
    /// Local position.
    pub position: Point2,
    /// Outward-facing angle in degrees.
    pub angle: f64,
}

impl Port {
    /// Creates a new port.
    #[must_use]
    pub fn new(x: f64, z: f64, angle: f64) -> Self {
        Self {
            position: Point2::new(x, z),
            angle,
        }
    }

    /// The entry port every segment shares: local origin, facing backward.
    #[must_use]
    pub fn entry() -> Self {
        Self::new(0.0, 0.0, 180.0)
    }

    /// Unit vector pointing out of the segment through this port.
    #[must_use]
    pub fn outward(&self) -> Vector2 {
        let (sin, cos) = sin_cos_deg(self.angle);
        Vector2::new(sin, cos)
    }
}

/// A world-space placement: position plus counter-clockwise rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    /// Position of the local origin.
    pub position: Point2,
    /// Rotation in degrees, in `[0, 360)`.
    pub rotation: f64,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    /// Creates a new pose; the rotation is normalized.
    #[must_use]
    pub fn new(position: Point2, rotation: f64) -> Self {
        Self {
            position,
            rotation: normalize_angle(rotation),
        }
    }

    /// The origin with no rotation.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            position: Point2::origin(),
            rotation: 0.0,
        }
    }

    /// Maps a local point into this pose's parent frame.
    #[must_use]
    pub fn transform_point(&self, local: &Point2) -> Point2 {
        self.position + rotate_point(local, self.rotation).coords
    }

    /// Maps a local direction into this pose's parent frame.
    #[must_use]
    pub fn transform_vector(&self, local: &Vector2) -> Vector2 {
        rotate_vector(local, self.rotation)
    }

    /// Expresses `inner` (given relative to `self`) in `self`'s parent frame.
    #[must_use]
    pub fn compose(&self, inner: &Pose) -> Pose {
        Pose::new(self.transform_point(&inner.position), self.rotation + inner.rotation)
    }

    /// Places the next piece so that its `next_entry` port coincides with this
    /// piece's `exit` port.
    ///
    /// The heading composes by subtracting the exit port's outward angle:
    /// a straight (exit angle 0) keeps the rotation, a left quarter turn
    /// (exit angle 270) adds 90°.
    #[must_use]
    pub fn advance(&self, exit: &Port, next_entry: &Port) -> Pose {
        let exit_world = self.transform_point(&exit.position);
        let rotation = normalize_angle(self.rotation - exit.angle);
        let entry_offset = rotate_vector(&next_entry.position.coords, rotation);
        Pose {
            position: exit_world - entry_offset,
            rotation,
        }
    }

    /// The port through which the next piece attaches, expressed in this
    /// pose's parent frame.
    #[must_use]
    pub fn exit_port(&self, exit: &Port) -> Port {
        Port {
            position: self.transform_point(&exit.position),
            angle: normalize_angle(exit.angle - self.rotation),
        }
    }
}
