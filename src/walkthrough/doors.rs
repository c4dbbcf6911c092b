use crate::math::Point2;

/// One side of the hall. North and South run along `x`, East and West along
/// `z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Wall {
    /// `z = length`.
    North,
    /// `z = 0`.
    South,
    /// `x = width`.
    East,
    /// `x = 0`.
    West,
}

impl Wall {
    /// The coordinate measured along this wall: `x` for North/South, `z` for
    /// East/West.
    #[must_use]
    pub fn along(self, p: &Point2) -> f64 {
        match self {
            Self::North | Self::South => p.x,
            Self::East | Self::West => p.y,
        }
    }
}

/// An interval along a wall where the boundary clamp is suspended.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoorZone {
    /// Wall the door is cut into.
    pub wall: Wall,
    /// Start of the opening along the wall.
    pub min: f64,
    /// End of the opening along the wall.
    pub max: f64,
}

impl DoorZone {
    /// Creates a zone; the bounds are put in order.
    #[must_use]
    pub fn new(wall: Wall, a: f64, b: f64) -> Self {
        Self {
            wall,
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Derives the zone of a door of `width` centered `center` along `wall`.
    #[must_use]
    pub fn from_door(wall: Wall, center: f64, width: f64) -> Self {
        let half = width.abs() * 0.5;
        Self::new(wall, center - half, center + half)
    }

    /// Whether a coordinate along the wall lies in the opening, bounds
    /// included.
    #[must_use]
    pub fn contains(&self, along: f64) -> bool {
        (self.min..=self.max).contains(&along)
    }

    /// Whether `p` crosses this zone's wall inside the opening.
    #[must_use]
    pub fn admits(&self, p: &Point2) -> bool {
        self.contains(self.wall.along(p))
    }
}
