//! Cross-section profiles swept along a path.
//!
//! Profiles live in a `(u, v)` plane: `u` is the lateral offset toward the
//! left of travel, `v` is height. Rings are counter-clockwise.

use crate::error::{MeshError, Result};
use crate::math::arc_2d::sample_arc;
use crate::math::polygon_2d::{counter_clockwise, dedup_ring};
use crate::math::Point2;

/// Cross-section of a bumper rail: a rectangle with four quarter-round bevels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BumperProfile {
    /// Rail height above the ground.
    pub height: f64,
    /// Rail thickness across the lane.
    pub thickness: f64,
    /// Radius of the corner bevels.
    pub bevel_radius: f64,
    /// Number of straight pieces per bevel.
    pub bevel_segments: usize,
}

impl Default for BumperProfile {
    fn default() -> Self {
        Self {
            height: 0.1,
            thickness: 0.05,
            bevel_radius: 0.01,
            bevel_segments: 4,
        }
    }
}

impl BumperProfile {
    /// Checks the profile dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidParameters`] if height or thickness is not
    /// positive, or the bevel radius is negative.
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.height) || !positive(self.thickness) {
            return Err(MeshError::InvalidParameters(format!(
                "bumper needs positive height and thickness, got {} x {}",
                self.height, self.thickness
            ))
            .into());
        }
        if !(self.bevel_radius.is_finite() && self.bevel_radius >= 0.0) {
            return Err(MeshError::InvalidParameters(format!(
                "bevel radius must be non-negative, got {}",
                self.bevel_radius
            ))
            .into());
        }
        Ok(())
    }

    /// Bevel radius limited to half the smaller dimension.
    #[must_use]
    pub fn effective_bevel(&self) -> f64 {
        let limit = self.thickness.min(self.height) * 0.5;
        self.bevel_radius.clamp(0.0, limit.max(0.0))
    }

    /// The profile ring centered on `u = 0`, resting on `v = 0`.
    #[must_use]
    pub fn outline(&self) -> Vec<Point2> {
        let half = self.thickness * 0.5;
        let r = self.effective_bevel();
        let segments = self.bevel_segments.max(1);
        let corners = [
            (Point2::new(half - r, r), 270.0),
            (Point2::new(half - r, self.height - r), 0.0),
            (Point2::new(-half + r, self.height - r), 90.0),
            (Point2::new(-half + r, r), 180.0),
        ];

        let mut ring = Vec::with_capacity(4 * (segments + 1));
        for (center, start) in corners {
            ring.extend(sample_arc(&center, r, start, 90.0, segments));
        }
        counter_clockwise(dedup_ring(&ring))
    }
}

/// Axis-aligned rectangle ring.
pub(crate) fn rectangle(u_min: f64, u_max: f64, v_min: f64, v_max: f64) -> Vec<Point2> {
    vec![
        Point2::new(u_min, v_min),
        Point2::new(u_max, v_min),
        Point2::new(u_max, v_max),
        Point2::new(u_min, v_max),
    ]
}
