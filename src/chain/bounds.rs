use crate::collision::Obb;
use crate::math::{Point2, Pose, Vector2};

use super::instance::SolvedChain;

/// Axis-aligned footprint of a solved hole, in the chain's own frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateBounds {
    /// Extent along `x`.
    pub width: f64,
    /// Extent along `z`.
    pub length: f64,
    /// Minimum corner.
    pub min: Point2,
}

impl Default for TemplateBounds {
    fn default() -> Self {
        Self {
            width: 0.0,
            length: 0.0,
            min: Point2::origin(),
        }
    }
}

impl TemplateBounds {
    /// Maximum corner.
    #[must_use]
    pub fn max(&self) -> Point2 {
        self.min + Vector2::new(self.width, self.length)
    }

    /// Center of the footprint in the chain frame.
    #[must_use]
    pub fn center(&self) -> Point2 {
        self.min + Vector2::new(self.width * 0.5, self.length * 0.5)
    }

    /// The footprint as an oriented box once the hole's chain frame is placed
    /// at `placement` in the hall.
    #[must_use]
    pub fn footprint(&self, placement: &Pose) -> Obb {
        Obb::new(
            placement.transform_point(&self.center()),
            placement.rotation,
            self.width,
            self.length,
        )
    }
}

/// Computes the tight axis-aligned footprint of a solved chain, padded by half
/// the lane width on every side.
///
/// Every bound sample of every spec (entry, exit, piece joints and arc
/// midpoints) is mapped to world space. An empty chain yields zero-sized
/// bounds at the origin; negative or non-finite lane widths count as zero.
#[must_use]
pub fn compute_bounds(chain: &SolvedChain, lane_width: f64) -> TemplateBounds {
    if chain.is_empty() {
        return TemplateBounds::default();
    }
    let half = if lane_width.is_finite() {
        lane_width.max(0.0) * 0.5
    } else {
        0.0
    };

    let mut min_x = f64::INFINITY;
    let mut min_z = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_z = f64::NEG_INFINITY;

    for segment in chain {
        let pose = segment.pose();
        for sample in segment.spec().bound_samples() {
            let p = pose.transform_point(sample);
            min_x = min_x.min(p.x - half);
            max_x = max_x.max(p.x + half);
            min_z = min_z.min(p.y - half);
            max_z = max_z.max(p.y + half);
        }
    }

    TemplateBounds {
        width: max_x - min_x,
        length: max_z - min_z,
        min: Point2::new(min_x, min_z),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::catalog::{ids, SpecRegistry};
    use crate::chain::HoleChain;

    const TOL: f64 = 1e-9;

    fn bounds(spec_ids: &[&str], lane: f64) -> TemplateBounds {
        let hole = HoleChain::from_spec_ids(SpecRegistry::standard(), spec_ids.iter().copied()).unwrap();
        compute_bounds(hole.solved(), lane)
    }

    #[test]
    fn empty_chain_has_zero_bounds() {
        let b = compute_bounds(&SolvedChain::default(), 0.5);
        assert_eq!(b, TemplateBounds::default());
    }

    #[test]
    fn straight_chain_bounds() {
        let b = bounds(&[ids::STRAIGHT_1M, ids::STRAIGHT_2M], 0.6);
        assert!((b.width - 0.6).abs() < TOL);
        assert!((b.length - 3.6).abs() < TOL);
        assert!((b.min.x + 0.3).abs() < TOL);
        assert!((b.min.y + 0.3).abs() < TOL);
    }

    #[test]
    fn zero_width_matches_centerline_extent() {
        let b = bounds(&[ids::STRAIGHT_1M, ids::CURVE_90_LEFT, ids::STRAIGHT_1M], 0.0);
        // Centerline spans x in [-1.8, 0] and z in [0, 1.8].
        assert!((b.width - 1.8).abs() < TOL);
        assert!((b.length - 1.8).abs() < TOL);
    }

    #[test]
    fn arc_midpoint_widens_bounds() {
        // A lone 180 degree turn: endpoints alone would give zero length
        // beyond the lead-in straights.
        let b = bounds(&[ids::U_TURN_LEFT], 0.0);
        assert!((b.width - 1.2).abs() < TOL);
        // Lead-in 0.25 plus the arc's bulge (0.6) past it.
        assert!((b.length - 0.85).abs() < TOL);
    }

    #[test]
    fn lane_width_pads_uniformly() {
        let chain = [ids::STRAIGHT_1M, ids::S_CURVE_RIGHT, ids::CURVE_45_LEFT, ids::CHICANE_LEFT];
        let narrow = bounds(&chain, 0.5);
        let wide = bounds(&chain, 0.75);
        assert!((wide.width - narrow.width - 0.25).abs() < TOL);
        assert!((wide.length - narrow.length - 0.25).abs() < TOL);
    }

    #[test]
    fn negative_lane_counts_as_zero() {
        let a = bounds(&[ids::CURVE_45_LEFT], -1.0);
        let b = bounds(&[ids::CURVE_45_LEFT], 0.0);
        assert_eq!(a, b);
    }

    #[test]
    fn footprint_follows_placement() {
        let b = bounds(&[ids::STRAIGHT_2M], 1.0);
        let obb = b.footprint(&Pose::new(Point2::new(5.0, 5.0), 90.0));
        // Chain center (0, 1) rotated by 90 lands at (-1, 0) from the placement.
        assert!((obb.center.x - 4.0).abs() < TOL);
        assert!((obb.center.y - 5.0).abs() < TOL);
        assert_eq!(obb.rotation, 90.0);
        assert!((obb.width - 1.0).abs() < TOL);
        assert!((obb.length - 3.0).abs() < TOL);
    }
}
