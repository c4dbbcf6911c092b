use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::catalog::SegmentSpec;
use crate::chain::SolvedChain;
use crate::error::{MeshError, Result};

use super::profile::rectangle;
use super::sweep::{path_frames, sweep_profile};
use super::{MeshParams, TriangleMesh};

/// The three meshes of one path segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentMeshes {
    /// Playing surface.
    pub felt: TriangleMesh,
    /// Rail on the left of travel.
    pub left_bumper: TriangleMesh,
    /// Rail on the right of travel.
    pub right_bumper: TriangleMesh,
}

impl SegmentMeshes {
    /// Total triangle count over all three meshes.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.felt.triangle_count()
            + self.left_bumper.triangle_count()
            + self.right_bumper.triangle_count()
    }

    /// The same meshes placed by `pose`.
    #[must_use]
    pub fn transformed(&self, pose: &crate::math::Pose) -> SegmentMeshes {
        SegmentMeshes {
            felt: self.felt.transformed(pose),
            left_bumper: self.left_bumper.transformed(pose),
            right_bumper: self.right_bumper.transformed(pose),
        }
    }
}

/// Builds the felt and bumper meshes of a segment in its local frame.
///
/// Every shape goes through the same path sweep: straights are a single run,
/// curves an arc, compounds the concatenation of their placed pieces. On a
/// curve the rail nearer the center comes out as `left_bumper` for left turns
/// and as `right_bumper` for right turns.
pub struct BuildSegmentMeshes<'a> {
    spec: &'a SegmentSpec,
    lane_width: f64,
    params: MeshParams,
}

impl<'a> BuildSegmentMeshes<'a> {
    /// Creates a new `BuildSegmentMeshes` operation.
    #[must_use]
    pub fn new(spec: &'a SegmentSpec, lane_width: f64, params: MeshParams) -> Self {
        Self {
            spec,
            lane_width,
            params,
        }
    }

    /// Executes the build.
    ///
    /// Offsets that would cross an arc center are clamped onto the center and
    /// logged; see [`SegmentSpec::accepts_lane_width`].
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidParameters`] if the lane width is not a
    /// positive finite number or the parameters are invalid, and
    /// [`MeshError::Triangulation`] if a cap cannot be triangulated.
    pub fn execute(&self) -> Result<SegmentMeshes> {
        if !(self.lane_width.is_finite() && self.lane_width > 0.0) {
            return Err(MeshError::InvalidParameters(format!(
                "lane width must be positive, got {}",
                self.lane_width
            ))
            .into());
        }
        self.params.validate()?;

        let bumper = &self.params.bumper;
        if !self.spec.accepts_lane_width(self.lane_width, bumper.thickness) {
            tracing::warn!(
                spec = self.spec.id(),
                lane_width = self.lane_width,
                "lane too wide for arc radius, inner offsets clamped to the center"
            );
        }

        let half = self.lane_width * 0.5;
        let frames = path_frames(self.spec.pieces(), self.params.arc_segments_per_quarter);
        let felt = sweep_profile(
            &frames,
            &rectangle(-half, half, 0.0, self.params.felt_thickness),
            0.0,
        )?;

        let rail = bumper.outline();
        let rail_offset = half + bumper.thickness * 0.5;
        let left_bumper = sweep_profile(&frames, &rail, rail_offset)?;
        let right_bumper = sweep_profile(&frames, &rail, -rail_offset)?;

        let meshes = SegmentMeshes {
            felt: felt.welded(),
            left_bumper: left_bumper.welded(),
            right_bumper: right_bumper.welded(),
        };
        tracing::debug!(
            spec = self.spec.id(),
            stations = frames.len(),
            triangles = meshes.triangle_count(),
            "built segment meshes"
        );
        Ok(meshes)
    }
}

/// Builds world-space meshes for every segment of a solved chain, in chain
/// order. Each distinct spec is built once.
///
/// # Errors
///
/// Propagates the first error from [`BuildSegmentMeshes::execute`].
pub fn build_hole_meshes(
    chain: &SolvedChain,
    lane_width: f64,
    params: MeshParams,
) -> Result<Vec<SegmentMeshes>> {
    let mut local: HashMap<&str, SegmentMeshes> = HashMap::new();
    let mut out = Vec::with_capacity(chain.len());
    for segment in chain {
        let spec = segment.spec();
        let meshes = match local.entry(spec.id()) {
            Entry::Occupied(built) => built.into_mut(),
            Entry::Vacant(slot) => {
                slot.insert(BuildSegmentMeshes::new(spec, lane_width, params).execute()?)
            }
        };
        out.push(meshes.transformed(&segment.pose()));
    }
    Ok(out)
}
