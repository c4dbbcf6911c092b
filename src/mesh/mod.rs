//! Procedural meshes for path segments and obstacles.
//!
//! Everything is built in a segment's local frame: entry at the origin,
//! travel toward `+z`, `+y` up and left toward `−x`.

mod cap;
mod extrusion;
mod fillet;
mod profile;
mod segment;
mod sweep;
mod weld;

pub use extrusion::BuildBumperExtrusion;
pub use fillet::BuildCornerFillet;
pub use profile::BumperProfile;
pub use segment::{build_hole_meshes, BuildSegmentMeshes, SegmentMeshes};

use crate::catalog::SpecRegistry;
use crate::error::{MeshError, Result};
use crate::math::{Point2, Point3, Pose, Vector2, Vector3};

/// Parameters controlling mesh generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshParams {
    /// Thickness of the felt slab.
    pub felt_thickness: f64,
    /// Number of sweep steps per 90° of arc.
    pub arc_segments_per_quarter: usize,
    /// Cross-section of the side rails.
    pub bumper: BumperProfile,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            felt_thickness: 0.02,
            arc_segments_per_quarter: 12,
            bumper: BumperProfile::default(),
        }
    }
}

impl MeshParams {
    /// Checks that every dimension is finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidParameters`] naming the offending value.
    pub fn validate(&self) -> Result<()> {
        if !(self.felt_thickness.is_finite() && self.felt_thickness > 0.0) {
            return Err(MeshError::InvalidParameters(format!(
                "felt thickness must be positive, got {}",
                self.felt_thickness
            ))
            .into());
        }
        if self.arc_segments_per_quarter == 0 {
            return Err(MeshError::InvalidParameters(
                "arc segments per quarter must be at least 1".into(),
            )
            .into());
        }
        self.bumper.validate()
    }
}

/// A triangle mesh with per-vertex normals and UVs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// UV coordinates.
    pub uvs: Vec<Point2>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns whether the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Appends another mesh, offsetting its indices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices
            .extend(other.indices.iter().map(|t| t.map(|i| i + offset)));
    }

    /// Merges vertices that share position, normal and UV.
    ///
    /// Triangle count and geometry are unchanged.
    #[must_use]
    pub fn welded(&self) -> TriangleMesh {
        weld::weld(self)
    }

    /// Returns whether every edge is matched by an edge running the other way,
    /// comparing vertices by position.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        weld::is_closed(self)
    }

    /// Places the mesh in a parent frame: the ground-plane part of every
    /// position and normal is rotated and translated by `pose`.
    #[must_use]
    pub fn transformed(&self, pose: &Pose) -> TriangleMesh {
        let vertices = self
            .vertices
            .iter()
            .map(|v| {
                let p = pose.transform_point(&Point2::new(v.x, v.z));
                Point3::new(p.x, v.y, p.y)
            })
            .collect();
        let normals = self
            .normals
            .iter()
            .map(|n| {
                let d = pose.transform_vector(&Vector2::new(n.x, n.z));
                Vector3::new(d.x, n.y, d.y)
            })
            .collect();
        TriangleMesh {
            vertices,
            normals,
            uvs: self.uvs.clone(),
            indices: self.indices.clone(),
        }
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for a mesh without
    /// vertices.
    #[must_use]
    pub fn aabb(&self) -> Option<(Point3, Point3)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(lo, hi), v| {
            (lo.inf(v), hi.sup(v))
        }))
    }

    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn push_vertex(&mut self, position: Point3, normal: Vector3, uv: Point2) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
        index
    }

    /// Pushes a triangle, flipping its winding if needed so the geometric
    /// normal agrees with `expected`.
    pub(crate) fn push_triangle(&mut self, [a, b, c]: [u32; 3], expected: &Vector3) {
        let position = |i: u32| self.vertices.get(i as usize).copied();
        let facing = match (position(a), position(b), position(c)) {
            (Some(pa), Some(pb), Some(pc)) => (pb - pa).cross(&(pc - pa)).dot(expected),
            _ => 0.0,
        };
        if facing < 0.0 {
            self.indices.push([a, c, b]);
        } else {
            self.indices.push([a, b, c]);
        }
    }
}

/// Builds the felt and both bumper meshes of a catalog segment with default
/// parameters.
///
/// # Errors
///
/// Returns an error if the spec id is unknown or the lane width is not a
/// positive finite number.
pub fn build_segment_meshes(
    registry: &SpecRegistry,
    spec_id: &str,
    lane_width: f64,
) -> Result<SegmentMeshes> {
    let spec = registry.get(spec_id)?;
    BuildSegmentMeshes::new(spec, lane_width, MeshParams::default()).execute()
}

/// Builds a quarter-cylinder corner fillet with default tessellation.
///
/// # Errors
///
/// Returns an error if the radius or height is not a positive finite number.
pub fn build_corner_fillet(radius: f64, height: f64) -> Result<TriangleMesh> {
    BuildCornerFillet::new(radius, height).execute()
}

/// Extrudes a bumper profile along `+z`.
///
/// # Errors
///
/// Returns an error if the profile or the length is invalid.
pub fn build_bumper_extrusion(profile: &BumperProfile, length: f64) -> Result<TriangleMesh> {
    BuildBumperExtrusion::new(*profile, length).execute()
}
