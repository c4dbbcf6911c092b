use crate::error::{MeshError, Result};
use crate::math::arc_2d::sample_arc;
use crate::math::{Point2, Point3, Vector2, Vector3};

use super::cap::triangulate_ring;
use super::TriangleMesh;

/// Default number of facets on the curved face.
const DEFAULT_SEGMENTS: usize = 12;

/// A quarter cylinder filling the `+x`/`+z` quadrant, standing on `y = 0`.
///
/// The curved face has smooth normals; the two flat faces and the caps are
/// flat shaded.
pub struct BuildCornerFillet {
    radius: f64,
    height: f64,
    segments: usize,
}

impl BuildCornerFillet {
    /// Creates a new `BuildCornerFillet` operation.
    #[must_use]
    pub fn new(radius: f64, height: f64) -> Self {
        Self {
            radius,
            height,
            segments: DEFAULT_SEGMENTS,
        }
    }

    /// Sets the number of facets on the curved face (at least one).
    #[must_use]
    pub fn with_segments(mut self, segments: usize) -> Self {
        self.segments = segments.max(1);
        self
    }

    /// Executes the build.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidParameters`] if the radius or height is not a
    /// positive finite number.
    pub fn execute(&self) -> Result<TriangleMesh> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.radius) || !positive(self.height) {
            return Err(MeshError::InvalidParameters(format!(
                "fillet needs positive radius and height, got {} x {}",
                self.radius, self.height
            ))
            .into());
        }

        // Ground outline, counter-clockwise in (x, z): corner, then the arc.
        let mut ring = vec![Point2::origin()];
        ring.extend(sample_arc(&Point2::origin(), self.radius, 0.0, 90.0, self.segments));
        let caps = triangulate_ring(&ring)?;

        let mut mesh = TriangleMesh::default();
        let mut perimeter = 0.0;
        for (j, a) in ring.iter().enumerate() {
            let b = ring[(j + 1) % ring.len()];
            let edge = b - a;
            let len = edge.norm();
            // Both ends away from the corner: the edge is a facet of the arc.
            let curved = j > 0 && j + 1 < ring.len();
            let flat = Vector2::new(edge.y, -edge.x) / len;
            let (na, nb) = if curved {
                (a.coords / self.radius, b.coords / self.radius)
            } else {
                (flat, flat)
            };
            let outward = ground(&(na + nb));

            let a0 = mesh.push_vertex(
                Point3::new(a.x, 0.0, a.y),
                ground(&na),
                Point2::new(perimeter, 0.0),
            );
            let b0 = mesh.push_vertex(
                Point3::new(b.x, 0.0, b.y),
                ground(&nb),
                Point2::new(perimeter + len, 0.0),
            );
            let b1 = mesh.push_vertex(
                Point3::new(b.x, self.height, b.y),
                ground(&nb),
                Point2::new(perimeter + len, self.height),
            );
            let a1 = mesh.push_vertex(
                Point3::new(a.x, self.height, a.y),
                ground(&na),
                Point2::new(perimeter, self.height),
            );
            mesh.push_triangle([a0, b0, b1], &outward);
            mesh.push_triangle([a0, b1, a1], &outward);
            perimeter += len;
        }

        for (y, normal) in [(0.0, -Vector3::y()), (self.height, Vector3::y())] {
            let base: Vec<u32> = ring
                .iter()
                .map(|p| mesh.push_vertex(Point3::new(p.x, y, p.y), normal, *p))
                .collect();
            for tri in &caps {
                mesh.push_triangle(tri.map(|i| base[i]), &normal);
            }
        }

        let mesh = mesh.welded();
        tracing::debug!(
            radius = self.radius,
            height = self.height,
            triangles = mesh.triangle_count(),
            "built corner fillet"
        );
        Ok(mesh)
    }
}

fn ground(d: &Vector2) -> Vector3 {
    Vector3::new(d.x, 0.0, d.y).normalize()
}
