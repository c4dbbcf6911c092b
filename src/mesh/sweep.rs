//! Sweeping a closed profile along a ground-plane path.

use crate::catalog::PlacedPiece;
use crate::error::{MeshError, Result};
use crate::math::arc_2d::segments_for_sweep;
use crate::math::{Point2, Point3, Vector2, Vector3, TOLERANCE};

use super::cap::triangulate_ring;
use super::TriangleMesh;

/// A cross-section station along a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PathFrame {
    /// Centerline point.
    pub position: Point2,
    /// Unit vector toward the left of travel.
    pub left: Vector2,
    /// Centerline distance from the start of the path.
    pub distance: f64,
    /// How far a profile may reach to the left before crossing an arc center.
    pub reach_left: f64,
    /// Same, to the right.
    pub reach_right: f64,
}

impl PathFrame {
    fn new(position: Point2, left: Vector2, distance: f64) -> Self {
        Self {
            position,
            left,
            distance,
            reach_left: f64::INFINITY,
            reach_right: f64::INFINITY,
        }
    }

    /// World point of profile coordinate `(u, v)`. Offsets past an arc center
    /// stop at the center.
    pub fn place(&self, u: f64, v: f64) -> Point3 {
        let u = u.clamp(-self.reach_right, self.reach_left);
        let p = self.position + self.left * u;
        Point3::new(p.x, v, p.y)
    }

    /// Maps a profile-plane direction into 3D.
    pub fn direction(&self, d: &Vector2) -> Vector3 {
        Vector3::new(self.left.x * d.x, d.y, self.left.y * d.x)
    }

    /// Unit travel direction.
    pub fn tangent(&self) -> Vector3 {
        Vector3::new(self.left.y, 0.0, -self.left.x)
    }
}

/// The two stations of a straight run from the origin along `+z`.
pub(crate) fn straight_frames(length: f64) -> [PathFrame; 2] {
    let left = Vector2::new(-1.0, 0.0);
    [
        PathFrame::new(Point2::origin(), left, 0.0),
        PathFrame::new(Point2::new(0.0, length), left, length),
    ]
}

/// Stations along one placed piece, in the segment frame. Distances start
/// at zero.
#[allow(clippy::cast_precision_loss)]
fn piece_frames(piece: &PlacedPiece, segments_per_quarter: usize) -> Vec<PathFrame> {
    let local: Vec<PathFrame> = match piece.primitive.arc() {
        None => straight_frames(piece.primitive.length()).to_vec(),
        Some(arc) => {
            let n = segments_for_sweep(arc.sweep, segments_per_quarter);
            let inward = -arc.turn().sign();
            let exit = arc.exit_port().position;
            (0..=n)
                .map(|i| {
                    let t = i as f64 / n as f64;
                    // The last station sits exactly on the exit port.
                    let position = if i == n { exit } else { arc.point_at(t) };
                    let radial = (position - arc.center) / arc.radius;
                    let mut frame = PathFrame::new(position, radial * inward, arc.length() * t);
                    match arc.turn() {
                        crate::math::Turn::Left => frame.reach_left = arc.radius,
                        crate::math::Turn::Right => frame.reach_right = arc.radius,
                    }
                    frame
                })
                .collect()
        }
    };

    local
        .into_iter()
        .map(|f| PathFrame {
            position: piece.pose.transform_point(&f.position),
            left: piece.pose.transform_vector(&f.left),
            ..f
        })
        .collect()
}

/// Stations along a chain of pieces, joined into one continuous path.
pub(crate) fn path_frames(pieces: &[PlacedPiece], segments_per_quarter: usize) -> Vec<PathFrame> {
    let mut frames: Vec<PathFrame> = Vec::new();
    for piece in pieces {
        let start = frames.last().map_or(0.0, |f| f.distance);
        for (i, mut frame) in piece_frames(piece, segments_per_quarter).into_iter().enumerate() {
            frame.distance += start;
            if i == 0 {
                if let Some(joint) = frames.last_mut() {
                    joint.reach_left = joint.reach_left.min(frame.reach_left);
                    joint.reach_right = joint.reach_right.min(frame.reach_right);
                    continue;
                }
            }
            frames.push(frame);
        }
    }
    frames
}

/// Sweeps a counter-clockwise profile ring along `frames`, shifted sideways by
/// `offset`, and closes both ends with triangulated caps.
///
/// Side faces are flat across the profile and smooth along the path.
pub(crate) fn sweep_profile(
    frames: &[PathFrame],
    profile: &[Point2],
    offset: f64,
) -> Result<TriangleMesh> {
    let (Some(first), Some(last)) = (frames.first(), frames.last()) else {
        return Err(MeshError::InvalidParameters("sweep needs at least two stations".into()).into());
    };
    if frames.len() < 2 {
        return Err(MeshError::InvalidParameters("sweep needs at least two stations".into()).into());
    }

    let ring: Vec<Point2> = profile.iter().map(|p| Point2::new(p.x + offset, p.y)).collect();
    let caps = triangulate_ring(&ring)?;

    let mut mesh = TriangleMesh::default();
    let mut perimeter = 0.0;
    for (j, a) in ring.iter().enumerate() {
        let b = ring[(j + 1) % ring.len()];
        let edge = b - a;
        let len = edge.norm();
        if len <= TOLERANCE {
            continue;
        }
        let outward = Vector2::new(edge.y, -edge.x) / len;

        let mut prev: Option<(u32, u32, Vector3)> = None;
        for frame in frames {
            let normal = frame.direction(&outward).normalize();
            let ia = mesh.push_vertex(
                frame.place(a.x, a.y),
                normal,
                Point2::new(perimeter, frame.distance),
            );
            let ib = mesh.push_vertex(
                frame.place(b.x, b.y),
                normal,
                Point2::new(perimeter + len, frame.distance),
            );
            if let Some((pa, pb, prev_normal)) = prev {
                let expected = prev_normal + normal;
                mesh.push_triangle([pa, pb, ib], &expected);
                mesh.push_triangle([pa, ib, ia], &expected);
            }
            prev = Some((ia, ib, normal));
        }
        perimeter += len;
    }

    push_cap(&mut mesh, first, &ring, &caps, &-first.tangent());
    push_cap(&mut mesh, last, &ring, &caps, &last.tangent());
    Ok(mesh)
}

fn push_cap(
    mesh: &mut TriangleMesh,
    frame: &PathFrame,
    ring: &[Point2],
    triangles: &[[usize; 3]],
    normal: &Vector3,
) {
    let base: Vec<u32> = ring
        .iter()
        .map(|p| mesh.push_vertex(frame.place(p.x, p.y), *normal, *p))
        .collect();
    for tri in triangles {
        let indices = tri.map(|i| base[i]);
        mesh.push_triangle(indices, normal);
    }
}
