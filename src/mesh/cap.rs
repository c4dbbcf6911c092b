//! Constrained Delaunay triangulation of closed profile rings.

use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::{FixedFaceHandle, InnerTag};
use spade::{ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation};

use crate::error::{MeshError, Result};
use crate::math::polygon_2d::signed_area;
use crate::math::{Point2, TOLERANCE};

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Triangulates a simple closed ring, returning triangles as indices into
/// `ring`. Winding of the output triangles is not normalized.
pub(crate) fn triangulate_ring(ring: &[Point2]) -> Result<Vec<[usize; 3]>> {
    if ring.len() < 3 {
        return Err(MeshError::Triangulation("ring needs at least 3 points".into()).into());
    }
    if signed_area(ring).abs() < TOLERANCE {
        return Err(MeshError::Triangulation("ring encloses no area".into()).into());
    }

    let mut cdt = Cdt::new();
    let handles = insert_constraint_loop(&mut cdt, ring)?;

    // Coincident points share a handle; the first ring index wins.
    let mut ring_index: HashMap<usize, usize> = HashMap::with_capacity(handles.len());
    for (i, handle) in handles.iter().enumerate() {
        ring_index.entry(handle.index()).or_insert(i);
    }

    let interior = classify_interior_faces(&cdt);
    let mut triangles = Vec::with_capacity(interior.len());
    for face in cdt.inner_faces() {
        if !interior.contains(&face.fix().index()) {
            continue;
        }
        let [a, b, c] = face.vertices().map(|v| ring_index.get(&v.fix().index()).copied());
        match (a, b, c) {
            (Some(a), Some(b), Some(c)) => triangles.push([a, b, c]),
            _ => {
                return Err(MeshError::Triangulation("face references unknown vertex".into()).into())
            }
        }
    }

    if triangles.is_empty() {
        return Err(MeshError::Triangulation("ring encloses no area".into()).into());
    }
    Ok(triangles)
}

/// Inserts a closed polygon as constraint edges into the CDT.
fn insert_constraint_loop(
    cdt: &mut Cdt,
    points: &[Point2],
) -> Result<Vec<spade::handles::FixedVertexHandle>> {
    let mut handles = Vec::with_capacity(points.len());
    for p in points {
        let h = cdt
            .insert(SpadePoint2::new(p.x, p.y))
            .map_err(|e: InsertionError| MeshError::Triangulation(format!("CDT insert: {e}")))?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from != to {
            cdt.add_constraint(from, to);
        }
    }

    Ok(handles)
}

/// Flood-fills the CDT from the outer face; each crossed constraint edge
/// flips inside/outside. Odd depth = interior.
fn classify_interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_map: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<InnerTag>, u32)> = VecDeque::new();

    let outer = cdt.outer_face().fix();
    for edge in cdt.directed_edges() {
        if edge.face().fix() != outer {
            continue;
        }
        if let Some(inner) = edge.rev().face().as_inner() {
            let idx = inner.fix().index();
            if depth_map.contains_key(&idx) {
                continue;
            }
            let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(idx, depth);
            if depth % 2 == 1 {
                interior.insert(idx);
            }
            queue.push_back((inner.fix(), depth));
        }
    }

    while let Some((face_fix, depth)) = queue.pop_front() {
        for edge in cdt.face(face_fix).adjacent_edges() {
            let Some(neighbor) = edge.rev().face().as_inner() else {
                continue;
            };
            let idx = neighbor.fix().index();
            if depth_map.contains_key(&idx) {
                continue;
            }
            let next = depth + u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(idx, next);
            if next % 2 == 1 {
                interior.insert(idx);
            }
            queue.push_back((neighbor.fix(), next));
        }
    }

    interior
}
