use std::collections::HashMap;

use crate::math::{Point2, Point3, Vector3};

use super::TriangleMesh;

/// Grid size used to decide that two coordinates are the same.
const WELD_EPSILON: f64 = 1e-9;

type Key3 = [i64; 3];

#[allow(clippy::cast_possible_truncation)]
fn quantize(value: f64) -> i64 {
    (value / WELD_EPSILON).round() as i64
}

fn position_key(p: &Point3) -> Key3 {
    [quantize(p.x), quantize(p.y), quantize(p.z)]
}

fn vertex_key(position: &Point3, normal: &Vector3, uv: &Point2) -> [i64; 8] {
    let [px, py, pz] = position_key(position);
    [
        px,
        py,
        pz,
        quantize(normal.x),
        quantize(normal.y),
        quantize(normal.z),
        quantize(uv.x),
        quantize(uv.y),
    ]
}

/// Merges vertices whose position, normal and UV all coincide.
#[allow(clippy::cast_possible_truncation)]
pub(super) fn weld(mesh: &TriangleMesh) -> TriangleMesh {
    let mut out = TriangleMesh::default();
    let mut seen: HashMap<[i64; 8], u32> = HashMap::with_capacity(mesh.vertices.len());
    let mut remap: Vec<u32> = Vec::with_capacity(mesh.vertices.len());

    for ((position, normal), uv) in mesh.vertices.iter().zip(&mesh.normals).zip(&mesh.uvs) {
        let key = vertex_key(position, normal, uv);
        let index = *seen
            .entry(key)
            .or_insert_with(|| out.push_vertex(*position, *normal, *uv));
        remap.push(index);
    }

    out.indices = mesh
        .indices
        .iter()
        .map(|tri| tri.map(|i| remap.get(i as usize).copied().unwrap_or(i)))
        .collect();

    let merged = mesh.vertices.len() - out.vertices.len();
    if merged > 0 {
        tracing::trace!(merged, remaining = out.vertices.len(), "welded vertices");
    }
    out
}

/// Every directed edge (by quantized position) must be matched by as many
/// edges running the opposite way.
pub(super) fn is_closed(mesh: &TriangleMesh) -> bool {
    let mut edges: HashMap<(Key3, Key3), i32> = HashMap::new();
    for tri in &mesh.indices {
        let keys: Option<Vec<Key3>> = tri
            .iter()
            .map(|&i| mesh.vertices.get(i as usize).map(position_key))
            .collect();
        let Some(keys) = keys else {
            return false;
        };
        for k in 0..3 {
            let (a, b) = (keys[k], keys[(k + 1) % 3]);
            if a == b {
                continue;
            }
            *edges.entry((a, b)).or_insert(0) += 1;
        }
    }
    !edges.is_empty()
        && edges
            .iter()
            .all(|(&(a, b), &count)| edges.get(&(b, a)).copied().unwrap_or(0) == count)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn quad(doubled: bool) -> TriangleMesh {
        let mut mesh = TriangleMesh::default();
        let up = Vector3::new(0.0, 1.0, 0.0);
        let pts = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        let mut push = |x: f64, z: f64| mesh.push_vertex(Point3::new(x, 0.0, z), up, Point2::new(x, z));
        let ids: Vec<u32> = pts.iter().map(|&(x, z)| push(x, z)).collect();
        // The second triangle repeats two corners as fresh vertices.
        let extra: Vec<u32> = if doubled {
            vec![push(0.0, 0.0), push(1.0, 1.0)]
        } else {
            vec![ids[0], ids[2]]
        };
        mesh.indices.push([ids[0], ids[1], ids[2]]);
        mesh.indices.push([extra[0], extra[1], ids[3]]);
        mesh
    }

    #[test]
    fn duplicates_are_merged() {
        let welded = weld(&quad(true));
        assert_eq!(welded.vertex_count(), 4);
        assert_eq!(welded, weld(&quad(false)));
    }

    #[test]
    fn welding_preserves_triangles_and_geometry() {
        let mesh = quad(true);
        let welded = weld(&mesh);
        assert_eq!(welded.triangle_count(), mesh.triangle_count());
        for (a, b) in mesh.indices.iter().zip(&welded.indices) {
            for k in 0..3 {
                let pa = mesh.vertices[a[k] as usize];
                let pb = welded.vertices[b[k] as usize];
                assert!((pa - pb).norm() < 1e-12);
            }
        }
    }

    #[test]
    fn differing_normals_stay_split() {
        let mut mesh = quad(true);
        mesh.normals[4] = Vector3::new(1.0, 0.0, 0.0);
        assert_eq!(weld(&mesh).vertex_count(), 5);
    }

    #[test]
    fn open_quad_is_not_closed() {
        assert!(!is_closed(&quad(false)));
    }

    #[test]
    fn tetrahedron_is_closed() {
        let mut mesh = TriangleMesh::default();
        let n = Vector3::zeros();
        for p in [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ] {
            mesh.push_vertex(p, n, Point2::origin());
        }
        mesh.indices = vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];
        assert!(is_closed(&mesh));
    }
}
