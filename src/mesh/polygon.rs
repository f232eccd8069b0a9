//! Face-vertex polygon mesh.

use std::ops::Range;

use nalgebra::{Point3, Vector3};

use crate::error::{Result, UvError};

/// A polygon mesh stored in face-vertex form.
///
/// Vertex positions are shared; each face is an ordered sequence of vertex
/// indices (its loops). Loop data is stored flat with a per-face offset
/// table, so every face's loops occupy a contiguous range of loop indices.
///
/// The mesh is validated on construction: every face has at least three
/// vertices, no face repeats a vertex, and all indices are in range.
#[derive(Debug, Clone)]
pub struct PolygonMesh {
    /// Shared vertex positions.
    positions: Vec<Point3<f64>>,
    /// Vertex index for each loop, all faces concatenated.
    loop_vertices: Vec<usize>,
    /// Offsets into `loop_vertices`; face `f` owns
    /// `loop_vertices[face_offsets[f]..face_offsets[f + 1]]`.
    face_offsets: Vec<usize>,
}

impl PolygonMesh {
    /// Build a mesh from vertex positions and per-face vertex index lists.
    ///
    /// # Errors
    ///
    /// Returns an error if the face list is empty, a face has fewer than
    /// three vertices, a face repeats a vertex index, or an index is out of
    /// range.
    pub fn from_faces(positions: Vec<Point3<f64>>, faces: &[Vec<usize>]) -> Result<Self> {
        if faces.is_empty() {
            return Err(UvError::EmptyMesh);
        }

        let mut loop_vertices = Vec::with_capacity(faces.iter().map(Vec::len).sum());
        let mut face_offsets = Vec::with_capacity(faces.len() + 1);
        face_offsets.push(0);

        for (f, face) in faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(UvError::DegenerateFace { face: f });
            }
            for (i, &v) in face.iter().enumerate() {
                if v >= positions.len() {
                    return Err(UvError::InvalidVertexIndex { face: f, vertex: v });
                }
                if face[..i].contains(&v) {
                    return Err(UvError::DegenerateFace { face: f });
                }
            }
            loop_vertices.extend_from_slice(face);
            face_offsets.push(loop_vertices.len());
        }

        Ok(Self {
            positions,
            loop_vertices,
            face_offsets,
        })
    }

    /// Build a mesh from vertex positions and triangle index lists.
    pub fn from_triangles(positions: Vec<Point3<f64>>, triangles: &[[usize; 3]]) -> Result<Self> {
        let faces: Vec<Vec<usize>> = triangles.iter().map(|t| t.to_vec()).collect();
        Self::from_faces(positions, &faces)
    }

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.face_offsets.len() - 1
    }

    /// Total number of loops (face corners) across all faces.
    #[inline]
    pub fn num_loops(&self) -> usize {
        self.loop_vertices.len()
    }

    /// Iterate over all face indices.
    pub fn face_ids(&self) -> Range<usize> {
        0..self.num_faces()
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: usize) -> Point3<f64> {
        self.positions[v]
    }

    /// All vertex positions.
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// The loop index range owned by a face.
    #[inline]
    pub fn face_loop_range(&self, f: usize) -> Range<usize> {
        self.face_offsets[f]..self.face_offsets[f + 1]
    }

    /// The ordered vertex indices of a face.
    #[inline]
    pub fn face_vertices(&self, f: usize) -> &[usize] {
        &self.loop_vertices[self.face_loop_range(f)]
    }

    /// Iterate over the ordered vertex positions of a face.
    pub fn face_positions(&self, f: usize) -> impl Iterator<Item = Point3<f64>> + '_ {
        self.face_vertices(f).iter().map(|&v| self.positions[v])
    }

    /// Compute the area-weighted normal of a face using Newell's method.
    ///
    /// The result is not unit length: its magnitude is twice the face area.
    /// Newell's method handles non-planar and concave polygons robustly,
    /// unlike a single cross product of two edges. Callers that need a unit
    /// normal must normalize; callers that only compare component
    /// magnitudes (planar projection) can use it directly.
    pub fn face_normal(&self, f: usize) -> Vector3<f64> {
        let verts = self.face_vertices(f);
        let mut n = Vector3::zeros();
        for i in 0..verts.len() {
            let p0 = self.positions[verts[i]];
            let p1 = self.positions[verts[(i + 1) % verts.len()]];
            n.x += (p0.y - p1.y) * (p0.z + p1.z);
            n.y += (p0.z - p1.z) * (p0.x + p1.x);
            n.z += (p0.x - p1.x) * (p0.y + p1.y);
        }
        n
    }

    /// Compute the area of a face.
    pub fn face_area(&self, f: usize) -> f64 {
        0.5 * self.face_normal(f).norm()
    }

    /// Compute the axis-aligned bounding box of the mesh.
    ///
    /// Returns `None` if the mesh has no vertices.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = *self.positions.first()?;
        let mut min = first;
        let mut max = first;
        for p in &self.positions {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }
        Some((min, max))
    }

    /// Whether every face is a triangle.
    pub fn is_triangle_mesh(&self) -> bool {
        self.face_ids().all(|f| self.face_vertices(f).len() == 3)
    }

    /// Whether every face is a quad.
    pub fn is_quad_mesh(&self) -> bool {
        self.face_ids().all(|f| self.face_vertices(f).len() == 4)
    }

    /// Fan-triangulate every face.
    ///
    /// Produces correct results for convex faces; used when exporting to
    /// triangle-only formats such as STL.
    pub fn to_triangles(&self) -> Vec<[usize; 3]> {
        let mut triangles = Vec::new();
        for f in self.face_ids() {
            let verts = self.face_vertices(f);
            for i in 1..verts.len() - 1 {
                triangles.push([verts[0], verts[i], verts[i + 1]]);
            }
        }
        triangles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> PolygonMesh {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        PolygonMesh::from_faces(positions, &[vec![0, 1, 2, 3]]).unwrap()
    }

    #[test]
    fn test_from_faces_counts() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];
        let faces = vec![vec![0, 1, 2, 3], vec![0, 1, 4], vec![1, 2, 4]];
        let mesh = PolygonMesh::from_faces(positions, &faces).unwrap();

        assert_eq!(mesh.num_vertices(), 5);
        assert_eq!(mesh.num_faces(), 3);
        assert_eq!(mesh.num_loops(), 10);
        assert_eq!(mesh.face_loop_range(0), 0..4);
        assert_eq!(mesh.face_loop_range(1), 4..7);
        assert_eq!(mesh.face_loop_range(2), 7..10);
        assert_eq!(mesh.face_vertices(1), &[0, 1, 4]);
        assert!(!mesh.is_triangle_mesh());
        assert!(!mesh.is_quad_mesh());
    }

    #[test]
    fn test_from_faces_rejects_empty() {
        let positions = vec![Point3::new(0.0, 0.0, 0.0)];
        let err = PolygonMesh::from_faces(positions, &[]).unwrap_err();
        assert!(matches!(err, UvError::EmptyMesh));
    }

    #[test]
    fn test_from_faces_rejects_short_face() {
        let positions = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let err = PolygonMesh::from_faces(positions, &[vec![0, 1]]).unwrap_err();
        assert!(matches!(err, UvError::DegenerateFace { face: 0 }));
    }

    #[test]
    fn test_from_faces_rejects_duplicate_vertex() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
        ];
        let err = PolygonMesh::from_faces(positions, &[vec![0, 1, 1]]).unwrap_err();
        assert!(matches!(err, UvError::DegenerateFace { face: 0 }));
    }

    #[test]
    fn test_from_faces_rejects_out_of_range_index() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
        ];
        let err = PolygonMesh::from_faces(positions, &[vec![0, 1, 7]]).unwrap_err();
        assert!(matches!(
            err,
            UvError::InvalidVertexIndex { face: 0, vertex: 7 }
        ));
    }

    #[test]
    fn test_face_normal_quad() {
        let mesh = unit_quad();
        let n = mesh.face_normal(0);

        // CCW quad in the XY plane: normal points along +Z with magnitude
        // twice the area.
        assert!((n.x - 0.0).abs() < 1e-12);
        assert!((n.y - 0.0).abs() < 1e-12);
        assert!((n.z - 2.0).abs() < 1e-12);
        assert!((mesh.face_area(0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_face_normal_winding() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
        ];
        let mesh = PolygonMesh::from_faces(positions, &[vec![0, 2, 1]]).unwrap();
        assert!(mesh.face_normal(0).z < 0.0);
    }

    #[test]
    fn test_bounding_box() {
        let positions = vec![
            Point3::new(-1.0, 2.0, 0.5),
            Point3::new(3.0, -2.0, 1.5),
            Point3::new(0.0, 0.0, -4.0),
        ];
        let mesh = PolygonMesh::from_faces(positions, &[vec![0, 1, 2]]).unwrap();
        let (min, max) = mesh.bounding_box().unwrap();
        assert_eq!(min, Point3::new(-1.0, -2.0, -4.0));
        assert_eq!(max, Point3::new(3.0, 2.0, 1.5));
    }

    #[test]
    fn test_to_triangles_fan() {
        let mesh = unit_quad();
        let tris = mesh.to_triangles();
        assert_eq!(tris, vec![[0, 1, 2], [0, 2, 3]]);
    }
}
