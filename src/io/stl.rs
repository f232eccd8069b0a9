//! STL (stereolithography) format support.
//!
//! STL stores an unindexed triangle soup and no texture coordinates, so it
//! serves as a geometry input format: load an STL, unwrap it, then save the
//! result as OBJ. Both binary and ASCII files load; saving writes binary.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use nalgebra::Point3;

use crate::error::{Result, UvError};
use crate::mesh::PolygonMesh;

/// Load a mesh from an STL file.
///
/// Automatically detects binary vs ASCII format. Vertices repeated across
/// triangles are merged by exact coordinate match; degenerate triangles
/// are dropped.
///
/// # Example
///
/// ```no_run
/// use worlduv::io::stl;
///
/// let mesh = stl::load("model.stl").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<PolygonMesh> {
    let path = path.as_ref();
    let mut file = File::open(path)?;

    let stl = stl_io::read_stl(&mut file).map_err(|e| UvError::LoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut positions: Vec<Point3<f64>> = Vec::new();
    let mut merged: HashMap<[u64; 3], usize> = HashMap::new();
    let mut remap: Vec<usize> = Vec::with_capacity(stl.vertices.len());

    // stl_io already indexes vertices, but by exact float equality per
    // file; merge again on bit patterns so ASCII round-trips stay stable.
    for v in &stl.vertices {
        let p = Point3::new(v[0] as f64, v[1] as f64, v[2] as f64);
        let key = [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()];
        let idx = *merged.entry(key).or_insert_with(|| {
            positions.push(p);
            positions.len() - 1
        });
        remap.push(idx);
    }

    let mut triangles: Vec<[usize; 3]> = Vec::with_capacity(stl.faces.len());
    for tri in &stl.faces {
        let i0 = remap[tri.vertices[0]];
        let i1 = remap[tri.vertices[1]];
        let i2 = remap[tri.vertices[2]];

        // Skip degenerate triangles
        if i0 != i1 && i1 != i2 && i0 != i2 {
            triangles.push([i0, i1, i2]);
        }
    }

    if triangles.is_empty() {
        return Err(UvError::LoadError {
            path: path.to_path_buf(),
            message: "STL file contains no valid triangles".to_string(),
        });
    }

    PolygonMesh::from_triangles(positions, &triangles)
}

/// Save a mesh to a binary STL file.
///
/// Non-triangle faces are fan-triangulated.
pub fn save<P: AsRef<Path>>(mesh: &PolygonMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let triangles: Vec<stl_io::Triangle> = mesh
        .to_triangles()
        .iter()
        .map(|t| {
            let p0 = mesh.position(t[0]);
            let p1 = mesh.position(t[1]);
            let p2 = mesh.position(t[2]);

            let e1 = p1 - p0;
            let e2 = p2 - p0;
            let n = e1.cross(&e2).normalize();

            stl_io::Triangle {
                normal: stl_io::Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: [
                    stl_io::Vertex::new([p0.x as f32, p0.y as f32, p0.z as f32]),
                    stl_io::Vertex::new([p1.x as f32, p1.y as f32, p1.z as f32]),
                    stl_io::Vertex::new([p2.x as f32, p2.y as f32, p2.z as f32]),
                ],
            }
        })
        .collect();

    stl_io::write_stl(&mut writer, triangles.iter()).map_err(|e| UvError::SaveError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(())
}
