//! Wavefront OBJ format support.
//!
//! OBJ is the output format of choice here because it stores texture
//! coordinates per face corner (`f v/vt` references), which matches the
//! per-loop [`LoopUvMap`] exactly.
//!
//! Loading keeps polygon faces intact (no triangulation) and accepts
//! `v/vt/vn`-style face entries, using only the vertex reference. Negative
//! (relative) indices are supported.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::Point3;

use crate::algo::uv::LoopUvMap;
use crate::error::{Result, UvError};
use crate::mesh::PolygonMesh;

/// Load a mesh from an OBJ file.
///
/// # Example
///
/// ```no_run
/// use worlduv::io::obj;
///
/// let mesh = obj::load("model.obj").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<PolygonMesh> {
    let path = path.as_ref();
    let file = File::open(path)?;
    parse(BufReader::new(file)).map_err(|message| UvError::LoadError {
        path: path.to_path_buf(),
        message,
    })
}

fn parse<R: BufRead>(reader: R) -> std::result::Result<PolygonMesh, String> {
    let mut positions: Vec<Point3<f64>> = Vec::new();
    let mut faces: Vec<Vec<usize>> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| e.to_string())?;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("v") => {
                let mut coord = |name| {
                    tokens
                        .next()
                        .ok_or_else(|| format!("line {}: missing {} coordinate", line_no + 1, name))
                        .and_then(|t| {
                            t.parse::<f64>().map_err(|_| {
                                format!("line {}: invalid {} coordinate {:?}", line_no + 1, name, t)
                            })
                        })
                };
                let x = coord("x")?;
                let y = coord("y")?;
                let z = coord("z")?;
                positions.push(Point3::new(x, y, z));
            }
            Some("f") => {
                let mut face = Vec::new();
                for entry in tokens {
                    // "v", "v/vt", "v//vn", "v/vt/vn" - only the vertex
                    // reference matters when loading geometry.
                    let v_ref = entry.split('/').next().unwrap_or(entry);
                    let idx: i64 = v_ref.parse().map_err(|_| {
                        format!("line {}: invalid face entry {:?}", line_no + 1, entry)
                    })?;
                    let resolved = if idx > 0 {
                        (idx - 1) as usize
                    } else if idx < 0 {
                        let back = (-idx) as usize;
                        positions.len().checked_sub(back).ok_or_else(|| {
                            format!("line {}: relative index {} out of range", line_no + 1, idx)
                        })?
                    } else {
                        return Err(format!("line {}: face index 0 is invalid", line_no + 1));
                    };
                    face.push(resolved);
                }
                faces.push(face);
            }
            // vt, vn, o, g, s, usemtl, mtllib, comments: ignored.
            _ => {}
        }
    }

    PolygonMesh::from_faces(positions, &faces).map_err(|e| e.to_string())
}

/// Save a mesh to an OBJ file (geometry only).
pub fn save<P: AsRef<Path>>(mesh: &PolygonMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_geometry(&mut writer, mesh, None, None)?;
    Ok(())
}

/// Save a mesh to an OBJ file with per-loop texture coordinates.
///
/// Writes one `vt` record per loop and references them from the `f`
/// records as `v/vt`. When `mtl_name` is given, a `mtllib` line pointing
/// to it and a `usemtl` line are emitted so viewers pick up a texture
/// (see [`write_mtl`]).
///
/// # Errors
///
/// Returns [`UvError::InvalidParameter`] if `uvs` is not sized to the
/// mesh's loop count.
///
/// # Example
///
/// ```no_run
/// use worlduv::algo::unwrap::{world_space_unwrap, UnwrapOptions};
/// use worlduv::io::obj;
///
/// let mesh = obj::load("model.obj").unwrap();
/// let uvs = world_space_unwrap(&mesh, &UnwrapOptions::default()).unwrap();
/// obj::save_with_uvs(&mesh, &uvs, "unwrapped.obj", Some("unwrapped.mtl")).unwrap();
/// ```
pub fn save_with_uvs<P: AsRef<Path>>(
    mesh: &PolygonMesh,
    uvs: &LoopUvMap,
    path: P,
    mtl_name: Option<&str>,
) -> Result<()> {
    if uvs.len() != mesh.num_loops() {
        return Err(UvError::invalid_param(
            "uvs",
            uvs.len(),
            "UV map length must equal the mesh loop count",
        ));
    }

    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_geometry(&mut writer, mesh, Some(uvs), mtl_name)?;
    Ok(())
}

fn write_geometry<W: Write>(
    writer: &mut W,
    mesh: &PolygonMesh,
    uvs: Option<&LoopUvMap>,
    mtl_name: Option<&str>,
) -> std::io::Result<()> {
    if let Some(mtl) = mtl_name {
        writeln!(writer, "mtllib {}", mtl)?;
    }

    for p in mesh.positions() {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }

    if let Some(uvs) = uvs {
        for (_, uv) in uvs.iter() {
            writeln!(writer, "vt {} {}", uv.x, uv.y)?;
        }
    }

    if mtl_name.is_some() {
        writeln!(writer, "usemtl textured")?;
    }

    for f in mesh.face_ids() {
        write!(writer, "f")?;
        let range = mesh.face_loop_range(f);
        for (v, l) in mesh.face_vertices(f).iter().zip(range) {
            if uvs.is_some() {
                write!(writer, " {}/{}", v + 1, l + 1)?;
            } else {
                write!(writer, " {}", v + 1)?;
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Write a minimal MTL file referencing a texture image.
///
/// The material is named `textured`, matching the `usemtl` record written
/// by [`save_with_uvs`].
pub fn write_mtl<P: AsRef<Path>>(path: P, texture: &str) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "newmtl textured")?;
    writeln!(writer, "Ka 1.0 1.0 1.0")?;
    writeln!(writer, "Kd 1.0 1.0 1.0")?;
    writeln!(writer, "map_Kd {}", texture)?;
    Ok(())
}
