//! Mesh file I/O.
//!
//! This module provides functions for loading and saving meshes.
//!
//! # Supported Formats
//!
//! | Format | Extension | Load | Save | UVs | Notes |
//! |--------|-----------|------|------|-----|-------|
//! | Wavefront OBJ | `.obj` | ✓ | ✓ | ✓ | Per-corner `vt` records |
//! | STL | `.stl` | ✓ | ✓ | ✗ | Geometry only, triangulated on save |
//!
//! STL carries no texture coordinates, so it works as an input format; UV
//! output always goes through [`obj::save_with_uvs`].
//!
//! # Usage
//!
//! ```no_run
//! use worlduv::io::{load, save};
//!
//! // Load with automatic format detection
//! let mesh = load("model.stl").unwrap();
//!
//! // Save with automatic format detection
//! save(&mesh, "output.obj").unwrap();
//! ```

pub mod obj;
pub mod stl;

use std::path::Path;

use crate::error::{Result, UvError};
use crate::mesh::PolygonMesh;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Wavefront OBJ format.
    Obj,
    /// STL (stereolithography) format.
    Stl,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "obj" => Some(Format::Obj),
            "stl" => Some(Format::Stl),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }
}

fn detect<P: AsRef<Path>>(path: P) -> Result<Format> {
    let path = path.as_ref();
    Format::from_path(path).ok_or_else(|| UvError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })
}

/// Load a mesh from a file with automatic format detection.
///
/// The format is determined by the file extension.
pub fn load<P: AsRef<Path>>(path: P) -> Result<PolygonMesh> {
    match detect(&path)? {
        Format::Obj => obj::load(path),
        Format::Stl => stl::load(path),
    }
}

/// Save a mesh to a file with automatic format detection.
///
/// The format is determined by the file extension. This writes geometry
/// only; to write UVs, use [`obj::save_with_uvs`].
pub fn save<P: AsRef<Path>>(mesh: &PolygonMesh, path: P) -> Result<()> {
    match detect(&path)? {
        Format::Obj => obj::save(mesh, path),
        Format::Stl => stl::save(mesh, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path("mesh.obj"), Some(Format::Obj));
        assert_eq!(Format::from_path("MESH.STL"), Some(Format::Stl));
        assert_eq!(Format::from_path("scene.gltf"), None);
        assert_eq!(Format::from_path("noextension"), None);
    }
}
