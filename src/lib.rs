//! # worlduv
//!
//! World-space planar UV mapping for polygon meshes.
//!
//! worlduv projects mesh faces onto axis-aligned planes chosen from each
//! face's dominant normal axis (box mapping), using *world-space* vertex
//! positions. Because the projection is anchored to the scene rather than
//! to each object's local frame, textures keep a consistent scale and stay
//! aligned across neighboring objects.
//!
//! ## Features
//!
//! - **Dominant-axis planar projection**: deterministic per-face axis
//!   selection with a fixed tie-break order
//! - **Scale / rotate / offset transform**: applied in that order, with
//!   validated parameters
//! - **World anchoring**: an object-to-world transform is applied to
//!   positions and normals before projection
//! - **Per-loop UVs**: one coordinate per face corner, the granularity
//!   texture seams require
//! - **Parallel batches**: faces are independent and unwrap in parallel
//! - **File I/O**: OBJ (with `vt` output) and STL
//!
//! ## Quick Start
//!
//! ```no_run
//! use worlduv::prelude::*;
//!
//! // Load a mesh
//! let mesh = worlduv::io::load("model.obj").unwrap();
//!
//! // Unwrap every face in world space
//! let options = UnwrapOptions::default()
//!     .with_project(ProjectOptions::default().with_scale(2.0));
//! let uvs = world_space_unwrap(&mesh, &options).unwrap();
//!
//! // Save the mesh with its new UVs
//! worlduv::io::obj::save_with_uvs(&mesh, &uvs, "unwrapped.obj", None).unwrap();
//! ```
//!
//! ## Projecting a Single Face
//!
//! The core routine is a pure function over one face's world positions and
//! normal; no mesh container is required:
//!
//! ```
//! use worlduv::algo::planar::{project_face, ProjectOptions};
//! use nalgebra::{Point3, Vector3};
//!
//! let face = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let uvs = project_face(&face, &Vector3::z(), &ProjectOptions::default()).unwrap();
//! assert_eq!(uvs.len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use worlduv::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::{
        planar_axes, project_face, world_space_unwrap, world_space_unwrap_faces, LoopUvMap,
        ProjectOptions, ProjectionAxes, UnwrapOptions,
    };
    pub use crate::error::{Result, UvError};
    pub use crate::mesh::PolygonMesh;
}

// Re-export nalgebra types for convenience
pub use nalgebra;
