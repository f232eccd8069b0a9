//! Core mesh data structures.
//!
//! This module provides a face-vertex polygon mesh representation suited to
//! per-corner attribute work such as UV mapping.
//!
//! # Overview
//!
//! The primary type is [`PolygonMesh`], which stores shared vertex positions
//! plus an ordered list of vertex references ("loops") per face. Faces may
//! have any number of vertices (three or more); triangles and quads are just
//! the common cases.
//!
//! # Loops
//!
//! A *loop* is one corner of one face: a face with five vertices contributes
//! five loops. Loops are what per-face-corner attributes (UV coordinates in
//! particular) attach to, because a vertex shared by differently-oriented
//! faces generally needs a different UV on each face. All loops of a face
//! occupy a contiguous index range, exposed by
//! [`PolygonMesh::face_loop_range`].
//!
//! # Construction
//!
//! Meshes are typically constructed from file I/O or from face-vertex lists:
//!
//! ```
//! use worlduv::mesh::PolygonMesh;
//! use nalgebra::Point3;
//!
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let faces = vec![vec![0, 1, 2]];
//!
//! let mesh = PolygonMesh::from_faces(positions, &faces).unwrap();
//! assert_eq!(mesh.num_loops(), 3);
//! ```

mod polygon;

pub use polygon::PolygonMesh;
