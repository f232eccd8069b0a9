//! Whole-mesh world-space UV unwrapping.
//!
//! This module drives [`planar`](crate::algo::planar) projection across a
//! [`PolygonMesh`]: it applies the object-to-world transform, derives each
//! face's world-space normal, projects every face independently, and
//! collects the results into a [`LoopUvMap`].
//!
//! Because the projection uses world-space positions, two objects that abut
//! in the scene receive continuous, consistently scaled UVs regardless of
//! their local origins.
//!
//! Faces are independent, so the batch runs in parallel by default
//! (disable with [`UnwrapOptions::sequential`]). Results do not depend on
//! execution order.
//!
//! # Example
//!
//! ```
//! use worlduv::algo::unwrap::{world_space_unwrap, UnwrapOptions};
//! use worlduv::mesh::PolygonMesh;
//! use nalgebra::Point3;
//!
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let mesh = PolygonMesh::from_faces(positions, &[vec![0, 1, 2, 3]]).unwrap();
//!
//! let uvs = world_space_unwrap(&mesh, &UnwrapOptions::default()).unwrap();
//! assert_eq!(uvs.len(), mesh.num_loops());
//! ```

use nalgebra::{Matrix4, Point2, Point3};
use rayon::prelude::*;

use crate::error::{Result, UvError};
use crate::mesh::PolygonMesh;

use super::planar::{project_face, ProjectOptions};
use super::uv::LoopUvMap;

/// Options for world-space unwrapping.
#[derive(Debug, Clone, Copy)]
pub struct UnwrapOptions {
    /// The planar projection transform (scale, rotation, offset).
    pub project: ProjectOptions,

    /// Object-to-world transform applied to positions (as points) and face
    /// normals (as directions) before projection. Defaults to identity,
    /// i.e. the mesh is already in world space.
    pub world_transform: Matrix4<f64>,

    /// Whether to process faces in parallel (default: true).
    pub parallel: bool,
}

impl Default for UnwrapOptions {
    fn default() -> Self {
        Self {
            project: ProjectOptions::default(),
            world_transform: Matrix4::identity(),
            parallel: true,
        }
    }
}

impl UnwrapOptions {
    /// Set the projection transform.
    pub fn with_project(mut self, project: ProjectOptions) -> Self {
        self.project = project;
        self
    }

    /// Set the object-to-world transform.
    pub fn with_world_transform(mut self, world_transform: Matrix4<f64>) -> Self {
        self.world_transform = world_transform;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Unwrap every face of a mesh, producing a fresh UV map.
///
/// # Errors
///
/// Returns [`UvError::InvalidParameter`] if the projection options are
/// unusable (see [`ProjectOptions::validate`]).
pub fn world_space_unwrap(mesh: &PolygonMesh, options: &UnwrapOptions) -> Result<LoopUvMap> {
    let mut uvs = LoopUvMap::zeros(mesh.num_loops());
    let faces: Vec<usize> = mesh.face_ids().collect();
    unwrap_into(mesh, &faces, options, &mut uvs)?;
    Ok(uvs)
}

/// Unwrap a subset of faces, writing into an existing UV map.
///
/// Only the loops of the listed faces are written; every other loop keeps
/// its current coordinate. This mirrors editing workflows where only the
/// selected faces are re-unwrapped.
///
/// # Errors
///
/// Returns [`UvError::FaceIndexOutOfRange`] if a face index exceeds the
/// mesh, [`UvError::invalid_param`] if `uvs` is not sized to the mesh's
/// loop count, and [`UvError::InvalidParameter`] for unusable projection
/// options.
pub fn world_space_unwrap_faces(
    mesh: &PolygonMesh,
    faces: &[usize],
    options: &UnwrapOptions,
    uvs: &mut LoopUvMap,
) -> Result<()> {
    if uvs.len() != mesh.num_loops() {
        return Err(UvError::invalid_param(
            "uvs",
            uvs.len(),
            "UV map length must equal the mesh loop count",
        ));
    }
    for &f in faces {
        if f >= mesh.num_faces() {
            return Err(UvError::FaceIndexOutOfRange {
                face: f,
                num_faces: mesh.num_faces(),
            });
        }
    }
    unwrap_into(mesh, faces, options, uvs)
}

fn unwrap_into(
    mesh: &PolygonMesh,
    faces: &[usize],
    options: &UnwrapOptions,
    uvs: &mut LoopUvMap,
) -> Result<()> {
    // Fail on bad parameters before touching any face.
    options.project.validate()?;

    let face_uvs: Vec<Vec<Point2<f64>>> = if options.parallel {
        faces
            .par_iter()
            .map(|&f| project_world_face(mesh, f, options))
            .collect::<Result<_>>()?
    } else {
        faces
            .iter()
            .map(|&f| project_world_face(mesh, f, options))
            .collect::<Result<_>>()?
    };

    for (&f, face_uv) in faces.iter().zip(&face_uvs) {
        let range = mesh.face_loop_range(f);
        uvs.as_mut_slice()[range].copy_from_slice(face_uv);
    }
    Ok(())
}

/// Project a single face after moving it to world space.
///
/// The normal is evaluated once per face and transformed as a direction;
/// positions transform as points, so translation participates in the
/// projected coordinates (that is what makes the result world-anchored).
fn project_world_face(
    mesh: &PolygonMesh,
    f: usize,
    options: &UnwrapOptions,
) -> Result<Vec<Point2<f64>>> {
    let world_normal = options.world_transform.transform_vector(&mesh.face_normal(f));
    let world_positions: Vec<Point3<f64>> = mesh
        .face_positions(f)
        .map(|p| options.world_transform.transform_point(&p))
        .collect();
    project_face(&world_positions, &world_normal, &options.project)
}
