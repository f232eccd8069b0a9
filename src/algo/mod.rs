//! UV mapping algorithms.
//!
//! This module contains the world-space UV mapping pipeline:
//!
//! - **Planar projection**: per-face dominant-axis planar (box) projection
//! - **Unwrapping**: whole-mesh world-space unwrap with face selection
//! - **UV storage**: per-loop UV coordinate maps

pub mod planar;
pub mod unwrap;
pub mod uv;

pub use planar::{planar_axes, project_face, ProjectOptions, ProjectionAxes, MIN_SCALE};
pub use unwrap::{world_space_unwrap, world_space_unwrap_faces, UnwrapOptions};
pub use uv::LoopUvMap;
