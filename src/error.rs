//! Error types for worlduv.
//!
//! This module defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`UvError`].
pub type Result<T> = std::result::Result<T, UvError>;

/// Errors that can occur during mesh construction, UV projection, or I/O.
#[derive(Error, Debug)]
pub enum UvError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has fewer than three vertices or duplicate vertex indices.
    #[error("face {face} is degenerate")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// A face index is out of range for the mesh it was used with.
    #[error("face index {face} is out of range (mesh has {num_faces} faces)")]
    FaceIndexOutOfRange {
        /// The out-of-range face index.
        face: usize,
        /// The number of faces in the mesh.
        num_faces: usize,
    },

    /// Malformed face data passed directly to a projection routine.
    #[error("invalid face: {reason}")]
    InvalidFace {
        /// Description of the defect.
        reason: &'static str,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading mesh from file.
    #[error("failed to load mesh from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Error saving mesh to file.
    #[error("failed to save mesh to {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },
}

impl UvError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        UvError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
