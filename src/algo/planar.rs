//! Dominant-axis planar (box) projection.
//!
//! Each face is mapped onto whichever of the three coordinate planes it
//! faces most directly, chosen from the face normal's dominant component.
//! Projecting onto the plane most perpendicular to the normal avoids the
//! degenerate near-zero-area mappings that occur when the projection plane
//! is parallel to the face.
//!
//! Positions are expected in world space, so textures stay consistently
//! scaled and aligned across objects that share a scene scale. Applying the
//! object-to-world transform is the caller's job; [`crate::algo::unwrap`]
//! does it for whole meshes.
//!
//! # Example
//!
//! ```
//! use worlduv::algo::planar::{project_face, ProjectOptions};
//! use nalgebra::{Point3, Vector3};
//!
//! let square = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let uvs = project_face(&square, &Vector3::z(), &ProjectOptions::default()).unwrap();
//! assert_eq!(uvs[2].x, 1.0);
//! assert_eq!(uvs[2].y, 1.0);
//! ```

use nalgebra::{Point2, Point3, Vector2, Vector3};

use crate::error::{Result, UvError};

/// Minimum allowed projection scale.
///
/// [`ProjectOptions::with_scale`] clamps to this value; smaller scales blow
/// up the projected coordinates and a zero scale would divide by zero.
pub const MIN_SCALE: f64 = 0.001;

/// A pair of orthogonal unit world axes to project onto.
///
/// Produced by [`planar_axes`]; each axis is one of the three world basis
/// directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionAxes {
    /// The axis mapped to the U coordinate.
    pub u: Vector3<f64>,
    /// The axis mapped to the V coordinate.
    pub v: Vector3<f64>,
}

/// Parameters for the planar projection transform.
///
/// Projected coordinates are divided by `scale`, rotated by `rotation`, then
/// shifted by `offset`, in that order. Note the inverse scale relationship:
/// `scale` is world units per UV unit, so a larger scale shrinks the UV
/// footprint.
///
/// Defaults match an untransformed projection: scale 1.0, rotation 0.0,
/// offset (0, 0).
#[derive(Debug, Clone, Copy)]
pub struct ProjectOptions {
    /// Uniform scale, in world units per UV unit. Must be positive; the
    /// builder clamps to [`MIN_SCALE`].
    pub scale: f64,

    /// Counter-clockwise rotation about the UV origin, in radians.
    pub rotation: f64,

    /// Offset added after scaling and rotation.
    pub offset: Vector2<f64>,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation: 0.0,
            offset: Vector2::zeros(),
        }
    }
}

impl ProjectOptions {
    /// Set the scale, clamping to [`MIN_SCALE`].
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale.max(MIN_SCALE);
        self
    }

    /// Set the rotation in radians.
    pub fn with_rotation(mut self, radians: f64) -> Self {
        self.rotation = radians;
        self
    }

    /// Set the rotation in degrees.
    pub fn with_rotation_degrees(self, degrees: f64) -> Self {
        self.with_rotation(degrees.to_radians())
    }

    /// Set the UV offset.
    pub fn with_offset(mut self, u: f64, v: f64) -> Self {
        self.offset = Vector2::new(u, v);
        self
    }

    /// Check that all parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns [`UvError::InvalidParameter`] if the scale is zero, negative,
    /// or non-finite, or if the rotation or offset is non-finite. A zero
    /// scale would otherwise divide by zero inside the projection.
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(UvError::invalid_param(
                "scale",
                self.scale,
                "must be positive and finite",
            ));
        }
        if !self.rotation.is_finite() {
            return Err(UvError::invalid_param(
                "rotation",
                self.rotation,
                "must be finite",
            ));
        }
        if !self.offset.x.is_finite() || !self.offset.y.is_finite() {
            return Err(UvError::invalid_param(
                "offset",
                format!("({}, {})", self.offset.x, self.offset.y),
                "must be finite",
            ));
        }
        Ok(())
    }
}

/// Given a face normal, return the two world axes to project onto.
///
/// The projection plane is the coordinate plane perpendicular to the
/// normal's dominant component:
///
/// - X dominant: project onto (Y, Z)
/// - Y dominant: project onto (X, Z)
/// - Z dominant: project onto (X, Y)
///
/// Ties resolve in branch order: an X/Y tie projects onto (X, Z), any
/// remaining tie onto (X, Y). The branch order is part of the contract,
/// since axis-aligned normals would otherwise map ambiguously and the
/// chosen plane decides which world coordinates become U and V.
///
/// The normal need not be unit length (only component magnitudes are
/// compared), and a zero normal deterministically falls through to the
/// (X, Y) plane.
pub fn planar_axes(normal: &Vector3<f64>) -> ProjectionAxes {
    let nx = normal.x.abs();
    let ny = normal.y.abs();
    let nz = normal.z.abs();

    if nx > ny && nx > nz {
        ProjectionAxes {
            u: Vector3::y(),
            v: Vector3::z(),
        }
    } else if ny > nz {
        ProjectionAxes {
            u: Vector3::x(),
            v: Vector3::z(),
        }
    } else {
        ProjectionAxes {
            u: Vector3::x(),
            v: Vector3::y(),
        }
    }
}

/// Project one face's world-space positions to UV coordinates.
///
/// The projection axes are derived once from `normal` and shared by every
/// vertex of the face. Each position is projected onto the axes, divided by
/// the scale, rotated counter-clockwise, and offset. Output order matches
/// input order, one coordinate per position.
///
/// The routine is pure: identical inputs always produce identical output,
/// and neither `positions` nor `normal` is mutated.
///
/// # Errors
///
/// Returns [`UvError::InvalidParameter`] for an unusable transform (see
/// [`ProjectOptions::validate`]) and [`UvError::InvalidFace`] if the face
/// has fewer than three positions.
pub fn project_face(
    positions: &[Point3<f64>],
    normal: &Vector3<f64>,
    options: &ProjectOptions,
) -> Result<Vec<Point2<f64>>> {
    options.validate()?;
    if positions.len() < 3 {
        return Err(UvError::InvalidFace {
            reason: "face has fewer than three vertices",
        });
    }

    let axes = planar_axes(normal);
    let (sin_r, cos_r) = options.rotation.sin_cos();

    let mut uvs = Vec::with_capacity(positions.len());
    for p in positions {
        let u = p.coords.dot(&axes.u) / options.scale;
        let v = p.coords.dot(&axes.v) / options.scale;

        let u_rot = u * cos_r - v * sin_r;
        let v_rot = u * sin_r + v * cos_r;

        uvs.push(Point2::new(
            u_rot + options.offset.x,
            v_rot + options.offset.y,
        ));
    }
    Ok(uvs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_axes_x_dominant() {
        let axes = planar_axes(&Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(axes.u, Vector3::y());
        assert_eq!(axes.v, Vector3::z());

        // Sign and length must not matter.
        let axes = planar_axes(&Vector3::new(-5.0, 0.1, -0.1));
        assert_eq!(axes.u, Vector3::y());
        assert_eq!(axes.v, Vector3::z());
    }

    #[test]
    fn test_axes_y_dominant() {
        let axes = planar_axes(&Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(axes.u, Vector3::x());
        assert_eq!(axes.v, Vector3::z());
    }

    #[test]
    fn test_axes_z_dominant() {
        let axes = planar_axes(&Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(axes.u, Vector3::x());
        assert_eq!(axes.v, Vector3::y());
    }

    #[test]
    fn test_axes_tie_breaks() {
        // All components equal: X is not strictly dominant and Y does not
        // beat Z, so the final branch wins.
        let axes = planar_axes(&Vector3::new(0.5, 0.5, 0.5));
        assert_eq!(axes.u, Vector3::x());
        assert_eq!(axes.v, Vector3::y());

        // X/Y tie with Z smaller: second branch (Y path) wins.
        let axes = planar_axes(&Vector3::new(1.0, 1.0, 0.0));
        assert_eq!(axes.u, Vector3::x());
        assert_eq!(axes.v, Vector3::z());

        // Zero normal falls through to the (X, Y) plane.
        let axes = planar_axes(&Vector3::zeros());
        assert_eq!(axes.u, Vector3::x());
        assert_eq!(axes.v, Vector3::y());
    }

    #[test]
    fn test_unit_square_identity() {
        let uvs = project_face(&unit_square(), &Vector3::z(), &ProjectOptions::default()).unwrap();
        assert_eq!(uvs.len(), 4);
        assert_eq!(uvs[0], Point2::new(0.0, 0.0));
        assert_eq!(uvs[1], Point2::new(1.0, 0.0));
        assert_eq!(uvs[2], Point2::new(1.0, 1.0));
        assert_eq!(uvs[3], Point2::new(0.0, 1.0));
    }

    #[test]
    fn test_scale_is_inverse() {
        let square = unit_square();
        let base = project_face(&square, &Vector3::z(), &ProjectOptions::default()).unwrap();
        let doubled = project_face(
            &square,
            &Vector3::z(),
            &ProjectOptions::default().with_scale(2.0),
        )
        .unwrap();

        // Doubling the scale halves every coordinate.
        for (a, b) in base.iter().zip(&doubled) {
            assert!((b.x - a.x / 2.0).abs() < 1e-12);
            assert!((b.y - a.y / 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let square = unit_square();
        let options = ProjectOptions::default().with_rotation(std::f64::consts::FRAC_PI_2);
        let uvs = project_face(&square, &Vector3::z(), &options).unwrap();

        // CCW quarter turn maps (1, 0) to (0, 1).
        assert!((uvs[1].x - 0.0).abs() < 1e-12);
        assert!((uvs[1].y - 1.0).abs() < 1e-12);
        // And (1, 1) to (-1, 1).
        assert!((uvs[2].x + 1.0).abs() < 1e-12);
        assert!((uvs[2].y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_offset_is_additive() {
        let square = unit_square();
        let options = ProjectOptions::default().with_rotation(0.3);
        let base = project_face(&square, &Vector3::z(), &options).unwrap();
        let shifted = project_face(&square, &Vector3::z(), &options.with_offset(2.5, -1.5)).unwrap();

        for (a, b) in base.iter().zip(&shifted) {
            assert!((b.x - (a.x + 2.5)).abs() < 1e-12);
            assert!((b.y - (a.y - 1.5)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rotation_applied_after_scale() {
        // With scale 2 and a quarter turn, (1, 0, 0) projects to (0.5, 0)
        // and rotates to (0, 0.5). Rotating before scaling would give the
        // same here, so also check a point with both coordinates set.
        let square = unit_square();
        let options = ProjectOptions::default()
            .with_scale(2.0)
            .with_rotation(std::f64::consts::FRAC_PI_2)
            .with_offset(1.0, 1.0);
        let uvs = project_face(&square, &Vector3::z(), &options).unwrap();

        // (1, 1) -> scaled (0.5, 0.5) -> rotated (-0.5, 0.5) -> offset (0.5, 1.5)
        assert!((uvs[2].x - 0.5).abs() < 1e-12);
        assert!((uvs[2].y - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_x_dominant_projection_uses_yz() {
        // A face in the YZ plane: U should come from Y, V from Z.
        let face = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 3.0),
        ];
        let uvs = project_face(&face, &Vector3::x(), &ProjectOptions::default()).unwrap();
        assert_eq!(uvs[1], Point2::new(2.0, 0.0));
        assert_eq!(uvs[2], Point2::new(2.0, 3.0));
    }

    #[test]
    fn test_deterministic_and_order_preserving() {
        let face = [
            Point3::new(0.3, -1.2, 4.0),
            Point3::new(1.7, 0.4, 3.1),
            Point3::new(-0.6, 2.2, 5.5),
            Point3::new(-1.1, 0.9, 4.8),
            Point3::new(0.1, -0.3, 4.2),
        ];
        let normal = Vector3::new(0.2, -0.4, 0.9);
        let options = ProjectOptions::default()
            .with_scale(0.7)
            .with_rotation(1.1)
            .with_offset(0.25, -0.75);

        let first = project_face(&face, &normal, &options).unwrap();
        let second = project_face(&face, &normal, &options).unwrap();

        assert_eq!(first.len(), face.len());
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_scale_rejected() {
        let options = ProjectOptions {
            scale: 0.0,
            ..Default::default()
        };
        let err = project_face(&unit_square(), &Vector3::z(), &options).unwrap_err();
        assert!(matches!(err, UvError::InvalidParameter { name: "scale", .. }));
    }

    #[test]
    fn test_negative_scale_rejected() {
        let options = ProjectOptions {
            scale: -1.0,
            ..Default::default()
        };
        let err = project_face(&unit_square(), &Vector3::z(), &options).unwrap_err();
        assert!(matches!(err, UvError::InvalidParameter { name: "scale", .. }));
    }

    #[test]
    fn test_with_scale_clamps_to_minimum() {
        let options = ProjectOptions::default().with_scale(0.0);
        assert_eq!(options.scale, MIN_SCALE);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_too_few_vertices_rejected() {
        let two = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let err = project_face(&two, &Vector3::z(), &ProjectOptions::default()).unwrap_err();
        assert!(matches!(err, UvError::InvalidFace { .. }));
    }
}
