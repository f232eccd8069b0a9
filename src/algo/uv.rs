//! UV coordinate storage.
//!
//! This module provides the [`LoopUvMap`] type for storing 2D texture
//! coordinates per mesh loop (face corner).

use nalgebra::Point2;

/// UV coordinates for mesh loops.
///
/// One `Point2` per loop, indexed by the mesh's loop index. UVs are stored
/// per loop rather than per vertex because a vertex shared by
/// differently-oriented faces gets a different coordinate on each face
/// under planar projection.
///
/// # Example
///
/// ```
/// use worlduv::algo::uv::LoopUvMap;
/// use nalgebra::Point2;
///
/// let mut uvs = LoopUvMap::zeros(4);
/// uvs.set(2, Point2::new(0.5, 1.0));
/// assert_eq!(uvs.get(2), Point2::new(0.5, 1.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoopUvMap {
    coords: Vec<Point2<f64>>,
}

impl LoopUvMap {
    /// Create a UV map from per-loop coordinates.
    pub fn new(coords: Vec<Point2<f64>>) -> Self {
        Self { coords }
    }

    /// Create a UV map of `n` loops, all at the origin.
    pub fn zeros(n: usize) -> Self {
        Self {
            coords: vec![Point2::origin(); n],
        }
    }

    /// Get the UV coordinate for a loop.
    #[inline]
    pub fn get(&self, l: usize) -> Point2<f64> {
        self.coords[l]
    }

    /// Set the UV coordinate for a loop.
    #[inline]
    pub fn set(&mut self, l: usize, uv: Point2<f64>) {
        self.coords[l] = uv;
    }

    /// Number of loops.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Iterate over all coordinates with their loop indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Point2<f64>)> + '_ {
        self.coords.iter().enumerate().map(|(l, &uv)| (l, uv))
    }

    /// Get the raw coordinates slice.
    pub fn as_slice(&self) -> &[Point2<f64>] {
        &self.coords
    }

    /// Get a mutable slice of coordinates.
    pub fn as_mut_slice(&mut self) -> &mut [Point2<f64>] {
        &mut self.coords
    }

    /// Compute the bounding box of the UV coordinates.
    ///
    /// Returns `None` if the map is empty.
    pub fn bounding_box(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        let first = *self.coords.first()?;
        let mut min = first;
        let mut max = first;
        for uv in &self.coords {
            min.x = min.x.min(uv.x);
            min.y = min.y.min(uv.y);
            max.x = max.x.max(uv.x);
            max.y = max.y.max(uv.y);
        }
        Some((min, max))
    }
}
