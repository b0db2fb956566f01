//! Field and mesh containers for spherical/cylindrical grids.
//!
//! All arrays are stored row-major in a flat `Vec<f64>` with explicit
//! dimensions, the same layout the rasterizer consumes.

use crate::{PlotError, PlotResult};
use serde::{Deserialize, Serialize};

/// Fail with `EmptyAxis` when a coordinate axis has no points.
pub fn require_axis(name: &'static str, axis: &[f64]) -> PlotResult<()> {
    if axis.is_empty() {
        return Err(PlotError::EmptyAxis(name));
    }
    Ok(())
}

/// A 2D array of values, e.g. `[theta, radius]` or a coordinate mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field2 {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Field2 {
    /// Wrap row-major data, checking that its length matches `rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> PlotResult<Self> {
        if data.len() != rows * cols {
            return Err(PlotError::shape_mismatch("field2", &[rows * cols], &[data.len()]));
        }
        Ok(Self { rows, cols, data })
    }

    /// Build an array by evaluating `f(row, col)` for every element.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    /// Array of the given shape filled with `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `[rows, cols]`
    pub fn shape(&self) -> [usize; 2] {
        [self.rows, self.cols]
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element at `(row, col)`. Panics when out of range, like slice indexing.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// One row as a slice.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Column copied out into a vector.
    pub fn column(&self, col: usize) -> Vec<f64> {
        (0..self.rows).map(|i| self.get(i, col)).collect()
    }

    /// Flat row-major view.
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Fail with `ShapeMismatch` unless this array has the expected shape.
    pub fn expect_shape(&self, what: &str, rows: usize, cols: usize) -> PlotResult<()> {
        if self.rows != rows || self.cols != cols {
            return Err(PlotError::shape_mismatch(
                what,
                &[rows, cols],
                &[self.rows, self.cols],
            ));
        }
        Ok(())
    }

    /// Elementwise map into a new array of the same shape.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Append a copy of the first row at the end (periodic closure).
    pub fn with_wrapped_row(&self) -> Self {
        let mut data = self.data.clone();
        if self.rows > 0 {
            data.extend_from_slice(self.row(0));
        }
        Self {
            rows: self.rows + usize::from(self.rows > 0),
            cols: self.cols,
            data,
        }
    }
}

/// A 3D array with shape `[n0, n1, n2]`, e.g. `[phi, theta, radius]`.
///
/// The last dimension is the radial index selected by a shell index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field3 {
    shape: [usize; 3],
    data: Vec<f64>,
}

impl Field3 {
    /// Wrap row-major data, checking its length against the shape.
    pub fn new(shape: [usize; 3], data: Vec<f64>) -> PlotResult<Self> {
        let expected = shape.iter().product::<usize>();
        if data.len() != expected {
            return Err(PlotError::shape_mismatch("field3", &[expected], &[data.len()]));
        }
        Ok(Self { shape, data })
    }

    /// Build a field by evaluating `f(i, j, k)` for every element.
    pub fn from_fn(shape: [usize; 3], mut f: impl FnMut(usize, usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(shape.iter().product());
        for i in 0..shape[0] {
            for j in 0..shape[1] {
                for k in 0..shape[2] {
                    data.push(f(i, j, k));
                }
            }
        }
        Self { shape, data }
    }

    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    pub fn values(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize, k: usize) -> f64 {
        self.data[(i * self.shape[1] + j) * self.shape[2] + k]
    }

    /// Select one radial shell (`data[..., k]`) as a `[n0, n1]` array.
    pub fn shell(&self, k: usize) -> PlotResult<Field2> {
        if k >= self.shape[2] {
            return Err(PlotError::ShellIndexOutOfRange {
                index: k,
                len: self.shape[2],
            });
        }
        Ok(Field2::from_fn(self.shape[0], self.shape[1], |i, j| {
            self.get(i, j, k)
        }))
    }

    /// Fail with `ShapeMismatch` unless this field has the expected shape.
    pub fn expect_shape(&self, what: &str, shape: [usize; 3]) -> PlotResult<()> {
        if self.shape != shape {
            return Err(PlotError::shape_mismatch(what, &shape, &self.shape));
        }
        Ok(())
    }
}

/// Broadcast coordinate meshes, each of shape `[len(phi), len(theta)]`.
///
/// `azimuth.get(i, j) == phi[i]` and `polar.get(i, j) == theta[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2D {
    pub azimuth: Field2,
    pub polar: Field2,
}

impl Grid2D {
    /// `[len(phi), len(theta)]`
    pub fn shape(&self) -> [usize; 2] {
        self.azimuth.shape()
    }
}
