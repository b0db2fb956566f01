//! Planar transforms for the three plot families.
//!
//! - Geographic: (phi, theta) in radians -> (longitude, latitude) in degrees
//! - Meridional: (r, theta) -> (r sin theta, r cos theta), theta = 0 is "up"
//! - Equatorial: (r, phi) -> (r cos phi, r sin phi)

use crate::mesh::polar_mesh;
use plot_common::{Bounds, Field2, Grid2D, PlotError, PlotResult};
use std::f64::consts::{FRAC_PI_2, PI};

const RAD_TO_DEG: f64 = 180.0 / PI;

/// Projected coordinate pair arrays, both with the shape of the source mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedCoords {
    pub x: Field2,
    pub y: Field2,
}

impl ProjectedCoords {
    /// Pair two arrays, checking they share a shape.
    pub fn new(x: Field2, y: Field2) -> PlotResult<Self> {
        if x.shape() != y.shape() {
            return Err(PlotError::shape_mismatch("projected y", &x.shape(), &y.shape()));
        }
        Ok(Self { x, y })
    }

    pub fn shape(&self) -> [usize; 2] {
        self.x.shape()
    }

    #[inline]
    pub fn point(&self, row: usize, col: usize) -> (f64, f64) {
        (self.x.get(row, col), self.y.get(row, col))
    }

    /// Bounds over all finite points.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(
            self.x
                .values()
                .iter()
                .copied()
                .zip(self.y.values().iter().copied()),
        )
    }

    /// Close a periodic mesh by repeating its first row at the end.
    pub fn with_wrapped_row(&self) -> Self {
        Self {
            x: self.x.with_wrapped_row(),
            y: self.y.with_wrapped_row(),
        }
    }
}

/// Longitude/latitude in degrees for one colatitude/azimuth pair.
///
/// Azimuth is re-centred by subtracting pi and colatitude becomes latitude
/// via `pi/2 - theta`. Out-of-range inputs are not checked.
#[inline]
pub fn to_lon_lat(phi: f64, theta: f64) -> (f64, f64) {
    ((phi - PI) * RAD_TO_DEG, (FRAC_PI_2 - theta) * RAD_TO_DEG)
}

/// Geographic transform of a `Grid2D`: `x` is longitude, `y` latitude.
pub fn geographic(grid: &Grid2D) -> ProjectedCoords {
    let [rows, cols] = grid.shape();
    let mut lon = Vec::with_capacity(rows * cols);
    let mut lat = Vec::with_capacity(rows * cols);
    for (&phi, &theta) in grid.azimuth.values().iter().zip(grid.polar.values()) {
        let (lo, la) = to_lon_lat(phi, theta);
        lon.push(lo);
        lat.push(la);
    }
    ProjectedCoords {
        x: Field2::from_fn(rows, cols, |i, j| lon[i * cols + j]),
        y: Field2::from_fn(rows, cols, |i, j| lat[i * cols + j]),
    }
}

/// Meridional half-plane transform over the `[theta, r]` mesh.
pub fn meridional(r: &[f64], theta: &[f64]) -> PlotResult<ProjectedCoords> {
    let (theta2d, r2d) = polar_mesh("theta", theta, r)?;
    meridional_mesh(&r2d, &theta2d)
}

/// Meridional transform of pre-built meshes: `x = r sin(theta)`, `y = r cos(theta)`.
pub fn meridional_mesh(r2d: &Field2, theta2d: &Field2) -> PlotResult<ProjectedCoords> {
    theta2d.expect_shape("theta mesh", r2d.rows(), r2d.cols())?;
    let [rows, cols] = r2d.shape();
    Ok(ProjectedCoords {
        x: Field2::from_fn(rows, cols, |i, j| r2d.get(i, j) * theta2d.get(i, j).sin()),
        y: Field2::from_fn(rows, cols, |i, j| r2d.get(i, j) * theta2d.get(i, j).cos()),
    })
}

/// Equatorial-plane transform over the `[phi, r]` mesh.
pub fn equatorial(r: &[f64], phi: &[f64]) -> PlotResult<ProjectedCoords> {
    let (phi2d, r2d) = polar_mesh("phi", phi, r)?;
    equatorial_mesh(&r2d, &phi2d)
}

/// Equatorial transform of pre-built meshes: `x = r cos(phi)`, `y = r sin(phi)`.
pub fn equatorial_mesh(r2d: &Field2, phi2d: &Field2) -> PlotResult<ProjectedCoords> {
    phi2d.expect_shape("phi mesh", r2d.rows(), r2d.cols())?;
    let [rows, cols] = r2d.shape();
    Ok(ProjectedCoords {
        x: Field2::from_fn(rows, cols, |i, j| r2d.get(i, j) * phi2d.get(i, j).cos()),
        y: Field2::from_fn(rows, cols, |i, j| r2d.get(i, j) * phi2d.get(i, j).sin()),
    })
}
