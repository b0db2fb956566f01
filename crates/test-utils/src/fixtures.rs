//! Standard spherical grids used across the test suite.

use crate::generators::{azimuth_axis, colatitude_axis, radius_axis};

/// Axes of a spherical-shell grid, indexed `[phi, theta, r]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SphericalGrid {
    pub phi: Vec<f64>,
    pub theta: Vec<f64>,
    pub r: Vec<f64>,
}

impl SphericalGrid {
    /// Periodic azimuth, cell-centred colatitude, radii from `inner` to `outer`.
    pub fn new(nphi: usize, ntheta: usize, nr: usize, inner: f64, outer: f64) -> Self {
        Self {
            phi: azimuth_axis(nphi),
            theta: colatitude_axis(ntheta),
            r: radius_axis(nr, inner, outer),
        }
    }

    /// Coarse grid for fast rendering tests.
    pub fn small() -> Self {
        Self::new(16, 8, 3, 0.35, 1.0)
    }

    /// Grid sized like a low-resolution simulation snapshot.
    pub fn medium() -> Self {
        Self::new(96, 48, 8, 0.35, 1.0)
    }

    /// `[nphi, ntheta, nr]`
    pub fn shape(&self) -> [usize; 3] {
        [self.phi.len(), self.theta.len(), self.r.len()]
    }
}

/// Radius ratio of Earth's outer core, a common shell geometry.
pub const EARTH_CORE_RATIO: f64 = 0.35;

/// Shell indices to try against a grid with `nr` radial levels.
pub fn shell_indices(nr: usize) -> Vec<usize> {
    match nr {
        0 => vec![],
        1 => vec![0],
        _ => vec![0, nr / 2, nr - 1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_shapes() {
        assert_eq!(SphericalGrid::small().shape(), [16, 8, 3]);
        assert_eq!(SphericalGrid::medium().r[0], EARTH_CORE_RATIO);
        assert_eq!(shell_indices(8), vec![0, 4, 7]);
    }
}
