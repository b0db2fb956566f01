//! Synthetic convection-like snapshot on a spherical shell.

use plot_common::{Field2, Field3};
use std::f64::consts::PI;

/// Axes and fields of one snapshot, indexed `[phi, theta, r]`.
pub struct Snapshot {
    pub phi: Vec<f64>,
    pub theta: Vec<f64>,
    pub r: Vec<f64>,
    /// Temperature anomaly.
    pub temperature: Field3,
    pub u_phi: Field3,
    pub u_theta: Field3,
}

impl Snapshot {
    /// Snapshot with `nphi` azimuths, `nphi / 2` colatitudes and `nr` radii
    /// between `radius_ratio` and 1.
    pub fn generate(nphi: usize, nr: usize, radius_ratio: f64) -> Self {
        let ntheta = (nphi / 2).max(2);
        let phi: Vec<f64> = (0..nphi).map(|i| 2.0 * PI * i as f64 / nphi as f64).collect();
        let theta: Vec<f64> = (0..ntheta)
            .map(|j| PI * (j as f64 + 0.5) / ntheta as f64)
            .collect();
        let r: Vec<f64> = (0..nr)
            .map(|k| radius_ratio + (1.0 - radius_ratio) * k as f64 / (nr.max(2) - 1) as f64)
            .collect();

        let shape = [phi.len(), theta.len(), r.len()];
        let gap = 1.0 - radius_ratio;
        let radial = |k: usize| (PI * (r[k] - radius_ratio) / gap).sin();

        // m = 4 columnar rolls plus an equatorially antisymmetric component
        let temperature = Field3::from_fn(shape, |i, j, k| {
            let s = theta[j].sin();
            radial(k) * (s.powi(4) * (4.0 * phi[i]).cos() + 0.3 * theta[j].cos() * s)
        });
        let u_phi = Field3::from_fn(shape, |i, j, k| {
            radial(k) * theta[j].sin().powi(3) * (4.0 * phi[i]).sin()
        });
        let u_theta = Field3::from_fn(shape, |i, j, k| {
            radial(k) * theta[j].sin().powi(2) * theta[j].cos() * (4.0 * phi[i]).cos()
        });

        Self {
            phi,
            theta,
            r,
            temperature,
            u_phi,
            u_theta,
        }
    }

    /// `[theta, r]` slice at azimuth index `i`.
    pub fn meridional(&self, i: usize) -> Field2 {
        Field2::from_fn(self.theta.len(), self.r.len(), |j, k| self.temperature.get(i, j, k))
    }

    /// `[phi, r]` slice at the colatitude closest to the equator.
    pub fn equatorial(&self) -> Field2 {
        let j = self.theta.len() / 2;
        Field2::from_fn(self.phi.len(), self.r.len(), |i, k| self.temperature.get(i, j, k))
    }

    /// Cartesian coordinates and velocity components for the 3D view.
    pub fn cartesian(&self) -> [Field3; 6] {
        let shape = self.temperature.shape();
        let (phi, theta, r) = (&self.phi, &self.theta, &self.r);
        let x = Field3::from_fn(shape, |i, j, k| r[k] * theta[j].sin() * phi[i].cos());
        let y = Field3::from_fn(shape, |i, j, k| r[k] * theta[j].sin() * phi[i].sin());
        let z = Field3::from_fn(shape, |_, j, k| r[k] * theta[j].cos());

        // e_theta = (cos t cos p, cos t sin p, -sin t), e_phi = (-sin p, cos p, 0)
        let (ut, up) = (&self.u_theta, &self.u_phi);
        let ux = Field3::from_fn(shape, |i, j, k| {
            ut.get(i, j, k) * theta[j].cos() * phi[i].cos() - up.get(i, j, k) * phi[i].sin()
        });
        let uy = Field3::from_fn(shape, |i, j, k| {
            ut.get(i, j, k) * theta[j].cos() * phi[i].sin() + up.get(i, j, k) * phi[i].cos()
        });
        let uz = Field3::from_fn(shape, |i, j, k| -ut.get(i, j, k) * theta[j].sin());
        [x, y, z, ux, uy, uz]
    }
}
