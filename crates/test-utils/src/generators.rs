//! Synthetic axes and fields on spherical grids.
//!
//! Fields have closed forms so tests can check rendered values against the
//! expected sign or magnitude at any grid point.

use plot_common::{Field2, Field3};
use std::f64::consts::PI;

/// Cell-centred colatitudes in `(0, pi)`.
///
/// # Example
///
/// ```
/// use test_utils::colatitude_axis;
///
/// let theta = colatitude_axis(4);
/// assert_eq!(theta.len(), 4);
/// assert!(theta[0] > 0.0 && theta[3] < std::f64::consts::PI);
/// ```
pub fn colatitude_axis(n: usize) -> Vec<f64> {
    (0..n).map(|j| PI * (j as f64 + 0.5) / n as f64).collect()
}

/// Periodic azimuths `2 pi i / n`, covering `[0, 2 pi)`.
pub fn azimuth_axis(n: usize) -> Vec<f64> {
    (0..n).map(|i| 2.0 * PI * i as f64 / n as f64).collect()
}

/// Evenly spaced radii from `inner` to `outer` inclusive.
pub fn radius_axis(n: usize, inner: f64, outer: f64) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![inner],
        _ => (0..n)
            .map(|k| inner + (outer - inner) * k as f64 / (n - 1) as f64)
            .collect(),
    }
}

/// `[phi, theta, r]` field `r * sin(theta)^m * cos(m phi) * cos(theta)`.
///
/// Antisymmetric about the equator, so it always has both signs.
pub fn shell_wave(phi: &[f64], theta: &[f64], r: &[f64], m: i32) -> Field3 {
    Field3::from_fn([phi.len(), theta.len(), r.len()], |i, j, k| {
        r[k] * theta[j].sin().powi(m) * (m as f64 * phi[i]).cos() * theta[j].cos()
    })
}

/// Field of identical value everywhere.
pub fn constant_field(shape: [usize; 3], value: f64) -> Field3 {
    Field3::from_fn(shape, |_, _, _| value)
}

/// `[theta, r]` dipole-like slice `cos(theta) / r^2`.
pub fn dipole_slice(theta: &[f64], r: &[f64]) -> Field2 {
    Field2::from_fn(theta.len(), r.len(), |j, k| theta[j].cos() / (r[k] * r[k]))
}

/// `[phi, r]` slice `cos(m phi)` modulated by a half sine across the shell gap.
pub fn equatorial_wave(phi: &[f64], r: &[f64], m: i32) -> Field2 {
    let (inner, outer) = (r[0], r[r.len() - 1]);
    let gap = (outer - inner).abs().max(f64::EPSILON);
    Field2::from_fn(phi.len(), r.len(), |i, k| {
        (m as f64 * phi[i]).cos() * (PI * (r[k] - inner) / gap).sin()
    })
}

/// Cartesian coordinates `(x, y, z)` of every `[phi, theta, r]` grid point.
pub fn shell_coordinates(phi: &[f64], theta: &[f64], r: &[f64]) -> (Field3, Field3, Field3) {
    let shape = [phi.len(), theta.len(), r.len()];
    (
        Field3::from_fn(shape, |i, j, k| r[k] * theta[j].sin() * phi[i].cos()),
        Field3::from_fn(shape, |i, j, k| r[k] * theta[j].sin() * phi[i].sin()),
        Field3::from_fn(shape, |_, j, k| r[k] * theta[j].cos()),
    )
}

/// Solid-body rotation about z, `u = (-y, x, 0)`, in Cartesian components.
pub fn solid_body_rotation(phi: &[f64], theta: &[f64], r: &[f64]) -> (Field3, Field3, Field3) {
    let (x, y, _) = shell_coordinates(phi, theta, r);
    let shape = x.shape();
    (
        Field3::from_fn(shape, |i, j, k| -y.get(i, j, k)),
        Field3::from_fn(shape, |i, j, k| x.get(i, j, k)),
        Field3::from_fn(shape, |_, _, _| 0.0),
    )
}

/// Solid-body rotation in spherical components `(u_phi, u_theta)`.
pub fn solid_body_spherical(phi: &[f64], theta: &[f64], r: &[f64]) -> (Field3, Field3) {
    let shape = [phi.len(), theta.len(), r.len()];
    (
        Field3::from_fn(shape, |_, j, k| r[k] * theta[j].sin()),
        Field3::from_fn(shape, |_, _, _| 0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes() {
        let phi = azimuth_axis(8);
        assert_eq!(phi[0], 0.0);
        assert!(phi[7] < 2.0 * PI);
        assert_eq!(radius_axis(3, 0.5, 1.5), vec![0.5, 1.0, 1.5]);
        assert!(radius_axis(0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn test_shell_wave_has_both_signs() {
        let (phi, theta, r) = (azimuth_axis(8), colatitude_axis(6), radius_axis(2, 0.5, 1.0));
        let field = shell_wave(&phi, &theta, &r, 2);
        assert_eq!(field.shape(), [8, 6, 2]);
        assert!(field.values().iter().any(|&v| v > 0.0));
        assert!(field.values().iter().any(|&v| v < 0.0));
    }

    #[test]
    fn test_shell_coordinates_on_sphere() {
        let (phi, theta, r) = (azimuth_axis(4), colatitude_axis(3), vec![2.0]);
        let (x, y, z) = shell_coordinates(&phi, &theta, &r);
        for i in 0..4 {
            for j in 0..3 {
                let (a, b, c) = (x.get(i, j, 0), y.get(i, j, 0), z.get(i, j, 0));
                assert!(((a * a + b * b + c * c).sqrt() - 2.0).abs() < 1e-12);
            }
        }
    }
}
