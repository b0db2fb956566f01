//! Broadcasting 1D coordinate axes into 2D meshes.

use plot_common::grid::require_axis;
use plot_common::{Field2, Grid2D, PlotResult};
use std::f64::consts::PI;

/// Expand `theta` (length N) and `phi` (length M) into `[M, N]` meshes.
///
/// Row `i` of `azimuth` is constant `phi[i]`; column `j` of `polar` is
/// constant `theta[j]`. Either axis being empty is an `EmptyAxis` error.
pub fn expand_grid(theta: &[f64], phi: &[f64]) -> PlotResult<Grid2D> {
    require_axis("theta", theta)?;
    require_axis("phi", phi)?;

    let (nphi, ntheta) = (phi.len(), theta.len());
    Ok(Grid2D {
        azimuth: Field2::from_fn(nphi, ntheta, |i, _| phi[i]),
        polar: Field2::from_fn(nphi, ntheta, |_, j| theta[j]),
    })
}

/// Mesh an angular axis against a radial axis: `(angle2d, r2d)`, each of
/// shape `[len(angle), len(r)]` with `angle2d[i, :] == angle[i]` and
/// `r2d[:, j] == r[j]`.
///
/// This is the layout of meridional (`[theta, r]`) and equatorial
/// (`[phi, r]`) slices.
pub fn polar_mesh(
    angle_name: &'static str,
    angle: &[f64],
    r: &[f64],
) -> PlotResult<(Field2, Field2)> {
    require_axis(angle_name, angle)?;
    require_axis("r", r)?;

    let (rows, cols) = (angle.len(), r.len());
    Ok((
        Field2::from_fn(rows, cols, |i, _| angle[i]),
        Field2::from_fn(rows, cols, |_, j| r[j]),
    ))
}

/// True when an azimuth axis covers the full circle with one step missing,
/// i.e. `phi[last] + step == phi[0] + 2 pi` for its first step.
///
/// Such axes need a wrap-around cell between the last and first samples.
pub fn is_periodic_azimuth(phi: &[f64]) -> bool {
    if phi.len() < 2 {
        return false;
    }
    let step = phi[1] - phi[0];
    if step <= 0.0 {
        return false;
    }
    let closing = phi[0] + 2.0 * PI - phi[phi.len() - 1];
    (closing - step).abs() < 0.5 * step
}
