//! Meridional (r-theta) and equatorial (r-phi) cross-sections.

use crate::contour::{fill_contours, Levels};
use crate::figure::{Figure, LineStyle};
use crate::gradient::{ColorScale, PlotMesh};
use plot_common::{Colormap, DivergingNorm, Field2, PlotResult, RenderConfig};
use projection::{equatorial, is_periodic_azimuth, meridional, ProjectedCoords};
use tracing::{debug, warn};

/// Meridional figure size in inches.
pub const MERIDIONAL_SIZE: (f32, f32) = (5.0, 10.0);

/// Equatorial figure size in inches.
pub const EQUATORIAL_SIZE: (f32, f32) = (10.0, 10.0);

/// Filled contours of a `[theta, r]` slice in the meridional half-plane.
///
/// The inner and outer shells are outlined and the polar axis is drawn
/// between them, above and below the equator.
pub fn mer_contour(
    r: &[f64],
    theta: &[f64],
    data: &Field2,
    levels: &Levels,
    colormap: Colormap,
    config: &RenderConfig,
) -> PlotResult<Figure> {
    let coords = meridional(r, theta)?;
    data.expect_shape("data", theta.len(), r.len())?;

    let mut figure = contour_slice(&coords, data, levels, colormap, MERIDIONAL_SIZE, config)?;

    let style = boundary_style(config)?;
    for &radius in [r[0], r[r.len() - 1]].iter() {
        let arc: Vec<(f64, f64)> = theta
            .iter()
            .map(|t| (radius * t.sin(), radius * t.cos()))
            .collect();
        figure.stroke_polyline(&arc, style, false)?;
    }

    let r_min = r.iter().copied().fold(f64::INFINITY, f64::min);
    let r_max = r.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    figure.stroke_polyline(&[(0.0, r_min), (0.0, r_max)], style, false)?;
    figure.stroke_polyline(&[(0.0, -r_max), (0.0, -r_min)], style, false)?;

    debug!(ntheta = theta.len(), nr = r.len(), "Rendered meridional slice");
    Ok(figure)
}

/// Filled contours of a `[phi, r]` slice in the equatorial plane.
///
/// The inner and outer shells are outlined. A periodic azimuth axis is closed
/// so the last sector joins the first.
pub fn eq_contour(
    r: &[f64],
    phi: &[f64],
    data: &Field2,
    levels: &Levels,
    colormap: Colormap,
    config: &RenderConfig,
) -> PlotResult<Figure> {
    let coords = equatorial(r, phi)?;
    data.expect_shape("data", phi.len(), r.len())?;

    let periodic = is_periodic_azimuth(phi);
    let mut figure = if periodic {
        contour_slice(
            &coords.with_wrapped_row(),
            &data.with_wrapped_row(),
            levels,
            colormap,
            EQUATORIAL_SIZE,
            config,
        )?
    } else {
        contour_slice(&coords, data, levels, colormap, EQUATORIAL_SIZE, config)?
    };

    let style = boundary_style(config)?;
    for &radius in [r[0], r[r.len() - 1]].iter() {
        let circle: Vec<(f64, f64)> = phi
            .iter()
            .map(|p| (radius * p.cos(), radius * p.sin()))
            .collect();
        figure.stroke_polyline(&circle, style, periodic)?;
    }

    debug!(nphi = phi.len(), nr = r.len(), periodic, "Rendered equatorial slice");
    Ok(figure)
}

fn boundary_style(config: &RenderConfig) -> PlotResult<LineStyle> {
    Ok(LineStyle::solid(
        config.line_color()?,
        config.points_to_px(config.line_width),
    ))
}

/// Norm, figure, view and filled contours shared by both slices.
fn contour_slice(
    coords: &ProjectedCoords,
    values: &Field2,
    levels: &Levels,
    colormap: Colormap,
    (width_in, height_in): (f32, f32),
    config: &RenderConfig,
) -> PlotResult<Figure> {
    let norm = DivergingNorm::from_values(values.values())?;
    if norm.is_degenerate() {
        warn!("Slice is identically zero, every value maps to the colormap centre");
    }
    debug!(vmax = norm.vmax, shape = ?values.shape(), "Contouring slice");

    let mut figure = Figure::new(width_in, height_in, config)?;
    figure.set_view(coords.bounds(), config.pad_fraction)?;

    let levels = levels.resolve(&norm)?;
    let mesh = PlotMesh::from_coords(coords);
    fill_contours(
        &mut figure,
        &mesh,
        values,
        &levels,
        &ColorScale::new(colormap, norm),
    )?;
    Ok(figure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plot_common::PlotError;
    use std::f64::consts::PI;

    fn config() -> RenderConfig {
        RenderConfig {
            dpi: 10.0,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn test_meridional_size_and_boundaries() {
        let r = [0.5, 0.75, 1.0];
        let theta: Vec<f64> = (0..9).map(|j| PI * j as f64 / 8.0).collect();
        let data = Field2::from_fn(9, 3, |j, k| (theta[j]).cos() * r[k]);

        let fig = mer_contour(&r, &theta, &data, &Levels::Count(11), Colormap::default(), &config())
            .unwrap();
        assert_eq!((fig.width(), fig.height()), (50, 100));
        // two arcs and two axis segments on top of the fill
        assert!(fig.primitive_count() > 4);
    }

    #[test]
    fn test_meridional_shape_mismatch() {
        let r = [0.5, 1.0];
        let theta = [0.0, 1.0, 2.0];
        let data = Field2::filled(2, 3, 0.0);
        let err = mer_contour(&r, &theta, &data, &Levels::Count(5), Colormap::default(), &config())
            .unwrap_err();
        assert!(matches!(err, PlotError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_equatorial_periodic_closes_ring() {
        let r = [0.5, 1.0];
        let phi: Vec<f64> = (0..16).map(|i| 2.0 * PI * i as f64 / 16.0).collect();
        let data = Field2::from_fn(16, 2, |i, _| phi[i].sin());

        let fig = eq_contour(&r, &phi, &data, &Levels::Count(7), Colormap::default(), &config())
            .unwrap();
        assert_eq!((fig.width(), fig.height()), (100, 100));
        // Centre of the annulus hole stays background.
        assert_eq!(fig.pixel(50, 50), Some(plot_common::Color::WHITE));
    }

    #[test]
    fn test_equatorial_empty_axis() {
        let data = Field2::filled(0, 0, 0.0);
        let err = eq_contour(&[], &[0.0], &data, &Levels::Count(3), Colormap::default(), &config())
            .unwrap_err();
        assert!(matches!(err, PlotError::EmptyAxis("r")));
    }
}
