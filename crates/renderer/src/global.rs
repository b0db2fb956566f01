//! Global maps of one radial shell.
//!
//! The shell is re-expressed in longitude/latitude, projected through a
//! [`MapProjection`] and filled either cell by cell (orthographic) or with
//! filled contour bands (Mollweide). Dotted gridlines and a vector overlay
//! are optional.

use crate::contour::{fill_contours, Levels};
use crate::figure::{Figure, LineStyle};
use crate::gradient::{fill_cells, ColorScale, PlotMesh};
use plot_common::{Colormap, DivergingNorm, Field2, Field3, PlotResult, RenderConfig};
use projection::{
    expand_grid, geographic, is_periodic_azimuth, to_lon_lat, MapFill, MapProjection,
    ProjectedCoords,
};
use tracing::{debug, warn};

/// Spacing of meridians and parallels.
const GRID_SPACING_DEG: usize = 30;

/// Longest arrow as a fraction of the map width.
const ARROW_LENGTH_FRACTION: f64 = 0.04;

/// Geographic offset used to find an arrow's projected direction.
const PROBE_DEG: f64 = 0.5;

/// Samples along the map boundary.
const OUTLINE_POINTS: usize = 360;

/// Horizontal velocity components of a shell, drawn as arrows.
#[derive(Debug, Clone, Copy)]
pub struct MapVectors<'a> {
    /// Azimuthal (eastward) component, shaped like the data.
    pub u_phi: &'a Field3,
    /// Colatitudinal (southward) component, shaped like the data.
    pub u_theta: &'a Field3,
    /// Draw every `stride`-th point along both angular axes.
    pub stride: usize,
}

/// Everything `render_map` needs besides the grid and the data.
#[derive(Debug, Clone)]
pub struct MapOptions<'a> {
    pub shell_index: usize,
    pub draw_grid: bool,
    pub levels: Levels,
    pub colormap: Colormap,
    pub projection: MapProjection,
    pub vectors: Option<MapVectors<'a>>,
}

impl MapOptions<'_> {
    pub fn new(projection: MapProjection) -> Self {
        Self {
            shell_index: 0,
            draw_grid: false,
            levels: Levels::default(),
            colormap: Colormap::default(),
            projection,
            vectors: None,
        }
    }
}

/// Render shell `shell_index` of a `[phi, theta, r]` field on a global map.
#[allow(clippy::too_many_arguments)]
pub fn rad_contour(
    theta: &[f64],
    phi: &[f64],
    data: &Field3,
    shell_index: usize,
    draw_grid: bool,
    levels: &Levels,
    colormap: Colormap,
    projection: MapProjection,
    config: &RenderConfig,
) -> PlotResult<Figure> {
    let options = MapOptions {
        shell_index,
        draw_grid,
        levels: levels.clone(),
        colormap,
        projection,
        vectors: None,
    };
    render_map(theta, phi, data, &options, config)
}

/// Render a global map with the full set of options.
pub fn render_map(
    theta: &[f64],
    phi: &[f64],
    data: &Field3,
    options: &MapOptions<'_>,
    config: &RenderConfig,
) -> PlotResult<Figure> {
    let grid = expand_grid(theta, phi)?;
    let [nphi, ntheta] = grid.shape();
    let shape = [nphi, ntheta, data.shape()[2]];
    data.expect_shape("data", shape)?;
    if let Some(vectors) = &options.vectors {
        vectors.u_phi.expect_shape("u_phi", shape)?;
        vectors.u_theta.expect_shape("u_theta", shape)?;
    }

    let shell = data.shell(options.shell_index)?;
    let norm = DivergingNorm::from_values(shell.values())?;
    if norm.is_degenerate() {
        warn!(
            shell_index = options.shell_index,
            "Shell is identically zero, every value maps to the colormap centre"
        );
    }

    let proj = options.projection;
    debug!(
        projection = %proj,
        nphi,
        ntheta,
        shell_index = options.shell_index,
        vmax = norm.vmax,
        "Rendering global map"
    );

    let (mut coords, mut values) = (geographic(&grid), shell);
    if is_periodic_azimuth(phi) {
        coords = wrap_longitude(&coords);
        values = values.with_wrapped_row();
    }

    let (width_in, height_in) = proj.figure_size();
    let mut figure = Figure::new(width_in, height_in, config)?;
    figure.set_view(proj.bounds(), config.pad_fraction)?;

    let [rows, cols] = coords.shape();
    let mut mesh = PlotMesh::from_fn(rows, cols, |i, j| {
        let (lon, lat) = coords.point(i, j);
        proj.project(lon, lat)
    });
    if let MapProjection::Mollweide(_) = proj {
        mesh = mesh.with_max_span(proj.bounds().width() / 2.0);
    }

    let scale = ColorScale::new(options.colormap, norm);
    match proj.fill() {
        MapFill::Pseudocolor => {
            fill_cells(&mut figure, &mesh, &values, &scale)?;
        }
        MapFill::FilledContour => {
            let levels = options.levels.resolve(&norm)?;
            fill_contours(&mut figure, &mesh, &values, &levels, &scale)?;
        }
    }

    if options.draw_grid {
        draw_gridlines(&mut figure, &proj, config)?;
    }
    if let Some(vectors) = &options.vectors {
        draw_vectors(&mut figure, &proj, theta, phi, vectors, options.shell_index, config)?;
    }

    Ok(figure)
}

/// Close a periodic longitude mesh with a row at `lon[0] + 360`.
fn wrap_longitude(coords: &ProjectedCoords) -> ProjectedCoords {
    let wrapped = coords.with_wrapped_row();
    let [rows, cols] = wrapped.shape();
    let x = Field2::from_fn(rows, cols, |i, j| {
        let lon = wrapped.x.get(i, j);
        if i == rows - 1 {
            lon + 360.0
        } else {
            lon
        }
    });
    ProjectedCoords { x, y: wrapped.y }
}

/// Dotted meridians and parallels every 30 degrees, closed by the solid
/// map boundary.
fn draw_gridlines(
    figure: &mut Figure,
    proj: &MapProjection,
    config: &RenderConfig,
) -> PlotResult<usize> {
    let style = LineStyle::dotted(config.grid_color()?, config.points_to_px(config.grid_width));
    let boundary = LineStyle::solid(config.line_color()?, config.points_to_px(config.line_width));
    figure.stroke_polyline(&proj.outline(OUTLINE_POINTS), boundary, true)?;
    let mut lines = 1;

    for lon in (-180..180).step_by(GRID_SPACING_DEG) {
        let samples = (0..=180).map(|k| (lon as f64, -90.0 + k as f64));
        lines += stroke_projected(figure, proj, samples, style)?;
    }
    for lat in (-60..=60).step_by(GRID_SPACING_DEG) {
        let samples = (0..=360).map(|k| (-180.0 + k as f64, lat as f64));
        lines += stroke_projected(figure, proj, samples, style)?;
    }

    debug!(lines, "Drew map gridlines");
    Ok(lines)
}

/// Stroke a lon/lat curve, breaking it wherever the projection hides a point.
fn stroke_projected(
    figure: &mut Figure,
    proj: &MapProjection,
    samples: impl Iterator<Item = (f64, f64)>,
    style: LineStyle,
) -> PlotResult<usize> {
    let mut run = Vec::new();
    let mut drawn = 0;
    for (lon, lat) in samples {
        match proj.project(lon, lat) {
            Some(p) => run.push(p),
            None => {
                if run.len() >= 2 {
                    figure.stroke_polyline(&run, style, false)?;
                    drawn += 1;
                }
                run.clear();
            }
        }
    }
    if run.len() >= 2 {
        figure.stroke_polyline(&run, style, false)?;
        drawn += 1;
    }
    Ok(drawn)
}

/// Arrows of `(u_phi, -u_theta)` at strided grid points, scaled so the
/// strongest one is `ARROW_LENGTH_FRACTION` of the map width.
fn draw_vectors(
    figure: &mut Figure,
    proj: &MapProjection,
    theta: &[f64],
    phi: &[f64],
    vectors: &MapVectors<'_>,
    shell_index: usize,
    config: &RenderConfig,
) -> PlotResult<usize> {
    let u_phi = vectors.u_phi.shell(shell_index)?;
    let u_theta = vectors.u_theta.shell(shell_index)?;
    let stride = vectors.stride.max(1);

    let max_mag = u_phi
        .values()
        .iter()
        .zip(u_theta.values())
        .map(|(a, b)| a.hypot(*b))
        .filter(|m| m.is_finite())
        .fold(0.0f64, f64::max);
    if max_mag == 0.0 {
        debug!(shell_index, "Vector field is zero, no arrows drawn");
        return Ok(0);
    }

    let map_width = proj.bounds().width();
    let arrow_len = ARROW_LENGTH_FRACTION * map_width;
    let color = config.vector_color()?;
    let width = config.points_to_px(config.line_width);
    let mut drawn = 0;

    for i in (0..phi.len()).step_by(stride) {
        for j in (0..theta.len()).step_by(stride) {
            let (up, ut) = (u_phi.get(i, j), u_theta.get(i, j));
            let mag = up.hypot(ut);
            if !(mag > 0.0) || !mag.is_finite() {
                continue;
            }

            let (lon, lat) = to_lon_lat(phi[i], theta[j]);
            let Some(tail) = proj.project(lon, lat) else {
                continue;
            };
            let cos_lat = lat.to_radians().cos().max(1e-3);
            let probe_lon = lon + PROBE_DEG * up / (mag * cos_lat);
            let probe_lat = (lat - PROBE_DEG * ut / mag).clamp(-90.0, 90.0);
            let Some(probe) = proj.project(probe_lon, probe_lat) else {
                continue;
            };

            let (dx, dy) = (probe.0 - tail.0, probe.1 - tail.1);
            let d = dx.hypot(dy);
            // zero, or torn across the map seam
            if d == 0.0 || d > map_width / 4.0 {
                continue;
            }
            let len = arrow_len * mag / max_mag;
            let tip = (tail.0 + dx / d * len, tail.1 + dy / d * len);
            figure.draw_arrow(tail, tip, color, width)?;
            drawn += 1;
        }
    }

    debug!(arrows = drawn, stride, "Drew map vectors");
    Ok(drawn)
}
