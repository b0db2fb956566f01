//! Filled contour (contourf) rendering on projected meshes.
//!
//! Every mesh cell is split into two triangles. The field is linear inside a
//! triangle, so the region where `lo <= value <= hi` is a convex polygon
//! obtained by clipping the triangle against both level planes. Each band
//! polygon is filled with the color of the band's midpoint value.

use crate::figure::Figure;
use crate::gradient::{ColorScale, PlotMesh};
use plot_common::{DivergingNorm, Field2, PlotError, PlotResult};

/// Contour levels: explicit boundaries or a number of evenly spaced ones.
#[derive(Debug, Clone, PartialEq)]
pub enum Levels {
    /// `n` levels spread evenly over the norm's `[vmin, vmax]`.
    Count(usize),
    /// Explicit level boundaries (sorted and deduplicated on use).
    Values(Vec<f64>),
}

impl Default for Levels {
    fn default() -> Self {
        Levels::Count(65)
    }
}

impl From<Vec<f64>> for Levels {
    fn from(values: Vec<f64>) -> Self {
        Levels::Values(values)
    }
}

impl From<usize> for Levels {
    fn from(count: usize) -> Self {
        Levels::Count(count)
    }
}

impl Levels {
    /// Concrete, strictly increasing level boundaries for a norm.
    ///
    /// A degenerate (zero-width) norm with `Count` yields a single level,
    /// which bounds no band.
    pub fn resolve(&self, norm: &DivergingNorm) -> PlotResult<Vec<f64>> {
        let mut levels = match self {
            Levels::Count(n) => {
                if norm.is_degenerate() {
                    vec![norm.vcenter]
                } else {
                    linspace(norm.vmin, norm.vmax, (*n).max(2))
                }
            }
            Levels::Values(values) => {
                if values.iter().any(|v| !v.is_finite()) {
                    return Err(PlotError::render("contour levels must be finite"));
                }
                values.clone()
            }
        };
        levels.sort_by(|a, b| a.total_cmp(b));
        levels.dedup();
        Ok(levels)
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Generate contour levels at multiples of `interval` within `[min_value, max_value]`.
pub fn generate_contour_levels(min_value: f64, max_value: f64, interval: f64) -> Vec<f64> {
    if interval <= 0.0 || max_value <= min_value {
        return vec![];
    }

    let first = (min_value / interval).ceil() as i64;
    let last = (max_value / interval).floor() as i64;
    (first..=last).map(|k| k as f64 * interval).collect()
}

/// A polygon vertex carrying the field value at that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValuePoint {
    pub x: f64,
    pub y: f64,
    pub v: f64,
}

impl ValuePoint {
    pub fn new(x: f64, y: f64, v: f64) -> Self {
        Self { x, y, v }
    }

    fn lerp_to(&self, other: &ValuePoint, level: f64) -> ValuePoint {
        let dv = other.v - self.v;
        let t = if dv.abs() < f64::EPSILON {
            0.5
        } else {
            ((level - self.v) / dv).clamp(0.0, 1.0)
        };
        ValuePoint {
            x: self.x + t * (other.x - self.x),
            y: self.y + t * (other.y - self.y),
            v: level,
        }
    }
}

/// Clip a convex polygon to the half-space selected by `keep`.
fn clip(poly: &[ValuePoint], level: f64, keep: impl Fn(f64) -> bool) -> Vec<ValuePoint> {
    let mut out = Vec::with_capacity(poly.len() + 2);
    for (k, current) in poly.iter().enumerate() {
        let next = &poly[(k + 1) % poly.len()];
        let (cur_in, next_in) = (keep(current.v), keep(next.v));
        if cur_in {
            out.push(*current);
        }
        if cur_in != next_in {
            out.push(current.lerp_to(next, level));
        }
    }
    out
}

/// Region of a triangle with `lo < value <= hi`, as a polygon (possibly empty).
///
/// With `closed_below` the lower bound is inclusive, as for the lowest band.
pub fn band_polygon(
    triangle: &[ValuePoint; 3],
    lo: f64,
    hi: f64,
    closed_below: bool,
) -> Vec<ValuePoint> {
    let above = if closed_below {
        clip(triangle, lo, |v| v >= lo)
    } else {
        clip(triangle, lo, |v| v > lo)
    };
    if above.len() < 3 {
        return vec![];
    }
    let band = clip(&above, hi, |v| v <= hi);
    if band.len() < 3 {
        return vec![];
    }
    band
}

/// Fill the bands between consecutive `levels` over a projected mesh.
///
/// Values outside `[levels[0], levels[last]]` stay unfilled. Returns the number
/// of band polygons drawn.
pub fn fill_contours(
    figure: &mut Figure,
    mesh: &PlotMesh,
    values: &Field2,
    levels: &[f64],
    scale: &ColorScale,
) -> PlotResult<usize> {
    mesh.check_values(values)?;
    if levels.len() < 2 {
        tracing::warn!(num_levels = levels.len(), "Fewer than two contour levels, nothing to fill");
        return Ok(0);
    }

    let band_colors: Vec<_> = levels
        .windows(2)
        .map(|w| scale.color_for(0.5 * (w[0] + w[1])))
        .collect();

    let [rows, cols] = mesh.shape();
    let mut drawn = 0;

    for i in 0..rows.saturating_sub(1) {
        for j in 0..cols.saturating_sub(1) {
            let Some([p00, p01, p11, p10]) = mesh.cell(i, j) else {
                continue;
            };
            let vp = |p: (f64, f64), v: f64| ValuePoint::new(p.0, p.1, v);
            let corners = [
                vp(p00, values.get(i, j)),
                vp(p01, values.get(i, j + 1)),
                vp(p11, values.get(i + 1, j + 1)),
                vp(p10, values.get(i + 1, j)),
            ];
            if corners.iter().any(|c| c.v.is_nan()) {
                continue;
            }

            for tri in [
                [corners[0], corners[1], corners[2]],
                [corners[0], corners[2], corners[3]],
            ] {
                let tmin = tri.iter().map(|c| c.v).fold(f64::INFINITY, f64::min);
                let tmax = tri.iter().map(|c| c.v).fold(f64::NEG_INFINITY, f64::max);

                for (band, w) in levels.windows(2).enumerate() {
                    let (lo, hi) = (w[0], w[1]);
                    if hi < tmin || lo > tmax {
                        continue;
                    }
                    let poly = band_polygon(&tri, lo, hi, band == 0);
                    if poly.is_empty() {
                        continue;
                    }
                    let pts: Vec<(f64, f64)> = poly.iter().map(|p| (p.x, p.y)).collect();
                    figure.fill_polygon(&pts, band_colors[band])?;
                    drawn += 1;
                }
            }
        }
    }

    tracing::debug!(
        rows,
        cols,
        num_levels = levels.len(),
        polygons = drawn,
        "Filled contour bands"
    );
    Ok(drawn)
}
