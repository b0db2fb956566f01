//! Pseudocolor rendering of fields on projected meshes.

use crate::figure::Figure;
use plot_common::{Color, Colormap, DivergingNorm, Field2, PlotError, PlotResult};
use projection::ProjectedCoords;

/// Colormap plus the norm that maps field values onto it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub colormap: Colormap,
    pub norm: DivergingNorm,
}

impl ColorScale {
    pub fn new(colormap: Colormap, norm: DivergingNorm) -> Self {
        Self { colormap, norm }
    }

    /// Color of a field value; NaN is transparent.
    pub fn color_for(&self, value: f64) -> Color {
        self.colormap.color(self.norm.normalize(value))
    }
}

/// Mesh of projected vertices; `None` marks a vertex the projection cannot
/// show (e.g. the far side of an orthographic globe).
#[derive(Debug, Clone, PartialEq)]
pub struct PlotMesh {
    rows: usize,
    cols: usize,
    points: Vec<Option<(f64, f64)>>,
    max_span: Option<f64>,
}

impl PlotMesh {
    /// Build a mesh by projecting every `(row, col)` vertex.
    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(usize, usize) -> Option<(f64, f64)>,
    ) -> Self {
        let mut points = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                points.push(f(i, j));
            }
        }
        Self {
            rows,
            cols,
            points,
            max_span: None,
        }
    }

    /// Drop cells wider than `span` in x, i.e. cells torn across a map seam.
    pub fn with_max_span(mut self, span: f64) -> Self {
        self.max_span = Some(span);
        self
    }

    /// Mesh where every projected coordinate is drawable.
    pub fn from_coords(coords: &ProjectedCoords) -> Self {
        let [rows, cols] = coords.shape();
        Self::from_fn(rows, cols, |i, j| Some(coords.point(i, j)))
    }

    pub fn shape(&self) -> [usize; 2] {
        [self.rows, self.cols]
    }

    #[inline]
    pub fn point(&self, row: usize, col: usize) -> Option<(f64, f64)> {
        self.points[row * self.cols + col]
    }

    /// Corners of cell `(i, j)` in ring order, if all are drawable.
    pub fn cell(&self, i: usize, j: usize) -> Option<[(f64, f64); 4]> {
        let corners = [
            self.point(i, j)?,
            self.point(i, j + 1)?,
            self.point(i + 1, j + 1)?,
            self.point(i + 1, j)?,
        ];
        if let Some(span) = self.max_span {
            let xs = corners.iter().map(|p| p.0);
            let lo = xs.clone().fold(f64::INFINITY, f64::min);
            let hi = xs.fold(f64::NEG_INFINITY, f64::max);
            if hi - lo > span {
                return None;
            }
        }
        Some(corners)
    }

    /// Fail with `ShapeMismatch` unless `values` matches the mesh.
    pub fn check_values(&self, values: &Field2) -> PlotResult<()> {
        if values.shape() != self.shape() {
            return Err(PlotError::shape_mismatch("field", &self.shape(), &values.shape()));
        }
        Ok(())
    }
}

/// Flat-shaded quadrilateral cells (pcolormesh style).
///
/// Each cell spans four neighbouring vertices and takes the color of the mean
/// of their values. Cells with a hidden corner or a NaN corner are skipped.
/// Returns the number of cells filled.
pub fn fill_cells(
    figure: &mut Figure,
    mesh: &PlotMesh,
    values: &Field2,
    scale: &ColorScale,
) -> PlotResult<usize> {
    mesh.check_values(values)?;
    let [rows, cols] = mesh.shape();
    let mut filled = 0;

    for i in 0..rows.saturating_sub(1) {
        for j in 0..cols.saturating_sub(1) {
            let Some(corners) = mesh.cell(i, j) else {
                continue;
            };
            let mean = (values.get(i, j)
                + values.get(i, j + 1)
                + values.get(i + 1, j + 1)
                + values.get(i + 1, j))
                / 4.0;
            if mean.is_nan() {
                continue;
            }
            figure.fill_polygon(&corners, scale.color_for(mean))?;
            filled += 1;
        }
    }

    tracing::debug!(rows, cols, filled, "Filled pseudocolor cells");
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plot_common::{Bounds, ColormapKind, RenderConfig};

    fn scale() -> ColorScale {
        ColorScale::new(Colormap::new(ColormapKind::Bwr), DivergingNorm::symmetric(1.0))
    }

    #[test]
    fn test_color_for_centre_is_white() {
        assert_eq!(scale().color_for(0.0), Color::WHITE);
        assert_eq!(scale().color_for(-1.0), Color::new(0, 0, 255, 255));
        assert!(scale().color_for(f64::NAN).is_transparent());
    }

    #[test]
    fn test_cell_requires_all_corners() {
        let mesh = PlotMesh::from_fn(2, 2, |i, j| {
            if (i, j) == (1, 1) {
                None
            } else {
                Some((j as f64, i as f64))
            }
        });
        assert!(mesh.cell(0, 0).is_none());
    }

    #[test]
    fn test_cell_across_seam_dropped() {
        let mesh = PlotMesh::from_fn(2, 2, |i, j| {
            let x = if i == 1 { -10.0 } else { 10.0 };
            Some((x, j as f64))
        });
        assert!(mesh.cell(0, 0).is_some());
        assert!(mesh.clone().with_max_span(5.0).cell(0, 0).is_none());
    }

    #[test]
    fn test_fill_cells_counts_and_colors() {
        let config = RenderConfig::default();
        let mut fig = Figure::with_pixels(40, 40, &config).unwrap();
        fig.set_view(Bounds::new(0.0, 0.0, 2.0, 2.0), 0.0).unwrap();

        let mesh = PlotMesh::from_fn(3, 3, |i, j| Some((j as f64, i as f64)));
        let values = Field2::filled(3, 3, 1.0);
        let filled = fill_cells(&mut fig, &mesh, &values, &scale()).unwrap();
        assert_eq!(filled, 4);
        assert_eq!(fig.pixel(10, 10), Some(Color::new(255, 0, 0, 255)));
    }

    #[test]
    fn test_fill_cells_shape_mismatch() {
        let config = RenderConfig::default();
        let mut fig = Figure::with_pixels(10, 10, &config).unwrap();
        fig.set_view(Bounds::new(0.0, 0.0, 1.0, 1.0), 0.0).unwrap();
        let mesh = PlotMesh::from_fn(2, 2, |i, j| Some((j as f64, i as f64)));
        let values = Field2::filled(3, 2, 0.0);
        assert!(fill_cells(&mut fig, &mesh, &values, &scale()).is_err());
    }
}
