//! 3D shell surfaces with vector glyphs.
//!
//! This crate only prepares a [`SurfaceScene`]: the selected shell as a
//! colored mesh, a 255-entry lookup table and the arrow glyphs. Drawing it
//! is the job of a [`SurfaceBackend`] supplied by the caller, so 2D users
//! never pull in a 3D renderer.

use crate::figure::Figure;
use plot_common::{Color, Colormap, Field2, Field3, Lut, PlotError, PlotResult, RenderConfig};
use tracing::debug;

/// Arrows are drawn at every 4th point along the first two grid dimensions.
pub const VECTOR_STRIDE: usize = 4;

/// Output canvas of a surface scene, in pixels.
pub const SURFACE_SIZE_PX: (u32, u32) = (800, 800);

/// Gray level of solid-shaded arrows.
pub const SOLID_ARROW_GRAY: f64 = 0.43;

/// Options of [`surface_3d`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceOptions {
    pub colormap: Colormap,
    /// Overlay the vector field as arrows.
    pub draw_vectors: bool,
    /// Arrow length per unit of vector magnitude.
    pub vector_scale: f64,
    /// Solid gray arrows instead of coloring them by magnitude.
    pub shade_solid: bool,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            colormap: Colormap::default(),
            draw_vectors: true,
            vector_scale: 0.01,
            shade_solid: true,
        }
    }
}

/// Cartesian coordinates, vector components and scalars of a 3D grid,
/// all shaped `[n0, n1, nr]`.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceFields<'a> {
    pub x: &'a Field3,
    pub y: &'a Field3,
    pub z: &'a Field3,
    pub ux: &'a Field3,
    pub uy: &'a Field3,
    pub uz: &'a Field3,
    pub data: &'a Field3,
}

impl SurfaceFields<'_> {
    fn validate(&self) -> PlotResult<[usize; 3]> {
        let shape = self.x.shape();
        for (name, field) in [
            ("y", self.y),
            ("z", self.z),
            ("ux", self.ux),
            ("uy", self.uy),
            ("uz", self.uz),
            ("data", self.data),
        ] {
            field.expect_shape(name, shape)?;
        }
        if shape[0] == 0 || shape[1] == 0 {
            return Err(PlotError::EmptyField);
        }
        Ok(shape)
    }
}

/// One radial shell as a structured quad mesh with per-vertex scalars.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMesh {
    pub x: Field2,
    pub y: Field2,
    pub z: Field2,
    pub scalars: Field2,
}

impl SurfaceMesh {
    pub fn shape(&self) -> [usize; 2] {
        self.x.shape()
    }

    #[inline]
    pub fn vertex(&self, i: usize, j: usize) -> [f64; 3] {
        [self.x.get(i, j), self.y.get(i, j), self.z.get(i, j)]
    }

    /// Finite scalar range, or `None` when no scalar is finite.
    pub fn scalar_range(&self) -> Option<(f64, f64)> {
        let mut finite = self.scalars.values().iter().copied().filter(|v| v.is_finite());
        let first = finite.next()?;
        Some(finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

/// A glyph anchored at `origin` pointing along `vector` (already scaled).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub origin: [f64; 3],
    pub vector: [f64; 3],
    /// Magnitude of the unscaled vector.
    pub magnitude: f64,
}

/// How arrows are colored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrowColor {
    Solid(Color),
    /// Through the scene lookup table over the arrows' magnitude range.
    ByMagnitude,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowField {
    pub arrows: Vec<Arrow>,
    pub color: ArrowColor,
}

impl ArrowField {
    /// `(min, max)` of the arrow magnitudes.
    pub fn magnitude_range(&self) -> Option<(f64, f64)> {
        let mut mags = self.arrows.iter().map(|a| a.magnitude);
        let first = mags.next()?;
        Some(mags.fold((first, first), |(lo, hi), m| (lo.min(m), hi.max(m))))
    }
}

/// Everything a backend needs to draw a surface figure.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceScene {
    pub mesh: SurfaceMesh,
    pub lut: Lut,
    pub arrows: Option<ArrowField>,
    pub size_px: (u32, u32),
}

/// A renderer able to turn a [`SurfaceScene`] into a figure.
pub trait SurfaceBackend {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    fn render(&self, scene: &SurfaceScene, config: &RenderConfig) -> PlotResult<Figure>;
}

/// Build the scene for shell `shell_index`.
pub fn build_surface_scene(
    fields: &SurfaceFields<'_>,
    shell_index: usize,
    options: &SurfaceOptions,
) -> PlotResult<SurfaceScene> {
    let shape = fields.validate()?;

    let mesh = SurfaceMesh {
        x: fields.x.shell(shell_index)?,
        y: fields.y.shell(shell_index)?,
        z: fields.z.shell(shell_index)?,
        scalars: fields.data.shell(shell_index)?,
    };
    let lut = Lut::sample(&options.colormap, Lut::SURFACE_SIZE);

    let arrows = options.draw_vectors.then(|| {
        let color = if options.shade_solid {
            ArrowColor::Solid(Color::from_unit_rgb(
                SOLID_ARROW_GRAY,
                SOLID_ARROW_GRAY,
                SOLID_ARROW_GRAY,
            ))
        } else {
            ArrowColor::ByMagnitude
        };
        ArrowField {
            arrows: subsample_arrows(fields, shape, options.vector_scale),
            color,
        }
    });

    debug!(
        shape = ?shape,
        shell_index,
        colormap = %options.colormap,
        arrows = arrows.as_ref().map_or(0, |a| a.arrows.len()),
        "Built surface scene"
    );

    Ok(SurfaceScene {
        mesh,
        lut,
        arrows,
        size_px: SURFACE_SIZE_PX,
    })
}

/// Arrows at every `VECTOR_STRIDE`-th point of the first two dimensions,
/// on every shell. Non-finite samples are skipped.
fn subsample_arrows(fields: &SurfaceFields<'_>, shape: [usize; 3], scale: f64) -> Vec<Arrow> {
    let mut arrows = Vec::new();
    for i in (0..shape[0]).step_by(VECTOR_STRIDE) {
        for j in (0..shape[1]).step_by(VECTOR_STRIDE) {
            for k in 0..shape[2] {
                let origin = [
                    fields.x.get(i, j, k),
                    fields.y.get(i, j, k),
                    fields.z.get(i, j, k),
                ];
                let u = [
                    fields.ux.get(i, j, k),
                    fields.uy.get(i, j, k),
                    fields.uz.get(i, j, k),
                ];
                if origin.iter().chain(u.iter()).any(|v| !v.is_finite()) {
                    continue;
                }
                arrows.push(Arrow {
                    origin,
                    vector: [u[0] * scale, u[1] * scale, u[2] * scale],
                    magnitude: (u[0] * u[0] + u[1] * u[1] + u[2] * u[2]).sqrt(),
                });
            }
        }
    }
    arrows
}

/// Render shell `shell_index` of a 3D grid through `backend`.
///
/// Without a backend the call fails with `BackendUnavailable` before any
/// input is inspected.
#[allow(clippy::too_many_arguments)]
pub fn surface_3d(
    backend: Option<&dyn SurfaceBackend>,
    x: &Field3,
    y: &Field3,
    z: &Field3,
    shell_index: usize,
    ux: &Field3,
    uy: &Field3,
    uz: &Field3,
    data: &Field3,
    options: &SurfaceOptions,
    config: &RenderConfig,
) -> PlotResult<Figure> {
    let backend = backend.ok_or_else(|| {
        PlotError::BackendUnavailable("no 3D surface backend configured".to_string())
    })?;

    let fields = SurfaceFields {
        x,
        y,
        z,
        ux,
        uy,
        uz,
        data,
    };
    let scene = build_surface_scene(&fields, shell_index, options)?;
    debug!(backend = backend.name(), "Rendering surface scene");
    backend.render(&scene, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(shape: [usize; 3], value: f64) -> Field3 {
        Field3::from_fn(shape, |_, _, _| value)
    }

    #[test]
    fn test_default_options() {
        let options = SurfaceOptions::default();
        assert_eq!(options.colormap.to_string(), "seismic");
        assert!(options.draw_vectors && options.shade_solid);
        assert_eq!(options.vector_scale, 0.01);
    }

    #[test]
    fn test_arrow_stride_on_first_two_dims() {
        let shape = [9, 5, 2];
        let (x, u) = (cube(shape, 1.0), cube(shape, 2.0));
        let fields = SurfaceFields {
            x: &x,
            y: &x,
            z: &x,
            ux: &u,
            uy: &u,
            uz: &u,
            data: &x,
        };
        let scene = build_surface_scene(&fields, 1, &SurfaceOptions::default()).unwrap();
        let arrows = scene.arrows.unwrap();
        // i in {0, 4, 8}, j in {0, 4}, every shell
        assert_eq!(arrows.arrows.len(), 3 * 2 * 2);
        assert_eq!(arrows.arrows[0].vector, [0.02, 0.02, 0.02]);
        assert_eq!(arrows.color, ArrowColor::Solid(Color::new(110, 110, 110, 255)));
        assert_eq!(scene.lut.len(), 255);
        assert_eq!(scene.mesh.shape(), [9, 5]);
    }

    #[test]
    fn test_magnitude_coloring_without_shade() {
        let shape = [4, 4, 1];
        let x = cube(shape, 0.0);
        let fields = SurfaceFields {
            x: &x,
            y: &x,
            z: &x,
            ux: &x,
            uy: &x,
            uz: &x,
            data: &x,
        };
        let options = SurfaceOptions {
            shade_solid: false,
            ..SurfaceOptions::default()
        };
        let scene = build_surface_scene(&fields, 0, &options).unwrap();
        assert_eq!(scene.arrows.unwrap().color, ArrowColor::ByMagnitude);

        let options = SurfaceOptions {
            draw_vectors: false,
            ..SurfaceOptions::default()
        };
        assert!(build_surface_scene(&fields, 0, &options).unwrap().arrows.is_none());
    }

    #[test]
    fn test_scalar_range_skips_nan() {
        let mesh = SurfaceMesh {
            x: Field2::filled(1, 3, 0.0),
            y: Field2::filled(1, 3, 0.0),
            z: Field2::filled(1, 3, 0.0),
            scalars: Field2::new(1, 3, vec![f64::NAN, -2.0, 5.0]).unwrap(),
        };
        assert_eq!(mesh.scalar_range(), Some((-2.0, 5.0)));
    }
}
