//! Software 3D backend for shell surface figures.
//!
//! Projects a [`SurfaceScene`] orthographically from a configurable viewpoint,
//! shades each mesh quad with a headlight and paints quads and arrows back to
//! front onto a 2D [`Figure`].

mod camera;

pub use camera::Camera;

use plot_common::{Bounds, Color, PlotResult, RenderConfig};
use renderer::{ArrowColor, Figure, SurfaceBackend, SurfaceScene};
use tracing::debug;

/// Minimum brightness of a quad seen edge-on.
const AMBIENT: f64 = 0.35;

/// Renders surface scenes without any GPU or windowing dependency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoftwareSurfaceBackend {
    pub camera: Camera,
}

impl SoftwareSurfaceBackend {
    pub fn new(camera: Camera) -> Self {
        Self { camera }
    }
}

impl Default for SoftwareSurfaceBackend {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}

/// A projected primitive waiting to be painted.
enum Shape {
    Quad([(f64, f64); 4]),
    Arrow { tail: (f64, f64), tip: (f64, f64) },
}

struct Primitive {
    depth: f64,
    color: Color,
    shape: Shape,
}

impl SurfaceBackend for SoftwareSurfaceBackend {
    fn name(&self) -> &str {
        "software"
    }

    fn render(&self, scene: &SurfaceScene, config: &RenderConfig) -> PlotResult<Figure> {
        let (width, height) = scene.size_px;
        let mut figure = Figure::with_pixels(width, height, config)?;

        let mut primitives = mesh_primitives(scene, &self.camera);
        let quads = primitives.len();
        primitives.extend(arrow_primitives(scene, &self.camera));

        let mut bounds = Bounds::empty();
        for p in &primitives {
            match &p.shape {
                Shape::Quad(points) => points.iter().for_each(|&(x, y)| bounds.extend(x, y)),
                Shape::Arrow { tail, tip } => {
                    bounds.extend(tail.0, tail.1);
                    bounds.extend(tip.0, tip.1);
                }
            }
        }
        if bounds.is_empty() {
            debug!("Surface scene has no drawable geometry");
            return Ok(figure);
        }
        figure.set_view(bounds, config.pad_fraction)?;

        // Painter's algorithm: farthest first.
        primitives.sort_by(|a, b| a.depth.total_cmp(&b.depth));

        let arrow_width = config.points_to_px(config.line_width);
        for p in &primitives {
            match p.shape {
                Shape::Quad(points) => figure.fill_polygon(&points, p.color)?,
                Shape::Arrow { tail, tip } => figure.draw_arrow(tail, tip, p.color, arrow_width)?,
            }
        }

        debug!(
            quads,
            arrows = primitives.len() - quads,
            azimuth = self.camera.azimuth_deg,
            elevation = self.camera.elevation_deg,
            "Rendered surface scene"
        );
        Ok(figure)
    }
}

/// Shaded quads of the shell mesh, colored through the scene LUT over the
/// finite scalar range.
fn mesh_primitives(scene: &SurfaceScene, camera: &Camera) -> Vec<Primitive> {
    let mesh = &scene.mesh;
    let [rows, cols] = mesh.shape();
    let Some((lo, hi)) = mesh.scalar_range() else {
        return Vec::new();
    };
    let unit = |v: f64| if hi > lo { (v - lo) / (hi - lo) } else { 0.5 };

    let mut out = Vec::with_capacity(rows.saturating_sub(1) * cols.saturating_sub(1));
    for i in 0..rows.saturating_sub(1) {
        for j in 0..cols.saturating_sub(1) {
            let ids = [(i, j), (i, j + 1), (i + 1, j + 1), (i + 1, j)];
            let corners = ids.map(|(a, b)| camera.to_view(mesh.vertex(a, b)));
            if corners.iter().any(|c| !c.iter().all(|v| v.is_finite())) {
                continue;
            }
            let mean = ids.iter().map(|&(a, b)| mesh.scalars.get(a, b)).sum::<f64>() / 4.0;
            if mean.is_nan() {
                continue;
            }

            let brightness = AMBIENT + (1.0 - AMBIENT) * facing(&corners);
            out.push(Primitive {
                depth: corners.iter().map(|c| c.z).sum::<f64>() / 4.0,
                color: shade(scene.lut.lookup(unit(mean)), brightness),
                shape: Shape::Quad(corners.map(|c| (c.x, c.y))),
            });
        }
    }
    out
}

fn arrow_primitives(scene: &SurfaceScene, camera: &Camera) -> Vec<Primitive> {
    let Some(field) = &scene.arrows else {
        return Vec::new();
    };
    let (lo, hi) = field.magnitude_range().unwrap_or((0.0, 0.0));

    field
        .arrows
        .iter()
        .map(|arrow| {
            let tail = camera.to_view(arrow.origin);
            let tip = camera.to_view([
                arrow.origin[0] + arrow.vector[0],
                arrow.origin[1] + arrow.vector[1],
                arrow.origin[2] + arrow.vector[2],
            ]);
            let color = match field.color {
                ArrowColor::Solid(color) => color,
                ArrowColor::ByMagnitude => {
                    let t = if hi > lo { (arrow.magnitude - lo) / (hi - lo) } else { 0.5 };
                    scene.lut.lookup(t)
                }
            };
            Primitive {
                depth: 0.5 * (tail.z + tip.z),
                color,
                shape: Shape::Arrow {
                    tail: (tail.x, tail.y),
                    tip: (tip.x, tip.y),
                },
            }
        })
        .collect()
}

/// |cos| of the angle between the quad normal and the view axis.
fn facing(corners: &[nalgebra::Point3<f64>; 4]) -> f64 {
    let normal = (corners[1] - corners[0]).cross(&(corners[3] - corners[0]));
    let norm = normal.norm();
    if norm == 0.0 {
        return 1.0;
    }
    (normal.z / norm).abs()
}

fn shade(color: Color, brightness: f64) -> Color {
    let scale = |c: u8| (c as f64 * brightness).round().clamp(0.0, 255.0) as u8;
    Color::new(scale(color.r), scale(color.g), scale(color.b), color.a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plot_common::Field3;
    use renderer::{build_surface_scene, SurfaceFields, SurfaceOptions};
    use test_utils::{
        constant_field, shell_coordinates, shell_wave, solid_body_rotation, SphericalGrid,
    };

    fn scene(options: &SurfaceOptions, data: Option<Field3>) -> SurfaceScene {
        let grid = SphericalGrid::new(24, 12, 2, 0.5, 1.0);
        let (x, y, z) = shell_coordinates(&grid.phi, &grid.theta, &grid.r);
        let (ux, uy, uz) = solid_body_rotation(&grid.phi, &grid.theta, &grid.r);
        let data = data.unwrap_or_else(|| shell_wave(&grid.phi, &grid.theta, &grid.r, 2));
        let fields = SurfaceFields {
            x: &x,
            y: &y,
            z: &z,
            ux: &ux,
            uy: &uy,
            uz: &uz,
            data: &data,
        };
        build_surface_scene(&fields, 1, options).unwrap()
    }

    #[test]
    fn test_renders_sphere_at_scene_size() {
        let scene = scene(&SurfaceOptions::default(), None);
        let fig = SoftwareSurfaceBackend::default()
            .render(&scene, &RenderConfig::default())
            .unwrap();
        assert_eq!((fig.width(), fig.height()), (800, 800));
        assert_ne!(fig.pixel(400, 400), Some(Color::WHITE));
        assert_eq!(fig.pixel(2, 2), Some(Color::WHITE));
    }

    #[test]
    fn test_arrows_add_primitives() {
        let backend = SoftwareSurfaceBackend::default();
        let config = RenderConfig::default();
        let without = SurfaceOptions {
            draw_vectors: false,
            ..SurfaceOptions::default()
        };
        let plain = backend.render(&scene(&without, None), &config).unwrap();
        let arrows = backend
            .render(&scene(&SurfaceOptions::default(), None), &config)
            .unwrap();
        assert!(arrows.primitive_count() > plain.primitive_count());
    }

    #[test]
    fn test_constant_scalars_render() {
        let grid = SphericalGrid::new(24, 12, 2, 0.5, 1.0);
        let options = SurfaceOptions {
            shade_solid: false,
            ..SurfaceOptions::default()
        };
        let scene = scene(&options, Some(constant_field(grid.shape(), 0.0)));
        assert!(SoftwareSurfaceBackend::default()
            .render(&scene, &RenderConfig::default())
            .is_ok());
    }

    #[test]
    fn test_shade_darkens() {
        let c = shade(Color::new(200, 100, 50, 255), 0.5);
        assert_eq!(c, Color::new(100, 50, 25, 255));
    }
}
