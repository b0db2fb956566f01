//! End-to-end tests for the four plot entry points.

use plot_common::{Color, Colormap, Field2, Field3, PlotError, PlotResult, RenderConfig};
use renderer::{
    eq_contour, mer_contour, rad_contour, render_map, surface_3d, ArrowColor, Figure, Levels,
    MapOptions, MapProjection, MapVectors, SurfaceBackend, SurfaceOptions, SurfaceScene,
    VECTOR_STRIDE,
};
use std::cell::RefCell;
use test_utils::{
    constant_field, dipole_slice, equatorial_wave, is_png, shell_coordinates, shell_indices,
    shell_wave, solid_body_rotation, solid_body_spherical, SphericalGrid,
};

fn config() -> RenderConfig {
    RenderConfig {
        dpi: 12.0,
        ..RenderConfig::default()
    }
}

fn map(
    grid: &SphericalGrid,
    data: &Field3,
    shell: usize,
    projection: MapProjection,
) -> PlotResult<Figure> {
    rad_contour(
        &grid.theta,
        &grid.phi,
        data,
        shell,
        true,
        &Levels::Count(17),
        Colormap::default(),
        projection,
        &config(),
    )
}

// ============================================================================
// Global map tests
// ============================================================================

#[test]
fn test_unknown_projection_fails_before_rendering() {
    let err = "foo".parse::<MapProjection>().unwrap_err();
    assert!(matches!(err, PlotError::UnknownProjection(ref name) if name == "foo"));
    assert!(err.is_input_error());
}

#[test]
fn test_orthographic_map_renders() {
    let grid = SphericalGrid::small();
    let data = shell_wave(&grid.phi, &grid.theta, &grid.r, 2);
    let fig = map(&grid, &data, 1, "ortho".parse().unwrap()).unwrap();

    assert_eq!((fig.width(), fig.height()), (120, 120));
    assert!(fig.primitive_count() > 0);
    // Globe corners are outside the disc.
    assert_eq!(fig.pixel(0, 0), Some(Color::WHITE));
}

#[test]
fn test_mollweide_map_renders_every_shell() {
    let grid = SphericalGrid::small();
    let data = shell_wave(&grid.phi, &grid.theta, &grid.r, 3);
    for shell in shell_indices(grid.r.len()) {
        let fig = map(&grid, &data, shell, MapProjection::mollweide()).unwrap();
        assert_eq!((fig.width(), fig.height()), (144, 120));
        assert!(fig.primitive_count() > 0);
    }
}

#[test]
fn test_all_zero_shell_renders() {
    let grid = SphericalGrid::small();
    let data = constant_field(grid.shape(), 0.0);
    for projection in [MapProjection::orthographic(), MapProjection::mollweide()] {
        let fig = map(&grid, &data, 0, projection).unwrap();
        assert!(is_png(&fig.encode_png().unwrap()));
    }
}

#[test]
fn test_shell_index_out_of_range() {
    let grid = SphericalGrid::small();
    let data = shell_wave(&grid.phi, &grid.theta, &grid.r, 1);
    let err = map(&grid, &data, 3, MapProjection::orthographic()).unwrap_err();
    assert!(matches!(err, PlotError::ShellIndexOutOfRange { index: 3, len: 3 }));
}

#[test]
fn test_map_shape_mismatch() {
    let grid = SphericalGrid::small();
    let data = constant_field([grid.phi.len(), grid.theta.len() + 1, 2], 1.0);
    let err = map(&grid, &data, 0, MapProjection::mollweide()).unwrap_err();
    assert!(matches!(err, PlotError::ShapeMismatch { .. }));
}

#[test]
fn test_map_empty_axis() {
    let grid = SphericalGrid::new(0, 8, 2, 0.5, 1.0);
    let data = constant_field(grid.shape(), 1.0);
    let err = map(&grid, &data, 0, MapProjection::orthographic()).unwrap_err();
    assert!(matches!(err, PlotError::EmptyAxis("phi")));
}

#[test]
fn test_map_vectors_add_arrows() {
    let grid = SphericalGrid::small();
    let data = shell_wave(&grid.phi, &grid.theta, &grid.r, 2);
    let (u_phi, u_theta) = solid_body_spherical(&grid.phi, &grid.theta, &grid.r);

    let mut options = MapOptions::new(MapProjection::mollweide());
    let plain = render_map(&grid.theta, &grid.phi, &data, &options, &config()).unwrap();

    options.vectors = Some(MapVectors {
        u_phi: &u_phi,
        u_theta: &u_theta,
        stride: 4,
    });
    let with_arrows = render_map(&grid.theta, &grid.phi, &data, &options, &config()).unwrap();
    assert!(with_arrows.primitive_count() > plain.primitive_count());
}

// ============================================================================
// Slice tests
// ============================================================================

#[test]
fn test_meridional_slice() {
    let grid = SphericalGrid::small();
    let data = dipole_slice(&grid.theta, &grid.r);
    let fig = mer_contour(&grid.r, &grid.theta, &data, &Levels::Count(9), Colormap::default(), &config())
        .unwrap();
    assert_eq!((fig.width(), fig.height()), (60, 120));
}

#[test]
fn test_meridional_all_zero() {
    let grid = SphericalGrid::small();
    let data = Field2::filled(grid.theta.len(), grid.r.len(), 0.0);
    assert!(mer_contour(&grid.r, &grid.theta, &data, &Levels::Count(9), Colormap::default(), &config())
        .is_ok());
}

#[test]
fn test_equatorial_slice() {
    let grid = SphericalGrid::small();
    let data = equatorial_wave(&grid.phi, &grid.r, 4);
    let levels = Levels::Values(vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    let fig = eq_contour(&grid.r, &grid.phi, &data, &levels, "RdBu_r".parse().unwrap(), &config())
        .unwrap();
    assert_eq!((fig.width(), fig.height()), (120, 120));
}

#[test]
fn test_equatorial_all_zero() {
    let grid = SphericalGrid::small();
    let data = Field2::filled(grid.phi.len(), grid.r.len(), 0.0);
    let fig = eq_contour(&grid.r, &grid.phi, &data, &Levels::Count(9), Colormap::default(), &config())
        .unwrap();
    assert_eq!((fig.width(), fig.height()), (120, 120));
    // Only the boundary circles are drawn; the annulus stays background.
    assert_eq!(fig.pixel(94, 60), Some(Color::WHITE));
}

#[test]
fn test_equatorial_shape_mismatch() {
    let grid = SphericalGrid::small();
    let data = Field2::filled(grid.r.len(), grid.phi.len(), 1.0);
    let err = eq_contour(&grid.r, &grid.phi, &data, &Levels::Count(5), Colormap::default(), &config())
        .unwrap_err();
    assert!(matches!(err, PlotError::ShapeMismatch { .. }));
}

// ============================================================================
// 3D surface tests
// ============================================================================

/// Backend that records the scene it was given.
#[derive(Default)]
struct RecordingBackend {
    scene: RefCell<Option<SurfaceScene>>,
}

impl SurfaceBackend for RecordingBackend {
    fn name(&self) -> &str {
        "recording"
    }

    fn render(&self, scene: &SurfaceScene, config: &RenderConfig) -> PlotResult<Figure> {
        *self.scene.borrow_mut() = Some(scene.clone());
        Figure::with_pixels(scene.size_px.0, scene.size_px.1, config)
    }
}

#[test]
fn test_surface_without_backend_fails() {
    let grid = SphericalGrid::small();
    let f = constant_field(grid.shape(), 1.0);
    let err = surface_3d(None, &f, &f, &f, 0, &f, &f, &f, &f, &SurfaceOptions::default(), &config())
        .unwrap_err();
    assert!(matches!(err, PlotError::BackendUnavailable(_)));
}

#[test]
fn test_surface_scene_contents() {
    let grid = SphericalGrid::small();
    let (x, y, z) = shell_coordinates(&grid.phi, &grid.theta, &grid.r);
    let (ux, uy, uz) = solid_body_rotation(&grid.phi, &grid.theta, &grid.r);
    let data = shell_wave(&grid.phi, &grid.theta, &grid.r, 2);
    let backend = RecordingBackend::default();

    let fig = surface_3d(
        Some(&backend),
        &x,
        &y,
        &z,
        2,
        &ux,
        &uy,
        &uz,
        &data,
        &SurfaceOptions::default(),
        &config(),
    )
    .unwrap();
    assert_eq!((fig.width(), fig.height()), (800, 800));

    let scene = backend.scene.borrow_mut().take().unwrap();
    assert_eq!(scene.lut.len(), 255);
    assert!(scene.lut.entries().iter().flatten().all(|c| (0.0..=255.0).contains(c)));
    assert_eq!(scene.mesh.shape(), [16, 8]);
    assert_eq!(scene.mesh.vertex(0, 0), [x.get(0, 0, 2), y.get(0, 0, 2), z.get(0, 0, 2)]);

    let arrows = scene.arrows.unwrap();
    let per_axis = |n: usize| n.div_ceil(VECTOR_STRIDE);
    assert_eq!(arrows.arrows.len(), per_axis(16) * per_axis(8) * grid.r.len());
    assert!(matches!(arrows.color, ArrowColor::Solid(_)));
}

#[test]
fn test_surface_shape_mismatch() {
    let grid = SphericalGrid::small();
    let f = constant_field(grid.shape(), 1.0);
    let bad = constant_field([2, 2, 2], 1.0);
    let backend = RecordingBackend::default();
    let err = surface_3d(
        Some(&backend),
        &f,
        &f,
        &f,
        0,
        &f,
        &f,
        &bad,
        &f,
        &SurfaceOptions::default(),
        &config(),
    )
    .unwrap_err();
    assert!(matches!(err, PlotError::ShapeMismatch { .. }));
    assert!(backend.scene.borrow().is_none());
}
