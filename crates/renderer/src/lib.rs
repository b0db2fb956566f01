//! Figure rendering for spherical and cylindrical fields.
//!
//! Implements the plot families:
//! - Global maps of a radial shell (orthographic pseudocolor, Mollweide contours)
//! - Meridional and equatorial cross-sections (filled contours)
//! - 3D shell surfaces through a pluggable [`SurfaceBackend`]
//!
//! Every entry point returns its own [`Figure`], which can be encoded to PNG.

pub mod contour;
pub mod figure;
pub mod global;
pub mod gradient;
pub mod png;
pub mod slices;
pub mod surface;

pub use contour::{fill_contours, generate_contour_levels, linspace, Levels};
pub use figure::{Figure, LineStyle, View};
pub use global::{rad_contour, render_map, MapOptions, MapVectors};
pub use gradient::{fill_cells, ColorScale, PlotMesh};
pub use slices::{eq_contour, mer_contour};
pub use surface::{
    build_surface_scene, surface_3d, Arrow, ArrowColor, ArrowField, SurfaceBackend,
    SurfaceFields, SurfaceMesh, SurfaceOptions, SurfaceScene, SOLID_ARROW_GRAY,
    SURFACE_SIZE_PX, VECTOR_STRIDE,
};

pub use plot_common::{
    Color, Colormap, ColormapKind, DivergingNorm, Field2, Field3, Lut, PlotError, PlotResult,
    RenderConfig,
};
pub use projection::MapProjection;
