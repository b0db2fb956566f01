//! Common types shared by the projection, renderer and 3D crates.

pub mod bbox;
pub mod config;
pub mod error;
pub mod grid;
pub mod norm;
pub mod style;

pub use bbox::Bounds;
pub use config::RenderConfig;
pub use error::{PlotError, PlotResult};
pub use grid::{Field2, Field3, Grid2D};
pub use norm::DivergingNorm;
pub use style::{Color, Colormap, ColormapKind, Lut};
