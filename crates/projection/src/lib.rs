//! Coordinate transforms for spherical and cylindrical grids.
//!
//! Implements grid expansion, the geographic/meridional/equatorial
//! transforms and the global map projections from scratch.

pub mod map;
pub mod mesh;
pub mod mollweide;
pub mod orthographic;
pub mod transform;

pub use map::{MapFill, MapProjection};
pub use mesh::{expand_grid, is_periodic_azimuth, polar_mesh};
pub use mollweide::Mollweide;
pub use orthographic::Orthographic;
pub use transform::{
    equatorial, equatorial_mesh, geographic, meridional, meridional_mesh, to_lon_lat, ProjectedCoords,
};
