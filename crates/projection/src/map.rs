//! Global map projections selectable by the map renderer.

use crate::{Mollweide, Orthographic};
use plot_common::{Bounds, PlotError, PlotResult};
use std::fmt;
use std::str::FromStr;

/// How a projection fills the field on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapFill {
    /// Flat-shaded quadrilateral cells (pcolormesh style).
    Pseudocolor,
    /// Bands between explicit contour levels.
    FilledContour,
}

/// Closed set of supported global projections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapProjection {
    Orthographic(Orthographic),
    Mollweide(Mollweide),
}

impl MapProjection {
    /// Globe view centred at 0°E, 40°N.
    pub fn orthographic() -> Self {
        MapProjection::Orthographic(Orthographic::new(0.0, 40.0))
    }

    /// Mollweide centred on the prime meridian.
    pub fn mollweide() -> Self {
        MapProjection::Mollweide(Mollweide::new(0.0))
    }

    /// Short identifier (`ortho`, `moll`).
    pub fn name(&self) -> &'static str {
        match self {
            MapProjection::Orthographic(_) => "ortho",
            MapProjection::Mollweide(_) => "moll",
        }
    }

    /// Figure size in inches (width, height).
    pub fn figure_size(&self) -> (f32, f32) {
        match self {
            MapProjection::Orthographic(_) => (10.0, 10.0),
            MapProjection::Mollweide(_) => (12.0, 10.0),
        }
    }

    pub fn fill(&self) -> MapFill {
        match self {
            MapProjection::Orthographic(_) => MapFill::Pseudocolor,
            MapProjection::Mollweide(_) => MapFill::FilledContour,
        }
    }

    /// Project lon/lat (degrees); `None` when the point is not drawable.
    pub fn project(&self, lon_deg: f64, lat_deg: f64) -> Option<(f64, f64)> {
        match self {
            MapProjection::Orthographic(p) => p.project(lon_deg, lat_deg),
            MapProjection::Mollweide(p) => p.project(lon_deg, lat_deg),
        }
    }

    /// Full extent of the projected globe.
    pub fn bounds(&self) -> Bounds {
        match self {
            MapProjection::Orthographic(_) => Bounds::new(-1.0, -1.0, 1.0, 1.0),
            MapProjection::Mollweide(p) => Bounds::new(
                -p.semi_major(),
                -p.semi_minor(),
                p.semi_major(),
                p.semi_minor(),
            ),
        }
    }

    /// Map boundary, a closed curve sampled with `n` points.
    pub fn outline(&self, n: usize) -> Vec<(f64, f64)> {
        match self {
            MapProjection::Orthographic(p) => p.outline(n),
            MapProjection::Mollweide(p) => p.outline(n),
        }
    }
}

impl FromStr for MapProjection {
    type Err = PlotError;

    fn from_str(s: &str) -> PlotResult<Self> {
        match s.to_lowercase().as_str() {
            "ortho" | "orthographic" => Ok(Self::orthographic()),
            "moll" | "mollweide" => Ok(Self::mollweide()),
            _ => Err(PlotError::UnknownProjection(s.to_string())),
        }
    }
}

impl fmt::Display for MapProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identifiers() {
        assert_eq!("ortho".parse::<MapProjection>().unwrap().name(), "ortho");
        assert_eq!("Mollweide".parse::<MapProjection>().unwrap().name(), "moll");
        assert!(matches!(
            "foo".parse::<MapProjection>(),
            Err(PlotError::UnknownProjection(ref s)) if s == "foo"
        ));
    }

    #[test]
    fn test_figure_sizes() {
        assert_eq!(MapProjection::orthographic().figure_size(), (10.0, 10.0));
        assert_eq!(MapProjection::mollweide().figure_size(), (12.0, 10.0));
    }

    #[test]
    fn test_fill_styles() {
        assert_eq!(MapProjection::orthographic().fill(), MapFill::Pseudocolor);
        assert_eq!(MapProjection::mollweide().fill(), MapFill::FilledContour);
    }

    #[test]
    fn test_projected_points_within_bounds() {
        for proj in [MapProjection::orthographic(), MapProjection::mollweide()] {
            let b = proj.bounds();
            for lon in (-180..=180).step_by(30) {
                for lat in (-90..=90).step_by(30) {
                    if let Some((x, y)) = proj.project(lon as f64, lat as f64) {
                        assert!(b.padded(1e-9).contains_point(x, y));
                    }
                }
            }
        }
    }
}
