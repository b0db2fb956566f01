//! Orthographic (globe-view) projection on the unit sphere.
//!
//! The sphere is seen from infinitely far away above the point
//! (central longitude, central latitude). Only the facing hemisphere is
//! visible; points on the far side have no projection.

use std::f64::consts::PI;

const DEG_TO_RAD: f64 = PI / 180.0;

/// Orthographic projection parameters (stored in radians).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orthographic {
    lon0: f64,
    lat0: f64,
}

impl Orthographic {
    /// Create a projection centred on the given point (degrees).
    pub fn new(central_lon_deg: f64, central_lat_deg: f64) -> Self {
        Self {
            lon0: central_lon_deg * DEG_TO_RAD,
            lat0: central_lat_deg * DEG_TO_RAD,
        }
    }

    /// Cosine of the angular distance from the view centre; `>= 0` is visible.
    pub fn cos_distance(&self, lon_deg: f64, lat_deg: f64) -> f64 {
        let lon = lon_deg * DEG_TO_RAD;
        let lat = lat_deg * DEG_TO_RAD;
        self.lat0.sin() * lat.sin() + self.lat0.cos() * lat.cos() * (lon - self.lon0).cos()
    }

    /// Whether the point lies on the facing hemisphere.
    pub fn is_visible(&self, lon_deg: f64, lat_deg: f64) -> bool {
        self.cos_distance(lon_deg, lat_deg) >= 0.0
    }

    /// Planar coordinates of a point, ignoring visibility.
    pub fn project_unchecked(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        let lon = lon_deg * DEG_TO_RAD;
        let lat = lat_deg * DEG_TO_RAD;
        let dlon = lon - self.lon0;

        let x = lat.cos() * dlon.sin();
        let y = self.lat0.cos() * lat.sin() - self.lat0.sin() * lat.cos() * dlon.cos();
        (x, y)
    }

    /// Planar coordinates of a visible point, `None` on the far hemisphere.
    pub fn project(&self, lon_deg: f64, lat_deg: f64) -> Option<(f64, f64)> {
        if !self.is_visible(lon_deg, lat_deg) {
            return None;
        }
        Some(self.project_unchecked(lon_deg, lat_deg))
    }

    /// The visible limb: the unit circle, sampled with `n` points.
    pub fn outline(&self, n: usize) -> Vec<(f64, f64)> {
        (0..n)
            .map(|i| {
                let a = 2.0 * PI * i as f64 / n as f64;
                (a.cos(), a.sin())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centre_maps_to_origin() {
        let proj = Orthographic::new(0.0, 40.0);
        let (x, y) = proj.project(0.0, 40.0).unwrap();
        assert!(x.abs() < 1e-12 && y.abs() < 1e-12);
    }

    #[test]
    fn test_far_side_hidden() {
        let proj = Orthographic::new(0.0, 40.0);
        assert!(proj.project(180.0, -40.0).is_none());
        assert!(proj.project(0.0, 90.0).is_some());
    }

    #[test]
    fn test_visible_points_in_unit_disk() {
        let proj = Orthographic::new(0.0, 40.0);
        for lon in (-180..180).step_by(15) {
            for lat in (-90..=90).step_by(15) {
                if let Some((x, y)) = proj.project(lon as f64, lat as f64) {
                    assert!(x * x + y * y <= 1.0 + 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_limb_on_unit_circle() {
        let proj = Orthographic::new(0.0, 40.0);
        let limb = proj.outline(8);
        assert_eq!(limb.len(), 8);
        for (x, y) in limb {
            assert!((x.hypot(y) - 1.0).abs() < 1e-12);
        }
    }
}
