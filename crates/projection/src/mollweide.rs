//! Mollweide equal-area projection on the unit sphere.
//!
//! x = (2 sqrt 2 / pi) * lambda * cos(t), y = sqrt 2 * sin(t), where the
//! auxiliary angle t solves 2t + sin 2t = pi * sin(latitude).
//! The full map is an ellipse with semi-axes 2 sqrt 2 and sqrt 2.

use std::f64::consts::{FRAC_PI_2, PI, SQRT_2};

const DEG_TO_RAD: f64 = PI / 180.0;
const MAX_ITERATIONS: usize = 50;
const TOLERANCE: f64 = 1e-12;
const SEAM_TOLERANCE: f64 = 1e-9;

/// Mollweide projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mollweide {
    lon0: f64,
}

impl Mollweide {
    /// Create a projection with the given central meridian (degrees).
    pub fn new(central_lon_deg: f64) -> Self {
        Self {
            lon0: central_lon_deg * DEG_TO_RAD,
        }
    }

    /// Half-width of the map (x extent).
    pub fn semi_major(&self) -> f64 {
        2.0 * SQRT_2
    }

    /// Half-height of the map (y extent).
    pub fn semi_minor(&self) -> f64 {
        SQRT_2
    }

    /// Solve 2t + sin 2t = pi sin(lat) by Newton iteration.
    fn auxiliary_angle(lat: f64) -> f64 {
        if (FRAC_PI_2 - lat.abs()).abs() < TOLERANCE {
            return lat.signum() * FRAC_PI_2;
        }
        let target = PI * lat.sin();
        let mut t = lat;
        for _ in 0..MAX_ITERATIONS {
            let f = 2.0 * t + (2.0 * t).sin() - target;
            let df = 2.0 + 2.0 * (2.0 * t).cos();
            if df.abs() < TOLERANCE {
                break;
            }
            let step = f / df;
            t -= step;
            if step.abs() < TOLERANCE {
                break;
            }
        }
        t
    }

    /// Longitude offset from the central meridian, wrapped into [-pi, pi].
    ///
    /// Both seam meridians stay on their own edge of the map.
    fn relative_longitude(&self, lon_deg: f64) -> f64 {
        let dlon = lon_deg * DEG_TO_RAD - self.lon0;
        if dlon.abs() <= PI + SEAM_TOLERANCE {
            return dlon;
        }
        (dlon + PI).rem_euclid(2.0 * PI) - PI
    }

    /// Planar coordinates of a geographic point (degrees), `None` when
    /// either coordinate is not finite.
    pub fn project(&self, lon_deg: f64, lat_deg: f64) -> Option<(f64, f64)> {
        if !lon_deg.is_finite() || !lat_deg.is_finite() {
            return None;
        }
        let lat = (lat_deg * DEG_TO_RAD).clamp(-FRAC_PI_2, FRAC_PI_2);
        let t = Self::auxiliary_angle(lat);
        let dlon = self.relative_longitude(lon_deg);

        let x = 2.0 * SQRT_2 / PI * dlon * t.cos();
        let y = SQRT_2 * t.sin();
        Some((x, y))
    }

    /// Boundary ellipse sampled with `n` points.
    pub fn outline(&self, n: usize) -> Vec<(f64, f64)> {
        (0..n)
            .map(|i| {
                let a = 2.0 * PI * i as f64 / n as f64;
                (self.semi_major() * a.cos(), self.semi_minor() * a.sin())
            })
            .collect()
    }
}
