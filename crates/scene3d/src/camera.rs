//! Orthographic viewing transform.

use nalgebra::{Point3, Rotation3, Vector3};

/// Elevations are kept off the poles so the up vector stays defined.
const MAX_ELEVATION_DEG: f64 = 89.0;

/// Viewpoint on a sphere around the origin, looking at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Angle of the viewpoint around z, from +x toward +y.
    pub azimuth_deg: f64,
    /// Angle of the viewpoint above the x-y plane.
    pub elevation_deg: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            azimuth_deg: 45.0,
            elevation_deg: 30.0,
        }
    }
}

impl Camera {
    pub fn new(azimuth_deg: f64, elevation_deg: f64) -> Self {
        Self {
            azimuth_deg,
            elevation_deg,
        }
    }

    /// Unit vector from the origin toward the viewer.
    pub fn eye_direction(&self) -> Vector3<f64> {
        let az = self.azimuth_deg.to_radians();
        let el = self
            .elevation_deg
            .clamp(-MAX_ELEVATION_DEG, MAX_ELEVATION_DEG)
            .to_radians();
        Vector3::new(el.cos() * az.cos(), el.cos() * az.sin(), el.sin())
    }

    /// Rotation taking world coordinates into view space: x right, y up,
    /// z toward the viewer.
    pub fn rotation(&self) -> Rotation3<f64> {
        Rotation3::look_at_rh(&(-self.eye_direction()), &Vector3::z())
    }

    /// View-space position of a world point.
    pub fn to_view(&self, p: [f64; 3]) -> Point3<f64> {
        self.rotation() * Point3::new(p[0], p[1], p[2])
    }
}
