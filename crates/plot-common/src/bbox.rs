//! Bounding box of projected plot coordinates.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounds in data (projected) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Create new bounds from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounds that contain nothing; extending them with a point yields that point.
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Smallest bounds covering every finite point of the iterator.
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut bounds = Self::empty();
        for (x, y) in points {
            bounds.extend(x, y);
        }
        bounds
    }

    /// Grow the bounds to include a point. Non-finite points are ignored.
    pub fn extend(&mut self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Width in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when no point has been added.
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Expand each side by `fraction` of the larger extent.
    pub fn padded(&self, fraction: f64) -> Self {
        let pad = self.width().max(self.height()) * fraction;
        Self {
            min_x: self.min_x - pad,
            min_y: self.min_y - pad,
            max_x: self.max_x + pad,
            max_y: self.max_y + pad,
        }
    }

    /// Check if a point is contained within the bounds.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_skips_nan() {
        let b = Bounds::from_points([(0.0, 1.0), (f64::NAN, 5.0), (-2.0, 3.0)]);
        assert_eq!(b, Bounds::new(-2.0, 1.0, 0.0, 3.0));
    }

    #[test]
    fn test_empty() {
        assert!(Bounds::empty().is_empty());
        assert!(!Bounds::new(0.0, 0.0, 0.0, 0.0).is_empty());
    }

    #[test]
    fn test_padded_uses_larger_extent() {
        let b = Bounds::new(0.0, 0.0, 10.0, 2.0).padded(0.1);
        assert_eq!(b.min_x, -1.0);
        assert_eq!(b.min_y, -1.0);
        assert_eq!(b.max_x, 11.0);
        assert_eq!(b.max_y, 3.0);
    }
}
