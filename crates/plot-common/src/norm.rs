//! Diverging (two-slope) normalization centred on zero.

use crate::{PlotError, PlotResult};
use serde::{Deserialize, Serialize};

/// Symmetric value range `(vmin, vcenter, vmax)` with `vcenter = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DivergingNorm {
    pub vmin: f64,
    pub vcenter: f64,
    pub vmax: f64,
}

impl DivergingNorm {
    /// Range `[-max|v|, max|v|]` over a field slice.
    ///
    /// NaN entries are skipped. An empty slice has no maximum and fails with
    /// `EmptyField`; an all-zero (or all-NaN) slice gives `vmin == vmax == 0`.
    pub fn from_values(values: &[f64]) -> PlotResult<Self> {
        if values.is_empty() {
            return Err(PlotError::EmptyField);
        }
        let dat_max = values
            .iter()
            .filter(|v| !v.is_nan())
            .fold(0.0f64, |acc, v| acc.max(v.abs()));

        Ok(Self::symmetric(dat_max))
    }

    /// Norm spanning `[-half_range, half_range]`.
    pub fn symmetric(half_range: f64) -> Self {
        let half_range = half_range.abs();
        Self {
            vmin: -half_range,
            vcenter: 0.0,
            vmax: half_range,
        }
    }

    /// True when the range has zero width.
    pub fn is_degenerate(&self) -> bool {
        self.vmax - self.vmin == 0.0
    }

    /// Map a value to `[0, 1]`: `[vmin, vcenter] -> [0, 0.5]`, `[vcenter, vmax] -> [0.5, 1]`.
    ///
    /// Values outside the range clamp. A zero-width side maps to the centre
    /// instead of dividing by zero. NaN passes through.
    pub fn normalize(&self, value: f64) -> f64 {
        if value.is_nan() {
            return f64::NAN;
        }
        let t = if value < self.vcenter {
            let span = self.vcenter - self.vmin;
            if span > 0.0 {
                0.5 * (value - self.vmin) / span
            } else {
                0.5
            }
        } else {
            let span = self.vmax - self.vcenter;
            if span > 0.0 {
                0.5 + 0.5 * (value - self.vcenter) / span
            } else {
                0.5
            }
        };
        t.clamp(0.0, 1.0)
    }
}
