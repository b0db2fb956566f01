//! Rendering configuration shared by all figure renderers.
//!
//! Loaded from JSON (file or string) or from environment variables, with
//! defaults for everything.

use crate::{Color, PlotError, PlotResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings that control figure rasterization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Pixels per figure inch.
    pub dpi: f32,

    /// Figure background, `#RRGGBB[AA]`.
    pub background: String,

    /// Boundary curve color (shell arcs, polar axis).
    pub line_color: String,

    /// Boundary curve width in points.
    pub line_width: f32,

    /// Map gridline color.
    pub grid_color: String,

    /// Map gridline opacity.
    pub grid_alpha: f32,

    /// Map gridline width in points.
    pub grid_width: f32,

    /// Arrow color for vector overlays on 2D maps.
    pub vector_color: String,

    /// Margin around the plotted data, as a fraction of its extent.
    pub pad_fraction: f64,

    /// Stroke filled polygons with their face color to hide seams.
    pub fill_edges: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dpi: 72.0,
            background: "#FFFFFF".to_string(),
            line_color: "#000000".to_string(),
            line_width: 1.0,
            grid_color: "#808080".to_string(),
            grid_alpha: 0.5,
            grid_width: 1.0,
            vector_color: "#000000".to_string(),
            pad_fraction: 0.02,
            fill_edges: true,
        }
    }
}

impl RenderConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> PlotResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            PlotError::config(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string. Missing keys take defaults.
    pub fn from_json(json: &str) -> PlotResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("PLOT_DPI") {
            if let Ok(dpi) = val.parse() {
                config.dpi = dpi;
            }
        }

        if let Ok(val) = std::env::var("PLOT_BACKGROUND") {
            config.background = val;
        }

        if let Ok(val) = std::env::var("PLOT_LINE_WIDTH") {
            if let Ok(width) = val.parse() {
                config.line_width = width;
            }
        }

        if let Ok(val) = std::env::var("PLOT_FILL_EDGES") {
            config.fill_edges = val.to_lowercase() == "true" || val == "1";
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> PlotResult<()> {
        if !(self.dpi > 0.0) {
            return Err(PlotError::config("dpi must be > 0"));
        }
        if self.line_width < 0.0 || self.grid_width < 0.0 {
            return Err(PlotError::config("line widths must be >= 0"));
        }
        if !(0.0..=1.0).contains(&self.grid_alpha) {
            return Err(PlotError::config("grid_alpha must be within 0-1"));
        }
        if self.pad_fraction < 0.0 {
            return Err(PlotError::config("pad_fraction must be >= 0"));
        }
        for (name, value) in [
            ("background", &self.background),
            ("line_color", &self.line_color),
            ("grid_color", &self.grid_color),
            ("vector_color", &self.vector_color),
        ] {
            if Color::from_hex(value).is_none() {
                return Err(PlotError::config(format!("{}: invalid color '{}'", name, value)));
            }
        }
        Ok(())
    }

    /// Convert a width in points to pixels at this DPI.
    pub fn points_to_px(&self, points: f32) -> f32 {
        points * self.dpi / 72.0
    }

    pub fn background_color(&self) -> PlotResult<Color> {
        parse_color("background", &self.background)
    }

    pub fn line_color(&self) -> PlotResult<Color> {
        parse_color("line_color", &self.line_color)
    }

    /// Grid color with `grid_alpha` applied.
    pub fn grid_color(&self) -> PlotResult<Color> {
        Ok(parse_color("grid_color", &self.grid_color)?.with_alpha(self.grid_alpha as f64))
    }

    pub fn vector_color(&self) -> PlotResult<Color> {
        parse_color("vector_color", &self.vector_color)
    }
}

fn parse_color(name: &str, value: &str) -> PlotResult<Color> {
    Color::from_hex(value)
        .ok_or_else(|| PlotError::config(format!("{}: invalid color '{}'", name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_validate() {
        let config = RenderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.points_to_px(1.0), 1.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = RenderConfig::from_json(r##"{"dpi": 144, "line_color": "#FF0000"}"##).unwrap();
        assert_eq!(config.dpi, 144.0);
        assert_eq!(config.line_color().unwrap(), Color::new(255, 0, 0, 255));
        assert!(config.fill_edges);
        assert_eq!(config.points_to_px(1.0), 2.0);
    }

    #[test]
    fn test_invalid_color_rejected() {
        let err = RenderConfig::from_json(r#"{"background": "white"}"#).unwrap_err();
        assert!(matches!(err, PlotError::ConfigError(_)));
    }

    #[test]
    fn test_zero_dpi_rejected() {
        assert!(RenderConfig::from_json(r#"{"dpi": 0}"#).is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"grid_alpha": 0.25}}"#).unwrap();
        let config = RenderConfig::from_file(file.path()).unwrap();
        assert_eq!(config.grid_alpha, 0.25);
        assert_eq!(config.grid_color().unwrap().a, 64);
    }
}
