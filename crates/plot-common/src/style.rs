//! Colors, named colormaps and sampled lookup tables.
//!
//! Colormaps are a closed set of variants resolved from their names at call
//! time; an unknown name is an `UnknownColormap` error.

use crate::{PlotError, PlotResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color value in RGBA format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }

    /// Opaque color from unit-range float components.
    pub fn from_unit_rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b), 255)
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 && hex.len() != 8 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();

        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Same color with alpha scaled by a unit-range factor.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: unit_to_u8(alpha * self.a as f64 / 255.0),
            ..self
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

fn unit_to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Linear color interpolation
fn lerp_rgb(c1: [f64; 3], c2: [f64; 3], t: f64) -> [f64; 3] {
    let t = t.clamp(0.0, 1.0);
    [
        c1[0] + (c2[0] - c1[0]) * t,
        c1[1] + (c2[1] - c1[1]) * t,
        c1[2] + (c2[2] - c1[2]) * t,
    ]
}

/// Named colormap families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColormapKind {
    Seismic,
    Bwr,
    Coolwarm,
    RdBu,
    PuOr,
    Viridis,
    Gray,
}

// Anchor stops `(position, [r, g, b])` with unit-range components.
const SEISMIC: &[(f64, [f64; 3])] = &[
    (0.0, [0.0, 0.0, 0.3]),
    (0.25, [0.0, 0.0, 1.0]),
    (0.5, [1.0, 1.0, 1.0]),
    (0.75, [1.0, 0.0, 0.0]),
    (1.0, [0.5, 0.0, 0.0]),
];

const BWR: &[(f64, [f64; 3])] = &[
    (0.0, [0.0, 0.0, 1.0]),
    (0.5, [1.0, 1.0, 1.0]),
    (1.0, [1.0, 0.0, 0.0]),
];

const COOLWARM: &[(f64, [f64; 3])] = &[
    (0.0, [0.2298, 0.2987, 0.7537]),
    (0.25, [0.5543, 0.6900, 0.9955]),
    (0.5, [0.8654, 0.8654, 0.8654]),
    (0.75, [0.9567, 0.5980, 0.4773]),
    (1.0, [0.7057, 0.0156, 0.1502]),
];

const RDBU: &[(f64, [f64; 3])] = &[
    (0.0, [0.4039, 0.0000, 0.1216]),
    (0.1, [0.6980, 0.0941, 0.1686]),
    (0.2, [0.8392, 0.3765, 0.3020]),
    (0.3, [0.9569, 0.6471, 0.5098]),
    (0.4, [0.9922, 0.8588, 0.7804]),
    (0.5, [0.9686, 0.9686, 0.9686]),
    (0.6, [0.8196, 0.8980, 0.9412]),
    (0.7, [0.5725, 0.7725, 0.8706]),
    (0.8, [0.2627, 0.5765, 0.7647]),
    (0.9, [0.1294, 0.4000, 0.6745]),
    (1.0, [0.0196, 0.1882, 0.3804]),
];

const PUOR: &[(f64, [f64; 3])] = &[
    (0.0, [0.4980, 0.2314, 0.0314]),
    (0.1, [0.7020, 0.3451, 0.0235]),
    (0.2, [0.8784, 0.5098, 0.0784]),
    (0.3, [0.9922, 0.7216, 0.3882]),
    (0.4, [0.9961, 0.8784, 0.7137]),
    (0.5, [0.9686, 0.9686, 0.9686]),
    (0.6, [0.8471, 0.8549, 0.9216]),
    (0.7, [0.6980, 0.6706, 0.8235]),
    (0.8, [0.5020, 0.4510, 0.6745]),
    (0.9, [0.3294, 0.1529, 0.5333]),
    (1.0, [0.1765, 0.0000, 0.2941]),
];

const VIRIDIS: &[(f64, [f64; 3])] = &[
    (0.0, [0.2667, 0.0039, 0.3294]),
    (0.125, [0.2784, 0.1765, 0.4824]),
    (0.25, [0.2314, 0.3216, 0.5451]),
    (0.375, [0.1725, 0.4471, 0.5569]),
    (0.5, [0.1294, 0.5686, 0.5490]),
    (0.625, [0.1569, 0.6824, 0.5020]),
    (0.75, [0.3686, 0.7882, 0.3843]),
    (0.875, [0.6784, 0.8627, 0.1882]),
    (1.0, [0.9922, 0.9059, 0.1451]),
];

const GRAY: &[(f64, [f64; 3])] = &[(0.0, [0.0, 0.0, 0.0]), (1.0, [1.0, 1.0, 1.0])];

fn sample_stops(stops: &[(f64, [f64; 3])], t: f64) -> [f64; 3] {
    let t = t.clamp(0.0, 1.0);
    for pair in stops.windows(2) {
        let (p0, c0) = pair[0];
        let (p1, c1) = pair[1];
        if t <= p1 {
            let span = p1 - p0;
            let local = if span > 0.0 { (t - p0) / span } else { 0.0 };
            return lerp_rgb(c0, c1, local);
        }
    }
    stops.last().map(|(_, c)| *c).unwrap_or([0.0; 3])
}

impl ColormapKind {
    /// Registry of accepted base names.
    pub const ALL: [(&'static str, ColormapKind); 7] = [
        ("seismic", ColormapKind::Seismic),
        ("bwr", ColormapKind::Bwr),
        ("coolwarm", ColormapKind::Coolwarm),
        ("RdBu", ColormapKind::RdBu),
        ("PuOr", ColormapKind::PuOr),
        ("viridis", ColormapKind::Viridis),
        ("gray", ColormapKind::Gray),
    ];

    pub fn name(&self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(name, _)| *name)
            .unwrap_or("unknown")
    }

    fn sample(&self, t: f64) -> [f64; 3] {
        match self {
            ColormapKind::Seismic => sample_stops(SEISMIC, t),
            ColormapKind::Bwr => sample_stops(BWR, t),
            ColormapKind::Coolwarm => sample_stops(COOLWARM, t),
            ColormapKind::RdBu => sample_stops(RDBU, t),
            ColormapKind::PuOr => sample_stops(PUOR, t),
            ColormapKind::Viridis => sample_stops(VIRIDIS, t),
            ColormapKind::Gray => sample_stops(GRAY, t),
        }
    }
}

/// A colormap family, optionally reversed (`_r` suffix in names).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Colormap {
    pub kind: ColormapKind,
    pub reversed: bool,
}

impl Colormap {
    pub const fn new(kind: ColormapKind) -> Self {
        Self {
            kind,
            reversed: false,
        }
    }

    pub const fn reversed(self) -> Self {
        Self {
            kind: self.kind,
            reversed: !self.reversed,
        }
    }

    /// Unit-range RGB at position `t` in `[0, 1]` (clamped).
    pub fn sample(&self, t: f64) -> [f64; 3] {
        let t = if self.reversed { 1.0 - t } else { t };
        self.kind.sample(t)
    }

    /// Opaque color at `t`; NaN maps to transparent.
    pub fn color(&self, t: f64) -> Color {
        if t.is_nan() {
            return Color::transparent();
        }
        let [r, g, b] = self.sample(t);
        Color::from_unit_rgb(r, g, b)
    }
}

impl Default for Colormap {
    fn default() -> Self {
        Self::new(ColormapKind::Seismic)
    }
}

impl FromStr for Colormap {
    type Err = PlotError;

    fn from_str(name: &str) -> PlotResult<Self> {
        let (base, reversed) = match name.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (name, false),
        };
        ColormapKind::ALL
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(base))
            .map(|(_, kind)| Colormap {
                kind: *kind,
                reversed,
            })
            .ok_or_else(|| PlotError::UnknownColormap(name.to_string()))
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.name())?;
        if self.reversed {
            write!(f, "_r")?;
        }
        Ok(())
    }
}

/// Color lookup table sampled from a colormap.
///
/// Entries are RGBA with components scaled to `0..=255` (as floats), the
/// layout mesh renderers expect for scalar coloring.
#[derive(Debug, Clone, PartialEq)]
pub struct Lut {
    entries: Vec<[f64; 4]>,
}

impl Lut {
    /// Number of entries a surface lookup table carries.
    pub const SURFACE_SIZE: usize = 255;

    /// Sample `size` evenly spaced points over `[0, 1]`.
    pub fn sample(colormap: &Colormap, size: usize) -> Self {
        let last = size.saturating_sub(1).max(1) as f64;
        let entries = (0..size)
            .map(|i| {
                let [r, g, b] = colormap.sample(i as f64 / last);
                [r * 255.0, g * 255.0, b * 255.0, 255.0]
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[[f64; 4]] {
        &self.entries
    }

    /// Nearest entry for a unit-range position; NaN is transparent.
    pub fn lookup(&self, t: f64) -> Color {
        if t.is_nan() || self.entries.is_empty() {
            return Color::transparent();
        }
        let idx = (t.clamp(0.0, 1.0) * (self.entries.len() - 1) as f64).round() as usize;
        let [r, g, b, a] = self.entries[idx];
        Color::new(r.round() as u8, g.round() as u8, b.round() as u8, a.round() as u8)
    }
}
