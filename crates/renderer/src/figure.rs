//! Figure canvas with an explicit data-to-pixel view.
//!
//! Every renderer creates and returns its own `Figure`; there is no implicit
//! "current figure". Drawing happens in data coordinates once a view has been
//! set; the view keeps equal aspect and draws no axis decoration.

use crate::png;
use plot_common::{Bounds, Color, PlotError, PlotResult, RenderConfig};
use std::path::Path;
use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform,
};

/// Hairline width used to paint polygon edges in their face color.
const FACE_EDGE_WIDTH: f32 = 0.5;

/// Arrow head length relative to the shaft, and its half-angle.
const ARROW_HEAD_FRACTION: f64 = 0.3;
const ARROW_HEAD_ANGLE: f64 = 0.45;

/// Equal-aspect mapping from data coordinates to pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub bounds: Bounds,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    height_px: f64,
}

impl View {
    /// Fit `bounds` into a `width x height` pixel canvas, centred, equal aspect.
    pub fn fit(bounds: Bounds, width: u32, height: u32) -> PlotResult<Self> {
        if bounds.is_empty() {
            return Err(PlotError::render("cannot fit a view to empty bounds"));
        }
        let (w, h) = (width as f64, height as f64);
        let bw = bounds.width().max(f64::EPSILON);
        let bh = bounds.height().max(f64::EPSILON);
        let scale = (w / bw).min(h / bh);

        Ok(Self {
            bounds,
            scale,
            offset_x: (w - bw * scale) / 2.0,
            offset_y: (h - bh * scale) / 2.0,
            height_px: h,
        })
    }

    /// Pixels per data unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Pixel position of a data point (y grows downward in pixels).
    #[inline]
    pub fn to_px(&self, x: f64, y: f64) -> (f32, f32) {
        let px = self.offset_x + (x - self.bounds.min_x) * self.scale;
        let py = self.height_px - (self.offset_y + (y - self.bounds.min_y) * self.scale);
        (px as f32, py as f32)
    }
}

/// Line style for polylines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    /// Width in pixels.
    pub width: f32,
    /// Dotted (`:`) instead of solid.
    pub dotted: bool,
}

impl LineStyle {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dotted: false,
        }
    }

    pub fn dotted(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dotted: true,
        }
    }
}

/// A rendered figure: an RGBA canvas plus its physical size.
pub struct Figure {
    pixmap: Pixmap,
    dpi: f32,
    fill_edges: bool,
    view: Option<View>,
    primitives: usize,
}

impl std::fmt::Debug for Figure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Figure")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("dpi", &self.dpi)
            .field("view", &self.view)
            .field("primitives", &self.primitives)
            .finish()
    }
}

impl Figure {
    /// Create a figure of the given size in inches at the configured DPI.
    pub fn new(width_in: f32, height_in: f32, config: &RenderConfig) -> PlotResult<Self> {
        let width = (width_in * config.dpi).round() as u32;
        let height = (height_in * config.dpi).round() as u32;
        Self::with_pixels(width, height, config)
    }

    /// Create a figure with an explicit pixel size.
    pub fn with_pixels(width: u32, height: u32, config: &RenderConfig) -> PlotResult<Self> {
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            PlotError::render(format!("invalid figure size {}x{}", width, height))
        })?;
        let bg = config.background_color()?;
        pixmap.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));

        Ok(Self {
            pixmap,
            dpi: config.dpi,
            fill_edges: config.fill_edges,
            view: None,
            primitives: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    /// Size in inches.
    pub fn size_inches(&self) -> (f32, f32) {
        (self.width() as f32 / self.dpi, self.height() as f32 / self.dpi)
    }

    /// Number of primitives drawn so far.
    pub fn primitive_count(&self) -> usize {
        self.primitives
    }

    pub fn view(&self) -> Option<&View> {
        self.view.as_ref()
    }

    /// Set the data window, expanded by `pad_fraction` of its extent.
    pub fn set_view(&mut self, bounds: Bounds, pad_fraction: f64) -> PlotResult<View> {
        let view = View::fit(bounds.padded(pad_fraction), self.width(), self.height())?;
        self.view = Some(view);
        Ok(view)
    }

    fn require_view(&self) -> PlotResult<View> {
        self.view
            .ok_or_else(|| PlotError::render("no view set on figure before drawing"))
    }

    fn path_from(&self, points: &[(f64, f64)], closed: bool) -> PlotResult<Option<tiny_skia::Path>> {
        let view = self.require_view()?;
        let mut pb = PathBuilder::new();
        for (i, &(x, y)) in points.iter().enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Ok(None);
            }
            let (px, py) = view.to_px(x, y);
            if i == 0 {
                pb.move_to(px, py);
            } else {
                pb.line_to(px, py);
            }
        }
        if closed {
            pb.close();
        }
        Ok(pb.finish())
    }

    /// Fill a polygon given in data coordinates.
    ///
    /// With `fill_edges` configured, the outline is also stroked in the face
    /// color so neighbouring cells meet without anti-aliasing seams.
    pub fn fill_polygon(&mut self, points: &[(f64, f64)], color: Color) -> PlotResult<()> {
        if points.len() < 3 || color.is_transparent() {
            return Ok(());
        }
        let Some(path) = self.path_from(points, true)? else {
            return Ok(());
        };

        let paint = paint_for(color);
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);

        if self.fill_edges {
            let stroke = Stroke {
                width: FACE_EDGE_WIDTH,
                line_join: LineJoin::Round,
                ..Stroke::default()
            };
            self.pixmap
                .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
        self.primitives += 1;
        Ok(())
    }

    /// Stroke a polyline given in data coordinates.
    pub fn stroke_polyline(
        &mut self,
        points: &[(f64, f64)],
        style: LineStyle,
        closed: bool,
    ) -> PlotResult<()> {
        if points.len() < 2 || style.width <= 0.0 {
            return Ok(());
        }
        let Some(path) = self.path_from(points, closed)? else {
            return Ok(());
        };

        let mut stroke = Stroke {
            width: style.width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        if style.dotted {
            stroke.line_cap = LineCap::Butt;
            stroke.dash = StrokeDash::new(vec![style.width, style.width * 1.65], 0.0);
        }

        self.pixmap.stroke_path(
            &path,
            &paint_for(style.color),
            &stroke,
            Transform::identity(),
            None,
        );
        self.primitives += 1;
        Ok(())
    }

    /// Draw an arrow from `tail` to `tip` (data coordinates).
    pub fn draw_arrow(
        &mut self,
        tail: (f64, f64),
        tip: (f64, f64),
        color: Color,
        width: f32,
    ) -> PlotResult<()> {
        let (dx, dy) = (tip.0 - tail.0, tip.1 - tail.1);
        let len = (dx * dx + dy * dy).sqrt();
        if len == 0.0 || !len.is_finite() {
            return Ok(());
        }
        let style = LineStyle::solid(color, width);
        self.stroke_polyline(&[tail, tip], style, false)?;

        let head = len * ARROW_HEAD_FRACTION;
        let angle = dy.atan2(dx);
        let barb = |side: f64| {
            let a = angle + std::f64::consts::PI - side * ARROW_HEAD_ANGLE;
            (tip.0 + head * a.cos(), tip.1 + head * a.sin())
        };
        self.fill_polygon(&[tip, barb(1.0), barb(-1.0)], color)
    }

    /// Demultiplied color of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let p = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::new(p.red(), p.green(), p.blue(), p.alpha()))
    }

    /// Demultiplied RGBA bytes, row-major.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixmap.data().len());
        for p in self.pixmap.pixels() {
            let c = p.demultiply();
            out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        out
    }

    /// Encode the figure as PNG.
    pub fn encode_png(&self) -> PlotResult<Vec<u8>> {
        png::create_png_auto(&self.to_rgba(), self.width() as usize, self.height() as usize)
    }

    /// Encode and write the figure to a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> PlotResult<()> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

fn paint_for(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}
