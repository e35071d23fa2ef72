//! Painter abstraction: the 2D surface every drawing procedure emits to.
//!
//! A painter owns a stack of [`PaintState`] (pen, brush, font, transform)
//! and accepts vector primitives in the current coordinate system. Two
//! backends ship with the crate: [`RecordingPainter`] keeps a log of every
//! call and [`SvgPainter`] produces a standalone SVG document.
//!
//! State restoration is structural: wrap the painter in a [`Scoped`] guard
//! and every mutation made through it is undone when the guard drops.

mod recording;
mod scoped;
mod svg;

pub use recording::{PaintOp, RecordingPainter};
pub use scoped::Scoped;
pub use svg::SvgPainter;

use image::RgbaImage;
use kurbo::{Affine, BezPath, Cap, Join, Line, Point, Rect, Stroke, Vec2};
use peniko::{Brush, Color, Fill};
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// Pen
// ═══════════════════════════════════════════════════════════════════════

/// How a pen strokes its outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenStyle {
    NoPen,
    Solid,
    Dash,
    Dot,
    /// Dash pattern taken from [`Pen::dash_pattern`].
    Custom,
}

/// Stroke description. Dash patterns are expressed in multiples of the
/// pen width, so a pattern of `[3, 3]` on a 0.5 wide pen produces 1.5 long
/// dashes.
#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    pub color: Color,
    pub width: f64,
    pub style: PenStyle,
    pub cap: Cap,
    pub join: Join,
    pub dash_pattern: Vec<f64>,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            style: PenStyle::Solid,
            cap: Cap::Square,
            join: Join::Bevel,
            dash_pattern: Vec::new(),
        }
    }
}

impl From<Color> for Pen {
    fn from(color: Color) -> Self {
        Self { color, ..Self::default() }
    }
}

impl Pen {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width, ..Self::default() }
    }

    pub fn none() -> Self {
        Self { style: PenStyle::NoPen, ..Self::default() }
    }

    pub fn with_style(mut self, style: PenStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_cap(mut self, cap: Cap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_join(mut self, join: Join) -> Self {
        self.join = join;
        self
    }

    /// Switch to a custom dash pattern (in pen-width units).
    pub fn with_dash_pattern(mut self, pattern: Vec<f64>) -> Self {
        self.style = PenStyle::Custom;
        self.dash_pattern = pattern;
        self
    }

    pub fn is_none(&self) -> bool {
        self.style == PenStyle::NoPen
    }

    /// Dash pattern in pen-width units, empty for solid pens.
    pub fn effective_pattern(&self) -> Vec<f64> {
        match self.style {
            PenStyle::NoPen | PenStyle::Solid => Vec::new(),
            PenStyle::Dash => vec![4.0, 2.0],
            PenStyle::Dot => vec![1.0, 2.0],
            PenStyle::Custom => self.dash_pattern.clone(),
        }
    }

    /// Convert to an absolute kurbo stroke. A zero width pen is cosmetic
    /// and strokes one unit wide.
    pub fn to_stroke(&self) -> Option<Stroke> {
        if self.is_none() {
            return None;
        }
        let width = if self.width > 0.0 { self.width } else { 1.0 };
        let mut stroke = Stroke::new(width).with_caps(self.cap).with_join(self.join);
        let pattern = self.effective_pattern();
        if !pattern.is_empty() {
            stroke = stroke.with_dashes(0.0, pattern.iter().map(|d| d * width));
        }
        Some(stroke)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Font & text alignment
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    /// Size in drawing units (already scaled for the target spatium).
    pub size: f64,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub strike: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "Edwin".to_string(),
            size: 10.0,
            bold: false,
            italic: false,
            underline: false,
            strike: false,
        }
    }
}

impl Font {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self { family: family.into(), size, ..Self::default() }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HAlign {
    #[default]
    Left,
    HCenter,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VAlign {
    #[default]
    Top,
    VCenter,
    Bottom,
    Baseline,
}

/// Placement of text inside a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Align {
    pub h: HAlign,
    pub v: VAlign,
}

impl Align {
    pub const TOP_LEFT: Align = Align { h: HAlign::Left, v: VAlign::Top };
    pub const CENTER: Align = Align { h: HAlign::HCenter, v: VAlign::VCenter };
    pub const BASELINE_CENTER: Align = Align { h: HAlign::HCenter, v: VAlign::Baseline };
}

/// One positioned glyph of a symbol run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub pos: Point,
}

// ═══════════════════════════════════════════════════════════════════════
// Paint state
// ═══════════════════════════════════════════════════════════════════════

/// The mutable part of a painter, saved and restored as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintState {
    pub pen: Pen,
    /// `None` means shapes are not filled.
    pub brush: Option<Brush>,
    pub font: Font,
    pub transform: Affine,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            pen: Pen::default(),
            brush: None,
            font: Font::default(),
            transform: Affine::IDENTITY,
        }
    }
}

/// Current state plus the saved stack, shared by the bundled backends.
#[derive(Debug, Clone, Default)]
pub struct StateStack {
    current: PaintState,
    saved: Vec<PaintState>,
}

impl StateStack {
    pub fn current(&self) -> &PaintState {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut PaintState {
        &mut self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    pub fn restore(&mut self) {
        match self.saved.pop() {
            Some(state) => self.current = state,
            None => tracing::warn!("painter restore() without matching save()"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Painter trait
// ═══════════════════════════════════════════════════════════════════════

/// Abstract drawing surface.
///
/// Coordinates are in the current transform's local space. Transform
/// helpers compose on the right, so `translate` then `rotate` rotates
/// around the translated origin.
pub trait Painter {
    fn state(&self) -> &PaintState;
    fn state_mut(&mut self) -> &mut PaintState;
    fn save(&mut self);
    fn restore(&mut self);

    fn pen(&self) -> &Pen {
        &self.state().pen
    }

    fn set_pen(&mut self, pen: Pen) {
        self.state_mut().pen = pen;
    }

    fn set_no_pen(&mut self) {
        self.state_mut().pen.style = PenStyle::NoPen;
    }

    fn brush(&self) -> Option<&Brush> {
        self.state().brush.as_ref()
    }

    fn set_brush(&mut self, brush: Option<Brush>) {
        self.state_mut().brush = brush;
    }

    fn set_brush_color(&mut self, color: Color) {
        self.set_brush(Some(Brush::Solid(color)));
    }

    fn set_no_brush(&mut self) {
        self.set_brush(None);
    }

    fn font(&self) -> &Font {
        &self.state().font
    }

    fn set_font(&mut self, font: Font) {
        self.state_mut().font = font;
    }

    fn transform(&self) -> Affine {
        self.state().transform
    }

    fn set_transform(&mut self, transform: Affine) {
        self.state_mut().transform = transform;
    }

    fn translate(&mut self, offset: Vec2) {
        let t = self.transform() * Affine::translate(offset);
        self.set_transform(t);
    }

    /// Rotate by `degrees`, clockwise in a y-down space.
    fn rotate(&mut self, degrees: f64) {
        let t = self.transform() * Affine::rotate(degrees.to_radians());
        self.set_transform(t);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        let t = self.transform() * Affine::scale_non_uniform(sx, sy);
        self.set_transform(t);
    }

    // ── primitives ──

    fn draw_line(&mut self, line: Line);
    fn draw_polyline(&mut self, points: &[Point]);
    fn draw_polygon(&mut self, points: &[Point], fill: Fill);
    /// Stroke with the current pen and fill with the current brush.
    fn draw_path(&mut self, path: &BezPath);
    fn stroke_path(&mut self, path: &BezPath, pen: &Pen);
    fn fill_path(&mut self, path: &BezPath, brush: &Brush);
    fn draw_rect(&mut self, rect: Rect);
    fn draw_rounded_rect(&mut self, rect: Rect, rx: f64, ry: f64);
    fn draw_ellipse(&mut self, rect: Rect);
    /// Angles in 1/16th of a degree, counter-clockwise from 3 o'clock.
    fn draw_arc(&mut self, rect: Rect, start_angle: i32, span_angle: i32);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// `pos` is the left end of the baseline.
    fn draw_text(&mut self, pos: Point, text: &str);
    fn draw_text_in_rect(&mut self, rect: Rect, align: Align, text: &str);
    /// Draw glyphs of `font` in the current pen colour.
    fn draw_glyphs(&mut self, font: &Font, glyphs: &[Glyph]);
    fn draw_pixmap(&mut self, target: Rect, pixmap: &RgbaImage);
    fn draw_svg(&mut self, target: Rect, source: &str);

    fn draw_lines(&mut self, lines: &[Line]) {
        for line in lines {
            self.draw_line(*line);
        }
    }
}
