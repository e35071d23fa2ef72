//! Painter that records every call instead of rasterizing.

use image::RgbaImage;
use kurbo::{BezPath, Line, Point, Rect};
use peniko::{Brush, Color, Fill};

use super::{Align, Font, Glyph, PaintState, Painter, Pen, StateStack};

/// One recorded primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    Line(Line),
    Polyline(Vec<Point>),
    Polygon(Vec<Point>, Fill),
    Path(BezPath),
    StrokePath(BezPath, Pen),
    FillPath(BezPath, Brush),
    Rect(Rect),
    RoundedRect(Rect, f64, f64),
    Ellipse(Rect),
    Arc(Rect, i32, i32),
    FillRect(Rect, Color),
    Text(Point, String),
    TextInRect(Rect, Align, String),
    Glyphs(Font, Vec<Glyph>),
    Pixmap(Rect, u32, u32),
    Svg(Rect, usize),
}

/// A primitive together with the paint state it was issued under.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub op: PaintOp,
    pub state: PaintState,
}

#[derive(Debug, Default)]
pub struct RecordingPainter {
    stack: StateStack,
    calls: Vec<Recorded>,
    saves: usize,
    restores: usize,
    state_writes: usize,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[Recorded] {
        &self.calls
    }

    pub fn ops(&self) -> Vec<&PaintOp> {
        self.calls.iter().map(|c| &c.op).collect()
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }

    pub fn restore_count(&self) -> usize {
        self.restores
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Every call that reached the painter: primitives, state writes and
    /// save/restore pairs.
    pub fn call_count(&self) -> usize {
        self.calls.len() + self.saves + self.restores + self.state_writes
    }

    /// All drawn lines mapped to device space.
    pub fn device_lines(&self) -> Vec<Line> {
        self.calls
            .iter()
            .filter_map(|c| match c.op {
                PaintOp::Line(l) => Some(Line::new(c.state.transform * l.p0, c.state.transform * l.p1)),
                _ => None,
            })
            .collect()
    }

    /// All drawn glyphs as (char, device position).
    pub fn device_glyphs(&self) -> Vec<(char, Point)> {
        self.calls
            .iter()
            .flat_map(|c| match &c.op {
                PaintOp::Glyphs(_, glyphs) => glyphs
                    .iter()
                    .map(|g| (g.ch, c.state.transform * g.pos))
                    .collect::<Vec<_>>(),
                _ => Vec::new(),
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.saves = 0;
        self.restores = 0;
        self.state_writes = 0;
    }

    fn push(&mut self, op: PaintOp) {
        let state = self.stack.current().clone();
        self.calls.push(Recorded { op, state });
    }
}

impl Painter for RecordingPainter {
    fn state(&self) -> &PaintState {
        self.stack.current()
    }

    fn state_mut(&mut self) -> &mut PaintState {
        self.state_writes += 1;
        self.stack.current_mut()
    }

    fn save(&mut self) {
        self.saves += 1;
        self.stack.save();
    }

    fn restore(&mut self) {
        self.restores += 1;
        self.stack.restore();
    }

    fn draw_line(&mut self, line: Line) {
        self.push(PaintOp::Line(line));
    }

    fn draw_polyline(&mut self, points: &[Point]) {
        self.push(PaintOp::Polyline(points.to_vec()));
    }

    fn draw_polygon(&mut self, points: &[Point], fill: Fill) {
        self.push(PaintOp::Polygon(points.to_vec(), fill));
    }

    fn draw_path(&mut self, path: &BezPath) {
        self.push(PaintOp::Path(path.clone()));
    }

    fn stroke_path(&mut self, path: &BezPath, pen: &Pen) {
        self.push(PaintOp::StrokePath(path.clone(), pen.clone()));
    }

    fn fill_path(&mut self, path: &BezPath, brush: &Brush) {
        self.push(PaintOp::FillPath(path.clone(), brush.clone()));
    }

    fn draw_rect(&mut self, rect: Rect) {
        self.push(PaintOp::Rect(rect));
    }

    fn draw_rounded_rect(&mut self, rect: Rect, rx: f64, ry: f64) {
        self.push(PaintOp::RoundedRect(rect, rx, ry));
    }

    fn draw_ellipse(&mut self, rect: Rect) {
        self.push(PaintOp::Ellipse(rect));
    }

    fn draw_arc(&mut self, rect: Rect, start_angle: i32, span_angle: i32) {
        self.push(PaintOp::Arc(rect, start_angle, span_angle));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(PaintOp::FillRect(rect, color));
    }

    fn draw_text(&mut self, pos: Point, text: &str) {
        self.push(PaintOp::Text(pos, text.to_string()));
    }

    fn draw_text_in_rect(&mut self, rect: Rect, align: Align, text: &str) {
        self.push(PaintOp::TextInRect(rect, align, text.to_string()));
    }

    fn draw_glyphs(&mut self, font: &Font, glyphs: &[Glyph]) {
        self.push(PaintOp::Glyphs(font.clone(), glyphs.to_vec()));
    }

    fn draw_pixmap(&mut self, target: Rect, pixmap: &RgbaImage) {
        self.push(PaintOp::Pixmap(target, pixmap.width(), pixmap.height()));
    }

    fn draw_svg(&mut self, target: Rect, source: &str) {
        self.push(PaintOp::Svg(target, source.len()));
    }
}
