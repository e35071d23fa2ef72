//! Lazy save/restore guard.

use image::RgbaImage;
use kurbo::{BezPath, Line, Point, Rect};
use peniko::{Brush, Color, Fill};

use super::{Align, Font, Glyph, PaintState, Painter};

/// Borrows a painter and restores its state on drop.
///
/// The wrapped painter is only saved on the first state mutation, so a
/// scope that just emits primitives costs nothing. Scopes nest: a
/// `&mut Scoped` is itself a `&mut dyn Painter`.
pub struct Scoped<'p> {
    inner: &'p mut dyn Painter,
    saved: bool,
}

impl<'p> Scoped<'p> {
    pub fn new(inner: &'p mut dyn Painter) -> Self {
        Self { inner, saved: false }
    }

    fn ensure_saved(&mut self) {
        if !self.saved {
            self.inner.save();
            self.saved = true;
        }
    }
}

impl Drop for Scoped<'_> {
    fn drop(&mut self) {
        if self.saved {
            self.inner.restore();
        }
    }
}

impl Painter for Scoped<'_> {
    fn state(&self) -> &PaintState {
        self.inner.state()
    }

    fn state_mut(&mut self) -> &mut PaintState {
        self.ensure_saved();
        self.inner.state_mut()
    }

    fn save(&mut self) {
        self.inner.save();
    }

    fn restore(&mut self) {
        self.inner.restore();
    }

    fn draw_line(&mut self, line: Line) {
        self.inner.draw_line(line);
    }

    fn draw_polyline(&mut self, points: &[Point]) {
        self.inner.draw_polyline(points);
    }

    fn draw_polygon(&mut self, points: &[Point], fill: Fill) {
        self.inner.draw_polygon(points, fill);
    }

    fn draw_path(&mut self, path: &BezPath) {
        self.inner.draw_path(path);
    }

    fn stroke_path(&mut self, path: &BezPath, pen: &super::Pen) {
        self.inner.stroke_path(path, pen);
    }

    fn fill_path(&mut self, path: &BezPath, brush: &Brush) {
        self.inner.fill_path(path, brush);
    }

    fn draw_rect(&mut self, rect: Rect) {
        self.inner.draw_rect(rect);
    }

    fn draw_rounded_rect(&mut self, rect: Rect, rx: f64, ry: f64) {
        self.inner.draw_rounded_rect(rect, rx, ry);
    }

    fn draw_ellipse(&mut self, rect: Rect) {
        self.inner.draw_ellipse(rect);
    }

    fn draw_arc(&mut self, rect: Rect, start_angle: i32, span_angle: i32) {
        self.inner.draw_arc(rect, start_angle, span_angle);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.inner.fill_rect(rect, color);
    }

    fn draw_text(&mut self, pos: Point, text: &str) {
        self.inner.draw_text(pos, text);
    }

    fn draw_text_in_rect(&mut self, rect: Rect, align: Align, text: &str) {
        self.inner.draw_text_in_rect(rect, align, text);
    }

    fn draw_glyphs(&mut self, font: &Font, glyphs: &[Glyph]) {
        self.inner.draw_glyphs(font, glyphs);
    }

    fn draw_pixmap(&mut self, target: Rect, pixmap: &RgbaImage) {
        self.inner.draw_pixmap(target, pixmap);
    }

    fn draw_svg(&mut self, target: Rect, source: &str) {
        self.inner.draw_svg(target, source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painter::{Pen, RecordingPainter};
    use kurbo::Vec2;
    use pretty_assertions::assert_eq;

    #[test]
    fn read_only_scope_never_saves() {
        let mut rec = RecordingPainter::new();
        {
            let mut p = Scoped::new(&mut rec);
            p.draw_line(Line::new((0.0, 0.0), (1.0, 0.0)));
            let _ = p.pen().width;
        }
        assert_eq!(rec.save_count(), 0);
        assert_eq!(rec.ops().len(), 1);
    }

    #[test]
    fn nested_scopes_restore_in_order() {
        let mut rec = RecordingPainter::new();
        let before = rec.state().clone();
        {
            let mut outer = Scoped::new(&mut rec);
            outer.set_pen(Pen::new(Color::WHITE, 4.0));
            {
                let mut inner = Scoped::new(&mut outer);
                inner.translate(Vec2::new(10.0, 0.0));
                inner.rotate(90.0);
            }
            assert_eq!(outer.transform(), kurbo::Affine::IDENTITY);
            assert_eq!(outer.pen().width, 4.0);
        }
        assert_eq!(rec.state(), &before);
        assert_eq!(rec.depth(), 0);
    }
}
