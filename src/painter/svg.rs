//! SVG painter: accumulates SVG elements and produces the final string.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::{ImageFormat, RgbaImage};
use kurbo::{Affine, BezPath, Line, Point, Rect, Shape};
use peniko::{Brush, Color, Fill};

use super::{Align, Font, Glyph, HAlign, PaintState, Painter, Pen, StateStack, VAlign};

// ═══════════════════════════════════════════════════════════════════════
// SvgPainter
// ═══════════════════════════════════════════════════════════════════════

pub struct SvgPainter {
    stack: StateStack,
    elements: Vec<String>,
    width: f64,
    height: f64,
}

impl SvgPainter {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            stack: StateStack::default(),
            elements: Vec::new(),
            width,
            height,
        }
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn build(self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">"#,
            self.width, self.height, self.width, self.height
        );
        svg.push('\n');
        for el in &self.elements {
            svg.push_str("  ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    fn transform_attr(&self) -> String {
        let t = self.stack.current().transform;
        if t == Affine::IDENTITY {
            return String::new();
        }
        let [a, b, c, d, e, f] = t.as_coeffs();
        format!(r#" transform="matrix({:.4} {:.4} {:.4} {:.4} {:.3} {:.3})""#, a, b, c, d, e, f)
    }

    fn fill_attr(brush: Option<&Brush>) -> String {
        match brush {
            Some(Brush::Solid(color)) => paint_attr("fill", *color),
            // gradients and images are not produced by any drawing procedure
            Some(_) | None => r#"fill="none""#.to_string(),
        }
    }

    fn push_shape(&mut self, tag: &str, geometry: String, pen: Option<&Pen>, brush: Option<&Brush>) {
        let stroke = match pen {
            Some(pen) => stroke_attrs(pen),
            None => r#"stroke="none""#.to_string(),
        };
        let el = format!(
            "<{} {} {} {}{}/>",
            tag,
            geometry,
            Self::fill_attr(brush),
            stroke,
            self.transform_attr()
        );
        self.elements.push(el);
    }

    fn current_pen(&self) -> Pen {
        self.stack.current().pen.clone()
    }

    fn current_brush(&self) -> Option<Brush> {
        self.stack.current().brush.clone()
    }

    fn text_element(&mut self, x: f64, y: f64, font: &Font, anchor: &str, baseline: &str, content: &str) {
        let color = self.stack.current().pen.color;
        let mut style = String::new();
        if font.bold {
            style.push_str(r#" font-weight="bold""#);
        }
        if font.italic {
            style.push_str(r#" font-style="italic""#);
        }
        if font.underline {
            style.push_str(r#" text-decoration="underline""#);
        }
        self.elements.push(format!(
            r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.2}"{} {} text-anchor="{}" dominant-baseline="{}"{}>{}</text>"#,
            x,
            y,
            escape(&font.family),
            font.size,
            style,
            paint_attr("fill", color),
            anchor,
            baseline,
            self.transform_attr(),
            escape(content)
        ));
    }
}

impl Painter for SvgPainter {
    fn state(&self) -> &PaintState {
        self.stack.current()
    }

    fn state_mut(&mut self) -> &mut PaintState {
        self.stack.current_mut()
    }

    fn save(&mut self) {
        self.stack.save();
    }

    fn restore(&mut self) {
        self.stack.restore();
    }

    fn draw_line(&mut self, line: Line) {
        let pen = self.current_pen();
        let geometry = format!(
            r#"x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}""#,
            line.p0.x, line.p0.y, line.p1.x, line.p1.y
        );
        self.push_shape("line", geometry, Some(&pen), None);
    }

    fn draw_polyline(&mut self, points: &[Point]) {
        let pen = self.current_pen();
        let geometry = format!(r#"points="{}""#, points_attr(points));
        self.push_shape("polyline", geometry, Some(&pen), None);
    }

    fn draw_polygon(&mut self, points: &[Point], fill: Fill) {
        let pen = self.current_pen();
        let brush = self.current_brush();
        let rule = match fill {
            Fill::NonZero => "nonzero",
            Fill::EvenOdd => "evenodd",
        };
        let geometry = format!(r#"points="{}" fill-rule="{}""#, points_attr(points), rule);
        self.push_shape("polygon", geometry, Some(&pen), brush.as_ref());
    }

    fn draw_path(&mut self, path: &BezPath) {
        let pen = self.current_pen();
        let brush = self.current_brush();
        self.push_shape("path", format!(r#"d="{}""#, path.to_svg()), Some(&pen), brush.as_ref());
    }

    fn stroke_path(&mut self, path: &BezPath, pen: &Pen) {
        self.push_shape("path", format!(r#"d="{}""#, path.to_svg()), Some(pen), None);
    }

    fn fill_path(&mut self, path: &BezPath, brush: &Brush) {
        self.push_shape("path", format!(r#"d="{}""#, path.to_svg()), None, Some(brush));
    }

    fn draw_rect(&mut self, rect: Rect) {
        let pen = self.current_pen();
        let brush = self.current_brush();
        let geometry = format!(
            r#"x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}""#,
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height()
        );
        self.push_shape("rect", geometry, Some(&pen), brush.as_ref());
    }

    fn draw_rounded_rect(&mut self, rect: Rect, rx: f64, ry: f64) {
        let pen = self.current_pen();
        let brush = self.current_brush();
        // radii are percentages of the half extents
        let geometry = format!(
            r#"x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="{:.2}" ry="{:.2}""#,
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height(),
            rect.width() * 0.5 * rx / 100.0,
            rect.height() * 0.5 * ry / 100.0
        );
        self.push_shape("rect", geometry, Some(&pen), brush.as_ref());
    }

    fn draw_ellipse(&mut self, rect: Rect) {
        let pen = self.current_pen();
        let brush = self.current_brush();
        let c = rect.center();
        let geometry = format!(
            r#"cx="{:.2}" cy="{:.2}" rx="{:.2}" ry="{:.2}""#,
            c.x,
            c.y,
            rect.width() * 0.5,
            rect.height() * 0.5
        );
        self.push_shape("ellipse", geometry, Some(&pen), brush.as_ref());
    }

    fn draw_arc(&mut self, rect: Rect, start_angle: i32, span_angle: i32) {
        let pen = self.current_pen();
        let c = rect.center();
        let radii = kurbo::Vec2::new(rect.width() * 0.5, rect.height() * 0.5);
        // y-down space: counter-clockwise angles are negative
        let start = -(start_angle as f64 / 16.0).to_radians();
        let sweep = -(span_angle as f64 / 16.0).to_radians();
        let arc = kurbo::Arc::new(c, radii, start, sweep, 0.0);
        let path = arc.to_path(0.1);
        self.push_shape("path", format!(r#"d="{}""#, path.to_svg()), Some(&pen), None);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let path = rect.to_path(0.1);
        self.fill_path(&path, &Brush::Solid(color));
    }

    fn draw_text(&mut self, pos: Point, text: &str) {
        let font = self.stack.current().font.clone();
        self.text_element(pos.x, pos.y, &font, "start", "alphabetic", text);
    }

    fn draw_text_in_rect(&mut self, rect: Rect, align: Align, text: &str) {
        let font = self.stack.current().font.clone();
        let (x, anchor) = match align.h {
            HAlign::Left => (rect.x0, "start"),
            HAlign::HCenter => (rect.center().x, "middle"),
            HAlign::Right => (rect.x1, "end"),
        };
        let (y, baseline) = match align.v {
            VAlign::Top => (rect.y0, "hanging"),
            VAlign::VCenter => (rect.center().y, "central"),
            VAlign::Bottom => (rect.y1, "text-after-edge"),
            VAlign::Baseline => (rect.y1, "alphabetic"),
        };
        self.text_element(x, y, &font, anchor, baseline, text);
    }

    fn draw_glyphs(&mut self, font: &Font, glyphs: &[Glyph]) {
        if glyphs.is_empty() {
            return;
        }
        let color = self.stack.current().pen.color;
        let mut spans = String::new();
        for g in glyphs {
            spans.push_str(&format!(
                r#"<tspan x="{:.2}" y="{:.2}">{}</tspan>"#,
                g.pos.x,
                g.pos.y,
                escape(&g.ch.to_string())
            ));
        }
        self.elements.push(format!(
            r#"<text font-family="{}" font-size="{:.2}" {}{}>{}</text>"#,
            escape(&font.family),
            font.size,
            paint_attr("fill", color),
            self.transform_attr(),
            spans
        ));
    }

    fn draw_pixmap(&mut self, target: Rect, pixmap: &RgbaImage) {
        let mut png = Cursor::new(Vec::new());
        if let Err(e) = pixmap.write_to(&mut png, ImageFormat::Png) {
            tracing::warn!("cannot encode pixmap for SVG output: {e}");
            return;
        }
        let href = format!("data:image/png;base64,{}", BASE64.encode(png.into_inner()));
        self.push_image(target, &href);
    }

    fn draw_svg(&mut self, target: Rect, source: &str) {
        let href = format!("data:image/svg+xml;base64,{}", BASE64.encode(source.as_bytes()));
        self.push_image(target, &href);
    }
}

impl SvgPainter {
    fn push_image(&mut self, target: Rect, href: &str) {
        self.elements.push(format!(
            r#"<image x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" preserveAspectRatio="none" href="{}"{}/>"#,
            target.x0,
            target.y0,
            target.width(),
            target.height(),
            href,
            self.transform_attr()
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Attribute helpers
// ═══════════════════════════════════════════════════════════════════════

fn escape(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn color_hex(color: Color) -> String {
    let c = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

/// `name="#rrggbb"` plus an opacity attribute when not opaque.
fn paint_attr(name: &str, color: Color) -> String {
    let alpha = color.components[3];
    if alpha >= 1.0 {
        format!(r#"{}="{}""#, name, color_hex(color))
    } else {
        format!(r#"{}="{}" {}-opacity="{:.3}""#, name, color_hex(color), name, alpha)
    }
}

fn stroke_attrs(pen: &Pen) -> String {
    let Some(stroke) = pen.to_stroke() else {
        return r#"stroke="none""#.to_string();
    };
    let cap = match stroke.start_cap {
        kurbo::Cap::Butt => "butt",
        kurbo::Cap::Square => "square",
        kurbo::Cap::Round => "round",
    };
    let join = match stroke.join {
        kurbo::Join::Bevel => "bevel",
        kurbo::Join::Miter => "miter",
        kurbo::Join::Round => "round",
    };
    let mut attrs = format!(
        r#"{} stroke-width="{:.3}" stroke-linecap="{}" stroke-linejoin="{}""#,
        paint_attr("stroke", pen.color),
        stroke.width,
        cap,
        join
    );
    if !stroke.dash_pattern.is_empty() {
        let dashes: Vec<String> = stroke.dash_pattern.iter().map(|d| format!("{:.3}", d)).collect();
        attrs.push_str(&format!(r#" stroke-dasharray="{}""#, dashes.join(" ")));
    }
    attrs
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    #[test]
    fn transformed_line_carries_matrix() {
        let mut svg = SvgPainter::new(100.0, 50.0);
        svg.translate(Vec2::new(10.0, 5.0));
        svg.draw_line(Line::new((0.0, 0.0), (20.0, 0.0)));
        let out = svg.build();
        assert!(out.contains("<line"));
        assert!(out.contains("matrix(1.0000 0.0000 0.0000 1.0000 10.000 5.000)"));
    }

    #[test]
    fn text_is_escaped() {
        let mut svg = SvgPainter::new(10.0, 10.0);
        svg.draw_text(Point::ORIGIN, "a<b & c");
        assert!(svg.build().contains("a&lt;b &amp; c"));
    }

    #[test]
    fn dashed_pen_emits_dasharray() {
        let mut svg = SvgPainter::new(10.0, 10.0);
        svg.set_pen(Pen::new(Color::BLACK, 2.0).with_dash_pattern(vec![3.0, 3.0]));
        svg.draw_line(Line::new((0.0, 0.0), (10.0, 0.0)));
        assert!(svg.build().contains(r#"stroke-dasharray="6.000 6.000""#));
    }
}
