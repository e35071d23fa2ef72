//! Spanner segments: text lines and their hooks, hairpins, glissandi,
//! slurs and ties, wiggle lines, lyric extenders and guitar bends.

use kurbo::{BezPath, Cap, Join, Line, Point, Rect, Vec2};
use peniko::Color;

use super::constants::*;
use super::text::draw_text_base;
use super::{cur_color, cur_color_with, draw_syms, sym_bbox, RenderContext};
use crate::model::*;
use crate::painter::{Align, HAlign, Painter, Pen, PenStyle, Scoped, VAlign};
use crate::style::{Sid, SPATIUM20};
use crate::symbols::SymId;

// ═══════════════════════════════════════════════════════════════════════
// Dash patterns
// ═══════════════════════════════════════════════════════════════════════

/// Stretch the gap of a `dash`/`gap` pattern so whole dashes tile a line
/// of `length` with a dash at both ends.
///
/// All three values share one unit (the renderer passes pen widths). The
/// result satisfies `dash * (n + 1) + gap' * n == length` with
/// `n = max(1, trunc(length / (dash + gap)))`. The returned gap can be
/// negative when the line is shorter than two dashes.
pub fn distributed_dash_pattern(dash: f64, gap: f64, length: f64) -> [f64; 2] {
    let period = dash + gap;
    if period <= 0.0 {
        return [dash, gap];
    }
    let pairs = (length / period).trunc().max(1.0);
    [dash, (length - dash * (pairs + 1.0)) / pairs]
}

/// Pen pattern for a distributed dash; overlapping dashes draw solid.
fn pattern_pen(pen: &Pen, dash: f64, gap: f64, length: f64) -> Pen {
    let unit = if pen.width > 0.0 { pen.width } else { 1.0 };
    let [d, g] = distributed_dash_pattern(dash, gap, length / unit);
    pen.clone().with_dash_pattern(vec![d, g.max(0.0)])
}

// ═══════════════════════════════════════════════════════════════════════
// Text line segments
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn draw_line_segment(props: &ItemProps, item: &LineSegment, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    draw_text_line(props, &item.settings, layout, p, ctx);
}

/// Captions, then the line with its hooks.
fn draw_text_line(
    props: &ItemProps,
    settings: &TextLineSettings,
    layout: &LineSegmentLayout,
    p: &mut dyn Painter,
    ctx: &RenderContext,
) {
    for caption in [&settings.begin_text, &settings.end_text].into_iter().flatten() {
        draw_caption(props, caption, p, ctx);
    }

    let opts = &ctx.options;
    if layout.points.is_empty() || ((opts.printing || !opts.show_invisible) && !settings.line_visible) {
        return;
    }

    let color = cur_color_with(props, ctx, props.visible && settings.line_visible, settings.line_color);
    let line_width = settings.line_width * props.mag;
    let solid_pen = Pen::new(color, line_width).with_cap(Cap::Butt).with_join(Join::Miter);
    let mut pen = solid_pen.clone();

    let (dash, gap) = match settings.line_style {
        LineStyle::Solid => (0.0, 0.0),
        LineStyle::Dashed => (settings.dash_line_len, settings.dash_gap_len),
        LineStyle::Dotted => {
            pen.cap = Cap::Round;
            (DOTTED_PATTERN[0], DOTTED_PATTERN[1])
        }
    };
    let non_solid = settings.line_style != LineStyle::Solid;

    if layout.two_lines {
        if non_solid {
            pen = pen.with_dash_pattern(vec![dash, gap]);
        }
        p.set_pen(pen.with_join(Join::Bevel));
        if !layout.joined_hairpin.is_empty() && !non_solid {
            p.draw_polyline(&layout.joined_hairpin);
        } else {
            let rays: Vec<Line> = layout.points.chunks_exact(2).take(2).map(|w| Line::new(w[0], w[1])).collect();
            p.draw_lines(&rays);
        }
        return;
    }

    let pts = &layout.points;
    let mut start = 0;
    let mut end = pts.len();

    if settings.segment_type.is_single_begin() && settings.begin_hook != HookType::None {
        let t_hook = settings.begin_hook == HookType::Hook90T;
        if (non_solid || t_hook) && end - start >= 2 {
            let hook = Line::new(pts[start], pts[start + 1]);
            start += 2;
            p.set_pen(if t_hook { solid_pen.clone() } else { pattern_pen(&pen, dash, gap, hook.length()) });
            p.draw_line(hook);
        }
    }

    if settings.segment_type.is_single_end() && settings.end_hook != HookType::None {
        let t_hook = settings.end_hook == HookType::Hook90T;
        if (non_solid || t_hook) && end - start >= 2 {
            let hook = Line::new(pts[end - 1], pts[end - 2]);
            end -= 2;
            p.set_pen(if t_hook { solid_pen.clone() } else { pattern_pen(&pen, dash, gap, hook.length()) });
            p.draw_line(hook);
        }
    }

    if non_solid {
        pen = pattern_pen(&pen, dash, gap, layout.line_length);
    }
    p.set_pen(pen);
    p.draw_polyline(&pts[start..end]);
}

fn draw_caption(line_props: &ItemProps, caption: &Caption, p: &mut dyn Painter, ctx: &RenderContext) {
    let props = ItemProps { visible: line_props.visible, ..caption.props.clone() };
    let mut scope = Scoped::new(p);
    scope.translate(caption.props.pos.to_vec2());
    draw_text_base(&props, &caption.text, &mut scope, ctx);
}

// ═══════════════════════════════════════════════════════════════════════
// Hairpins
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn draw_hairpin_segment(props: &ItemProps, item: &HairpinSegment, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    let settings = &item.settings;
    draw_text_line(props, settings, &layout.line, p, ctx);

    if let Some(tip) = layout.circled_tip {
        let color = cur_color_with(props, ctx, props.visible, settings.line_color);
        p.set_pen(Pen::new(color, settings.line_width * item.staff_mag));
        p.set_no_brush();
        let d = 2.0 * tip.radius;
        p.draw_ellipse(Rect::from_center_size(tip.center, (d, d)));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Glissando
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn draw_glissando_segment(
    props: &ItemProps,
    item: &GlissandoSegment,
    p: &mut dyn Painter,
    ctx: &RenderContext,
) {
    let Some(layout) = &item.layout else {
        return;
    };
    let (w, h) = (layout.pos2.x, layout.pos2.y);
    if w <= 0.0 {
        return;
    }
    let sp = props.spatium;
    let color = cur_color_with(props, ctx, props.visible, item.line_color);
    p.set_pen(Pen::new(color, item.line_width).with_cap(Cap::Round));

    // turn the segment horizontal
    let l = w.hypot(h);
    let wi = (-h / l).asin().to_degrees();
    p.rotate(-wi);

    match item.glissando_type {
        GlissandoType::Straight => p.draw_line(Line::new(Point::ORIGIN, (l, 0.0))),
        GlissandoType::Wavy => {
            let b = sym_bbox(ctx, props, SymId::WiggleTrill);
            let a = ctx.symbols.advance(SymId::WiggleTrill, props.mag_s());
            if a > 0.0 {
                let n = (l / a).trunc() as usize;
                let x = (l - n as f64 * a) * 0.5;
                let ids = vec![SymId::WiggleTrill; n];
                draw_syms(p, ctx, props, &ids, Point::new(x, -(b.y0 + b.height() * 0.5)));
            }
        }
    }

    if item.show_text {
        let mut font = item.font.clone();
        font.size = item.font.size * sp / SPATIUM20;
        let r = ctx.metrics.bounding_rect(&font, &item.text);
        // captions that do not fit are dropped
        if r.width() < l {
            let raise = match item.glissando_type {
                GlissandoType::Straight => GLISS_TEXT_RAISE_STRAIGHT,
                GlissandoType::Wavy => GLISS_TEXT_RAISE_WAVY,
            };
            let y_offset = r.height() + r.y0 + sp * raise;
            font.size *= ctx.options.pixel_ratio;
            p.set_font(font);
            p.draw_text(Point::new((l - r.width()) * 0.5, -y_offset), &item.text);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Slurs and ties
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn draw_slur_segment(props: &ItemProps, item: &SlurTieSegment, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    draw_slur_tie(props, item, &layout.path, p, ctx);
}

pub(super) fn draw_tie_segment(props: &ItemProps, item: &SlurTieSegment, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    // tie into the second chord of a cross-measure value
    if item.ends_cross_measure {
        return;
    }
    draw_slur_tie(props, item, &layout.path, p, ctx);
}

fn draw_slur_tie(props: &ItemProps, item: &SlurTieSegment, path: &BezPath, p: &mut dyn Painter, ctx: &RenderContext) {
    let color = cur_color(props, ctx);
    let mut pen = Pen::from(color);
    let dotted_width = ctx.style.mm(Sid::SlurDottedWidth) * item.staff_mag;

    match item.style {
        SlurStyle::Solid => {
            p.set_brush_color(color);
            pen = pen.with_cap(Cap::Round).with_join(Join::Round);
            pen.width = ctx.style.mm(Sid::SlurEndWidth) * item.staff_mag;
        }
        SlurStyle::Dotted => {
            p.set_no_brush();
            pen = pen.with_cap(Cap::Round).with_dash_pattern(DOTTED_PATTERN.to_vec());
            pen.width = dotted_width;
        }
        SlurStyle::Dashed => {
            p.set_no_brush();
            pen = pen.with_dash_pattern(DASHED_PATTERN.to_vec());
            pen.width = dotted_width;
        }
        SlurStyle::WideDashed => {
            p.set_no_brush();
            pen = pen.with_dash_pattern(WIDE_DASHED_PATTERN.to_vec());
            pen.width = dotted_width;
        }
        SlurStyle::Undefined => {}
    }
    p.set_pen(pen);
    p.draw_path(path);
}

// ═══════════════════════════════════════════════════════════════════════
// Wiggles, lyric lines, tremolo bars
// ═══════════════════════════════════════════════════════════════════════

/// Trill and vibrato segments.
pub(super) fn draw_wiggle_segment(props: &ItemProps, item: &WiggleSegment, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    p.set_pen(Pen::from(cur_color(props, ctx)));
    draw_syms(p, ctx, props, &layout.syms, Point::ORIGIN);
}

pub(super) fn draw_lyrics_line_segment(
    props: &ItemProps,
    item: &LyricsLineSegment,
    p: &mut dyn Painter,
    ctx: &RenderContext,
) {
    let Some(layout) = &item.layout else {
        return;
    };
    if layout.num_dashes < 1 {
        return;
    }
    p.set_pen(Pen::new(cur_color(props, ctx), item.line_width).with_cap(Cap::Butt));
    if item.end_melisma {
        p.draw_line(Line::new(Point::ORIGIN, layout.pos2));
        return;
    }
    let step = layout.pos2.x / f64::from(layout.num_dashes);
    let mut x = step * 0.5 - layout.dash_length * 0.5;
    for _ in 0..layout.num_dashes {
        p.draw_line(Line::new((x, 0.0), (x + layout.dash_length, 0.0)));
        x += step;
    }
}

pub(super) fn draw_tremolo_bar(props: &ItemProps, item: &TremoloBar, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    p.set_pen(
        Pen::new(cur_color(props, ctx), item.line_width)
            .with_cap(Cap::Round)
            .with_join(Join::Round),
    );
    p.draw_polyline(&layout.points);
}

// ═══════════════════════════════════════════════════════════════════════
// Bends
// ═══════════════════════════════════════════════════════════════════════

const TONE_LABELS: [&str; 13] = [
    "", "1/4", "1/2", "3/4", "full", "1 1/4", "1 1/2", "1 3/4", "2", "2 1/4", "2 1/2", "2 3/4", "3",
];

/// Label for a bend of `quarters` quarter tones, clamped to three tones.
pub(crate) fn tone_label(quarters: i32) -> String {
    let i = quarters.clamp(0, TONE_LABELS.len() as i32 - 1) as usize;
    TONE_LABELS[i].to_string()
}

/// Cubic from `from` to `to`, flat at the start and steep at the end.
pub(crate) fn bend_curve(from: Point, to: Point) -> BezPath {
    let d = to - from;
    let mut path = BezPath::new();
    path.move_to(from);
    path.curve_to((from.x + d.x / 2.0, from.y), (to.x, from.y + d.y / 4.0), (to.x, to.y));
    path
}

fn arrow(tip: Point, width: f64, up: bool) -> [Point; 3] {
    let dy = if up { width } else { -width };
    [tip, tip + Vec2::new(width * 0.5, dy), tip + Vec2::new(-width * 0.5, dy)]
}

const LABEL_ALIGN: Align = Align { h: HAlign::HCenter, v: VAlign::Bottom };

fn draw_label(p: &mut dyn Painter, at: Point, text: &str) {
    if !text.is_empty() {
        p.draw_text_in_rect(Rect::from_origin_size(at, (0.0, 0.0)), LABEL_ALIGN, text);
    }
}

fn bend_font(font: &crate::painter::Font, sp: f64, ctx: &RenderContext) -> crate::painter::Font {
    let mut f = font.clone();
    f.size = font.size * sp * ctx.options.pixel_ratio / SPATIUM20;
    f
}

/// Pitches are hundredths of a semitone; labels round to quarter tones.
fn pitch_label(pitch: i32) -> String {
    tone_label((pitch + 12) / 25)
}

pub(super) fn draw_bend(props: &ItemProps, item: &Bend, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    let sp = props.spatium;
    let color = cur_color(props, ctx);
    p.set_pen(
        Pen::new(color, item.line_width)
            .with_cap(Cap::Round)
            .with_join(Join::Round),
    );
    p.set_brush_color(color);
    p.set_font(bend_font(&item.font, sp, ctx));

    let aw = ctx.style.mm(Sid::BendArrowWidth);
    let peak_y = -layout.note_pos.y - sp * BEND_PEAK_Y;
    let mut x = layout.note_width + sp * BEND_START_X;
    let mut y = sp * BEND_START_Y;

    let pts = &item.points;
    for (i, pair) in pts.windows(2).enumerate() {
        let (pitch, next) = (pair[0].pitch, pair[1].pitch);
        if i == 0 && pitch != 0 {
            p.draw_line(Line::new((x, y), (x, peak_y)));
            p.set_brush_color(color);
            p.draw_polygon(&arrow(Point::new(x, peak_y), aw, true), peniko::Fill::NonZero);
            draw_label(p, Point::new(x, peak_y), &pitch_label(pitch));
            y = peak_y;
        }

        let (x2, y2);
        if pitch == next {
            if i == pts.len() - 2 {
                break;
            }
            x2 = x + sp;
            y2 = y;
            p.draw_line(Line::new((x, y), (x2, y2)));
        } else {
            let up = pitch < next;
            x2 = x + sp * BEND_UP_DX;
            y2 = if up { peak_y } else { y + sp * BEND_DOWN_DY };
            p.set_no_brush();
            p.draw_path(&bend_curve(Point::new(x, y), Point::new(x2, y2)));
            p.set_brush_color(color);
            p.draw_polygon(&arrow(Point::new(x2, y2), aw, up), peniko::Fill::NonZero);
            if up {
                draw_label(p, Point::new(x2, y2), &pitch_label(next));
            }
        }
        x = x2;
        y = y2;
    }
}

pub(super) fn draw_stretched_bend(props: &ItemProps, item: &StretchedBend, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    let sp = props.spatium;
    let color: Color = cur_color(props, ctx);
    p.set_pen(
        Pen::new(color, item.line_width)
            .with_cap(Cap::Round)
            .with_join(Join::Round),
    );
    p.set_brush_color(color);
    p.set_font(bend_font(&item.font, sp, ctx));

    let aw = layout.arrow_width;
    let mut text_drawn = false;

    for seg in layout.segments.iter().filter(|s| s.visible) {
        let label_at = seg.dest - Vec2::new(0.0, sp * BEND_LABEL_RAISE);
        match seg.segment_type {
            BendSegmentType::LineUp => {
                p.draw_line(Line::new(seg.src, seg.dest));
                p.set_brush_color(color);
                p.draw_polygon(&arrow(seg.dest, aw, true), peniko::Fill::NonZero);
                draw_label(p, label_at, &tone_label(seg.tone));
            }
            BendSegmentType::CurveUp | BendSegmentType::CurveDown => {
                let up = seg.segment_type == BendSegmentType::CurveUp;
                let end_y = seg.dest.y + if up { aw } else { -aw };
                p.set_no_brush();
                p.draw_path(&bend_curve(seg.src, Point::new(seg.dest.x, end_y)));
                p.set_brush_color(color);
                p.draw_polygon(&arrow(seg.dest, aw, up), peniko::Fill::NonZero);
                if up && !text_drawn {
                    draw_label(p, label_at, &tone_label(seg.tone));
                    text_drawn = true;
                }
            }
            BendSegmentType::LineStroked => {
                let mut path = BezPath::new();
                path.move_to(seg.src + Vec2::new(aw, 0.0));
                path.line_to(seg.dest);
                let pen = p.pen().clone().with_style(PenStyle::Dash);
                p.stroke_path(&path, &pen);
            }
            BendSegmentType::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painter::{PaintOp, RecordingPainter};
    use crate::renderer::Resources;
    use pretty_assertions::assert_eq;

    fn dashed(style: LineStyle) -> LineSegment {
        LineSegment {
            settings: TextLineSettings { line_style: style, line_width: 1.0, ..TextLineSettings::default() },
            layout: Some(LineSegmentLayout {
                points: vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
                line_length: 100.0,
                ..LineSegmentLayout::default()
            }),
        }
    }

    #[test]
    fn dash_tiles_the_line() {
        let [d, g] = distributed_dash_pattern(5.0, 5.0, 100.0);
        assert_eq!(d, 5.0);
        assert!((d * 11.0 + g * 10.0 - 100.0).abs() < 1e-9);
        assert!(g > 0.0);
    }

    #[test]
    fn short_line_gets_one_pair() {
        let [d, g] = distributed_dash_pattern(5.0, 5.0, 7.0);
        assert!((d * 2.0 + g - 7.0).abs() < 1e-9);
    }

    #[test]
    fn dashed_segment_uses_distributed_pattern() {
        let res = Resources::default();
        let ctx = res.context();
        let mut rec = RecordingPainter::new();
        draw_line_segment(&ItemProps::default(), &dashed(LineStyle::Dashed), &mut rec, &ctx);
        let pen = &rec.calls().last().unwrap().state.pen;
        assert_eq!(pen.style, PenStyle::Custom);
        assert_eq!(pen.dash_pattern, vec![5.0, 4.5]);
        assert_eq!(pen.cap, Cap::Butt);
    }

    #[test]
    fn dotted_segment_has_round_dots() {
        let res = Resources::default();
        let ctx = res.context();
        let mut rec = RecordingPainter::new();
        draw_line_segment(&ItemProps::default(), &dashed(LineStyle::Dotted), &mut rec, &ctx);
        let pen = &rec.calls().last().unwrap().state.pen;
        assert_eq!(pen.cap, Cap::Round);
    }

    #[test]
    fn invisible_line_hidden_when_printing() {
        let mut res = Resources::default();
        res.options = crate::config::RenderOptions::print();
        let ctx = res.context();
        let mut seg = dashed(LineStyle::Solid);
        seg.settings.line_visible = false;
        let mut rec = RecordingPainter::new();
        draw_line_segment(&ItemProps::default(), &seg, &mut rec, &ctx);
        assert_eq!(rec.call_count(), 0);
    }

    #[test]
    fn t_hook_is_drawn_solid_on_a_dashed_line() {
        let res = Resources::default();
        let ctx = res.context();
        let mut seg = dashed(LineStyle::Dashed);
        seg.settings.begin_hook = HookType::Hook90T;
        seg.layout = Some(LineSegmentLayout {
            points: vec![
                Point::new(0.0, -10.0),
                Point::new(0.0, 10.0),
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
            ],
            line_length: 100.0,
            ..LineSegmentLayout::default()
        });
        let mut rec = RecordingPainter::new();
        draw_line_segment(&ItemProps::default(), &seg, &mut rec, &ctx);
        let calls = rec.calls();
        assert_eq!(calls[0].op, PaintOp::Line(Line::new((0.0, -10.0), (0.0, 10.0))));
        assert_eq!(calls[0].state.pen.style, PenStyle::Solid);
        assert_eq!(calls[1].op, PaintOp::Polyline(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]));
    }

    #[test]
    fn caption_offset_does_not_shift_the_line() {
        let res = Resources::default();
        let ctx = res.context();
        let mut seg = dashed(LineStyle::Solid);
        let caption_props = ItemProps::default().at(Point::new(50.0, -5.0));
        seg.settings.begin_text = Some(Caption {
            props: caption_props,
            text: TextBase::plain("rit.", crate::painter::Font::new("FreeSerif", 10.0)),
        });
        let mut rec = RecordingPainter::new();
        draw_line_segment(&ItemProps::default(), &seg, &mut rec, &ctx);

        let calls = rec.calls();
        let caption = calls.first().unwrap();
        assert_eq!(caption.state.transform, kurbo::Affine::translate((50.0, -5.0)));
        let line = calls.last().unwrap();
        assert!(matches!(line.op, PaintOp::Polyline(_)));
        assert_eq!(line.state.transform, kurbo::Affine::IDENTITY);
        assert_eq!(rec.depth(), 0);
    }

    #[test]
    fn tone_labels() {
        let labels: Vec<String> = [0, 1, 2, 3, 4, 5, 6, 8, 12].into_iter().map(tone_label).collect();
        assert_eq!(labels, vec!["", "1/4", "1/2", "3/4", "full", "1 1/4", "1 1/2", "2", "3"]);
        assert_eq!(pitch_label(100), "full");
        assert_eq!(pitch_label(50), "1/2");
        assert_eq!(tone_label(13), "3");
        assert_eq!(tone_label(40), "3");
        assert_eq!(tone_label(-2), "");
    }

    #[test]
    fn bend_curve_ends_at_target() {
        let path = bend_curve(Point::new(0.0, 0.0), Point::new(10.0, -20.0));
        let els = path.elements();
        assert_eq!(els.len(), 2);
        assert_eq!(
            els[1],
            kurbo::PathEl::CurveTo(Point::new(5.0, 0.0), Point::new(10.0, -5.0), Point::new(10.0, -20.0))
        );
    }

    #[test]
    fn bend_with_single_point_draws_nothing() {
        let res = Resources::default();
        let ctx = res.context();
        let bend = Bend { points: vec![PitchValue { time: 0, pitch: 100 }], layout: Some(BendLayout::default()), ..Bend::default() };
        let mut rec = RecordingPainter::new();
        draw_bend(&ItemProps::default(), &bend, &mut rec, &ctx);
        assert!(rec.calls().is_empty());
    }

    #[test]
    fn default_bend_draws_curve_arrow_and_label() {
        let res = Resources::default();
        let ctx = res.context();
        let bend = Bend { layout: Some(BendLayout::default()), ..Bend::default() };
        let mut rec = RecordingPainter::new();
        draw_bend(&ItemProps::default(), &bend, &mut rec, &ctx);
        let ops = rec.ops();
        assert!(matches!(ops[0], PaintOp::Path(_)));
        assert!(matches!(ops[1], PaintOp::Polygon(..)));
        assert!(matches!(ops[2], PaintOp::TextInRect(_, _, t) if t == "full"));
        assert_eq!(ops.len(), 3);
    }

    #[test]
    fn tie_into_cross_measure_chord_is_hidden() {
        let res = Resources::default();
        let ctx = res.context();
        let tie = SlurTieSegment { ends_cross_measure: true, layout: Some(PathLayout::default()), ..SlurTieSegment::default() };
        let mut rec = RecordingPainter::new();
        draw_tie_segment(&ItemProps::default(), &tie, &mut rec, &ctx);
        assert_eq!(rec.call_count(), 0);
    }

    #[test]
    fn lyrics_dashes_are_centred_in_their_step() {
        let res = Resources::default();
        let ctx = res.context();
        let seg = LyricsLineSegment {
            layout: Some(LyricsLineLayout { pos2: Point::new(40.0, 0.0), num_dashes: 2, dash_length: 4.0 }),
            ..LyricsLineSegment::default()
        };
        let mut rec = RecordingPainter::new();
        draw_lyrics_line_segment(&ItemProps::default(), &seg, &mut rec, &ctx);
        assert_eq!(
            rec.ops(),
            vec![
                &PaintOp::Line(Line::new((8.0, 0.0), (12.0, 0.0))),
                &PaintOp::Line(Line::new((28.0, 0.0), (32.0, 0.0))),
            ]
        );
    }
}
