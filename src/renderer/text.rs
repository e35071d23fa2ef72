//! Framed text blocks, chord symbols, figured bass and free symbols.

use kurbo::{Cap, Join, Line, Point, Rect};

use super::constants::*;
use super::{cur_color, cur_color_with, draw_sym, RenderContext};
use crate::model::*;
use crate::painter::{Align, Font, Painter, Pen, Scoped};
use crate::style::{base_spatium, Sid, SPATIUM20};

// ═══════════════════════════════════════════════════════════════════════
// Text base
// ═══════════════════════════════════════════════════════════════════════

/// Draw a text element: optional frame, then every block in the current
/// colour.
pub(super) fn draw_text_base(props: &ItemProps, text: &TextBase, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &text.layout else {
        return;
    };
    paint_text(props, text.frame.as_ref(), text.size_is_spatium_dependent, layout, p, ctx);
}

pub(super) fn paint_text(
    props: &ItemProps,
    frame: Option<&TextFrame>,
    size_is_spatium_dependent: bool,
    layout: &TextLayout,
    p: &mut dyn Painter,
    ctx: &RenderContext,
) {
    if let Some(frame) = frame {
        let base = base_spatium();
        if frame.width != 0.0 {
            let color = cur_color_with(props, ctx, props.visible, frame.color);
            let unit = if size_is_spatium_dependent { props.spatium } else { base };
            p.set_pen(
                Pen::new(color, frame.width * unit)
                    .with_cap(Cap::Square)
                    .with_join(Join::Miter),
            );
        } else {
            p.set_no_pen();
        }
        set_background(p, frame);
        if frame.circle {
            p.draw_ellipse(layout.frame);
        } else {
            let factor = if size_is_spatium_dependent { (props.spatium / base) / 2.0 } else { 0.5 };
            let rx = f64::from(frame.round) * factor;
            let ry = (rx.trunc()).min(99.0);
            p.draw_rounded_rect(layout.frame, rx, ry);
        }
    }
    p.set_no_brush();
    p.set_pen(Pen::from(cur_color(props, ctx)));
    for block in &layout.blocks {
        draw_block(block, p, ctx);
    }
}

fn set_background(p: &mut dyn Painter, frame: &TextFrame) {
    if frame.bg_color.components[3] > 0.0 {
        p.set_brush_color(frame.bg_color);
    } else {
        p.set_no_brush();
    }
}

fn draw_block(block: &TextBlock, p: &mut dyn Painter, ctx: &RenderContext) {
    for fragment in &block.fragments {
        if fragment.text.is_empty() {
            continue;
        }
        p.set_font(scaled_font(&fragment.font, ctx));
        p.draw_text(fragment.pos, &fragment.text);
    }
}

/// Font with the device pixel ratio applied.
pub(super) fn scaled_font(font: &Font, ctx: &RenderContext) -> Font {
    let mut f = font.clone();
    f.size *= ctx.options.pixel_ratio;
    f
}

// ═══════════════════════════════════════════════════════════════════════
// Harmony
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn draw_harmony(props: &ItemProps, item: &Harmony, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    if item.edit_mode || layout.segments.is_empty() {
        paint_text(props, item.frame.as_ref(), item.size_is_spatium_dependent, &layout.text, p, ctx);
        return;
    }

    if let Some(frame) = &item.frame {
        if frame.width != 0.0 {
            p.set_pen(
                Pen::new(frame.color, frame.width * props.spatium)
                    .with_cap(Cap::Square)
                    .with_join(Join::Miter),
            );
        } else {
            p.set_no_pen();
        }
        set_background(p, frame);
        if frame.circle {
            p.draw_arc(layout.text.frame, 0, FULL_CIRCLE_16THS);
        } else {
            let r2 = frame.round.min(99);
            p.draw_rounded_rect(layout.text.frame, f64::from(frame.round), f64::from(r2));
        }
    }
    p.set_no_brush();
    p.set_pen(Pen::from(cur_color(props, ctx)));
    for segment in &layout.segments {
        p.set_font(scaled_font(&segment.font, ctx));
        p.draw_text(segment.pos, &segment.text);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Figured bass
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn draw_figured_bass(props: &ItemProps, item: &FiguredBass, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    if ctx.options.shows_marks() {
        for len in layout.line_lengths.iter().filter(|len| **len > 0.0) {
            p.set_pen(Pen::new(ctx.config.formatting_marks_color, FB_DURATION_LINE_WIDTH));
            p.draw_line(Line::new((0.0, FB_DURATION_LINE_Y), (*len, FB_DURATION_LINE_Y)));
        }
    }

    if item.items.is_empty() {
        paint_text(props, item.frame.as_ref(), item.size_is_spatium_dependent, &layout.text, p, ctx);
        return;
    }
    for fi in &item.items {
        let mut scope = Scoped::new(p);
        scope.translate(fi.layout.pos.to_vec2());
        draw_figured_bass_item(props, item, layout, fi, &mut scope, ctx);
    }
}

fn draw_figured_bass_item(
    props: &ItemProps,
    fb: &FiguredBass,
    fb_layout: &FiguredBassLayout,
    item: &FiguredBassItem,
    p: &mut dyn Painter,
    ctx: &RenderContext,
) {
    let sp = props.spatium;
    let ldata = &item.layout;
    let size = ctx.style.real(Sid::FiguredBassFontSize) * sp / SPATIUM20;
    p.set_font(Font::new(FB_FONT_FAMILY, size * ctx.options.pixel_ratio));
    p.set_no_brush();
    p.set_pen(Pen::new(cur_color(props, ctx), FB_CONTLINE_THICKNESS * sp).with_cap(Cap::Round));
    p.draw_text_in_rect(ldata.bbox, Align::TOP_LEFT, &ldata.display_text);

    let mut line_end_x = 0.0;
    if item.cont_line != ContLine::None {
        let mut line_start_x = ldata.text_width;
        if line_start_x > 0.0 {
            line_start_x += sp * FB_CONTLINE_LEFT_PADDING;
        }
        line_end_x = fb_layout.printed_line_length;
        if line_end_x - line_start_x < 1.0 {
            line_end_x = 0.0;
        }

        if item.cont_line > ContLine::Simple && item.closing_parenthesis == FbParenthesis::None {
            if let Some(next_x) = fb.next_cont_line_x {
                line_end_x = if next_x > 0.0 {
                    next_x - item.page_pos.x + sp * FB_CONTLINE_OVERLAP
                } else {
                    fb_layout.line_lengths.first().copied().unwrap_or(0.0)
                };
            }
        }

        if line_end_x > 0.0 {
            let h = ldata.bbox.height() * FB_CONTLINE_HEIGHT;
            p.draw_line(Line::new((line_start_x, h), (line_end_x - ldata.pos.x, h)));
        }
    }

    if let Some(ch) = item.closing_parenthesis.glyph() {
        let x = if line_end_x > 0.0 { line_end_x } else { ldata.text_width }.trunc();
        let rect = Rect::from_origin_size((x, 0.0), (ldata.bbox.width(), ldata.bbox.height()));
        p.draw_text_in_rect(rect, Align::TOP_LEFT, &ch.to_string());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Symbols
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn draw_symbol(props: &ItemProps, item: &Symbol, p: &mut dyn Painter, ctx: &RenderContext) {
    if item.is_note_dot && item.on_tab_staff {
        return;
    }
    p.set_pen(Pen::from(cur_color(props, ctx)));
    draw_sym(p, ctx, props, item.sym, Point::ORIGIN);
}

pub(super) fn draw_fsymbol(props: &ItemProps, item: &FSymbol, p: &mut dyn Painter, ctx: &RenderContext) {
    p.set_font(scaled_font(&item.font, ctx));
    p.set_pen(Pen::from(cur_color(props, ctx)));
    p.draw_text(Point::ORIGIN, &item.code.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painter::{PaintOp, RecordingPainter};
    use crate::renderer::Resources;
    use peniko::Color;
    use pretty_assertions::assert_eq;

    fn framed(round: i32) -> TextBase {
        let mut t = TextBase::plain("mf", Font::new("Edwin", 10.0));
        t.frame = Some(TextFrame { round, ..TextFrame::default() });
        if let Some(l) = t.layout.as_mut() {
            l.frame = Rect::new(-1.0, -10.0, 20.0, 3.0);
        }
        t
    }

    #[test]
    fn rounded_frame_radius_is_capped() {
        let res = Resources::default();
        let ctx = res.context();
        let props = ItemProps { spatium: base_spatium() * 4.0, ..ItemProps::default() };
        let mut rec = RecordingPainter::new();
        draw_text_base(&props, &framed(80), &mut rec, &ctx);
        let ops = rec.ops();
        assert_eq!(ops[0], &PaintOp::RoundedRect(Rect::new(-1.0, -10.0, 20.0, 3.0), 160.0, 99.0));
        assert_eq!(ops[1], &PaintOp::Text(Point::ORIGIN, "mf".to_string()));
    }

    #[test]
    fn transparent_background_is_not_filled() {
        let res = Resources::default();
        let ctx = res.context();
        let mut rec = RecordingPainter::new();
        draw_text_base(&ItemProps::default(), &framed(0), &mut rec, &ctx);
        assert_eq!(rec.calls()[0].state.brush, None);
    }

    #[test]
    fn frame_colour_follows_selection() {
        let res = Resources::default();
        let ctx = res.context();
        let props = ItemProps { selected: true, ..ItemProps::default() };
        let mut rec = RecordingPainter::new();
        draw_text_base(&props, &framed(0), &mut rec, &ctx);
        assert_eq!(rec.calls()[0].state.pen.color, ctx.config.selection_color(0));
        assert_ne!(rec.calls()[0].state.pen.color, Color::BLACK);
    }

    #[test]
    fn note_dot_symbol_hidden_on_tab() {
        let res = Resources::default();
        let ctx = res.context();
        let sym = Symbol { sym: crate::symbols::SymId::AugmentationDot, is_note_dot: true, on_tab_staff: true, layout: None };
        let mut rec = RecordingPainter::new();
        draw_symbol(&ItemProps::default(), &sym, &mut rec, &ctx);
        assert_eq!(rec.call_count(), 0);
    }
}
