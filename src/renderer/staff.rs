//! Staff furniture: brackets, clefs, key and time signatures, staff lines,
//! editor marks on the staff, measure repeats and multi-measure rests.

use std::borrow::Cow;

use kurbo::{Cap, Join, Line, Point, Rect};

use super::constants::*;
use super::{cur_color, draw_sym, draw_syms, mark_color, run_bbox, sym_bbox, sym_width, RenderContext};
use crate::model::*;
use crate::painter::{Painter, Pen, Scoped};
use crate::style::Sid;
use crate::symbols::SymId;

// ═══════════════════════════════════════════════════════════════════════
// Brackets
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn draw_bracket(props: &ItemProps, item: &Bracket, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    let color = cur_color(props, ctx);
    let h = layout.height;

    match item.bracket_type {
        BracketType::Brace => {
            if layout.brace_sym == SymId::NoSym {
                p.set_no_pen();
                p.set_brush_color(color);
                p.draw_path(&layout.path);
            } else {
                // the brace glyph is stretched to the bracket height
                let reference = 100.0 * props.mag_s();
                p.set_pen(Pen::from(color));
                let mut scope = Scoped::new(p);
                scope.scale(item.magx, h / reference);
                draw_sym(&mut scope, ctx, props, layout.brace_sym, Point::new(0.0, reference));
            }
        }
        BracketType::Normal => {
            let sp = props.spatium;
            let w = ctx.style.mm(Sid::BracketWidth);
            let bd = if ctx.style.string(Sid::MusicalSymbolFont) == "Leland" { sp * 0.5 } else { sp * 0.25 };
            p.set_pen(Pen::new(color, w).with_cap(Cap::Butt));
            p.draw_line(Line::new((0.0, -bd - w * 0.5), (0.0, h + bd + w * 0.5)));
            let x = -w * 0.5;
            draw_sym(p, ctx, props, SymId::BracketTop, Point::new(x, -bd));
            draw_sym(p, ctx, props, SymId::BracketBottom, Point::new(x, h + bd));
        }
        BracketType::Square => {
            let line_w = ctx.style.mm(Sid::StaffLineWidth);
            let bw = layout.width - line_w / 2.0;
            p.set_pen(Pen::new(color, line_w).with_cap(Cap::Butt));
            p.draw_line(Line::new((0.0, 0.0), (0.0, h)));
            p.draw_line(Line::new((-line_w / 2.0, 0.0), (line_w / 2.0 + bw, 0.0)));
            p.draw_line(Line::new((-line_w / 2.0, h), (line_w / 2.0 + bw, h)));
        }
        BracketType::Line => {
            let w = 0.67 * ctx.style.mm(Sid::BracketWidth);
            p.set_pen(Pen::new(color, w).with_cap(Cap::Butt));
            let bd = ctx.style.mm(Sid::StaffLineWidth) * 0.5;
            p.draw_line(Line::new((0.0, -bd), (0.0, h + bd)));
        }
        BracketType::NoBracket => {}
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Clefs and signatures
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn draw_clef(props: &ItemProps, item: &Clef, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    if layout.sym == SymId::NoSym || item.staff.as_ref().is_some_and(|s| !s.gen_clef) {
        return;
    }
    p.set_pen(Pen::from(cur_color(props, ctx)));
    draw_sym(p, ctx, props, layout.sym, Point::ORIGIN);
}

pub(super) fn draw_key_sig(props: &ItemProps, item: &KeySig, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    let color = cur_color(props, ctx);
    p.set_pen(Pen::from(color));

    let sp = props.spatium;
    let (step, lines) = match &item.staff {
        Some(staff) => (sp * staff.line_distance * 0.5, staff.lines as i32),
        None => (sp * 0.5, 5),
    };
    let ledger_width = ctx.style.mm(Sid::LedgerLineWidth) * props.mag;
    let ledger_extra = ctx.style.value_s(Sid::LedgerLineLength) * sp;

    for ks in &layout.syms {
        let x = ks.x_pos * sp;
        draw_sym(p, ctx, props, ks.sym, Point::new(x, f64::from(ks.line) * step));

        let x1 = x - ledger_extra;
        let x2 = x + sym_width(ctx, props, ks.sym) + ledger_extra;
        p.set_pen(Pen::new(color, ledger_width).with_cap(Cap::Butt));
        let above = (ks.line..=-2).rev().step_by(2);
        let below = (lines * 2..=ks.line).step_by(2);
        for i in above.chain(below) {
            let y = f64::from(i) * step;
            p.draw_line(Line::new((x1, y), (x2, y)));
        }
    }
}

pub(super) fn draw_time_sig(props: &ItemProps, item: &TimeSig, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    if item.staff.as_ref().is_some_and(|s| !s.gen_timesig) {
        return;
    }
    p.set_pen(Pen::from(cur_color(props, ctx)));

    for (syms, pos) in [(&layout.numerator, layout.pz), (&layout.denominator, layout.pn)] {
        let mut scope = Scoped::new(p);
        scope.translate(pos.to_vec2());
        scope.scale(item.scale.x, item.scale.y);
        draw_syms(&mut scope, ctx, props, syms, Point::ORIGIN);
    }

    if item.large_parentheses {
        let mag = props.mag_s() * item.scale.x;
        ctx.symbols.draw_one(p, SymId::TimeSigParensLeft, layout.left_paren, mag);
        ctx.symbols.draw_one(p, SymId::TimeSigParensRight, layout.right_paren, mag);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Staff lines and editor marks
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn draw_staff_lines(props: &ItemProps, item: &StaffLines, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    p.set_pen(Pen::new(cur_color(props, ctx), layout.line_width).with_cap(Cap::Butt));
    p.draw_lines(&layout.lines);
}


pub(super) fn draw_staff_state(props: &ItemProps, item: &StaffState, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    if !ctx.options.shows_marks() {
        return;
    }
    p.set_pen(
        Pen::new(mark_color(props, ctx), layout.line_width)
            .with_cap(Cap::Round)
            .with_join(Join::Round),
    );
    p.set_no_brush();
    p.draw_path(&layout.path);
}

pub(super) fn draw_spacer(props: &ItemProps, item: &Spacer, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    if !ctx.options.shows_marks() {
        return;
    }
    p.set_pen(Pen::new(mark_color(props, ctx), props.spatium * SPACER_LINE_WIDTH));
    p.set_no_brush();
    p.draw_path(&layout.path);
}

/// Icon: a box holding a miniature of the new staff type.
pub(super) fn draw_staff_type_change(
    props: &ItemProps,
    item: &StaffTypeChange,
    p: &mut dyn Painter,
    ctx: &RenderContext,
) {
    if !ctx.options.shows_marks() {
        return;
    }
    let color = mark_color(props, ctx);
    let sp = ctx.style.spatium();
    let size = sp * STAFF_TYPE_CHANGE_SIZE;

    p.set_pen(
        Pen::new(color, item.line_width)
            .with_cap(Cap::Square)
            .with_join(Join::Miter),
    );
    p.set_no_brush();
    p.draw_rect(Rect::new(0.0, 0.0, size, size));

    let mut lines = 5;
    if let Some(staff_type) = &item.staff_type {
        if staff_type.stemless {
            let pos = Point::new(size * 0.5 - STAFF_TYPE_CHANGE_HEAD_OFFSET * sp, size * 0.5);
            ctx.symbols.draw_one(p, SymId::NoteheadBlack, pos, props.mag_s() * 0.5);
        }
        if staff_type.invisible {
            return;
        }
        lines = staff_type.lines.min(STAFF_TYPE_CHANGE_MAX_LINES);
    }

    let start_y = STAFF_TYPE_CHANGE_CENTER - f64::from(lines.saturating_sub(1)) * STAFF_TYPE_CHANGE_LINE_DIST * 0.5;
    p.set_pen(
        Pen::new(color, STAFF_TYPE_CHANGE_LINE_WIDTH)
            .with_cap(Cap::Square)
            .with_join(Join::Miter),
    );
    for i in 0..lines {
        let y = ((start_y + f64::from(i) * STAFF_TYPE_CHANGE_LINE_DIST) * sp).trunc();
        p.draw_line(Line::new((0.0, y), (size, y)));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Measure repeats and multi-measure rests
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn draw_measure_repeat(props: &ItemProps, item: &MeasureRepeat, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    p.set_pen(Pen::from(cur_color(props, ctx)));
    draw_sym(p, ctx, props, layout.sym, Point::ORIGIN);
    if !layout.number_syms.is_empty() {
        draw_syms(p, ctx, props, &layout.number_syms, layout.number_pos);
    }

    if !(ctx.style.bool(Sid::FourMeasureRepeatShowExtenders) && item.num_measures == 4) {
        return;
    }
    let bar_thickness = ctx.style.mm(Sid::MmRestHBarThickness);
    // a zero width pen would draw a hairline
    if bar_thickness == 0.0 {
        return;
    }
    let mut pen = p.pen().clone().with_cap(Cap::Butt);
    pen.width = bar_thickness;
    p.set_pen(pen);

    let two_measures = 2.0 * item.measure_width;
    let margin = ctx.style.mm(Sid::MultiMeasureRestMargin);
    let sym_w = sym_bbox(ctx, props, layout.sym).width();
    let x_offset = sym_w * 0.5;
    let gap = (sym_w + props.spatium) * 0.5;
    p.draw_line(Line::new((-two_measures + x_offset + margin, 0.0), (x_offset - gap, 0.0)));
    p.draw_line(Line::new((x_offset + gap, 0.0), (two_measures + x_offset - margin, 0.0)));
}

pub(super) fn draw_mm_rest(props: &ItemProps, item: &MMRest, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    // only voice one draws the rest
    if item.suppressed || props.voice != 0 {
        return;
    }
    let sp = props.spatium;
    let style = ctx.style;

    let number_syms: Cow<'_, [SymId]> = if layout.number_syms.is_empty() && layout.number > 0 {
        Cow::Owned(SymId::time_sig_digits(layout.number.unsigned_abs()))
    } else {
        Cow::Borrowed(layout.number_syms.as_slice())
    };

    p.set_pen(Pen::from(cur_color(props, ctx)));
    if item.number_visible {
        draw_syms(p, ctx, props, &number_syms, layout.number_pos);
    }
    let number_box = run_bbox(ctx, props, &number_syms) + layout.number_pos.to_vec2();

    if style.bool(Sid::OldStyleMultiMeasureRests) && layout.number <= style.int(Sid::MmRestOldStyleMaxMeasures) {
        let spacing = style.mm(Sid::MmRestOldStyleSpacing);
        let mut x = (item.width - layout.syms_width) * 0.5;
        for sym in &layout.rest_syms {
            let y = if *sym == SymId::RestWhole { -sp } else { 0.0 };
            draw_sym(p, ctx, props, *sym, Point::new(x, y));
            x += sym_bbox(ctx, props, *sym).width() + spacing;
        }
        return;
    }

    let mag = item.staff_mag;
    let mut pen = p.pen().clone().with_cap(Cap::Butt);

    let h_bar = style.mm(Sid::MmRestHBarThickness) * mag;
    if h_bar != 0.0 {
        pen.width = h_bar;
        p.set_pen(pen.clone());
        let half = h_bar * 0.5;
        let masked = item.number_visible
            && style.bool(Sid::MmRestNumberMaskHBar)
            && number_box.y1 >= -half
            && number_box.y0 <= half;
        if masked {
            let gap = (number_box.width() + sp) * 0.5;
            let mid = item.width * 0.5;
            p.draw_line(Line::new((0.0, 0.0), (mid - gap, 0.0)));
            p.draw_line(Line::new((mid + gap, 0.0), (item.width, 0.0)));
        } else {
            p.draw_line(Line::new((0.0, 0.0), (item.width, 0.0)));
        }
    }

    let v_stroke = style.mm(Sid::MmRestHBarVStrokeThickness) * mag;
    if v_stroke != 0.0 {
        pen.width = v_stroke;
        p.set_pen(pen);
        let half_h = style.mm(Sid::MmRestHBarVStrokeHeight) * 0.5 * mag;
        for x in [0.0, item.width] {
            p.draw_line(Line::new((x, -half_h), (x, half_h)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painter::{PaintOp, RecordingPainter};
    use crate::renderer::Resources;
    use crate::style::StyleValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn clef_hidden_when_staff_type_suppresses_it() {
        let res = Resources::default();
        let ctx = res.context();
        let clef = Clef {
            staff: Some(StaffContext { gen_clef: false, ..StaffContext::default() }),
            layout: Some(ClefLayout::default()),
        };
        let mut rec = RecordingPainter::new();
        draw_clef(&ItemProps::default(), &clef, &mut rec, &ctx);
        assert_eq!(rec.call_count(), 0);
    }

    #[test]
    fn key_sig_ledger_lines_above_and_below() {
        let res = Resources::default();
        let ctx = res.context();
        let key = KeySig {
            staff: None,
            layout: Some(KeySigLayout {
                syms: vec![
                    KeySym { sym: SymId::AccidentalSharp, x_pos: 0.0, line: -4 },
                    KeySym { sym: SymId::AccidentalFlat, x_pos: 1.0, line: 12 },
                ],
            }),
        };
        let props = ItemProps::default();
        let mut rec = RecordingPainter::new();
        draw_key_sig(&props, &key, &mut rec, &ctx);
        let step = props.spatium * 0.5;
        let ys: Vec<f64> = rec.device_lines().iter().map(|l| (l.p0.y / step).round()).collect();
        assert_eq!(ys, vec![-2.0, -4.0, 10.0, 12.0]);
    }

    #[test]
    fn mm_rest_in_other_voice_draws_nothing() {
        let res = Resources::default();
        let ctx = res.context();
        let rest = MMRest { layout: Some(MMRestLayout::default()), ..MMRest::default() };
        let props = ItemProps { voice: 1, ..ItemProps::default() };
        let mut rec = RecordingPainter::new();
        draw_mm_rest(&props, &rest, &mut rec, &ctx);
        assert_eq!(rec.call_count(), 0);
    }

    #[test]
    fn mm_rest_bar_is_split_around_the_number() {
        let res = Resources::default();
        let ctx = res.context();
        let rest = MMRest {
            width: 200.0,
            layout: Some(MMRestLayout {
                number: 12,
                number_syms: SymId::time_sig_digits(12),
                number_pos: Point::new(90.0, 0.0),
                ..MMRestLayout::default()
            }),
            ..MMRest::default()
        };
        let mut rec = RecordingPainter::new();
        draw_mm_rest(&ItemProps::default(), &rest, &mut rec, &ctx);
        let lines = rec.device_lines();
        // two bar halves and two end strokes
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].p0, Point::ORIGIN);
        assert!(lines[0].p1.x < 100.0 && lines[1].p0.x > 100.0);
        assert_eq!(lines[1].p1.x, 200.0);
    }

    #[test]
    fn mm_rest_number_defaults_to_time_sig_digits() {
        let res = Resources::default();
        let ctx = res.context();
        let rest = MMRest {
            width: 200.0,
            layout: Some(MMRestLayout { number: 24, ..MMRestLayout::default() }),
            ..MMRest::default()
        };
        let mut rec = RecordingPainter::new();
        draw_mm_rest(&ItemProps::default(), &rest, &mut rec, &ctx);
        let digits: Vec<char> = rec.device_glyphs().iter().map(|(ch, _)| *ch).collect();
        let expected: Vec<char> =
            [SymId::TimeSig2, SymId::TimeSig4].iter().filter_map(|id| id.codepoint()).collect();
        assert_eq!(digits, expected);
    }

    #[test]
    fn old_style_mm_rest_draws_glyphs() {
        let mut res = Resources::default();
        res.style.set(Sid::OldStyleMultiMeasureRests, StyleValue::Bool(true)).unwrap();
        let ctx = res.context();
        let rest = MMRest {
            layout: Some(MMRestLayout {
                number: 3,
                rest_syms: vec![SymId::RestWhole, SymId::RestHalf],
                ..MMRestLayout::default()
            }),
            ..MMRest::default()
        };
        let mut rec = RecordingPainter::new();
        draw_mm_rest(&ItemProps::default(), &rest, &mut rec, &ctx);
        assert!(rec.device_lines().is_empty());
        // the number "3" and two rest glyphs
        assert_eq!(rec.device_glyphs().len(), 3);
    }

    #[test]
    fn staff_type_change_icon_lines_are_centred() {
        let res = Resources::default();
        let ctx = res.context();
        let change = StaffTypeChange { layout: Some(BoxLayout::default()), ..StaffTypeChange::default() };
        let mut rec = RecordingPainter::new();
        draw_staff_type_change(&ItemProps::default(), &change, &mut rec, &ctx);
        let ops = rec.ops();
        assert!(matches!(ops[0], PaintOp::Rect(_)));
        assert_eq!(rec.device_lines().len(), 5);
        assert_eq!(rec.calls()[1].state.pen.width, STAFF_TYPE_CHANGE_LINE_WIDTH);
    }

    #[test]
    fn editor_marks_hidden_when_printing() {
        let mut res = Resources::default();
        res.options = crate::config::RenderOptions::print();
        let ctx = res.context();
        let mut rec = RecordingPainter::new();
        draw_spacer(&ItemProps::default(), &Spacer { layout: Some(PathLayout::default()) }, &mut rec, &ctx);
        draw_staff_type_change(&ItemProps::default(), &StaffTypeChange::default(), &mut rec, &ctx);
        assert_eq!(rec.call_count(), 0);
    }
}
