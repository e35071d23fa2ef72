//! Barlines: stroke recipes per type, repeat dots, bracket tips and the
//! irregular-measure mark.

use kurbo::{Cap, Line, Point};

use super::constants::*;
use super::{cur_color, draw_sym, sym_bbox, sym_width, RenderContext};
use crate::model::*;
use crate::painter::{Font, Painter, Pen, PenStyle};
use crate::style::{Sid, SPATIUM20};
use crate::symbols::SymId;

/// Vertical stroke from `y1` to `y2` at `x`.
struct Strokes<'a> {
    layout: &'a BarLineLayout,
}

impl Strokes<'_> {
    fn draw(&self, p: &mut dyn Painter, x: f64) {
        p.draw_line(Line::new((x, self.layout.y1), (x, self.layout.y2)));
    }
}

pub(super) fn draw_bar_line(props: &ItemProps, item: &BarLine, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    let style = ctx.style;
    let mag = props.mag;
    let color = cur_color(props, ctx);
    let pen = |width: f64, pen_style: PenStyle| Pen::new(color, width).with_style(pen_style).with_cap(Cap::Butt);
    let strokes = Strokes { layout };

    let bar_w = style.mm(Sid::BarWidth) * mag;
    let end_w = style.mm(Sid::EndBarWidth) * mag;
    let end_dist = style.mm(Sid::EndBarDistance);
    let dot_sep = style.mm(Sid::RepeatBarlineDotSeparation);
    let tips = style.bool(Sid::RepeatBarTips);

    match item.bar_line_type {
        BarLineType::Normal | BarLineType::Broken | BarLineType::Dotted => {
            let pen_style = match item.bar_line_type {
                BarLineType::Broken => PenStyle::Dash,
                BarLineType::Dotted => PenStyle::Dot,
                _ => PenStyle::Solid,
            };
            p.set_pen(pen(bar_w, pen_style));
            strokes.draw(p, bar_w * 0.5);
        }
        BarLineType::Heavy => {
            p.set_pen(pen(end_w, PenStyle::Solid));
            strokes.draw(p, end_w * 0.5);
        }
        BarLineType::End | BarLineType::ReverseEnd | BarLineType::DoubleHeavy | BarLineType::Double => {
            let (lw, lw2, dist) = match item.bar_line_type {
                BarLineType::End => (bar_w, end_w, end_dist),
                BarLineType::ReverseEnd => (end_w, bar_w, end_dist),
                BarLineType::DoubleHeavy => (end_w, end_w, end_dist),
                _ => {
                    let w = style.mm(Sid::DoubleBarWidth) * mag;
                    (w, w, style.mm(Sid::DoubleBarDistance))
                }
            };
            p.set_pen(pen(lw, PenStyle::Solid));
            let mut x = lw * 0.5;
            strokes.draw(p, x);
            p.set_pen(pen(lw2, PenStyle::Solid));
            x += (lw * 0.5 + dist + lw2 * 0.5) * mag;
            strokes.draw(p, x);
        }
        BarLineType::StartRepeat => {
            p.set_pen(pen(end_w, PenStyle::Solid));
            let mut x = end_w * 0.5;
            strokes.draw(p, x);

            p.set_pen(pen(bar_w, PenStyle::Solid));
            x += (end_w * 0.5 + end_dist + bar_w * 0.5) * mag;
            strokes.draw(p, x);

            x += (bar_w * 0.5 + dot_sep) * mag;
            draw_dots(props, item, p, ctx, x);
            if tips {
                draw_tips(props, item, layout, p, ctx, false, 0.0);
            }
        }
        BarLineType::EndRepeat | BarLineType::EndStartRepeat => {
            p.set_pen(pen(bar_w, PenStyle::Solid));
            let mut x = 0.0;
            draw_dots(props, item, p, ctx, x);

            x += sym_bbox(ctx, props, SymId::RepeatDot).width();
            x += (dot_sep + bar_w * 0.5) * mag;
            strokes.draw(p, x);

            x += (bar_w * 0.5 + end_dist + end_w * 0.5) * mag;
            p.set_pen(pen(end_w, PenStyle::Solid));
            strokes.draw(p, x);
            if tips {
                draw_tips(props, item, layout, p, ctx, true, x + end_w * 0.5);
            }

            if item.bar_line_type == BarLineType::EndStartRepeat {
                p.set_pen(pen(bar_w, PenStyle::Solid));
                x += (end_w * 0.5 + end_dist + bar_w * 0.5) * mag;
                strokes.draw(p, x);

                x += (bar_w * 0.5 + dot_sep) * mag;
                draw_dots(props, item, p, ctx, x);
                if tips {
                    draw_tips(props, item, layout, p, ctx, false, 0.0);
                }
            }
        }
    }

    if let Some(irregular) = item.irregular {
        if ctx.options.shows_marks() && ctx.options.mark_irregular_measures {
            draw_irregular_mark(props, irregular, p, ctx);
        }
    }
}

fn draw_dots(props: &ItemProps, item: &BarLine, p: &mut dyn Painter, ctx: &RenderContext, x: f64) {
    let sp = props.spatium;
    let [y1, y2] = match &item.staff {
        None => PALETTE_REPEAT_DOTS.map(|d| d * sp),
        Some(staff) => {
            let mut offset = staff.y_offset * sp;
            let font = ctx.symbols.name();
            if CENTERED_DOT_FONTS.iter().any(|f| *f == font) {
                offset += 0.5 * ctx.style.spatium() * props.mag;
            }
            staff.repeat_dots.map(|d| d * sp + offset)
        }
    };
    draw_sym(p, ctx, props, SymId::RepeatDot, Point::new(x, y1));
    draw_sym(p, ctx, props, SymId::RepeatDot, Point::new(x, y2));
}

fn draw_tips(
    props: &ItemProps,
    item: &BarLine,
    layout: &BarLineLayout,
    p: &mut dyn Painter,
    ctx: &RenderContext,
    reversed: bool,
    x: f64,
) {
    let (top, bottom) = if reversed {
        (SymId::ReversedBracketTop, SymId::ReversedBracketBottom)
    } else {
        (SymId::BracketTop, SymId::BracketBottom)
    };
    let shift = |id| if reversed { sym_width(ctx, props, id) } else { 0.0 };
    if item.is_top {
        draw_sym(p, ctx, props, top, Point::new(x - shift(top), layout.y1));
    }
    if item.is_bottom {
        draw_sym(p, ctx, props, bottom, Point::new(x - shift(bottom), layout.y2));
    }
}

/// `+` or `-` left of the end barline of a measure whose length does not
/// match its time signature.
fn draw_irregular_mark(props: &ItemProps, irregular: IrregularMeasure, p: &mut dyn Painter, ctx: &RenderContext) {
    p.set_pen(Pen::from(ctx.config.formatting_marks_color));
    let mut font = Font::new(IRREGULAR_MARK_FONT, IRREGULAR_MARK_SIZE * props.spatium / SPATIUM20).bold(true);
    let ch = match irregular {
        IrregularMeasure::TooLong => "+",
        IrregularMeasure::TooShort => "-",
    };
    let r = ctx.metrics.bounding_rect(&font, ch);
    font.size *= ctx.options.pixel_ratio;
    p.set_font(font);
    p.draw_text(Point::new(-r.width(), 0.0), ch);
}
