//! Fretboard chord diagrams and tablature fret circles.

use kurbo::{Cap, Line, Rect, Vec2};

use super::constants::*;
use super::text::scaled_font;
use super::{cur_color, RenderContext};
use crate::model::*;
use crate::painter::{Align, HAlign, Painter, Pen, Scoped, VAlign};
use crate::style::{Sid, SPATIUM20};

/// Grid, dots, open/muted markers, barres and the fret offset number.
/// Horizontal diagrams are the vertical drawing turned a quarter left.
pub(super) fn draw_fret_diagram(props: &ItemProps, item: &FretDiagram, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    let style = ctx.style;
    let horizontal = item.orientation == Orientation::Horizontal;
    let strings = item.strings.max(0);
    let x2 = f64::from(item.strings - 1) * layout.string_dist;
    let translation = Vec2::new(-x2, 0.0);

    let mut scope = Scoped::new(p);
    let p: &mut dyn Painter = &mut scope;
    if horizontal {
        p.rotate(-90.0);
        p.translate(translation);
    }

    let sp = props.spatium * item.user_mag;
    let color = cur_color(props, ctx);
    let mut pen = Pen::from(color).with_cap(Cap::Butt);
    p.set_brush_color(color);

    // nut
    pen.width = layout.nut_lw;
    p.set_pen(pen.clone());
    p.draw_line(Line::new((-layout.string_lw * 0.5, 0.0), (x2 + layout.string_lw * 0.5, 0.0)));

    // strings and frets
    pen.width = layout.string_lw;
    p.set_pen(pen.clone());
    let y2 = layout.fret_dist * (f64::from(item.frets) + 0.5);
    let string_top = if item.fret_offset != 0 { -sp * FRET_STRING_OVERHANG } else { 0.0 };
    for i in 0..strings {
        let x = layout.string_dist * f64::from(i);
        p.draw_line(Line::new((x, string_top), (x, y2)));
    }
    for i in 1..=item.frets {
        let y = layout.fret_dist * f64::from(i);
        p.draw_line(Line::new((0.0, y), (x2, y)));
    }

    let dot_d = sp * FRET_DOT_DIAMETER * style.real(Sid::FretDotSize);
    let sym_width = layout.string_lw * FRET_SYM_PEN_RATIO;
    let sym_pen = pen.clone().with_cap(Cap::Round);
    let sym_pen = Pen { width: sym_width, ..sym_pen };

    for dot in item.dots.iter().filter(|d| d.fret != 0) {
        let x = layout.string_dist * f64::from(dot.string) - dot_d * 0.5;
        let y = layout.fret_dist * f64::from(dot.fret - 1) + layout.fret_dist * 0.5 - dot_d * 0.5;
        let cell = Rect::new(x, y, x + dot_d, y + dot_d);
        p.set_pen(sym_pen.clone());
        match dot.dot_type {
            FretDotType::Cross => {
                p.set_pen(Pen { width: sym_width * FRET_CROSS_PEN_RATIO, ..sym_pen.clone() });
                p.draw_line(Line::new((cell.x0, cell.y0), (cell.x1, cell.y1)));
                p.draw_line(Line::new((cell.x1, cell.y0), (cell.x0, cell.y1)));
            }
            FretDotType::Square => {
                p.set_no_brush();
                p.draw_rect(cell);
            }
            FretDotType::Triangle => {
                let apex = (x + 0.5 * dot_d, y);
                p.draw_line(Line::new((cell.x0, cell.y1), apex));
                p.draw_line(Line::new(apex, (cell.x1, cell.y1)));
                p.draw_line(Line::new((cell.x1, cell.y1), (cell.x0, cell.y1)));
            }
            FretDotType::Normal => {
                p.set_brush_color(sym_pen.color);
                p.set_no_pen();
                p.draw_ellipse(cell);
            }
        }
    }

    // open and muted strings above the nut
    p.set_no_brush();
    p.set_pen(Pen { width: sym_width * FRET_MARKER_PEN_RATIO, ..sym_pen });
    let size = layout.marker_size;
    for marker in &item.markers {
        let x = layout.string_dist * f64::from(marker.string) - size * 0.5;
        let y = -layout.fret_dist - size * 0.5;
        match marker.marker_type {
            FretMarkerType::Circle => p.draw_ellipse(Rect::new(x, y, x + size, y + size)),
            FretMarkerType::Cross => {
                p.draw_line(Line::new((x, y), (x + size, y + size)));
                p.draw_line(Line::new((x, y + size), (x + size, y)));
            }
            FretMarkerType::None => {}
        }
    }

    for barre in &item.barres {
        let x1 = layout.string_dist * f64::from(barre.start_string);
        let end = barre.end_string.map_or(x2, |s| layout.string_dist * f64::from(s));
        let y = layout.fret_dist * f64::from(barre.fret - 1) + layout.fret_dist * 0.5;
        pen.width = dot_d * style.real(Sid::BarreLineWidth);
        pen.cap = Cap::Round;
        p.set_pen(pen.clone());
        p.draw_line(Line::new((x1, y), (end, y)));
    }

    if item.fret_offset > 0 {
        draw_fret_number(props, item, layout, translation, p, ctx);
    }
}

fn draw_fret_number(
    props: &ItemProps,
    item: &FretDiagram,
    layout: &FretLayout,
    translation: Vec2,
    p: &mut dyn Painter,
    ctx: &RenderContext,
) {
    let mut font = item.font.clone();
    font.size *= item.user_mag * (props.spatium / SPATIUM20) * ctx.style.real(Sid::FretNumMag);
    p.set_font(scaled_font(&font, ctx));
    let text = (item.fret_offset + 1).to_string();
    let x2 = layout.string_dist * f64::from(item.strings - 1);
    let gap = layout.string_dist * FRET_NUMBER_GAP;

    match (item.orientation, item.num_pos) {
        (Orientation::Vertical, FretNumPos::Left) => {
            let rect = Rect::new(-gap, 0.0, -gap, layout.fret_dist);
            p.draw_text_in_rect(rect, Align { h: HAlign::Right, v: VAlign::VCenter }, &text);
        }
        (Orientation::Vertical, FretNumPos::Right) => {
            let rect = Rect::new(x2 + gap, 0.0, x2 + gap, layout.fret_dist);
            p.draw_text_in_rect(rect, Align { h: HAlign::Left, v: VAlign::VCenter }, &text);
        }
        (Orientation::Horizontal, pos) => {
            // upright text in the unrotated frame
            let mut scope = Scoped::new(p);
            scope.translate(-translation);
            scope.rotate(90.0);
            let (rect, align) = match pos {
                FretNumPos::Left => (Rect::new(0.0, x2, 0.0, x2), Align::TOP_LEFT),
                FretNumPos::Right => (Rect::ZERO, Align { h: HAlign::Left, v: VAlign::Bottom }),
            };
            scope.draw_text_in_rect(rect, align, &text);
        }
    }
}

pub(super) fn draw_fret_circle(props: &ItemProps, item: &FretCircle, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    let mut scope = Scoped::new(p);
    scope.set_pen(Pen::new(cur_color(props, ctx), props.spatium * FRET_CIRCLE_WIDTH));
    scope.set_no_brush();
    scope.draw_ellipse(layout.rect);
}
