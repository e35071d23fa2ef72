//! Notes, rests and everything hanging off a chord: stems, flags, dots,
//! ledger lines, accidentals, articulations, arpeggios, tuplets and the
//! note-input preview.

use kurbo::{BezPath, Cap, Line, Point, Rect};

use super::constants::*;
use super::text::scaled_font;
use super::{cur_color, draw_child, draw_sym, draw_syms, sym_bbox, sym_width, RenderContext};
use crate::model::*;
use crate::painter::{Align, Painter, Pen, Scoped};
use crate::style::{Sid, SPATIUM20};
use crate::symbols::{SmuflAnchor, SymId};

// ═══════════════════════════════════════════════════════════════════════
// Single glyph marks
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn draw_accidental(props: &ItemProps, item: &Accidental, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    p.set_pen(Pen::from(cur_color(props, ctx)));
    for placed in &layout.syms {
        draw_sym(p, ctx, props, placed.sym, placed.pos);
    }
}

pub(super) fn draw_breath(props: &ItemProps, item: &SymbolMark, p: &mut dyn Painter, ctx: &RenderContext) {
    p.set_pen(Pen::from(cur_color(props, ctx)));
    draw_sym(p, ctx, props, item.sym, Point::ORIGIN);
}

/// Fermatas are centred on their origin.
pub(super) fn draw_fermata(props: &ItemProps, item: &SymbolMark, p: &mut dyn Painter, ctx: &RenderContext) {
    let width = item.layout.as_ref().map_or(0.0, |l| l.bbox.width());
    p.set_pen(Pen::from(cur_color(props, ctx)));
    draw_sym(p, ctx, props, item.sym, Point::new(-0.5 * width, 0.0));
}

/// Articulations and ornaments: a centred glyph, or a letter for the
/// tap/slap/pop text types.
pub(super) fn draw_articulation(props: &ItemProps, item: &Articulation, p: &mut dyn Painter, ctx: &RenderContext) {
    let bbox = item.layout.as_ref().map_or(Rect::ZERO, |l| l.bbox);
    p.set_pen(Pen::from(cur_color(props, ctx)));

    if item.text_type == ArticulationText::None {
        draw_sym(p, ctx, props, item.sym, Point::new(-0.5 * bbox.width(), 0.0));
    } else {
        let mut font = item.font.clone();
        font.size *= props.mag_s() * ctx.options.pixel_ratio;
        p.set_font(font);
        p.draw_text_in_rect(bbox, Align::TOP_LEFT, item.text_type.label());
    }
}

pub(super) fn draw_hook(props: &ItemProps, item: &Hook, p: &mut dyn Painter, ctx: &RenderContext) {
    if item.cross_measure == CrossMeasure::Second {
        return;
    }
    p.set_pen(Pen::from(cur_color(props, ctx)));
    draw_sym(p, ctx, props, item.sym, Point::ORIGIN);
}

pub(super) fn draw_rest(props: &ItemProps, item: &Rest, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    if item.suppressed {
        return;
    }
    p.set_pen(Pen::from(cur_color(props, ctx)));
    draw_sym(p, ctx, props, layout.sym, Point::ORIGIN);
}

pub(super) fn draw_note_dot(props: &ItemProps, item: &NoteDot, p: &mut dyn Painter, ctx: &RenderContext) {
    if (!item.on_rest && item.dots_hidden) || (item.on_rest && item.gap_rest) {
        return;
    }
    // on tablature dots follow the stems or the rests
    let shown = match &item.staff {
        Some(staff) if staff.is_tab => {
            if item.on_rest {
                staff.show_rests
            } else {
                staff.stem_through
            }
        }
        _ => true,
    };
    if shown {
        p.set_pen(Pen::from(cur_color(props, ctx)));
        draw_sym(p, ctx, props, SymId::AugmentationDot, Point::ORIGIN);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Stems and strokes
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn draw_ledger_line(props: &ItemProps, item: &LedgerLine, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    if item.cross_measure == CrossMeasure::Second {
        return;
    }
    p.set_pen(Pen::new(cur_color(props, ctx), layout.line_width).with_cap(Cap::Butt));
    let end = if item.vertical { (0.0, item.len) } else { (item.len, 0.0) };
    p.draw_line(Line::new(Point::ORIGIN, end));
}

pub(super) fn draw_stem_slash(props: &ItemProps, item: &StemSlash, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    p.set_pen(Pen::new(cur_color(props, ctx), layout.stem_width).with_cap(Cap::Butt));
    p.draw_line(layout.line);
}

pub(super) fn draw_stem(props: &ItemProps, item: &Stem, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    if item.cross_measure == CrossMeasure::Second {
        return;
    }
    let color = cur_color(props, ctx);
    p.set_pen(Pen::new(color, item.line_width).with_cap(Cap::Butt));
    p.draw_line(layout.line);

    let Some(staff) = item.staff.as_ref().filter(|s| s.is_tab) else {
        return;
    };
    let sp = props.spatium;

    if item.tab.slashed_minim {
        let mut y = if item.up {
            -item.length + TAB_SLASH_START_Y_UP * sp
        } else {
            item.length - TAB_SLASH_START_Y_DOWN * sp
        };
        // snap the slash pair onto the string lines it crosses
        if staff.stem_through {
            let half_line = staff.line_distance * sp * 0.5;
            let half_slash = TAB_SLASH_TOTAL_HEIGHT * sp * 0.5;
            y = ((y + half_slash) / half_line).round() * half_line - half_slash;
        }
        p.set_brush_color(color);
        p.set_no_pen();
        p.draw_path(&tab_slashes(y, sp));
    }

    if item.tab.dots > 0 && !staff.stem_through {
        let y = TAB_STEM_DOT_Y * sp * if item.up { -1.0 } else { 1.0 };
        let step = ctx.style.value_s(Sid::DotDotDistance) * sp;
        for i in 0..item.tab.dots {
            let x = item.tab.dot_pos_x + f64::from(i) * step;
            draw_sym(p, ctx, props, SymId::AugmentationDot, Point::new(x, y));
        }
    }
}

/// Two slanted parallelograms crossing a half-note stem from `y` down.
fn tab_slashes(mut y: f64, sp: f64) -> BezPath {
    let half_w = sp * TAB_SLASH_WIDTH * 0.5;
    let slant = sp * TAB_SLASH_SLANT_Y;
    let thick = sp * TAB_SLASH_THICKNESS;
    let mut path = BezPath::new();
    for _ in 0..2 {
        path.move_to((half_w, y));
        path.line_to((half_w, y + thick));
        path.line_to((-half_w, y + thick + slant));
        path.line_to((-half_w, y + slant));
        path.close_path();
        y += sp * TAB_SLASH_DISPLACEMENT;
    }
    path
}

// ═══════════════════════════════════════════════════════════════════════
// Notes
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn draw_note(props: &ItemProps, item: &Note, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    if item.hidden {
        return;
    }
    match (&item.tab, item.staff.as_ref().filter(|s| s.is_tab)) {
        (Some(fret), Some(staff)) => draw_tab_fret(props, fret, staff, layout, p, ctx),
        _ => draw_notehead(props, item, layout, p, ctx),
    }
}

fn draw_tab_fret(
    props: &ItemProps,
    fret: &TabFret,
    staff: &StaffContext,
    layout: &NoteLayout,
    p: &mut dyn Painter,
    ctx: &RenderContext,
) {
    if fret.hidden || fret.hidden_by_tie {
        return;
    }
    let color = if fret.negative_fret { ctx.config.critical_color } else { cur_color(props, ctx) };
    let unit = SPATIUM20 * props.mag_s();

    // mask the string line behind the fret mark
    if !staff.lines_through || fret.fret_conflict {
        let pad = props.spatium * TAB_FRET_MASK_PAD;
        let x0 = layout.bbox.x0 - pad;
        let y0 = fret.mask_y * unit;
        let mask = Rect::new(x0, y0, x0 + layout.bbox.width() + 2.0 * pad, y0 + fret.mask_h * unit);
        p.fill_rect(mask, ctx.config.note_background_color);

        if fret.fret_conflict && ctx.options.shows_marks() {
            let mut scope = Scoped::new(p);
            scope.set_pen(Pen::from(ctx.config.critical_color));
            scope.set_brush_color(ctx.config.critical_color);
            scope.draw_rect(mask);
        }
    }

    let mut font = fret.font.clone();
    font.size *= props.mag_s() * ctx.options.pixel_ratio;
    p.set_font(font);
    p.set_pen(Pen::from(color));
    let mut x = layout.bbox.x0;
    if fret.ghost_paren_offset {
        x += sym_width(ctx, props, SymId::NoteheadParenthesisLeft);
    }
    p.draw_text(Point::new(x, fret.font_y_offset * unit), &fret.text);
}

fn draw_notehead(props: &ItemProps, item: &Note, layout: &NoteLayout, p: &mut dyn Painter, ctx: &RenderContext) {
    if item.cross_measure == CrossMeasure::Second {
        return;
    }
    let config = ctx.config;
    let mut color = cur_color(props, ctx);
    let checked_staff = item.staff.as_ref().filter(|s| !s.is_drum && !ctx.options.printing);

    if let (Some(_), Some(range)) = (checked_staff, &item.range) {
        if ctx.options.warn_pitch_range {
            let pitch = range.pitch;
            if pitch < range.min_professional || pitch > range.max_professional {
                color = if props.selected { config.critical_selected_color } else { config.critical_color };
            } else if pitch < range.min_amateur || pitch > range.max_amateur {
                color = if props.selected { config.warning_selected_color } else { config.warning_color };
            }
        }
    }
    if checked_staff.is_some() && item.harp_unplayable {
        color = if props.selected { config.critical_selected_color } else { config.critical_color };
    }
    p.set_pen(Pen::from(color));

    // blank glyph masks staff and ledger lines under the head
    if layout.blank != SymId::NoSym {
        let mut scope = Scoped::new(p);
        scope.set_pen(Pen::from(config.note_background_color));
        draw_sym(&mut scope, ctx, props, layout.blank, Point::ORIGIN);
    }
    draw_sym(p, ctx, props, layout.notehead, Point::ORIGIN);
}

/// Note-input preview in the voice's selection colour.
pub(super) fn draw_shadow_note(props: &ItemProps, item: &ShadowNote, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    if !props.visible || !item.valid {
        return;
    }
    let style = ctx.style;
    let mag = props.mag;
    let sp = props.spatium;
    let half_sp = sp / 2.0;

    let mut scope = Scoped::new(p);
    let p: &mut dyn Painter = &mut scope;
    p.translate(layout.page_pos.to_vec2());

    let mut lw = style.mm(Sid::StemWidth) * mag;
    let mut pen = Pen::new(ctx.config.selection_color(props.voice), lw).with_cap(Cap::Butt);
    p.set_pen(pen.clone());

    if item.accidental != SymId::NoSym {
        let x = -(sym_width(ctx, props, item.accidental) + style.mm(Sid::AccidentalNoteDistance) * mag);
        draw_sym(p, ctx, props, item.accidental, Point::new(x, 0.0));
    }

    draw_sym(p, ctx, props, item.notehead, Point::ORIGIN);
    let head_w = sym_width(ctx, props, item.notehead);
    let has_flag = item.flag != SymId::NoSym;

    if item.dots > 0 {
        let dot_dot = style.mm(Sid::DotDotDistance) * mag;
        let mut x = head_w + style.mm(Sid::DotNoteDistance) * mag;
        let y = if item.is_rest {
            f64::from(item.rest_dot_line) * half_sp
        } else if item.line_index % 2 == 0 {
            -half_sp
        } else {
            0.0
        };
        if has_flag && item.up {
            x = x.max(head_w + sym_bbox(ctx, props, item.flag).x1);
        }
        for i in 0..item.dots {
            draw_sym(p, ctx, props, SymId::AugmentationDot, Point::new(x + dot_dot * f64::from(i), y));
        }
    }

    if item.has_stem {
        let x = if item.up { head_w - lw / 2.0 } else { lw / 2.0 };
        let mag_s = props.mag_s();
        let head_anchor = if item.up { SmuflAnchor::StemUpSE } else { SmuflAnchor::StemDownNW };
        let y1 = ctx.symbols.smufl_anchor(item.notehead, head_anchor, mag_s).y;
        let mut y2 = SHADOW_STEM_LENGTH * sp * if item.up { -1.0 } else { 1.0 };
        if has_flag {
            draw_sym(p, ctx, props, item.flag, Point::new(x - lw / 2.0, y2));
            let flag_anchor = if item.up { SmuflAnchor::StemUpNW } else { SmuflAnchor::StemDownSW };
            y2 += ctx.symbols.smufl_anchor(item.flag, flag_anchor, mag_s).y;
        }
        p.draw_line(Line::new((x, y1), (x, y2)));
    }

    if !item.is_rest && item.line_index.abs() < NO_LINE_INDEX {
        let extra = style.value_s(Sid::LedgerLineLength) * sp;
        let (x1, x2) = (-extra, head_w + extra);
        let step = half_sp * item.staff.line_distance;
        lw = style.mm(Sid::LedgerLineWidth) * mag;
        pen.width = lw;
        p.set_pen(pen);

        let line = item.line_index;
        let above = (line..=-2).rev().step_by(2);
        let below = (item.staff.lines as i32 * 2..=line).step_by(2);
        for i in above.chain(below) {
            let y = step * f64::from(i - line);
            p.draw_line(Line::new((x1, y), (x2, y)));
        }
    }

    for art in &item.articulations {
        draw_sym(p, ctx, props, art.sym, art.pos);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Chord decorations
// ═══════════════════════════════════════════════════════════════════════

/// Ambitus range: two noteheads, the connecting line and ledger lines
/// outside the staff.
pub(super) fn draw_ambitus(props: &ItemProps, item: &Ambitus, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    let sp = props.spatium;
    let color = cur_color(props, ctx);
    p.set_pen(Pen::new(color, item.line_width * sp).with_cap(Cap::Butt));

    draw_sym(p, ctx, props, item.note_head, layout.top_pos);
    draw_sym(p, ctx, props, item.note_head, layout.bottom_pos);
    if let Some(line) = layout.line {
        p.draw_line(line);
    }

    // palette cells have no staff
    let Some(staff) = &item.staff else {
        return;
    };
    let step = staff.line_distance * sp;
    let tolerance = step * AMBITUS_LEDGER_TOLERANCE;
    let extra = ctx.style.value_s(Sid::LedgerLineLength) * sp;
    let head_w = sym_width(ctx, props, item.note_head);
    p.set_pen(Pen::new(color, ctx.style.value_s(Sid::LedgerLineWidth) * sp).with_cap(Cap::Butt));

    let top = layout.top_pos;
    if top.y - tolerance <= -step {
        let mut y = -step;
        while y >= top.y - tolerance {
            p.draw_line(Line::new((top.x - extra, y), (top.x + head_w + extra, y)));
            y -= step;
        }
    }
    let bottom = layout.bottom_pos;
    let staff_bottom = f64::from(staff.lines) * step;
    if bottom.y + tolerance >= staff_bottom {
        let mut y = staff_bottom;
        while y <= bottom.y + tolerance {
            p.draw_line(Line::new((bottom.x - extra, y), (bottom.x + head_w + extra, y)));
            y += step;
        }
    }
}

pub(super) fn draw_arpeggio(props: &ItemProps, item: &Arpeggio, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    let y1 = layout.bbox.y0;
    let y2 = layout.bbox.y1;
    let line_w = ctx.style.mm(Sid::ArpeggioLineWidth);
    let r = layout.syms_bbox;
    let sp = props.spatium;

    p.set_pen(Pen::new(cur_color(props, ctx), line_w).with_cap(Cap::Butt));
    let mut scope = Scoped::new(p);
    let p: &mut dyn Painter = &mut scope;

    match item.arpeggio_type {
        ArpeggioType::Normal | ArpeggioType::Up => {
            p.rotate(-90.0);
            draw_syms(p, ctx, props, &layout.syms, Point::new(-r.x1 - y1, -r.y1 + r.height()));
        }
        ArpeggioType::Down => {
            p.rotate(90.0);
            draw_syms(p, ctx, props, &layout.syms, Point::new(-r.x0 + y1, -r.y0 - r.height()));
        }
        ArpeggioType::UpStraight => {
            let x = sp * 0.5;
            draw_sym(p, ctx, props, SymId::ArrowheadBlackUp, Point::new(x - r.width() * 0.5, y1 - r.y0));
            p.draw_line(Line::new((x, y1 - r.y0 * 0.5), (x, y2)));
        }
        ArpeggioType::DownStraight => {
            let x = sp * 0.5;
            draw_sym(p, ctx, props, SymId::ArrowheadBlackDown, Point::new(x - r.width() * 0.5, y2 - r.y1));
            p.draw_line(Line::new((x, y1), (x, y2 + r.y0 * 0.5)));
        }
        ArpeggioType::Bracket => {
            let w = ctx.style.value_s(Sid::ArpeggioHookLen) * sp;
            p.draw_line(Line::new((0.0, y1), (w, y1)));
            p.draw_line(Line::new((0.0, y2), (w, y2)));
            p.draw_line(Line::new((0.0, y1 - line_w / 2.0), (0.0, y2 + line_w / 2.0)));
        }
    }
}

/// Two wave glyphs a wavy chord line is drawn with.
const WAVE_SYMBOLS: [SymId; 2] = [SymId::WiggleGlissando, SymId::WiggleGlissando];

pub(super) fn draw_chord_line(props: &ItemProps, item: &ChordLine, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    let color = cur_color(props, ctx);
    if !item.wavy {
        p.set_pen(Pen::new(color, ctx.style.mm(Sid::ChordlineThickness) * props.mag));
        p.set_no_brush();
        p.draw_path(&layout.path);
        return;
    }
    let angle = if item.chord_line_type == ChordLineType::Fall {
        CHORD_LINE_WAVE_ANGLE
    } else {
        -CHORD_LINE_WAVE_ANGLE
    };
    p.set_pen(Pen::from(color));
    let mut scope = Scoped::new(p);
    scope.rotate(angle);
    draw_syms(&mut scope, ctx, props, &WAVE_SYMBOLS, Point::ORIGIN);
}

pub(super) fn draw_dead_slapped(props: &ItemProps, item: &DeadSlapped, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    p.set_no_pen();
    p.set_brush_color(cur_color(props, ctx));
    p.draw_path(&layout.path1);
    p.draw_path(&layout.path2);
}

/// Grace notes of a bagpipe embellishment with an optional three-stroke beam.
pub(super) fn draw_bagpipe_embellishment(
    props: &ItemProps,
    item: &BagpipeEmbellishment,
    p: &mut dyn Painter,
    ctx: &RenderContext,
) {
    let Some(layout) = &item.layout else {
        return;
    };
    let color = cur_color(props, ctx);
    p.set_pen(Pen::new(color, layout.stem_width).with_cap(Cap::Butt));

    for note in &layout.notes {
        draw_sym(p, ctx, props, layout.head_sym, note.head_pos);
        p.draw_line(note.stem);
        if layout.draw_flag {
            draw_sym(p, ctx, props, layout.flag_sym, note.flag_pos);
        }
        if let Some(ledger) = note.ledger_line {
            p.draw_line(ledger);
        }
    }

    if let Some(beam) = &layout.beam {
        p.set_pen(Pen::new(color, beam.width).with_cap(Cap::Butt));
        let step = layout.spatium / BAGPIPE_BEAM_STEP;
        for i in 0..3 {
            let y = beam.y + f64::from(i) * step;
            p.draw_line(Line::new((beam.x1, y), (beam.x2, y)));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Tablature duration marks
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn draw_tab_duration_symbol(
    props: &ItemProps,
    item: &TabDurationSymbol,
    p: &mut dyn Painter,
    ctx: &RenderContext,
) {
    let Some(layout) = &item.layout else {
        return;
    };
    let Some(tab) = &item.tab else {
        return;
    };
    if item.repeat_suppressed {
        return;
    }
    let mag = props.mag_s();
    let sp = props.spatium;
    let mut pen = Pen::from(cur_color(props, ctx));
    p.set_pen(pen.clone());

    let mut scope = Scoped::new(p);
    scope.scale(mag, mag);

    if layout.beam_grid == TabBeamGrid::None {
        scope.set_font(scaled_font(&tab.font, ctx));
        scope.draw_text(Point::ORIGIN, &item.text);
        return;
    }

    // stem height comes from the magnified bbox
    let mut h = layout.bbox.y0 / mag;
    pen = pen.with_cap(Cap::Butt);
    pen.width = tab.grid_stem_width * sp;
    scope.set_pen(pen.clone());
    scope.draw_line(Line::new((0.0, h), (0.0, 0.0)));

    if layout.beam_grid == TabBeamGrid::MedialFinal && layout.beam_level > 0 {
        let beam_w = tab.grid_beam_width * sp;
        pen.width = beam_w;
        scope.set_pen(pen);
        // the top beam's upper edge lines up with the stem top
        h += beam_w * 0.5;
        let step = -h / f64::from(layout.beam_level);
        for i in 0..layout.beam_level {
            let y = h + f64::from(i) * step;
            scope.draw_line(Line::new((layout.beam_length, y), (0.0, y)));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Tuplets
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn draw_tuplet(props: &ItemProps, item: &Tuplet, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    if item.staff.as_ref().is_some_and(|s| s.is_tab && s.stemless) {
        return;
    }
    let color = cur_color(props, ctx);
    if let Some(number) = &item.number {
        p.set_pen(Pen::from(color));
        draw_child(number, p, ctx);
    }
    if !item.has_bracket {
        return;
    }
    p.set_pen(Pen::new(color, item.bracket_width * props.spatium * props.mag));
    if item.number.is_some() {
        p.draw_polyline(&layout.bracket_l[..3]);
        p.draw_polyline(&layout.bracket_r);
    } else {
        p.draw_polyline(&layout.bracket_l);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderOptions;
    use crate::painter::{PaintOp, PenStyle, RecordingPainter};
    use crate::renderer::Resources;
    use pretty_assertions::assert_eq;

    #[test]
    fn second_cross_measure_parts_are_hidden() {
        let res = Resources::default();
        let ctx = res.context();
        let props = ItemProps::default();
        let mut rec = RecordingPainter::new();
        let stem = Stem { cross_measure: CrossMeasure::Second, layout: Some(StemLayout::default()), ..Stem::default() };
        draw_stem(&props, &stem, &mut rec, &ctx);
        let hook = Hook { cross_measure: CrossMeasure::Second, ..Hook::default() };
        draw_hook(&props, &hook, &mut rec, &ctx);
        let ledger = LedgerLine {
            cross_measure: CrossMeasure::Second,
            layout: Some(LedgerLineLayout::default()),
            ..LedgerLine::default()
        };
        draw_ledger_line(&props, &ledger, &mut rec, &ctx);
        assert_eq!(rec.call_count(), 0);
    }

    #[test]
    fn vertical_ledger_line_runs_down() {
        let res = Resources::default();
        let mut rec = RecordingPainter::new();
        let ledger = LedgerLine { vertical: true, len: 12.0, layout: Some(LedgerLineLayout { line_width: 2.0 }), ..LedgerLine::default() };
        draw_ledger_line(&ItemProps::default(), &ledger, &mut rec, &res.context());
        assert_eq!(rec.device_lines(), vec![Line::new((0.0, 0.0), (0.0, 12.0))]);
        assert_eq!(rec.calls()[0].state.pen.cap, Cap::Butt);
    }

    #[test]
    fn slashed_minim_on_tab_adds_a_filled_path() {
        let res = Resources::default();
        let mut rec = RecordingPainter::new();
        let stem = Stem {
            staff: Some(StaffContext::tab()),
            tab: TabStem { slashed_minim: true, ..TabStem::default() },
            layout: Some(StemLayout::default()),
            ..Stem::default()
        };
        draw_stem(&ItemProps::default(), &stem, &mut rec, &res.context());
        let ops = rec.ops();
        assert!(matches!(ops[0], PaintOp::Line(_)));
        assert!(matches!(ops[1], PaintOp::Path(_)));
        assert_eq!(rec.calls()[1].state.pen.style, PenStyle::NoPen);
    }

    #[test]
    fn tab_stem_dots_sit_beside_the_stem() {
        let res = Resources::default();
        let mut rec = RecordingPainter::new();
        let stem = Stem {
            staff: Some(StaffContext::tab()),
            tab: TabStem { dots: 2, dot_pos_x: 10.0, ..TabStem::default() },
            layout: Some(StemLayout::default()),
            ..Stem::default()
        };
        let props = ItemProps::default();
        draw_stem(&props, &stem, &mut rec, &res.context());
        let glyphs = rec.device_glyphs();
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].1, Point::new(10.0, -TAB_STEM_DOT_Y * props.spatium));
    }

    #[test]
    fn note_out_of_professional_range_is_critical() {
        let res = Resources::default();
        let note = Note {
            staff: Some(StaffContext::default()),
            range: Some(PitchRange {
                pitch: 30,
                min_professional: 40,
                max_professional: 80,
                min_amateur: 45,
                max_amateur: 75,
            }),
            layout: Some(NoteLayout { notehead: SymId::NoteheadBlack, ..NoteLayout::default() }),
            ..Note::default()
        };
        let mut rec = RecordingPainter::new();
        draw_note(&ItemProps::default(), &note, &mut rec, &res.context());
        assert_eq!(rec.calls()[0].state.pen.color, res.config.critical_color);

        let mut res = Resources::default();
        res.options = RenderOptions::print();
        let mut rec = RecordingPainter::new();
        draw_note(&ItemProps::default(), &note, &mut rec, &res.context());
        assert_eq!(rec.calls()[0].state.pen.color, peniko::Color::BLACK);
    }

    #[test]
    fn blank_notehead_is_drawn_first_in_background_colour() {
        let res = Resources::default();
        let note = Note {
            layout: Some(NoteLayout {
                notehead: SymId::NoteheadBlack,
                blank: SymId::NoteheadWhole,
                ..NoteLayout::default()
            }),
            ..Note::default()
        };
        let mut rec = RecordingPainter::new();
        draw_note(&ItemProps::default(), &note, &mut rec, &res.context());
        let calls = rec.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].state.pen.color, res.config.note_background_color);
        assert_eq!(calls[1].state.pen.color, peniko::Color::BLACK);
        assert_eq!(rec.depth(), 0);
    }

    #[test]
    fn tab_fret_masks_the_string_line() {
        let res = Resources::default();
        let note = Note {
            staff: Some(StaffContext::tab()),
            tab: Some(TabFret { text: "5".into(), ..TabFret::default() }),
            layout: Some(NoteLayout { bbox: Rect::new(0.0, -5.0, 8.0, 5.0), ..NoteLayout::default() }),
            ..Note::default()
        };
        let mut rec = RecordingPainter::new();
        draw_note(&ItemProps::default(), &note, &mut rec, &res.context());
        let ops = rec.ops();
        assert!(matches!(ops[0], PaintOp::FillRect(..)));
        assert!(matches!(ops[1], PaintOp::Text(_, t) if t == "5"));
    }

    #[test]
    fn dots_on_tab_follow_staff_type() {
        let res = Resources::default();
        let ctx = res.context();
        let mut rec = RecordingPainter::new();
        let dot = NoteDot { staff: Some(StaffContext::tab()), ..NoteDot::default() };
        draw_note_dot(&ItemProps::default(), &dot, &mut rec, &ctx);
        assert_eq!(rec.call_count(), 0);

        let staff = StaffContext { stem_through: true, ..StaffContext::tab() };
        let dot = NoteDot { staff: Some(staff), ..NoteDot::default() };
        draw_note_dot(&ItemProps::default(), &dot, &mut rec, &ctx);
        assert_eq!(rec.device_glyphs().len(), 1);
    }

    #[test]
    fn shadow_note_ledger_lines_and_translation_balance() {
        let res = Resources::default();
        let props = ItemProps::default();
        let shadow = ShadowNote {
            line_index: -4,
            has_stem: false,
            layout: Some(ShadowNoteLayout { page_pos: Point::new(100.0, 50.0) }),
            ..ShadowNote::default()
        };
        let mut rec = RecordingPainter::new();
        draw_shadow_note(&props, &shadow, &mut rec, &res.context());
        let ys: Vec<f64> = rec.device_lines().iter().map(|l| l.p0.y).collect();
        let half = props.spatium / 2.0;
        assert_eq!(ys, vec![50.0 + 2.0 * half, 50.0]);
        assert_eq!(rec.state().transform, kurbo::Affine::IDENTITY);
    }

    #[test]
    fn invalid_shadow_note_draws_nothing() {
        let res = Resources::default();
        let shadow = ShadowNote { valid: false, layout: Some(ShadowNoteLayout::default()), ..ShadowNote::default() };
        let mut rec = RecordingPainter::new();
        draw_shadow_note(&ItemProps::default(), &shadow, &mut rec, &res.context());
        assert_eq!(rec.call_count(), 0);
    }

    #[test]
    fn ambitus_ledger_lines_outside_the_staff() {
        let res = Resources::default();
        let props = ItemProps::default();
        let sp = props.spatium;
        let ambitus = Ambitus {
            staff: Some(StaffContext::default()),
            layout: Some(AmbitusLayout {
                top_pos: Point::new(0.0, -2.0 * sp),
                bottom_pos: Point::new(0.0, 6.0 * sp),
                line: None,
            }),
            ..Ambitus::default()
        };
        let mut rec = RecordingPainter::new();
        draw_ambitus(&props, &ambitus, &mut rec, &res.context());
        let ys: Vec<f64> = rec.device_lines().iter().map(|l| (l.p0.y / sp).round()).collect();
        assert_eq!(ys, vec![-1.0, -2.0, 5.0, 6.0]);
    }

    #[test]
    fn bagpipe_beam_has_three_strokes() {
        let res = Resources::default();
        let embellishment = BagpipeEmbellishment {
            layout: Some(BagpipeLayout {
                head_sym: SymId::NoteheadBlack,
                stem_width: 1.0,
                beam: Some(BagpipeBeam { x1: 0.0, x2: 30.0, y: -40.0, width: 2.0 }),
                spatium: 15.0,
                ..BagpipeLayout::default()
            }),
        };
        let mut rec = RecordingPainter::new();
        draw_bagpipe_embellishment(&ItemProps::default(), &embellishment, &mut rec, &res.context());
        let ys: Vec<f64> = rec.device_lines().iter().map(|l| l.p0.y).collect();
        assert_eq!(ys, vec![-40.0, -30.0, -20.0]);
    }

    #[test]
    fn tuplet_bracket_splits_around_the_number() {
        let res = Resources::default();
        let ctx = res.context();
        let mut tuplet = Tuplet { layout: Some(TupletLayout::default()), ..Tuplet::default() };
        let mut rec = RecordingPainter::new();
        draw_tuplet(&ItemProps::default(), &tuplet, &mut rec, &ctx);
        assert!(matches!(rec.ops()[..], [PaintOp::Polyline(pts)] if pts.len() == 4));

        tuplet.number = Some(Box::new(Element::placeholder(ElementKind::Text)));
        let mut rec = RecordingPainter::new();
        draw_tuplet(&ItemProps::default(), &tuplet, &mut rec, &ctx);
        let polylines: Vec<usize> = rec
            .ops()
            .iter()
            .filter_map(|op| match op {
                PaintOp::Polyline(pts) => Some(pts.len()),
                _ => None,
            })
            .collect();
        assert_eq!(polylines, vec![3, 3]);
        assert_eq!(rec.depth(), 0);
    }

    #[test]
    fn tab_duration_grid_draws_beams() {
        let res = Resources::default();
        let symbol = TabDurationSymbol {
            tab: Some(TabDurationStyle::default()),
            layout: Some(TabDurationLayout {
                bbox: Rect::new(0.0, -30.0, 2.0, 0.0),
                beam_grid: TabBeamGrid::MedialFinal,
                beam_length: -20.0,
                beam_level: 2,
            }),
            ..TabDurationSymbol::default()
        };
        let mut rec = RecordingPainter::new();
        draw_tab_duration_symbol(&ItemProps::default(), &symbol, &mut rec, &res.context());
        assert_eq!(rec.device_lines().len(), 3);
        assert_eq!(rec.depth(), 0);
    }
}
