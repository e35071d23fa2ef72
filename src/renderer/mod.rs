//! Draw pass: dispatches every element kind to its drawing procedure.
//!
//! [`draw_item`] is the single entry point. It checks the layout snapshot,
//! wraps the painter in a [`Scoped`] guard so pen, brush, font and
//! transform come back unchanged, and matches on the element's payload.
//! Procedures are grouped by family in the submodules below; the three
//! shared routines (framed text, text-line segments and beam ribbons) are
//! reused across families.

mod barline;
mod beams;
mod constants;
mod frames;
mod fret;
mod lines;
mod notes;
mod staff;
mod text;

pub use beams::{draw_beam_ribbon, ribbon_half_width};
pub use lines::distributed_dash_pattern;

use kurbo::{Point, Rect, Size, Vec2};
use peniko::Color;

use crate::config::{EngravingConfig, RenderOptions};
use crate::model::*;
use crate::painter::{Painter, Scoped, SvgPainter};
use crate::style::Style;
use crate::symbols::{ApproxTextMetrics, SymId, SymbolFont, TableFont, TextMetrics};

// ═══════════════════════════════════════════════════════════════════════
// Context
// ═══════════════════════════════════════════════════════════════════════

/// Read-only services a paint pass consults.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub style: &'a Style,
    pub symbols: &'a dyn SymbolFont,
    pub metrics: &'a dyn TextMetrics,
    pub config: &'a EngravingConfig,
    pub options: RenderOptions,
}

/// Owned defaults for a [`RenderContext`]: built-in style, glyph table,
/// approximate text metrics and default colours.
#[derive(Debug, Clone, Default)]
pub struct Resources {
    pub style: Style,
    pub font: TableFont,
    pub metrics: ApproxTextMetrics,
    pub config: EngravingConfig,
    pub options: RenderOptions,
}

impl Resources {
    pub fn context(&self) -> RenderContext<'_> {
        RenderContext {
            style: &self.style,
            symbols: &self.font,
            metrics: &self.metrics,
            config: &self.config,
            options: self.options,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Colour and glyph helpers
// ═══════════════════════════════════════════════════════════════════════

/// Colour an element is drawn with right now.
pub fn cur_color(props: &ItemProps, ctx: &RenderContext) -> Color {
    cur_color_with(props, ctx, props.visible, props.color)
}

/// [`cur_color`] with an explicit visibility and normal colour, for parts
/// (frames, lines) that carry their own colour.
pub fn cur_color_with(props: &ItemProps, ctx: &RenderContext, visible: bool, normal: Color) -> Color {
    if ctx.options.printing {
        return if normal == ctx.config.default_color { Color::BLACK } else { normal };
    }
    if props.drop_target {
        return ctx.config.highlight_color;
    }
    if props.selected {
        let c = ctx.config.selection_color(props.voice);
        return if visible { c } else { c.with_alpha(c.components[3] * 0.5) };
    }
    if !visible {
        return ctx.config.invisible_color;
    }
    normal
}

/// Colour of editor-only marks.
pub(crate) fn mark_color(props: &ItemProps, ctx: &RenderContext) -> Color {
    if props.selected {
        ctx.config.selection_color(0)
    } else {
        ctx.config.formatting_marks_color
    }
}

/// Draw one glyph at the element's glyph magnification.
pub(crate) fn draw_sym(p: &mut dyn Painter, ctx: &RenderContext, props: &ItemProps, id: SymId, pos: Point) {
    ctx.symbols.draw_one(p, id, pos, props.mag_s());
}

pub(crate) fn draw_syms(p: &mut dyn Painter, ctx: &RenderContext, props: &ItemProps, ids: &[SymId], pos: Point) {
    ctx.symbols.draw(p, ids, pos, props.mag_s());
}

pub(crate) fn sym_width(ctx: &RenderContext, props: &ItemProps, id: SymId) -> f64 {
    ctx.symbols.width(id, props.mag_s())
}

pub(crate) fn sym_bbox(ctx: &RenderContext, props: &ItemProps, id: SymId) -> Rect {
    ctx.symbols.bbox(id, props.mag_s())
}

/// Bounding box of a glyph run laid out by advance from the origin.
pub(crate) fn run_bbox(ctx: &RenderContext, props: &ItemProps, ids: &[SymId]) -> Rect {
    let mag = props.mag_s();
    let mut x = 0.0;
    let mut bbox: Option<Rect> = None;
    for id in ids.iter().filter(|id| **id != SymId::NoSym) {
        let r = ctx.symbols.bbox(*id, mag) + Vec2::new(x, 0.0);
        bbox = Some(bbox.map_or(r, |b| b.union(r)));
        x += ctx.symbols.advance(*id, mag);
    }
    bbox.unwrap_or(Rect::ZERO)
}

// ═══════════════════════════════════════════════════════════════════════
// Dispatcher
// ═══════════════════════════════════════════════════════════════════════

/// Draw `item` in its own coordinate system.
///
/// Painter state is restored when this returns. Elements without a layout
/// snapshot are reported and skipped.
pub fn draw_item(item: &Element, painter: &mut dyn Painter, ctx: &RenderContext) {
    tracing::trace!(kind = item.name(), "draw item");

    if !item.data.has_layout() {
        tracing::error!(kind = item.name(), "element has no layout data, skipping");
        return;
    }

    let mut scope = Scoped::new(painter);
    let p: &mut dyn Painter = &mut scope;
    let props = &item.props;

    match &item.data {
        ElementData::Accidental(x) => notes::draw_accidental(props, x, p, ctx),
        ElementData::ActionIcon(x) => frames::draw_action_icon(x, p),
        ElementData::Ambitus(x) => notes::draw_ambitus(props, x, p, ctx),
        ElementData::Arpeggio(x) => notes::draw_arpeggio(props, x, p, ctx),
        ElementData::Articulation(x) | ElementData::Ornament(x) => notes::draw_articulation(props, x, p, ctx),
        ElementData::BagpipeEmbellishment(x) => notes::draw_bagpipe_embellishment(props, x, p, ctx),
        ElementData::BarLine(x) => barline::draw_bar_line(props, x, p, ctx),
        ElementData::Beam(x) => beams::draw_beam(props, x, p, ctx),
        ElementData::Bend(x) => lines::draw_bend(props, x, p, ctx),
        ElementData::HBox(x) | ElementData::VBox(x) | ElementData::FBox(x) | ElementData::TBox(x) => {
            frames::draw_box(props, x, p, ctx)
        }
        ElementData::Bracket(x) => staff::draw_bracket(props, x, p, ctx),
        ElementData::Breath(x) => notes::draw_breath(props, x, p, ctx),
        ElementData::ChordLine(x) => notes::draw_chord_line(props, x, p, ctx),
        ElementData::Clef(x) => staff::draw_clef(props, x, p, ctx),
        ElementData::DeadSlapped(x) => notes::draw_dead_slapped(props, x, p, ctx),
        ElementData::Fermata(x) => notes::draw_fermata(props, x, p, ctx),
        ElementData::FiguredBass(x) => text::draw_figured_bass(props, x, p, ctx),
        ElementData::FretDiagram(x) => fret::draw_fret_diagram(props, x, p, ctx),
        ElementData::FretCircle(x) => fret::draw_fret_circle(props, x, p, ctx),
        ElementData::FSymbol(x) => text::draw_fsymbol(props, x, p, ctx),
        ElementData::GlissandoSegment(x) => lines::draw_glissando_segment(props, x, p, ctx),
        ElementData::HairpinSegment(x) => lines::draw_hairpin_segment(props, x, p, ctx),
        ElementData::Harmony(x) => text::draw_harmony(props, x, p, ctx),
        ElementData::Hook(x) => notes::draw_hook(props, x, p, ctx),
        ElementData::Image(x) => frames::draw_image(props, x, p, ctx),
        ElementData::KeySig(x) => staff::draw_key_sig(props, x, p, ctx),
        ElementData::Lasso(x) => frames::draw_lasso(x, p, ctx),
        ElementData::LayoutBreak(x) => frames::draw_layout_break(props, x, p, ctx),
        ElementData::LedgerLine(x) => notes::draw_ledger_line(props, x, p, ctx),
        ElementData::LyricsLineSegment(x) => lines::draw_lyrics_line_segment(props, x, p, ctx),
        ElementData::MeasureRepeat(x) => staff::draw_measure_repeat(props, x, p, ctx),
        ElementData::MMRest(x) => staff::draw_mm_rest(props, x, p, ctx),
        ElementData::Note(x) => notes::draw_note(props, x, p, ctx),
        ElementData::NoteDot(x) => notes::draw_note_dot(props, x, p, ctx),
        ElementData::NoteHead(x) | ElementData::Symbol(x) | ElementData::SystemDivider(x) => {
            text::draw_symbol(props, x, p, ctx)
        }
        ElementData::Page(x) => frames::draw_page(props, x, p, ctx),
        ElementData::Rest(x) => notes::draw_rest(props, x, p, ctx),
        ElementData::ShadowNote(x) => notes::draw_shadow_note(props, x, p, ctx),
        ElementData::SlurSegment(x) => lines::draw_slur_segment(props, x, p, ctx),
        ElementData::TieSegment(x) => lines::draw_tie_segment(props, x, p, ctx),
        ElementData::Spacer(x) => staff::draw_spacer(props, x, p, ctx),
        ElementData::StaffLines(x) => staff::draw_staff_lines(props, x, p, ctx),
        ElementData::StaffState(x) => staff::draw_staff_state(props, x, p, ctx),
        ElementData::StaffTypeChange(x) => staff::draw_staff_type_change(props, x, p, ctx),
        ElementData::Stem(x) => notes::draw_stem(props, x, p, ctx),
        ElementData::StemSlash(x) => notes::draw_stem_slash(props, x, p, ctx),
        ElementData::StretchedBend(x) => lines::draw_stretched_bend(props, x, p, ctx),
        ElementData::TabDurationSymbol(x) => notes::draw_tab_duration_symbol(props, x, p, ctx),
        ElementData::TimeSig(x) => staff::draw_time_sig(props, x, p, ctx),
        ElementData::Tremolo(x) => beams::draw_tremolo(props, x, p, ctx),
        ElementData::TremoloBar(x) => lines::draw_tremolo_bar(props, x, p, ctx),
        ElementData::TrillSegment(x) | ElementData::VibratoSegment(x) => lines::draw_wiggle_segment(props, x, p, ctx),
        ElementData::Tuplet(x) => notes::draw_tuplet(props, x, p, ctx),

        ElementData::GradualTempoChangeSegment(x)
        | ElementData::HarmonicMarkSegment(x)
        | ElementData::LetRingSegment(x)
        | ElementData::OttavaSegment(x)
        | ElementData::PalmMuteSegment(x)
        | ElementData::PedalSegment(x)
        | ElementData::PickScrapeSegment(x)
        | ElementData::RasgueadoSegment(x)
        | ElementData::TextLineSegment(x)
        | ElementData::VoltaSegment(x)
        | ElementData::WhammyBarSegment(x) => lines::draw_line_segment(props, x, p, ctx),

        ElementData::Capo(x)
        | ElementData::Dynamic(x)
        | ElementData::Expression(x)
        | ElementData::Fingering(x)
        | ElementData::HarpPedalDiagram(x)
        | ElementData::InstrumentChange(x)
        | ElementData::InstrumentName(x)
        | ElementData::Jump(x)
        | ElementData::Lyrics(x)
        | ElementData::Marker(x)
        | ElementData::MeasureNumber(x)
        | ElementData::MMRestRange(x)
        | ElementData::PlayTechAnnotation(x)
        | ElementData::RehearsalMark(x)
        | ElementData::StaffText(x)
        | ElementData::Sticking(x)
        | ElementData::SystemText(x)
        | ElementData::TempoText(x)
        | ElementData::Text(x)
        | ElementData::TripletFeel(x) => text::draw_text_base(props, x, p, ctx),
    }
}

/// Draw a child element translated to its own position.
pub(crate) fn draw_child(child: &Element, p: &mut dyn Painter, ctx: &RenderContext) {
    let mut scope = Scoped::new(p);
    scope.translate(child.props.pos.to_vec2());
    draw_item(child, &mut scope, ctx);
}

// ═══════════════════════════════════════════════════════════════════════
// SVG export
// ═══════════════════════════════════════════════════════════════════════

/// Paint page-positioned elements into a standalone SVG document.
///
/// Each element is drawn translated to `props.pos`, in slice order.
pub fn render_to_svg(elements: &[Element], size: Size, ctx: &RenderContext) -> String {
    let mut svg = SvgPainter::new(size.width, size.height);
    for el in elements {
        draw_child(el, &mut svg, ctx);
    }
    tracing::debug!(elements = elements.len(), primitives = svg.element_count(), "rendered svg");
    svg.build()
}
