//! Dispatch tests: every element kind through `draw_item` with a
//! recording painter.

use kurbo::{Affine, Line, Point, Rect};
use pretty_assertions::assert_eq;
use scoredraw::model::*;
use scoredraw::painter::PaintOp;
use scoredraw::renderer::{distributed_dash_pattern, ribbon_half_width};
use scoredraw::{draw_item, Painter, RecordingPainter, RenderOptions, Resources, Sid, Style, SymId};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn straight_line() -> LineSegment {
    LineSegment {
        layout: Some(LineSegmentLayout {
            points: vec![Point::new(0.0, 0.0), Point::new(50.0, 0.0)],
            line_length: 50.0,
            ..LineSegmentLayout::default()
        }),
        ..LineSegment::default()
    }
}

/// An element of `kind` with enough geometry to put something on the page.
fn drawable(kind: ElementKind) -> Element {
    let data = match kind {
        ElementKind::Beam => ElementData::Beam(Beam {
            layout: Some(BeamLayout { segments: vec![Line::new((0.0, 0.0), (20.0, -5.0))], beam_width: 5.0 }),
        }),
        ElementKind::GlissandoSegment => ElementData::GlissandoSegment(GlissandoSegment {
            layout: Some(GlissandoLayout { pos2: Point::new(40.0, -10.0) }),
            ..GlissandoSegment::default()
        }),
        ElementKind::HairpinSegment => ElementData::HairpinSegment(HairpinSegment {
            layout: Some(HairpinLayout {
                line: LineSegmentLayout {
                    points: vec![
                        Point::new(0.0, 0.0),
                        Point::new(40.0, -4.0),
                        Point::new(0.0, 0.0),
                        Point::new(40.0, 4.0),
                    ],
                    line_length: 40.0,
                    two_lines: true,
                    ..LineSegmentLayout::default()
                },
                circled_tip: None,
            }),
            ..HairpinSegment::default()
        }),
        ElementKind::LyricsLineSegment => ElementData::LyricsLineSegment(LyricsLineSegment {
            layout: Some(LyricsLineLayout { pos2: Point::new(30.0, 0.0), num_dashes: 1, dash_length: 5.0 }),
            ..LyricsLineSegment::default()
        }),
        ElementKind::TabDurationSymbol => ElementData::TabDurationSymbol(TabDurationSymbol {
            tab: Some(TabDurationStyle::default()),
            text: "q".to_string(),
            layout: Some(TabDurationLayout::default()),
            ..TabDurationSymbol::default()
        }),
        ElementKind::TextLineSegment => ElementData::TextLineSegment(straight_line()),
        ElementKind::VoltaSegment => ElementData::VoltaSegment(straight_line()),
        ElementKind::OttavaSegment => ElementData::OttavaSegment(straight_line()),
        ElementKind::PedalSegment => ElementData::PedalSegment(straight_line()),
        ElementKind::LetRingSegment => ElementData::LetRingSegment(straight_line()),
        ElementKind::PalmMuteSegment => ElementData::PalmMuteSegment(straight_line()),
        ElementKind::PickScrapeSegment => ElementData::PickScrapeSegment(straight_line()),
        ElementKind::RasgueadoSegment => ElementData::RasgueadoSegment(straight_line()),
        ElementKind::HarmonicMarkSegment => ElementData::HarmonicMarkSegment(straight_line()),
        ElementKind::WhammyBarSegment => ElementData::WhammyBarSegment(straight_line()),
        ElementKind::GradualTempoChangeSegment => ElementData::GradualTempoChangeSegment(straight_line()),
        _ => ElementData::placeholder(kind),
    };
    Element::new(data)
}

#[test]
fn every_kind_draws_and_restores_state() {
    for options in [RenderOptions::default(), RenderOptions::print()] {
        let printing = options.printing;
        let res = Resources { options, ..Resources::default() };
        let ctx = res.context();
        for kind in ElementKind::ALL {
            let el = drawable(*kind);
            let mut rec = RecordingPainter::new();
            let before = rec.state().clone();
            draw_item(&el, &mut rec, &ctx);
            if !printing {
                assert!(rec.call_count() > 0, "{} issued no painter calls", kind.name());
            }
            assert_eq!(rec.depth(), 0, "{} left the painter saved", kind.name());
            assert_eq!(rec.save_count(), rec.restore_count(), "{}", kind.name());
            assert_eq!(rec.state(), &before, "{} leaked painter state", kind.name());
        }
    }
}

#[test]
fn elements_without_layout_are_skipped() {
    let res = Resources::default();
    let json = r#"{"kind": "Clef", "data": {}}"#;
    let el = Element::from_json(json).unwrap();
    assert!(!el.data.has_layout());
    let mut rec = RecordingPainter::new();
    draw_item(&el, &mut rec, &res.context());
    assert_eq!(rec.call_count(), 0);
}

#[test]
fn start_repeat_strokes_follow_style_widths() {
    let style = Style::from_json(r#"{"spatium": 10.0, "barWidth": 0.12, "endBarWidth": 0.2, "endBarDistance": 0.04}"#)
        .unwrap();
    let res = Resources { style, ..Resources::default() };
    let ctx = res.context();

    for mag in [1.0, 2.0] {
        let bar = BarLine {
            bar_line_type: BarLineType::StartRepeat,
            staff: Some(StaffContext::default()),
            layout: Some(BarLineLayout { y1: 0.0, y2: 40.0 }),
            ..BarLine::default()
        };
        let props = ItemProps { spatium: 10.0, mag, ..ItemProps::default() };
        let el = Element::with_props(props, ElementData::BarLine(bar));
        let mut rec = RecordingPainter::new();
        draw_item(&el, &mut rec, &ctx);

        let bar_w = 1.2 * mag;
        let end_w = 2.0 * mag;
        let first = end_w * 0.5;
        let second = first + (end_w * 0.5 + 0.4 + bar_w * 0.5) * mag;
        let xs: Vec<f64> = rec.device_lines().iter().map(|l| l.p0.x).collect();
        assert_eq!(xs.len(), 2);
        assert!(approx(xs[0], first), "mag {mag}: {xs:?}");
        assert!(approx(xs[1], second), "mag {mag}: {xs:?}");

        let dots = rec.device_glyphs();
        assert_eq!(dots.len(), 2);
        let dot_x = second + (bar_w * 0.5 + ctx.style.mm(Sid::RepeatBarlineDotSeparation)) * mag;
        assert!(dots.iter().all(|(ch, p)| *ch == SymId::RepeatDot.codepoint().unwrap() && approx(p.x, dot_x)));
    }
}

fn glissando(glissando_type: GlissandoType) -> Element {
    Element::new(ElementData::GlissandoSegment(GlissandoSegment {
        glissando_type,
        show_text: false,
        layout: Some(GlissandoLayout { pos2: Point::new(100.0, -20.0) }),
        ..GlissandoSegment::default()
    }))
}

#[test]
fn straight_glissando_reaches_its_end_point() {
    let res = Resources::default();
    let mut rec = RecordingPainter::new();
    draw_item(&glissando(GlissandoType::Straight), &mut rec, &res.context());
    let lines = rec.device_lines();
    assert_eq!(lines.len(), 1);
    assert!((lines[0].p1.x - 100.0).abs() < 1e-9);
    assert!((lines[0].p1.y + 20.0).abs() < 1e-9);
}

#[test]
fn wavy_glissando_tiles_whole_glyphs_centred() {
    let res = Resources::default();
    let ctx = res.context();
    let props = ItemProps::default();
    let mut rec = RecordingPainter::new();
    draw_item(&glissando(GlissandoType::Wavy), &mut rec, &ctx);

    let l = 100.0_f64.hypot(20.0);
    let angle = (20.0 / l).asin();
    assert!((angle.to_degrees() - 11.31).abs() < 0.01);

    let [a, b, ..] = rec.calls()[0].state.transform.as_coeffs();
    assert!(approx(b.atan2(a), -angle));

    let advance = ctx.symbols.advance(SymId::WiggleTrill, props.mag_s());
    let n = (l / advance).floor() as usize;
    let glyphs = rec.device_glyphs();
    assert_eq!(glyphs.len(), n);

    // leftover split evenly before the first and after the last glyph
    let leftover = (l - n as f64 * advance) * 0.5;
    let bbox = ctx.symbols.bbox(SymId::WiggleTrill, props.mag_s());
    let first = Affine::rotate(-angle) * Point::new(leftover, -(bbox.y0 + bbox.height() * 0.5));
    assert!((glyphs[0].1 - first).hypot() < 1e-9);
}

#[test]
fn glissando_caption_dropped_when_too_long() {
    let res = Resources::default();
    let mut gliss = GlissandoSegment {
        text: "glissando ".repeat(20),
        layout: Some(GlissandoLayout { pos2: Point::new(40.0, 0.0) }),
        ..GlissandoSegment::default()
    };
    let mut rec = RecordingPainter::new();
    draw_item(&Element::new(ElementData::GlissandoSegment(gliss.clone())), &mut rec, &res.context());
    assert!(!rec.ops().iter().any(|op| matches!(op, PaintOp::Text(..))));

    gliss.text = "g".to_string();
    let mut rec = RecordingPainter::new();
    draw_item(&Element::new(ElementData::GlissandoSegment(gliss)), &mut rec, &res.context());
    assert!(rec.ops().iter().any(|op| matches!(op, PaintOp::Text(..))));
}

#[test]
fn distributed_dash_tiles_the_line_exactly() {
    for (dash, gap, length) in [(3.0, 3.0, 100.0), (5.0, 6.0, 57.5), (0.01, 1.99, 33.0), (3.0, 3.0, 4.0)] {
        let [d, g] = distributed_dash_pattern(dash, gap, length);
        let pairs = (length / (dash + gap)).trunc().max(1.0);
        assert_eq!(d, dash);
        assert!(approx(d * (pairs + 1.0) + g * pairs, length), "{dash} {gap} {length}");
    }
}

#[test]
fn beam_ribbon_is_never_thinner_than_nominal() {
    let segs = [
        Line::new((0.0, 0.0), (10.0, 30.0)),
        Line::new((0.0, 10.0), (10.0, 12.0)),
        Line::new((5.0, 0.0), (5.0, 10.0)),
    ];
    let half = ribbon_half_width(&segs, 8.0);
    assert!(half >= 4.0);
    assert!(approx(half, 4.0 / std::f64::consts::FRAC_PI_6.cos()));
}

#[test]
fn suppressed_elements_issue_no_calls() {
    let res = Resources::default();
    let ctx = res.context();

    let clef = Clef {
        staff: Some(StaffContext { gen_clef: false, ..StaffContext::default() }),
        layout: Some(ClefLayout::default()),
    };
    let mut rec = RecordingPainter::new();
    draw_item(&Element::new(ElementData::Clef(clef)), &mut rec, &ctx);
    assert_eq!(rec.call_count(), 0);

    let spacer = Element::placeholder(ElementKind::Spacer);
    let print = Resources { options: RenderOptions::print(), ..Resources::default() };
    let mut rec = RecordingPainter::new();
    draw_item(&spacer, &mut rec, &print.context());
    assert_eq!(rec.call_count(), 0);
}

#[test]
fn selection_colour_follows_voice() {
    let res = Resources::default();
    let props = ItemProps { selected: true, voice: 2, ..ItemProps::default() };
    let el = Element::with_props(props, ElementData::placeholder(ElementKind::Clef));
    let mut rec = RecordingPainter::new();
    draw_item(&el, &mut rec, &res.context());
    assert_eq!(rec.calls()[0].state.pen.color, res.config.selection_color(2));
}

#[test]
fn hidden_note_draws_nothing() {
    let res = Resources::default();
    let note = Note { hidden: true, layout: Some(NoteLayout::default()), ..Note::default() };
    let mut rec = RecordingPainter::new();
    draw_item(&Element::new(ElementData::Note(note)), &mut rec, &res.context());
    assert_eq!(rec.call_count(), 0);
}

#[test]
fn cross_measure_continuation_note_draws_nothing() {
    let res = Resources::default();
    let note = Note {
        cross_measure: CrossMeasure::Second,
        layout: Some(NoteLayout { bbox: Rect::new(0.0, -2.5, 6.0, 2.5), ..NoteLayout::default() }),
        ..Note::default()
    };
    let mut rec = RecordingPainter::new();
    draw_item(&Element::new(ElementData::Note(note)), &mut rec, &res.context());
    assert_eq!(rec.call_count(), 0);
}

#[test]
fn suppressed_rest_draws_nothing() {
    let res = Resources::default();
    let rest = Rest { suppressed: true, layout: Some(RestLayout { sym: SymId::RestQuarter }) };
    let mut rec = RecordingPainter::new();
    draw_item(&Element::new(ElementData::Rest(rest)), &mut rec, &res.context());
    assert_eq!(rec.call_count(), 0);
}

#[test]
fn mm_rest_draws_only_for_voice_one() {
    let res = Resources::default();
    let ctx = res.context();
    let rest = || MMRest { layout: Some(MMRestLayout { number: 4, ..MMRestLayout::default() }), ..MMRest::default() };

    let suppressed = MMRest { suppressed: true, ..rest() };
    let mut rec = RecordingPainter::new();
    draw_item(&Element::new(ElementData::MMRest(suppressed)), &mut rec, &ctx);
    assert_eq!(rec.call_count(), 0);

    let props = ItemProps { voice: 1, ..ItemProps::default() };
    let mut rec = RecordingPainter::new();
    draw_item(&Element::with_props(props, ElementData::MMRest(rest())), &mut rec, &ctx);
    assert_eq!(rec.call_count(), 0);

    let mut rec = RecordingPainter::new();
    draw_item(&Element::new(ElementData::MMRest(rest())), &mut rec, &ctx);
    assert!(rec.call_count() > 0);
}
