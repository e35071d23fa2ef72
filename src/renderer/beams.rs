//! Beam ribbons: beams and two-note tremolo strokes.

use kurbo::{Line, Point};
use peniko::{Color, Fill};

use super::constants::BEAM_MAX_COMPENSATED_ANGLE;
use super::{cur_color, draw_sym, RenderContext};
use crate::model::*;
use crate::painter::{Painter, Pen};
use crate::symbols::SymId;

/// Half thickness of a beam ribbon measured vertically.
///
/// The nominal width is measured perpendicular to the beam, so slanted
/// segments are thickened by `1 / cos(angle)`. The angle is that of the
/// steepest segment; with more than one segment it is capped at 30°.
pub fn ribbon_half_width(segments: &[Line], beam_width: f64) -> f64 {
    let angle = segments
        .iter()
        .filter(|s| s.p1.x != s.p0.x)
        .map(|s| ((s.p1.y - s.p0.y) / (s.p1.x - s.p0.x)).abs().atan())
        .fold(0.0_f64, f64::max);
    let angle = if segments.len() > 1 { angle.min(BEAM_MAX_COMPENSATED_ANGLE) } else { angle };
    (beam_width / 2.0) / angle.cos()
}

/// Fills one even-odd quadrilateral per segment, offset by the ribbon half
/// thickness above and below the segment.
pub fn draw_beam_ribbon(p: &mut dyn Painter, segments: &[Line], beam_width: f64, color: Color) {
    if segments.is_empty() {
        return;
    }
    p.set_brush_color(color);
    p.set_no_pen();

    let ww = ribbon_half_width(segments, beam_width);
    for s in segments {
        let quad = [
            Point::new(s.p0.x, s.p0.y - ww),
            Point::new(s.p1.x, s.p1.y - ww),
            Point::new(s.p1.x, s.p1.y + ww),
            Point::new(s.p0.x, s.p0.y + ww),
        ];
        p.draw_polygon(&quad, Fill::EvenOdd);
    }
}

pub(super) fn draw_beam(props: &ItemProps, item: &Beam, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    draw_beam_ribbon(p, &layout.segments, layout.beam_width, cur_color(props, ctx));
}

pub(super) fn draw_tremolo(props: &ItemProps, item: &Tremolo, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    let color = cur_color(props, ctx);
    match item.tremolo_type {
        TremoloType::BuzzRoll => {
            p.set_pen(Pen::from(color));
            draw_sym(p, ctx, props, SymId::BuzzRoll, Point::ORIGIN);
        }
        // without chords to span a two-note tremolo falls back to its strokes
        TremoloType::TwoNote if !layout.beam.segments.is_empty() => {
            draw_beam_ribbon(p, &layout.beam.segments, layout.beam.beam_width, color);
        }
        TremoloType::SingleNote | TremoloType::TwoNote => {
            p.set_brush_color(color);
            p.set_no_pen();
            p.draw_path(&layout.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painter::{PaintOp, RecordingPainter};
    use crate::renderer::Resources;
    use pretty_assertions::assert_eq;
    use std::f64::consts::PI;

    #[test]
    fn flat_beam_keeps_its_width() {
        let segs = [Line::new((0.0, 0.0), (40.0, 0.0))];
        assert_eq!(ribbon_half_width(&segs, 10.0), 5.0);
    }

    #[test]
    fn single_steep_segment_is_not_clamped() {
        // 45°
        let segs = [Line::new((0.0, 0.0), (10.0, 10.0))];
        let ww = ribbon_half_width(&segs, 10.0);
        assert!((ww - 5.0 / (PI / 4.0).cos()).abs() < 1e-9);
    }

    #[test]
    fn steep_multi_segment_beam_is_clamped_at_thirty_degrees() {
        let segs = [Line::new((0.0, 0.0), (10.0, 1.0)), Line::new((0.0, 5.0), (10.0, 25.0))];
        let ww = ribbon_half_width(&segs, 10.0);
        assert!((ww - 5.0 / (PI / 6.0).cos()).abs() < 1e-9);
    }

    #[test]
    fn ribbon_is_one_even_odd_quad_per_segment() {
        let segs = [Line::new((0.0, 0.0), (20.0, 0.0)), Line::new((0.0, 8.0), (20.0, 8.0))];
        let mut rec = RecordingPainter::new();
        draw_beam_ribbon(&mut rec, &segs, 4.0, Color::BLACK);
        let ops = rec.ops();
        assert_eq!(ops.len(), 2);
        match ops[1] {
            PaintOp::Polygon(pts, fill) => {
                assert_eq!(*fill, Fill::EvenOdd);
                assert_eq!(pts[0], Point::new(0.0, 6.0));
                assert_eq!(pts[2], Point::new(20.0, 10.0));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(rec.calls()[0].state.pen.style, crate::painter::PenStyle::NoPen);
    }

    #[test]
    fn empty_beam_draws_nothing() {
        let res = Resources::default();
        let mut rec = RecordingPainter::new();
        let beam = Beam { layout: Some(BeamLayout::default()) };
        draw_beam(&ItemProps::default(), &beam, &mut rec, &res.context());
        assert_eq!(rec.call_count(), 0);
    }

    #[test]
    fn two_note_tremolo_uses_the_ribbon() {
        let res = Resources::default();
        let mut rec = RecordingPainter::new();
        let trem = Tremolo {
            tremolo_type: TremoloType::TwoNote,
            layout: Some(TremoloLayout {
                beam: BeamLayout { segments: vec![Line::new((0.0, 0.0), (10.0, 0.0))], beam_width: 2.0 },
                ..TremoloLayout::default()
            }),
        };
        draw_tremolo(&ItemProps::default(), &trem, &mut rec, &res.context());
        assert!(matches!(rec.ops()[0], PaintOp::Polygon(_, Fill::EvenOdd)));
    }
}
