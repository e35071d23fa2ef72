//! Frames, pages, images and editor-only overlays.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use kurbo::{Affine, Cap, Join, Line, Rect, Size};

use super::constants::*;
use super::{cur_color, draw_child, mark_color, RenderContext};
use crate::model::*;
use crate::painter::{Align, Painter, Pen, PenStyle, Scoped};
use crate::style::{Sid, DPMM};

// ═══════════════════════════════════════════════════════════════════════
// Frames
// ═══════════════════════════════════════════════════════════════════════

/// Dotted outline of a horizontal, vertical, text or fretboard frame.
/// Frames are never printed.
pub(super) fn draw_box(props: &ItemProps, item: &FrameBox, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    if ctx.options.printing {
        return;
    }
    let highlighted = props.selected || props.drop_target;
    if !highlighted && !ctx.options.show_frames {
        return;
    }
    let color = if highlighted {
        ctx.config.selection_color(0)
    } else {
        ctx.config.formatting_marks_color
    };
    let lw = props.spatium * BOX_LINE_WIDTH;
    p.set_no_brush();
    p.set_pen(
        Pen::new(color, lw)
            .with_join(Join::Miter)
            .with_cap(Cap::Square)
            .with_dash_pattern(MARK_DASH_PATTERN.to_vec()),
    );
    p.draw_rect(layout.bbox.inset(-lw * 0.5));
}

// ═══════════════════════════════════════════════════════════════════════
// Images
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn draw_image(props: &ItemProps, item: &Image, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    let bbox = layout.bbox;

    let drawn = match item.image_type {
        ImageType::Svg => match std::str::from_utf8(&item.data) {
            Ok(source) if !source.trim().is_empty() => {
                p.draw_svg(bbox, source);
                true
            }
            _ => false,
        },
        ImageType::Raster => match image::load_from_memory(&item.data) {
            Ok(decoded) => draw_raster(props, item, &decoded.to_rgba8(), p, ctx),
            Err(err) => {
                tracing::warn!(%err, "image could not be decoded");
                false
            }
        },
    };

    if !drawn {
        draw_placeholder(bbox, p, ctx);
    }
    if props.selected && !ctx.options.printing {
        p.set_no_brush();
        p.set_pen(Pen::from(ctx.config.selection_color(0)));
        p.draw_rect(bbox);
    }
}

/// Draws the pixmap at its display size; returns false when nothing could
/// be drawn.
fn draw_raster(props: &ItemProps, item: &Image, raster: &RgbaImage, p: &mut dyn Painter, ctx: &RenderContext) -> bool {
    if raster.width() == 0 || raster.height() == 0 {
        return false;
    }
    let unit = if item.size_is_spatium { props.spatium } else { DPMM };
    let size = Size::new(item.size.width * unit, item.size.height * unit);
    let (w, h) = (f64::from(raster.width()), f64::from(raster.height()));

    let mut scope = Scoped::new(p);
    if ctx.options.printing && !ctx.options.svg_printing {
        // full resolution for print
        scope.scale(size.width / w, size.height / h);
        scope.draw_pixmap(Rect::new(0.0, 0.0, w, h), raster);
        return true;
    }

    // resample to device pixels and drop the scale from the transform
    let [a, b, c, d, e, f] = scope.transform().as_coeffs();
    let device_w = (size.width * a).round();
    let device_h = (size.height * d).round();
    if !(device_w >= 1.0 && device_h >= 1.0) {
        return false;
    }
    if device_w > MAX_IMAGE_RESAMPLE || device_h > MAX_IMAGE_RESAMPLE {
        tracing::debug!(device_w, device_h, "image too large to resample");
        scope.scale(size.width / w, size.height / h);
        scope.draw_pixmap(Rect::new(0.0, 0.0, w, h), raster);
        return true;
    }
    scope.set_transform(Affine::new([1.0, b, c, 1.0, e, f]));
    let buffer = imageops::resize(raster, device_w as u32, device_h as u32, FilterType::Triangle);
    scope.draw_pixmap(Rect::new(0.0, 0.0, device_w, device_h), &buffer);
    true
}

/// Crossed box standing in for an image that cannot be shown.
fn draw_placeholder(bbox: Rect, p: &mut dyn Painter, ctx: &RenderContext) {
    p.set_no_brush();
    p.set_pen(Pen::from(ctx.config.default_color));
    p.draw_rect(bbox);
    p.draw_line(Line::new((0.0, 0.0), (bbox.width(), bbox.height())));
    p.draw_line(Line::new((bbox.width(), 0.0), (0.0, bbox.height())));
}

// ═══════════════════════════════════════════════════════════════════════
// Editor overlays
// ═══════════════════════════════════════════════════════════════════════

/// Selection rectangle with a fixed device-pixel outline.
pub(super) fn draw_lasso(item: &Lasso, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    let config = ctx.config;
    let scale = p.transform().as_coeffs()[0];
    let scale = if scale == 0.0 { 1.0 } else { scale };
    p.set_brush_color(config.lasso_color);
    p.set_pen(Pen::new(config.selection_color(0), LASSO_PEN_WIDTH / scale * config.gui_scaling));
    p.draw_rect(layout.bbox);
}

pub(super) fn draw_layout_break(props: &ItemProps, item: &LayoutBreak, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    if !ctx.options.shows_marks() {
        return;
    }
    let mut pen = Pen::new(mark_color(props, ctx), item.line_width / 2.0)
        .with_join(Join::Miter)
        .with_cap(Cap::Square)
        .with_dash_pattern(MARK_DASH_PATTERN.to_vec());
    p.set_pen(pen.clone());
    p.set_no_brush();
    p.draw_rect(layout.icon_border);

    pen.width = item.line_width;
    pen.style = PenStyle::Solid;
    p.set_pen(pen);
    p.draw_path(&layout.icon_path);
}

pub(super) fn draw_action_icon(item: &ActionIcon, p: &mut dyn Painter) {
    let Some(layout) = &item.layout else {
        return;
    };
    p.set_font(item.font.clone());
    p.draw_text_in_rect(layout.bbox, Align::CENTER, &item.icon.to_string());
}

// ═══════════════════════════════════════════════════════════════════════
// Pages
// ═══════════════════════════════════════════════════════════════════════

/// Headers and footers of a page. Odd/even variants apply only when the
/// style asks for them; page one shows them only when enabled for it.
pub(super) fn draw_page(props: &ItemProps, item: &Page, p: &mut dyn Painter, ctx: &RenderContext) {
    let Some(layout) = &item.layout else {
        return;
    };
    if !ctx.options.page_layout {
        return;
    }
    let style = ctx.style;
    let number = i64::from(item.no) + 1 + i64::from(item.page_number_offset);
    let odd_page = number % 2 != 0;
    p.set_pen(Pen::from(cur_color(props, ctx)));

    let rows = [
        (Sid::ShowHeader, Sid::HeaderFirstPage, Sid::HeaderOddEven, &layout.odd_header, &layout.even_header),
        (Sid::ShowFooter, Sid::FooterFirstPage, Sid::FooterOddEven, &layout.odd_footer, &layout.even_footer),
    ];
    for (show, first_page, odd_even, odd_row, even_row) in rows {
        if !style.bool(show) || (item.no == 0 && !style.bool(first_page)) {
            continue;
        }
        let row = if odd_page || !style.bool(odd_even) { odd_row } else { even_row };
        for text in row.iter().flatten() {
            draw_child(text, p, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderOptions;
    use crate::painter::{PaintOp, RecordingPainter};
    use crate::renderer::Resources;
    use crate::style::StyleValue;
    use kurbo::Point;
    use pretty_assertions::assert_eq;

    fn frame() -> FrameBox {
        FrameBox { layout: Some(BoxLayout { bbox: Rect::new(0.0, 0.0, 100.0, 50.0) }) }
    }

    #[test]
    fn frame_outline_is_inset_by_half_the_pen() {
        let res = Resources::default();
        let props = ItemProps::default();
        let mut rec = RecordingPainter::new();
        draw_box(&props, &frame(), &mut rec, &res.context());
        let half = props.spatium * BOX_LINE_WIDTH / 2.0;
        assert_eq!(rec.ops(), vec![&PaintOp::Rect(Rect::new(half, half, 100.0 - half, 50.0 - half))]);
        let pen = &rec.calls()[0].state.pen;
        assert_eq!(pen.dash_pattern, vec![1.0, 3.0]);
        assert_eq!(pen.color, res.config.formatting_marks_color);
    }

    #[test]
    fn frames_are_not_printed() {
        let mut res = Resources::default();
        res.options = RenderOptions::print();
        let props = ItemProps { selected: true, ..ItemProps::default() };
        let mut rec = RecordingPainter::new();
        draw_box(&props, &frame(), &mut rec, &res.context());
        assert_eq!(rec.call_count(), 0);
    }

    #[test]
    fn selected_frame_shows_even_without_frames() {
        let mut res = Resources::default();
        res.options.show_frames = false;
        let props = ItemProps { selected: true, ..ItemProps::default() };
        let mut rec = RecordingPainter::new();
        draw_box(&props, &frame(), &mut rec, &res.context());
        assert_eq!(rec.calls()[0].state.pen.color, res.config.selection_color(0));
    }

    #[test]
    fn undecodable_image_draws_a_crossed_box() {
        let res = Resources::default();
        let img = Image {
            data: b"not an image".to_vec(),
            layout: Some(BoxLayout { bbox: Rect::new(0.0, 0.0, 40.0, 20.0) }),
            ..Image::default()
        };
        let mut rec = RecordingPainter::new();
        draw_image(&ItemProps::default(), &img, &mut rec, &res.context());
        let ops = rec.ops();
        assert_eq!(ops.len(), 3);
        assert!(matches!(ops[0], PaintOp::Rect(_)));
        assert_eq!(rec.device_lines()[1], Line::new((40.0, 0.0), (0.0, 20.0)));
    }

    #[test]
    fn svg_image_goes_to_the_svg_primitive() {
        let res = Resources::default();
        let source = "<svg xmlns=\"http://www.w3.org/2000/svg\"/>";
        let img = Image {
            image_type: ImageType::Svg,
            data: source.as_bytes().to_vec(),
            layout: Some(BoxLayout { bbox: Rect::new(0.0, 0.0, 10.0, 10.0) }),
            ..Image::default()
        };
        let mut rec = RecordingPainter::new();
        draw_image(&ItemProps::default(), &img, &mut rec, &res.context());
        assert_eq!(rec.ops(), vec![&PaintOp::Svg(Rect::new(0.0, 0.0, 10.0, 10.0), source.len())]);
    }

    #[test]
    fn raster_image_is_resampled_to_device_size() {
        let res = Resources::default();
        let mut png = Vec::new();
        RgbaImage::new(4, 2)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let props = ItemProps::default();
        let img = Image {
            data: png,
            size: Size::new(2.0, 1.0),
            layout: Some(BoxLayout::default()),
            ..Image::default()
        };
        let mut rec = RecordingPainter::new();
        draw_image(&props, &img, &mut rec, &res.context());
        match rec.ops()[0] {
            PaintOp::Pixmap(_, w, h) => {
                assert_eq!(*w, (2.0 * props.spatium).round() as u32);
                assert_eq!(*h, props.spatium.round() as u32);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(rec.depth(), 0);
    }

    #[test]
    fn oversized_raster_is_scaled_not_resampled() {
        let res = Resources::default();
        let mut png = Vec::new();
        RgbaImage::new(4, 2)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let img = Image {
            data: png,
            size: Size::new(1.0e6, 1.0),
            layout: Some(BoxLayout::default()),
            ..Image::default()
        };
        let mut rec = RecordingPainter::new();
        draw_image(&ItemProps::default(), &img, &mut rec, &res.context());
        let call = &rec.calls()[0];
        assert!(matches!(call.op, PaintOp::Pixmap(_, 4, 2)));
        let [a, ..] = call.state.transform.as_coeffs();
        assert!(a > 1000.0);
        assert_eq!(rec.depth(), 0);
    }

    #[test]
    fn layout_break_needs_unprintables() {
        let mut res = Resources::default();
        let lb = LayoutBreak { layout: Some(LayoutBreakLayout::default()), ..LayoutBreak::default() };
        let mut rec = RecordingPainter::new();
        draw_layout_break(&ItemProps::default(), &lb, &mut rec, &res.context());
        assert_eq!(rec.ops().len(), 2);
        assert_eq!(rec.calls()[1].state.pen.style, PenStyle::Solid);

        res.options.show_unprintable = false;
        let mut rec = RecordingPainter::new();
        draw_layout_break(&ItemProps::default(), &lb, &mut rec, &res.context());
        assert_eq!(rec.call_count(), 0);
    }

    #[test]
    fn lasso_outline_keeps_device_width() {
        let res = Resources::default();
        let lasso = Lasso { layout: Some(BoxLayout::default()) };
        let mut rec = RecordingPainter::new();
        rec.scale(4.0, 4.0);
        draw_lasso(&lasso, &mut rec, &res.context());
        assert_eq!(rec.calls()[0].state.pen.width, 0.5 * res.config.gui_scaling);
    }

    fn page_with_headers() -> Page {
        // lassos always draw, which makes the chosen slot visible
        let text = |x: f64| {
            let props = ItemProps::default().at(Point::new(x, 0.0));
            Some(Box::new(Element::with_props(props, ElementData::placeholder(ElementKind::Lasso))))
        };
        Page {
            no: 1,
            page_number_offset: 0,
            layout: Some(PageLayout {
                odd_header: [text(1.0), None, None],
                even_header: [None, text(2.0), None],
                ..PageLayout::default()
            }),
        }
    }

    #[test]
    fn even_page_uses_even_header_when_enabled() {
        let mut res = Resources::default();
        res.style.set(Sid::HeaderOddEven, StyleValue::Bool(true)).unwrap();
        let mut rec = RecordingPainter::new();
        // page index 1 is page number 2
        draw_page(&ItemProps::default(), &page_with_headers(), &mut rec, &res.context());
        assert_eq!(rec.depth(), 0);
        assert_eq!(rec.state().transform, Affine::IDENTITY);
        assert_eq!(rec.calls()[0].state.transform, Affine::translate((2.0, 0.0)));

        res.style.set(Sid::HeaderOddEven, StyleValue::Bool(false)).unwrap();
        let mut other = RecordingPainter::new();
        draw_page(&ItemProps::default(), &page_with_headers(), &mut other, &res.context());
        assert_eq!(other.calls()[0].state.transform, Affine::translate((1.0, 0.0)));
    }

    #[test]
    fn pages_draw_nothing_outside_page_layout() {
        let mut res = Resources::default();
        res.options.page_layout = false;
        let mut rec = RecordingPainter::new();
        draw_page(&ItemProps::default(), &page_with_headers(), &mut rec, &res.context());
        assert_eq!(rec.call_count(), 0);
    }
}
