//! SVG export and JSON configuration surface.

use kurbo::{Point, Rect, Size};
use peniko::Color;
use pretty_assertions::assert_eq;
use scoredraw::model::*;
use scoredraw::{
    elements_to_json, render_json_to_svg, render_to_svg, ConfigError, EngravingConfig, RenderOptions, Resources, Sid,
    Style, StyleValue,
};

fn staff_page() -> Vec<Element> {
    let staff = ItemProps::default().at(Point::new(20.0, 40.0));
    let lines = StaffLines {
        layout: Some(StaffLinesLayout {
            lines: (0..5).map(|i| kurbo::Line::new((0.0, f64::from(i) * 10.0), (300.0, f64::from(i) * 10.0))).collect(),
            line_width: 1.5,
        }),
    };
    vec![
        Element::with_props(staff.clone(), ElementData::StaffLines(lines)),
        Element::with_props(staff, ElementData::placeholder(ElementKind::Clef)),
    ]
}

#[test]
fn svg_document_is_well_formed() {
    let res = Resources::default();
    let svg = render_to_svg(&staff_page(), Size::new(400.0, 200.0), &res.context());
    assert!(svg.starts_with("<svg"), "output should be SVG");
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains(r#"viewBox="0 0 400 200""#));
    assert!(svg.contains("<text"), "clef glyph should be emitted as text");
    assert_eq!(svg.matches("<line").count(), 5);
}

#[test]
fn every_placeholder_renders_to_svg() {
    let res = Resources::default();
    let elements: Vec<Element> = ElementKind::ALL.iter().map(|k| Element::placeholder(*k)).collect();
    let svg = render_to_svg(&elements, Size::new(100.0, 100.0), &res.context());
    assert!(svg.ends_with("</svg>\n"));
}

#[test]
fn element_json_fixture_round_trips_through_svg() {
    let json = elements_to_json(&staff_page()).unwrap();
    let back: Vec<Element> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, staff_page());

    let svg = render_json_to_svg(&json, Size::new(400.0, 200.0)).unwrap();
    let res = Resources::default();
    assert_eq!(svg, render_to_svg(&staff_page(), Size::new(400.0, 200.0), &res.context()));
}

#[test]
fn malformed_element_json_is_an_error() {
    let err = render_json_to_svg(r#"[{"kind": "NoSuchKind", "data": {}}]"#, Size::ZERO).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn undecodable_image_exports_its_placeholder() {
    let res = Resources::default();
    let image = Image {
        data: vec![0, 1, 2, 3],
        layout: Some(BoxLayout { bbox: Rect::new(0.0, 0.0, 30.0, 30.0) }),
        ..Image::default()
    };
    let svg = render_to_svg(&[Element::new(ElementData::Image(image))], Size::new(50.0, 50.0), &res.context());
    assert_eq!(svg.matches("<line").count(), 2);
    assert!(svg.contains("<rect"));
}

#[test]
fn style_sheet_overrides_defaults() {
    let style = Style::from_json(r#"{"spatium": 20.0, "repeatBarTips": true, "musicalSymbolFont": "Bravura"}"#).unwrap();
    assert_eq!(style.spatium(), 20.0);
    assert!(style.bool(Sid::RepeatBarTips));
    assert_eq!(style.string(Sid::MusicalSymbolFont), "Bravura");
    assert_eq!(style.value(Sid::EndBarWidth), StyleValue::Spatium(0.55));
}

#[test]
fn style_type_errors_name_the_key() {
    let err = Style::from_json(r#"{"endBarWidth": "wide"}"#).unwrap_err();
    assert_eq!(err.to_string(), "style value for `EndBarWidth` must be a length in staff spaces");
}

#[test]
fn engraving_config_and_options_from_json() {
    let cfg = EngravingConfig::from_json(
        r##"{"selectionColors": ["#ff0000", "#00ff00", "#0000ff", "#ffffff"], "guiScaling": 2.0}"##,
    )
    .unwrap();
    assert_eq!(cfg.selection_color(0), Color::from_rgb8(0xff, 0, 0));
    assert_eq!(cfg.selection_color(5), Color::from_rgb8(0, 0xff, 0));
    assert_eq!(cfg.gui_scaling, 2.0);

    assert!(matches!(
        EngravingConfig::from_json(r##"{"lassoColor": "blue"}"##),
        Err(ConfigError::Color(_))
    ));

    let opts = RenderOptions::from_json(r#"{"printing": true, "svg_printing": true}"#).unwrap();
    assert!(opts.svg_printing);
}
