//! scoredraw: draw pass for engraved music notation elements.
//!
//! Layout happens upstream; this crate takes an element snapshot (kind,
//! common properties and pre-computed geometry) and issues drawing
//! primitives against an abstract [`Painter`]. A recording painter for
//! tests and an SVG painter for export are included.
//!
//! # Example
//! ```no_run
//! use scoredraw::{draw_item, Element, ElementKind, RecordingPainter, Resources};
//!
//! let resources = Resources::default();
//! let clef = Element::placeholder(ElementKind::Clef);
//! let mut painter = RecordingPainter::new();
//! draw_item(&clef, &mut painter, &resources.context());
//! println!("{} primitives", painter.calls().len());
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod painter;
pub mod renderer;
pub mod style;
pub mod symbols;

use kurbo::Size;

pub use config::{EngravingConfig, RenderOptions};
pub use error::ConfigError;
pub use model::{Element, ElementData, ElementKind, Family, ItemProps};
pub use painter::{Painter, RecordingPainter, Scoped, SvgPainter};
pub use renderer::{cur_color, draw_item, render_to_svg, RenderContext, Resources};
pub use style::{Sid, Style, StyleValue};
pub use symbols::{SymId, SymbolFont, TableFont, TextMetrics};

/// Parse a JSON array of page-positioned elements and render it to SVG
/// with the built-in style, glyph table and colours.
pub fn render_json_to_svg(json: &str, size: Size) -> Result<String, ConfigError> {
    let elements: Vec<Element> = serde_json::from_str(json)?;
    let resources = Resources::default();
    Ok(render_to_svg(&elements, size, &resources.context()))
}

/// Serialize element snapshots as pretty-printed JSON fixtures.
pub fn elements_to_json(elements: &[Element]) -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(elements)?)
}
