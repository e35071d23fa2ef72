//! Frames, pages, images and editor-only marks.

use kurbo::{BezPath, Rect, Size};
use serde::{Deserialize, Serialize};

use super::{BoxLayout, Element};
use crate::painter::Font;
use crate::style::base_spatium;

/// Horizontal, vertical, fretboard and text frames.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameBox {
    pub layout: Option<BoxLayout>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageType {
    Svg,
    #[default]
    Raster,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub image_type: ImageType,
    /// Encoded file contents (PNG, JPEG or SVG text).
    pub data: Vec<u8>,
    /// Display size, in staff spaces or millimetres.
    pub size: Size,
    pub size_is_spatium: bool,
    pub layout: Option<BoxLayout>,
}

impl Default for Image {
    fn default() -> Self {
        Self {
            image_type: ImageType::Raster,
            data: Vec::new(),
            size: Size::new(10.0, 10.0),
            size_is_spatium: true,
            layout: None,
        }
    }
}

/// Rubber-band selection rectangle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lasso {
    pub layout: Option<BoxLayout>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutBreakLayout {
    pub icon_border: Rect,
    pub icon_path: BezPath,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutBreak {
    pub line_width: f64,
    pub layout: Option<LayoutBreakLayout>,
}

impl Default for LayoutBreak {
    fn default() -> Self {
        Self { line_width: 0.1 * base_spatium(), layout: None }
    }
}

/// Toolbar-style icon drawn from an icon font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionIcon {
    pub icon: char,
    pub font: Font,
    pub layout: Option<BoxLayout>,
}

impl Default for ActionIcon {
    fn default() -> Self {
        Self { icon: '\u{EF50}', font: Font::new("MusescoreIcon", 16.0), layout: None }
    }
}

/// Header or footer text of one parity, indexed left, centre, right.
pub type HeaderFooterRow = [Option<Box<Element>>; 3];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub odd_header: HeaderFooterRow,
    pub even_header: HeaderFooterRow,
    pub odd_footer: HeaderFooterRow,
    pub even_footer: HeaderFooterRow,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    /// Zero-based page index.
    pub no: u32,
    pub page_number_offset: i32,
    pub layout: Option<PageLayout>,
}
