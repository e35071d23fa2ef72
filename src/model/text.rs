//! Text-like elements: framed text blocks, chord symbols, figured bass
//! and free-standing symbols.

use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};

use super::BoxLayout;
use crate::painter::Font;
use crate::symbols::SymId;

// ═══════════════════════════════════════════════════════════════════════
// Text base
// ═══════════════════════════════════════════════════════════════════════

/// Frame drawn behind a text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFrame {
    /// Outline width in staff spaces; zero draws no outline.
    pub width: f64,
    pub color: Color,
    /// Fill; a fully transparent colour leaves the frame unfilled.
    pub bg_color: Color,
    pub circle: bool,
    /// Corner roundness (percent of the half extents, before scaling).
    pub round: i32,
}

impl Default for TextFrame {
    fn default() -> Self {
        Self {
            width: 0.1,
            color: Color::BLACK,
            bg_color: Color::TRANSPARENT,
            circle: false,
            round: 0,
        }
    }
}

/// One run of text with a single font.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    pub text: String,
    /// Baseline origin relative to the element.
    pub pos: Point,
    /// Font already scaled for the element's size.
    pub font: Font,
}

/// One laid-out line of text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub fragments: Vec<TextFragment>,
}

impl TextBlock {
    pub fn is_empty(&self) -> bool {
        self.fragments.iter().all(|f| f.text.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextLayout {
    pub bbox: Rect,
    /// Frame rectangle, already padded around the text.
    pub frame: Rect,
    pub blocks: Vec<TextBlock>,
}

impl TextLayout {
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(TextBlock::is_empty)
    }
}

/// Shared payload of every plain text kind (dynamics, tempo text, lyrics,
/// fingering, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBase {
    pub frame: Option<TextFrame>,
    /// Frame sizes follow the staff spatium rather than the base spatium.
    pub size_is_spatium_dependent: bool,
    pub layout: Option<TextLayout>,
}

impl Default for TextBase {
    fn default() -> Self {
        Self { frame: None, size_is_spatium_dependent: true, layout: None }
    }
}

impl TextBase {
    /// Single-fragment text at the origin.
    pub fn plain(text: &str, font: Font) -> Self {
        let block = TextBlock {
            fragments: vec![TextFragment { text: text.to_string(), pos: Point::ORIGIN, font }],
        };
        Self {
            layout: Some(TextLayout { blocks: vec![block], ..TextLayout::default() }),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.layout.as_ref().map_or(true, TextLayout::is_empty)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Harmony
// ═══════════════════════════════════════════════════════════════════════

/// Rendered piece of a chord symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextSegment {
    pub text: String,
    pub pos: Point,
    /// Unscaled font; the pixel ratio is applied at draw time.
    pub font: Font,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HarmonyLayout {
    /// Used while editing or before the chord was rendered to segments.
    pub text: TextLayout,
    pub segments: Vec<TextSegment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Harmony {
    pub frame: Option<TextFrame>,
    pub size_is_spatium_dependent: bool,
    /// Being edited: draw the raw text instead of the rendered chord.
    pub edit_mode: bool,
    pub layout: Option<HarmonyLayout>,
}

// ═══════════════════════════════════════════════════════════════════════
// Figured bass
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum ContLine {
    #[default]
    None,
    Simple,
    /// Joins with the continuation line of the next figured bass.
    Extended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FbParenthesis {
    #[default]
    None,
    RoundOpen,
    RoundClosed,
    SquaredOpen,
    SquaredClosed,
}

impl FbParenthesis {
    pub fn glyph(self) -> Option<char> {
        match self {
            FbParenthesis::None => None,
            FbParenthesis::RoundOpen => Some('('),
            FbParenthesis::RoundClosed => Some(')'),
            FbParenthesis::SquaredOpen => Some('['),
            FbParenthesis::SquaredClosed => Some(']'),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FiguredBassItemLayout {
    pub bbox: Rect,
    /// Offset of the item inside its figured bass.
    pub pos: Point,
    pub display_text: String,
    pub text_width: f64,
}

/// One figure line of a figured bass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FiguredBassItem {
    pub cont_line: ContLine,
    /// Parenthesis closing the continuation line.
    pub closing_parenthesis: FbParenthesis,
    /// Item origin in page coordinates.
    pub page_pos: Point,
    pub layout: FiguredBassItemLayout,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FiguredBassLayout {
    /// Fallback text when the figures could not be parsed into items.
    pub text: TextLayout,
    /// Duration line lengths, one per covered segment.
    pub line_lengths: Vec<f64>,
    pub printed_line_length: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FiguredBass {
    pub frame: Option<TextFrame>,
    pub size_is_spatium_dependent: bool,
    pub items: Vec<FiguredBassItem>,
    /// Page x of the continuation line of the next contiguous figured
    /// bass; `Some` with a value `<= 0` when it has none. `None` when no
    /// figured bass follows.
    pub next_cont_line_x: Option<f64>,
    pub layout: Option<FiguredBassLayout>,
}

// ═══════════════════════════════════════════════════════════════════════
// Symbols
// ═══════════════════════════════════════════════════════════════════════

/// Free symbol; also the payload of noteheads and system dividers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub sym: SymId,
    /// The symbol stands in for an augmentation dot.
    pub is_note_dot: bool,
    pub on_tab_staff: bool,
    pub layout: Option<BoxLayout>,
}

/// Character from a text font placed as a symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FSymbol {
    pub code: char,
    pub font: Font,
    pub layout: Option<BoxLayout>,
}
