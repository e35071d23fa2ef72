//! Spanner segments: text lines, hairpins, glissandi, slurs and ties,
//! wiggle lines, lyric extenders and guitar bends.

use kurbo::Point;
use peniko::Color;
use serde::{Deserialize, Serialize};

use super::{ItemProps, TextBase};
use crate::painter::Font;
use crate::style::base_spatium;
use crate::symbols::SymId;

// ═══════════════════════════════════════════════════════════════════════
// Text lines
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HookType {
    #[default]
    None,
    Hook90,
    Hook45,
    /// Hook crossing the line, always drawn solid.
    Hook90T,
}

/// Which part of a spanner a segment draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SegmentType {
    #[default]
    Single,
    Begin,
    Middle,
    End,
}

impl SegmentType {
    pub fn is_single_begin(self) -> bool {
        matches!(self, SegmentType::Single | SegmentType::Begin)
    }

    pub fn is_single_end(self) -> bool {
        matches!(self, SegmentType::Single | SegmentType::End)
    }
}

/// Begin or end text of a line, positioned relative to the segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    #[serde(default)]
    pub props: ItemProps,
    pub text: TextBase,
}

/// Settings every text-line-based spanner shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextLineSettings {
    pub begin_text: Option<Caption>,
    pub end_text: Option<Caption>,
    pub line_visible: bool,
    pub line_style: LineStyle,
    /// Dash length in line widths.
    pub dash_line_len: f64,
    /// Gap length in line widths.
    pub dash_gap_len: f64,
    pub line_width: f64,
    pub line_color: Color,
    pub begin_hook: HookType,
    pub end_hook: HookType,
    pub segment_type: SegmentType,
}

impl Default for TextLineSettings {
    fn default() -> Self {
        Self {
            begin_text: None,
            end_text: None,
            line_visible: true,
            line_style: LineStyle::Solid,
            dash_line_len: 5.0,
            dash_gap_len: 5.0,
            line_width: 0.15 * base_spatium(),
            line_color: Color::BLACK,
            begin_hook: HookType::None,
            end_hook: HookType::None,
            segment_type: SegmentType::Single,
        }
    }
}

/// Computed geometry of a line segment.
///
/// With hooks the polyline starts with the begin hook's two points and ends
/// with the end hook's two points, the end hook listed tip last.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineSegmentLayout {
    pub points: Vec<Point>,
    /// Length of the main line, excluding hooks.
    pub line_length: f64,
    /// Hairpin: `points` holds two independent lines.
    pub two_lines: bool,
    /// Hairpin drawn as one connected polyline when solid.
    pub joined_hairpin: Vec<Point>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    #[serde(default)]
    pub settings: TextLineSettings,
    pub layout: Option<LineSegmentLayout>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CircledTip {
    pub center: Point,
    pub radius: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HairpinLayout {
    pub line: LineSegmentLayout,
    pub circled_tip: Option<CircledTip>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HairpinSegment {
    pub settings: TextLineSettings,
    /// Staff magnification at the hairpin's tick.
    pub staff_mag: f64,
    pub layout: Option<HairpinLayout>,
}

impl Default for HairpinSegment {
    fn default() -> Self {
        Self { settings: TextLineSettings::default(), staff_mag: 1.0, layout: None }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Glissando
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GlissandoType {
    #[default]
    Straight,
    Wavy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GlissandoLayout {
    /// End point relative to the segment origin.
    pub pos2: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlissandoSegment {
    pub glissando_type: GlissandoType,
    pub line_color: Color,
    pub line_width: f64,
    pub show_text: bool,
    pub text: String,
    /// Caption font; the size is in points at the reference spatium.
    pub font: Font,
    pub layout: Option<GlissandoLayout>,
}

impl Default for GlissandoSegment {
    fn default() -> Self {
        Self {
            glissando_type: GlissandoType::Straight,
            line_color: Color::BLACK,
            line_width: 0.15 * base_spatium(),
            show_text: true,
            text: "gliss.".to_string(),
            font: Font::new("FreeSerif", 8.0),
            layout: None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Slurs and ties
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SlurStyle {
    Undefined,
    #[default]
    Solid,
    Dotted,
    Dashed,
    WideDashed,
}

/// Shared by slur and tie segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlurTieSegment {
    pub style: SlurStyle,
    pub staff_mag: f64,
    /// Tie ends on the second chord of a cross-measure value.
    pub ends_cross_measure: bool,
    pub layout: Option<super::PathLayout>,
}

impl Default for SlurTieSegment {
    fn default() -> Self {
        Self { style: SlurStyle::Solid, staff_mag: 1.0, ends_cross_measure: false, layout: None }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Wiggle lines
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolRun {
    pub syms: Vec<SymId>,
}

/// Trill and vibrato segments: a glyph run computed at layout time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WiggleSegment {
    pub layout: Option<SymbolRun>,
}

// ═══════════════════════════════════════════════════════════════════════
// Lyrics lines
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LyricsLineLayout {
    pub pos2: Point,
    pub num_dashes: u32,
    pub dash_length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LyricsLineSegment {
    /// Melisma extender instead of hyphen dashes.
    pub end_melisma: bool,
    pub line_width: f64,
    pub layout: Option<LyricsLineLayout>,
}

impl Default for LyricsLineSegment {
    fn default() -> Self {
        Self { end_melisma: false, line_width: 0.1 * base_spatium(), layout: None }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Bends
// ═══════════════════════════════════════════════════════════════════════

/// One point of a bend curve; `pitch` is in hundredths of a semitone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PitchValue {
    pub time: i32,
    pub pitch: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BendLayout {
    pub note_width: f64,
    pub note_pos: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bend {
    pub points: Vec<PitchValue>,
    pub line_width: f64,
    pub font: Font,
    pub layout: Option<BendLayout>,
}

impl Default for Bend {
    fn default() -> Self {
        Self {
            points: vec![
                PitchValue { time: 0, pitch: 0 },
                PitchValue { time: 15, pitch: 100 },
                PitchValue { time: 60, pitch: 100 },
            ],
            line_width: 0.15 * base_spatium(),
            font: Font::new("Edwin", 8.0),
            layout: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BendSegmentType {
    #[default]
    None,
    LineUp,
    CurveUp,
    CurveDown,
    LineStroked,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BendSegment {
    pub src: Point,
    pub dest: Point,
    /// Bend amount in quarter tones.
    pub tone: i32,
    pub visible: bool,
    pub segment_type: BendSegmentType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StretchedBendLayout {
    pub segments: Vec<BendSegment>,
    pub arrow_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StretchedBend {
    pub line_width: f64,
    pub font: Font,
    pub layout: Option<StretchedBendLayout>,
}

impl Default for StretchedBend {
    fn default() -> Self {
        Self { line_width: 0.15 * base_spatium(), font: Font::new("Edwin", 8.0), layout: None }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolylineLayout {
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TremoloBar {
    pub line_width: f64,
    pub layout: Option<PolylineLayout>,
}

impl Default for TremoloBar {
    fn default() -> Self {
        Self { line_width: 0.1 * base_spatium(), layout: None }
    }
}
