//! Staff furniture: barlines, brackets, clefs, signatures, staff lines,
//! measure repeats and multi-measure rests.

use kurbo::{BezPath, Line, Point, Vec2};
use serde::{Deserialize, Serialize};

use super::{BoxLayout, PathLayout, StaffContext};
use crate::style::base_spatium;
use crate::symbols::SymId;

// ═══════════════════════════════════════════════════════════════════════
// Barlines
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BarLineType {
    #[default]
    Normal,
    Broken,
    Dotted,
    End,
    Double,
    ReverseEnd,
    Heavy,
    DoubleHeavy,
    StartRepeat,
    EndRepeat,
    EndStartRepeat,
}

/// Measure length compared with its time signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrregularMeasure {
    TooLong,
    TooShort,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BarLineLayout {
    pub y1: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarLine {
    pub bar_line_type: BarLineType,
    /// Staff the barline spans from; `None` in a palette.
    pub staff: Option<StaffContext>,
    /// Topmost barline of a system (gets the upper repeat tip).
    pub is_top: bool,
    pub is_bottom: bool,
    /// Set on the end barline of an irregular, non multi-measure-rest measure.
    pub irregular: Option<IrregularMeasure>,
    pub layout: Option<BarLineLayout>,
}

impl Default for BarLine {
    fn default() -> Self {
        Self {
            bar_line_type: BarLineType::Normal,
            staff: None,
            is_top: true,
            is_bottom: true,
            irregular: None,
            layout: None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Brackets
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BracketType {
    #[default]
    Normal,
    Brace,
    Square,
    Line,
    NoBracket,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BracketLayout {
    pub height: f64,
    pub width: f64,
    /// Brace glyph; `NoSym` draws `path` instead.
    pub brace_sym: SymId,
    pub path: BezPath,
}

impl Default for BracketLayout {
    fn default() -> Self {
        Self { height: 4.0 * base_spatium(), width: 0.45 * base_spatium(), brace_sym: SymId::Brace, path: BezPath::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bracket {
    pub bracket_type: BracketType,
    /// Horizontal magnification of the brace glyph.
    pub magx: f64,
    pub layout: Option<BracketLayout>,
}

impl Default for Bracket {
    fn default() -> Self {
        Self { bracket_type: BracketType::Normal, magx: 1.0, layout: None }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Clefs and signatures
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClefLayout {
    pub sym: SymId,
}

impl Default for ClefLayout {
    fn default() -> Self {
        Self { sym: SymId::GClef }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Clef {
    pub staff: Option<StaffContext>,
    pub layout: Option<ClefLayout>,
}

/// One key signature accidental.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeySym {
    pub sym: SymId,
    /// Horizontal offset in staff spaces.
    pub x_pos: f64,
    /// Staff line in half spaces from the top line.
    pub line: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeySigLayout {
    pub syms: Vec<KeySym>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeySig {
    pub staff: Option<StaffContext>,
    pub layout: Option<KeySigLayout>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSigLayout {
    pub numerator: Vec<SymId>,
    pub denominator: Vec<SymId>,
    /// Origins of the numerator and denominator runs.
    pub pz: Point,
    pub pn: Point,
    pub left_paren: Point,
    pub right_paren: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSig {
    pub staff: Option<StaffContext>,
    /// Horizontal and vertical glyph scale.
    pub scale: Vec2,
    pub large_parentheses: bool,
    pub layout: Option<TimeSigLayout>,
}

impl Default for TimeSig {
    fn default() -> Self {
        Self { staff: None, scale: Vec2::new(1.0, 1.0), large_parentheses: false, layout: None }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Staff lines and staff marks
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffLinesLayout {
    pub lines: Vec<Line>,
    pub line_width: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffLines {
    pub layout: Option<StaffLinesLayout>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffStateLayout {
    pub path: BezPath,
    pub line_width: f64,
}

/// Instrument change or visibility marker in the score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffState {
    pub layout: Option<StaffStateLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffTypeChange {
    pub line_width: f64,
    /// Staff type the change switches to.
    pub staff_type: Option<StaffContext>,
    pub layout: Option<BoxLayout>,
}

impl Default for StaffTypeChange {
    fn default() -> Self {
        Self { line_width: 0.1 * base_spatium(), staff_type: None, layout: None }
    }
}

/// Vertical spacer; its outline comes from layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spacer {
    pub layout: Option<PathLayout>,
}

// ═══════════════════════════════════════════════════════════════════════
// Measure repeats and multi-measure rests
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureRepeatLayout {
    pub sym: SymId,
    pub number_syms: Vec<SymId>,
    pub number_pos: Point,
}

impl Default for MeasureRepeatLayout {
    fn default() -> Self {
        Self { sym: SymId::Repeat1Bar, number_syms: Vec::new(), number_pos: Point::ORIGIN }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureRepeat {
    pub num_measures: u32,
    pub measure_width: f64,
    pub layout: Option<MeasureRepeatLayout>,
}

impl Default for MeasureRepeat {
    fn default() -> Self {
        Self { num_measures: 1, measure_width: 20.0 * base_spatium(), layout: None }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MMRestLayout {
    /// Number of measures the rest stands for.
    pub number: i32,
    /// Number glyphs; empty falls back to time signature digits.
    pub number_syms: Vec<SymId>,
    pub number_pos: Point,
    /// Old-style rest glyphs and their combined width.
    pub rest_syms: Vec<SymId>,
    pub syms_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MMRest {
    pub suppressed: bool,
    pub number_visible: bool,
    pub width: f64,
    pub staff_mag: f64,
    pub layout: Option<MMRestLayout>,
}

impl Default for MMRest {
    fn default() -> Self {
        Self { suppressed: false, number_visible: true, width: 20.0 * base_spatium(), staff_mag: 1.0, layout: None }
    }
}
