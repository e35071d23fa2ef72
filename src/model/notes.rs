//! Notes, rests and the marks that hang off chords.

use kurbo::{BezPath, Line, Point, Rect};
use serde::{Deserialize, Serialize};

use super::{BoxLayout, CrossMeasure, Element, PathLayout, PlacedSym, StaffContext};
use crate::painter::Font;
use crate::symbols::SymId;

// ═══════════════════════════════════════════════════════════════════════
// Chord marks
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccidentalLayout {
    pub syms: Vec<PlacedSym>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Accidental {
    pub layout: Option<AccidentalLayout>,
}

/// Breath marks and fermatas: one glyph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolMark {
    pub sym: SymId,
    pub layout: Option<BoxLayout>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArticulationText {
    #[default]
    None,
    Tap,
    Slap,
    Pop,
}

impl ArticulationText {
    pub fn label(self) -> &'static str {
        match self {
            ArticulationText::None => "",
            ArticulationText::Tap => "T",
            ArticulationText::Slap => "S",
            ArticulationText::Pop => "P",
        }
    }
}

/// Articulations and ornaments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Articulation {
    pub sym: SymId,
    pub text_type: ArticulationText,
    pub font: Font,
    pub layout: Option<BoxLayout>,
}

impl Default for Articulation {
    fn default() -> Self {
        Self {
            sym: SymId::ArticAccentAbove,
            text_type: ArticulationText::None,
            font: Font::new("FreeSans", 9.0),
            layout: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArpeggioType {
    #[default]
    Normal,
    Up,
    Down,
    Bracket,
    UpStraight,
    DownStraight,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArpeggioLayout {
    pub bbox: Rect,
    /// Wiggle run, laid out horizontally before rotation.
    pub syms: Vec<SymId>,
    pub syms_bbox: Rect,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arpeggio {
    pub arpeggio_type: ArpeggioType,
    pub layout: Option<ArpeggioLayout>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChordLineType {
    #[default]
    Fall,
    Doit,
    Plop,
    Scoop,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChordLine {
    pub chord_line_type: ChordLineType,
    pub wavy: bool,
    pub layout: Option<PathLayout>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeadSlappedLayout {
    pub path1: BezPath,
    pub path2: BezPath,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeadSlapped {
    pub layout: Option<DeadSlappedLayout>,
}

/// Flag on a stem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hook {
    pub sym: SymId,
    pub cross_measure: CrossMeasure,
    pub layout: Option<BoxLayout>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerLineLayout {
    pub line_width: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerLine {
    pub vertical: bool,
    pub len: f64,
    pub cross_measure: CrossMeasure,
    pub layout: Option<LedgerLineLayout>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StemLayout {
    pub line: Line,
}

impl Default for StemLayout {
    fn default() -> Self {
        Self { line: Line::new(Point::ORIGIN, (0.0, -3.5 * crate::style::base_spatium())) }
    }
}

/// Tablature details of a stem beside the staff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabStem {
    /// Half note drawn with the slashed-minim style.
    pub slashed_minim: bool,
    pub dots: u32,
    pub dot_pos_x: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stem {
    pub cross_measure: CrossMeasure,
    /// Stroke width, already magnified.
    pub line_width: f64,
    pub up: bool,
    pub length: f64,
    pub staff: Option<StaffContext>,
    pub tab: TabStem,
    pub layout: Option<StemLayout>,
}

impl Default for Stem {
    fn default() -> Self {
        let sp = crate::style::base_spatium();
        Self {
            cross_measure: CrossMeasure::None,
            line_width: 0.1 * sp,
            up: true,
            length: 3.5 * sp,
            staff: None,
            tab: TabStem::default(),
            layout: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StemSlashLayout {
    pub line: Line,
    pub stem_width: f64,
}

impl Default for StemSlashLayout {
    fn default() -> Self {
        let sp = crate::style::base_spatium();
        Self { line: Line::new((-0.5 * sp, 0.5 * sp), (0.5 * sp, -0.5 * sp)), stem_width: 0.1 * sp }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StemSlash {
    pub layout: Option<StemSlashLayout>,
}

// ═══════════════════════════════════════════════════════════════════════
// Notes
// ═══════════════════════════════════════════════════════════════════════

/// Usable pitch range of the instrument, in MIDI pitches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchRange {
    pub pitch: i32,
    pub min_professional: i32,
    pub max_professional: i32,
    pub min_amateur: i32,
    pub max_amateur: i32,
}

/// Fret mark of a note on a tablature staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabFret {
    pub text: String,
    pub hidden: bool,
    /// Tied from a note in the same system and the staff hides back ties.
    pub hidden_by_tie: bool,
    pub fret_conflict: bool,
    pub negative_fret: bool,
    /// Ghost note whose parenthesis is drawn separately.
    pub ghost_paren_offset: bool,
    pub font: Font,
    /// Fret mask top and height in staff spaces.
    pub mask_y: f64,
    pub mask_h: f64,
    pub font_y_offset: f64,
}

impl Default for TabFret {
    fn default() -> Self {
        Self {
            text: "0".to_string(),
            hidden: false,
            hidden_by_tie: false,
            fret_conflict: false,
            negative_fret: false,
            ghost_paren_offset: false,
            font: Font::new("FreeSerif", 9.0),
            mask_y: -0.75,
            mask_h: 1.5,
            font_y_offset: 0.35,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteLayout {
    pub bbox: Rect,
    pub notehead: SymId,
    /// Blank glyph drawn underneath to mask staff and ledger lines.
    pub blank: SymId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Note {
    pub hidden: bool,
    pub cross_measure: CrossMeasure,
    pub staff: Option<StaffContext>,
    pub tab: Option<TabFret>,
    pub range: Option<PitchRange>,
    /// Not playable with the pedal setting of the preceding harp diagram.
    pub harp_unplayable: bool,
    pub layout: Option<NoteLayout>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteDot {
    /// Attached to a rest rather than a note.
    pub on_rest: bool,
    pub dots_hidden: bool,
    pub gap_rest: bool,
    pub staff: Option<StaffContext>,
    pub layout: Option<BoxLayout>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RestLayout {
    pub sym: SymId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rest {
    /// Gap rests and rests hidden by the staff type are not drawn.
    pub suppressed: bool,
    pub layout: Option<RestLayout>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShadowNoteLayout {
    pub page_pos: Point,
}

/// Note-input preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowNote {
    pub valid: bool,
    pub accidental: SymId,
    pub notehead: SymId,
    pub is_rest: bool,
    pub dots: u32,
    /// Rest dot line in half spaces.
    pub rest_dot_line: i32,
    /// Staff line of the note in half spaces; far off values mean "no line".
    pub line_index: i32,
    pub up: bool,
    pub has_stem: bool,
    pub flag: SymId,
    pub staff: StaffContext,
    pub articulations: Vec<PlacedSym>,
    pub layout: Option<ShadowNoteLayout>,
}

impl Default for ShadowNote {
    fn default() -> Self {
        Self {
            valid: true,
            accidental: SymId::NoSym,
            notehead: SymId::NoteheadBlack,
            is_rest: false,
            dots: 0,
            rest_dot_line: -1,
            line_index: 4,
            up: true,
            has_stem: true,
            flag: SymId::NoSym,
            staff: StaffContext::default(),
            articulations: Vec::new(),
            layout: None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Beams and tremolos
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamLayout {
    pub segments: Vec<Line>,
    pub beam_width: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Beam {
    pub layout: Option<BeamLayout>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TremoloType {
    #[default]
    SingleNote,
    TwoNote,
    BuzzRoll,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TremoloLayout {
    /// Strokes of a single-note tremolo.
    pub path: BezPath,
    pub beam: BeamLayout,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tremolo {
    pub tremolo_type: TremoloType,
    pub layout: Option<TremoloLayout>,
}

// ═══════════════════════════════════════════════════════════════════════
// Tablature duration marks
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TabBeamGrid {
    #[default]
    None,
    Initial,
    MedialFinal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabDurationLayout {
    pub bbox: Rect,
    pub beam_grid: TabBeamGrid,
    /// Distance back to the previous stem.
    pub beam_length: f64,
    pub beam_level: i32,
}

/// Duration font and grid metrics of the tablature staff type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabDurationStyle {
    pub font: Font,
    /// Widths in staff spaces.
    pub grid_stem_width: f64,
    pub grid_beam_width: f64,
}

impl Default for TabDurationStyle {
    fn default() -> Self {
        Self { font: Font::new("MuseScoreTab", 15.0), grid_stem_width: 0.08, grid_beam_width: 0.3 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabDurationSymbol {
    pub tab: Option<TabDurationStyle>,
    pub text: String,
    /// Repeated symbol the staff type shows once per system.
    pub repeat_suppressed: bool,
    pub layout: Option<TabDurationLayout>,
}

// ═══════════════════════════════════════════════════════════════════════
// Bagpipe embellishments
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraceNoteLayout {
    pub head_pos: Point,
    pub stem: Line,
    pub flag_pos: Point,
    /// Ledger line for high A.
    pub ledger_line: Option<Line>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BagpipeBeam {
    pub x1: f64,
    pub x2: f64,
    pub y: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BagpipeLayout {
    pub head_sym: SymId,
    pub flag_sym: SymId,
    pub draw_flag: bool,
    pub stem_width: f64,
    pub notes: Vec<GraceNoteLayout>,
    pub beam: Option<BagpipeBeam>,
    pub spatium: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BagpipeEmbellishment {
    pub layout: Option<BagpipeLayout>,
}

// ═══════════════════════════════════════════════════════════════════════
// Ambitus and tuplets
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbitusLayout {
    pub top_pos: Point,
    pub bottom_pos: Point,
    /// Connecting line, absent when disabled.
    pub line: Option<Line>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ambitus {
    pub note_head: SymId,
    /// Connecting line width in staff spaces.
    pub line_width: f64,
    pub staff: Option<StaffContext>,
    pub layout: Option<AmbitusLayout>,
}

impl Default for Ambitus {
    fn default() -> Self {
        Self { note_head: SymId::NoteheadBlack, line_width: 0.12, staff: None, layout: None }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TupletLayout {
    /// Full bracket when there is no number, else the left half.
    pub bracket_l: [Point; 4],
    pub bracket_r: [Point; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuplet {
    pub staff: Option<StaffContext>,
    /// Number text, drawn through the dispatcher at its own position.
    pub number: Option<Box<Element>>,
    pub has_bracket: bool,
    /// Bracket line width in staff spaces.
    pub bracket_width: f64,
    pub layout: Option<TupletLayout>,
}

impl Default for Tuplet {
    fn default() -> Self {
        Self { staff: None, number: None, has_bracket: true, bracket_width: 0.1, layout: None }
    }
}
