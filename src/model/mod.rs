//! Element model: the immutable snapshot a paint pass consumes.
//!
//! Every drawable object is an [`Element`]: common item properties plus an
//! [`ElementData`] payload with exactly one variant per [`ElementKind`].
//! Payloads hold the element's own settings and an optional layout
//! snapshot computed upstream; `layout: None` models an element that was
//! never laid out.
//!
//! All structures derive `Serialize`/`Deserialize` so snapshots can be
//! stored as JSON fixtures.

mod frames;
mod fret;
mod lines;
mod notes;
mod staff;
mod text;

pub use frames::*;
pub use fret::*;
pub use lines::*;
pub use notes::*;
pub use staff::*;
pub use text::*;

use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};

use crate::style::{base_spatium, SPATIUM20};

// ═══════════════════════════════════════════════════════════════════════
// Item properties
// ═══════════════════════════════════════════════════════════════════════

/// Properties every element carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemProps {
    /// Colour the element is drawn with when nothing overrides it.
    pub color: Color,
    pub visible: bool,
    pub selected: bool,
    /// Highlighted as the target of a drag and drop.
    pub drop_target: bool,
    /// Zero-based voice, selects the selection colour.
    pub voice: usize,
    /// Effective spatium of the staff the element lives on.
    pub spatium: f64,
    /// Magnification (staff size times small-note scaling).
    pub mag: f64,
    /// Position relative to the parent.
    pub pos: Point,
}

impl Default for ItemProps {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            visible: true,
            selected: false,
            drop_target: false,
            voice: 0,
            spatium: base_spatium(),
            mag: 1.0,
            pos: Point::ORIGIN,
        }
    }
}

impl ItemProps {
    /// Magnification relative to the reference spatium, used for glyphs.
    pub fn mag_s(&self) -> f64 {
        self.mag * self.spatium / SPATIUM20
    }

    pub fn at(mut self, pos: Point) -> Self {
        self.pos = pos;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Layout snapshot for elements that only need a bounding box.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxLayout {
    pub bbox: Rect,
}

/// Glyph placed at an offset from the element origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacedSym {
    pub sym: crate::symbols::SymId,
    pub pos: Point,
}

/// Staff type flags captured at layout time. `None` in a payload means the
/// element is not attached to a staff (palette cell).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffContext {
    /// Distance between staff lines in staff spaces.
    pub line_distance: f64,
    pub lines: u32,
    /// Vertical offset of the staff type in staff spaces.
    pub y_offset: f64,
    /// Repeat dot positions in staff spaces from the top line.
    pub repeat_dots: [f64; 2],
    pub is_tab: bool,
    pub is_drum: bool,
    pub gen_clef: bool,
    pub gen_timesig: bool,
    pub stemless: bool,
    pub stem_through: bool,
    pub show_rests: bool,
    /// Staff lines pass behind tablature fret marks.
    pub lines_through: bool,
    pub invisible: bool,
    /// Staff magnification at the element's tick.
    pub mag: f64,
}

impl Default for StaffContext {
    fn default() -> Self {
        Self {
            line_distance: 1.0,
            lines: 5,
            y_offset: 0.0,
            repeat_dots: [1.5, 2.5],
            is_tab: false,
            is_drum: false,
            gen_clef: true,
            gen_timesig: true,
            stemless: false,
            stem_through: true,
            show_rests: false,
            lines_through: false,
            invisible: false,
            mag: 1.0,
        }
    }
}

impl StaffContext {
    /// Six-line tablature with stems beside the staff.
    pub fn tab() -> Self {
        Self { is_tab: true, lines: 6, line_distance: 1.5, stem_through: false, ..Self::default() }
    }
}

/// Position of a chord in a value split across a barline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CrossMeasure {
    #[default]
    None,
    First,
    /// The tied-over continuation; its stem, hook and ledger lines are not drawn.
    Second,
}

/// Layout snapshot holding a single outline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathLayout {
    pub path: kurbo::BezPath,
}

// ═══════════════════════════════════════════════════════════════════════
// Element kinds
// ═══════════════════════════════════════════════════════════════════════

/// How a kind is drawn, broadly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    /// One or more glyphs from the symbol font.
    Symbol,
    /// Framed text block.
    Text,
    /// Spanner segment with dash, hook and caption handling.
    Line,
    /// One-off vector geometry.
    Geometric,
    /// Draws owned children through the dispatcher.
    Composite,
    /// Frames, images and editor-only marks.
    Frame,
}

macro_rules! elements {
    ($($kind:ident($payload:ty) => $family:ident, $name:literal;)*) => {
        /// Closed set of drawable element kinds.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum ElementKind {
            $($kind,)*
        }

        impl ElementKind {
            pub const ALL: &'static [ElementKind] = &[$(ElementKind::$kind,)*];

            /// Runtime type name used in diagnostics.
            pub fn name(self) -> &'static str {
                match self {
                    $(ElementKind::$kind => $name,)*
                }
            }

            pub fn family(self) -> Family {
                match self {
                    $(ElementKind::$kind => Family::$family,)*
                }
            }
        }

        /// Kind-specific payload, one variant per [`ElementKind`].
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "kind", content = "data")]
        pub enum ElementData {
            $($kind($payload),)*
        }

        impl ElementData {
            pub fn kind(&self) -> ElementKind {
                match self {
                    $(ElementData::$kind(_) => ElementKind::$kind,)*
                }
            }

            /// Default payload with an empty layout snapshot, the way a
            /// palette cell holds an element.
            pub fn placeholder(kind: ElementKind) -> Self {
                match kind {
                    $(ElementKind::$kind => {
                        let mut payload = <$payload>::default();
                        payload.layout = Some(Default::default());
                        ElementData::$kind(payload)
                    })*
                }
            }

            /// Whether the layout snapshot is present.
            pub fn has_layout(&self) -> bool {
                match self {
                    $(ElementData::$kind(p) => p.layout.is_some(),)*
                }
            }
        }
    };
}

elements! {
    Accidental(Accidental) => Symbol, "Accidental";
    ActionIcon(ActionIcon) => Frame, "ActionIcon";
    Ambitus(Ambitus) => Geometric, "Ambitus";
    Arpeggio(Arpeggio) => Geometric, "Arpeggio";
    Articulation(Articulation) => Symbol, "Articulation";
    BagpipeEmbellishment(BagpipeEmbellishment) => Geometric, "BagpipeEmbellishment";
    BarLine(BarLine) => Geometric, "BarLine";
    Beam(Beam) => Geometric, "Beam";
    Bend(Bend) => Geometric, "Bend";
    HBox(FrameBox) => Frame, "HBox";
    VBox(FrameBox) => Frame, "VBox";
    FBox(FrameBox) => Frame, "FBox";
    TBox(FrameBox) => Frame, "TBox";
    Bracket(Bracket) => Geometric, "Bracket";
    Breath(SymbolMark) => Symbol, "Breath";
    ChordLine(ChordLine) => Geometric, "ChordLine";
    Clef(Clef) => Symbol, "Clef";
    Capo(TextBase) => Text, "Capo";
    DeadSlapped(DeadSlapped) => Geometric, "DeadSlapped";
    Dynamic(TextBase) => Text, "Dynamic";
    Expression(TextBase) => Text, "Expression";
    Fermata(SymbolMark) => Symbol, "Fermata";
    FiguredBass(FiguredBass) => Composite, "FiguredBass";
    Fingering(TextBase) => Text, "Fingering";
    FretDiagram(FretDiagram) => Geometric, "FretDiagram";
    FretCircle(FretCircle) => Geometric, "FretCircle";
    FSymbol(FSymbol) => Text, "FSymbol";
    GlissandoSegment(GlissandoSegment) => Line, "GlissandoSegment";
    GradualTempoChangeSegment(LineSegment) => Line, "GradualTempoChangeSegment";
    HairpinSegment(HairpinSegment) => Line, "HairpinSegment";
    HarpPedalDiagram(TextBase) => Text, "HarpPedalDiagram";
    HarmonicMarkSegment(LineSegment) => Line, "HarmonicMarkSegment";
    Harmony(Harmony) => Text, "Harmony";
    Hook(Hook) => Symbol, "Hook";
    Image(Image) => Frame, "Image";
    InstrumentChange(TextBase) => Text, "InstrumentChange";
    InstrumentName(TextBase) => Text, "InstrumentName";
    Jump(TextBase) => Text, "Jump";
    KeySig(KeySig) => Symbol, "KeySig";
    Lasso(Lasso) => Frame, "Lasso";
    LayoutBreak(LayoutBreak) => Frame, "LayoutBreak";
    LedgerLine(LedgerLine) => Geometric, "LedgerLine";
    LetRingSegment(LineSegment) => Line, "LetRingSegment";
    Lyrics(TextBase) => Text, "Lyrics";
    LyricsLineSegment(LyricsLineSegment) => Line, "LyricsLineSegment";
    Marker(TextBase) => Text, "Marker";
    MeasureNumber(TextBase) => Text, "MeasureNumber";
    MeasureRepeat(MeasureRepeat) => Symbol, "MeasureRepeat";
    MMRest(MMRest) => Geometric, "MMRest";
    MMRestRange(TextBase) => Text, "MMRestRange";
    Note(Note) => Symbol, "Note";
    NoteDot(NoteDot) => Symbol, "NoteDot";
    NoteHead(Symbol) => Symbol, "NoteHead";
    Ornament(Articulation) => Symbol, "Ornament";
    OttavaSegment(LineSegment) => Line, "OttavaSegment";
    Page(Page) => Composite, "Page";
    PalmMuteSegment(LineSegment) => Line, "PalmMuteSegment";
    PedalSegment(LineSegment) => Line, "PedalSegment";
    PickScrapeSegment(LineSegment) => Line, "PickScrapeSegment";
    PlayTechAnnotation(TextBase) => Text, "PlayTechAnnotation";
    RasgueadoSegment(LineSegment) => Line, "RasgueadoSegment";
    RehearsalMark(TextBase) => Text, "RehearsalMark";
    Rest(Rest) => Symbol, "Rest";
    ShadowNote(ShadowNote) => Composite, "ShadowNote";
    SlurSegment(SlurTieSegment) => Geometric, "SlurSegment";
    Spacer(Spacer) => Frame, "Spacer";
    StaffLines(StaffLines) => Geometric, "StaffLines";
    StaffState(StaffState) => Frame, "StaffState";
    StaffText(TextBase) => Text, "StaffText";
    StaffTypeChange(StaffTypeChange) => Frame, "StaffTypeChange";
    Stem(Stem) => Geometric, "Stem";
    StemSlash(StemSlash) => Geometric, "StemSlash";
    Sticking(TextBase) => Text, "Sticking";
    StretchedBend(StretchedBend) => Geometric, "StretchedBend";
    Symbol(Symbol) => Symbol, "Symbol";
    SystemDivider(Symbol) => Symbol, "SystemDivider";
    SystemText(TextBase) => Text, "SystemText";
    TabDurationSymbol(TabDurationSymbol) => Geometric, "TabDurationSymbol";
    TempoText(TextBase) => Text, "TempoText";
    Text(TextBase) => Text, "Text";
    TextLineSegment(LineSegment) => Line, "TextLineSegment";
    TieSegment(SlurTieSegment) => Geometric, "TieSegment";
    TimeSig(TimeSig) => Symbol, "TimeSig";
    Tremolo(Tremolo) => Geometric, "Tremolo";
    TremoloBar(TremoloBar) => Geometric, "TremoloBar";
    TrillSegment(WiggleSegment) => Line, "TrillSegment";
    TripletFeel(TextBase) => Text, "TripletFeel";
    Tuplet(Tuplet) => Composite, "Tuplet";
    VibratoSegment(WiggleSegment) => Line, "VibratoSegment";
    VoltaSegment(LineSegment) => Line, "VoltaSegment";
    WhammyBarSegment(LineSegment) => Line, "WhammyBarSegment";
}

// ═══════════════════════════════════════════════════════════════════════
// Element
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(default)]
    pub props: ItemProps,
    #[serde(flatten)]
    pub data: ElementData,
}

impl Element {
    pub fn new(data: ElementData) -> Self {
        Self { props: ItemProps::default(), data }
    }

    pub fn with_props(props: ItemProps, data: ElementData) -> Self {
        Self { props, data }
    }

    /// Palette-style element of `kind` with default settings.
    pub fn placeholder(kind: ElementKind) -> Self {
        Self::new(ElementData::placeholder(kind))
    }

    pub fn kind(&self) -> ElementKind {
        self.data.kind()
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Parse an element snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, crate::error::ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn placeholders_round_trip_their_kind() {
        for kind in ElementKind::ALL {
            let el = Element::placeholder(*kind);
            assert_eq!(el.kind(), *kind);
            assert!(el.data.has_layout(), "{} has no layout", kind.name());
        }
    }

    #[test]
    fn kind_names_are_unique() {
        let names: HashSet<_> = ElementKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), ElementKind::ALL.len());
        assert_eq!(ElementKind::ALL.len(), 91);
    }

    #[test]
    fn mag_s_is_relative_to_reference_spatium() {
        let props = ItemProps { spatium: SPATIUM20 * 2.0, mag: 0.5, ..ItemProps::default() };
        assert_eq!(props.mag_s(), 1.0);
    }

    #[test]
    fn element_json_uses_kind_tag() {
        let el = Element::placeholder(ElementKind::StemSlash);
        let json = serde_json::to_string(&el).unwrap();
        assert!(json.contains(r#""kind":"StemSlash""#));
        let back = Element::from_json(&json).unwrap();
        assert_eq!(back.kind(), ElementKind::StemSlash);
        assert!(back.data.has_layout());
    }
}
