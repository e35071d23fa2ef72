//! Glyph backend: SMuFL symbol ids, metric tables and glyph runs.
//!
//! Metrics are stored in staff spaces with y pointing down. Every query
//! takes a `mag` factor relative to [`SPATIUM20`], the same factor
//! elements expose as `mag_s()`, so a metric of one staff space comes back
//! as `SPATIUM20 * mag` drawing units.

use std::collections::BTreeMap;

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::painter::{Font, Glyph, Painter};
use crate::style::SPATIUM20;

// ═══════════════════════════════════════════════════════════════════════
// Symbol ids
// ═══════════════════════════════════════════════════════════════════════

macro_rules! symbols {
    ($($name:ident = $cp:literal, $adv:literal, [$x0:literal, $y0:literal, $x1:literal, $y1:literal];)*) => {
        /// Named musical glyph. `NoSym` is a legal value that draws nothing.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub enum SymId {
            #[default]
            NoSym,
            $($name,)*
        }

        impl SymId {
            /// Every drawable symbol (excludes `NoSym`).
            pub const ALL: &'static [SymId] = &[$(SymId::$name,)*];

            /// SMuFL code point, `None` for `NoSym`.
            pub fn codepoint(self) -> Option<char> {
                match self {
                    SymId::NoSym => None,
                    $(SymId::$name => Some($cp),)*
                }
            }

            fn builtin_metrics(self) -> Option<GlyphMetrics> {
                match self {
                    SymId::NoSym => None,
                    $(SymId::$name => Some(GlyphMetrics {
                        advance: $adv,
                        bbox: Rect::new($x0, $y0, $x1, $y1),
                        anchors: BTreeMap::new(),
                    }),)*
                }
            }
        }
    };
}

symbols! {
    // noteheads
    NoteheadDoubleWhole = '\u{E0A0}', 2.4, [0.0, -0.6, 2.4, 0.6];
    NoteheadWhole = '\u{E0A2}', 1.7, [0.0, -0.55, 1.7, 0.55];
    NoteheadHalf = '\u{E0A3}', 1.18, [0.0, -0.5, 1.18, 0.5];
    NoteheadBlack = '\u{E0A4}', 1.18, [0.0, -0.5, 1.18, 0.5];
    NoteheadXBlack = '\u{E0A9}', 1.16, [0.0, -0.5, 1.16, 0.5];
    NoteheadParenthesisLeft = '\u{E0F5}', 0.4, [0.0, -0.9, 0.4, 0.9];
    NoteheadParenthesisRight = '\u{E0F6}', 0.4, [0.0, -0.9, 0.4, 0.9];
    AugmentationDot = '\u{E1E7}', 0.4, [0.0, -0.2, 0.4, 0.2];

    // accidentals
    AccidentalFlat = '\u{E260}', 0.9, [0.0, -1.75, 0.9, 0.6];
    AccidentalNatural = '\u{E261}', 0.67, [0.0, -1.35, 0.67, 1.35];
    AccidentalSharp = '\u{E262}', 1.0, [0.0, -1.4, 1.0, 1.4];
    AccidentalDoubleSharp = '\u{E263}', 1.0, [0.0, -0.5, 1.0, 0.5];
    AccidentalDoubleFlat = '\u{E264}', 1.6, [0.0, -1.75, 1.6, 0.6];
    AccidentalParensLeft = '\u{E26A}', 0.4, [0.0, -1.0, 0.4, 1.0];
    AccidentalParensRight = '\u{E26B}', 0.4, [0.0, -1.0, 0.4, 1.0];

    // clefs
    GClef = '\u{E050}', 2.7, [0.0, -4.4, 2.7, 2.6];
    CClef = '\u{E05C}', 2.8, [0.0, -2.0, 2.8, 2.0];
    FClef = '\u{E062}', 2.7, [0.0, -1.0, 2.7, 2.6];
    UnpitchedPercussionClef1 = '\u{E069}', 1.0, [0.0, -1.0, 1.0, 1.0];
    SixStringTabClef = '\u{E06D}', 1.4, [0.0, -2.5, 1.4, 2.5];

    // rests
    RestDoubleWhole = '\u{E4E2}', 0.5, [0.0, -1.0, 0.5, 0.0];
    RestWhole = '\u{E4E3}', 1.13, [0.0, 0.0, 1.13, 0.5];
    RestHalf = '\u{E4E4}', 1.13, [0.0, -0.5, 1.13, 0.0];
    RestQuarter = '\u{E4E5}', 1.08, [0.0, -1.5, 1.08, 1.5];
    Rest8th = '\u{E4E6}', 1.0, [0.0, -1.0, 1.0, 1.0];
    Rest16th = '\u{E4E7}', 1.2, [0.0, -1.0, 1.2, 2.0];
    Rest32nd = '\u{E4E8}', 1.4, [0.0, -2.0, 1.4, 2.0];
    RestHBarLeft = '\u{E4EF}', 1.0, [0.0, -1.0, 1.0, 1.0];
    RestHBarMiddle = '\u{E4F0}', 1.0, [0.0, -0.35, 1.0, 0.35];
    RestHBarRight = '\u{E4F1}', 1.0, [0.0, -1.0, 1.0, 1.0];

    // flags
    Flag8thUp = '\u{E240}', 1.05, [0.0, 0.0, 1.05, 3.2];
    Flag8thDown = '\u{E241}', 1.15, [0.0, -3.2, 1.15, 0.0];
    Flag16thUp = '\u{E242}', 1.05, [0.0, 0.0, 1.05, 3.2];
    Flag16thDown = '\u{E243}', 1.15, [0.0, -3.4, 1.15, 0.0];

    // time signatures
    TimeSig0 = '\u{E080}', 1.8, [0.0, -1.0, 1.8, 1.0];
    TimeSig1 = '\u{E081}', 1.3, [0.0, -1.0, 1.3, 1.0];
    TimeSig2 = '\u{E082}', 1.8, [0.0, -1.0, 1.8, 1.0];
    TimeSig3 = '\u{E083}', 1.7, [0.0, -1.0, 1.7, 1.0];
    TimeSig4 = '\u{E084}', 1.8, [0.0, -1.0, 1.8, 1.0];
    TimeSig5 = '\u{E085}', 1.7, [0.0, -1.0, 1.7, 1.0];
    TimeSig6 = '\u{E086}', 1.7, [0.0, -1.0, 1.7, 1.0];
    TimeSig7 = '\u{E087}', 1.7, [0.0, -1.0, 1.7, 1.0];
    TimeSig8 = '\u{E088}', 1.8, [0.0, -1.0, 1.8, 1.0];
    TimeSig9 = '\u{E089}', 1.7, [0.0, -1.0, 1.7, 1.0];
    TimeSigCommon = '\u{E08A}', 1.8, [0.0, -1.0, 1.8, 1.0];
    TimeSigCutCommon = '\u{E08B}', 1.8, [0.0, -1.4, 1.8, 1.4];
    TimeSigParensLeft = '\u{E094}', 0.6, [0.0, -2.0, 0.6, 2.0];
    TimeSigParensRight = '\u{E095}', 0.6, [0.0, -2.0, 0.6, 2.0];

    // barlines, brackets and systems
    RepeatDot = '\u{E044}', 0.4, [0.0, -0.2, 0.4, 0.2];
    Segno = '\u{E047}', 1.8, [0.0, -2.4, 1.8, 0.0];
    Coda = '\u{E048}', 2.4, [0.0, -2.6, 2.4, 0.4];
    Brace = '\u{E000}', 0.33, [0.0, -4.0, 0.33, 0.0];
    BracketTop = '\u{E003}', 1.0, [0.0, -1.1, 1.0, 0.0];
    BracketBottom = '\u{E004}', 1.0, [0.0, 0.0, 1.0, 1.1];
    ReversedBracketTop = '\u{E005}', 1.0, [0.0, -1.1, 1.0, 0.0];
    ReversedBracketBottom = '\u{E006}', 1.0, [0.0, 0.0, 1.0, 1.1];
    SystemDivider = '\u{E007}', 2.8, [0.0, -0.7, 2.8, 0.7];

    // articulations, fermatas, breaths
    ArticAccentAbove = '\u{E4A0}', 1.0, [0.0, -0.7, 1.0, 0.0];
    ArticAccentBelow = '\u{E4A1}', 1.0, [0.0, 0.0, 1.0, 0.7];
    ArticStaccatoAbove = '\u{E4A2}', 0.3, [0.0, -0.3, 0.3, 0.0];
    ArticStaccatoBelow = '\u{E4A3}', 0.3, [0.0, 0.0, 0.3, 0.3];
    ArticTenutoAbove = '\u{E4A4}', 1.2, [0.0, -0.15, 1.2, 0.0];
    ArticTenutoBelow = '\u{E4A5}', 1.2, [0.0, 0.0, 1.2, 0.15];
    ArticMarcatoAbove = '\u{E4AC}', 0.9, [0.0, -1.0, 0.9, 0.0];
    ArticMarcatoBelow = '\u{E4AD}', 0.9, [0.0, 0.0, 0.9, 1.0];
    FermataAbove = '\u{E4C0}', 2.4, [0.0, -1.3, 2.4, 0.0];
    FermataBelow = '\u{E4C1}', 2.4, [0.0, 0.0, 2.4, 1.3];
    BreathMarkComma = '\u{E4CE}', 0.6, [0.0, -1.0, 0.6, 0.0];
    Caesura = '\u{E4D1}', 1.6, [0.0, -2.0, 1.6, 0.0];

    // ornaments and wiggles
    OrnamentTrill = '\u{E566}', 1.6, [0.0, -1.4, 1.6, 0.0];
    OrnamentTurn = '\u{E567}', 1.6, [0.0, -0.8, 1.6, 0.0];
    OrnamentShortTrill = '\u{E56C}', 1.6, [0.0, -0.8, 1.6, 0.0];
    OrnamentMordent = '\u{E56D}', 1.6, [0.0, -0.8, 1.6, 0.0];
    WiggleTrill = '\u{EAA4}', 0.9, [0.0, -0.3, 0.9, 0.3];
    WiggleArpeggiatoUp = '\u{EAA9}', 0.75, [0.0, -0.3, 0.75, 0.3];
    WiggleArpeggiatoDown = '\u{EAAA}', 0.75, [0.0, -0.3, 0.75, 0.3];
    WiggleArpeggiatoUpArrow = '\u{EAAD}', 0.9, [0.0, -0.4, 0.9, 0.4];
    WiggleArpeggiatoDownArrow = '\u{EAAE}', 0.9, [0.0, -0.4, 0.9, 0.4];
    WiggleGlissando = '\u{EAAF}', 0.75, [0.0, -0.25, 0.75, 0.25];
    WiggleVibrato = '\u{EAB0}', 0.6, [0.0, -0.3, 0.6, 0.3];
    GuitarVibratoStroke = '\u{EAB2}', 0.8, [0.0, -0.4, 0.8, 0.4];
    WiggleSawtooth = '\u{EABB}', 0.9, [0.0, -0.4, 0.9, 0.4];
    ArrowheadBlackUp = '\u{EB78}', 0.8, [-0.4, 0.0, 0.4, 0.8];
    ArrowheadBlackDown = '\u{EB7C}', 0.8, [-0.4, -0.8, 0.4, 0.0];

    // tremolos
    Tremolo1 = '\u{E220}', 1.1, [0.0, -0.35, 1.1, 0.35];
    Tremolo2 = '\u{E221}', 1.1, [0.0, -0.7, 1.1, 0.7];
    Tremolo3 = '\u{E222}', 1.1, [0.0, -1.05, 1.1, 1.05];
    BuzzRoll = '\u{E22A}', 0.7, [0.0, -0.6, 0.7, 0.6];

    // repeats and pedals
    Repeat1Bar = '\u{E500}', 2.0, [0.0, -1.0, 2.0, 1.0];
    Repeat2Bars = '\u{E501}', 3.0, [0.0, -1.0, 3.0, 1.0];
    Repeat4Bars = '\u{E502}', 4.0, [0.0, -1.0, 4.0, 1.0];
    KeyboardPedalPed = '\u{E650}', 2.8, [0.0, -1.5, 2.8, 0.0];
    KeyboardPedalUp = '\u{E655}', 1.5, [0.0, -1.5, 1.5, 0.0];

    // tuplet digits
    Tuplet0 = '\u{E880}', 0.7, [0.0, -0.9, 0.7, 0.1];
    Tuplet1 = '\u{E881}', 0.5, [0.0, -0.9, 0.5, 0.1];
    Tuplet2 = '\u{E882}', 0.7, [0.0, -0.9, 0.7, 0.1];
    Tuplet3 = '\u{E883}', 0.7, [0.0, -0.9, 0.7, 0.1];
    Tuplet4 = '\u{E884}', 0.7, [0.0, -0.9, 0.7, 0.1];
    Tuplet5 = '\u{E885}', 0.7, [0.0, -0.9, 0.7, 0.1];
    Tuplet6 = '\u{E886}', 0.7, [0.0, -0.9, 0.7, 0.1];
    Tuplet7 = '\u{E887}', 0.7, [0.0, -0.9, 0.7, 0.1];
    Tuplet8 = '\u{E888}', 0.7, [0.0, -0.9, 0.7, 0.1];
    Tuplet9 = '\u{E889}', 0.7, [0.0, -0.9, 0.7, 0.1];
}

impl SymId {
    /// Time signature digit glyphs for `n` (e.g. `12` → `[TimeSig1, TimeSig2]`).
    pub fn time_sig_digits(n: u32) -> Vec<SymId> {
        const DIGITS: [SymId; 10] = [
            SymId::TimeSig0,
            SymId::TimeSig1,
            SymId::TimeSig2,
            SymId::TimeSig3,
            SymId::TimeSig4,
            SymId::TimeSig5,
            SymId::TimeSig6,
            SymId::TimeSig7,
            SymId::TimeSig8,
            SymId::TimeSig9,
        ];
        n.to_string()
            .bytes()
            .map(|b| DIGITS[usize::from(b - b'0')])
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Metrics
// ═══════════════════════════════════════════════════════════════════════

/// Named attachment points from SMuFL metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SmuflAnchor {
    StemUpSE,
    StemDownNW,
    StemUpNW,
    StemDownSW,
}

/// Metrics of one glyph, in staff spaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphMetrics {
    pub advance: f64,
    pub bbox: Rect,
    #[serde(default)]
    pub anchors: BTreeMap<SmuflAnchor, Point>,
}

/// Source of glyph metrics and glyph drawing.
pub trait SymbolFont {
    /// Font family passed to the painter.
    fn name(&self) -> &str;

    fn metrics(&self, id: SymId) -> Option<&GlyphMetrics>;

    fn bbox(&self, id: SymId, mag: f64) -> Rect {
        match self.metrics(id) {
            Some(m) => scale_rect(m.bbox, SPATIUM20 * mag),
            None => {
                if id != SymId::NoSym {
                    tracing::debug!(?id, font = self.name(), "no metrics for symbol");
                }
                Rect::ZERO
            }
        }
    }

    fn advance(&self, id: SymId, mag: f64) -> f64 {
        self.metrics(id).map_or(0.0, |m| m.advance * SPATIUM20 * mag)
    }

    fn width(&self, id: SymId, mag: f64) -> f64 {
        self.bbox(id, mag).width()
    }

    /// Anchor point, or the origin when the glyph does not define it.
    fn smufl_anchor(&self, id: SymId, anchor: SmuflAnchor, mag: f64) -> Point {
        self.metrics(id)
            .and_then(|m| m.anchors.get(&anchor))
            .map_or(Point::ORIGIN, |p| (p.to_vec2() * SPATIUM20 * mag).to_point())
    }

    /// Font used for glyph runs at `mag`. A SMuFL em is four staff spaces.
    fn glyph_font(&self, mag: f64) -> Font {
        Font::new(self.name(), 4.0 * SPATIUM20 * mag)
    }

    /// Draw `ids` left to right from `pos`, advancing by each glyph's
    /// advance width. `NoSym` entries are skipped.
    fn draw(&self, painter: &mut dyn Painter, ids: &[SymId], pos: Point, mag: f64) {
        let mut glyphs = Vec::with_capacity(ids.len());
        let mut x = pos.x;
        for id in ids {
            if let Some(ch) = id.codepoint() {
                glyphs.push(Glyph { ch, pos: Point::new(x, pos.y) });
                x += self.advance(*id, mag);
            }
        }
        if !glyphs.is_empty() {
            painter.draw_glyphs(&self.glyph_font(mag), &glyphs);
        }
    }

    fn draw_one(&self, painter: &mut dyn Painter, id: SymId, pos: Point, mag: f64) {
        self.draw(painter, &[id], pos, mag);
    }
}

fn scale_rect(r: Rect, s: f64) -> Rect {
    Rect::new(r.x0 * s, r.y0 * s, r.x1 * s, r.y1 * s)
}

// ═══════════════════════════════════════════════════════════════════════
// TableFont
// ═══════════════════════════════════════════════════════════════════════

/// Metric table keyed by symbol id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableFont {
    pub name: String,
    pub glyphs: BTreeMap<SymId, GlyphMetrics>,
}

impl TableFont {
    /// Approximate metrics for every known symbol, with the stem anchors
    /// noteheads need.
    pub fn builtin(name: impl Into<String>) -> Self {
        let mut glyphs: BTreeMap<SymId, GlyphMetrics> = SymId::ALL
            .iter()
            .filter_map(|id| id.builtin_metrics().map(|m| (*id, m)))
            .collect();
        for id in [SymId::NoteheadBlack, SymId::NoteheadHalf, SymId::NoteheadXBlack] {
            if let Some(m) = glyphs.get_mut(&id) {
                let w = m.bbox.x1;
                m.anchors.insert(SmuflAnchor::StemUpSE, Point::new(w, -0.168));
                m.anchors.insert(SmuflAnchor::StemDownNW, Point::new(0.0, 0.168));
            }
        }
        Self { name: name.into(), glyphs }
    }

    /// Load a table from JSON:
    /// `{"name": "Leland", "glyphs": {"noteheadBlack": {"advance": 1.18,
    /// "bbox": {"x0": 0, "y0": -0.5, "x1": 1.18, "y1": 0.5}}}}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let font: TableFont = serde_json::from_str(json)?;
        if let Some((id, _)) = font.glyphs.iter().find(|(_, m)| m.advance < 0.0) {
            return Err(ConfigError::Metric(format!("{id:?}")));
        }
        Ok(font)
    }

    /// Fill glyphs missing from this table with built-in values.
    pub fn with_fallback(mut self) -> Self {
        for (id, m) in TableFont::builtin(self.name.clone()).glyphs {
            self.glyphs.entry(id).or_insert(m);
        }
        self
    }
}

impl Default for TableFont {
    fn default() -> Self {
        Self::builtin("Leland")
    }
}

impl SymbolFont for TableFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn metrics(&self, id: SymId) -> Option<&GlyphMetrics> {
        self.glyphs.get(&id)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Text metrics
// ═══════════════════════════════════════════════════════════════════════

/// Measures text for centring and fit decisions.
pub trait TextMetrics {
    /// Bounds relative to the left end of the baseline (y0 is -ascent).
    fn bounding_rect(&self, font: &Font, text: &str) -> Rect;

    fn width(&self, font: &Font, text: &str) -> f64 {
        self.bounding_rect(font, text).width()
    }
}

/// Fixed-ratio metrics: average glyph width and ascent as fractions of
/// the font size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApproxTextMetrics {
    pub char_width: f64,
    pub ascent: f64,
    pub descent: f64,
}

impl Default for ApproxTextMetrics {
    fn default() -> Self {
        Self { char_width: 0.5, ascent: 0.8, descent: 0.2 }
    }
}

impl TextMetrics for ApproxTextMetrics {
    fn bounding_rect(&self, font: &Font, text: &str) -> Rect {
        let mut w = self.char_width * font.size * text.chars().count() as f64;
        if font.bold {
            w *= 1.1;
        }
        Rect::new(0.0, -self.ascent * font.size, w, self.descent * font.size)
    }
}
