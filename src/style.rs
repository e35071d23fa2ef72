//! Style sheet: symbolic keys resolved to concrete values.
//!
//! Every key has a built-in default; a sheet only stores overrides. Reads
//! are pure, so one sheet can be shared by any number of paint passes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ── Units ───────────────────────────────────────────────────────────
/// Drawing units per inch.
pub const DPI: f64 = 360.0;
/// Drawing units per millimetre.
pub const DPMM: f64 = DPI / 25.4;
/// Reference spatium that glyph metrics and font sizes are expressed in.
pub const SPATIUM20: f64 = 5.0 * (DPI / 72.0);

/// Spatium of the built-in sheet, the unit of sizes that do not follow
/// the staff.
pub fn base_spatium() -> f64 {
    1.75 * DPMM
}

/// Style keys read while drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Sid {
    Spatium,
    MusicalSymbolFont,

    StaffLineWidth,
    LedgerLineWidth,
    LedgerLineLength,
    StemWidth,

    BarWidth,
    DoubleBarWidth,
    EndBarWidth,
    DoubleBarDistance,
    EndBarDistance,
    RepeatBarlineDotSeparation,
    RepeatBarTips,

    BracketWidth,

    DotNoteDistance,
    DotDotDistance,
    AccidentalNoteDistance,

    SlurEndWidth,
    SlurDottedWidth,

    ArpeggioLineWidth,
    ArpeggioHookLen,
    ChordlineThickness,
    BendArrowWidth,

    BarreLineWidth,
    FretNumMag,
    FretDotSize,

    FiguredBassFontSize,

    MultiMeasureRestMargin,
    MmRestHBarThickness,
    MmRestHBarVStrokeThickness,
    MmRestHBarVStrokeHeight,
    MmRestNumberMaskHBar,
    OldStyleMultiMeasureRests,
    MmRestOldStyleMaxMeasures,
    MmRestOldStyleSpacing,
    FourMeasureRepeatShowExtenders,

    ShowHeader,
    HeaderFirstPage,
    HeaderOddEven,
    ShowFooter,
    FooterFirstPage,
    FooterOddEven,
}

impl Sid {
    pub const ALL: [Sid; 42] = [
        Sid::Spatium,
        Sid::MusicalSymbolFont,
        Sid::StaffLineWidth,
        Sid::LedgerLineWidth,
        Sid::LedgerLineLength,
        Sid::StemWidth,
        Sid::BarWidth,
        Sid::DoubleBarWidth,
        Sid::EndBarWidth,
        Sid::DoubleBarDistance,
        Sid::EndBarDistance,
        Sid::RepeatBarlineDotSeparation,
        Sid::RepeatBarTips,
        Sid::BracketWidth,
        Sid::DotNoteDistance,
        Sid::DotDotDistance,
        Sid::AccidentalNoteDistance,
        Sid::SlurEndWidth,
        Sid::SlurDottedWidth,
        Sid::ArpeggioLineWidth,
        Sid::ArpeggioHookLen,
        Sid::ChordlineThickness,
        Sid::BendArrowWidth,
        Sid::BarreLineWidth,
        Sid::FretNumMag,
        Sid::FretDotSize,
        Sid::FiguredBassFontSize,
        Sid::MultiMeasureRestMargin,
        Sid::MmRestHBarThickness,
        Sid::MmRestHBarVStrokeThickness,
        Sid::MmRestHBarVStrokeHeight,
        Sid::MmRestNumberMaskHBar,
        Sid::OldStyleMultiMeasureRests,
        Sid::MmRestOldStyleMaxMeasures,
        Sid::MmRestOldStyleSpacing,
        Sid::FourMeasureRepeatShowExtenders,
        Sid::ShowHeader,
        Sid::HeaderFirstPage,
        Sid::HeaderOddEven,
        Sid::ShowFooter,
        Sid::FooterFirstPage,
        Sid::FooterOddEven,
    ];

    /// Built-in value of this key.
    pub fn default_value(self) -> StyleValue {
        use StyleValue::*;
        match self {
            Sid::Spatium => Real(base_spatium()),
            Sid::MusicalSymbolFont => String("Leland".to_string()),

            Sid::StaffLineWidth => Spatium(0.11),
            Sid::LedgerLineWidth => Spatium(0.16),
            Sid::LedgerLineLength => Spatium(0.33),
            Sid::StemWidth => Spatium(0.10),

            Sid::BarWidth => Spatium(0.18),
            Sid::DoubleBarWidth => Spatium(0.18),
            Sid::EndBarWidth => Spatium(0.55),
            Sid::DoubleBarDistance => Spatium(0.37),
            Sid::EndBarDistance => Spatium(0.37),
            Sid::RepeatBarlineDotSeparation => Spatium(0.37),
            Sid::RepeatBarTips => Bool(false),

            Sid::BracketWidth => Spatium(0.45),

            Sid::DotNoteDistance => Spatium(0.5),
            Sid::DotDotDistance => Spatium(0.65),
            Sid::AccidentalNoteDistance => Spatium(0.25),

            Sid::SlurEndWidth => Spatium(0.07),
            Sid::SlurDottedWidth => Spatium(0.10),

            Sid::ArpeggioLineWidth => Spatium(0.18),
            Sid::ArpeggioHookLen => Spatium(0.8),
            Sid::ChordlineThickness => Spatium(0.11),
            Sid::BendArrowWidth => Spatium(0.5),

            Sid::BarreLineWidth => Real(1.0),
            Sid::FretNumMag => Real(2.0),
            Sid::FretDotSize => Real(1.0),

            Sid::FiguredBassFontSize => Real(8.0),

            Sid::MultiMeasureRestMargin => Spatium(1.2),
            Sid::MmRestHBarThickness => Spatium(0.7),
            Sid::MmRestHBarVStrokeThickness => Spatium(0.2),
            Sid::MmRestHBarVStrokeHeight => Spatium(2.0),
            Sid::MmRestNumberMaskHBar => Bool(true),
            Sid::OldStyleMultiMeasureRests => Bool(false),
            Sid::MmRestOldStyleMaxMeasures => Int(9),
            Sid::MmRestOldStyleSpacing => Spatium(0.85),
            Sid::FourMeasureRepeatShowExtenders => Bool(false),

            Sid::ShowHeader => Bool(true),
            Sid::HeaderFirstPage => Bool(false),
            Sid::HeaderOddEven => Bool(true),
            Sid::ShowFooter => Bool(true),
            Sid::FooterFirstPage => Bool(true),
            Sid::FooterOddEven => Bool(true),
        }
    }
}

/// A resolved style value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StyleValue {
    /// Length in staff spaces.
    Spatium(f64),
    Real(f64),
    Int(i32),
    Bool(bool),
    String(String),
}

impl StyleValue {
    fn type_name(&self) -> &'static str {
        match self {
            StyleValue::Spatium(_) => "a length in staff spaces",
            StyleValue::Real(_) => "a number",
            StyleValue::Int(_) => "an integer",
            StyleValue::Bool(_) => "a boolean",
            StyleValue::String(_) => "a string",
        }
    }

    fn same_type(&self, other: &StyleValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Coerce a loose JSON value into the shape of `template`.
    fn from_json_like(template: &StyleValue, value: &serde_json::Value) -> Option<StyleValue> {
        match template {
            StyleValue::Spatium(_) => value.as_f64().map(StyleValue::Spatium),
            StyleValue::Real(_) => value.as_f64().map(StyleValue::Real),
            StyleValue::Int(_) => value
                .as_i64()
                .and_then(|v| i32::try_from(v).ok())
                .map(StyleValue::Int),
            StyleValue::Bool(_) => value.as_bool().map(StyleValue::Bool),
            StyleValue::String(_) => value.as_str().map(|s| StyleValue::String(s.to_string())),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Style
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    overrides: BTreeMap<Sid, StyleValue>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from a JSON object keyed by camelCase style names,
    /// e.g. `{"barWidth": 0.2, "repeatBarTips": true}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<Sid, serde_json::Value> = serde_json::from_str(json)?;
        let mut style = Style::new();
        for (sid, value) in raw {
            let template = sid.default_value();
            let parsed = StyleValue::from_json_like(&template, &value).ok_or(ConfigError::StyleType {
                key: sid,
                expected: template.type_name(),
            })?;
            style.overrides.insert(sid, parsed);
        }
        tracing::debug!(overrides = style.overrides.len(), "style sheet loaded");
        Ok(style)
    }

    /// Override one key. The value must have the same type as the default.
    pub fn set(&mut self, sid: Sid, value: StyleValue) -> Result<(), ConfigError> {
        let template = sid.default_value();
        if !template.same_type(&value) {
            return Err(ConfigError::StyleType { key: sid, expected: template.type_name() });
        }
        self.overrides.insert(sid, value);
        Ok(())
    }

    /// Builder form of [`Style::set`] for known-good values.
    pub fn with(mut self, sid: Sid, value: StyleValue) -> Result<Self, ConfigError> {
        self.set(sid, value)?;
        Ok(self)
    }

    pub fn value(&self, sid: Sid) -> StyleValue {
        self.overrides.get(&sid).cloned().unwrap_or_else(|| sid.default_value())
    }

    fn number(&self, sid: Sid) -> f64 {
        match self.value(sid) {
            StyleValue::Spatium(v) | StyleValue::Real(v) => v,
            StyleValue::Int(v) => f64::from(v),
            StyleValue::Bool(_) | StyleValue::String(_) => 0.0,
        }
    }

    /// Base spatium of the sheet in drawing units.
    pub fn spatium(&self) -> f64 {
        self.number(Sid::Spatium)
    }

    /// Length in staff spaces.
    pub fn value_s(&self, sid: Sid) -> f64 {
        self.number(sid)
    }

    /// Length in drawing units, scaled by the sheet's spatium.
    pub fn mm(&self, sid: Sid) -> f64 {
        self.number(sid) * self.spatium()
    }

    pub fn real(&self, sid: Sid) -> f64 {
        self.number(sid)
    }

    pub fn int(&self, sid: Sid) -> i32 {
        match self.value(sid) {
            StyleValue::Int(v) => v,
            StyleValue::Spatium(v) | StyleValue::Real(v) => v as i32,
            StyleValue::Bool(_) | StyleValue::String(_) => 0,
        }
    }

    pub fn bool(&self, sid: Sid) -> bool {
        matches!(self.value(sid), StyleValue::Bool(true))
    }

    pub fn string(&self, sid: Sid) -> String {
        match self.value(sid) {
            StyleValue::String(s) => s,
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_key_has_a_default() {
        for sid in Sid::ALL {
            let _ = sid.default_value();
        }
        assert_eq!(Style::new().string(Sid::MusicalSymbolFont), "Leland");
    }

    #[test]
    fn mm_scales_by_spatium() {
        let style = Style::from_json(r#"{"spatium": 10.0, "barWidth": 0.2}"#).unwrap();
        assert_eq!(style.mm(Sid::BarWidth), 2.0);
        assert_eq!(style.value_s(Sid::BarWidth), 0.2);
    }

    #[test]
    fn json_type_mismatch_is_reported() {
        let err = Style::from_json(r#"{"repeatBarTips": 3}"#).unwrap_err();
        assert!(matches!(err, ConfigError::StyleType { key: Sid::RepeatBarTips, .. }));
    }

    #[test]
    fn unknown_key_is_a_json_error() {
        assert!(matches!(Style::from_json(r#"{"noSuchKey": 1}"#), Err(ConfigError::Json(_))));
    }

    #[test]
    fn set_rejects_wrong_type() {
        let mut style = Style::new();
        assert!(style.set(Sid::EndBarWidth, StyleValue::Bool(true)).is_err());
        style.set(Sid::EndBarWidth, StyleValue::Spatium(1.0)).unwrap();
        assert_eq!(style.value_s(Sid::EndBarWidth), 1.0);
    }
}
