//! Render configuration: per-pass flags and application colours.

use peniko::Color;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Flags describing the kind of paint pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Output goes to print/export: no selection colours, no formatting marks.
    pub printing: bool,
    /// Export target is SVG (images keep their vector source).
    pub svg_printing: bool,
    /// Draw layout breaks, spacers, staff state marks and the like.
    pub show_unprintable: bool,
    pub show_frames: bool,
    pub show_invisible: bool,
    /// Mark measures whose length differs from the time signature.
    pub mark_irregular_measures: bool,
    /// Colour notes outside the instrument's range.
    pub warn_pitch_range: bool,
    /// Page view (headers and footers are only drawn in page layout).
    pub page_layout: bool,
    /// Device pixels per logical pixel, applied to font sizes.
    pub pixel_ratio: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            printing: false,
            svg_printing: false,
            show_unprintable: true,
            show_frames: true,
            show_invisible: true,
            mark_irregular_measures: true,
            warn_pitch_range: true,
            page_layout: true,
            pixel_ratio: 1.0,
        }
    }
}

impl RenderOptions {
    /// Options for a print/export pass.
    pub fn print() -> Self {
        Self { printing: true, ..Self::default() }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Formatting marks (layout breaks, spacers, frames) are visible.
    pub fn shows_marks(&self) -> bool {
        !self.printing && self.show_unprintable
    }
}

/// Application-level colours used for selection and annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct EngravingConfig {
    /// Selection colour per voice (index 0 is voice 1).
    pub selection_colors: [Color; 4],
    pub highlight_color: Color,
    pub formatting_marks_color: Color,
    pub invisible_color: Color,
    pub lasso_color: Color,
    pub critical_color: Color,
    pub critical_selected_color: Color,
    pub warning_color: Color,
    pub warning_selected_color: Color,
    pub note_background_color: Color,
    pub default_color: Color,
    /// Interface scale factor; editor marks keep a fixed device width.
    pub gui_scaling: f64,
}

impl Default for EngravingConfig {
    fn default() -> Self {
        Self {
            selection_colors: [
                Color::from_rgb8(0x00, 0x65, 0xbf),
                Color::from_rgb8(0x00, 0x7f, 0x00),
                Color::from_rgb8(0xc5, 0x3f, 0x00),
                Color::from_rgb8(0xc3, 0x19, 0x89),
            ],
            highlight_color: Color::from_rgb8(0xa6, 0xce, 0xff),
            formatting_marks_color: Color::from_rgb8(0xa0, 0xa0, 0xa4),
            invisible_color: Color::from_rgb8(0x80, 0x80, 0x80),
            lasso_color: Color::from_rgba8(0x00, 0x80, 0xff, 0x30),
            critical_color: Color::from_rgb8(0xe0, 0x00, 0x00),
            critical_selected_color: Color::from_rgb8(0xff, 0x00, 0x00),
            warning_color: Color::from_rgb8(0xff, 0xa5, 0x00),
            warning_selected_color: Color::from_rgb8(0xff, 0x8c, 0x00),
            note_background_color: Color::WHITE,
            default_color: Color::BLACK,
            gui_scaling: 1.0,
        }
    }
}

/// JSON form: every field optional, colours as hex strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
struct RawEngravingConfig {
    selection_colors: Option<[String; 4]>,
    highlight_color: Option<String>,
    formatting_marks_color: Option<String>,
    invisible_color: Option<String>,
    lasso_color: Option<String>,
    critical_color: Option<String>,
    critical_selected_color: Option<String>,
    warning_color: Option<String>,
    warning_selected_color: Option<String>,
    note_background_color: Option<String>,
    default_color: Option<String>,
    gui_scaling: Option<f64>,
}

impl EngravingConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawEngravingConfig = serde_json::from_str(json)?;
        let mut cfg = EngravingConfig::default();

        if let Some(colors) = raw.selection_colors {
            for (slot, hex) in cfg.selection_colors.iter_mut().zip(colors.iter()) {
                *slot = parse_hex_color(hex)?;
            }
        }
        let fields = [
            (raw.highlight_color, &mut cfg.highlight_color),
            (raw.formatting_marks_color, &mut cfg.formatting_marks_color),
            (raw.invisible_color, &mut cfg.invisible_color),
            (raw.lasso_color, &mut cfg.lasso_color),
            (raw.critical_color, &mut cfg.critical_color),
            (raw.critical_selected_color, &mut cfg.critical_selected_color),
            (raw.warning_color, &mut cfg.warning_color),
            (raw.warning_selected_color, &mut cfg.warning_selected_color),
            (raw.note_background_color, &mut cfg.note_background_color),
            (raw.default_color, &mut cfg.default_color),
        ];
        for (hex, slot) in fields {
            if let Some(hex) = hex {
                *slot = parse_hex_color(&hex)?;
            }
        }
        if let Some(scaling) = raw.gui_scaling {
            cfg.gui_scaling = scaling;
        }
        Ok(cfg)
    }

    /// Selection colour for a voice; voices past the palette wrap around.
    pub fn selection_color(&self, voice: usize) -> Color {
        self.selection_colors[voice % self.selection_colors.len()]
    }
}

/// Parse `#rrggbb` or `#rrggbbaa`.
pub fn parse_hex_color(s: &str) -> Result<Color, ConfigError> {
    let bad = || ConfigError::Color(s.to_string());
    let hex = s.strip_prefix('#').ok_or_else(bad)?;
    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        return Err(bad());
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
    let a = if hex.len() == 8 { byte(6)? } else { 0xff };
    Ok(Color::from_rgba8(byte(0)?, byte(2)?, byte(4)?, a))
}
