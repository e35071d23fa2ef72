//! Fixed drawing constants. Lengths are in staff spaces unless noted.

// ── Painter ─────────────────────────────────────────────────────────
/// Full turn in the painter's 1/16 degree arc units.
pub(super) const FULL_CIRCLE_16THS: i32 = 360 * 16;

// ── Figured bass ────────────────────────────────────────────────────
pub(super) const FB_FONT_FAMILY: &str = "MScoreBC";
/// Duration indicator under a figured bass (drawing units).
pub(super) const FB_DURATION_LINE_WIDTH: f64 = 3.0;
pub(super) const FB_DURATION_LINE_Y: f64 = -2.0;
pub(super) const FB_CONTLINE_THICKNESS: f64 = 0.09375;
pub(super) const FB_CONTLINE_LEFT_PADDING: f64 = 0.1875;
pub(super) const FB_CONTLINE_OVERLAP: f64 = 0.125;
/// Continuation line height as a fraction of the item's box.
pub(super) const FB_CONTLINE_HEIGHT: f64 = 0.875;

// ── Dash patterns (pen widths) ──────────────────────────────────────
pub(super) const DOTTED_PATTERN: [f64; 2] = [0.01, 1.99];
pub(super) const DASHED_PATTERN: [f64; 2] = [3.0, 3.0];
pub(super) const WIDE_DASHED_PATTERN: [f64; 2] = [5.0, 6.0];
/// Editor frame outline.
pub(super) const MARK_DASH_PATTERN: [f64; 2] = [1.0, 3.0];

// ── Beams ───────────────────────────────────────────────────────────
/// Steepest slant the ribbon thickness still compensates for (radians).
pub(super) const BEAM_MAX_COMPENSATED_ANGLE: f64 = std::f64::consts::PI / 6.0;

// ── Glissando ───────────────────────────────────────────────────────
pub(super) const GLISS_TEXT_RAISE_STRAIGHT: f64 = 0.1;
pub(super) const GLISS_TEXT_RAISE_WAVY: f64 = 0.4;

// ── Bends ───────────────────────────────────────────────────────────
pub(super) const BEND_START_X: f64 = 0.2;
pub(super) const BEND_START_Y: f64 = -0.8;
pub(super) const BEND_PEAK_Y: f64 = 2.0;
pub(super) const BEND_UP_DX: f64 = 0.5;
pub(super) const BEND_DOWN_DY: f64 = 3.0;
/// Stretched bend labels sit this far above the arrow tip.
pub(super) const BEND_LABEL_RAISE: f64 = 0.5;

// ── Chord lines ─────────────────────────────────────────────────────
/// Wavy chord lines are rotated off the horizontal by this (degrees).
pub(super) const CHORD_LINE_WAVE_ANGLE: f64 = 20.0;

// ── Frames and editor marks ─────────────────────────────────────────
pub(super) const BOX_LINE_WIDTH: f64 = 0.15;
pub(super) const SPACER_LINE_WIDTH: f64 = 0.3;
pub(super) const STAFF_TYPE_CHANGE_SIZE: f64 = 2.5;
pub(super) const STAFF_TYPE_CHANGE_LINE_DIST: f64 = 0.35;
pub(super) const STAFF_TYPE_CHANGE_CENTER: f64 = 1.25;
/// Pen width of the staff lines in the staff type change icon (drawing units).
pub(super) const STAFF_TYPE_CHANGE_LINE_WIDTH: f64 = 2.5;
pub(super) const STAFF_TYPE_CHANGE_MAX_LINES: u32 = 6;
pub(super) const STAFF_TYPE_CHANGE_HEAD_OFFSET: f64 = 0.33;
/// Lasso outline width in device pixels.
pub(super) const LASSO_PEN_WIDTH: f64 = 2.0;
/// Largest device-pixel side an image is resampled to; bigger images are
/// drawn scaled from their source pixels.
pub(super) const MAX_IMAGE_RESAMPLE: f64 = 8192.0;

// ── Notes ───────────────────────────────────────────────────────────
/// Padding around a tablature fret mask.
pub(super) const TAB_FRET_MASK_PAD: f64 = 0.1;
pub(super) const SHADOW_STEM_LENGTH: f64 = 3.5;
/// Line indices at or beyond this magnitude mean "no staff line".
pub(super) const NO_LINE_INDEX: i32 = 100;
pub(super) const AMBITUS_LEDGER_TOLERANCE: f64 = 0.1;

// ── Tablature stems ─────────────────────────────────────────────────
pub(super) const TAB_SLASH_WIDTH: f64 = 1.2;
pub(super) const TAB_SLASH_SLANT_Y: f64 = 0.8;
pub(super) const TAB_SLASH_THICKNESS: f64 = 0.4;
pub(super) const TAB_SLASH_DISPLACEMENT: f64 = 0.8;
pub(super) const TAB_SLASH_TOTAL_HEIGHT: f64 = 2.0;
pub(super) const TAB_SLASH_START_Y_UP: f64 = 0.5;
pub(super) const TAB_SLASH_START_Y_DOWN: f64 = 2.5;
pub(super) const TAB_STEM_DOT_Y: f64 = 0.6;

// ── Bagpipe ─────────────────────────────────────────────────────────
/// Distance between the three beam strokes, as a divisor of the spatium.
pub(super) const BAGPIPE_BEAM_STEP: f64 = 1.5;

// ── Barlines ────────────────────────────────────────────────────────
/// Palette barlines place their repeat dots at these staff-space offsets.
pub(super) const PALETTE_REPEAT_DOTS: [f64; 2] = [1.5, 2.5];
/// Symbol fonts whose repeat dot glyph is centred on the baseline.
pub(super) const CENTERED_DOT_FONTS: [&str; 3] = ["Emmentaler", "Gonville", "MuseJazz"];
pub(super) const IRREGULAR_MARK_FONT: &str = "Edwin";
/// Irregular measure mark size in points at the reference spatium.
pub(super) const IRREGULAR_MARK_SIZE: f64 = 12.0;

// ── Fret diagrams ───────────────────────────────────────────────────
pub(super) const FRET_CIRCLE_WIDTH: f64 = 0.15;
/// Dot diameter per staff space before the fretDotSize factor.
pub(super) const FRET_DOT_DIAMETER: f64 = 0.49;
/// String overhang above the nut when the diagram starts above fret one.
pub(super) const FRET_STRING_OVERHANG: f64 = 0.2;
/// Dot and marker outlines relative to the string width.
pub(super) const FRET_SYM_PEN_RATIO: f64 = 1.2;
pub(super) const FRET_CROSS_PEN_RATIO: f64 = 1.5;
pub(super) const FRET_MARKER_PEN_RATIO: f64 = 1.2;
/// Gap between the fret number and the grid, in string distances.
pub(super) const FRET_NUMBER_GAP: f64 = 0.4;
