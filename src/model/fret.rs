//! Chord diagrams for fretted instruments.

use kurbo::Rect;
use serde::{Deserialize, Serialize};

use crate::painter::Font;
use crate::style::base_spatium;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FretDotType {
    #[default]
    Normal,
    Cross,
    Square,
    Triangle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FretDot {
    pub string: i32,
    /// 1-based fret; 0 means no dot.
    pub fret: i32,
    #[serde(default)]
    pub dot_type: FretDotType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FretMarkerType {
    None,
    Circle,
    Cross,
}

/// Open or muted string marker above the nut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FretMarker {
    pub string: i32,
    pub marker_type: FretMarkerType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barre {
    pub fret: i32,
    pub start_string: i32,
    /// `None` runs to the last string.
    pub end_string: Option<i32>,
}

/// Which side of the diagram the fret offset number goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FretNumPos {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FretLayout {
    pub string_dist: f64,
    pub fret_dist: f64,
    pub nut_lw: f64,
    pub string_lw: f64,
    pub marker_size: f64,
}

impl Default for FretLayout {
    fn default() -> Self {
        let sp = base_spatium();
        Self { string_dist: 0.7 * sp, fret_dist: 0.8 * sp, nut_lw: 0.2 * sp, string_lw: 0.08 * sp, marker_size: 0.5 * sp }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FretDiagram {
    pub strings: i32,
    pub frets: i32,
    /// Index of the first fret shown; drawn as `offset + 1`.
    pub fret_offset: i32,
    pub orientation: Orientation,
    pub num_pos: FretNumPos,
    pub user_mag: f64,
    pub font: Font,
    pub dots: Vec<FretDot>,
    pub markers: Vec<FretMarker>,
    pub barres: Vec<Barre>,
    pub layout: Option<FretLayout>,
}

impl Default for FretDiagram {
    fn default() -> Self {
        Self {
            strings: 6,
            frets: 4,
            fret_offset: 0,
            orientation: Orientation::Vertical,
            num_pos: FretNumPos::Left,
            user_mag: 1.0,
            font: Font::new("FreeSans", 9.0),
            dots: Vec::new(),
            markers: Vec::new(),
            barres: Vec::new(),
            layout: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FretCircleLayout {
    pub rect: Rect,
}

/// Circle around a tablature fret mark.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FretCircle {
    pub layout: Option<FretCircleLayout>,
}
