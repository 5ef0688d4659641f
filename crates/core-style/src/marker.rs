//! Line marker definitions.
//!
//! Markers are numbered 0..=31 and a line carries a 32-bit mask of the
//! markers set on it. The top seven numbers are reserved for folding.

use core_surface::ColourRgba;

pub const MARKER_MAX: usize = 31;
pub const MARKER_COUNT: usize = MARKER_MAX + 1;

/// Marker numbers reserved for fold symbols.
pub const MARKNUM_FOLDEREND: usize = 25;
pub const MARKNUM_FOLDEROPENMID: usize = 26;
pub const MARKNUM_FOLDERMIDTAIL: usize = 27;
pub const MARKNUM_FOLDERTAIL: usize = 28;
pub const MARKNUM_FOLDERSUB: usize = 29;
pub const MARKNUM_FOLDER: usize = 30;
pub const MARKNUM_FOLDEROPEN: usize = 31;

/// Bits of the fold markers.
pub const MASK_FOLDERS: u32 = 0xFE00_0000;

/// Where a translucent decoration is drawn relative to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layer {
    /// Opaque, drawn as the line background.
    #[default]
    Base,
    UnderText,
    OverText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerSymbol {
    Circle,
    RoundRect,
    Arrow,
    SmallRect,
    ShortArrow,
    /// Defined but draws nothing. Also the state of an undefined marker.
    #[default]
    Empty,
    ArrowDown,
    Minus,
    Plus,
    VLine,
    LCorner,
    TCorner,
    BoxPlus,
    BoxPlusConnected,
    BoxMinus,
    BoxMinusConnected,
    LCornerCurve,
    TCornerCurve,
    CirclePlus,
    CirclePlusConnected,
    CircleMinus,
    CircleMinusConnected,
    /// Fills the whole line background.
    Background,
    DotDotDot,
    Arrows,
    Pixmap {
        height: i32,
    },
    FullRect,
    LeftRect,
    Available,
    /// Underlines the whole line.
    Underline,
    RgbaImage {
        height: i32,
    },
    Bookmark,
    VerticalBookmark,
    Bar,
    Character(char),
}

impl MarkerSymbol {
    /// Natural height for image markers.
    pub fn image_height(self) -> Option<i32> {
        match self {
            MarkerSymbol::Pixmap { height } | MarkerSymbol::RgbaImage { height } => Some(height),
            _ => None,
        }
    }

    /// Markers that colour the text area itself rather than a margin glyph.
    pub fn draws_in_text(self) -> bool {
        matches!(self, MarkerSymbol::Background | MarkerSymbol::Underline)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineMarker {
    pub symbol: MarkerSymbol,
    pub fore: ColourRgba,
    pub back: ColourRgba,
    pub back_selected: ColourRgba,
    pub layer: Layer,
    pub stroke_width: f64,
}

impl Default for LineMarker {
    fn default() -> Self {
        Self {
            symbol: MarkerSymbol::Empty,
            fore: ColourRgba::BLACK,
            back: ColourRgba::WHITE,
            back_selected: ColourRgba::rgb(0xff, 0, 0),
            layer: Layer::Base,
            stroke_width: 1.0,
        }
    }
}

impl LineMarker {
    pub fn new(symbol: MarkerSymbol) -> Self {
        Self {
            symbol,
            ..Self::default()
        }
    }

    pub fn with_back(mut self, back: ColourRgba) -> Self {
        self.back = back;
        self
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }
}
