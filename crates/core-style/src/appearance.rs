//! Appearance settings held by the view style: caret, caret line,
//! selection, whitespace, wrapping and annotations.

use bitflags::bitflags;

use crate::marker::Layer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionAppearance {
    pub layer: Layer,
    /// Extend the selection past the line end to the right border.
    pub eol_filled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaretLineAppearance {
    pub layer: Layer,
    /// Also show when the view does not have focus.
    pub always_show: bool,
    /// Non-zero: outline the line with a frame this many pixels wide instead
    /// of filling it.
    pub frame: i32,
}

/// Caret shape used in insert mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertCaret {
    Invisible,
    #[default]
    Line,
    Block,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CaretFlags: u32 {
        /// Overstrike mode draws a block instead of a bar.
        const OVERSTRIKE_BLOCK = 0x10;
        /// Terminal-style caret.
        const CURSES = 0x20;
        /// Block caret drawn after the selection rather than inside it.
        const BLOCK_AFTER = 0x100;
    }
}

const INSERT_MASK: u32 = 0xF;

/// Insert shape plus modifier flags; packs to the host integer encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaretStyle {
    pub insert: InsertCaret,
    pub flags: CaretFlags,
}

impl CaretStyle {
    pub const fn new(insert: InsertCaret, flags: CaretFlags) -> Self {
        Self { insert, flags }
    }

    /// Decode the packed form. Unknown insert values read as a line caret.
    pub fn from_bits(bits: u32) -> Self {
        let insert = match bits & INSERT_MASK {
            0 => InsertCaret::Invisible,
            2 => InsertCaret::Block,
            _ => InsertCaret::Line,
        };
        Self {
            insert,
            flags: CaretFlags::from_bits_truncate(bits),
        }
    }

    pub fn bits(self) -> u32 {
        let insert = match self.insert {
            InsertCaret::Invisible => 0,
            InsertCaret::Line => 1,
            InsertCaret::Block => 2,
        };
        insert | self.flags.bits()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretAppearance {
    pub style: CaretStyle,
    /// Width in pixels.
    pub width: i32,
}

impl Default for CaretAppearance {
    fn default() -> Self {
        Self {
            style: CaretStyle::default(),
            width: 1,
        }
    }
}

/// Shape the painter draws for the caret in the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretShape {
    Invisible,
    Line,
    Block,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhiteSpace {
    #[default]
    Invisible,
    VisibleAlways,
    VisibleAfterIndent,
    VisibleOnlyInIndent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabDrawMode {
    #[default]
    LongArrow,
    StrikeOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndentView {
    #[default]
    None,
    Real,
    LookForward,
    LookBoth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    #[default]
    None,
    Word,
    Character,
    Whitespace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapIndentMode {
    #[default]
    Fixed,
    Same,
    Indent,
    DeepIndent,
}

bitflags! {
    /// Where wrap indicators are shown.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct WrapVisualFlags: u32 {
        const END = 0x1;
        const START = 0x2;
        const MARGIN = 0x4;
    }
}

bitflags! {
    /// Whether wrap indicators sit next to the text instead of the border.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct WrapVisualLocation: u32 {
        const END_BY_TEXT = 0x1;
        const START_BY_TEXT = 0x2;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WrapAppearance {
    pub mode: WrapMode,
    pub visual_flags: WrapVisualFlags,
    pub visual_flags_location: WrapVisualLocation,
    /// Extra indentation of wrapped sublines, in average character widths.
    pub visual_start_indent: i32,
    pub indent_mode: WrapIndentMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnnotationVisible {
    #[default]
    Hidden,
    Standard,
    Boxed,
    Indented,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EolAnnotationVisible {
    #[default]
    Hidden,
    Standard,
    Boxed,
    Stadium,
    FlatCircle,
    AngleCircle,
    CircleFlat,
    Flats,
    AngleFlat,
    CircleAngle,
    Angles,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_style_packs_like_host_encoding() {
        let style = CaretStyle::new(InsertCaret::Block, CaretFlags::BLOCK_AFTER);
        assert_eq!(style.bits(), 0x102);
        assert_eq!(CaretStyle::from_bits(0x102), style);
        assert_eq!(CaretStyle::from_bits(0x11).flags, CaretFlags::OVERSTRIKE_BLOCK);
        assert_eq!(CaretStyle::from_bits(0x7).insert, InsertCaret::Line);
        assert_eq!(CaretStyle::from_bits(0).insert, InsertCaret::Invisible);
    }

    #[test]
    fn defaults_match_a_fresh_view() {
        assert_eq!(CaretAppearance::default().width, 1);
        assert_eq!(CaretAppearance::default().style.insert, InsertCaret::Line);
        assert_eq!(CaretLineAppearance::default().frame, 0);
        assert_eq!(WrapAppearance::default().mode, WrapMode::None);
    }
}
