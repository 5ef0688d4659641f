//! Margin columns and the layout derived from them.
//!
//! Margins sit left to right before the text. Which markers draw where is
//! derived from the margin masks and marker symbols:
//! * `mask_in_line`: defined markers that no visible margin displays, so they
//!   fall back to colouring the text line.
//! * `mask_draw_in_text`: background and underline markers claimed by some
//!   margin mask; these always draw over the text area.

use core_surface::ColourRgba;
use tracing::trace;

use crate::marker::{LineMarker, MASK_FOLDERS, MarkerSymbol};

pub const MARGIN_MAX: usize = 4;
pub const MARGIN_COUNT: usize = MARGIN_MAX + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarginType {
    #[default]
    Symbol,
    Number,
    Back,
    Fore,
    Text,
    RText,
    Colour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarginCursor {
    Arrow,
    #[default]
    ReverseArrow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarginStyle {
    pub kind: MarginType,
    /// Used when `kind` is [`MarginType::Colour`].
    pub back: ColourRgba,
    pub width: i32,
    pub mask: u32,
    pub sensitive: bool,
    pub cursor: MarginCursor,
}

impl Default for MarginStyle {
    fn default() -> Self {
        Self::new(MarginType::Symbol, 0, 0)
    }
}

impl MarginStyle {
    pub fn new(kind: MarginType, width: i32, mask: u32) -> Self {
        Self {
            kind,
            back: ColourRgba::BLACK,
            width,
            mask,
            sensitive: false,
            cursor: MarginCursor::ReverseArrow,
        }
    }

    pub fn shows_folding(&self) -> bool {
        self.mask & MASK_FOLDERS != 0
    }
}

/// Values derived from the margin list. Only valid until a margin, marker or
/// padding setting changes; recompute with [`MarginLayout::calculate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarginLayout {
    /// Sum of all margin widths.
    pub fixed_column_width: i32,
    pub mask_in_line: u32,
    pub mask_draw_in_text: u32,
    /// X position where text starts within the view.
    pub text_start: i32,
}

impl Default for MarginLayout {
    fn default() -> Self {
        Self {
            fixed_column_width: 0,
            mask_in_line: u32::MAX,
            mask_draw_in_text: 0,
            text_start: 0,
        }
    }
}

impl MarginLayout {
    pub fn calculate(
        margins: &[MarginStyle],
        markers: &[LineMarker],
        margin_inside: bool,
        left_margin_width: i32,
    ) -> Self {
        let mut fixed_column_width = 0;
        let mut mask_in_line = u32::MAX;
        let mut mask_defined = 0u32;
        for margin in margins {
            fixed_column_width = margin.width.saturating_add(fixed_column_width);
            if margin.width > 0 {
                mask_in_line &= !margin.mask;
            }
            mask_defined |= margin.mask;
        }

        let mut mask_draw_in_text = 0u32;
        for (bit, marker) in markers.iter().enumerate().take(32) {
            let mask_bit = 1u32 << bit;
            match marker.symbol {
                MarkerSymbol::Empty => mask_in_line &= !mask_bit,
                MarkerSymbol::Background | MarkerSymbol::Underline => {
                    mask_in_line &= !mask_bit;
                    mask_draw_in_text |= mask_defined & mask_bit;
                }
                _ => {}
            }
        }

        let text_start = if margin_inside {
            fixed_column_width.saturating_add(left_margin_width)
        } else {
            left_margin_width
        };
        trace!(
            target: "style.margins",
            fixed_column_width,
            mask_in_line,
            mask_draw_in_text,
            text_start,
            "margin_layout"
        );
        Self {
            fixed_column_width,
            mask_in_line,
            mask_draw_in_text,
            text_start,
        }
    }
}

/// Index of the margin under `x`, with margins laid out from `origin`.
pub(crate) fn margin_at(margins: &[MarginStyle], origin: i32, x: f64) -> Option<usize> {
    let mut left = origin;
    let mut found = None;
    for (index, margin) in margins.iter().enumerate() {
        let right = left.saturating_add(margin.width);
        if x >= f64::from(left) && x < f64::from(right) {
            found = Some(index);
        }
        left = right;
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::MARKER_COUNT;

    fn markers() -> Vec<LineMarker> {
        vec![LineMarker::default(); MARKER_COUNT]
    }

    #[test]
    fn undefined_markers_never_draw_in_line() {
        let margins = [
            MarginStyle::new(MarginType::Symbol, 20, 0x1),
            MarginStyle::new(MarginType::Symbol, 16, 0x2),
        ];
        let layout = MarginLayout::calculate(&margins, &markers(), true, 1);
        assert_eq!(layout.fixed_column_width, 36);
        assert_eq!(layout.mask_in_line, 0);
        assert_eq!(layout.mask_draw_in_text, 0);
        assert_eq!(layout.text_start, 37);
    }

    #[test]
    fn oversized_margins_saturate_instead_of_overflowing() {
        let margins = [
            MarginStyle::new(MarginType::Number, i32::MAX, 0),
            MarginStyle::new(MarginType::Symbol, 16, 0x1),
        ];
        let layout = MarginLayout::calculate(&margins, &markers(), true, 1);
        assert_eq!(layout.fixed_column_width, i32::MAX);
        assert_eq!(layout.text_start, i32::MAX);
        assert_eq!(margin_at(&margins, 0, 10.0), Some(0));
        assert_eq!(margin_at(&margins, 0, f64::from(i32::MAX)), None);
    }

    #[test]
    fn defined_marker_without_margin_falls_back_to_line() {
        let mut markers = markers();
        markers[4] = LineMarker::new(MarkerSymbol::Circle);
        markers[0] = LineMarker::new(MarkerSymbol::Circle);
        let margins = [MarginStyle::new(MarginType::Symbol, 16, 0x1)];
        let layout = MarginLayout::calculate(&margins, &markers, false, 3);
        assert_eq!(layout.mask_in_line, 1 << 4);
        assert_eq!(layout.text_start, 3);
    }

    #[test]
    fn zero_width_margin_does_not_claim_its_mask() {
        let mut markers = markers();
        markers[1] = LineMarker::new(MarkerSymbol::Arrow);
        let margins = [MarginStyle::new(MarginType::Symbol, 0, 0x2)];
        let layout = MarginLayout::calculate(&margins, &markers, true, 0);
        assert_eq!(layout.mask_in_line, 0x2);
    }

    #[test]
    fn background_markers_draw_in_text_when_claimed() {
        let mut markers = markers();
        markers[0] = LineMarker::new(MarkerSymbol::Background);
        markers[1] = LineMarker::new(MarkerSymbol::Underline);
        let margins = [MarginStyle::new(MarginType::Symbol, 0, 0x1)];
        let layout = MarginLayout::calculate(&margins, &markers, true, 0);
        assert_eq!(layout.mask_draw_in_text, 0x1);
        assert_eq!(layout.mask_in_line, 0);
    }

    #[test]
    fn location_maps_to_margin() {
        let margins = [
            MarginStyle::new(MarginType::Number, 10, 0),
            MarginStyle::new(MarginType::Symbol, 0, 0),
            MarginStyle::new(MarginType::Symbol, 5, 0),
        ];
        assert_eq!(margin_at(&margins, 0, 0.0), Some(0));
        assert_eq!(margin_at(&margins, 0, 9.5), Some(0));
        assert_eq!(margin_at(&margins, 0, 10.0), Some(2));
        assert_eq!(margin_at(&margins, 0, 15.0), None);
        assert_eq!(margin_at(&margins, -15, -1.0), Some(2));
        assert_eq!(margin_at(&margins, 0, -1.0), None);
    }

    #[test]
    fn folding_margin_detected_by_mask() {
        assert!(MarginStyle::new(MarginType::Symbol, 16, MASK_FOLDERS).shows_folding());
        assert!(!MarginStyle::new(MarginType::Symbol, 16, !MASK_FOLDERS).shows_folding());
    }
}
