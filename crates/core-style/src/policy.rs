//! Per-line drawing decisions.
//!
//! The painter asks these once per visible line on every repaint. They are
//! pure functions of their arguments and the current view style.

use core_surface::ColourRgba;

use crate::appearance::{CaretFlags, CaretShape, InsertCaret, WhiteSpace};
use crate::element::Element;
use crate::marker::{Layer, LineMarker, MarkerSymbol};
use crate::view_style::ViewStyle;

impl ViewStyle {
    /// Background overriding the default text background for a line.
    ///
    /// Checked in order, the first hit wins:
    /// 1. the caret line colour, when the line holds the caret, the caret
    ///    line is filled rather than framed, drawn on the base layer, and the
    ///    view is active or the caret line is always shown;
    /// 2. a background marker on the base layer;
    /// 3. a defined marker with no margin to show it (`mask_in_line`) on the
    ///    base layer.
    ///
    /// Within tiers 2 and 3 the lowest set marker bit has priority. This is a
    /// fixed contract: hosts that let the highest numbered marker win must
    /// renumber their markers instead of changing this order. The result is
    /// always opaque.
    pub fn background(
        &self,
        marks_of_line: u32,
        caret_active: bool,
        line_contains_caret: bool,
    ) -> Option<ColourRgba> {
        let caret_line = self.caret_line;
        let caret_line_back = (caret_line.frame == 0
            && (caret_active || caret_line.always_show)
            && caret_line.layer == Layer::Base
            && line_contains_caret)
            .then(|| self.element_colour(Element::CaretLineBack))
            .flatten();

        caret_line_back
            .or_else(|| {
                self.marker_background(marks_of_line, |marker| {
                    marker.symbol == MarkerSymbol::Background
                })
            })
            .or_else(|| self.marker_background(marks_of_line & self.layout.mask_in_line, |_| true))
            .map(ColourRgba::opaque)
    }

    fn marker_background(
        &self,
        marks: u32,
        qualifies: impl Fn(&LineMarker) -> bool,
    ) -> Option<ColourRgba> {
        if marks == 0 {
            return None;
        }
        self.markers
            .iter()
            .enumerate()
            .take(32)
            .filter(|(bit, _)| marks & (1u32 << bit) != 0)
            .map(|(_, marker)| marker)
            .find(|marker| marker.layer == Layer::Base && qualifies(marker))
            .map(|marker| marker.back)
    }

    /// Selection background is painted with the line background, not in a
    /// translucent pass over or under the text.
    pub fn selection_background_drawn(&self) -> bool {
        self.selection.layer == Layer::Base && self.element_colour(Element::SelectionBack).is_some()
    }

    /// Any selection text colour is set explicitly.
    pub fn selection_text_drawn(&self) -> bool {
        Element::SELECTION_TEXT
            .into_iter()
            .any(|element| self.element_is_set(element))
    }

    pub fn whitespace_background_drawn(&self) -> bool {
        self.view_whitespace != WhiteSpace::Invisible && self.element_is_set(Element::WhiteSpaceBack)
    }

    pub fn white_space_visible(&self, in_indent: bool) -> bool {
        match self.view_whitespace {
            WhiteSpace::VisibleAlways => true,
            WhiteSpace::VisibleAfterIndent => !in_indent,
            WhiteSpace::VisibleOnlyInIndent => in_indent,
            WhiteSpace::Invisible => false,
        }
    }

    /// Wrap indicators use the whitespace colour, else the default text colour.
    pub fn wrap_colour(&self) -> ColourRgba {
        self.element_colour(Element::WhiteSpace)
            .unwrap_or(self.styles.default_style().fore)
    }

    pub fn is_block_caret_style(&self) -> bool {
        self.caret.style.insert == InsertCaret::Block
            || self.caret.style.flags.contains(CaretFlags::OVERSTRIKE_BLOCK)
    }

    pub fn is_caret_visible(&self) -> bool {
        self.caret.width > 0 && self.caret.style.bits() != 0
    }

    /// Whether the caret is drawn inside a selection rather than being hidden
    /// by it.
    pub fn draw_caret_inside_selection(
        &self,
        in_overstrike: bool,
        ime_caret_block_override: bool,
    ) -> bool {
        let style = self.caret.style;
        if style.flags.contains(CaretFlags::BLOCK_AFTER) {
            return false;
        }
        style.insert == InsertCaret::Block
            || (in_overstrike && style.flags.contains(CaretFlags::OVERSTRIKE_BLOCK))
            || ime_caret_block_override
    }

    /// Overstrike draws a bar unless `OVERSTRIKE_BLOCK` asks for a block. An
    /// invisible caret stays invisible in both modes.
    pub fn caret_shape_for_mode(&self, in_overstrike: bool) -> CaretShape {
        let style = self.caret.style;
        match style.insert {
            InsertCaret::Invisible => CaretShape::Invisible,
            _ if in_overstrike => {
                if style.flags.contains(CaretFlags::OVERSTRIKE_BLOCK) {
                    CaretShape::Block
                } else {
                    CaretShape::Bar
                }
            }
            InsertCaret::Line => CaretShape::Line,
            InsertCaret::Block => CaretShape::Block,
        }
    }

    /// Caret line frame width in pixels: zero when the caret line is filled,
    /// otherwise at least 1 and at most a third of the line height.
    pub fn get_frame_width(&self) -> i32 {
        if self.caret_line.frame == 0 {
            return 0;
        }
        self.caret_line
            .frame
            .min(self.metrics.line_height / 3)
            .max(1)
    }

    pub fn is_line_frame_opaque(&self, caret_active: bool, line_contains_caret: bool) -> bool {
        self.caret_line.frame != 0
            && (caret_active || self.caret_line.always_show)
            && self.element_colour(Element::CaretLineBack).is_some()
            && self.caret_line.layer == Layer::Base
            && line_contains_caret
    }
}
