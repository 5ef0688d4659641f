//! View styling: everything the painter needs to know about how a document
//! looks, independent of the platform that draws it.
//!
//! A [`ViewStyle`] owns the style table (indexed by small integers, with
//! dynamically allocated extended ranges), the font registry that realises
//! each unique font specification through a [`core_surface::Surface`], the
//! sparse element colour table, margin and marker definitions, and the
//! scalar appearance settings (caret, caret line, selection, wrap, edges).
//!
//! Update discipline:
//! * Setters take effect immediately for subsequent reads and return whether
//!   the stored value actually changed so callers can skip a repaint.
//! * Derived metrics (line height, character widths, margin masks, text
//!   start) are only recomputed by [`ViewStyle::refresh`] or
//!   [`ViewStyle::calculate_margin_width_and_mask`]. Batches of setters pay
//!   the recomputation cost once.
//!
//! Error policy: queries are total. Reads with an out-of-range style index
//! fall back to the default style; font realisation failures degrade to a
//! null font with zero metrics. [`StyleError`] is only returned by mutators
//! asked to grow a table past its hard limit or to touch a margin, marker or
//! indicator slot that does not exist.
//!
//! Module map:
//! * `font`: font specifications, realised fonts, the registry.
//! * `style`: style records and the style table.
//! * `element`: element identifiers and the layered element colour table.
//! * `marker` / `indicator`: line marker and indicator definitions.
//! * `margin`: margin columns and the derived margin layout.
//! * `appearance` / `edge`: appearance settings value types.
//! * `view_style`: the aggregate and its mutators.
//! * `policy`: per-line drawing decisions consulted on every repaint.

pub mod appearance;
pub mod edge;
pub mod element;
pub mod font;
pub mod indicator;
pub mod margin;
pub mod marker;
pub mod policy;
pub mod style;
pub mod view_style;

pub use appearance::{
    AnnotationVisible, CaretAppearance, CaretFlags, CaretLineAppearance, CaretShape, CaretStyle,
    EolAnnotationVisible, IndentView, InsertCaret, SelectionAppearance, TabDrawMode, WhiteSpace,
    WrapAppearance, WrapIndentMode, WrapMode, WrapVisualFlags, WrapVisualLocation,
};
pub use edge::{EdgeMode, EdgeProperties};
pub use element::{Element, ElementColours, ElementTier, UnknownElement, optional_colour};
pub use font::{FontMeasurements, FontRealised, FontRegistry, FontSpecification};
pub use indicator::{Indicator, IndicatorAppearance, IndicatorFlags, IndicatorStyle};
pub use margin::{MarginCursor, MarginLayout, MarginStyle, MarginType};
pub use marker::{Layer, LineMarker, MarkerSymbol};
pub use style::{CaseForce, Style, StyleTable};
pub use view_style::{TextMetrics, ViewStyle};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    #[error("style index {index} exceeds the maximum of {max}")]
    StyleOutOfRange { index: usize, max: usize },
    #[error("margin {index} does not exist ({count} margins)")]
    MarginOutOfRange { index: usize, count: usize },
    #[error("marker {index} does not exist")]
    MarkerOutOfRange { index: usize },
    #[error("indicator {index} does not exist")]
    IndicatorOutOfRange { index: usize },
}

/// Stores `value` into `slot`, reporting whether it differed.
pub(crate) fn change<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
