//! Element identifiers and the layered element colour table.
//!
//! An element is a named colour slot (selection background, caret, caret
//! line, ...). Each element resolves through three tiers, in order:
//! an explicit colour set by the application, a base colour installed as a
//! default, and finally nothing at all. Callers must handle the unset case.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use core_surface::ColourRgba;
use tracing::trace;

/// Symbolic colour slots. Discriminants are the stable numeric ids used by
/// the host API; they are sparse on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i32)]
pub enum Element {
    List = 0,
    ListBack = 1,
    ListSelected = 2,
    ListSelectedBack = 3,
    SelectionText = 10,
    SelectionBack = 11,
    SelectionAdditionalText = 12,
    SelectionAdditionalBack = 13,
    SelectionSecondaryText = 14,
    SelectionSecondaryBack = 15,
    SelectionNoFocusText = 16,
    SelectionNoFocusBack = 17,
    Caret = 40,
    CaretAdditional = 41,
    CaretLineBack = 50,
    WhiteSpace = 60,
    WhiteSpaceBack = 61,
    HotSpotActive = 70,
    HotSpotActiveBack = 71,
    FoldLine = 80,
    HiddenLine = 81,
}

impl Element {
    pub const ALL: [Element; 21] = [
        Element::List,
        Element::ListBack,
        Element::ListSelected,
        Element::ListSelectedBack,
        Element::SelectionText,
        Element::SelectionBack,
        Element::SelectionAdditionalText,
        Element::SelectionAdditionalBack,
        Element::SelectionSecondaryText,
        Element::SelectionSecondaryBack,
        Element::SelectionNoFocusText,
        Element::SelectionNoFocusBack,
        Element::Caret,
        Element::CaretAdditional,
        Element::CaretLineBack,
        Element::WhiteSpace,
        Element::WhiteSpaceBack,
        Element::HotSpotActive,
        Element::HotSpotActiveBack,
        Element::FoldLine,
        Element::HiddenLine,
    ];

    /// The four selection text elements.
    pub const SELECTION_TEXT: [Element; 4] = [
        Element::SelectionText,
        Element::SelectionAdditionalText,
        Element::SelectionSecondaryText,
        Element::SelectionNoFocusText,
    ];

    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn from_id(id: i32) -> Option<Element> {
        Self::ALL.into_iter().find(|element| element.id() == id)
    }

    /// Kebab-case name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Element::List => "list",
            Element::ListBack => "list-back",
            Element::ListSelected => "list-selected",
            Element::ListSelectedBack => "list-selected-back",
            Element::SelectionText => "selection-text",
            Element::SelectionBack => "selection-back",
            Element::SelectionAdditionalText => "selection-additional-text",
            Element::SelectionAdditionalBack => "selection-additional-back",
            Element::SelectionSecondaryText => "selection-secondary-text",
            Element::SelectionSecondaryBack => "selection-secondary-back",
            Element::SelectionNoFocusText => "selection-no-focus-text",
            Element::SelectionNoFocusBack => "selection-no-focus-back",
            Element::Caret => "caret",
            Element::CaretAdditional => "caret-additional",
            Element::CaretLineBack => "caret-line-back",
            Element::WhiteSpace => "white-space",
            Element::WhiteSpaceBack => "white-space-back",
            Element::HotSpotActive => "hot-spot-active",
            Element::HotSpotActiveBack => "hot-spot-active-back",
            Element::FoldLine => "fold-line",
            Element::HiddenLine => "hidden-line",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown element `{0}`")]
pub struct UnknownElement(pub String);

impl FromStr for Element {
    type Err = UnknownElement;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|element| element.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownElement(s.to_string()))
    }
}

/// Which tier a lookup resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementTier {
    Explicit(ColourRgba),
    Base(ColourRgba),
    Unset,
}

impl ElementTier {
    pub fn colour(self) -> Option<ColourRgba> {
        match self {
            ElementTier::Explicit(colour) | ElementTier::Base(colour) => Some(colour),
            ElementTier::Unset => None,
        }
    }
}

/// Interprets the conventional "flag + packed RGB" pair: a zero flag means
/// no colour.
pub fn optional_colour(flag: usize, rgb: i32) -> Option<ColourRgba> {
    (flag != 0).then(|| ColourRgba::from_rgb(rgb))
}

/// Sparse explicit and base colour maps plus the translucency capability set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementColours {
    explicit: BTreeMap<Element, ColourRgba>,
    base: BTreeMap<Element, ColourRgba>,
    translucent: BTreeSet<Element>,
}

impl ElementColours {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, element: Element) -> ElementTier {
        if let Some(colour) = self.explicit.get(&element) {
            ElementTier::Explicit(*colour)
        } else if let Some(colour) = self.base.get(&element) {
            ElementTier::Base(*colour)
        } else {
            ElementTier::Unset
        }
    }

    pub fn colour(&self, element: Element) -> Option<ColourRgba> {
        self.lookup(element).colour()
    }

    /// Set the explicit colour. Reports a change when the element had no
    /// explicit colour or a different one.
    pub fn set(&mut self, element: Element, colour: ColourRgba) -> bool {
        let changed = self.explicit.insert(element, colour) != Some(colour);
        if changed {
            trace!(target: "style.elements", element = element.name(), colour = %colour, "element_set");
        }
        changed
    }

    /// Drop the explicit colour so lookups fall through to the base tier.
    pub fn reset(&mut self, element: Element) -> bool {
        self.explicit.remove(&element).is_some()
    }

    pub fn set_optional(&mut self, element: Element, colour: Option<ColourRgba>) -> bool {
        match colour {
            Some(colour) => self.set(element, colour),
            None => self.reset(element),
        }
    }

    /// Replace the RGB channels, keeping the alpha of the current resolved
    /// colour (transparent when unset).
    pub fn set_rgb(&mut self, element: Element, rgb: i32) {
        let alpha = self.colour(element).map_or(0, ColourRgba::alpha);
        self.explicit
            .insert(element, ColourRgba::from_rgb(rgb).with_alpha(alpha));
    }

    /// Replace the alpha channel of the current resolved colour. Values above
    /// 255 are capped.
    pub fn set_alpha(&mut self, element: Element, alpha: u32) {
        let current = self
            .colour(element)
            .unwrap_or(ColourRgba::new(0, 0, 0, 0));
        let alpha = u8::try_from(alpha).unwrap_or(u8::MAX);
        self.explicit.insert(element, current.with_alpha(alpha));
    }

    /// Whether an explicit colour is set, ignoring the base tier.
    pub fn is_set(&self, element: Element) -> bool {
        self.explicit.contains_key(&element)
    }

    pub fn set_base(&mut self, element: Element, colour: ColourRgba) -> bool {
        self.base.insert(element, colour) != Some(colour)
    }

    pub fn allows_translucent(&self, element: Element) -> bool {
        self.translucent.contains(&element)
    }

    pub(crate) fn allow_translucent(&mut self, elements: impl IntoIterator<Item = Element>) {
        self.translucent.extend(elements);
    }

    /// Explicitly set elements in id order.
    pub fn explicit(&self) -> impl Iterator<Item = (Element, ColourRgba)> + '_ {
        self.explicit.iter().map(|(element, colour)| (*element, *colour))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_tiers_in_order() {
        let mut colours = ElementColours::new();
        let base = ColourRgba::rgb(0xc0, 0xc0, 0xc0);
        let explicit = ColourRgba::rgb(0xff, 0, 0);

        assert_eq!(colours.lookup(Element::SelectionBack), ElementTier::Unset);
        colours.set_base(Element::SelectionBack, base);
        assert_eq!(colours.lookup(Element::SelectionBack), ElementTier::Base(base));
        colours.set(Element::SelectionBack, explicit);
        assert_eq!(
            colours.lookup(Element::SelectionBack),
            ElementTier::Explicit(explicit)
        );
        assert!(colours.reset(Element::SelectionBack));
        assert_eq!(colours.colour(Element::SelectionBack), Some(base));
        assert!(!colours.reset(Element::SelectionBack));
    }

    #[test]
    fn set_reports_change_only_on_difference() {
        let mut colours = ElementColours::new();
        let red = ColourRgba::rgb(0xff, 0, 0);
        assert!(colours.set(Element::Caret, red));
        assert!(!colours.set(Element::Caret, red));
        assert!(colours.set(Element::Caret, ColourRgba::BLACK));
        assert!(colours.set_base(Element::Caret, red));
        assert!(!colours.set_base(Element::Caret, red));
    }

    #[test]
    fn optional_colour_routes_to_set_or_reset() {
        let mut colours = ElementColours::new();
        assert_eq!(optional_colour(0, 0x123456), None);
        assert!(colours.set_optional(Element::WhiteSpace, optional_colour(1, 0x0000ff)));
        assert_eq!(
            colours.colour(Element::WhiteSpace),
            Some(ColourRgba::rgb(0xff, 0, 0))
        );
        assert!(colours.set_optional(Element::WhiteSpace, optional_colour(0, 0)));
        assert!(!colours.is_set(Element::WhiteSpace));
    }

    #[test]
    fn rgb_and_alpha_preserve_the_other_channel() {
        let mut colours = ElementColours::new();
        colours.set_base(Element::SelectionNoFocusBack, ColourRgba::new(0x80, 0x80, 0x80, 0x3f));
        colours.set_rgb(Element::SelectionNoFocusBack, 0x0000ff);
        assert_eq!(
            colours.colour(Element::SelectionNoFocusBack),
            Some(ColourRgba::new(0xff, 0, 0, 0x3f))
        );
        colours.set_alpha(Element::SelectionNoFocusBack, 1000);
        assert_eq!(
            colours.colour(Element::SelectionNoFocusBack),
            Some(ColourRgba::rgb(0xff, 0, 0))
        );

        colours.set_alpha(Element::HiddenLine, 0x40);
        assert_eq!(
            colours.colour(Element::HiddenLine),
            Some(ColourRgba::new(0, 0, 0, 0x40))
        );
    }

    #[test]
    fn names_and_ids_round_trip() {
        for element in Element::ALL {
            assert_eq!(Element::from_id(element.id()), Some(element));
            assert_eq!(element.name().parse::<Element>(), Ok(element));
        }
        assert_eq!(Element::from_id(5), None);
        assert!("nope".parse::<Element>().is_err());
    }
}
