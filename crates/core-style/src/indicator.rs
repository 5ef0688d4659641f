//! Indicator definitions: decorations drawn over ranges of text.

use bitflags::bitflags;
use core_surface::ColourRgba;

pub const INDICATOR_MAX: usize = 35;
pub const INDICATOR_COUNT: usize = INDICATOR_MAX + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndicatorStyle {
    #[default]
    Plain,
    Squiggle,
    TT,
    Diagonal,
    Strike,
    Hidden,
    Box,
    RoundBox,
    StraightBox,
    Dash,
    Dots,
    SquiggleLow,
    DotBox,
    SquigglePixmap,
    CompositionThick,
    CompositionThin,
    FullBox,
    TextFore,
    Point,
    PointCharacter,
    Gradient,
    GradientCentre,
    PointTop,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct IndicatorFlags: u32 {
        /// Take the foreground from the indicator value rather than the
        /// indicator colour.
        const VALUE_FORE = 0x1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorAppearance {
    pub style: IndicatorStyle,
    pub fore: ColourRgba,
}

impl IndicatorAppearance {
    pub const fn new(style: IndicatorStyle, fore: ColourRgba) -> Self {
        Self { style, fore }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Indicator {
    pub normal: IndicatorAppearance,
    pub hover: IndicatorAppearance,
    pub under: bool,
    pub fill_alpha: u8,
    pub outline_alpha: u8,
    pub flags: IndicatorFlags,
    pub stroke_width: f64,
}

impl Default for Indicator {
    fn default() -> Self {
        Self::new(IndicatorStyle::Plain, ColourRgba::BLACK)
    }
}

impl Indicator {
    pub fn new(style: IndicatorStyle, fore: ColourRgba) -> Self {
        let appearance = IndicatorAppearance::new(style, fore);
        Self {
            normal: appearance,
            hover: appearance,
            under: false,
            fill_alpha: 30,
            outline_alpha: 50,
            flags: IndicatorFlags::empty(),
            stroke_width: 1.0,
        }
    }

    /// Hover differs from normal, so the painter must track the pointer.
    pub fn is_dynamic(&self) -> bool {
        self.hover != self.normal
    }

    pub fn overrides_text_fore(&self) -> bool {
        self.normal.style == IndicatorStyle::TextFore || self.hover.style == IndicatorStyle::TextFore
    }

    /// Style and colour set together, keeping hover in step when it was
    /// tracking normal.
    pub fn set_normal(&mut self, appearance: IndicatorAppearance) {
        if !self.is_dynamic() {
            self.hover = appearance;
        }
        self.normal = appearance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_follows_until_diverged() {
        let mut indicator = Indicator::default();
        assert!(!indicator.is_dynamic());
        indicator.set_normal(IndicatorAppearance::new(IndicatorStyle::Box, ColourRgba::WHITE));
        assert_eq!(indicator.hover.style, IndicatorStyle::Box);

        indicator.hover = IndicatorAppearance::new(IndicatorStyle::FullBox, ColourRgba::WHITE);
        assert!(indicator.is_dynamic());
        indicator.set_normal(IndicatorAppearance::new(IndicatorStyle::Dots, ColourRgba::BLACK));
        assert_eq!(indicator.hover.style, IndicatorStyle::FullBox);
    }

    #[test]
    fn text_fore_in_either_state_overrides() {
        let mut indicator = Indicator::new(IndicatorStyle::Plain, ColourRgba::BLACK);
        assert!(!indicator.overrides_text_fore());
        indicator.hover.style = IndicatorStyle::TextFore;
        assert!(indicator.overrides_text_fore());
    }
}
