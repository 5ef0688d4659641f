//! Platform defaults consulted when a view style is initialised.
//!
//! These are the handful of values a view style needs from the host before
//! any surface exists: the chrome colours used for margin backgrounds and the
//! default font. Detection runs once when the owning view is created; hosts
//! with a live theme can override the fields directly.

use crate::ColourRgba;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct PlatformDefaults {
    /// Background for the line number margin and the fold margin.
    pub chrome: ColourRgba,
    /// Checkerboard highlight in the fold margin.
    pub chrome_highlight: ColourRgba,
    pub default_font: String,
    /// Default font size in whole points.
    pub default_font_size: i32,
}

impl PlatformDefaults {
    pub fn detect() -> Self {
        let (default_font, default_font_size) = if cfg!(target_os = "macos") {
            ("Menlo", 11)
        } else if cfg!(target_os = "windows") {
            ("Verdana", 10)
        } else {
            ("Monospace", 10)
        };
        Self {
            chrome: ColourRgba::rgb(0xf0, 0xf0, 0xf0),
            chrome_highlight: ColourRgba::WHITE,
            default_font: default_font.to_string(),
            default_font_size,
        }
    }

    pub fn with_default_font(mut self, name: impl Into<String>, size: i32) -> Self {
        self.default_font = name.into();
        self.default_font_size = size;
        self
    }

    pub fn with_chrome(mut self, chrome: ColourRgba, chrome_highlight: ColourRgba) -> Self {
        self.chrome = chrome;
        self.chrome_highlight = chrome_highlight;
        self
    }
}

impl Default for PlatformDefaults {
    fn default() -> Self {
        Self::detect()
    }
}
