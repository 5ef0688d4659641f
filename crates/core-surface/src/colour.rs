//! Packed RGBA colours and pixel points.
//!
//! Colours are stored the way platform surfaces exchange them: one `u32`
//! with red in the low byte and alpha in the high byte. A plain RGB integer
//! (`0x00bbggrr`) therefore converts with full alpha via [`ColourRgba::from_rgb`].

use std::fmt;
use std::str::FromStr;

const MAX_COMPONENT: u32 = 0xff;

/// An RGBA colour with 8 bits per component, unpremultiplied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct ColourRgba(u32);

impl ColourRgba {
    pub const BLACK: ColourRgba = ColourRgba::rgb(0, 0, 0);
    pub const WHITE: ColourRgba = ColourRgba::rgb(0xff, 0xff, 0xff);

    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self(red as u32 | (green as u32) << 8 | (blue as u32) << 16 | (alpha as u32) << 24)
    }

    /// Opaque colour from components.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, u8::MAX)
    }

    /// Opaque colour from a packed `0x00bbggrr` integer. Any alpha bits are ignored.
    pub const fn from_rgb(rgb: i32) -> Self {
        Self((rgb as u32 & 0x00ff_ffff) | MAX_COMPONENT << 24)
    }

    /// Colour from a packed `0xaabbggrr` value.
    pub const fn from_packed(packed: u32) -> Self {
        Self(packed)
    }

    pub const fn packed(self) -> u32 {
        self.0
    }

    /// The RGB part as a packed `0x00bbggrr` integer.
    pub const fn rgb_value(self) -> i32 {
        (self.0 & 0x00ff_ffff) as i32
    }

    pub const fn red(self) -> u8 {
        (self.0 & MAX_COMPONENT) as u8
    }

    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & MAX_COMPONENT) as u8
    }

    pub const fn blue(self) -> u8 {
        ((self.0 >> 16) & MAX_COMPONENT) as u8
    }

    pub const fn alpha(self) -> u8 {
        ((self.0 >> 24) & MAX_COMPONENT) as u8
    }

    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self((self.0 & 0x00ff_ffff) | (alpha as u32) << 24)
    }

    pub const fn opaque(self) -> Self {
        self.with_alpha(u8::MAX)
    }

    pub const fn is_opaque(self) -> bool {
        self.alpha() == u8::MAX
    }

    /// Component-wise average of two colours.
    pub const fn mixed_with(self, other: ColourRgba) -> Self {
        Self::new(
            mix(self.red(), other.red()),
            mix(self.green(), other.green()),
            mix(self.blue(), other.blue()),
            mix(self.alpha(), other.alpha()),
        )
    }
}

const fn mix(a: u8, b: u8) -> u8 {
    ((a as u16 + b as u16) / 2) as u8
}

impl fmt::Display for ColourRgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red(), self.green(), self.blue())?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.alpha())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid colour `{0}`: expected #rrggbb or #rrggbbaa")]
pub struct ParseColourError(pub String);

impl FromStr for ColourRgba {
    type Err = ParseColourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseColourError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let component = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let alpha = if hex.len() == 8 { component(6)? } else { u8::MAX };
        Ok(Self::new(component(0)?, component(2)?, component(4)?, alpha))
    }
}

/// A location in pixels relative to the view origin.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
