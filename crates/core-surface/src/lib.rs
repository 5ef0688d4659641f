//! Platform surface abstraction consumed by the view style.
//!
//! The styling layer never rasterises anything itself. It needs exactly two
//! things from the platform: a way to turn a font description into a font
//! handle, and measurements of that handle (ascent, descent, leading,
//! character widths). `Surface` is that capability set; each host backend
//! (GDI/DirectWrite, Cocoa, Cairo, a test double) implements it once.
//!
//! Ownership: a `Box<dyn Font>` returned from [`Surface::allocate_font`] is
//! owned by whoever requested it (the font registry of one view style) and
//! released when dropped. Handles are never shared between view styles.
//!
//! [`FixedPitchSurface`] is a deterministic implementation with synthetic
//! metrics, used by tests and by the `style-probe` binary.

use std::any::Any;
use std::fmt;

pub mod capabilities;
pub mod colour;
pub mod fixed;

pub use capabilities::PlatformDefaults;
pub use colour::{ColourRgba, ParseColourError, Point};
pub use fixed::{FixedPitchFont, FixedPitchSurface};

/// Font sizes travel through the style layer in hundredths of a point.
pub const FONT_SIZE_MULTIPLIER: i32 = 100;

/// Font weights on the usual 100..=900 scale.
pub const WEIGHT_NORMAL: i32 = 400;
pub const WEIGHT_SEMIBOLD: i32 = 600;
pub const WEIGHT_BOLD: i32 = 700;

pub const CHARSET_DEFAULT: i32 = 1;

/// Text rendering technology requested from the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Technology {
    #[default]
    Default,
    DirectWrite,
    DirectWriteRetain,
    DirectWriteDc,
}

/// Everything a platform needs to create a font.
#[derive(Debug, Clone, PartialEq)]
pub struct FontParameters {
    pub face_name: String,
    /// Device size in pixels after zoom.
    pub size: f64,
    pub weight: i32,
    pub italic: bool,
    pub extra_font_flag: i32,
    pub technology: Technology,
    pub character_set: i32,
    pub locale_name: String,
}

impl FontParameters {
    pub fn new(face_name: impl Into<String>, size: f64) -> Self {
        Self {
            face_name: face_name.into(),
            size,
            weight: WEIGHT_NORMAL,
            italic: false,
            extra_font_flag: 0,
            technology: Technology::Default,
            character_set: CHARSET_DEFAULT,
            locale_name: String::from("en-us"),
        }
    }
}

/// An opaque realised font owned by the caller of `allocate_font`.
pub trait Font: fmt::Debug {
    fn as_any(&self) -> &dyn Any;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("font `{name}` is not available")]
    FontUnavailable { name: String },
    #[error("surface backend failure: {0}")]
    Backend(String),
}

/// Font creation and measurement services of a platform drawing surface.
pub trait Surface {
    /// Create a platform font. May block briefly on the platform font system.
    fn allocate_font(&mut self, params: &FontParameters) -> Result<Box<dyn Font>, SurfaceError>;

    /// Converts a size in hundredths of a point to hundredths of a device pixel.
    fn device_height_font(&self, points: i32) -> i32;

    fn ascent(&self, font: &dyn Font) -> f64;

    fn descent(&self, font: &dyn Font) -> f64;

    fn internal_leading(&self, font: &dyn Font) -> f64;

    fn average_char_width(&self, font: &dyn Font) -> f64;

    /// Width of `text` drawn in `font`.
    fn width_text(&self, font: &dyn Font, text: &str) -> f64;
}
