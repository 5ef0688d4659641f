//! Deterministic surface with synthetic fixed-pitch metrics.
//!
//! Metrics are pure functions of the device pixel size so tests can predict
//! line heights and widths exactly:
//! * ascent = ceil(0.8 * size), descent = ceil(0.25 * size)
//! * internal leading = round(0.1 * size)
//! * every character advances round(0.6 * size)
//!
//! Names registered through [`FixedPitchSurface::with_unavailable`] fail to
//! allocate, which exercises the null-font path of the font registry.

use std::any::Any;

use tracing::trace;

use crate::{Font, FontParameters, Surface, SurfaceError};

const ASCENT_RATIO: f64 = 0.8;
const DESCENT_RATIO: f64 = 0.25;
const LEADING_RATIO: f64 = 0.1;
const ADVANCE_RATIO: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct FixedPitchFont {
    params: FontParameters,
}

impl FixedPitchFont {
    pub fn params(&self) -> &FontParameters {
        &self.params
    }

    fn advance(&self) -> f64 {
        (self.params.size * ADVANCE_RATIO).round()
    }
}

impl Font for FixedPitchFont {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone)]
pub struct FixedPitchSurface {
    dpi: i32,
    unavailable: Vec<String>,
    allocations: usize,
}

impl Default for FixedPitchSurface {
    fn default() -> Self {
        Self::new(96)
    }
}

impl FixedPitchSurface {
    pub fn new(dpi: i32) -> Self {
        Self {
            dpi: dpi.max(1),
            unavailable: Vec::new(),
            allocations: 0,
        }
    }

    /// Font names that will fail to allocate.
    pub fn with_unavailable<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unavailable.extend(names.into_iter().map(Into::into));
        self
    }

    /// Number of fonts allocated so far.
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    fn size_of(font: &dyn Font) -> f64 {
        font.as_any()
            .downcast_ref::<FixedPitchFont>()
            .map(|f| f.params.size)
            .unwrap_or(0.0)
    }
}

impl Surface for FixedPitchSurface {
    fn allocate_font(&mut self, params: &FontParameters) -> Result<Box<dyn Font>, SurfaceError> {
        if self.unavailable.iter().any(|n| *n == params.face_name) {
            return Err(SurfaceError::FontUnavailable {
                name: params.face_name.clone(),
            });
        }
        self.allocations += 1;
        trace!(target: "surface.fixed", face = params.face_name.as_str(), size = params.size, "allocate_font");
        Ok(Box::new(FixedPitchFont {
            params: params.clone(),
        }))
    }

    fn device_height_font(&self, points: i32) -> i32 {
        let dpi = i64::from(self.dpi);
        let device = (i64::from(points) * dpi + dpi / 2) / 72;
        device.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    fn ascent(&self, font: &dyn Font) -> f64 {
        (Self::size_of(font) * ASCENT_RATIO).ceil()
    }

    fn descent(&self, font: &dyn Font) -> f64 {
        (Self::size_of(font) * DESCENT_RATIO).ceil()
    }

    fn internal_leading(&self, font: &dyn Font) -> f64 {
        (Self::size_of(font) * LEADING_RATIO).round()
    }

    fn average_char_width(&self, font: &dyn Font) -> f64 {
        (Self::size_of(font) * ADVANCE_RATIO).round()
    }

    fn width_text(&self, font: &dyn Font, text: &str) -> f64 {
        let advance = font
            .as_any()
            .downcast_ref::<FixedPitchFont>()
            .map(FixedPitchFont::advance)
            .unwrap_or(0.0);
        advance * text.chars().count() as f64
    }
}
