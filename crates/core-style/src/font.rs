//! Font specifications and the per-view font registry.
//!
//! Many styles usually share a handful of fonts, so realised fonts are keyed
//! by [`FontSpecification`] and created once per unique specification. The
//! registry is rebuilt from scratch on every refresh: zoom, technology and
//! locale all feed into realisation, and the refresh pass is the single
//! place those inputs change effect.

use std::collections::BTreeMap;
use std::sync::Arc;

use core_surface::{
    FONT_SIZE_MULTIPLIER, Font, FontParameters, Surface, Technology, WEIGHT_NORMAL,
};
use tracing::{trace, warn};

/// Identifies a font independently of any platform: name, size (hundredths
/// of a point), weight and modifiers. Ordering is total so it can key a map.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontSpecification {
    /// Interned name. `None` marks an unusable specification.
    pub font_name: Option<Arc<str>>,
    pub weight: i32,
    pub italic: bool,
    pub size: i32,
    pub character_set: i32,
    pub extra_font_flag: i32,
    pub check_monospaced: bool,
}

impl Default for FontSpecification {
    fn default() -> Self {
        Self {
            font_name: None,
            weight: WEIGHT_NORMAL,
            italic: false,
            size: 10 * FONT_SIZE_MULTIPLIER,
            character_set: core_surface::CHARSET_DEFAULT,
            extra_font_flag: 0,
            check_monospaced: false,
        }
    }
}

impl FontSpecification {
    pub fn name(&self) -> Option<&str> {
        self.font_name.as_deref()
    }
}

/// Measurements taken from a realised font.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FontMeasurements {
    pub ascent: u32,
    pub descent: u32,
    pub capital_height: f64,
    pub ave_char_width: f64,
    pub space_width: f64,
    pub size_zoomed: i32,
}

/// A platform font plus its measurements. Owned by exactly one registry
/// entry; re-measuring means realising again, never copying.
#[derive(Debug, Default)]
pub struct FontRealised {
    measurements: FontMeasurements,
    font: Option<Box<dyn Font>>,
}

impl FontRealised {
    pub fn measurements(&self) -> &FontMeasurements {
        &self.measurements
    }

    /// `None` when the platform could not create the font.
    pub fn font(&self) -> Option<&dyn Font> {
        self.font.as_deref()
    }

    pub fn is_null(&self) -> bool {
        self.font.is_none()
    }

    /// Create the platform font for `spec` and measure it. A failure leaves a
    /// null font with zeroed metrics.
    pub fn realise(
        &mut self,
        surface: &mut dyn Surface,
        zoom_level: i32,
        technology: Technology,
        spec: &FontSpecification,
        locale_name: &str,
    ) {
        let size_zoomed = spec
            .size
            .saturating_add(zoom_level.saturating_mul(FONT_SIZE_MULTIPLIER))
            .max(2 * FONT_SIZE_MULTIPLIER);
        let device_height = f64::from(surface.device_height_font(size_zoomed));
        let params = FontParameters {
            face_name: spec.name().unwrap_or_default().to_string(),
            size: device_height / f64::from(FONT_SIZE_MULTIPLIER),
            weight: spec.weight,
            italic: spec.italic,
            extra_font_flag: spec.extra_font_flag,
            technology,
            character_set: spec.character_set,
            locale_name: locale_name.to_string(),
        };

        match surface.allocate_font(&params) {
            Ok(font) => {
                let ascent = surface.ascent(font.as_ref());
                self.measurements = FontMeasurements {
                    ascent: ascent.max(0.0) as u32,
                    descent: surface.descent(font.as_ref()).max(0.0) as u32,
                    capital_height: ascent - surface.internal_leading(font.as_ref()),
                    ave_char_width: surface.average_char_width(font.as_ref()),
                    space_width: surface.width_text(font.as_ref(), " "),
                    size_zoomed,
                };
                self.font = Some(font);
            }
            Err(err) => {
                warn!(
                    target: "style.fonts",
                    face = params.face_name.as_str(),
                    size = params.size,
                    error = %err,
                    "font_realise_failed"
                );
                self.measurements = FontMeasurements {
                    size_zoomed,
                    ..FontMeasurements::default()
                };
                self.font = None;
            }
        }
    }
}

/// Realised fonts keyed by specification.
#[derive(Debug, Default)]
pub struct FontRegistry {
    fonts: BTreeMap<FontSpecification, FontRealised>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an unrealised entry for `spec` unless an equal one exists.
    /// Specifications without a name are ignored.
    pub fn create_and_add_font(&mut self, spec: &FontSpecification) {
        if spec.font_name.is_some() && !self.fonts.contains_key(spec) {
            self.fonts.insert(spec.clone(), FontRealised::default());
        }
    }

    /// Realise every entry against `surface`.
    pub fn realise_all(
        &mut self,
        surface: &mut dyn Surface,
        zoom_level: i32,
        technology: Technology,
        locale_name: &str,
    ) {
        for (spec, realised) in self.fonts.iter_mut() {
            realised.realise(surface, zoom_level, technology, spec, locale_name);
        }
        trace!(target: "style.fonts", count = self.fonts.len(), zoom_level, "fonts_realised");
    }

    /// The entry for `spec`. An unnamed specification resolves to an
    /// arbitrary (first) entry so that a style with a broken name still
    /// draws with some font.
    pub fn find(&self, spec: &FontSpecification) -> Option<&FontRealised> {
        if spec.font_name.is_none() {
            return self.fonts.values().next();
        }
        self.fonts.get(spec)
    }

    /// Largest ascent and descent over all entries, `(0, 0)` when empty.
    pub fn find_max_ascent_descent(&self) -> (u32, u32) {
        self.fonts
            .values()
            .fold((0, 0), |(ascent, descent), realised| {
                (
                    ascent.max(realised.measurements.ascent),
                    descent.max(realised.measurements.descent),
                )
            })
    }

    /// Release every platform font.
    pub fn clear(&mut self) {
        self.fonts.clear();
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FontSpecification, &FontRealised)> {
        self.fonts.iter()
    }
}
