//! Style records and the style table.
//!
//! Indices below [`STYLE_DEFAULT`] are free for lexers; the range
//! `STYLE_DEFAULT..=STYLE_LAST_PREDEFINED` holds built-in styles; indices
//! from [`STYLE_EXTENDED_START`] up are handed out in contiguous blocks to
//! features (annotations, margins text) that need private styles.
//!
//! Invariants:
//! * The table never shrinks.
//! * New slots are copies of the default style.
//! * Extended blocks never overlap; releasing them is all-or-nothing.

use std::sync::Arc;

use ahash::AHashSet;
use core_surface::{ColourRgba, FONT_SIZE_MULTIPLIER, PlatformDefaults, WEIGHT_BOLD, WEIGHT_NORMAL};
use tracing::{info, warn};

use crate::StyleError;
use crate::font::{FontMeasurements, FontSpecification};

pub const STYLE_DEFAULT: usize = 32;
pub const STYLE_LINE_NUMBER: usize = 33;
pub const STYLE_BRACE_LIGHT: usize = 34;
pub const STYLE_BRACE_BAD: usize = 35;
pub const STYLE_CONTROL_CHAR: usize = 36;
pub const STYLE_INDENT_GUIDE: usize = 37;
pub const STYLE_CALL_TIP: usize = 38;
pub const STYLE_FOLD_DISPLAY_TEXT: usize = 39;
pub const STYLE_LAST_PREDEFINED: usize = 39;
pub const STYLE_MAX: usize = 255;
pub const STYLE_EXTENDED_START: usize = 256;
/// Hard ceiling on table growth; indices at or above this are rejected.
pub const STYLE_TABLE_LIMIT: usize = 1 << 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseForce {
    #[default]
    Mixed,
    Upper,
    Lower,
    Camel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub font: FontSpecification,
    pub fore: ColourRgba,
    pub back: ColourRgba,
    pub eol_filled: bool,
    pub underline: bool,
    pub case_force: CaseForce,
    pub visible: bool,
    pub changeable: bool,
    pub hotspot: bool,
    /// Copied from the realised font during refresh.
    pub measurements: FontMeasurements,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font: FontSpecification::default(),
            fore: ColourRgba::BLACK,
            back: ColourRgba::WHITE,
            eol_filled: false,
            underline: false,
            case_force: CaseForce::Mixed,
            visible: true,
            changeable: true,
            hotspot: false,
            measurements: FontMeasurements::default(),
        }
    }
}

impl Style {
    /// Make this style a copy of `source`.
    pub fn clear_to(&mut self, source: &Style) {
        self.clone_from(source);
    }

    pub fn is_protected(&self) -> bool {
        !(self.changeable && self.visible)
    }

    pub fn is_bold(&self) -> bool {
        self.font.weight > WEIGHT_NORMAL
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.font.weight = if bold { WEIGHT_BOLD } else { WEIGHT_NORMAL };
    }
}

/// Interned font names. Styles sharing a name share storage, and saving a
/// name never disturbs names already handed out.
#[derive(Debug, Default)]
pub struct FontNames {
    names: AHashSet<Arc<str>>,
}

impl FontNames {
    pub fn save(&mut self, name: &str) -> Arc<str> {
        if let Some(existing) = self.names.get(name) {
            return Arc::clone(existing);
        }
        let interned: Arc<str> = Arc::from(name);
        self.names.insert(Arc::clone(&interned));
        interned
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Dense, growable table of styles plus the extended-style high-water mark.
#[derive(Debug)]
pub struct StyleTable {
    styles: Vec<Style>,
    next_extended: usize,
    names: FontNames,
}

impl StyleTable {
    /// A table of `size` copies of the platform default style, at least
    /// large enough to hold the built-in range.
    pub fn new(size: usize, defaults: &PlatformDefaults) -> Self {
        let mut names = FontNames::default();
        let template = platform_default_style(&mut names, defaults);
        Self {
            styles: vec![template; size.clamp(STYLE_LAST_PREDEFINED + 1, STYLE_TABLE_LIMIT)],
            next_extended: STYLE_EXTENDED_START,
            names,
        }
    }

    /// Grow to at least `size`, forget extended blocks and the name pool, and
    /// restore the default style.
    pub fn init(&mut self, size: usize, defaults: &PlatformDefaults) {
        self.alloc(size.min(STYLE_TABLE_LIMIT));
        self.next_extended = STYLE_EXTENDED_START;
        self.names.clear();
        self.reset_default_style(defaults);
    }

    fn alloc(&mut self, size_new: usize) {
        if size_new <= self.styles.len() {
            return;
        }
        let template = self.default_style().clone();
        self.styles.resize(size_new, template);
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn valid_style(&self, index: usize) -> bool {
        index < self.styles.len()
    }

    /// Grow so that `index` is valid. Never shrinks.
    pub fn ensure_style(&mut self, index: usize) -> Result<(), StyleError> {
        if index >= STYLE_TABLE_LIMIT {
            return Err(StyleError::StyleOutOfRange {
                index,
                max: STYLE_TABLE_LIMIT - 1,
            });
        }
        if index >= self.styles.len() {
            self.alloc(index + 1);
        }
        Ok(())
    }

    pub fn default_style(&self) -> &Style {
        &self.styles[STYLE_DEFAULT]
    }

    pub fn try_get(&self, index: usize) -> Option<&Style> {
        self.styles.get(index)
    }

    /// The style at `index`, or the default style when the index is out of
    /// range.
    pub fn get(&self, index: usize) -> &Style {
        match self.styles.get(index) {
            Some(style) => style,
            None => {
                warn!(target: "style.table", index, len = self.styles.len(), "style_index_out_of_range");
                self.default_style()
            }
        }
    }

    /// Mutable access, growing the table if needed.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Style, StyleError> {
        self.ensure_style(index)?;
        Ok(&mut self.styles[index])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Style> {
        self.styles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Style> {
        self.styles.iter_mut()
    }

    /// Reserve `count` contiguous styles past the last extended block and
    /// return the first index. The block starts as copies of the default.
    pub fn allocate_extended_styles(&mut self, count: usize) -> Result<usize, StyleError> {
        let start = self.next_extended;
        let end = start
            .checked_add(count)
            .ok_or(StyleError::StyleOutOfRange {
                index: usize::MAX,
                max: STYLE_TABLE_LIMIT - 1,
            })?;
        self.ensure_style(end)?;
        self.next_extended = end;
        let template = self.default_style().clone();
        for style in &mut self.styles[start..end] {
            style.clear_to(&template);
        }
        info!(target: "style.table", start, count, "extended_styles_allocated");
        Ok(start)
    }

    /// Forget every extended block. Slots stay in the table and are handed
    /// out again from [`STYLE_EXTENDED_START`].
    pub fn release_all_extended_styles(&mut self) {
        self.next_extended = STYLE_EXTENDED_START;
    }

    pub fn next_extended_style(&self) -> usize {
        self.next_extended
    }

    /// Restore the default style to platform defaults.
    pub fn reset_default_style(&mut self, defaults: &PlatformDefaults) {
        self.styles[STYLE_DEFAULT] = platform_default_style(&mut self.names, defaults);
    }

    /// Make every style a copy of the default, keeping the table size (and so
    /// any allocated extended blocks), then reapply the built-in colours.
    pub fn clear_styles(&mut self, chrome: ColourRgba) {
        let template = self.default_style().clone();
        for (index, style) in self.styles.iter_mut().enumerate() {
            if index != STYLE_DEFAULT {
                style.clear_to(&template);
            }
        }
        self.styles[STYLE_LINE_NUMBER].back = chrome;
        self.styles[STYLE_CALL_TIP].back = ColourRgba::WHITE;
        self.styles[STYLE_CALL_TIP].fore = ColourRgba::rgb(0x80, 0x80, 0x80);
    }

    /// Set a style's font name through the name pool.
    pub fn set_font_name(&mut self, index: usize, name: &str) -> Result<bool, StyleError> {
        self.ensure_style(index)?;
        let interned = self.names.save(name);
        Ok(crate::change(&mut self.styles[index].font.font_name, Some(interned)))
    }

    pub fn font_names(&self) -> &FontNames {
        &self.names
    }
}

fn platform_default_style(names: &mut FontNames, defaults: &PlatformDefaults) -> Style {
    Style {
        font: FontSpecification {
            font_name: Some(names.save(&defaults.default_font)),
            size: defaults.default_font_size * FONT_SIZE_MULTIPLIER,
            ..FontSpecification::default()
        },
        ..Style::default()
    }
}

impl Clone for StyleTable {
    /// Names are re-interned into a fresh pool owned by the copy.
    fn clone(&self) -> Self {
        let mut names = FontNames::default();
        let styles = self
            .styles
            .iter()
            .map(|style| {
                let mut copy = style.clone();
                copy.font.font_name = style.font.name().map(|name| names.save(name));
                copy
            })
            .collect();
        Self {
            styles,
            next_extended: self.next_extended,
            names,
        }
    }
}
