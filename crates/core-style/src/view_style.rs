//! The view style aggregate.
//!
//! Setters are cheap and report whether the stored value changed. Derived
//! metrics are only brought up to date by [`ViewStyle::refresh`] (fonts,
//! line height, widths, margins) or
//! [`ViewStyle::calculate_margin_width_and_mask`] (margins only).

use core_surface::{ColourRgba, Font, PlatformDefaults, Point, Surface, Technology};
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::StyleError;
use crate::appearance::{
    AnnotationVisible, CaretAppearance, CaretLineAppearance, CaretStyle, EolAnnotationVisible,
    IndentView, SelectionAppearance, TabDrawMode, WhiteSpace, WrapAppearance, WrapIndentMode,
    WrapMode, WrapVisualFlags, WrapVisualLocation,
};
use crate::change;
use crate::edge::{EdgeMode, EdgeProperties};
use crate::element::{Element, ElementColours, ElementTier, optional_colour};
use crate::font::{FontRealised, FontRegistry};
use crate::indicator::{INDICATOR_COUNT, Indicator, IndicatorStyle};
use crate::margin::{MARGIN_COUNT, MarginCursor, MarginLayout, MarginStyle, MarginType, margin_at};
use crate::marker::{Layer, LineMarker, MARKER_COUNT, MASK_FOLDERS, MarkerSymbol};
use crate::style::{CaseForce, STYLE_CONTROL_CHAR, STYLE_LINE_NUMBER, STYLE_MAX, Style, StyleTable};

pub const ZOOM_MIN: i32 = -10;
pub const ZOOM_MAX: i32 = 60;
pub const LOCALE_DEFAULT: &str = "en-us";

/// Text metrics derived from the realised fonts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub line_height: i32,
    pub line_overlap: i32,
    pub max_ascent: u32,
    pub max_descent: u32,
    pub ave_char_width: f64,
    pub space_width: f64,
    pub tab_width: f64,
    pub control_char_width: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            line_height: 1,
            line_overlap: 0,
            max_ascent: 1,
            max_descent: 1,
            ave_char_width: 8.0,
            space_width: 8.0,
            tab_width: 64.0,
            control_char_width: 0.0,
        }
    }
}

/// Everything about how one view draws its document.
#[derive(Debug)]
pub struct ViewStyle {
    pub(crate) defaults: PlatformDefaults,
    pub(crate) styles: StyleTable,
    pub(crate) fonts: FontRegistry,
    pub(crate) markers: Vec<LineMarker>,
    pub(crate) largest_marker_height: i32,
    pub(crate) indicators: Vec<Indicator>,
    pub(crate) indicators_dynamic: bool,
    pub(crate) indicators_set_fore: bool,
    pub(crate) technology: Technology,
    pub(crate) metrics: TextMetrics,
    pub(crate) selection: SelectionAppearance,
    pub(crate) control_char_symbol: i32,
    pub(crate) selbar: ColourRgba,
    pub(crate) selbar_light: ColourRgba,
    pub(crate) fold_margin_colour: Option<ColourRgba>,
    pub(crate) fold_margin_highlight_colour: Option<ColourRgba>,
    pub(crate) hotspot_underline: bool,
    pub(crate) left_margin_width: i32,
    pub(crate) right_margin_width: i32,
    pub(crate) margins: Vec<MarginStyle>,
    pub(crate) margin_inside: bool,
    pub(crate) layout: MarginLayout,
    pub(crate) zoom_level: i32,
    pub(crate) view_whitespace: WhiteSpace,
    pub(crate) tab_draw_mode: TabDrawMode,
    pub(crate) whitespace_size: i32,
    pub(crate) view_indentation_guides: IndentView,
    pub(crate) view_eol: bool,
    pub(crate) caret: CaretAppearance,
    pub(crate) caret_line: CaretLineAppearance,
    pub(crate) some_styles_protected: bool,
    pub(crate) some_styles_force_case: bool,
    pub(crate) extra_font_flag: i32,
    pub(crate) extra_ascent: i32,
    pub(crate) extra_descent: i32,
    pub(crate) margin_style_offset: i32,
    pub(crate) annotation_visible: AnnotationVisible,
    pub(crate) annotation_style_offset: i32,
    pub(crate) eol_annotation_visible: EolAnnotationVisible,
    pub(crate) eol_annotation_style_offset: i32,
    pub(crate) brace_highlight_indicator: Option<usize>,
    pub(crate) brace_bad_light_indicator: Option<usize>,
    pub(crate) edge_mode: EdgeMode,
    pub(crate) edge: EdgeProperties,
    pub(crate) multi_edges: SmallVec<[EdgeProperties; 4]>,
    pub(crate) margin_number_padding: i32,
    pub(crate) ctrl_char_padding: i32,
    pub(crate) last_seg_italics_offset: i32,
    pub(crate) elements: ElementColours,
    pub(crate) wrap: WrapAppearance,
    pub(crate) locale_name: String,
}

impl Default for ViewStyle {
    fn default() -> Self {
        Self::new(PlatformDefaults::detect())
    }
}

impl ViewStyle {
    pub fn new(defaults: PlatformDefaults) -> Self {
        let styles = StyleTable::new(STYLE_MAX + 1, &defaults);
        Self::fresh(defaults, styles, FontRegistry::new())
    }

    /// Default state around an existing style table and font registry.
    fn fresh(defaults: PlatformDefaults, mut styles: StyleTable, fonts: FontRegistry) -> Self {
        if let Ok(line_number) = styles.get_mut(STYLE_LINE_NUMBER) {
            line_number.fore = ColourRgba::BLACK;
            line_number.back = defaults.chrome;
        }

        let mut indicators = vec![Indicator::default(); INDICATOR_COUNT];
        indicators[0] = Indicator::new(IndicatorStyle::Squiggle, ColourRgba::rgb(0, 0x7f, 0));
        indicators[1] = Indicator::new(IndicatorStyle::TT, ColourRgba::rgb(0, 0, 0xff));
        indicators[2] = Indicator::new(IndicatorStyle::Plain, ColourRgba::rgb(0xff, 0, 0));

        let mut margins = vec![MarginStyle::default(); MARGIN_COUNT];
        margins[0] = MarginStyle::new(MarginType::Number, 0, 0);
        margins[1] = MarginStyle::new(MarginType::Symbol, 16, !MASK_FOLDERS);

        let markers = vec![LineMarker::default(); MARKER_COUNT];
        let margin_inside = true;
        let left_margin_width = 1;
        let layout = MarginLayout::calculate(&margins, &markers, margin_inside, left_margin_width);

        Self {
            selbar: defaults.chrome,
            selbar_light: defaults.chrome_highlight,
            defaults,
            styles,
            fonts,
            markers,
            largest_marker_height: 0,
            indicators,
            indicators_dynamic: false,
            indicators_set_fore: false,
            technology: Technology::Default,
            metrics: TextMetrics::default(),
            selection: SelectionAppearance::default(),
            control_char_symbol: 0,
            fold_margin_colour: None,
            fold_margin_highlight_colour: None,
            hotspot_underline: true,
            left_margin_width,
            right_margin_width: 1,
            margins,
            margin_inside,
            layout,
            zoom_level: 0,
            view_whitespace: WhiteSpace::Invisible,
            tab_draw_mode: TabDrawMode::LongArrow,
            whitespace_size: 1,
            view_indentation_guides: IndentView::None,
            view_eol: false,
            caret: CaretAppearance::default(),
            caret_line: CaretLineAppearance::default(),
            some_styles_protected: false,
            some_styles_force_case: false,
            extra_font_flag: 0,
            extra_ascent: 0,
            extra_descent: 0,
            margin_style_offset: 0,
            annotation_visible: AnnotationVisible::Hidden,
            annotation_style_offset: 0,
            eol_annotation_visible: EolAnnotationVisible::Hidden,
            eol_annotation_style_offset: 0,
            brace_highlight_indicator: None,
            brace_bad_light_indicator: None,
            edge_mode: EdgeMode::None,
            edge: EdgeProperties::new(0, ColourRgba::rgb(0xc0, 0xc0, 0xc0)),
            multi_edges: SmallVec::new(),
            margin_number_padding: 3,
            ctrl_char_padding: 3,
            last_seg_italics_offset: 2,
            elements: default_elements(),
            wrap: WrapAppearance::default(),
            locale_name: LOCALE_DEFAULT.to_string(),
        }
    }

    /// Reset every setting to its default and make sure at least
    /// `styles_size` styles exist. Style contents other than the default
    /// style are kept; extended blocks are forgotten.
    pub fn init(&mut self, styles_size: usize) {
        let defaults = self.defaults.clone();
        let mut styles = std::mem::replace(&mut self.styles, StyleTable::new(0, &defaults));
        styles.init(styles_size, &defaults);
        let fonts = std::mem::take(&mut self.fonts);
        *self = Self::fresh(defaults, styles, fonts);
    }

    /// Recompute every derived metric. Fonts are dropped and realised again
    /// through `surface`, so this must follow any change to style fonts, zoom,
    /// technology or locale.
    pub fn refresh(&mut self, surface: &mut dyn Surface, tab_in_chars: i32) {
        self.fonts.clear();

        self.selbar = self.defaults.chrome;
        self.selbar_light = self.defaults.chrome_highlight;

        for style in self.styles.iter_mut() {
            style.font.extra_font_flag = self.extra_font_flag;
        }

        self.fonts
            .create_and_add_font(&self.styles.default_style().font);
        for style in self.styles.iter() {
            self.fonts.create_and_add_font(&style.font);
        }
        self.fonts
            .realise_all(surface, self.zoom_level, self.technology, &self.locale_name);

        for style in self.styles.iter_mut() {
            style.measurements = self
                .fonts
                .find(&style.font)
                .map(|realised| *realised.measurements())
                .unwrap_or_default();
        }

        self.indicators_dynamic = self.indicators.iter().any(Indicator::is_dynamic);
        self.indicators_set_fore = self.indicators.iter().any(Indicator::overrides_text_fore);

        let (font_ascent, font_descent) = self.fonts.find_max_ascent_descent();
        let max_ascent = with_extra(font_ascent.max(1), self.extra_ascent);
        let max_descent = with_extra(font_descent.max(1), self.extra_descent);
        let line_height = i32::try_from(max_ascent + max_descent).unwrap_or(i32::MAX);
        let line_overlap = (line_height / 10).max(2).min(line_height);

        self.some_styles_protected = self.styles.iter().any(Style::is_protected);
        self.some_styles_force_case = self
            .styles
            .iter()
            .any(|style| style.case_force != CaseForce::Mixed);

        let default_metrics = self.styles.default_style().measurements;
        let control_char_width = self.measure_control_char(surface);

        self.metrics = TextMetrics {
            line_height,
            line_overlap,
            max_ascent,
            max_descent,
            ave_char_width: default_metrics.ave_char_width,
            space_width: default_metrics.space_width,
            tab_width: default_metrics.space_width * f64::from(tab_in_chars),
            control_char_width,
        };

        self.calculate_margin_width_and_mask();
        debug!(
            target: "style.fonts",
            fonts = self.fonts.len(),
            line_height,
            max_ascent,
            max_descent,
            space_width = default_metrics.space_width,
            text_start = self.layout.text_start,
            "view_style_refreshed"
        );
    }

    fn measure_control_char(&self, surface: &dyn Surface) -> f64 {
        if self.control_char_symbol < 32 {
            return 0.0;
        }
        let symbol = u32::try_from(self.control_char_symbol)
            .ok()
            .and_then(char::from_u32);
        match (symbol, self.font_for_style(STYLE_CONTROL_CHAR)) {
            (Some(symbol), Some(font)) => surface.width_text(font, symbol.encode_utf8(&mut [0; 4])),
            _ => 0.0,
        }
    }

    pub fn metrics(&self) -> &TextMetrics {
        &self.metrics
    }

    pub fn line_height(&self) -> i32 {
        self.metrics.line_height
    }

    pub fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    /// Realised font for a style, `None` before the first refresh or when the
    /// platform could not create it.
    pub fn font_for_style(&self, index: usize) -> Option<&dyn Font> {
        self.fonts
            .find(&self.styles.get(index).font)
            .and_then(FontRealised::font)
    }

    pub fn platform_defaults(&self) -> &PlatformDefaults {
        &self.defaults
    }

    // Styles.

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// The style at `index`, or the default style when out of range.
    pub fn style(&self, index: usize) -> &Style {
        self.styles.get(index)
    }

    pub fn valid_style(&self, index: usize) -> bool {
        self.styles.valid_style(index)
    }

    pub fn ensure_style(&mut self, index: usize) -> Result<(), StyleError> {
        self.styles.ensure_style(index)
    }

    /// Mutable access to a style, growing the table when needed. Font name
    /// changes must go through [`ViewStyle::set_style_font_name`].
    pub fn style_mut(&mut self, index: usize) -> Result<&mut Style, StyleError> {
        self.styles.get_mut(index)
    }

    pub fn allocate_extended_styles(&mut self, count: usize) -> Result<usize, StyleError> {
        self.styles.allocate_extended_styles(count)
    }

    pub fn release_all_extended_styles(&mut self) {
        self.styles.release_all_extended_styles();
    }

    pub fn reset_default_style(&mut self) {
        self.styles.reset_default_style(&self.defaults);
    }

    pub fn clear_styles(&mut self) {
        self.styles.clear_styles(self.defaults.chrome);
    }

    pub fn set_style_font_name(&mut self, index: usize, name: &str) -> Result<bool, StyleError> {
        self.styles.set_font_name(index, name)
    }

    fn set_style_field<T: PartialEq>(
        &mut self,
        index: usize,
        value: T,
        field: impl FnOnce(&mut Style) -> &mut T,
    ) -> Result<bool, StyleError> {
        let style = self.styles.get_mut(index)?;
        Ok(change(field(style), value))
    }

    pub fn set_style_fore(&mut self, index: usize, fore: ColourRgba) -> Result<bool, StyleError> {
        self.set_style_field(index, fore, |style| &mut style.fore)
    }

    pub fn set_style_back(&mut self, index: usize, back: ColourRgba) -> Result<bool, StyleError> {
        self.set_style_field(index, back, |style| &mut style.back)
    }

    /// Size in hundredths of a point.
    pub fn set_style_size(&mut self, index: usize, size: i32) -> Result<bool, StyleError> {
        self.set_style_field(index, size, |style| &mut style.font.size)
    }

    pub fn set_style_weight(&mut self, index: usize, weight: i32) -> Result<bool, StyleError> {
        self.set_style_field(index, weight, |style| &mut style.font.weight)
    }

    pub fn set_style_italic(&mut self, index: usize, italic: bool) -> Result<bool, StyleError> {
        self.set_style_field(index, italic, |style| &mut style.font.italic)
    }

    pub fn set_style_character_set(
        &mut self,
        index: usize,
        character_set: i32,
    ) -> Result<bool, StyleError> {
        self.set_style_field(index, character_set, |style| &mut style.font.character_set)
    }

    pub fn set_style_check_monospaced(
        &mut self,
        index: usize,
        check: bool,
    ) -> Result<bool, StyleError> {
        self.set_style_field(index, check, |style| &mut style.font.check_monospaced)
    }

    pub fn set_style_underline(&mut self, index: usize, underline: bool) -> Result<bool, StyleError> {
        self.set_style_field(index, underline, |style| &mut style.underline)
    }

    pub fn set_style_eol_filled(&mut self, index: usize, filled: bool) -> Result<bool, StyleError> {
        self.set_style_field(index, filled, |style| &mut style.eol_filled)
    }

    pub fn set_style_case(
        &mut self,
        index: usize,
        case_force: CaseForce,
    ) -> Result<bool, StyleError> {
        self.set_style_field(index, case_force, |style| &mut style.case_force)
    }

    pub fn set_style_visible(&mut self, index: usize, visible: bool) -> Result<bool, StyleError> {
        self.set_style_field(index, visible, |style| &mut style.visible)
    }

    pub fn set_style_changeable(
        &mut self,
        index: usize,
        changeable: bool,
    ) -> Result<bool, StyleError> {
        self.set_style_field(index, changeable, |style| &mut style.changeable)
    }

    pub fn set_style_hotspot(&mut self, index: usize, hotspot: bool) -> Result<bool, StyleError> {
        self.set_style_field(index, hotspot, |style| &mut style.hotspot)
    }

    /// Whether any style was protected at the last refresh.
    pub fn protection_active(&self) -> bool {
        self.some_styles_protected
    }

    /// Whether any style forced case at the last refresh.
    pub fn some_styles_force_case(&self) -> bool {
        self.some_styles_force_case
    }

    // Elements.

    pub fn elements(&self) -> &ElementColours {
        &self.elements
    }

    pub fn element_colour(&self, element: Element) -> Option<ColourRgba> {
        self.elements.colour(element)
    }

    pub fn element_tier(&self, element: Element) -> ElementTier {
        self.elements.lookup(element)
    }

    pub fn element_allows_translucent(&self, element: Element) -> bool {
        self.elements.allows_translucent(element)
    }

    pub fn reset_element(&mut self, element: Element) -> bool {
        self.elements.reset(element)
    }

    pub fn set_element_colour(&mut self, element: Element, colour: ColourRgba) -> bool {
        self.elements.set(element, colour)
    }

    /// Host convention: a zero `flag` clears the colour, otherwise `rgb` is an
    /// opaque packed RGB value.
    pub fn set_element_colour_optional(&mut self, element: Element, flag: usize, rgb: i32) -> bool {
        self.elements
            .set_optional(element, optional_colour(flag, rgb))
    }

    pub fn set_element_rgb(&mut self, element: Element, rgb: i32) {
        self.elements.set_rgb(element, rgb);
    }

    pub fn set_element_alpha(&mut self, element: Element, alpha: u32) {
        self.elements.set_alpha(element, alpha);
    }

    pub fn element_is_set(&self, element: Element) -> bool {
        self.elements.is_set(element)
    }

    pub fn set_element_base(&mut self, element: Element, colour: ColourRgba) -> bool {
        self.elements.set_base(element, colour)
    }

    // Margins.

    pub fn margins(&self) -> &[MarginStyle] {
        &self.margins
    }

    pub fn margin(&self, index: usize) -> Option<&MarginStyle> {
        self.margins.get(index)
    }

    /// Grow or shrink the margin list. New margins are empty symbol margins.
    pub fn set_margin_count(&mut self, count: usize) -> bool {
        if count == self.margins.len() {
            return false;
        }
        self.margins.resize(count, MarginStyle::default());
        true
    }

    fn set_margin_field<T: PartialEq>(
        &mut self,
        index: usize,
        value: T,
        field: impl FnOnce(&mut MarginStyle) -> &mut T,
    ) -> Result<bool, StyleError> {
        let count = self.margins.len();
        let margin = self
            .margins
            .get_mut(index)
            .ok_or(StyleError::MarginOutOfRange { index, count })?;
        Ok(change(field(margin), value))
    }

    pub fn set_margin_type(&mut self, index: usize, kind: MarginType) -> Result<bool, StyleError> {
        self.set_margin_field(index, kind, |margin| &mut margin.kind)
    }

    pub fn set_margin_width(&mut self, index: usize, width: i32) -> Result<bool, StyleError> {
        self.set_margin_field(index, width.max(0), |margin| &mut margin.width)
    }

    pub fn set_margin_mask(&mut self, index: usize, mask: u32) -> Result<bool, StyleError> {
        self.set_margin_field(index, mask, |margin| &mut margin.mask)
    }

    pub fn set_margin_sensitive(&mut self, index: usize, sensitive: bool) -> Result<bool, StyleError> {
        self.set_margin_field(index, sensitive, |margin| &mut margin.sensitive)
    }

    pub fn set_margin_cursor(
        &mut self,
        index: usize,
        cursor: MarginCursor,
    ) -> Result<bool, StyleError> {
        self.set_margin_field(index, cursor, |margin| &mut margin.cursor)
    }

    pub fn set_margin_back(&mut self, index: usize, back: ColourRgba) -> Result<bool, StyleError> {
        self.set_margin_field(index, back, |margin| &mut margin.back)
    }

    pub fn left_margin_width(&self) -> i32 {
        self.left_margin_width
    }

    pub fn set_left_margin_width(&mut self, width: i32) -> bool {
        change(&mut self.left_margin_width, width.max(0))
    }

    pub fn right_margin_width(&self) -> i32 {
        self.right_margin_width
    }

    pub fn set_right_margin_width(&mut self, width: i32) -> bool {
        change(&mut self.right_margin_width, width.max(0))
    }

    pub fn margin_inside(&self) -> bool {
        self.margin_inside
    }

    pub fn set_margin_inside(&mut self, inside: bool) -> bool {
        change(&mut self.margin_inside, inside)
    }

    /// Recompute the margin layout from the margin list and marker symbols.
    pub fn calculate_margin_width_and_mask(&mut self) {
        self.layout = MarginLayout::calculate(
            &self.margins,
            &self.markers,
            self.margin_inside,
            self.left_margin_width,
        );
    }

    pub fn layout(&self) -> &MarginLayout {
        &self.layout
    }

    pub fn fixed_column_width(&self) -> i32 {
        self.layout.fixed_column_width
    }

    pub fn mask_in_line(&self) -> u32 {
        self.layout.mask_in_line
    }

    pub fn mask_draw_in_text(&self) -> u32 {
        self.layout.mask_draw_in_text
    }

    pub fn text_start(&self) -> i32 {
        self.layout.text_start
    }

    /// Width of margins drawn outside the text view; zero when they are
    /// inside it.
    pub fn external_margin_width(&self) -> i32 {
        if self.margin_inside {
            0
        } else {
            self.layout.fixed_column_width
        }
    }

    /// Margin under `pt`, `None` when the point is in the text area.
    pub fn margin_from_location(&self, pt: Point) -> Option<usize> {
        let origin = if self.margin_inside {
            0
        } else {
            -self.layout.fixed_column_width
        };
        margin_at(&self.margins, origin, pt.x)
    }

    // Markers.

    pub fn markers(&self) -> &[LineMarker] {
        &self.markers
    }

    pub fn marker(&self, index: usize) -> Option<&LineMarker> {
        self.markers.get(index)
    }

    fn marker_mut(&mut self, index: usize) -> Result<&mut LineMarker, StyleError> {
        self.markers
            .get_mut(index)
            .ok_or(StyleError::MarkerOutOfRange { index })
    }

    /// Replace a marker definition. Image heights are folded into the
    /// largest marker height immediately.
    pub fn set_marker(&mut self, index: usize, marker: LineMarker) -> Result<bool, StyleError> {
        let changed = change(self.marker_mut(index)?, marker);
        if changed {
            self.calc_largest_marker_height();
        }
        Ok(changed)
    }

    pub fn define_marker(&mut self, index: usize, symbol: MarkerSymbol) -> Result<bool, StyleError> {
        let changed = change(&mut self.marker_mut(index)?.symbol, symbol);
        if changed {
            self.calc_largest_marker_height();
        }
        Ok(changed)
    }

    pub fn set_marker_fore(&mut self, index: usize, fore: ColourRgba) -> Result<bool, StyleError> {
        Ok(change(&mut self.marker_mut(index)?.fore, fore))
    }

    pub fn set_marker_back(&mut self, index: usize, back: ColourRgba) -> Result<bool, StyleError> {
        Ok(change(&mut self.marker_mut(index)?.back, back))
    }

    pub fn set_marker_back_selected(
        &mut self,
        index: usize,
        back: ColourRgba,
    ) -> Result<bool, StyleError> {
        Ok(change(&mut self.marker_mut(index)?.back_selected, back))
    }

    pub fn set_marker_layer(&mut self, index: usize, layer: Layer) -> Result<bool, StyleError> {
        Ok(change(&mut self.marker_mut(index)?.layer, layer))
    }

    pub fn set_marker_stroke_width(&mut self, index: usize, width: f64) -> Result<bool, StyleError> {
        Ok(change(&mut self.marker_mut(index)?.stroke_width, width))
    }

    /// Tallest image marker; other symbols have no natural height.
    pub fn calc_largest_marker_height(&mut self) {
        self.largest_marker_height = self
            .markers
            .iter()
            .filter_map(|marker| marker.symbol.image_height())
            .fold(0, i32::max);
    }

    pub fn largest_marker_height(&self) -> i32 {
        self.largest_marker_height
    }

    // Indicators.

    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    pub fn indicator(&self, index: usize) -> Option<&Indicator> {
        self.indicators.get(index)
    }

    pub fn indicator_mut(&mut self, index: usize) -> Result<&mut Indicator, StyleError> {
        self.indicators
            .get_mut(index)
            .ok_or(StyleError::IndicatorOutOfRange { index })
    }

    pub fn set_indicator(&mut self, index: usize, indicator: Indicator) -> Result<bool, StyleError> {
        Ok(change(self.indicator_mut(index)?, indicator))
    }

    /// Any indicator with a distinct hover appearance, as of the last refresh.
    pub fn indicators_dynamic(&self) -> bool {
        self.indicators_dynamic
    }

    /// Any indicator that recolours text, as of the last refresh.
    pub fn indicators_set_fore(&self) -> bool {
        self.indicators_set_fore
    }

    pub fn brace_highlight_indicator(&self) -> Option<usize> {
        self.brace_highlight_indicator
    }

    pub fn set_brace_highlight_indicator(
        &mut self,
        indicator: Option<usize>,
    ) -> Result<bool, StyleError> {
        check_indicator(indicator)?;
        Ok(change(&mut self.brace_highlight_indicator, indicator))
    }

    pub fn brace_bad_light_indicator(&self) -> Option<usize> {
        self.brace_bad_light_indicator
    }

    pub fn set_brace_bad_light_indicator(
        &mut self,
        indicator: Option<usize>,
    ) -> Result<bool, StyleError> {
        check_indicator(indicator)?;
        Ok(change(&mut self.brace_bad_light_indicator, indicator))
    }

    // Font realisation inputs. Changes take effect at the next refresh.

    pub fn zoom_level(&self) -> i32 {
        self.zoom_level
    }

    pub fn set_zoom_level(&mut self, zoom_level: i32) -> bool {
        let clamped = zoom_level.clamp(ZOOM_MIN, ZOOM_MAX);
        if clamped != zoom_level {
            info!(target: "style.fonts", requested = zoom_level, clamped, "zoom_clamped");
        }
        change(&mut self.zoom_level, clamped)
    }

    pub fn technology(&self) -> Technology {
        self.technology
    }

    pub fn set_technology(&mut self, technology: Technology) -> bool {
        change(&mut self.technology, technology)
    }

    pub fn locale_name(&self) -> &str {
        &self.locale_name
    }

    pub fn set_font_locale_name(&mut self, name: &str) -> bool {
        if self.locale_name == name {
            return false;
        }
        self.locale_name = name.to_string();
        true
    }

    pub fn extra_font_flag(&self) -> i32 {
        self.extra_font_flag
    }

    pub fn set_extra_font_flag(&mut self, flag: i32) -> bool {
        change(&mut self.extra_font_flag, flag)
    }

    pub fn extra_ascent(&self) -> i32 {
        self.extra_ascent
    }

    pub fn set_extra_ascent(&mut self, extra: i32) -> bool {
        change(&mut self.extra_ascent, extra)
    }

    pub fn extra_descent(&self) -> i32 {
        self.extra_descent
    }

    pub fn set_extra_descent(&mut self, extra: i32) -> bool {
        change(&mut self.extra_descent, extra)
    }

    pub fn control_char_symbol(&self) -> i32 {
        self.control_char_symbol
    }

    /// Below 32 control characters draw as mnemonics; otherwise as this
    /// character.
    pub fn set_control_char_symbol(&mut self, symbol: i32) -> bool {
        change(&mut self.control_char_symbol, symbol)
    }

    // Selection, caret and caret line.

    pub fn selection(&self) -> SelectionAppearance {
        self.selection
    }

    pub fn set_selection_layer(&mut self, layer: Layer) -> bool {
        change(&mut self.selection.layer, layer)
    }

    pub fn set_selection_eol_filled(&mut self, filled: bool) -> bool {
        change(&mut self.selection.eol_filled, filled)
    }

    pub fn caret(&self) -> CaretAppearance {
        self.caret
    }

    pub fn set_caret_style(&mut self, style: CaretStyle) -> bool {
        change(&mut self.caret.style, style)
    }

    pub fn set_caret_width(&mut self, width: i32) -> bool {
        change(&mut self.caret.width, width.clamp(0, 20))
    }

    pub fn caret_line(&self) -> CaretLineAppearance {
        self.caret_line
    }

    pub fn set_caret_line_layer(&mut self, layer: Layer) -> bool {
        change(&mut self.caret_line.layer, layer)
    }

    pub fn set_caret_line_always_show(&mut self, always_show: bool) -> bool {
        change(&mut self.caret_line.always_show, always_show)
    }

    pub fn set_caret_line_frame(&mut self, frame: i32) -> bool {
        change(&mut self.caret_line.frame, frame.max(0))
    }

    // Whitespace, indentation and end of line.

    pub fn view_whitespace(&self) -> WhiteSpace {
        self.view_whitespace
    }

    pub fn set_view_whitespace(&mut self, mode: WhiteSpace) -> bool {
        change(&mut self.view_whitespace, mode)
    }

    pub fn whitespace_size(&self) -> i32 {
        self.whitespace_size
    }

    pub fn set_whitespace_size(&mut self, size: i32) -> bool {
        change(&mut self.whitespace_size, size.max(0))
    }

    pub fn tab_draw_mode(&self) -> TabDrawMode {
        self.tab_draw_mode
    }

    pub fn set_tab_draw_mode(&mut self, mode: TabDrawMode) -> bool {
        change(&mut self.tab_draw_mode, mode)
    }

    pub fn view_indentation_guides(&self) -> IndentView {
        self.view_indentation_guides
    }

    pub fn set_view_indentation_guides(&mut self, view: IndentView) -> bool {
        change(&mut self.view_indentation_guides, view)
    }

    pub fn view_eol(&self) -> bool {
        self.view_eol
    }

    pub fn set_view_eol(&mut self, visible: bool) -> bool {
        change(&mut self.view_eol, visible)
    }

    // Wrapping.

    pub fn wrap(&self) -> WrapAppearance {
        self.wrap
    }

    pub fn set_wrap_state(&mut self, mode: WrapMode) -> bool {
        change(&mut self.wrap.mode, mode)
    }

    pub fn set_wrap_visual_flags(&mut self, flags: WrapVisualFlags) -> bool {
        change(&mut self.wrap.visual_flags, flags)
    }

    pub fn set_wrap_visual_flags_location(&mut self, location: WrapVisualLocation) -> bool {
        change(&mut self.wrap.visual_flags_location, location)
    }

    pub fn set_wrap_visual_start_indent(&mut self, indent: i32) -> bool {
        change(&mut self.wrap.visual_start_indent, indent.max(0))
    }

    pub fn set_wrap_indent_mode(&mut self, mode: WrapIndentMode) -> bool {
        change(&mut self.wrap.indent_mode, mode)
    }

    // Edges.

    pub fn edge_mode(&self) -> EdgeMode {
        self.edge_mode
    }

    pub fn set_edge_mode(&mut self, mode: EdgeMode) -> bool {
        change(&mut self.edge_mode, mode)
    }

    pub fn edge(&self) -> EdgeProperties {
        self.edge
    }

    pub fn set_edge_column(&mut self, column: i32) -> bool {
        change(&mut self.edge.column, column)
    }

    pub fn set_edge_colour(&mut self, colour: ColourRgba) -> bool {
        change(&mut self.edge.colour, colour)
    }

    pub fn multi_edges(&self) -> &[EdgeProperties] {
        &self.multi_edges
    }

    /// Insert a guide keeping the list ordered by column; equal columns keep
    /// insertion order.
    pub fn add_multi_edge(&mut self, column: i32, colour: ColourRgba) {
        let at = self
            .multi_edges
            .partition_point(|edge| edge.column <= column);
        self.multi_edges
            .insert(at, EdgeProperties::new(column, colour));
    }

    pub fn clear_multi_edges(&mut self) -> bool {
        let changed = !self.multi_edges.is_empty();
        self.multi_edges.clear();
        changed
    }

    // Annotations, margins text and folding.

    pub fn annotation_visible(&self) -> AnnotationVisible {
        self.annotation_visible
    }

    pub fn set_annotation_visible(&mut self, visible: AnnotationVisible) -> bool {
        change(&mut self.annotation_visible, visible)
    }

    pub fn annotation_style_offset(&self) -> i32 {
        self.annotation_style_offset
    }

    pub fn set_annotation_style_offset(&mut self, offset: i32) -> bool {
        change(&mut self.annotation_style_offset, offset)
    }

    pub fn eol_annotation_visible(&self) -> EolAnnotationVisible {
        self.eol_annotation_visible
    }

    pub fn set_eol_annotation_visible(&mut self, visible: EolAnnotationVisible) -> bool {
        change(&mut self.eol_annotation_visible, visible)
    }

    pub fn eol_annotation_style_offset(&self) -> i32 {
        self.eol_annotation_style_offset
    }

    pub fn set_eol_annotation_style_offset(&mut self, offset: i32) -> bool {
        change(&mut self.eol_annotation_style_offset, offset)
    }

    pub fn margin_style_offset(&self) -> i32 {
        self.margin_style_offset
    }

    pub fn set_margin_style_offset(&mut self, offset: i32) -> bool {
        change(&mut self.margin_style_offset, offset)
    }

    pub fn fold_margin_colour(&self) -> Option<ColourRgba> {
        self.fold_margin_colour
    }

    pub fn set_fold_margin_colour(&mut self, colour: Option<ColourRgba>) -> bool {
        change(&mut self.fold_margin_colour, colour)
    }

    pub fn fold_margin_highlight_colour(&self) -> Option<ColourRgba> {
        self.fold_margin_highlight_colour
    }

    pub fn set_fold_margin_highlight_colour(&mut self, colour: Option<ColourRgba>) -> bool {
        change(&mut self.fold_margin_highlight_colour, colour)
    }

    /// Selection margin colours, refreshed from the platform chrome.
    pub fn selbar(&self) -> (ColourRgba, ColourRgba) {
        (self.selbar, self.selbar_light)
    }

    pub fn hotspot_underline(&self) -> bool {
        self.hotspot_underline
    }

    pub fn set_hotspot_underline(&mut self, underline: bool) -> bool {
        change(&mut self.hotspot_underline, underline)
    }

    pub fn margin_number_padding(&self) -> i32 {
        self.margin_number_padding
    }

    pub fn ctrl_char_padding(&self) -> i32 {
        self.ctrl_char_padding
    }

    pub fn last_seg_italics_offset(&self) -> i32 {
        self.last_seg_italics_offset
    }
}

impl Clone for ViewStyle {
    /// Copies settings, styles (with a fresh name pool) and tables. Realised
    /// fonts are not shared; the copy realises its own on its next refresh.
    /// Protection and case-forcing summaries restart cleared.
    fn clone(&self) -> Self {
        let mut copy = Self {
            defaults: self.defaults.clone(),
            styles: self.styles.clone(),
            fonts: FontRegistry::new(),
            markers: self.markers.clone(),
            largest_marker_height: 0,
            indicators: self.indicators.clone(),
            indicators_dynamic: self.indicators_dynamic,
            indicators_set_fore: self.indicators_set_fore,
            technology: self.technology,
            metrics: self.metrics,
            selection: self.selection,
            control_char_symbol: self.control_char_symbol,
            selbar: self.selbar,
            selbar_light: self.selbar_light,
            fold_margin_colour: self.fold_margin_colour,
            fold_margin_highlight_colour: self.fold_margin_highlight_colour,
            hotspot_underline: self.hotspot_underline,
            left_margin_width: self.left_margin_width,
            right_margin_width: self.right_margin_width,
            margins: self.margins.clone(),
            margin_inside: self.margin_inside,
            layout: self.layout,
            zoom_level: self.zoom_level,
            view_whitespace: self.view_whitespace,
            tab_draw_mode: self.tab_draw_mode,
            whitespace_size: self.whitespace_size,
            view_indentation_guides: self.view_indentation_guides,
            view_eol: self.view_eol,
            caret: self.caret,
            caret_line: self.caret_line,
            some_styles_protected: false,
            some_styles_force_case: false,
            extra_font_flag: self.extra_font_flag,
            extra_ascent: self.extra_ascent,
            extra_descent: self.extra_descent,
            margin_style_offset: self.margin_style_offset,
            annotation_visible: self.annotation_visible,
            annotation_style_offset: self.annotation_style_offset,
            eol_annotation_visible: self.eol_annotation_visible,
            eol_annotation_style_offset: self.eol_annotation_style_offset,
            brace_highlight_indicator: self.brace_highlight_indicator,
            brace_bad_light_indicator: self.brace_bad_light_indicator,
            edge_mode: self.edge_mode,
            edge: self.edge,
            multi_edges: self.multi_edges.clone(),
            margin_number_padding: self.margin_number_padding,
            ctrl_char_padding: self.ctrl_char_padding,
            last_seg_italics_offset: self.last_seg_italics_offset,
            elements: self.elements.clone(),
            wrap: self.wrap,
            locale_name: self.locale_name.clone(),
        };
        copy.calc_largest_marker_height();
        copy
    }
}

fn default_elements() -> ElementColours {
    let mut elements = ElementColours::new();
    elements.set_base(Element::SelectionBack, ColourRgba::rgb(0xc0, 0xc0, 0xc0));
    elements.set_base(Element::SelectionAdditionalBack, ColourRgba::rgb(0xd7, 0xd7, 0xd7));
    elements.set_base(Element::SelectionSecondaryBack, ColourRgba::rgb(0xb0, 0xb0, 0xb0));
    elements.set_base(Element::SelectionNoFocusBack, ColourRgba::new(0x80, 0x80, 0x80, 0x3f));
    elements.set_base(Element::Caret, ColourRgba::BLACK);
    elements.set_base(Element::CaretAdditional, ColourRgba::rgb(0x7f, 0x7f, 0x7f));
    elements.allow_translucent([
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
        Element::HotSpotActive,
        Element::WhiteSpace,
    ]);
    elements
}

fn with_extra(value: u32, extra: i32) -> u32 {
    let sum = i64::from(value) + i64::from(extra);
    u32::try_from(sum.max(0)).unwrap_or(u32::MAX)
}

fn check_indicator(indicator: Option<usize>) -> Result<(), StyleError> {
    match indicator {
        Some(index) if index >= INDICATOR_COUNT => Err(StyleError::IndicatorOutOfRange { index }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{STYLE_CALL_TIP, STYLE_DEFAULT, STYLE_EXTENDED_START};
    use core_surface::{FONT_SIZE_MULTIPLIER, FixedPitchSurface};
    use pretty_assertions::assert_eq;

    fn view() -> ViewStyle {
        ViewStyle::new(PlatformDefaults::detect().with_default_font("Mono", 10))
    }

    #[test]
    fn fresh_view_has_documented_defaults() {
        let vs = view();
        assert_eq!(vs.metrics(), &TextMetrics::default());
        assert_eq!(vs.margins().len(), MARGIN_COUNT);
        assert_eq!(vs.margin(1).map(|m| m.width), Some(16));
        assert_eq!(vs.fixed_column_width(), 16);
        assert_eq!(vs.text_start(), 17);
        assert_eq!(vs.mask_in_line(), 0);
        assert_eq!(vs.edge().colour, ColourRgba::rgb(0xc0, 0xc0, 0xc0));
        assert_eq!(
            vs.element_colour(Element::SelectionBack),
            Some(ColourRgba::rgb(0xc0, 0xc0, 0xc0))
        );
        assert!(!vs.element_is_set(Element::SelectionBack));
        assert!(vs.element_allows_translucent(Element::CaretLineBack));
        assert!(!vs.element_allows_translucent(Element::FoldLine));
        assert_eq!(vs.indicator(1).map(|i| i.normal.style), Some(IndicatorStyle::TT));
        assert_eq!(vs.style(STYLE_LINE_NUMBER).back, vs.platform_defaults().chrome);
    }

    #[test]
    fn refresh_derives_line_metrics() {
        let mut vs = view();
        let mut surface = FixedPitchSurface::default();
        vs.refresh(&mut surface, 4);

        let metrics = vs.metrics();
        assert_eq!(metrics.max_ascent, 11);
        assert_eq!(metrics.max_descent, 4);
        assert_eq!(metrics.line_height, 15);
        assert_eq!(metrics.line_overlap, 2);
        assert_eq!(metrics.space_width, 8.0);
        assert_eq!(metrics.ave_char_width, 8.0);
        assert_eq!(metrics.tab_width, 32.0);
        assert_eq!(metrics.control_char_width, 0.0);
        assert_eq!(vs.fonts().len(), 1);
        assert!(vs.font_for_style(STYLE_DEFAULT).is_some());
        assert_eq!(vs.style(0).measurements.ascent, 11);
    }

    #[test]
    fn refresh_survives_extreme_font_size_and_zoom() {
        let mut vs = view();
        vs.set_style_size(STYLE_DEFAULT, i32::MAX).unwrap();
        vs.set_zoom_level(1);
        vs.refresh(&mut FixedPitchSurface::default(), 8);
        let metrics = vs.metrics();
        assert!(metrics.line_height > 0);
        assert!(metrics.ave_char_width.is_finite());
        assert!(metrics.tab_width.is_finite());
        assert_eq!(vs.style(STYLE_DEFAULT).measurements.size_zoomed, i32::MAX);
    }

    #[test]
    fn refresh_takes_tallest_font_and_extra_spacing() {
        let mut vs = view();
        vs.set_style_size(5, 20 * FONT_SIZE_MULTIPLIER).unwrap();
        vs.set_extra_ascent(2);
        vs.set_extra_descent(-1);
        vs.refresh(&mut FixedPitchSurface::default(), 8);
        assert_eq!(vs.metrics().max_ascent, 24);
        assert_eq!(vs.metrics().max_descent, 6);
        assert_eq!(vs.line_height(), 30);
        assert_eq!(vs.metrics().line_overlap, 3);
        assert_eq!(vs.fonts().len(), 2);
    }

    #[test]
    fn zoom_scales_fonts_at_refresh_only() {
        let mut vs = view();
        let mut surface = FixedPitchSurface::default();
        vs.refresh(&mut surface, 8);
        assert!(vs.set_zoom_level(10));
        assert_eq!(vs.line_height(), 15);
        vs.refresh(&mut surface, 8);
        assert_eq!(vs.style(STYLE_DEFAULT).measurements.size_zoomed, 2000);
        assert_eq!(vs.line_height(), 22 + 7);
        assert!(!vs.set_zoom_level(10));
        vs.set_zoom_level(1000);
        assert_eq!(vs.zoom_level(), ZOOM_MAX);
    }

    #[test]
    fn missing_font_degrades_to_minimum_metrics() {
        let mut vs = view();
        let mut surface = FixedPitchSurface::default().with_unavailable(["Mono"]);
        vs.refresh(&mut surface, 8);
        assert!(vs.font_for_style(STYLE_DEFAULT).is_none());
        assert_eq!(vs.metrics().line_height, 2);
        assert_eq!(vs.metrics().space_width, 0.0);
    }

    #[test]
    fn control_char_symbol_measured_in_control_style() {
        let mut vs = view();
        vs.set_control_char_symbol('X' as i32);
        vs.set_style_size(STYLE_CONTROL_CHAR, 20 * FONT_SIZE_MULTIPLIER).unwrap();
        vs.refresh(&mut FixedPitchSurface::default(), 8);
        assert_eq!(vs.metrics().control_char_width, 16.0);
    }

    #[test]
    fn refresh_derives_style_summaries() {
        let mut vs = view();
        vs.set_style_changeable(7, false).unwrap();
        vs.set_style_case(8, CaseForce::Upper).unwrap();
        assert!(!vs.protection_active());
        vs.refresh(&mut FixedPitchSurface::default(), 8);
        assert!(vs.protection_active());
        assert!(vs.some_styles_force_case());
    }

    #[test]
    fn refresh_derives_indicator_summaries() {
        let mut vs = view();
        vs.indicator_mut(4).unwrap().hover.style = IndicatorStyle::TextFore;
        vs.refresh(&mut FixedPitchSurface::default(), 8);
        assert!(vs.indicators_dynamic());
        assert!(vs.indicators_set_fore());
        assert_eq!(
            vs.indicator_mut(INDICATOR_COUNT).unwrap_err(),
            StyleError::IndicatorOutOfRange { index: INDICATOR_COUNT }
        );
    }

    #[test]
    fn style_setters_report_change_and_grow() {
        let mut vs = view();
        let red = ColourRgba::rgb(0xff, 0, 0);
        assert!(vs.set_style_fore(300, red).unwrap());
        assert!(!vs.set_style_fore(300, red).unwrap());
        assert!(vs.valid_style(300));
        assert_eq!(vs.style(299), vs.style(STYLE_DEFAULT));
    }

    #[test]
    fn margin_setters_validate_index() {
        let mut vs = view();
        assert!(vs.set_margin_width(0, 30).unwrap());
        assert_eq!(
            vs.set_margin_width(MARGIN_COUNT, 1),
            Err(StyleError::MarginOutOfRange {
                index: MARGIN_COUNT,
                count: MARGIN_COUNT
            })
        );
        assert_eq!(vs.fixed_column_width(), 16);
        vs.calculate_margin_width_and_mask();
        assert_eq!(vs.fixed_column_width(), 46);
    }

    #[test]
    fn external_margin_width_and_location_follow_inside_flag() {
        let mut vs = view();
        vs.set_margin_width(0, 20).unwrap();
        vs.calculate_margin_width_and_mask();
        assert_eq!(vs.external_margin_width(), 0);
        assert_eq!(vs.margin_from_location(Point::new(5.0, 0.0)), Some(0));
        assert_eq!(vs.margin_from_location(Point::new(25.0, 0.0)), Some(1));
        assert_eq!(vs.margin_from_location(Point::new(40.0, 0.0)), None);

        vs.set_margin_inside(false);
        vs.calculate_margin_width_and_mask();
        assert_eq!(vs.external_margin_width(), 36);
        assert_eq!(vs.text_start(), 1);
        assert_eq!(vs.margin_from_location(Point::new(-30.0, 0.0)), Some(0));
        assert_eq!(vs.margin_from_location(Point::new(5.0, 0.0)), None);
    }

    #[test]
    fn largest_marker_height_tracks_images() {
        let mut vs = view();
        vs.define_marker(3, MarkerSymbol::Pixmap { height: 12 }).unwrap();
        vs.define_marker(4, MarkerSymbol::RgbaImage { height: 18 }).unwrap();
        assert_eq!(vs.largest_marker_height(), 18);
        vs.define_marker(4, MarkerSymbol::Circle).unwrap();
        assert_eq!(vs.largest_marker_height(), 12);
        assert!(vs.define_marker(MARKER_COUNT, MarkerSymbol::Circle).is_err());
    }

    #[test]
    fn multi_edges_stay_sorted_and_stable() {
        let mut vs = view();
        let a = ColourRgba::rgb(1, 0, 0);
        let b = ColourRgba::rgb(2, 0, 0);
        vs.add_multi_edge(80, a);
        vs.add_multi_edge(40, a);
        vs.add_multi_edge(80, b);
        vs.add_multi_edge(100, a);
        let columns: Vec<_> = vs.multi_edges().iter().map(|e| (e.column, e.colour)).collect();
        assert_eq!(columns, vec![(40, a), (80, a), (80, b), (100, a)]);
        assert!(vs.clear_multi_edges());
        assert!(!vs.clear_multi_edges());
    }

    #[test]
    fn wrap_setters_report_change() {
        let mut vs = view();
        assert!(vs.set_wrap_state(WrapMode::Word));
        assert!(!vs.set_wrap_state(WrapMode::Word));
        assert!(vs.set_wrap_visual_flags(WrapVisualFlags::END | WrapVisualFlags::MARGIN));
        assert!(vs.set_wrap_visual_flags_location(WrapVisualLocation::START_BY_TEXT));
        assert!(vs.set_wrap_visual_start_indent(2));
        assert!(vs.set_wrap_indent_mode(WrapIndentMode::DeepIndent));
        assert_eq!(vs.wrap().indent_mode, WrapIndentMode::DeepIndent);
    }

    #[test]
    fn clone_is_independent_and_drops_fonts() {
        let mut vs = view();
        vs.set_style_font_name(5, "Courier").unwrap();
        vs.set_style_changeable(5, false).unwrap();
        vs.set_element_colour(Element::Caret, ColourRgba::rgb(0xff, 0, 0));
        vs.define_marker(2, MarkerSymbol::Pixmap { height: 9 }).unwrap();
        vs.refresh(&mut FixedPitchSurface::default(), 8);
        assert!(vs.protection_active());

        let mut copy = vs.clone();
        assert!(copy.fonts().is_empty());
        assert!(!copy.protection_active());
        assert_eq!(copy.largest_marker_height(), 9);
        assert_eq!(copy.element_colour(Element::Caret), Some(ColourRgba::rgb(0xff, 0, 0)));

        copy.set_style_font_name(5, "Consolas").unwrap();
        assert_eq!(vs.style(5).font.name(), Some("Courier"));
        assert_eq!(copy.style(5).font.name(), Some("Consolas"));

        copy.refresh(&mut FixedPitchSurface::default(), 8);
        assert_eq!(copy.fonts().len(), 2);
        assert_eq!(vs.fonts().len(), 2);
    }

    #[test]
    fn init_restores_defaults_and_keeps_table() {
        let mut vs = view();
        vs.ensure_style(400).unwrap();
        vs.allocate_extended_styles(5).unwrap();
        vs.set_caret_width(3);
        vs.set_margin_width(0, 40).unwrap();
        vs.init(256);
        assert!(vs.valid_style(400));
        assert_eq!(vs.caret().width, 1);
        assert_eq!(vs.margin(0).map(|m| m.width), Some(0));
        assert_eq!(vs.allocate_extended_styles(1).unwrap(), STYLE_EXTENDED_START);
    }

    #[test]
    fn call_tip_colours_restored_by_clear_styles() {
        let mut vs = view();
        vs.set_style_back(STYLE_CALL_TIP, ColourRgba::BLACK).unwrap();
        vs.clear_styles();
        assert_eq!(vs.style(STYLE_CALL_TIP).back, ColourRgba::WHITE);
    }
}
