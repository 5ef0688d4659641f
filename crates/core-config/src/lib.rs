//! View style configuration.
//!
//! Parses `view-style.toml` (or an override path provided by the binary)
//! describing the default font, per-style overrides, margins, caret, caret
//! line, selection, element colours, whitespace, wrapping and edges, and
//! applies it onto a [`ViewStyle`] through its public setters.
//!
//! Every table is optional and unknown fields are ignored so files written
//! for newer versions still load. A file that fails to parse falls back to
//! defaults. Individual values that cannot be applied (style index past the
//! maximum, margin index past the margin count, malformed colour) are skipped
//! with a log line under the `config` target rather than failing the load.
//!
//! Colours are written `"#rrggbb"` or `"#rrggbbaa"`. Font sizes are in
//! points.

use std::collections::BTreeMap;
use std::{fs, path::PathBuf};

use anyhow::Result;
use core_style::style::{CaseForce, STYLE_DEFAULT, STYLE_MAX};
use core_style::{
    CaretFlags, CaretStyle, EdgeMode, Element, IndentView, InsertCaret, Layer, MarginType,
    TabDrawMode, ViewStyle, WhiteSpace, WrapIndentMode, WrapMode, WrapVisualFlags,
    WrapVisualLocation,
};
use core_surface::{ColourRgba, FONT_SIZE_MULTIPLIER, Technology, WEIGHT_BOLD, WEIGHT_NORMAL};
use serde::Deserialize;
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "view-style.toml";

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LayerSetting {
    #[default]
    Base,
    UnderText,
    OverText,
}

impl From<LayerSetting> for Layer {
    fn from(layer: LayerSetting) -> Self {
        match layer {
            LayerSetting::Base => Layer::Base,
            LayerSetting::UnderText => Layer::UnderText,
            LayerSetting::OverText => Layer::OverText,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FontConfig {
    pub name: Option<String>,
    /// Points.
    pub size: Option<f64>,
    /// Copy the default style onto every other style after setting the font.
    pub clear_all: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            name: None,
            size: None,
            clear_all: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CaseSetting {
    Mixed,
    Upper,
    Lower,
    Camel,
}

impl From<CaseSetting> for CaseForce {
    fn from(case: CaseSetting) -> Self {
        match case {
            CaseSetting::Mixed => CaseForce::Mixed,
            CaseSetting::Upper => CaseForce::Upper,
            CaseSetting::Lower => CaseForce::Lower,
            CaseSetting::Camel => CaseForce::Camel,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct StyleConfig {
    pub index: usize,
    pub font: Option<String>,
    /// Points.
    pub size: Option<f64>,
    pub bold: Option<bool>,
    pub weight: Option<i32>,
    pub italic: Option<bool>,
    pub fore: Option<String>,
    pub back: Option<String>,
    pub underline: Option<bool>,
    pub eol_filled: Option<bool>,
    pub case: Option<CaseSetting>,
    pub visible: Option<bool>,
    pub changeable: Option<bool>,
    pub hotspot: Option<bool>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MarginKind {
    Symbol,
    Number,
    Back,
    Fore,
    Text,
    RText,
    Colour,
}

impl From<MarginKind> for MarginType {
    fn from(kind: MarginKind) -> Self {
        match kind {
            MarginKind::Symbol => MarginType::Symbol,
            MarginKind::Number => MarginType::Number,
            MarginKind::Back => MarginType::Back,
            MarginKind::Fore => MarginType::Fore,
            MarginKind::Text => MarginType::Text,
            MarginKind::RText => MarginType::RText,
            MarginKind::Colour => MarginType::Colour,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct MarginConfig {
    pub index: usize,
    #[serde(rename = "type")]
    pub kind: Option<MarginKind>,
    pub width: Option<i32>,
    pub mask: Option<u32>,
    pub sensitive: Option<bool>,
    pub back: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CaretShapeSetting {
    Invisible,
    Line,
    Block,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct CaretConfig {
    pub style: Option<CaretShapeSetting>,
    pub overstrike_block: bool,
    pub block_after: bool,
    pub curses: bool,
    pub width: Option<i32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct CaretLineConfig {
    pub colour: Option<String>,
    pub layer: Option<LayerSetting>,
    pub always_show: Option<bool>,
    pub frame: Option<i32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct SelectionConfig {
    pub layer: Option<LayerSetting>,
    pub eol_filled: Option<bool>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WhiteSpaceSetting {
    Invisible,
    Always,
    AfterIndent,
    OnlyInIndent,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TabDrawSetting {
    LongArrow,
    StrikeOut,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum IndentGuideSetting {
    None,
    Real,
    LookForward,
    LookBoth,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct WhitespaceConfig {
    pub view: Option<WhiteSpaceSetting>,
    pub size: Option<i32>,
    pub tab_draw: Option<TabDrawSetting>,
    pub indentation_guides: Option<IndentGuideSetting>,
    pub eol: Option<bool>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WrapModeSetting {
    None,
    Word,
    Character,
    Whitespace,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WrapIndentSetting {
    Fixed,
    Same,
    Indent,
    DeepIndent,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WrapFlagSetting {
    End,
    Start,
    Margin,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WrapLocationSetting {
    EndByText,
    StartByText,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct WrapConfig {
    pub mode: Option<WrapModeSetting>,
    pub visual_flags: Option<Vec<WrapFlagSetting>>,
    pub visual_location: Option<Vec<WrapLocationSetting>>,
    pub start_indent: Option<i32>,
    pub indent_mode: Option<WrapIndentSetting>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeModeSetting {
    None,
    Line,
    Background,
    MultiLine,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct MultiEdgeConfig {
    pub column: i32,
    pub colour: String,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct EdgeConfig {
    pub mode: Option<EdgeModeSetting>,
    pub column: Option<i32>,
    pub colour: Option<String>,
    pub multi: Vec<MultiEdgeConfig>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TechnologySetting {
    Default,
    DirectWrite,
    DirectWriteRetain,
    DirectWriteDc,
}

impl From<TechnologySetting> for Technology {
    fn from(technology: TechnologySetting) -> Self {
        match technology {
            TechnologySetting::Default => Technology::Default,
            TechnologySetting::DirectWrite => Technology::DirectWrite,
            TechnologySetting::DirectWriteRetain => Technology::DirectWriteRetain,
            TechnologySetting::DirectWriteDc => Technology::DirectWriteDc,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ViewConfig {
    pub zoom: Option<i32>,
    pub technology: Option<TechnologySetting>,
    pub locale: Option<String>,
    pub extra_ascent: Option<i32>,
    pub extra_descent: Option<i32>,
    pub control_char_symbol: Option<i32>,
    pub margin_left: Option<i32>,
    pub margin_right: Option<i32>,
    pub margin_inside: Option<bool>,
    /// Tab width in characters, passed to the refresh pass.
    pub tab_width: i32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            zoom: None,
            technology: None,
            locale: None,
            extra_ascent: None,
            extra_descent: None,
            control_char_symbol: None,
            margin_left: None,
            margin_right: None,
            margin_inside: None,
            tab_width: Self::default_tab_width(),
        }
    }
}

impl ViewConfig {
    const fn default_tab_width() -> i32 {
        8
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct ConfigFile {
    pub view: ViewConfig,
    pub font: FontConfig,
    #[serde(rename = "style")]
    pub styles: Vec<StyleConfig>,
    #[serde(rename = "margin")]
    pub margins: Vec<MarginConfig>,
    pub caret: CaretConfig,
    pub caret_line: CaretLineConfig,
    pub selection: SelectionConfig,
    /// Element name to colour.
    pub elements: BTreeMap<String, String>,
    pub whitespace: WhitespaceConfig,
    pub wrap: WrapConfig,
    pub edge: EdgeConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("view-style").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_not_found");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(
                target: "config",
                path = %path.display(),
                styles = file.styles.len(),
                margins = file.margins.len(),
                elements = file.elements.len(),
                "config_loaded"
            );
            Ok(Config {
                raw: Some(content),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}

/// Parse a colour value, logging and skipping malformed ones.
fn colour(field: &'static str, value: &str) -> Option<ColourRgba> {
    match value.parse::<ColourRgba>() {
        Ok(colour) => Some(colour),
        Err(e) => {
            warn!(target: "config", field, value, error = %e, "colour_ignored");
            None
        }
    }
}

fn hundredths(points: f64) -> i32 {
    (points * f64::from(FONT_SIZE_MULTIPLIER)).round() as i32
}

impl Config {
    pub fn tab_width(&self) -> i32 {
        self.file.view.tab_width.max(1)
    }

    /// Apply every configured value onto `vs`. Returns whether anything
    /// changed. Derived metrics are left for the caller's next refresh.
    pub fn apply(&self, vs: &mut ViewStyle) -> Result<bool> {
        let mut changed = false;
        changed |= self.apply_view(vs);
        changed |= self.apply_font(vs)?;
        changed |= self.apply_styles(vs)?;
        changed |= self.apply_margins(vs)?;
        changed |= self.apply_caret(vs);
        changed |= self.apply_selection(vs);
        changed |= self.apply_elements(vs);
        changed |= self.apply_whitespace(vs);
        changed |= self.apply_wrap(vs);
        changed |= self.apply_edges(vs);
        if changed {
            vs.calculate_margin_width_and_mask();
        }
        info!(target: "config", changed, "config_applied");
        Ok(changed)
    }

    fn apply_view(&self, vs: &mut ViewStyle) -> bool {
        let view = &self.file.view;
        let mut changed = false;
        if let Some(zoom) = view.zoom {
            changed |= vs.set_zoom_level(zoom);
        }
        if let Some(technology) = view.technology {
            changed |= vs.set_technology(technology.into());
        }
        if let Some(locale) = &view.locale {
            changed |= vs.set_font_locale_name(locale);
        }
        if let Some(extra) = view.extra_ascent {
            changed |= vs.set_extra_ascent(extra);
        }
        if let Some(extra) = view.extra_descent {
            changed |= vs.set_extra_descent(extra);
        }
        if let Some(symbol) = view.control_char_symbol {
            changed |= vs.set_control_char_symbol(symbol);
        }
        if let Some(width) = view.margin_left {
            changed |= vs.set_left_margin_width(width);
        }
        if let Some(width) = view.margin_right {
            changed |= vs.set_right_margin_width(width);
        }
        if let Some(inside) = view.margin_inside {
            changed |= vs.set_margin_inside(inside);
        }
        changed
    }

    fn apply_font(&self, vs: &mut ViewStyle) -> Result<bool> {
        let font = &self.file.font;
        let mut changed = false;
        if let Some(name) = &font.name {
            changed |= vs.set_style_font_name(STYLE_DEFAULT, name)?;
        }
        if let Some(size) = font.size {
            changed |= vs.set_style_size(STYLE_DEFAULT, hundredths(size))?;
        }
        if changed && font.clear_all {
            vs.clear_styles();
        }
        Ok(changed)
    }

    fn apply_styles(&self, vs: &mut ViewStyle) -> Result<bool> {
        let mut changed = false;
        for style in &self.file.styles {
            let index = style.index;
            if index > STYLE_MAX {
                info!(target: "config", index, max = STYLE_MAX, "style_index_ignored");
                continue;
            }
            if let Some(name) = &style.font {
                changed |= vs.set_style_font_name(index, name)?;
            }
            if let Some(size) = style.size {
                changed |= vs.set_style_size(index, hundredths(size))?;
            }
            if let Some(bold) = style.bold {
                let weight = if bold { WEIGHT_BOLD } else { WEIGHT_NORMAL };
                changed |= vs.set_style_weight(index, weight)?;
            }
            if let Some(weight) = style.weight {
                changed |= vs.set_style_weight(index, weight.clamp(1, 999))?;
            }
            if let Some(italic) = style.italic {
                changed |= vs.set_style_italic(index, italic)?;
            }
            if let Some(fore) = style.fore.as_deref().and_then(|v| colour("style.fore", v)) {
                changed |= vs.set_style_fore(index, fore)?;
            }
            if let Some(back) = style.back.as_deref().and_then(|v| colour("style.back", v)) {
                changed |= vs.set_style_back(index, back)?;
            }
            if let Some(underline) = style.underline {
                changed |= vs.set_style_underline(index, underline)?;
            }
            if let Some(filled) = style.eol_filled {
                changed |= vs.set_style_eol_filled(index, filled)?;
            }
            if let Some(case) = style.case {
                changed |= vs.set_style_case(index, case.into())?;
            }
            if let Some(visible) = style.visible {
                changed |= vs.set_style_visible(index, visible)?;
            }
            if let Some(changeable) = style.changeable {
                changed |= vs.set_style_changeable(index, changeable)?;
            }
            if let Some(hotspot) = style.hotspot {
                changed |= vs.set_style_hotspot(index, hotspot)?;
            }
        }
        Ok(changed)
    }

    fn apply_margins(&self, vs: &mut ViewStyle) -> Result<bool> {
        let mut changed = false;
        for margin in &self.file.margins {
            let index = margin.index;
            let count = vs.margins().len();
            if index >= count {
                info!(target: "config", index, count, "margin_index_ignored");
                continue;
            }
            if let Some(kind) = margin.kind {
                changed |= vs.set_margin_type(index, kind.into())?;
            }
            if let Some(width) = margin.width {
                changed |= vs.set_margin_width(index, width)?;
            }
            if let Some(mask) = margin.mask {
                changed |= vs.set_margin_mask(index, mask)?;
            }
            if let Some(sensitive) = margin.sensitive {
                changed |= vs.set_margin_sensitive(index, sensitive)?;
            }
            if let Some(back) = margin.back.as_deref().and_then(|v| colour("margin.back", v)) {
                changed |= vs.set_margin_back(index, back)?;
            }
        }
        Ok(changed)
    }

    fn apply_caret(&self, vs: &mut ViewStyle) -> bool {
        let caret = &self.file.caret;
        let mut changed = false;
        if let Some(shape) = caret.style {
            let insert = match shape {
                CaretShapeSetting::Invisible => InsertCaret::Invisible,
                CaretShapeSetting::Line => InsertCaret::Line,
                CaretShapeSetting::Block => InsertCaret::Block,
            };
            let mut flags = CaretFlags::empty();
            flags.set(CaretFlags::OVERSTRIKE_BLOCK, caret.overstrike_block);
            flags.set(CaretFlags::BLOCK_AFTER, caret.block_after);
            flags.set(CaretFlags::CURSES, caret.curses);
            changed |= vs.set_caret_style(CaretStyle::new(insert, flags));
        }
        if let Some(width) = caret.width {
            changed |= vs.set_caret_width(width);
        }

        let line = &self.file.caret_line;
        if let Some(back) = line.colour.as_deref().and_then(|v| colour("caret_line.colour", v)) {
            changed |= vs.set_element_colour(Element::CaretLineBack, back);
        }
        if let Some(layer) = line.layer {
            changed |= vs.set_caret_line_layer(layer.into());
        }
        if let Some(always_show) = line.always_show {
            changed |= vs.set_caret_line_always_show(always_show);
        }
        if let Some(frame) = line.frame {
            changed |= vs.set_caret_line_frame(frame);
        }
        changed
    }

    fn apply_selection(&self, vs: &mut ViewStyle) -> bool {
        let selection = &self.file.selection;
        let mut changed = false;
        if let Some(layer) = selection.layer {
            changed |= vs.set_selection_layer(layer.into());
        }
        if let Some(filled) = selection.eol_filled {
            changed |= vs.set_selection_eol_filled(filled);
        }
        changed
    }

    fn apply_elements(&self, vs: &mut ViewStyle) -> bool {
        let mut changed = false;
        for (name, value) in &self.file.elements {
            let element = match name.parse::<Element>() {
                Ok(element) => element,
                Err(e) => {
                    warn!(target: "config", element = name.as_str(), error = %e, "element_ignored");
                    continue;
                }
            };
            if let Some(c) = colour("elements", value) {
                changed |= vs.set_element_colour(element, c);
            }
        }
        changed
    }

    fn apply_whitespace(&self, vs: &mut ViewStyle) -> bool {
        let ws = &self.file.whitespace;
        let mut changed = false;
        if let Some(view) = ws.view {
            changed |= vs.set_view_whitespace(match view {
                WhiteSpaceSetting::Invisible => WhiteSpace::Invisible,
                WhiteSpaceSetting::Always => WhiteSpace::VisibleAlways,
                WhiteSpaceSetting::AfterIndent => WhiteSpace::VisibleAfterIndent,
                WhiteSpaceSetting::OnlyInIndent => WhiteSpace::VisibleOnlyInIndent,
            });
        }
        if let Some(size) = ws.size {
            changed |= vs.set_whitespace_size(size);
        }
        if let Some(tab_draw) = ws.tab_draw {
            changed |= vs.set_tab_draw_mode(match tab_draw {
                TabDrawSetting::LongArrow => TabDrawMode::LongArrow,
                TabDrawSetting::StrikeOut => TabDrawMode::StrikeOut,
            });
        }
        if let Some(guides) = ws.indentation_guides {
            changed |= vs.set_view_indentation_guides(match guides {
                IndentGuideSetting::None => IndentView::None,
                IndentGuideSetting::Real => IndentView::Real,
                IndentGuideSetting::LookForward => IndentView::LookForward,
                IndentGuideSetting::LookBoth => IndentView::LookBoth,
            });
        }
        if let Some(eol) = ws.eol {
            changed |= vs.set_view_eol(eol);
        }
        changed
    }

    fn apply_wrap(&self, vs: &mut ViewStyle) -> bool {
        let wrap = &self.file.wrap;
        let mut changed = false;
        if let Some(mode) = wrap.mode {
            changed |= vs.set_wrap_state(match mode {
                WrapModeSetting::None => WrapMode::None,
                WrapModeSetting::Word => WrapMode::Word,
                WrapModeSetting::Character => WrapMode::Character,
                WrapModeSetting::Whitespace => WrapMode::Whitespace,
            });
        }
        if let Some(flags) = &wrap.visual_flags {
            let flags = flags.iter().fold(WrapVisualFlags::empty(), |acc, flag| {
                acc | match flag {
                    WrapFlagSetting::End => WrapVisualFlags::END,
                    WrapFlagSetting::Start => WrapVisualFlags::START,
                    WrapFlagSetting::Margin => WrapVisualFlags::MARGIN,
                }
            });
            changed |= vs.set_wrap_visual_flags(flags);
        }
        if let Some(location) = &wrap.visual_location {
            let location = location.iter().fold(WrapVisualLocation::empty(), |acc, loc| {
                acc | match loc {
                    WrapLocationSetting::EndByText => WrapVisualLocation::END_BY_TEXT,
                    WrapLocationSetting::StartByText => WrapVisualLocation::START_BY_TEXT,
                }
            });
            changed |= vs.set_wrap_visual_flags_location(location);
        }
        if let Some(indent) = wrap.start_indent {
            changed |= vs.set_wrap_visual_start_indent(indent);
        }
        if let Some(mode) = wrap.indent_mode {
            changed |= vs.set_wrap_indent_mode(match mode {
                WrapIndentSetting::Fixed => WrapIndentMode::Fixed,
                WrapIndentSetting::Same => WrapIndentMode::Same,
                WrapIndentSetting::Indent => WrapIndentMode::Indent,
                WrapIndentSetting::DeepIndent => WrapIndentMode::DeepIndent,
            });
        }
        changed
    }

    fn apply_edges(&self, vs: &mut ViewStyle) -> bool {
        let edge = &self.file.edge;
        let mut changed = false;
        if let Some(mode) = edge.mode {
            changed |= vs.set_edge_mode(match mode {
                EdgeModeSetting::None => EdgeMode::None,
                EdgeModeSetting::Line => EdgeMode::Line,
                EdgeModeSetting::Background => EdgeMode::Background,
                EdgeModeSetting::MultiLine => EdgeMode::MultiLine,
            });
        }
        if let Some(column) = edge.column {
            changed |= vs.set_edge_column(column);
        }
        if let Some(c) = edge.colour.as_deref().and_then(|v| colour("edge.colour", v)) {
            changed |= vs.set_edge_colour(c);
        }
        if !edge.multi.is_empty() {
            changed |= vs.clear_multi_edges();
            for multi in &edge.multi {
                if let Some(c) = colour("edge.multi.colour", &multi.colour) {
                    vs.add_multi_edge(multi.column, c);
                    changed = true;
                }
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_style::style::STYLE_LINE_NUMBER;
    use core_surface::{FixedPitchSurface, PlatformDefaults};
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    fn view() -> ViewStyle {
        ViewStyle::new(PlatformDefaults::detect().with_default_font("Mono", 10))
    }

    fn load_str(content: &str) -> Config {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), content).unwrap();
        load_from(Some(tmp.path().to_path_buf())).unwrap()
    }

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn capture_config_logs(f: impl FnOnce()) -> String {
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();
        with_default(subscriber, f);
        String::from_utf8(buffer.lock().unwrap().clone()).unwrap()
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert!(cfg.raw.is_none());
        assert_eq!(cfg.tab_width(), 8);
        let mut vs = view();
        assert!(!cfg.apply(&mut vs).unwrap());
    }

    #[test]
    fn invalid_toml_falls_back_to_defaults() {
        let cfg = load_str("[caret]\nstyle = \"triangle\"\n");
        assert!(cfg.raw.is_none());
        assert!(cfg.file.caret.style.is_none());
    }

    #[test]
    fn default_font_applies_to_every_style() {
        let cfg = load_str("[font]\nname = \"Courier\"\nsize = 12\n");
        let mut vs = view();
        assert!(cfg.apply(&mut vs).unwrap());
        assert_eq!(vs.style(STYLE_DEFAULT).font.name(), Some("Courier"));
        assert_eq!(vs.style(STYLE_DEFAULT).font.size, 1200);
        assert_eq!(vs.style(0).font.name(), Some("Courier"));
        assert_eq!(vs.style(STYLE_LINE_NUMBER).back, vs.platform_defaults().chrome);
        assert!(!cfg.apply(&mut vs).unwrap());
    }

    #[test]
    fn per_style_overrides() {
        let cfg = load_str(
            "[[style]]\nindex = 5\nfore = \"#ff0000\"\nbold = true\nitalic = true\ncase = \"upper\"\n\
             [[style]]\nindex = 6\nchangeable = false\nsize = 14.5\n",
        );
        let mut vs = view();
        cfg.apply(&mut vs).unwrap();
        assert_eq!(vs.style(5).fore, ColourRgba::rgb(0xff, 0, 0));
        assert!(vs.style(5).is_bold());
        assert!(vs.style(5).font.italic);
        assert_eq!(vs.style(5).case_force, CaseForce::Upper);
        assert!(vs.style(6).is_protected());
        assert_eq!(vs.style(6).font.size, 1450);
    }

    #[test]
    fn margins_and_caret_line_apply() {
        let cfg = load_str(
            "[[margin]]\nindex = 0\ntype = \"number\"\nwidth = 30\n\
             [[margin]]\nindex = 2\nwidth = 12\nmask = 0xFE000000\nsensitive = true\n\
             [caret_line]\ncolour = \"#ffffe0\"\nalways_show = true\n\
             [caret]\nstyle = \"block\"\noverstrike_block = true\nwidth = 2\n",
        );
        let mut vs = view();
        cfg.apply(&mut vs).unwrap();
        assert_eq!(vs.fixed_column_width(), 30 + 16 + 12);
        assert!(vs.margin(2).unwrap().shows_folding());
        assert!(vs.margin(2).unwrap().sensitive);
        assert_eq!(
            vs.background(0, false, true),
            Some(ColourRgba::rgb(0xff, 0xff, 0xe0))
        );
        assert!(vs.is_block_caret_style());
        assert_eq!(vs.caret().width, 2);
    }

    #[test]
    fn elements_wrap_whitespace_and_edges_apply() {
        let cfg = load_str(
            "[elements]\nselection-back = \"#3399ff80\"\nwhite-space = \"#808080\"\n\
             [whitespace]\nview = \"after-indent\"\nsize = 2\n\
             [wrap]\nmode = \"word\"\nvisual_flags = [\"end\", \"margin\"]\nindent_mode = \"indent\"\n\
             [edge]\nmode = \"multi-line\"\n\
             [[edge.multi]]\ncolumn = 100\ncolour = \"#ff0000\"\n\
             [[edge.multi]]\ncolumn = 80\ncolour = \"#00ff00\"\n",
        );
        let mut vs = view();
        cfg.apply(&mut vs).unwrap();
        assert_eq!(
            vs.element_colour(Element::SelectionBack),
            Some(ColourRgba::new(0x33, 0x99, 0xff, 0x80))
        );
        assert_eq!(vs.wrap_colour(), ColourRgba::rgb(0x80, 0x80, 0x80));
        assert!(vs.white_space_visible(false));
        assert_eq!(vs.whitespace_size(), 2);
        assert_eq!(vs.wrap().mode, WrapMode::Word);
        assert_eq!(
            vs.wrap().visual_flags,
            WrapVisualFlags::END | WrapVisualFlags::MARGIN
        );
        assert_eq!(vs.edge_mode(), EdgeMode::MultiLine);
        let columns: Vec<i32> = vs.multi_edges().iter().map(|e| e.column).collect();
        assert_eq!(columns, vec![80, 100]);
    }

    #[test]
    fn view_settings_feed_refresh() {
        let cfg = load_str("[view]\nzoom = 2\nextra_ascent = 1\ntab_width = 4\n");
        let mut vs = view();
        cfg.apply(&mut vs).unwrap();
        vs.refresh(&mut FixedPitchSurface::default(), cfg.tab_width());
        // 12pt at 96 dpi: 16px -> ascent 13 + 1, descent 4
        assert_eq!(vs.metrics().max_ascent, 14);
        assert_eq!(vs.line_height(), 18);
        assert_eq!(vs.metrics().tab_width, 40.0);
    }

    #[test]
    fn huge_font_size_and_zoom_still_refresh() {
        let cfg = load_str("[font]\nsize = 1e12\n[view]\nzoom = 60\n");
        let mut vs = view();
        assert!(cfg.apply(&mut vs).unwrap());
        assert_eq!(vs.style(STYLE_DEFAULT).font.size, i32::MAX);
        vs.refresh(&mut FixedPitchSurface::default(), cfg.tab_width());
        assert!(vs.line_height() > 0);
    }

    #[test]
    fn huge_margin_width_saturates_layout() {
        let cfg = load_str("[[margin]]\nindex = 0\nwidth = 2147483647\n");
        let mut vs = view();
        cfg.apply(&mut vs).unwrap();
        assert_eq!(vs.fixed_column_width(), i32::MAX);
        assert_eq!(vs.margin_from_location(core_surface::Point::new(10.0, 0.0)), Some(0));
    }

    #[test]
    fn out_of_range_values_are_skipped_with_logs() {
        let cfg = load_str(
            "[[style]]\nindex = 300\nfore = \"#ff0000\"\n\
             [[style]]\nindex = 7\nfore = \"red\"\n\
             [[margin]]\nindex = 9\nwidth = 5\n\
             [elements]\nnot-an-element = \"#ffffff\"\n",
        );
        let mut vs = view();
        let mut changed = true;
        let logs = capture_config_logs(|| {
            changed = cfg.apply(&mut vs).unwrap();
        });
        assert!(!changed);
        assert!(!vs.valid_style(300));
        assert!(logs.contains("INFO config:"));
        assert!(logs.contains("style_index_ignored"));
        assert!(logs.contains("margin_index_ignored"));
        assert!(logs.contains("WARN config:"));
        assert!(logs.contains("colour_ignored"));
        assert!(logs.contains("element_ignored"));
    }
}
