//! Long-line edge guides.

use core_surface::ColourRgba;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeMode {
    #[default]
    None,
    /// A vertical line at the edge column.
    Line,
    /// Text past the edge column gets the edge colour as background.
    Background,
    /// Every guide in the multi-edge list is drawn as a line.
    MultiLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeProperties {
    pub column: i32,
    pub colour: ColourRgba,
}

impl Default for EdgeProperties {
    fn default() -> Self {
        Self::new(0, ColourRgba::BLACK)
    }
}

impl EdgeProperties {
    pub const fn new(column: i32, colour: ColourRgba) -> Self {
        Self { column, colour }
    }
}
