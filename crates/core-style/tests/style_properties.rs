//! Property tests for the style table, element colours and margin layout.

use core_style::style::{STYLE_DEFAULT, STYLE_EXTENDED_START};
use core_style::{Element, LineMarker, MarkerSymbol, ViewStyle};
use core_surface::{ColourRgba, PlatformDefaults};
use proptest::prelude::*;

fn view() -> ViewStyle {
    ViewStyle::new(PlatformDefaults::detect().with_default_font("Mono", 10))
}

fn element() -> impl Strategy<Value = Element> {
    proptest::sample::select(Element::ALL.to_vec())
}

fn colour() -> impl Strategy<Value = ColourRgba> {
    any::<u32>().prop_map(ColourRgba::from_packed)
}

proptest! {
    // Every index up to the ensured one is valid and untouched slots equal the default.
    #[test]
    fn ensured_styles_are_valid_defaults(index in 0usize..4000, probe in 0usize..4000) {
        let mut vs = view();
        vs.ensure_style(index).unwrap();
        prop_assert!(vs.valid_style(index));
        let probe = probe.min(index);
        prop_assert!(vs.valid_style(probe));
        if probe >= 40 {
            prop_assert_eq!(vs.style(probe), vs.style(STYLE_DEFAULT));
        }
    }

    // Ensuring never shrinks the table.
    #[test]
    fn ensure_style_never_shrinks(first in 0usize..3000, second in 0usize..3000) {
        let mut vs = view();
        vs.ensure_style(first).unwrap();
        let len = vs.styles().len();
        vs.ensure_style(second).unwrap();
        prop_assert!(vs.styles().len() >= len);
    }

    // Successive extended allocations never overlap; release resets the start.
    #[test]
    fn extended_blocks_disjoint(counts in proptest::collection::vec(0usize..64, 1..8)) {
        let mut vs = view();
        let mut ranges = Vec::new();
        for count in &counts {
            let start = vs.allocate_extended_styles(*count).unwrap();
            ranges.push(start..start + count);
        }
        for (i, a) in ranges.iter().enumerate() {
            for b in ranges.iter().skip(i + 1) {
                prop_assert!(a.end <= b.start || b.end <= a.start);
            }
        }
        prop_assert_eq!(ranges[0].start, STYLE_EXTENDED_START);
        vs.release_all_extended_styles();
        prop_assert_eq!(vs.allocate_extended_styles(1).unwrap(), STYLE_EXTENDED_START);
    }

    // Explicit colours read back; reset falls back to the base tier.
    #[test]
    fn element_set_then_reset(element in element(), c in colour(), base in proptest::option::of(colour())) {
        let mut vs = view();
        vs.reset_element(element);
        if let Some(base) = base {
            vs.set_element_base(element, base);
        }
        let expected_base = vs.element_colour(element);
        vs.set_element_colour(element, c);
        prop_assert_eq!(vs.element_colour(element), Some(c));
        prop_assert!(vs.element_is_set(element));
        prop_assert!(vs.reset_element(element));
        prop_assert_eq!(vs.element_colour(element), expected_base);
        if let Some(base) = base {
            prop_assert_eq!(vs.element_colour(element), Some(base));
        }
    }

    // Setting the same colour twice reports a change only the first time.
    #[test]
    fn element_change_detection(element in element(), c in colour()) {
        let mut vs = view();
        vs.reset_element(element);
        prop_assert!(vs.set_element_colour(element, c));
        prop_assert!(!vs.set_element_colour(element, c));
    }

    // Margin layout depends only on margins and markers.
    #[test]
    fn margin_calculation_idempotent(
        widths in proptest::collection::vec(0i32..64, 0..6),
        masks in proptest::collection::vec(any::<u32>(), 6),
        defined in proptest::collection::vec((0usize..32, 0u8..3), 0..10),
        inside in any::<bool>(),
    ) {
        let mut vs = view();
        vs.set_margin_count(widths.len());
        for (index, width) in widths.iter().enumerate() {
            vs.set_margin_width(index, *width).unwrap();
            vs.set_margin_mask(index, masks[index]).unwrap();
        }
        for (number, kind) in defined {
            let symbol = match kind {
                0 => MarkerSymbol::Circle,
                1 => MarkerSymbol::Background,
                _ => MarkerSymbol::Underline,
            };
            vs.set_marker(number, LineMarker::new(symbol)).unwrap();
        }
        vs.set_margin_inside(inside);

        vs.calculate_margin_width_and_mask();
        let first = *vs.layout();
        vs.calculate_margin_width_and_mask();
        prop_assert_eq!(*vs.layout(), first);
        prop_assert_eq!(first.fixed_column_width, widths.iter().sum::<i32>());
        prop_assert_eq!(first.mask_in_line & first.mask_draw_in_text, 0);
    }
}
