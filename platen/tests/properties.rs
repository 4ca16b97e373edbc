//! Property-based tests for decoding, normalization, layout and scrolling

use platen::block::BlockKind;
use platen::config::{LayoutConfig, LineJoin, NormalizeConfig, ViewportConfig};
use platen::cursor::locate;
use platen::layout::{Layout, LayoutPosition};
use platen::metrics::MonospaceMetrics;
use platen::normalize::{normalize, normalize_with};
use platen::utf8::{Decoded, decode};
use platen::viewport::Viewport;
use proptest::prelude::*;

const METRICS: MonospaceMetrics = MonospaceMetrics::new(1, 1);
const HARD: NormalizeConfig = NormalizeConfig {
    line_join: LineJoin::Hard,
};

fn layout_config(width: i32, tab: i32) -> LayoutConfig {
    LayoutConfig::new(width, tab).unwrap()
}

proptest! {
    // The decoder never stalls on non-empty input
    #[test]
    fn decode_always_makes_progress(bytes in prop::collection::vec(any::<u8>(), 1..16)) {
        let (decoded, consumed) = decode(&bytes);
        prop_assert!(consumed >= 1);
        prop_assert!(consumed <= bytes.len());
        prop_assert_ne!(decoded, Decoded::End);
    }

    #[test]
    fn decode_round_trips_every_char(char in any::<char>()) {
        let mut buffer = [0; 4];
        let encoded = char.encode_utf8(&mut buffer);
        prop_assert_eq!(decode(encoded.as_bytes()), (Decoded::Char(char), char.len_utf8()));
    }

    #[test]
    fn hard_normalization_is_idempotent(raw in prop::collection::vec(any::<u8>(), 0..200)) {
        let once = normalize_with(&raw, &HARD);
        let twice = normalize_with(&once, &HARD);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn soft_normalization_is_idempotent_without_paragraphs(raw in "[a-z \\t\\r\\n\u{2014}\u{2026}\u{201C}é]{0,80}") {
        let once = normalize(raw.as_bytes());
        prop_assume!(!once.contains(&b'\n'));
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalized_text_is_canonical(raw in prop::collection::vec(any::<u8>(), 0..200)) {
        let text = normalize(&raw);
        prop_assert!(text.byte_len() <= raw.len());
        let decoded = std::str::from_utf8(&text);
        prop_assert!(decoded.is_ok());
        prop_assert!(decoded.unwrap_or_default().chars().all(|char| !char.is_whitespace() || matches!(char, ' ' | '\n')));
        prop_assert!(!text.contains(&b'\r'));
        prop_assert!(!text.contains(&b'\t'));
        prop_assert!(!text.windows(2).any(|pair| pair == b"  " || pair == b"\n\n"));
        prop_assert!(!text.first().is_some_and(|byte| matches!(byte, b' ' | b'\n')));
        prop_assert!(!text.last().is_some_and(|byte| matches!(byte, b' ' | b'\n')));
    }

    #[test]
    fn locate_is_deterministic(
        text in "[a-zé🚀 \\t\\n]{0,60}",
        width in 1i32..30,
        tab in 1i32..8,
        seed in any::<prop::sample::Index>(),
    ) {
        let config = layout_config(width, tab);
        let bytes = text.as_bytes();
        let offset = seed.index(bytes.len() + 1);

        let first = locate(bytes, offset, &config, &METRICS).unwrap();
        let second = locate(bytes, offset, &config, &METRICS).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(locate(bytes, 0, &config, &METRICS).unwrap(), LayoutPosition::origin(&config));
        prop_assert!(locate(bytes, bytes.len() + 1, &config, &METRICS).is_err());
    }

    #[test]
    fn locate_at_end_is_after_last_block(text in "[a-z \\t\\n]{0,60}", width in 1i32..30) {
        let config = layout_config(width, 4);
        let bytes = text.as_bytes();

        let mut layout = Layout::new(bytes, &config, &METRICS);
        layout.by_ref().for_each(drop);
        prop_assert_eq!(locate(bytes, bytes.len(), &config, &METRICS).unwrap(), layout.position());
    }

    #[test]
    fn locate_matches_glyph_positions(text in "[a-zé \\t\\n]{0,60}", width in 1i32..30) {
        let config = layout_config(width, 4);
        let bytes = text.as_bytes();

        for placed in Layout::new(bytes, &config, &METRICS) {
            for glyph in placed.glyphs(bytes, &config, &METRICS) {
                prop_assert_eq!(
                    locate(bytes, glyph.offset, &config, &METRICS).unwrap(),
                    glyph.position()
                );
            }
        }
    }

    #[test]
    fn fitting_words_are_never_split(text in "[a-z ]{0,80}", width in 1i32..30) {
        let config = layout_config(width, 4);
        let bytes = text.as_bytes();

        for placed in Layout::new(bytes, &config, &METRICS) {
            if placed.block.kind != BlockKind::Word || placed.block.width > width {
                continue;
            }
            for glyph in placed.glyphs(bytes, &config, &METRICS) {
                prop_assert_eq!(glyph.abs_line, placed.abs_line);
            }
        }
    }

    #[test]
    fn scroll_is_monotonic(
        rows in 1u32..6,
        target in 0u32..6,
        steps in prop::collection::vec(0u32..4, 1..50),
    ) {
        prop_assume!(target < rows);
        let mut viewport = Viewport::new(ViewportConfig::new(rows, target).unwrap());

        let mut line = 0;
        let mut last = viewport.first_visible_line();
        for step in steps {
            line += step;
            let first = viewport.update(line);
            prop_assert!(first >= last);
            prop_assert!(viewport.row_of(line).is_some());
            last = first;
        }
    }
}
