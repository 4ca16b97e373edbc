//! # Layout Module - Greedy Word Wrap Over the Block Stream
//!
//! [`Layout`] consumes blocks from the tokenizer and assigns every block an
//! absolute line and a pen position. Nothing is materialized or cached: the
//! stream is replayed from the start of the text whenever a position is needed.
//!
//! ## Wrap Rules
//!
#![doc = simple_mermaid::mermaid!("../diagrams/wrap_rules.mmd")]
//!
//! - **Newline**: placed at the pen, then the pen moves to the start of the next line
//! - **Word / Tab**: if the pen isn't at the line start and the block would
//!   cross the right edge, the pen moves to the next line first
//! - **Word look-ahead**: if a word fits but the first character of the space
//!   run after it would not, the word moves to the next line as well, so a
//!   word and its trailing space stay together
//! - **Space run**: never wraps and may overflow the right edge
//! - **Long word**: a word wider than the whole line wraps at the first
//!   codepoint that would cross the right edge
//!
//! ## Example
//!
//! ```text
//! viewport_width = 10
//!
//! "The quick brown fox"
//!  line 0: [The][ ][quick][ ]      pen_x 0..10
//!  line 1: [brown][ ][fox]         pen_x 0..9
//! ```

use tracing::trace;

use crate::block::{BlockKind, Scan, TextBlock, next_block, tab_advance};
use crate::config::LayoutConfig;
use crate::metrics::GlyphMetrics;
use crate::utf8::{Codepoints, Decoded};
use crate::{AbsLine, Px};

/// Absolute line and pen position of a point in the laid-out text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutPosition {
    pub abs_line: AbsLine,
    pub pen_x: Px,
}

impl LayoutPosition {
    /// The start of the first line
    pub const fn origin(config: &LayoutConfig) -> Self {
        Self {
            abs_line: 0,
            pen_x: config.origin_x,
        }
    }
}

/// A block together with the position it was placed at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedBlock {
    pub block: TextBlock,
    /// Line of the block's first codepoint
    pub abs_line: AbsLine,
    /// Pen position before the block's first codepoint
    pub pen_x: Px,
}

impl PlacedBlock {
    pub const fn position(&self) -> LayoutPosition {
        LayoutPosition {
            abs_line: self.abs_line,
            pen_x: self.pen_x,
        }
    }

    /// Positions of every codepoint in the block, including mid-word wraps
    pub fn glyphs<'a, M: GlyphMetrics>(
        &self,
        text: &'a [u8],
        config: &'a LayoutConfig,
        metrics: &'a M,
    ) -> BlockGlyphs<'a, M> {
        BlockGlyphs {
            codepoints: Codepoints::new(text, self.block.start),
            block: self.block,
            position: self.position(),
            config,
            metrics,
        }
    }
}

/// A single codepoint with the position it is drawn at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedGlyph {
    /// Byte offset of the codepoint
    pub offset: usize,
    /// Byte length of the codepoint
    pub len: usize,
    pub char: char,
    pub kind: BlockKind,
    pub abs_line: AbsLine,
    pub pen_x: Px,
    pub advance: Px,
}

impl PlacedGlyph {
    pub const fn position(&self) -> LayoutPosition {
        LayoutPosition {
            abs_line: self.abs_line,
            pen_x: self.pen_x,
        }
    }
}

/// Iterator over the glyphs of one placed block
pub struct BlockGlyphs<'a, M> {
    codepoints: Codepoints<'a>,
    block: TextBlock,
    position: LayoutPosition,
    config: &'a LayoutConfig,
    metrics: &'a M,
}

impl<M> BlockGlyphs<'_, M> {
    /// Pen position after the last glyph yielded so far
    pub const fn position(&self) -> LayoutPosition {
        self.position
    }
}

impl<M: GlyphMetrics> Iterator for BlockGlyphs<'_, M> {
    type Item = PlacedGlyph;

    fn next(&mut self) -> Option<Self::Item> {
        if self.codepoints.offset() >= self.block.end() {
            return None;
        }
        let (offset, decoded, len) = self.codepoints.next()?;
        // Blocks never contain malformed bytes
        let Decoded::Char(char) = decoded else {
            return None;
        };

        let advance = match self.block.kind {
            BlockKind::Newline => 0,
            BlockKind::Tab => self.block.width,
            BlockKind::Word | BlockKind::SpaceRun => self.metrics.advance(
                char,
                self.config.variant,
                self.config.fallback_advance,
            ),
        };

        // A word too long for a line of its own breaks at the codepoint that
        // crosses the right edge
        if self.block.kind == BlockKind::Word
            && overflows(self.position.pen_x, advance, self.config)
        {
            self.position = next_line(self.position, self.config);
        }

        let glyph = PlacedGlyph {
            offset,
            len,
            char,
            kind: self.block.kind,
            abs_line: self.position.abs_line,
            pen_x: self.position.pen_x,
            advance,
        };

        if self.block.kind == BlockKind::Newline {
            self.position = next_line(self.position, self.config);
        } else {
            self.position.pen_x = self.position.pen_x.saturating_add(advance);
        }

        Some(glyph)
    }
}

/// True if the pen isn't at the line start and `width` would cross the right edge
const fn overflows(pen_x: Px, width: Px, config: &LayoutConfig) -> bool {
    pen_x != config.origin_x && pen_x.saturating_add(width) > config.right_edge()
}

const fn next_line(position: LayoutPosition, config: &LayoutConfig) -> LayoutPosition {
    LayoutPosition {
        abs_line: position.abs_line.saturating_add(1),
        pen_x: config.origin_x,
    }
}

/// Incremental layout of a text, one placed block at a time
pub struct Layout<'a, M> {
    text: &'a [u8],
    config: &'a LayoutConfig,
    metrics: &'a M,
    offset: usize,
    position: LayoutPosition,
}

impl<'a, M: GlyphMetrics> Layout<'a, M> {
    pub const fn new(text: &'a [u8], config: &'a LayoutConfig, metrics: &'a M) -> Self {
        Self {
            text,
            config,
            metrics,
            offset: 0,
            position: LayoutPosition::origin(config),
        }
    }

    /// Byte offset the next block will be scanned from
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Pen position after the last placed block
    pub const fn position(&self) -> LayoutPosition {
        self.position
    }

    /// Peek at the block after `word` without consuming anything, and report
    /// whether its first space would cross the right edge once `word` is
    /// placed at the current pen.
    fn trailing_space_overflows(&self, word: &TextBlock) -> bool {
        let pen_after = self.position.pen_x.saturating_add(word.width);
        let Scan::Block(next) =
            next_block(self.text, word.end(), pen_after, self.config, self.metrics)
        else {
            return false;
        };
        if next.kind != BlockKind::SpaceRun {
            return false;
        }

        let first_space = Codepoints::new(self.text, next.start)
            .next()
            .and_then(|(_, decoded, _)| decoded.char())
            .map_or(self.config.fallback_advance, |char| {
                self.metrics
                    .advance(char, self.config.variant, self.config.fallback_advance)
            });

        pen_after.saturating_add(first_space) > self.config.right_edge()
    }

    fn wrap(&mut self) {
        self.position = next_line(self.position, self.config);
    }

    fn place(&mut self, mut block: TextBlock) -> PlacedBlock {
        match block.kind {
            BlockKind::Newline => {
                let placed = self.placed(block);
                self.wrap();
                placed
            }
            BlockKind::SpaceRun => {
                let placed = self.placed(block);
                self.position.pen_x = self.position.pen_x.saturating_add(block.width);
                placed
            }
            BlockKind::Tab => {
                if overflows(self.position.pen_x, block.width, self.config) {
                    self.wrap();
                    // The tab now starts at a stop
                    block.width = tab_advance(self.position.pen_x, self.config);
                }
                let placed = self.placed(block);
                self.position.pen_x = self.position.pen_x.saturating_add(block.width);
                placed
            }
            BlockKind::Word => {
                if overflows(self.position.pen_x, block.width, self.config)
                    || (self.position.pen_x != self.config.origin_x
                        && self.trailing_space_overflows(&block))
                {
                    self.wrap();
                }

                let placed = self.placed(block);
                let end = self.position.pen_x.saturating_add(block.width);
                if end <= self.config.right_edge() {
                    self.position.pen_x = end;
                } else {
                    // Too wide for a whole line, walk it for the mid-word wraps
                    let mut glyphs = placed.glyphs(self.text, self.config, self.metrics);
                    glyphs.by_ref().for_each(drop);
                    self.position = glyphs.position();
                }
                placed
            }
        }
    }

    const fn placed(&self, block: TextBlock) -> PlacedBlock {
        PlacedBlock {
            block,
            abs_line: self.position.abs_line,
            pen_x: self.position.pen_x,
        }
    }
}

impl<M: GlyphMetrics> Iterator for Layout<'_, M> {
    type Item = PlacedBlock;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match next_block(
                self.text,
                self.offset,
                self.position.pen_x,
                self.config,
                self.metrics,
            ) {
                Scan::End => return None,
                Scan::Invalid => {
                    trace!(offset = self.offset, "skipping malformed byte");
                    self.offset += 1;
                }
                Scan::Block(block) => {
                    self.offset = block.end();
                    return Some(self.place(block));
                }
            }
        }
    }
}

impl<M: GlyphMetrics> std::iter::FusedIterator for Layout<'_, M> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MonospaceMetrics;

    const METRICS: MonospaceMetrics = MonospaceMetrics::new(1, 1);

    fn config(width: Px) -> LayoutConfig {
        LayoutConfig::new(width, 4).unwrap()
    }

    fn lines(text: &str, width: Px) -> Vec<(AbsLine, Px, String)> {
        let config = config(width);
        Layout::new(text.as_bytes(), &config, &METRICS)
            .map(|placed| {
                let range = placed.block.start..placed.block.end();
                (
                    placed.abs_line,
                    placed.pen_x,
                    text[range].to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn test_words_wrap_before_overflowing() {
        assert_eq!(
            lines("The quick brown fox", 10),
            vec![
                (0, 0, "The".into()),
                (0, 3, " ".into()),
                (0, 4, "quick".into()),
                (0, 9, " ".into()),
                (1, 0, "brown".into()),
                (1, 5, " ".into()),
                (1, 6, "fox".into()),
            ]
        );
    }

    #[test]
    fn test_word_moves_with_its_trailing_space() {
        // "quick" ends exactly at the edge, its space wouldn't fit
        assert_eq!(
            lines("The quick brown", 9),
            vec![
                (0, 0, "The".into()),
                (0, 3, " ".into()),
                (1, 0, "quick".into()),
                (1, 5, " ".into()),
                (2, 0, "brown".into()),
            ]
        );
    }

    #[test]
    fn test_last_word_without_space_may_touch_edge() {
        assert_eq!(
            lines("ab cd", 5),
            vec![(0, 0, "ab".into()), (0, 2, " ".into()), (0, 3, "cd".into())]
        );
    }

    #[test]
    fn test_spaces_overflow_instead_of_wrapping() {
        let placed = lines("abcd    e", 5);
        assert_eq!(placed[1], (0, 4, "    ".into()));
        assert_eq!(placed[2], (1, 0, "e".into()));
    }

    #[test]
    fn test_long_word_glyphs_break_at_edge() {
        let text = "ab abcdefgh";
        let config = config(4);
        let glyphs: Vec<(AbsLine, Px, char)> = Layout::new(text.as_bytes(), &config, &METRICS)
            .flat_map(|placed| placed.glyphs(text.as_bytes(), &config, &METRICS))
            .map(|glyph| (glyph.abs_line, glyph.pen_x, glyph.char))
            .collect();
        assert_eq!(glyphs[3], (1, 0, 'a'));
        assert_eq!(glyphs[6], (1, 3, 'd'));
        assert_eq!(glyphs[7], (2, 0, 'e'));
        assert_eq!(glyphs[10], (2, 3, 'h'));
    }

    #[test]
    fn test_newline_moves_pen_to_next_line() {
        let config = config(10);
        let mut layout = Layout::new(b"ab\ncd", &config, &METRICS);
        layout.next();
        let newline = layout.next().unwrap();
        assert_eq!(newline.block.kind, BlockKind::Newline);
        assert_eq!(newline.position(), LayoutPosition { abs_line: 0, pen_x: 2 });
        assert_eq!(layout.position(), LayoutPosition { abs_line: 1, pen_x: 0 });
    }

    #[test]
    fn test_tab_wraps_and_restarts_at_stop() {
        // Pen at 9 of 10, a tab to the stop at 12 would overflow
        let config = config(10);
        let placed: Vec<_> = Layout::new(b"abcdefghi\tx", &config, &METRICS).collect();
        assert_eq!(placed[1].block.kind, BlockKind::Tab);
        assert_eq!(placed[1].position(), LayoutPosition { abs_line: 1, pen_x: 0 });
        assert_eq!(placed[1].block.width, 4);
        assert_eq!(placed[2].position(), LayoutPosition { abs_line: 1, pen_x: 4 });
    }

    #[test]
    fn test_malformed_bytes_are_skipped() {
        let text = [b'a', 0xFF, 0xFE, b'b'];
        let config = config(10);
        let placed: Vec<_> = Layout::new(&text, &config, &METRICS).collect();
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[1].block.start, 3);
        assert_eq!(placed[1].pen_x, 1);
    }

    #[test]
    fn test_layout_is_empty_for_empty_text() {
        let config = config(10);
        assert_eq!(Layout::new(b"", &config, &METRICS).count(), 0);
    }
}
