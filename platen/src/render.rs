//! # Render Module - Glyph Streams for a Window of Lines
//!
//! A frontend draws one window of lines per frame. [`Glyphs`] replays the
//! layout, expands the blocks that reach into the window into
//! [`PlacedGlyph`]s and stops as soon as the layout moves past it.
//! [`RenderingIterator`] adds the typing state of each glyph on top.
//!
//! ```rust
//! use platen::config::LayoutConfig;
//! use platen::metrics::MonospaceMetrics;
//! use platen::render::Glyphs;
//!
//! let config = LayoutConfig::new(10, 4).unwrap();
//! let metrics = MonospaceMetrics::default();
//!
//! let second_line: String = Glyphs::new(b"The quick brown fox", &config, &metrics, 1..2)
//!     .map(|glyph| glyph.char)
//!     .collect();
//! assert_eq!(second_line, "brown fox");
//! ```

use std::ops::Range;

use strum::Display;

use crate::AbsLine;
use crate::comparator::{Comparator, Verdict};
use crate::config::LayoutConfig;
use crate::layout::{BlockGlyphs, Layout, PlacedGlyph};
use crate::metrics::GlyphMetrics;

/// Glyphs of the lines in `lines`, in text order
pub struct Glyphs<'a, M> {
    text: &'a [u8],
    config: &'a LayoutConfig,
    metrics: &'a M,
    layout: Layout<'a, M>,
    current: Option<BlockGlyphs<'a, M>>,
    lines: Range<AbsLine>,
    done: bool,
}

impl<'a, M: GlyphMetrics> Glyphs<'a, M> {
    pub fn new(
        text: &'a [u8],
        config: &'a LayoutConfig,
        metrics: &'a M,
        lines: Range<AbsLine>,
    ) -> Self {
        Self {
            text,
            config,
            metrics,
            layout: Layout::new(text, config, metrics),
            current: None,
            done: lines.is_empty(),
            lines,
        }
    }
}

impl<M: GlyphMetrics> Iterator for Glyphs<'_, M> {
    type Item = PlacedGlyph;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            if let Some(glyphs) = &mut self.current {
                for glyph in glyphs.by_ref() {
                    if glyph.abs_line >= self.lines.end {
                        self.done = true;
                        return None;
                    }
                    if glyph.abs_line >= self.lines.start {
                        return Some(glyph);
                    }
                }
                self.current = None;
            }

            let Some(placed) = self.layout.next() else {
                self.done = true;
                break;
            };
            if placed.abs_line >= self.lines.end {
                self.done = true;
                break;
            }
            // Blocks that end above the window need no expanding
            if self.layout.position().abs_line >= self.lines.start {
                self.current = Some(placed.glyphs(self.text, self.config, self.metrics));
            }
        }
        None
    }
}

impl<M: GlyphMetrics> std::iter::FusedIterator for Glyphs<'_, M> {}

/// Typing state of a glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum GlyphState {
    /// Not typed yet
    Pending,
    Correct,
    Wrong,
}

impl From<Option<Verdict>> for GlyphState {
    fn from(value: Option<Verdict>) -> Self {
        match value {
            None => Self::Pending,
            Some(Verdict::Correct) => Self::Correct,
            Some(Verdict::Wrong) => Self::Wrong,
        }
    }
}

/// Everything a frontend needs to draw one glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderingContext {
    pub glyph: PlacedGlyph,
    pub state: GlyphState,
    /// The caret sits on this glyph
    pub has_cursor: bool,
}

/// Glyphs of a window of lines, with their typing state
pub struct RenderingIterator<'a, M> {
    glyphs: Glyphs<'a, M>,
    comparator: &'a Comparator,
    cursor: usize,
}

impl<'a, M: GlyphMetrics> RenderingIterator<'a, M> {
    pub const fn new(glyphs: Glyphs<'a, M>, comparator: &'a Comparator, cursor: usize) -> Self {
        Self {
            glyphs,
            comparator,
            cursor,
        }
    }
}

impl<M: GlyphMetrics> Iterator for RenderingIterator<'_, M> {
    type Item = RenderingContext;

    fn next(&mut self) -> Option<Self::Item> {
        let glyph = self.glyphs.next()?;
        Some(RenderingContext {
            state: self.comparator.verdict_at(glyph.offset).into(),
            has_cursor: glyph.offset <= self.cursor && self.cursor < glyph.offset + glyph.len,
            glyph,
        })
    }
}

impl<M: GlyphMetrics> std::iter::FusedIterator for RenderingIterator<'_, M> {}
