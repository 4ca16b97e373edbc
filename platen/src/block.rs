//! # Block Module - Classified Runs of Canonical Text
//!
//! A [`TextBlock`] is the unit the layout engine makes wrap decisions on:
//!
//! ```text
//! Text:   [T][h][e][ ][ ][q][u][i][c][k][\t][\n]
//! Blocks: [-Word--][Space][---Word------][Tab][Newline]
//! ```
//!
//! Word and space runs are maximal, and a tab or newline is always a block of
//! its own. Blocks are produced on demand by [`next_block`] because the width
//! of a tab depends on where the pen is when the tab is reached.

use strum::Display;

use crate::Px;
use crate::config::LayoutConfig;
use crate::metrics::GlyphMetrics;
use crate::utf8::{Codepoints, Decoded, decode};

/// Classification of a block, taken from its first codepoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum BlockKind {
    Word,
    SpaceRun,
    Tab,
    Newline,
}

/// A classified run of bytes in the canonical text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBlock {
    /// Byte offset of the first codepoint
    pub start: usize,
    /// Length in bytes, never zero
    pub len: usize,
    /// Sum of the advances of the block's codepoints
    pub width: Px,
    pub kind: BlockKind,
}

impl TextBlock {
    /// Byte offset one past the block's last byte
    pub const fn end(&self) -> usize {
        self.start + self.len
    }

    /// True if `offset` lies inside the block
    pub const fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end()
    }
}

/// Result of scanning for the next block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    Block(TextBlock),
    /// The byte at the scan offset is malformed. Advance by one and retry.
    Invalid,
    /// The scan offset is at or past the end of the text
    End,
}

/// Whether `char` continues a space run. Tabs and newlines never do.
pub fn is_run_space(char: char) -> bool {
    char.is_whitespace() && !matches!(char, '\t' | '\n')
}

/// Width of a tab that starts at `pen_x`: the distance to the next tab stop
pub const fn tab_advance(pen_x: Px, config: &LayoutConfig) -> Px {
    let column = (pen_x - config.origin_x).rem_euclid(config.tab_width);
    config.tab_width - column
}

/// Scan the block starting at byte `offset` when the pen is at `pen_x`.
///
/// Pure: the same arguments always yield the same block, so callers may peek
/// ahead without any state to restore.
pub fn next_block(
    text: &[u8],
    offset: usize,
    pen_x: Px,
    config: &LayoutConfig,
    metrics: &impl GlyphMetrics,
) -> Scan {
    let Some(rest) = text.get(offset..) else {
        return Scan::End;
    };

    let first = match decode(rest) {
        (Decoded::End, _) => return Scan::End,
        (Decoded::Invalid, _) => return Scan::Invalid,
        (Decoded::Char(char), _) => char,
    };

    let single = |kind, width| {
        Scan::Block(TextBlock {
            start: offset,
            len: 1,
            width,
            kind,
        })
    };

    match first {
        '\n' => return single(BlockKind::Newline, 0),
        '\t' => return single(BlockKind::Tab, tab_advance(pen_x, config)),
        _ => {}
    }

    let spaces = is_run_space(first);
    let kind = if spaces {
        BlockKind::SpaceRun
    } else {
        BlockKind::Word
    };

    let mut end = offset;
    let mut width: Px = 0;
    for (at, decoded, len) in Codepoints::new(text, offset) {
        // A malformed byte ends the run so the next scan reports it
        let Decoded::Char(char) = decoded else { break };
        if matches!(char, '\n' | '\t') || is_run_space(char) != spaces {
            break;
        }
        width = width.saturating_add(metrics.advance(
            char,
            config.variant,
            config.fallback_advance,
        ));
        end = at + len;
    }

    Scan::Block(TextBlock {
        start: offset,
        len: end - offset,
        width,
        kind,
    })
}
