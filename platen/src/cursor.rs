//! # Cursor Module - Byte Offset to Caret Position
//!
//! Maps a byte offset in the canonical text to the line and pen position the
//! caret is drawn at, by replaying the layout from the start of the text.
//! There is no cache: the result is a pure function of the text, the offset,
//! the layout configuration and the glyph metrics.

use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::layout::{Layout, LayoutPosition};
use crate::metrics::GlyphMetrics;

/// Find the line and pen position of the caret at byte `offset`.
///
/// Replays the layout from the start of `text` up to the block containing
/// `offset`, then walks that block's codepoints. The caret sits where the
/// codepoint at `offset` is drawn, so an offset at the start of a wrapped word
/// reports the start of the next line. `offset == text.len()` reports the pen
/// after the last block.
///
/// An offset inside a multi-byte codepoint reports that codepoint's position.
///
/// # Errors
///
/// [`LayoutError::OffsetOutOfRange`] if `offset` is past the end of `text`.
///
/// ```rust
/// use platen::config::LayoutConfig;
/// use platen::cursor::locate;
/// use platen::metrics::MonospaceMetrics;
///
/// let config = LayoutConfig::new(10, 4).unwrap();
/// let text = b"The quick brown fox";
/// let position = locate(text, 10, &config, &MonospaceMetrics::default()).unwrap();
/// assert_eq!((position.abs_line, position.pen_x), (1, 0));
/// ```
pub fn locate<M: GlyphMetrics>(
    text: &[u8],
    offset: usize,
    config: &LayoutConfig,
    metrics: &M,
) -> Result<LayoutPosition, LayoutError> {
    if offset > text.len() {
        return Err(LayoutError::OffsetOutOfRange {
            offset,
            len: text.len(),
        });
    }

    let mut layout = Layout::new(text, config, metrics);
    if offset == 0 {
        return Ok(layout.position());
    }

    let mut before = layout.position();
    while let Some(placed) = layout.next() {
        if offset < placed.block.start {
            // Inside malformed bytes skipped before this block
            return Ok(before);
        }
        if placed.block.contains(offset) {
            let position = placed
                .glyphs(text, config, metrics)
                .find(|glyph| offset < glyph.offset + glyph.len)
                .map_or_else(|| placed.position(), |glyph| glyph.position());
            return Ok(position);
        }
        before = layout.position();
    }

    Ok(before)
}
