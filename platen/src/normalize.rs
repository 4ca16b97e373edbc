//! # Normalize Module - Raw Text to Canonical Text
//!
//! One forward pass over the raw bytes that produces the [`CanonicalText`]
//! a session is typed against:
//!
//! 1. `"\r\n"` and lone `"\r"` become `"\n"`
//! 2. En and em dashes become `-`, the ellipsis becomes `...`, curly quotes
//!    become `'`
//! 3. Runs of other whitespace (spaces, tabs, no-break spaces) become one space. With [`LineJoin::Soft`] a single
//!    newline joins its lines with a space and two or more newlines become one
//!    paragraph break; with [`LineJoin::Hard`] every newline run becomes one
//!    line break. Leading and trailing whitespace is removed.
//!
//! Malformed byte sequences are dropped. The output is never longer than the
//! input.
//!
//! ```rust
//! use platen::normalize::normalize;
//!
//! let text = normalize(b"  Hello,\r\nworld\xE2\x80\xA6\n\n\nBye\t\t now  ");
//! assert_eq!(text.to_string_lossy(), "Hello, world...\nBye now");
//! ```

use tracing::debug;

use crate::config::{LineJoin, NormalizeConfig};
use crate::text::CanonicalText;
use crate::utf8::{Codepoints, Decoded};

/// Normalize `raw` with the default configuration
pub fn normalize(raw: &[u8]) -> CanonicalText {
    normalize_with(raw, &NormalizeConfig::default())
}

/// Normalize `raw` into canonical text
pub fn normalize_with(raw: &[u8], config: &NormalizeConfig) -> CanonicalText {
    let mut writer = Writer::new(raw.len(), config.line_join);
    let mut codepoints = Codepoints::new(raw, 0).peekable();
    let mut dropped = 0usize;

    while let Some((_, decoded, _)) = codepoints.next() {
        let char = match decoded {
            Decoded::Char(char) => char,
            Decoded::Invalid => {
                dropped += 1;
                continue;
            }
            Decoded::End => break,
        };

        match char {
            '\r' => {
                // "\r\n" is a single line break
                if matches!(codepoints.peek(), Some((_, Decoded::Char('\n'), _))) {
                    codepoints.next();
                }
                writer.newline();
            }
            '\n' => writer.newline(),
            ' ' | '\t' => writer.space(),
            '\u{2013}' | '\u{2014}' => writer.content("-"),
            '\u{2026}' => writer.content("..."),
            '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}' => writer.content("'"),
            other if other.is_whitespace() => writer.space(),
            other => writer.content(other.encode_utf8(&mut [0; 4])),
        }
    }

    let output = writer.finish();
    debug!(
        input_bytes = raw.len(),
        output_bytes = output.len(),
        dropped_bytes = dropped,
        "normalized text"
    );

    CanonicalText::from_canonical(output)
}

/// Output buffer that defers whitespace until the next piece of content, so
/// leading and trailing whitespace never reaches the output.
struct Writer {
    output: Vec<u8>,
    line_join: LineJoin,
    pending_space: bool,
    pending_newlines: usize,
}

impl Writer {
    fn new(capacity: usize, line_join: LineJoin) -> Self {
        Self {
            output: Vec::with_capacity(capacity),
            line_join,
            pending_space: false,
            pending_newlines: 0,
        }
    }

    const fn space(&mut self) {
        self.pending_space = true;
    }

    const fn newline(&mut self) {
        self.pending_newlines += 1;
    }

    fn separator(&self) -> Option<u8> {
        match (self.pending_newlines, self.line_join) {
            (0, _) => self.pending_space.then_some(b' '),
            (1, LineJoin::Soft) => Some(b' '),
            _ => Some(b'\n'),
        }
    }

    fn content(&mut self, content: &str) {
        if !self.output.is_empty()
            && let Some(separator) = self.separator()
        {
            self.output.push(separator);
        }
        self.pending_space = false;
        self.pending_newlines = 0;
        self.output.extend_from_slice(content.as_bytes());
    }

    fn finish(self) -> Vec<u8> {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soft(raw: &str) -> String {
        normalize(raw.as_bytes()).to_string_lossy()
    }

    fn hard(raw: &str) -> String {
        let config = NormalizeConfig {
            line_join: LineJoin::Hard,
        };
        normalize_with(raw.as_bytes(), &config).to_string_lossy()
    }

    #[test]
    fn test_line_endings_fold() {
        assert_eq!(hard("a\r\nb\rc\nd"), "a\nb\nc\nd");
        assert_eq!(soft("a\r\nb"), "a b");
        // "\r\n\r\n" is two line breaks, not four
        assert_eq!(soft("a\r\n\r\nb"), "a\nb");
    }

    #[test]
    fn test_typographic_substitutions() {
        assert_eq!(soft("a\u{2014}b \u{2013} c"), "a-b - c");
        assert_eq!(soft("wait\u{2026}"), "wait...");
        assert_eq!(soft("\u{201C}it\u{2019}s\u{201D} \u{2018}x\u{2019}"), "'it's' 'x'");
    }

    #[test]
    fn test_whitespace_collapse() {
        assert_eq!(soft("a  \t b"), "a b");
        assert_eq!(soft("   lead and trail \n\n "), "lead and trail");
        assert_eq!(soft("one\ntwo"), "one two");
        assert_eq!(soft("one \n two"), "one two");
    }

    #[test]
    fn test_unicode_whitespace_collapses_like_spaces() {
        assert_eq!(soft("a\u{a0}\u{a0}\u{a0}b\u{b}\u{b}c"), "a b c");
        assert_eq!(soft("a \u{2003}\t\u{3000}b"), "a b");
        assert_eq!(soft("\u{a0}x\u{feff}"), "x\u{feff}");
    }

    #[test]
    fn test_blank_lines_collapse_to_one_newline() {
        // Two blank lines between paragraphs
        assert_eq!(soft("first\n\n\nsecond"), "first\nsecond");
        assert_eq!(soft("first\n  \n\t\nsecond"), "first\nsecond");
        assert_eq!(hard("first\n\n\nsecond"), "first\nsecond");
    }

    #[test]
    fn test_only_whitespace_is_empty() {
        assert_eq!(soft(" \n\t\r\n "), "");
        assert_eq!(soft(""), "");
    }

    #[test]
    fn test_malformed_bytes_are_dropped() {
        let raw = [b'a', 0xFF, b'b', 0xC3, b' ', 0xE2, 0x82, b'c'];
        assert_eq!(normalize(&raw).to_string_lossy(), "ab c");
    }

    #[test]
    fn test_output_never_longer_than_input() {
        let raw = "\u{2014}\u{2026}\u{201C}x\u{201D}  \r\n\r\n y";
        let output = normalize(raw.as_bytes());
        assert!(output.byte_len() <= raw.len());
    }

    #[test]
    fn test_hard_join_is_idempotent() {
        let once = hard("a\n\n b \r\n c\u{2026}  d");
        assert_eq!(hard(&once), once);
    }

    #[test]
    fn test_soft_join_is_idempotent_without_paragraphs() {
        let once = soft("a\n b \r\n c\u{2026}  d");
        assert!(!once.contains('\n'));
        assert_eq!(soft(&once), once);
    }
}
