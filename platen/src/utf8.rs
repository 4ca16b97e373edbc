//! # UTF-8 Module - Strict Single-Codepoint Decoding
//!
//! Decodes one codepoint at a time from a byte slice. Every consumer in this
//! crate (normalizer, tokenizer, layout, comparator) walks text through
//! [`decode`] or the [`Codepoints`] iterator, so malformed input is handled in
//! exactly one place.
//!
//! ## Progress Guarantee
//!
//! [`decode`] never reports `0` bytes consumed for a non-empty slice. A
//! malformed sequence yields [`Decoded::Invalid`] and consumes exactly one
//! byte, so a loop that advances by the consumed length always terminates.
//!
//! ```rust
//! use platen::utf8::{decode, Decoded};
//!
//! assert_eq!(decode("é!".as_bytes()), (Decoded::Char('é'), 2));
//! assert_eq!(decode(&[0xC3, b'!']), (Decoded::Invalid, 1));
//! assert_eq!(decode(&[]), (Decoded::End, 0));
//! ```

/// Outcome of decoding the codepoint at the start of a byte slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A well-formed codepoint
    Char(char),
    /// A malformed leading byte, a missing or invalid continuation byte, an
    /// overlong encoding, a surrogate, or a value above `U+10FFFF`
    Invalid,
    /// The slice is empty
    End,
}

impl Decoded {
    /// Returns the decoded character, if any
    pub const fn char(self) -> Option<char> {
        match self {
            Self::Char(char) => Some(char),
            _ => None,
        }
    }
}

/// Expected sequence length for a leading byte, `None` if it can't start one
const fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        // 0x80..=0xBF are continuation bytes, 0xC0/0xC1 are always overlong,
        // 0xF5.. would encode values past U+10FFFF
        _ => None,
    }
}

const fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Decode the codepoint at the start of `bytes`.
///
/// Returns the decoded value and the number of bytes it occupies. The count
/// is `0` only for [`Decoded::End`] and `1` for [`Decoded::Invalid`].
pub fn decode(bytes: &[u8]) -> (Decoded, usize) {
    let Some(&lead) = bytes.first() else {
        return (Decoded::End, 0);
    };

    let Some(len) = sequence_len(lead) else {
        return (Decoded::Invalid, 1);
    };

    if len == 1 {
        return (Decoded::Char(char::from(lead)), 1);
    }

    let Some(tail) = bytes.get(1..len) else {
        // Truncated sequence at the end of the slice
        return (Decoded::Invalid, 1);
    };

    if !tail.iter().all(|&byte| is_continuation(byte)) {
        return (Decoded::Invalid, 1);
    }

    let mut value = u32::from(lead) & (0x7F >> len);
    for &byte in tail {
        value = (value << 6) | (u32::from(byte) & 0x3F);
    }

    // Reject overlong forms: each length has a minimum value it may encode
    let minimum = match len {
        2 => 0x80,
        3 => 0x800,
        _ => 0x1_0000,
    };
    if value < minimum {
        return (Decoded::Invalid, 1);
    }

    // `from_u32` rejects surrogates and values past U+10FFFF
    match char::from_u32(value) {
        Some(char) => (Decoded::Char(char), len),
        None => (Decoded::Invalid, 1),
    }
}

/// Byte length of the codepoint at `offset`, or `1` if the text is malformed
/// there, or `0` at the end of the text.
pub fn len_at(bytes: &[u8], offset: usize) -> usize {
    bytes.get(offset..).map_or(0, |rest| decode(rest).1)
}

/// Iterator over `(offset, decoded, len)` triples of a byte slice.
///
/// Yields [`Decoded::Invalid`] entries for malformed bytes instead of
/// stopping, and never yields [`Decoded::End`].
#[derive(Debug, Clone)]
pub struct Codepoints<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Codepoints<'a> {
    /// Iterate over `bytes` starting at byte `offset`
    pub const fn new(bytes: &'a [u8], offset: usize) -> Self {
        Self { bytes, offset }
    }

    /// Byte offset of the next codepoint
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

impl Iterator for Codepoints<'_> {
    type Item = (usize, Decoded, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.bytes.get(self.offset..)?;
        match decode(rest) {
            (Decoded::End, _) => None,
            (decoded, len) => {
                let offset = self.offset;
                self.offset += len;
                Some((offset, decoded, len))
            }
        }
    }
}

impl std::iter::FusedIterator for Codepoints<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_each_length() {
        assert_eq!(decode(b"a"), (Decoded::Char('a'), 1));
        assert_eq!(decode("ß".as_bytes()), (Decoded::Char('ß'), 2));
        assert_eq!(decode("€".as_bytes()), (Decoded::Char('€'), 3));
        assert_eq!(decode("🚀".as_bytes()), (Decoded::Char('🚀'), 4));
    }

    #[test]
    fn test_decode_only_reads_first_codepoint() {
        assert_eq!(decode("héllo".as_bytes()), (Decoded::Char('h'), 1));
        assert_eq!(decode("éa".as_bytes()), (Decoded::Char('é'), 2));
    }

    #[test]
    fn test_decode_empty_is_end() {
        assert_eq!(decode(&[]), (Decoded::End, 0));
    }

    #[test]
    fn test_decode_rejects_malformed() {
        // Lone continuation byte
        assert_eq!(decode(&[0x80]), (Decoded::Invalid, 1));
        // Truncated two-byte sequence
        assert_eq!(decode(&[0xC3]), (Decoded::Invalid, 1));
        // Bad continuation
        assert_eq!(decode(&[0xE2, 0x28, 0xA1]), (Decoded::Invalid, 1));
        // Overlong '/'
        assert_eq!(decode(&[0xC0, 0xAF]), (Decoded::Invalid, 1));
        assert_eq!(decode(&[0xE0, 0x80, 0xAF]), (Decoded::Invalid, 1));
        // Surrogate U+D800
        assert_eq!(decode(&[0xED, 0xA0, 0x80]), (Decoded::Invalid, 1));
        // Past U+10FFFF
        assert_eq!(decode(&[0xF4, 0x90, 0x80, 0x80]), (Decoded::Invalid, 1));
        assert_eq!(decode(&[0xFF]), (Decoded::Invalid, 1));
    }

    #[test]
    fn test_codepoints_skip_invalid_bytes() {
        let bytes = [b'a', 0xFF, 0xC3, 0xA9, b'b'];
        let items: Vec<_> = Codepoints::new(&bytes, 0).collect();
        assert_eq!(
            items,
            vec![
                (0, Decoded::Char('a'), 1),
                (1, Decoded::Invalid, 1),
                (2, Decoded::Char('é'), 2),
                (4, Decoded::Char('b'), 1),
            ]
        );
    }

    #[test]
    fn test_len_at() {
        let text = "aé".as_bytes();
        assert_eq!(len_at(text, 0), 1);
        assert_eq!(len_at(text, 1), 2);
        assert_eq!(len_at(text, 3), 0);
        assert_eq!(len_at(text, 10), 0);
    }
}
