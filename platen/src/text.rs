use derive_more::{Deref, Display};

use crate::utf8;

/// Immutable, normalized text a session is typed against.
///
/// Created once by [`normalize`](crate::normalize::normalize) and never
/// mutated afterwards. Dereferences to its bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deref)]
pub struct CanonicalText(Box<[u8]>);

impl CanonicalText {
    /// Wrap bytes that are already in canonical form, skipping normalization
    pub fn from_canonical(bytes: impl Into<Box<[u8]>>) -> Self {
        Self(bytes.into())
    }

    /// Byte length of the text
    pub fn byte_len(&self) -> usize {
        self.0.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Byte length of the codepoint at `offset`.
    ///
    /// Returns `1` for a malformed byte and `0` at or past the end.
    pub fn char_len_at(&self, offset: usize) -> usize {
        utf8::len_at(&self.0, offset)
    }

    /// Everything from `offset` to the end, or an empty slice if out of range
    pub fn tail(&self, offset: usize) -> &[u8] {
        self.0.get(offset..).unwrap_or_default()
    }

    /// Lossy string view, mostly for debugging and tests
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

impl From<CanonicalText> for Vec<u8> {
    fn from(value: CanonicalText) -> Self {
        value.0.into_vec()
    }
}

/// Bytes the user has committed, always whole codepoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, Display)]
pub struct InputBuffer(String);

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one codepoint
    pub fn push(&mut self, codepoint: char) {
        self.0.push(codepoint);
    }

    /// Remove the last whole codepoint
    pub fn pop(&mut self) -> Option<char> {
        self.0.pop()
    }

    /// Byte length of the input, the `current_input_byte_idx`
    pub fn byte_len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_buffer_pops_whole_codepoints() {
        let mut input = InputBuffer::new();
        input.push('a');
        input.push('é');
        input.push('🚀');
        assert_eq!(input.byte_len(), 7);

        assert_eq!(input.pop(), Some('🚀'));
        assert_eq!(input.byte_len(), 3);
        assert_eq!(input.pop(), Some('é'));
        assert_eq!(input.pop(), Some('a'));
        assert_eq!(input.pop(), None);
        assert_eq!(input.byte_len(), 0);
    }

    #[test]
    fn test_canonical_text_accessors() {
        let text = CanonicalText::from_canonical("aé".as_bytes());
        assert_eq!(text.byte_len(), 3);
        assert_eq!(text.char_len_at(1), 2);
        assert_eq!(text.tail(1), "é".as_bytes());
        assert_eq!(text.tail(9), b"");
        assert_eq!(text.to_string_lossy(), "aé");
    }
}
