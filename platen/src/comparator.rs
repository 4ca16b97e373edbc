//! # Comparator Module - Scoring Keystrokes Against the Canonical Text
//!
//! Every typed codepoint is compared with the canonical codepoint at the
//! comparator's *expected* offset, at the moment it is typed. The expected
//! offset then advances by the canonical codepoint's byte length, which is
//! not necessarily the typed codepoint's length:
//!
//! ```text
//! canonical: c  a  f  e        expected offsets 0 1 2 3 -> 4
//! typed:     c  a  f  é        input bytes      0 1 2 3 -> 5
//! verdicts:  ✓  ✓  ✓  ✗
//! ```
//!
//! Counters only ever grow. Backspace retreats the expected offset by the
//! advance of the keystroke it removes, and is counted as a deletion.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::utf8::{Decoded, decode};

/// Result of comparing one typed codepoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Wrong,
}

/// Session counters. None of them is ever decremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub correct: usize,
    pub errors: usize,
    pub keystrokes: usize,
    pub deletions: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Keystroke {
    offset: usize,
    advance: usize,
    verdict: Verdict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comparator {
    expected: usize,
    history: Vec<Keystroke>,
    counters: Counters,
}

impl Comparator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical byte offset the next keystroke is compared against
    pub const fn expected_offset(&self) -> usize {
        self.expected
    }

    pub const fn counters(&self) -> &Counters {
        &self.counters
    }

    /// True once every canonical byte has been typed over
    pub const fn is_exhausted(&self, text: &[u8]) -> bool {
        self.expected >= text.len()
    }

    /// Compare `typed` with the canonical codepoint at the expected offset.
    ///
    /// Returns `None`, and counts nothing, once the text is exhausted.
    pub fn on_typed(&mut self, text: &[u8], typed: char) -> Option<Verdict> {
        let rest = text.get(self.expected..).filter(|rest| !rest.is_empty())?;

        let (decoded, consumed) = decode(rest);
        let verdict = match decoded {
            Decoded::Char(expected) if expected == typed => Verdict::Correct,
            _ => Verdict::Wrong,
        };

        self.history.push(Keystroke {
            offset: self.expected,
            advance: consumed.max(1),
            verdict,
        });
        self.expected += consumed.max(1);

        self.counters.keystrokes += 1;
        match verdict {
            Verdict::Correct => self.counters.correct += 1,
            Verdict::Wrong => self.counters.errors += 1,
        }

        Some(verdict)
    }

    /// Undo the last keystroke's advance. Returns its verdict, or `None` if
    /// nothing has been typed.
    pub fn on_backspace(&mut self) -> Option<Verdict> {
        let keystroke = self.history.pop()?;
        self.expected -= keystroke.advance;
        self.counters.deletions += 1;
        Some(keystroke.verdict)
    }

    /// Verdict of the live keystroke covering canonical byte `offset`
    pub fn verdict_at(&self, offset: usize) -> Option<Verdict> {
        if offset >= self.expected {
            return None;
        }
        // Keystroke offsets are strictly increasing
        let index = self
            .history
            .partition_point(|keystroke| keystroke.offset <= offset)
            .checked_sub(1)?;
        let keystroke = self.history.get(index)?;
        (offset < keystroke.offset + keystroke.advance).then_some(keystroke.verdict)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
