use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::AVERAGE_WORD_LENGTH;
use crate::comparator::Counters;

/// Words per minute, counting [`AVERAGE_WORD_LENGTH`] correct codepoints as
/// one word. Zero when no time has passed.
pub fn wpm(correct: usize, duration: Duration) -> f64 {
    let minutes = duration.as_secs_f64() / 60.0;
    if minutes <= 0.0 {
        return 0.0;
    }
    (correct as f64 / AVERAGE_WORD_LENGTH as f64) / minutes
}

/// Share of correct keystrokes in percent. 100 when nothing was typed.
pub fn accuracy(correct: usize, errors: usize) -> f64 {
    let total = correct + errors;
    if total == 0 {
        return 100.0;
    }
    correct as f64 / total as f64 * 100.0
}

/// Final numbers of one session, as handed to a [`StatsSink`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsRecord {
    pub wpm: f64,
    pub accuracy: f64,
    pub duration_secs: f64,
    pub correct: usize,
    pub errors: usize,
    pub keystrokes: usize,
    pub deletions: usize,
}

impl StatsRecord {
    pub fn new(counters: &Counters, duration: Duration) -> Self {
        Self {
            wpm: wpm(counters.correct, duration),
            accuracy: accuracy(counters.correct, counters.errors),
            duration_secs: duration.as_secs_f64(),
            correct: counters.correct,
            errors: counters.errors,
            keystrokes: counters.keystrokes,
            deletions: counters.deletions,
        }
    }
}

/// Append-only destination for finished sessions
pub trait StatsSink {
    type Error: std::error::Error;

    fn append(&mut self, record: &StatsRecord) -> Result<(), Self::Error>;
}

impl<S: StatsSink + ?Sized> StatsSink for &mut S {
    type Error = S::Error;

    fn append(&mut self, record: &StatsRecord) -> Result<(), Self::Error> {
        (**self).append(record)
    }
}
