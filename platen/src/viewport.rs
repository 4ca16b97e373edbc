//! # Viewport Module - Scrolling a Fixed Window of Lines
//!
//! The display shows `display_rows` lines at a time. As the caret moves down,
//! the viewport scrolls so the caret's line rests on `cursor_target_row` of
//! that window:
//!
//! ```text
//! first_visible_line = max(first_visible_line, caret_line - cursor_target_row)
//! ```
//!
//! The window never scrolls back up while the caret's line is still inside
//! it. Backspacing above the window pulls it back just far enough to put the
//! caret's line on the top row.
//!
//! ## Predictive Scrolling
//!
//! When the next keystroke would move the caret onto a new line, waiting for
//! the keystroke before scrolling makes the text jump one frame late.
//! [`Viewport::update_predictive`] also considers where the caret lands after
//! the next character and scrolls as soon as that position needs it. The
//! prediction is cached per input offset and recomputed whenever the offset
//! changes.

use std::ops::Range;

use tracing::debug;

use crate::AbsLine;
use crate::config::ViewportConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Prediction {
    offset: usize,
    line: Option<AbsLine>,
}

/// Scroll state of the display window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    config: ViewportConfig,
    first_visible_line: AbsLine,
    prediction: Option<Prediction>,
}

impl Viewport {
    pub const fn new(config: ViewportConfig) -> Self {
        Self {
            config,
            first_visible_line: 0,
            prediction: None,
        }
    }

    pub const fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// The scroll offset, in absolute lines
    pub const fn first_visible_line(&self) -> AbsLine {
        self.first_visible_line
    }

    /// Absolute lines currently inside the window
    pub const fn visible_lines(&self) -> Range<AbsLine> {
        self.first_visible_line
            ..self
                .first_visible_line
                .saturating_add(self.config.display_rows)
    }

    /// Window row of `abs_line`, or `None` if it is scrolled out of view
    pub const fn row_of(&self, abs_line: AbsLine) -> Option<u32> {
        if abs_line < self.first_visible_line {
            return None;
        }
        let row = abs_line - self.first_visible_line;
        if row < self.config.display_rows {
            Some(row)
        } else {
            None
        }
    }

    /// Scroll offset that puts `abs_line` on the cursor target row
    pub const fn first_line_for(&self, abs_line: AbsLine) -> AbsLine {
        abs_line.saturating_sub(self.config.cursor_target_row)
    }

    /// Scroll for the caret on `target_line`
    pub fn update(&mut self, target_line: AbsLine) -> AbsLine {
        let first = self.hold(target_line);
        self.scroll_to(first, false);
        first
    }

    /// Scroll offset for the caret on `target_line` without scrolling back
    /// while that line is visible
    const fn hold(&self, target_line: AbsLine) -> AbsLine {
        let first = self.first_line_for(target_line);
        let first = if first > self.first_visible_line {
            first
        } else {
            self.first_visible_line
        };
        if first > target_line { target_line } else { first }
    }

    /// Scroll for the caret on `target_line` at input `offset`, scrolling early
    /// if the caret's next position needs it.
    ///
    /// `predict` returns the line the caret lands on after the next character,
    /// or `None` at the end of the text. It is only called when `offset`
    /// differs from the previous call.
    pub fn update_predictive(
        &mut self,
        offset: usize,
        target_line: AbsLine,
        predict: impl FnOnce() -> Option<AbsLine>,
    ) -> AbsLine {
        let predicted = match self.prediction {
            Some(prediction) if prediction.offset == offset => prediction.line,
            _ => {
                let line = predict();
                self.prediction = Some(Prediction { offset, line });
                line
            }
        };

        let current = self.hold(target_line);
        let ahead = predicted.map_or(current, |line| self.first_line_for(line));

        // Never scroll the caret's own line out of the window
        let first = if ahead > current {
            ahead.min(target_line)
        } else {
            current
        };

        self.scroll_to(first, first != current);
        first
    }

    /// Forget the cached prediction, e.g. after the layout width changed
    pub const fn invalidate_prediction(&mut self) {
        self.prediction = None;
    }

    /// Forget the scroll offset and the prediction after the text was laid
    /// out again. Line numbers change meaning, so the next update re-anchors
    /// on the caret.
    pub const fn relayout(&mut self) {
        self.first_visible_line = 0;
        self.prediction = None;
    }

    /// Scroll back to the top, as at the start of a session
    pub const fn reset(&mut self) {
        self.first_visible_line = 0;
        self.prediction = None;
    }

    fn scroll_to(&mut self, first: AbsLine, predictive: bool) {
        if first != self.first_visible_line {
            debug!(
                from = self.first_visible_line,
                to = first,
                predictive,
                "viewport scrolled"
            );
            self.first_visible_line = first;
        }
    }
}
