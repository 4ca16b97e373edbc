//! # Session Module - One Typing Session Over a Canonical Text
//!
//! [`Session`] is the single value a frontend holds for a session. It owns
//! the canonical text, the input buffer, the comparator and the viewport,
//! and exposes the handful of calls a render loop needs.
//!
//! ## Session Lifecycle
//!
#![doc = simple_mermaid::mermaid!("../diagrams/session_lifecycle.mmd")]
//!
//! ## Frame Ordering
//!
//! Once per frame the render loop calls [`Session::frame`]. The caret is
//! located first and the viewport is scrolled for that position before the
//! result is returned, so a frame never pairs a new caret with a stale scroll
//! offset.
//!
//! ## Usage
//!
//! ```rust
//! use platen::config::{LayoutConfig, ViewportConfig};
//! use platen::metrics::MonospaceMetrics;
//! use platen::normalize::normalize;
//! use platen::session::Session;
//!
//! let text = normalize(b"The quick brown fox");
//! let mut session = Session::new(
//!     text,
//!     LayoutConfig::new(10, 4).unwrap(),
//!     ViewportConfig::default(),
//!     MonospaceMetrics::default(),
//! )
//! .unwrap();
//!
//! for char in "The quick ".chars() {
//!     session.on_codepoint_typed(char);
//! }
//!
//! let frame = session.frame().unwrap();
//! assert_eq!((frame.abs_line, frame.pen_x), (1, 0));
//! assert_eq!(session.remainder(), b"brown fox");
//! ```

use tracing::debug;
use web_time::{Duration, Instant};

use crate::comparator::{Comparator, Counters, Verdict};
use crate::config::{LayoutConfig, ViewportConfig};
use crate::cursor::locate;
use crate::error::{ConfigError, LayoutError};
use crate::layout::LayoutPosition;
use crate::metrics::GlyphMetrics;
use crate::render::{Glyphs, RenderingIterator};
use crate::stats::StatsRecord;
use crate::text::{CanonicalText, InputBuffer};
use crate::viewport::Viewport;
use crate::{AbsLine, Px};

/// Where to draw the caret in one frame, and the scroll offset to draw with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameLayout {
    pub abs_line: AbsLine,
    pub pen_x: Px,
    pub first_visible_line: AbsLine,
}

impl FrameLayout {
    pub const fn position(&self) -> LayoutPosition {
        LayoutPosition {
            abs_line: self.abs_line,
            pen_x: self.pen_x,
        }
    }

    /// Window row of the caret
    pub const fn row(&self) -> u32 {
        self.abs_line.saturating_sub(self.first_visible_line)
    }
}

/// Typing session state for one canonical text
///
/// The session is single-owner: every call takes `&mut self` or `&self`, and
/// a frontend drives it from one loop.
#[derive(Debug, Clone)]
pub struct Session<M> {
    text: CanonicalText,
    input: InputBuffer,
    comparator: Comparator,
    viewport: Viewport,
    layout: LayoutConfig,
    metrics: M,
    started_at: Option<Instant>,
    completed_at: Option<Instant>,
}

impl<M: GlyphMetrics> Session<M> {
    /// Start a session over `text`.
    ///
    /// An empty text is accepted; such a session is complete from the start.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if either configuration is invalid.
    pub fn new(
        text: CanonicalText,
        layout: LayoutConfig,
        viewport: ViewportConfig,
        metrics: M,
    ) -> Result<Self, ConfigError> {
        let layout = layout.validated()?;
        let viewport = viewport.validated()?;

        debug!(
            text_bytes = text.byte_len(),
            viewport_width = layout.viewport_width,
            display_rows = viewport.display_rows,
            "session created"
        );

        Ok(Self {
            text,
            input: InputBuffer::new(),
            comparator: Comparator::new(),
            viewport: Viewport::new(viewport),
            layout,
            metrics,
            started_at: None,
            completed_at: None,
        })
    }

    pub const fn text(&self) -> &CanonicalText {
        &self.text
    }

    pub const fn input(&self) -> &InputBuffer {
        &self.input
    }

    pub const fn counters(&self) -> &Counters {
        self.comparator.counters()
    }

    pub const fn layout_config(&self) -> &LayoutConfig {
        &self.layout
    }

    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Input byte offset the caret is drawn at, clamped to the text length
    pub fn cursor_offset(&self) -> usize {
        self.input.byte_len().min(self.text.byte_len())
    }

    /// Locate the caret at input byte `idx` and scroll the viewport for it.
    ///
    /// The viewport scrolls one keystroke early when the character at `idx`
    /// would move the caret onto a line that needs scrolling.
    ///
    /// # Errors
    ///
    /// [`LayoutError::OffsetOutOfRange`] if `idx` is past the end of the text.
    pub fn frame_layout(&mut self, idx: usize) -> Result<FrameLayout, LayoutError> {
        let position = locate(&self.text, idx, &self.layout, &self.metrics)?;

        let first_visible_line =
            self.viewport
                .update_predictive(idx, position.abs_line, || {
                    if idx >= self.text.byte_len() {
                        return None;
                    }
                    let next = idx + self.text.char_len_at(idx);
                    locate(&self.text, next, &self.layout, &self.metrics)
                        .ok()
                        .map(|position| position.abs_line)
                });

        Ok(FrameLayout {
            abs_line: position.abs_line,
            pen_x: position.pen_x,
            first_visible_line,
        })
    }

    /// [`frame_layout`](Self::frame_layout) for the current input
    pub fn frame(&mut self) -> Result<FrameLayout, LayoutError> {
        self.frame_layout(self.cursor_offset())
    }

    /// Type one codepoint.
    ///
    /// Returns its verdict, or `None` if the session is already complete.
    pub fn on_codepoint_typed(&mut self, char: char) -> Option<Verdict> {
        if self.is_complete() {
            return None;
        }

        let verdict = self.comparator.on_typed(&self.text, char)?;
        self.input.push(char);

        let now = Instant::now();
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        if self.comparator.is_exhausted(&self.text) {
            self.completed_at = Some(now);
            debug!(counters = ?self.comparator.counters(), "session complete");
        }

        Some(verdict)
    }

    /// Delete the last typed codepoint.
    ///
    /// Returns the deleted keystroke's verdict, or `None` if there was nothing
    /// to delete or the session is complete.
    pub fn on_backspace(&mut self) -> Option<Verdict> {
        if self.is_complete() {
            return None;
        }
        self.input.pop()?;
        self.comparator.on_backspace()
    }

    /// Change the viewport width, e.g. after a terminal resize.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ViewportWidth`] if `width` isn't positive. The session
    /// keeps its previous width in that case.
    pub fn set_viewport_width(&mut self, width: Px) -> Result<(), ConfigError> {
        let layout = LayoutConfig {
            viewport_width: width,
            ..self.layout
        }
        .validated()?;

        if layout != self.layout {
            debug!(from = self.layout.viewport_width, to = width, "viewport resized");
            self.layout = layout;
            self.viewport.relayout();
        }
        Ok(())
    }

    /// True once every byte of the text has been typed over
    pub fn is_complete(&self) -> bool {
        self.comparator.is_exhausted(&self.text)
    }

    /// The part of the text that hasn't been typed yet
    pub fn remainder(&self) -> &[u8] {
        self.text.tail(self.comparator.expected_offset())
    }

    /// Time since the first keystroke, up to completion
    pub fn elapsed(&self) -> Duration {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => end.duration_since(start),
            (Some(start), None) => start.elapsed(),
            _ => Duration::ZERO,
        }
    }

    pub fn record(&self) -> StatsRecord {
        StatsRecord::new(self.comparator.counters(), self.elapsed())
    }

    /// Glyphs of `rows` lines starting at `first_line`, with their typing state
    pub fn glyphs(&self, first_line: AbsLine, rows: u32) -> RenderingIterator<'_, M> {
        let glyphs = Glyphs::new(
            &self.text,
            &self.layout,
            &self.metrics,
            first_line..first_line.saturating_add(rows),
        );
        RenderingIterator::new(glyphs, &self.comparator, self.cursor_offset())
    }

    /// Start over on the same text
    pub fn reset(&mut self) {
        self.input.clear();
        self.comparator.reset();
        self.viewport.reset();
        self.started_at = None;
        self.completed_at = None;
        debug!("session reset");
    }
}
