//! # Platen - Text Layout and Cursor Mapping for Typing Trainers
//!
//! Platen turns raw practice text into a canonical form, lays it out with a
//! greedy word wrap, maps the typist's position in the text to a caret
//! position on screen and keeps a small window of lines scrolled around it.
//!
//! ## Pipeline
//!
#![doc = simple_mermaid::mermaid!("../diagrams/pipeline.mmd")]
//!
//! - [`normalize`] folds line endings, typography and whitespace
//! - [`block`] splits the text into words, space runs, tabs and newlines
//! - [`layout`] places the blocks on lines
//! - [`cursor`] replays the layout up to a byte offset
//! - [`viewport`] scrolls the display window
//! - [`comparator`] scores keystrokes against the text
//!
//! [`Session`] ties them together for a frontend.

pub mod block;
pub mod comparator;
pub mod config;
pub mod cursor;
pub mod error;
pub mod layout;
pub mod metrics;
pub mod normalize;
pub mod render;
pub mod session;
pub mod source;
pub mod stats;
pub mod text;
pub mod utf8;
pub mod viewport;

pub use comparator::{Counters, Verdict};
pub use config::{LayoutConfig, LineJoin, NormalizeConfig, ViewportConfig};
pub use error::{ConfigError, LayoutError};
pub use layout::LayoutPosition;
pub use metrics::{CellMetrics, GlyphMetrics, MonospaceMetrics, StyleVariant};
pub use session::{FrameLayout, Session};
pub use source::TextSource;
pub use stats::{StatsRecord, StatsSink};
pub use text::{CanonicalText, InputBuffer};

/// Number of codepoints counted as one word
pub const AVERAGE_WORD_LENGTH: usize = 5;

// Units of the layout engine, pixels or terminal cells depending on the metrics
pub type Px = i32;
pub type AbsLine = u32;
