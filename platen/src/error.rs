use thiserror::Error;

/// Failed preconditions of the layout engine.
///
/// Decode and glyph-metric failures are never errors: malformed bytes are
/// skipped and missing metrics fall back to a default advance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("Byte offset {offset} is past the end of the text ({len} bytes)")]
    OffsetOutOfRange { offset: usize, len: usize },
}

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Viewport width must be positive, got {0}")]
    ViewportWidth(i32),

    #[error("Tab width must be positive, got {0}")]
    TabWidth(i32),

    #[error("Fallback advance must be positive, got {0}")]
    FallbackAdvance(i32),

    #[error("The display window needs at least one row")]
    NoDisplayRows,

    #[error("Cursor target row {row} is outside a window of {rows} rows")]
    CursorTargetRow { row: u32, rows: u32 },
}
