//! # Configuration Module - Layout, Viewport and Normalization Settings
//!
//! Plain settings structs consumed by the engine. Every struct has a
//! [`Default`] suited to a terminal frontend (one cell per column) and derives
//! serde traits so frontends can embed them in their own configuration files.
//!
//! ## Usage
//!
//! ```rust
//! use platen::config::{LayoutConfig, ViewportConfig};
//!
//! // 60 columns wide, tab stops every 4 columns
//! let layout = LayoutConfig::new(60, 4).unwrap();
//! assert_eq!(layout.right_edge(), 60);
//!
//! // Three visible rows, the caret rests on the middle one
//! let viewport = ViewportConfig::new(3, 1).unwrap();
//! assert_eq!(viewport.cursor_target_row, 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::metrics::StyleVariant;
use crate::Px;

/// Geometry of the layout area
///
/// All values are in the units of the active [`GlyphMetrics`] provider
/// (pixels for a font rasterizer, cells for a terminal).
///
/// [`GlyphMetrics`]: crate::metrics::GlyphMetrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Left edge of the layout area. Every line starts with `pen_x == origin_x`.
    pub origin_x: Px,
    /// Width available to a line, measured from `origin_x`
    ///
    /// **Default**: 80
    pub viewport_width: Px,
    /// Distance between tab stops, measured from `origin_x`
    ///
    /// **Default**: 4
    pub tab_width: Px,
    /// Advance used when the metrics provider can't resolve a glyph
    ///
    /// **Default**: 1
    pub fallback_advance: Px,
    /// Style variant passed to the metrics provider
    pub variant: StyleVariant,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin_x: 0,
            viewport_width: 80,
            tab_width: 4,
            fallback_advance: 1,
            variant: StyleVariant::Regular,
        }
    }
}

impl LayoutConfig {
    /// Create a validated configuration with the given width and tab width
    pub fn new(viewport_width: Px, tab_width: Px) -> Result<Self, ConfigError> {
        Self {
            viewport_width,
            tab_width,
            ..Self::default()
        }
        .validated()
    }

    /// Set the origin of the layout area (builder pattern)
    pub const fn with_origin(mut self, origin_x: Px) -> Self {
        self.origin_x = origin_x;
        self
    }

    /// Set the fallback advance (builder pattern)
    pub const fn with_fallback_advance(mut self, fallback_advance: Px) -> Self {
        self.fallback_advance = fallback_advance;
        self
    }

    /// Set the style variant (builder pattern)
    pub const fn with_variant(mut self, variant: StyleVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Check every value, returning the configuration unchanged if valid
    pub const fn validated(self) -> Result<Self, ConfigError> {
        if self.viewport_width <= 0 {
            return Err(ConfigError::ViewportWidth(self.viewport_width));
        }
        if self.tab_width <= 0 {
            return Err(ConfigError::TabWidth(self.tab_width));
        }
        if self.fallback_advance <= 0 {
            return Err(ConfigError::FallbackAdvance(self.fallback_advance));
        }
        Ok(self)
    }

    /// First x coordinate past the usable line width
    pub const fn right_edge(&self) -> Px {
        self.origin_x.saturating_add(self.viewport_width)
    }
}

/// Size of the display window and where the caret rests inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Number of rows visible at once
    ///
    /// **Default**: 3
    pub display_rows: u32,
    /// Zero-based row of the window the caret's line is scrolled to
    ///
    /// **Default**: 1 (the caret line has one line of context above it)
    pub cursor_target_row: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            display_rows: 3,
            cursor_target_row: 1,
        }
    }
}

impl ViewportConfig {
    pub const fn new(display_rows: u32, cursor_target_row: u32) -> Result<Self, ConfigError> {
        Self {
            display_rows,
            cursor_target_row,
        }
        .validated()
    }

    pub const fn validated(self) -> Result<Self, ConfigError> {
        if self.display_rows == 0 {
            return Err(ConfigError::NoDisplayRows);
        }
        if self.cursor_target_row >= self.display_rows {
            return Err(ConfigError::CursorTargetRow {
                row: self.cursor_target_row,
                rows: self.display_rows,
            });
        }
        Ok(self)
    }
}

/// How single line breaks in the raw text are treated
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineJoin {
    /// A single newline joins two lines with a space, two or more newlines
    /// become one paragraph break
    #[default]
    Soft,
    /// Every run of newlines becomes one line break
    Hard,
}

/// Settings for [`normalize`](crate::normalize::normalize)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    pub line_join: LineJoin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_config_validation() {
        assert!(LayoutConfig::new(10, 4).is_ok());
        assert_eq!(LayoutConfig::new(0, 4), Err(ConfigError::ViewportWidth(0)));
        assert_eq!(LayoutConfig::new(10, -1), Err(ConfigError::TabWidth(-1)));
        assert_eq!(
            LayoutConfig::default()
                .with_fallback_advance(0)
                .validated(),
            Err(ConfigError::FallbackAdvance(0))
        );
    }

    #[test]
    fn test_right_edge_includes_origin() {
        let config = LayoutConfig::new(10, 4).unwrap().with_origin(5);
        assert_eq!(config.right_edge(), 15);
    }

    #[test]
    fn test_viewport_config_validation() {
        assert!(ViewportConfig::new(3, 2).is_ok());
        assert_eq!(ViewportConfig::new(0, 0), Err(ConfigError::NoDisplayRows));
        assert_eq!(
            ViewportConfig::new(3, 3),
            Err(ConfigError::CursorTargetRow { row: 3, rows: 3 })
        );
    }
}
