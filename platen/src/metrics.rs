//! # Metrics Module - Glyph Measurement Capability
//!
//! The layout engine never rasterizes anything. It asks a [`GlyphMetrics`]
//! provider for the advance of each codepoint and falls back to a
//! caller-supplied default when the provider has no answer.
//!
//! Two providers ship with the crate:
//! - [`MonospaceMetrics`]: every glyph has the same advance
//! - [`CellMetrics`]: terminal cells, using the Unicode display width

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use unicode_width::UnicodeWidthChar;

use crate::Px;

/// Style variant a glyph is measured in
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StyleVariant {
    #[default]
    Regular,
    Emphasis,
}

/// Measurements of a single glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// Horizontal distance the pen moves after drawing the glyph
    pub advance: Px,
    /// Width of the glyph's ink
    pub width: Px,
    /// Height of the glyph's ink
    pub height: Px,
}

/// Read-only glyph measurement capability
pub trait GlyphMetrics {
    /// Measure `codepoint` in `variant`, or `None` if it can't be resolved
    fn glyph(&self, codepoint: char, variant: StyleVariant) -> Option<Glyph>;

    /// Advance of `codepoint`, falling back to `fallback` on a failed lookup
    fn advance(&self, codepoint: char, variant: StyleVariant, fallback: Px) -> Px {
        self.glyph(codepoint, variant)
            .map_or(fallback, |glyph| glyph.advance)
    }
}

impl<M: GlyphMetrics + ?Sized> GlyphMetrics for &M {
    fn glyph(&self, codepoint: char, variant: StyleVariant) -> Option<Glyph> {
        (**self).glyph(codepoint, variant)
    }
}

/// Fixed-advance metrics, as produced by a monospace font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonospaceMetrics {
    pub advance: Px,
    pub height: Px,
}

impl MonospaceMetrics {
    pub const fn new(advance: Px, height: Px) -> Self {
        Self { advance, height }
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl GlyphMetrics for MonospaceMetrics {
    fn glyph(&self, codepoint: char, _variant: StyleVariant) -> Option<Glyph> {
        if codepoint.is_control() {
            return None;
        }
        Some(Glyph {
            advance: self.advance,
            width: self.advance,
            height: self.height,
        })
    }
}

/// Terminal cell metrics
///
/// A glyph advances by its display width in cells (2 for wide CJK and most
/// emoji). Control characters and zero-width codepoints have no metrics, so
/// the layout uses the fallback advance for them and the caret never stalls.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics;

impl GlyphMetrics for CellMetrics {
    fn glyph(&self, codepoint: char, _variant: StyleVariant) -> Option<Glyph> {
        let width = codepoint.width().filter(|&width| width > 0)?;
        let width = Px::try_from(width).ok()?;
        Some(Glyph {
            advance: width,
            width,
            height: 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_monospace_ignores_variant() {
        let metrics = MonospaceMetrics::new(8, 16);
        for variant in StyleVariant::iter() {
            assert_eq!(metrics.advance('x', variant, 3), 8);
        }
    }

    #[test]
    fn test_fallback_on_missing_glyph() {
        let metrics = MonospaceMetrics::new(8, 16);
        assert_eq!(metrics.advance('\u{7}', StyleVariant::Regular, 3), 3);
    }

    #[test]
    fn test_cell_widths() {
        let metrics = CellMetrics;
        assert_eq!(metrics.advance('a', StyleVariant::Regular, 1), 1);
        assert_eq!(metrics.advance('中', StyleVariant::Regular, 1), 2);
        // Combining acute accent is zero-width
        assert_eq!(metrics.advance('\u{301}', StyleVariant::Regular, 1), 1);
    }

    #[test]
    fn test_variant_display() {
        assert_eq!(StyleVariant::Emphasis.to_string(), "emphasis");
    }
}
