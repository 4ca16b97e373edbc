use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Text color theme
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Theme {
    /// Text that hasn't been typed yet
    pub pending: Color,
    pub correct: Color,
    pub wrong: Color,
    /// Underline of the glyph under the caret
    pub cursor: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            pending: Color::DarkGray,
            correct: Color::Green,
            wrong: Color::Red,
            cursor: Color::White,
        }
    }
}
