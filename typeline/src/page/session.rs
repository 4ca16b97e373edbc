use crossterm::event::{Event, KeyCode, KeyModifiers};
use platen::render::{GlyphState, RenderingContext};
use platen::{CanonicalText, CellMetrics, FrameLayout, Px};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
};
use tracing::error;

use crate::{
    app::Message,
    config::{Config, theme::Theme},
    utils::{center, format_duration},
};

/// Page: Typing session
#[derive(Debug)]
pub struct Session {
    session: platen::Session<CellMetrics>,
}

impl Session {
    /// Creates a new typing session over `text`
    pub fn new(config: &Config, text: CanonicalText) -> Result<Self, platen::ConfigError> {
        let settings = &config.settings;
        let session = platen::Session::new(
            text,
            settings.layout(settings.max_width)?,
            settings.viewport()?,
            CellMetrics,
        )?;
        Ok(Self { session })
    }

    /// True once something has been typed
    pub const fn is_started(&self) -> bool {
        self.session.counters().keystrokes > 0
    }

    pub fn remainder(&self) -> &[u8] {
        self.session.remainder()
    }
}

// Rendering logic
impl Session {
    pub fn render(&mut self, frame: &mut Frame, area: Rect, config: &Config) {
        let settings = &config.settings;
        let rows = u16::try_from(settings.display_rows).unwrap_or(u16::MAX);
        let area = center(
            area,
            Constraint::Length(area.width.min(settings.max_width)),
            Constraint::Length(rows),
        );
        if area.is_empty() {
            return;
        }

        if let Err(error) = self.session.set_viewport_width(Px::from(area.width)) {
            error!(%error, "failed to resize the text area");
            return;
        }
        let layout = match self.session.frame() {
            Ok(layout) => layout,
            Err(error) => {
                error!(%error, "failed to lay out frame");
                return;
            }
        };

        let buffer = frame.buffer_mut();
        for context in self.session.glyphs(layout.first_visible_line, settings.display_rows) {
            draw_glyph(buffer, area, &layout, &context, &settings.theme);
        }

        if let Some(position) = cell_position(area, &layout, layout.abs_line, layout.pen_x) {
            frame.set_cursor_position(position);
        }
    }

    pub fn render_top(&self, _config: &Config) -> Option<Line<'_>> {
        let record = self.session.record();
        Some(Line::raw(format!(
            "{} | WPM: {:.1} | ACC: {:.1}%",
            format_duration(record.duration_secs),
            record.wpm,
            record.accuracy
        )))
    }

    pub fn poll(&mut self, _config: &Config) -> Option<Message> {
        self.session
            .is_complete()
            .then(|| Message::Finished(self.session.record()))
    }

    pub fn handle_events(&mut self, event: &Event, _config: &Config) -> Option<Message> {
        if let Event::Key(key) = event
            && key.is_press()
            && !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            match key.code {
                KeyCode::Char(character) => {
                    self.session.on_codepoint_typed(character);
                }
                KeyCode::Enter => {
                    self.session.on_codepoint_typed('\n');
                }
                KeyCode::Tab => {
                    self.session.on_codepoint_typed('\t');
                }
                KeyCode::Backspace => {
                    self.session.on_backspace();
                }
                _ => (),
            }
        }

        None
    }
}

/// Screen cell of a layout position, if it's inside `area`
fn cell_position(area: Rect, layout: &FrameLayout, abs_line: u32, pen_x: Px) -> Option<(u16, u16)> {
    let row = u16::try_from(abs_line.checked_sub(layout.first_visible_line)?).ok()?;
    let column = u16::try_from(pen_x).ok()?;
    (row < area.height && column < area.width).then_some((area.x + column, area.y + row))
}

fn draw_glyph(
    buffer: &mut Buffer,
    area: Rect,
    layout: &FrameLayout,
    context: &RenderingContext,
    theme: &Theme,
) {
    let glyph = &context.glyph;
    let Some(position) = cell_position(area, layout, glyph.abs_line, glyph.pen_x) else {
        return;
    };

    let mut style = Style::new().fg(match context.state {
        GlyphState::Pending => theme.pending,
        GlyphState::Correct => theme.correct,
        GlyphState::Wrong => theme.wrong,
    });
    if context.state == GlyphState::Wrong && glyph.char.is_whitespace() {
        style = style.bg(theme.wrong);
    }
    if context.has_cursor {
        style = style
            .add_modifier(Modifier::UNDERLINED)
            .underline_color(theme.cursor);
    }

    let symbol = match glyph.char {
        '\n' => '⏎',
        '\t' => ' ',
        other => other,
    };

    if let Some(cell) = buffer.cell_mut(position) {
        cell.set_char(symbol).set_style(style);
    }

    // Tabs span several cells
    if glyph.char == '\t' {
        for column in (1..glyph.advance).map(|offset| glyph.pen_x.saturating_add(offset)) {
            if let Some(position) = cell_position(area, layout, glyph.abs_line, column)
                && let Some(cell) = buffer.cell_mut(position)
            {
                cell.set_char(' ').set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEvent;
    use platen::normalize::normalize;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::config::Settings;

    fn config() -> Config {
        Config {
            settings: Settings::default(),
            config_dir: std::env::temp_dir(),
            data_dir: std::env::temp_dir(),
        }
    }

    fn press(page: &mut Session, code: KeyCode, modifiers: KeyModifiers) {
        let event = Event::Key(KeyEvent::new(code, modifiers));
        assert!(page.handle_events(&event, &config()).is_none());
    }

    fn type_str(page: &mut Session, input: &str) {
        for character in input.chars() {
            press(page, KeyCode::Char(character), KeyModifiers::NONE);
        }
    }

    #[test]
    fn test_keys_feed_the_session() {
        let config = config();
        let mut page = Session::new(&config, normalize(b"ab\n\ncd")).unwrap();
        assert!(!page.is_started());

        type_str(&mut page, "ab");
        press(&mut page, KeyCode::Enter, KeyModifiers::NONE);
        assert!(page.is_started());
        assert_eq!(page.remainder(), b"cd");

        press(&mut page, KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(page.remainder(), b"\ncd");

        // Shortcuts never reach the session
        press(&mut page, KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(page.remainder(), b"\ncd");
    }

    #[test]
    fn test_poll_reports_completion() {
        let config = config();
        let mut page = Session::new(&config, normalize(b"a\tb")).unwrap();
        assert!(page.poll(&config).is_none());

        type_str(&mut page, "a");
        press(&mut page, KeyCode::Char(' '), KeyModifiers::NONE);
        type_str(&mut page, "b");

        let Some(Message::Finished(record)) = page.poll(&config) else {
            panic!("expected the session to finish");
        };
        assert_eq!(record.correct, 3);
        assert_eq!(record.errors, 0);
    }

    #[test]
    fn test_render_draws_text_and_cursor() {
        let config = config();
        let mut page = Session::new(&config, normalize(b"hello world")).unwrap();
        type_str(&mut page, "hex");

        let mut terminal = Terminal::new(TestBackend::new(20, 5)).unwrap();
        let completed = terminal
            .draw(|frame| {
                let area = frame.area();
                page.render(frame, area, &config);
            })
            .unwrap();

        // Three rows centered in five: the text starts on row 1
        let text: String = (0..11)
            .map(|x| completed.buffer[(x, 1)].symbol().to_string())
            .collect();
        assert_eq!(text, "hello world");
        assert_eq!(completed.buffer[(0, 1)].fg, config.settings.theme.correct);
        assert_eq!(completed.buffer[(2, 1)].fg, config.settings.theme.wrong);
        assert_eq!(completed.buffer[(3, 1)].fg, config.settings.theme.pending);
        // The caret's glyph is underlined in the cursor color
        assert!(completed.buffer[(3, 1)].modifier.contains(Modifier::UNDERLINED));
        assert_eq!(completed.buffer[(3, 1)].underline_color, config.settings.theme.cursor);

        terminal.backend_mut().assert_cursor_position((3, 1));
    }
}
