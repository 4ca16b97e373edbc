use crossterm::event::{Event, KeyCode};
use platen::StatsRecord;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::Paragraph,
};

use crate::{app::Message, config::Config, utils::{center, format_duration}};

/// Page: Summary of a finished session
#[derive(Debug)]
pub struct Summary {
    record: StatsRecord,
}

impl Summary {
    pub const fn new(record: StatsRecord) -> Self {
        Self { record }
    }

    fn lines(&self, config: &Config) -> Vec<Line<'static>> {
        let theme = &config.settings.theme;
        let record = &self.record;
        vec![
            Line::styled("Session complete", Style::new().bold()).centered(),
            Line::default(),
            Line::from(format!("WPM       {:>8.1}", record.wpm)).centered(),
            Line::from(format!("Accuracy  {:>7.1}%", record.accuracy)).centered(),
            Line::from(format!("Time      {:>8}", format_duration(record.duration_secs))).centered(),
            Line::default(),
            Line::styled(format!("Correct   {:>8}", record.correct), Style::new().fg(theme.correct))
                .centered(),
            Line::styled(format!("Errors    {:>8}", record.errors), Style::new().fg(theme.wrong))
                .centered(),
            Line::from(format!("Keystrokes{:>8}", record.keystrokes)).centered(),
            Line::from(format!("Deletions {:>8}", record.deletions)).centered(),
        ]
    }
}

// Rendering logic
impl Summary {
    pub fn render(&self, frame: &mut ratatui::Frame, area: Rect, config: &Config) {
        let lines = self.lines(config);
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        let area = center(area, Constraint::Percentage(80), Constraint::Length(height));
        frame.render_widget(Paragraph::new(lines), area);
    }

    pub fn render_top(&self, _config: &Config) -> Option<Line<'_>> {
        Some(Line::from("<Enter> to practice again"))
    }

    pub fn handle_events(&self, event: &Event, _config: &Config) -> Option<Message> {
        if let Event::Key(key) = event
            && key.is_press()
            && key.code == KeyCode::Enter
        {
            return Some(Message::Restart);
        }
        None
    }
}
