use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use platen::{CanonicalText, StatsRecord, StatsSink, TextSource};
use ratatui::{DefaultTerminal, Frame, style::Stylize, text::ToLine, widgets::Padding};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::history::JsonLinesSink;
use crate::page;
use crate::source::FileSource;
use crate::utils::ROUNDED_BLOCK;

/// How long to wait for terminal events before drawing the next frame
const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// An app message
pub enum Message {
    /// The session on the current page was typed to the end
    Finished(StatsRecord),
    /// Start a new session over the same text
    Restart,
    /// Quit the application
    Quit,
}

/// The app itself
pub struct App {
    page: page::Page,
    config: Config,
    text: CanonicalText,
    source: FileSource,
    sink: Option<JsonLinesSink>,
    remainder: Option<Vec<u8>>,
}

impl App {
    /// Creates a new `App` with a session over `text`
    pub fn new(config: Config, text: CanonicalText, source: FileSource) -> Result<Self, AppError> {
        let page = page::Session::new(&config, text.clone())?.into();
        let sink = config
            .settings
            .stats
            .enabled
            .then(|| JsonLinesSink::new(config.stats_file()));

        Ok(Self {
            page,
            config,
            text,
            source,
            sink,
            remainder: None,
        })
    }

    /// Runs the app, then saves the untyped rest of the text if configured to
    pub fn run(&mut self) -> Result<(), AppError> {
        let mut terminal = ratatui::init();
        let result = self.event_loop(&mut terminal);
        ratatui::restore();
        result?;

        if self.config.settings.save_remainder
            && let Some(remainder) = self.remainder.take()
        {
            self.source.save_remainder(&remainder)?;
        }

        Ok(())
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<(), AppError> {
        execute!(stdout(), SetCursorStyle::SteadyBar)?;

        loop {
            let event = event::poll(POLL_INTERVAL)?
                .then(event::read)
                .transpose()?;
            if let Some(message) = self.handle_events(event) {
                match message {
                    Message::Finished(record) => self.finish(record),
                    Message::Restart => self.restart(),
                    Message::Quit => {
                        self.remainder = self.page.remainder().map(<[u8]>::to_vec);
                        break;
                    }
                }
            }
            terminal.draw(|frame| self.draw(frame))?;
        }

        Ok(())
    }

    /// Draws the next frame
    fn draw(&mut self, frame: &mut Frame) {
        let mut block = ROUNDED_BLOCK
            .padding(Padding::new(1, 1, 0, 0))
            .title_top("TYPELINE".to_line().bold().centered())
            .title_top("<ESC> to restart | <CTRL-Q> to exit".to_line().right_aligned());

        if let Some(top_msg) = self.page.render_top(&self.config) {
            block = block.title_top(top_msg);
        }

        let area = frame.area();
        let content = block.inner(area);

        frame.render_widget(block, area);

        self.page.render(frame, content, &self.config);
    }

    /// Record a finished session and show its summary
    fn finish(&mut self, record: StatsRecord) {
        info!(
            wpm = record.wpm,
            accuracy = record.accuracy,
            duration_secs = record.duration_secs,
            "session finished"
        );

        if let Some(sink) = self.sink.as_mut()
            && let Err(error) = sink.append(&record)
        {
            warn!(%error, path = %sink.path().display(), "failed to save statistics");
            self.page = page::Error::from(error).into();
            return;
        }

        self.page = page::Summary::new(record).into();
    }

    fn restart(&mut self) {
        self.page = match page::Session::new(&self.config, self.text.clone()) {
            Ok(session) => session.into(),
            Err(error) => page::Error::from(error).into(),
        };
    }

    /// Global event handler
    fn handle_events(&mut self, event_opt: Option<Event>) -> Option<Message> {
        event_opt
            .and_then(|event| {
                self.page
                    .handle_events(&event, &self.config)
                    .or_else(|| match event {
                        Event::Key(key) => Self::handle_key_event(key),
                        _ => None,
                    })
            })
            .or_else(|| self.page.poll(&self.config))
    }

    /// Global key events
    fn handle_key_event(key: KeyEvent) -> Option<Message> {
        if !key.is_press() {
            return None;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::CONTROL) => Some(Message::Quit),
            (KeyCode::Esc, KeyModifiers::NONE) => Some(Message::Restart),
            _ => None,
        }
    }
}
