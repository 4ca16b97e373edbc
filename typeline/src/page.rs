use crossterm::event::Event;
use ratatui::{Frame, layout::Rect, text::Line};

pub mod error;
pub mod session;
pub mod summary;

pub use error::Error;
pub use session::Session;
pub use summary::Summary;

use crate::{app::Message, config::Config};

macro_rules! make_page_enum {
    ($($t:tt),*) => {
        pub enum Page {
            $(
                $t(Box<$t>),
            )*
        }

        $(
            impl From<$t> for Page {
                fn from(value: $t) -> Page {
                    Page::$t(Box::new(value))
                }
            }
        )*
    };
}

make_page_enum!(Session, Summary, Error);

impl Page {
    pub fn render(&mut self, frame: &mut Frame, area: Rect, config: &Config) {
        match self {
            Self::Session(page) => page.render(frame, area, config),
            Self::Summary(page) => page.render(frame, area, config),
            Self::Error(page) => page.render(frame, area, config),
        }
    }

    pub fn render_top(&self, config: &Config) -> Option<Line<'_>> {
        match self {
            Self::Session(page) => page.render_top(config),
            Self::Summary(page) => page.render_top(config),
            Self::Error(page) => page.render_top(config),
        }
    }

    pub fn handle_events(&mut self, event: &Event, config: &Config) -> Option<Message> {
        match self {
            Self::Session(page) => page.handle_events(event, config),
            Self::Summary(page) => page.handle_events(event, config),
            Self::Error(_) => None,
        }
    }

    pub fn poll(&mut self, config: &Config) -> Option<Message> {
        match self {
            Self::Session(page) => page.poll(config),
            Self::Summary(_) | Self::Error(_) => None,
        }
    }

    /// Untyped rest of the text, if the session on this page has progressed
    pub fn remainder(&self) -> Option<&[u8]> {
        match self {
            Self::Session(page) if page.is_started() => Some(page.remainder()),
            Self::Summary(_) => Some(&[][..]),
            Self::Session(_) | Self::Error(_) => None,
        }
    }
}
