use std::time::Duration;

use ratatui::crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;
use tracing::trace;

use colfilter::{Intercept, MenuMessage};

use crate::domain::{AppError, Config, Message};
use crate::model::Model;

pub struct Controller {
    event_poll_time: u64,
}

impl Controller {
    pub fn new(cfg: &Config) -> Self {
        Self {
            event_poll_time: cfg.event_poll_time,
        }
    }

    pub fn handle_event(&self, model: &Model) -> Result<Option<Message>, AppError> {
        if !event::poll(Duration::from_millis(self.event_poll_time))? {
            return Ok(None);
        }
        let event = event::read()?;

        if let Event::Resize(width, height) = &event {
            return Ok(Some(Message::Resize(*width, *height)));
        }
        if model.show_help {
            return Ok(Self::dismiss_help(&event));
        }
        // An open dropdown sees every event first and never lets pointer or
        // keyboard input fall through to the column bindings below.
        if let Some(idx) = model.open_menu() {
            let routed = model.icons[idx].intercept(&event, &model.store.columns[idx]);
            trace!("Menu routed: {event:?} => {routed:?}");
            return Ok(match routed {
                Intercept::Menu(menu_message) => Some(Message::Menu(idx, menu_message)),
                Intercept::Consumed => None,
                Intercept::Pass => self.map_event(model, &event),
            });
        }
        Ok(self.map_event(model, &event))
    }

    fn dismiss_help(event: &Event) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(Message::Exit),
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                Some(Message::Exit)
            }
            _ => None,
        }
    }

    fn map_event(&self, model: &Model, event: &Event) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.map_key(model, *key),
            Event::Mouse(mouse) => self.map_mouse(model, mouse),
            _ => None,
        }
    }

    fn map_key(&self, model: &Model, key: KeyEvent) -> Option<Message> {
        let message = match key.code {
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Char('?') => Some(Message::Help),
            KeyCode::Left | KeyCode::Char('h') => Some(Message::SelectLeft),
            KeyCode::Right | KeyCode::Char('l') => Some(Message::SelectRight),
            KeyCode::Up | KeyCode::Char('k') => Some(Message::ScrollUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Message::ScrollDown),
            KeyCode::Char('+') => Some(Message::GrowColumn),
            KeyCode::Char('-') => Some(Message::ShrinkColumn),
            KeyCode::Char('<') => Some(Message::MoveColumnLeft),
            KeyCode::Char('>') => Some(Message::MoveColumnRight),
            KeyCode::Char('f') => Some(Message::Menu(model.cursor_column, MenuMessage::Open)),
            _ => None,
        };
        trace!("Mapped: {key:?} => {message:?}");
        message
    }

    fn map_mouse(&self, model: &Model, mouse: &MouseEvent) -> Option<Message> {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            let pos = Position::new(mouse.column, mouse.row);
            if let Some(idx) = model.trigger_at(pos) {
                return Some(Message::Menu(idx, MenuMessage::Open));
            }
            if let Some(idx) = model.header_cell_at(pos) {
                return Some(Message::SelectColumn(idx));
            }
        }
        None
    }
}
