use anyhow::{Context, Result};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

use crate::action::Action;
use crate::config::{Config, normalize_key_event};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
  Key(KeyEvent),
  Resize(u16, u16),
}

/// A blocking source of input events, one at a time.
pub trait EventSource {
  fn next(&mut self) -> Result<Event>;
}

/// Reads straight from the terminal. No polling and no background thread.
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
  fn next(&mut self) -> Result<Event> {
    loop {
      match event::read().context("failed to read terminal input")? {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => return Ok(Event::Key(key)),
        CrosstermEvent::Resize(w, h) => return Ok(Event::Resize(w, h)),
        _ => {}
      }
    }
  }
}

pub fn map_key(key: KeyEvent, config: &Config) -> Action {
  let kb = normalize_key_event(key);
  let action = config.keys.get(&kb).cloned().unwrap_or(Action::None);
  log::debug!("key {} -> {action:?}", kb.display_key());
  action
}

pub fn map_event(event: Event, config: &Config) -> Action {
  match event {
    Event::Key(key) => map_key(key, config),
    Event::Resize(_, _) => Action::Redraw,
  }
}
