use std::path::{Path, PathBuf};

use crate::action::Action;
use crate::fs::{DirEntry, ListingError, list_entries};

pub const UNSUPPORTED_OPEN: &str = "Opening File is not implemented yet";

/// All mutable browser state. Listings are never stored here; every
/// transition re-reads the current directory first.
#[derive(Debug)]
pub struct App {
  pub cwd: PathBuf,
  pub selected: usize,
  pub messages: Vec<String>,
  pub should_quit: bool,
}

impl App {
  pub fn new(start: PathBuf) -> Result<Self, ListingError> {
    list_entries(&start)?;
    Ok(Self {
      cwd: start,
      selected: 0,
      messages: Vec::new(),
      should_quit: false,
    })
  }

  /// Lists the current directory. If it can no longer be read, moves to the
  /// nearest ancestor that can and leaves a message behind.
  pub fn listing(&mut self) -> Result<Vec<DirEntry>, ListingError> {
    match list_entries(&self.cwd) {
      Ok(entries) => Ok(entries),
      Err(err) => self.fall_back(err),
    }
  }

  fn fall_back(&mut self, err: ListingError) -> Result<Vec<DirEntry>, ListingError> {
    let old = self.cwd.clone();
    let mut candidate = old.parent();
    while let Some(dir) = candidate {
      if let Ok(entries) = list_entries(dir) {
        log::warn!("{err}; falling back to {}", dir.display());
        self.messages.push(format!(
          "{} is no longer readable, moved to {}",
          old.display(),
          dir.display()
        ));
        self.cwd = dir.to_path_buf();
        self.selected = 0;
        return Ok(entries);
      }
      candidate = dir.parent();
    }
    Err(err)
  }

  /// Applies one input action. Returns whether the screen needs redrawing.
  pub fn update(&mut self, action: Action) -> Result<bool, ListingError> {
    match action {
      Action::Quit => {
        self.should_quit = true;
        return Ok(false);
      }
      Action::None => return Ok(false),
      Action::Redraw => return Ok(true),
      Action::MoveUp | Action::MoveDown | Action::Activate => {}
    }

    let before = self.cwd.clone();
    let entries = self.listing()?;
    if self.cwd != before {
      // Landing on the fallback directory is the whole transition
      return Ok(true);
    }
    let clamped = self.clamp_selection(entries.len());

    let changed = match action {
      Action::MoveDown => {
        if self.selected + 1 < entries.len() {
          self.selected += 1;
          true
        } else {
          false
        }
      }
      Action::MoveUp => {
        if self.selected != 0 {
          self.selected -= 1;
          true
        } else {
          false
        }
      }
      Action::Activate => {
        self.activate(&entries[self.selected]);
        true
      }
      _ => false,
    };
    Ok(changed || clamped)
  }

  /// Keeps the selection inside a listing of `len` entries. Returns whether it moved.
  fn clamp_selection(&mut self, len: usize) -> bool {
    let max = len.saturating_sub(1);
    if self.selected > max {
      self.selected = max;
      true
    } else {
      false
    }
  }

  fn activate(&mut self, entry: &DirEntry) {
    if !entry.is_dir() {
      log::warn!("open requested for {}", self.cwd.join(&entry.name).display());
      self.messages.push(UNSUPPORTED_OPEN.to_string());
      return;
    }

    let target = if entry.is_parent() {
      self.cwd.parent().map(Path::to_path_buf).unwrap_or_else(|| self.cwd.clone())
    } else {
      self.cwd.join(&entry.name)
    };

    match list_entries(&target) {
      Ok(_) => {
        log::info!("entering {}", target.display());
        self.cwd = target;
        self.selected = 0;
      }
      Err(err) => {
        log::warn!("{err}");
        self.messages.push(format!("Cannot open {}: {}", entry.name, err.source));
      }
    }
  }

  pub fn take_messages(&mut self) -> Vec<String> {
    std::mem::take(&mut self.messages)
  }
}
