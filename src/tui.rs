use std::io;

use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::{
  EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};

use crate::app::App;
use crate::config::Config;
use crate::event::{EventSource, map_event};
use crate::fs::DirEntry;

/// Switches the terminal between the user's mode and the browser's mode.
pub trait TerminalMode {
  fn enter(&mut self) -> Result<()>;
  fn leave(&mut self) -> Result<()>;
}

/// Raw, non-echoing input on the alternate screen.
pub struct CrosstermMode;

impl TerminalMode for CrosstermMode {
  fn enter(&mut self) -> Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    Ok(())
  }

  fn leave(&mut self) -> Result<()> {
    restore_terminal()
  }
}

/// Usable from a panic hook, where no guard is reachable.
pub fn restore_terminal() -> Result<()> {
  disable_raw_mode()?;
  execute!(io::stdout(), LeaveAlternateScreen)?;
  Ok(())
}

/// Holds the terminal in browser mode and gives it back exactly once, either
/// through `restore` or on drop.
pub struct TerminalGuard<M: TerminalMode> {
  mode: M,
  active: bool,
}

impl<M: TerminalMode> TerminalGuard<M> {
  pub fn acquire(mut mode: M) -> Result<Self> {
    mode.enter()?;
    Ok(Self { mode, active: true })
  }

  pub fn restore(&mut self) -> Result<()> {
    if !self.active {
      return Ok(());
    }
    self.active = false;
    self.mode.leave()
  }
}

impl<M: TerminalMode> Drop for TerminalGuard<M> {
  fn drop(&mut self) {
    if let Err(e) = self.restore() {
      log::error!("failed to restore terminal: {e:#}");
    }
  }
}

/// Runs the browser until a quit action. Every render receives a fresh
/// listing; actions that change nothing skip the render entirely.
pub fn run<E, R>(app: &mut App, events: &mut E, config: &Config, mut render: R) -> Result<()>
where
  E: EventSource,
  R: FnMut(&mut App, &[DirEntry]) -> Result<()>,
{
  let entries = app.listing()?;
  render(app, &entries)?;

  loop {
    let action = map_event(events.next()?, config);
    let redraw = app.update(action)?;
    if app.should_quit {
      log::info!("quit requested in {}", app.cwd.display());
      return Ok(());
    }
    if redraw {
      let entries = app.listing()?;
      render(app, &entries)?;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::app::UNSUPPORTED_OPEN;
  use crate::event::Event;
  use crate::ui;
  use crate::ui::test_util::row_text;
  use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
  use ratatui::Terminal;
  use ratatui::backend::TestBackend;
  use std::cell::Cell;
  use std::collections::VecDeque;
  use std::path::PathBuf;
  use std::rc::Rc;

  #[derive(Clone, Default)]
  struct CountingMode {
    entered: Rc<Cell<u32>>,
    left: Rc<Cell<u32>>,
  }

  impl TerminalMode for CountingMode {
    fn enter(&mut self) -> Result<()> {
      self.entered.set(self.entered.get() + 1);
      Ok(())
    }

    fn leave(&mut self) -> Result<()> {
      self.left.set(self.left.get() + 1);
      Ok(())
    }
  }

  /// Replays queued events, then fails like a detached terminal.
  struct Scripted(VecDeque<Event>);

  impl Scripted {
    fn keys(codes: &[KeyCode]) -> Self {
      Self(
        codes
          .iter()
          .map(|&code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
          .collect(),
      )
    }
  }

  impl EventSource for Scripted {
    fn next(&mut self) -> Result<Event> {
      self
        .0
        .pop_front()
        .ok_or_else(|| anyhow::anyhow!("input closed"))
    }
  }

  fn setup_diary() -> (tempfile::TempDir, PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let diary = tmp.path().join("diary");
    std::fs::create_dir_all(diary.join("notes")).unwrap();
    std::fs::write(diary.join("todo.txt"), "").unwrap();
    let diary = diary.canonicalize().unwrap();
    (tmp, diary)
  }

  fn down_to(dir: &std::path::Path, name: &str) -> Vec<KeyCode> {
    let idx = crate::fs::list_entries(dir)
      .unwrap()
      .iter()
      .position(|e| e.name == name)
      .unwrap();
    vec![KeyCode::Char('j'); idx]
  }

  #[test]
  fn test_guard_restores_once_on_explicit_restore_and_drop() {
    let mode = CountingMode::default();
    let mut guard = TerminalGuard::acquire(mode.clone()).unwrap();
    assert_eq!(mode.entered.get(), 1);
    guard.restore().unwrap();
    guard.restore().unwrap();
    drop(guard);
    assert_eq!(mode.left.get(), 1);
  }

  #[test]
  fn test_guard_restores_on_drop() {
    let mode = CountingMode::default();
    {
      let _guard = TerminalGuard::acquire(mode.clone()).unwrap();
    }
    assert_eq!(mode.left.get(), 1);
  }

  #[test]
  fn test_quit_ends_loop_and_restores_once() {
    let (_tmp, diary) = setup_diary();
    let mode = CountingMode::default();
    let config = Config::load().0;

    for quit in [KeyCode::Char('q'), KeyCode::Char('Q')] {
      let mut guard = TerminalGuard::acquire(mode.clone()).unwrap();
      let mut app = App::new(diary.clone()).unwrap();
      let mut keys = down_to(&diary, "todo.txt");
      keys.extend([KeyCode::Enter, quit, KeyCode::Char('j')]);
      let mut events = Scripted::keys(&keys);

      run(&mut app, &mut events, &config, |_, _| Ok(())).unwrap();
      guard.restore().unwrap();
      drop(guard);

      assert!(app.should_quit);
      // The key after quit is never read
      assert_eq!(events.0.len(), 1);
    }
    assert_eq!(mode.entered.get(), 2);
    assert_eq!(mode.left.get(), 2);
  }

  #[test]
  fn test_input_failure_is_fatal_and_restores() {
    let (_tmp, diary) = setup_diary();
    let mode = CountingMode::default();
    let config = Config::load().0;

    let result = {
      let _guard = TerminalGuard::acquire(mode.clone()).unwrap();
      let mut app = App::new(diary).unwrap();
      let mut events = Scripted::keys(&[KeyCode::Char('j')]);
      run(&mut app, &mut events, &config, |_, _| Ok(()))
    };
    assert!(result.is_err());
    assert_eq!(mode.left.get(), 1);
  }

  #[test]
  fn test_unrecognized_keys_skip_render() {
    let (_tmp, diary) = setup_diary();
    let config = Config::load().0;
    let mut app = App::new(diary).unwrap();
    let mut events = Scripted::keys(&[
      KeyCode::Char('x'),
      KeyCode::Left,
      KeyCode::Char('k'),
      KeyCode::Char('j'),
      KeyCode::Char('q'),
    ]);
    let mut renders = 0;

    run(&mut app, &mut events, &config, |_, _| {
      renders += 1;
      Ok(())
    })
    .unwrap();
    // Initial draw plus the one successful move; `k` at the top is a no-op
    assert_eq!(renders, 2);
    assert_eq!(app.selected, 1);
  }

  #[test]
  fn test_message_visible_for_exactly_one_render() {
    let (_tmp, diary) = setup_diary();
    let config = Config::load().0;
    let mut app = App::new(diary.clone()).unwrap();
    let mut keys = down_to(&diary, "todo.txt");
    keys.extend([KeyCode::Enter, KeyCode::Char('k'), KeyCode::Char('q')]);
    let mut events = Scripted::keys(&keys);
    let mut terminal = Terminal::new(TestBackend::new(50, 10)).unwrap();
    let mut frames: Vec<Vec<String>> = Vec::new();

    run(&mut app, &mut events, &config, |app, entries| {
      terminal.draw(|frame| ui::draw(frame, app, entries))?;
      let buf = terminal.backend().buffer();
      frames.push((0..buf.area.height).map(|y| row_text(buf, y)).collect());
      Ok(())
    })
    .unwrap();

    let shown: Vec<usize> = frames
      .iter()
      .enumerate()
      .filter(|(_, rows)| rows.iter().any(|r| r == UNSUPPORTED_OPEN))
      .map(|(i, _)| i)
      .collect();
    assert_eq!(shown, vec![frames.len() - 2]);
    assert!(app.messages.is_empty());
  }

  #[test]
  fn test_diary_scenario_through_loop() {
    let (_tmp, diary) = setup_diary();
    let config = Config::load().0;
    let mut app = App::new(diary.clone()).unwrap();

    let mut keys = down_to(&diary, "todo.txt");
    keys.push(KeyCode::Enter);
    let mut events = Scripted::keys(&keys);
    let mut seen = Vec::new();
    let _ = run(&mut app, &mut events, &config, |app, _| {
      seen.extend(app.take_messages());
      Ok(())
    });
    assert_eq!(seen, vec![UNSUPPORTED_OPEN.to_string()]);
    assert_eq!(app.cwd, diary);

    let todo = crate::fs::list_entries(&diary).unwrap().iter().position(|e| e.name == "todo.txt").unwrap();
    let notes = crate::fs::list_entries(&diary).unwrap().iter().position(|e| e.name == "notes").unwrap();
    let step = if notes < todo { KeyCode::Up } else { KeyCode::Down };
    let mut keys = vec![step; todo.abs_diff(notes)];
    keys.extend([KeyCode::Enter, KeyCode::Char('q')]);
    let mut events = Scripted::keys(&keys);
    run(&mut app, &mut events, &config, |_, _| Ok(())).unwrap();

    assert_eq!(app.cwd, diary.join("notes"));
    assert_eq!(app.selected, 0);
  }
}
