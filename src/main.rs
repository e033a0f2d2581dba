mod action;
mod app;
mod config;
mod event;
mod fs;
mod tui;
mod ui;

use std::fs::File;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::app::App;
use crate::event::CrosstermEvents;
use crate::tui::{CrosstermMode, TerminalGuard, restore_terminal};

/// Exit code when the start directory cannot be opened.
const EXIT_STARTUP: u8 = 2;
/// Exit code for fatal errors while browsing.
const EXIT_RUNTIME: u8 = 1;

#[derive(Parser)]
#[command(name = "filer", version, about = "Minimal terminal directory browser")]
struct Args {
  /// Directory to open instead of ~/diary
  #[arg(long, env = "FILER_HOME")]
  dir: Option<PathBuf>,

  /// Log file path (defaults to the user cache directory)
  #[arg(long)]
  log_file: Option<PathBuf>,

  /// Log level: off, error, warn, info, debug, trace
  #[arg(long, default_value = "info")]
  log_level: String,
}

fn main() -> ExitCode {
  let args = Args::parse();
  init_logging(&args);

  let (mut config, config_errors) = config::Config::load();
  for e in &config_errors {
    log::warn!("{e}");
  }
  if let Some(dir) = args.dir {
    config.start_dir = dir;
  }

  let mut app = match open_start_dir(&config.start_dir) {
    Ok(app) => app,
    Err(e) => {
      log::error!("{e:#}");
      eprintln!("filer: {e:#}");
      return ExitCode::from(EXIT_STARTUP);
    }
  };
  log::info!("starting in {}", app.cwd.display());

  match browse(&mut app, &config) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      log::error!("{e:#}");
      eprintln!("filer: {e:#}");
      ExitCode::from(EXIT_RUNTIME)
    }
  }
}

fn init_logging(args: &Args) {
  let path = args
    .log_file
    .clone()
    .or_else(|| dirs::cache_dir().map(|d| d.join("filer").join("filer.log")));
  let Some(path) = path else { return };
  if let Some(parent) = path.parent() {
    let _ = std::fs::create_dir_all(parent);
  }

  let log_config = ConfigBuilder::new()
    .set_time_format_rfc3339()
    .build();

  let level = args.log_level.parse().unwrap_or(LevelFilter::Info);
  if let Ok(log_file) = File::create(&path) {
    let _ = WriteLogger::init(level, log_config, log_file);
  }
}

fn open_start_dir(dir: &std::path::Path) -> Result<App> {
  let root = std::fs::canonicalize(dir)
    .with_context(|| format!("cannot open start directory {}", dir.display()))?;
  Ok(App::new(root)?)
}

/// Owns the terminal for the whole session. The guard gives it back on every
/// path out of here, and the panic hook covers unwinding.
fn browse(app: &mut App, config: &config::Config) -> Result<()> {
  let original_hook = panic::take_hook();
  panic::set_hook(Box::new(move |info| {
    let _ = restore_terminal();
    original_hook(info);
  }));

  let mut guard = TerminalGuard::acquire(CrosstermMode)?;
  let backend = CrosstermBackend::new(io::stdout());
  let mut terminal = Terminal::new(backend)?;
  let mut events = CrosstermEvents;

  let result = tui::run(app, &mut events, config, |app, entries| {
    terminal.draw(|frame| ui::draw(frame, app, entries))?;
    Ok(())
  });

  let restored = guard.restore();
  result?;
  restored
}
