use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::action::Action;

const DEFAULT_TOML: &str = r#"[general]
start_dir = "~/diary"   # directory shown on startup

[keys]
j = "move_down"
k = "move_up"
down = "move_down"
up = "move_up"
enter = "activate"
"ctrl+j" = "activate"   # line feed
"ctrl+m" = "activate"   # carriage return
q = "quit"
"shift+q" = "quit"
"ctrl+c" = "quit"
r = "redraw"
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
  pub code: KeyCode,
  pub modifiers: KeyModifiers,
}

impl KeyBinding {
  fn plain(code: KeyCode) -> Self {
    Self { code, modifiers: KeyModifiers::NONE }
  }

  /// Short human form for logs, e.g. `Ctrl+j` or `Down`.
  pub fn display_key(&self) -> String {
    let key = match self.code {
      KeyCode::Char(c) => c.to_string(),
      code => format!("{code:?}"),
    };
    if self.modifiers.contains(KeyModifiers::CONTROL) {
      format!("Ctrl+{key}")
    } else {
      key
    }
  }
}

pub struct Config {
  pub start_dir: PathBuf,
  pub keys: HashMap<KeyBinding, Action>,
}

#[derive(Deserialize)]
struct TomlConfig {
  general: GeneralConfig,
  keys: HashMap<String, String>,
}

#[derive(Deserialize)]
struct GeneralConfig {
  start_dir: String,
}

fn single_char(s: &str) -> Option<char> {
  let mut chars = s.chars();
  match (chars.next(), chars.next()) {
    (Some(c), None) => Some(c),
    _ => None,
  }
}

/// Accepts `up`, `down`, `enter`, a single character, `ctrl+<char>` and
/// `shift+<char>`. Shifted characters are stored as their uppercase form.
pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
  match s.split_once('+') {
    Some(("ctrl", key)) => single_char(key).map(|c| KeyBinding {
      code: KeyCode::Char(c),
      modifiers: KeyModifiers::CONTROL,
    }),
    Some(("shift", key)) => {
      single_char(key).map(|c| KeyBinding::plain(KeyCode::Char(c.to_ascii_uppercase())))
    }
    Some(_) => None,
    None => match s {
      "up" => Some(KeyBinding::plain(KeyCode::Up)),
      "down" => Some(KeyBinding::plain(KeyCode::Down)),
      "enter" => Some(KeyBinding::plain(KeyCode::Enter)),
      _ => single_char(s).map(|c| KeyBinding::plain(KeyCode::Char(c))),
    },
  }
}

/// Terminals report `Q` as shift+`Q`; bindings store it without the shift.
pub fn normalize_key_event(key: KeyEvent) -> KeyBinding {
  let mut modifiers = key.modifiers;
  if matches!(key.code, KeyCode::Char(c) if c.is_uppercase()) {
    modifiers.remove(KeyModifiers::SHIFT);
  }
  KeyBinding { code: key.code, modifiers }
}

/// Expands a leading `~` to the user's home directory.
pub fn expand_tilde(s: &str) -> PathBuf {
  let home = dirs::home_dir();
  match (s, home) {
    ("~", Some(home)) => home,
    (s, Some(home)) if s.starts_with("~/") => home.join(&s[2..]),
    (s, _) => PathBuf::from(s),
  }
}

impl Config {
  /// Builds the config from the built-in bindings.
  pub fn load() -> (Config, Vec<String>) {
    Self::parse(DEFAULT_TOML)
  }

  fn parse(s: &str) -> (Config, Vec<String>) {
    let mut errors = Vec::new();
    let mut config = Config {
      start_dir: PathBuf::from("."),
      keys: HashMap::new(),
    };

    let toml_config: TomlConfig = match toml::from_str(s) {
      Ok(c) => c,
      Err(e) => {
        errors.push(format!("failed to parse config: {e}"));
        return (config, errors);
      }
    };

    config.start_dir = expand_tilde(&toml_config.general.start_dir);
    for (key_str, action_str) in &toml_config.keys {
      let Some(kb) = parse_key_binding(key_str) else {
        errors.push(format!("invalid key binding: {key_str:?}"));
        continue;
      };
      let Some(action) = Action::from_name(action_str) else {
        errors.push(format!("invalid action: {action_str:?}"));
        continue;
      };
      config.keys.insert(kb, action);
    }
    (config, errors)
  }
}
