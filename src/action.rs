#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
  Quit,
  MoveUp,
  MoveDown,
  Activate,
  Redraw,
  None,
}

impl Action {
  pub fn from_name(name: &str) -> Option<Action> {
    match name {
      "quit" => Some(Action::Quit),
      "move_up" => Some(Action::MoveUp),
      "move_down" => Some(Action::MoveDown),
      "activate" => Some(Action::Activate),
      "redraw" => Some(Action::Redraw),
      "none" => Some(Action::None),
      _ => None,
    }
  }
}
