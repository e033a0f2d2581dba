pub mod file_list;
pub mod messages;

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::app::App;
use crate::fs::DirEntry;

/// Visual weight of a single drawn line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
  Normal,
  Highlighted,
}

impl Emphasis {
  pub fn style(self) -> Style {
    match self {
      Emphasis::Normal => Style::default(),
      Emphasis::Highlighted => Style::default().add_modifier(Modifier::REVERSED),
    }
  }
}

pub fn line(text: String, emphasis: Emphasis) -> Line<'static> {
  Line::from(Span::styled(text, emphasis.style()))
}

/// Draws one full frame. Pending messages are consumed here, so each one is
/// shown by exactly one draw.
pub fn draw(frame: &mut Frame, app: &mut App, entries: &[DirEntry]) {
  let messages = app.take_messages();
  let area = frame.area();

  // Vertical layout: header, body
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(1), Constraint::Min(0)])
    .split(area);

  render_header(app, entries.len(), chunks[0], frame.buffer_mut());

  // Body: listing, then separator + messages directly below it. The listing
  // keeps at least one row; messages are cut off first.
  let body_height = chunks[1].height;
  let entry_rows = u16::try_from(entries.len()).unwrap_or(u16::MAX);
  let message_rows = u16::try_from(messages.len()).unwrap_or(u16::MAX);
  let list_height = entry_rows
    .min(body_height.saturating_sub(message_rows.saturating_add(1)))
    .max(entry_rows.min(body_height).min(1));
  let body = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(list_height), Constraint::Min(0)])
    .split(chunks[1]);

  file_list::render_file_list(entries, app.selected, body[0], frame.buffer_mut());
  messages::render_messages(&messages, body[1], frame.buffer_mut());
}

fn render_header(app: &App, entry_count: usize, area: Rect, buf: &mut Buffer) {
  let spans = vec![
    Span::styled(
      format!(" {}", app.cwd.display()),
      Style::default()
        .fg(Color::Indexed(252))
        .add_modifier(Modifier::BOLD),
    ),
    Span::styled(
      format!("  {} item(s)", entry_count.saturating_sub(1)),
      Style::default().fg(Color::DarkGray),
    ),
  ];

  let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Indexed(236)));
  paragraph.render(area, buf);
}
