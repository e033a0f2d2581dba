use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget};

use super::{Emphasis, line};

pub fn render_messages(messages: &[String], area: Rect, buf: &mut Buffer) {
  // Blank separator row first
  let mut lines = vec![Line::from("")];
  lines.extend(
    messages
      .iter()
      .map(|msg| line(msg.clone(), Emphasis::Highlighted)),
  );

  Paragraph::new(lines).render(area, buf);
}
