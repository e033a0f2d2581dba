use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget};

use super::{Emphasis, line};
use crate::fs::DirEntry;

/// First visible row so that `selected` stays on screen.
pub fn scroll_offset(selected: usize, height: usize) -> usize {
  if height == 0 || selected < height {
    0
  } else {
    selected + 1 - height
  }
}

pub fn render_file_list(entries: &[DirEntry], selected: usize, area: Rect, buf: &mut Buffer) {
  let height = area.height as usize;
  let start = scroll_offset(selected, height).min(entries.len());
  let end = (start + height).min(entries.len());

  let lines: Vec<Line> = entries[start..end]
    .iter()
    .enumerate()
    .map(|(i, entry)| {
      let emphasis = if start + i == selected {
        Emphasis::Highlighted
      } else {
        Emphasis::Normal
      };
      line(entry.display_name(), emphasis)
    })
    .collect();

  Paragraph::new(lines).render(area, buf);
}
