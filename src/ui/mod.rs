mod catalog;
mod header;
pub mod input;
mod utils;

pub use header::host_label;

use crate::app::{App, Field, Mode};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // Header
      Constraint::Length(1), // Error line
      Constraint::Min(1),    // Catalog
      Constraint::Length(1), // Status bar
    ])
    .split(frame.area());

  let session = app.session();
  header::draw_header(
    frame,
    chunks[0],
    app.title(),
    app.api_host(),
    session.pagination(),
    session.status(),
  );

  if let Some(error) = &session.status().last_error {
    let paragraph =
      Paragraph::new(format!(" Error: {}", error)).style(Style::default().fg(Color::Red));
    frame.render_widget(paragraph, chunks[1]);
  }

  let (session, list_state) = app.session_and_list_state();
  let rows = session.rows();
  catalog::draw_catalog(frame, chunks[2], &rows, session.status(), list_state);

  draw_status_bar(frame, chunks[3], app);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
  let (content, style) = match app.mode() {
    Mode::Normal => {
      let hint = " j/k:nav  Enter:url  d:detail  r:refresh  i:import  l:limit  o:offset  q:quit";
      (hint.to_string(), Style::default().fg(Color::DarkGray))
    }
    Mode::Edit(field) => {
      let label = match field {
        Field::Limit => "limit",
        Field::Offset => "offset",
      };
      let text = format!(" {}: {}", label, app.input().value());
      (text, Style::default().fg(Color::Yellow))
    }
  };

  let paragraph = Paragraph::new(content).style(style);
  frame.render_widget(paragraph, area);

  if let Mode::Edit(field) = app.mode() {
    let label_len = match field {
      Field::Limit => "limit".len(),
      Field::Offset => "offset".len(),
    };
    // " " + label + ": " precede the buffer
    let x = area.x + (label_len + 3 + app.input().cursor_position()) as u16;
    frame.set_cursor_position((x, area.y));
  }
}
