use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use url::Url;

use crate::session::{Pagination, SessionStatus};

/// Draw the header bar with title, API host, import window and busy flags
pub fn draw_header(
  frame: &mut Frame,
  area: Rect,
  title: &str,
  api_host: &str,
  pagination: Pagination,
  status: &SessionStatus,
) {
  let mut spans = vec![
    Span::styled(format!(" {} ", title), Style::default().fg(Color::Cyan).bold()),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(
      format!(" {} ", api_host),
      Style::default().fg(Color::White),
    ),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(" limit ", Style::default().fg(Color::DarkGray)),
    Span::styled(
      pagination.limit.to_string(),
      Style::default().fg(Color::Yellow).bold(),
    ),
    Span::styled("  offset ", Style::default().fg(Color::DarkGray)),
    Span::styled(
      pagination.offset.to_string(),
      Style::default().fg(Color::Yellow).bold(),
    ),
    Span::raw(" "),
  ];

  if let Some(busy) = busy_label(status) {
    spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
    spans.push(Span::styled(
      format!(" {} ", busy),
      Style::default().fg(Color::Magenta),
    ));
  }

  let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
  frame.render_widget(paragraph, area);
}

fn busy_label(status: &SessionStatus) -> Option<&'static str> {
  match (status.ingesting, status.list_loading) {
    (true, _) => Some("importing…"),
    (false, true) => Some("loading…"),
    (false, false) => None,
  }
}

/// `host[:port]` of the API base URL, as shown in the header
pub fn host_label(url: &Url) -> String {
  let host = url.host_str().unwrap_or_default();
  match url.port() {
    Some(port) => format!("{}:{}", host, port),
    None => host.to_string(),
  }
}
