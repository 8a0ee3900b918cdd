use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::session::{RowView, SessionStatus};
use crate::ui::utils::{detail_fields, ensure_valid_selection, truncate};

const URL_WIDTH: usize = 80;

/// Draw the catalog list, one item per row with its open panels underneath
pub fn draw_catalog(
  frame: &mut Frame,
  area: Rect,
  rows: &[RowView<'_>],
  status: &SessionStatus,
  list_state: &mut ListState,
) {
  ensure_valid_selection(list_state, rows.len());

  let title = if status.list_loading {
    " Pokémon (loading...) ".to_string()
  } else {
    format!(" Pokémon ({}) ", rows.len())
  };

  let block = Block::default()
    .title(title)
    .title_alignment(Alignment::Center)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Blue));

  if rows.is_empty() {
    let content = if status.list_loading {
      ""
    } else {
      "No data yet. Start an import with 'i'."
    };
    let paragraph = Paragraph::new(content)
      .block(block)
      .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
    return;
  }

  let items: Vec<ListItem> = rows.iter().map(|row| ListItem::new(row_lines(row))).collect();

  let list = List::new(items)
    .block(block)
    .highlight_style(
      Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ");

  frame.render_stateful_widget(list, area, list_state);
}

/// Lines for one row: name with chevron, then the URL and detail panels if open
fn row_lines(row: &RowView<'_>) -> Vec<Line<'static>> {
  let chevron = if row.url_open { "▾" } else { "▸" };
  let mut name = vec![
    Span::styled(format!("{} ", chevron), Style::default().fg(Color::DarkGray)),
    Span::styled(row.summary.key.clone(), Style::default().fg(Color::Cyan)),
  ];
  if row.detail_open {
    name.push(Span::styled(" [detail]", Style::default().fg(Color::DarkGray)));
  }
  let mut lines = vec![Line::from(name)];

  if row.url_open {
    if let Some(url) = row.url {
      lines.push(Line::from(Span::styled(
        format!("    {}", truncate(url, URL_WIDTH)),
        Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
      )));
    }
  }

  if row.detail_open {
    if let Some(detail) = row.detail {
      for (label, value) in detail_fields(detail) {
        lines.push(Line::from(vec![
          Span::styled(format!("    {}: ", label), Style::default().fg(Color::DarkGray)),
          Span::raw(truncate(&value, URL_WIDTH)),
        ]));
      }
    }
  }

  lines
}
