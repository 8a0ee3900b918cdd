use ratatui::widgets::ListState;

use crate::api::ResourceDetail;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Keep the selection inside `0..len`, selecting the first row when nothing is selected
pub fn ensure_valid_selection(state: &mut ListState, len: usize) {
  if len == 0 {
    state.select(None);
    return;
  }
  match state.selected() {
    Some(i) if i >= len => state.select(Some(len - 1)),
    None => state.select(Some(0)),
    _ => {}
  }
}

/// Label/value pairs for the fields a detail record actually carries
pub fn detail_fields(detail: &ResourceDetail) -> Vec<(&'static str, String)> {
  let mut fields = Vec::new();
  if let Some(types) = &detail.types {
    fields.push(("types", types.clone()));
  }
  if let Some(abilities) = &detail.abilities {
    fields.push(("abilities", abilities.clone()));
  }
  if let Some(xp) = detail.base_experience {
    fields.push(("base experience", xp.to_string()));
  }
  if let Some(height) = detail.height_meters {
    fields.push(("height", format!("{} m", height)));
  }
  if let Some(weight) = detail.weight_kilograms {
    fields.push(("weight", format!("{} kg", weight)));
  }
  if let Some(sprite) = &detail.sprite_url {
    fields.push(("sprite", sprite.clone()));
  }
  fields
}
