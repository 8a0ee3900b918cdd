use std::collections::HashMap;

/// Per-key open/closed flags for the URL panel and the detail panel.
///
/// A missing key reads as closed. Flags survive list reloads.
#[derive(Debug, Default)]
pub struct Visibility {
  url_open: HashMap<String, bool>,
  detail_open: HashMap<String, bool>,
}

impl Visibility {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_url_open(&self, key: &str) -> bool {
    self.url_open.get(key).copied().unwrap_or(false)
  }

  pub fn is_detail_open(&self, key: &str) -> bool {
    self.detail_open.get(key).copied().unwrap_or(false)
  }

  pub fn open_url(&mut self, key: &str) {
    self.url_open.insert(key.to_string(), true);
  }

  pub fn open_detail(&mut self, key: &str) {
    self.detail_open.insert(key.to_string(), true);
  }

  /// Flip the URL panel flag for `key`
  pub fn toggle_url(&mut self, key: &str) {
    let open = self.url_open.entry(key.to_string()).or_insert(false);
    *open = !*open;
  }

  /// Flip the detail panel flag for `key`
  pub fn toggle_detail(&mut self, key: &str) {
    let open = self.detail_open.entry(key.to_string()).or_insert(false);
    *open = !*open;
  }
}
