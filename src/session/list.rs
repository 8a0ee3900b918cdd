use crate::api::ResourceSummary;

/// Ordered rows of the current view. Replaced wholesale on every successful load.
#[derive(Debug, Default)]
pub struct ListStore {
  rows: Vec<ResourceSummary>,
}

impl ListStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn rows(&self) -> &[ResourceSummary] {
    &self.rows
  }

  pub fn replace(&mut self, rows: Vec<ResourceSummary>) {
    self.rows = rows;
  }
}
