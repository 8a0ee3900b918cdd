/// Busy flags and the single error slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStatus {
  pub list_loading: bool,
  pub ingesting: bool,
  pub last_error: Option<String>,
}

/// Import page window. Edited by the front end, read only by ingest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
  /// Declared range is 1..=200; not enforced here
  pub limit: u32,
  pub offset: u32,
}

impl Default for Pagination {
  fn default() -> Self {
    Self {
      limit: 25,
      offset: 0,
    }
  }
}
