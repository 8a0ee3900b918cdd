//! Session-scoped cache of lazily resolved sub-resources.

use std::collections::HashMap;

use crate::api::ResourceDetail;

/// Resolved URLs and details, keyed by resource name.
///
/// Entries are cumulative for the lifetime of the session: a list reload never
/// evicts them, even when the key no longer appears in the list.
#[derive(Debug, Default)]
pub struct ResourceCache {
  urls: HashMap<String, String>,
  details: HashMap<String, ResourceDetail>,
}

impl ResourceCache {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn url(&self, key: &str) -> Option<&str> {
    self.urls.get(key).map(String::as_str)
  }

  pub fn detail(&self, key: &str) -> Option<&ResourceDetail> {
    self.details.get(key)
  }

  pub fn has_detail(&self, key: &str) -> bool {
    self.details.contains_key(key)
  }

  /// Store a resolved URL. A later write for the same key replaces the earlier one.
  pub fn store_url(&mut self, key: &str, url: String) {
    self.urls.insert(key.to_string(), url);
  }

  /// Store a resolved detail. A later write for the same key replaces the earlier one.
  pub fn store_detail(&mut self, key: &str, detail: ResourceDetail) {
    self.details.insert(key.to_string(), detail);
  }
}
