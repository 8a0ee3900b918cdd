//! Client-side state for the catalog: list, lazily resolved sub-resources,
//! panel visibility and the status flags the front end renders.
//!
//! Public operations never wait on the network. They decide synchronously what
//! to do, update flags, and hand the call to the [`Orchestrator`]. Results are
//! merged when the owner drains completions with [`Session::poll`] (UI tick) or
//! awaits them with [`Session::next_completion`] / [`Session::settle`].

mod cache;
mod list;
mod orchestrator;
mod status;
mod visibility;

pub use status::{Pagination, SessionStatus};

use cache::ResourceCache;
use list::ListStore;
use orchestrator::Orchestrator;
use visibility::Visibility;

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::{ApiError, CatalogApi, ResourceDetail, ResourceSummary};

/// Page size used by list loads. Independent of the import pagination.
pub const LIST_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadOrigin {
  User,
  /// Reload chained after a successful import
  Ingest,
}

/// Outcome of one background call
#[derive(Debug)]
enum Completion {
  Listed {
    origin: LoadOrigin,
    result: Result<Vec<ResourceSummary>, ApiError>,
  },
  Ingested(Result<(), ApiError>),
  UrlResolved {
    key: String,
    result: Result<String, ApiError>,
  },
  DetailResolved {
    key: String,
    result: Result<ResourceDetail, ApiError>,
  },
}

/// Display state of one row: summary joined with cache and visibility by key
#[derive(Debug, Clone, PartialEq)]
pub struct RowView<'a> {
  pub summary: &'a ResourceSummary,
  /// The list URL if present, else the resolved one
  pub url: Option<&'a str>,
  pub url_open: bool,
  pub detail: Option<&'a ResourceDetail>,
  pub detail_open: bool,
}

pub struct Session {
  api: Arc<dyn CatalogApi>,
  list: ListStore,
  cache: ResourceCache,
  visibility: Visibility,
  status: SessionStatus,
  pagination: Pagination,
  orchestrator: Orchestrator<Completion>,
}

impl Session {
  pub fn new(api: Arc<dyn CatalogApi>, pagination: Pagination) -> Self {
    Self {
      api,
      list: ListStore::new(),
      cache: ResourceCache::new(),
      visibility: Visibility::new(),
      status: SessionStatus::default(),
      pagination,
      orchestrator: Orchestrator::new(),
    }
  }

  // ==========================================================================
  // Operations
  // ==========================================================================

  /// Reload the list. The previous list stays until a successful response replaces it.
  pub fn load(&mut self) {
    self.start_load(LoadOrigin::User);
  }

  /// Trigger a backend import for the current pagination, then reload the list.
  ///
  /// Overlapping imports are not guarded against; the caller should not issue
  /// one while `status().ingesting` is set.
  pub fn ingest(&mut self) {
    self.status.ingesting = true;
    self.status.last_error = None;

    let Pagination { limit, offset } = self.pagination;
    info!(limit, offset, "starting import");

    let api = Arc::clone(&self.api);
    self.orchestrator.spawn(async move {
      Completion::Ingested(api.ingest(limit, offset).await)
    });
  }

  /// Toggle the URL panel for `row`, resolving the URL on first open.
  ///
  /// An open panel is closed. A closed panel opens right away when a URL is
  /// already known; otherwise the URL is fetched and the panel opens once it
  /// arrives. Failed fetches leave the panel closed and are never cached.
  pub fn resolve_url(&mut self, row: &ResourceSummary) {
    self.status.last_error = None;
    let key = row.key.as_str();

    if self.visibility.is_url_open(key) {
      self.visibility.toggle_url(key);
      return;
    }

    if row.url().is_some() || self.cache.url(key).is_some() {
      self.visibility.open_url(key);
      return;
    }

    debug!(key, "resolving url");
    let api = Arc::clone(&self.api);
    let key = key.to_string();
    self.orchestrator.spawn(async move {
      let result = api.resolve_url(&key).await;
      Completion::UrlResolved { key, result }
    });
  }

  /// Toggle the detail panel for `key`, fetching the detail on first open.
  ///
  /// The panel only opens once a detail is cached; a failed fetch leaves it closed.
  pub fn resolve_detail(&mut self, key: &str) {
    self.status.last_error = None;

    if self.visibility.is_detail_open(key) {
      self.visibility.toggle_detail(key);
      return;
    }

    if self.cache.has_detail(key) {
      self.visibility.open_detail(key);
      return;
    }

    debug!(key, "resolving detail");
    let api = Arc::clone(&self.api);
    let key = key.to_string();
    self.orchestrator.spawn(async move {
      let result = api.resolve_detail(&key).await;
      Completion::DetailResolved { key, result }
    });
  }

  // ==========================================================================
  // Completion handling
  // ==========================================================================

  /// Apply every completion that has already arrived.
  ///
  /// Returns `true` if state changed. Call this on each event loop tick.
  pub fn poll(&mut self) -> bool {
    let mut changed = false;
    while let Some(completion) = self.orchestrator.try_next() {
      self.apply(completion);
      changed = true;
    }
    changed
  }

  /// Wait for the next completion and apply it. Returns `false` if nothing is in flight.
  pub async fn next_completion(&mut self) -> bool {
    match self.orchestrator.next().await {
      Some(completion) => {
        self.apply(completion);
        true
      }
      None => false,
    }
  }

  /// Apply completions until no call is in flight, including chained reloads.
  pub async fn settle(&mut self) {
    while self.next_completion().await {}
  }

  /// Number of calls still running
  #[cfg(test)]
  pub fn in_flight(&self) -> usize {
    self.orchestrator.in_flight()
  }

  fn start_load(&mut self, origin: LoadOrigin) {
    self.status.list_loading = true;
    self.status.last_error = None;

    let api = Arc::clone(&self.api);
    self.orchestrator.spawn(async move {
      let result = api.list(LIST_PAGE_SIZE).await;
      Completion::Listed { origin, result }
    });
  }

  fn apply(&mut self, completion: Completion) {
    match completion {
      Completion::Listed { origin, result } => {
        self.status.list_loading = false;
        match result {
          Ok(rows) => {
            debug!(count = rows.len(), "list loaded");
            self.list.replace(rows);
          }
          Err(e) => {
            warn!(error = %e, "list load failed");
            self.status.last_error = Some(e.to_string());
          }
        }
        if origin == LoadOrigin::Ingest {
          self.status.ingesting = false;
        }
      }
      Completion::Ingested(result) => match result {
        Ok(()) => {
          info!("import accepted, reloading list");
          self.start_load(LoadOrigin::Ingest);
        }
        Err(e) => {
          warn!(error = %e, "import failed");
          self.status.last_error = Some(e.to_string());
          self.status.ingesting = false;
        }
      },
      Completion::UrlResolved { key, result } => match result {
        Ok(url) => {
          debug!(key = %key, url = %url, "url resolved");
          self.cache.store_url(&key, url);
          self.visibility.open_url(&key);
        }
        Err(e) => {
          warn!(key = %key, error = %e, "url resolve failed");
          self.status.last_error = Some(if e.is_status() {
            format!("URL not found for {}", key)
          } else {
            e.to_string()
          });
        }
      },
      Completion::DetailResolved { key, result } => match result {
        Ok(detail) => {
          debug!(key = %key, "detail resolved");
          self.cache.store_detail(&key, detail);
          self.visibility.open_detail(&key);
        }
        Err(e) => {
          warn!(key = %key, error = %e, "detail resolve failed");
          self.status.last_error = Some(e.to_string());
        }
      },
    }
  }

  // ==========================================================================
  // Projections
  // ==========================================================================

  /// Current rows, in list order
  pub fn summaries(&self) -> &[ResourceSummary] {
    self.list.rows()
  }

  /// Current rows joined with their cached sub-resources and panel flags
  pub fn rows(&self) -> Vec<RowView<'_>> {
    self.list.rows().iter().map(|row| self.row_view(row)).collect()
  }

  fn row_view<'a>(&'a self, row: &'a ResourceSummary) -> RowView<'a> {
    let key = row.key.as_str();
    RowView {
      summary: row,
      url: row.url().or_else(|| self.cache.url(key)),
      url_open: self.visibility.is_url_open(key),
      detail: self.cache.detail(key),
      detail_open: self.visibility.is_detail_open(key),
    }
  }

  pub fn status(&self) -> &SessionStatus {
    &self.status
  }

  #[cfg(test)]
  pub fn cache(&self) -> &ResourceCache {
    &self.cache
  }

  #[cfg(test)]
  pub fn visibility(&self) -> &Visibility {
    &self.visibility
  }

  pub fn pagination(&self) -> Pagination {
    self.pagination
  }

  pub fn pagination_mut(&mut self) -> &mut Pagination {
    &mut self.pagination
  }
}
