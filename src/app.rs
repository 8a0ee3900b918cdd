use crate::api::CatalogClient;
use crate::config::Config;
use crate::event::{Event, EventHandler};
use crate::session::Session;
use crate::ui;
use crate::ui::input::{InputResult, NumberInput};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use ratatui::widgets::ListState;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Which import parameter is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Limit,
  Offset,
}

/// Input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  Normal,
  Edit(Field),
}

/// Main application state
pub struct App {
  config: Config,

  /// `host[:port]` of the API, shown in the header
  api_host: String,

  session: Session,

  /// Current input mode
  mode: Mode,

  /// Buffer for limit/offset editing
  input: NumberInput,

  list_state: ListState,

  /// Whether to quit
  should_quit: bool,
}

impl App {
  pub fn new(config: Config) -> Result<Self> {
    let client = CatalogClient::new(&config)?;
    info!(api = %client.base_url(), "catalog client ready");
    let api_host = ui::host_label(client.base_url());
    let session = Session::new(Arc::new(client), config.import.into());
    Ok(Self::with_session(config, api_host, session))
  }

  fn with_session(config: Config, api_host: String, session: Session) -> Self {
    Self {
      config,
      api_host,
      session,
      mode: Mode::Normal,
      input: NumberInput::new(),
      list_state: ListState::default(),
      should_quit: false,
    }
  }

  pub async fn run(&mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    let result = self.run_loop().await;

    // Cleanup terminal, even if the loop failed
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
  }

  async fn run_loop(&mut self) -> Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    let mut events = EventHandler::new(Duration::from_millis(100));

    // Initial data load
    self.session.load();

    while !self.should_quit {
      terminal.draw(|frame| ui::draw(frame, self))?;

      match events.next().await {
        Some(Event::Key(key)) => self.handle_key(key),
        Some(Event::Tick) => {
          self.session.poll();
        }
        Some(Event::Resize) => {}
        None => break,
      }
    }

    Ok(())
  }

  fn handle_key(&mut self, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return;
    }

    match self.mode {
      Mode::Normal => self.handle_normal_mode_key(key),
      Mode::Edit(field) => self.handle_edit_mode_key(field, key),
    }
  }

  fn handle_normal_mode_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => self.list_state.select_next(),
      KeyCode::Up | KeyCode::Char('k') => self.list_state.select_previous(),

      // Panels
      KeyCode::Enter | KeyCode::Char(' ') => {
        if let Some(row) = self.selected_row() {
          self.session.resolve_url(&row);
        }
      }
      KeyCode::Char('d') => {
        if let Some(row) = self.selected_row() {
          self.session.resolve_detail(&row.key);
        }
      }

      // Actions are ignored while their own call is running
      KeyCode::Char('r') => {
        if !self.session.status().list_loading {
          self.session.load();
        }
      }
      KeyCode::Char('i') => {
        if !self.session.status().ingesting {
          self.session.ingest();
        }
      }

      // Import window
      KeyCode::Char('l') => self.start_edit(Field::Limit),
      KeyCode::Char('o') => self.start_edit(Field::Offset),

      _ => {}
    }
  }

  fn start_edit(&mut self, field: Field) {
    let pagination = self.session.pagination();
    let value = match field {
      Field::Limit => pagination.limit,
      Field::Offset => pagination.offset,
    };
    self.input.start(value);
    self.mode = Mode::Edit(field);
  }

  fn handle_edit_mode_key(&mut self, field: Field, key: KeyEvent) {
    match self.input.handle_key(key) {
      InputResult::Submitted(value) => {
        let pagination = self.session.pagination_mut();
        match field {
          Field::Limit => pagination.limit = value,
          Field::Offset => pagination.offset = value,
        }
        debug!(?field, value, "import window changed");
        self.mode = Mode::Normal;
      }
      InputResult::Cancelled => self.mode = Mode::Normal,
      InputResult::Consumed | InputResult::NotHandled => {}
    }
  }

  fn selected_row(&self) -> Option<crate::api::ResourceSummary> {
    let idx = self.list_state.selected()?;
    self.session.summaries().get(idx).cloned()
  }

  // Accessors for UI rendering
  pub fn session(&self) -> &Session {
    &self.session
  }

  pub fn session_and_list_state(&mut self) -> (&Session, &mut ListState) {
    (&self.session, &mut self.list_state)
  }

  pub fn mode(&self) -> Mode {
    self.mode
  }

  pub fn input(&self) -> &NumberInput {
    &self.input
  }

  pub fn api_host(&self) -> &str {
    &self.api_host
  }

  pub fn title(&self) -> &str {
    self.config.title.as_deref().unwrap_or("pokecat")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::{ApiError, CatalogApi, ResourceDetail, ResourceSummary};
  use async_trait::async_trait;
  use std::sync::atomic::{AtomicUsize, Ordering};

  /// Backend that counts calls and always answers with the same data
  #[derive(Default)]
  struct CountingApi {
    lists: AtomicUsize,
    ingests: AtomicUsize,
  }

  #[async_trait]
  impl CatalogApi for CountingApi {
    async fn list(&self, _limit: u32) -> Result<Vec<ResourceSummary>, ApiError> {
      self.lists.fetch_add(1, Ordering::SeqCst);
      Ok(vec![
        ResourceSummary::new("bulbasaur", Some("http://x/1")),
        ResourceSummary::new("ditto", None),
      ])
    }

    async fn ingest(&self, _limit: u32, _offset: u32) -> Result<(), ApiError> {
      self.ingests.fetch_add(1, Ordering::SeqCst);
      Ok(())
    }

    async fn resolve_url(&self, _name: &str) -> Result<String, ApiError> {
      Ok("http://x/132".to_string())
    }

    async fn resolve_detail(&self, _name: &str) -> Result<ResourceDetail, ApiError> {
      Ok(ResourceDetail::default())
    }
  }

  fn app() -> (Arc<CountingApi>, App) {
    let api = Arc::new(CountingApi::default());
    let session = Session::new(api.clone(), Config::default().import.into());
    let app = App::with_session(Config::default(), "localhost:8000".to_string(), session);
    (api, app)
  }

  fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
  }

  #[tokio::test]
  async fn test_refresh_ignored_while_loading() {
    let (api, mut app) = app();
    press(&mut app, KeyCode::Char('r'));
    press(&mut app, KeyCode::Char('r'));
    app.session.settle().await;
    assert_eq!(api.lists.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn test_import_ignored_while_importing() {
    let (api, mut app) = app();
    press(&mut app, KeyCode::Char('i'));
    press(&mut app, KeyCode::Char('i'));
    app.session.settle().await;
    assert_eq!(api.ingests.load(Ordering::SeqCst), 1);
    assert_eq!(api.lists.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn test_enter_toggles_selected_row() {
    let (_api, mut app) = app();
    app.session.load();
    app.session.settle().await;
    app.list_state.select(Some(1));

    press(&mut app, KeyCode::Enter);
    app.session.settle().await;
    assert!(app.session.visibility().is_url_open("ditto"));

    press(&mut app, KeyCode::Enter);
    assert!(!app.session.visibility().is_url_open("ditto"));
  }

  #[tokio::test]
  async fn test_d_opens_detail() {
    let (_api, mut app) = app();
    app.session.load();
    app.session.settle().await;
    app.list_state.select(Some(0));

    press(&mut app, KeyCode::Char('d'));
    app.session.settle().await;
    assert!(app.session.visibility().is_detail_open("bulbasaur"));
  }

  #[test]
  fn test_edit_limit() {
    let (_api, mut app) = app();
    press(&mut app, KeyCode::Char('l'));
    assert_eq!(app.mode(), Mode::Edit(Field::Limit));

    press(&mut app, KeyCode::Backspace);
    press(&mut app, KeyCode::Backspace);
    press(&mut app, KeyCode::Char('5'));
    press(&mut app, KeyCode::Char('0'));
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.mode(), Mode::Normal);
    assert_eq!(app.session.pagination().limit, 50);
  }

  #[test]
  fn test_cancel_edit_keeps_offset() {
    let (_api, mut app) = app();
    press(&mut app, KeyCode::Char('o'));
    press(&mut app, KeyCode::Char('9'));
    press(&mut app, KeyCode::Esc);

    assert_eq!(app.mode(), Mode::Normal);
    assert_eq!(app.session.pagination().offset, 0);
  }

  #[test]
  fn test_q_quits() {
    let (_api, mut app) = app();
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit);
  }

  #[test]
  fn test_header_host_comes_from_client_base_url() {
    let mut config = Config::default();
    config.api.url = "http://ash@catalog.example.com:9000/gateway/".to_string();
    let app = App::new(config).unwrap();
    assert_eq!(app.api_host(), "catalog.example.com:9000");
  }
}
