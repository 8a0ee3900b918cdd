use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::session::Pagination;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub api: ApiConfig,
  /// Initial import window
  #[serde(default)]
  pub import: ImportConfig,
  /// Custom title for header (defaults to the API host if not set)
  pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  /// Base URL of the catalog API
  #[serde(default = "default_api_url")]
  pub url: String,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      url: default_api_url(),
    }
  }
}

fn default_api_url() -> String {
  DEFAULT_API_URL.to_string()
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ImportConfig {
  #[serde(default = "default_import_limit")]
  pub limit: u32,
  #[serde(default)]
  pub offset: u32,
}

impl Default for ImportConfig {
  fn default() -> Self {
    Self {
      limit: default_import_limit(),
      offset: 0,
    }
  }
}

fn default_import_limit() -> u32 {
  Pagination::default().limit
}

impl From<ImportConfig> for Pagination {
  fn from(import: ImportConfig) -> Self {
    Pagination {
      limit: import.limit,
      offset: import.offset,
    }
  }
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./pokecat.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/pokecat/config.yaml
  ///
  /// Falls back to built-in defaults when no file exists. `POKECAT_API_URL`
  /// overrides the API url either way.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    let mut config = match path {
      Some(p) => Self::load_from_path(&p)?,
      None => Config::default(),
    };

    if let Some(url) = Self::api_url_from_env() {
      config.api.url = url;
    }

    Ok(config)
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("pokecat.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("pokecat").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn parse(contents: &str) -> Result<Self, serde_yaml::Error> {
    serde_yaml::from_str(contents)
  }

  /// Get the API url override from `POKECAT_API_URL`, if set and non-empty.
  fn api_url_from_env() -> Option<String> {
    std::env::var("POKECAT_API_URL")
      .ok()
      .filter(|url| !url.trim().is_empty())
  }
}
