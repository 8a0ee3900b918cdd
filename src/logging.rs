use color_eyre::{eyre::eyre, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "pokecat.log";

/// Install a file-backed tracing subscriber.
///
/// The terminal belongs to the UI, so logs go to `<dir>/pokecat.log`. The filter
/// comes from `POKECAT_LOG` and defaults to `pokecat=info`. Keep the returned
/// guard alive until exit so buffered lines are flushed.
pub fn init(dir: Option<&Path>) -> Result<WorkerGuard> {
  let dir = match dir {
    Some(d) => d.to_path_buf(),
    None => default_dir()?,
  };

  std::fs::create_dir_all(&dir)
    .map_err(|e| eyre!("Failed to create log directory {}: {}", dir.display(), e))?;

  let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
  let (writer, guard) = tracing_appender::non_blocking(appender);

  let filter =
    EnvFilter::try_from_env("POKECAT_LOG").unwrap_or_else(|_| EnvFilter::new("pokecat=info"));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(writer)
    .with_ansi(false)
    .try_init()
    .map_err(|e| eyre!("Failed to install logger: {}", e))?;

  Ok(guard)
}

fn default_dir() -> Result<PathBuf> {
  let data_dir = dirs::data_dir()
    .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
    .ok_or_else(|| eyre!("Could not determine data directory"))?;

  Ok(data_dir.join("pokecat"))
}
