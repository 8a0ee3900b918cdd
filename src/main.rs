mod api;
mod app;
mod config;
mod event;
mod logging;
mod session;
mod ui;

use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pokecat")]
#[command(about = "A terminal client for browsing and importing a Pokémon catalog API")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/pokecat/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Base URL of the catalog API
  #[arg(short, long)]
  api_url: Option<String>,

  /// Directory for the log file (default: $XDG_DATA_HOME/pokecat)
  #[arg(long)]
  log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  let _log_guard = logging::init(args.log_dir.as_deref())?;

  // Load configuration
  let mut config = config::Config::load(args.config.as_deref())?;

  // Override API url if specified on command line
  if let Some(url) = args.api_url {
    config.api.url = url;
  }

  tracing::info!(api = %config.api.url, "starting");

  // Initialize and run the app
  let mut app = app::App::new(config)?;
  app.run().await?;

  Ok(())
}
