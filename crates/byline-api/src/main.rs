//! Byline server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, seeds an empty articles table from the bundled
//! dataset, and serves the CRUD API plus the static client pages.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use byline_api::{AppState, ServerConfig};
use byline_core::{article::NewArticle, store::ArticleStore as _};
use byline_store_sqlite::SqliteStore;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Byline article API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("BYLINE"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Open the store. This runs schema initialisation; the handle is shared
  // by every request handler for the life of the process.
  let store = SqliteStore::open(&server_cfg.db_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", server_cfg.db_path))?;

  // Seeding runs to completion before the listener starts, so no request
  // can race a half-finished seed.
  seed(&store, &server_cfg.seed_path).await;

  let state = AppState {
    store:  Arc::new(store),
    config: Arc::new(server_cfg.clone()),
  };

  let app = byline_api::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Read the bundled dataset and populate an empty table from it.
///
/// A missing or malformed dataset is logged and skipped — the API still
/// works, the table just starts empty.
async fn seed(store: &SqliteStore, path: &std::path::Path) {
  let raw = match tokio::fs::read(path).await {
    Ok(bytes) => bytes,
    Err(e) => {
      tracing::warn!(path = %path.display(), error = %e, "seed dataset not readable; skipping seeding");
      return;
    }
  };

  let records: Vec<NewArticle> = match serde_json::from_slice(&raw) {
    Ok(records) => records,
    Err(e) => {
      tracing::error!(path = %path.display(), error = %e, "seed dataset is not valid JSON; skipping seeding");
      return;
    }
  };

  match store.seed_if_empty(records).await {
    Ok(0) => {}
    Ok(n) => tracing::info!(rows = n, "seeded articles table"),
    Err(e) => tracing::error!(error = %e, "seeding failed"),
  }
}
