//! Marquee catalog ingest binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! configured store backend, and re-ingests the remote catalog on a fixed
//! interval. `--once` runs a single ingest and exits, failing the process
//! when the run fails.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use clap::Parser;
use marquee_core::store::StoreBackend;
use marquee_feed::FeedClient;
use marquee_ingest::{ingest::run_ingest, IngestConfig};
use marquee_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Marquee catalog ingest")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Run a single ingest and exit instead of scheduling.
  #[arg(long)]
  once: bool,
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
    .add_source(config::Environment::with_prefix("MARQUEE"))
    .build()
    .context("failed to read config file")?;

  let cfg: IngestConfig = settings
    .try_deserialize()
    .context("failed to deserialise IngestConfig")?;

  let backend: StoreBackend = cfg.store_backend.parse()?;
  let store_path = resolve_store_path(cfg.store_path.as_deref())?;

  let store = match backend {
    StoreBackend::Sqlite => SqliteStore::open(&store_path)
      .await
      .with_context(|| format!("failed to open store at {store_path:?}"))?,
  };
  tracing::info!("using SQLite store at {store_path:?}");

  let client = FeedClient::with_timeout(
    cfg.feed_url.clone(),
    Duration::from_secs(cfg.request_timeout_secs),
  )?;

  if cli.once {
    let report = run_ingest(&store, &client).await?;
    tracing::info!(
      "ingest complete: {} categories, {} content records",
      report.categories,
      report.contents
    );
    return Ok(());
  }

  let interval = Duration::from_secs(cfg.interval_hours * 60 * 60);
  loop {
    match run_ingest(&store, &client).await {
      Ok(report) => tracing::info!(
        "ingest complete: {} categories, {} content records",
        report.categories,
        report.contents
      ),
      Err(err) => tracing::error!("ingest failed: {err:#}"),
    }

    let next_run =
      chrono::Utc::now() + chrono::Duration::hours(cfg.interval_hours as i64);
    tracing::info!("next ingest at {next_run}");
    tokio::time::sleep(interval).await;
  }
}

/// Resolve the store location: explicit configuration wins, otherwise
/// `~/.marquee/data.db` with the directory created on demand.
fn resolve_store_path(configured: Option<&Path>) -> anyhow::Result<PathBuf> {
  if let Some(path) = configured {
    return Ok(expand_tilde(path));
  }

  let home = std::env::var("HOME").context("HOME is not set")?;
  let dir = PathBuf::from(home).join(".marquee");
  std::fs::create_dir_all(&dir)
    .with_context(|| format!("failed to create {dir:?}"))?;
  Ok(dir.join("data.db"))
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
