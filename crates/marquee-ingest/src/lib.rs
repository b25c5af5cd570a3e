//! Ingest pipeline for the Marquee catalog.
//!
//! Fetches the category and content collections from the remote feed and
//! reconciles them into a
//! [`CatalogStore`](marquee_core::store::CatalogStore). The `marquee` binary
//! wraps [`ingest::run_ingest`] in a fixed-interval scheduler.

pub mod ingest;

use std::path::PathBuf;

use serde::Deserialize;

// ─── Configuration ───────────────────────────────────────────────────────────

fn default_store_backend() -> String {
  "sqlite".to_string()
}

fn default_interval_hours() -> u64 {
  24
}

fn default_request_timeout_secs() -> u64 {
  30
}

/// Runtime configuration, deserialised from `config.toml` merged with
/// `MARQUEE_`-prefixed environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
  /// Base URL of the catalog JSON API.
  pub feed_url:             String,
  /// Store backend name, resolved through
  /// [`StoreBackend`](marquee_core::store::StoreBackend).
  #[serde(default = "default_store_backend")]
  pub store_backend:        String,
  /// Database location. Defaults to `~/.marquee/data.db` when unset.
  #[serde(default)]
  pub store_path:           Option<PathBuf>,
  /// Hours between scheduled ingest runs.
  #[serde(default = "default_interval_hours")]
  pub interval_hours:       u64,
  #[serde(default = "default_request_timeout_secs")]
  pub request_timeout_secs: u64,
}

#[cfg(test)]
mod tests {
  use super::IngestConfig;

  #[test]
  fn config_defaults_apply() {
    let cfg: IngestConfig = serde_json::from_value(serde_json::json!({
      "feed_url": "https://example.test/jsonapi/"
    }))
    .unwrap();

    assert_eq!(cfg.store_backend, "sqlite");
    assert_eq!(cfg.store_path, None);
    assert_eq!(cfg.interval_hours, 24);
    assert_eq!(cfg.request_timeout_secs, 30);
  }

  #[test]
  fn config_requires_feed_url() {
    let result: Result<IngestConfig, _> =
      serde_json::from_value(serde_json::json!({}));
    assert!(result.is_err());
  }
}
