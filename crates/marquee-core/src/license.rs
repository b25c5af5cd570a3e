//! License periods — append-only history of content licensing windows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observed licensing window for a content item.
///
/// Rows are never updated or deleted. Every distinct window seen at ingest
/// time is kept, so license transitions remain reconstructable after the
/// content row itself has been overwritten by later ingests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicensePeriod {
  pub id:            i64,
  pub content_id:    i64,
  pub license_start: Option<DateTime<Utc>>,
  pub license_end:   Option<DateTime<Utc>>,
}
