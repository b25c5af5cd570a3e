//! Category — a browsing shelf from the remote catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A content category ("Action", "New Releases", ...).
///
/// Created on first encounter of a name during ingestion and never deleted.
/// The name is the identity; the external id is attached when the feed
/// supplies one and is unique across categories when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
  /// Locally-assigned identifier, stable across re-ingestion.
  pub id:              i64,
  /// Identifier the remote catalog uses for this category, when known.
  pub ext_category_id: Option<i64>,
  pub name:            String,
  pub first_seen:      DateTime<Utc>,
}
