//! Content — a film or program in the catalog, plus the ingest input type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Content ─────────────────────────────────────────────────────────────────

/// A catalog item as stored locally.
///
/// Identity is the `(ext_content_id, title)` pair: re-ingesting a matching
/// record keeps `id` and `first_seen` and overwrites everything else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
  pub id:              i64,
  pub ext_content_id:  i64,
  pub media_item_id:   i64,
  pub film_id:         i64,
  pub permalink_token: Option<String>,
  pub watchlink_token: Option<String>,
  pub content_ordinal: Option<i64>,
  pub program_type:    Option<String>,
  pub title:           Option<String>,
  pub description:     Option<String>,
  pub release_year:    Option<i64>,
  /// Runtime in whole seconds; `None` when the feed's duration string did
  /// not parse.
  pub runtime_s:       Option<i64>,
  /// Runtime in fractional hours, derived from `runtime_s`.
  pub runtime_h:       Option<f64>,
  pub language:        Option<String>,
  pub mpaa_rating:     Option<String>,
  pub ustv_rating:     Option<String>,
  pub encode_type:     Option<String>,
  /// Most recently observed license window. The full history lives in
  /// [`LicensePeriod`](crate::license::LicensePeriod) rows.
  pub license_start:   Option<DateTime<Utc>>,
  pub license_end:     Option<DateTime<Utc>>,
  pub first_seen:      DateTime<Utc>,
}

// ─── Rating tags ─────────────────────────────────────────────────────────────

/// One entry of the feed's rating list, e.g. `{Name: "MPAA", Value: "PG-13"}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatingTag {
  pub name:  Option<String>,
  pub value: Option<String>,
}

// ─── NewContent ──────────────────────────────────────────────────────────────

/// Input to
/// [`CatalogStore::upsert_content`](crate::store::CatalogStore::upsert_content).
///
/// Local ids and `first_seen` are always assigned by the store. `runtime` and
/// `ratings` arrive in the feed's raw shape; the derived columns are computed
/// at upsert time via [`Self::runtime_seconds`] and [`Self::rating`] so every
/// backend applies the same rules.
#[derive(Debug, Clone, Default)]
pub struct NewContent {
  pub ext_content_id:  i64,
  pub media_item_id:   i64,
  pub film_id:         i64,
  pub permalink_token: Option<String>,
  pub watchlink_token: Option<String>,
  pub content_ordinal: Option<i64>,
  pub program_type:    Option<String>,
  pub title:           Option<String>,
  pub description:     Option<String>,
  pub release_year:    Option<i64>,
  /// Loosely-formatted duration string as the feed sends it ("1h 33m").
  pub runtime:         Option<String>,
  pub language:        Option<String>,
  pub ratings:         Vec<RatingTag>,
  pub encode_type:     Option<String>,
  /// License window bounds, raw; temporal coercion happens in the store.
  pub license_start:   Option<String>,
  pub license_end:     Option<String>,
}

impl NewContent {
  /// Parse `runtime` into whole seconds. Unparsable strings log a warning
  /// and yield `None`; runtime is non-critical metadata.
  pub fn runtime_seconds(&self) -> Option<i64> {
    self
      .runtime
      .as_deref()
      .and_then(crate::runtime::parse_duration_secs)
  }

  /// First rating value whose tag name matches `name` exactly
  /// (e.g. `"MPAA"`, `"US TV"`).
  pub fn rating(&self, name: &str) -> Option<&str> {
    self
      .ratings
      .iter()
      .find(|tag| tag.name.as_deref() == Some(name))
      .and_then(|tag| tag.value.as_deref())
  }
}

#[cfg(test)]
mod tests {
  use super::{NewContent, RatingTag};

  fn tag(name: &str, value: &str) -> RatingTag {
    RatingTag {
      name:  Some(name.into()),
      value: Some(value.into()),
    }
  }

  #[test]
  fn rating_takes_first_match() {
    let input = NewContent {
      ratings: vec![tag("MPAA", "PG"), tag("US TV", "TV-14"), tag("MPAA", "R")],
      ..Default::default()
    };

    assert_eq!(input.rating("MPAA"), Some("PG"));
    assert_eq!(input.rating("US TV"), Some("TV-14"));
  }

  #[test]
  fn rating_missing_is_none() {
    let input = NewContent {
      ratings: vec![tag("MPAA", "PG")],
      ..Default::default()
    };

    assert_eq!(input.rating("US TV"), None);
  }

  #[test]
  fn rating_without_value_is_none() {
    let input = NewContent {
      ratings: vec![RatingTag {
        name:  Some("MPAA".into()),
        value: None,
      }],
      ..Default::default()
    };

    assert_eq!(input.rating("MPAA"), None);
  }

  #[test]
  fn runtime_seconds_parses_through() {
    let input = NewContent {
      runtime: Some("1h30m".into()),
      ..Default::default()
    };

    assert_eq!(input.runtime_seconds(), Some(5400));
  }

  #[test]
  fn runtime_seconds_none_when_absent() {
    assert_eq!(NewContent::default().runtime_seconds(), None);
  }
}
