//! Wire-format records, shaped exactly as the feed's JSON API sends them.

use marquee_core::content::{NewContent, RatingTag};
use serde::Deserialize;

// ─── Categories ──────────────────────────────────────────────────────────────

/// One entry of the `GetCategories` collection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryRecord {
  pub category_id: i64,
  pub name:        String,
}

// ─── Content ─────────────────────────────────────────────────────────────────

/// One entry of the `GetAllContent` collection.
///
/// `content_id`, `media_item_id` and `film_id` are the only fields the feed
/// always sends; everything else may be absent. The association lists
/// (`category_ids`, `actors`, `directors`) stay on the record rather than
/// moving into [`NewContent`], since they drive separate store operations.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContentRecord {
  pub content_id:         i64,
  #[serde(rename = "MediaItemID")]
  pub media_item_id:      i64,
  pub film_id:            i64,
  pub permalink_token:    Option<String>,
  pub watch_link_token:   Option<String>,
  pub content_ordinal:    Option<i64>,
  pub program_type:       Option<String>,
  pub title:              Option<String>,
  pub description:        Option<String>,
  pub release_year:       Option<i64>,
  pub runtime:            Option<String>,
  pub film_language:      Option<String>,
  #[serde(default)]
  pub ratings:            Vec<RatingRecord>,
  pub encode_type:        Option<String>,
  pub license_start_date: Option<String>,
  pub license_end_date:   Option<String>,
  #[serde(default)]
  pub category_ids:       Vec<i64>,
  #[serde(default)]
  pub actors:             Vec<String>,
  #[serde(default)]
  pub directors:          Vec<String>,
}

/// One entry of a content record's `Ratings` list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RatingRecord {
  pub name:  Option<String>,
  pub value: Option<String>,
}

impl From<RatingRecord> for RatingTag {
  fn from(record: RatingRecord) -> Self {
    RatingTag {
      name:  record.name,
      value: record.value,
    }
  }
}

impl ContentRecord {
  /// The store-facing view of this record.
  pub fn to_new_content(&self) -> NewContent {
    NewContent {
      ext_content_id:  self.content_id,
      media_item_id:   self.media_item_id,
      film_id:         self.film_id,
      permalink_token: self.permalink_token.clone(),
      watchlink_token: self.watch_link_token.clone(),
      content_ordinal: self.content_ordinal,
      program_type:    self.program_type.clone(),
      title:           self.title.clone(),
      description:     self.description.clone(),
      release_year:    self.release_year,
      runtime:         self.runtime.clone(),
      language:        self.film_language.clone(),
      ratings:         self.ratings.iter().cloned().map(RatingTag::from).collect(),
      encode_type:     self.encode_type.clone(),
      license_start:   self.license_start_date.clone(),
      license_end:     self.license_end_date.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::{CategoryRecord, ContentRecord};

  #[test]
  fn category_record_decodes() {
    let record: CategoryRecord =
      serde_json::from_str(r#"{"CategoryId": 7, "Name": "Action"}"#).unwrap();

    assert_eq!(record.category_id, 7);
    assert_eq!(record.name, "Action");
  }

  #[test]
  fn content_record_decodes_feed_shape() {
    let record: ContentRecord = serde_json::from_str(
      r#"{
        "ContentId": 501,
        "MediaItemID": 9001,
        "FilmId": 31,
        "PermalinkToken": "abc123",
        "WatchLinkToken": "xyz789",
        "ContentOrdinal": 1,
        "ProgramType": "Movie",
        "Title": "Night Ferry",
        "Description": "Two strangers cross paths on a night train.",
        "ReleaseYear": 2020,
        "Runtime": "1h 33m",
        "FilmLanguage": "English",
        "Ratings": [{"Name": "MPAA", "Value": "PG-13"}],
        "EncodeType": "HLS",
        "LicenseStartDate": "2024-01-01 00:00:00",
        "LicenseEndDate": "2024-06-30 00:00:00",
        "CategoryIds": [7, 12],
        "Actors": ["Jane Doe"],
        "Directors": ["John Smith"]
      }"#,
    )
    .unwrap();

    assert_eq!(record.content_id, 501);
    assert_eq!(record.media_item_id, 9001);
    assert_eq!(record.film_id, 31);
    assert_eq!(record.title.as_deref(), Some("Night Ferry"));
    assert_eq!(record.film_language.as_deref(), Some("English"));
    assert_eq!(record.category_ids, vec![7, 12]);
    assert_eq!(record.actors, vec!["Jane Doe"]);
    assert_eq!(record.ratings[0].name.as_deref(), Some("MPAA"));
  }

  #[test]
  fn sparse_content_record_decodes_to_defaults() {
    let record: ContentRecord = serde_json::from_str(
      r#"{"ContentId": 501, "MediaItemID": 9001, "FilmId": 31}"#,
    )
    .unwrap();

    assert_eq!(record.title, None);
    assert_eq!(record.runtime, None);
    assert!(record.ratings.is_empty());
    assert!(record.category_ids.is_empty());
    assert!(record.actors.is_empty());
    assert!(record.directors.is_empty());
  }

  #[test]
  fn to_new_content_maps_feed_fields() {
    let record: ContentRecord = serde_json::from_str(
      r#"{
        "ContentId": 501,
        "MediaItemID": 9001,
        "FilmId": 31,
        "WatchLinkToken": "xyz789",
        "Title": "Night Ferry",
        "FilmLanguage": "English",
        "Ratings": [{"Name": "US TV", "Value": "TV-14"}],
        "LicenseStartDate": "2024-01-01 00:00:00"
      }"#,
    )
    .unwrap();

    let input = record.to_new_content();
    assert_eq!(input.ext_content_id, 501);
    assert_eq!(input.watchlink_token.as_deref(), Some("xyz789"));
    assert_eq!(input.language.as_deref(), Some("English"));
    assert_eq!(input.rating("US TV"), Some("TV-14"));
    assert_eq!(input.license_start.as_deref(), Some("2024-01-01 00:00:00"));
    assert_eq!(input.license_end, None);
  }
}
