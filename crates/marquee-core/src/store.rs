//! The `CatalogStore` trait and the backend selector.
//!
//! The trait is implemented by storage backends (e.g. `marquee-store-sqlite`).
//! Higher layers (`marquee-ingest`) depend on this abstraction, not on any
//! concrete backend.

use std::{future::Future, str::FromStr};

use crate::{
  category::Category,
  content::{Content, NewContent},
  error::{Error, Result},
  license::LicensePeriod,
  person::Person,
};

// ─── Backend selection ───────────────────────────────────────────────────────

/// Storage backends selectable by configuration string.
///
/// Parsing an unrecognised name fails with
/// [`Error::UnknownBackend`](crate::Error::UnknownBackend) before any I/O
/// happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
  Sqlite,
}

impl FromStr for StoreBackend {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "sqlite" => Ok(Self::Sqlite),
      other => Err(Error::UnknownBackend(other.to_owned())),
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Marquee catalog store backend.
///
/// Every upsert is idempotent and commits on its own before returning; there
/// is no run-wide transaction, so a failure partway through an ingest leaves
/// earlier writes durable. Local ids are always backend-assigned — callers
/// never supply them — and each upsert resolves the id by re-reading after
/// the write rather than assuming the insert landed.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Upserts ───────────────────────────────────────────────────────────

  /// Insert-or-ignore a category by name and return its local id.
  ///
  /// When `ext_category_id` is supplied and the existing row has none, the
  /// external id is attached; an already-present external id is never
  /// overwritten.
  fn upsert_category(
    &self,
    name: String,
    ext_category_id: Option<i64>,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Insert-or-ignore a person by name and return their local id.
  fn upsert_person(
    &self,
    name: String,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Full-replace upsert keyed by `(ext_content_id, title)`.
  ///
  /// A matching row keeps its id and `first_seen` and has every other field
  /// overwritten; otherwise a fresh row is created with `first_seen = now`.
  /// The observed license window (possibly unbounded) is recorded in the
  /// license history as part of the operation. Returns the local content id.
  fn upsert_content(
    &self,
    input: NewContent,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  // ── Associations ──────────────────────────────────────────────────────

  /// Insert-or-ignore a category↔content junction row.
  fn associate_category(
    &self,
    content_id: i64,
    category_id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Resolve an external category id to its local id, then associate.
  ///
  /// Fails when no category with that external id exists — categories must
  /// be ingested before the content that references them. No junction row
  /// is written on failure.
  fn associate_category_ext(
    &self,
    content_id: i64,
    ext_category_id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Insert-or-ignore a starring junction row.
  fn associate_star(
    &self,
    content_id: i64,
    person_id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Insert-or-ignore a directed-by junction row.
  fn associate_director(
    &self,
    content_id: i64,
    person_id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── License history ───────────────────────────────────────────────────

  /// Record a license window for a content item, inserting the exact
  /// `(content_id, start, end)` triple at most once, and return the id of
  /// the matching history row.
  ///
  /// Bounds pass through the backend's temporal coercion; `None` stays
  /// `NULL`. The post-insert lookup treats `NULL` as a wildcard.
  fn record_license_period(
    &self,
    content_id: i64,
    start: Option<String>,
    end: Option<String>,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Retrieve a category by local id. Returns `None` if not found.
  fn category_by_id(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Category>, Self::Error>> + Send + '_;

  /// Retrieve a category by external id, most recently first-seen row first.
  fn category_by_ext_id(
    &self,
    ext_category_id: i64,
  ) -> impl Future<Output = Result<Option<Category>, Self::Error>> + Send + '_;

  /// Retrieve a category by its (unique) name.
  fn category_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Category>, Self::Error>> + Send + 'a;

  /// Retrieve a person by local id.
  fn person_by_id(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Retrieve a person by their (unique) name.
  fn person_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + 'a;

  /// Retrieve a content row by local id.
  fn content_by_id(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Content>, Self::Error>> + Send + '_;

  /// Retrieve a content row by external id (first row when several share
  /// the external id under different titles).
  fn content_by_ext_id(
    &self,
    ext_content_id: i64,
  ) -> impl Future<Output = Result<Option<Content>, Self::Error>> + Send + '_;

  /// All content rows carrying exactly this title.
  fn content_by_title<'a>(
    &'a self,
    title: &'a str,
  ) -> impl Future<Output = Result<Vec<Content>, Self::Error>> + Send + 'a;

  /// All content linked to a category via the junction table.
  fn content_by_category(
    &self,
    category_id: i64,
  ) -> impl Future<Output = Result<Vec<Content>, Self::Error>> + Send + '_;

  /// All content a person stars in.
  fn content_by_star(
    &self,
    person_id: i64,
  ) -> impl Future<Output = Result<Vec<Content>, Self::Error>> + Send + '_;

  /// All content a person directed.
  fn content_by_director(
    &self,
    person_id: i64,
  ) -> impl Future<Output = Result<Vec<Content>, Self::Error>> + Send + '_;

  /// Look up a license row by window, with `NULL` bounds acting as
  /// wildcards on both sides of the comparison.
  fn license_period(
    &self,
    content_id: i64,
    start: Option<String>,
    end: Option<String>,
  ) -> impl Future<Output = Result<Option<LicensePeriod>, Self::Error>> + Send + '_;

  /// Full license history for a content item, in insertion order.
  fn license_periods(
    &self,
    content_id: i64,
  ) -> impl Future<Output = Result<Vec<LicensePeriod>, Self::Error>> + Send + '_;
}

#[cfg(test)]
mod tests {
  use super::StoreBackend;

  #[test]
  fn backend_parses_sqlite() {
    assert_eq!("sqlite".parse::<StoreBackend>().ok(), Some(StoreBackend::Sqlite));
  }

  #[test]
  fn backend_rejects_unknown_names() {
    let err = "postgres".parse::<StoreBackend>().unwrap_err();
    assert!(matches!(err, crate::Error::UnknownBackend(name) if name == "postgres"));
  }
}
