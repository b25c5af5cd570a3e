//! Error type for `marquee-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A write that should have produced a readable row did not — a backend
  /// or schema inconsistency, not a normal path.
  #[error("{0} missing after insertion")]
  MissingAfterInsert(&'static str),

  /// An association referenced a category the store has never seen.
  /// Categories must be ingested before the content that references them.
  #[error("cannot find category with external id {0}")]
  UnknownExtCategory(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
