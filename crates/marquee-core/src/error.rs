//! Error types for `marquee-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The configured store backend name matched no known implementation.
  #[error("unknown store backend {0:?}")]
  UnknownBackend(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
