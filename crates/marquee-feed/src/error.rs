//! Error type for `marquee-feed`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to build HTTP client: {0}")]
  Client(reqwest::Error),

  /// The request never produced a response. The feed host is only reachable
  /// from inside the campus network.
  #[error("could not process feed request (are you connected to the VPN?): {0}")]
  Http(reqwest::Error),

  #[error("feed request failed with status {0}")]
  Status(reqwest::StatusCode),

  #[error("could not decode feed response: {0}")]
  Decode(reqwest::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
