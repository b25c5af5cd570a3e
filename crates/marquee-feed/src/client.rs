//! Async HTTP client for the catalog feed endpoints.

use std::time::Duration;

use reqwest::Client;

use crate::{
  records::{CategoryRecord, ContentRecord},
  Error, Result,
};

/// Request timeout applied when the caller does not supply one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `User-Agent` sent with every request; the feed host expects a browser.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_7) \
  AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0 Safari/537.36";

/// Async client for the catalog JSON API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct FeedClient {
  client:   Client,
  base_url: String,
}

impl FeedClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    Self::with_timeout(base_url, DEFAULT_TIMEOUT)
  }

  pub fn with_timeout(
    base_url: impl Into<String>,
    timeout: Duration,
  ) -> Result<Self> {
    let client = Client::builder()
      .user_agent(USER_AGENT)
      .timeout(timeout)
      .build()
      .map_err(Error::Client)?;
    Ok(Self {
      client,
      base_url: base_url.into(),
    })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/{}", self.base_url.trim_end_matches('/'), path)
  }

  /// `GET <feed_url>/GetCategories`
  pub async fn get_categories(&self) -> Result<Vec<CategoryRecord>> {
    self.get_json("GetCategories").await
  }

  /// `GET <feed_url>/GetAllContent`
  pub async fn get_all_content(&self) -> Result<Vec<ContentRecord>> {
    self.get_json("GetAllContent").await
  }

  async fn get_json<T: serde::de::DeserializeOwned>(
    &self,
    path: &str,
  ) -> Result<T> {
    let resp = self
      .client
      .get(self.url(path))
      .send()
      .await
      .map_err(Error::Http)?;

    let status = resp.status();
    if !status.is_success() {
      return Err(Error::Status(status));
    }
    resp.json().await.map_err(Error::Decode)
  }
}

#[cfg(test)]
mod tests {
  use super::FeedClient;

  #[test]
  fn url_joins_without_doubled_slashes() {
    let client = FeedClient::new("https://example.test/jsonapi/").unwrap();
    assert_eq!(
      client.url("GetCategories"),
      "https://example.test/jsonapi/GetCategories"
    );

    let bare = FeedClient::new("https://example.test/jsonapi").unwrap();
    assert_eq!(
      bare.url("GetAllContent"),
      "https://example.test/jsonapi/GetAllContent"
    );
  }
}
