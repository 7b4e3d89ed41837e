use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::config::AppConfig;
use crate::http::{build_client, endpoint_url};
use crate::{Error, Result};

const ARTICLE_PATH: &str = "news/article";

/// Source of full article records, keyed by article URL
#[async_trait::async_trait]
pub trait ArticleLookup: Send + Sync {
    /// Fetch the full article record for `url`.
    ///
    /// `Ok(None)` means the backend answered but had nothing useful
    /// (`null` or an empty object).
    async fn fetch_article(&self, url: &str) -> Result<Option<Value>>;
}

/// HTTP client for the news backend's article-detail endpoint
pub struct BackendClient {
    client: Client,
    endpoint: Url,
}

impl BackendClient {
    /// Create a backend client from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        Self::with_base_url(&config.backend.base_url, config.backend.request_timeout_secs)
    }

    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout_secs)?,
            endpoint: endpoint_url(base_url, ARTICLE_PATH)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl ArticleLookup for BackendClient {
    async fn fetch_article(&self, url: &str) -> Result<Option<Value>> {
        tracing::debug!(url = %url, "Looking up article on backend");

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("url", url)])
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ContentLookupFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        let value: Value = serde_json::from_str(&body)?;
        Ok(article_record(value))
    }
}

/// Keep the reply only if it is an object with at least one field
fn article_record(value: Value) -> Option<Value> {
    matches!(&value, Value::Object(map) if !map.is_empty()).then_some(value)
}
