//! Shared HTTP plumbing for the backend and provider clients

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{Error, Result};

/// Build an HTTP client with the given request timeout
pub(crate) fn build_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .gzip(true)
        .build()
        .map_err(Error::Http)
}

/// Join `path` onto `base_url`, keeping any path prefix the base carries
pub(crate) fn endpoint_url(base_url: &str, path: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)?;
    if base.cannot_be_a_base() {
        return Err(Error::Config(format!("Invalid base URL: {}", base_url)));
    }
    if !base.path().ends_with('/') {
        let prefixed = format!("{}/", base.path());
        base.set_path(&prefixed);
    }
    Ok(base.join(path.trim_start_matches('/'))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_join() {
        let endpoint = endpoint_url("http://localhost:8080", "news/article").unwrap();
        assert_eq!(endpoint.as_str(), "http://localhost:8080/news/article");

        let endpoint = endpoint_url("https://api.example.com/v2", "news/article").unwrap();
        assert_eq!(endpoint.as_str(), "https://api.example.com/v2/news/article");

        let endpoint = endpoint_url("https://api.cohere.ai/", "/v1/generate").unwrap();
        assert_eq!(endpoint.as_str(), "https://api.cohere.ai/v1/generate");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(endpoint_url("not a url", "x"), Err(Error::UrlParse(_))));
        assert!(matches!(
            endpoint_url("mailto:news@example.com", "x"),
            Err(Error::Config(_))
        ));
    }
}
