use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use super::GenerationProvider;
use crate::config::AiConfig;
use crate::http::{build_client, endpoint_url};
use crate::{Error, Result};

const GENERATE_PATH: &str = "v1/generate";

/// Sampling parameters sent with every generate request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub k: u32,
    pub p: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::from(&AiConfig::default())
    }
}

impl From<&AiConfig> for GenerationParams {
    fn from(config: &AiConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            k: config.k,
            p: config.p,
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    k: u32,
    p: f32,
    stop_sequences: Vec<String>,
    return_likelihoods: &'static str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    generations: Vec<Generation>,
}

#[derive(Deserialize)]
struct Generation {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Cohere-style `/v1/generate` provider
pub struct CohereProvider {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
    params: GenerationParams,
}

impl CohereProvider {
    /// Create a provider from configuration. The API key is resolved once here.
    pub fn new(config: &AiConfig) -> Result<Self> {
        Self::with_base_url(
            &config.base_url,
            config.resolved_api_key(),
            GenerationParams::from(config),
            config.request_timeout_secs,
        )
    }

    pub fn with_base_url(
        base_url: &str,
        api_key: Option<String>,
        params: GenerationParams,
        timeout_secs: u64,
    ) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout_secs)?,
            endpoint: endpoint_url(base_url, GENERATE_PATH)?,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            params,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Best-effort error text from a non-success response body
fn error_message(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|e| e.message)
        .filter(|m| !m.trim().is_empty())
        .or_else(|| {
            let raw = body.trim();
            (!raw.is_empty()).then(|| raw.to_string())
        });

    match detail {
        Some(detail) => format!("provider returned HTTP {}: {}", status.as_u16(), detail),
        None => format!("provider returned HTTP {}", status.as_u16()),
    }
}

#[async_trait::async_trait]
impl GenerationProvider for CohereProvider {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            Error::MissingCredentials("generation provider API key not configured".to_string())
        })?;

        let request = GenerateRequest {
            model: &self.params.model,
            prompt,
            max_tokens: self.params.max_tokens,
            temperature: self.params.temperature,
            k: self.params.k,
            p: self.params.p,
            stop_sequences: Vec::new(),
            return_likelihoods: "NONE",
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::GenerationFailed(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::GenerationFailed(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::GenerationFailed(error_message(status, &body)));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| Error::GenerationFailed(format!("malformed provider response: {}", e)))?;

        Ok(parsed
            .generations
            .into_iter()
            .next()
            .map(|g| g.text)
            .unwrap_or_default())
    }
}
