use std::sync::Arc;

use serde_json::Value;
use tokio::sync::watch;

use super::cache::{SummaryCache, SummaryCacheEntry};
use super::state::SummaryRequestState;
use crate::ai::{build_summary_prompt, CohereProvider, GenerationProvider};
use crate::article::{ArticleLookup, ArticleRef, BackendClient};
use crate::config::AppConfig;
use crate::{Error, Result};

/// Returned (and cached) when the provider answers with blank text
pub const NO_SUMMARY_TEXT: &str = "No summary available.";

/// Produces article summaries, memoized per article key.
///
/// Each call either hits the cache or runs lookup, then generation, then a
/// cache write. Concurrent misses on the same key are not collapsed; both run
/// the full pipeline and the last one to finish owns the cache entry.
pub struct SummaryOrchestrator {
    lookup: Arc<dyn ArticleLookup>,
    provider: Arc<dyn GenerationProvider>,
    cache: SummaryCache,
}

impl SummaryOrchestrator {
    pub fn new(lookup: Arc<dyn ArticleLookup>, provider: Arc<dyn GenerationProvider>) -> Self {
        Self {
            lookup,
            provider,
            cache: SummaryCache::new(),
        }
    }

    /// Wire up the HTTP backend and provider from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let lookup = Arc::new(BackendClient::new(config)?);
        let provider = Arc::new(CohereProvider::new(&config.ai)?);

        if !provider.is_configured() {
            tracing::warn!("Generation provider API key is not configured; summaries will fail");
        }

        Ok(Self::new(lookup, provider))
    }

    /// Get the summary for an article, generating it on a cache miss
    pub async fn get_summary(&self, article: &ArticleRef) -> Result<String> {
        self.run(article, None).await
    }

    /// Same as [`get_summary`](Self::get_summary), publishing each state
    /// transition on `progress`
    pub async fn get_summary_with_progress(
        &self,
        article: &ArticleRef,
        progress: &watch::Sender<SummaryRequestState>,
    ) -> Result<String> {
        self.run(article, Some(progress)).await
    }

    /// Cached summary for an article, without any network activity
    pub async fn cached(&self, article: &ArticleRef) -> Option<SummaryCacheEntry> {
        self.cache.get(article.key()).await
    }

    /// Drop the cached summary for an article. Returns whether one existed.
    pub async fn invalidate(&self, article: &ArticleRef) -> bool {
        self.cache.remove(article.key()).await
    }

    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    pub async fn cache_len(&self) -> usize {
        self.cache.len().await
    }

    async fn run(
        &self,
        article: &ArticleRef,
        progress: Option<&watch::Sender<SummaryRequestState>>,
    ) -> Result<String> {
        let report = |state: SummaryRequestState| {
            if let Some(tx) = progress {
                tx.send_replace(state);
            }
        };

        let key = article.key();
        if let Some(entry) = self.cache.get(key).await {
            tracing::debug!(key = %key, "Summary cache hit");
            report(SummaryRequestState::Ready(entry.summary.clone()));
            return Ok(entry.summary);
        }

        let result = self.summarize_uncached(article, key, &report).await;
        match &result {
            Ok(summary) => report(SummaryRequestState::Ready(summary.clone())),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Summary request failed");
                report(SummaryRequestState::Failed(e.to_string()));
            }
        }
        result
    }

    async fn summarize_uncached(
        &self,
        article: &ArticleRef,
        key: &str,
        report: &impl Fn(SummaryRequestState),
    ) -> Result<String> {
        if !self.provider.is_configured() {
            return Err(Error::MissingCredentials(
                "generation provider API key not configured".to_string(),
            ));
        }

        report(SummaryRequestState::Fetching);
        let content = self
            .resolve_content(article)
            .await
            .ok_or_else(|| Error::NoContentAvailable(key.to_string()))?;

        report(SummaryRequestState::Summarizing);
        let prompt = build_summary_prompt(&content);
        let generated = self.provider.generate(&prompt).await?;

        let summary = match generated.trim() {
            "" => NO_SUMMARY_TEXT.to_string(),
            text => text.to_string(),
        };

        self.cache.insert(key, summary.clone()).await;
        tracing::info!(key = %key, chars = summary.chars().count(), "Generated article summary");

        Ok(summary)
    }

    /// Backend record when the lookup yields one, else the article's own fields
    async fn resolve_content(&self, article: &ArticleRef) -> Option<Value> {
        if let Some(url) = article.lookup_url() {
            match self.lookup.fetch_article(url).await {
                Ok(Some(record)) if is_populated(&record) => return Some(record),
                Ok(_) => {
                    tracing::debug!(url = %url, "Backend returned an empty article, using feed data");
                }
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Article lookup failed, using feed data");
                }
            }
        }

        Some(article.payload()).filter(is_populated)
    }
}

/// Only a JSON object with at least one field counts as article content
fn is_populated(value: &Value) -> bool {
    matches!(value, Value::Object(map) if !map.is_empty())
}
