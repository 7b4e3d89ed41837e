mod cohere;

pub use cohere::{CohereProvider, GenerationParams};

use crate::Result;

/// Trait for text-generation providers
#[async_trait::async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Whether credentials are available. Callers check this before
    /// doing any work that only leads up to a generation call.
    fn is_configured(&self) -> bool;

    /// Generate text for the prompt, returning the first candidate untrimmed
    async fn generate(&self, prompt: &str) -> Result<String>;
}
