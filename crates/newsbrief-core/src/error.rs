use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The generation provider has no API key
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Backend article-detail lookup answered with a non-success status
    #[error("Article lookup failed for {url}: HTTP {status}")]
    ContentLookupFailed { url: String, status: u16 },

    /// Neither the backend lookup nor the article itself had anything to summarize
    #[error("No content available for article '{0}'")]
    NoContentAvailable(String),

    #[error("Summary generation failed: {0}")]
    GenerationFailed(String),
}

impl Error {
    /// Whether the caller may retry the same request without operator action
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::ContentLookupFailed { .. } | Error::GenerationFailed(_) => true,
            Error::Config(_)
            | Error::Io(_)
            | Error::UrlParse(_)
            | Error::Json(_)
            | Error::MissingCredentials(_)
            | Error::NoContentAvailable(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
