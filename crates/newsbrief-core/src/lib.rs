pub mod ai;
pub mod article;
pub mod config;
pub mod error;
mod http;
pub mod summary;

pub use article::ArticleRef;
pub use config::AppConfig;
pub use error::{Error, Result};
pub use summary::{SummaryOrchestrator, SummaryRequestState};
