mod cache;
mod orchestrator;
mod state;

pub use cache::{SummaryCache, SummaryCacheEntry};
pub use orchestrator::{SummaryOrchestrator, NO_SUMMARY_TEXT};
pub use state::SummaryRequestState;
