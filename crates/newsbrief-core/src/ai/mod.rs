mod prompt;
pub mod providers;

pub use prompt::build_summary_prompt;
pub use providers::{CohereProvider, GenerationParams, GenerationProvider};
