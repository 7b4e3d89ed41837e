use std::fmt;

/// Progress of a single summary request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SummaryRequestState {
    #[default]
    Idle,
    /// Resolving article content from the backend
    Fetching,
    /// Waiting on the generation provider
    Summarizing,
    Ready(String),
    Failed(String),
}

impl SummaryRequestState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready(_) | Self::Failed(_))
    }
}

impl fmt::Display for SummaryRequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Fetching => write!(f, "fetching article"),
            Self::Summarizing => write!(f, "summarizing"),
            Self::Ready(_) => write!(f, "ready"),
            Self::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}
