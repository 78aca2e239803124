/// Error type for logger setup
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogError {
    /// Filter directives failed to parse
    #[error("invalid filter '{filter}': {reason}")]
    Filter { filter: String, reason: String },

    /// A global subscriber could not be installed
    #[error("cannot install logger: {0}")]
    Init(String),
}

impl LogError {
    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Filter { .. } => "LOG_FILTER",
            Self::Init(_) => "LOG_INIT",
        }
    }
}
