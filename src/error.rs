use thiserror::Error;

/// Reported by a command or a receiver primitive that refuses a mutation.
/// The receiver is left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct Rejection {
    pub reason: String,
}

impl Rejection {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Errors surfaced by the history engine. The engine stays usable after any of them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("command '{command}' was rejected: {source}")]
    CommandRejected {
        command: String,
        #[source]
        source: Rejection,
    },

    /// `reverse()` failed for a command whose `apply()` had succeeded.
    #[error("command '{command}' could not be reversed: {source}")]
    InconsistentReverse {
        command: String,
        #[source]
        source: Rejection,
    },
}

impl HistoryError {
    pub fn command(&self) -> &str {
        match self {
            HistoryError::CommandRejected { command, .. } => command,
            HistoryError::InconsistentReverse { command, .. } => command,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
