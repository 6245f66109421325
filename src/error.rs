use thiserror::Error;

use crate::engine::SessionHandle;

/// Reasons a session configuration is refused before any session is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigIssue {
    #[error("vocabulary is empty")]
    EmptyVocabulary,
    #[error("vocabulary word {0:?} is empty or contains whitespace")]
    InvalidWord(String),
    #[error("vocabulary word {0:?} appears more than once")]
    DuplicateWord(String),
    #[error("vocabulary declares {declared} words but lists {actual}")]
    SizeMismatch { declared: usize, actual: usize },
    #[error("word count must be at least 1")]
    ZeroWordCount,
    #[error("test duration must be a positive number of seconds, got {0}")]
    NonPositiveDuration(f64),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigIssue),
    #[error("session handle {0} is stale")]
    StaleHandle(SessionHandle),
}

/// Failures of the terminal application around the engine.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to initialize logging: {0}")]
    LoggingInit(String),
    #[error("failed to read vocabulary file: {0}")]
    VocabularyIo(#[from] std::io::Error),
    #[error("failed to parse vocabulary file: {0}")]
    VocabularyFormat(#[from] serde_json::Error),
    #[error("built-in vocabulary {0:?} not found")]
    MissingVocabulary(String),
    #[error(transparent)]
    Session(#[from] SessionError),
}
