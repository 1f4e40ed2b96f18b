//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::QuizError;

/// Errors emitted by question bank providers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    #[error("question bank request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("question bank rejected the request: {message} (code {code})")]
    Api { code: u8, message: &'static str },
    #[error("question bank returned a malformed question: {0}")]
    Malformed(String),
    #[error("question bank did not answer in time")]
    Timeout,
    #[error("question bank unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `QuizHandle`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RunnerError {
    #[error("quiz runner has shut down")]
    Closed,
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

/// Errors emitted by `QuizConfig::validate`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("question bank url must not be empty")]
    EmptyBankUrl,
    #[error("question count must be between 1 and {max}, got {count}")]
    QuestionCount { count: u32, max: u32 },
    #[error("quiz duration must be at least one second")]
    ZeroDuration,
}
