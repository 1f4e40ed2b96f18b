use std::env;
use std::time::Duration;

use quiz_core::DEFAULT_QUESTION_COUNT;
use quiz_core::session::DEFAULT_DURATION_SECS;

use crate::bank::OPENTDB_URL;
use crate::error::ConfigError;

/// Largest batch the OpenTDB API hands out per request.
pub const MAX_QUESTION_COUNT: u32 = 50;

/// Tunables for a quiz run: where questions come from, how many, and how long.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizConfig {
    pub bank_url: String,
    pub question_count: u32,
    pub duration_secs: u32,
    /// `None` waits for the bank forever.
    pub fetch_timeout: Option<Duration>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            bank_url: OPENTDB_URL.to_string(),
            question_count: DEFAULT_QUESTION_COUNT,
            duration_secs: DEFAULT_DURATION_SECS,
            fetch_timeout: None,
        }
    }
}

impl QuizConfig {
    /// Read `QUIZ_BANK_URL`, `QUIZ_QUESTION_COUNT`, `QUIZ_DURATION_SECS` and
    /// `QUIZ_FETCH_TIMEOUT_SECS`. Missing or unparseable values keep defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let bank_url = lookup("QUIZ_BANK_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.bank_url);
        let question_count = lookup("QUIZ_QUESTION_COUNT")
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(defaults.question_count);
        let duration_secs = lookup("QUIZ_DURATION_SECS")
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(defaults.duration_secs);
        let fetch_timeout = lookup("QUIZ_FETCH_TIMEOUT_SECS")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Self {
            bank_url,
            question_count,
            duration_secs,
            fetch_timeout,
        }
    }

    /// # Errors
    ///
    /// Returns `ConfigError` for an empty URL, a question count outside
    /// `1..=MAX_QUESTION_COUNT`, or a zero duration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bank_url.trim().is_empty() {
            return Err(ConfigError::EmptyBankUrl);
        }
        if self.question_count == 0 || self.question_count > MAX_QUESTION_COUNT {
            return Err(ConfigError::QuestionCount {
                count: self.question_count,
                max: MAX_QUESTION_COUNT,
            });
        }
        if self.duration_secs == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(())
    }
}
