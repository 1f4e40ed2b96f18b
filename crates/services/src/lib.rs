#![forbid(unsafe_code)]

pub mod bank;
pub mod config;
pub mod error;
pub mod runner;

pub use quiz_core::Clock;

pub use bank::{InMemoryQuestionBank, OPENTDB_URL, OpenTdbQuestionBank, QuestionBank};
pub use config::{MAX_QUESTION_COUNT, QuizConfig};
pub use error::{ConfigError, FetchError, RunnerError};
pub use runner::{QuizHandle, QuizRunner};
