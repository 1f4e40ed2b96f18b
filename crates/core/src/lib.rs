#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod session;
pub mod shuffle;
pub mod time;

pub use error::QuizError;
pub use time::Clock;

/// Number of questions requested from the bank when nothing else is configured.
pub const DEFAULT_QUESTION_COUNT: u32 = 15;
