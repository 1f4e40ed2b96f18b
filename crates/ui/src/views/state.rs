use log::warn;

use quiz_core::QuizError;
use quiz_core::model::IdentifierError;
use services::RunnerError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    InvalidIdentifier,
    Disconnected,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidIdentifier => "Enter a valid email address.",
            Self::Disconnected => "The quiz stopped responding. Start over to try again.",
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<IdentifierError> for ViewError {
    fn from(_: IdentifierError) -> Self {
        Self::InvalidIdentifier
    }
}

impl From<RunnerError> for ViewError {
    fn from(err: RunnerError) -> Self {
        match err {
            RunnerError::Quiz(QuizError::Validation(inner)) => inner.into(),
            RunnerError::Closed => Self::Disconnected,
            _ => Self::Unknown,
        }
    }
}

/// Log a command the runner never received. Returns the mapped error.
pub fn report_dispatch(result: Result<(), RunnerError>) -> Option<ViewError> {
    match result {
        Ok(()) => None,
        Err(err) => {
            warn!("quiz command not delivered: {err}");
            Some(err.into())
        }
    }
}
