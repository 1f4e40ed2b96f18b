use thiserror::Error;

use crate::model::IdentifierError;
use crate::session::Phase;

/// Errors returned by `QuizSession` transitions.
///
/// A transition that returns an error leaves the session exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("invalid identifier: {0}")]
    Validation(#[from] IdentifierError),

    #[error("question bank returned no questions")]
    EmptyBank,

    #[error("operation requires the {expected:?} phase, session is {actual:?}")]
    InvalidPhase { expected: Phase, actual: Phase },

    #[error("question index {index} is out of range (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("option is not offered for the current question")]
    UnknownOption,

    #[error("report is only available after the quiz has finished")]
    NotReported,
}

impl QuizError {
    /// True for errors caused by calling an operation at the wrong time or
    /// with out-of-range input, as opposed to user or bank data problems.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InvalidPhase { .. }
                | Self::IndexOutOfRange { .. }
                | Self::UnknownOption
                | Self::NotReported
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_errors_are_told_apart_from_data_errors() {
        assert!(
            QuizError::InvalidPhase {
                expected: Phase::Active,
                actual: Phase::Reported,
            }
            .is_precondition()
        );
        assert!(QuizError::IndexOutOfRange { index: 4, len: 3 }.is_precondition());
        assert!(QuizError::UnknownOption.is_precondition());

        assert!(!QuizError::EmptyBank.is_precondition());
        assert!(!QuizError::Validation(IdentifierError::Empty).is_precondition());
    }
}
