use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Question;

/// Why a quiz left the active phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinishReason {
    Submitted,
    TimedOut,
}

impl FinishReason {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::TimedOut => "Time is up",
        }
    }
}

/// The answer recorded for one question, or the "unanswered" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerRecord {
    Answered(String),
    Unanswered,
}

impl AnswerRecord {
    #[must_use]
    pub fn as_option(&self) -> Option<&str> {
        match self {
            Self::Answered(option) => Some(option),
            Self::Unanswered => None,
        }
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        matches!(self, Self::Answered(_))
    }
}

/// One row of the final report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub index: usize,
    pub question: Question,
    pub given: AnswerRecord,
    pub is_correct: bool,
}

impl ReportEntry {
    #[must_use]
    pub fn correct_answer(&self) -> &str {
        self.question.correct_answer()
    }
}

/// Read-only comparison of recorded vs. correct answers.
///
/// Produced once the session is reported, whether by submission or timeout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizReport {
    pub entries: Vec<ReportEntry>,
    pub score: usize,
    pub total: usize,
    pub finish_reason: FinishReason,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl QuizReport {
    #[must_use]
    pub fn unanswered(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| !entry.given.is_answered())
            .count()
    }

    /// Wall time between entering the active phase and finishing, when known.
    #[must_use]
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.finished_at) {
            (Some(started), Some(finished)) => Some(finished - started),
            _ => None,
        }
    }
}
