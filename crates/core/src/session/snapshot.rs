use serde::{Deserialize, Serialize};

use crate::model::{Question, QuizReport};

use super::state::{Phase, VisitState};

/// Observable state of a session at one point in time.
///
/// Built by `QuizSession::snapshot` after every transition and handed to the
/// presentation layer, which never touches the session directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSnapshot {
    pub phase: Phase,
    pub identifier: Option<String>,
    pub total: usize,
    pub current_index: Option<usize>,
    pub current_question: Option<Question>,
    pub display_options: Vec<String>,
    /// Recorded answer for the current question, if any.
    pub selected: Option<String>,
    pub visit_states: Vec<VisitState>,
    pub attempted: usize,
    pub score: usize,
    pub remaining_secs: u32,
    pub fetch_failure: Option<String>,
    /// Present once the phase is `Reported`.
    pub report: Option<QuizReport>,
}

impl QuizSnapshot {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    #[must_use]
    pub fn is_stalled(&self) -> bool {
        self.phase == Phase::Loading && self.fetch_failure.is_some()
    }
}
