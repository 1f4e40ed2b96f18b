use serde::{Deserialize, Serialize};

/// Coarse lifecycle stage of a quiz session. Drives transition legality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    NotStarted,
    Loading,
    Active,
    /// Terminal. Answers, visits and score are frozen.
    Reported,
}

/// Per-question palette state. `Attempted` wins over `Viewed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisitState {
    NotViewed,
    Viewed,
    Attempted,
}

impl VisitState {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NotViewed => "Not Viewed",
            Self::Viewed => "Viewed",
            Self::Attempted => "Attempted",
        }
    }
}
