use std::collections::{BTreeMap, BTreeSet};

use crate::model::Question;

/// Owns recorded answers and the score derived from them.
///
/// The score is recomputed from the full answer map on every write, so
/// changing a correct answer to a wrong one lowers it again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerTracker {
    answers: BTreeMap<usize, String>,
    score: usize,
}

impl AnswerTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) the answer for `index` and refresh the score.
    ///
    /// `questions` must be the session's full question list; `index` is
    /// expected to be in range.
    pub fn record(&mut self, index: usize, option: impl Into<String>, questions: &[Question]) {
        self.answers.insert(index, option.into());
        self.score = score_of(&self.answers, questions);
    }

    #[must_use]
    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    #[must_use]
    pub fn is_attempted(&self, index: usize) -> bool {
        self.answers.contains_key(&index)
    }

    /// Indices with a recorded answer.
    #[must_use]
    pub fn attempted(&self) -> BTreeSet<usize> {
        self.answers.keys().copied().collect()
    }

    #[must_use]
    pub fn attempted_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }
}

fn score_of(answers: &BTreeMap<usize, String>, questions: &[Question]) -> usize {
    answers
        .iter()
        .filter(|(index, option)| {
            questions
                .get(**index)
                .is_some_and(|question| question.is_correct(option))
        })
        .count()
}
