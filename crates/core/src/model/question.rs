use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors raised while building a `Question` from bank data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt must not be empty")]
    EmptyPrompt,

    #[error("correct answer must not be empty")]
    EmptyCorrectAnswer,

    #[error("question needs at least one incorrect answer")]
    NoIncorrectAnswers,

    #[error("incorrect answer #{index} must not be empty")]
    EmptyIncorrectAnswer { index: usize },

    #[error("incorrect answer #{index} duplicates the correct answer")]
    CorrectAnswerRepeated { index: usize },
}

//
// ─── DIFFICULTY ───────────────────────────────────────────────────────────────
//

/// Difficulty label attached by the question bank. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A multiple-choice question supplied by the question bank.
///
/// Text fields may carry markup (HTML entities, inline tags). They are stored
/// verbatim; rendering is the presentation layer's job.
///
/// The correct answer never appears among the incorrect answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    prompt: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
    category: Option<String>,
    difficulty: Option<Difficulty>,
}

impl Question {
    /// Build a question, checking the answer invariants.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or an answer is blank, if there are
    /// no incorrect answers, or if an incorrect answer equals the correct one.
    pub fn new(
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        let correct_answer = correct_answer.into();
        let incorrect_answers: Vec<String> =
            incorrect_answers.into_iter().map(Into::into).collect();

        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if correct_answer.trim().is_empty() {
            return Err(QuestionError::EmptyCorrectAnswer);
        }
        if incorrect_answers.is_empty() {
            return Err(QuestionError::NoIncorrectAnswers);
        }
        for (index, wrong) in incorrect_answers.iter().enumerate() {
            if wrong.trim().is_empty() {
                return Err(QuestionError::EmptyIncorrectAnswer { index });
            }
            if *wrong == correct_answer {
                return Err(QuestionError::CorrectAnswerRepeated { index });
            }
        }

        Ok(Self {
            prompt,
            correct_answer,
            incorrect_answers,
            category: None,
            difficulty: None,
        })
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn incorrect_answers(&self) -> &[String] {
        &self.incorrect_answers
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    /// All answer options in source order: incorrect answers, then the correct one.
    #[must_use]
    pub fn options(&self) -> Vec<String> {
        let mut options = Vec::with_capacity(self.incorrect_answers.len() + 1);
        options.extend(self.incorrect_answers.iter().cloned());
        options.push(self.correct_answer.clone());
        options
    }

    /// Number of answer options, correct answer included.
    #[must_use]
    pub fn option_count(&self) -> usize {
        self.incorrect_answers.len() + 1
    }

    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.correct_answer == option || self.incorrect_answers.iter().any(|o| o == option)
    }

    #[must_use]
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_answer == option
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
