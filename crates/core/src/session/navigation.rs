use std::collections::BTreeSet;

use crate::error::QuizError;

/// Owns the current question index and every index ever made current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTracker {
    len: usize,
    current: usize,
    visited: BTreeSet<usize>,
}

impl NavigationTracker {
    /// Start at index 0 with index 0 already visited.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyBank` when `len` is zero.
    pub fn new(len: usize) -> Result<Self, QuizError> {
        if len == 0 {
            return Err(QuizError::EmptyBank);
        }
        Ok(Self {
            len,
            current: 0,
            visited: BTreeSet::from([0]),
        })
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn visited(&self) -> &BTreeSet<usize> {
        &self.visited
    }

    #[must_use]
    pub fn is_visited(&self, index: usize) -> bool {
        self.visited.contains(&index)
    }

    /// Make `index` current and mark it visited.
    ///
    /// Returns `true` when the current index actually changed.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::IndexOutOfRange` without moving.
    pub fn move_to(&mut self, index: usize) -> Result<bool, QuizError> {
        if index >= self.len {
            return Err(QuizError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        self.visited.insert(index);
        let changed = self.current != index;
        self.current = index;
        Ok(changed)
    }

    /// Index before the current one, clamped at the first question.
    #[must_use]
    pub fn previous_index(&self) -> usize {
        self.current.saturating_sub(1)
    }

    /// Index after the current one, clamped at the last question.
    #[must_use]
    pub fn next_index(&self) -> usize {
        (self.current + 1).min(self.len - 1)
    }
}
