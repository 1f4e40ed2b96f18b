use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use quiz_core::model::Question;

use super::QuestionBank;
use crate::error::FetchError;

/// Question bank serving a fixed list, for tests and offline runs.
///
/// Can be told to fail its first few fetches, to delay every fetch, or to
/// never answer at all.
#[derive(Debug, Default)]
pub struct InMemoryQuestionBank {
    questions: Vec<Question>,
    failures_left: AtomicUsize,
    delay: Option<Duration>,
    hang: bool,
    fetches: AtomicUsize,
}

impl InMemoryQuestionBank {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            ..Self::default()
        }
    }

    /// Fail the next `count` fetches with `FetchError::Unavailable`.
    #[must_use]
    pub fn with_failures(self, count: usize) -> Self {
        self.failures_left.store(count, Ordering::SeqCst);
        self
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Never resolve a fetch.
    #[must_use]
    pub fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    /// Number of fetches started so far.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuestionBank for InMemoryQuestionBank {
    async fn fetch_questions(&self) -> Result<Vec<Question>, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.hang {
            std::future::pending::<()>().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let failed = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failed {
            return Err(FetchError::Unavailable("simulated outage".into()));
        }

        Ok(self.questions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions() -> Vec<Question> {
        vec![Question::new("Q?", "yes", ["no"]).unwrap()]
    }

    #[tokio::test]
    async fn serves_questions_after_configured_failures() {
        let bank = InMemoryQuestionBank::new(questions()).with_failures(2);

        assert!(matches!(
            bank.fetch_questions().await,
            Err(FetchError::Unavailable(_))
        ));
        assert!(bank.fetch_questions().await.is_err());
        assert_eq!(bank.fetch_questions().await.unwrap(), questions());
        assert_eq!(bank.fetch_count(), 3);
    }
}
