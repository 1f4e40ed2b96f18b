mod memory;
mod opentdb;

use async_trait::async_trait;
use quiz_core::model::Question;

use crate::error::FetchError;

pub use memory::InMemoryQuestionBank;
pub use opentdb::{OPENTDB_URL, OpenTdbQuestionBank};

/// Source of the fixed question set for one quiz session.
#[async_trait]
pub trait QuestionBank: Send + Sync {
    /// Fetch the questions for a new session, in display order.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` for transport failures or payloads that cannot be
    /// mapped onto `Question`.
    async fn fetch_questions(&self) -> Result<Vec<Question>, FetchError>;
}
