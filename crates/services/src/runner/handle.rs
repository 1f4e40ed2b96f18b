use tokio::sync::{mpsc, oneshot, watch};

use quiz_core::QuizError;
use quiz_core::session::QuizSnapshot;

use crate::error::RunnerError;

/// User-originated events for one quiz session.
#[derive(Debug)]
pub(crate) enum QuizCommand {
    Start {
        identifier: String,
        reply: oneshot::Sender<Result<(), QuizError>>,
    },
    Navigate(usize),
    Previous,
    Next,
    Answer(String),
    Submit,
    RetryFetch,
    Abandon,
}

/// Cloneable front door to a running quiz session.
///
/// Commands are queued without blocking; state comes back as `QuizSnapshot`s
/// on a watch channel. Once every handle is dropped (or `abandon` is called)
/// the runner stops and its countdown is cancelled.
#[derive(Clone, Debug)]
pub struct QuizHandle {
    commands: mpsc::UnboundedSender<QuizCommand>,
    snapshots: watch::Receiver<QuizSnapshot>,
}

impl QuizHandle {
    pub(crate) fn new(
        commands: mpsc::UnboundedSender<QuizCommand>,
        snapshots: watch::Receiver<QuizSnapshot>,
    ) -> Self {
        Self {
            commands,
            snapshots,
        }
    }

    /// Validate the identifier and begin loading questions.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::Quiz` wrapping `QuizError::Validation` for a
    /// malformed identifier, or `RunnerError::Closed` if the runner is gone.
    pub async fn start(&self, identifier: impl Into<String>) -> Result<(), RunnerError> {
        let (reply, response) = oneshot::channel();
        self.send(QuizCommand::Start {
            identifier: identifier.into(),
            reply,
        })?;
        response.await.map_err(|_| RunnerError::Closed)??;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `RunnerError::Closed` if the runner is gone.
    pub fn navigate_to(&self, index: usize) -> Result<(), RunnerError> {
        self.send(QuizCommand::Navigate(index))
    }

    /// # Errors
    ///
    /// Returns `RunnerError::Closed` if the runner is gone.
    pub fn navigate_previous(&self) -> Result<(), RunnerError> {
        self.send(QuizCommand::Previous)
    }

    /// # Errors
    ///
    /// Returns `RunnerError::Closed` if the runner is gone.
    pub fn navigate_next(&self) -> Result<(), RunnerError> {
        self.send(QuizCommand::Next)
    }

    /// # Errors
    ///
    /// Returns `RunnerError::Closed` if the runner is gone.
    pub fn answer(&self, option: impl Into<String>) -> Result<(), RunnerError> {
        self.send(QuizCommand::Answer(option.into()))
    }

    /// # Errors
    ///
    /// Returns `RunnerError::Closed` if the runner is gone.
    pub fn submit(&self) -> Result<(), RunnerError> {
        self.send(QuizCommand::Submit)
    }

    /// Fetch questions again after a failed or empty load.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::Closed` if the runner is gone.
    pub fn retry_fetch(&self) -> Result<(), RunnerError> {
        self.send(QuizCommand::RetryFetch)
    }

    /// Stop the runner. Calling this more than once is harmless.
    pub fn abandon(&self) {
        let _ = self.commands.send(QuizCommand::Abandon);
    }

    /// Latest published state.
    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A fresh receiver for observing every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QuizSnapshot> {
        self.snapshots.clone()
    }

    /// Wait until a published snapshot satisfies `predicate`.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::Closed` if the runner stops first.
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&QuizSnapshot) -> bool,
    ) -> Result<QuizSnapshot, RunnerError> {
        let mut snapshots = self.subscribe();
        let snapshot = snapshots
            .wait_for(predicate)
            .await
            .map_err(|_| RunnerError::Closed)?;
        Ok(snapshot.clone())
    }

    fn send(&self, command: QuizCommand) -> Result<(), RunnerError> {
        self.commands.send(command).map_err(|_| RunnerError::Closed)
    }
}
