mod handle;
mod task;

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use tokio::sync::{mpsc, watch};

use quiz_core::Clock;
use quiz_core::session::QuizSession;

use crate::bank::QuestionBank;
use crate::config::QuizConfig;

pub use handle::QuizHandle;

use task::RunnerTask;

/// Spawns quiz sessions against a shared question bank.
///
/// Each `spawn` creates an independent session driven by its own task; the
/// returned `QuizHandle` is the only way to reach it.
#[derive(Clone)]
pub struct QuizRunner {
    bank: Arc<dyn QuestionBank>,
    config: QuizConfig,
    clock: Clock,
    tick_period: Duration,
}

impl QuizRunner {
    #[must_use]
    pub fn new(bank: Arc<dyn QuestionBank>, config: QuizConfig) -> Self {
        Self {
            bank,
            config,
            clock: Clock::default(),
            tick_period: Duration::from_secs(1),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Start a fresh session in `NotStarted`.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn spawn(&self) -> QuizHandle {
        let session = QuizSession::new()
            .with_duration(self.config.duration_secs)
            .with_clock(self.clock);
        self.spawn_session(session)
    }

    /// Drive a caller-built session, e.g. one with a deterministic shuffler.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn spawn_session(&self, session: QuizSession) -> QuizHandle {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (snapshots_tx, snapshots_rx) = watch::channel(session.snapshot());

        let task = RunnerTask::new(
            session,
            Arc::clone(&self.bank),
            self.tick_period,
            self.config.fetch_timeout,
            commands_rx,
            snapshots_tx,
        );
        tokio::spawn(task.run());
        debug!("quiz runner spawned");

        QuizHandle::new(commands_tx, snapshots_rx)
    }
}

impl std::fmt::Debug for QuizRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizRunner")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
