use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, trace, warn};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use quiz_core::QuizError;
use quiz_core::model::Question;
use quiz_core::session::{Phase, QuizSession, QuizSnapshot, Tick};

use super::handle::QuizCommand;
use crate::bank::QuestionBank;
use crate::error::FetchError;

#[derive(Debug)]
struct FetchOutcome {
    generation: u64,
    result: Result<Vec<Question>, FetchError>,
}

/// The single owner of one `QuizSession`.
///
/// User commands, fetch completions and countdown ticks are applied one per
/// loop iteration, so no two transitions ever interleave. The countdown
/// interval exists only while the session is `Active`.
pub(crate) struct RunnerTask {
    session: QuizSession,
    bank: Arc<dyn QuestionBank>,
    tick_period: Duration,
    fetch_timeout: Option<Duration>,
    commands: mpsc::UnboundedReceiver<QuizCommand>,
    snapshots: watch::Sender<QuizSnapshot>,
    fetch_tx: mpsc::UnboundedSender<FetchOutcome>,
    fetch_rx: mpsc::UnboundedReceiver<FetchOutcome>,
    fetch_task: Option<JoinHandle<()>>,
    fetch_generation: u64,
    countdown: Option<Interval>,
}

impl RunnerTask {
    pub(crate) fn new(
        session: QuizSession,
        bank: Arc<dyn QuestionBank>,
        tick_period: Duration,
        fetch_timeout: Option<Duration>,
        commands: mpsc::UnboundedReceiver<QuizCommand>,
        snapshots: watch::Sender<QuizSnapshot>,
    ) -> Self {
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        Self {
            session,
            bank,
            tick_period,
            fetch_timeout,
            commands,
            snapshots,
            fetch_tx,
            fetch_rx,
            fetch_task: None,
            fetch_generation: 0,
            countdown: None,
        }
    }

    pub(crate) async fn run(mut self) {
        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(QuizCommand::Abandon) | None => break,
                    Some(command) => self.apply_command(command),
                },
                Some(outcome) = self.fetch_rx.recv() => self.apply_fetch(outcome),
                () = next_tick(&mut self.countdown) => self.apply_tick(),
            }
            self.sync_countdown();
            self.publish();
        }

        self.countdown = None;
        if let Some(task) = self.fetch_task.take() {
            task.abort();
        }
        info!(
            "quiz runner stopped in {:?} phase with score {}/{}",
            self.session.phase(),
            self.session.score(),
            self.session.len()
        );
    }

    fn apply_command(&mut self, command: QuizCommand) {
        let result = match command {
            QuizCommand::Start { identifier, reply } => {
                let result = self.session.start(&identifier);
                if result.is_ok() {
                    info!("quiz started, fetching questions");
                    debug!("quiz identifier: {identifier}");
                    self.begin_fetch();
                }
                let _ = reply.send(result);
                return;
            }
            QuizCommand::Navigate(index) => {
                debug!("navigate to question {index}");
                self.session.navigate_to(index)
            }
            QuizCommand::Previous => self.session.navigate_previous(),
            QuizCommand::Next => self.session.navigate_next(),
            QuizCommand::Answer(option) => {
                let result = self.session.answer(&option);
                if result.is_ok() {
                    debug!(
                        "answered question {:?}, score now {}",
                        self.session.current_index(),
                        self.session.score()
                    );
                }
                result
            }
            QuizCommand::Submit => {
                let result = self.session.submit();
                if result.is_ok() {
                    info!(
                        "quiz submitted with {} of {} attempted, score {}",
                        self.session.attempted_count(),
                        self.session.len(),
                        self.session.score()
                    );
                }
                result
            }
            QuizCommand::RetryFetch => {
                let result = self.session.retry_fetch();
                if result.is_ok() {
                    info!("retrying question fetch");
                    self.begin_fetch();
                }
                result
            }
            QuizCommand::Abandon => return,
        };

        match result {
            Err(err) if err.is_precondition() => warn!("ignored quiz event: {err}"),
            Err(err) => info!("rejected quiz event: {err}"),
            Ok(()) => {}
        }
    }

    fn begin_fetch(&mut self) {
        if let Some(previous) = self.fetch_task.take() {
            previous.abort();
        }
        self.fetch_generation += 1;

        let generation = self.fetch_generation;
        let bank = Arc::clone(&self.bank);
        let fetch_timeout = self.fetch_timeout;
        let results = self.fetch_tx.clone();
        self.fetch_task = Some(tokio::spawn(async move {
            let result = match fetch_timeout {
                Some(limit) => tokio::time::timeout(limit, bank.fetch_questions())
                    .await
                    .unwrap_or(Err(FetchError::Timeout)),
                None => bank.fetch_questions().await,
            };
            let _ = results.send(FetchOutcome { generation, result });
        }));
    }

    /// Outcomes from a superseded fetch are dropped and leave the live
    /// fetch's handle in place, so abandoning can still abort it.
    fn apply_fetch(&mut self, outcome: FetchOutcome) {
        if outcome.generation != self.fetch_generation || self.session.phase() != Phase::Loading {
            debug!("dropping stale fetch result #{}", outcome.generation);
            return;
        }
        self.fetch_task = None;

        match outcome.result {
            Ok(questions) => {
                let count = questions.len();
                match self.session.on_questions_loaded(questions) {
                    Ok(()) => info!("loaded {count} questions"),
                    Err(QuizError::EmptyBank) => warn!("question bank returned no questions"),
                    Err(err) => warn!("could not load questions: {err}"),
                }
            }
            Err(err) => {
                warn!("question fetch failed: {err}");
                if let Err(state_err) = self.session.on_fetch_failed(err.to_string()) {
                    warn!("could not record fetch failure: {state_err}");
                }
            }
        }
    }

    fn apply_tick(&mut self) {
        match self.session.tick() {
            Ok(Tick::Running { remaining }) => trace!("{remaining}s left"),
            Ok(Tick::Expired) => info!(
                "time is up with {} of {} attempted, score {}",
                self.session.attempted_count(),
                self.session.len(),
                self.session.score()
            ),
            Err(err) => warn!("tick outside active phase: {err}"),
        }
    }

    /// Arm the countdown on entering `Active`, drop it on leaving. Idempotent.
    fn sync_countdown(&mut self) {
        let active = self.session.phase() == Phase::Active;
        match (active, self.countdown.is_some()) {
            (true, false) => {
                let mut countdown =
                    interval_at(Instant::now() + self.tick_period, self.tick_period);
                countdown.set_missed_tick_behavior(MissedTickBehavior::Burst);
                self.countdown = Some(countdown);
                debug!("countdown armed at {}s", self.session.remaining_secs());
            }
            (false, true) => {
                self.countdown = None;
                debug!("countdown cancelled");
            }
            _ => {}
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.session.snapshot());
    }
}

async fn next_tick(countdown: &mut Option<Interval>) {
    match countdown {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
