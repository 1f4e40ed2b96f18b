use chrono::{DateTime, Utc};
use std::fmt;

use crate::error::QuizError;
use crate::model::{AnswerRecord, FinishReason, Identifier, Question, QuizReport, ReportEntry};
use crate::shuffle::{OptionShuffler, RandomShuffler};
use crate::time::Clock;

use super::answers::AnswerTracker;
use super::countdown::{Countdown, DEFAULT_DURATION_SECS, Tick};
use super::navigation::NavigationTracker;
use super::snapshot::QuizSnapshot;
use super::state::{Phase, VisitState};

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One quiz attempt: the aggregate root for navigation, answers, score and time.
///
/// Every transition is phase-gated and all-or-nothing. A rejected call returns
/// a `QuizError` and leaves the session untouched.
///
/// `display_options` are shuffled once per index change and cached, so
/// re-reading them during a visit always yields the same order.
pub struct QuizSession {
    phase: Phase,
    identifier: Option<Identifier>,
    questions: Vec<Question>,
    navigation: Option<NavigationTracker>,
    answers: AnswerTracker,
    countdown: Countdown,
    display_options: Vec<String>,
    shuffler: Box<dyn OptionShuffler>,
    clock: Clock,
    fetch_failure: Option<String>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    finish_reason: Option<FinishReason>,
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::NotStarted,
            identifier: None,
            questions: Vec::new(),
            navigation: None,
            answers: AnswerTracker::new(),
            countdown: Countdown::new(DEFAULT_DURATION_SECS),
            display_options: Vec::new(),
            shuffler: Box::new(RandomShuffler),
            clock: Clock::system(),
            fetch_failure: None,
            started_at: None,
            finished_at: None,
            finish_reason: None,
        }
    }

    #[must_use]
    pub fn with_duration(mut self, secs: u32) -> Self {
        self.countdown = Countdown::new(secs);
        self
    }

    #[must_use]
    pub fn with_shuffler(mut self, shuffler: impl OptionShuffler + 'static) -> Self {
        self.shuffler = Box::new(shuffler);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    //
    // ─── TRANSITIONS ──────────────────────────────────────────────────────────
    //

    /// Validate the identifier and move to `Loading`.
    ///
    /// The caller is expected to kick off the question bank fetch on success.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidPhase` unless the session is `NotStarted`,
    /// or `QuizError::Validation` for a malformed identifier.
    pub fn start(&mut self, identifier: &str) -> Result<(), QuizError> {
        self.require(Phase::NotStarted)?;
        let identifier = Identifier::parse(identifier)?;
        self.identifier = Some(identifier);
        self.phase = Phase::Loading;
        Ok(())
    }

    /// Install the fetched questions and become `Active` at index 0.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidPhase` unless `Loading`. Returns
    /// `QuizError::EmptyBank` for an empty list; the session then stays
    /// `Loading` with a fetch failure recorded, waiting for a retry.
    pub fn on_questions_loaded(&mut self, questions: Vec<Question>) -> Result<(), QuizError> {
        self.require(Phase::Loading)?;
        let navigation = match NavigationTracker::new(questions.len()) {
            Ok(navigation) => navigation,
            Err(err) => {
                self.fetch_failure = Some(err.to_string());
                return Err(err);
            }
        };

        self.display_options = self.shuffler.shuffle(&questions[navigation.current()]);
        self.questions = questions;
        self.navigation = Some(navigation);
        self.fetch_failure = None;
        self.started_at = Some(self.clock.now());
        self.phase = Phase::Active;
        Ok(())
    }

    /// Record a failed fetch. The session stays `Loading`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidPhase` unless `Loading`.
    pub fn on_fetch_failed(&mut self, message: impl Into<String>) -> Result<(), QuizError> {
        self.require(Phase::Loading)?;
        self.fetch_failure = Some(message.into());
        Ok(())
    }

    /// Clear a recorded fetch failure before fetching again.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidPhase` unless `Loading`.
    pub fn retry_fetch(&mut self) -> Result<(), QuizError> {
        self.require(Phase::Loading)?;
        self.fetch_failure = None;
        Ok(())
    }

    /// Make question `index` current. Free navigation, any order.
    ///
    /// Options are reshuffled only when the index changes.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidPhase` unless `Active`, or
    /// `QuizError::IndexOutOfRange`.
    pub fn navigate_to(&mut self, index: usize) -> Result<(), QuizError> {
        self.require(Phase::Active)?;
        let navigation = self.navigation.as_mut().ok_or(QuizError::EmptyBank)?;
        if navigation.move_to(index)? {
            self.display_options = self.shuffler.shuffle(&self.questions[index]);
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `QuizError::InvalidPhase` unless `Active`.
    pub fn navigate_previous(&mut self) -> Result<(), QuizError> {
        self.require(Phase::Active)?;
        let target = self.navigation()?.previous_index();
        self.navigate_to(target)
    }

    /// # Errors
    ///
    /// Returns `QuizError::InvalidPhase` unless `Active`.
    pub fn navigate_next(&mut self) -> Result<(), QuizError> {
        self.require(Phase::Active)?;
        let target = self.navigation()?.next_index();
        self.navigate_to(target)
    }

    /// Record `option` for the current question and refresh the score.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidPhase` unless `Active`, or
    /// `QuizError::UnknownOption` if `option` is not currently displayed.
    pub fn answer(&mut self, option: &str) -> Result<(), QuizError> {
        self.require(Phase::Active)?;
        if !self.display_options.iter().any(|o| o == option) {
            return Err(QuizError::UnknownOption);
        }
        let index = self.navigation()?.current();
        self.answers.record(index, option, &self.questions);
        Ok(())
    }

    /// Finish the quiz now. Unattempted questions are allowed.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidPhase` unless `Active`.
    pub fn submit(&mut self) -> Result<(), QuizError> {
        self.require(Phase::Active)?;
        self.finish(FinishReason::Submitted);
        Ok(())
    }

    /// Advance the countdown by one second; finishes the quiz at zero.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidPhase` unless `Active`.
    pub fn tick(&mut self) -> Result<Tick, QuizError> {
        self.require(Phase::Active)?;
        let tick = self.countdown.tick();
        if tick == Tick::Expired {
            self.finish(FinishReason::TimedOut);
        }
        Ok(tick)
    }

    fn finish(&mut self, reason: FinishReason) {
        self.phase = Phase::Reported;
        self.finish_reason = Some(reason);
        self.finished_at = Some(self.clock.now());
    }

    fn require(&self, expected: Phase) -> Result<(), QuizError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(QuizError::InvalidPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn navigation(&self) -> Result<&NavigationTracker, QuizError> {
        self.navigation.as_ref().ok_or(QuizError::EmptyBank)
    }

    //
    // ─── QUERIES ──────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// `None` until questions are loaded.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.navigation.as_ref().map(NavigationTracker::current)
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current_index().and_then(|i| self.questions.get(i))
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<&str> {
        self.current_index().and_then(|i| self.answers.answer(i))
    }

    #[must_use]
    pub fn display_options(&self) -> &[String] {
        &self.display_options
    }

    #[must_use]
    pub fn is_visited(&self, index: usize) -> bool {
        self.navigation
            .as_ref()
            .is_some_and(|navigation| navigation.is_visited(index))
    }

    #[must_use]
    pub fn is_attempted(&self, index: usize) -> bool {
        self.answers.is_attempted(index)
    }

    #[must_use]
    pub fn visit_state(&self, index: usize) -> VisitState {
        if self.answers.is_attempted(index) {
            VisitState::Attempted
        } else if self.is_visited(index) {
            VisitState::Viewed
        } else {
            VisitState::NotViewed
        }
    }

    #[must_use]
    pub fn visit_states(&self) -> Vec<VisitState> {
        (0..self.questions.len())
            .map(|index| self.visit_state(index))
            .collect()
    }

    #[must_use]
    pub fn visited(&self) -> Vec<usize> {
        self.navigation
            .as_ref()
            .map(|navigation| navigation.visited().iter().copied().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn attempted(&self) -> Vec<usize> {
        self.answers.attempted().into_iter().collect()
    }

    #[must_use]
    pub fn attempted_count(&self) -> usize {
        self.answers.attempted_count()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.answers.score()
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.countdown.remaining()
    }

    #[must_use]
    pub fn fetch_failure(&self) -> Option<&str> {
        self.fetch_failure.as_deref()
    }

    #[must_use]
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }

    /// Compare recorded answers with the correct ones.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotReported` before the quiz has finished.
    pub fn report(&self) -> Result<QuizReport, QuizError> {
        if self.phase != Phase::Reported {
            return Err(QuizError::NotReported);
        }
        let finish_reason = self.finish_reason.ok_or(QuizError::NotReported)?;

        let entries = self
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let given = self
                    .answers
                    .answer(index)
                    .map_or(AnswerRecord::Unanswered, |option| {
                        AnswerRecord::Answered(option.to_string())
                    });
                let is_correct = given
                    .as_option()
                    .is_some_and(|option| question.is_correct(option));
                ReportEntry {
                    index,
                    question: question.clone(),
                    given,
                    is_correct,
                }
            })
            .collect();

        Ok(QuizReport {
            entries,
            score: self.score(),
            total: self.len(),
            finish_reason,
            started_at: self.started_at,
            finished_at: self.finished_at,
        })
    }

    /// Owned copy of everything a presentation layer observes.
    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        QuizSnapshot {
            phase: self.phase,
            identifier: self.identifier.as_ref().map(ToString::to_string),
            total: self.len(),
            current_index: self.current_index(),
            current_question: self.current_question().cloned(),
            display_options: self.display_options.clone(),
            selected: self.current_answer().map(str::to_string),
            visit_states: self.visit_states(),
            attempted: self.attempted_count(),
            score: self.score(),
            remaining_secs: self.remaining_secs(),
            fetch_failure: self.fetch_failure.clone(),
            report: self.report().ok(),
        }
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.phase)
            .field("identifier", &self.identifier)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current_index())
            .field("attempted", &self.answers.attempted_count())
            .field("score", &self.answers.score())
            .field("remaining_secs", &self.countdown.remaining())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shuffle::{IdentityShuffler, ReverseShuffler};
    use crate::time::{fixed_clock, fixed_now};

    fn build_question(n: usize) -> Question {
        Question::new(
            format!("Question {n}?"),
            format!("right-{n}"),
            [format!("wrong-{n}-a"), format!("wrong-{n}-b"), format!("wrong-{n}-c")],
        )
        .unwrap()
    }

    fn build_questions(count: usize) -> Vec<Question> {
        (0..count).map(build_question).collect()
    }

    fn active_session(count: usize) -> QuizSession {
        let mut session = QuizSession::new()
            .with_shuffler(IdentityShuffler)
            .with_clock(fixed_clock());
        session.start("a@b.com").unwrap();
        session.on_questions_loaded(build_questions(count)).unwrap();
        session
    }

    /// Flips between identity and reverse order on every call.
    struct AlternatingShuffler {
        calls: usize,
    }

    impl OptionShuffler for AlternatingShuffler {
        fn shuffle(&mut self, question: &Question) -> Vec<String> {
            self.calls += 1;
            if self.calls % 2 == 0 {
                ReverseShuffler.shuffle(question)
            } else {
                IdentityShuffler.shuffle(question)
            }
        }
    }

    #[test]
    fn start_then_load_activates_first_question() {
        let mut session = QuizSession::new().with_shuffler(IdentityShuffler);
        session.start("a@b.com").unwrap();
        assert_eq!(session.phase(), Phase::Loading);

        session.on_questions_loaded(build_questions(2)).unwrap();

        assert_eq!(session.phase(), Phase::Active);
        assert_eq!(session.current_index(), Some(0));
        assert_eq!(session.visited(), vec![0]);
        assert_eq!(
            session.display_options(),
            ["wrong-0-a", "wrong-0-b", "wrong-0-c", "right-0"]
        );
    }

    #[test]
    fn malformed_identifier_keeps_session_not_started() {
        let mut session = QuizSession::new();
        let err = session.start("not-an-email").unwrap_err();

        assert!(matches!(err, QuizError::Validation(_)));
        assert_eq!(session.phase(), Phase::NotStarted);
        assert!(session.identifier().is_none());

        session.start("a@b.com").unwrap();
        assert_eq!(session.phase(), Phase::Loading);
    }

    #[test]
    fn start_twice_is_rejected() {
        let mut session = QuizSession::new();
        session.start("a@b.com").unwrap();
        let err = session.start("c@d.org").unwrap_err();

        assert_eq!(
            err,
            QuizError::InvalidPhase {
                expected: Phase::NotStarted,
                actual: Phase::Loading
            }
        );
        assert_eq!(session.identifier().map(Identifier::as_str), Some("a@b.com"));
    }

    #[test]
    fn empty_bank_stalls_in_loading_until_retry() {
        let mut session = QuizSession::new();
        session.start("a@b.com").unwrap();

        let err = session.on_questions_loaded(Vec::new()).unwrap_err();
        assert_eq!(err, QuizError::EmptyBank);
        assert_eq!(session.phase(), Phase::Loading);
        assert!(session.fetch_failure().is_some());

        session.retry_fetch().unwrap();
        assert!(session.fetch_failure().is_none());
        session.on_questions_loaded(build_questions(1)).unwrap();
        assert_eq!(session.phase(), Phase::Active);
    }

    #[test]
    fn fetch_failure_is_recorded_while_loading() {
        let mut session = QuizSession::new();
        assert!(session.on_fetch_failed("offline").is_err());

        session.start("a@b.com").unwrap();
        session.on_fetch_failed("offline").unwrap();

        assert_eq!(session.phase(), Phase::Loading);
        assert_eq!(session.fetch_failure(), Some("offline"));
        assert_eq!(session.snapshot().fetch_failure.as_deref(), Some("offline"));
    }

    #[test]
    fn correct_answer_after_navigation_scores() {
        let mut session = active_session(3);

        session.navigate_to(2).unwrap();
        session.answer("right-2").unwrap();

        assert_eq!(session.score(), 1);
        assert_eq!(session.attempted(), vec![2]);
        assert_eq!(session.visited(), vec![0, 2]);
    }

    #[test]
    fn reanswering_recomputes_score() {
        let mut session = active_session(2);

        session.answer("right-0").unwrap();
        session.answer("right-0").unwrap();
        assert_eq!(session.score(), 1);

        session.answer("wrong-0-b").unwrap();
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_answer(), Some("wrong-0-b"));
        assert_eq!(session.attempted_count(), 1);
    }

    #[test]
    fn answer_must_be_a_displayed_option() {
        let mut session = active_session(2);

        let err = session.answer("right-1").unwrap_err();
        assert_eq!(err, QuizError::UnknownOption);
        assert_eq!(session.attempted_count(), 0);
    }

    #[test]
    fn navigation_to_current_index_does_not_reshuffle() {
        let mut session = QuizSession::new().with_shuffler(AlternatingShuffler { calls: 0 });
        session.start("a@b.com").unwrap();
        session.on_questions_loaded(build_questions(3)).unwrap();

        session.navigate_to(1).unwrap();
        let first = session.display_options().to_vec();
        session.navigate_to(1).unwrap();
        assert_eq!(session.display_options(), first.as_slice());

        session.answer(&first[0]).unwrap();
        assert_eq!(session.display_options(), first.as_slice());
    }

    #[test]
    fn navigation_is_free_and_bounded() {
        let mut session = active_session(3);

        session.navigate_to(2).unwrap();
        session.navigate_to(0).unwrap();
        session.navigate_next().unwrap();
        assert_eq!(session.current_index(), Some(1));

        session.navigate_previous().unwrap();
        session.navigate_previous().unwrap();
        assert_eq!(session.current_index(), Some(0));

        let err = session.navigate_to(3).unwrap_err();
        assert_eq!(err, QuizError::IndexOutOfRange { index: 3, len: 3 });
        assert_eq!(session.current_index(), Some(0));
    }

    #[test]
    fn visit_state_prefers_attempted() {
        let mut session = active_session(3);
        session.navigate_to(1).unwrap();
        session.answer("wrong-1-a").unwrap();

        assert_eq!(
            session.visit_states(),
            vec![VisitState::Viewed, VisitState::Attempted, VisitState::NotViewed]
        );
        for index in session.attempted() {
            assert!(session.is_visited(index));
        }
    }

    #[test]
    fn ticking_to_zero_reports_and_freezes_answers() {
        let mut session = QuizSession::new()
            .with_duration(5)
            .with_shuffler(IdentityShuffler);
        session.start("a@b.com").unwrap();
        session.on_questions_loaded(build_questions(2)).unwrap();

        let mut last = session.remaining_secs();
        while session.phase() == Phase::Active {
            session.tick().unwrap();
            assert!(session.remaining_secs() < last);
            last = session.remaining_secs();
        }

        assert_eq!(session.remaining_secs(), 0);
        assert_eq!(session.phase(), Phase::Reported);
        assert_eq!(session.finish_reason(), Some(FinishReason::TimedOut));

        assert!(session.answer("right-0").is_err());
        assert!(session.navigate_to(1).is_err());
        assert!(session.tick().is_err());
        assert_eq!(session.score(), 0);
        assert_eq!(session.visited(), vec![0]);
    }

    #[test]
    fn submit_with_partial_answers_reports_unanswered() {
        let mut session = active_session(5);
        session.navigate_to(3).unwrap();
        session.answer("right-3").unwrap();
        session.submit().unwrap();

        let report = session.report().unwrap();
        assert_eq!(report.total, 5);
        assert_eq!(report.score, 1);
        assert_eq!(report.finish_reason, FinishReason::Submitted);
        assert_eq!(report.unanswered(), 4);
        assert_eq!(report.started_at, Some(fixed_now()));
        assert_eq!(report.finished_at, Some(fixed_now()));

        for entry in &report.entries {
            if entry.index == 3 {
                assert_eq!(entry.given, AnswerRecord::Answered("right-3".into()));
                assert!(entry.is_correct);
            } else {
                assert_eq!(entry.given, AnswerRecord::Unanswered);
                assert!(!entry.is_correct);
            }
            assert_eq!(entry.correct_answer(), format!("right-{}", entry.index));
        }
    }

    #[test]
    fn report_is_unavailable_while_active() {
        let session = active_session(1);
        assert_eq!(session.report().unwrap_err(), QuizError::NotReported);
        assert!(session.snapshot().report.is_none());
    }

    #[test]
    fn submit_is_terminal() {
        let mut session = active_session(2);
        session.submit().unwrap();

        assert!(session.submit().is_err());
        assert!(session.tick().is_err());
        assert_eq!(session.remaining_secs(), DEFAULT_DURATION_SECS);
    }

    #[test]
    fn snapshot_mirrors_session_state() {
        let mut session = active_session(3);
        session.navigate_to(1).unwrap();
        session.answer("right-1").unwrap();
        session.tick().unwrap();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, Phase::Active);
        assert_eq!(snapshot.identifier.as_deref(), Some("a@b.com"));
        assert_eq!(snapshot.total, 3);
        assert_eq!(snapshot.current_index, Some(1));
        assert_eq!(snapshot.selected.as_deref(), Some("right-1"));
        assert_eq!(snapshot.attempted, 1);
        assert_eq!(snapshot.score, 1);
        assert_eq!(snapshot.remaining_secs, DEFAULT_DURATION_SECS - 1);
        assert_eq!(snapshot.display_options, session.display_options());
    }
}
