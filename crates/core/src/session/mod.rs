mod answers;
mod countdown;
mod navigation;
mod quiz;
mod snapshot;
mod state;

pub use answers::AnswerTracker;
pub use countdown::{Countdown, DEFAULT_DURATION_SECS, Tick, format_clock};
pub use navigation::NavigationTracker;
pub use quiz::QuizSession;
pub use snapshot::QuizSnapshot;
pub use state::{Phase, VisitState};
