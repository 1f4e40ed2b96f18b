use rand::rng;
use rand::seq::SliceRandom;

use crate::model::Question;

/// Produces the display order of a question's answer options.
///
/// Implementations return a permutation of `question.options()`. The session
/// calls this once per index change and caches the result, so an
/// implementation may return a different order on every call.
pub trait OptionShuffler: Send {
    fn shuffle(&mut self, question: &Question) -> Vec<String>;
}

/// Uniform shuffle backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomShuffler;

impl OptionShuffler for RandomShuffler {
    fn shuffle(&mut self, question: &Question) -> Vec<String> {
        let mut options = question.options();
        let mut rng = rng();
        options.as_mut_slice().shuffle(&mut rng);
        options
    }
}

/// Keeps source order: incorrect answers first, correct answer last.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityShuffler;

impl OptionShuffler for IdentityShuffler {
    fn shuffle(&mut self, question: &Question) -> Vec<String> {
        question.options()
    }
}

/// Correct answer first, then the incorrect answers in reverse.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReverseShuffler;

impl OptionShuffler for ReverseShuffler {
    fn shuffle(&mut self, question: &Question) -> Vec<String> {
        let mut options = question.options();
        options.reverse();
        options
    }
}
