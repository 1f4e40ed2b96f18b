use quiz_core::model::{AnswerRecord, FinishReason, QuizReport, ReportEntry};
use quiz_core::session::{QuizSnapshot, VisitState, format_clock};

use crate::vm::markup::sanitize_html;
use crate::vm::time_fmt::{format_datetime, format_elapsed};

//
// ─── ACTIVE QUIZ ───────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    /// Raw option text, sent back to the runner when picked.
    pub value: String,
    pub html: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteItemVm {
    pub index: usize,
    pub number: usize,
    pub state: VisitState,
    pub current: bool,
}

impl PaletteItemVm {
    #[must_use]
    pub fn class(&self) -> String {
        let base = palette_class(self.state);
        if self.current {
            format!("{base} palette-item--current")
        } else {
            base.to_string()
        }
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!("Question {}", self.number)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub heading: String,
    pub prompt_html: String,
    pub category: Option<String>,
    pub difficulty: Option<&'static str>,
    pub options: Vec<OptionVm>,
    pub palette: Vec<PaletteItemVm>,
    pub time_left: String,
    pub answered_label: String,
    pub can_previous: bool,
    pub can_next: bool,
}

#[must_use]
pub fn palette_class(state: VisitState) -> &'static str {
    match state {
        VisitState::NotViewed => "palette-item palette-item--not-viewed",
        VisitState::Viewed => "palette-item palette-item--viewed",
        VisitState::Attempted => "palette-item palette-item--attempted",
    }
}

/// Legend entries for the question palette as `(label, class)`, in display order.
#[must_use]
pub fn palette_legend() -> [(&'static str, &'static str); 3] {
    [VisitState::NotViewed, VisitState::Viewed, VisitState::Attempted]
        .map(|state| (state.label(), palette_class(state)))
}

/// `None` unless the snapshot has a current question.
#[must_use]
pub fn map_quiz(snapshot: &QuizSnapshot) -> Option<QuizVm> {
    let index = snapshot.current_index?;
    let question = snapshot.current_question.as_ref()?;

    let options = snapshot
        .display_options
        .iter()
        .map(|option| OptionVm {
            value: option.clone(),
            html: sanitize_html(option),
            selected: snapshot.selected.as_deref() == Some(option.as_str()),
        })
        .collect();

    let palette = snapshot
        .visit_states
        .iter()
        .enumerate()
        .map(|(i, state)| PaletteItemVm {
            index: i,
            number: i + 1,
            state: *state,
            current: i == index,
        })
        .collect();

    Some(QuizVm {
        heading: format!("Q{}", index + 1),
        prompt_html: sanitize_html(question.prompt()),
        category: question.category().map(sanitize_html),
        difficulty: question.difficulty().map(|difficulty| difficulty.label()),
        options,
        palette,
        time_left: format_clock(snapshot.remaining_secs),
        answered_label: format!("{} / {}", snapshot.attempted, snapshot.total),
        can_previous: index > 0,
        can_next: index + 1 < snapshot.total,
    })
}

//
// ─── REPORT ────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportRowVm {
    pub heading: String,
    pub prompt_html: String,
    pub given_html: String,
    pub correct_html: String,
    pub is_correct: bool,
}

impl ReportRowVm {
    #[must_use]
    pub fn given_class(&self) -> &'static str {
        if self.is_correct {
            "report-answer report-answer--correct"
        } else {
            "report-answer report-answer--wrong"
        }
    }
}

impl From<&ReportEntry> for ReportRowVm {
    fn from(entry: &ReportEntry) -> Self {
        let given_html = match &entry.given {
            AnswerRecord::Answered(option) => sanitize_html(option),
            AnswerRecord::Unanswered => "Not Answered".to_string(),
        };
        Self {
            heading: format!("Q{}:", entry.index + 1),
            prompt_html: sanitize_html(entry.question.prompt()),
            given_html,
            correct_html: sanitize_html(entry.correct_answer()),
            is_correct: entry.is_correct,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportVm {
    pub score_label: String,
    pub reason: &'static str,
    pub timed_out: bool,
    pub unanswered_label: Option<String>,
    pub finished_at: Option<String>,
    pub elapsed: Option<String>,
    pub rows: Vec<ReportRowVm>,
}

impl From<&QuizReport> for ReportVm {
    fn from(report: &QuizReport) -> Self {
        let unanswered = report.unanswered();
        Self {
            score_label: format!("{} / {}", report.score, report.total),
            reason: report.finish_reason.label(),
            timed_out: report.finish_reason == FinishReason::TimedOut,
            unanswered_label: (unanswered > 0).then(|| format!("{unanswered} not answered")),
            finished_at: report.finished_at.map(format_datetime),
            elapsed: report.elapsed().map(format_elapsed),
            rows: report.entries.iter().map(ReportRowVm::from).collect(),
        }
    }
}

#[must_use]
pub fn map_report(report: &QuizReport) -> ReportVm {
    ReportVm::from(report)
}
