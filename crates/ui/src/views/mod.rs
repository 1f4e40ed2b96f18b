mod loading;
mod quiz;
mod quiz_page;
mod report;
mod start;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use loading::LoadingView;
pub use quiz::QuizView;
pub use quiz_page::QuizPage;
pub use report::ReportView;
pub use start::StartView;
pub use state::{ViewError, report_dispatch};
