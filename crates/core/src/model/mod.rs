mod identifier;
mod question;
mod report;

pub use identifier::{Identifier, IdentifierError};
pub use question::{Difficulty, Question, QuestionError};
pub use report::{AnswerRecord, FinishReason, QuizReport, ReportEntry};
