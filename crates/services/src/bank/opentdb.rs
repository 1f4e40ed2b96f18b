use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use quiz_core::model::{Difficulty, Question};

use super::QuestionBank;
use crate::config::QuizConfig;
use crate::error::FetchError;

/// Public Open Trivia Database endpoint.
pub const OPENTDB_URL: &str = "https://opentdb.com/api.php";

/// Question bank backed by the Open Trivia Database HTTP API.
///
/// Requests `amount` multiple-choice questions per fetch. Text comes back
/// HTML-encoded and is passed through untouched.
#[derive(Clone, Debug)]
pub struct OpenTdbQuestionBank {
    client: Client,
    base_url: String,
    amount: u32,
}

impl OpenTdbQuestionBank {
    #[must_use]
    pub fn new(base_url: impl Into<String>, amount: u32) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            amount,
        }
    }

    #[must_use]
    pub fn from_config(config: &QuizConfig) -> Self {
        Self::new(config.bank_url.clone(), config.question_count)
    }
}

#[async_trait]
impl QuestionBank for OpenTdbQuestionBank {
    async fn fetch_questions(&self) -> Result<Vec<Question>, FetchError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("amount", self.amount.to_string()), ("type", "multiple".into())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status()));
        }

        let body: OpenTdbResponse = response.json().await?;
        map_response(body)
    }
}

#[derive(Debug, Deserialize)]
struct OpenTdbResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<OpenTdbQuestion>,
}

#[derive(Debug, Deserialize)]
struct OpenTdbQuestion {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
}

fn map_response(body: OpenTdbResponse) -> Result<Vec<Question>, FetchError> {
    if body.response_code != 0 {
        return Err(FetchError::Api {
            code: body.response_code,
            message: describe_response_code(body.response_code),
        });
    }

    body.results
        .into_iter()
        .enumerate()
        .map(|(position, raw)| {
            let mut question = Question::new(raw.question, raw.correct_answer, raw.incorrect_answers)
                .map_err(|err| FetchError::Malformed(format!("result #{position}: {err}")))?;
            if let Some(category) = raw.category {
                question = question.with_category(category);
            }
            if let Some(difficulty) = raw.difficulty.as_deref().and_then(Difficulty::parse) {
                question = question.with_difficulty(difficulty);
            }
            Ok(question)
        })
        .collect()
}

fn describe_response_code(code: u8) -> &'static str {
    match code {
        1 => "not enough questions for the query",
        2 => "invalid parameter",
        3 => "session token not found",
        4 => "session token exhausted",
        5 => "rate limited",
        _ => "unknown response code",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Vec<Question>, FetchError> {
        let body: OpenTdbResponse = serde_json::from_str(json).expect("payload should decode");
        map_response(body)
    }

    #[test]
    fn maps_results_onto_questions() {
        let questions = parse(
            r#"{
                "response_code": 0,
                "results": [
                    {
                        "type": "multiple",
                        "difficulty": "easy",
                        "category": "Science &amp; Nature",
                        "question": "What is the chemical symbol for &quot;gold&quot;?",
                        "correct_answer": "Au",
                        "incorrect_answers": ["Ag", "Gd", "Go"]
                    },
                    {
                        "question": "2 + 2?",
                        "correct_answer": "4",
                        "incorrect_answers": ["3", "5", "22"]
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(questions.len(), 2);
        let gold = &questions[0];
        assert_eq!(gold.prompt(), "What is the chemical symbol for &quot;gold&quot;?");
        assert_eq!(gold.correct_answer(), "Au");
        assert_eq!(gold.incorrect_answers(), ["Ag", "Gd", "Go"]);
        assert_eq!(gold.category(), Some("Science &amp; Nature"));
        assert_eq!(gold.difficulty(), Some(Difficulty::Easy));
        assert_eq!(questions[1].difficulty(), None);
    }

    #[test]
    fn non_zero_response_code_is_an_api_error() {
        let err = parse(r#"{"response_code": 5, "results": []}"#).unwrap_err();
        assert!(matches!(
            err,
            FetchError::Api {
                code: 5,
                message: "rate limited"
            }
        ));
    }

    #[test]
    fn repeated_correct_answer_is_malformed() {
        let err = parse(
            r#"{"response_code": 0, "results": [
                {"question": "Q", "correct_answer": "A", "incorrect_answers": ["B", "A"]}
            ]}"#,
        )
        .unwrap_err();
        match err {
            FetchError::Malformed(message) => assert!(message.starts_with("result #0")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_results_map_to_an_empty_list() {
        assert!(parse(r#"{"response_code": 0, "results": []}"#).unwrap().is_empty());
    }
}
