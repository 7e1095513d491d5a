use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::models::{QuestionKind, QuestionRecord, QuizConfiguration};

use super::{decode_entities, FetchError, QuestionSource, ResponseCode};

/// Public Open Trivia DB endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://opentdb.com/api.php";

/// HTTP client for the Open Trivia DB question API.
#[derive(Clone)]
pub struct OpenTdbClient {
    http: Client,
    endpoint: String,
}

impl OpenTdbClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for OpenTdbClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[async_trait]
impl QuestionSource for OpenTdbClient {
    async fn fetch_questions(
        &self,
        config: &QuizConfiguration,
    ) -> Result<Vec<QuestionRecord>, FetchError> {
        debug!(endpoint = %self.endpoint, "GET questions");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&config.query_pairs())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status()));
        }

        let body: ApiResponse = response.json().await?;
        into_records(body)
    }
}

/// Validate a response body and turn it into decoded question records.
fn into_records(body: ApiResponse) -> Result<Vec<QuestionRecord>, FetchError> {
    if let Some(code) = ResponseCode::from_code(body.response_code) {
        return Err(FetchError::Api(code));
    }

    let results = body.results.unwrap_or_default();
    if results.is_empty() {
        return Err(FetchError::EmptyResultSet);
    }

    results
        .into_iter()
        .enumerate()
        .map(|(index, raw)| raw.into_record(index))
        .collect()
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    response_code: u8,
    #[serde(default)]
    results: Option<Vec<ApiQuestion>>,
}

#[derive(Debug, Deserialize)]
struct ApiQuestion {
    #[serde(rename = "type", default)]
    kind: QuestionKind,
    question: Option<String>,
    correct_answer: Option<String>,
    #[serde(default)]
    incorrect_answers: Vec<String>,
}

impl ApiQuestion {
    fn into_record(self, index: usize) -> Result<QuestionRecord, FetchError> {
        let question = self
            .question
            .ok_or(FetchError::MalformedQuestion { index, field: "question" })?;
        let correct_answer = self
            .correct_answer
            .ok_or(FetchError::MalformedQuestion { index, field: "correct_answer" })?;

        let incorrect_answers = self
            .incorrect_answers
            .iter()
            .map(|answer| decode_entities(answer))
            .collect();

        Ok(QuestionRecord::new(
            decode_entities(&question),
            decode_entities(&correct_answer),
            incorrect_answers,
        )
        .with_kind(self.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Vec<QuestionRecord>, FetchError> {
        let body: ApiResponse = serde_json::from_str(json).unwrap();
        into_records(body)
    }

    #[test]
    fn test_records_are_decoded() {
        let records = parse(
            r#"{
                "response_code": 0,
                "results": [{
                    "type": "multiple",
                    "difficulty": "easy",
                    "category": "General Knowledge",
                    "question": "Who&#039;s &quot;the&quot; boss?",
                    "correct_answer": "Tony &amp; Angela",
                    "incorrect_answers": ["Pok&eacute;mon", "B", "C"]
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        let q = &records[0];
        assert_eq!(q.question(), "Who's \"the\" boss?");
        assert_eq!(q.correct_answer(), "Tony & Angela");
        assert_eq!(q.incorrect_answers(), ["Pokémon", "B", "C"]);
        assert_eq!(q.kind(), QuestionKind::Multiple);
    }

    #[test]
    fn test_boolean_kind() {
        let records = parse(
            r#"{"response_code":0,"results":[{"type":"boolean","question":"Q","correct_answer":"True","incorrect_answers":["False"]}]}"#,
        )
        .unwrap();
        assert_eq!(records[0].kind(), QuestionKind::Boolean);
    }

    #[test]
    fn test_missing_or_empty_results() {
        assert!(matches!(parse(r#"{"response_code":0}"#), Err(FetchError::EmptyResultSet)));
        assert!(matches!(
            parse(r#"{"response_code":0,"results":[]}"#),
            Err(FetchError::EmptyResultSet)
        ));
    }

    #[test]
    fn test_nonzero_response_code() {
        let err = parse(r#"{"response_code":5,"results":[]}"#).unwrap_err();
        assert!(matches!(err, FetchError::Api(ResponseCode::RateLimited)));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let err = parse(
            r#"{"response_code":0,"results":[{"question":"Q","incorrect_answers":[]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FetchError::MalformedQuestion { index: 0, field: "correct_answer" }
        ));
    }
}
