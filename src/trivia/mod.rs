//! Question retrieval from the Open Trivia DB.
//!
//! [`OpenTdbClient`] performs the HTTP call and normalizes the response,
//! [`RateLimitedFetcher`] gates any [`QuestionSource`] behind the minimum
//! spacing the service tolerates.

mod client;
mod decode;
mod error;
mod rate_limit;

use async_trait::async_trait;

use crate::models::{QuestionRecord, QuizConfiguration};

pub use client::{OpenTdbClient, DEFAULT_ENDPOINT};
pub use decode::decode_entities;
pub use error::{FetchError, ResponseCode};
pub use rate_limit::{compute_wait, RateLimitedFetcher, MIN_CALL_SPACING};

/// Anything that can produce a round of questions.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn fetch_questions(
        &self,
        config: &QuizConfiguration,
    ) -> Result<Vec<QuestionRecord>, FetchError>;
}
