//! Minimum-interval gate in front of the trivia service.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::models::{QuestionRecord, QuizConfiguration};

use super::{FetchError, QuestionSource};

/// Spacing guaranteed between two successive calls.
pub const MIN_CALL_SPACING: Duration = Duration::from_millis(5001);

const FREE_AFTER: Duration = Duration::from_millis(5000);

/// Delay needed before the next call may start.
///
/// Zero if there was no previous call or more than five seconds have
/// elapsed, otherwise the remainder of [`MIN_CALL_SPACING`].
pub fn compute_wait(last_call: Option<Instant>, now: Instant) -> Duration {
    let Some(last_call) = last_call else {
        return Duration::ZERO;
    };

    let elapsed = now.saturating_duration_since(last_call);
    if elapsed > FREE_AFTER {
        Duration::ZERO
    } else {
        MIN_CALL_SPACING - elapsed
    }
}

/// Wraps a [`QuestionSource`] so calls start at least [`MIN_CALL_SPACING`] apart.
///
/// The timestamp is recorded when a call is initiated, before its outcome
/// is known, so failed calls consume the window too. The lock is held across
/// the wait, which serializes concurrent callers.
pub struct RateLimitedFetcher {
    source: Arc<dyn QuestionSource>,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimitedFetcher {
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self {
            source,
            last_call: Mutex::new(None),
        }
    }

    /// How long a fetch started now would wait before hitting the service.
    pub async fn pending_wait(&self) -> Duration {
        let last_call = self.last_call.lock().await;
        compute_wait(*last_call, Instant::now())
    }

    /// Wait out the rate-limit window, then fetch a round of questions.
    pub async fn fetch_questions(
        &self,
        config: &QuizConfiguration,
    ) -> Result<Vec<QuestionRecord>, FetchError> {
        {
            let mut last_call = self.last_call.lock().await;
            let wait = compute_wait(*last_call, Instant::now());
            if !wait.is_zero() {
                debug!(wait_ms = wait.as_millis() as u64, "Delaying fetch for rate limit");
                sleep(wait).await;
            }
            *last_call = Some(Instant::now());
        }

        info!(
            category = config.category.id(),
            difficulty = config.difficulty.as_str(),
            amount = config.question_count.get(),
            "Fetching questions"
        );

        match self.source.fetch_questions(config).await {
            Ok(questions) => {
                info!(count = questions.len(), "Fetched questions");
                Ok(questions)
            }
            Err(e) => {
                warn!(error = %e, "Fetch failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_no_previous_call_means_no_wait() {
        assert_eq!(compute_wait(None, Instant::now()), Duration::ZERO);
    }

    #[test]
    fn test_wait_after_elapsed() {
        let last = Instant::now();
        assert_eq!(compute_wait(Some(last), last + ms(6000)), Duration::ZERO);
        assert_eq!(compute_wait(Some(last), last + ms(2000)), ms(3001));
        assert_eq!(compute_wait(Some(last), last + ms(5000)), ms(1));
        assert_eq!(compute_wait(Some(last), last + ms(5001)), Duration::ZERO);
        assert_eq!(compute_wait(Some(last), last), ms(5001));
    }

    #[test]
    fn test_wait_is_non_increasing() {
        let last = Instant::now();
        let mut previous = compute_wait(Some(last), last);
        for elapsed in (0..=5000).step_by(250) {
            let wait = compute_wait(Some(last), last + ms(elapsed));
            assert!(wait <= previous);
            previous = wait;
        }
    }
}
