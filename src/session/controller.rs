use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::models::QuizConfiguration;
use crate::trivia::RateLimitedFetcher;

use super::{QuizSession, SessionError};

/// Session state shared between the UI loop and fetch tasks.
pub type SharedSession = Arc<Mutex<QuizSession>>;

/// Drives rounds: moves the session to loading and runs the fetch in a task.
#[derive(Clone)]
pub struct SessionController {
    session: SharedSession,
    fetcher: Arc<RateLimitedFetcher>,
}

impl SessionController {
    pub fn new(session: QuizSession, fetcher: Arc<RateLimitedFetcher>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            fetcher,
        }
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub fn fetcher(&self) -> &Arc<RateLimitedFetcher> {
        &self.fetcher
    }

    /// Start the first round. The session is `Loading` when this returns.
    pub async fn start_quiz(&self) -> Result<JoinHandle<()>, SessionError> {
        let config = self.session.lock().await.start_quiz()?;
        Ok(self.spawn_fetch(config))
    }

    /// Start another round after grading.
    pub async fn play_again(&self) -> Result<JoinHandle<()>, SessionError> {
        let config = self.session.lock().await.play_again()?;
        Ok(self.spawn_fetch(config))
    }

    fn spawn_fetch(&self, config: QuizConfiguration) -> JoinHandle<()> {
        let session = Arc::clone(&self.session);
        let fetcher = Arc::clone(&self.fetcher);

        tokio::spawn(async move {
            let result = fetcher.fetch_questions(&config).await;
            let mut session = session.lock().await;
            let mut rng = rand::rng();
            if let Err(e) = session.finish_loading(result, &mut rng) {
                debug!(error = %e, "Discarding fetch result");
            }
        })
    }
}
