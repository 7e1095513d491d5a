//! # trivia-quiz
//!
//! A terminal trivia quiz backed by the Open Trivia DB.
//!
//! The library owns the quiz session state machine ([`QuizSession`]), the
//! rate-limited question fetcher ([`RateLimitedFetcher`]) and the answer
//! ordering used when questions are shown ([`build_display_order`]).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use trivia_quiz::{Quiz, QuizConfiguration, QuizError, DEFAULT_ENDPOINT};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let quiz = Quiz::with_endpoint(QuizConfiguration::default(), DEFAULT_ENDPOINT);
//!     quiz.run().await
//! }
//! ```

mod app;
pub mod logging;
mod models;
mod presenter;
mod session;
pub mod terminal;
pub mod trivia;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use thiserror::Error;
use tracing::info;

pub use app::{App, ConfigField};
pub use models::{
    Category, Difficulty, QuestionCount, QuestionId, QuestionKind, QuestionRecord,
    QuizConfiguration,
};
pub use presenter::{build_display_order, DisplayOrders};
pub use session::{
    grade_quiz, QuizSession, SessionController, SessionError, SessionState, SharedSession,
};
pub use trivia::{
    compute_wait, decode_entities, FetchError, OpenTdbClient, QuestionSource, RateLimitedFetcher,
    DEFAULT_ENDPOINT,
};

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Error type for running the quiz.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to set up logging: {0}")]
    Logging(String),
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a quiz that fetches rounds from `source`.
    pub fn new(config: QuizConfiguration, source: Arc<dyn QuestionSource>) -> Self {
        let fetcher = Arc::new(RateLimitedFetcher::new(source));
        let controller = SessionController::new(QuizSession::new(config), fetcher);
        Self {
            app: App::new(controller),
        }
    }

    /// Create a quiz that talks to the Open Trivia DB at `endpoint`.
    pub fn with_endpoint(config: QuizConfiguration, endpoint: impl Into<String>) -> Self {
        Self::new(config, Arc::new(OpenTdbClient::new(endpoint)))
    }

    /// Run the quiz in the terminal.
    ///
    /// This takes over the terminal, displays the quiz UI, and returns
    /// when the user quits.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut guard = terminal::TerminalGuard::init()?;
        info!("Quiz started");
        let result = run_event_loop(guard.terminal(), &mut self.app).await;
        info!("Quiz closed");
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

async fn run_event_loop(terminal: &mut terminal::QuizTerminal, app: &mut App) -> Result<(), QuizError> {
    while !app.should_quit() {
        {
            let view: &App = app;
            let session = view.controller().session().lock().await;
            terminal.draw(|frame| ui::render(frame, view, &session))?;
        }

        if !event::poll(INPUT_POLL_INTERVAL)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key.code).await;
        }
    }

    Ok(())
}
