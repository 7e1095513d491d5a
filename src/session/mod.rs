//! Quiz session: lifecycle state plus the async fetch orchestration.

mod controller;
mod state;

pub use controller::{SessionController, SharedSession};
pub use state::{grade_quiz, QuizSession, SessionError, SessionState};
