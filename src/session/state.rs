//! Quiz lifecycle state machine.

use std::collections::HashMap;
use std::fmt;

use rand::Rng;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{Category, Difficulty, QuestionCount, QuestionId, QuestionRecord, QuizConfiguration};
use crate::presenter::DisplayOrders;
use crate::trivia::FetchError;

/// Lifecycle phase of a quiz session. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Editing options before a round.
    #[default]
    Configuring,
    /// Waiting out the rate limit or for the fetch to finish.
    Loading,
    /// Answering questions.
    InProgress,
    /// Showing results for the round.
    Graded,
    /// The last fetch failed.
    Errored,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Configuring => "configuring",
            SessionState::Loading => "loading",
            SessionState::InProgress => "in progress",
            SessionState::Graded => "graded",
            SessionState::Errored => "errored",
        };
        f.write_str(name)
    }
}

/// Actions rejected by the state machine. State is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("questions are already being fetched")]
    FetchPending,
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: SessionState,
    },
    #[error("question {0} is not part of this round")]
    UnknownQuestion(QuestionId),
}

/// Count questions whose recorded answer equals the correct answer exactly.
///
/// Unanswered questions count as wrong, and entries for ids not in
/// `questions` are ignored.
pub fn grade_quiz(questions: &[QuestionRecord], answers: &HashMap<QuestionId, String>) -> usize {
    questions
        .iter()
        .filter(|question| {
            answers
                .get(&question.id())
                .is_some_and(|answer| question.is_correct(answer))
        })
        .count()
}

/// State owned by one quiz session, across however many rounds are played.
#[derive(Debug, Default)]
pub struct QuizSession {
    state: SessionState,
    config: QuizConfiguration,
    questions: Vec<QuestionRecord>,
    answers: HashMap<QuestionId, String>,
    display_orders: DisplayOrders,
    score: Option<usize>,
    error: Option<String>,
}

impl QuizSession {
    pub fn new(config: QuizConfiguration) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &QuizConfiguration {
        &self.config
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    pub fn answers(&self) -> &HashMap<QuestionId, String> {
        &self.answers
    }

    pub fn answer_for(&self, id: QuestionId) -> Option<&str> {
        self.answers.get(&id).map(String::as_str)
    }

    /// Options for `id` in the order they are shown.
    pub fn display_order(&self, id: QuestionId) -> Option<&[String]> {
        self.display_orders.get(id)
    }

    /// Score of the graded round; `None` outside [`SessionState::Graded`].
    pub fn score(&self) -> Option<usize> {
        self.score
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_category(&mut self, category: Category) -> Result<(), SessionError> {
        self.edit_config("change the category", |config| config.category = category)
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), SessionError> {
        self.edit_config("change the difficulty", |config| config.difficulty = difficulty)
    }

    pub fn set_question_count(&mut self, count: QuestionCount) -> Result<(), SessionError> {
        self.edit_config("change the question count", |config| config.question_count = count)
    }

    fn edit_config(
        &mut self,
        action: &'static str,
        edit: impl FnOnce(&mut QuizConfiguration),
    ) -> Result<(), SessionError> {
        self.expect_state(SessionState::Configuring, action)?;
        edit(&mut self.config);
        Ok(())
    }

    /// Begin the first round with the current options.
    ///
    /// Moves to [`SessionState::Loading`] right away and returns the
    /// configuration the caller should fetch with.
    pub fn start_quiz(&mut self) -> Result<QuizConfiguration, SessionError> {
        self.guard_pending()?;
        self.expect_state(SessionState::Configuring, "start a quiz")?;
        self.begin_loading();
        Ok(self.config)
    }

    /// Begin another round with unchanged options.
    pub fn play_again(&mut self) -> Result<QuizConfiguration, SessionError> {
        self.guard_pending()?;
        self.expect_state(SessionState::Graded, "play again")?;
        self.begin_loading();
        Ok(self.config)
    }

    /// Apply the outcome of the fetch started by `start_quiz` or `play_again`.
    ///
    /// On success the questions replace the previous round wholesale and
    /// every question gets its display order. On failure, or when no
    /// questions came back, the session holds the error message and no
    /// questions.
    pub fn finish_loading<R: Rng>(
        &mut self,
        result: Result<Vec<QuestionRecord>, FetchError>,
        rng: &mut R,
    ) -> Result<(), SessionError> {
        self.expect_state(SessionState::Loading, "accept questions")?;

        let result = result.and_then(|questions| {
            if questions.is_empty() {
                Err(FetchError::EmptyResultSet)
            } else {
                Ok(questions)
            }
        });

        match result {
            Ok(questions) => {
                self.answers.clear();
                self.score = None;
                self.display_orders.clear();
                for question in &questions {
                    self.display_orders.mount(question, rng);
                }
                info!(count = questions.len(), "Round started");
                self.questions = questions;
                self.state = SessionState::InProgress;
            }
            Err(e) => {
                warn!(error = %e, "Round could not start");
                self.clear_round();
                self.error = Some(e.to_string());
                self.state = SessionState::Errored;
            }
        }

        Ok(())
    }

    /// Record the selected answer for a question; the last selection wins.
    ///
    /// The answer text is not checked against the question's options.
    pub fn record_answer(
        &mut self,
        question_id: QuestionId,
        answer: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.expect_state(SessionState::InProgress, "record an answer")?;
        if !self.questions.iter().any(|q| q.id() == question_id) {
            return Err(SessionError::UnknownQuestion(question_id));
        }
        self.answers.insert(question_id, answer.into());
        Ok(())
    }

    /// Grade the round and return the score.
    pub fn submit(&mut self) -> Result<usize, SessionError> {
        self.expect_state(SessionState::InProgress, "submit")?;
        let score = grade_quiz(&self.questions, &self.answers);
        info!(score, total = self.questions.len(), "Round graded");
        self.score = Some(score);
        self.state = SessionState::Graded;
        Ok(score)
    }

    /// Leave the graded round and return to editing options.
    pub fn change_options(&mut self) -> Result<(), SessionError> {
        self.expect_state(SessionState::Graded, "change options")?;
        self.clear_round();
        self.state = SessionState::Configuring;
        Ok(())
    }

    /// Dismiss a fetch error and return to editing options.
    pub fn acknowledge_error(&mut self) -> Result<(), SessionError> {
        self.expect_state(SessionState::Errored, "dismiss an error")?;
        self.error = None;
        self.state = SessionState::Configuring;
        Ok(())
    }

    fn begin_loading(&mut self) {
        self.score = None;
        self.error = None;
        self.state = SessionState::Loading;
        info!(
            category = self.config.category.label(),
            difficulty = self.config.difficulty.as_str(),
            count = self.config.question_count.get(),
            "Loading questions"
        );
    }

    fn clear_round(&mut self) {
        self.questions.clear();
        self.answers.clear();
        self.display_orders.clear();
        self.score = None;
    }

    fn guard_pending(&self) -> Result<(), SessionError> {
        if self.state == SessionState::Loading {
            warn!("Ignoring fetch request while loading");
            return Err(SessionError::FetchPending);
        }
        Ok(())
    }

    fn expect_state(&self, expected: SessionState, action: &'static str) -> Result<(), SessionError> {
        if self.state != expected {
            warn!(action, state = %self.state, "Rejected action");
            return Err(SessionError::InvalidTransition {
                action,
                state: self.state,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn question(correct: &str) -> QuestionRecord {
        QuestionRecord::new(
            format!("Question for {}?", correct),
            correct,
            vec!["W1".to_string(), "W2".to_string(), "W3".to_string()],
        )
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn in_progress(questions: Vec<QuestionRecord>) -> QuizSession {
        let mut session = QuizSession::default();
        session.start_quiz().unwrap();
        session.finish_loading(Ok(questions), &mut rng()).unwrap();
        session
    }

    #[test]
    fn test_grade_counts_exact_matches() {
        let questions: Vec<_> = ["a", "b", "c", "d"].iter().map(|c| question(c)).collect();
        let mut answers = HashMap::new();
        answers.insert(questions[0].id(), "a".to_string());
        answers.insert(questions[1].id(), "B".to_string());
        answers.insert(questions[2].id(), "c".to_string());
        answers.insert(QuestionId::new(), "d".to_string());

        assert_eq!(grade_quiz(&questions, &answers), 2);
        assert_eq!(grade_quiz(&questions, &answers), 2);
        assert_eq!(grade_quiz(&questions, &HashMap::new()), 0);
    }

    #[test]
    fn test_start_moves_to_loading() {
        let mut session = QuizSession::default();
        let config = session.start_quiz().unwrap();
        assert_eq!(config, QuizConfiguration::default());
        assert_eq!(session.state(), SessionState::Loading);
    }

    #[test]
    fn test_double_start_is_rejected() {
        let mut session = QuizSession::default();
        session.start_quiz().unwrap();
        assert_eq!(session.start_quiz(), Err(SessionError::FetchPending));
        assert_eq!(session.play_again(), Err(SessionError::FetchPending));
        assert_eq!(session.state(), SessionState::Loading);
    }

    #[test]
    fn test_options_only_change_while_configuring() {
        let mut session = QuizSession::default();
        session.set_category(Category::Animals).unwrap();
        session.set_difficulty(Difficulty::Hard).unwrap();
        session.set_question_count(QuestionCount::new(10).unwrap()).unwrap();
        assert_eq!(session.config().category, Category::Animals);
        assert_eq!(session.state(), SessionState::Configuring);

        session.start_quiz().unwrap();
        assert!(matches!(
            session.set_category(Category::Books),
            Err(SessionError::InvalidTransition { .. })
        ));
        assert_eq!(session.config().category, Category::Animals);
    }

    #[test]
    fn test_success_installs_round() {
        let questions = vec![question("x"), question("y")];
        let session = in_progress(questions.clone());

        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.questions(), questions.as_slice());
        assert!(session.answers().is_empty());
        assert_eq!(session.score(), None);
        for q in &questions {
            let order = session.display_order(q.id()).unwrap();
            assert_eq!(order.len(), 4);
            assert_eq!(order.iter().filter(|a| *a == q.correct_answer()).count(), 1);
        }
    }

    #[test]
    fn test_failure_moves_to_errored() {
        let mut session = QuizSession::default();
        session.start_quiz().unwrap();
        session
            .finish_loading(Err(FetchError::EmptyResultSet), &mut rng())
            .unwrap();

        assert_eq!(session.state(), SessionState::Errored);
        assert!(session.questions().is_empty());
        assert!(!session.error().unwrap().is_empty());

        session.acknowledge_error().unwrap();
        assert_eq!(session.state(), SessionState::Configuring);
        assert_eq!(session.error(), None);
    }

    #[test]
    fn test_empty_round_is_an_error() {
        let mut session = QuizSession::default();
        session.start_quiz().unwrap();
        session.finish_loading(Ok(Vec::new()), &mut rng()).unwrap();

        assert_eq!(session.state(), SessionState::Errored);
        assert_eq!(
            session.error(),
            Some(FetchError::EmptyResultSet.to_string().as_str())
        );
        assert!(session.questions().is_empty());
        assert!(session.submit().is_err());
    }

    #[test]
    fn test_stale_result_is_rejected() {
        let mut session = QuizSession::default();
        let result = session.finish_loading(Ok(vec![question("x")]), &mut rng());
        assert!(matches!(result, Err(SessionError::InvalidTransition { .. })));
        assert!(session.questions().is_empty());
    }

    #[test]
    fn test_record_answer_last_write_wins() {
        let q = question("right");
        let id = q.id();
        let mut session = in_progress(vec![q]);

        session.record_answer(id, "W1").unwrap();
        session.record_answer(id, "right").unwrap();
        assert_eq!(session.answer_for(id), Some("right"));
        assert_eq!(session.answers().len(), 1);

        let stranger = QuestionId::new();
        assert_eq!(
            session.record_answer(stranger, "right"),
            Err(SessionError::UnknownQuestion(stranger))
        );
    }

    #[test]
    fn test_submit_and_leave() {
        let q = question("right");
        let id = q.id();
        let mut session = in_progress(vec![q, question("other")]);
        session.record_answer(id, "right").unwrap();

        assert_eq!(session.submit(), Ok(1));
        assert_eq!(session.state(), SessionState::Graded);
        assert_eq!(session.score(), Some(1));
        assert!(session.record_answer(id, "W1").is_err());

        session.change_options().unwrap();
        assert_eq!(session.state(), SessionState::Configuring);
        assert!(session.questions().is_empty());
        assert!(session.answers().is_empty());
        assert_eq!(session.score(), None);
        assert_eq!(session.display_order(id), None);
    }

    #[test]
    fn test_play_again_resets_round() {
        let q = question("right");
        let id = q.id();
        let mut session = in_progress(vec![q]);
        session.record_answer(id, "right").unwrap();
        session.submit().unwrap();

        let config = session.play_again().unwrap();
        assert_eq!(config, *session.config());
        assert_eq!(session.state(), SessionState::Loading);
        assert_eq!(session.score(), None);

        session
            .finish_loading(Ok(vec![question("new")]), &mut rng())
            .unwrap();
        assert!(session.answers().is_empty());
        assert_eq!(session.score(), None);
        assert_eq!(session.display_order(id), None);
    }

    #[test]
    fn test_wrong_state_actions_leave_state() {
        let mut session = QuizSession::default();
        assert!(session.submit().is_err());
        assert!(session.play_again().is_err());
        assert!(session.change_options().is_err());
        assert!(session.acknowledge_error().is_err());
        assert_eq!(session.state(), SessionState::Configuring);
    }
}
