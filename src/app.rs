use crossterm::event::KeyCode;
use tokio::time::Instant;
use tracing::debug;

use crate::models::QuestionId;
use crate::session::{QuizSession, SessionController, SessionError, SessionState};

/// Field focused on the configuration screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigField {
    #[default]
    Category,
    Difficulty,
    Count,
}

impl ConfigField {
    pub const ALL: [ConfigField; 3] = [ConfigField::Category, ConfigField::Difficulty, ConfigField::Count];

    fn next(self) -> Self {
        match self {
            ConfigField::Category => ConfigField::Difficulty,
            ConfigField::Difficulty => ConfigField::Count,
            ConfigField::Count => ConfigField::Category,
        }
    }

    fn previous(self) -> Self {
        match self {
            ConfigField::Category => ConfigField::Count,
            ConfigField::Difficulty => ConfigField::Category,
            ConfigField::Count => ConfigField::Difficulty,
        }
    }
}

/// Terminal view state layered over the shared quiz session.
pub struct App {
    controller: SessionController,
    config_field: ConfigField,
    current_question: usize,
    selected_option: usize,
    result_scroll: usize,
    request_ready_at: Option<Instant>,
    notice: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(controller: SessionController) -> Self {
        Self {
            controller,
            config_field: ConfigField::default(),
            current_question: 0,
            selected_option: 0,
            result_scroll: 0,
            request_ready_at: None,
            notice: None,
            should_quit: false,
        }
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub fn config_field(&self) -> ConfigField {
        self.config_field
    }

    pub fn current_question(&self) -> usize {
        self.current_question
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    /// Message about the last rejected action, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Time left before the pending request may hit the service.
    pub fn remaining_wait(&self) -> Option<std::time::Duration> {
        self.request_ready_at
            .map(|ready_at| ready_at.saturating_duration_since(Instant::now()))
            .filter(|wait| !wait.is_zero())
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Apply one key press to the session.
    pub async fn handle_key(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q')) {
            self.should_quit = true;
            return;
        }

        let state = self.controller.session().lock().await.state();
        let result = match state {
            SessionState::Configuring => self.handle_configuring(key).await,
            SessionState::Loading => Ok(()),
            SessionState::InProgress => self.handle_in_progress(key).await,
            SessionState::Graded => self.handle_graded(key).await,
            SessionState::Errored => self.handle_errored(key).await,
        };

        self.notice = match result {
            Ok(()) => None,
            Err(e) => {
                debug!(error = %e, "Key press rejected");
                Some(e.to_string())
            }
        };
    }

    async fn handle_configuring(&mut self, key: KeyCode) -> Result<(), SessionError> {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.config_field = self.config_field.previous(),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.config_field = self.config_field.next()
            }
            KeyCode::Left | KeyCode::Char('h') => self.cycle_option(false).await?,
            KeyCode::Right | KeyCode::Char('l') => self.cycle_option(true).await?,
            KeyCode::Enter => {
                self.note_pending_wait().await;
                self.controller.start_quiz().await?;
                self.reset_round_view();
            }
            _ => {}
        }
        Ok(())
    }

    async fn cycle_option(&mut self, forward: bool) -> Result<(), SessionError> {
        let mut session = self.controller.session().lock().await;
        let config = *session.config();
        match self.config_field {
            ConfigField::Category => session.set_category(if forward {
                config.category.next()
            } else {
                config.category.previous()
            }),
            ConfigField::Difficulty => session.set_difficulty(if forward {
                config.difficulty.next()
            } else {
                config.difficulty.previous()
            }),
            ConfigField::Count => session.set_question_count(if forward {
                config.question_count.next()
            } else {
                config.question_count.previous()
            }),
        }
    }

    async fn handle_in_progress(&mut self, key: KeyCode) -> Result<(), SessionError> {
        let mut session = self.controller.session().lock().await;
        let total = session.questions().len();
        let option_count = self.current_options(&session).map_or(0, <[String]>::len);

        match key {
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Tab => {
                if self.current_question + 1 < total {
                    self.current_question += 1;
                    self.selected_option = 0;
                }
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') | KeyCode::BackTab => {
                if self.current_question > 0 {
                    self.current_question -= 1;
                    self.selected_option = 0;
                }
            }
            KeyCode::Down | KeyCode::Char('j') if option_count > 0 => {
                self.selected_option = (self.selected_option + 1) % option_count;
            }
            KeyCode::Up | KeyCode::Char('k') if option_count > 0 => {
                self.selected_option = (self.selected_option + option_count - 1) % option_count;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some((id, answer)) = self.highlighted_answer(&session) {
                    session.record_answer(id, answer)?;
                    if self.current_question + 1 < total {
                        self.current_question += 1;
                        self.selected_option = 0;
                    }
                }
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                session.submit()?;
                self.result_scroll = 0;
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_graded(&mut self, key: KeyCode) -> Result<(), SessionError> {
        match key {
            KeyCode::Down | KeyCode::Char('j') => self.result_scroll += 1,
            KeyCode::Up | KeyCode::Char('k') => {
                self.result_scroll = self.result_scroll.saturating_sub(1)
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                self.controller.session().lock().await.change_options()?;
                self.reset_round_view();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.note_pending_wait().await;
                self.controller.play_again().await?;
                self.reset_round_view();
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_errored(&mut self, key: KeyCode) -> Result<(), SessionError> {
        if matches!(key, KeyCode::Enter | KeyCode::Esc) {
            self.controller.session().lock().await.acknowledge_error()?;
        }
        Ok(())
    }

    async fn note_pending_wait(&mut self) {
        let wait = self.controller.fetcher().pending_wait().await;
        self.request_ready_at = Some(Instant::now() + wait);
    }

    fn reset_round_view(&mut self) {
        self.current_question = 0;
        self.selected_option = 0;
        self.result_scroll = 0;
    }

    fn current_options<'a>(&self, session: &'a QuizSession) -> Option<&'a [String]> {
        let question = session.questions().get(self.current_question)?;
        session.display_order(question.id())
    }

    fn highlighted_answer(&self, session: &QuizSession) -> Option<(QuestionId, String)> {
        let question = session.questions().get(self.current_question)?;
        let answer = self.current_options(session)?.get(self.selected_option)?;
        Some((question.id(), answer.clone()))
    }
}
