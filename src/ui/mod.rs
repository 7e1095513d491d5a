mod configure;
mod error;
mod loading;
mod quiz;
mod result;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::session::{QuizSession, SessionState};

const TITLE: &str = "QUIZZICAL";

pub fn render(frame: &mut Frame, app: &App, session: &QuizSession) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match session.state() {
        SessionState::Configuring => configure::render(frame, area, app, session),
        SessionState::Loading => loading::render(frame, area, app, session),
        SessionState::InProgress => quiz::render(frame, area, app, session),
        SessionState::Graded => result::render(frame, area, app, session),
        SessionState::Errored => error::render(frame, area, session),
    }
}

fn title_line() -> Line<'static> {
    Line::from(Span::styled(TITLE, Style::default().fg(Color::Cyan).bold()))
}
