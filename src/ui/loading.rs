use ratatui::{prelude::*, widgets::Paragraph};

use crate::app::App;
use crate::session::QuizSession;

pub fn render(frame: &mut Frame, area: Rect, app: &App, session: &QuizSession) {
    let chunks = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Length(7),
        Constraint::Percentage(40),
    ])
    .split(area);

    let config = session.config();
    let status = match app.remaining_wait() {
        Some(wait) => format!("Waiting {:.1}s before asking for questions...", wait.as_secs_f64()),
        None => "Loading questions...".to_string(),
    };

    let content = vec![
        Line::from(""),
        super::title_line(),
        Line::from(""),
        Line::from(Span::styled(status, Style::default().fg(Color::Yellow))),
        Line::from(
            format!(
                "{} · {} · {} questions",
                config.category.label(),
                config.difficulty.label(),
                config.question_count
            )
            .fg(Color::DarkGray),
        ),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}
