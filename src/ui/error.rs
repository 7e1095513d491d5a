use ratatui::{prelude::*, widgets::Paragraph};

use crate::session::QuizSession;

pub fn render(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let chunks = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Length(9),
        Constraint::Percentage(40),
    ])
    .split(area);

    let message = session.error().unwrap_or("unknown error");

    let content = vec![
        Line::from(""),
        super::title_line(),
        Line::from(""),
        Line::from(Span::styled(
            "Something went wrong! :(",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] back to options  ·  [Q] quit",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}
