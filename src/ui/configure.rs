use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, ConfigField};
use crate::session::QuizSession;

pub fn render(frame: &mut Frame, area: Rect, app: &App, session: &QuizSession) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(14),
        Constraint::Fill(1),
    ])
    .split(area);

    let config = session.config();
    let mut content = vec![
        Line::from(""),
        super::title_line(),
        Line::from("Test your trivia knowledge".fg(Color::DarkGray)),
        Line::from(""),
    ];

    for field in ConfigField::ALL {
        let (label, value) = match field {
            ConfigField::Category => ("Category", config.category.label().to_string()),
            ConfigField::Difficulty => ("Difficulty", config.difficulty.label().to_string()),
            ConfigField::Count => ("Questions", config.question_count.to_string()),
        };
        content.push(option_line(label, value, field == app.config_field()));
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "ENTER",
        Style::default().fg(Color::Green).bold(),
    )));
    content.push(Line::from("to start".fg(Color::DarkGray)));
    content.push(Line::from(""));
    content.push(Line::from(
        "j/k field  ·  h/l change  ·  q quit".fg(Color::DarkGray),
    ));

    if let Some(notice) = app.notice() {
        content.push(Line::from(notice.to_string().fg(Color::Red)));
    }

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}

fn option_line(label: &'static str, value: String, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().fg(Color::Gray)
    };
    let marker = if focused { ">" } else { " " };

    Line::from(vec![
        Span::styled(format!("{} {:<12}", marker, label), style),
        Span::styled(format!("< {} >", value), style),
    ])
}
