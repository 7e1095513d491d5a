use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::session::QuizSession;

pub fn render(frame: &mut Frame, area: Rect, app: &App, session: &QuizSession) {
    let score = session.score().unwrap_or(0);
    let total = session.questions().len();
    let percentage = calculate_percentage(score, total);

    let chunks = Layout::vertical([
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[0], score, total, percentage);
    render_breakdown(frame, chunks[1], session, app.result_scroll());
    render_controls(frame, chunks[2], app.notice());
}

fn calculate_percentage(score: usize, total: usize) -> f64 {
    if total > 0 {
        (score as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

fn get_grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, score: usize, total: usize, percentage: f64) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("You got {} out of {} right  ({:.0}%)", score, total, percentage),
            Style::default().fg(get_grade_color(percentage)).bold(),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

/// Every question with its options: the correct one in green, a wrong
/// selection in red.
fn render_breakdown(frame: &mut Frame, area: Rect, session: &QuizSession, scroll: usize) {
    let mut lines: Vec<Line> = Vec::new();

    for (index, question) in session.questions().iter().enumerate() {
        let selected = session.answer_for(question.id());
        let (symbol, color) = match selected {
            Some(answer) if question.is_correct(answer) => ("+", Color::Green),
            Some(_) => ("-", Color::Red),
            None => ("?", Color::DarkGray),
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
            Span::styled(
                format!("{:2}. ", index + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(question.question(), Style::default().fg(Color::White)),
        ]));

        let options = session.display_order(question.id()).unwrap_or_default();
        for option in options {
            let is_selected = selected == Some(option.as_str());
            let style = if question.is_correct(option) {
                Style::default().fg(Color::Green).bold()
            } else if is_selected {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let radio = if is_selected { "(•)" } else { "( )" };
            lines.push(Line::from(Span::styled(
                format!("       {} {}", radio, option),
                style,
            )));
        }
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, notice: Option<&str>) {
    let mut lines = Vec::new();
    if let Some(notice) = notice {
        lines.push(Line::from(notice.to_string().fg(Color::Red)));
    }
    lines.push(Line::from(
        "j/k scroll  ·  r play again  ·  c change options  ·  q quit".fg(Color::DarkGray),
    ));

    let widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}
