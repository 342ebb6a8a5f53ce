use ratatui::{
    prelude::*,
    widgets::{Gauge, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::Question;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], app);
    render_gauge(frame, chunks[1], app);
    render_question_text(frame, chunks[2], &question.text);
    render_options(frame, chunks[3], question, app.cursor());
    super::render_controls(
        frame,
        chunks[4],
        "j/k navigate  ·  enter answer  ·  h/l prev/next  ·  q quit",
    );
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let position = Paragraph::new(format!(
        "Question {} of {}",
        app.current_question_number(),
        app.total_questions()
    ))
    .fg(Color::White);
    let answered = Paragraph::new(format!("{} answered", app.answered_count()))
        .alignment(Alignment::Right)
        .fg(Color::Cyan);

    frame.render_widget(position, halves[0]);
    frame.render_widget(answered, halves[1]);
}

fn render_gauge(frame: &mut Frame, area: Rect, app: &App) {
    let ratio = app.current_question_number() as f64 / app.total_questions().max(1) as f64;
    let widget = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .ratio(ratio.clamp(0.0, 1.0))
        .label("");
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, question: &Question, cursor: usize) {
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let is_cursor = index == cursor;
        let is_chosen = question.selected_option_index == Some(index);
        let style = if is_cursor {
            Style::default().fg(Color::Cyan).bold()
        } else if is_chosen {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_cursor { ">" } else { " " };
        let chosen = if is_chosen { "*" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {}{} ", marker, chosen), style),
            Span::styled(format!("{}) ", Question::option_label(index)), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
