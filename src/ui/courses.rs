use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, Recommendations};
use crate::models::CourseRecommendation;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    let title = Paragraph::new(Span::styled(
        "RECOMMENDED COURSES",
        Style::default().fg(Color::Cyan).bold(),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(title, chunks[0]);

    match app.recommendations() {
        Recommendations::Ready(courses) if !courses.is_empty() => {
            render_course_list(frame, chunks[1], courses, app.selected_course());
        }
        Recommendations::Ready(_) => render_message(
            frame,
            chunks[1],
            "No courses were recommended.",
            Color::DarkGray,
        ),
        Recommendations::Text(text) => render_suggestions(frame, chunks[1], text),
        Recommendations::Failed(message) => render_message(frame, chunks[1], message, Color::Red),
        Recommendations::NotLoaded => render_message(
            frame,
            chunks[1],
            "No recommendations loaded. Pass --recommendations to show courses here.",
            Color::DarkGray,
        ),
    }

    super::render_controls(frame, chunks[2], "j/k navigate  ·  b back  ·  q quit");
}

fn render_course_list(
    frame: &mut Frame,
    area: Rect,
    courses: &[CourseRecommendation],
    selected: usize,
) {
    let items: Vec<ListItem> = courses
        .iter()
        .map(|course| {
            ListItem::new(vec![
                Line::from(Span::styled(course.name.as_str(), Style::default().bold())),
                Line::from(Span::styled(
                    course.url.as_str(),
                    Style::default().fg(Color::Blue).underlined(),
                )),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().padding(Padding::horizontal(1)))
        .highlight_style(Style::default().fg(Color::Cyan))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_suggestions(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().padding(Padding::horizontal(1)))
        .fg(Color::Gray);
    frame.render_widget(widget, area);
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let widget = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .fg(color);
    frame.render_widget(widget, area);
}
