//! # skill-suggest
//!
//! A terminal skill self-assessment built from generative-model output.
//!
//! The model's free-text questions are parsed into multiple-choice
//! [`Question`]s, the user answers them in the terminal, and the scored
//! [`AssessmentResult`] is kept as local history. Course recommendations
//! returned by the model as a JSON array are parsed into
//! [`CourseRecommendation`]s and shown after the result.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use skill_suggest::{Assessment, SuggestError};
//!
//! fn main() -> Result<(), SuggestError> {
//!     let assessment = Assessment::from_response_file("questions.txt", "user-1")?
//!         .with_history_dir("history");
//!
//!     assessment.run()?;
//!
//!     Ok(())
//! }
//! ```

mod app;
mod data;
mod models;
mod parser;
pub mod prompt;
pub mod terminal;
mod ui;

use std::io;
use std::path::{Path, PathBuf};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;

pub use app::{App, Recommendations};
pub use data::{LoadError, load_history, load_profile, read_response, save_result};
pub use models::{
    AppState, AssessmentResult, CourseRecommendation, Question, QuestionResult, Skill, SkillLevel,
    UserProfile,
};
pub use parser::{
    ParseError, ResponseSections, all_answered, extract_json_array, parse_questions,
    parse_recommendations, score, split_sections,
};

/// Error type for assessment operations.
#[derive(Error, Debug)]
pub enum SuggestError {
    #[error("failed to load: {0}")]
    Load(#[from] LoadError),
    #[error("failed to parse recommendations: {0}")]
    Parse(#[from] ParseError),
    #[error("the response contained no usable questions; regenerate it and try again")]
    NoQuestions,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// An assessment that can be taken in the terminal.
pub struct Assessment {
    app: App,
    history_dir: Option<PathBuf>,
}

impl Assessment {
    /// Create an assessment from parsed questions.
    ///
    /// Fails with [`SuggestError::NoQuestions`] when `questions` is empty.
    pub fn new(user_id: impl Into<String>, questions: Vec<Question>) -> Result<Self, SuggestError> {
        if questions.is_empty() {
            return Err(SuggestError::NoQuestions);
        }

        Ok(Self {
            app: App::new(user_id, questions),
            history_dir: None,
        })
    }

    /// Parse the questions in a raw model response.
    pub fn from_response(raw: &str, user_id: impl Into<String>) -> Result<Self, SuggestError> {
        Self::new(user_id, parse_questions(raw))
    }

    /// Read and parse a raw model response from disk.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use skill_suggest::Assessment;
    ///
    /// let assessment = Assessment::from_response_file("questions.txt", "user-1")
    ///     .expect("no usable questions");
    /// ```
    pub fn from_response_file<P: AsRef<Path>>(
        path: P,
        user_id: impl Into<String>,
    ) -> Result<Self, SuggestError> {
        let raw = read_response(path)?;
        Self::from_response(&raw, user_id)
    }

    /// Attach the outcome of parsing a recommendations response. A parse
    /// failure is shown on the courses screen instead of aborting.
    pub fn with_recommendations(
        mut self,
        recommendations: Result<Vec<CourseRecommendation>, ParseError>,
    ) -> Self {
        if let Err(err) = &recommendations {
            tracing::warn!(error = %err, "course recommendations unavailable");
        }
        self.app = self.app.with_recommendations(recommendations.into());
        self
    }

    /// Attach the course section of a combined response, shown as a list
    /// when it holds a JSON array and as text otherwise.
    pub fn with_course_section(mut self, section: &str) -> Self {
        self.app = self
            .app
            .with_recommendations(Recommendations::from_course_section(section));
        self
    }

    /// Save each submitted result under `dir`.
    pub fn with_history_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.history_dir = Some(dir.into());
        self
    }

    /// Run the assessment in the terminal until the user quits.
    pub fn run(mut self) -> Result<(), SuggestError> {
        let mut guard = terminal::TerminalGuard::enter()?;
        run_event_loop(guard.terminal(), &mut self.app, self.history_dir.as_deref())
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
    history_dir: Option<&Path>,
) -> Result<(), SuggestError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }

        if let Some(result) = app.take_finished_result() {
            if let Some(dir) = history_dir {
                if let Err(err) = save_result(dir, &result) {
                    tracing::error!(error = %err, "could not save assessment result");
                }
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q')) {
        return true;
    }

    match app.state {
        AppState::Welcome => {
            if key == KeyCode::Enter {
                app.start_quiz();
            }
        }
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Result => handle_result_input(app, key),
        AppState::Courses => handle_courses_input(app, key),
    }

    false
}

fn handle_quiz_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Left | KeyCode::Char('h') => app.previous_question(),
        KeyCode::Right | KeyCode::Char('l') => app.next_question(),
        KeyCode::Enter | KeyCode::Char(' ') => app.answer_current(),
        _ => {}
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('c') | KeyCode::Char('C') => app.show_courses(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.retake(),
        _ => {}
    }
}

fn handle_courses_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.select_next_course(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_course(),
        KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => app.back_to_result(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = "Question 1: Pick B\nA) a\nB) b\nC) c\nD) d\nCorrect Answer: B\n";

    #[test]
    fn test_demo_responses_parse() {
        let questions = parse_questions(include_str!("../demos/questions.txt"));
        assert_eq!(questions.len(), 5);
        assert_eq!(
            questions.iter().map(|q| q.correct_option_index).collect::<Vec<_>>(),
            vec![1, 2, 0, 3, 1]
        );

        let courses = parse_recommendations(include_str!("../demos/courses.txt")).unwrap();
        assert_eq!(courses.len(), 3);
        assert_eq!(courses[2].name, "Tokio Tutorial");
    }

    #[test]
    fn test_combined_response_keeps_prose_courses() {
        let combined = "Course Suggestions:\n1. The Rust Programming Language - ownership and traits.\n\n\
                        Skill Assessment Questions:\n";
        let combined = format!("{}{}", combined, RESPONSE);
        let sections = split_sections(&combined);

        let mut assessment = Assessment::from_response(&sections.skill_questions, "u")
            .unwrap()
            .with_course_section(&sections.course_suggestions);
        let app = assessment.app_mut();
        assert_eq!(app.total_questions(), 1);

        handle_input(app, KeyCode::Enter);
        handle_input(app, KeyCode::Char('j'));
        handle_input(app, KeyCode::Enter);
        handle_input(app, KeyCode::Char('c'));
        assert_eq!(app.state, AppState::Courses);
        match app.recommendations() {
            Recommendations::Text(text) => {
                assert_eq!(text, "1. The Rust Programming Language - ownership and traits.")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_empty_response_is_rejected() {
        let err = Assessment::from_response("no questions here", "u").err().unwrap();
        assert!(matches!(err, SuggestError::NoQuestions));
    }

    #[test]
    fn test_key_flow() {
        let mut assessment = Assessment::from_response(RESPONSE, "u")
            .unwrap()
            .with_recommendations(parse_recommendations("nothing"));
        let app = assessment.app_mut();

        assert!(!handle_input(app, KeyCode::Enter));
        assert_eq!(app.state, AppState::Quiz);

        handle_input(app, KeyCode::Char('j'));
        handle_input(app, KeyCode::Enter);
        assert_eq!(app.state, AppState::Result);
        assert_eq!(app.calculate_score(), 1);

        handle_input(app, KeyCode::Char('c'));
        assert_eq!(app.state, AppState::Courses);
        assert!(matches!(app.recommendations(), Recommendations::Failed(_)));

        handle_input(app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Result);

        handle_input(app, KeyCode::Char('r'));
        assert_eq!(app.state, AppState::Welcome);
        assert!(handle_input(app, KeyCode::Char('q')));
    }
}
