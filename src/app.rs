use crate::models::{AppState, AssessmentResult, CourseRecommendation, NUM_OPTIONS, Question};
use crate::parser::{ParseError, all_answered, parse_recommendations, score};

/// What the courses screen has to show.
#[derive(Debug)]
pub enum Recommendations {
    NotLoaded,
    Ready(Vec<CourseRecommendation>),
    /// Free-form suggestions, shown as written.
    Text(String),
    Failed(String),
}

impl Recommendations {
    /// Interpret the course section of a combined response. A JSON array
    /// becomes a course list; anything else is kept as prose.
    pub fn from_course_section(section: &str) -> Self {
        let section = section.trim();
        if section.is_empty() {
            return Recommendations::NotLoaded;
        }

        match parse_recommendations(section) {
            Ok(courses) => Recommendations::Ready(courses),
            Err(err) => {
                tracing::debug!(error = %err, "course section is not a JSON array, showing text");
                Recommendations::Text(section.to_string())
            }
        }
    }
}

impl From<Result<Vec<CourseRecommendation>, ParseError>> for Recommendations {
    fn from(result: Result<Vec<CourseRecommendation>, ParseError>) -> Self {
        match result {
            Ok(courses) => Recommendations::Ready(courses),
            Err(err) => {
                Recommendations::Failed(format!("Failed to get course recommendations: {}", err))
            }
        }
    }
}

pub struct App {
    pub state: AppState,
    user_id: String,
    questions: Vec<Question>,
    current_question_index: usize,
    cursor: usize,
    result_scroll: usize,
    recommendations: Recommendations,
    selected_course: usize,
    finished: Option<AssessmentResult>,
}

impl App {
    /// Callers must pass at least one question; `Assessment::new` checks this.
    pub(crate) fn new(user_id: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            state: AppState::Welcome,
            user_id: user_id.into(),
            questions,
            current_question_index: 0,
            cursor: 0,
            result_scroll: 0,
            recommendations: Recommendations::NotLoaded,
            selected_course: 0,
            finished: None,
        }
    }

    pub fn with_recommendations(mut self, recommendations: Recommendations) -> Self {
        self.recommendations = recommendations;
        self
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_question_index)
    }

    pub fn current_question_number(&self) -> usize {
        self.current_question_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn answered_count(&self) -> usize {
        self.questions.iter().filter(|q| q.is_answered()).count()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn recommendations(&self) -> &Recommendations {
        &self.recommendations
    }

    pub fn selected_course(&self) -> usize {
        self.selected_course
    }

    pub fn calculate_score(&self) -> usize {
        score(&self.questions)
    }

    pub fn start_quiz(&mut self) {
        if self.questions.is_empty() {
            return;
        }
        self.state = AppState::Quiz;
        self.go_to_question(0);
    }

    pub fn select_next_option(&mut self) {
        self.cursor = (self.cursor + 1) % NUM_OPTIONS;
    }

    pub fn select_previous_option(&mut self) {
        self.cursor = (self.cursor + NUM_OPTIONS - 1) % NUM_OPTIONS;
    }

    /// Record the option under the cursor, then move on. On the last question
    /// this submits when everything is answered, otherwise it jumps back to
    /// the first unanswered question.
    pub fn answer_current(&mut self) {
        let cursor = self.cursor;
        let Some(question) = self.questions.get_mut(self.current_question_index) else {
            return;
        };
        question.select(cursor);

        if self.current_question_index + 1 < self.questions.len() {
            self.go_to_question(self.current_question_index + 1);
        } else if all_answered(&self.questions) {
            self.submit();
        } else if let Some(index) = self.questions.iter().position(|q| !q.is_answered()) {
            self.go_to_question(index);
        }
    }

    pub fn next_question(&mut self) {
        let next = self.current_question_index + 1;
        let answered = self.current_question().is_some_and(Question::is_answered);
        if answered && next < self.questions.len() {
            self.go_to_question(next);
        }
    }

    pub fn previous_question(&mut self) {
        if self.current_question_index > 0 {
            self.go_to_question(self.current_question_index - 1);
        }
    }

    fn go_to_question(&mut self, index: usize) {
        self.current_question_index = index;
        self.cursor = self.questions[index].selected_option_index.unwrap_or(0);
    }

    fn submit(&mut self) {
        let result = AssessmentResult::from_questions(self.user_id.clone(), &self.questions);
        tracing::info!(
            score = result.score,
            total = result.total_questions,
            "assessment submitted"
        );
        self.finished = Some(result);
        self.result_scroll = 0;
        self.state = AppState::Result;
    }

    /// Hand out the result of the most recent submission, once.
    pub fn take_finished_result(&mut self) -> Option<AssessmentResult> {
        self.finished.take()
    }

    pub fn scroll_results_down(&mut self) {
        if self.result_scroll + 1 < self.questions.len() {
            self.result_scroll += 1;
        }
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn show_courses(&mut self) {
        self.selected_course = 0;
        self.state = AppState::Courses;
    }

    pub fn back_to_result(&mut self) {
        self.state = AppState::Result;
    }

    pub fn select_next_course(&mut self) {
        if let Recommendations::Ready(courses) = &self.recommendations {
            if self.selected_course + 1 < courses.len() {
                self.selected_course += 1;
            }
        }
    }

    pub fn select_previous_course(&mut self) {
        self.selected_course = self.selected_course.saturating_sub(1);
    }

    pub fn retake(&mut self) {
        self.questions.iter_mut().for_each(Question::clear_selection);
        self.state = AppState::Welcome;
        self.current_question_index = 0;
        self.cursor = 0;
        self.result_scroll = 0;
        self.finished = None;
    }
}
