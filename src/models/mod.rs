mod assessment;
mod profile;
mod question;
mod recommendation;

pub use assessment::{AssessmentResult, QuestionResult};
pub use profile::{Skill, SkillLevel, UserProfile};
pub use question::{NUM_OPTIONS, Question};
pub use recommendation::CourseRecommendation;

/// Screen the assessment is currently on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    Quiz,
    Result,
    Courses,
}
