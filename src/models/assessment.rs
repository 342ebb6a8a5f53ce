use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Question;
use crate::parser;

/// Outcome of one question, stored with the option texts so history stays
/// readable without the original response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question: String,
    pub selected_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub options: Vec<String>,
}

impl From<&Question> for QuestionResult {
    fn from(question: &Question) -> Self {
        Self {
            question: question.text.clone(),
            selected_answer: question.selected_option().unwrap_or_default().to_string(),
            correct_answer: question.correct_option().to_string(),
            is_correct: question.is_correct(),
            options: question.options.to_vec(),
        }
    }
}

/// A completed assessment for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub id: Uuid,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub score: usize,
    pub total_questions: usize,
    pub questions: Vec<QuestionResult>,
}

impl AssessmentResult {
    pub fn from_questions(user_id: impl Into<String>, questions: &[Question]) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            timestamp: Utc::now(),
            score: parser::score(questions),
            total_questions: questions.len(),
            questions: questions.iter().map(QuestionResult::from).collect(),
        }
    }
}
