//! Prompts sent to the generative model by the caller.
//!
//! The question prompt spells out the exact layout [`crate::parse_questions`]
//! understands, and the course prompt asks for the bare JSON array
//! [`crate::parse_recommendations`] expects.

use crate::models::{AssessmentResult, UserProfile};

pub const QUESTION_COUNT: usize = 5;
pub const COURSE_COUNT: usize = 5;

/// Prompt asking for course ideas plus a skill assessment for `profile`.
pub fn assessment_prompt(profile: &UserProfile) -> String {
    format!(
        "Based on the following user profile, suggest:\n\
         1. {courses} specific courses or learning resources that would help this user advance their skills and reach their goals.\n\
         2. {questions} technical assessment questions related to their skills to test their knowledge level.\n\
         \n\
         User Profile:\n\
         Name: {name}\n\
         Skills: {skills}\n\
         Interests: {interests}\n\
         End Goals: {goals}\n\
         \n\
         Please format your response with clear sections for \"Course Suggestions\" and \"Skill Assessment Questions\".\n\
         For each course, include a brief description of why it's relevant to the user's goals.\n\
         For each question, provide a difficulty level matching their skill level.\n\
         \n\
         Write every question exactly like this:\n\
         Question 1: <question text>\n\
         A) <option>\n\
         B) <option>\n\
         C) <option>\n\
         D) <option>\n\
         Correct Answer: <letter>",
        courses = COURSE_COUNT,
        questions = QUESTION_COUNT,
        name = profile.name,
        skills = profile.skills_summary(),
        interests = profile.interests.join(", "),
        goals = profile.end_goals.join(", "),
    )
}

/// Prompt asking for a JSON array of courses, informed by the latest result
/// in `history`.
pub fn recommendation_prompt(profile: &UserProfile, history: &[AssessmentResult]) -> String {
    let latest = history.iter().max_by_key(|result| result.timestamp);

    let mut prompt = format!(
        "Based on this user profile and assessment results, suggest {count} relevant courses. \
         Return ONLY a JSON array of course objects with 'name' and 'url' fields.\n\
         \n\
         User Profile:\n\
         - Skills: {skills}\n\
         - Experience: {experience}\n\
         - Goals: {goals}\n\
         - Interests: {interests}\n\
         \n",
        count = COURSE_COUNT,
        skills = profile.skills_summary(),
        experience = profile.experience,
        goals = profile.end_goals.join(", "),
        interests = profile.interests.join(", "),
    );

    match latest {
        Some(result) => {
            prompt.push_str("Latest Assessment:\n");
            prompt.push_str(&format!(
                "- Score: {}/{}\n",
                result.score, result.total_questions
            ));
            prompt.push_str("- Questions and Answers:\n");
            for question in &result.questions {
                let verdict = if question.is_correct { "Correct" } else { "Incorrect" };
                prompt.push_str(&format!("  * {}: {}\n", question.question, verdict));
            }
        }
        None => prompt.push_str("No assessment results available.\n"),
    }

    prompt.push_str(
        "\nReturn ONLY a JSON array in this format:\n\
         [\n  \
           {\"name\": \"Course Name 1\", \"url\": \"https://example.com/course1\"},\n  \
           {\"name\": \"Course Name 2\", \"url\": \"https://example.com/course2\"},\n  \
           ...\n\
         ]\n\
         \n\
         DO NOT include any explanation or additional text outside the JSON array.",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::models::{QuestionResult, Skill, SkillLevel};

    fn profile() -> UserProfile {
        let mut profile = UserProfile::new("u1", "Ada");
        profile.skills = vec![Skill {
            name: "Rust".to_string(),
            level: SkillLevel::Expert,
        }];
        profile.interests = vec!["Compilers".to_string(), "Databases".to_string()];
        profile.end_goals = vec!["Systems engineer".to_string()];
        profile
    }

    fn result(question: &str, correct: bool, minutes_ago: i64) -> AssessmentResult {
        AssessmentResult {
            id: uuid::Uuid::new_v4(),
            user_id: "u1".to_string(),
            timestamp: Utc::now() - Duration::minutes(minutes_ago),
            score: usize::from(correct),
            total_questions: 1,
            questions: vec![QuestionResult {
                question: question.to_string(),
                selected_answer: "x".to_string(),
                correct_answer: "x".to_string(),
                is_correct: correct,
                options: vec!["x".to_string()],
            }],
        }
    }

    #[test]
    fn test_assessment_prompt_lists_profile_and_format() {
        let prompt = assessment_prompt(&profile());
        assert!(prompt.contains("Name: Ada"));
        assert!(prompt.contains("Skills: Rust (Expert)"));
        assert!(prompt.contains("Interests: Compilers, Databases"));
        assert!(prompt.contains("End Goals: Systems engineer"));
        assert!(prompt.contains("Correct Answer: <letter>"));
    }

    #[test]
    fn test_recommendation_prompt_uses_latest_result() {
        let history = vec![
            result("Old question", false, 60),
            result("Borrow checker basics", true, 1),
        ];
        let prompt = recommendation_prompt(&profile(), &history);

        assert!(prompt.contains("- Score: 1/1"));
        assert!(prompt.contains("  * Borrow checker basics: Correct"));
        assert!(!prompt.contains("Old question"));
        assert!(prompt.ends_with("outside the JSON array."));
    }

    #[test]
    fn test_recommendation_prompt_without_history() {
        let prompt = recommendation_prompt(&profile(), &[]);
        assert!(prompt.contains("No assessment results available."));
    }
}
