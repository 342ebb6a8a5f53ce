use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref COURSE_SECTION: Regex =
        Regex::new(r"(?is)course suggestions:?(.+?)(?:skill assessment|\z)").unwrap();
    static ref QUESTION_SECTION: Regex =
        Regex::new(r"(?is)skill assessment questions:?(.+)\z").unwrap();
}

/// The two halves of a combined suggestions-and-questions response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSections {
    pub course_suggestions: String,
    pub skill_questions: String,
}

/// Split a combined response on its "Course Suggestions" and
/// "Skill Assessment Questions" headings.
///
/// Without a course heading the whole response is treated as course
/// suggestions; without a question heading the questions are empty.
pub fn split_sections(response: &str) -> ResponseSections {
    let course_suggestions = COURSE_SECTION
        .captures(response)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| response.to_string());

    let skill_questions = QUESTION_SECTION
        .captures(response)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default();

    ResponseSections {
        course_suggestions,
        skill_questions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_sections() {
        let response = "## Course Suggestions:\n[{\"name\":\"A\",\"url\":\"https://a\"}]\n\n\
                        ## Skill Assessment Questions:\nQuestion 1: Q?\nA) a\nB) b\nC) c\nD) d\nCorrect Answer: A\n";
        let sections = split_sections(response);

        assert!(sections
            .course_suggestions
            .starts_with("[{\"name\":\"A\",\"url\":\"https://a\"}]"));
        assert!(!sections.course_suggestions.contains("Skill Assessment"));
        assert!(sections.skill_questions.starts_with("Question 1: Q?"));
        assert!(sections.skill_questions.ends_with("Correct Answer: A"));
    }

    #[test]
    fn test_headings_are_case_insensitive() {
        let sections = split_sections("COURSE SUGGESTIONS\nlearn things\nSKILL ASSESSMENT QUESTIONS\nask things");
        assert_eq!(sections.course_suggestions, "learn things");
        assert_eq!(sections.skill_questions, "ask things");
    }

    #[test]
    fn test_course_section_runs_to_end_without_questions() {
        let sections = split_sections("Course suggestions: take a course");
        assert_eq!(sections.course_suggestions, "take a course");
        assert_eq!(sections.skill_questions, "");
    }

    #[test]
    fn test_no_headings_falls_back() {
        let sections = split_sections("just some text");
        assert_eq!(sections.course_suggestions, "just some text");
        assert_eq!(sections.skill_questions, "");
    }
}
