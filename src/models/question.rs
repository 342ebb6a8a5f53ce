use serde::{Deserialize, Serialize};

pub const NUM_OPTIONS: usize = 4;
const OPTION_LABELS: [char; NUM_OPTIONS] = ['A', 'B', 'C', 'D'];

/// A multiple-choice question recovered from a model response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub options: [String; NUM_OPTIONS],
    pub correct_option_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_option_index: Option<usize>,
}

impl Question {
    pub fn new(text: String, options: [String; NUM_OPTIONS], correct_option_index: usize) -> Self {
        Self {
            text,
            options,
            correct_option_index,
            selected_option_index: None,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.selected_option_index.is_some()
    }

    pub fn is_correct(&self) -> bool {
        self.selected_option_index == Some(self.correct_option_index)
    }

    /// Record the user's choice. Indices outside the four options are ignored.
    pub fn select(&mut self, index: usize) {
        if index < NUM_OPTIONS {
            self.selected_option_index = Some(index);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_option_index = None;
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_option_index]
    }

    pub fn selected_option(&self) -> Option<&str> {
        self.selected_option_index
            .map(|index| self.options[index].as_str())
    }

    pub fn option_label(index: usize) -> char {
        OPTION_LABELS[index % NUM_OPTIONS]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question::new(
            "Which keyword declares an immutable binding?".to_string(),
            [
                "let".to_string(),
                "mut".to_string(),
                "static".to_string(),
                "const fn".to_string(),
            ],
            0,
        )
    }

    #[test]
    fn test_selection_lifecycle() {
        let mut question = sample();
        assert!(!question.is_answered());
        assert!(!question.is_correct());

        question.select(2);
        assert_eq!(question.selected_option(), Some("static"));
        assert!(!question.is_correct());

        question.select(0);
        assert!(question.is_correct());

        question.clear_selection();
        assert!(!question.is_answered());
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let mut question = sample();
        question.select(4);
        assert_eq!(question.selected_option_index, None);
    }

    #[test]
    fn test_option_labels() {
        assert_eq!(Question::option_label(0), 'A');
        assert_eq!(Question::option_label(3), 'D');
        assert_eq!(sample().correct_option(), "let");
    }
}
