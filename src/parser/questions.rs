use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{NUM_OPTIONS, Question};

lazy_static! {
    static ref BLOCK_SPLIT: Regex = Regex::new(r"(?i)Question(?:\s*\d+)?:\s*").unwrap();
    static ref OPTION: Regex = Regex::new(r"([A-D])\)\s*([^\n]+)").unwrap();
    static ref CORRECT_ANSWER: Regex = Regex::new(r"(?i)Correct Answer:\s*([A-D])").unwrap();
}

const FIRST_OPTION_MARKER: &str = "A)";

/// Split `raw` into question blocks and keep every block that has four
/// options and a correct-answer marker.
pub fn parse_questions(raw: &str) -> Vec<Question> {
    let questions: Vec<Question> = BLOCK_SPLIT
        .split(raw)
        .filter(|block| !block.trim().is_empty())
        .filter_map(parse_block)
        .collect();

    tracing::debug!(count = questions.len(), "parsed questions");
    questions
}

fn parse_block(block: &str) -> Option<Question> {
    let text = block
        .split(FIRST_OPTION_MARKER)
        .next()
        .unwrap_or(block)
        .trim()
        .to_string();

    let options: Vec<String> = OPTION
        .captures_iter(block)
        .map(|caps| caps[2].trim().to_string())
        .collect();

    let Some(correct) = CORRECT_ANSWER.captures(block) else {
        tracing::debug!(question = %text, "skipping block without a correct answer");
        return None;
    };

    if options.len() < NUM_OPTIONS {
        tracing::debug!(
            question = %text,
            found = options.len(),
            "skipping block with too few options"
        );
        return None;
    }

    let correct_option_index = letter_index(&correct[1])?;
    let mut options = options.into_iter();
    let options = [
        options.next()?,
        options.next()?,
        options.next()?,
        options.next()?,
    ];

    Some(Question::new(text, options, correct_option_index))
}

fn letter_index(letter: &str) -> Option<usize> {
    match letter.to_ascii_uppercase().as_str() {
        "A" => Some(0),
        "B" => Some(1),
        "C" => Some(2),
        "D" => Some(3),
        _ => None,
    }
}

/// Number of questions answered correctly.
pub fn score(questions: &[Question]) -> usize {
    questions.iter().filter(|q| q.is_correct()).count()
}

pub fn all_answered(questions: &[Question]) -> bool {
    questions.iter().all(Question::is_answered)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "\
Here are your questions.

Question 1: What does `cargo check` do?
A) Builds and runs the binary
B) Type-checks without producing a binary
C) Formats the code
D) Publishes the crate
Correct Answer: B

Question 2: Which trait enables `{:?}` formatting?
A) Display
B) Clone
C) Debug
D) Default
Correct Answer: C

Question 3: What is the size of `u8`?
A) 1 byte
B) 2 bytes
C) 4 bytes
D) 8 bytes
Correct Answer: A
";

    #[test]
    fn test_parse_well_formed_blocks_in_order() {
        let questions = parse_questions(WELL_FORMED);

        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].text, "What does `cargo check` do?");
        assert_eq!(questions[0].correct_option_index, 1);
        assert_eq!(questions[1].options[2], "Debug");
        assert_eq!(questions[1].correct_option_index, 2);
        assert_eq!(questions[2].options[0], "1 byte");
        assert_eq!(questions[2].correct_option_index, 0);
        assert!(questions.iter().all(|q| q.selected_option_index.is_none()));
    }

    #[test]
    fn test_block_without_correct_answer_is_dropped() {
        let raw = WELL_FORMED.replacen("Correct Answer: C", "", 1);
        let questions = parse_questions(&raw);

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].text, "What does `cargo check` do?");
        assert_eq!(questions[1].text, "What is the size of `u8`?");
    }

    #[test]
    fn test_block_with_three_options_is_dropped() {
        let raw = WELL_FORMED.replacen("D) Publishes the crate\n", "", 1);
        let questions = parse_questions(&raw);

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].text, "Which trait enables `{:?}` formatting?");
    }

    #[test]
    fn test_marker_is_case_insensitive_and_number_optional() {
        let raw = "question: Pick D\nA) a\nB) b\nC) c\nD) d\ncorrect answer: d\n\
                   QUESTION 7:Pick A\nA) w\nB) x\nC) y\nD) z\nCorrect Answer:A";
        let questions = parse_questions(raw);

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].text, "Pick D");
        assert_eq!(questions[0].correct_option_index, 3);
        assert_eq!(questions[1].text, "Pick A");
        assert_eq!(questions[1].correct_option_index, 0);
    }

    #[test]
    fn test_extra_options_keep_first_four() {
        let raw = "Question 1: Extra\nA) one\nB) two\nC) three\nD) four\nCorrect Answer: B) two\n";
        let questions = parse_questions(raw);

        assert_eq!(questions.len(), 1);
        assert_eq!(
            questions[0].options,
            ["one", "two", "three", "four"].map(String::from)
        );
        assert_eq!(questions[0].correct_option_index, 1);
    }

    #[test]
    fn test_options_are_trimmed() {
        let raw = "Question 1: Spaces\nA)   left  \nB) right\t\nC) up\nD) down\nCorrect Answer: C";
        let questions = parse_questions(raw);

        assert_eq!(questions[0].options[0], "left");
        assert_eq!(questions[0].options[1], "right");
    }

    #[test]
    fn test_prose_only_yields_nothing() {
        assert!(parse_questions("").is_empty());
        assert!(parse_questions("Sorry, I cannot help with that.").is_empty());
    }

    #[test]
    fn test_score_and_all_answered() {
        let mut questions = parse_questions(WELL_FORMED);
        assert_eq!(score(&questions), 0);
        assert!(!all_answered(&questions));

        questions[0].select(1);
        questions[1].select(0);
        assert_eq!(score(&questions), 1);
        assert_eq!(score(&questions), 1);
        assert!(!all_answered(&questions));

        questions[2].select(0);
        assert!(all_answered(&questions));
        assert_eq!(score(&questions), 2);
        assert!(score(&questions) <= questions.len());
    }

    #[test]
    fn test_empty_slice_is_all_answered() {
        assert!(all_answered(&[]));
        assert_eq!(score(&[]), 0);
    }
}
