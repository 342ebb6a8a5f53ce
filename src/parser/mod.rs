//! Parsers that turn free-text model responses into structured records.
//!
//! Question parsing is lenient: malformed blocks are dropped and an empty
//! result means "no usable questions". Recommendation parsing is strict: the
//! whole array parses or the call fails with [`ParseError`].

mod questions;
mod recommendations;
mod sections;

pub use questions::{all_answered, parse_questions, score};
pub use recommendations::{ParseError, extract_json_array, parse_recommendations};
pub use sections::{ResponseSections, split_sections};
