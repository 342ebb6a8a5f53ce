use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::CourseRecommendation;

const JSON_FENCE_OPEN: &str = "```json";
const FENCE: &str = "```";

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("no JSON array found")]
    NoJsonArray,
    #[error("invalid recommendation JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("recommendation {index} is not a JSON object")]
    NotAnObject { index: usize },
    #[error("recommendation {index} has an empty `{field}`")]
    EmptyField { index: usize, field: &'static str },
}

/// Locate the candidate JSON array inside a model response.
///
/// Tries, in order: a fenced ```` ```json ```` block, a response that is
/// already a bare array, and the span from the first `[` to the last `]`.
pub fn extract_json_array(raw: &str) -> Option<&str> {
    let text = raw.trim();

    if let Some(inner) = text
        .strip_prefix(JSON_FENCE_OPEN)
        .and_then(|rest| rest.strip_suffix(FENCE))
    {
        tracing::debug!("stripped markdown fence from recommendations");
        return Some(inner.trim());
    }

    if text.starts_with('[') && text.ends_with(']') {
        return Some(text);
    }

    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if start < end {
        Some(&text[start..=end])
    } else {
        None
    }
}

/// Parse every recommendation in the response, or fail without a partial list.
pub fn parse_recommendations(raw: &str) -> Result<Vec<CourseRecommendation>, ParseError> {
    let candidate = extract_json_array(raw).ok_or(ParseError::NoJsonArray)?;
    let elements: Vec<Value> = serde_json::from_str(candidate)?;

    let courses = elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| parse_course(index, element))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(count = courses.len(), "parsed course recommendations");
    Ok(courses)
}

fn parse_course(index: usize, element: Value) -> Result<CourseRecommendation, ParseError> {
    let object: Map<String, Value> = match element {
        Value::Object(object) => object,
        _ => return Err(ParseError::NotAnObject { index }),
    };

    let course: CourseRecommendation = serde_json::from_value(Value::Object(object))?;
    if course.name.trim().is_empty() {
        return Err(ParseError::EmptyField {
            index,
            field: "name",
        });
    }
    if course.url.trim().is_empty() {
        return Err(ParseError::EmptyField { index, field: "url" });
    }

    Ok(course)
}
