use serde::{Deserialize, Serialize};

/// A course suggested by the model. Both fields are non-empty once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecommendation {
    pub name: String,
    pub url: String,
}
