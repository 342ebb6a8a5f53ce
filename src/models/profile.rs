use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Self-reported proficiency for a single skill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Expert,
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Expert => "Expert",
        };
        f.write_str(name)
    }
}

impl FromStr for SkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(SkillLevel::Beginner),
            "intermediate" => Ok(SkillLevel::Intermediate),
            "expert" => Ok(SkillLevel::Expert),
            other => Err(format!(
                "unknown skill level '{}' (expected beginner, intermediate or expert)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub level: SkillLevel,
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.level)
    }
}

/// Parses `name` or `name:level`.
impl FromStr for Skill {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, level) = match s.rsplit_once(':') {
            Some((name, level)) => (name, level.parse()?),
            None => (s, SkillLevel::default()),
        };

        let name = name.trim();
        if name.is_empty() {
            return Err("skill name must not be empty".to_string());
        }

        Ok(Skill {
            name: name.to_string(),
            level,
        })
    }
}

/// The learner an assessment is generated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub end_goals: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            skills: Vec::new(),
            experience: String::new(),
            end_goals: Vec::new(),
            interests: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn skills_summary(&self) -> String {
        self.skills
            .iter()
            .map(Skill::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
