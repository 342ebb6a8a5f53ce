use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{AssessmentResult, UserProfile};

const RESULT_EXTENSION: &str = "json";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{} is empty", .0.display())]
    Empty(PathBuf),
}

/// Read a raw model response from disk.
pub fn read_response<P: AsRef<Path>>(path: P) -> Result<String, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if content.trim().is_empty() {
        return Err(LoadError::Empty(path.to_path_buf()));
    }

    Ok(content)
}

pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<UserProfile, LoadError> {
    let path = path.as_ref();
    let content = read_response(path)?;
    serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `result` to `<history_dir>/<user_id>/<result id>.json`.
pub fn save_result<P: AsRef<Path>>(
    history_dir: P,
    result: &AssessmentResult,
) -> Result<PathBuf, LoadError> {
    let user_dir = history_dir.as_ref().join(&result.user_id);
    fs::create_dir_all(&user_dir).map_err(|source| LoadError::Write {
        path: user_dir.clone(),
        source,
    })?;

    let path = user_dir
        .join(result.id.to_string())
        .with_extension(RESULT_EXTENSION);
    let json = serde_json::to_string_pretty(result).map_err(|source| LoadError::Json {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, json).map_err(|source| LoadError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path.display(), score = result.score, "saved assessment result");
    Ok(path)
}

/// Every saved result for `user_id`, newest first.
///
/// A user without a history directory has an empty history. Files that
/// cannot be read or parsed are skipped.
pub fn load_history<P: AsRef<Path>>(
    history_dir: P,
    user_id: &str,
) -> Result<Vec<AssessmentResult>, LoadError> {
    let user_dir = history_dir.as_ref().join(user_id);
    let entries = match fs::read_dir(&user_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(LoadError::Read {
                path: user_dir,
                source,
            });
        }
    };

    let mut results = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable history entry");
                continue;
            }
        };
        if path.extension().and_then(|ext| ext.to_str()) != Some(RESULT_EXTENSION) {
            continue;
        }

        match read_result(&path) {
            Ok(result) => results.push(result),
            Err(err) => tracing::warn!(error = %err, "skipping assessment result"),
        }
    }

    results.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(results)
}

fn read_result(path: &Path) -> Result<AssessmentResult, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use tempfile::TempDir;

    use super::*;
    use crate::models::Question;

    fn answered_question() -> Question {
        let mut question = Question::new(
            "Q".to_string(),
            ["a", "b", "c", "d"].map(String::from),
            2,
        );
        question.select(2);
        question
    }

    #[test]
    fn test_read_response() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        let path = dir.join("response.txt");
        fs::write(&path, "Question 1: hi").unwrap();
        assert_eq!(read_response(&path).unwrap(), "Question 1: hi");

        fs::write(&path, "  \n ").unwrap();
        assert!(matches!(read_response(&path), Err(LoadError::Empty(_))));

        assert!(matches!(
            read_response(dir.join("missing.txt")),
            Err(LoadError::Read { .. })
        ));
    }

    #[test]
    fn test_load_profile() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        let path = dir.join("profile.json");
        fs::write(
            &path,
            r#"{"id":"u1","name":"Ada","skills":[{"name":"Rust","level":"expert"}],"interests":["Compilers"]}"#,
        )
        .unwrap();

        let profile = load_profile(&path).unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.skills_summary(), "Rust (Expert)");

        fs::write(&path, "{not json").unwrap();
        assert!(matches!(load_profile(&path), Err(LoadError::Json { .. })));
    }

    #[test]
    fn test_save_and_load_history_newest_first() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        let questions = vec![answered_question()];

        let mut older = AssessmentResult::from_questions("user-7", &questions);
        older.timestamp -= Duration::hours(1);
        let newer = AssessmentResult::from_questions("user-7", &questions);

        let path = save_result(dir, &older).unwrap();
        assert!(path.starts_with(dir.join("user-7")));
        save_result(dir, &newer).unwrap();
        fs::write(dir.join("user-7").join("broken.json"), "nope").unwrap();
        fs::write(dir.join("user-7").join("notes.txt"), "ignored").unwrap();

        let history = load_history(dir, "user-7").unwrap();
        assert_eq!(history, vec![newer, older]);
    }

    #[test]
    fn test_missing_history_is_empty() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        assert!(load_history(dir, "nobody").unwrap().is_empty());
    }
}
