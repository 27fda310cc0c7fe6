//! Text and JSON presentation of chapters and outcomes.

use crate::chapters::{Chapter, Outcome};
use crate::error::Result;

/// Message shown when the store holds no chapters.
pub const NO_CHAPTERS: &str = "No chapters found in the database.";

/// Render the chapter listing as output lines.
///
/// Each chapter is preceded by a blank line and followed by its tasks in
/// stored order, or `(No tasks)`.
#[must_use]
pub fn listing_lines(chapters: &[Chapter]) -> Vec<String> {
    if chapters.is_empty() {
        return vec![NO_CHAPTERS.to_string()];
    }

    let mut lines = Vec::new();
    for chapter in chapters {
        lines.push(String::new());
        lines.push(format!("Chapter: {}", chapter.name));
        if chapter.tasks.is_empty() {
            lines.push("  (No tasks)".to_string());
        } else {
            lines.extend(chapter.task_names().map(|name| format!("  - {name}")));
        }
    }
    lines
}

/// Render the chapter listing as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn listing_json(chapters: &[Chapter]) -> Result<String> {
    Ok(serde_json::to_string_pretty(chapters)?)
}

/// Render one line per outcome.
#[must_use]
pub fn outcome_lines(outcomes: &[Outcome]) -> Vec<String> {
    outcomes.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapters::Task;

    fn chapter(id: i64, name: &str, tasks: &[&str]) -> Chapter {
        Chapter {
            id,
            name: name.to_string(),
            tasks: tasks.iter().map(|t| Task::new(*t)).collect(),
        }
    }

    #[test]
    fn test_listing_empty() {
        assert_eq!(listing_lines(&[]), vec![NO_CHAPTERS]);
    }

    #[test]
    fn test_listing_lines() {
        let chapters = vec![chapter(2, "Algebra", &["Sum", "Diff"]), chapter(1, "Geometry", &[])];
        assert_eq!(
            listing_lines(&chapters),
            vec![
                "",
                "Chapter: Algebra",
                "  - Sum",
                "  - Diff",
                "",
                "Chapter: Geometry",
                "  (No tasks)",
            ]
        );
    }

    #[test]
    fn test_listing_json() {
        let json = listing_json(&[chapter(1, "Algebra", &["Sum"])]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["id"], 1);
        assert_eq!(value[0]["name"], "Algebra");
        assert_eq!(value[0]["tasks"][0]["name"], "Sum");
    }

    #[test]
    fn test_outcome_lines() {
        let lines = outcome_lines(&[
            Outcome::ChapterAdded { name: "A".to_string() },
            Outcome::ChapterExists { name: "A".to_string() },
        ]);
        assert_eq!(lines, vec!["Chapter 'A' added successfully.", "Chapter 'A' already exists."]);
    }
}
