//! Model types for chapters, their tasks, and per-item outcomes.

use serde::{Deserialize, Serialize};

/// A single task, stored inside its chapter's task list.
///
/// A task has no identity beyond its name and its position in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task name, unique within the owning chapter.
    pub name: String,
}

impl Task {
    /// Create a task with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A named chapter with its ordered task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Store-assigned identifier. Never reused after deletion.
    pub id: i64,
    /// Chapter name, unique across all chapters.
    pub name: String,
    /// Tasks in insertion order.
    pub tasks: Vec<Task>,
}

impl Chapter {
    /// Names of this chapter's tasks, in stored order.
    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(|t| t.name.as_str())
    }

    /// Check whether a task with exactly this name exists.
    #[must_use]
    pub fn has_task(&self, name: &str) -> bool {
        self.tasks.iter().any(|t| t.name == name)
    }
}

/// Classification of a rejected batch item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A blank name was supplied where one is required.
    Validation,
    /// The referenced chapter or task does not exist.
    NotFound,
    /// The name collides with an existing chapter or task.
    Conflict,
}

/// What happened to one item of a store operation.
///
/// Operations return one outcome per processed item, in input order. The
/// `Display` output is the line shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// A chapter was inserted by an explicit add.
    ChapterAdded {
        /// Chapter name.
        name: String,
    },
    /// A chapter was inserted because tasks were added to a missing chapter.
    ChapterCreated {
        /// Chapter name.
        name: String,
    },
    /// A chapter with this name already exists.
    ChapterExists {
        /// Chapter name.
        name: String,
    },
    /// No chapter has this name.
    ChapterNotFound {
        /// Chapter name.
        name: String,
    },
    /// The chapter and all of its tasks were deleted.
    ChapterDeleted {
        /// Chapter name.
        name: String,
    },
    /// Deletion of a non-empty chapter was declined.
    DeletionCanceled {
        /// Chapter name.
        name: String,
    },
    /// A chapter was renamed.
    ChapterRenamed {
        /// Previous name.
        from: String,
        /// New name.
        to: String,
    },
    /// A task was appended to a chapter.
    TaskAdded {
        /// Owning chapter.
        chapter: String,
        /// Task name.
        task: String,
    },
    /// The chapter already holds a task with this name.
    TaskExists {
        /// Owning chapter.
        chapter: String,
        /// Task name.
        task: String,
    },
    /// The chapter holds no task with this name.
    TaskNotFound {
        /// Owning chapter.
        chapter: String,
        /// Task name.
        task: String,
    },
    /// A task was removed from a chapter.
    TaskDeleted {
        /// Owning chapter.
        chapter: String,
        /// Task name.
        task: String,
    },
    /// A task was renamed in place.
    TaskRenamed {
        /// Owning chapter.
        chapter: String,
        /// Previous name.
        from: String,
        /// New name.
        to: String,
    },
    /// A blank chapter name was supplied.
    BlankChapterName,
    /// A blank task name was supplied.
    BlankTaskName,
}

impl Outcome {
    /// Classify a rejected item, or `None` if the item was not rejected.
    ///
    /// A declined deletion is a skip, not a failure.
    #[must_use]
    pub const fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::BlankChapterName | Self::BlankTaskName => Some(FailureKind::Validation),
            Self::ChapterNotFound { .. } | Self::TaskNotFound { .. } => {
                Some(FailureKind::NotFound)
            }
            Self::ChapterExists { .. } | Self::TaskExists { .. } => Some(FailureKind::Conflict),
            Self::ChapterAdded { .. }
            | Self::ChapterCreated { .. }
            | Self::ChapterDeleted { .. }
            | Self::DeletionCanceled { .. }
            | Self::ChapterRenamed { .. }
            | Self::TaskAdded { .. }
            | Self::TaskDeleted { .. }
            | Self::TaskRenamed { .. } => None,
        }
    }

    /// Check whether this outcome changed stored state.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        matches!(
            self,
            Self::ChapterAdded { .. }
                | Self::ChapterCreated { .. }
                | Self::ChapterDeleted { .. }
                | Self::ChapterRenamed { .. }
                | Self::TaskAdded { .. }
                | Self::TaskDeleted { .. }
                | Self::TaskRenamed { .. }
        )
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ChapterAdded { name } => write!(f, "Chapter '{name}' added successfully."),
            Self::ChapterCreated { name } => write!(f, "Chapter '{name}' created."),
            Self::ChapterExists { name } => write!(f, "Chapter '{name}' already exists."),
            Self::ChapterNotFound { name } => write!(f, "Chapter '{name}' not found."),
            Self::ChapterDeleted { name } => write!(f, "Chapter '{name}' deleted successfully."),
            Self::DeletionCanceled { name } => {
                write!(f, "Deletion of chapter '{name}' canceled.")
            }
            Self::ChapterRenamed { from, to } => {
                write!(f, "Chapter '{from}' renamed to '{to}' successfully.")
            }
            Self::TaskAdded { chapter, task } => {
                write!(f, "Task '{task}' added to chapter '{chapter}' successfully.")
            }
            Self::TaskExists { chapter, task } => {
                write!(f, "Task '{task}' already exists in chapter '{chapter}'.")
            }
            Self::TaskNotFound { chapter, task } => {
                write!(f, "Task '{task}' not found in chapter '{chapter}'.")
            }
            Self::TaskDeleted { chapter, task } => {
                write!(f, "Task '{task}' deleted from chapter '{chapter}' successfully.")
            }
            Self::TaskRenamed { chapter, from, to } => {
                write!(f, "Task '{from}' renamed to '{to}' in chapter '{chapter}' successfully.")
            }
            Self::BlankChapterName => write!(f, "Chapter names cannot be empty."),
            Self::BlankTaskName => write!(f, "Task names cannot be empty."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_serializes_as_name_object() {
        let json = serde_json::to_string(&vec![Task::new("Sum"), Task::new("Diff")]).unwrap();
        assert_eq!(json, r#"[{"name":"Sum"},{"name":"Diff"}]"#);
    }

    #[test]
    fn test_task_ignores_unknown_fields() {
        let tasks: Vec<Task> = serde_json::from_str(r#"[{"name":"Sum","done":true}]"#).unwrap();
        assert_eq!(tasks, vec![Task::new("Sum")]);
    }

    #[test]
    fn test_chapter_has_task_is_case_sensitive() {
        let chapter =
            Chapter { id: 1, name: "Algebra".to_string(), tasks: vec![Task::new("Sum")] };
        assert!(chapter.has_task("Sum"));
        assert!(!chapter.has_task("sum"));
        assert_eq!(chapter.task_names().collect::<Vec<_>>(), vec!["Sum"]);
    }

    #[test]
    fn test_failure_kinds() {
        assert_eq!(Outcome::BlankTaskName.failure_kind(), Some(FailureKind::Validation));
        assert_eq!(
            Outcome::ChapterNotFound { name: "A".to_string() }.failure_kind(),
            Some(FailureKind::NotFound)
        );
        assert_eq!(
            Outcome::TaskExists { chapter: "A".to_string(), task: "t".to_string() }
                .failure_kind(),
            Some(FailureKind::Conflict)
        );
        assert_eq!(Outcome::DeletionCanceled { name: "A".to_string() }.failure_kind(), None);
        assert_eq!(Outcome::ChapterAdded { name: "A".to_string() }.failure_kind(), None);
    }

    #[test]
    fn test_is_change() {
        assert!(Outcome::ChapterCreated { name: "A".to_string() }.is_change());
        assert!(!Outcome::DeletionCanceled { name: "A".to_string() }.is_change());
        assert!(!Outcome::ChapterExists { name: "A".to_string() }.is_change());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Outcome::DeletionCanceled { name: "Algebra".to_string() }.to_string(),
            "Deletion of chapter 'Algebra' canceled."
        );
        assert_eq!(
            Outcome::TaskRenamed {
                chapter: "Algebra".to_string(),
                from: "Sum".to_string(),
                to: "Total".to_string(),
            }
            .to_string(),
            "Task 'Sum' renamed to 'Total' in chapter 'Algebra' successfully."
        );
    }

    #[test]
    fn test_outcome_serializes_with_tag() {
        let value = serde_json::to_value(Outcome::ChapterExists { name: "A".to_string() }).unwrap();
        assert_eq!(value["outcome"], "chapter_exists");
        assert_eq!(value["name"], "A");
    }
}
