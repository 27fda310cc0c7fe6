//! Chapter store trait and `SQLite` implementation.

use crate::chapters::models::{Chapter, Outcome, Task};
use crate::error::{Error, Result};
use crate::traits::Confirm;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

/// Trait for chapter storage operations.
///
/// Every mutating operation runs in one transaction. Per-item rejections are
/// returned as [`Outcome`] values; an `Err` means a persistence fault and the
/// whole operation was rolled back. Names are trimmed before use.
#[allow(clippy::missing_errors_doc)]
pub trait ChapterStore {
    // Chapters
    /// Add chapters with empty task lists, skipping names that already exist.
    fn add_chapters(&mut self, names: &[&str]) -> Result<Vec<Outcome>>;

    /// Delete chapters. Non-empty chapters are only deleted if `confirm` agrees.
    fn delete_chapters(&mut self, names: &[&str], confirm: &mut dyn Confirm)
        -> Result<Vec<Outcome>>;

    /// Rename a chapter. Renaming to any existing name, its own included, is a conflict.
    fn rename_chapter(&mut self, old_name: &str, new_name: &str) -> Result<Outcome>;

    // Tasks
    /// Append tasks to a chapter, creating the chapter if it does not exist.
    fn add_tasks(&mut self, chapter: &str, names: &[&str]) -> Result<Vec<Outcome>>;

    /// Remove tasks from a chapter.
    fn delete_tasks(&mut self, chapter: &str, names: &[&str]) -> Result<Vec<Outcome>>;

    /// Rename a task in place. Renaming a task to its own name succeeds.
    fn rename_task(&mut self, chapter: &str, old_name: &str, new_name: &str) -> Result<Outcome>;

    // Queries
    /// Get a chapter by exact name.
    fn get_chapter(&self, name: &str) -> Result<Option<Chapter>>;

    /// List all chapters ordered by name, each with its tasks in stored order.
    fn list_all(&self) -> Result<Vec<Chapter>>;
}

/// SQLite-backed chapter store.
///
/// Holds one connection for its whole lifetime. The connection is closed
/// when the store is dropped.
#[derive(Debug)]
pub struct SqliteChapterStore {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl SqliteChapterStore {
    /// Open (or create) the chapter database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&db_path)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        let store = Self { conn, db_path: Some(db_path) };
        store.init_schema()?;
        Ok(store)
    }

    /// Open a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn open_in_memory() -> Result<Self> {
        let store = Self { conn: Connection::open_in_memory()?, db_path: None };
        store.init_schema()?;
        Ok(store)
    }

    /// Get the database path, or `None` for an in-memory store.
    #[must_use]
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS chapters (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                tasks TEXT NOT NULL DEFAULT '[]'
            );

            CREATE UNIQUE INDEX IF NOT EXISTS idx_chapters_name ON chapters(name);
            ",
        )?;
        Ok(())
    }

    /// Decode a stored task list.
    fn decode_tasks(chapter: &str, json: &str) -> Result<Vec<Task>> {
        serde_json::from_str(json)
            .map_err(|source| Error::CorruptTasks { chapter: chapter.to_string(), source })
    }

    /// Look up a chapter and decode its tasks.
    fn find_chapter(conn: &Connection, name: &str) -> Result<Option<Chapter>> {
        let row: Option<(i64, String, String)> = conn
            .query_row(
                "SELECT id, name, tasks FROM chapters WHERE name = ?1",
                params![name],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        let Some((id, name, json)) = row else {
            return Ok(None);
        };
        let tasks = Self::decode_tasks(&name, &json)?;
        Ok(Some(Chapter { id, name, tasks }))
    }

    /// Check whether a chapter with this exact name exists.
    fn chapter_exists(conn: &Connection, name: &str) -> Result<bool> {
        let exists = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM chapters WHERE name = ?1)",
            params![name],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Insert an empty chapter and return its id.
    fn insert_chapter(conn: &Connection, name: &str) -> Result<i64> {
        conn.execute("INSERT INTO chapters (name, tasks) VALUES (?1, '[]')", params![name])?;
        Ok(conn.last_insert_rowid())
    }

    /// Overwrite a chapter's whole task list.
    fn write_tasks(conn: &Connection, chapter: &Chapter) -> Result<()> {
        let json = serde_json::to_string(&chapter.tasks)?;
        conn.execute("UPDATE chapters SET tasks = ?1 WHERE id = ?2", params![json, chapter.id])?;
        Ok(())
    }
}

impl ChapterStore for SqliteChapterStore {
    fn add_chapters(&mut self, names: &[&str]) -> Result<Vec<Outcome>> {
        let tx = self.conn.transaction()?;
        let mut outcomes = Vec::with_capacity(names.len());

        for raw in names {
            let name = raw.trim();
            if name.is_empty() {
                outcomes.push(Outcome::BlankChapterName);
                continue;
            }
            if Self::chapter_exists(&tx, name)? {
                outcomes.push(Outcome::ChapterExists { name: name.to_string() });
                continue;
            }
            Self::insert_chapter(&tx, name)?;
            outcomes.push(Outcome::ChapterAdded { name: name.to_string() });
        }

        tx.commit()?;
        Ok(outcomes)
    }

    fn delete_chapters(
        &mut self,
        names: &[&str],
        confirm: &mut dyn Confirm,
    ) -> Result<Vec<Outcome>> {
        let tx = self.conn.transaction()?;
        let mut outcomes = Vec::with_capacity(names.len());

        for raw in names {
            let name = raw.trim();
            if name.is_empty() {
                outcomes.push(Outcome::BlankChapterName);
                continue;
            }
            let Some(chapter) = Self::find_chapter(&tx, name)? else {
                outcomes.push(Outcome::ChapterNotFound { name: name.to_string() });
                continue;
            };
            let task_count = chapter.tasks.len();
            if task_count > 0 && !confirm.confirm_delete(&chapter.name, task_count) {
                outcomes.push(Outcome::DeletionCanceled { name: chapter.name });
                continue;
            }
            tx.execute("DELETE FROM chapters WHERE id = ?1", params![chapter.id])?;
            outcomes.push(Outcome::ChapterDeleted { name: chapter.name });
        }

        tx.commit()?;
        Ok(outcomes)
    }

    fn rename_chapter(&mut self, old_name: &str, new_name: &str) -> Result<Outcome> {
        let (old_name, new_name) = (old_name.trim(), new_name.trim());
        if old_name.is_empty() || new_name.is_empty() {
            return Ok(Outcome::BlankChapterName);
        }

        let tx = self.conn.transaction()?;

        let id: Option<i64> = tx
            .query_row("SELECT id FROM chapters WHERE name = ?1", params![old_name], |row| {
                row.get(0)
            })
            .optional()?;
        let Some(id) = id else {
            return Ok(Outcome::ChapterNotFound { name: old_name.to_string() });
        };

        // Checked after the lookup so a rename to the current name is a conflict.
        if Self::chapter_exists(&tx, new_name)? {
            return Ok(Outcome::ChapterExists { name: new_name.to_string() });
        }

        tx.execute("UPDATE chapters SET name = ?1 WHERE id = ?2", params![new_name, id])?;
        tx.commit()?;

        Ok(Outcome::ChapterRenamed { from: old_name.to_string(), to: new_name.to_string() })
    }

    fn add_tasks(&mut self, chapter: &str, names: &[&str]) -> Result<Vec<Outcome>> {
        let chapter_name = chapter.trim();
        if chapter_name.is_empty() {
            return Ok(vec![Outcome::BlankChapterName]);
        }
        if names.is_empty() {
            return Ok(vec![Outcome::BlankTaskName]);
        }

        let tx = self.conn.transaction()?;
        let mut outcomes = Vec::with_capacity(names.len() + 1);

        let mut chapter = if let Some(existing) = Self::find_chapter(&tx, chapter_name)? {
            existing
        } else {
            let id = Self::insert_chapter(&tx, chapter_name)?;
            outcomes.push(Outcome::ChapterCreated { name: chapter_name.to_string() });
            Chapter { id, name: chapter_name.to_string(), tasks: Vec::new() }
        };
        let original_len = chapter.tasks.len();

        for raw in names {
            let name = raw.trim();
            if name.is_empty() {
                outcomes.push(Outcome::BlankTaskName);
                continue;
            }
            if chapter.has_task(name) {
                outcomes.push(Outcome::TaskExists {
                    chapter: chapter.name.clone(),
                    task: name.to_string(),
                });
                continue;
            }
            chapter.tasks.push(Task::new(name));
            outcomes.push(Outcome::TaskAdded { chapter: chapter.name.clone(), task: name.to_string() });
        }

        if chapter.tasks.len() > original_len {
            Self::write_tasks(&tx, &chapter)?;
        }

        // An implicitly created chapter is kept even when no task was added.
        tx.commit()?;
        Ok(outcomes)
    }

    fn delete_tasks(&mut self, chapter: &str, names: &[&str]) -> Result<Vec<Outcome>> {
        let chapter_name = chapter.trim();
        if chapter_name.is_empty() {
            return Ok(vec![Outcome::BlankChapterName]);
        }
        if names.is_empty() {
            return Ok(vec![Outcome::BlankTaskName]);
        }

        let tx = self.conn.transaction()?;

        let Some(mut chapter) = Self::find_chapter(&tx, chapter_name)? else {
            return Ok(vec![Outcome::ChapterNotFound { name: chapter_name.to_string() }]);
        };
        let original_len = chapter.tasks.len();
        let mut outcomes = Vec::with_capacity(names.len());

        for raw in names {
            let name = raw.trim();
            if name.is_empty() {
                outcomes.push(Outcome::BlankTaskName);
                continue;
            }
            let before = chapter.tasks.len();
            chapter.tasks.retain(|t| t.name != name);
            let outcome = if chapter.tasks.len() < before {
                Outcome::TaskDeleted { chapter: chapter.name.clone(), task: name.to_string() }
            } else {
                Outcome::TaskNotFound { chapter: chapter.name.clone(), task: name.to_string() }
            };
            outcomes.push(outcome);
        }

        if chapter.tasks.len() < original_len {
            Self::write_tasks(&tx, &chapter)?;
            tx.commit()?;
        }

        Ok(outcomes)
    }

    fn rename_task(&mut self, chapter: &str, old_name: &str, new_name: &str) -> Result<Outcome> {
        let chapter_name = chapter.trim();
        let (old_name, new_name) = (old_name.trim(), new_name.trim());
        if chapter_name.is_empty() {
            return Ok(Outcome::BlankChapterName);
        }
        if old_name.is_empty() || new_name.is_empty() {
            return Ok(Outcome::BlankTaskName);
        }

        let tx = self.conn.transaction()?;

        let Some(mut chapter) = Self::find_chapter(&tx, chapter_name)? else {
            return Ok(Outcome::ChapterNotFound { name: chapter_name.to_string() });
        };

        let Some(index) = chapter.tasks.iter().position(|t| t.name == old_name) else {
            return Ok(Outcome::TaskNotFound {
                chapter: chapter.name,
                task: old_name.to_string(),
            });
        };

        let taken =
            chapter.tasks.iter().enumerate().any(|(i, t)| i != index && t.name == new_name);
        if taken {
            return Ok(Outcome::TaskExists { chapter: chapter.name, task: new_name.to_string() });
        }

        chapter.tasks[index].name = new_name.to_string();
        Self::write_tasks(&tx, &chapter)?;
        tx.commit()?;

        Ok(Outcome::TaskRenamed {
            chapter: chapter.name,
            from: old_name.to_string(),
            to: new_name.to_string(),
        })
    }

    fn get_chapter(&self, name: &str) -> Result<Option<Chapter>> {
        Self::find_chapter(&self.conn, name.trim())
    }

    fn list_all(&self) -> Result<Vec<Chapter>> {
        let mut stmt = self.conn.prepare("SELECT id, name, tasks FROM chapters ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
        })?;

        let mut chapters = Vec::new();
        for row in rows {
            let (id, name, json) = row?;
            let tasks = Self::decode_tasks(&name, &json)?;
            chapters.push(Chapter { id, name, tasks });
        }
        Ok(chapters)
    }
}
