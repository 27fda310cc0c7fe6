//! Collaborator traits for testability and abstraction.

/// Decides whether a chapter that still holds tasks may be deleted.
///
/// The store asks once per non-empty chapter during
/// [`ChapterStore::delete_chapters`](crate::chapters::ChapterStore::delete_chapters).
/// Empty chapters are deleted without asking. Implementations that cannot
/// get an answer must return `false`.
pub trait Confirm {
    /// Return `true` to delete `chapter` together with its `task_count` tasks.
    fn confirm_delete(&mut self, chapter: &str, task_count: usize) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str, usize) -> bool,
{
    fn confirm_delete(&mut self, chapter: &str, task_count: usize) -> bool {
        self(chapter, task_count)
    }
}

/// Declines every deletion. The default for non-interactive use.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl Confirm for DenyAll {
    fn confirm_delete(&mut self, _chapter: &str, _task_count: usize) -> bool {
        false
    }
}

/// Approves every deletion.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl Confirm for AllowAll {
    fn confirm_delete(&mut self, _chapter: &str, _task_count: usize) -> bool {
        true
    }
}
