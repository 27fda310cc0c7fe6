//! Testing utilities and mock implementations.
//!
//! These types are provided for use in tests. They may appear unused in
//! the library itself but are consumed by unit and integration tests.

#![allow(dead_code)]

use crate::traits::Confirm;
use std::collections::VecDeque;

/// A scripted confirmation strategy.
///
/// Answers deletion prompts from a queue of pre-recorded decisions and
/// records every prompt it receives. Once the queue is empty it declines,
/// like any confirmation that cannot get an answer.
#[derive(Debug, Default)]
pub struct MockConfirm {
    answers: VecDeque<bool>,
    prompts: Vec<(String, usize)>,
}

impl MockConfirm {
    /// Create a mock with no scripted answers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer for the next prompt.
    pub fn answer(&mut self, proceed: bool) {
        self.answers.push_back(proceed);
    }

    /// Prompts received so far, as `(chapter, task_count)` pairs.
    #[must_use]
    pub fn prompts(&self) -> &[(String, usize)] {
        &self.prompts
    }

    /// Verify every scripted answer was consumed.
    ///
    /// # Panics
    ///
    /// Panics if answers remain in the queue.
    pub fn verify(&self) {
        assert!(
            self.answers.is_empty(),
            "Expected {} more confirmation prompts, but none were made",
            self.answers.len()
        );
    }
}

impl Confirm for MockConfirm {
    fn confirm_delete(&mut self, chapter: &str, task_count: usize) -> bool {
        self.prompts.push((chapter.to_string(), task_count));
        self.answers.pop_front().unwrap_or(false)
    }
}
