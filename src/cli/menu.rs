//! Interactive numbered menu.
//!
//! Reads choices and arguments line by line, runs one command per choice,
//! and returns to the menu until the user exits or input ends.

use crate::chapters::ChapterStore;
use crate::cli::run::execute;
use crate::cli::Command;
use crate::event_logging::EventLog;
use crate::traits::Confirm;
use std::io::{self, BufRead, Write};

const MENU: [&str; 9] = [
    "Task Manager",
    "1. List all chapters and tasks",
    "2. Add chapters (separate by ;)",
    "3. Delete chapters (separate by ;)",
    "4. Rename a chapter",
    "5. Add tasks to a chapter (separate by ;)",
    "6. Delete tasks from a chapter (separate by ;)",
    "7. Rename a task",
    "8. Exit",
];

/// Asks the user before deleting a chapter that still holds tasks.
///
/// Only the answer `y` (case-insensitive, surrounding whitespace ignored)
/// proceeds. End of input or a read error declines.
#[derive(Debug)]
pub struct PromptConfirm<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> PromptConfirm<'a, R, W> {
    /// Create a prompt that reads answers from `input` and writes to `output`.
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<'_, R, W> {
    fn confirm_delete(&mut self, chapter: &str, task_count: usize) -> bool {
        let question = format!(
            "Chapter '{chapter}' contains {task_count} task(s). \
             Are you sure you want to delete it? (y/n): "
        );
        match read_answer(&mut *self.input, &mut *self.output, &question) {
            Ok(Some(answer)) => answer.to_lowercase() == "y",
            _ => false,
        }
    }
}

/// Write a prompt and read one trimmed line. `None` means end of input.
fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// The interactive menu loop.
#[derive(Debug)]
pub struct Menu<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    /// Create a menu over the given input and output streams.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the menu and return its output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user chooses exit or input ends.
    ///
    /// Store errors are reported and the loop continues.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run(&mut self, store: &mut dyn ChapterStore, log: &EventLog) -> io::Result<()> {
        loop {
            writeln!(self.output)?;
            for line in MENU {
                writeln!(self.output, "{line}")?;
            }

            let Some(choice) = self.prompt("Enter your choice (1-8): ")? else {
                break;
            };
            if choice == "8" {
                break;
            }

            let Some(command) = self.read_command(&choice)? else {
                if matches!(choice.as_str(), "1" | "2" | "3" | "4" | "5" | "6" | "7") {
                    // Input ended while collecting arguments.
                    break;
                }
                writeln!(self.output, "Invalid choice. Please enter 1, 2, 3, 4, 5, 6, 7, or 8.")?;
                continue;
            };

            let result = {
                let mut confirm = PromptConfirm::new(&mut self.input, &mut self.output);
                execute(&command, store, &mut confirm, log)
            };
            match result {
                Ok(lines) => {
                    for line in lines {
                        writeln!(self.output, "{line}")?;
                    }
                }
                Err(message) => writeln!(self.output, "{message}")?,
            }
        }

        writeln!(self.output, "Exiting...")?;
        self.output.flush()
    }

    /// Collect the arguments for a menu choice.
    ///
    /// Returns `None` for an unknown choice or when input ends.
    fn read_command(&mut self, choice: &str) -> io::Result<Option<Command>> {
        let command = match choice {
            "1" => Some(Command::List { json: false }),
            "2" => self
                .prompt("Enter chapter names (e.g., Chapter 1;Chapter 2): ")?
                .map(|names| Command::AddChapters { names }),
            "3" => self
                .prompt("Enter chapter names to delete (e.g., Chapter 1;Chapter 2): ")?
                .map(|names| Command::DeleteChapters { names, yes: false }),
            "4" => {
                let Some(old) = self.prompt("Enter current chapter name (e.g., Chapter 1): ")?
                else {
                    return Ok(None);
                };
                self.prompt("Enter new chapter name: ")?
                    .map(|new| Command::RenameChapter { old, new })
            }
            "5" => {
                let Some(chapter) = self.prompt("Enter chapter name (e.g., Chapter 1): ")? else {
                    return Ok(None);
                };
                self.prompt("Enter task names (e.g., Task 1.1;Task 1.2): ")?
                    .map(|names| Command::AddTasks { chapter, names })
            }
            "6" => {
                let Some(chapter) = self.prompt("Enter chapter name (e.g., Chapter 1): ")? else {
                    return Ok(None);
                };
                self.prompt("Enter task names to delete (e.g., Task 1.1;Task 1.2): ")?
                    .map(|names| Command::DeleteTasks { chapter, names })
            }
            "7" => {
                let Some(chapter) = self.prompt("Enter chapter name (e.g., Chapter 1): ")? else {
                    return Ok(None);
                };
                let Some(old) = self.prompt("Enter current task name (e.g., Task 1.1): ")? else {
                    return Ok(None);
                };
                self.prompt("Enter new task name: ")?
                    .map(|new| Command::RenameTask { chapter, old, new })
            }
            _ => None,
        };
        Ok(command)
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        read_answer(&mut self.input, &mut self.output, text)
    }
}
