//! # Console I/O
//!
//! Every prompt and message goes through the [`Console`] trait so the same
//! menus run on a real terminal and under test.
//!
//! - [`TerminalConsole`]: dialoguer prompts with coloured output. Falls back
//!   to plain line reads when stdin is not a terminal (piped input).
//! - [`ScriptedConsole`]: answers from a fixed list and records everything
//!   that was shown.

use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

use colored::Colorize;
use dialoguer::{Input, Password};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// End of input (EOF or Ctrl-C).
    #[error("Input closed")]
    Closed,

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

pub trait Console {
    /// Reads one line of input. The answer is not trimmed.
    fn read_line(&mut self, prompt: &str) -> ConsoleResult<String>;

    /// Reads a password without echoing it.
    fn read_secret(&mut self, prompt: &str) -> ConsoleResult<String>;

    fn say(&mut self, line: &str);

    fn heading(&mut self, title: &str);

    fn success(&mut self, line: &str);

    fn error(&mut self, line: &str);
}

// =============================================================================
// Terminal
// =============================================================================

pub struct TerminalConsole {
    interactive: bool,
}

impl TerminalConsole {
    pub fn new() -> Self {
        TerminalConsole {
            interactive: io::stdin().is_terminal(),
        }
    }

    fn read_plain(&self, prompt: &str) -> ConsoleResult<String> {
        print!("{}: ", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(ConsoleError::Closed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl From<dialoguer::Error> for ConsoleError {
    fn from(err: dialoguer::Error) -> Self {
        let closed = std::error::Error::source(&err)
            .and_then(|source| source.downcast_ref::<io::Error>())
            .is_some_and(|e| {
                matches!(
                    e.kind(),
                    io::ErrorKind::UnexpectedEof | io::ErrorKind::Interrupted
                )
            });

        if closed {
            ConsoleError::Closed
        } else {
            ConsoleError::Io(io::Error::other(err.to_string()))
        }
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> ConsoleResult<String> {
        if !self.interactive {
            return self.read_plain(prompt);
        }
        Ok(Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?)
    }

    fn read_secret(&mut self, prompt: &str) -> ConsoleResult<String> {
        if !self.interactive {
            return self.read_plain(prompt);
        }
        Ok(Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?)
    }

    fn say(&mut self, line: &str) {
        println!("{}", line);
    }

    fn heading(&mut self, title: &str) {
        println!();
        println!("{}", format!("=== {} ===", title).bright_blue().bold());
    }

    fn success(&mut self, line: &str) {
        println!("{}", format!("✓ {}", line).green());
    }

    fn error(&mut self, line: &str) {
        println!("{}", format!("✗ {}", line).red());
    }
}

// =============================================================================
// Scripted
// =============================================================================

/// Console fed from a list of answers. Runs out of answers like a closed stdin.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedConsole {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Everything shown so far, one entry per line or prompt.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn output(&self) -> String {
        self.transcript.join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next_answer(&mut self, prompt: &str) -> ConsoleResult<String> {
        self.transcript.push(format!("{}:", prompt));
        self.answers.pop_front().ok_or(ConsoleError::Closed)
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> ConsoleResult<String> {
        self.next_answer(prompt)
    }

    fn read_secret(&mut self, prompt: &str) -> ConsoleResult<String> {
        self.next_answer(prompt)
    }

    fn say(&mut self, line: &str) {
        self.transcript.push(line.to_string());
    }

    fn heading(&mut self, title: &str) {
        self.transcript.push(format!("=== {} ===", title));
    }

    fn success(&mut self, line: &str) {
        self.transcript.push(format!("OK {}", line));
    }

    fn error(&mut self, line: &str) {
        self.transcript.push(format!("ERROR {}", line));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_console_replays_answers() {
        let mut console = ScriptedConsole::new(["first", "second"]);
        assert_eq!(console.read_line("One").unwrap(), "first");
        assert_eq!(console.read_secret("Two").unwrap(), "second");
        assert!(matches!(console.read_line("Three"), Err(ConsoleError::Closed)));
        assert_eq!(console.transcript(), ["One:", "Two:", "Three:"]);
    }

    #[test]
    fn test_scripted_console_records_messages() {
        let mut console = ScriptedConsole::new(Vec::<String>::new());
        console.heading("Rent a game");
        console.success("Rental successful!");
        console.error("Invalid choice");

        assert!(console.contains("=== Rent a game ==="));
        assert!(console.contains("OK Rental successful!"));
        assert!(console.contains("ERROR Invalid choice"));
    }
}
