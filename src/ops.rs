use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::store;
use crate::string_set::StringSet;
use crate::variants::is_palindrome;

/// One parsed line of the interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Discard(String),
    Contains(String),
    Palindrome(String),
    /// `.` ends the session.
    Stop,
}

/// Parse a session line. Accepts both `+ word` and `+word`; the word is
/// trimmed and lower-cased. Returns `None` for lines that carry no command
/// (blank, too short, unknown operation).
pub fn parse_line(line: &str) -> Option<Command> {
    let line = line.trim();
    if line == "." {
        return Some(Command::Stop);
    }
    let mut chars = line.chars();
    let op = chars.next()?;
    let rest = chars.as_str();
    if rest.is_empty() {
        return None;
    }
    let word = rest.trim().to_lowercase();
    match op {
        '+' => Some(Command::Add(word)),
        '-' => Some(Command::Discard(word)),
        '?' => Some(Command::Contains(word)),
        'p' => Some(Command::Palindrome(word)),
        _ => None,
    }
}

fn yes_no(answer: bool) -> &'static str {
    if answer {
        "yes"
    } else {
        "no"
    }
}

/// Summary of a finished session.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub commands: usize,
    pub changes: usize,
}

/// Drives one [`StringSet`] from a stream of command lines, optionally
/// mirroring every change into a word store.
pub struct Session {
    set: StringSet,
    store: Option<PathBuf>,
}

impl Session {
    pub fn new(set: StringSet, store: Option<PathBuf>) -> Self {
        Self { set, store }
    }

    /// Build a session seeded from `store` (if given).
    /// The store is read on the blocking pool.
    pub async fn open(initial_pow: u32, store: Option<PathBuf>) -> Result<Self> {
        let seed_path = store.clone();
        let set = tokio::task::spawn_blocking(move || -> Result<StringSet> {
            let mut set = StringSet::with_capacity_pow(initial_pow);
            if let Some(path) = seed_path {
                store::load(&path, &mut set)?;
            }
            Ok(set)
        })
        .await
        .context("Store loader panicked")??;
        Ok(Self::new(set, store))
    }

    pub fn set(&self) -> &StringSet {
        &self.set
    }

    /// Apply one command, writing any answer to `out`. Returns whether the set changed.
    pub async fn apply<W>(&mut self, command: &Command, out: &mut W) -> Result<bool>
    where
        W: AsyncWrite + Unpin,
    {
        let (changed, answer) = match command {
            Command::Add(word) => (self.set.add(word), None),
            Command::Discard(word) => (self.set.discard(word), None),
            Command::Contains(word) => (false, Some(self.set.contains(word))),
            Command::Palindrome(word) => (false, Some(is_palindrome(word))),
            Command::Stop => (false, None),
        };

        if let Some(answer) = answer {
            out.write_all(yes_no(answer).as_bytes())
                .await
                .context("Failed to write answer")?;
            out.write_all(b"\n").await.context("Failed to write answer")?;
        }

        if changed {
            if let Some(path) = &self.store {
                store::save(path, &self.set).await?;
            }
        }
        Ok(changed)
    }

    /// Read commands until EOF or `.`.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<SessionSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut summary = SessionSummary::default();
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await.context("Failed to read input")? {
            let Some(command) = parse_line(&line) else {
                continue;
            };
            if command == Command::Stop {
                break;
            }
            summary.commands += 1;
            if self.apply(&command, out).await? {
                summary.changes += 1;
            }
        }
        out.flush().await.context("Failed to flush output")?;
        log::debug!(
            "session finished: {} commands, {} changes, {} words",
            summary.commands,
            summary.changes,
            self.set.len()
        );
        Ok(summary)
    }
}
