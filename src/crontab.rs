use crate::{schedule::Schedule, Error, Result};
use chrono::{NaiveDateTime, TimeDelta};
use std::{fmt::Display, str::FromStr};
use tracing::debug;

/// Single crontab entry: a schedule plus the command it is supposed to run.
///
/// The command is kept verbatim, including any inner whitespace and special
/// characters; this crate never executes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub struct Entry {
    schedule: Schedule,
    command: String,
}

impl Entry {
    /// Parses and validates a raw crontab line: five whitespace separated
    /// schedule fields (or a single `@` alias) followed by the command, which
    /// occupies the whole remainder of the line.
    ///
    /// Returns [`Error::NotAnEntry`] if the line does not have that shape,
    /// which is the case for comments, blank lines and environment
    /// assignments; field errors are returned as is.
    pub fn new(line: impl Into<String>) -> Result<Self> {
        let line = line.into();
        let trimmed = line.trim();

        let field_count = if trimmed.starts_with('@') { 1 } else { 5 };
        let (fields, command) = split_line(trimmed, field_count).ok_or_else(|| Error::NotAnEntry(line.clone()))?;

        Ok(Self {
            schedule: Schedule::new(fields.join(" "))?,
            command: command.to_owned(),
        })
    }

    /// Returns the entry's schedule.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Returns the entry's command string.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Returns `true` if the provided `time` satisfies the entry's schedule.
    #[inline]
    pub fn matches(&self, time: &NaiveDateTime) -> bool {
        self.schedule.matches(time)
    }

    /// Returns time of the entry's next run strictly after the provided `after` value.
    #[inline]
    pub fn upcoming(&self, after: &NaiveDateTime) -> Option<NaiveDateTime> {
        self.schedule.upcoming(after)
    }

    /// Same as [`upcoming`](Entry::upcoming), with the current local time as the reference.
    #[inline]
    pub fn upcoming_from_now(&self) -> Option<NaiveDateTime> {
        self.schedule.upcoming_from_now()
    }

    /// Returns iterator of the entry's run times strictly after `after`.
    #[inline]
    pub fn iter(&self, after: &NaiveDateTime) -> impl Iterator<Item = NaiveDateTime> {
        self.schedule.iter(after)
    }
}

impl From<Entry> for String {
    fn from(value: Entry) -> Self {
        value.to_string()
    }
}

impl From<&Entry> for String {
    fn from(value: &Entry) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Entry {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Entry {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl FromStr for Entry {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.schedule, self.command)
    }
}

/// Splits a line into `count` whitespace separated tokens plus the non-empty
/// remainder, with the remainder's inner whitespace preserved.
fn split_line(line: &str, count: usize) -> Option<(Vec<&str>, &str)> {
    let mut rest = line;
    let mut tokens = Vec::with_capacity(count);

    for _ in 0..count {
        let token_end = rest.find(char::is_whitespace)?;
        tokens.push(&rest[..token_end]);
        rest = rest[token_end..].trim_start();
    }

    if rest.is_empty() {
        None
    } else {
        Some((tokens, rest))
    }
}

/// Set of crontab entries with the non-schedule lines filtered out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Crontab {
    entries: Vec<Entry>,
}

impl Crontab {
    /// Builds a crontab from an ordered sequence of raw text lines.
    ///
    /// Every line that fails to parse as an entry (comment, blank line,
    /// environment assignment, malformed schedule) is skipped with a debug
    /// record, so a single bad line never aborts processing of the rest.
    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let entries = lines
            .into_iter()
            .filter_map(|line| {
                let line = line.as_ref();
                match Entry::new(line) {
                    Ok(entry) => Some(entry),
                    Err(error) => {
                        debug!(%error, line, "skipping line without schedule entry");
                        None
                    }
                }
            })
            .collect();

        Self { entries }
    }

    /// Builds a crontab from a whole text, line by line.
    pub fn parse(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    /// Returns parsed entries, in the order they appeared in the input.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the next run of every entry strictly after `now`, sorted
    /// ascending by run time.
    ///
    /// Entries without an upcoming run (unsatisfiable schedules) are omitted.
    pub fn upcoming_runs(&self, now: &NaiveDateTime) -> Vec<UpcomingRun<'_>> {
        let mut runs: Vec<UpcomingRun> = self
            .entries
            .iter()
            .filter_map(|entry| {
                entry.upcoming(now).map(|at| UpcomingRun {
                    entry,
                    at,
                    until: at - *now,
                })
            })
            .collect();

        runs.sort_by_key(|run| run.at);
        runs
    }
}

/// One entry's upcoming run: when it fires and how far away that is.
#[derive(Debug, Clone)]
pub struct UpcomingRun<'a> {
    /// The entry due to run.
    pub entry: &'a Entry,
    /// Time of the run.
    pub at: NaiveDateTime,
    /// Duration between the reference time and the run.
    pub until: TimeDelta,
}
