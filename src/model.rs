use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::datetime::to_display;

pub const DEFAULT_DATA_FILE: &str = "monday.txt";

fn default_color() -> bool {
    true
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_greeting() -> bool {
    true
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default = "default_color")]
    pub color: bool,
    /// File name of the task list inside the data directory.
    #[serde(default = "default_data_file")]
    pub data_file: String,
    #[serde(default = "default_greeting")]
    pub greeting: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            data_file: default_data_file(),
            greeting: default_greeting(),
        }
    }
}

/// A task description that is known to be non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    pub fn new(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TaskKind {
    Todo,
    Deadline {
        by: NaiveDateTime,
    },
    /// `to` is not required to come after `from`.
    Event {
        from: NaiveDateTime,
        to: NaiveDateTime,
    },
}

impl TaskKind {
    /// Single-letter tag used both on screen and in the data file.
    pub fn tag(&self) -> char {
        match self {
            TaskKind::Todo => 'T',
            TaskKind::Deadline { .. } => 'D',
            TaskKind::Event { .. } => 'E',
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    description: Description,
    kind: TaskKind,
    pub done: bool,
}

impl Task {
    pub fn new(description: Description, kind: TaskKind) -> Self {
        Self {
            description,
            kind,
            done: false,
        }
    }

    pub fn todo(description: Description) -> Self {
        Self::new(description, TaskKind::Todo)
    }

    pub fn deadline(description: Description, by: NaiveDateTime) -> Self {
        Self::new(description, TaskKind::Deadline { by })
    }

    pub fn event(description: Description, from: NaiveDateTime, to: NaiveDateTime) -> Self {
        Self::new(description, TaskKind::Event { from, to })
    }

    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    /// Deadlines match on their due date, events on their start date only.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        match self.kind {
            TaskKind::Todo => false,
            TaskKind::Deadline { by } => by.date() == date,
            TaskKind::Event { from, .. } => from.date() == date,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.done { 'X' } else { ' ' };
        write!(f, "[{}][{status}] {}", self.kind.tag(), self.description)?;
        match &self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { by } => write!(f, " (by: {})", to_display(by)),
            TaskKind::Event { from, to } => {
                write!(f, " (from: {} to: {})", to_display(from), to_display(to))
            }
        }
    }
}
