use chrono::{NaiveDate, NaiveDateTime};

use crate::model::Description;

/// Every command word the assistant understands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Bye,
    List,
    Mark,
    Unmark,
    Todo,
    Deadline,
    Event,
    Delete,
    View,
    Find,
    Help,
    Cheer,
}

pub struct CommandSpec {
    /// Primary word first, then aliases.
    pub words: &'static [&'static str],
    pub usage: &'static str,
    pub summary: &'static str,
    pub example: &'static str,
}

impl CommandKind {
    /// Lookup and help order.
    pub const ALL: [CommandKind; 12] = [
        CommandKind::Todo,
        CommandKind::Deadline,
        CommandKind::Event,
        CommandKind::List,
        CommandKind::Find,
        CommandKind::View,
        CommandKind::Mark,
        CommandKind::Unmark,
        CommandKind::Delete,
        CommandKind::Cheer,
        CommandKind::Help,
        CommandKind::Bye,
    ];

    pub fn spec(self) -> &'static CommandSpec {
        match self {
            CommandKind::Bye => &CommandSpec {
                words: &["bye", "exit"],
                usage: "bye / exit",
                summary: "Get rid of me",
                example: "bye",
            },
            CommandKind::List => &CommandSpec {
                words: &["list"],
                usage: "list",
                summary: "Show all tasks",
                example: "list",
            },
            CommandKind::Mark => &CommandSpec {
                words: &["mark"],
                usage: "mark <number>",
                summary: "Mark task as done",
                example: "mark 1",
            },
            CommandKind::Unmark => &CommandSpec {
                words: &["unmark"],
                usage: "unmark <number>",
                summary: "Mark task as not done",
                example: "unmark 1",
            },
            CommandKind::Todo => &CommandSpec {
                words: &["todo"],
                usage: "todo <description>",
                summary: "Add a todo task",
                example: "todo borrow book",
            },
            CommandKind::Deadline => &CommandSpec {
                words: &["deadline"],
                usage: "deadline <desc> /by <time>",
                summary: "Add a deadline task",
                example: "deadline return book /by 2019-12-02 1800",
            },
            CommandKind::Event => &CommandSpec {
                words: &["event"],
                usage: "event <desc> /from <start> /to <end>",
                summary: "Add an event",
                example: "event project meeting /from 2019-12-25 1400 /to 2019-12-25 1800",
            },
            CommandKind::Delete => &CommandSpec {
                words: &["delete"],
                usage: "delete <number>",
                summary: "Delete a task (no going back)",
                example: "delete 1",
            },
            CommandKind::View => &CommandSpec {
                words: &["view"],
                usage: "view <date>",
                summary: "Show tasks for a specific date (yyyy-MM-dd or d/M/yyyy)",
                example: "view 2019-12-25",
            },
            CommandKind::Find => &CommandSpec {
                words: &["find"],
                usage: "find <keyword>",
                summary: "Find tasks by keyword",
                example: "find book",
            },
            CommandKind::Help => &CommandSpec {
                words: &["help"],
                usage: "help",
                summary: "Show this help (you're welcome)",
                example: "help",
            },
            CommandKind::Cheer => &CommandSpec {
                words: &["cheer"],
                usage: "cheer",
                summary: "Get some grudging encouragement",
                example: "cheer",
            },
        }
    }

    pub fn from_word(word: &str) -> Option<CommandKind> {
        CommandKind::ALL
            .into_iter()
            .find(|kind| kind.spec().words.iter().any(|w| w.eq_ignore_ascii_case(word)))
    }

    pub fn word(self) -> &'static str {
        self.spec().words[0]
    }

    pub fn example(self) -> &'static str {
        self.spec().example
    }
}

/// A fully validated command, ready to execute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Exit,
    List,
    Mark { number: usize, done: bool },
    AddTodo { description: Description },
    AddDeadline { description: Description, by: NaiveDateTime },
    AddEvent {
        description: Description,
        from: NaiveDateTime,
        to: NaiveDateTime,
    },
    Delete { number: usize },
    View { date: NaiveDate },
    Find { keyword: String },
    Help,
    Cheer,
}

/// Help text built from the command table.
pub fn help_text() -> String {
    let width = CommandKind::ALL
        .iter()
        .map(|k| k.spec().usage.len())
        .max()
        .unwrap_or(0);
    let mut lines = vec!["Ugh. Fine. Here's what I understand (not that you'll listen):".to_string()];
    for kind in CommandKind::ALL {
        let spec = kind.spec();
        lines.push(format!("  {:<width$} - {}", spec.usage, spec.summary));
    }
    lines.join("\n")
}
