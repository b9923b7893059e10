use thiserror::Error;

use crate::command::{Command, CommandKind};
use crate::datetime::{DateTimeError, parse_date, parse_date_time};
use crate::model::Description;
use crate::storage::FIELD_SEPARATOR;

pub const BY_MARKER: &str = "/by";
pub const FROM_MARKER: &str = "/from";
pub const TO_MARKER: &str = "/to";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Ugh, you didn't actually say anything. Try again.")]
    EmptyInput,
    #[error(
        "Ugh, I don't understand '{0}'. Type 'help' if you're confused. It's probably hopeless though."
    )]
    UnknownCommand(String),
    #[error("Ugh, that's not a valid number. Try '{}' instead.", .0.example())]
    NotANumber(CommandKind),
    #[error("Ugh, what's the {} for? Try '{}'.", .0.word(), .0.example())]
    MissingDescription(CommandKind),
    #[error(
        "Ugh, I can't keep a '{}' in a {} description, it breaks my notes. Try '{}'.",
        FIELD_SEPARATOR,
        .0.word(),
        .0.example()
    )]
    SeparatorInDescription(CommandKind),
    #[error("Ugh, that needs its time markers. Try '{}'.", .0.example())]
    MissingMarker(CommandKind),
    #[error("Ugh, when is it due? Try '{}'.", CommandKind::Deadline.example())]
    MissingWhen,
    #[error("Ugh, when does it start? Try '{}'.", CommandKind::Event.example())]
    MissingFrom,
    #[error("Ugh, when does it end? Try '{}'.", CommandKind::Event.example())]
    MissingTo,
    #[error("Ugh, what date do you want to view? Try '{}'.", CommandKind::View.example())]
    MissingDate,
    #[error("Ugh, find what? Try '{}'.", CommandKind::Find.example())]
    MissingKeyword,
    #[error(transparent)]
    UnparsableDateTime(#[from] DateTimeError),
}

/// Turns one raw input line into a validated [`Command`].
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let word = word.to_lowercase();
    let kind = CommandKind::from_word(&word).ok_or(ParseError::UnknownCommand(word))?;

    match kind {
        CommandKind::Bye => Ok(Command::Exit),
        CommandKind::List => Ok(Command::List),
        CommandKind::Help => Ok(Command::Help),
        CommandKind::Cheer => Ok(Command::Cheer),
        CommandKind::Mark => Ok(Command::Mark {
            number: parse_number(rest, kind)?,
            done: true,
        }),
        CommandKind::Unmark => Ok(Command::Mark {
            number: parse_number(rest, kind)?,
            done: false,
        }),
        CommandKind::Delete => Ok(Command::Delete {
            number: parse_number(rest, kind)?,
        }),
        CommandKind::Todo => Ok(Command::AddTodo {
            description: require_description(rest, kind)?,
        }),
        CommandKind::Deadline => parse_deadline(rest),
        CommandKind::Event => parse_event(rest),
        CommandKind::View => {
            if rest.is_empty() {
                return Err(ParseError::MissingDate);
            }
            Ok(Command::View {
                date: parse_date(rest)?,
            })
        }
        CommandKind::Find => {
            if rest.is_empty() {
                return Err(ParseError::MissingKeyword);
            }
            Ok(Command::Find {
                keyword: rest.to_string(),
            })
        }
    }
}

fn parse_number(rest: &str, kind: CommandKind) -> Result<usize, ParseError> {
    rest.parse().map_err(|_| ParseError::NotANumber(kind))
}

fn require_description(text: &str, kind: CommandKind) -> Result<Description, ParseError> {
    let description = Description::new(text).ok_or(ParseError::MissingDescription(kind))?;
    if description.as_str().contains(FIELD_SEPARATOR) {
        return Err(ParseError::SeparatorInDescription(kind));
    }
    Ok(description)
}

// Markers split on their first occurrence, so a description containing "/by"
// is cut short. Known limitation.
fn parse_deadline(rest: &str) -> Result<Command, ParseError> {
    let Some((description, when)) = rest.split_once(BY_MARKER) else {
        return Err(ParseError::MissingMarker(CommandKind::Deadline));
    };
    let description = require_description(description, CommandKind::Deadline)?;
    let when = when.trim();
    if when.is_empty() {
        return Err(ParseError::MissingWhen);
    }
    Ok(Command::AddDeadline {
        description,
        by: parse_date_time(when)?,
    })
}

fn parse_event(rest: &str) -> Result<Command, ParseError> {
    if !rest.contains(FROM_MARKER) || !rest.contains(TO_MARKER) {
        return Err(ParseError::MissingMarker(CommandKind::Event));
    }
    let Some((description, range)) = rest.split_once(FROM_MARKER) else {
        return Err(ParseError::MissingMarker(CommandKind::Event));
    };
    let (from, to) = range.split_once(TO_MARKER).unwrap_or((range, ""));

    let description = require_description(description, CommandKind::Event)?;
    let (from, to) = (from.trim(), to.trim());
    if from.is_empty() {
        return Err(ParseError::MissingFrom);
    }
    if to.is_empty() {
        return Err(ParseError::MissingTo);
    }
    Ok(Command::AddEvent {
        description,
        from: parse_date_time(from)?,
        to: parse_date_time(to)?,
    })
}
