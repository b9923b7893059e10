use dirs::data_local_dir;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::datetime::{from_storage, to_storage};
use crate::model::{AppConfig, Description, Task, TaskKind};
use crate::task_list::TaskList;

pub const CORRUPTED_SUFFIX: &str = ".corrupted";
pub const CONFIG_FILE: &str = "config.json";
pub const CHEER_FILE: &str = "cheer.txt";
/// Separates the fields of a stored line, so descriptions may not contain it.
pub const FIELD_SEPARATOR: char = '|';

pub fn default_data_dir() -> PathBuf {
    // ~/.local/share/monday/ on Linux
    let mut base = data_local_dir().unwrap_or_else(|| PathBuf::from("data"));
    base.push("monday");
    base
}

pub fn load_config(dir: &Path) -> AppConfig {
    let path = dir.join(CONFIG_FILE);
    let Ok(bytes) = fs::read(&path) else {
        return AppConfig::default();
    };
    serde_json::from_slice(&bytes).unwrap_or_else(|err| {
        warn!("ignoring unreadable config {}: {err}", path.display());
        AppConfig::default()
    })
}

/// Non-blank lines of the cheer file, or nothing if it can't be read.
pub fn load_cheers(dir: &Path) -> Vec<String> {
    let Ok(text) = fs::read_to_string(dir.join(CHEER_FILE)) else {
        return vec![];
    };
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Ugh. I can't {action} your data file {}: {source}", .path.display())]
    Unavailable {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    fn unavailable(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> Self {
        let path = path.to_path_buf();
        move |source| StorageError::Unavailable {
            action,
            path,
            source,
        }
    }
}

/// Why a stored line could not be turned back into a task.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorruptLine {
    #[error("expected at least 3 fields, found {0}")]
    TooFewFields(usize),
    #[error("empty description")]
    EmptyDescription,
    #[error("unknown task type '{0}'")]
    UnknownType(String),
    #[error("missing '{0}' field")]
    MissingField(&'static str),
    #[error("unreadable '{0}' date")]
    BadDate(&'static str),
    #[error("task list is full")]
    OverCapacity,
    #[error("not valid UTF-8")]
    NotUtf8,
}

#[derive(Debug, Default)]
pub struct LoadResult {
    pub tasks: TaskList,
    pub corrupted: usize,
}

impl LoadResult {
    pub fn has_corruption(&self) -> bool {
        self.corrupted > 0
    }
}

pub fn encode_task(task: &Task) -> String {
    let done = if task.done { "1" } else { "0" };
    let head = format!("{} | {done} | {}", task.kind().tag(), task.description());
    match task.kind() {
        TaskKind::Todo => head,
        TaskKind::Deadline { by } => format!("{head} | by: {}", to_storage(by)),
        TaskKind::Event { from, to } => format!(
            "{head} | from: {} | to: {}",
            to_storage(from),
            to_storage(to)
        ),
    }
}

pub fn decode_line(line: &str) -> Result<Task, CorruptLine> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
    if fields.len() < 3 {
        return Err(CorruptLine::TooFewFields(fields.len()));
    }
    let done = fields[1] == "1";
    let description = Description::new(fields[2]).ok_or(CorruptLine::EmptyDescription)?;

    let task = match fields[0] {
        "T" => Task::todo(description),
        "D" => Task::deadline(description, stored_date(&fields, 3, "by")?),
        "E" => Task::event(
            description,
            stored_date(&fields, 3, "from")?,
            stored_date(&fields, 4, "to")?,
        ),
        other => return Err(CorruptLine::UnknownType(other.to_string())),
    };
    Ok(task.with_done(done))
}

// "by: 2019-12-02 18:00" -> the part after the first colon
fn stored_date(
    fields: &[&str],
    index: usize,
    label: &'static str,
) -> Result<chrono::NaiveDateTime, CorruptLine> {
    let value = fields
        .get(index)
        .and_then(|field| field.split_once(':'))
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .ok_or(CorruptLine::MissingField(label))?;
    from_storage(value).map_err(|_| CorruptLine::BadDate(label))
}

/// Line-oriented task file plus its `.corrupted` recovery sibling.
#[derive(Clone, Debug)]
pub struct Storage {
    dir: PathBuf,
    file_name: String,
}

impl Storage {
    pub fn new(dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    pub fn corrupted_path(&self) -> PathBuf {
        self.dir.join(format!("{}{CORRUPTED_SUFFIX}", self.file_name))
    }

    pub fn load(&self) -> Result<LoadResult, StorageError> {
        let path = self.path();
        if !path.exists() {
            fs::create_dir_all(&self.dir)
                .map_err(StorageError::unavailable("create", &self.dir))?;
            fs::File::create(&path).map_err(StorageError::unavailable("create", &path))?;
            debug!("created empty data file {}", path.display());
            return Ok(LoadResult::default());
        }

        // Bytes, not a String: one bad byte must only cost its own line.
        let bytes = fs::read(&path).map_err(StorageError::unavailable("read", &path))?;
        let result = bytes
            .split(|&b| b == b'\n')
            .map(|raw| raw.strip_suffix(b"\r").unwrap_or(raw))
            .enumerate()
            .filter(|(_, raw)| !raw.trim_ascii().is_empty())
            .fold(LoadResult::default(), |mut acc, (i, raw)| {
                let decoded = std::str::from_utf8(raw)
                    .map_err(|_| CorruptLine::NotUtf8)
                    .and_then(decode_line)
                    .and_then(|task| {
                        acc.tasks
                            .add(task)
                            .map(|_| ())
                            .map_err(|_| CorruptLine::OverCapacity)
                    });
                if let Err(reason) = decoded {
                    warn!("Ugh. Skipping corrupted line {}: {reason}", i + 1);
                    acc.corrupted += 1;
                    self.quarantine(raw);
                }
                acc
            });
        debug!(
            "loaded {} tasks from {} ({} corrupted)",
            result.tasks.len(),
            path.display(),
            result.corrupted
        );
        Ok(result)
    }

    // Best effort: a failed backup must not stop the load.
    fn quarantine(&self, line: &[u8]) {
        let path = self.corrupted_path();
        let written = fs::create_dir_all(&self.dir).and_then(|_| {
            let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
            file.write_all(line)?;
            file.write_all(b"\n")
        });
        if let Err(err) = written {
            warn!("couldn't back up corrupted line to {}: {err}", path.display());
        }
    }

    /// Replaces the data file with one line per task.
    pub fn save(&self, tasks: &TaskList) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(StorageError::unavailable("create", &self.dir))?;

        let mut contents = String::new();
        for task in tasks.iter() {
            contents.push_str(&encode_task(task));
            contents.push('\n');
        }

        let path = self.path();
        let tmp = self.dir.join(format!("{}.tmp", self.file_name));
        fs::write(&tmp, contents).map_err(StorageError::unavailable("write", &tmp))?;
        fs::rename(&tmp, &path).map_err(StorageError::unavailable("replace", &path))?;
        debug!("saved {} tasks to {}", tasks.len(), path.display());
        Ok(())
    }
}
