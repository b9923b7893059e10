use chrono::Timelike;
use thiserror::Error;

use crate::command::{Command, help_text};
use crate::datetime::date_to_display;
use crate::model::Task;
use crate::task_list::{TaskList, TaskListError};

pub const DEFAULT_CHEER: &str =
    "Congratulations on doing the bare minimum. That's still more than most people manage.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    #[error(transparent)]
    TaskList(#[from] TaskListError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
    pub should_persist: bool,
    pub should_exit: bool,
    /// Set for cheer quotes so the display layer can highlight them.
    pub is_cheer: bool,
}

impl Outcome {
    fn read_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            should_persist: false,
            should_exit: false,
            is_cheer: false,
        }
    }

    fn changed(message: impl Into<String>) -> Self {
        Self {
            should_persist: true,
            ..Self::read_only(message)
        }
    }
}

/// Applies parsed commands to a task list.
#[derive(Clone, Debug, Default)]
pub struct Executor {
    save_on_exit: bool,
    cheers: Vec<String>,
}

impl Executor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces `bye` to persist, so lines dropped during load leave the data file.
    pub fn with_save_on_exit(mut self, save_on_exit: bool) -> Self {
        self.save_on_exit = save_on_exit;
        self
    }

    pub fn with_cheers(mut self, cheers: Vec<String>) -> Self {
        self.cheers = cheers;
        self
    }

    pub fn execute(&self, command: Command, tasks: &mut TaskList) -> Result<Outcome, ExecError> {
        match command {
            Command::Exit => Ok(Outcome {
                should_exit: true,
                should_persist: self.save_on_exit,
                ..Outcome::read_only("Finally, you're leaving. Don't come back too soon.")
            }),
            Command::List => {
                if tasks.is_empty() {
                    return Ok(Outcome::read_only(TaskListError::Empty.to_string()));
                }
                let all: Vec<&Task> = tasks.iter().collect();
                Ok(Outcome::read_only(numbered(&all)))
            }
            Command::Mark { number, done } => {
                let task = if done {
                    tasks.mark_done(number)?
                } else {
                    tasks.mark_not_done(number)?
                };
                let header = if done {
                    "Fine. I've marked this task as done:"
                } else {
                    "Ugh, I've marked this task as not done:"
                };
                Ok(Outcome::changed(format!("{header}\n  {task}")))
            }
            Command::AddTodo { description } => add(tasks, || Task::todo(description)),
            Command::AddDeadline { description, by } => {
                add(tasks, || Task::deadline(description, by))
            }
            Command::AddEvent {
                description,
                from,
                to,
            } => add(tasks, || Task::event(description, from, to)),
            Command::Delete { number } => {
                let task = tasks.delete(number)?;
                Ok(Outcome::changed(format!(
                    "Noted. I've removed this task:\n  {task}\n{}",
                    count_line(tasks.len())
                )))
            }
            Command::View { date } => {
                let found = tasks.filter_by_date(date);
                let day = date_to_display(&date);
                if found.is_empty() {
                    return Ok(Outcome::read_only(format!(
                        "Skeptical. Nothing scheduled for {day}."
                    )));
                }
                Ok(Outcome::read_only(format!(
                    "Ugh. Here's what you have on {day}:\n{}",
                    numbered(&found)
                )))
            }
            Command::Find { keyword } => {
                let found = tasks.find(&keyword);
                if found.is_empty() {
                    return Ok(Outcome::read_only(format!(
                        "Fine. No tasks match \"{keyword}\". Shocking, I know."
                    )));
                }
                Ok(Outcome::read_only(format!(
                    "Here are the matching tasks in your list:\n{}",
                    numbered(&found)
                )))
            }
            Command::Help => Ok(Outcome::read_only(help_text())),
            Command::Cheer => Ok(Outcome {
                is_cheer: true,
                ..Outcome::read_only(self.pick_cheer())
            }),
        }
    }

    fn pick_cheer(&self) -> &str {
        if self.cheers.is_empty() {
            return DEFAULT_CHEER;
        }
        let seed = chrono::Local::now().nanosecond() as usize;
        &self.cheers[seed % self.cheers.len()]
    }
}

// Capacity is checked before the task is built.
fn add(tasks: &mut TaskList, build: impl FnOnce() -> Task) -> Result<Outcome, ExecError> {
    tasks.ensure_capacity()?;
    let task = build();
    let line = task.to_string();
    let len = tasks.add(task)?;
    Ok(Outcome::changed(format!(
        "Fine. I've added this task:\n  {line}\n{}",
        count_line(len)
    )))
}

fn count_line(len: usize) -> String {
    let unit = if len == 1 { "task" } else { "tasks" };
    format!("Now you have {len} {unit} in the list.")
}

fn numbered(tasks: &[&Task]) -> String {
    tasks
        .iter()
        .enumerate()
        .map(|(i, task)| format!("{}. {task}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn run(executor: &Executor, tasks: &mut TaskList, line: &str) -> Result<Outcome, ExecError> {
        executor.execute(parse(line).unwrap(), tasks)
    }

    fn three_tasks() -> TaskList {
        let executor = Executor::new();
        let mut tasks = TaskList::new();
        for line in [
            "todo read book",
            "deadline return book /by 2019-12-02 1800",
            "event project meeting /from 2019-12-25 1400 /to 2019-12-25 1800",
        ] {
            run(&executor, &mut tasks, line).unwrap();
        }
        tasks
    }

    #[test]
    fn add_persists_and_counts() {
        let executor = Executor::new();
        let mut tasks = TaskList::new();
        let outcome = run(&executor, &mut tasks, "todo read book").unwrap();
        assert!(outcome.should_persist);
        assert!(!outcome.should_exit);
        assert_eq!(
            outcome.message,
            "Fine. I've added this task:\n  [T][ ] read book\nNow you have 1 task in the list."
        );
        let outcome = run(&executor, &mut tasks, "todo write essay").unwrap();
        assert!(outcome.message.ends_with("Now you have 2 tasks in the list."));
    }

    #[test]
    fn add_at_capacity_is_rejected() {
        let executor = Executor::new();
        let mut tasks = TaskList::new();
        for i in 0..crate::task_list::MAX_TASKS {
            run(&executor, &mut tasks, &format!("todo task {i}")).unwrap();
        }
        let err = run(&executor, &mut tasks, "todo one more").unwrap_err();
        assert_eq!(
            err,
            ExecError::TaskList(TaskListError::CapacityExceeded {
                max: crate::task_list::MAX_TASKS
            })
        );
        assert_eq!(tasks.len(), crate::task_list::MAX_TASKS);
    }

    #[test]
    fn mark_out_of_range_names_the_bounds() {
        let executor = Executor::new();
        let mut tasks = three_tasks();
        for line in ["mark 0", "mark 999"] {
            let err = run(&executor, &mut tasks, line).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Ugh, that task doesn't exist. Pick between 1 and 3."
            );
        }
    }

    #[test]
    fn mark_on_empty_list_says_nothing_to_do() {
        let executor = Executor::new();
        let mut tasks = TaskList::new();
        let err = run(&executor, &mut tasks, "mark 1").unwrap_err();
        assert_eq!(err, ExecError::TaskList(TaskListError::Empty));
        assert_eq!(
            err.to_string(),
            "Skeptical. You haven't told me to do anything yet."
        );
    }

    #[test]
    fn mark_unmark_delete_persist() {
        let executor = Executor::new();
        let mut tasks = three_tasks();

        let outcome = run(&executor, &mut tasks, "mark 2").unwrap();
        assert!(outcome.should_persist);
        assert!(outcome.message.contains("[D][X] return book"));

        let outcome = run(&executor, &mut tasks, "unmark 2").unwrap();
        assert!(outcome.message.starts_with("Ugh, I've marked this task as not done:"));
        assert!(!tasks.get(2).unwrap().done);

        let outcome = run(&executor, &mut tasks, "delete 1").unwrap();
        assert!(outcome.should_persist);
        assert!(outcome.message.contains("[T][ ] read book"));
        assert!(outcome.message.ends_with("Now you have 2 tasks in the list."));
        assert_eq!(tasks.len(), 2);
    }

    #[test]
    fn read_only_commands_do_not_persist() {
        let executor = Executor::new();
        let mut tasks = three_tasks();
        for line in ["list", "view 2019-12-25", "find book", "help", "cheer"] {
            let outcome = run(&executor, &mut tasks, line).unwrap();
            assert!(!outcome.should_persist, "{line}");
            assert!(!outcome.should_exit, "{line}");
        }
        assert_eq!(tasks, three_tasks());
    }

    #[test]
    fn list_numbers_tasks_in_order() {
        let executor = Executor::new();
        let mut tasks = three_tasks();
        let outcome = run(&executor, &mut tasks, "list").unwrap();
        let lines: Vec<&str> = outcome.message.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "1. [T][ ] read book");
        assert!(lines[2].starts_with("3. [E]"));
    }

    #[test]
    fn list_on_empty() {
        let executor = Executor::new();
        let outcome = run(&executor, &mut TaskList::new(), "list").unwrap();
        assert_eq!(
            outcome.message,
            "Skeptical. You haven't told me to do anything yet."
        );
    }

    #[test]
    fn view_and_find_messages() {
        let executor = Executor::new();
        let mut tasks = three_tasks();

        let outcome = run(&executor, &mut tasks, "view 25/12/2019").unwrap();
        assert!(outcome.message.starts_with("Ugh. Here's what you have on Dec 25 2019:"));
        assert!(outcome.message.contains("1. [E][ ] project meeting"));

        let outcome = run(&executor, &mut tasks, "view 2020-01-01").unwrap();
        assert_eq!(outcome.message, "Skeptical. Nothing scheduled for Jan 01 2020.");

        let outcome = run(&executor, &mut tasks, "find BOOK").unwrap();
        assert_eq!(outcome.message.lines().count(), 3);

        let outcome = run(&executor, &mut tasks, "find piano").unwrap();
        assert_eq!(
            outcome.message,
            "Fine. No tasks match \"piano\". Shocking, I know."
        );
    }

    #[test]
    fn exit_persists_only_after_corrupt_load() {
        let mut tasks = TaskList::new();
        let outcome = run(&Executor::new(), &mut tasks, "bye").unwrap();
        assert!(outcome.should_exit);
        assert!(!outcome.should_persist);

        let executor = Executor::new().with_save_on_exit(true);
        let outcome = run(&executor, &mut tasks, "exit").unwrap();
        assert!(outcome.should_exit);
        assert!(outcome.should_persist);
    }

    #[test]
    fn cheer_uses_configured_quotes() {
        let mut tasks = TaskList::new();
        let outcome = run(&Executor::new(), &mut tasks, "cheer").unwrap();
        assert_eq!(outcome.message, DEFAULT_CHEER);
        assert!(outcome.is_cheer);

        let executor = Executor::new().with_cheers(vec!["Keep going, I guess.".to_string()]);
        let outcome = run(&executor, &mut tasks, "cheer").unwrap();
        assert_eq!(outcome.message, "Keep going, I guess.");
    }
}
