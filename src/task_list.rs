use chrono::NaiveDate;
use thiserror::Error;

use crate::model::Task;

pub const MAX_TASKS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskListError {
    #[error("Skeptical. You haven't told me to do anything yet.")]
    Empty,
    #[error("Ugh, that task doesn't exist. Pick between 1 and {len}.")]
    OutOfRange { len: usize },
    #[error("Fine. I can't remember more than {max} things. Forget something first.")]
    CapacityExceeded { max: usize },
}

/// Ordered task collection addressed by 1-based position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tasks.len() >= MAX_TASKS
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Appends a task and returns the new size.
    pub fn add(&mut self, task: Task) -> Result<usize, TaskListError> {
        self.ensure_capacity()?;
        self.tasks.push(task);
        Ok(self.tasks.len())
    }

    pub fn ensure_capacity(&self) -> Result<(), TaskListError> {
        if self.is_full() {
            return Err(TaskListError::CapacityExceeded { max: MAX_TASKS });
        }
        Ok(())
    }

    pub fn get(&self, number: usize) -> Result<&Task, TaskListError> {
        let index = self.resolve(number)?;
        Ok(&self.tasks[index])
    }

    pub fn delete(&mut self, number: usize) -> Result<Task, TaskListError> {
        let index = self.resolve(number)?;
        Ok(self.tasks.remove(index))
    }

    pub fn mark_done(&mut self, number: usize) -> Result<&Task, TaskListError> {
        self.set_done(number, true)
    }

    pub fn mark_not_done(&mut self, number: usize) -> Result<&Task, TaskListError> {
        self.set_done(number, false)
    }

    fn set_done(&mut self, number: usize, done: bool) -> Result<&Task, TaskListError> {
        let index = self.resolve(number)?;
        let task = &mut self.tasks[index];
        task.done = done;
        Ok(task)
    }

    pub fn filter_by_date(&self, date: NaiveDate) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.occurs_on(date)).collect()
    }

    pub fn find(&self, keyword: &str) -> Vec<&Task> {
        let needle = keyword.to_lowercase();
        self.tasks
            .iter()
            .filter(|t| t.description().to_lowercase().contains(&needle))
            .collect()
    }

    fn resolve(&self, number: usize) -> Result<usize, TaskListError> {
        if self.tasks.is_empty() {
            return Err(TaskListError::Empty);
        }
        if number == 0 || number > self.tasks.len() {
            return Err(TaskListError::OutOfRange {
                len: self.tasks.len(),
            });
        }
        Ok(number - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Description;
    use chrono::NaiveDateTime;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn todo(s: &str) -> Task {
        Task::todo(Description::new(s).unwrap())
    }

    fn list_of(n: usize) -> TaskList {
        let mut list = TaskList::new();
        for i in 0..n {
            list.add(todo(&format!("task {}", i + 1))).unwrap();
        }
        list
    }

    #[test]
    fn add_then_get_highest_index() {
        let mut list = list_of(3);
        let task = Task::deadline(Description::new("return book").unwrap(), at(2019, 12, 2, 18));
        let len = list.add(task.clone()).unwrap();
        assert_eq!(len, 4);
        assert_eq!(list.get(4).unwrap(), &task);
    }

    #[test]
    fn add_at_capacity_fails_without_growing() {
        let mut list = list_of(MAX_TASKS);
        assert_eq!(
            list.add(todo("one too many")),
            Err(TaskListError::CapacityExceeded { max: MAX_TASKS })
        );
        assert_eq!(list.len(), MAX_TASKS);
    }

    #[test]
    fn empty_list_reports_empty_for_any_number() {
        let mut list = TaskList::new();
        for n in [0, 1, 5] {
            assert_eq!(list.get(n), Err(TaskListError::Empty));
            assert_eq!(list.delete(n), Err(TaskListError::Empty));
            assert_eq!(list.mark_done(n), Err(TaskListError::Empty));
            assert_eq!(list.mark_not_done(n), Err(TaskListError::Empty));
        }
    }

    #[test]
    fn out_of_range_reports_bounds() {
        let mut list = list_of(3);
        let expected = TaskListError::OutOfRange { len: 3 };
        for n in [0, 4, 999] {
            assert_eq!(list.get(n).unwrap_err(), expected);
            assert_eq!(list.delete(n).unwrap_err(), expected);
            assert_eq!(list.mark_done(n).unwrap_err(), expected);
            assert_eq!(list.mark_not_done(n).unwrap_err(), expected);
        }
        assert_eq!(list.len(), 3);
        assert_eq!(
            TaskListError::OutOfRange { len: 3 }.to_string(),
            "Ugh, that task doesn't exist. Pick between 1 and 3."
        );
    }

    #[test]
    fn delete_renumbers_later_tasks() {
        let mut list = list_of(3);
        let removed = list.delete(2).unwrap();
        assert_eq!(removed.description(), "task 2");
        assert_eq!(list.get(2).unwrap().description(), "task 3");
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn mark_and_unmark() {
        let mut list = list_of(2);
        assert!(list.mark_done(2).unwrap().done);
        assert!(list.get(2).unwrap().done);
        assert!(!list.get(1).unwrap().done);
        assert!(!list.mark_not_done(2).unwrap().done);
    }

    #[test]
    fn filter_by_date_uses_deadline_and_event_start() {
        let mut list = TaskList::new();
        let day = NaiveDate::from_ymd_opt(2019, 12, 25).unwrap();
        list.add(todo("plain")).unwrap();
        list.add(Task::event(
            Description::new("ends on the day").unwrap(),
            at(2019, 12, 24, 9),
            at(2019, 12, 25, 9),
        ))
        .unwrap();
        list.add(Task::deadline(Description::new("due").unwrap(), at(2019, 12, 25, 18)))
            .unwrap();
        list.add(Task::deadline(Description::new("other day").unwrap(), at(2019, 12, 26, 18)))
            .unwrap();
        list.add(Task::event(
            Description::new("starts on the day").unwrap(),
            at(2019, 12, 25, 14),
            at(2019, 12, 27, 9),
        ))
        .unwrap();

        let names: Vec<&str> = list
            .filter_by_date(day)
            .iter()
            .map(|t| t.description())
            .collect();
        assert_eq!(names, ["due", "starts on the day"]);
    }

    #[test]
    fn find_is_case_insensitive_on_description() {
        let mut list = TaskList::new();
        list.add(todo("Read BOOK")).unwrap();
        list.add(todo("return library book")).unwrap();
        list.add(Task::deadline(Description::new("pay rent").unwrap(), at(2019, 12, 2, 18)))
            .unwrap();

        let names: Vec<&str> = list.find("book").iter().map(|t| t.description()).collect();
        assert_eq!(names, ["Read BOOK", "return library book"]);
        assert!(list.find("2019").is_empty());
    }
}
