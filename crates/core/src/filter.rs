//! Conjunctive filtering of a board's flattened task list.

use crate::task::TaskPriority;
use crate::types::Date;

/// Read access to the task fields the board filter inspects.
pub trait TaskFields {
    fn priority(&self) -> &str;
    fn progress_percentage(&self) -> i32;
    fn due_date(&self) -> Option<Date>;
    fn title(&self) -> &str;
    fn description(&self) -> &str;
}

/// Filters accepted by the board task listing. `None` disables a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardTaskFilter {
    /// Exact priority; Spanish labels are normalised first.
    pub priority: Option<String>,
    /// Exact progress percentage.
    pub progress: Option<i32>,
    /// Exact due date, compared as `YYYY-MM-DD`.
    pub due_date: Option<String>,
    /// Case-insensitive substring of title or description.
    pub search: Option<String>,
}

impl BoardTaskFilter {
    /// Whether `task` satisfies every active filter.
    pub fn matches<T: TaskFields>(&self, task: &T) -> bool {
        self.matches_priority(task)
            && self.progress.map_or(true, |p| task.progress_percentage() == p)
            && self.matches_due_date(task)
            && self.matches_search(task)
    }

    /// Keep the tasks that match, preserving their order.
    pub fn apply<T: TaskFields>(&self, tasks: Vec<T>) -> Vec<T> {
        tasks.into_iter().filter(|t| self.matches(t)).collect()
    }

    fn matches_priority<T: TaskFields>(&self, task: &T) -> bool {
        let Some(wanted) = &self.priority else {
            return true;
        };
        match TaskPriority::from_filter_label(wanted) {
            Some(priority) => task.priority() == priority.as_str(),
            None => task.priority() == wanted,
        }
    }

    fn matches_due_date<T: TaskFields>(&self, task: &T) -> bool {
        let Some(wanted) = &self.due_date else {
            return true;
        };
        task.due_date()
            .is_some_and(|due| due.format("%Y-%m-%d").to_string() == wanted.trim())
    }

    fn matches_search<T: TaskFields>(&self, task: &T) -> bool {
        let Some(term) = &self.search else {
            return true;
        };
        let term = term.to_lowercase();
        task.title().to_lowercase().contains(&term)
            || task.description().to_lowercase().contains(&term)
    }
}
