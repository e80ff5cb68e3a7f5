//! Ordered to-do list.
//!
//! Tasks keep insertion order. Only the id is a key; duplicate texts are
//! allowed. Unknown ids are ignored silently.

use chrono::Utc;

use crate::types::Task;

/// Ordered collection of [`Task`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps tasks loaded from storage, keeping their order.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Appends a task stamped with the current time.
    ///
    /// Returns the new task id, or `None` when the text is blank.
    pub fn add(&mut self, text: &str) -> Option<i64> {
        self.add_at(text, Utc::now().timestamp_millis())
    }

    /// Appends a task using `now_ms` as the id.
    ///
    /// Ids never repeat: a clock that did not move past the newest id is
    /// bumped by one millisecond.
    pub fn add_at(&mut self, text: &str, now_ms: i64) -> Option<i64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let id = match self.tasks.iter().map(|t| t.id).max() {
            Some(newest) if now_ms <= newest => newest + 1,
            _ => now_ms,
        };

        self.tasks.push(Task {
            id,
            text: text.to_string(),
            completed: false,
        });
        Some(id)
    }

    /// Flips the completed flag. Returns false if no task has `id`.
    pub fn toggle(&mut self, id: i64) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    /// Removes the task. Returns false if no task has `id`.
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Looks up a task by id.
    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Returns the tasks as a slice.
    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks not yet completed.
    pub fn remaining(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }
}
