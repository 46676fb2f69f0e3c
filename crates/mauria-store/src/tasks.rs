//! The user-created task collection.
//!
//! Same single-key read-modify-write model as the events collection.  The
//! task `date` is persisted as an RFC 3339 string (chrono's serde form) and
//! round-trips the instant exactly.

use uuid::Uuid;

use mauria_shared::Task;

use crate::store::Store;

/// Storage key holding the serialized task collection.
pub const TASKS_KEY: &str = "tasks";

impl Store {
    /// Append a task.
    pub fn add_task(&self, task: &Task) {
        let mut tasks = self.list_tasks();
        tasks.push(task.clone());
        self.write_tasks(&tasks);
    }

    /// All tasks in creation order.  An unparsable stored blob reads as an
    /// empty collection.
    pub fn list_tasks(&self) -> Vec<Task> {
        let Some(raw) = self.read(TASKS_KEY) else {
            return Vec::new();
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored tasks unreadable, treating as empty");
            Vec::new()
        })
    }

    /// Remove the task with the given id.  Unknown ids are a silent no-op.
    pub fn remove_task(&self, id: Uuid) {
        let tasks: Vec<Task> = self
            .list_tasks()
            .into_iter()
            .filter(|task| task.id != id)
            .collect();
        self.write_tasks(&tasks);
    }

    /// Replace the label and date of the task matching `updated.id`.  If no
    /// task matches, the collection is left unchanged.
    pub fn update_task(&self, updated: &Task) {
        let mut tasks = self.list_tasks();
        for task in &mut tasks {
            if task.id == updated.id {
                task.task = updated.task.clone();
                task.date = updated.date;
            }
        }
        self.write_tasks(&tasks);
    }

    fn write_tasks(&self, tasks: &[Task]) {
        match serde_json::to_string(tasks) {
            Ok(raw) => self.write(TASKS_KEY, &raw),
            Err(e) => tracing::warn!(error = %e, "failed to serialize tasks"),
        }
    }
}
