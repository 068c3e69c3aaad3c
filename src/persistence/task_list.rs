use super::KeyValueStore;
use crate::domain::{Task, TaskDraft, TaskInputError, TaskTime};
use anyhow::{Context, Result};

/// Storage key holding the serialized task list
pub const TASKS_KEY: &str = "tasks";

/// Copy of a stored task list that could not be read in full
pub const TASKS_BACKUP_KEY: &str = "tasks-corrupt";

/// Stored list after parsing, minus records that failed to parse
struct ParsedTasks {
    tasks: Vec<Task>,
    skipped: usize,
}

/// Parse each record on its own so one bad record doesn't lose the rest
fn parse_tasks(json: &str) -> Result<ParsedTasks> {
    let records: Vec<serde_json::Value> =
        serde_json::from_str(json).context("Failed to parse stored task list")?;

    let mut tasks = Vec::with_capacity(records.len());
    let mut skipped = 0;
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Task>(record) {
            Ok(task) => tasks.push(task),
            Err(e) => {
                tracing::warn!(index, "Skipping unreadable task record: {}", e);
                skipped += 1;
            }
        }
    }
    Ok(ParsedTasks { tasks, skipped })
}

/// Read the stored task list. An absent key is an empty list and
/// unreadable records are skipped.
pub fn read_tasks(store: &dyn KeyValueStore) -> Result<Vec<Task>> {
    match store.get(TASKS_KEY)? {
        Some(json) => Ok(parse_tasks(&json)?.tasks),
        None => Ok(Vec::new()),
    }
}

/// Keep the raw entry under the backup key before it gets overwritten
fn back_up(store: &mut dyn KeyValueStore, json: &str) {
    match store.set(TASKS_BACKUP_KEY, json) {
        Ok(()) => tracing::warn!("Saved unreadable task list to {:?}", TASKS_BACKUP_KEY),
        Err(e) => tracing::warn!("Failed to back up unreadable task list: {:#}", e),
    }
}

/// Ordered task list that writes through to storage on every mutation
pub struct TaskList {
    tasks: Vec<Task>,
    store: Box<dyn KeyValueStore>,
}

impl TaskList {
    /// Hydrate from storage. Readable records are kept; if anything was
    /// unreadable the raw entry is backed up first.
    pub fn load(mut store: Box<dyn KeyValueStore>) -> Self {
        let tasks = match store.get(TASKS_KEY) {
            Ok(Some(json)) => match parse_tasks(&json) {
                Ok(parsed) => {
                    if parsed.skipped > 0 {
                        back_up(store.as_mut(), &json);
                    }
                    parsed.tasks
                }
                Err(e) => {
                    tracing::warn!("Starting with an empty task list: {:#}", e);
                    back_up(store.as_mut(), &json);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Starting with an empty task list: {:#}", e);
                Vec::new()
            }
        };
        tracing::debug!(count = tasks.len(), "task list loaded");
        Self { tasks, store }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Sum of all task estimates
    pub fn total_time(&self) -> chrono::Duration {
        let total = self
            .tasks
            .iter()
            .fold(0u64, |acc, task| acc.saturating_add(task.time.total_seconds()));
        TaskTime::from_seconds(total).as_duration()
    }

    /// Validate and append a task
    pub fn add(&mut self, draft: &TaskDraft) -> Result<(), TaskInputError> {
        let task = draft.to_task()?;
        tracing::debug!(description = %task.description, time = %task.time, "task added");
        self.tasks.push(task);
        self.persist();
        Ok(())
    }

    /// Validate and replace the task at `index`
    pub fn edit(&mut self, index: usize, draft: &TaskDraft) -> Result<(), TaskInputError> {
        if index >= self.tasks.len() {
            return Err(TaskInputError::NoSuchTask(index));
        }
        let task = draft.to_task()?;
        tracing::debug!(index, description = %task.description, time = %task.time, "task edited");
        self.tasks[index] = task;
        self.persist();
        Ok(())
    }

    /// Remove the task at `index`; out of range is ignored
    pub fn delete(&mut self, index: usize) {
        if index < self.tasks.len() {
            let task = self.tasks.remove(index);
            tracing::debug!(index, description = %task.description, "task deleted");
            self.persist();
        }
    }

    /// Empty the list and drop the stored entry entirely
    pub fn delete_all(&mut self) {
        self.tasks.clear();
        if let Err(e) = self.store.remove(TASKS_KEY) {
            tracing::warn!("Failed to remove stored task list: {:#}", e);
        }
        tracing::debug!("all tasks deleted");
    }

    /// Draft pre-filled from the task at `index`
    pub fn begin_edit(&self, index: usize) -> Option<TaskDraft> {
        self.tasks.get(index).map(TaskDraft::from_task)
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.tasks)
            .context("Failed to serialize task list")
            .and_then(|json| self.store.set(TASKS_KEY, &json));
        if let Err(e) = result {
            tracing::warn!("Failed to save task list: {:#}", e);
        }
    }
}
