//! In-memory repository for tasks, images, and history.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskHistoryEntry, TaskId, TaskImage},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Edits take the write lock once, so history and task updates become
/// visible together.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    insertion_order: Vec<TaskId>,
    history: Vec<TaskHistoryEntry>,
    images: Vec<TaskImage>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: &impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn ensure_exists(state: &InMemoryTaskState, id: TaskId) -> TaskRepositoryResult<()> {
    if state.tasks.contains_key(&id) {
        Ok(())
    } else {
        Err(TaskRepositoryError::NotFound(id))
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.insertion_order.push(task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        ensure_exists(&state, task.id())?;
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn apply_edit(
        &self,
        task: &Task,
        history: &[TaskHistoryEntry],
    ) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        ensure_exists(&state, task.id())?;
        state.history.extend_from_slice(history);
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_recent(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        let mut tasks: Vec<Task> = state
            .insertion_order
            .iter()
            .rev()
            .filter_map(|id| state.tasks.get(id).cloned())
            .collect();
        tasks.sort_by_key(|task| Reverse(task.created_at()));
        Ok(tasks)
    }

    async fn history_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskHistoryEntry>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        let mut entries: Vec<TaskHistoryEntry> = state
            .history
            .iter()
            .filter(|entry| entry.task_id() == task_id)
            .cloned()
            .collect();
        entries.sort_by_key(|entry| Reverse(entry.created_at()));
        Ok(entries)
    }

    async fn add_image(&self, image: &TaskImage) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        ensure_exists(&state, image.task_id())?;
        state.images.push(image.clone());
        Ok(())
    }

    async fn images_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskImage>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state
            .images
            .iter()
            .filter(|image| image.task_id() == task_id)
            .cloned()
            .collect())
    }
}
