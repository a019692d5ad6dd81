//! Task lifecycle orchestration: create, edit, submit, and read.

use crate::auth::domain::Session;
use crate::task::{
    domain::{
        ChangeReason, ImageUpload, Task, TaskDomainError, TaskEdit, TaskHistoryEntry, TaskId,
        TaskImage, TaskSubmission, track_changes,
    },
    ports::{ImageStorage, ImageStorageError, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Submitted values failed validation.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Image upload failed.
    #[error(transparent)]
    Storage(#[from] ImageStorageError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// The caller's session has expired.
    #[error("session expired")]
    SessionExpired,
    /// The review report could not be rendered.
    #[error("failed to render review: {0}")]
    Template(#[from] minijinja::Error),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Result of a successful edit.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    /// The task as persisted after the edit.
    pub task: Task,
    /// History entries recorded for the edit, in tracked-field order.
    pub history: Vec<TaskHistoryEntry>,
}

/// A task together with its image references.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskWithImages {
    /// The task.
    pub task: Task,
    /// Image references in insertion order.
    pub images: Vec<TaskImage>,
}

/// Task orchestration service.
#[derive(Clone)]
pub struct TaskService<R, S, C>
where
    R: TaskRepository,
    S: ImageStorage,
    C: Clock + Send + Sync,
{
    pub(super) repository: Arc<R>,
    storage: Arc<S>,
    clock: Arc<C>,
}

impl<R, S, C> TaskService<R, S, C>
where
    R: TaskRepository,
    S: ImageStorage,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, storage: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            repository,
            storage,
            clock,
        }
    }

    /// Validates and stores a new task, then attaches `images` in order.
    /// A photo the task already references is skipped.
    ///
    /// The task is authored by the session's user and starts in process.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::SessionExpired`] for an expired session,
    /// [`TaskServiceError::Domain`] when validation fails, and repository or
    /// storage errors otherwise. An image failure leaves the task and any
    /// earlier images stored.
    pub async fn create_task(
        &self,
        session: &Session,
        submission: &TaskSubmission,
        images: Vec<ImageUpload>,
    ) -> TaskServiceResult<Task> {
        self.ensure_active(session)?;
        let details = submission.validate()?;
        let task = Task::new(details, session.user_id, &*self.clock)?;
        self.repository.store(&task).await.inspect_err(|err| {
            warn!(?err, task_id = %task.id(), "failed to store task;");
        })?;
        info!(task_id = %task.id(), user_id = %session.user_id, "task created");
        self.attach_images(session, task.id(), images).await?;
        Ok(task)
    }

    /// Applies an edit to an existing task and records its history.
    ///
    /// The persisted task is diffed against the validated submission before
    /// anything is written. History and the task update commit together,
    /// then `images` are attached in order. Old values come from the
    /// snapshot read here; two overlapping edits both diff against it and
    /// the later commit wins.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist,
    /// [`TaskServiceError::Domain`] when the submission or change reason is
    /// invalid, and repository or storage errors otherwise. An image failure
    /// after the commit leaves the edit applied.
    pub async fn edit_task(
        &self,
        session: &Session,
        task_id: TaskId,
        submission: &TaskSubmission,
        change_reason: &str,
        images: Vec<ImageUpload>,
    ) -> TaskServiceResult<EditOutcome> {
        self.ensure_active(session)?;
        let mut task = self.load(task_id).await?;
        let details = submission.validate()?;
        let reason = ChangeReason::new(change_reason)?;
        let edit = TaskEdit::new(details, reason, session.user_id);

        let history = track_changes(&task, &edit, &*self.clock);
        task.apply_details(edit.into_details(), &*self.clock)?;
        self.repository
            .apply_edit(&task, &history)
            .await
            .inspect_err(|err| {
                warn!(?err, %task_id, "failed to apply task edit;");
            })?;
        info!(
            %task_id,
            user_id = %session.user_id,
            changed_fields = history.len(),
            "task edited"
        );

        self.attach_images(session, task_id, images).await?;
        Ok(EditOutcome { task, history })
    }

    /// Marks a task as submitted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist and
    /// [`TaskServiceError::Domain`] when it is already submitted.
    pub async fn submit_task(&self, session: &Session, task_id: TaskId) -> TaskServiceResult<Task> {
        self.ensure_active(session)?;
        let mut task = self.load(task_id).await?;
        task.mark_submitted(&*self.clock)?;
        self.repository.update(&task).await?;
        info!(%task_id, user_id = %session.user_id, "task submitted");
        Ok(task)
    }

    /// Returns every task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list_tasks(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.list_recent().await?)
    }

    /// Returns a task with its images.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist.
    pub async fn task_detail(&self, task_id: TaskId) -> TaskServiceResult<TaskWithImages> {
        let task = self.load(task_id).await?;
        let images = self.repository.images_for(task_id).await?;
        Ok(TaskWithImages { task, images })
    }

    /// Returns a task's history, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn task_history(&self, task_id: TaskId) -> TaskServiceResult<Vec<TaskHistoryEntry>> {
        Ok(self.repository.history_for(task_id).await?)
    }

    pub(super) async fn load(&self, task_id: TaskId) -> TaskServiceResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskServiceError::NotFound(task_id))
    }

    fn ensure_active(&self, session: &Session) -> TaskServiceResult<()> {
        if session.is_expired(&*self.clock) {
            debug!(user_id = %session.user_id, "rejected expired session");
            return Err(TaskServiceError::SessionExpired);
        }
        Ok(())
    }

    async fn attach_images(
        &self,
        session: &Session,
        task_id: TaskId,
        images: Vec<ImageUpload>,
    ) -> TaskServiceResult<()> {
        if images.is_empty() {
            return Ok(());
        }
        // Object paths are content-addressed, so a repeated photo maps to a
        // URL the task already references.
        let mut recorded: HashSet<String> = self
            .repository
            .images_for(task_id)
            .await?
            .into_iter()
            .map(|image| image.image_url().to_owned())
            .collect();
        for upload in images {
            let path = upload.object_path(session.user_id, task_id);
            let url = self.storage.public_url(&path);
            if recorded.contains(&url) {
                debug!(%task_id, %path, "skipping duplicate task image");
                continue;
            }
            self.storage
                .upload(&path, upload.bytes())
                .await
                .inspect_err(|err| {
                    warn!(?err, %task_id, %path, "failed to upload task image;");
                })?;
            let image = TaskImage::new(task_id, url.clone(), &*self.clock);
            self.repository.add_image(&image).await.inspect_err(|err| {
                warn!(?err, %task_id, %path, "failed to record task image;");
            })?;
            recorded.insert(url);
            debug!(%task_id, %path, "task image attached");
        }
        Ok(())
    }
}
