//! Task aggregate root.

use super::{Amount, GeoLocation, SubmissionStatus, TaskDomainError, TaskId, TaskStatus};
use crate::auth::domain::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated, editable values of a task.
///
/// Obtained from [`TaskSubmission::validate`](super::TaskSubmission::validate)
/// or from persistence. Blank comments are represented as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDetails {
    /// Short job name.
    pub name: String,
    /// Customer or site owner.
    pub owner_name: String,
    /// Scheduled or performed date.
    pub task_date: NaiveDate,
    /// Installation status.
    pub status: TaskStatus,
    /// Free-text notes.
    pub comments: Option<String>,
    /// Amount already paid.
    pub amount_received: Amount,
    /// Amount still owed.
    pub remaining_amount: Amount,
    /// Site coordinates, when captured.
    pub location: Option<GeoLocation>,
}

impl TaskDetails {
    /// Returns `amount_received + remaining_amount`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AmountOverflow`] when the sum overflows.
    pub fn total_amount(&self) -> Result<Amount, TaskDomainError> {
        self.amount_received.checked_add(self.remaining_amount)
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    details: TaskDetails,
    total_amount: Amount,
    submission_status: SubmissionStatus,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted editable values.
    pub details: TaskDetails,
    /// Persisted total amount.
    pub total_amount: Amount,
    /// Persisted submission status.
    pub submission_status: SubmissionStatus,
    /// Persisted author.
    pub created_by: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new in-process task authored by `created_by`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AmountOverflow`] when the total overflows.
    pub fn new(
        details: TaskDetails,
        created_by: UserId,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            total_amount: details.total_amount()?,
            details,
            submission_status: SubmissionStatus::InProcess,
            created_by,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            details: data.details,
            total_amount: data.total_amount,
            submission_status: data.submission_status,
            created_by: data.created_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the editable values.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Returns the job name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.details.name
    }

    /// Returns the owner name.
    #[must_use]
    pub fn owner_name(&self) -> &str {
        &self.details.owner_name
    }

    /// Returns the task date.
    #[must_use]
    pub const fn task_date(&self) -> NaiveDate {
        self.details.task_date
    }

    /// Returns the installation status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.details.status
    }

    /// Returns the comments, if any.
    #[must_use]
    pub fn comments(&self) -> Option<&str> {
        self.details.comments.as_deref()
    }

    /// Returns the amount received.
    #[must_use]
    pub const fn amount_received(&self) -> Amount {
        self.details.amount_received
    }

    /// Returns the remaining amount.
    #[must_use]
    pub const fn remaining_amount(&self) -> Amount {
        self.details.remaining_amount
    }

    /// Returns the total amount.
    #[must_use]
    pub const fn total_amount(&self) -> Amount {
        self.total_amount
    }

    /// Returns the site location, if captured.
    #[must_use]
    pub const fn location(&self) -> Option<GeoLocation> {
        self.details.location
    }

    /// Returns the submission status.
    #[must_use]
    pub const fn submission_status(&self) -> SubmissionStatus {
        self.submission_status
    }

    /// Returns the author.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the editable values and re-derives the total.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AmountOverflow`] when the total overflows;
    /// the task is left unchanged.
    pub fn apply_details(
        &mut self,
        details: TaskDetails,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.total_amount = details.total_amount()?;
        self.details = details;
        self.touch(clock);
        Ok(())
    }

    /// Marks the task as submitted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadySubmitted`] when the task is already
    /// submitted.
    pub fn mark_submitted(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if self.submission_status == SubmissionStatus::Submitted {
            return Err(TaskDomainError::AlreadySubmitted(self.id));
        }
        self.submission_status = SubmissionStatus::Submitted;
        self.touch(clock);
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
