//! Field-level change tracking for task edits.

use super::{HistoryEntryId, ParseTrackedFieldError, Task, TaskDetails, TaskEdit, TaskId};
use crate::auth::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task fields whose edits are recorded in the history.
///
/// Total amount, location, images, and submission status are never
/// tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedField {
    /// Job name.
    Name,
    /// Owner name.
    OwnerName,
    /// Task date.
    TaskDate,
    /// Installation status.
    Status,
    /// Comments.
    Comments,
    /// Amount received.
    AmountReceived,
    /// Remaining amount.
    RemainingAmount,
}

impl TrackedField {
    /// Every tracked field, in the order history entries are emitted.
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::OwnerName,
        Self::TaskDate,
        Self::Status,
        Self::Comments,
        Self::AmountReceived,
        Self::RemainingAmount,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::OwnerName => "owner_name",
            Self::TaskDate => "task_date",
            Self::Status => "status",
            Self::Comments => "comments",
            Self::AmountReceived => "amount_received",
            Self::RemainingAmount => "remaining_amount",
        }
    }

    /// Compares the field's typed values.
    fn differs(self, old: &TaskDetails, new: &TaskDetails) -> bool {
        match self {
            Self::Name => old.name != new.name,
            Self::OwnerName => old.owner_name != new.owner_name,
            Self::TaskDate => old.task_date != new.task_date,
            Self::Status => old.status != new.status,
            Self::Comments => comment_text(old) != comment_text(new),
            Self::AmountReceived => old.amount_received != new.amount_received,
            Self::RemainingAmount => old.remaining_amount != new.remaining_amount,
        }
    }

    /// Renders the field's value as history text. Absent values render as
    /// the empty string.
    #[must_use]
    pub fn render(self, details: &TaskDetails) -> String {
        match self {
            Self::Name => details.name.clone(),
            Self::OwnerName => details.owner_name.clone(),
            Self::TaskDate => details.task_date.to_string(),
            Self::Status => details.status.as_str().to_owned(),
            Self::Comments => comment_text(details).to_owned(),
            Self::AmountReceived => details.amount_received.to_string(),
            Self::RemainingAmount => details.remaining_amount.to_string(),
        }
    }
}

/// Blank and absent comments compare equal.
fn comment_text(details: &TaskDetails) -> &str {
    details.comments.as_deref().map_or("", str::trim)
}

impl TryFrom<&str> for TrackedField {
    type Error = ParseTrackedFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == value)
            .ok_or_else(|| ParseTrackedFieldError(value.to_owned()))
    }
}

impl fmt::Display for TrackedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded field change. Entries are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHistoryEntry {
    id: HistoryEntryId,
    task_id: TaskId,
    field: TrackedField,
    old_value: String,
    new_value: String,
    changed_by: UserId,
    change_reason: String,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedHistoryData {
    /// Persisted entry identifier.
    pub id: HistoryEntryId,
    /// Task the entry belongs to.
    pub task_id: TaskId,
    /// Changed field.
    pub field: TrackedField,
    /// Value before the edit.
    pub old_value: String,
    /// Value after the edit.
    pub new_value: String,
    /// Editor.
    pub changed_by: UserId,
    /// Reason supplied with the edit.
    pub change_reason: String,
    /// Recording timestamp.
    pub created_at: DateTime<Utc>,
}

impl TaskHistoryEntry {
    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedHistoryData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            field: data.field,
            old_value: data.old_value,
            new_value: data.new_value,
            changed_by: data.changed_by,
            change_reason: data.change_reason,
            created_at: data.created_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> HistoryEntryId {
        self.id
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the changed field.
    #[must_use]
    pub const fn field(&self) -> TrackedField {
        self.field
    }

    /// Returns the value before the edit.
    #[must_use]
    pub fn old_value(&self) -> &str {
        &self.old_value
    }

    /// Returns the value after the edit.
    #[must_use]
    pub fn new_value(&self) -> &str {
        &self.new_value
    }

    /// Returns the editor.
    #[must_use]
    pub const fn changed_by(&self) -> UserId {
        self.changed_by
    }

    /// Returns the reason supplied with the edit.
    #[must_use]
    pub fn change_reason(&self) -> &str {
        &self.change_reason
    }

    /// Returns the recording timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Diffs the persisted task against an edit.
///
/// Returns one entry per tracked field whose value differs, in
/// [`TrackedField::ALL`] order. All entries share the edit's reason, its
/// editor, and a single timestamp. `old` must be the snapshot loaded before
/// the edit is applied.
#[must_use]
pub fn track_changes(old: &Task, edit: &TaskEdit, clock: &impl Clock) -> Vec<TaskHistoryEntry> {
    let recorded_at = clock.utc();
    let before = old.details();
    let after = edit.details();

    TrackedField::ALL
        .into_iter()
        .filter(|field| field.differs(before, after))
        .map(|field| TaskHistoryEntry {
            id: HistoryEntryId::new(),
            task_id: old.id(),
            field,
            old_value: field.render(before),
            new_value: field.render(after),
            changed_by: edit.editor(),
            change_reason: edit.reason().as_str().to_owned(),
            created_at: recorded_at,
        })
        .collect()
}
