//! Diesel row models for task persistence.

use super::schema::{task_history, task_images, tasks};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Job name.
    pub name: String,
    /// Owner name.
    pub owner_name: String,
    /// Task date.
    pub task_date: NaiveDate,
    /// Installation status.
    pub status: String,
    /// Comments.
    pub comments: Option<String>,
    /// Location JSON payload.
    pub location: Option<Value>,
    /// Amount received, in minor units.
    pub amount_received: i64,
    /// Remaining amount, in minor units.
    pub remaining_amount: i64,
    /// Total amount, in minor units.
    pub total_amount: i64,
    /// Submission status.
    pub submission_status: String,
    /// Author.
    pub created_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert and update model for task records.
///
/// `None` values are written as `NULL` on update.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Job name.
    pub name: String,
    /// Owner name.
    pub owner_name: String,
    /// Task date.
    pub task_date: NaiveDate,
    /// Installation status.
    pub status: String,
    /// Comments.
    pub comments: Option<String>,
    /// Location JSON payload.
    pub location: Option<Value>,
    /// Amount received, in minor units.
    pub amount_received: i64,
    /// Remaining amount, in minor units.
    pub remaining_amount: i64,
    /// Total amount, in minor units.
    pub total_amount: i64,
    /// Submission status.
    pub submission_status: String,
    /// Author.
    pub created_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for image references.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_images)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskImageRow {
    /// Reference identifier.
    pub id: uuid::Uuid,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Public image URL.
    pub image_url: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for image references.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_images)]
pub struct NewTaskImageRow {
    /// Reference identifier.
    pub id: uuid::Uuid,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Public image URL.
    pub image_url: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for history entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskHistoryRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Changed field name.
    pub field_name: String,
    /// Value before the edit.
    pub old_value: Option<String>,
    /// Value after the edit.
    pub new_value: Option<String>,
    /// Editor.
    pub changed_by: uuid::Uuid,
    /// Reason supplied with the edit.
    pub change_reason: Option<String>,
    /// Recording timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for history entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_history)]
pub struct NewTaskHistoryRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Changed field name.
    pub field_name: String,
    /// Value before the edit.
    pub old_value: Option<String>,
    /// Value after the edit.
    pub new_value: Option<String>,
    /// Editor.
    pub changed_by: uuid::Uuid,
    /// Reason supplied with the edit.
    pub change_reason: Option<String>,
    /// Recording timestamp.
    pub created_at: DateTime<Utc>,
}
