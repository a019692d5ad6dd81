//! Domain model for installation tasks and their audit trail.
//!
//! Tasks are created from validated form submissions and changed only
//! through edits. Every edit is diffed against the persisted snapshot by
//! [`track_changes`], which yields one [`TaskHistoryEntry`] per tracked field
//! whose value differs.

mod amount;
mod error;
mod history;
mod ids;
mod image;
mod location;
mod status;
mod submission;
mod task;

pub use amount::Amount;
pub use error::{
    FieldViolation, ParseSubmissionStatusError, ParseTaskStatusError, ParseTrackedFieldError,
    TaskDomainError,
};
pub use history::{PersistedHistoryData, TaskHistoryEntry, TrackedField, track_changes};
pub use ids::{HistoryEntryId, TaskId, TaskImageId};
pub use image::{ImageUpload, ObjectPath, TaskImage};
pub use location::GeoLocation;
pub use status::{SubmissionStatus, TaskStatus};
pub use submission::{ChangeReason, TaskEdit, TaskSubmission};
pub use task::{PersistedTaskData, Task, TaskDetails};
