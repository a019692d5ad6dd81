//! Application services for task creation, editing, and review.

mod lifecycle;
mod review;

pub use lifecycle::{EditOutcome, TaskService, TaskServiceError, TaskServiceResult, TaskWithImages};
