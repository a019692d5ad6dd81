//! Port contracts for task management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;
pub mod storage;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use storage::{ImageStorage, ImageStorageError, ImageStorageResult};
