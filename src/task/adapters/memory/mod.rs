//! In-memory task adapters for tests and local runs.

mod storage;
mod task;

pub use storage::InMemoryImageStorage;
pub use task::InMemoryTaskRepository;
