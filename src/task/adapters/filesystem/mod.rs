//! Filesystem-backed task adapters.

mod storage;

pub use storage::FileImageStorage;
