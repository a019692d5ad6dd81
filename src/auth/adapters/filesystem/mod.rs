//! Filesystem-backed auth adapters.

mod session;

pub use session::FileSessionStore;
