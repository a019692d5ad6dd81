//! In-memory auth adapters for tests and local runs.

mod session;
mod users;

pub use session::InMemorySessionStore;
pub use users::InMemoryUserRepository;
