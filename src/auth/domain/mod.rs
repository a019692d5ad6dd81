//! Domain model for accounts and sessions.

mod account;
mod error;
mod ids;
mod phone;
mod session;

pub use account::UserAccount;
pub use error::AuthDomainError;
pub use ids::UserId;
pub use phone::PhoneNumber;
pub use session::Session;
