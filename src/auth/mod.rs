//! Phone-and-password authentication for field employees.
//!
//! Accounts are looked up by phone number and the supplied password is
//! checked against the stored hash by a [`ports::PasswordVerifier`]. A
//! successful sign-in yields an explicit [`domain::Session`] that callers
//! pass into task operations; the session is also persisted under the
//! `user` key of a [`ports::SessionStore`] so it survives a reload until it
//! expires or the user signs out.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
