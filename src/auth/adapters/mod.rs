//! Adapter implementations for auth ports.

pub mod filesystem;
pub mod hashing;
pub mod memory;
pub mod postgres;
