//! Step definitions for sign-in scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
