//! Fieldwatch: task tracking for CCTV installation crews.
//!
//! Field employees sign in with a phone number and password, record
//! installation tasks with amounts, coordinates, and photos, and edit them
//! later with a mandatory reason. Every edit leaves a per-field audit trail
//! that an administrator reviews alongside the task.
//!
//! # Architecture
//!
//! Fieldwatch follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence, storage, and sessions
//! - **Adapters**: In-memory, `PostgreSQL`, and filesystem implementations
//!
//! # Modules
//!
//! - [`auth`]: Credential validation and durable sessions
//! - [`task`]: Tasks, images, change tracking, and review
//! - [`config`]: TOML configuration with environment overrides
//! - [`telemetry`]: Tracing subscriber set-up

pub mod auth;
pub mod config;
pub mod task;
pub mod telemetry;

#[cfg(test)]
mod test_support;
