//! Installation task management with a per-field audit trail.
//!
//! Employees create tasks from form submissions and later edit them with a
//! mandatory reason. Each edit is diffed against the persisted task and one
//! history entry is recorded per changed tracked field, committed together
//! with the task update. Photos are uploaded to object storage and linked
//! to the task by public URL.
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
