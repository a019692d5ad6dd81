//! Shared world state for change tracking scenarios.

use std::sync::Arc;

use crate::test_helpers::FrozenClock;
use chrono::Duration;
use fieldwatch::auth::domain::{PhoneNumber, Session, UserId};
use fieldwatch::task::{
    adapters::memory::{InMemoryImageStorage, InMemoryTaskRepository},
    domain::Task,
    services::{EditOutcome, TaskService, TaskServiceError},
};
use rstest::fixture;

/// Service type used by the tracking world.
pub type TrackingService = TaskService<InMemoryTaskRepository, InMemoryImageStorage, FrozenClock>;

/// Scenario world for change tracking behaviour tests.
pub struct TrackingWorld {
    pub service: TrackingService,
    pub clock: Arc<FrozenClock>,
    pub employee: Session,
    pub task: Option<Task>,
    pub last_edit: Option<Result<EditOutcome, TaskServiceError>>,
}

impl TrackingWorld {
    /// Creates a world with a signed-in employee and no task.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(FrozenClock::new());
        let employee = Session::issue(
            UserId::new(),
            PhoneNumber::new("9999999999").expect("valid phone number"),
            Duration::hours(12),
            &*clock,
        );
        let service = TaskService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryImageStorage::new("https://cdn.example.com")),
            Arc::clone(&clock),
        );
        Self {
            service,
            clock,
            employee,
            task: None,
            last_edit: None,
        }
    }

    /// Returns the task created by the given step.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for TrackingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TrackingWorld {
    TrackingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
