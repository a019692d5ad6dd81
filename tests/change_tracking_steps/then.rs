//! Then steps for change tracking scenarios.

use super::world::{TrackingWorld, run_async};
use fieldwatch::task::{
    domain::{TaskDomainError, TaskHistoryEntry},
    services::{EditOutcome, TaskServiceError},
};
use rstest_bdd_macros::then;

fn last_outcome(world: &TrackingWorld) -> Result<&EditOutcome, eyre::Report> {
    world
        .last_edit
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing edit result in scenario world"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected edit failure: {err}"))
}

fn stored_history(world: &TrackingWorld) -> Result<Vec<TaskHistoryEntry>, eyre::Report> {
    let task_id = world.task()?.id();
    Ok(run_async(world.service.task_history(task_id))?)
}

fn find_entry<'a>(
    outcome: &'a EditOutcome,
    field: &str,
) -> Result<&'a TaskHistoryEntry, eyre::Report> {
    outcome
        .history
        .iter()
        .find(|entry| entry.field().as_str() == field)
        .ok_or_else(|| eyre::eyre!("no history entry for {field}"))
}

#[then(r#"the history records "{field}" changing from "{old}" to "{new}""#)]
fn history_records_change(
    world: &TrackingWorld,
    field: String,
    old: String,
    new: String,
) -> Result<(), eyre::Report> {
    let entry = find_entry(last_outcome(world)?, &field)?;
    eyre::ensure!(
        entry.old_value() == old && entry.new_value() == new,
        "expected {old} -> {new}, found {} -> {}",
        entry.old_value(),
        entry.new_value()
    );
    Ok(())
}

#[then(r#"the history records "{field}" being set to "{new}""#)]
fn history_records_new_value(
    world: &TrackingWorld,
    field: String,
    new: String,
) -> Result<(), eyre::Report> {
    let entry = find_entry(last_outcome(world)?, &field)?;
    eyre::ensure!(entry.old_value().is_empty(), "old value should be empty");
    eyre::ensure!(entry.new_value() == new, "unexpected new value");
    Ok(())
}

#[then(r#"the history holds {count:usize} entries with reason "{reason}""#)]
fn history_count_with_reason(
    world: &TrackingWorld,
    count: usize,
    reason: String,
) -> Result<(), eyre::Report> {
    let history = stored_history(world)?;
    eyre::ensure!(history.len() == count, "expected {count} entries, found {}", history.len());
    eyre::ensure!(
        history
            .iter()
            .all(|entry| entry.change_reason() == reason && entry.changed_by() == world.employee.user_id),
        "entries should share the edit's reason and editor"
    );
    Ok(())
}

#[then("the history holds {count:usize} entries")]
fn history_count(world: &TrackingWorld, count: usize) -> Result<(), eyre::Report> {
    let history = stored_history(world)?;
    eyre::ensure!(history.len() == count, "expected {count} entries, found {}", history.len());
    Ok(())
}

#[then("the task carries the new location")]
fn task_has_location(world: &TrackingWorld) -> Result<(), eyre::Report> {
    let outcome = last_outcome(world)?;
    eyre::ensure!(outcome.task.location().is_some(), "location should be stored");
    eyre::ensure!(
        outcome.task.updated_at() > world.task()?.updated_at(),
        "task row should still be updated"
    );
    Ok(())
}

#[then("the edit is rejected for a missing reason")]
fn edit_rejected(world: &TrackingWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_edit
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing edit result in scenario world"))?;
    eyre::ensure!(
        matches!(
            result,
            Err(TaskServiceError::Domain(TaskDomainError::EmptyChangeReason))
        ),
        "expected a missing reason rejection"
    );
    Ok(())
}

#[then(r#"the task is still "{status}""#)]
fn task_status_unchanged(world: &TrackingWorld, status: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let detail = run_async(world.service.task_detail(task_id))?;
    eyre::ensure!(
        detail.task.status().as_str() == status,
        "expected status {status}, found {}",
        detail.task.status()
    );
    Ok(())
}
