//! When steps for change tracking scenarios.

use super::world::{TrackingWorld, run_async};
use fieldwatch::task::domain::TaskSubmission;
use rstest_bdd_macros::when;

fn submit_edit(world: &mut TrackingWorld, form: &TaskSubmission, reason: &str) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let result = run_async(world.service.edit_task(
        &world.employee,
        task_id,
        form,
        reason,
        Vec::new(),
    ));
    world.last_edit = Some(result);
    Ok(())
}

#[when(r#"the task is edited to status "{status}" with comments "{comments}" because "{reason}""#)]
fn edit_status_and_comments(
    world: &mut TrackingWorld,
    status: String,
    comments: String,
    reason: String,
) -> Result<(), eyre::Report> {
    let form = TaskSubmission::from_details(world.task()?.details())
        .with_status(status)
        .with_comments(comments);
    submit_edit(world, &form, &reason)
}

#[when(r#"only the location is changed because "{reason}""#)]
fn edit_location_only(world: &mut TrackingWorld, reason: String) -> Result<(), eyre::Report> {
    let form =
        TaskSubmission::from_details(world.task()?.details()).with_location(18.5204, 73.8567);
    submit_edit(world, &form, &reason)
}

#[when(r#"the task is saved unchanged because "{reason}""#)]
fn save_unchanged(world: &mut TrackingWorld, reason: String) -> Result<(), eyre::Report> {
    let form = TaskSubmission::from_details(world.task()?.details());
    submit_edit(world, &form, &reason)
}

#[when(r#"the task is edited to status "{status}" without a reason"#)]
fn edit_without_reason(world: &mut TrackingWorld, status: String) -> Result<(), eyre::Report> {
    let form = TaskSubmission::from_details(world.task()?.details()).with_status(status);
    submit_edit(world, &form, "  ")
}
