//! Given steps for change tracking scenarios.

use super::world::{TrackingWorld, run_async};
use chrono::Duration;
use eyre::WrapErr;
use fieldwatch::task::domain::TaskSubmission;
use rstest_bdd_macros::given;

#[given(r#"a pending task "{name}" without comments"#)]
fn pending_task_without_comments(world: &mut TrackingWorld, name: String) -> Result<(), eyre::Report> {
    let form = TaskSubmission::new(name, "K. Iyer", "2025-03-12").with_amounts("2000", "500");
    let created = run_async(world.service.create_task(&world.employee, &form, Vec::new()))
        .wrap_err("create task for tracking scenario")?;
    world.clock.advance(Duration::minutes(30));
    world.task = Some(created);
    Ok(())
}
