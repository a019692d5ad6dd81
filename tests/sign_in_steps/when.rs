//! When steps for sign-in scenarios.

use super::world::{SignInWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#"signing in with phone "{phone}" and password "{password}""#)]
fn sign_in(world: &mut SignInWorld, phone: String, password: String) -> Result<(), eyre::Report> {
    let service = world.service()?;
    world.last_sign_in = Some(run_async(service.sign_in(&phone, &password)));
    Ok(())
}

#[when("the employee signs out")]
fn sign_out(world: &mut SignInWorld) -> Result<(), eyre::Report> {
    world.service()?.sign_out()?;
    Ok(())
}
