//! Then steps for sign-in scenarios.

use super::world::SignInWorld;
use fieldwatch::auth::ports::SESSION_KEY;
use rstest_bdd_macros::then;

#[then("a session for that employee is stored under the user key")]
fn session_stored(world: &SignInWorld) -> Result<(), eyre::Report> {
    let session = world
        .last_sign_in
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing sign-in result in scenario world"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected sign-in failure: {err}"))?;
    eyre::ensure!(Some(session.user_id) == world.employee, "session user mismatch");
    eyre::ensure!(
        world.session_dir.path().join(SESSION_KEY).is_file(),
        "session file should exist"
    );
    Ok(())
}

#[then("the session is restored after a restart")]
fn session_restored(world: &SignInWorld) -> Result<(), eyre::Report> {
    let restored = world
        .service()?
        .restore()?
        .ok_or_else(|| eyre::eyre!("expected a restored session"))?;
    eyre::ensure!(Some(restored.user_id) == world.employee, "restored user mismatch");
    Ok(())
}

#[then("no session is restored after a restart")]
fn no_session_restored(world: &SignInWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(world.service()?.restore()?.is_none(), "session should be gone");
    Ok(())
}

#[then(r#"sign-in fails with "{message}""#)]
fn sign_in_fails(world: &SignInWorld, message: String) -> Result<(), eyre::Report> {
    let result = world
        .last_sign_in
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing sign-in result in scenario world"))?;
    let Err(err) = result else {
        return Err(eyre::eyre!("sign-in unexpectedly succeeded"));
    };
    eyre::ensure!(err.user_message() == message, "unexpected message: {}", err.user_message());
    Ok(())
}

#[then("no password check was attempted")]
fn no_password_check(world: &SignInWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(world.verifier.calls() == 0, "verifier should not be called");
    Ok(())
}

#[then("{count:usize} password check was attempted")]
fn password_checks(world: &SignInWorld, count: usize) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.verifier.calls() == count,
        "expected {count} checks, found {}",
        world.verifier.calls()
    );
    Ok(())
}
