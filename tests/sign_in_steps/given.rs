//! Given steps for sign-in scenarios.

use super::world::{SignInWorld, run_async};
use crate::test_helpers::seed_account;
use rstest_bdd_macros::given;

#[given(r#"an employee with phone "{phone}" and password "{password}""#)]
fn employee_account(world: &mut SignInWorld, phone: String, password: String) {
    let user_id = run_async(seed_account(&world.users, &phone, &password));
    world.employee = Some(user_id);
}
