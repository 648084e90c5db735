//! When steps for request validation BDD scenarios.

use super::world::{ValidationWorld, run_async};
use rstest_bdd_macros::when;

#[when("the request is validated")]
fn request_is_validated(world: &mut ValidationWorld) -> Result<(), eyre::Report> {
    let request = world.request();
    let outcome = run_async(world.validator.validate(&world.handler, &request));
    world.outcome = Some(outcome);
    Ok(())
}
