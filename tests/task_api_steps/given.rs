//! Given steps for task HTTP behaviour scenarios.

use super::world::TaskApiWorld;
use rstest_bdd_macros::given;

#[given("an empty task service")]
fn empty_task_service(world: &mut TaskApiWorld) {
    world.reset();
}
