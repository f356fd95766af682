//! Simulation runner: advances the clock and steps vehicles until every
//! vehicle is terminal or the step budget is spent.
//!
//! Clock progression happens here, outside systems. Each step ticks
//! [`SimulationClock`] once, then runs the schedule, which gives every
//! still-active vehicle exactly one transition for that tick.

use bevy_ecs::prelude::{Schedule, World};

use crate::clock::SimulationClock;
use crate::ecs::{Vehicle, VehicleStatus};
use crate::systems::vehicle_step::vehicle_step_system;

/// Builds the default simulation schedule: the per-vehicle step system.
pub fn simulation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(vehicle_step_system);
    schedule
}

/// Number of vehicles still in the Active state.
pub fn active_vehicle_count(world: &mut World) -> usize {
    world
        .query::<&Vehicle>()
        .iter(world)
        .filter(|vehicle| vehicle.status == VehicleStatus::Active)
        .count()
}

/// Runs one simulation step. Returns `false` without ticking when no active
/// vehicles remain or the step budget is exhausted.
pub fn run_step(world: &mut World, schedule: &mut Schedule) -> bool {
    if active_vehicle_count(world) == 0 {
        return false;
    }
    if world
        .resource_mut::<SimulationClock>()
        .tick()
        .is_none()
    {
        return false;
    }
    schedule.run(world);
    true
}

/// Runs steps until every vehicle is terminal or the budget is exhausted.
/// Returns the number of steps executed. Hitting the budget with active
/// vehicles left is a normal stop; those vehicles are reported as timed out
/// at record collection.
pub fn run_to_completion(world: &mut World, schedule: &mut Schedule) -> u64 {
    let mut steps = 0;
    while run_step(world, schedule) {
        steps += 1;
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{build_scenario, ScenarioParams};

    #[test]
    fn run_step_refuses_when_no_vehicles() {
        let mut world = World::new();
        build_scenario(
            &mut world,
            ScenarioParams {
                num_vehicles: 0,
                ..Default::default()
            },
        )
        .expect("valid scenario");
        let mut schedule = simulation_schedule();
        assert!(!run_step(&mut world, &mut schedule));
        assert_eq!(world.resource::<SimulationClock>().now(), 0);
    }

    #[test]
    fn run_to_completion_stops_at_budget() {
        let mut world = World::new();
        build_scenario(
            &mut world,
            ScenarioParams {
                num_vehicles: 2,
                max_steps: 4,
                ..Default::default()
            }
            .with_seed(1),
        )
        .expect("valid scenario");
        let mut schedule = simulation_schedule();
        let steps = run_to_completion(&mut world, &mut schedule);
        assert!(steps <= 4);
        assert_eq!(world.resource::<SimulationClock>().now(), steps);
    }
}
