#![allow(dead_code)]

use bevy_ecs::prelude::{Schedule, World};

use sim_core::geometry::{DistanceMetric, GeoPoint};
use sim_core::movement::MovementModelKind;
use sim_core::runner::simulation_schedule;
use sim_core::scenario::{build_scenario, ScenarioParams, VehicleSpec};
use sim_core::zones::TollZone;

/// Build a world and schedule from params; panics on invalid params.
pub fn build_world(params: ScenarioParams) -> (World, Schedule) {
    let mut world = World::new();
    build_scenario(&mut world, params).expect("valid scenario");
    (world, simulation_schedule())
}

/// Planar params with one vehicle driving (0, 0) → (0, 10) at 1 unit/step.
pub fn straight_line_params() -> ScenarioParams {
    ScenarioParams::default()
        .with_metric(DistanceMetric::Planar)
        .with_movement(MovementModelKind::Linear { step_km: 1.0 })
        .with_vehicle_specs(vec![VehicleSpec {
            origin: GeoPoint::new(0.0, 0.0),
            destination: GeoPoint::new(0.0, 10.0),
            balance: None,
        }])
}

/// Axis-aligned zone spanning `lng_min..lng_max` with lat in [-1, 1].
pub fn corridor_zone(id: u32, lng_min: f64, lng_max: f64) -> TollZone {
    TollZone::new(
        id,
        vec![
            GeoPoint::new(-1.0, lng_min),
            GeoPoint::new(1.0, lng_min),
            GeoPoint::new(1.0, lng_max),
            GeoPoint::new(-1.0, lng_max),
        ],
    )
}
