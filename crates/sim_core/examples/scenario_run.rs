//! Run the three-vehicle San Francisco toll scenario and print records.
//!
//! Run with: cargo run -p sim_core --example scenario_run

use bevy_ecs::prelude::World;
use sim_core::geometry::GeoPoint;
use sim_core::movement::MovementModelKind;
use sim_core::pricing::ChargingMode;
use sim_core::runner::{run_to_completion, simulation_schedule};
use sim_core::scenario::{build_scenario, ScenarioParams, VehicleSpec};
use sim_core::telemetry::collect_records;
use sim_core::zones::TollZone;

fn main() {
    // Downtown toll polygon and three vehicles crossing the bay area.
    let zone = TollZone::new(
        0,
        vec![
            GeoPoint::new(37.7, -122.5),
            GeoPoint::new(37.8, -122.5),
            GeoPoint::new(37.8, -122.4),
            GeoPoint::new(37.7, -122.4),
        ],
    );
    let vehicles = vec![
        VehicleSpec {
            origin: GeoPoint::new(37.7, -122.6),
            destination: GeoPoint::new(37.7, -122.3),
            balance: Some(100.0),
        },
        VehicleSpec {
            origin: GeoPoint::new(37.8, -122.7),
            destination: GeoPoint::new(37.9, -122.4),
            balance: Some(150.0),
        },
        VehicleSpec {
            origin: GeoPoint::new(37.6, -122.5),
            destination: GeoPoint::new(37.8, -122.2),
            balance: Some(200.0),
        },
    ];

    let params = ScenarioParams::default()
        .with_zone(zone)
        .with_vehicle_specs(vehicles)
        .with_movement(MovementModelKind::Linear { step_km: 1.0 })
        .with_charging_mode(ChargingMode::PerStepDistance)
        .with_seed(123);

    let mut world = World::new();
    build_scenario(&mut world, params).expect("scenario configuration is valid");
    let mut schedule = simulation_schedule();
    let steps = run_to_completion(&mut world, &mut schedule);

    let records = collect_records(&mut world);
    println!("--- Toll scenario run (3 vehicles, seed 123) ---");
    println!("Steps executed: {}", steps);
    for record in &records {
        println!(
            "  vehicle {}  outcome={:?}  distance={:.2} km  toll={:.2}  balance={:.2}  path_len={}",
            record.id,
            record.outcome,
            record.distance_km,
            record.toll_paid,
            record.balance,
            record.path.len(),
        );
    }
}
