//! Terminal vehicle records: the report surface consumed by external
//! collaborators (charting, map rendering, tabular summaries).

use bevy_ecs::prelude::World;
use serde::{Deserialize, Serialize};

use crate::ecs::{Journey, PathHistory, Position, Vehicle, VehicleId, VehicleStatus};
use crate::geometry::GeoPoint;

/// Reporting-level terminal classification. Vehicles still Active when the
/// run stops (budget exhausted) are reported as `SimulationTimedOut`,
/// distinct from both terminal component states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleOutcome {
    ReachedDestination,
    HaltedInsufficientFunds,
    SimulationTimedOut,
}

impl From<VehicleStatus> for VehicleOutcome {
    fn from(status: VehicleStatus) -> Self {
        match status {
            VehicleStatus::ReachedDestination => VehicleOutcome::ReachedDestination,
            VehicleStatus::HaltedInsufficientFunds => VehicleOutcome::HaltedInsufficientFunds,
            VehicleStatus::Active => VehicleOutcome::SimulationTimedOut,
        }
    }
}

/// One vehicle's terminal snapshot, including its full path for downstream
/// visualization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub id: u32,
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub final_position: GeoPoint,
    pub distance_km: f64,
    pub toll_paid: f64,
    pub balance: f64,
    pub outcome: VehicleOutcome,
    pub path: Vec<GeoPoint>,
}

/// Assemble terminal records for every vehicle, ascending by id. Pure read;
/// never mutates vehicle state.
pub fn collect_records(world: &mut World) -> Vec<VehicleRecord> {
    let mut records: Vec<VehicleRecord> = world
        .query::<(&VehicleId, &Journey, &Vehicle, &Position, &PathHistory)>()
        .iter(world)
        .map(|(id, journey, vehicle, position, path)| VehicleRecord {
            id: id.0,
            origin: journey.origin,
            destination: journey.destination,
            final_position: position.0,
            distance_km: vehicle.distance_km,
            toll_paid: vehicle.toll_paid,
            balance: vehicle.balance,
            outcome: vehicle.status.into(),
            path: path.0.clone(),
        })
        .collect();
    records.sort_unstable_by_key(|record| record.id);
    records
}
