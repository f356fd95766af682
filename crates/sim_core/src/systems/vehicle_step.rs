//! Vehicle step system: one movement/charging/arrival transition per tick.
//!
//! Vehicles are stepped in ascending [`VehicleId`] order, so a run is
//! reproducible for a fixed seed. Each vehicle's transition stages the
//! proposed move first and only commits it when any toll due can be paid:
//! a failing charge halts the vehicle with its pre-step position, path,
//! odometer, and balance intact. The toll is evaluated before the
//! destination check, so a vehicle that cannot afford the charge on its
//! arrival step halts rather than arrives.

use bevy_ecs::prelude::{Entity, Query, Res};

use crate::clock::SimulationClock;
use crate::ecs::{Journey, PathHistory, Position, Vehicle, VehicleId, VehicleStatus, ZonePresence};
use crate::geometry::{DistanceMetric, GeoPoint};
use crate::movement::{MovementModel, MovementModelResource};
use crate::pricing::{toll_for, ChargingMode, TollConfig, ZoneDetection};
use crate::scenario::ArrivalPolicy;
use crate::zones::TollZones;

#[allow(clippy::type_complexity)]
pub fn vehicle_step_system(
    clock: Res<SimulationClock>,
    metric: Res<DistanceMetric>,
    movement: Res<MovementModelResource>,
    toll_config: Res<TollConfig>,
    zones: Res<TollZones>,
    arrival: Res<ArrivalPolicy>,
    mut vehicles: Query<(
        Entity,
        &VehicleId,
        &Journey,
        &mut Vehicle,
        &mut Position,
        &mut PathHistory,
        &mut ZonePresence,
    )>,
) {
    let mut order: Vec<(VehicleId, Entity)> = vehicles
        .iter()
        .map(|(entity, id, _, _, _, _, _)| (*id, entity))
        .collect();
    order.sort_unstable();

    let step = clock.now();
    for (id, entity) in order {
        let Ok((_, _, journey, mut vehicle, mut position, mut path, mut presence)) =
            vehicles.get_mut(entity)
        else {
            continue;
        };
        if vehicle.status != VehicleStatus::Active {
            continue;
        }
        step_vehicle(
            step,
            *metric,
            movement.0.as_ref(),
            &toll_config,
            &zones,
            &arrival,
            id.0,
            *journey,
            &mut vehicle,
            &mut position,
            &mut path,
            &mut presence,
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn step_vehicle(
    step: u64,
    metric: DistanceMetric,
    movement: &dyn MovementModel,
    toll_config: &TollConfig,
    zones: &TollZones,
    arrival: &ArrivalPolicy,
    id: u32,
    journey: Journey,
    vehicle: &mut Vehicle,
    position: &mut Position,
    path: &mut PathHistory,
    presence: &mut ZonePresence,
) {
    let next = movement.next_position(metric, id, step, position.0, journey.destination);
    let step_km = metric.distance_km(position.0, next);
    let staged_total = vehicle.distance_km + step_km;

    let occupied = zones.containing(next);
    let toll = toll_due(
        toll_config,
        zones,
        position.0,
        next,
        &occupied,
        &presence.0,
        step_km,
        staged_total,
    );

    if vehicle.balance < toll {
        // The failing charge is never deducted and the move is not committed.
        vehicle.status = VehicleStatus::HaltedInsufficientFunds;
        return;
    }

    position.0 = next;
    path.0.push(next);
    vehicle.distance_km = staged_total;
    vehicle.balance -= toll;
    vehicle.toll_paid += toll;
    presence.0 = occupied;

    if metric.distance_km(position.0, journey.destination) <= arrival.epsilon_km {
        vehicle.status = VehicleStatus::ReachedDestination;
    }
}

/// Toll owed for one staged step under the configured charging mode and
/// detection strategy. OnEntry charges once per zone entered, each using the
/// staged cumulative distance.
#[allow(clippy::too_many_arguments)]
fn toll_due(
    config: &TollConfig,
    zones: &TollZones,
    current: GeoPoint,
    next: GeoPoint,
    occupied: &[u32],
    presence: &[u32],
    step_km: f64,
    staged_total_km: f64,
) -> f64 {
    match config.charging_mode {
        ChargingMode::PerStepDistance => {
            let inside = match config.detection {
                ZoneDetection::PointContainment => !occupied.is_empty(),
                ZoneDetection::PathIntersection => !zones.crossed_by(current, next).is_empty(),
            };
            if inside {
                toll_for(step_km, config.rate_per_km)
            } else {
                0.0
            }
        }
        ChargingMode::OnEntry => {
            let reached = match config.detection {
                ZoneDetection::PointContainment => occupied.to_vec(),
                ZoneDetection::PathIntersection => zones.crossed_by(current, next),
            };
            let entered = reached
                .iter()
                .filter(|&zone| !presence.contains(zone))
                .count();
            toll_for(staged_total_km, config.rate_per_km) * entered as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeoPoint;
    use crate::zones::TollZone;

    fn config(mode: ChargingMode, detection: ZoneDetection) -> TollConfig {
        TollConfig {
            rate_per_km: 1.0,
            charging_mode: mode,
            detection,
        }
    }

    fn unit_zone() -> TollZones {
        TollZones(vec![TollZone::new(
            0,
            vec![
                GeoPoint::new(-1.0, 2.5),
                GeoPoint::new(1.0, 2.5),
                GeoPoint::new(1.0, 4.5),
                GeoPoint::new(-1.0, 4.5),
            ],
        )])
    }

    #[test]
    fn per_step_distance_charges_step_length_inside() {
        let zones = unit_zone();
        let current = GeoPoint::new(0.0, 2.0);
        let next = GeoPoint::new(0.0, 3.0);
        let occupied = zones.containing(next);
        let toll = toll_due(
            &config(ChargingMode::PerStepDistance, ZoneDetection::PointContainment),
            &zones,
            current,
            next,
            &occupied,
            &[],
            1.0,
            5.0,
        );
        assert_eq!(toll, 1.0);
    }

    #[test]
    fn per_step_distance_free_outside() {
        let zones = unit_zone();
        let current = GeoPoint::new(0.0, 0.0);
        let next = GeoPoint::new(0.0, 1.0);
        let occupied = zones.containing(next);
        let toll = toll_due(
            &config(ChargingMode::PerStepDistance, ZoneDetection::PointContainment),
            &zones,
            current,
            next,
            &occupied,
            &[],
            1.0,
            1.0,
        );
        assert_eq!(toll, 0.0);
    }

    #[test]
    fn path_intersection_charges_pass_through() {
        // Thin zone between the sampled positions: point containment sees
        // nothing, the segment test sees the crossing.
        let zones = TollZones(vec![TollZone::new(
            0,
            vec![
                GeoPoint::new(-1.0, 2.2),
                GeoPoint::new(1.0, 2.2),
                GeoPoint::new(1.0, 2.8),
                GeoPoint::new(-1.0, 2.8),
            ],
        )]);
        let current = GeoPoint::new(0.0, 2.0);
        let next = GeoPoint::new(0.0, 3.0);
        let occupied = zones.containing(next);
        assert!(occupied.is_empty());

        let point_toll = toll_due(
            &config(ChargingMode::PerStepDistance, ZoneDetection::PointContainment),
            &zones,
            current,
            next,
            &occupied,
            &[],
            1.0,
            3.0,
        );
        assert_eq!(point_toll, 0.0);

        let segment_toll = toll_due(
            &config(ChargingMode::PerStepDistance, ZoneDetection::PathIntersection),
            &zones,
            current,
            next,
            &occupied,
            &[],
            1.0,
            3.0,
        );
        assert_eq!(segment_toll, 1.0);
    }

    #[test]
    fn on_entry_charges_cumulative_distance_once() {
        let zones = unit_zone();
        let current = GeoPoint::new(0.0, 2.0);
        let next = GeoPoint::new(0.0, 3.0);
        let occupied = zones.containing(next);
        let cfg = config(ChargingMode::OnEntry, ZoneDetection::PointContainment);

        let entry_toll = toll_due(&cfg, &zones, current, next, &occupied, &[], 1.0, 3.0);
        assert_eq!(entry_toll, 3.0);

        // Already present: staying inside charges nothing.
        let stay_toll = toll_due(&cfg, &zones, next, next, &occupied, &[0], 0.0, 3.0);
        assert_eq!(stay_toll, 0.0);
    }
}
