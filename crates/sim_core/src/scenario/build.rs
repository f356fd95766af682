use bevy_ecs::prelude::World;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::clock::SimulationClock;
use crate::ecs::{Journey, PathHistory, Position, Vehicle, VehicleId, ZonePresence};
use crate::geometry::GeoPoint;
use crate::movement::{build_movement_model, MovementModelKind, MovementModelResource};
use crate::pricing::TollConfig;
use crate::scenario::params::{ArrivalPolicy, ScenarioParams, VehicleSpec};
use crate::zones::TollZones;

/// Attempts at drawing a destination far enough from the origin before
/// falling back to the farthest bounding-box corner.
const MAX_DESTINATION_ATTEMPTS: usize = 200;

/// Configuration problems detected before the run starts. Construction
/// fails entirely; no partial world is left behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    #[error("zone {id} has {vertices} vertices; a polygon needs at least 3")]
    DegenerateZone { id: u32, vertices: usize },
    #[error("toll rate must be non-negative, got {0}")]
    NegativeTollRate(f64),
    #[error("initial balance must be non-negative, got {0}")]
    NegativeBalance(f64),
    #[error("movement step length must be positive, got {0}")]
    NonPositiveStepLength(f64),
    #[error("random movement delta must be positive, got {0}")]
    NonPositiveDelta(f64),
    #[error("arrival epsilon must be positive, got {0}")]
    NonPositiveEpsilon(f64),
    #[error("minimum trip distance must be non-negative, got {0}")]
    NegativeMinTrip(f64),
    #[error("step budget must be at least 1")]
    ZeroStepBudget,
    #[error(
        "invalid bounds: lat [{lat_min}, {lat_max}], lng [{lng_min}, {lng_max}] \
         (lat in [-90, 90], lng in [-180, 180], min <= max)"
    )]
    InvalidBounds {
        lat_min: f64,
        lat_max: f64,
        lng_min: f64,
        lng_max: f64,
    },
}

fn validate(params: &ScenarioParams) -> Result<(), ScenarioError> {
    for zone in &params.zones {
        if zone.boundary().len() < 3 {
            return Err(ScenarioError::DegenerateZone {
                id: zone.id(),
                vertices: zone.boundary().len(),
            });
        }
    }
    if params.toll_rate_per_km < 0.0 {
        return Err(ScenarioError::NegativeTollRate(params.toll_rate_per_km));
    }
    if params.initial_balance < 0.0 {
        return Err(ScenarioError::NegativeBalance(params.initial_balance));
    }
    match params.movement {
        MovementModelKind::Linear { step_km } if step_km <= 0.0 => {
            return Err(ScenarioError::NonPositiveStepLength(step_km));
        }
        MovementModelKind::RandomBounded { max_delta } if max_delta <= 0.0 => {
            return Err(ScenarioError::NonPositiveDelta(max_delta));
        }
        _ => {}
    }
    if params.arrival_epsilon_km <= 0.0 {
        return Err(ScenarioError::NonPositiveEpsilon(params.arrival_epsilon_km));
    }
    if params.min_trip_km < 0.0 {
        return Err(ScenarioError::NegativeMinTrip(params.min_trip_km));
    }
    if params.max_steps == 0 {
        return Err(ScenarioError::ZeroStepBudget);
    }
    if let Some(specs) = &params.vehicles {
        for spec in specs {
            if let Some(balance) = spec.balance {
                if balance < 0.0 {
                    return Err(ScenarioError::NegativeBalance(balance));
                }
            }
        }
    }
    if params.vehicles.is_none() {
        validate_bounds(params)?;
    }
    Ok(())
}

fn validate_bounds(params: &ScenarioParams) -> Result<(), ScenarioError> {
    let ok = params.lat_min >= -90.0
        && params.lat_max <= 90.0
        && params.lat_min <= params.lat_max
        && params.lng_min >= -180.0
        && params.lng_max <= 180.0
        && params.lng_min <= params.lng_max;
    if ok {
        Ok(())
    } else {
        Err(ScenarioError::InvalidBounds {
            lat_min: params.lat_min,
            lat_max: params.lat_max,
            lng_min: params.lng_min,
            lng_max: params.lng_max,
        })
    }
}

/// Sample a uniform random point within the given lat/lng bounds.
pub fn random_point_in_bounds<R: Rng>(
    rng: &mut R,
    lat_min: f64,
    lat_max: f64,
    lng_min: f64,
    lng_max: f64,
) -> GeoPoint {
    GeoPoint::new(
        rng.gen_range(lat_min..=lat_max),
        rng.gen_range(lng_min..=lng_max),
    )
}

/// Draw a destination at least `min_trip_km` from `origin`. Rejection
/// sampling with a deterministic fallback: after the attempt budget, take
/// the bounding-box corner farthest from the origin.
fn random_destination<R: Rng>(
    rng: &mut R,
    params: &ScenarioParams,
    origin: GeoPoint,
) -> GeoPoint {
    for _ in 0..MAX_DESTINATION_ATTEMPTS {
        let candidate = random_point_in_bounds(
            rng,
            params.lat_min,
            params.lat_max,
            params.lng_min,
            params.lng_max,
        );
        if params.metric.distance_km(origin, candidate) >= params.min_trip_km {
            return candidate;
        }
    }

    let corners = [
        GeoPoint::new(params.lat_min, params.lng_min),
        GeoPoint::new(params.lat_min, params.lng_max),
        GeoPoint::new(params.lat_max, params.lng_min),
        GeoPoint::new(params.lat_max, params.lng_max),
    ];
    corners
        .into_iter()
        .max_by(|a, b| {
            params
                .metric
                .distance_km(origin, *a)
                .total_cmp(&params.metric.distance_km(origin, *b))
        })
        .unwrap_or(origin)
}

fn vehicle_specs<R: Rng>(rng: &mut R, params: &ScenarioParams) -> Vec<VehicleSpec> {
    if let Some(specs) = &params.vehicles {
        return specs.clone();
    }
    (0..params.num_vehicles)
        .map(|_| {
            let origin = random_point_in_bounds(
                rng,
                params.lat_min,
                params.lat_max,
                params.lng_min,
                params.lng_max,
            );
            let destination = random_destination(rng, params, origin);
            VehicleSpec {
                origin,
                destination,
                balance: None,
            }
        })
        .collect()
}

/// Validate `params`, insert the simulation resources, and spawn the fleet.
///
/// Vehicle ids are assigned ascending from 0 in placement order, which is
/// also the stepping order within a tick.
pub fn build_scenario(world: &mut World, params: ScenarioParams) -> Result<(), ScenarioError> {
    validate(&params)?;

    let seed = params.seed.unwrap_or(0);
    let mut rng = StdRng::seed_from_u64(seed);
    let specs = vehicle_specs(&mut rng, &params);

    world.insert_resource(SimulationClock::new(params.max_steps));
    world.insert_resource(params.metric);
    world.insert_resource(TollConfig {
        rate_per_km: params.toll_rate_per_km,
        charging_mode: params.charging_mode,
        detection: params.detection,
    });
    world.insert_resource(ArrivalPolicy {
        epsilon_km: params.arrival_epsilon_km,
    });
    world.insert_resource(MovementModelResource(build_movement_model(
        &params.movement,
        seed,
    )));

    let zones = TollZones(params.zones);
    for (index, spec) in specs.iter().enumerate() {
        let balance = spec.balance.unwrap_or(params.initial_balance);
        world.spawn((
            VehicleId(index as u32),
            Vehicle::with_balance(balance),
            Journey {
                origin: spec.origin,
                destination: spec.destination,
            },
            Position(spec.origin),
            PathHistory(vec![spec.origin]),
            ZonePresence(zones.containing(spec.origin)),
        ));
    }
    world.insert_resource(zones);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::VehicleStatus;
    use crate::zones::TollZone;

    #[test]
    fn rejects_degenerate_zone_polygon() {
        let params = ScenarioParams::default().with_zone(TollZone::new(
            1,
            vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)],
        ));
        let mut world = World::new();
        assert_eq!(
            build_scenario(&mut world, params),
            Err(ScenarioError::DegenerateZone { id: 1, vertices: 2 })
        );
    }

    #[test]
    fn rejects_negative_rate_balance_and_step() {
        let mut world = World::new();
        assert_eq!(
            build_scenario(&mut world, ScenarioParams::default().with_toll_rate(-0.1)),
            Err(ScenarioError::NegativeTollRate(-0.1))
        );
        assert_eq!(
            build_scenario(
                &mut world,
                ScenarioParams::default().with_initial_balance(-1.0)
            ),
            Err(ScenarioError::NegativeBalance(-1.0))
        );
        assert_eq!(
            build_scenario(
                &mut world,
                ScenarioParams::default()
                    .with_movement(MovementModelKind::Linear { step_km: 0.0 })
            ),
            Err(ScenarioError::NonPositiveStepLength(0.0))
        );
    }

    #[test]
    fn rejects_zero_step_budget_and_bad_bounds() {
        let mut world = World::new();
        assert_eq!(
            build_scenario(&mut world, ScenarioParams::default().with_max_steps(0)),
            Err(ScenarioError::ZeroStepBudget)
        );
        let params = ScenarioParams::default().with_bounds(50.0, 40.0, 0.0, 1.0);
        assert!(matches!(
            build_scenario(&mut world, params),
            Err(ScenarioError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn failed_validation_leaves_no_partial_world() {
        let mut world = World::new();
        let params = ScenarioParams::default().with_toll_rate(-1.0);
        assert!(build_scenario(&mut world, params).is_err());
        assert!(world.get_resource::<SimulationClock>().is_none());
        assert_eq!(world.query::<&Vehicle>().iter(&world).count(), 0);
    }

    #[test]
    fn spawns_fleet_with_ascending_ids_and_origin_paths() {
        let mut world = World::new();
        build_scenario(
            &mut world,
            ScenarioParams {
                num_vehicles: 5,
                ..Default::default()
            }
            .with_seed(7),
        )
        .expect("valid scenario");

        let mut ids: Vec<u32> = world
            .query::<&VehicleId>()
            .iter(&world)
            .map(|id| id.0)
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);

        for (vehicle, journey, path) in world
            .query::<(&Vehicle, &Journey, &PathHistory)>()
            .iter(&world)
        {
            assert_eq!(vehicle.status, VehicleStatus::Active);
            assert_eq!(path.0, vec![journey.origin]);
        }
    }

    #[test]
    fn generated_journeys_respect_min_trip_distance() {
        let mut world = World::new();
        let params = ScenarioParams {
            num_vehicles: 10,
            min_trip_km: 5.0,
            ..Default::default()
        }
        .with_seed(11);
        let metric = params.metric;
        build_scenario(&mut world, params).expect("valid scenario");

        for journey in world.query::<&Journey>().iter(&world) {
            assert!(metric.distance_km(journey.origin, journey.destination) >= 5.0);
        }
    }

    #[test]
    fn explicit_specs_override_fleet_generation() {
        let mut world = World::new();
        let spec = VehicleSpec {
            origin: GeoPoint::new(0.0, 0.0),
            destination: GeoPoint::new(0.0, 10.0),
            balance: Some(42.0),
        };
        build_scenario(
            &mut world,
            ScenarioParams {
                num_vehicles: 99,
                ..Default::default()
            }
            .with_vehicle_specs(vec![spec]),
        )
        .expect("valid scenario");

        let vehicles: Vec<&Vehicle> = world.query::<&Vehicle>().iter(&world).collect();
        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles[0].balance, 42.0);
    }

    #[test]
    fn presence_is_seeded_for_origins_inside_zones() {
        let zone = TollZone::new(
            3,
            vec![
                GeoPoint::new(-1.0, -1.0),
                GeoPoint::new(-1.0, 1.0),
                GeoPoint::new(1.0, 1.0),
                GeoPoint::new(1.0, -1.0),
            ],
        );
        let mut world = World::new();
        build_scenario(
            &mut world,
            ScenarioParams::default()
                .with_zone(zone)
                .with_vehicle_specs(vec![VehicleSpec {
                    origin: GeoPoint::new(0.0, 0.0),
                    destination: GeoPoint::new(0.0, 10.0),
                    balance: None,
                }]),
        )
        .expect("valid scenario");

        let presence: Vec<&ZonePresence> =
            world.query::<&ZonePresence>().iter(&world).collect();
        assert_eq!(presence[0].0, vec![3]);
    }
}
