//! Movement models: pluggable strategies determining a vehicle's next
//! position each tick.
//!
//! Both strategies are deterministic for a fixed scenario seed. The random
//! walk draws each delta from a fresh `StdRng` keyed by (seed, vehicle,
//! step), so replaying a scenario replays the exact trajectory.

use bevy_ecs::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::geometry::{interpolate, DistanceMetric, GeoPoint};

/// Trait for computing a vehicle's next position.
pub trait MovementModel: Send + Sync + std::fmt::Debug {
    /// `vehicle` and `step` identify the sample for reproducible randomized
    /// models; deterministic models ignore them.
    fn next_position(
        &self,
        metric: DistanceMetric,
        vehicle: u32,
        step: u64,
        current: GeoPoint,
        destination: GeoPoint,
    ) -> GeoPoint;
}

/// Straight-line interpolation toward the destination, a fixed distance per
/// tick. Lands exactly on the destination once the remaining distance fits
/// within one step.
#[derive(Debug, Clone)]
pub struct LinearPath {
    pub step_km: f64,
}

impl MovementModel for LinearPath {
    fn next_position(
        &self,
        metric: DistanceMetric,
        _vehicle: u32,
        _step: u64,
        current: GeoPoint,
        destination: GeoPoint,
    ) -> GeoPoint {
        let remaining = metric.distance_km(current, destination);
        if remaining <= self.step_km {
            return destination;
        }
        interpolate(current, destination, self.step_km / remaining)
    }
}

/// Random walk: each axis moves by a uniform delta in `[-max_delta,
/// +max_delta]` coordinate units. Ignores the destination; the step budget
/// is the termination guard.
#[derive(Debug, Clone)]
pub struct RandomBounded {
    pub max_delta: f64,
    pub seed: u64,
}

impl MovementModel for RandomBounded {
    fn next_position(
        &self,
        _metric: DistanceMetric,
        vehicle: u32,
        step: u64,
        current: GeoPoint,
        _destination: GeoPoint,
    ) -> GeoPoint {
        let key = self
            .seed
            .wrapping_add(u64::from(vehicle).wrapping_mul(0x9e37_79b9_7f4a_7c15))
            .wrapping_add(step);
        let mut rng = StdRng::seed_from_u64(key);
        let dlat = rng.gen_range(-self.max_delta..=self.max_delta);
        let dlng = rng.gen_range(-self.max_delta..=self.max_delta);
        GeoPoint::new(current.lat + dlat, current.lng + dlng)
    }
}

/// Serializable strategy descriptor; resolved by [`build_movement_model`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MovementModelKind {
    Linear { step_km: f64 },
    RandomBounded { max_delta: f64 },
}

impl Default for MovementModelKind {
    fn default() -> Self {
        MovementModelKind::Linear { step_km: 1.0 }
    }
}

pub fn build_movement_model(kind: &MovementModelKind, seed: u64) -> Box<dyn MovementModel> {
    match *kind {
        MovementModelKind::Linear { step_km } => Box::new(LinearPath { step_km }),
        MovementModelKind::RandomBounded { max_delta } => {
            Box::new(RandomBounded { max_delta, seed })
        }
    }
}

#[derive(Debug, Resource)]
pub struct MovementModelResource(pub Box<dyn MovementModel>);
