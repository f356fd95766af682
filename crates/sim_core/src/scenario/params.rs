use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::geometry::{DistanceMetric, GeoPoint};
use crate::movement::MovementModelKind;
use crate::pricing::{ChargingMode, ZoneDetection, DEFAULT_RATE_PER_KM};
use crate::zones::TollZone;

/// Default bounding box: San Francisco (approx).
const DEFAULT_LAT_MIN: f64 = 37.6;
const DEFAULT_LAT_MAX: f64 = 37.9;
const DEFAULT_LNG_MIN: f64 = -122.7;
const DEFAULT_LNG_MAX: f64 = -122.2;

/// Default step budget; a safety valve against non-converging movement.
const DEFAULT_MAX_STEPS: u64 = 1_000;

/// Destination-reached threshold. An epsilon test instead of exact equality
/// so floating-point drift cannot keep a vehicle active forever.
#[derive(Debug, Clone, Copy, Resource)]
pub struct ArrivalPolicy {
    pub epsilon_km: f64,
}

impl Default for ArrivalPolicy {
    fn default() -> Self {
        Self { epsilon_km: 1e-3 }
    }
}

/// Explicit origin/destination placement for one vehicle. `balance`
/// overrides the scenario-wide initial balance when set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleSpec {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub balance: Option<f64>,
}

/// Parameters for building a simulation scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioParams {
    /// Fleet size when journeys are generated; ignored when `vehicles` is set.
    pub num_vehicles: usize,
    pub seed: Option<u64>,
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
    pub zones: Vec<TollZone>,
    pub toll_rate_per_km: f64,
    pub charging_mode: ChargingMode,
    pub detection: ZoneDetection,
    pub movement: MovementModelKind,
    pub metric: DistanceMetric,
    pub initial_balance: f64,
    pub arrival_epsilon_km: f64,
    /// Generated journeys are re-drawn until origin→destination is at least
    /// this far apart.
    pub min_trip_km: f64,
    pub max_steps: u64,
    /// Explicit vehicle placements; overrides `num_vehicles` and the
    /// bounding box when present.
    pub vehicles: Option<Vec<VehicleSpec>>,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            num_vehicles: 3,
            seed: None,
            lat_min: DEFAULT_LAT_MIN,
            lat_max: DEFAULT_LAT_MAX,
            lng_min: DEFAULT_LNG_MIN,
            lng_max: DEFAULT_LNG_MAX,
            zones: Vec::new(),
            toll_rate_per_km: DEFAULT_RATE_PER_KM,
            charging_mode: ChargingMode::default(),
            detection: ZoneDetection::default(),
            movement: MovementModelKind::default(),
            metric: DistanceMetric::default(),
            initial_balance: 100.0,
            arrival_epsilon_km: ArrivalPolicy::default().epsilon_km,
            min_trip_km: 1.0,
            max_steps: DEFAULT_MAX_STEPS,
            vehicles: None,
        }
    }
}

impl ScenarioParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_zone(mut self, zone: TollZone) -> Self {
        self.zones.push(zone);
        self
    }

    pub fn with_toll_rate(mut self, rate_per_km: f64) -> Self {
        self.toll_rate_per_km = rate_per_km;
        self
    }

    pub fn with_charging_mode(mut self, mode: ChargingMode) -> Self {
        self.charging_mode = mode;
        self
    }

    pub fn with_detection(mut self, detection: ZoneDetection) -> Self {
        self.detection = detection;
        self
    }

    pub fn with_movement(mut self, movement: MovementModelKind) -> Self {
        self.movement = movement;
        self
    }

    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_initial_balance(mut self, balance: f64) -> Self {
        self.initial_balance = balance;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Bounding box for generated origins/destinations.
    pub fn with_bounds(mut self, lat_min: f64, lat_max: f64, lng_min: f64, lng_max: f64) -> Self {
        self.lat_min = lat_min;
        self.lat_max = lat_max;
        self.lng_min = lng_min;
        self.lng_max = lng_max;
        self
    }

    pub fn with_vehicle_specs(mut self, vehicles: Vec<VehicleSpec>) -> Self {
        self.vehicles = Some(vehicles);
        self
    }
}
