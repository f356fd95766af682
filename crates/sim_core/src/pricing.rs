//! Toll policy: linear distance-based charges and the charging-mode /
//! detection-strategy configuration.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

/// Default per-kilometer toll rate in currency units.
pub const DEFAULT_RATE_PER_KM: f64 = 0.2;

/// When a toll is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargingMode {
    /// Charge for the distance covered since the last step, every step the
    /// vehicle is inside a zone.
    #[default]
    PerStepDistance,
    /// Charge once, using cumulative distance traveled so far, the moment a
    /// zone boundary is crossed.
    OnEntry,
}

/// How zone occupancy/crossing is decided for a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneDetection {
    /// The proposed position alone is tested against each zone.
    #[default]
    PointContainment,
    /// The whole step segment is tested; catches pass-through crossings that
    /// point sampling misses.
    PathIntersection,
}

#[derive(Debug, Clone, Copy, Resource)]
pub struct TollConfig {
    pub rate_per_km: f64,
    pub charging_mode: ChargingMode,
    pub detection: ZoneDetection,
}

impl Default for TollConfig {
    fn default() -> Self {
        Self {
            rate_per_km: DEFAULT_RATE_PER_KM,
            charging_mode: ChargingMode::default(),
            detection: ZoneDetection::default(),
        }
    }
}

/// Charge for a traveled distance: `distance_km * rate_per_km`.
pub fn toll_for(distance_km: f64, rate_per_km: f64) -> f64 {
    distance_km * rate_per_km
}
