use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::geometry::GeoPoint;

/// Unique vehicle identifier; also the stepping order within a tick.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Component, Serialize, Deserialize,
)]
pub struct VehicleId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleStatus {
    Active,
    ReachedDestination,
    /// A computed toll exceeded the balance. The failing charge was never
    /// deducted; no further movement occurs.
    HaltedInsufficientFunds,
}

/// Per-vehicle mutable bookkeeping. `distance_km` and `toll_paid` only grow;
/// `balance` only shrinks; none of them change once `status` leaves Active.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct Vehicle {
    pub status: VehicleStatus,
    pub balance: f64,
    pub distance_km: f64,
    pub toll_paid: f64,
}

impl Vehicle {
    pub fn with_balance(balance: f64) -> Self {
        Self {
            status: VehicleStatus::Active,
            balance,
            distance_km: 0.0,
            toll_paid: 0.0,
        }
    }
}

/// Fixed origin/destination pair, set at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct Journey {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct Position(pub GeoPoint);

/// Append-only sequence of visited positions, starting with the origin.
#[derive(Debug, Clone, Default, Component)]
pub struct PathHistory(pub Vec<GeoPoint>);

/// Ids of zones containing the vehicle at the end of its last committed
/// step; seeded from the origin at spawn. Drives OnEntry edge detection.
#[derive(Debug, Clone, Default, Component)]
pub struct ZonePresence(pub Vec<u32>);
