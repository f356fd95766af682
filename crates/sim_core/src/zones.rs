//! Toll zones: closed polygonal regions vehicles are charged for entering
//! or traversing.
//!
//! Containment uses even-odd ray casting with boundary points counting as
//! inside. Crossing tests work on the whole step segment so pass-through
//! crossings are caught even when neither endpoint lies inside.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::geometry::{point_on_segment, segments_intersect, GeoPoint};

/// A closed polygonal toll region. The boundary must have at least 3
/// vertices (enforced at scenario build) and is assumed non-self-intersecting.
/// Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TollZone {
    id: u32,
    boundary: Vec<GeoPoint>,
}

impl TollZone {
    pub fn new(id: u32, boundary: Vec<GeoPoint>) -> Self {
        Self { id, boundary }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn boundary(&self) -> &[GeoPoint] {
        &self.boundary
    }

    /// True iff `point` lies within the closed region. Boundary points count
    /// as inside.
    pub fn contains(&self, point: GeoPoint) -> bool {
        let n = self.boundary.len();
        for i in 0..n {
            if point_on_segment(self.boundary[i], self.boundary[(i + 1) % n], point) {
                return true;
            }
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let pi = self.boundary[i];
            let pj = self.boundary[j];
            if (pi.lat > point.lat) != (pj.lat > point.lat) {
                let x_cross = pj.lng + (point.lat - pj.lat) / (pi.lat - pj.lat) * (pi.lng - pj.lng);
                if point.lng < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// True iff the segment a-b intersects the zone boundary or is contained
    /// within the zone.
    pub fn segment_crosses(&self, a: GeoPoint, b: GeoPoint) -> bool {
        if self.contains(a) || self.contains(b) {
            return true;
        }
        let n = self.boundary.len();
        (0..n).any(|i| {
            segments_intersect(a, b, self.boundary[i], self.boundary[(i + 1) % n])
        })
    }
}

/// All toll zones in the scenario. Fixed for the duration of a run.
#[derive(Debug, Clone, Default, Resource)]
pub struct TollZones(pub Vec<TollZone>);

impl TollZones {
    /// Ids of zones containing `point`, in declaration order.
    pub fn containing(&self, point: GeoPoint) -> Vec<u32> {
        self.0
            .iter()
            .filter(|zone| zone.contains(point))
            .map(TollZone::id)
            .collect()
    }

    /// Ids of zones whose region the segment a-b intersects, in declaration
    /// order.
    pub fn crossed_by(&self, a: GeoPoint, b: GeoPoint) -> Vec<u32> {
        self.0
            .iter()
            .filter(|zone| zone.segment_crosses(a, b))
            .map(TollZone::id)
            .collect()
    }
}
