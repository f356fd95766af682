//! Geometric primitives: coordinate points, distance metrics, and the
//! segment tests backing zone containment/crossing checks.
//!
//! Coordinates are plain (lat, lng) pairs. Under [`DistanceMetric::Haversine`]
//! they are degrees on the sphere; under [`DistanceMetric::Planar`] they are
//! unit-less Cartesian coordinates (lat = y, lng = x) and distances are
//! Euclidean.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Distance metric for positions, steps, and arrival checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Resource)]
pub enum DistanceMetric {
    /// Great-circle distance in km over (lat, lng) degrees.
    #[default]
    Haversine,
    /// Euclidean distance in coordinate units.
    Planar,
}

impl DistanceMetric {
    /// Distance between two points. Symmetric; 0 for identical points.
    pub fn distance_km(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        match self {
            DistanceMetric::Haversine => haversine_km(a, b),
            DistanceMetric::Planar => planar_distance(a, b),
        }
    }
}

fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lon1) = (a.lat.to_radians(), a.lng.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lng.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

fn planar_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let dy = b.lat - a.lat;
    let dx = b.lng - a.lng;
    (dy * dy + dx * dx).sqrt()
}

/// Linear blend in coordinate space: `t = 0` is `a`, `t = 1` is `b`.
pub fn interpolate(a: GeoPoint, b: GeoPoint, t: f64) -> GeoPoint {
    GeoPoint::new(a.lat + (b.lat - a.lat) * t, a.lng + (b.lng - a.lng) * t)
}

/// Cross product of (q - p) and (r - p); sign gives the turn direction.
fn cross(p: GeoPoint, q: GeoPoint, r: GeoPoint) -> f64 {
    (q.lng - p.lng) * (r.lat - p.lat) - (q.lat - p.lat) * (r.lng - p.lng)
}

/// True iff `p` lies on the closed segment a-b.
pub(crate) fn point_on_segment(a: GeoPoint, b: GeoPoint, p: GeoPoint) -> bool {
    if cross(a, b, p).abs() > f64::EPSILON * 16.0 {
        return false;
    }
    p.lng >= a.lng.min(b.lng)
        && p.lng <= a.lng.max(b.lng)
        && p.lat >= a.lat.min(b.lat)
        && p.lat <= a.lat.max(b.lat)
}

/// True iff closed segments p1-p2 and q1-q2 intersect, including touching
/// endpoints and collinear overlap.
pub fn segments_intersect(p1: GeoPoint, p2: GeoPoint, q1: GeoPoint, q2: GeoPoint) -> bool {
    let d1 = cross(q1, q2, p1);
    let d2 = cross(q1, q2, p2);
    let d3 = cross(p1, p2, q1);
    let d4 = cross(p1, p2, q2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    point_on_segment(q1, q2, p1)
        || point_on_segment(q1, q2, p2)
        || point_on_segment(p1, p2, q1)
        || point_on_segment(p1, p2, q2)
}
