//! Summary metrics extracted from terminal vehicle records.

use serde::Serialize;
use sim_core::telemetry::{VehicleOutcome, VehicleRecord};

/// Aggregated metrics from a single simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub total_vehicles: usize,
    /// Vehicles that reached their destination.
    pub reached_destination: usize,
    /// Vehicles halted by an unaffordable charge.
    pub halted_insufficient_funds: usize,
    /// Vehicles still underway when the step budget ran out.
    pub timed_out: usize,
    /// Vehicles that paid at least one toll.
    pub vehicles_charged: usize,
    pub total_tolls_collected: f64,
    pub total_distance_km: f64,
    pub avg_distance_km: f64,
    pub median_distance_km: f64,
    pub p90_distance_km: f64,
}

/// Calculate (avg, median, p90) from a slice of values.
fn calculate_stats(values: &[f64]) -> (f64, f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0, 0.0);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let avg = sorted.iter().sum::<f64>() / sorted.len() as f64;
    let median = if sorted.len() % 2 == 0 {
        (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) / 2.0
    } else {
        sorted[sorted.len() / 2]
    };
    let p90_idx = ((sorted.len() - 1) as f64 * 0.9) as usize;
    let p90 = sorted[p90_idx.min(sorted.len() - 1)];

    (avg, median, p90)
}

/// Aggregate terminal records into a run summary. Pure transformation.
pub fn summarize(records: &[VehicleRecord]) -> SimulationSummary {
    let mut reached = 0;
    let mut halted = 0;
    let mut timed_out = 0;
    for record in records {
        match record.outcome {
            VehicleOutcome::ReachedDestination => reached += 1,
            VehicleOutcome::HaltedInsufficientFunds => halted += 1,
            VehicleOutcome::SimulationTimedOut => timed_out += 1,
        }
    }

    let distances: Vec<f64> = records.iter().map(|r| r.distance_km).collect();
    let (avg, median, p90) = calculate_stats(&distances);

    SimulationSummary {
        total_vehicles: records.len(),
        reached_destination: reached,
        halted_insufficient_funds: halted,
        timed_out,
        vehicles_charged: records.iter().filter(|r| r.toll_paid > 0.0).count(),
        total_tolls_collected: records.iter().map(|r| r.toll_paid).sum(),
        total_distance_km: distances.iter().sum(),
        avg_distance_km: avg,
        median_distance_km: median,
        p90_distance_km: p90,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::geometry::GeoPoint;

    fn record(id: u32, outcome: VehicleOutcome, distance_km: f64, toll_paid: f64) -> VehicleRecord {
        let origin = GeoPoint::new(0.0, 0.0);
        VehicleRecord {
            id,
            origin,
            destination: GeoPoint::new(0.0, 10.0),
            final_position: origin,
            distance_km,
            toll_paid,
            balance: 100.0 - toll_paid,
            outcome,
            path: vec![origin],
        }
    }

    #[test]
    fn summary_counts_outcomes_and_charges() {
        let records = vec![
            record(0, VehicleOutcome::ReachedDestination, 10.0, 2.0),
            record(1, VehicleOutcome::HaltedInsufficientFunds, 4.0, 0.0),
            record(2, VehicleOutcome::SimulationTimedOut, 6.0, 1.0),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.total_vehicles, 3);
        assert_eq!(summary.reached_destination, 1);
        assert_eq!(summary.halted_insufficient_funds, 1);
        assert_eq!(summary.timed_out, 1);
        assert_eq!(summary.vehicles_charged, 2);
        assert_eq!(summary.total_tolls_collected, 3.0);
        assert_eq!(summary.total_distance_km, 20.0);
        assert_eq!(summary.median_distance_km, 6.0);
    }

    #[test]
    fn stats_handle_empty_and_even_length_inputs() {
        assert_eq!(calculate_stats(&[]), (0.0, 0.0, 0.0));
        let (avg, median, p90) = calculate_stats(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(avg, 2.5);
        assert_eq!(median, 2.5);
        assert_eq!(p90, 3.0);
    }
}
