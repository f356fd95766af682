//! Result export: CSV/JSON files for downstream charting, tabular reports,
//! and map rendering of vehicle paths.

use std::path::Path;

use sim_core::telemetry::VehicleRecord;

use crate::metrics::SimulationSummary;

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;
#[path = "export/writer_utils.rs"]
mod writer_utils;

/// Export terminal vehicle records to CSV (one row per vehicle).
///
/// # Errors
///
/// Returns an error if file creation or CSV writing fails.
pub fn export_records_csv(
    records: &[VehicleRecord],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    csv::export_records_csv_impl(records, file)
}

/// Export vehicle paths to CSV (one row per visited position), keyed by
/// vehicle id and sequence number; the feed for map rendering.
///
/// # Errors
///
/// Returns an error if file creation or CSV writing fails.
pub fn export_paths_csv(
    records: &[VehicleRecord],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    csv::export_paths_csv_impl(records, file)
}

/// Export terminal vehicle records to JSON (an array of record objects).
///
/// # Errors
///
/// Returns an error if file creation or serialization fails.
pub fn export_records_json(
    records: &[VehicleRecord],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    json::export_records_json_impl(records, file)
}

/// Export a run summary to JSON.
///
/// # Errors
///
/// Returns an error if file creation or serialization fails.
pub fn export_summary_json(
    summary: &SimulationSummary,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    json::export_summary_json_impl(summary, file)
}
