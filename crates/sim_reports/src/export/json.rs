use sim_core::telemetry::VehicleRecord;

use crate::metrics::SimulationSummary;

pub(crate) fn export_records_json_impl(
    records: &[VehicleRecord],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer_pretty(file, records)?;
    Ok(())
}

pub(crate) fn export_summary_json_impl(
    summary: &SimulationSummary,
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer_pretty(file, summary)?;
    Ok(())
}
