use sim_core::telemetry::VehicleRecord;

fn outcome_str(record: &VehicleRecord) -> &'static str {
    use sim_core::telemetry::VehicleOutcome;
    match record.outcome {
        VehicleOutcome::ReachedDestination => "ReachedDestination",
        VehicleOutcome::HaltedInsufficientFunds => "HaltedInsufficientFunds",
        VehicleOutcome::SimulationTimedOut => "SimulationTimedOut",
    }
}

pub(crate) fn export_records_csv_impl(
    records: &[VehicleRecord],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record([
        "vehicle_id",
        "origin_lat",
        "origin_lng",
        "destination_lat",
        "destination_lng",
        "final_lat",
        "final_lng",
        "distance_km",
        "toll_paid",
        "balance",
        "outcome",
    ])?;

    for record in records {
        wtr.write_record([
            record.id.to_string(),
            record.origin.lat.to_string(),
            record.origin.lng.to_string(),
            record.destination.lat.to_string(),
            record.destination.lng.to_string(),
            record.final_position.lat.to_string(),
            record.final_position.lng.to_string(),
            record.distance_km.to_string(),
            record.toll_paid.to_string(),
            record.balance.to_string(),
            outcome_str(record).to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub(crate) fn export_paths_csv_impl(
    records: &[VehicleRecord],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record(["vehicle_id", "seq", "lat", "lng"])?;
    for record in records {
        for (seq, point) in record.path.iter().enumerate() {
            wtr.write_record([
                record.id.to_string(),
                seq.to_string(),
                point.lat.to_string(),
                point.lng.to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
