//! Parallel simulation execution using rayon.
//!
//! Each run owns a private `World`, so parallel runs share no mutable state.

use bevy_ecs::prelude::World;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use sim_core::runner::{run_to_completion, simulation_schedule};
use sim_core::scenario::{build_scenario, ScenarioError};
use sim_core::telemetry::{collect_records, VehicleRecord};

use crate::metrics::{summarize, SimulationSummary};
use crate::parameters::ParameterSet;

/// Outcome of one simulation run: the aggregate summary plus the raw
/// records for record/path export.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    pub steps: u64,
    pub summary: SimulationSummary,
    pub records: Vec<VehicleRecord>,
}

/// Run a single parameter set to completion.
///
/// # Errors
///
/// Returns the configuration error when the scenario fails validation.
pub fn run_single_simulation(param_set: &ParameterSet) -> Result<SimulationRun, ScenarioError> {
    let mut world = World::new();
    build_scenario(&mut world, param_set.params.clone())?;

    let mut schedule = simulation_schedule();
    let steps = run_to_completion(&mut world, &mut schedule);

    let records = collect_records(&mut world);
    let summary = summarize(&records);
    Ok(SimulationRun {
        steps,
        summary,
        records,
    })
}

/// Run multiple simulations in parallel across available CPU cores.
///
/// Results come back in the same order as the input parameter sets. Panics
/// if a parameter set fails validation; sets produced by
/// [`crate::parameters::ParameterSpace::generate`] from valid base params
/// are valid by construction.
pub fn run_parallel_experiments(
    parameter_sets: Vec<ParameterSet>,
    num_threads: Option<usize>,
) -> Vec<SimulationRun> {
    run_parallel_experiments_with_progress(parameter_sets, num_threads, true)
}

/// Run multiple simulations in parallel with an optional progress bar.
pub fn run_parallel_experiments_with_progress(
    parameter_sets: Vec<ParameterSet>,
    num_threads: Option<usize>,
    show_progress: bool,
) -> Vec<SimulationRun> {
    let total = parameter_sets.len();
    let pb = if show_progress && total > 0 {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(bar)
    } else {
        None
    };

    let pool = if let Some(threads) = num_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .expect("Failed to create thread pool")
    } else {
        rayon::ThreadPoolBuilder::new()
            .build()
            .expect("Failed to create thread pool")
    };

    let pb_clone = pb.clone();
    let results = pool.install(|| {
        parameter_sets
            .par_iter()
            .map(|param_set| {
                let run = run_single_simulation(param_set)
                    .expect("parameter set should pass scenario validation");
                if let Some(ref progress_bar) = pb_clone {
                    progress_bar.inc(1);
                }
                run
            })
            .collect()
    });

    if let Some(ref progress_bar) = pb {
        progress_bar.finish_with_message("Completed");
    }

    results
}
