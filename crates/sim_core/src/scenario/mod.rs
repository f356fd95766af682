pub mod build;
pub mod params;

pub use build::{build_scenario, random_point_in_bounds, ScenarioError};
pub use params::{ArrivalPolicy, ScenarioParams, VehicleSpec};
