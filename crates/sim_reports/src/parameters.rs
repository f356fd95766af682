//! Parameter variation: grid generation over toll rates, charging modes,
//! fleet sizes, and seeds for parallel experimentation.

use sim_core::pricing::ChargingMode;
use sim_core::scenario::ScenarioParams;

/// One parameter combination to run.
#[derive(Debug, Clone)]
pub struct ParameterSet {
    pub run_id: usize,
    pub seed: u64,
    pub params: ScenarioParams,
}

/// Grid search over a small set of scenario axes. Axes left empty fall back
/// to the base params' value, so a default space generates a single run.
#[derive(Debug, Clone)]
pub struct ParameterSpace {
    toll_rates: Vec<f64>,
    charging_modes: Vec<ChargingMode>,
    fleet_sizes: Vec<usize>,
    seeds: Vec<u64>,
    base: ScenarioParams,
}

impl ParameterSpace {
    pub fn grid() -> Self {
        Self {
            toll_rates: Vec::new(),
            charging_modes: Vec::new(),
            fleet_sizes: Vec::new(),
            seeds: Vec::new(),
            base: ScenarioParams::default(),
        }
    }

    pub fn toll_rates(mut self, rates: Vec<f64>) -> Self {
        self.toll_rates = rates;
        self
    }

    pub fn charging_modes(mut self, modes: Vec<ChargingMode>) -> Self {
        self.charging_modes = modes;
        self
    }

    pub fn fleet_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.fleet_sizes = sizes;
        self
    }

    pub fn seeds(mut self, seeds: Vec<u64>) -> Self {
        self.seeds = seeds;
        self
    }

    /// Base scenario every combination starts from.
    pub fn base_params(mut self, base: ScenarioParams) -> Self {
        self.base = base;
        self
    }

    /// Generate all combinations (Cartesian product), run ids ascending.
    pub fn generate(&self) -> Vec<ParameterSet> {
        let toll_rates = if self.toll_rates.is_empty() {
            vec![self.base.toll_rate_per_km]
        } else {
            self.toll_rates.clone()
        };
        let charging_modes = if self.charging_modes.is_empty() {
            vec![self.base.charging_mode]
        } else {
            self.charging_modes.clone()
        };
        let fleet_sizes = if self.fleet_sizes.is_empty() {
            vec![self.base.num_vehicles]
        } else {
            self.fleet_sizes.clone()
        };
        let seeds = if self.seeds.is_empty() {
            vec![self.base.seed.unwrap_or(0)]
        } else {
            self.seeds.clone()
        };

        let mut sets = Vec::new();
        for &rate in &toll_rates {
            for &mode in &charging_modes {
                for &fleet in &fleet_sizes {
                    for &seed in &seeds {
                        let params = ScenarioParams {
                            num_vehicles: fleet,
                            ..self.base.clone()
                        }
                        .with_toll_rate(rate)
                        .with_charging_mode(mode)
                        .with_seed(seed);
                        sets.push(ParameterSet {
                            run_id: sets.len(),
                            seed,
                            params,
                        });
                    }
                }
            }
        }
        sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_space_generates_single_base_run() {
        let sets = ParameterSpace::grid().generate();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].run_id, 0);
    }

    #[test]
    fn grid_is_the_cartesian_product() {
        let sets = ParameterSpace::grid()
            .toll_rates(vec![0.1, 0.2])
            .charging_modes(vec![ChargingMode::PerStepDistance, ChargingMode::OnEntry])
            .fleet_sizes(vec![5, 10, 20])
            .seeds(vec![1, 2])
            .generate();
        assert_eq!(sets.len(), 2 * 2 * 3 * 2);
        assert_eq!(sets.last().unwrap().run_id, sets.len() - 1);
    }

    #[test]
    fn combinations_carry_their_axis_values() {
        let sets = ParameterSpace::grid()
            .toll_rates(vec![0.4])
            .fleet_sizes(vec![7])
            .seeds(vec![9])
            .generate();
        assert_eq!(sets.len(), 1);
        let set = &sets[0];
        assert_eq!(set.params.toll_rate_per_km, 0.4);
        assert_eq!(set.params.num_vehicles, 7);
        assert_eq!(set.params.seed, Some(9));
        assert_eq!(set.seed, 9);
    }
}
