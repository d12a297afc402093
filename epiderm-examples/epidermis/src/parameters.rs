use epiderm::prelude::*;

use serde::{Deserialize, Serialize};

/// All parameters of the experiment.
///
/// Missing entries in a parameter file are filled with their default values.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Parameters {
    /// Number of stem cells in the initial layer
    pub n_stem_cells: i64,
    /// Diameter of the initial stem cells
    pub initial_diameter: f64,
    /// Region in which the initial layer is placed
    pub bounds: DomainBounds,
    /// Thresholds of the lineage rules
    pub rules: LineageRules,
    /// Increase of the diameter per unit of time
    pub growth_rate: f64,
    /// Cells stop growing at this diameter
    pub max_diameter: f64,
    /// Length of a single step
    pub dt: f64,
    /// Total number of steps
    pub n_steps: u64,
    /// Results are saved every `save_interval` steps
    pub save_interval: u64,
    /// Seed of the random number generator which places the initial layer
    pub rng_seed: u64,
    /// Number of threads which evaluate the lineage rules in parallel
    pub n_threads: usize,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            n_stem_cells: 200,
            initial_diameter: 2.0,
            bounds: DomainBounds::default(),
            rules: LineageRules::default(),
            growth_rate: 0.0,
            max_diameter: 12.0,
            dt: 1.0,
            n_steps: 1,
            save_interval: 1,
            rng_seed: 0,
            n_threads: 1,
        }
    }
}

impl Parameters {
    /// Reads parameters from a json file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }

    /// Builds the growth law stated by these parameters.
    pub fn growth(&self) -> Result<LinearGrowth, CalcError> {
        LinearGrowth::new(self.growth_rate, self.max_diameter)
    }

    /// Builds the settings for the simulation.
    pub fn settings(
        &self,
        storage: Option<StorageBuilder>,
        show_progressbar: bool,
    ) -> Result<Settings, SimulationError> {
        let n_threads = self.n_threads.try_into().map_err(|_| {
            InvalidArgument("number of threads must be larger than 0".to_owned())
        })?;
        Ok(Settings {
            n_threads,
            time: FixedStepsize::from_partial_save_steps(
                0.0,
                self.dt,
                self.n_steps,
                self.save_interval,
            )?,
            storage,
            show_progressbar,
            rng_seed: self.rng_seed,
            bounds: DomainBounds::new(self.bounds.min_bound, self.bounds.max_bound)?,
        })
    }

    /// Constructs a stem cell of the initial layer at the given position.
    pub fn stem_cell(&self, pos: nalgebra::Vector3<f64>) -> Result<CellAgent, InvalidArgument> {
        CellAgent::with_rules(pos, self.initial_diameter, CellType::Stem, self.rules)
    }
}
