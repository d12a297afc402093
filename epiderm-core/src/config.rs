use crate::setup::check_sampling_range;
use crate::storage::StorageBuilder;
use crate::time::FixedStepsize;

use epiderm_concepts::InvalidArgument;

use serde::{Deserialize, Serialize};

/// Square region of the plane in which cells are initially placed.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct DomainBounds {
    /// Lower bound of the x and y coordinates
    pub min_bound: f64,
    /// Upper bound of the x and y coordinates
    pub max_bound: f64,
}

impl Default for DomainBounds {
    fn default() -> Self {
        Self {
            min_bound: 0.0,
            max_bound: 250.0,
        }
    }
}

impl DomainBounds {
    /// Constructs new bounds and checks that cells can be seeded inside them.
    pub fn new(min_bound: f64, max_bound: f64) -> Result<Self, InvalidArgument> {
        check_sampling_range(min_bound, max_bound)?;
        Ok(Self {
            min_bound,
            max_bound,
        })
    }

    /// Checks if the x and y coordinates of `pos` lie inside the bounds.
    pub fn contains(&self, pos: &nalgebra::Vector3<f64>) -> bool {
        let range = self.min_bound..=self.max_bound;
        range.contains(&pos.x) && range.contains(&pos.y)
    }
}

/// Contains all settings needed to run a simulation
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Settings {
    /// Number of threads used for executing simulation in parallel
    pub n_threads: core::num::NonZeroUsize,
    /// Specify how time is advanced during the simulation
    pub time: FixedStepsize<f64>,
    /// Define storage properties. Nothing is saved if this is `None`.
    pub storage: Option<StorageBuilder>,
    /// Determines if progress bar should be shown during execution
    pub show_progressbar: bool,
    /// Seed of the random number generator
    pub rng_seed: u64,
    /// Region in which cells are seeded
    pub bounds: DomainBounds,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bounds() {
        let bounds = DomainBounds::default();
        assert!(bounds.contains(&[0.0, 250.0, 17.0].into()));
        assert!(!bounds.contains(&[-0.1, 10.0, 0.0].into()));
        assert!(DomainBounds::new(1.0, 0.0).is_err());
        assert!(DomainBounds::new(f64::NEG_INFINITY, 0.0).is_err());
        assert!(DomainBounds::new(-f64::MAX, f64::MAX).is_err());
        assert_eq!(DomainBounds::new(2.0, 2.0).unwrap().max_bound, 2.0);
    }

    #[test]
    fn settings_from_json() {
        let settings: Settings = serde_json::from_str(
            r#"{
                "n_threads": 2,
                "time": {
                    "dt": 1.0,
                    "t0": 0.0,
                    "n_steps": 3,
                    "save_iterations": [0, 3],
                    "current_iteration": 0
                },
                "storage": null,
                "show_progressbar": false,
                "rng_seed": 7,
                "bounds": { "min_bound": 0.0, "max_bound": 100.0 }
            }"#,
        )
        .unwrap();
        assert_eq!(settings.n_threads.get(), 2);
        assert_eq!(settings.time.n_steps(), 3);
        assert!(settings.storage.is_none());
        assert_eq!(settings.bounds.max_bound, 100.0);
    }
}
