use crate::config::{DomainBounds, Settings};
use crate::datastructures::Population;
use crate::errors::SimulationError;
use crate::setup::{check_sampling_range, PopulationSeeder};
use crate::storage::{JsonStorageInterface, StorageInterface};
use crate::time::{TimeEvent, TimeStepper};
use crate::update_lineage::StepReport;

use epiderm_concepts::{CellBox, CellType, Growth, InvalidArgument, LineageAgent};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use std::collections::BTreeMap;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Accumulated results of [SimulationContext::run].
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// Number of steps which were executed
    pub n_steps: usize,
    /// Number of cells at the end of the simulation
    pub n_cells: usize,
    /// Total number of divisions over all steps
    pub n_divisions: usize,
    /// Total number of cells which stopped dividing over all steps
    pub n_arrests: usize,
    /// Number of cells per type at the end of the simulation
    pub counts_by_type: BTreeMap<CellType, usize>,
    /// Folder in which snapshots were saved
    pub storage_path: Option<std::path::PathBuf>,
}

/// Everything which is needed to advance a population in time.
///
/// The context owns the population, the random number generator and the thread pool in
/// which the parallel phase of every step is executed.
/// There is no global state. Multiple contexts can exist side by side.
pub struct SimulationContext<C, G> {
    settings: Settings,
    population: Population<C>,
    rng: ChaCha8Rng,
    growth: G,
    thread_pool: rayon::ThreadPool,
}

impl<C, G> SimulationContext<C, G> {
    /// Constructs a context with an empty population.
    pub fn new(settings: Settings, growth: G) -> Result<Self, SimulationError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(settings.n_threads.get())
            .build()?;
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(settings.rng_seed),
            settings,
            population: Population::new(),
            growth,
            thread_pool,
        })
    }

    /// Settings with which this context was created.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The seeding region.
    pub fn bounds(&self) -> &DomainBounds {
        &self.settings.bounds
    }

    /// The population of this context.
    pub fn population(&self) -> &Population<C> {
        &self.population
    }

    /// Mutable access to the population, for example to move or grow cells between steps.
    pub fn population_mut(&mut self) -> &mut Population<C> {
        &mut self.population
    }

    /// Random number generator of the simulation.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Draws a uniformly distributed value in `[min, max]`.
    ///
    /// The interval may not be wider than [MAX_SAMPLING_WIDTH](crate::setup::MAX_SAMPLING_WIDTH).
    pub fn uniform(&mut self, min: f64, max: f64) -> Result<f64, InvalidArgument> {
        check_sampling_range(min, max)?;
        Ok(self.rng.gen_range(min..=max))
    }

    /// Places `count` cells inside the [DomainBounds] of the settings.
    ///
    /// See [PopulationSeeder::seed].
    pub fn seed<F>(&mut self, count: i64, builder: F) -> Result<usize, SimulationError>
    where
        F: FnMut(nalgebra::Vector3<f64>) -> C,
    {
        let seeder = PopulationSeeder::from_bounds(&self.settings.bounds, count)?;
        Ok(seeder.seed(&mut self.rng, &mut self.population, builder)?)
    }

    /// Same as [SimulationContext::seed] but with a fallible builder.
    ///
    /// See [PopulationSeeder::try_seed].
    pub fn try_seed<F, E>(&mut self, count: i64, builder: F) -> Result<usize, SimulationError>
    where
        F: FnMut(nalgebra::Vector3<f64>) -> Result<C, E>,
        SimulationError: From<E>,
    {
        let seeder = PopulationSeeder::from_bounds(&self.settings.bounds, count)?;
        seeder.try_seed(&mut self.rng, &mut self.population, builder)
    }

    /// Places `count` cells with x and y coordinates inside `[min, max]`.
    pub fn seed_within<F>(
        &mut self,
        min: f64,
        max: f64,
        count: i64,
        builder: F,
    ) -> Result<usize, SimulationError>
    where
        F: FnMut(nalgebra::Vector3<f64>) -> C,
    {
        let seeder = PopulationSeeder::new(min, max, count)?;
        Ok(seeder.seed(&mut self.rng, &mut self.population, builder)?)
    }

    /// Advances the population by one step (see [Population::update_lineage]).
    pub fn step(&mut self, dt: &f64) -> Result<StepReport, SimulationError>
    where
        C: LineageAgent + Clone + Send + Sync,
        G: Growth<C> + Sync,
    {
        let Self {
            population,
            growth,
            thread_pool,
            ..
        } = self;
        thread_pool.install(|| population.update_lineage(dt, &*growth))
    }

    /// Runs all steps of the time stepper given in the [Settings].
    ///
    /// Snapshots of the population are saved at every
    /// [PartialSave](crate::time::TimeEvent::PartialSave) if a storage was configured.
    /// Every call starts again at the first iteration of the time stepper.
    #[cfg_attr(feature = "tracing", instrument(skip_all))]
    pub fn run(&mut self) -> Result<RunSummary, SimulationError>
    where
        C: LineageAgent + Clone + Send + Sync + Serialize,
        G: Growth<C> + Sync,
    {
        let mut time_stepper = self.settings.time.clone();
        let storage = match &self.settings.storage {
            Some(builder) => {
                let path = builder.clone().init().get_full_path();
                Some(JsonStorageInterface::<CellBox<C>>::open_or_create(&path)?)
            }
            None => None,
        };
        let save = |population: &Population<C>, iteration: usize, time: f64| {
            match &storage {
                Some(storage) => storage.store_batch_elements(iteration as u64, time, population),
                None => Ok(()),
            }
        };

        if time_stepper.initial_event() == Some(TimeEvent::PartialSave) {
            save(&self.population, 0, time_stepper.initial_time())?;
        }
        let mut progress_bar = if self.settings.show_progressbar {
            Some(time_stepper.initialize_bar()?)
        } else {
            None
        };

        let mut summary = RunSummary {
            n_steps: 0,
            n_cells: self.population.len(),
            n_divisions: 0,
            n_arrests: 0,
            counts_by_type: BTreeMap::new(),
            storage_path: storage.as_ref().map(|s| s.path.clone()),
        };
        while let Some(next) = time_stepper.advance()? {
            let report = self.step(&next.increment)?;
            summary.n_steps += 1;
            summary.n_divisions += report.n_divisions;
            summary.n_arrests += report.n_arrests;
            if next.event == Some(TimeEvent::PartialSave) {
                save(&self.population, next.iteration, next.time)?;
            }
            if let Some(bar) = progress_bar.as_mut() {
                time_stepper.update_bar(bar)?;
            }
        }
        summary.n_cells = self.population.len();
        summary.counts_by_type = self.population.counts_by_type();

        #[cfg(feature = "tracing")]
        tracing::info!(
            n_steps = summary.n_steps,
            n_cells = summary.n_cells,
            n_divisions = summary.n_divisions,
            "finished simulation"
        );
        Ok(summary)
    }
}
