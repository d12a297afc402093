//! Shared setups of the benchmarks.

use epiderm::prelude::*;

/// Settings for a single step without storage.
pub fn settings(n_threads: usize) -> Result<Settings, SimulationError> {
    Ok(Settings {
        n_threads: n_threads
            .try_into()
            .map_err(|_| InvalidArgument("at least one thread is needed".to_owned()))?,
        time: FixedStepsize::from_partial_save_steps(0.0, 1.0, 1, 1)?,
        storage: None,
        show_progressbar: false,
        rng_seed: 0,
        bounds: DomainBounds::default(),
    })
}

/// Population with a mix of all lineage stages and sizes.
///
/// The type is given by the y coordinate and the diameter grows along the x coordinate such
/// that every branch of the lineage rules is taken.
pub fn mixed_population(
    n_threads: usize,
    n_cells: i64,
) -> Result<SimulationContext<CellAgent, NoGrowth>, SimulationError> {
    let mut sim = SimulationContext::new(settings(n_threads)?, NoGrowth)?;
    sim.try_seed(n_cells, |pos| {
        let diameter = pos.x / 20.0;
        let cell_type = match (pos.y / 100.0) as i32 {
            0 => CellType::Stem,
            1 => CellType::TransitAmplifying,
            _ => CellType::Differentiated,
        };
        CellAgent::new(pos, diameter, cell_type)
    })?;
    Ok(sim)
}
