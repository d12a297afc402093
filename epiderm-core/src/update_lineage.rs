use crate::datastructures::Population;
use crate::errors::SimulationError;

use epiderm_concepts::{Differentiation, Growth, LineageAgent};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Summary of a single lineage step.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// Number of committed cells after the step
    pub n_cells: usize,
    /// Number of daughters which were produced in this step
    pub n_divisions: usize,
    /// Number of cells which stopped dividing in this step
    pub n_arrests: usize,
}

impl<C> Population<C> {
    /// Advances every cell of the population by one step.
    ///
    /// The step is carried out in three phases:
    /// 1. Every cell is grown by `dt` and its behavior is evaluated in parallel.
    ///    All of this happens on copies of the cells.
    /// 2. The updated cells are written back.
    /// 3. Daughters are staged in the order of their mothers and committed together.
    ///
    /// If any cell fails in the first phase, the error is returned and the population is left
    /// exactly as it was.
    /// Cells which were staged before calling this function are committed together with the
    /// daughters.
    ///
    /// ```
    /// # use epiderm_core::datastructures::Population;
    /// # use epiderm_building_blocks::prelude::*;
    /// # use epiderm_concepts::*;
    /// let mut population = Population::new();
    /// population.append(CellAgent::new([0.0; 3].into(), 4.0, CellType::Stem).unwrap());
    /// population.commit();
    ///
    /// let report = population.update_lineage(&1.0, &NoGrowth).unwrap();
    /// assert_eq!(report.n_cells, 2);
    /// assert_eq!(report.n_divisions, 1);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(skip_all))]
    pub fn update_lineage<G>(&mut self, dt: &f64, growth: &G) -> Result<StepReport, SimulationError>
    where
        C: LineageAgent + Clone + Send + Sync,
        G: Growth<C> + Sync,
    {
        let (next_cells, daughters): (Vec<C>, Vec<Option<C>>) = self
            .cells
            .par_iter()
            .map(|cbox| -> Result<(C, Option<C>), SimulationError> {
                let mut next = cbox.cell.clone();
                growth.grow(dt, &mut next)?;
                let daughter = next.run()?;
                Ok((next, daughter))
            })
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .unzip();

        let n_arrests = self
            .cells
            .par_iter()
            .zip(next_cells.par_iter())
            .filter(|(cbox, next)| cbox.can_divide() && !next.can_divide())
            .count();
        self.cells
            .par_iter_mut()
            .zip(next_cells.into_par_iter())
            .for_each(|(cbox, next)| cbox.cell = next);

        let mut n_divisions = 0;
        for (cbox, daughter) in self.cells.iter().zip(daughters) {
            if let Some(daughter) = daughter {
                self.staged.push((daughter, Some(cbox.identifier)));
                n_divisions += 1;
            }
        }
        self.commit();

        let report = StepReport {
            n_cells: self.len(),
            n_divisions,
            n_arrests,
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(
            n_cells = report.n_cells,
            n_divisions = report.n_divisions,
            n_arrests = report.n_arrests,
            "lineage step"
        );
        Ok(report)
    }
}
