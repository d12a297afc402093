use crate::config::DomainBounds;
use crate::datastructures::Population;
use crate::errors::SimulationError;

use epiderm_concepts::InvalidArgument;

use nalgebra::Vector3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Widest interval from which positions and values are sampled.
///
/// Wider intervals overflow the scale of the uniform float sampler.
pub const MAX_SAMPLING_WIDTH: f64 = f64::MAX / 2.0;

/// Checks that `[min, max]` can be sampled uniformly.
pub(crate) fn check_sampling_range(min: f64, max: f64) -> Result<(), InvalidArgument> {
    if !(min.is_finite() && max.is_finite()) {
        return Err(InvalidArgument(format!(
            "sampling bounds must be finite but are [{min}, {max}]"
        )));
    }
    if min > max {
        return Err(InvalidArgument(format!(
            "lower bound {min} is larger than upper bound {max}"
        )));
    }
    if max - min > MAX_SAMPLING_WIDTH {
        return Err(InvalidArgument(format!(
            "interval [{min}, {max}] is wider than {MAX_SAMPLING_WIDTH:e}"
        )));
    }
    Ok(())
}

/// Places an initial population uniformly inside a square region of the plane `z = z_plane`.
///
/// All cells of one call to [PopulationSeeder::seed] are staged and committed at once.
///
/// ```
/// # use epiderm_core::{datastructures::Population, setup::PopulationSeeder};
/// # use rand::SeedableRng;
/// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
/// let mut population = Population::new();
/// let seeder = PopulationSeeder::new(0.0, 250.0, 200).unwrap();
/// seeder.seed(&mut rng, &mut population, |pos| pos).unwrap();
///
/// assert_eq!(population.len(), 200);
/// for cbox in population.iter() {
///     assert!(0.0 <= cbox.cell.x && cbox.cell.x <= 250.0);
///     assert!(0.0 <= cbox.cell.y && cbox.cell.y <= 250.0);
///     assert_eq!(cbox.cell.z, 0.0);
/// }
/// ```
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct PopulationSeeder {
    min: f64,
    max: f64,
    count: usize,
    z_plane: f64,
}

impl PopulationSeeder {
    /// Checks the arguments and constructs a new [PopulationSeeder].
    ///
    /// Bounds must be finite with `min <= max` and `count` must not be negative.
    /// The width `max - min` may not exceed [MAX_SAMPLING_WIDTH].
    pub fn new(min: f64, max: f64, count: i64) -> Result<Self, InvalidArgument> {
        check_sampling_range(min, max)?;
        let count = usize::try_from(count).map_err(|_| {
            InvalidArgument(format!("number of cells must not be negative but is {count}"))
        })?;
        Ok(Self {
            min,
            max,
            count,
            z_plane: 0.0,
        })
    }

    /// Seeds inside the given [DomainBounds].
    pub fn from_bounds(bounds: &DomainBounds, count: i64) -> Result<Self, InvalidArgument> {
        Self::new(bounds.min_bound, bounds.max_bound, count)
    }

    /// Places cells at a different height.
    pub fn with_z_plane(self, z_plane: f64) -> Result<Self, InvalidArgument> {
        if !z_plane.is_finite() {
            return Err(InvalidArgument(format!(
                "z-plane must be finite but is {z_plane}"
            )));
        }
        Ok(Self { z_plane, ..self })
    }

    /// Number of cells placed by one call to [PopulationSeeder::seed].
    pub fn count(&self) -> usize {
        self.count
    }

    fn draw_position<R: Rng>(&self, rng: &mut R) -> Vector3<f64> {
        let x = rng.gen_range(self.min..=self.max);
        let y = rng.gen_range(self.min..=self.max);
        Vector3::new(x, y, self.z_plane)
    }

    /// Places [PopulationSeeder::count] cells and commits them.
    ///
    /// The `builder` turns a position into a fully initialized cell.
    /// Returns the number of committed cells.
    /// Nothing is staged if there is no room for [PopulationSeeder::count] cells.
    pub fn seed<C, R, F>(
        &self,
        rng: &mut R,
        population: &mut Population<C>,
        mut builder: F,
    ) -> Result<usize, InvalidArgument>
    where
        R: Rng,
        F: FnMut(Vector3<f64>) -> C,
    {
        population.reserve(self.count)?;
        for _ in 0..self.count {
            let pos = self.draw_position(rng);
            population.append(builder(pos));
        }
        let n_committed = population.commit();
        #[cfg(feature = "tracing")]
        tracing::debug!(n_committed, min = self.min, max = self.max, "seeded population");
        Ok(n_committed)
    }

    /// Similar to [PopulationSeeder::seed] but with a fallible builder.
    ///
    /// If the builder fails for any cell, none of the cells of this call are committed.
    pub fn try_seed<C, R, F, E>(
        &self,
        rng: &mut R,
        population: &mut Population<C>,
        mut builder: F,
    ) -> Result<usize, SimulationError>
    where
        R: Rng,
        F: FnMut(Vector3<f64>) -> Result<C, E>,
        SimulationError: From<E>,
    {
        let n_staged_before = population.n_staged();
        population.reserve(self.count)?;
        for _ in 0..self.count {
            let pos = self.draw_position(rng);
            match builder(pos) {
                Ok(cell) => population.append(cell),
                Err(e) => {
                    population.truncate_staged(n_staged_before);
                    return Err(e.into());
                }
            }
        }
        Ok(population.commit())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use epiderm_building_blocks::prelude::*;
    use epiderm_concepts::{CellType, Differentiation, Position};
    use rand::SeedableRng;

    fn rng() -> rand_chacha::ChaCha8Rng {
        rand_chacha::ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn invalid_arguments() {
        assert!(PopulationSeeder::new(0.0, 250.0, -1).is_err());
        assert!(PopulationSeeder::new(10.0, 0.0, 5).is_err());
        assert!(PopulationSeeder::new(f64::NAN, 0.0, 5).is_err());
        assert!(PopulationSeeder::new(0.0, f64::INFINITY, 5).is_err());
        assert!(PopulationSeeder::new(0.0, 1.0, 1)
            .unwrap()
            .with_z_plane(f64::NAN)
            .is_err());
    }

    #[test]
    fn too_wide_bounds() {
        assert!(PopulationSeeder::new(-f64::MAX, f64::MAX, 3).is_err());
        assert!(PopulationSeeder::new(-f64::MAX, 0.0, 3).is_err());

        let seeder = PopulationSeeder::new(-MAX_SAMPLING_WIDTH, 0.0, 3).unwrap();
        let mut population = Population::new();
        seeder.seed(&mut rng(), &mut population, |pos| pos).unwrap();
        assert_eq!(population.len(), 3);
        assert!(population
            .iter()
            .all(|cbox| cbox.cell.x <= 0.0 && cbox.cell.y >= -MAX_SAMPLING_WIDTH));
    }

    #[test]
    fn unreachable_count_stages_nothing() {
        let mut population = Population::new();
        population.append(Vector3::zeros());
        population.commit();
        let seeder = PopulationSeeder::new(0.0, 1.0, i64::MAX).unwrap();
        let mut n_built = 0;
        let result = seeder.seed(&mut rng(), &mut population, |pos| {
            n_built += 1;
            pos
        });
        assert!(result.is_err());
        assert_eq!(n_built, 0);
        assert_eq!(population.len(), 1);
        assert_eq!(population.n_staged(), 0);

        let result = seeder.try_seed(&mut rng(), &mut population, |pos| {
            Ok::<_, InvalidArgument>(pos)
        });
        assert!(matches!(result, Err(SimulationError::InvalidArgument(_))));
        assert_eq!(population.len(), 1);
    }

    #[test]
    fn seed_epidermal_cells() {
        let mut population = Population::new();
        let seeder = PopulationSeeder::new(0.0, 250.0, 200).unwrap();
        let n = seeder.seed(&mut rng(), &mut population, |pos| {
            CellAgent::new(pos, 2.0, CellType::Stem).unwrap()
        })
        .unwrap();
        assert_eq!(n, 200);
        assert_eq!(population.len(), 200);
        for cbox in population.iter() {
            let pos = cbox.pos();
            assert!((0.0..=250.0).contains(&pos.x));
            assert!((0.0..=250.0).contains(&pos.y));
            assert_eq!(pos.z, 0.0);
            assert_eq!(cbox.cell_type(), CellType::Stem);
            assert!(cbox.can_divide());
        }
    }

    #[test]
    fn zero_count_commits_nothing() {
        let mut population = Population::<CellAgent>::new();
        let seeder = PopulationSeeder::new(0.0, 250.0, 0).unwrap();
        assert_eq!(
            seeder
                .seed(&mut rng(), &mut population, |pos| {
                    CellAgent::new(pos, 2.0, CellType::Stem).unwrap()
                })
                .unwrap(),
            0
        );
        assert!(population.is_empty());
    }

    #[test]
    fn degenerate_bounds_and_z_plane() {
        let mut population = Population::new();
        let seeder = PopulationSeeder::new(3.0, 3.0, 4)
            .unwrap()
            .with_z_plane(-1.5)
            .unwrap();
        seeder.seed(&mut rng(), &mut population, |pos| pos).unwrap();
        assert!(population
            .iter()
            .all(|cbox| cbox.cell == Vector3::new(3.0, 3.0, -1.5)));
    }

    #[test]
    fn failing_builder_commits_nothing() {
        let mut population = Population::new();
        population.append(CellAgent::new(Vector3::zeros(), 1.0, CellType::Stem).unwrap());
        let seeder = PopulationSeeder::new(0.0, 1.0, 10).unwrap();
        let mut n_built = 0;
        let result = seeder.try_seed(&mut rng(), &mut population, |pos| {
            n_built += 1;
            let diameter = if n_built == 5 { -1.0 } else { 2.0 };
            CellAgent::new(pos, diameter, CellType::Stem)
        });
        assert!(matches!(result, Err(SimulationError::InvalidArgument(_))));
        assert!(population.is_empty());
        assert_eq!(population.n_staged(), 1);
    }

    #[test]
    fn same_seed_same_positions() {
        let seeder = PopulationSeeder::new(0.0, 250.0, 20).unwrap();
        let mut p1 = Population::new();
        let mut p2 = Population::new();
        seeder.seed(&mut rng(), &mut p1, |pos| pos).unwrap();
        seeder.seed(&mut rng(), &mut p2, |pos| pos).unwrap();
        assert_eq!(p1, p2);
    }
}
