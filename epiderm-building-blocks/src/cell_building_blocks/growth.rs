use epiderm_concepts::{CalcError, Growth, Size};

use serde::{Deserialize, Serialize};

/// Cells do not grow.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct NoGrowth;

impl<C> Growth<C> for NoGrowth {
    fn grow(&self, _: &f64, _: &mut C) -> Result<(), CalcError> {
        Ok(())
    }
}

/// Linear increase of the diameter up to a maximum value.
///
/// ```
/// # use epiderm_building_blocks::prelude::*;
/// # use epiderm_concepts::{CellType, Growth, Size};
/// let growth = LinearGrowth::new(0.5, 10.0).unwrap();
/// let mut cell = CellAgent::new([0.0; 3].into(), 9.8, CellType::Stem).unwrap();
/// growth.grow(&1.0, &mut cell).unwrap();
/// assert_eq!(cell.diameter(), 10.0);
/// ```
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct LinearGrowth {
    /// Increase of the diameter per unit of time
    pub rate: f64,
    /// The diameter never exceeds this value
    pub max_diameter: f64,
}

impl Default for LinearGrowth {
    fn default() -> Self {
        Self {
            rate: 1.0,
            max_diameter: 12.0,
        }
    }
}

impl LinearGrowth {
    /// Constructs a new [LinearGrowth] and checks that both values are non-negative.
    pub fn new(rate: f64, max_diameter: f64) -> Result<Self, CalcError> {
        if !(rate >= 0.0 && rate.is_finite()) {
            return Err(CalcError(format!(
                "growth rate must be non-negative and finite but is {rate}"
            )));
        }
        if !(max_diameter >= 0.0 && max_diameter.is_finite()) {
            return Err(CalcError(format!(
                "maximum diameter must be non-negative and finite but is {max_diameter}"
            )));
        }
        Ok(Self { rate, max_diameter })
    }
}

impl<C> Growth<C> for LinearGrowth
where
    C: Size,
{
    fn grow(&self, dt: &f64, cell: &mut C) -> Result<(), CalcError> {
        let diameter = cell.diameter();
        if diameter >= self.max_diameter {
            return Ok(());
        }
        let new_diameter = (diameter + self.rate * dt).min(self.max_diameter);
        cell.set_diameter(new_diameter)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cell_models::epidermal_cell::CellAgent;
    use epiderm_concepts::CellType;

    #[test]
    fn no_growth_keeps_diameter() {
        let mut cell = CellAgent::new([1.0, 2.0, 0.0].into(), 3.0, CellType::Stem).unwrap();
        NoGrowth.grow(&10.0, &mut cell).unwrap();
        assert_eq!(cell.diameter(), 3.0);
    }

    #[test]
    fn linear_growth_is_capped() {
        let growth = LinearGrowth::new(2.0, 7.0).unwrap();
        let mut cell = CellAgent::new([0.0; 3].into(), 4.0, CellType::Stem).unwrap();
        growth.grow(&1.0, &mut cell).unwrap();
        assert_eq!(cell.diameter(), 6.0);
        growth.grow(&1.0, &mut cell).unwrap();
        assert_eq!(cell.diameter(), 7.0);
        growth.grow(&1.0, &mut cell).unwrap();
        assert_eq!(cell.diameter(), 7.0);
    }

    #[test]
    fn rejects_negative_rate() {
        assert!(LinearGrowth::new(-1.0, 7.0).is_err());
        assert!(LinearGrowth::new(1.0, f64::NAN).is_err());
    }

    #[test]
    fn negative_time_increment_is_an_error() {
        let growth = LinearGrowth::new(1.0, 20.0).unwrap();
        let mut cell = CellAgent::new([0.0; 3].into(), 0.5, CellType::Stem).unwrap();
        assert!(growth.grow(&-1.0, &mut cell).is_err());
        assert_eq!(cell.diameter(), 0.5);
    }
}
