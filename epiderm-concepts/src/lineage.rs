use crate::cell::{CellType, Differentiation};
use crate::errors::{DivisionError, InconsistentState, LineageError};
use crate::mechanics::Size;

use serde::{Deserialize, Serialize};

/// Contains all events which can arise during one lineage step and need to be carried out
/// (see also [Lineage]).
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub enum LineageEvent {
    /// Calls the [Division::divide] method and assigns the given type to the daughter.
    /// The daughter is always allowed to divide again.
    Divide {
        /// Type of the spawned daughter
        daughter: CellType,
    },
    /// The cell leaves the division cycle for good without dividing.
    Arrest,
    /// The cell (re-)asserts its own type.
    Commit(CellType),
}

impl LineageEvent {
    /// Spawns the daughter belonging to this event (if any).
    ///
    /// The daughter is produced by the [Division] protocol which copies the state of the mother.
    /// Type and divisibility are overwritten afterwards.
    pub fn spawn<C>(&self, mother: &C) -> Result<Option<C>, DivisionError>
    where
        C: Division + Differentiation,
    {
        match self {
            LineageEvent::Divide { daughter } => {
                let mut new_cell = mother.divide()?;
                new_cell.set_cell_type(*daughter);
                new_cell.set_can_divide(true);
                Ok(Some(new_cell))
            }
            LineageEvent::Arrest | LineageEvent::Commit(_) => Ok(None),
        }
    }

    /// Carries out the effects of this event on the mother itself.
    pub fn apply_to_mother<C>(&self, mother: &mut C)
    where
        C: Differentiation,
    {
        match self {
            LineageEvent::Divide { .. } => (),
            LineageEvent::Arrest => mother.set_can_divide(false),
            LineageEvent::Commit(cell_type) => mother.set_cell_type(*cell_type),
        }
    }
}

/// One behavior module per lineage stage.
///
/// The `decide` function is called once per simulation step for every cell and must only
/// depend on the state of the given cell. This allows backends to evaluate all cells in
/// parallel on a snapshot of the population.
pub trait Lineage {
    /// The lineage stage this module serves.
    fn cell_type(&self) -> CellType;

    /// Inspects the cell and returns the event which should be carried out (if any).
    #[must_use]
    fn decide<C>(&self, cell: &C) -> Option<LineageEvent>
    where
        C: Differentiation + Size;
}

/// The division protocol: produce a daughter as a copy of the mother.
///
/// The protocol itself has no knowledge of cell types.
/// Which type and flag the daughter obtains is decided by the [Lineage] module
/// (see [LineageEvent::spawn]).
pub trait Division: Sized {
    /// Performs division of the cell and returns the new daughter.
    #[must_use]
    fn divide(&self) -> Result<Self, DivisionError>;
}

/// A cell-agent which carries its own [Lineage] module.
///
/// ```
/// # use epiderm_concepts::*;
/// struct Renewing;
///
/// impl Lineage for Renewing {
///     fn cell_type(&self) -> CellType {
///         CellType::Stem
///     }
///
///     fn decide<C: Differentiation + Size>(&self, cell: &C) -> Option<LineageEvent> {
///         cell.can_divide().then_some(LineageEvent::Divide { daughter: CellType::Stem })
///     }
/// }
///
/// #[derive(Clone)]
/// struct Agent {
///     cell_type: CellType,
///     can_divide: bool,
/// }
/// # impl Differentiation for Agent {
/// #     fn cell_type(&self) -> CellType { self.cell_type }
/// #     fn set_cell_type(&mut self, cell_type: CellType) { self.cell_type = cell_type }
/// #     fn can_divide(&self) -> bool { self.can_divide }
/// #     fn set_can_divide(&mut self, can_divide: bool) { self.can_divide = can_divide }
/// # }
/// # impl Size for Agent {
/// #     fn diameter(&self) -> f64 { 1.0 }
/// #     fn set_diameter(&mut self, _: f64) -> Result<(), InvalidArgument> { Ok(()) }
/// # }
/// # impl Division for Agent {
/// #     fn divide(&self) -> Result<Self, DivisionError> { Ok(self.clone()) }
/// # }
///
/// impl LineageAgent for Agent {
///     type Behavior = Renewing;
///     fn behavior(&self) -> &Renewing {
///         &Renewing
///     }
/// }
///
/// let mut agent = Agent { cell_type: CellType::Stem, can_divide: true };
/// let daughter = agent.run().unwrap().unwrap();
/// assert_eq!(daughter.cell_type(), CellType::Stem);
/// ```
pub trait LineageAgent: Differentiation + Size + Division {
    /// The attached behavior module.
    type Behavior: Lineage;

    /// Returns the attached behavior module.
    fn behavior(&self) -> &Self::Behavior;

    /// Checks that the attached behavior serves the type of the cell.
    fn check_consistency(&self) -> Result<(), InconsistentState> {
        let behavior_type = self.behavior().cell_type();
        let cell_type = self.cell_type();
        if behavior_type == cell_type {
            Ok(())
        } else {
            Err(InconsistentState(format!(
                "cell of type {cell_type} (code {}) carries the {behavior_type} behavior",
                cell_type.code()
            )))
        }
    }

    /// Evaluates the attached behavior on the current state of the cell.
    fn decide(&self) -> Option<LineageEvent> {
        self.behavior().decide(self)
    }

    /// Performs one full lineage step.
    ///
    /// Returns the daughter if the cell divided.
    /// The cell is left untouched if an error is returned.
    fn run(&mut self) -> Result<Option<Self>, LineageError> {
        self.check_consistency()?;
        let event = match self.decide() {
            Some(event) => event,
            None => return Ok(None),
        };
        let daughter = event.spawn(self)?;
        event.apply_to_mother(self);
        Ok(daughter)
    }
}
