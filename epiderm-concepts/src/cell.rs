use crate::errors::InvalidArgument;
use crate::mechanics::{Position, Size};

use serde::{Deserialize, Serialize};

/// Lineage stage of an epidermal cell.
///
/// The stages are ordered and a cell may only ever advance along
/// `Stem -> TransitAmplifying -> Differentiated`.
/// When (de)serialized, the type is represented by its integer code (see [CellType::code]).
///
/// ```
/// # use epiderm_concepts::CellType;
/// assert_eq!(CellType::try_from(2).unwrap(), CellType::TransitAmplifying);
/// assert!(CellType::try_from(4).is_err());
/// assert!(CellType::Stem < CellType::Differentiated);
/// ```
#[derive(
    Clone, Copy, Debug, Deserialize, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize,
)]
#[serde(try_from = "i32", into = "i32")]
pub enum CellType {
    /// Self-renewing stem cell (code `1`)
    Stem,
    /// Transit-amplifying cell (code `2`)
    TransitAmplifying,
    /// Terminally differentiated cell (code `3`)
    Differentiated,
}

impl CellType {
    /// All stages in lineage order.
    pub const ALL: [CellType; 3] = [
        CellType::Stem,
        CellType::TransitAmplifying,
        CellType::Differentiated,
    ];

    /// Integer code of the stage: 1=Stem, 2=TransitAmplifying, 3=Differentiated.
    pub fn code(self) -> i32 {
        match self {
            CellType::Stem => 1,
            CellType::TransitAmplifying => 2,
            CellType::Differentiated => 3,
        }
    }

    /// Inverse of [CellType::code].
    pub fn from_code(code: i32) -> Result<Self, InvalidArgument> {
        match code {
            1 => Ok(CellType::Stem),
            2 => Ok(CellType::TransitAmplifying),
            3 => Ok(CellType::Differentiated),
            _ => Err(InvalidArgument(format!(
                "unknown cell type code {code}, expected one of 1 (Stem), \
                2 (TransitAmplifying) or 3 (Differentiated)"
            ))),
        }
    }

    /// Checks if moving from `self` to `other` keeps the lineage monotonic.
    pub fn may_become(self, other: CellType) -> bool {
        other >= self
    }
}

impl TryFrom<i32> for CellType {
    type Error = InvalidArgument;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        CellType::from_code(code)
    }
}

impl From<CellType> for i32 {
    fn from(cell_type: CellType) -> Self {
        cell_type.code()
    }
}

impl core::fmt::Display for CellType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CellType::Stem => write!(f, "Stem"),
            CellType::TransitAmplifying => write!(f, "TransitAmplifying"),
            CellType::Differentiated => write!(f, "Differentiated"),
        }
    }
}

/// Read and write access to the lineage state of a cell-agent.
///
/// Implementors which also carry a behavior module must keep the module in sync with the
/// type when [Differentiation::set_cell_type] is called.
pub trait Differentiation {
    /// Current lineage stage.
    fn cell_type(&self) -> CellType;
    /// Sets the lineage stage.
    fn set_cell_type(&mut self, cell_type: CellType);
    /// Whether the agent still attempts to divide.
    fn can_divide(&self) -> bool;
    /// Sets the divisibility flag.
    fn set_can_divide(&mut self, can_divide: bool);
}

/// Unique identifier which is given to every cell in the simulation
///
/// The counter is unique across the whole population and assigned when a batch of new cells is
/// committed.
#[derive(Clone, Copy, Debug, Deserialize, Hash, PartialEq, Eq, Ord, PartialOrd, Serialize)]
pub enum CellIdentifier {
    /// Initially placed inside the simulation
    Initial(u64),
    /// Produced from a division process
    Division(u64),
}

impl CellIdentifier {
    /// The population-wide counter of this identifier.
    pub fn counter(&self) -> u64 {
        match self {
            CellIdentifier::Initial(n) => *n,
            CellIdentifier::Division(n) => *n,
        }
    }
}

impl core::fmt::Display for CellIdentifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CellIdentifier::Initial(n) => write!(f, "I{n}"),
            CellIdentifier::Division(n) => write!(f, "D{n}"),
        }
    }
}

/// Specifies how to retrieve a unique identifier of an object.
pub trait Id {
    /// The identifier type is usually chosen to be completely unique and repeatable across
    /// different simulations.
    type Identifier;

    /// Retrieves the Identifier from the object.
    fn get_id(&self) -> Self::Identifier;
    /// Returns a reference to the id of the object.
    fn ref_id(&self) -> &Self::Identifier;
}

/// Wrapper around the user-defined cell-agent
///
/// This wrapper serves to provide a unique identifier and the option to specify
/// the parent of the current cell.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CellBox<C> {
    /// Unique identifier of the cell within its population.
    pub identifier: CellIdentifier,
    /// Identifier of the parent cell if this cell was created by cell-division
    pub parent: Option<CellIdentifier>,
    /// The cell which is encapsulated by this box.
    pub cell: C,
}

impl<C> Id for CellBox<C> {
    type Identifier = CellIdentifier;

    fn get_id(&self) -> CellIdentifier {
        self.identifier
    }

    fn ref_id(&self) -> &CellIdentifier {
        &self.identifier
    }
}

impl<C> CellBox<C> {
    /// Create a new [CellBox] for a cell present initially in the simulation.
    pub fn new_initial(counter: u64, cell: C) -> CellBox<C> {
        CellBox {
            identifier: CellIdentifier::Initial(counter),
            parent: None,
            cell,
        }
    }

    /// Create a new [CellBox] for a cell which was spawned by `parent`.
    pub fn new_daughter(counter: u64, cell: C, parent: CellIdentifier) -> CellBox<C> {
        CellBox {
            identifier: CellIdentifier::Division(counter),
            parent: Some(parent),
            cell,
        }
    }

    /// Simple method to retrieve the [CellIdentifier] of the parent cell if existing.
    pub fn get_parent_id(&self) -> Option<CellIdentifier> {
        self.parent
    }
}

impl<C> Differentiation for CellBox<C>
where
    C: Differentiation,
{
    fn cell_type(&self) -> CellType {
        self.cell.cell_type()
    }

    fn set_cell_type(&mut self, cell_type: CellType) {
        self.cell.set_cell_type(cell_type)
    }

    fn can_divide(&self) -> bool {
        self.cell.can_divide()
    }

    fn set_can_divide(&mut self, can_divide: bool) {
        self.cell.set_can_divide(can_divide)
    }
}

impl<C, Pos> Position<Pos> for CellBox<C>
where
    C: Position<Pos>,
{
    fn pos(&self) -> Pos {
        self.cell.pos()
    }

    fn set_pos(&mut self, pos: &Pos) {
        self.cell.set_pos(pos)
    }
}

impl<C> Size for CellBox<C>
where
    C: Size,
{
    fn diameter(&self) -> f64 {
        self.cell.diameter()
    }

    fn set_diameter(&mut self, diameter: f64) -> Result<(), InvalidArgument> {
        self.cell.set_diameter(diameter)
    }
}

impl<C> core::ops::Deref for CellBox<C> {
    type Target = C;

    fn deref(&self) -> &Self::Target {
        &self.cell
    }
}

impl<C> core::ops::DerefMut for CellBox<C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.cell
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn codes_roundtrip_for_every_stage() {
        for cell_type in CellType::ALL {
            assert_eq!(CellType::from_code(cell_type.code()), Ok(cell_type));
        }
        assert!(CellType::from_code(0).is_err());
        assert!(CellType::from_code(-1).is_err());
    }

    #[test]
    fn serializes_as_integer_code() {
        let json = serde_json::to_string(&CellType::Differentiated).unwrap();
        assert_eq!(json, "3");
        let parsed: CellType = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, CellType::Stem);
        assert!(serde_json::from_str::<CellType>("7").is_err());
    }

    #[test]
    fn lineage_only_advances() {
        assert!(CellType::Stem.may_become(CellType::TransitAmplifying));
        assert!(CellType::Differentiated.may_become(CellType::Differentiated));
        assert!(!CellType::Differentiated.may_become(CellType::Stem));
        assert!(!CellType::TransitAmplifying.may_become(CellType::Stem));
    }

    #[test]
    fn identifier_keeps_counter() {
        let mother = CellBox::new_initial(3, ());
        let daughter = CellBox::new_daughter(7, (), mother.get_id());
        assert_eq!(daughter.get_parent_id(), Some(CellIdentifier::Initial(3)));
        assert_eq!(daughter.identifier.counter(), 7);
        assert_eq!(format!("{}", daughter.identifier), "D7");
    }
}
