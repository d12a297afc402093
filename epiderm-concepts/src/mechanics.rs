use crate::errors::{CalcError, InvalidArgument};

/// Represents the current position of a cell-agent.
///
/// Positions are only ever changed by the external mechanics engine.
/// The lineage rules never move a cell.
pub trait Position<Pos> {
    /// Gets the cells current position.
    fn pos(&self) -> Pos;
    /// Sets the cells current position.
    fn set_pos(&mut self, pos: &Pos);
}

/// Size of a spherical cell-agent.
pub trait Size {
    /// Current diameter of the cell.
    fn diameter(&self) -> f64;
    /// Sets the diameter. Negative or non-finite values are rejected.
    fn set_diameter(&mut self, diameter: f64) -> Result<(), InvalidArgument>;
}

/// Growth of a cell as performed by the mechanics engine between two lineage decisions.
///
/// The lineage rules only read the diameter.
/// Implementors of this trait stand in for the engine which actually grows it.
pub trait Growth<Cell, Float = f64> {
    /// Grows the cell by the time increment `dt`.
    fn grow(&self, dt: &Float, cell: &mut Cell) -> Result<(), CalcError>;
}
