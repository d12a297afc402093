/// The [CellAgent](epidermal_cell::CellAgent) combines a position, a diameter and the lineage
/// state of a cell with the [BehaviorModule](crate::cell_building_blocks::lineage::BehaviorModule)
/// which serves its type.
pub mod epidermal_cell;
