pub use crate::cell_building_blocks::growth::*;
pub use crate::cell_building_blocks::lineage::*;

pub use crate::cell_models::epidermal_cell::*;
