pub use epiderm_building_blocks::prelude::*;
pub use epiderm_concepts::*;

pub use epiderm_core::config::*;
pub use epiderm_core::datastructures::*;
pub use epiderm_core::errors::*;
pub use epiderm_core::setup::*;
pub use epiderm_core::simulation::*;
pub use epiderm_core::storage::*;
pub use epiderm_core::time::*;
pub use epiderm_core::update_lineage::*;
