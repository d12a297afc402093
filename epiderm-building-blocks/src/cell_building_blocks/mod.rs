/// Growth of cells as a stand-in for the mechanics engine
pub mod growth;

/// Behavior modules which drive the lineage of epidermal cells
pub mod lineage;
