#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
//! # epiderm - Building Blocks
//!
//! Building blocks provide the concrete epidermal cell model and its behavior modules.
//! The [CellAgent](cell_models::epidermal_cell::CellAgent) carries one of the three
//! [BehaviorModule](cell_building_blocks::lineage::BehaviorModule) variants which
//! implement the lineage rules of stem, transit-amplifying and differentiated cells.
//! ```rust
//! # use epiderm_building_blocks::prelude::*;
//! # use epiderm_concepts::*;
//! let mut stem = CellAgent::new([0.0; 3].into(), 4.0, CellType::Stem).unwrap();
//! let daughter = stem.run().unwrap().unwrap();
//! assert_eq!(daughter.cell_type(), CellType::Stem);
//!
//! stem.set_diameter(6.0).unwrap();
//! let daughter = stem.run().unwrap().unwrap();
//! assert_eq!(daughter.cell_type(), CellType::TransitAmplifying);
//! ```
//! Thresholds can be adjusted through [LineageRules](cell_building_blocks::lineage::LineageRules).
//! Growth of the diameter is not part of the lineage rules.
//! The [growth](cell_building_blocks::growth) module only contains simple stand-ins for the
//! mechanics engine which is responsible for it.

/// Construct cells from individual components
pub mod cell_building_blocks;

/// Collection of complete cell models
pub mod cell_models;

/// Handy re-exports of every building block.
pub mod prelude;
