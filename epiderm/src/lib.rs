#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! [epiderm](crate) simulates the renewal of epidermal tissue with individual cell-agents.
//!
//! Every cell carries a differentiation type (stem, transit-amplifying or differentiated) and
//! divides depending on its diameter.
//! ```
//! use epiderm::prelude::*;
//!
//! let settings = Settings {
//!     n_threads: 1.try_into().unwrap(),
//!     time: FixedStepsize::from_partial_save_steps(0.0, 1.0, 1, 1).unwrap(),
//!     storage: None,
//!     show_progressbar: false,
//!     rng_seed: 0,
//!     bounds: DomainBounds::default(),
//! };
//! let mut sim = SimulationContext::new(settings, NoGrowth).unwrap();
//! sim.seed(200, |pos| CellAgent::new(pos, 2.0, CellType::Stem).unwrap()).unwrap();
//! let summary = sim.run().unwrap();
//! assert_eq!(summary.n_cells, 400);
//! ```

pub use epiderm_building_blocks as building_blocks;

pub use epiderm_concepts as concepts;

pub use epiderm_core as core;

/// Re-exports the default simulation types and traits.
pub mod prelude;
