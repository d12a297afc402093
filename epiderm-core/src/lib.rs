#![deny(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! This crate collects objects and methods needed to run the lineage simulation of agents
//! which satisfy the [concepts](epiderm_concepts).
//!
//! ## Population
//! Cells are owned by a [Population](datastructures::Population).
//! New cells are staged first and become visible with a single commit.
//! This is used by the [PopulationSeeder](setup::PopulationSeeder) to place the initial cells
//! and by every step to register daughters.
//!
//! ## Steps
//! One step evaluates the behavior of every cell in parallel on copies of the cells.
//! Only when all cells succeeded, the results are written back and the daughters are committed
//! in the order of their mothers.
//! The outcome of a step is therefore independent of the number of threads.
//! See [Population::update_lineage](datastructures::Population::update_lineage).
//!
//! ## Storage
//! The [SimulationContext](simulation::SimulationContext) saves snapshots of the population
//! as json files at every save point of the [time] stepper if a
//! [StorageBuilder](storage::StorageBuilder) was given in the [Settings](config::Settings).

/// Settings of a simulation
pub mod config;
/// Container for all cells
pub mod datastructures;
/// Aggregated error type
pub mod errors;
/// Seeding of initial populations
pub mod setup;
/// Driver of the simulation
pub mod simulation;
pub mod storage;
pub mod time;
/// A single lineage step
pub mod update_lineage;

#[doc(hidden)]
pub use rayon;

#[cfg(feature = "tracing")]
#[doc(hidden)]
pub use tracing;
