#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]
//! This crate encapsulates the concepts which govern the epidermal lineage model of
//! [epiderm](https://docs.rs/epiderm).
//!
//! An agent carries a [CellType] and a divisibility flag (see [Differentiation]).
//! Once per simulation step its attached [Lineage] module inspects the agent and may emit a
//! [LineageEvent]. Division events spawn a daughter via the [Division] protocol.
//! Everything spatial (positions, growth of the diameter) is owned by an external mechanics
//! engine which is only represented by the narrow traits in the mechanics module.

mod cell;
mod errors;
mod lineage;
mod mechanics;

pub use cell::*;
pub use errors::*;
pub use lineage::*;
pub use mechanics::*;
