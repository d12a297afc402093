//! Snapshots of the population at save points of the time stepper.
//!
//! Results are written below a location configured by the [StorageBuilder].
//! Every saved iteration receives its own folder which contains a single json file.
//! ```text
//! out/2024-07-01-T12-00-00/
//! ├── 00000000000000000000
//! │   └── cells.json
//! └── 00000000000000000010
//!     └── cells.json
//! ```

// Common interface for all storage solutions
mod concepts;
// Json files written with serde_json
mod serde_json;

pub use self::concepts::*;
pub use self::serde_json::*;
