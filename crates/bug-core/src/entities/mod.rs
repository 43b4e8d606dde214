//! Entity structs for the bug tracker.
//!
//! Entities derive `Serialize`, `Deserialize`, and `JsonSchema`. The generated
//! schema carries the length bounds, so the storage layer can enforce them
//! independently of the request validator.

mod bug;

pub use bug::{Bug, DEFAULT_REPORTER};
