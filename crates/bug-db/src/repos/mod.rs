//! Repository modules implementing CRUD operations.
//!
//! Each module adds methods to `BugService` via `impl BugService` blocks.

pub mod bug;
