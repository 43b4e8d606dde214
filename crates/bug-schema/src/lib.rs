//! # bug-schema
//!
//! JSON Schema generation and validation for stored bug records.
//!
//! `Bug` is defined in `bug-core` with `#[derive(JsonSchema)]`; its length
//! bounds and enum sets end up in the generated schema. The persistence layer
//! validates every record against that schema before writing, independently
//! of the request validator.

pub mod bug;
pub mod error;

pub use bug::BugSchema;
pub use error::SchemaError;
