//! Write-side types for bug mutations.
//!
//! `NewBug` carries everything a create needs. `BugUpdate` has `Option`
//! fields and only `Some` fields generate SET clauses in the dynamic UPDATE
//! SQL. Both can be built from a validated [`bug_core::input::BugInput`].

pub mod bug;
