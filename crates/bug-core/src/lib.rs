//! # bug-core
//!
//! Core types, identifier rules, and validation for the bug tracker.
//!
//! This crate provides the foundational types shared by every other crate:
//! - The `Bug` entity and its wire format
//! - Status and priority enums with the status workflow
//! - Identifier format rules
//! - The single validation rule set used by the server and the client
//! - Request input parsing with partial-update semantics
//! - HTTP response bodies

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod input;
pub mod responses;
pub mod validation;
