//! # bug-cli
//!
//! Client for the bug tracker API: an HTTP client, the create/edit form,
//! the bug board with its status actions, and the `bugs` command line.

pub mod api;
pub mod board;
pub mod cli;
pub mod commands;
pub mod error;
pub mod form;
pub mod output;
pub mod ui;
pub mod view;

mod test_support;

pub use api::{BugApi, BugClient};
pub use board::{BugBoard, ListState};
pub use error::ClientError;
pub use form::{BugForm, SubmitOutcome};
