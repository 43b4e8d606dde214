//! Shared test utilities for bug-db unit tests.
