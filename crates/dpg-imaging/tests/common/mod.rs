//! Shared test utilities for dpg-imaging integration tests.
//!
//! Builders for projects and master-file lists so table-driven cases stay
//! short.

pub mod builders;

pub use builders::*;
