//! taskday library: local task store and week planner.
//!
//! Exports the core components for the binary and for integration tests.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod planner;
pub mod types;
