//! CLI command implementations
//!
//! This module re-exports all CLI command functions.

pub mod config_management;
mod export;
mod report;

pub use export::*;
pub use report::*;
