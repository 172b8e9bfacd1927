//! Order Analytics - dashboard statistics for a restaurant ordering system
//!
//! This library turns a batch of already-fetched orders into the numbers an
//! admin dashboard shows: a revenue time series, a 24-hour peak-hours
//! histogram, top customers, best-selling products and headline totals.
//!
//! # Features
//! - **cli**: Command-line reports and CSV export (default)
//!
//! # Architecture
//! - `analytics`: Pure aggregation functions over `&[Order]`
//! - `storage`: Order store trait and backends (JSON file, memory)
//! - `services`: Fetch-once service layer feeding every aggregator
//! - `config`: TOML + environment configuration
//! - `interfaces`: CLI commands
//! - `system`: Logging initialisation
//! - `utils`: CSV export and duration parsing

pub mod analytics;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
#[cfg(feature = "cli")]
pub mod interfaces;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
