//! Service layer for business logic
//!
//! This module provides the dashboard analytics service shared between the
//! CLI and embedding applications.

mod analytics_service;

pub use analytics_service::*;
