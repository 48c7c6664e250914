//! download-ranges crate
//!
//! Bounded-memory aggregation of daily package download counts, bucketed by major
//! semantic-version range over a two-year rolling window.
//!
//! # Module Organization
//!
//! - [`counts`]: The aggregation engine ([`counts::CountData`] and its parts)
//! - [`store`]: JSON persistence of one [`counts::CountData`] per package
//! - [`commands`]: Command-line interface and orchestration
//! - [`reports`]: Console and JSON renderings of aggregated counts

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod counts;
pub mod reports;
pub mod store;

pub use crate::commands::{Host, run};
