//! Command-line interface and orchestration for download-ranges
//!
//! # Commands
//!
//! - **ingest**: Read daily download records from CSV files and fold them into the
//!   stored counts, one call per package and day
//! - **show**: Report stored counts per package and version range, with recent totals
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! appropriate command handler. The `common` module provides shared functionality
//! like logging setup, configuration loading and store location.
//!
//! Configuration is a TOML file naming the store location and the recent-total
//! windows used by reports.

mod common;
mod config;
mod host;
mod ingest;
mod init;
mod run;
mod show;
mod validate;

pub use common::{ColorMode, CommonArgs, LogLevel};
pub use config::Config;
pub use host::Host;
pub use ingest::{IngestArgs, ingest_downloads};
pub use init::{InitArgs, init_config};
pub use run::run;
pub use show::{ShowArgs, show_counts};
pub use validate::{ValidateArgs, validate_config};
