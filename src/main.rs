//! Aggregate daily package downloads by major version range.
//!
//! # Overview
//!
//! `download-ranges` keeps a bounded-memory history of daily download counts for each
//! package. Counts are bucketed by major semantic version (`>=M.0.0-0 <(M+1).0.0`),
//! at most five ranges are tracked per package, and two years (731 days) of daily
//! history is retained.
//!
//! # Quick Start
//!
//! Fold a day's download export into the store:
//!
//! ```bash
//! download-ranges ingest downloads-2024-06-01.csv
//! ```
//!
//! The CSV must have a `package,version,downloads,date` header, with dates written as
//! `YYYY-MM-DD`. Repeated records for the same package, version and day are summed, and
//! re-ingesting a file adds its downloads again.
//!
//! Show recent totals for every stored package, or a few:
//!
//! ```bash
//! download-ranges show
//! download-ranges show serde tokio --json report.json --console
//! ```
//!
//! # Configuration
//!
//! ```bash
//! download-ranges init
//! download-ranges validate
//! ```
//!
//! `download-ranges.toml` names the store location (`store`) and the day windows used for
//! recent totals (`report_windows`). The `--store` flag overrides the configured store.
//!
//! # Dropped Input
//!
//! Input is never rejected for content. Versions that do not parse, days more than two
//! years older than a package's newest day, and versions below every tracked range when
//! five ranges are already tracked are skipped. `ingest` reports how much was skipped,
//! and `--log-level debug` logs each skipped item.

use download_ranges::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Default host that runs real OS commands.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[tokio::main]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args()).await
}
