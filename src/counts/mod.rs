//! Per-package daily download aggregation
//!
//! This module implements a bounded-memory structure that accumulates daily download
//! counts for a single package, buckets them by major semantic-version range, and
//! retains a fixed rolling history of [`MAX_AGE`] days.
//!
//! # Implementation Model
//!
//! [`CountData`] is the only mutating entry point. Each call to
//! [`CountData::add_download_counts`] runs three stages:
//!
//! 1. **Bucketing**: every version string is parsed and its count is summed into
//!    the bucket of its major version. Unparsable versions are skipped.
//! 2. **Placement**: the call's date is compared with the shared newest date. A
//!    newer date shifts every tracked range's history to make room for the new day,
//!    an equal or older date in the window selects the index the sums are added to,
//!    and a date outside the window drops the whole call.
//! 3. **Routing**: each bucket is added to its range in the [`RangeTable`], which
//!    creates missing ranges and evicts the lowest range when at [`MAX_RANGES`].
//!
//! Nothing in this module performs I/O or fails on caller input. Dropped input is
//! tallied in [`DropStats`] and logged.

mod count_data;
mod daily_counts;
mod drop_stats;
mod major_range;
mod range_table;
mod version_bucket;
mod window;
mod window_totals;

pub use count_data::{CountData, RangeCounts};
pub use daily_counts::{DailyCounts, MAX_AGE};
pub use drop_stats::{DropReason, DropStats};
pub use major_range::MajorRange;
pub use range_table::{MAX_RANGES, RangeTable};
pub use version_bucket::{bucket_counts, parse_version, range_label};
pub use window::{Placement, place};
pub use window_totals::WindowTotal;
