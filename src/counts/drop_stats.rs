use core::fmt::{Display, Formatter, Result as FmtResult};
use core::ops::AddAssign;
use serde::Serialize;
use strum::{Display as StrumDisplay, EnumIter, IntoEnumIterator};

/// Why caller input was discarded instead of aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
#[strum(serialize_all = "snake_case")]
pub enum DropReason {
    /// A version string could not be parsed as a semantic version.
    MalformedVersion,

    /// A call's date was older than the retention window.
    StaleDate,

    /// A bucket's major version was below every tracked range while at capacity.
    BelowFloor,
}

/// Tallies of caller input dropped by [`super::CountData::add_download_counts`].
///
/// These are operational counters only. They are kept in memory and never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DropStats {
    /// Map entries skipped because their version did not parse.
    pub malformed_versions: u64,

    /// Whole calls dropped because their date was outside the window.
    pub stale_calls: u64,

    /// Downloads carried by the stale calls.
    pub stale_downloads: u64,

    /// Buckets dropped because they sat below the tracked floor at capacity.
    pub below_floor_buckets: u64,

    /// Downloads carried by the below-floor buckets.
    pub below_floor_downloads: u64,
}

impl DropStats {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.malformed_versions == 0 && self.stale_calls == 0 && self.below_floor_buckets == 0
    }

    /// Number of dropped items for a given reason.
    #[must_use]
    pub const fn count(&self, reason: DropReason) -> u64 {
        match reason {
            DropReason::MalformedVersion => self.malformed_versions,
            DropReason::StaleDate => self.stale_calls,
            DropReason::BelowFloor => self.below_floor_buckets,
        }
    }

    pub(crate) const fn record_malformed(&mut self) {
        self.malformed_versions += 1;
    }

    pub(crate) const fn record_stale(&mut self, downloads: u64) {
        self.stale_calls += 1;
        self.stale_downloads = self.stale_downloads.saturating_add(downloads);
    }

    pub(crate) const fn record_below_floor(&mut self, downloads: u64) {
        self.below_floor_buckets += 1;
        self.below_floor_downloads = self.below_floor_downloads.saturating_add(downloads);
    }
}

impl AddAssign for DropStats {
    fn add_assign(&mut self, other: Self) {
        self.malformed_versions += other.malformed_versions;
        self.stale_calls += other.stale_calls;
        self.stale_downloads = self.stale_downloads.saturating_add(other.stale_downloads);
        self.below_floor_buckets += other.below_floor_buckets;
        self.below_floor_downloads = self.below_floor_downloads.saturating_add(other.below_floor_downloads);
    }
}

impl Display for DropStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.is_empty() {
            return write!(f, "nothing dropped");
        }

        let parts: Vec<String> = DropReason::iter()
            .filter(|&reason| self.count(reason) > 0)
            .map(|reason| format!("{reason}={}", self.count(reason)))
            .collect();

        write!(f, "{}", parts.join(", "))
    }
}
