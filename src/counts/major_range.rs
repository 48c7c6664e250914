use super::{DailyCounts, range_label};
use serde::{Deserialize, Serialize};

/// The daily history of every version sharing one major version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorRange {
    major_version: u64,
    counts: DailyCounts,
}

impl MajorRange {
    /// Creates a range with an all-zero history.
    #[must_use]
    pub fn new(major_version: u64) -> Self {
        Self {
            major_version,
            counts: DailyCounts::new(),
        }
    }

    #[must_use]
    pub const fn major_version(&self) -> u64 {
        self.major_version
    }

    #[must_use]
    pub const fn counts(&self) -> &DailyCounts {
        &self.counts
    }

    /// The version-range label, e.g. `>=1.0.0-0 <2.0.0`.
    #[must_use]
    pub fn label(&self) -> String {
        range_label(self.major_version)
    }

    /// Downloads over the most recent `days` days.
    #[must_use]
    pub fn recent_total(&self, days: usize) -> u64 {
        self.counts.recent_total(days)
    }

    pub(crate) fn add(&mut self, age: usize, downloads: u64) {
        self.counts.add(age, downloads);
    }

    pub(crate) fn shift(&mut self, days: usize) {
        self.counts.shift(days);
    }
}
