use super::range_table::RangeUpdate;
use super::{DailyCounts, DropStats, MAX_AGE, MajorRange, Placement, RangeTable, WindowTotal, bucket_counts, place};
use chrono::NaiveDate;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};

const LOG_TARGET: &str = "    counts";

/// Aggregated daily downloads of one package, bucketed by major version.
///
/// Every tracked range shares the same time axis: index 0 of each range's counts is
/// [`Self::newest_date`]. The structure is single-writer. Callers that share an
/// instance between tasks must serialize calls to [`Self::add_download_counts`].
///
/// Serializes as `{ "newest_date": ..., "ranges": [{ "major_version": ..., "counts": [...] }] }`.
/// Drop counters are not part of the serialized form. Restoring rejects ranges recorded
/// without a newest date, since their counts have no position on the time axis.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CountData {
    newest_date: Option<NaiveDate>,
    ranges: RangeTable,

    #[serde(skip)]
    drop_stats: DropStats,
}

/// The persisted fields of [`CountData`], before validation.
#[derive(Deserialize)]
struct StoredCountData {
    newest_date: Option<NaiveDate>,
    ranges: RangeTable,
}

impl<'de> Deserialize<'de> for CountData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stored = StoredCountData::deserialize(deserializer)?;

        if stored.newest_date.is_none() && !stored.ranges.is_empty() {
            return Err(D::Error::custom("version ranges are present but no newest date is recorded"));
        }

        Ok(Self {
            newest_date: stored.newest_date,
            ranges: stored.ranges,
            drop_stats: DropStats::default(),
        })
    }
}

/// One range in the output representation: its label and its full daily history.
#[derive(Debug, Clone, Serialize)]
pub struct RangeCounts<'a> {
    pub version_range: String,
    pub daily_counts: &'a DailyCounts,
}

impl CountData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one day's downloads, keyed by version string.
    ///
    /// Counts for the same date are added to what is already recorded, never overwritten.
    /// Calls may arrive in any date order. Input is dropped rather than rejected when:
    ///
    /// - a version does not parse (that entry only),
    /// - `date` is [`super::MAX_AGE`] or more days before the newest date (the whole call),
    /// - the table is full and a bucket's major version is below every tracked range
    ///   (that bucket only).
    ///
    /// Drops are tallied in [`Self::drop_stats`].
    pub fn add_download_counts<I, K>(&mut self, counts: I, date: NaiveDate)
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        let buckets = bucket_counts(counts, &mut self.drop_stats);

        let age = match place(self.newest_date, date) {
            Placement::First => {
                self.newest_date = Some(date);
                0
            }
            Placement::Advance(days) => {
                self.ranges.shift(days);
                self.newest_date = Some(date);
                0
            }
            Placement::Index(age) => age,
            Placement::Stale(age) => {
                let downloads = buckets.values().fold(0_u64, |total, &sum| total.saturating_add(sum));
                log::debug!(target: LOG_TARGET, "Dropping {downloads} downloads for {date}, {age} days before the newest date");
                self.drop_stats.record_stale(downloads);
                return;
            }
        };

        for (major, downloads) in buckets {
            match self.ranges.add(major, age, downloads) {
                RangeUpdate::Updated | RangeUpdate::Created => {}
                RangeUpdate::Evicted(evicted) => {
                    log::info!(target: LOG_TARGET, "Evicted version range {evicted}.x to track {major}.x");
                }
                RangeUpdate::BelowFloor => {
                    log::debug!(target: LOG_TARGET, "Dropping {downloads} downloads for {major}.x, below every tracked range");
                    self.drop_stats.record_below_floor(downloads);
                }
            }
        }
    }

    /// The date held at index 0 of every range, if any call has been made.
    #[must_use]
    pub const fn newest_date(&self) -> Option<NaiveDate> {
        self.newest_date
    }

    #[must_use]
    pub const fn range_table(&self) -> &RangeTable {
        &self.ranges
    }

    /// Ranges from the highest major version to the lowest.
    pub fn ranges(&self) -> impl ExactSizeIterator<Item = &MajorRange> {
        self.ranges.iter()
    }

    #[must_use]
    pub fn range(&self, major: u64) -> Option<&MajorRange> {
        self.ranges.get(major)
    }

    /// The output representation: labelled histories, highest major version first.
    pub fn range_counts(&self) -> impl Iterator<Item = RangeCounts<'_>> {
        self.ranges.iter().map(|range| RangeCounts {
            version_range: range.label(),
            daily_counts: range.counts(),
        })
    }

    /// Downloads across all ranges over the most recent `days` days.
    #[must_use]
    pub fn recent_total(&self, days: usize) -> u64 {
        self.ranges
            .iter()
            .fold(0, |total, range| total.saturating_add(range.recent_total(days)))
    }

    /// Package-wide totals, one per requested window.
    #[must_use]
    pub fn window_totals(&self, windows: &[usize]) -> Vec<WindowTotal> {
        windows
            .iter()
            .map(|&days| WindowTotal {
                days,
                downloads: self.recent_total(days.min(MAX_AGE)),
            })
            .collect()
    }

    #[must_use]
    pub const fn drop_stats(&self) -> &DropStats {
        &self.drop_stats
    }

    /// Returns the drop counters and resets them.
    pub fn take_drop_stats(&mut self) -> DropStats {
        core::mem::take(&mut self.drop_stats)
    }
}
