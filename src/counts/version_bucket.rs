use super::DropStats;
use semver::Version;
use std::collections::BTreeMap;

const LOG_TARGET: &str = "   buckets";

/// Parses a published version string as a strict semantic version.
#[must_use]
pub fn parse_version(text: &str) -> Option<Version> {
    Version::parse(text).ok()
}

/// The version-range label for a major-version bucket, e.g. `>=2.0.0-0 <3.0.0`.
///
/// The `-0` lower bound admits every pre-release of the major version.
#[must_use]
pub fn range_label(major: u64) -> String {
    format!(">={major}.0.0-0 <{}.0.0", u128::from(major) + 1)
}

/// Sums download counts by major version.
///
/// Entries whose version does not parse are skipped and tallied in `stats`. The result
/// iterates in ascending major order.
pub fn bucket_counts<I, K>(counts: I, stats: &mut DropStats) -> BTreeMap<u64, u64>
where
    I: IntoIterator<Item = (K, u64)>,
    K: AsRef<str>,
{
    let mut buckets = BTreeMap::new();

    for (version, downloads) in counts {
        let version = version.as_ref();
        match parse_version(version) {
            Some(parsed) => {
                let sum: &mut u64 = buckets.entry(parsed.major).or_insert(0);
                *sum = sum.saturating_add(downloads);
            }
            None => {
                log::debug!(target: LOG_TARGET, "Skipping {downloads} downloads for unparsable version '{version}'");
                stats.record_malformed();
            }
        }
    }

    buckets
}
