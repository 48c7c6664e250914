use super::MajorRange;
use serde::{Deserialize, Serialize};

/// Maximum number of major-version ranges tracked at once.
pub const MAX_RANGES: usize = 5;

/// What happened when a bucket was routed into a [`RangeTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RangeUpdate {
    /// The bucket's range already existed.
    Updated,

    /// A new range was created in a free slot.
    Created,

    /// A new range was created after evicting the range with this major version.
    Evicted(u64),

    /// The table is full and the bucket sits below every tracked range, so nothing changed.
    BelowFloor,
}

/// The tracked ranges of one package, strictly descending by major version.
///
/// Holds at most [`MAX_RANGES`] ranges. A small sorted vector is all this needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RangeTable {
    #[serde(deserialize_with = "deserialize_ranges")]
    ranges: Vec<MajorRange>,
}

impl RangeTable {
    #[must_use]
    pub const fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.ranges.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Ranges from the highest major version to the lowest.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &MajorRange> {
        self.ranges.iter()
    }

    #[must_use]
    pub fn get(&self, major: u64) -> Option<&MajorRange> {
        self.position(major).ok().and_then(|index| self.ranges.get(index))
    }

    #[must_use]
    pub fn max_major(&self) -> Option<u64> {
        self.ranges.first().map(MajorRange::major_version)
    }

    #[must_use]
    pub fn min_major(&self) -> Option<u64> {
        self.ranges.last().map(MajorRange::major_version)
    }

    /// Shifts every range's history by `days`.
    pub(crate) fn shift(&mut self, days: usize) {
        for range in &mut self.ranges {
            range.shift(days);
        }
    }

    /// Adds `downloads` at `age` to the range for `major`, creating it if needed.
    ///
    /// When the table is full, a new range evicts the current lowest range, unless the
    /// new range would itself be the lowest, in which case the bucket is dropped.
    pub(crate) fn add(&mut self, major: u64, age: usize, downloads: u64) -> RangeUpdate {
        let index = match self.position(major) {
            Ok(index) => {
                if let Some(range) = self.ranges.get_mut(index) {
                    range.add(age, downloads);
                }
                return RangeUpdate::Updated;
            }
            Err(index) => index,
        };

        let update = if self.ranges.len() < MAX_RANGES {
            RangeUpdate::Created
        } else if index == self.ranges.len() {
            return RangeUpdate::BelowFloor;
        } else {
            // The insertion point is above the last slot, so it survives the pop
            match self.ranges.pop() {
                Some(evicted) => RangeUpdate::Evicted(evicted.major_version()),
                None => RangeUpdate::Created,
            }
        };

        let mut range = MajorRange::new(major);
        range.add(age, downloads);
        self.ranges.insert(index, range);
        update
    }

    /// Binary search over the descending order.
    fn position(&self, major: u64) -> Result<usize, usize> {
        self.ranges.binary_search_by(|range| major.cmp(&range.major_version()))
    }
}

fn deserialize_ranges<'de, D>(deserializer: D) -> Result<Vec<MajorRange>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let ranges = Vec::<MajorRange>::deserialize(deserializer)?;

    if ranges.len() > MAX_RANGES {
        return Err(D::Error::custom(format!(
            "expected at most {MAX_RANGES} version ranges, found {}",
            ranges.len()
        )));
    }

    let descending = ranges
        .iter()
        .zip(ranges.iter().skip(1))
        .all(|(higher, lower)| higher.major_version() > lower.major_version());
    if !descending {
        return Err(D::Error::custom("version ranges must be strictly descending by major version"));
    }

    Ok(ranges)
}
