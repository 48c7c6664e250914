use core::fmt::{Formatter, Result as FmtResult};
use core::ops::Index;
use serde::de::{Error as DeError, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of days of history kept for every range (about two years).
pub const MAX_AGE: usize = 731;

/// Daily download counts for one range, newest day first.
///
/// Index 0 holds the newest date of the owning [`super::CountData`], index `k` holds the day `k`
/// days before it. The length is always exactly [`MAX_AGE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCounts(Box<[u64; MAX_AGE]>);

impl DailyCounts {
    /// Creates an all-zero history.
    #[must_use]
    pub fn new() -> Self {
        Self(Box::new([0; MAX_AGE]))
    }

    #[must_use]
    pub fn as_array(&self) -> &[u64; MAX_AGE] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().copied()
    }

    /// Adds `downloads` to the day `age` days before the newest date.
    ///
    /// Ages outside the window are ignored.
    pub(crate) fn add(&mut self, age: usize, downloads: u64) {
        debug_assert!(age < MAX_AGE, "age {age} is outside the retention window");
        if let Some(slot) = self.0.get_mut(age) {
            *slot = slot.saturating_add(downloads);
        }
    }

    /// Moves every entry `days` positions towards the tail, zero-filling the head.
    ///
    /// Entries pushed past the end of the window are discarded.
    pub(crate) fn shift(&mut self, days: usize) {
        if days == 0 {
            return;
        }

        if days >= MAX_AGE {
            self.0.fill(0);
            return;
        }

        self.0.copy_within(..MAX_AGE - days, days);
        self.0[..days].fill(0);
    }

    /// Sums the most recent `days` entries (the whole window if `days` exceeds it).
    #[must_use]
    pub fn recent_total(&self, days: usize) -> u64 {
        self.0.iter().take(days).fold(0, |total, &count| total.saturating_add(count))
    }
}

impl Default for DailyCounts {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for DailyCounts {
    type Output = u64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Serialize for DailyCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de> Deserialize<'de> for DailyCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(DailyCountsVisitor)
    }
}

struct DailyCountsVisitor;

impl<'de> Visitor<'de> for DailyCountsVisitor {
    type Value = DailyCounts;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        write!(formatter, "a sequence of exactly {MAX_AGE} daily counts")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut counts = DailyCounts::new();
        let mut len = 0;

        while let Some(count) = seq.next_element::<u64>()? {
            if let Some(slot) = counts.0.get_mut(len) {
                *slot = count;
            }
            len += 1;
        }

        if len == MAX_AGE {
            Ok(counts)
        } else {
            Err(A::Error::invalid_length(len, &self))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_all_zero() {
        let counts = DailyCounts::new();
        assert_eq!(counts.as_array().len(), MAX_AGE);
        assert!(counts.iter().all(|c| c == 0));
    }

    #[test]
    fn test_add_accumulates() {
        let mut counts = DailyCounts::new();
        counts.add(3, 5);
        counts.add(3, 7);
        assert_eq!(counts[3], 12);
        assert_eq!(counts.recent_total(MAX_AGE), 12);
    }

    #[test]
    fn test_add_saturates() {
        let mut counts = DailyCounts::new();
        counts.add(0, u64::MAX);
        counts.add(0, 1);
        assert_eq!(counts[0], u64::MAX);
    }

    #[test]
    fn test_shift_moves_towards_tail() {
        let mut counts = DailyCounts::new();
        counts.add(0, 1);
        counts.add(1, 2);
        counts.add(MAX_AGE - 1, 9);

        counts.shift(2);

        assert_eq!(counts[0], 0);
        assert_eq!(counts[1], 0);
        assert_eq!(counts[2], 1);
        assert_eq!(counts[3], 2);
        // The oldest entry fell off the tail
        assert_eq!(counts.recent_total(MAX_AGE), 3);
        assert_eq!(counts.as_array().len(), MAX_AGE);
    }

    #[test]
    fn test_shift_zero_is_noop() {
        let mut counts = DailyCounts::new();
        counts.add(0, 4);
        counts.shift(0);
        assert_eq!(counts[0], 4);
    }

    #[test]
    fn test_shift_past_window_clears() {
        let mut counts = DailyCounts::new();
        counts.add(0, 4);
        counts.add(100, 4);
        counts.shift(MAX_AGE);
        assert_eq!(counts.recent_total(MAX_AGE), 0);

        let mut counts = DailyCounts::new();
        counts.add(0, 4);
        counts.shift(MAX_AGE + 500);
        assert_eq!(counts.recent_total(MAX_AGE), 0);
    }

    #[test]
    fn test_shift_by_one_less_than_window_keeps_newest_at_tail() {
        let mut counts = DailyCounts::new();
        counts.add(0, 6);
        counts.add(1, 8);
        counts.shift(MAX_AGE - 1);
        assert_eq!(counts[MAX_AGE - 1], 6);
        assert_eq!(counts.recent_total(MAX_AGE), 6);
    }

    #[test]
    fn test_recent_total_limits_window() {
        let mut counts = DailyCounts::new();
        counts.add(0, 1);
        counts.add(6, 10);
        counts.add(7, 100);
        assert_eq!(counts.recent_total(7), 11);
        assert_eq!(counts.recent_total(8), 111);
        assert_eq!(counts.recent_total(0), 0);
        assert_eq!(counts.recent_total(10_000), 111);
    }

    #[test]
    fn test_serde_preserves_every_entry() {
        let mut counts = DailyCounts::new();
        counts.add(0, 1);
        counts.add(MAX_AGE - 1, 2);

        let json = serde_json::to_string(&counts).unwrap();
        let restored: DailyCounts = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, counts);
    }

    #[test]
    fn test_deserialize_rejects_short_array() {
        let result = serde_json::from_str::<DailyCounts>("[1, 2, 3]");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("731"), "unexpected error: {err}");
    }

    #[test]
    fn test_deserialize_rejects_long_array() {
        let json = serde_json::to_string(&vec![0_u64; MAX_AGE + 1]).unwrap();
        assert!(serde_json::from_str::<DailyCounts>(&json).is_err());
    }
}
