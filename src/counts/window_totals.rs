use super::{DailyCounts, MAX_AGE};
use serde::{Deserialize, Serialize};

/// Downloads over the most recent `days` days, ending at the newest date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowTotal {
    pub days: usize,
    pub downloads: u64,
}

impl WindowTotal {
    /// Computes one total per requested window over a single history.
    ///
    /// Windows longer than [`MAX_AGE`] are clamped to the whole history.
    #[must_use]
    pub fn collect(counts: &DailyCounts, windows: &[usize]) -> Vec<Self> {
        windows
            .iter()
            .map(|&days| Self {
                days,
                downloads: counts.recent_total(days.min(MAX_AGE)),
            })
            .collect()
    }
}
