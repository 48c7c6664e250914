use super::MAX_AGE;
use chrono::NaiveDate;
use core::cmp::Ordering;

/// Where a call's sums land on the shared time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// No date has been recorded yet, the call's date becomes the newest date.
    First,

    /// The call is this many days past the newest date. Every range shifts by that
    /// many days and the sums land at index 0.
    Advance(usize),

    /// The call's date is already inside the window, at this index.
    Index(usize),

    /// The call is this many days older than the newest date, outside the window.
    Stale(u64),
}

/// Places `date` relative to the current `newest` date.
#[must_use]
pub fn place(newest: Option<NaiveDate>, date: NaiveDate) -> Placement {
    let Some(newest) = newest else {
        return Placement::First;
    };

    let delta = date.signed_duration_since(newest).num_days();
    match delta.cmp(&0) {
        Ordering::Greater => Placement::Advance(usize::try_from(delta).unwrap_or(usize::MAX)),
        Ordering::Equal => Placement::Index(0),
        Ordering::Less => {
            let age = delta.unsigned_abs();
            match usize::try_from(age) {
                Ok(index) if index < MAX_AGE => Placement::Index(index),
                _ => Placement::Stale(age),
            }
        }
    }
}
