use crate::counts::{CountData, DailyCounts, WindowTotal};
use chrono::NaiveDate;

/// A version range with its recent totals, ready for reporting.
#[derive(Debug, Clone)]
pub struct ReportableRange<'a> {
    pub label: String,
    pub totals: Vec<WindowTotal>,
    pub daily_counts: &'a DailyCounts,
}

/// A package's aggregated counts, ready for reporting.
#[derive(Debug, Clone)]
pub struct ReportablePackage<'a> {
    pub name: &'a str,
    pub newest_date: Option<NaiveDate>,
    pub totals: Vec<WindowTotal>,
    pub ranges: Vec<ReportableRange<'a>>,
}

impl<'a> ReportablePackage<'a> {
    #[must_use]
    pub fn new(name: &'a str, data: &'a CountData, windows: &[usize]) -> Self {
        let ranges = data
            .ranges()
            .map(|range| ReportableRange {
                label: range.label(),
                totals: WindowTotal::collect(range.counts(), windows),
                daily_counts: range.counts(),
            })
            .collect();

        Self {
            name,
            newest_date: data.newest_date(),
            totals: data.window_totals(windows),
            ranges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_collects_ranges_and_totals() {
        let mut data = CountData::new();
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        data.add_download_counts([("1.0.0", 3), ("2.0.0", 5)], date);

        let package = ReportablePackage::new("serde", &data, &[7]);

        assert_eq!(package.name, "serde");
        assert_eq!(package.newest_date, Some(date));
        assert_eq!(package.totals, vec![WindowTotal { days: 7, downloads: 8 }]);
        assert_eq!(package.ranges.len(), 2);
        assert_eq!(package.ranges[0].label, ">=2.0.0-0 <3.0.0");
        assert_eq!(package.ranges[0].totals[0].downloads, 5);
        assert_eq!(package.ranges[1].daily_counts[0], 3);
    }
}
