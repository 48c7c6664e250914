use super::ReportablePackage;
use crate::Result;
use core::fmt::Write;
use serde_json::json;

pub fn generate<W: Write>(packages: &[ReportablePackage<'_>], writer: &mut W) -> Result<()> {
    let package_data: Vec<_> = packages
        .iter()
        .map(|package| {
            let ranges: Vec<_> = package
                .ranges
                .iter()
                .map(|range| {
                    json!({
                        "version_range": range.label,
                        "totals": range.totals,
                        "daily_counts": range.daily_counts,
                    })
                })
                .collect();

            json!({
                "name": package.name,
                "newest_date": package.newest_date.map(|date| date.to_string()),
                "totals": package.totals,
                "ranges": ranges,
            })
        })
        .collect();

    let output = json!({
        "packages": package_data
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
