use super::ReportablePackage;
use crate::Result;
use crate::counts::WindowTotal;
use core::fmt::Write;
use owo_colors::OwoColorize;

const ALL_RANGES: &str = "all ranges";
const COLUMN_WIDTH: usize = 10;

pub fn generate<W: Write>(packages: &[ReportablePackage<'_>], use_colors: bool, writer: &mut W) -> Result<()> {
    for (index, package) in packages.iter().enumerate() {
        if index > 0 {
            writeln!(writer)?;
            writeln!(writer, "═══════════════════════════════════════")?;
            writeln!(writer)?;
        }

        let name = if use_colors {
            package.name.bold().to_string()
        } else {
            package.name.to_string()
        };

        let Some(newest_date) = package.newest_date else {
            writeln!(writer, "{name}: no downloads recorded")?;
            continue;
        };

        writeln!(writer, "{name}: newest day {newest_date}")?;

        let label_width = package
            .ranges
            .iter()
            .map(|range| range.label.len())
            .chain([ALL_RANGES.len()])
            .max()
            .unwrap_or(0);

        let mut header = format!("  {:<label_width$}", "range");
        for total in &package.totals {
            let days = format!("{}d", total.days);
            write!(header, "{days:>COLUMN_WIDTH$}")?;
        }
        if use_colors {
            writeln!(writer, "{}", header.dimmed())?;
        } else {
            writeln!(writer, "{header}")?;
        }

        write_row(writer, ALL_RANGES, &package.totals, label_width)?;
        for range in &package.ranges {
            write_row(writer, &range.label, &range.totals, label_width)?;
        }
    }

    Ok(())
}

fn write_row<W: Write>(writer: &mut W, label: &str, totals: &[WindowTotal], label_width: usize) -> Result<()> {
    write!(writer, "  {label:<label_width$}")?;
    for total in totals {
        write!(writer, "{:>COLUMN_WIDTH$}", total.downloads)?;
    }
    writeln!(writer)?;
    Ok(())
}
