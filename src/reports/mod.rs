//! Report generation for aggregated download counts
//!
//! Both generators take a slice of [`ReportablePackage`]: a package's newest date,
//! its package-wide recent totals and, per version range, the range label, its recent
//! totals and its full daily history.
//!
//! - **Console**: aligned text with optional ANSI colors
//! - **JSON**: machine-readable output carrying the full daily histories

mod console;
mod json;
mod reportable_package;

pub use console::generate as generate_console;
pub use json::generate as generate_json;
pub use reportable_package::{ReportablePackage, ReportableRange};
