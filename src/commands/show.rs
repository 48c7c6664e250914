use super::Host;
use super::common::{ColorMode, Common, CommonArgs};
use crate::Result;
use crate::reports::{ReportablePackage, generate_console, generate_json};
use crate::store::CountStore;
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Packages to show (default is every stored package)
    #[arg(value_name = "PACKAGE")]
    pub packages: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Output the counts, including full daily histories, to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Output the counts to the console even when writing a JSON file
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,
}

pub fn show_counts<H: Host>(host: &mut H, args: &ShowArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let store = CountStore::load(&common.store_path)?;
    let windows = &common.config.report_windows;

    let packages: Vec<ReportablePackage<'_>> = if args.packages.is_empty() {
        store
            .iter()
            .map(|(name, data)| ReportablePackage::new(name, data, windows))
            .collect()
    } else {
        let mut found = Vec::with_capacity(args.packages.len());
        for name in &args.packages {
            if let Some(data) = store.get(name) {
                found.push(ReportablePackage::new(name, data, windows));
            } else {
                let _ = writeln!(host.error(), "No download counts recorded for package '{name}'");
            }
        }
        found
    };

    if args.console || args.json.is_none() {
        let mut console_output = String::new();
        generate_console(&packages, args.color.use_colors(), &mut console_output)?;
        let _ = write!(host.output(), "{console_output}");
    }

    if let Some(filename) = &args.json {
        let mut json_output = String::new();
        generate_json(&packages, &mut json_output)?;
        fs::write(filename, json_output).into_app_err_with(|| format!("writing JSON report '{filename}'"))?;
    }

    Ok(())
}
