use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::counts::{CountData, DropStats};
use crate::store::{CountStore, acquire_store_lock};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use clap::Parser;
use ohno::IntoAppError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "    ingest";

/// Daily downloads per version, per date, per package
type PackageCalls = BTreeMap<String, BTreeMap<NaiveDate, BTreeMap<String, u64>>>;

#[derive(Parser, Debug)]
pub struct IngestArgs {
    /// CSV files with `package,version,downloads,date` records
    #[arg(value_name = "CSV", required = true)]
    pub files: Vec<Utf8PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// One record of a daily download export
#[derive(Debug, Deserialize)]
struct DownloadRow {
    package: String,
    version: String,
    downloads: u64,
    date: NaiveDate,
}

/// Outcome of folding one package's calls into its counts
#[derive(Debug)]
struct PackageOutcome {
    package: String,
    data: CountData,
    calls: usize,
    drops: DropStats,
}

/// Read download records, grouping them into one call per package and date
fn read_download_files(files: &[Utf8PathBuf]) -> Result<PackageCalls> {
    let mut calls = PackageCalls::new();

    for path in files {
        let rows = read_download_file(path)?;
        log::debug!(target: LOG_TARGET, "Read {} record(s) from '{path}'", rows.len());

        for row in rows {
            let downloads = calls
                .entry(row.package)
                .or_default()
                .entry(row.date)
                .or_default()
                .entry(row.version)
                .or_insert(0);
            *downloads = downloads.saturating_add(row.downloads);
        }
    }

    Ok(calls)
}

fn read_download_file(path: &Utf8Path) -> Result<Vec<DownloadRow>> {
    let file = fs::File::open(path).into_app_err_with(|| format!("opening download records '{path}'"))?;
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    reader
        .deserialize::<DownloadRow>()
        .map(|row| row.into_app_err_with(|| format!("reading download records '{path}'")))
        .collect()
}

/// Apply every call for one package, oldest date first
fn apply_calls(package: String, mut data: CountData, days: BTreeMap<NaiveDate, BTreeMap<String, u64>>) -> PackageOutcome {
    let calls = days.len();
    for (date, counts) in days {
        data.add_download_counts(counts, date);
    }

    let drops = data.take_drop_stats();
    if !drops.is_empty() {
        log::info!(target: LOG_TARGET, "Dropped input for '{package}': {drops}");
    }

    PackageOutcome {
        package,
        data,
        calls,
        drops,
    }
}

pub async fn ingest_downloads<H: Host>(host: &mut H, args: &IngestArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let calls = read_download_files(&args.files)?;

    let store_dir = common.store_dir();
    fs::create_dir_all(store_dir).into_app_err_with(|| format!("unable to create directory '{}'", store_dir.display()))?;
    let _lock = acquire_store_lock(store_dir).await?;

    let mut store = CountStore::load(&common.store_path)?;

    // Each task owns its package's counts outright, so packages proceed in parallel
    let tasks: Vec<_> = calls
        .into_iter()
        .map(|(package, days)| {
            let data = store.take(&package);
            tokio::task::spawn_blocking(move || apply_calls(package, data, days))
        })
        .collect();

    let mut packages = 0;
    let mut total_calls = 0;
    let mut total_drops = DropStats::default();

    for outcome in futures::future::join_all(tasks).await {
        let outcome = outcome.into_app_err("ingest task panicked")?;
        log::debug!(target: LOG_TARGET, "Applied {} daily call(s) for '{}'", outcome.calls, outcome.package);

        packages += 1;
        total_calls += outcome.calls;
        total_drops += outcome.drops;
        store.put(outcome.package, outcome.data);
    }

    store.save(&common.store_path)?;

    let _ = writeln!(
        host.output(),
        "Ingested {total_calls} daily call(s) for {packages} package(s) into '{}' ({total_drops})",
        common.store_path.display()
    );

    Ok(())
}
