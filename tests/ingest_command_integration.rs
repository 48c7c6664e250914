//! Integration test for the `ingest` and `show` commands.
//!
//! Exercises the full workflow: write daily download records to CSV, fold them into a
//! store on disk, then report the stored counts as JSON.

use download_ranges::Host;
use std::fs;
use std::path::Path;

/// Test host that captures output to in-memory buffers.
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
}

impl TestHost {
    const fn new() -> Self {
        Self {
            output_buf: Vec::new(),
            error_buf: Vec::new(),
        }
    }

    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, _code: i32) {}
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("valid path")
}

const DAY_ONE: &str = "\
package,version,downloads,date
serde,1.0.200,40,2024-06-01
serde,1.0.199,2,2024-06-01
serde,0.9.15,1,2024-06-01
tokio,1.38.0,25,2024-06-01
tokio,not-a-version,7,2024-06-01
";

const DAY_TWO: &str = "\
package,version,downloads,date
serde,1.0.201,10,2024-06-02
serde,2.0.0-alpha.1,3,2024-06-02
tokio,1.38.0,5,2024-06-02
";

#[tokio::test]
async fn test_ingest_then_show_json() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("download-ranges.toml");
    let store_path = temp_dir.path().join("data").join("store.json");
    let day_one = temp_dir.path().join("day-one.csv");
    let day_two = temp_dir.path().join("day-two.csv");
    let json_path = temp_dir.path().join("report.json");

    fs::write(&config_path, "report_windows = [1, 7]\n").expect("write config");
    fs::write(&day_one, DAY_ONE).expect("write CSV");
    fs::write(&day_two, DAY_TWO).expect("write CSV");

    let mut host = TestHost::new();
    let result = download_ranges::run(
        &mut host,
        [
            "download-ranges",
            "ingest",
            path_str(&day_two),
            path_str(&day_one),
            "--config",
            path_str(&config_path),
            "--store",
            path_str(&store_path),
        ],
    )
    .await;

    assert!(result.is_ok(), "ingest command failed: {result:?}");
    assert!(store_path.exists(), "store file should be created");
    let output = host.output_str();
    assert!(output.contains("Ingested 4 daily call(s) for 2 package(s)"), "unexpected output: {output}");
    assert!(output.contains("malformed_version=1"), "unexpected output: {output}");

    let mut host = TestHost::new();
    let result = download_ranges::run(
        &mut host,
        [
            "download-ranges",
            "show",
            "serde",
            "tokio",
            "missing",
            "--config",
            path_str(&config_path),
            "--store",
            path_str(&store_path),
            "--json",
            path_str(&json_path),
        ],
    )
    .await;

    assert!(result.is_ok(), "show command failed: {result:?}");
    assert!(host.output_str().is_empty(), "console output should be suppressed by --json");
    assert!(host.error_str().contains("'missing'"));

    let json_content = fs::read_to_string(&json_path).expect("read JSON");
    let parsed: serde_json::Value = serde_json::from_str(&json_content).expect("valid JSON");

    let packages = parsed["packages"].as_array().expect("packages array");
    assert_eq!(packages.len(), 2);

    // Days were applied in date order even though the newer file came first
    let serde = &packages[0];
    assert_eq!(serde["name"], "serde");
    assert_eq!(serde["newest_date"], "2024-06-02");
    assert_eq!(serde["totals"][0]["days"], 1);
    assert_eq!(serde["totals"][0]["downloads"], 13);
    assert_eq!(serde["totals"][1]["downloads"], 56);

    let ranges = serde["ranges"].as_array().expect("ranges array");
    let labels: Vec<_> = ranges.iter().map(|r| r["version_range"].as_str().expect("label")).collect();
    assert_eq!(labels, vec![">=2.0.0-0 <3.0.0", ">=1.0.0-0 <2.0.0", ">=0.0.0-0 <1.0.0"]);
    assert_eq!(ranges[1]["daily_counts"][0], 10);
    assert_eq!(ranges[1]["daily_counts"][1], 42);
    assert_eq!(ranges[2]["daily_counts"][1], 1);

    let tokio = &packages[1];
    assert_eq!(tokio["name"], "tokio");
    assert_eq!(tokio["ranges"][0]["daily_counts"][0], 5);
    assert_eq!(tokio["ranges"][0]["daily_counts"][1], 25);
}

#[tokio::test]
async fn test_ingest_twice_adds_downloads() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("download-ranges.toml");
    let store_path = temp_dir.path().join("store.json");
    let csv_path = temp_dir.path().join("day-one.csv");

    fs::write(&config_path, "report_windows = [30]\n").expect("write config");
    fs::write(&csv_path, DAY_ONE).expect("write CSV");

    for _ in 0..2 {
        let mut host = TestHost::new();
        let result = download_ranges::run(
            &mut host,
            [
                "download-ranges",
                "ingest",
                path_str(&csv_path),
                "--config",
                path_str(&config_path),
                "--store",
                path_str(&store_path),
            ],
        )
        .await;
        assert!(result.is_ok(), "ingest command failed: {result:?}");
    }

    let stored: serde_json::Value = serde_json::from_str(&fs::read_to_string(&store_path).expect("read store")).expect("valid JSON");
    let serde = &stored["packages"]["serde"];
    assert_eq!(serde["newest_date"], "2024-06-01");
    assert_eq!(serde["ranges"][0]["major_version"], 1);
    assert_eq!(serde["ranges"][0]["counts"][0], 84);
    assert_eq!(serde["ranges"][0]["counts"].as_array().expect("counts").len(), 731);
}

#[tokio::test]
async fn test_ingest_rejects_malformed_csv() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store_path = temp_dir.path().join("store.json");
    let csv_path = temp_dir.path().join("broken.csv");

    fs::write(&csv_path, "package,version,downloads,date\nserde,1.0.0,lots,2024-06-01\n").expect("write CSV");

    let mut host = TestHost::new();
    let result = download_ranges::run(
        &mut host,
        ["download-ranges", "ingest", path_str(&csv_path), "--store", path_str(&store_path)],
    )
    .await;

    assert!(result.is_err(), "malformed downloads column should fail");
    assert!(!store_path.exists(), "nothing should be written on failure");
}

#[tokio::test]
async fn test_init_then_validate() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("download-ranges.toml");

    let mut host = TestHost::new();
    let result = download_ranges::run(&mut host, ["download-ranges", "init", path_str(&config_path)]).await;
    assert!(result.is_ok(), "init command failed: {result:?}");
    assert!(config_path.exists());

    let mut host = TestHost::new();
    let result = download_ranges::run(&mut host, ["download-ranges", "validate", "--config", path_str(&config_path)]).await;
    assert!(result.is_ok(), "validate command failed: {result:?}");
    assert!(host.output_str().contains("Configuration file is valid"));
}
