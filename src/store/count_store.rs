use crate::Result;
use crate::counts::CountData;
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

const LOG_TARGET: &str = "     store";

/// Aggregated counts for every known package, keyed by package name.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CountStore {
    packages: BTreeMap<String, CountData>,
}

impl CountStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a file, or start empty if the file does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!(target: LOG_TARGET, "No store at '{}', starting empty", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e).into_app_err_with(|| format!("unable to open store '{}'", path.display())),
        };

        let reader = BufReader::new(file);
        let store: Self = serde_json::from_reader(reader).into_app_err_with(|| format!("unable to parse store '{}'", path.display()))?;

        log::debug!(target: LOG_TARGET, "Loaded {} package(s) from '{}'", store.packages.len(), path.display());
        Ok(store)
    }

    /// Save the store to a file, creating parent directories as needed
    ///
    /// The document is written to a sibling temporary file, synced, then renamed over
    /// `path`, so a failed save leaves the previous store intact.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).into_app_err_with(|| format!("unable to create directory '{}'", parent.display()))?;

        // Pretty in debug builds for easier inspection, compact in release
        #[cfg(debug_assertions)]
        let bytes = serde_json::to_vec_pretty(self);
        #[cfg(not(debug_assertions))]
        let bytes = serde_json::to_vec(self);
        let bytes = bytes.into_app_err_with(|| format!("unable to serialize store '{}'", path.display()))?;

        let tmp_path = temp_path(path);
        if let Err(e) = write_synced(&tmp_path, &bytes) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        fs::rename(&tmp_path, path).into_app_err_with(|| format!("unable to replace store '{}'", path.display()))?;

        // Make the rename itself durable
        #[cfg(unix)]
        {
            if let Ok(dir) = File::open(parent) {
                let _ = dir.sync_all();
            }
        }

        log::debug!(target: LOG_TARGET, "Saved {} package(s) to '{}'", self.packages.len(), path.display());
        Ok(())
    }

    #[must_use]
    pub fn get(&self, package: &str) -> Option<&CountData> {
        self.packages.get(package)
    }

    /// Removes a package's counts so it can be mutated elsewhere, returning empty counts
    /// for a package seen for the first time.
    pub fn take(&mut self, package: &str) -> CountData {
        self.packages.remove(package).unwrap_or_default()
    }

    pub fn put(&mut self, package: impl Into<String>, data: CountData) {
        let _ = self.packages.insert(package.into(), data);
    }

    /// Packages in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CountData)> {
        self.packages.iter().map(|(name, data)| (name.as_str(), data))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// The sibling file a save is staged in, e.g. `store.json.tmp`.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(path).into_app_err_with(|| format!("unable to create '{}'", path.display()))?;
    file.write_all(bytes)
        .into_app_err_with(|| format!("unable to write '{}'", path.display()))?;
    file.sync_all().into_app_err_with(|| format!("unable to sync '{}'", path.display()))?;
    Ok(())
}
