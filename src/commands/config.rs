use crate::Result;
use crate::counts::MAX_AGE;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Configuration file looked up in the current directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "download-ranges.toml";

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path of the JSON store holding every package's counts
    #[serde(default)]
    pub store: Option<Utf8PathBuf>,

    /// Window lengths, in days, for recent-download totals
    #[serde(default = "default_report_windows")]
    pub report_windows: Vec<usize>,
}

fn default_report_windows() -> Vec<usize> {
    vec![7, 30, 90, 365]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: None,
            report_windows: default_report_windows(),
        }
    }
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    // No config file found, use defaults
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a report window is empty or longer than the retained history
    fn validate(&self) -> Result<()> {
        if self.report_windows.is_empty() {
            return Err(app_err!("report_windows must list at least one window"));
        }

        if let Some(&days) = self.report_windows.iter().find(|&&days| days == 0 || days > MAX_AGE) {
            return Err(app_err!("report_windows entries must be between 1 and {MAX_AGE} days, got {days}"));
        }

        Ok(())
    }
}
