//! Common processing logic shared between the ingest and show commands.

use super::config::Config;
use crate::Result;
use camino::Utf8PathBuf;
use clap::Args;
use clap::ValueEnum;
use directories::BaseDirs;
use ohno::IntoAppError;
use std::path::{Path, PathBuf};

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    #[must_use]
    pub fn use_colors(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => {
                use std::io::{IsTerminal, stdout};
                stdout().is_terminal()
            }
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Common arguments shared between the ingest and show commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to configuration file (default is `download-ranges.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Path to the count store, overriding the configuration
    #[arg(long, value_name = "PATH")]
    pub store: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

#[derive(Debug)]
pub struct Common {
    pub config: Config,
    pub store_path: PathBuf,
}

impl Common {
    /// Initialize logging, then load the configuration and resolve the store location
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or no store location can be determined
    pub fn new(args: &CommonArgs) -> Result<Self> {
        init_logging(args.log_level);

        let config = Config::load(&Utf8PathBuf::from("."), args.config.as_ref())?;

        let store_path = if let Some(path) = &args.store {
            path.as_std_path().to_path_buf()
        } else if let Some(path) = &config.store {
            // Relative store paths in a config file are relative to that file
            match args.config.as_ref().and_then(|config_path| config_path.parent()) {
                Some(config_dir) => config_dir.join(path).into_std_path_buf(),
                None => path.as_std_path().to_path_buf(),
            }
        } else {
            BaseDirs::new()
                .into_app_err("could not determine data directory")?
                .data_dir()
                .join("download-ranges")
                .join("store.json")
        };

        Ok(Self { config, store_path })
    }

    /// Directory holding the store file and its lock
    #[must_use]
    pub fn store_dir(&self) -> &Path {
        match self.store_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

/// Initialize logger based on log level
fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // A logger may already be installed when commands run repeatedly in one process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}
