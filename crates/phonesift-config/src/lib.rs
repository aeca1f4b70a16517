use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use phonesift_core::RowFilter;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "phonesift";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_SOURCE_DIR: &str = "./data";
pub const DEFAULT_CITY: &str = "Армавир";
pub const DEFAULT_YEAR_FROM: i32 = 2021;
pub const DEFAULT_YEAR_TO: i32 = 2024;
pub const DEFAULT_SHEET: &str = "Лист1";
pub const DEFAULT_OUTPUT: &str = "./phones.csv";

/// Settings for one extraction run. Built once at startup and only read
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub source_dir: PathBuf,
    pub city: String,
    pub year_from: i32,
    pub year_to: i32,
    pub sheet: String,
    pub output: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            city: DEFAULT_CITY.to_string(),
            year_from: DEFAULT_YEAR_FROM,
            year_to: DEFAULT_YEAR_TO,
            sheet: DEFAULT_SHEET.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl RunConfig {
    pub fn row_filter(&self) -> RowFilter {
        RowFilter::new(self.city.clone(), self.year_from, self.year_to)
    }

    /// Applies command-line values on top of this config and validates the
    /// result.
    pub fn with_overrides(mut self, overrides: RunOverrides) -> Result<Self> {
        if let Some(path) = overrides.source_dir {
            self.source_dir = path;
        }
        if let Some(city) = overrides.city {
            self.city = city;
        }
        if let Some(from) = overrides.year_from {
            self.year_from = from;
        }
        if let Some(to) = overrides.year_to {
            self.year_to = to;
        }
        if let Some(sheet) = overrides.sheet {
            self.sheet = sheet;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.source_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidSourcePath(self.source_dir.clone()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::InvalidOutputPath(self.output.clone()));
        }
        if self.city.is_empty() {
            return Err(ConfigError::EmptyCity);
        }
        if self.sheet.is_empty() {
            return Err(ConfigError::EmptySheet);
        }
        if self.year_from > self.year_to {
            return Err(ConfigError::InvalidYearRange {
                from: self.year_from,
                to: self.year_to,
            });
        }
        Ok(())
    }
}

/// Values given on the command line. `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub source_dir: Option<PathBuf>,
    pub city: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub sheet: Option<String>,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid source path: {0:?}")]
    InvalidSourcePath(PathBuf),
    #[error("invalid output path: {0:?}")]
    InvalidOutputPath(PathBuf),
    #[error("city cannot be empty")]
    EmptyCity,
    #[error("sheet name cannot be empty")]
    EmptySheet,
    #[error("invalid year range: from {from} is after to {to}")]
    InvalidYearRange { from: i32, to: i32 },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    path: Option<PathBuf>,
    city: Option<String>,
    from: Option<i32>,
    to: Option<i32>,
    sheet: Option<String>,
    out: Option<PathBuf>,
}

/// Loads the run config from `config_path`, or from the default location
/// when none is given. A missing default file yields the built-in defaults;
/// a missing explicit file is an error.
pub fn load(config_path: Option<PathBuf>) -> Result<RunConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(RunConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(RunConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(RunConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<RunConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(Some(merge_config(parsed, base_dir)))
}

/// Paths written in a config file are relative to the file itself, so an
/// order archive can ship its own `config.toml` next to the spreadsheets.
fn merge_config(parsed: ConfigFile, base_dir: &Path) -> RunConfig {
    let defaults = RunConfig::default();
    RunConfig {
        source_dir: parsed
            .path
            .map(|dir| base_dir.join(dir))
            .unwrap_or(defaults.source_dir),
        city: parsed.city.unwrap_or(defaults.city),
        year_from: parsed.from.unwrap_or(defaults.year_from),
        year_to: parsed.to.unwrap_or(defaults.year_to),
        sheet: parsed.sheet.unwrap_or(defaults.sheet),
        output: parsed
            .out
            .map(|out| base_dir.join(out))
            .unwrap_or(defaults.output),
    }
}
