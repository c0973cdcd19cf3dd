//! dayreport configuration.
//!
//! Loaded from `~/.dayreport/config.toml`, or from the path given with
//! `--config`. When the default file is missing the built-in hierarchy
//! and export settings are used.
//!
//! ```toml
//! export-file = "work_reports.csv"
//! date-format = "%-m/%-d/%Y"
//!
//! [[department]]
//! name = "Engineering"
//!
//! [[department.team]]
//! name = "Backend"
//! managers = ["Alice", "Rahul Mehta"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use jiff::civil::date;
use serde::Deserialize;

use crate::export::{self, DEFAULT_DATE_FORMAT, DEFAULT_FILE_NAME};
use crate::model::{Department, ReferenceHierarchy};

/// The file as written on disk.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ConfigFile {
    export_file: Option<PathBuf>,
    date_format: Option<String>,
    #[serde(default)]
    department: Vec<Department>,
}

/// Resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where `export` writes when no `--out` is given.
    pub export_file: PathBuf,

    /// strftime pattern for dates in exports and the table.
    pub date_format: String,

    pub hierarchy: ReferenceHierarchy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_file: PathBuf::from(DEFAULT_FILE_NAME),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            hierarchy: ReferenceHierarchy::default(),
        }
    }
}

impl Config {
    /// Load config from `explicit`, or from the default path.
    ///
    /// A missing explicit file is an error; a missing default file is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self, String> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let contents = fs::read_to_string(&path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        Self::parse(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// Parse and validate config file contents.
    pub fn parse(contents: &str) -> Result<Self, String> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| e.to_string())?;
        let defaults = Self::default();

        let date_format = file.date_format.unwrap_or(defaults.date_format);
        export::format_date(date(2024, 1, 15), &date_format)
            .map_err(|e| format!("date-format '{date_format}' is not usable: {e}"))?;

        let export_file = file.export_file.unwrap_or(defaults.export_file);
        if export_file.as_os_str().is_empty() {
            return Err("export-file is empty".to_string());
        }

        let hierarchy = if file.department.is_empty() {
            defaults.hierarchy
        } else {
            ReferenceHierarchy::new(file.department)?
        };

        Ok(Self {
            export_file,
            date_format,
            hierarchy,
        })
    }

    /// The config file path: `~/.dayreport/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".dayreport").join("config.toml"))
    }
}
