//! Settings file for the CLI.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use simplelog::LevelFilter;
use tabula_lib::model::DEFAULT_KEY_FIELD;
use tabula_lib::view::ViewConfig;

use crate::error::CliError;

/// Contents of `config.json`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Defaults for the table view.
    pub view: ViewConfig,
    /// Field holding each record's identity.
    pub key_field: String,
    /// Log level written to the log file.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            view: ViewConfig::default(),
            key_field: DEFAULT_KEY_FIELD.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(CliError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::parse(&text).map_err(|source| CliError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Configured log level; unknown names fall back to `Info`.
    pub fn level(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}
