//! CLI error type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot load records: {0}")]
    Load(#[from] tabula_lib::error::LoadError),
    #[error("invalid settings in {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid column spec '{0}': expected field[:left|right|center][:width]")]
    ColumnSpec(String),
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
    #[error("no row {0} on this page")]
    NoSuchRow(usize),
    #[error("logger: {0}")]
    Logger(String),
}
